//! Projection of named custom-field values out of a task record.

use super::{DATE_FORMAT, EpochValue, TimestampError, epoch_to_date_string};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Name of the drop-down field holding the task type.
pub const TYPE_FIELD: &str = "Type";

/// Name of the field holding the job number.
pub const JOB_NUMBER_FIELD: &str = "Job Number";

/// Name of the field holding the submission date.
pub const SUBMIT_DATE_FIELD: &str = "Submit Date";

/// Name of the field holding the published post URL.
pub const POST_URL_FIELD: &str = "FB Post URL";

/// One enumerated option of a drop-down custom field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    /// Display label.
    pub name: String,
}

/// Type-specific configuration of a custom field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeConfig {
    /// Enumerated options, indexed by position; `None` for non-enumerated
    /// fields.
    #[serde(default)]
    pub options: Option<Vec<FieldOption>>,
}

/// User-defined task attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomField {
    /// Field name, matched exactly.
    pub name: String,
    /// Raw value; option index for drop-down fields.
    #[serde(default)]
    pub value: Option<Value>,
    /// Type configuration.
    #[serde(default)]
    pub type_config: TypeConfig,
}

impl CustomField {
    /// Creates a field with a value and no options.
    #[must_use]
    pub fn new(name: impl Into<String>, value: Option<Value>) -> Self {
        Self {
            name: name.into(),
            value,
            type_config: TypeConfig::default(),
        }
    }

    /// Sets the enumerated options.
    #[must_use]
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.type_config.options = Some(
            options
                .into_iter()
                .map(|name| FieldOption { name: name.into() })
                .collect(),
        );
        self
    }

    fn option_label(&self, index: &Value) -> Option<String> {
        let position = usize::try_from(index.as_i64()?).ok()?;
        self.type_config
            .options
            .as_ref()?
            .get(position)
            .map(|option| option.name.clone())
    }
}

/// Which field's option list resolves the "Type" value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeOptionsSource {
    /// Options of the "Type" field itself.
    #[default]
    SameField,
    /// Options of the first field in the collection, regardless of which
    /// field is named "Type". Reproduces the legacy reports, which break as
    /// soon as the field order changes.
    FirstField,
}

/// Returns the value of the first field named `name`.
///
/// Returns `None` when no field matches or the matching field is null.
#[must_use]
pub fn find_field_value<'a>(fields: &'a [CustomField], name: &str) -> Option<&'a Value> {
    fields
        .iter()
        .find(|field| field.name == name)
        .and_then(|field| field.value.as_ref())
}

/// Resolves the "Type" drop-down value to its display label.
///
/// Null, non-integer and out-of-range indices resolve to `None`.
#[must_use]
pub fn resolve_type_name(fields: &[CustomField], source: TypeOptionsSource) -> Option<String> {
    match source {
        TypeOptionsSource::SameField => {
            let field = fields.iter().find(|field| field.name == TYPE_FIELD)?;
            field.option_label(field.value.as_ref()?)
        }
        TypeOptionsSource::FirstField => {
            let first = fields.first()?;
            if first.type_config.options.is_none() {
                return None;
            }
            first.option_label(find_field_value(fields, TYPE_FIELD)?)
        }
    }
}

/// Returns the raw "Job Number" value.
#[must_use]
pub fn find_job_number(fields: &[CustomField]) -> Option<Value> {
    find_field_value(fields, JOB_NUMBER_FIELD).cloned()
}

/// Returns the raw "FB Post URL" value.
#[must_use]
pub fn find_post_url(fields: &[CustomField]) -> Option<Value> {
    find_field_value(fields, POST_URL_FIELD).cloned()
}

/// Returns the "Submit Date" value rendered as a date, or the missing
/// placeholder.
///
/// # Errors
///
/// Returns [`TimestampError`] when the value is not a usable timestamp.
pub fn find_submit_date(fields: &[CustomField]) -> Result<String, TimestampError> {
    let value = match find_field_value(fields, SUBMIT_DATE_FIELD) {
        Some(raw) => EpochValue::from_json(raw)?,
        None => None,
    };
    epoch_to_date_string(value.as_ref(), DATE_FORMAT)
}

/// Custom-field columns of a report row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomFieldProjection {
    /// Resolved "Type" label.
    pub task_type: Option<String>,
    /// Raw job number.
    pub job_no: Option<Value>,
    /// Submission date, date-only.
    pub submit_date: String,
    /// Raw post URL.
    pub post_url: Option<Value>,
}

impl CustomFieldProjection {
    /// Projects all report columns out of a task's custom fields.
    ///
    /// # Errors
    ///
    /// Returns [`TimestampError`] when the submit date is malformed.
    pub fn from_fields(
        fields: &[CustomField],
        source: TypeOptionsSource,
    ) -> Result<Self, TimestampError> {
        Ok(Self {
            task_type: resolve_type_name(fields, source),
            job_no: find_job_number(fields),
            submit_date: find_submit_date(fields)?,
            post_url: find_post_url(fields),
        })
    }
}
