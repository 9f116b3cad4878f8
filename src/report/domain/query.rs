//! Translation of user date filters into task-service query bounds.

use super::{DATE_FORMAT, EpochValue, RawTask, TimestampError, date_to_epoch_seconds};
use chrono::Datelike;
use mockable::Clock;
use serde::{Deserialize, Serialize};

const MILLIS_PER_SECOND: i64 = 1000;

/// Returns January 1 of the clock's current local year as `YYYY-MM-DD`.
#[must_use]
pub fn first_day_of_current_year(clock: &impl Clock) -> String {
    format!("{:04}-01-01", clock.local().year())
}

/// Returns the clock's current local date as `YYYY-MM-DD`.
#[must_use]
pub fn today(clock: &impl Clock) -> String {
    clock.local().format(DATE_FORMAT).to_string()
}

/// Optional `YYYY-MM-DD` date filters supplied by the caller.
///
/// Blank strings are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFilters {
    /// Created strictly after this date.
    pub created_gt: Option<String>,
    /// Created strictly before this date.
    pub created_lt: Option<String>,
    /// Due strictly after this date.
    pub due_gt: Option<String>,
    /// Due strictly before this date.
    pub due_lt: Option<String>,
    /// Updated strictly after this date.
    pub updated_gt: Option<String>,
    /// Updated strictly before this date.
    pub updated_lt: Option<String>,
}

impl TaskFilters {
    /// Creates filters with every bound absent.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the lower creation bound.
    #[must_use]
    pub fn created_after(mut self, date: impl Into<String>) -> Self {
        self.created_gt = Some(date.into());
        self
    }

    /// Sets the upper creation bound.
    #[must_use]
    pub fn created_before(mut self, date: impl Into<String>) -> Self {
        self.created_lt = Some(date.into());
        self
    }

    /// Sets the lower due-date bound.
    #[must_use]
    pub fn due_after(mut self, date: impl Into<String>) -> Self {
        self.due_gt = Some(date.into());
        self
    }

    /// Sets the upper due-date bound.
    #[must_use]
    pub fn due_before(mut self, date: impl Into<String>) -> Self {
        self.due_lt = Some(date.into());
        self
    }

    /// Sets the lower update bound.
    #[must_use]
    pub fn updated_after(mut self, date: impl Into<String>) -> Self {
        self.updated_gt = Some(date.into());
        self
    }

    /// Sets the upper update bound.
    #[must_use]
    pub fn updated_before(mut self, date: impl Into<String>) -> Self {
        self.updated_lt = Some(date.into());
        self
    }

    /// Converts the filters into millisecond bounds.
    ///
    /// An absent `created_gt` defaults to January 1 of the clock's current
    /// year; every other absent bound stays unbounded.
    ///
    /// # Errors
    ///
    /// Returns [`TimestampError`] when any supplied date is malformed.
    pub fn to_bounds(&self, clock: &impl Clock) -> Result<DateBounds, TimestampError> {
        let created_gt = match present(self.created_gt.as_ref()) {
            Some(date) => date_to_millis(date)?,
            None => date_to_millis(&first_day_of_current_year(clock))?,
        };
        Ok(DateBounds {
            date_created_gt: Some(created_gt),
            date_created_lt: optional_millis(self.created_lt.as_ref())?,
            due_date_gt: optional_millis(self.due_gt.as_ref())?,
            due_date_lt: optional_millis(self.due_lt.as_ref())?,
            date_updated_gt: optional_millis(self.updated_gt.as_ref())?,
            date_updated_lt: optional_millis(self.updated_lt.as_ref())?,
        })
    }
}

fn present(date: Option<&String>) -> Option<&str> {
    date.map(|raw| raw.trim()).filter(|raw| !raw.is_empty())
}

fn date_to_millis(date: &str) -> Result<i64, TimestampError> {
    let seconds = date_to_epoch_seconds(date)?;
    seconds
        .checked_mul(MILLIS_PER_SECOND)
        .ok_or(TimestampError::OutOfRange(seconds))
}

fn optional_millis(date: Option<&String>) -> Result<Option<i64>, TimestampError> {
    present(date).map(date_to_millis).transpose()
}

/// Exclusive millisecond bounds; `None` means unconstrained on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateBounds {
    /// Lower creation bound.
    pub date_created_gt: Option<i64>,
    /// Upper creation bound.
    pub date_created_lt: Option<i64>,
    /// Lower due-date bound.
    pub due_date_gt: Option<i64>,
    /// Upper due-date bound.
    pub due_date_lt: Option<i64>,
    /// Lower update bound.
    pub date_updated_gt: Option<i64>,
    /// Upper update bound.
    pub date_updated_lt: Option<i64>,
}

/// Query parameters for listing tasks in a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskQuery {
    /// Include archived tasks.
    pub archived: bool,
    /// Include subtasks.
    pub include_subtasks: bool,
    /// Include tasks in a closed status.
    pub include_closed: bool,
    /// Date bounds in milliseconds.
    pub bounds: DateBounds,
}

impl TaskQuery {
    /// Creates a query with the report defaults: no archived tasks, closed
    /// tasks and subtasks included.
    #[must_use]
    pub const fn new(bounds: DateBounds) -> Self {
        Self {
            archived: false,
            include_subtasks: true,
            include_closed: true,
            bounds,
        }
    }

    /// Returns `true` when `task` satisfies the flags and every present
    /// bound. A task without the bounded timestamp never satisfies it.
    ///
    /// # Errors
    ///
    /// Returns [`TimestampError`] when a bounded timestamp is malformed.
    pub fn matches(&self, task: &RawTask) -> Result<bool, TimestampError> {
        if task.archived && !self.archived {
            return Ok(false);
        }
        if task.parent.is_some() && !self.include_subtasks {
            return Ok(false);
        }
        if task.status.is_closed() && !self.include_closed {
            return Ok(false);
        }
        let bounds = &self.bounds;
        Ok(within(
            task.date_created.as_ref(),
            bounds.date_created_gt,
            bounds.date_created_lt,
        )? && within(task.due_date.as_ref(), bounds.due_date_gt, bounds.due_date_lt)?
            && within(
                task.date_updated.as_ref(),
                bounds.date_updated_gt,
                bounds.date_updated_lt,
            )?)
    }
}

fn within(
    value: Option<&EpochValue>,
    lower: Option<i64>,
    upper: Option<i64>,
) -> Result<bool, TimestampError> {
    if lower.is_none() && upper.is_none() {
        return Ok(true);
    }
    let Some(raw) = value else {
        return Ok(false);
    };
    let millis = raw.to_millis()?;
    Ok(lower.is_none_or(|bound| millis > bound) && upper.is_none_or(|bound| millis < bound))
}
