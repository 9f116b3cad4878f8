//! JSON adapters: lenient response decoding and a JSON-lines row sink.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::io::Write;

use crate::report::{
    domain::{Folder, Group, RawTask, Space, Team},
    ports::{RowSink, RowSinkResult, TaskSourceError, TaskSourceResult},
};

/// Removes commas that directly precede a closing brace across whitespace,
/// e.g. `{"a": 1,\n}`. Commas inside string literals are left alone.
#[must_use]
pub fn strip_trailing_commas(document: &str) -> String {
    let mut cleaned = String::with_capacity(document.len());
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in document.char_indices() {
        if in_string {
            cleaned.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        match ch {
            '"' => {
                in_string = true;
                cleaned.push(ch);
            }
            ',' if closes_after_whitespace(document, offset) => {}
            _ => cleaned.push(ch),
        }
    }
    cleaned
}

fn closes_after_whitespace(document: &str, comma_offset: usize) -> bool {
    let rest = document.get(comma_offset + 1..).unwrap_or_default();
    let trimmed = rest.trim_start_matches([' ', '\t', '\r', '\n']);
    trimmed.len() < rest.len() && trimmed.starts_with('}')
}

/// Decodes a UTF-8 JSON body after stripping trailing commas.
///
/// # Errors
///
/// Returns [`TaskSourceError::Decode`] when the body is not UTF-8 or does
/// not match `T`.
pub fn decode_lenient<T: DeserializeOwned>(body: &[u8]) -> TaskSourceResult<T> {
    let text =
        std::str::from_utf8(body).map_err(|err| TaskSourceError::Decode(err.to_string()))?;
    serde_json::from_str(&strip_trailing_commas(text))
        .map_err(|err| TaskSourceError::Decode(err.to_string()))
}

/// `{"teams": [...]}` response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TeamsEnvelope {
    /// Teams.
    pub teams: Vec<Team>,
}

/// `{"spaces": [...]}` response body.
#[derive(Debug, Clone, Deserialize)]
pub struct SpacesEnvelope {
    /// Spaces.
    pub spaces: Vec<Space>,
}

/// `{"folders": [...]}` response body.
#[derive(Debug, Clone, Deserialize)]
pub struct FoldersEnvelope {
    /// Folders.
    pub folders: Vec<Folder>,
}

/// `{"groups": [...]}` response body.
#[derive(Debug, Clone, Deserialize)]
pub struct GroupsEnvelope {
    /// Groups.
    pub groups: Vec<Group>,
}

/// `{"tasks": [...]}` response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TasksEnvelope {
    /// Tasks.
    pub tasks: Vec<RawTask>,
}

/// Row sink writing one JSON object per line.
#[derive(Debug)]
pub struct JsonLinesSink<W> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    /// Wraps a writer.
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RowSink for JsonLinesSink<W> {
    fn write_rows<R: Serialize>(&mut self, rows: &[R]) -> RowSinkResult<()> {
        for row in rows {
            serde_json::to_writer(&mut self.writer, row)?;
            self.writer.write_all(b"\n")?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
