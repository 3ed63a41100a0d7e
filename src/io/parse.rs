//! Input record parsing.
//!
//! The input is a single line holding a list of JSON-like records:
//!
//! ```text
//! [{"content": "first body", "id": 1, "title": "First"}, {"content": "...", "id": 2, "title": "..."}]
//! ```
//!
//! The line is split on `{`. The fragment before the first `{` is skipped and
//! every other fragment is matched field by field; fragments that do not look
//! like a record are ignored. This is deliberately not a JSON parser: record
//! bodies are taken verbatim, escapes included.

use crate::document::{Document, DocumentCollection, DocumentId};
use crate::error::DocumentResult;
use regex::Regex;
use std::io::BufRead;
use std::num::ParseIntError;
use std::sync::LazyLock;
use thiserror::Error;

static RECORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""content": "(.*)", "id": (.*), "title": "(.*)""#).expect("Invalid regex")
});

/// Errors that can occur while parsing the input line
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("No document records found in input\nSuggestion: Check that the records are on the first line")]
    NoRecords,

    #[error("Invalid document id '{value}': {source}\nSuggestion: Ids must be 64-bit integers")]
    InvalidId {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("Failed to read input\n{0}\nSuggestion: Check that the input is valid UTF-8 text")]
    Read(#[from] std::io::Error),
}

/// One parsed input record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: i64,
    pub title: String,
    pub content: String,
}

impl Record {
    #[must_use]
    pub fn into_document(self) -> Document {
        Document::new(DocumentId::new(self.id), self.content).with_title(self.title)
    }
}

/// Parses every record on `line`, in input order.
pub fn parse_records(line: &str) -> Result<Vec<Record>, ParseError> {
    let mut records = Vec::new();

    for fragment in line.split('{').skip(1) {
        let Some(captures) = RECORD_PATTERN.captures(fragment) else {
            continue;
        };

        let raw_id = captures[2].trim();
        let id = raw_id.parse::<i64>().map_err(|source| ParseError::InvalidId {
            value: raw_id.to_string(),
            source,
        })?;

        records.push(Record {
            id,
            title: captures[3].to_string(),
            content: captures[1].to_string(),
        });
    }

    if records.is_empty() {
        return Err(ParseError::NoRecords);
    }
    Ok(records)
}

/// Reads the first line of `reader`, without its line terminator.
pub fn read_first_line<R: BufRead>(mut reader: R) -> Result<String, ParseError> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    let trimmed = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(trimmed);
    Ok(line)
}

/// Builds a document collection from parsed records.
pub fn into_collection(records: Vec<Record>) -> DocumentResult<DocumentCollection> {
    DocumentCollection::new(records.into_iter().map(Record::into_document).collect())
}
