//! Loading Bioguide member records.
//!
//! Records arrive either wrapped as `{"data": {...}}` (the shape of the
//! congressional Bioguide export) or as the bare `data` object. Job entries
//! that do not look like positions are skipped, and malformed dates become
//! [`EndYear::Unknown`] instead of failing the whole record.

use crate::error::Result;
use crate::types::{EndYear, JobPosition, JobTitle, Person};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

/// Top-level record fields. Everything below is kept as loose JSON so a
/// malformed side field only degrades that field.
#[derive(Debug, Deserialize)]
struct RawPerson {
    #[serde(rename = "jobPositions", default)]
    job_positions: Option<Value>,
    #[serde(rename = "profileText", default)]
    profile_text: Option<Value>,
}

fn str_at<'a>(value: &'a Value, pointer: &str) -> Option<&'a str> {
    value.pointer(pointer).and_then(Value::as_str)
}

/// Build a position from one job entry.
///
/// Returns `None` for entries that are not JSON objects.
fn position_from_entry(entry: &Value) -> Option<JobPosition> {
    if !entry.is_object() {
        return None;
    }

    let title = str_at(entry, "/job/name")
        .map(JobTitle::from)
        .unwrap_or_else(|| JobTitle::Other(String::new()));
    let end = EndYear::from_date(str_at(entry, "/congressAffiliation/congress/endDate"));
    let party = str_at(entry, "/congressAffiliation/caucusAffiliation/0/party/name")
        .map(str::to_string);

    Some(JobPosition { title, end, party })
}

/// Parse a member record from a JSON string
pub fn parse_person(json: &str) -> Result<Person> {
    let value: Value = serde_json::from_str(json)?;
    person_from_value(value)
}

/// Build a member record from an already-parsed JSON value
pub fn person_from_value(value: Value) -> Result<Person> {
    let data = match value {
        Value::Object(mut map) => match map.remove("data") {
            Some(data) => data,
            None => Value::Object(map),
        },
        other => other,
    };

    let raw = RawPerson::deserialize(data)?;

    let entries = match raw.job_positions {
        Some(Value::Array(entries)) => entries,
        Some(other) => {
            tracing::debug!(value = %other, "jobPositions is not a list, treating as empty");
            Vec::new()
        }
        None => Vec::new(),
    };

    let mut job_positions = Vec::with_capacity(entries.len());
    for (idx, entry) in entries.iter().enumerate() {
        match position_from_entry(entry) {
            Some(position) => job_positions.push(position),
            None => {
                tracing::debug!(index = idx, entry = %entry, "skipping job entry that is not a position");
            }
        }
    }

    let biography = raw
        .profile_text
        .as_ref()
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    Ok(Person {
        job_positions,
        biography,
    })
}
