//! Small helpers shared by the store and hosts.

use chrono::{Local, NaiveDate};

/// Date format used for every date field (`YYYY.MM.DD`).
pub const DATE_FORMAT: &str = "%Y.%m.%d";

/// Render a calendar date in the `YYYY.MM.DD` convention.
#[must_use]
pub fn date_stamp(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Today's local date as `YYYY.MM.DD`.
#[must_use]
pub fn today_stamp() -> String {
    date_stamp(Local::now().date_naive())
}

/// Append `value` unless an equal element is already present.
///
/// Returns true if the value was appended.
pub fn push_unique(values: &mut Vec<String>, value: String) -> bool {
    if values.contains(&value) {
        false
    } else {
        values.push(value);
        true
    }
}

/// Match `input` against `ids`: exact match first, then unique
/// case-insensitive prefix. Returns every candidate on ambiguity.
pub(crate) fn match_id<'a, I>(ids: I, input: &str) -> IdMatch
where
    I: IntoIterator<Item = &'a str>,
{
    let needle = input.trim().to_lowercase();
    if needle.is_empty() {
        return IdMatch::None;
    }

    let mut prefixed = Vec::new();
    for id in ids {
        if id == input.trim() {
            return IdMatch::One(id.to_string());
        }
        if id.to_lowercase().starts_with(&needle) {
            prefixed.push(id.to_string());
        }
    }

    match prefixed.len() {
        0 => IdMatch::None,
        1 => IdMatch::One(prefixed.remove(0)),
        _ => IdMatch::Many(prefixed),
    }
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum IdMatch {
    None,
    One(String),
    Many(Vec<String>),
}
