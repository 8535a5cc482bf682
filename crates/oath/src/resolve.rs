//! Name resolution for user-supplied queries
//!
//! Pure matching over a directory snapshot; no I/O. An exact name match wins
//! unconditionally, however many other names contain the query. Without an
//! exact match the query must select exactly one name as a substring.

use crate::error::Error;
use crate::types::CodeEntry;

pub(crate) fn resolve(entries: Vec<CodeEntry>, query: &str) -> Result<CodeEntry, Error> {
    if let Some(position) = entries.iter().position(|entry| entry.name == query) {
        let mut entries = entries;
        return Ok(entries.swap_remove(position));
    }

    let mut matches: Vec<CodeEntry> = entries
        .into_iter()
        .filter(|entry| entry.name.contains(query))
        .collect();

    match matches.len() {
        1 => Ok(matches.remove(0)),
        0 => Err(Error::NoSuchCredential(query.to_string())),
        _ => Err(Error::MultipleMatches {
            query: query.to_string(),
            candidates: matches.into_iter().map(|entry| entry.name).collect(),
        }),
    }
}
