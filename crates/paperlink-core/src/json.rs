//! JSON input files: record dumps, rosters and candidate lists.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::Result;

/// Reads and parses a JSON file.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path)?;
    let value: T = serde_json::from_str(&contents)?;
    Ok(value)
}
