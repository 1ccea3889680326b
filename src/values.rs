//! Placeholder values for the command-line renderer.
//! Values are read from a JSON or YAML mapping, keeping the order of the source.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use log::debug;
use std::io::Read;
use std::path::Path;

/// Loads placeholder values from a file.
///
/// # Arguments
/// * `path` - JSON or YAML file containing a mapping
///
/// # Returns
/// * `Result<IndexMap<String, serde_json::Value>>` - Values by placeholder name
///
/// # Errors
/// * `Error::IoError` if the file cannot be read
/// * `Error::ValuesError` if the content is not a mapping
pub fn load_values<P: AsRef<Path>>(path: P) -> Result<IndexMap<String, serde_json::Value>> {
    let path = path.as_ref();
    debug!("Loading values from {}", path.display());
    let content = std::fs::read_to_string(path).map_err(Error::IoError)?;
    parse_values(&content)
}

pub fn load_values_from_stdin() -> Result<IndexMap<String, serde_json::Value>> {
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    parse_values(&buffer)
}

/// Parses a mapping of placeholder values.
///
/// JSON is tried first, YAML second. Blank content yields no values.
pub fn parse_values(content: &str) -> Result<IndexMap<String, serde_json::Value>> {
    if content.trim().is_empty() {
        return Ok(IndexMap::new());
    }
    match serde_json::from_str(content) {
        Ok(values) => Ok(values),
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::ValuesError(format!("Invalid values format: {e}"))),
    }
}
