//! Error handling for stencil.
//! Defines custom error types and results used throughout the crate.

use indexmap::IndexMap;
use std::io;
use thiserror::Error;

/// Custom error types for stencil operations.
///
/// Construction problems (bad template text, bad placeholder names) and usage
/// problems (unbound placeholders in strict mode, transformer type mismatches)
/// are distinct variants so callers can branch on them.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// Malformed template text: adjacent or unterminated markers, empty names
    #[error("Template parse error at byte {position}: {message}.")]
    Parse { message: String, position: usize },

    /// Placeholder name is empty or contains the delimiter
    #[error("Invalid placeholder name: '{0}'.")]
    InvalidPlaceholder(String),

    /// Rendering a strict instance while declared placeholders are unbound
    #[error("Missing placeholders: {}.", .names.join(", "))]
    MissingPlaceholders { names: Vec<String> },

    /// A transformer was handed a value it cannot render
    #[error("Unsupported value for transformer '{transformer}': {value}.")]
    UnsupportedValue { transformer: String, value: String },

    /// Tagged fields whose tag value has no matching transformer
    #[error("No transformer for tags: {}.", format_unhandled(.0))]
    UnhandledTags(IndexMap<String, String>),

    /// The merge source did not serialize to a record with named fields
    #[error("Not a record: {0}.")]
    NotARecord(String),

    /// Represents errors converting values through serde
    #[error("Serialization error: {0}.")]
    SerializeError(#[from] serde_json::Error),

    /// Represents errors loading a values file
    #[error("Values error: {0}.")]
    ValuesError(String),
}

fn format_unhandled(unhandled: &IndexMap<String, String>) -> String {
    unhandled
        .iter()
        .map(|(field, tag)| format!("{field} (tag '{tag}')"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Convenience type alias for Results with stencil's Error as the error type.
///
/// # Type Parameters
/// * `T` - The type of the success value
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
