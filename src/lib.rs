//! stencil is a placeholder templating library.
//! Template text with `@@name@@` markers is compiled once into a [`template::Template`];
//! each [`template::Instance`] binds values to the markers, either one by one or by
//! merging the tagged fields of a record through per-tag transformers.

/// Command-line interface module for the stencil binary
pub mod cli;

/// Common constants: the marker delimiter and the "no default" tag value
pub mod constants;

/// Error types and handling for stencil
pub mod error;

/// Record inspection: schemas, struct tags and zero values
pub mod inspect;

/// Logger setup for the stencil binary
pub mod logger;

/// Tag-driven merging of records into placeholders
pub mod merge;

/// Marker scanning and substitution
pub mod pattern;

/// Named substitution points and the Replacer trait
pub mod placeholder;

/// Templates and their rendering instances
pub mod template;

/// Transformers for HTML and database search output
pub mod transformers;

/// Loading placeholder values for the stencil binary
pub mod values;

pub use error::{Error, Result};
pub use inspect::{FieldTags, Schema, Tagged};
pub use merge::{fill_struct, must_fill_struct, struct_vals, PlaceholderSet, TransformerTable};
pub use placeholder::{Placeholder, Replacer, Transformer};
pub use template::{Instance, Template};
