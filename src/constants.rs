//! Common constants used throughout stencil.

/// Delimiter surrounding every placeholder name in template text.
pub const DELIMITER: &str = "@@";

/// Tag value meaning "no default": only a non-zero field value is merged.
pub const NO_DEFAULT: &str = "-";
