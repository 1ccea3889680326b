//! Record inspection: field names, per-namespace tags, and current field values.
//!
//! Rust has no struct tags, so a record type describes itself with a [`Schema`]
//! built once and handed out through [`Tagged::schema`]. Current values are read
//! by serializing the record with serde. The zero value of each field is read the
//! same way from `T::default()`, so a record's `Default` must be its zero value.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use log::warn;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::LazyLock;

/// `namespace:"value"` pairs in struct-tag syntax
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"([^\s:"]+):"((?:[^"\\]|\\.)*)""#).unwrap());

/// Tag values of one field, keyed by namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldTags(IndexMap<String, String>);

impl FieldTags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses struct-tag syntax such as `html-template:"text" db-template:"searchtext%"`.
    ///
    /// Text that is not a `namespace:"value"` pair is ignored. When a namespace
    /// repeats, the first occurrence wins. Values are unquoted with JSON string
    /// escapes (`\"`, `\\`, `\n`, `\t`, `\uXXXX`, ...); a value with an invalid
    /// escape is dropped.
    pub fn parse(tag: &str) -> Self {
        let mut tags = IndexMap::new();
        for caps in TAG_RE.captures_iter(tag) {
            match serde_json::from_str::<String>(&format!("\"{}\"", &caps[2])) {
                Ok(value) => {
                    tags.entry(caps[1].to_string()).or_insert(value);
                }
                Err(e) => warn!("Ignoring tag '{}': {e}", &caps[1]),
            }
        }
        Self(tags)
    }

    pub fn with(mut self, namespace: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(namespace.into(), value.into());
        self
    }

    /// Tag value under `namespace`. An empty value counts as absent.
    pub fn get(&self, namespace: &str) -> Option<&str> {
        self.0.get(namespace).map(String::as_str).filter(|value| !value.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for FieldTags {
    fn from(tag: &str) -> Self {
        FieldTags::parse(tag)
    }
}

/// Ordered field descriptors of one record type.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: IndexMap<String, FieldTags>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a field. `name` must match the field's serialized name.
    pub fn field(mut self, name: impl Into<String>, tags: impl Into<FieldTags>) -> Self {
        self.fields.insert(name.into(), tags.into());
        self
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldTags)> {
        self.fields.iter().map(|(name, tags)| (name.as_str(), tags))
    }

    /// Tag value of `field` under `namespace`.
    pub fn tag(&self, field: &str, namespace: &str) -> Option<&str> {
        self.fields.get(field).and_then(|tags| tags.get(namespace))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A record type that can be merged into templates.
///
/// `Default` must produce the zero value of every field; it is what a field is
/// compared against to decide whether it is set.
///
/// ```ignore
/// #[derive(Serialize, Default)]
/// #[serde(rename_all = "PascalCase")]
/// struct Person { first_name: String, width: u32 }
///
/// impl Tagged for Person {
///     fn schema() -> &'static Schema {
///         static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
///             Schema::new()
///                 .field("FirstName", r#"greet.text:"-""#)
///                 .field("Width", r#"greet.text:"400""#)
///         });
///         &SCHEMA
///     }
/// }
/// ```
pub trait Tagged: Serialize + Default {
    fn schema() -> &'static Schema;
}

/// Serializes `record` and returns its fields by name.
///
/// # Errors
/// * `Error::SerializeError` if serialization fails
/// * `Error::NotARecord` if the record does not serialize to a map
pub fn field_values<T: Serialize + ?Sized>(record: &T) -> Result<Map<String, Value>> {
    match serde_json::to_value(record)? {
        Value::Object(fields) => Ok(fields),
        other => Err(Error::NotARecord(format!("expected named fields, got {other}"))),
    }
}

/// Field values of `T::default()`, i.e. the zero value of every field.
pub fn zero_values<T: Tagged>() -> Result<Map<String, Value>> {
    field_values(&T::default())
}

/// Whether a serialized field holds its zero value. A field the record did not
/// serialize at all counts as zero.
///
/// # Arguments
/// * `value` - The field as serialized from the record
/// * `zero` - The same field as serialized from the zero record, see [`zero_values`]
pub fn is_default(value: Option<&Value>, zero: Option<&Value>) -> bool {
    match value {
        None => true,
        Some(value) => zero == Some(value),
    }
}
