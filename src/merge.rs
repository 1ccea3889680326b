//! Tag-driven merging of records into placeholders.
//!
//! A record field takes part in a merge under a namespace when its schema tags
//! it for that namespace. The tag value `-` means "use the field only when set";
//! any other tag value is the default used while the field holds its zero value.

use crate::constants::NO_DEFAULT;
use crate::error::{Error, Result};
use crate::inspect::{field_values, is_default, zero_values, Tagged};
use crate::placeholder::{stringify, Placeholder, Transformer};
use indexmap::IndexMap;
use log::{debug, warn};
use std::any::type_name;
use std::ops::Index;

/// Transformers keyed by the tag value that selects them.
pub type TransformerTable = IndexMap<String, Transformer>;

/// Fields whose tag value had no transformer, mapped to that tag value.
pub type NotHandled = IndexMap<String, String>;

/// Resolves the field values of `record` under the tag namespace `key`.
///
/// # Arguments
/// * `key` - Tag namespace, e.g. `greet.text`
/// * `record` - Record to read current values from
///
/// # Returns
/// * `Result<IndexMap<String, String>>` - Field name to resolved value, in schema order
///
/// # Note
/// A field is zero when it serializes the same as in `T::default()`.
/// Handles three cases for every tagged field:
/// - Tag `-` and zero value: the field is left out
/// - Any other tag and zero value: the tag value is used
/// - Non-zero value: the value itself is used, whatever the tag
pub fn struct_vals<T: Tagged>(key: &str, record: &T) -> Result<IndexMap<String, String>> {
    let values = field_values(record)?;
    let zeros = zero_values::<T>()?;
    let mut resolved = IndexMap::new();

    for (field, tags) in T::schema().fields() {
        let Some(tag) = tags.get(key) else {
            continue;
        };
        match values.get(field) {
            Some(value) if !is_default(Some(value), zeros.get(field)) => {
                resolved.insert(field.to_string(), stringify(value));
            }
            _ if tag != NO_DEFAULT => {
                resolved.insert(field.to_string(), tag.to_string());
            }
            _ => {}
        }
    }

    debug!("Resolved {} field(s) of {} under '{key}'", resolved.len(), type_name::<T>());
    Ok(resolved)
}

/// Placeholders keyed by the record field they are filled from.
#[derive(Debug, Clone, Default)]
pub struct PlaceholderSet {
    placeholders: IndexMap<String, Placeholder>,
}

impl PlaceholderSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        field: impl Into<String>,
        placeholder: Placeholder,
    ) -> Option<Placeholder> {
        self.placeholders.insert(field.into(), placeholder)
    }

    pub fn get(&self, field: &str) -> Option<&Placeholder> {
        self.placeholders.get(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Placeholder)> {
        self.placeholders.iter().map(|(field, ph)| (field.as_str(), ph))
    }

    pub fn len(&self) -> usize {
        self.placeholders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placeholders.is_empty()
    }
}

impl Index<&str> for PlaceholderSet {
    type Output = Placeholder;

    /// # Panics
    /// If no placeholder is stored for `field`.
    fn index(&self, field: &str) -> &Placeholder {
        match self.placeholders.get(field) {
            Some(placeholder) => placeholder,
            None => panic!("no placeholder for field '{field}'"),
        }
    }
}

impl FromIterator<(String, Placeholder)> for PlaceholderSet {
    fn from_iter<I: IntoIterator<Item = (String, Placeholder)>>(iter: I) -> Self {
        Self { placeholders: iter.into_iter().collect() }
    }
}

/// Builds one placeholder per field of `T` tagged under `key`, each carrying the
/// transformer its tag value selects from `transformers`.
///
/// Placeholder names are `<type name>.<field>`, so two record types never share
/// a name. Tag values missing from the table are not an error here; they are
/// returned alongside the placeholders that could be built.
pub fn fill_struct<T: Tagged>(
    key: &str,
    transformers: &TransformerTable,
) -> Result<(PlaceholderSet, NotHandled)> {
    let mut placeholders = PlaceholderSet::new();
    let mut not_handled = NotHandled::new();

    for (field, tags) in T::schema().fields() {
        let Some(tag) = tags.get(key) else {
            continue;
        };
        match transformers.get(tag) {
            Some(transformer) => {
                let name = format!("{}.{field}", type_name::<T>());
                let placeholder = Placeholder::new(name)?.with_transformer(transformer.clone());
                placeholders.insert(field, placeholder);
            }
            None => {
                warn!("No transformer for field '{field}' with tag '{tag}' under '{key}'");
                not_handled.insert(field.to_string(), tag.to_string());
            }
        }
    }

    Ok((placeholders, not_handled))
}

/// Like [`fill_struct`], but any tag without a transformer is an error.
///
/// # Errors
/// * `Error::UnhandledTags` listing every field whose tag had no transformer
pub fn must_fill_struct<T: Tagged>(
    key: &str,
    transformers: &TransformerTable,
) -> Result<PlaceholderSet> {
    let (placeholders, not_handled) = fill_struct::<T>(key, transformers)?;
    if !not_handled.is_empty() {
        return Err(Error::UnhandledTags(not_handled));
    }
    Ok(placeholders)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspect::Schema;
    use serde::Serialize;
    use serde_json::Value;
    use std::sync::{Arc, LazyLock};

    #[derive(Serialize, Default)]
    #[serde(rename_all = "PascalCase")]
    struct Person {
        first_name: String,
        last_name: String,
        width: u32,
    }

    impl Tagged for Person {
        fn schema() -> &'static Schema {
            static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
                Schema::new()
                    .field("FirstName", r#"greet.text:"-" page:"text""#)
                    .field("LastName", r#"greet.text:"-" page:"shout""#)
                    .field("Width", r#"greet.text:"400""#)
            });
            &SCHEMA
        }
    }

    fn table() -> TransformerTable {
        let text: Transformer = Arc::new(|v: &Value| -> Result<String> { Ok(stringify(v)) });
        IndexMap::from([("text".to_string(), text)])
    }

    #[test]
    fn test_struct_vals_default_and_sentinel() {
        let person = Person { first_name: "Bugs".into(), ..Default::default() };
        let vals = struct_vals("greet.text", &person).unwrap();
        assert_eq!(
            vals,
            IndexMap::from([
                ("FirstName".to_string(), "Bugs".to_string()),
                ("Width".to_string(), "400".to_string()),
            ])
        );
    }

    #[test]
    fn test_struct_vals_runtime_value_beats_default() {
        let person = Person { width: 200, ..Default::default() };
        let vals = struct_vals("greet.text", &person).unwrap();
        assert_eq!(vals.get("Width").map(String::as_str), Some("200"));
        assert!(!vals.contains_key("FirstName"));
    }

    #[derive(Serialize, Default)]
    struct Panel {
        count: Option<u32>,
        grid: [u8; 3],
        ratio: f64,
        scale: f64,
    }

    impl Tagged for Panel {
        fn schema() -> &'static Schema {
            static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
                Schema::new()
                    .field("count", r#"keep:"-" fill:"7""#)
                    .field("grid", r#"keep:"-" fill:"[1,1,1]""#)
                    .field("ratio", r#"keep:"-" fill:"1.5""#)
                    .field("scale", r#"keep:"-" fill:"2""#)
            });
            &SCHEMA
        }
    }

    #[test]
    fn test_struct_vals_zero_follows_field_type() {
        let panel = Panel { count: Some(0), grid: [0, 0, 0], ratio: 200.0, scale: 0.0 };

        let kept = struct_vals("keep", &panel).unwrap();
        assert_eq!(
            kept,
            IndexMap::from([
                ("count".to_string(), "0".to_string()),
                ("ratio".to_string(), "200".to_string()),
            ])
        );

        let filled = struct_vals("fill", &panel).unwrap();
        assert_eq!(filled["count"], "0");
        assert_eq!(filled["grid"], "[1,1,1]");
        assert_eq!(filled["ratio"], "200");
        assert_eq!(filled["scale"], "2");
    }

    #[test]
    fn test_struct_vals_unset_option_takes_default() {
        let panel = Panel { grid: [0, 3, 0], ratio: 0.25, ..Default::default() };
        let filled = struct_vals("fill", &panel).unwrap();
        assert_eq!(filled["count"], "7");
        assert_eq!(filled["grid"], "[0,3,0]");
        assert_eq!(filled["ratio"], "0.25");
    }

    #[test]
    fn test_struct_vals_unknown_namespace() {
        let person = Person { first_name: "Bugs".into(), ..Default::default() };
        assert!(struct_vals("nope", &person).unwrap().is_empty());
    }

    #[test]
    fn test_fill_struct_reports_missing_transformers() {
        let (placeholders, not_handled) = fill_struct::<Person>("page", &table()).unwrap();
        assert_eq!(placeholders.len(), 1);
        assert!(placeholders["FirstName"].key().ends_with("Person.FirstName"));
        assert!(placeholders["FirstName"].transformer().is_some());
        assert_eq!(not_handled.get("LastName").map(String::as_str), Some("shout"));
    }

    #[test]
    fn test_must_fill_struct_fails_on_missing_transformer() {
        match must_fill_struct::<Person>("page", &table()) {
            Err(Error::UnhandledTags(tags)) => assert!(tags.contains_key("LastName")),
            other => panic!("Expected UnhandledTags, got {:?}", other),
        }
    }
}
