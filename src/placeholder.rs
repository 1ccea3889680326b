//! Placeholders: named substitution points that optionally carry a transformer.

use crate::constants::DELIMITER;
use crate::error::{Error, Result};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Turns an arbitrary value into the text that gets substituted for a placeholder.
pub type Transformer = Arc<dyn Fn(&Value) -> Result<String> + Send + Sync>;

/// Anything that can be bound into an instance: a key naming the placeholder and
/// the already rendered value.
pub trait Replacer {
    fn key(&self) -> &str;
    fn value(&self) -> &str;
}

impl<R: Replacer + ?Sized> Replacer for &R {
    fn key(&self) -> &str {
        (**self).key()
    }

    fn value(&self) -> &str {
        (**self).value()
    }
}

impl Replacer for (&str, &str) {
    fn key(&self) -> &str {
        self.0
    }

    fn value(&self) -> &str {
        self.1
    }
}

/// Default stringification: strings verbatim, null as nothing, floats in shortest
/// form (`200.0` as `200`), everything else as JSON.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Number(n) if n.is_f64() => n.as_f64().map(format_float).unwrap_or_default(),
        other => other.to_string(),
    }
}

/// Shortest decimal form, switching to `1e+06` style exponents outside `[1e-4, 1e6)`.
fn format_float(f: f64) -> String {
    let abs = f.abs();
    if abs != 0.0 && !(1e-4..1e6).contains(&abs) {
        let sci = format!("{f:e}");
        if let Some((mantissa, exp)) = sci.split_once('e') {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exp),
            };
            return format!("{mantissa}e{sign}{digits:0>2}");
        }
    }
    f.to_string()
}

/// A named substitution point.
///
/// `Placeholder` is a value: [`Placeholder::set`] returns a bound copy and never
/// changes the original, so one placeholder can be used both to write template
/// text (through `Display`) and to fill any number of instances.
#[derive(Clone)]
pub struct Placeholder {
    name: String,
    value: String,
    transformer: Option<Transformer>,
}

impl Placeholder {
    /// Creates an unbound placeholder.
    ///
    /// # Errors
    /// * `Error::InvalidPlaceholder` if the name is empty or contains the delimiter
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() || name.contains(DELIMITER) {
            return Err(Error::InvalidPlaceholder(name));
        }
        Ok(Self { name, value: String::new(), transformer: None })
    }

    pub fn with_transformer(mut self, transformer: Transformer) -> Self {
        self.transformer = Some(transformer);
        self
    }

    pub fn transformer(&self) -> Option<&Transformer> {
        self.transformer.as_ref()
    }

    pub fn key(&self) -> &str {
        &self.name
    }

    /// The bound value, empty if the placeholder was never set.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The marker form as it must appear in template text, e.g. `@@person@@`.
    pub fn marker(&self) -> String {
        format!("{DELIMITER}{}{DELIMITER}", self.name)
    }

    /// Returns a copy bound to `value`.
    ///
    /// The value passes through the transformer when one is attached, otherwise
    /// through [`stringify`].
    ///
    /// # Errors
    /// * `Error::SerializeError` if `value` cannot be represented as JSON
    /// * Whatever the transformer returns, typically `Error::UnsupportedValue`
    pub fn set<T: Serialize>(&self, value: T) -> Result<Self> {
        let value = serde_json::to_value(value)?;
        let rendered = match &self.transformer {
            Some(transformer) => transformer(&value)?,
            None => stringify(&value),
        };
        Ok(Self { name: self.name.clone(), value: rendered, transformer: self.transformer.clone() })
    }

    /// Formats the arguments and binds the resulting string, e.g.
    /// `width.set_fmt(format_args!("{}px", 400))`.
    pub fn set_fmt(&self, args: fmt::Arguments<'_>) -> Result<Self> {
        self.set(fmt::format(args))
    }
}

impl Replacer for Placeholder {
    fn key(&self) -> &str {
        Placeholder::key(self)
    }

    fn value(&self) -> &str {
        Placeholder::value(self)
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{DELIMITER}{}{DELIMITER}", self.name)
    }
}

impl fmt::Debug for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Placeholder")
            .field("name", &self.name)
            .field("value", &self.value)
            .field("transformer", &self.transformer.is_some())
            .finish()
    }
}

impl PartialEq for Placeholder {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Placeholder {}
