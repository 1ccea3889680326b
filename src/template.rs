//! Templates and the instances rendered from them.
//! A [`Template`] is compiled once and shared; every [`Instance`] owns its own
//! bindings, so many instances of one template can be filled side by side.

use crate::constants::DELIMITER;
use crate::error::{Error, Result};
use crate::inspect::Tagged;
use crate::merge::{struct_vals, PlaceholderSet};
use crate::pattern::{Bindings, Pattern};
use crate::placeholder::Replacer;
use indexmap::IndexSet;
use log::debug;
use std::io::Write;

/// Compiled template text with `@@name@@` placeholders.
#[derive(Debug, Clone)]
pub struct Template {
    pattern: Pattern,
    /// Instances created while set refuse to render with unbound placeholders
    strict: bool,
}

impl Template {
    /// Compiles template text.
    ///
    /// # Arguments
    /// * `text` - Template text with `@@name@@` placeholders
    ///
    /// # Returns
    /// * `Result<Template>` - Non-strict template
    ///
    /// # Errors
    /// * `Error::Parse` if two placeholders touch, a marker is unterminated or a name is empty
    ///
    /// # Note
    /// There is no escape for a literal `@@` in the text.
    pub fn new(text: &str) -> Result<Self> {
        let pattern = Pattern::compile(DELIMITER, text)?;
        Ok(Self { pattern, strict: false })
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Changes strictness for instances created from now on.
    pub fn set_strict(&mut self, strict: bool) {
        self.strict = strict;
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Declared placeholder names in order of first appearance.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.pattern.placeholders()
    }

    /// Starts a new, empty rendering session.
    pub fn instance(&self) -> Instance<'_> {
        let missing = self
            .strict
            .then(|| self.pattern.placeholders().map(str::to_string).collect());
        debug!("New {} instance", if self.strict { "strict" } else { "lenient" });
        Instance { bindings: self.pattern.instance(), missing }
    }

    /// Shortcut for `instance()` followed by [`Instance::replace`].
    pub fn replace<I>(&self, replacements: I) -> Instance<'_>
    where
        I: IntoIterator,
        I::Item: Replacer,
    {
        let mut instance = self.instance();
        instance.replace(replacements);
        instance
    }

    /// Shortcut for `instance()` followed by [`Instance::merge`].
    pub fn merge<T: Tagged>(
        &self,
        record: &T,
        key: &str,
        placeholders: &PlaceholderSet,
    ) -> Result<Instance<'_>> {
        let mut instance = self.instance();
        instance.merge(record, key, placeholders)?;
        Ok(instance)
    }
}

/// One rendering session of a [`Template`].
#[derive(Debug, Clone)]
pub struct Instance<'t> {
    bindings: Bindings<'t>,
    /// Declared names not bound yet; `None` unless the template was strict
    missing: Option<IndexSet<String>>,
}

impl Instance<'_> {
    /// Binds every replacement's value under its key. Later values for the same
    /// key overwrite earlier ones.
    pub fn replace<I>(&mut self, replacements: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Replacer,
    {
        for replacement in replacements {
            let key = replacement.key();
            if let Some(missing) = self.missing.as_mut() {
                missing.shift_remove(key);
            }
            self.bindings.assign_string(key, replacement.value());
        }
        self
    }

    /// Binds the placeholders of `placeholders` from the fields of `record` that
    /// are tagged under `key`.
    ///
    /// Each resolved field value goes through its placeholder's transformer.
    /// Fields without a placeholder in the set are skipped.
    ///
    /// # Errors
    /// * `Error::SerializeError` / `Error::NotARecord` if the record cannot be read
    /// * Any transformer error, e.g. `Error::UnsupportedValue`
    pub fn merge<T: Tagged>(
        &mut self,
        record: &T,
        key: &str,
        placeholders: &PlaceholderSet,
    ) -> Result<&mut Self> {
        for (field, value) in struct_vals(key, record)? {
            match placeholders.get(&field) {
                Some(placeholder) if !placeholder.key().is_empty() => {
                    let bound = placeholder.set(&value)?;
                    self.replace([bound]);
                }
                _ => debug!("Skipping field '{field}': no placeholder"),
            }
        }
        Ok(self)
    }

    /// Declared placeholders still unbound. Always empty for lenient instances.
    pub fn missing(&self) -> Vec<&str> {
        self.missing
            .iter()
            .flat_map(|missing| missing.iter().map(String::as_str))
            .collect()
    }

    fn check_complete(&self) -> Result<()> {
        match &self.missing {
            Some(missing) if !missing.is_empty() => Err(Error::MissingPlaceholders {
                names: missing.iter().cloned().collect(),
            }),
            _ => Ok(()),
        }
    }

    /// Renders the bound text. In a lenient instance unbound placeholders stay
    /// as their markers.
    ///
    /// # Errors
    /// * `Error::MissingPlaceholders` if the instance is strict and anything is unbound
    pub fn render(&self) -> Result<String> {
        self.check_complete()?;
        Ok(self.bindings.render())
    }

    pub fn render_bytes(&self) -> Result<Vec<u8>> {
        self.check_complete()?;
        Ok(self.bindings.bytes())
    }

    /// Writes the rendered text to `writer` and returns the number of bytes written.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<usize> {
        let bytes = self.render_bytes()?;
        writer.write_all(&bytes)?;
        Ok(bytes.len())
    }
}
