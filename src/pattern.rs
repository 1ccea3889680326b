//! Marker scanning and substitution.
//! Compiles template text into literal and placeholder segments once, so every
//! binding context only has to fill slots instead of searching the text again.

use crate::error::{Error, Result};
use indexmap::IndexSet;
use log::{debug, trace};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    /// Index into the pattern's declared names
    Slot(usize),
}

/// Compiled form of template text split on a delimiter.
#[derive(Debug, Clone)]
pub struct Pattern {
    delimiter: String,
    segments: Vec<Segment>,
    names: IndexSet<String>,
}

impl Pattern {
    /// Compiles `text` into a pattern, treating `delimiter + name + delimiter` as a placeholder.
    ///
    /// # Arguments
    /// * `delimiter` - Non-empty marker delimiter, e.g. `@@`
    /// * `text` - Raw template text
    ///
    /// # Returns
    /// * `Result<Pattern>` - Compiled pattern
    ///
    /// # Errors
    /// * `Error::Parse` if:
    ///   - The delimiter is empty
    ///   - A marker is opened but never closed
    ///   - A marker has an empty name
    ///   - Two markers follow each other without literal text in between
    pub fn compile(delimiter: &str, text: &str) -> Result<Self> {
        if delimiter.is_empty() {
            return Err(Error::Parse { message: "delimiter must not be empty".into(), position: 0 });
        }

        let mut segments = Vec::new();
        let mut names = IndexSet::new();
        let mut pos = 0;
        let mut after_slot = false;

        while let Some(offset) = text[pos..].find(delimiter) {
            let open = pos + offset;
            let literal = &text[pos..open];
            if literal.is_empty() && after_slot {
                return Err(Error::Parse {
                    message: "adjacent placeholders need literal text between them".into(),
                    position: open,
                });
            }

            let name_start = open + delimiter.len();
            let close = match text[name_start..].find(delimiter) {
                Some(offset) => name_start + offset,
                None => {
                    return Err(Error::Parse {
                        message: "unterminated placeholder".into(),
                        position: open,
                    })
                }
            };
            let name = &text[name_start..close];
            if name.is_empty() {
                return Err(Error::Parse {
                    message: "empty placeholder name".into(),
                    position: open,
                });
            }

            if !literal.is_empty() {
                segments.push(Segment::Literal(literal.to_string()));
            }
            let (index, _) = names.insert_full(name.to_string());
            segments.push(Segment::Slot(index));
            after_slot = true;
            pos = close + delimiter.len();
        }

        if pos < text.len() {
            segments.push(Segment::Literal(text[pos..].to_string()));
        }

        debug!("Compiled pattern with {} placeholder(s): {:?}", names.len(), names);
        Ok(Self { delimiter: delimiter.to_string(), segments, names })
    }

    /// Declared placeholder names in order of first appearance.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Creates an empty binding context for this pattern.
    pub fn instance(&self) -> Bindings<'_> {
        Bindings { pattern: self, values: vec![None; self.names.len()] }
    }

    fn marker(&self, index: usize) -> String {
        format!("{0}{1}{0}", self.delimiter, self.names[index])
    }
}

/// Per-render slot values for one [`Pattern`].
#[derive(Debug, Clone)]
pub struct Bindings<'p> {
    pattern: &'p Pattern,
    values: Vec<Option<String>>,
}

impl Bindings<'_> {
    /// Binds `value` to the placeholder `name`, overwriting any earlier value.
    ///
    /// Returns `false` when the pattern does not declare `name`; nothing is stored then.
    pub fn assign_string(&mut self, name: &str, value: &str) -> bool {
        match self.pattern.names.get_index_of(name) {
            Some(index) => {
                trace!("Assigning placeholder '{name}'");
                self.values[index] = Some(value.to_string());
                true
            }
            None => {
                trace!("Ignoring undeclared placeholder '{name}'");
                false
            }
        }
    }

    /// Renders the text. Unassigned placeholders are left as their literal markers.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for segment in &self.pattern.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Slot(index) => match &self.values[*index] {
                    Some(value) => out.push_str(value),
                    None => out.push_str(&self.pattern.marker(*index)),
                },
            }
        }
        out
    }

    pub fn bytes(&self) -> Vec<u8> {
        self.render().into_bytes()
    }
}
