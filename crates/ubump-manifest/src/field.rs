use std::ops::Range;

use regex::Regex;

/// Editor for a `label: value` line inside a semi-structured text document
/// such as a Unity YAML asset.
///
/// Only the value span of the first matching line is ever touched; every
/// other byte of the document, including line endings, survives a rewrite.
#[derive(Debug, Clone)]
pub struct LabeledField {
    label: String,
    pattern: Regex,
}

impl LabeledField {
    #[must_use]
    pub fn new(label: &str) -> Self {
        let pattern = Regex::new(&format!(
            r"(?m)^[ \t]*{}:[ \t]*([^\r\n]*)",
            regex::escape(label)
        ))
        .expect("escaped label always forms a valid pattern");

        Self {
            label: label.to_string(),
            pattern,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Byte range of the value, without trailing whitespace.
    #[must_use]
    pub fn value_span(&self, text: &str) -> Option<Range<usize>> {
        let value = self.pattern.captures(text)?.get(1)?;
        let trimmed_len = value.as_str().trim_end().len();
        Some(value.start()..value.start() + trimmed_len)
    }

    /// The field's value, or `None` when the label is absent or its value is
    /// empty.
    #[must_use]
    pub fn read<'t>(&self, text: &'t str) -> Option<&'t str> {
        let span = self.value_span(text)?;
        let value = &text[span];
        (!value.is_empty()).then_some(value)
    }

    #[must_use]
    pub fn contains(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    /// Rebuilds the document with the field's value replaced, or returns
    /// `None` if the label does not occur.
    #[must_use]
    pub fn replace(&self, text: &str, value: &str) -> Option<String> {
        let span = self.value_span(text)?;

        let mut replaced = String::with_capacity(text.len() + value.len());
        replaced.push_str(&text[..span.start]);
        replaced.push_str(value);
        replaced.push_str(&text[span.end..]);
        Some(replaced)
    }
}
