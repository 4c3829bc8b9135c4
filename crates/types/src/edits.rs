//! Text edits produced by formatting.

use crate::Range;

/// Replacement of a range of a buffer with new text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub range: Range,
    pub new_text: String,
}

impl TextEdit {
    #[must_use]
    pub fn new(range: Range, new_text: impl Into<String>) -> Self {
        Self {
            range,
            new_text: new_text.into(),
        }
    }

    /// Apply this edit to `text`, returning the edited copy.
    ///
    /// Returns `None` when the range does not fall inside `text`.
    #[must_use]
    pub fn apply(&self, text: &str) -> Option<String> {
        let index = crate::LineIndex::new(text);
        let start = index.offset(self.range.start)?;
        let end = index.offset(self.range.end)?;
        if start > end {
            return None;
        }
        let mut edited = String::with_capacity(text.len() - (end - start) + self.new_text.len());
        edited.push_str(&text[..start]);
        edited.push_str(&self.new_text);
        edited.push_str(&text[end..]);
        Some(edited)
    }
}
