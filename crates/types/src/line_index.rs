//! Byte offset ↔ [`Position`] translation for a buffer's text.

use crate::{OffsetRange, Position, Range};

/// Line start table over a borrowed text.
///
/// Characters are counted in `char`s, so a position never lands inside a
/// multi-byte sequence.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    text: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            text.char_indices()
                .filter(|&(_, c)| c == '\n')
                .map(|(i, _)| i + 1),
        );
        Self { text, line_starts }
    }

    /// Byte offset for a position, or `None` when the line does not exist.
    ///
    /// A character past the end of its line is clamped to the line end.
    #[must_use]
    pub fn offset(&self, position: Position) -> Option<usize> {
        let start = *self.line_starts.get(position.line as usize)?;
        let line_end = self
            .line_starts
            .get(position.line as usize + 1)
            .map_or(self.text.len(), |next| next - 1);
        let line = &self.text[start..line_end];
        let within = line
            .char_indices()
            .nth(position.character as usize)
            .map_or(line.len(), |(i, _)| i);
        Some(start + within)
    }

    /// Position for a byte offset. Offsets past the end map to the end, and
    /// offsets inside a multi-byte character map to that character.
    #[must_use]
    pub fn position(&self, offset: usize) -> Position {
        let mut offset = offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }
        let line = self
            .line_starts
            .binary_search(&offset)
            .unwrap_or_else(|i| i.saturating_sub(1));
        let start = self.line_starts[line];
        let character = self.text[start..offset].chars().count();
        Position::new(line as u32, character as u32)
    }

    #[must_use]
    pub fn range(&self, offsets: OffsetRange) -> Range {
        Range::new(self.position(offsets.start), self.position(offsets.end))
    }

    /// Range covering the whole text.
    #[must_use]
    pub fn full_range(&self) -> Range {
        Range::new(Position::new(0, 0), self.position(self.text.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_on_each_line() {
        let text = "line 1\nline 2\nline 3";
        let index = LineIndex::new(text);

        assert_eq!(index.offset(Position::new(0, 0)), Some(0));
        assert_eq!(index.offset(Position::new(0, 5)), Some(5));
        assert_eq!(index.offset(Position::new(1, 0)), Some(7));
        assert_eq!(index.offset(Position::new(1, 3)), Some(10));
        assert_eq!(index.offset(Position::new(2, 0)), Some(14));
        assert_eq!(index.offset(Position::new(3, 0)), None);
    }

    #[test]
    fn test_character_past_line_end_is_clamped() {
        let index = LineIndex::new("ab\ncd");
        assert_eq!(index.offset(Position::new(0, 10)), Some(2));
        assert_eq!(index.offset(Position::new(1, 10)), Some(5));
    }

    #[test]
    fn test_position_counts_chars_not_bytes() {
        let text = "é{\n  x";
        let index = LineIndex::new(text);
        assert_eq!(index.position(2), Position::new(0, 1));
        assert_eq!(index.offset(Position::new(0, 1)), Some(2));
        assert_eq!(index.position(text.len()), Position::new(1, 3));
        assert_eq!(index.position(1), Position::new(0, 0));
    }

    #[test]
    fn test_full_range() {
        let index = LineIndex::new("{\n  hero\n}\n");
        assert_eq!(
            index.full_range(),
            Range::new(Position::new(0, 0), Position::new(3, 0))
        );
    }
}
