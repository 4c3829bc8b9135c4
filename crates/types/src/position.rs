//! Service-side position and range types (0-based).

use std::cmp::Ordering;

/// Byte offset range in a buffer's text.
///
/// Used by the language service when walking syntax trees; converted to
/// [`Position`]s through a [`LineIndex`](crate::LineIndex).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct OffsetRange {
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl OffsetRange {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `offset` falls inside the range, treating the end as inclusive.
    ///
    /// Cursor lookups want the position just past the last character of a
    /// name to still count as "on" that name.
    #[must_use]
    pub const fn touches(&self, offset: usize) -> bool {
        offset >= self.start && offset <= self.end
    }
}

impl std::fmt::Display for OffsetRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Position as understood by the language service.
///
/// - `line` is 0-indexed (first line is 0)
/// - `character` is 0-indexed, counted in `char`s from the line start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    #[must_use]
    pub const fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.line
            .cmp(&other.line)
            .then(self.character.cmp(&other.character))
    }
}

/// Range in service coordinates, `start` inclusive and `end` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    #[must_use]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Zero-width range at a position.
    #[must_use]
    pub const fn at(position: Position) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start.line == self.end.line && self.start.character == self.end.character
    }

    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        position >= self.start && position < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_range_touches_is_end_inclusive() {
        let range = OffsetRange::new(4, 9);
        assert!(range.touches(4));
        assert!(range.touches(9));
        assert!(!range.touches(10));
        assert!(!range.touches(3));
        assert_eq!(range.len(), 5);
        assert_eq!(format!("{range}"), "4..9");
    }

    #[test]
    fn test_position_ordering_is_line_major() {
        assert!(Position::new(0, 40) < Position::new(1, 0));
        assert!(Position::new(2, 3) < Position::new(2, 4));
        assert_eq!(Position::new(1, 1).cmp(&Position::new(1, 1)), Ordering::Equal);
    }

    #[test]
    fn test_range_contains_excludes_end() {
        let range = Range::new(Position::new(1, 0), Position::new(3, 0));
        assert!(range.contains(Position::new(1, 0)));
        assert!(range.contains(Position::new(2, 99)));
        assert!(!range.contains(Position::new(3, 0)));
        assert!(Range::at(Position::new(5, 5)).is_empty());
    }
}
