//! Editor-widget coordinates (1-based) and their translation to service
//! coordinates (0-based).
//!
//! The translation is the same for every caller: hover, completion,
//! diagnostics and formatting all subtract exactly one from both the line and
//! the column when going editor → service, and add one going back.

use crate::{Position, Range};

/// Cursor position as reported by the editor widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EditorPosition {
    /// 1-based line number
    pub line_number: u32,
    /// 1-based column
    pub column: u32,
}

impl EditorPosition {
    #[must_use]
    pub const fn new(line_number: u32, column: u32) -> Self {
        Self {
            line_number,
            column,
        }
    }

    /// Translate to the language service's 0-based position.
    ///
    /// Values below 1 are clamped to the first line/character.
    #[must_use]
    pub const fn to_service(self) -> Position {
        Position::new(
            self.line_number.saturating_sub(1),
            self.column.saturating_sub(1),
        )
    }

    #[must_use]
    pub const fn from_service(position: Position) -> Self {
        Self::new(position.line + 1, position.character + 1)
    }
}

/// Range in editor coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EditorRange {
    pub start_line_number: u32,
    pub start_column: u32,
    pub end_line_number: u32,
    pub end_column: u32,
}

impl EditorRange {
    #[must_use]
    pub const fn new(
        start_line_number: u32,
        start_column: u32,
        end_line_number: u32,
        end_column: u32,
    ) -> Self {
        Self {
            start_line_number,
            start_column,
            end_line_number,
            end_column,
        }
    }

    #[must_use]
    pub const fn from_service(range: Range) -> Self {
        Self::new(
            range.start.line + 1,
            range.start.character + 1,
            range.end.line + 1,
            range.end.character + 1,
        )
    }

    #[must_use]
    pub const fn to_service(self) -> Range {
        Range::new(
            EditorPosition::new(self.start_line_number, self.start_column).to_service(),
            EditorPosition::new(self.end_line_number, self.end_column).to_service(),
        )
    }

    #[must_use]
    pub const fn start(&self) -> EditorPosition {
        EditorPosition::new(self.start_line_number, self.start_column)
    }

    #[must_use]
    pub const fn end(&self) -> EditorPosition {
        EditorPosition::new(self.end_line_number, self.end_column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editor_to_service_subtracts_one_from_both_axes() {
        let service = EditorPosition::new(3, 7).to_service();
        assert_eq!(service, Position::new(2, 6));
    }

    #[test]
    fn test_service_round_trip() {
        for (line, column) in [(1, 1), (1, 12), (40, 3)] {
            let editor = EditorPosition::new(line, column);
            assert_eq!(EditorPosition::from_service(editor.to_service()), editor);
        }
    }

    #[test]
    fn test_origin_is_clamped() {
        assert_eq!(EditorPosition::new(0, 0).to_service(), Position::new(0, 0));
    }

    #[test]
    fn test_range_from_service() {
        let range = Range::new(Position::new(0, 8), Position::new(0, 15));
        let editor = EditorRange::from_service(range);
        assert_eq!(editor, EditorRange::new(1, 9, 1, 16));
        assert_eq!(editor.to_service(), range);
        assert_eq!(editor.start(), EditorPosition::new(1, 9));
        assert_eq!(editor.end(), EditorPosition::new(1, 16));
    }
}
