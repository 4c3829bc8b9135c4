//! Whole-document formatting.

use apollo_compiler::ast::Document;
use apollo_parser::{Lexer, TokenKind};

const DOCUMENT_PATH: &str = "format.graphql";

/// Pretty-prints an executable or type-system document.
///
/// Returns `None` for documents with syntax errors, and for documents
/// containing comments, which the printer would drop.
#[must_use]
#[tracing::instrument(skip_all, fields(len = source.len()))]
pub fn format_document(source: &str) -> Option<String> {
    if has_comments(source) {
        tracing::debug!("document has comments, leaving it untouched");
        return None;
    }
    match Document::parse(source, DOCUMENT_PATH) {
        Ok(document) => Some(document.to_string()),
        Err(invalid) => {
            tracing::debug!(errors = invalid.errors.len(), "not formatting invalid document");
            None
        }
    }
}

fn has_comments(source: &str) -> bool {
    Lexer::new(source)
        .filter_map(Result::ok)
        .any(|token| token.kind() == TokenKind::Comment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphql_test_utils::FILMS_QUERY;

    #[test]
    fn test_formats_compact_query() {
        let formatted = format_document("{ film(id: \"1\") { title director } }").unwrap();
        assert!(
            formatted.contains("  film(id: \"1\") {\n    title\n    director\n  }"),
            "{formatted}"
        );
    }

    #[test]
    fn test_formatting_is_idempotent() {
        let once = format_document(FILMS_QUERY).unwrap();
        let twice = format_document(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_syntax_errors_are_not_formatted() {
        assert_eq!(format_document("{ film { title "), None);
    }

    #[test]
    fn test_comments_are_not_formatted() {
        assert_eq!(format_document("# films\n{ allFilms { totalCount } }"), None);
    }
}
