//! Test helpers shared by the playground crates.
//!
//! - [`extract_cursor`] and [`extract_editor_cursor`] turn a `*` marker in a
//!   source string into a position
//! - [`fixtures`] holds a small SWAPI schema as SDL and as an introspection
//!   response, plus the example operation the playground starts with
//! - [`format_messages`] renders diagnostics for readable assertions

mod cursor;
pub mod fixtures;

pub use cursor::{extract_cursor, extract_editor_cursor};
pub use fixtures::{swapi_schema, FILMS_QUERY, SWAPI_INTROSPECTION, SWAPI_SDL};

/// Numbered one-per-line listing, `(no diagnostics)` when empty.
#[must_use]
pub fn format_messages<T: AsRef<str>>(messages: &[T]) -> String {
    if messages.is_empty() {
        return String::from("(no diagnostics)");
    }

    messages
        .iter()
        .enumerate()
        .map(|(i, m)| format!("[{}] {}", i + 1, m.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_messages() {
        let empty: Vec<String> = vec![];
        assert_eq!(format_messages(&empty), "(no diagnostics)");
        assert_eq!(format_messages(&["a", "b"]), "[1] a\n[2] b");
    }
}
