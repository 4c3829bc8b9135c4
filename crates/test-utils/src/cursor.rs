use graphql_types::{EditorPosition, Position};

/// Removes the single `*` marker from `input` and returns the clean source
/// with the 0-based position the marker stood at.
///
/// ```
/// use graphql_test_utils::extract_cursor;
///
/// let (source, pos) = extract_cursor("query {\n  fi*lm\n}");
/// assert_eq!(source, "query {\n  film\n}");
/// assert_eq!((pos.line, pos.character), (1, 4));
/// ```
///
/// # Panics
///
/// Panics unless the input holds exactly one `*`.
#[must_use]
pub fn extract_cursor(input: &str) -> (String, Position) {
    let markers = input.matches('*').count();
    assert_eq!(
        markers, 1,
        "extract_cursor: expected exactly one '*' marker, found {markers}"
    );

    let mut position = Position::new(0, 0);
    let mut found = None;
    let mut source = String::with_capacity(input.len() - 1);

    for ch in input.chars() {
        if ch == '*' {
            found = Some(position);
            continue;
        }
        source.push(ch);
        if ch == '\n' {
            position = Position::new(position.line + 1, 0);
        } else {
            position = Position::new(position.line, position.character + 1);
        }
    }

    let Some(found) = found else {
        unreachable!("marker counted above");
    };
    (source, found)
}

/// Same as [`extract_cursor`] but in the editor's 1-based coordinates.
#[must_use]
pub fn extract_editor_cursor(input: &str) -> (String, EditorPosition) {
    let (source, position) = extract_cursor(input);
    (source, EditorPosition::from_service(position))
}
