//! Support for the JSON variables buffer.
//!
//! The variables buffer has no schema of its own. Its keys are checked
//! against the variable definitions of the operations in the query buffer.

use apollo_parser::cst::{self, CstNode};
use graphql_types::{LineIndex, OffsetRange, Position, Range};

use crate::completion::rank;
use crate::helpers::trailing_word;
use crate::symbol::type_text;
use crate::types::{CompletionItem, CompletionKind, Diagnostic, HoverResult};

const SOURCE: &str = "json";

/// A `$name: Type = default` declared by an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDefinitionInfo {
    pub name: String,
    pub ty: String,
    pub default_value: Option<String>,
}

/// Variables declared by every operation in `query`, in source order, each
/// name once.
#[must_use]
pub fn variable_definitions(query: &str) -> Vec<VariableDefinitionInfo> {
    let tree = apollo_parser::Parser::new(query).parse();
    let mut found: Vec<VariableDefinitionInfo> = Vec::new();
    for definition in tree.document().definitions() {
        let cst::Definition::OperationDefinition(op) = definition else {
            continue;
        };
        let Some(definitions) = op.variable_definitions() else {
            continue;
        };
        for definition in definitions.variable_definitions() {
            let Some(name) = definition.variable().and_then(|v| v.name()) else {
                continue;
            };
            let name = name.text().to_string();
            if found.iter().any(|info| info.name == name) {
                continue;
            }
            found.push(VariableDefinitionInfo {
                name,
                ty: definition.ty().map(|t| type_text(&t)).unwrap_or_default(),
                default_value: definition
                    .default_value()
                    .and_then(|d| d.value())
                    .map(|v| v.syntax().text().to_string().trim().to_string()),
            });
        }
    }
    found
}

/// JSON syntax errors in the variables text. Blank text is valid.
#[must_use]
pub fn json_diagnostics(text: &str) -> Vec<Diagnostic> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    let Err(error) = serde_json::from_str::<serde_json::Value>(text) else {
        return Vec::new();
    };
    // serde_json columns count bytes.
    let index = LineIndex::new(text);
    let line_start = index
        .offset(Position::new(error.line().saturating_sub(1) as u32, 0))
        .unwrap_or(text.len());
    let start = index.position(line_start + error.column().saturating_sub(1));
    let end = Position::new(start.line, start.character + 1);
    vec![Diagnostic::error(
        Range::new(start, end),
        error.to_string(),
        SOURCE,
        "syntax",
    )]
}

/// Hover for a variables key naming a variable declared in `query`.
#[must_use]
pub fn variables_hover(query: &str, text: &str, position: Position) -> Option<HoverResult> {
    let index = LineIndex::new(text);
    let offset = index.offset(position)?;
    let key = object_keys(text)
        .into_iter()
        .find(|key| key.range.touches(offset))?;
    let info = variable_definitions(query)
        .into_iter()
        .find(|info| info.name == key.name)?;

    let mut signature = format!("${}: {}", info.name, info.ty);
    if let Some(default) = &info.default_value {
        signature.push_str(" = ");
        signature.push_str(default);
    }
    Some(
        HoverResult::new(format!("```graphql\n{signature}\n```"))
            .with_range(index.range(key.range)),
    )
}

/// Variable names declared in `query`, for the variables buffer.
#[must_use]
pub fn variables_completions(query: &str, text: &str, position: Position) -> Vec<CompletionItem> {
    let index = LineIndex::new(text);
    let Some(offset) = index.offset(position) else {
        return Vec::new();
    };
    let word = trailing_word(&text[..offset]);
    let items = variable_definitions(query)
        .into_iter()
        .map(|info| CompletionItem::new(info.name, CompletionKind::Variable).with_detail(info.ty))
        .collect();
    rank(items, word)
}

struct ObjectKey {
    name: String,
    /// Includes the quotes.
    range: OffsetRange,
}

/// String literals followed by `:`. Nesting is not tracked, so keys of
/// nested input objects are included.
fn object_keys(text: &str) -> Vec<ObjectKey> {
    let mut keys = Vec::new();
    let mut chars = text.char_indices();
    while let Some((start, c)) = chars.next() {
        if c != '"' {
            continue;
        }
        let mut name = String::new();
        let mut end = text.len();
        while let Some((i, c)) = chars.next() {
            match c {
                '\\' => {
                    chars.next();
                }
                '"' => {
                    end = i + 1;
                    break;
                }
                _ => name.push(c),
            }
        }
        if text[end..].trim_start().starts_with(':') {
            keys.push(ObjectKey {
                name,
                range: OffsetRange::new(start, end),
            });
        }
    }
    keys
}
