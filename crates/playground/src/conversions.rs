//! Conversions from language-service results to editor-widget shapes.
//!
//! The language service speaks 0-based positions; the editor speaks 1-based
//! ones. Every crossing goes through [`EditorRange::from_service`] or
//! [`EditorPosition::to_service`](graphql_types::EditorPosition::to_service).
//!
//! ```rust,ignore
//! use crate::conversions::IntoEditor;
//!
//! let marker = diagnostic.into_editor();
//! let hover = hover_result.into_editor();
//! ```

use graphql_editor::{
    CompletionItem, CompletionItemKind, EditorTextEdit, Hover, MarkdownString, MarkerData,
    MarkerSeverity,
};
use graphql_ide::{CompletionKind, Diagnostic, HoverResult};
use graphql_types::{EditorRange, TextEdit};

/// Extension trait for converting graphql-ide types to editor types.
pub trait IntoEditor {
    type Output;
    fn into_editor(self) -> Self::Output;
}

impl IntoEditor for Diagnostic {
    type Output = MarkerData;
    fn into_editor(self) -> MarkerData {
        MarkerData::new(
            EditorRange::from_service(self.range),
            self.message,
            MarkerSeverity::from(self.severity),
        )
        .with_source(self.source)
    }
}

impl IntoEditor for &Diagnostic {
    type Output = MarkerData;
    fn into_editor(self) -> MarkerData {
        self.clone().into_editor()
    }
}

impl IntoEditor for HoverResult {
    type Output = Hover;
    fn into_editor(self) -> Hover {
        Hover {
            contents: vec![MarkdownString::new(self.contents)],
            range: self.range.map(EditorRange::from_service),
        }
    }
}

impl IntoEditor for CompletionKind {
    type Output = CompletionItemKind;
    fn into_editor(self) -> CompletionItemKind {
        match self {
            Self::Field => CompletionItemKind::Field,
            Self::Type => CompletionItemKind::Class,
            Self::Variable => CompletionItemKind::Variable,
            Self::Argument => CompletionItemKind::Property,
            Self::Directive => CompletionItemKind::Function,
            Self::Fragment => CompletionItemKind::Reference,
            Self::EnumValue => CompletionItemKind::EnumMember,
            Self::Keyword => CompletionItemKind::Keyword,
        }
    }
}

/// The label is inserted as typed. No replace range is given, so the editor
/// replaces the word at the cursor.
impl IntoEditor for graphql_ide::CompletionItem {
    type Output = CompletionItem;
    fn into_editor(self) -> CompletionItem {
        CompletionItem {
            insert_text: self.label.clone(),
            label: self.label,
            kind: self.kind.into_editor(),
            detail: self.detail,
            documentation: self.documentation,
            range: None,
        }
    }
}

impl IntoEditor for TextEdit {
    type Output = EditorTextEdit;
    fn into_editor(self) -> EditorTextEdit {
        EditorTextEdit {
            range: EditorRange::from_service(self.range),
            text: self.new_text,
        }
    }
}
