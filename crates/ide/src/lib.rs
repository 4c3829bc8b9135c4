/// # graphql-ide
///
/// This crate provides the language service behind the playground editors.
/// It is the API boundary between the GraphQL toolchain (`apollo-compiler`,
/// `apollo-parser`) and the editor-provider adapter.
///
/// ## Core Principle: POD Types with Public Fields
///
/// - All result types are Plain Old Data structs with public fields
/// - Positions are the service's 0-based [`Position`]; converting to the
///   editor's 1-based coordinates is the adapter's job
/// - No editor knowledge leaks into this crate
///
/// ## Architecture
///
/// ```text
/// graphql-playground (adapter)
///     ↓
/// graphql-ide (this crate) ← Analysis snapshot, POD types
///     ↓
/// apollo-compiler / apollo-parser ← Validation, schema, CST
/// ```
///
/// ## Main Types
///
/// - [`Analysis`] - Immutable snapshot over one validated schema
/// - Feature types: [`CompletionItem`], [`HoverResult`], [`Diagnostic`]
/// - Variables buffer: [`json_diagnostics`], [`variable_definitions`]
use std::sync::Arc;

use apollo_compiler::validation::Valid;
use apollo_compiler::Schema;

mod helpers;
pub(crate) mod symbol;
mod types;

// Feature modules
mod completion;
mod diagnostics;
mod format;
mod hover;
mod variables;

pub use format::format_document;
pub use graphql_types::{DiagnosticSeverity, Position, Range, TextEdit};
pub use types::{CompletionItem, CompletionKind, Diagnostic, HoverResult};
pub use variables::{
    json_diagnostics, variable_definitions, variables_completions, variables_hover,
    VariableDefinitionInfo,
};

/// Immutable snapshot for querying IDE features against one schema.
///
/// Cloning is cheap; the schema is shared.
#[derive(Debug, Clone)]
pub struct Analysis {
    schema: Arc<Valid<Schema>>,
}

impl Analysis {
    #[must_use]
    pub const fn new(schema: Arc<Valid<Schema>>) -> Self {
        Self { schema }
    }

    #[must_use]
    pub fn schema(&self) -> &Valid<Schema> {
        &self.schema
    }

    /// Syntax errors, or validation errors plus deprecation warnings.
    #[must_use]
    pub fn diagnostics(&self, source: &str) -> Vec<Diagnostic> {
        diagnostics::diagnostics(&self.schema, source)
    }

    #[must_use]
    pub fn hover(&self, source: &str, position: Position) -> Option<HoverResult> {
        hover::hover(&self.schema, source, position)
    }

    /// Ranked suggestions at `position`.
    #[must_use]
    pub fn completions(&self, source: &str, position: Position) -> Vec<CompletionItem> {
        completion::completions(&self.schema, source, position)
    }

    /// One edit replacing the whole document with its formatted text.
    ///
    /// `None` when the document cannot be formatted.
    #[must_use]
    pub fn format(&self, source: &str) -> Option<TextEdit> {
        let formatted = format_document(source)?;
        let range = graphql_types::LineIndex::new(source).full_range();
        Some(TextEdit::new(range, formatted))
    }
}
