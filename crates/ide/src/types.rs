use graphql_types::{DiagnosticSeverity, Range};

/// Kind of a completion suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompletionKind {
    Field,
    Type,
    Variable,
    Argument,
    Directive,
    Fragment,
    EnumValue,
    Keyword,
}

/// A completion suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionItem {
    pub label: String,
    pub kind: CompletionKind,
    pub detail: Option<String>,
    pub documentation: Option<String>,
    pub deprecated: bool,
}

impl CompletionItem {
    #[must_use]
    pub fn new(label: impl Into<String>, kind: CompletionKind) -> Self {
        Self {
            label: label.into(),
            kind,
            detail: None,
            documentation: None,
            deprecated: false,
        }
    }

    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    #[must_use]
    pub fn with_documentation(mut self, documentation: Option<&str>) -> Self {
        self.documentation = documentation.map(ToString::to_string);
        self
    }

    #[must_use]
    pub const fn with_deprecated(mut self, deprecated: bool) -> Self {
        self.deprecated = deprecated;
        self
    }
}

/// Markdown hover text and the range it describes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoverResult {
    pub contents: String,
    pub range: Option<Range>,
}

impl HoverResult {
    #[must_use]
    pub fn new(contents: impl Into<String>) -> Self {
        Self {
            contents: contents.into(),
            range: None,
        }
    }

    #[must_use]
    pub const fn with_range(mut self, range: Range) -> Self {
        self.range = Some(range);
        self
    }
}

/// A finding reported by [`Analysis::diagnostics`](crate::Analysis::diagnostics)
/// or [`json_diagnostics`](crate::json_diagnostics).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub range: Range,
    pub message: String,
    pub severity: DiagnosticSeverity,
    /// Which checker produced it: `graphql` or `json`.
    pub source: &'static str,
    /// `syntax`, `validation` or `deprecated`.
    pub code: &'static str,
}

impl Diagnostic {
    #[must_use]
    pub fn error(
        range: Range,
        message: impl Into<String>,
        source: &'static str,
        code: &'static str,
    ) -> Self {
        Self {
            range,
            message: message.into(),
            severity: DiagnosticSeverity::Error,
            source,
            code,
        }
    }

    #[must_use]
    pub fn warning(
        range: Range,
        message: impl Into<String>,
        source: &'static str,
        code: &'static str,
    ) -> Self {
        Self {
            severity: DiagnosticSeverity::Warning,
            ..Self::error(range, message, source, code)
        }
    }
}
