//! Language extension points.
//!
//! Providers are registered per language and consulted for every model of
//! that language. Registering the same kind of provider twice keeps both, so
//! their results are merged; callers that must not duplicate results should
//! register once.

use std::collections::HashMap;
use std::sync::Arc;

use graphql_types::{EditorPosition, EditorRange, LanguageId};
use parking_lot::RwLock;

use crate::model::TextModel;

/// A block of markdown shown in a hover widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownString {
    pub value: String,
}

impl MarkdownString {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// Hover widget content. Empty `contents` means nothing to show.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hover {
    pub contents: Vec<MarkdownString>,
    pub range: Option<EditorRange>,
}

impl Hover {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}

/// Icon shown next to a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompletionItemKind {
    Field,
    Class,
    Interface,
    Variable,
    Property,
    Function,
    EnumMember,
    Keyword,
    Reference,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionItem {
    pub label: String,
    pub kind: CompletionItemKind,
    pub detail: Option<String>,
    pub documentation: Option<String>,
    pub insert_text: String,
    /// Replaced by the suggestion. `None` lets the editor use the word at the
    /// cursor.
    pub range: Option<EditorRange>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionList {
    pub suggestions: Vec<CompletionItem>,
}

/// Edit returned by a formatter, in editor coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorTextEdit {
    pub range: EditorRange,
    pub text: String,
}

pub trait HoverProvider: Send + Sync {
    fn provide_hover(&self, model: &TextModel, position: EditorPosition) -> Hover;
}

pub trait CompletionItemProvider: Send + Sync {
    fn provide_completion_items(&self, model: &TextModel, position: EditorPosition)
        -> CompletionList;
}

pub trait DocumentFormattingEditProvider: Send + Sync {
    fn provide_document_formatting_edits(&self, model: &TextModel) -> Vec<EditorTextEdit>;
}

#[derive(Default)]
struct LanguageProviders {
    hover: Vec<Arc<dyn HoverProvider>>,
    completion: Vec<Arc<dyn CompletionItemProvider>>,
    formatting: Vec<Arc<dyn DocumentFormattingEditProvider>>,
}

/// Number of providers registered for one language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProviderCounts {
    pub hover: usize,
    pub completion: usize,
    pub formatting: usize,
}

/// Registry of language providers shared by all editors on a page.
#[derive(Clone, Default)]
pub struct Languages {
    providers: Arc<RwLock<HashMap<LanguageId, LanguageProviders>>>,
}

impl std::fmt::Debug for Languages {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let providers = self.providers.read();
        let mut languages: Vec<&LanguageId> = providers.keys().collect();
        languages.sort_by_key(|l| l.as_str());
        f.debug_struct("Languages")
            .field("languages", &languages)
            .finish()
    }
}

impl Languages {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_hover_provider(
        &self,
        language: LanguageId,
        provider: impl HoverProvider + 'static,
    ) {
        tracing::debug!(%language, "registering hover provider");
        self.providers
            .write()
            .entry(language)
            .or_default()
            .hover
            .push(Arc::new(provider));
    }

    pub fn register_completion_item_provider(
        &self,
        language: LanguageId,
        provider: impl CompletionItemProvider + 'static,
    ) {
        tracing::debug!(%language, "registering completion provider");
        self.providers
            .write()
            .entry(language)
            .or_default()
            .completion
            .push(Arc::new(provider));
    }

    pub fn register_document_formatting_edit_provider(
        &self,
        language: LanguageId,
        provider: impl DocumentFormattingEditProvider + 'static,
    ) {
        tracing::debug!(%language, "registering formatting provider");
        self.providers
            .write()
            .entry(language)
            .or_default()
            .formatting
            .push(Arc::new(provider));
    }

    #[must_use]
    pub fn provider_counts(&self, language: LanguageId) -> ProviderCounts {
        self.providers
            .read()
            .get(&language)
            .map(|p| ProviderCounts {
                hover: p.hover.len(),
                completion: p.completion.len(),
                formatting: p.formatting.len(),
            })
            .unwrap_or_default()
    }

    /// Non-empty hovers from every hover provider for the model's language.
    #[must_use]
    pub fn hover(&self, model: &TextModel, position: EditorPosition) -> Vec<Hover> {
        let providers = self.with_providers(model.language(), |p| p.hover.clone());
        providers
            .iter()
            .map(|provider| provider.provide_hover(model, position))
            .filter(|hover| !hover.is_empty())
            .collect()
    }

    /// Suggestions from every completion provider, concatenated.
    #[must_use]
    pub fn completions(&self, model: &TextModel, position: EditorPosition) -> Vec<CompletionItem> {
        let providers = self.with_providers(model.language(), |p| p.completion.clone());
        providers
            .iter()
            .flat_map(|provider| provider.provide_completion_items(model, position).suggestions)
            .collect()
    }

    /// Edits from the first formatting provider registered for the model's
    /// language.
    #[must_use]
    pub fn format(&self, model: &TextModel) -> Vec<EditorTextEdit> {
        let provider = self.with_providers(model.language(), |p| p.formatting.first().cloned());
        provider
            .map(|provider| provider.provide_document_formatting_edits(model))
            .unwrap_or_default()
    }

    // Providers run without the registry lock held.
    fn with_providers<T: Default>(
        &self,
        language: LanguageId,
        f: impl FnOnce(&LanguageProviders) -> T,
    ) -> T {
        self.providers.read().get(&language).map(f).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedHover(&'static str);

    impl HoverProvider for FixedHover {
        fn provide_hover(&self, _model: &TextModel, _position: EditorPosition) -> Hover {
            if self.0.is_empty() {
                return Hover::default();
            }
            Hover {
                contents: vec![MarkdownString::new(self.0)],
                range: None,
            }
        }
    }

    struct Words;

    impl CompletionItemProvider for Words {
        fn provide_completion_items(
            &self,
            model: &TextModel,
            _position: EditorPosition,
        ) -> CompletionList {
            CompletionList {
                suggestions: model
                    .value()
                    .split_whitespace()
                    .map(|word| CompletionItem {
                        label: word.to_string(),
                        kind: CompletionItemKind::Text,
                        detail: None,
                        documentation: None,
                        insert_text: word.to_string(),
                        range: None,
                    })
                    .collect(),
            }
        }
    }

    struct Upper;

    impl DocumentFormattingEditProvider for Upper {
        fn provide_document_formatting_edits(&self, model: &TextModel) -> Vec<EditorTextEdit> {
            vec![EditorTextEdit {
                range: model.full_range(),
                text: model.value().to_uppercase(),
            }]
        }
    }

    #[test]
    fn test_providers_are_per_language() {
        let languages = Languages::new();
        languages.register_hover_provider(LanguageId::GraphQL, FixedHover("graphql"));

        let graphql = TextModel::new("{ a }", LanguageId::GraphQL);
        let json = TextModel::new("{}", LanguageId::Json);
        let position = EditorPosition::new(1, 3);

        assert_eq!(languages.hover(&graphql, position).len(), 1);
        assert!(languages.hover(&json, position).is_empty());
    }

    #[test]
    fn test_empty_hovers_are_dropped() {
        let languages = Languages::new();
        languages.register_hover_provider(LanguageId::GraphQL, FixedHover(""));
        let model = TextModel::new("{ a }", LanguageId::GraphQL);
        assert!(languages.hover(&model, EditorPosition::new(1, 1)).is_empty());
    }

    #[test]
    fn test_duplicate_registration_duplicates_results() {
        let languages = Languages::new();
        languages.register_completion_item_provider(LanguageId::GraphQL, Words);
        languages.register_completion_item_provider(LanguageId::GraphQL, Words);

        let model = TextModel::new("title", LanguageId::GraphQL);
        let labels: Vec<String> = languages
            .completions(&model, EditorPosition::new(1, 1))
            .into_iter()
            .map(|item| item.label)
            .collect();
        assert_eq!(labels, ["title", "title"]);
        assert_eq!(languages.provider_counts(LanguageId::GraphQL).completion, 2);
    }

    #[test]
    fn test_format_uses_first_provider() {
        let languages = Languages::new();
        let model = TextModel::new("abc", LanguageId::GraphQL);
        assert!(languages.format(&model).is_empty());

        languages.register_document_formatting_edit_provider(LanguageId::GraphQL, Upper);
        let edits = languages.format(&model);
        assert_eq!(edits.len(), 1);
        assert_eq!(edits[0].text, "ABC");
        assert_eq!(edits[0].range, EditorRange::new(1, 1, 1, 4));
    }
}
