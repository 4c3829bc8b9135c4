//! Editor-provider adapter.
//!
//! Registers hover, completion and formatting providers with the editor's
//! language registry, and turns language-service diagnostics into markers.
//! Providers hold a [`SchemaCell`] rather than a schema, so they always see
//! the schema that is current when the editor calls them, and return nothing
//! while no schema is loaded.

use graphql_editor::{
    CompletionItemProvider, CompletionList, DocumentFormattingEditProvider, EditorTextEdit,
    Hover, HoverProvider, Languages, MarkerData, MarkerStore, TextModel,
};
use graphql_ide::{Analysis, Diagnostic};
use graphql_types::{EditorPosition, LanguageId};

use crate::conversions::IntoEditor;
use crate::schema_cell::SchemaCell;

/// Owner of the markers the diagnostics hook sets.
pub const MARKER_OWNER: &str = "linter";

/// Content no longer than this, once trimmed, is not diagnosed.
const MIN_DIAGNOSED_LEN: usize = 2;

/// What the providers and the diagnostics hook need from the application.
#[derive(Debug, Clone)]
pub struct ProviderContext {
    pub schema: SchemaCell,
    pub languages: Languages,
    pub markers: MarkerStore,
    /// Declares the variables the variables buffer is checked against.
    pub query_model: TextModel,
}

/// Outcome of one diagnostics pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnoseResult {
    pub valid: bool,
    pub diagnostics: Vec<Diagnostic>,
    pub formatted_diagnostics: Vec<MarkerData>,
}

/// Register the GraphQL providers: hover, completion and formatting.
///
/// Every call adds another set; call it once per registry.
pub fn register_query_providers(ctx: &ProviderContext) {
    let languages = &ctx.languages;
    languages.register_hover_provider(
        LanguageId::GraphQL,
        QueryHover {
            schema: ctx.schema.clone(),
        },
    );
    languages.register_completion_item_provider(
        LanguageId::GraphQL,
        QueryCompletion {
            schema: ctx.schema.clone(),
        },
    );
    languages.register_document_formatting_edit_provider(
        LanguageId::GraphQL,
        QueryFormatting {
            schema: ctx.schema.clone(),
        },
    );
}

/// Register the JSON providers for the variables buffer: hover and
/// completion over the variables the query buffer declares.
pub fn register_variables_providers(ctx: &ProviderContext) {
    ctx.languages.register_hover_provider(
        LanguageId::Json,
        VariablesHover {
            schema: ctx.schema.clone(),
            query_model: ctx.query_model.clone(),
        },
    );
    ctx.languages.register_completion_item_provider(
        LanguageId::Json,
        VariablesCompletion {
            schema: ctx.schema.clone(),
            query_model: ctx.query_model.clone(),
        },
    );
}

/// Content-change hook: diagnose `model` unless its trimmed content is two
/// characters or fewer, or no schema is loaded.
#[must_use]
pub fn on_change_query(model: &TextModel, ctx: &ProviderContext) -> Option<DiagnoseResult> {
    let value = model.value();
    if value.trim().chars().count() <= MIN_DIAGNOSED_LEN {
        tracing::trace!(model = %model.id(), "content too short to diagnose");
        return None;
    }
    let Some(analysis) = ctx.schema.analysis() else {
        tracing::trace!(model = %model.id(), "no schema yet, skipping diagnostics");
        return None;
    };
    Some(diagnose_query_value(model, &analysis, &ctx.markers))
}

/// Diagnose the model's content and replace its `linter` markers.
///
/// GraphQL buffers get syntax, validation and deprecation findings. JSON
/// buffers get JSON syntax errors.
#[must_use]
#[tracing::instrument(skip_all, fields(model = %model.id(), language = %model.language()))]
pub fn diagnose_query_value(
    model: &TextModel,
    analysis: &Analysis,
    markers: &MarkerStore,
) -> DiagnoseResult {
    let value = model.value();
    let diagnostics = match model.language() {
        LanguageId::GraphQL => analysis.diagnostics(&value),
        LanguageId::Json => graphql_ide::json_diagnostics(&value),
    };
    let formatted_diagnostics: Vec<MarkerData> =
        diagnostics.iter().map(IntoEditor::into_editor).collect();

    markers.set_model_markers(model, MARKER_OWNER, formatted_diagnostics.clone());
    tracing::debug!(count = diagnostics.len(), "diagnosed");

    DiagnoseResult {
        valid: diagnostics.is_empty(),
        diagnostics,
        formatted_diagnostics,
    }
}

struct QueryHover {
    schema: SchemaCell,
}

impl HoverProvider for QueryHover {
    fn provide_hover(&self, model: &TextModel, position: EditorPosition) -> Hover {
        let Some(analysis) = self.schema.analysis() else {
            return Hover::default();
        };
        analysis
            .hover(&model.value(), position.to_service())
            .map(IntoEditor::into_editor)
            .unwrap_or_default()
    }
}

struct QueryCompletion {
    schema: SchemaCell,
}

impl CompletionItemProvider for QueryCompletion {
    fn provide_completion_items(
        &self,
        model: &TextModel,
        position: EditorPosition,
    ) -> CompletionList {
        let Some(analysis) = self.schema.analysis() else {
            return CompletionList::default();
        };
        CompletionList {
            suggestions: analysis
                .completions(&model.value(), position.to_service())
                .into_iter()
                .map(IntoEditor::into_editor)
                .collect(),
        }
    }
}

struct QueryFormatting {
    schema: SchemaCell,
}

impl DocumentFormattingEditProvider for QueryFormatting {
    fn provide_document_formatting_edits(&self, model: &TextModel) -> Vec<EditorTextEdit> {
        let Some(analysis) = self.schema.analysis() else {
            return Vec::new();
        };
        analysis
            .format(&model.value())
            .map(IntoEditor::into_editor)
            .into_iter()
            .collect()
    }
}

struct VariablesHover {
    schema: SchemaCell,
    query_model: TextModel,
}

impl HoverProvider for VariablesHover {
    fn provide_hover(&self, model: &TextModel, position: EditorPosition) -> Hover {
        if !self.schema.is_loaded() {
            return Hover::default();
        }
        graphql_ide::variables_hover(
            &self.query_model.value(),
            &model.value(),
            position.to_service(),
        )
        .map(IntoEditor::into_editor)
        .unwrap_or_default()
    }
}

struct VariablesCompletion {
    schema: SchemaCell,
    query_model: TextModel,
}

impl CompletionItemProvider for VariablesCompletion {
    fn provide_completion_items(
        &self,
        model: &TextModel,
        position: EditorPosition,
    ) -> CompletionList {
        if !self.schema.is_loaded() {
            return CompletionList::default();
        }
        CompletionList {
            suggestions: graphql_ide::variables_completions(
                &self.query_model.value(),
                &model.value(),
                position.to_service(),
            )
            .into_iter()
            .map(IntoEditor::into_editor)
            .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphql_editor::{CompletionItemKind, MarkerSeverity};
    use graphql_test_utils::{extract_editor_cursor, swapi_schema, FILMS_QUERY};
    use graphql_types::EditorRange;

    fn context(query: &str) -> ProviderContext {
        ProviderContext {
            schema: SchemaCell::new(),
            languages: Languages::new(),
            markers: MarkerStore::new(),
            query_model: TextModel::new(query, LanguageId::GraphQL),
        }
    }

    fn loaded(query: &str) -> ProviderContext {
        let ctx = context(query);
        ctx.schema.set(swapi_schema());
        ctx
    }

    #[test]
    fn test_short_content_is_not_diagnosed() {
        let ctx = loaded("{ }");
        for text in ["", "{}", "  {}  \n", "ab", "éé"] {
            ctx.query_model.set_value(text);
            assert_eq!(on_change_query(&ctx.query_model, &ctx), None, "{text:?}");
        }
        assert!(ctx.markers.model_markers(&ctx.query_model, None).is_empty());
    }

    #[test]
    fn test_hook_does_nothing_without_schema() {
        let ctx = context("{ nope }");
        assert_eq!(on_change_query(&ctx.query_model, &ctx), None);
        assert!(ctx.markers.model_markers(&ctx.query_model, None).is_empty());
    }

    #[test]
    fn test_invalid_query_sets_markers() {
        let ctx = loaded("{\n  nope\n}");
        let result = on_change_query(&ctx.query_model, &ctx).unwrap();

        assert!(!result.valid);
        assert_eq!(result.diagnostics.len(), 1);
        let marker = &result.formatted_diagnostics[0];
        assert_eq!(marker.start_line_number, 2);
        assert_eq!(marker.start_column, 3);
        assert_eq!(marker.severity, MarkerSeverity::Error);
        assert_eq!(
            ctx.markers.model_markers(&ctx.query_model, Some(MARKER_OWNER)),
            result.formatted_diagnostics
        );
    }

    #[test]
    fn test_valid_query_clears_markers() {
        let ctx = loaded("{ nope }");
        assert!(!on_change_query(&ctx.query_model, &ctx).unwrap().valid);

        ctx.query_model.set_value(FILMS_QUERY);
        let result = on_change_query(&ctx.query_model, &ctx).unwrap();
        assert!(result.valid);
        assert!(result.diagnostics.is_empty());
        assert!(ctx.markers.model_markers(&ctx.query_model, None).is_empty());
    }

    #[test]
    fn test_deprecated_field_is_a_warning_marker() {
        let ctx = loaded("{\n  film(id: \"1\") {\n    created\n  }\n}");
        let result = on_change_query(&ctx.query_model, &ctx).unwrap();
        assert!(!result.valid);
        let marker = &result.formatted_diagnostics[0];
        assert_eq!(marker.severity, MarkerSeverity::Warning);
        assert_eq!(marker.range(), EditorRange::new(3, 5, 3, 12));
    }

    #[test]
    fn test_json_buffer_gets_json_diagnostics() {
        let ctx = loaded(FILMS_QUERY);
        let variables = TextModel::new("{ \"first\": }", LanguageId::Json);
        let result = on_change_query(&variables, &ctx).unwrap();
        assert!(!result.valid);
        assert_eq!(result.diagnostics[0].source, "json");

        variables.set_value("{ \"first\": 2 }");
        assert!(on_change_query(&variables, &ctx).unwrap().valid);
    }

    #[test]
    fn test_hover_translates_editor_position() {
        let ctx = loaded("");
        register_query_providers(&ctx);
        let (text, position) = extract_editor_cursor("{\n  film(id: \"1\") {\n    *title\n  }\n}");
        ctx.query_model.set_value(text);

        let hovers = ctx.languages.hover(&ctx.query_model, position);
        assert_eq!(hovers.len(), 1);
        assert!(hovers[0].contents[0].value.contains("Film.title: String"));
        assert_eq!(hovers[0].range, Some(EditorRange::new(3, 5, 3, 10)));
    }

    #[test]
    fn test_completion_translates_editor_position() {
        let ctx = loaded("");
        register_query_providers(&ctx);
        let (text, position) = extract_editor_cursor("{\n  film(id: \"1\") {\n    dir*\n  }\n}");
        ctx.query_model.set_value(text);

        let items = ctx.languages.completions(&ctx.query_model, position);
        assert_eq!(items[0].label, "director");
        assert_eq!(items[0].insert_text, "director");
        assert_eq!(items[0].kind, CompletionItemKind::Field);
    }

    #[test]
    fn test_providers_are_empty_until_schema_loads() {
        let ctx = context("{ allFilms { totalCount } }");
        register_query_providers(&ctx);
        let position = EditorPosition::new(1, 5);

        assert!(ctx.languages.hover(&ctx.query_model, position).is_empty());
        assert!(ctx.languages.completions(&ctx.query_model, position).is_empty());
        assert!(ctx.languages.format(&ctx.query_model).is_empty());

        ctx.schema.set(swapi_schema());
        assert_eq!(ctx.languages.hover(&ctx.query_model, position).len(), 1);
    }

    #[test]
    fn test_format_returns_full_range_edit() {
        let ctx = loaded("{ allFilms { totalCount } }");
        register_query_providers(&ctx);
        let edits = ctx.languages.format(&ctx.query_model);
        assert_eq!(edits.len(), 1);
        assert_eq!(edits[0].range, ctx.query_model.full_range());

        ctx.query_model.set_value(edits[0].text.clone());
        let again = ctx.languages.format(&ctx.query_model);
        assert_eq!(again[0].text, edits[0].text);
    }

    #[test]
    fn test_variables_providers_use_query_definitions() {
        let ctx = loaded(FILMS_QUERY);
        register_variables_providers(&ctx);
        let (text, position) = extract_editor_cursor("{ \"fi*rst\": 2 }");
        let variables = TextModel::new(text, LanguageId::Json);

        let hovers = ctx.languages.hover(&variables, position);
        assert!(hovers[0].contents[0].value.contains("$first: Int"));

        let (text, position) = extract_editor_cursor("{ \"*");
        variables.set_value(text);
        let items = ctx.languages.completions(&variables, position);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].label, "first");
    }

    #[test]
    fn test_registering_twice_duplicates_providers() {
        let ctx = loaded("{ allFilms { totalCount } }");
        register_query_providers(&ctx);
        register_query_providers(&ctx);
        let counts = ctx.languages.provider_counts(LanguageId::GraphQL);
        assert_eq!(counts.hover, 2);
        assert_eq!(
            ctx.languages
                .hover(&ctx.query_model, EditorPosition::new(1, 5))
                .len(),
            2
        );
    }
}
