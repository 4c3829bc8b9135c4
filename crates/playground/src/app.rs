//! The application shell.
//!
//! [`Playground`] owns the three buffers (operation, variables, results),
//! the editors showing them, the shared schema, and the actions bound to
//! them. Hosts drive it: they call [`Playground::load_schema`] once at
//! startup, forward keybindings and resizes, and read the results buffer.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use graphql_config::{
    default_config_document, load_browser_config, GraphQLConfig, MemoryStorage, Storage,
    DEFAULT_ENDPOINT,
};
use graphql_editor::{
    ActionDescriptor, CompletionItem, Editor, EditorOptions, Hover, KeyCode, KeyMod, Keybinding,
    Languages, MarkerData, MarkerStore, Page, TextModel, WordWrap,
};
use graphql_introspect::{build_client_schema, ExecutionResponse, GraphQLClient, OperationRequest};
use graphql_types::{EditorPosition, LanguageId};
use parking_lot::RwLock;
use serde_json::Value;

use crate::adapter::{
    diagnose_query_value, on_change_query, register_query_providers,
    register_variables_providers, DiagnoseResult, ProviderContext, MARKER_OWNER,
};
use crate::defaults::{
    EMPTY_RESULTS, EXAMPLE_QUERY, EXAMPLE_VARIABLES, FORMAT_ACTION_ID, FORMAT_ACTION_LABEL,
    QUERY_CONTAINER, RESULTS_CONTAINER, RUN_ACTION_ID, RUN_ACTION_LABEL, VARIABLES_CONTAINER,
};
use crate::error::Result;
use crate::schema_cell::SchemaCell;

/// Where the configuration document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Persisted to the storage backend, then read back.
    Document(String),
    /// Read from disk as is.
    File(PathBuf),
}

pub struct PlaygroundOptions {
    pub config: ConfigSource,
    pub storage: Arc<dyn Storage>,
    pub query: String,
    pub variables: String,
}

impl std::fmt::Debug for PlaygroundOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaygroundOptions")
            .field("config", &self.config)
            .field("query_len", &self.query.len())
            .field("variables_len", &self.variables.len())
            .finish_non_exhaustive()
    }
}

impl Default for PlaygroundOptions {
    fn default() -> Self {
        Self {
            config: ConfigSource::Document(default_config_document(DEFAULT_ENDPOINT)),
            storage: Arc::new(MemoryStorage::new()),
            query: EXAMPLE_QUERY.to_string(),
            variables: EXAMPLE_VARIABLES.to_string(),
        }
    }
}

impl PlaygroundOptions {
    /// Use the synthesized configuration document for `endpoint`.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.config = ConfigSource::Document(default_config_document(endpoint));
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: ConfigSource) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_storage(mut self, storage: Arc<dyn Storage>) -> Self {
        self.storage = storage;
        self
    }

    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    #[must_use]
    pub fn with_variables(mut self, variables: impl Into<String>) -> Self {
        self.variables = variables.into();
        self
    }
}

/// The three panes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pane {
    Query,
    Variables,
    Results,
}

#[derive(Debug)]
pub struct Playground {
    ctx: ProviderContext,
    variables_model: TextModel,
    results_model: TextModel,
    query_editor: Editor,
    variables_editor: Editor,
    results_editor: Editor,
    options: PlaygroundOptions,
    config: RwLock<Option<GraphQLConfig>>,
    providers_registered: AtomicBool,
}

impl Playground {
    /// Create the buffers and mount their editors in `page`.
    ///
    /// Fails when one of the three containers is missing from the page.
    pub fn new(page: &Page, options: PlaygroundOptions) -> Result<Self> {
        let query_model = TextModel::new(options.query.as_str(), LanguageId::GraphQL);
        let variables_model = TextModel::new(options.variables.as_str(), LanguageId::Json);
        let results_model = TextModel::new(EMPTY_RESULTS, LanguageId::Json);

        let query_editor = Editor::create(
            page,
            QUERY_CONTAINER,
            query_model.clone(),
            EditorOptions::default(),
        )?;
        let variables_editor = Editor::create(
            page,
            VARIABLES_CONTAINER,
            variables_model.clone(),
            EditorOptions::default(),
        )?;
        let results_editor = Editor::create(
            page,
            RESULTS_CONTAINER,
            results_model.clone(),
            EditorOptions {
                word_wrap: WordWrap::On,
            },
        )?;

        let ctx = ProviderContext {
            schema: SchemaCell::new(),
            languages: Languages::new(),
            markers: MarkerStore::new(),
            query_model,
        };

        for model in [&ctx.query_model, &variables_model] {
            let hook_ctx = ctx.clone();
            model.on_did_change_content(move |model, event| {
                if let Some(result) = on_change_query(model, &hook_ctx) {
                    tracing::debug!(
                        model = %model.id(),
                        version = event.version,
                        valid = result.valid,
                        "diagnosed change"
                    );
                }
            });
        }

        let run = ActionDescriptor::new(RUN_ACTION_ID, RUN_ACTION_LABEL)
            .with_keybinding(KeyMod::CTRL_CMD | KeyCode::Enter);
        query_editor.add_action(run.clone())?;
        variables_editor.add_action(run)?;
        query_editor.add_action(
            ActionDescriptor::new(FORMAT_ACTION_ID, FORMAT_ACTION_LABEL)
                .with_keybinding(KeyMod::SHIFT | KeyMod::ALT | KeyCode::KeyF),
        )?;

        tracing::debug!(config = ?options.config, "playground created");
        Ok(Self {
            ctx,
            variables_model,
            results_model,
            query_editor,
            variables_editor,
            results_editor,
            options,
            config: RwLock::new(None),
            providers_registered: AtomicBool::new(false),
        })
    }

    #[must_use]
    pub fn query_model(&self) -> &TextModel {
        &self.ctx.query_model
    }

    #[must_use]
    pub fn variables_model(&self) -> &TextModel {
        &self.variables_model
    }

    #[must_use]
    pub fn results_model(&self) -> &TextModel {
        &self.results_model
    }

    #[must_use]
    pub fn model(&self, pane: Pane) -> &TextModel {
        match pane {
            Pane::Query => self.query_model(),
            Pane::Variables => self.variables_model(),
            Pane::Results => self.results_model(),
        }
    }

    #[must_use]
    pub fn editor(&self, pane: Pane) -> &Editor {
        match pane {
            Pane::Query => &self.query_editor,
            Pane::Variables => &self.variables_editor,
            Pane::Results => &self.results_editor,
        }
    }

    #[must_use]
    pub fn schema(&self) -> &SchemaCell {
        &self.ctx.schema
    }

    #[must_use]
    pub fn languages(&self) -> &Languages {
        &self.ctx.languages
    }

    #[must_use]
    pub fn markers(&self, pane: Pane) -> Vec<MarkerData> {
        self.ctx
            .markers
            .model_markers(self.model(pane), Some(MARKER_OWNER))
    }

    /// Configuration from the last successful load.
    #[must_use]
    pub fn config(&self) -> Option<GraphQLConfig> {
        self.config.read().clone()
    }

    #[must_use]
    pub fn hover(&self, pane: Pane, position: EditorPosition) -> Vec<Hover> {
        self.ctx.languages.hover(self.model(pane), position)
    }

    #[must_use]
    pub fn completions(&self, pane: Pane, position: EditorPosition) -> Vec<CompletionItem> {
        self.ctx.languages.completions(self.model(pane), position)
    }

    /// Diagnose a pane now, regardless of its length. `None` while no schema
    /// is loaded.
    #[must_use]
    pub fn diagnose(&self, pane: Pane) -> Option<DiagnoseResult> {
        let analysis = self.ctx.schema.analysis()?;
        Some(diagnose_query_value(
            self.model(pane),
            &analysis,
            &self.ctx.markers,
        ))
    }

    /// Load the configuration, introspect the endpoint, and install the
    /// schema.
    ///
    /// Providers are registered on the first success only; later loads just
    /// swap the schema they read. On failure the current schema, if any,
    /// stays in place.
    #[tracing::instrument(skip(self))]
    pub async fn load_schema(&self) -> Result<()> {
        let config = self.load_config()?;
        tracing::debug!(
            doc_explorer_open = config.graphiql().doc_explorer_open,
            "graphiql settings"
        );

        let introspection = client(&config).introspect().await;
        let schema = match introspection.and_then(|response| build_client_schema(&response)) {
            Ok(schema) => schema,
            Err(e) => {
                tracing::error!(error = %e, endpoint = config.endpoint(), "Failed to load schema");
                return Err(e.into());
            }
        };
        tracing::info!(types = schema.types.len(), "Schema loaded");
        self.ctx.schema.set(schema);

        if !self.providers_registered.swap(true, Ordering::SeqCst) {
            register_query_providers(&self.ctx);
            register_variables_providers(&self.ctx);
        }

        if let Some(result) = self.diagnose(Pane::Query) {
            tracing::debug!(valid = result.valid, "initial diagnostics");
        }
        Ok(())
    }

    /// Execute the operation buffer with the variables buffer and write the
    /// response's `data`, or its `errors` when there is no data, to the
    /// results buffer.
    #[tracing::instrument(skip(self))]
    pub async fn run_operation(&self) -> Result<()> {
        let config = self.current_config()?;
        let request = OperationRequest::new(
            self.ctx.query_model.value(),
            parse_variables(&self.variables_model.value()),
        );
        let response = client(&config).execute(&request).await.inspect_err(|e| {
            tracing::error!(error = %e, endpoint = config.endpoint(), "Operation failed");
        })?;
        self.results_model.set_value(render_results(&response));
        Ok(())
    }

    /// Run the action bound to `keybinding` in `pane`. Returns whether one
    /// was bound.
    pub async fn handle_keybinding(&self, pane: Pane, keybinding: Keybinding) -> Result<bool> {
        let Some(action) = self.editor(pane).action_for(keybinding) else {
            tracing::trace!(?pane, ?keybinding, "unbound key");
            return Ok(false);
        };
        tracing::debug!(?pane, action = %action, "running action");
        match action.as_str() {
            RUN_ACTION_ID => self.run_operation().await?,
            FORMAT_ACTION_ID => {
                self.format_query()?;
            }
            _ => tracing::warn!(action = %action, "no handler for action"),
        }
        Ok(true)
    }

    /// Replace the operation buffer with its formatted text. Returns whether
    /// anything was formatted.
    pub fn format_query(&self) -> Result<bool> {
        let edits = self.ctx.languages.format(&self.ctx.query_model);
        if edits.is_empty() {
            return Ok(false);
        }
        let edits: Vec<_> = edits.into_iter().map(|e| (e.range, e.text)).collect();
        self.ctx.query_model.apply_edits(&edits)?;
        Ok(true)
    }

    /// Fit every editor to its container after the page changed size.
    pub fn on_resize(&self) {
        self.query_editor.layout();
        self.variables_editor.layout();
        self.results_editor.layout();
    }

    fn load_config(&self) -> Result<GraphQLConfig> {
        let config = match &self.options.config {
            ConfigSource::Document(document) => {
                load_browser_config(self.options.storage.as_ref(), document)?
            }
            ConfigSource::File(path) => graphql_config::load_config(path).inspect_err(|e| {
                tracing::error!(error = %e, "Failed to load config");
            })?,
        };
        *self.config.write() = Some(config.clone());
        Ok(config)
    }

    fn current_config(&self) -> Result<GraphQLConfig> {
        match self.config() {
            Some(config) => Ok(config),
            None => self.load_config(),
        }
    }
}

fn client(config: &GraphQLConfig) -> GraphQLClient {
    GraphQLClient::new(config.endpoint()).with_headers(config.headers())
}

/// Variables as JSON when they parse, as the raw text otherwise, and null
/// when blank.
fn parse_variables(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Variables are not valid JSON, sending them as a string");
        Value::String(text.to_string())
    })
}

fn render_results(response: &ExecutionResponse) -> String {
    let shown = [&response.data, &response.errors]
        .into_iter()
        .flatten()
        .find(|value| !value.is_null());
    match shown {
        Some(value) => format!("{value:#}"),
        None => Value::Null.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphql_editor::{Dimensions, EditorError};
    use serde_json::json;

    fn page() -> Page {
        Page::with_containers(
            Dimensions {
                width: 800,
                height: 600,
            },
            [QUERY_CONTAINER, VARIABLES_CONTAINER, RESULTS_CONTAINER],
        )
    }

    #[test]
    fn test_new_sets_up_buffers() {
        let playground = Playground::new(&page(), PlaygroundOptions::default()).unwrap();
        assert_eq!(playground.query_model().value(), EXAMPLE_QUERY);
        assert_eq!(playground.variables_model().value(), EXAMPLE_VARIABLES);
        assert_eq!(playground.results_model().value(), "{}");
        assert_eq!(playground.query_model().language(), LanguageId::GraphQL);
        assert_eq!(playground.variables_model().language(), LanguageId::Json);
        assert_eq!(
            playground.editor(Pane::Results).options().word_wrap,
            WordWrap::On
        );
        assert_eq!(
            playground.editor(Pane::Query).options().word_wrap,
            WordWrap::Off
        );
        assert!(!playground.schema().is_loaded());
    }

    #[test]
    fn test_missing_container_fails() {
        let page = Page::with_containers(Dimensions::default(), [QUERY_CONTAINER]);
        let error = Playground::new(&page, PlaygroundOptions::default()).unwrap_err();
        assert!(matches!(
            error,
            crate::PlaygroundError::Editor(EditorError::ContainerNotFound(id)) if id == VARIABLES_CONTAINER
        ));
    }

    #[test]
    fn test_run_action_is_bound_on_query_and_variables() {
        let playground = Playground::new(&page(), PlaygroundOptions::default()).unwrap();
        let run = KeyMod::CTRL_CMD | KeyCode::Enter;
        let action = |pane| playground.editor(pane).action_for(run);
        assert_eq!(action(Pane::Query).as_deref(), Some(RUN_ACTION_ID));
        assert_eq!(action(Pane::Variables).as_deref(), Some(RUN_ACTION_ID));
        assert_eq!(action(Pane::Results), None);

        let labels: Vec<String> = playground
            .editor(Pane::Query)
            .actions()
            .into_iter()
            .map(|a| a.label)
            .collect();
        assert!(labels.contains(&RUN_ACTION_LABEL.to_string()));
    }

    #[test]
    fn test_on_resize_lays_out_every_editor() {
        let page = page();
        let playground = Playground::new(&page, PlaygroundOptions::default()).unwrap();
        page.resize(Dimensions {
            width: 1920,
            height: 1080,
        });
        playground.on_resize();
        for pane in [Pane::Query, Pane::Variables, Pane::Results] {
            let editor = playground.editor(pane);
            assert_eq!(editor.layout_count(), 1);
            assert_eq!(editor.dimensions().width, 1920);
        }
    }

    #[test]
    fn test_edits_before_schema_load_are_not_diagnosed() {
        let playground = Playground::new(&page(), PlaygroundOptions::default()).unwrap();
        playground.query_model().set_value("{ nope }");
        assert!(playground.markers(Pane::Query).is_empty());
        assert!(playground.diagnose(Pane::Query).is_none());
    }

    #[test]
    fn test_parse_variables() {
        assert_eq!(parse_variables(""), Value::Null);
        assert_eq!(parse_variables(" \n"), Value::Null);
        assert_eq!(parse_variables("{\"a\": 1}"), json!({"a": 1}));
        assert_eq!(parse_variables("{\"a\": "), json!("{\"a\": "));
    }

    #[test]
    fn test_render_results_prefers_data() {
        let response = ExecutionResponse {
            data: Some(json!({"foo": 1})),
            errors: Some(json!([{"message": "partial"}])),
        };
        assert_eq!(render_results(&response), "{\n  \"foo\": 1\n}");
    }

    #[test]
    fn test_render_results_falls_back_to_errors() {
        let response = ExecutionResponse {
            data: Some(Value::Null),
            errors: Some(json!([{"message": "boom"}])),
        };
        assert_eq!(
            render_results(&response),
            "[\n  {\n    \"message\": \"boom\"\n  }\n]"
        );
    }

    #[test]
    fn test_render_results_empty_response() {
        let response = ExecutionResponse {
            data: None,
            errors: None,
        };
        assert_eq!(render_results(&response), "null");
    }
}
