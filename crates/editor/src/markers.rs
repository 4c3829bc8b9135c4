//! Markers: squiggles attached to a model, grouped by owner.

use std::collections::HashMap;
use std::sync::Arc;

use graphql_types::{DiagnosticSeverity, EditorRange};
use parking_lot::RwLock;

use crate::model::{ModelId, TextModel};

/// Marker severities, with the widget's numeric values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MarkerSeverity {
    Hint = 1,
    Info = 2,
    Warning = 4,
    Error = 8,
}

impl From<DiagnosticSeverity> for MarkerSeverity {
    fn from(severity: DiagnosticSeverity) -> Self {
        match severity {
            DiagnosticSeverity::Error => Self::Error,
            DiagnosticSeverity::Warning => Self::Warning,
            DiagnosticSeverity::Information => Self::Info,
            DiagnosticSeverity::Hint => Self::Hint,
        }
    }
}

/// One marker. Lines and columns are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerData {
    pub start_line_number: u32,
    pub start_column: u32,
    pub end_line_number: u32,
    pub end_column: u32,
    pub message: String,
    pub severity: MarkerSeverity,
    /// Producer of the finding, e.g. `graphql`.
    pub source: Option<String>,
}

impl MarkerData {
    #[must_use]
    pub fn new(range: EditorRange, message: impl Into<String>, severity: MarkerSeverity) -> Self {
        Self {
            start_line_number: range.start_line_number,
            start_column: range.start_column,
            end_line_number: range.end_line_number,
            end_column: range.end_column,
            message: message.into(),
            severity,
            source: None,
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    #[must_use]
    pub const fn range(&self) -> EditorRange {
        EditorRange::new(
            self.start_line_number,
            self.start_column,
            self.end_line_number,
            self.end_column,
        )
    }
}

#[derive(Clone, Default, Debug)]
pub struct MarkerStore {
    markers: Arc<RwLock<HashMap<(ModelId, String), Vec<MarkerData>>>>,
}

impl MarkerStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every marker `owner` has on `model`. An empty list clears them.
    pub fn set_model_markers(&self, model: &TextModel, owner: &str, markers: Vec<MarkerData>) {
        tracing::debug!(model = %model.id(), owner, count = markers.len(), "setting markers");
        let key = (model.id(), owner.to_string());
        let mut store = self.markers.write();
        if markers.is_empty() {
            store.remove(&key);
        } else {
            store.insert(key, markers);
        }
    }

    /// Markers on `model`, from one owner or from all of them.
    #[must_use]
    pub fn model_markers(&self, model: &TextModel, owner: Option<&str>) -> Vec<MarkerData> {
        let store = self.markers.read();
        let mut entries: Vec<(&String, &Vec<MarkerData>)> = store
            .iter()
            .filter(|((id, key_owner), _)| {
                *id == model.id() && owner.is_none_or(|owner| owner == key_owner)
            })
            .map(|((_, key_owner), markers)| (key_owner, markers))
            .collect();
        entries.sort_by_key(|(key_owner, _)| *key_owner);
        entries
            .into_iter()
            .flat_map(|(_, markers)| markers.iter().cloned())
            .collect()
    }
}
