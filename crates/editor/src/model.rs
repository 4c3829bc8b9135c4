//! Text models: the buffers editors display.
//!
//! A [`TextModel`] is a cheap, clonable handle. Every clone sees the same
//! text, and content-change listeners fire synchronously, in registration
//! order, after each change.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use graphql_types::{EditorRange, LanguageId, LineIndex, TextEdit};
use parking_lot::RwLock;

use crate::error::{EditorError, Result};

static NEXT_MODEL_ID: AtomicU32 = AtomicU32::new(1);

/// Identity of a model, stable for its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModelId(u32);

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "inmemory://model/{}", self.0)
    }
}

/// Delivered to content-change listeners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentChangedEvent {
    /// Version after the change.
    pub version: u32,
    /// Whether the whole buffer was replaced rather than edited.
    pub is_flush: bool,
}

type Listener = Arc<dyn Fn(&TextModel, &ContentChangedEvent) + Send + Sync>;

struct ModelState {
    value: String,
    version: u32,
}

struct ModelInner {
    id: ModelId,
    language: LanguageId,
    state: RwLock<ModelState>,
    listeners: RwLock<Vec<Listener>>,
}

#[derive(Clone)]
pub struct TextModel {
    inner: Arc<ModelInner>,
}

impl fmt::Debug for TextModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextModel")
            .field("id", &self.inner.id)
            .field("language", &self.inner.language)
            .field("version", &self.version())
            .finish_non_exhaustive()
    }
}

impl TextModel {
    #[must_use]
    pub fn new(value: impl Into<String>, language: LanguageId) -> Self {
        let id = ModelId(NEXT_MODEL_ID.fetch_add(1, Ordering::Relaxed));
        tracing::trace!(%id, %language, "created model");
        Self {
            inner: Arc::new(ModelInner {
                id,
                language,
                state: RwLock::new(ModelState {
                    value: value.into(),
                    version: 1,
                }),
                listeners: RwLock::new(Vec::new()),
            }),
        }
    }

    #[must_use]
    pub fn id(&self) -> ModelId {
        self.inner.id
    }

    #[must_use]
    pub fn language(&self) -> LanguageId {
        self.inner.language
    }

    #[must_use]
    pub fn value(&self) -> String {
        self.inner.state.read().value.clone()
    }

    #[must_use]
    pub fn version(&self) -> u32 {
        self.inner.state.read().version
    }

    /// Range covering the whole buffer.
    #[must_use]
    pub fn full_range(&self) -> EditorRange {
        let state = self.inner.state.read();
        EditorRange::from_service(LineIndex::new(&state.value).full_range())
    }

    /// Replace the whole buffer.
    pub fn set_value(&self, value: impl Into<String>) {
        let version = {
            let mut state = self.inner.state.write();
            state.value = value.into();
            state.version += 1;
            state.version
        };
        self.emit(&ContentChangedEvent {
            version,
            is_flush: true,
        });
    }

    /// Apply edits as one change. Ranges refer to the text before any of
    /// them is applied and must not overlap.
    pub fn apply_edits(&self, edits: &[(EditorRange, String)]) -> Result<()> {
        if edits.is_empty() {
            return Ok(());
        }
        let version = {
            let mut state = self.inner.state.write();
            let mut ordered: Vec<&(EditorRange, String)> = edits.iter().collect();
            ordered.sort_by_key(|(range, _)| {
                std::cmp::Reverse((range.start_line_number, range.start_column))
            });

            let mut value = state.value.clone();
            for (range, text) in ordered {
                let edit = TextEdit::new(range.to_service(), text.as_str());
                value = edit.apply(&value).ok_or_else(|| EditorError::InvalidEdit {
                    model: self.inner.id.to_string(),
                    range: *range,
                })?;
            }
            state.value = value;
            state.version += 1;
            state.version
        };
        self.emit(&ContentChangedEvent {
            version,
            is_flush: false,
        });
        Ok(())
    }

    /// Register a listener called after every content change.
    pub fn on_did_change_content(
        &self,
        listener: impl Fn(&Self, &ContentChangedEvent) + Send + Sync + 'static,
    ) {
        self.inner.listeners.write().push(Arc::new(listener));
    }

    fn emit(&self, event: &ContentChangedEvent) {
        // Listeners may read or write this model, so no lock is held while they run.
        let listeners: Vec<Listener> = self.inner.listeners.read().clone();
        tracing::trace!(id = %self.inner.id, version = event.version, listeners = listeners.len(), "content changed");
        for listener in listeners {
            listener(self, event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_ids_are_unique() {
        let a = TextModel::new("", LanguageId::GraphQL);
        let b = TextModel::new("", LanguageId::Json);
        assert_ne!(a.id(), b.id());
        assert_eq!(a.clone().id(), a.id());
    }

    #[test]
    fn test_set_value_bumps_version_and_notifies_in_order() {
        let model = TextModel::new("{}", LanguageId::Json);
        let seen = Arc::new(Mutex::new(Vec::new()));
        for tag in ["first", "second"] {
            let seen = Arc::clone(&seen);
            model.on_did_change_content(move |model, event| {
                seen.lock().unwrap().push((tag, model.value(), event.version));
            });
        }

        model.set_value("{ \"a\": 1 }");

        assert_eq!(model.version(), 2);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                ("first", "{ \"a\": 1 }".to_string(), 2),
                ("second", "{ \"a\": 1 }".to_string(), 2),
            ]
        );
    }

    #[test]
    fn test_listener_may_read_model() {
        let model = TextModel::new("a", LanguageId::GraphQL);
        let lengths = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&lengths);
        model.on_did_change_content(move |model, _| sink.lock().unwrap().push(model.value().len()));
        model.set_value("abc");
        assert_eq!(*lengths.lock().unwrap(), vec![3]);
    }

    #[test]
    fn test_full_range() {
        let model = TextModel::new("query {\n  a\n}", LanguageId::GraphQL);
        assert_eq!(model.full_range(), EditorRange::new(1, 1, 3, 2));
    }

    #[test]
    fn test_apply_full_range_edit() {
        let model = TextModel::new("{a}", LanguageId::GraphQL);
        model
            .apply_edits(&[(model.full_range(), "{\n  a\n}\n".to_string())])
            .unwrap();
        assert_eq!(model.value(), "{\n  a\n}\n");
        assert_eq!(model.version(), 2);
    }

    #[test]
    fn test_apply_edits_in_reverse_order() {
        let model = TextModel::new("one two", LanguageId::GraphQL);
        model
            .apply_edits(&[
                (EditorRange::new(1, 1, 1, 4), "1".to_string()),
                (EditorRange::new(1, 5, 1, 8), "2".to_string()),
            ])
            .unwrap();
        assert_eq!(model.value(), "1 2");
    }
}
