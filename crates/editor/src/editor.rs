//! Editor instances: a model shown in a container, plus actions.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::{EditorError, Result};
use crate::keybinding::Keybinding;
use crate::model::TextModel;
use crate::page::{Container, Dimensions, Page};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WordWrap {
    #[default]
    Off,
    On,
}

#[derive(Debug, Clone, Default)]
pub struct EditorOptions {
    pub word_wrap: WordWrap,
}

/// An action editors expose through keybindings. Running it is up to the
/// owner of the editor, which dispatches on `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionDescriptor {
    pub id: String,
    pub label: String,
    pub keybindings: Vec<Keybinding>,
}

impl ActionDescriptor {
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            keybindings: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_keybinding(mut self, keybinding: Keybinding) -> Self {
        self.keybindings.push(keybinding);
        self
    }
}

#[derive(Debug)]
struct EditorState {
    actions: Vec<ActionDescriptor>,
    dimensions: Dimensions,
}

#[derive(Debug, Clone)]
pub struct Editor {
    container: Container,
    model: TextModel,
    options: EditorOptions,
    state: Arc<RwLock<EditorState>>,
    layouts: Arc<AtomicUsize>,
}

impl Editor {
    /// Mount an editor for `model` in the element `container_id`.
    pub fn create(
        page: &Page,
        container_id: &str,
        model: TextModel,
        options: EditorOptions,
    ) -> Result<Self> {
        let container = page
            .get_element_by_id(container_id)
            .cloned()
            .ok_or_else(|| EditorError::ContainerNotFound(container_id.to_string()))?;
        tracing::debug!(container = container_id, model = %model.id(), "created editor");
        Ok(Self {
            state: Arc::new(RwLock::new(EditorState {
                actions: Vec::new(),
                dimensions: container.dimensions(),
            })),
            container,
            model,
            options,
            layouts: Arc::new(AtomicUsize::new(0)),
        })
    }

    #[must_use]
    pub fn id(&self) -> &str {
        self.container.id()
    }

    #[must_use]
    pub fn model(&self) -> &TextModel {
        &self.model
    }

    #[must_use]
    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn add_action(&self, action: ActionDescriptor) -> Result<()> {
        let mut state = self.state.write();
        if state.actions.iter().any(|a| a.id == action.id) {
            return Err(EditorError::DuplicateAction {
                editor: self.id().to_string(),
                action: action.id,
            });
        }
        tracing::debug!(editor = self.id(), action = %action.id, "added action");
        state.actions.push(action);
        Ok(())
    }

    #[must_use]
    pub fn actions(&self) -> Vec<ActionDescriptor> {
        self.state.read().actions.clone()
    }

    /// Id of the action bound to `keybinding` on this editor.
    #[must_use]
    pub fn action_for(&self, keybinding: Keybinding) -> Option<String> {
        self.state
            .read()
            .actions
            .iter()
            .find(|a| a.keybindings.contains(&keybinding))
            .map(|a| a.id.clone())
    }

    /// Fit the editor to its container's current size.
    pub fn layout(&self) {
        let dimensions = self.container.dimensions();
        self.state.write().dimensions = dimensions;
        self.layouts.fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.state.read().dimensions
    }

    /// Number of explicit layouts since creation.
    #[must_use]
    pub fn layout_count(&self) -> usize {
        self.layouts.load(Ordering::Relaxed)
    }
}
