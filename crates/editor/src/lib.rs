//! Headless model of the code-editor widget the playground drives.
//!
//! Nothing here renders. The crate keeps the state an editor widget would
//! keep and exposes the same extension points:
//!
//! - [`TextModel`]: buffers with versions and content-change listeners
//! - [`Languages`]: hover, completion and formatting providers per language
//! - [`MarkerStore`]: diagnostics markers per model and owner
//! - [`Editor`]: a model mounted in a [`Page`] container, with actions and
//!   keybindings, laid out on demand

mod editor;
mod error;
mod keybinding;
mod languages;
mod markers;
mod model;
mod page;

pub use editor::{ActionDescriptor, Editor, EditorOptions, WordWrap};
pub use error::{EditorError, Result};
pub use keybinding::{KeyCode, KeyMod, Keybinding};
pub use languages::{
    CompletionItem, CompletionItemKind, CompletionItemProvider, CompletionList,
    DocumentFormattingEditProvider, EditorTextEdit, Hover, HoverProvider, Languages,
    MarkdownString, ProviderCounts,
};
pub use markers::{MarkerData, MarkerSeverity, MarkerStore};
pub use model::{ContentChangedEvent, ModelId, TextModel};
pub use page::{Container, Dimensions, Page};
