//! GraphQL playground.
//!
//! Wires the headless editor model ([`graphql_editor`]) to the language
//! service ([`graphql_ide`]) and to a GraphQL endpoint
//! ([`graphql_introspect`]).
//!
//! ## Architecture
//!
//! ```text
//! Playground (app) ── owns ──> query / variables / results buffers + editors
//!     │                               │
//!     │ load_schema                   │ content changes, hover, completion, format
//!     ▼                               ▼
//! SchemaCell <──── reads at call time ──── adapter providers and diagnostics hook
//! ```
//!
//! The schema is fetched once via introspection and stored in a
//! [`SchemaCell`]. Providers are registered after the first successful load
//! and read the cell on every call.

pub mod adapter;
mod app;
mod conversions;
pub mod defaults;
mod error;
mod schema_cell;

pub use adapter::{DiagnoseResult, ProviderContext, MARKER_OWNER};
pub use app::{ConfigSource, Pane, Playground, PlaygroundOptions};
pub use conversions::IntoEditor;
pub use error::{PlaygroundError, Result};
pub use schema_cell::SchemaCell;
