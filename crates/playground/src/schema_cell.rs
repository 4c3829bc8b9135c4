//! The schema every provider and the diagnostics hook read.

use std::sync::Arc;

use apollo_compiler::validation::Valid;
use apollo_compiler::Schema;
use graphql_ide::Analysis;
use parking_lot::RwLock;

/// Shared slot for the active schema.
///
/// Clones share the slot. Readers take a snapshot of whatever schema is
/// current when they ask; a reload replaces it wholesale.
#[derive(Debug, Clone, Default)]
pub struct SchemaCell {
    schema: Arc<RwLock<Option<Arc<Valid<Schema>>>>>,
}

impl SchemaCell {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, schema: Valid<Schema>) {
        *self.schema.write() = Some(Arc::new(schema));
    }

    pub fn clear(&self) {
        *self.schema.write() = None;
    }

    #[must_use]
    pub fn get(&self) -> Option<Arc<Valid<Schema>>> {
        self.schema.read().clone()
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.schema.read().is_some()
    }

    /// Analysis snapshot over the current schema.
    #[must_use]
    pub fn analysis(&self) -> Option<Analysis> {
        self.get().map(Analysis::new)
    }
}
