//! Configuration for the GraphQL playground.
//!
//! The playground's configuration is a small YAML document naming the schema
//! endpoint plus tool-specific extension settings:
//!
//! ```yaml
//! schema: "https://swapi-graphql.netlify.com/.netlify/functions/index"
//! extensions:
//!   graphiql:
//!     docExplorerOpen: false
//! ```
//!
//! [`load_browser_config`] persists such a document to a [`Storage`] backend
//! before reading it back and parsing it, the way a browser build writes into
//! its virtualised file system first.

mod config;
mod error;
mod loader;
mod storage;

pub use config::{GraphQLConfig, GraphiqlExtension, IntrospectionSchemaConfig, SchemaConfig};
pub use error::{ConfigError, Result};
pub use loader::{
    default_config_document, load_browser_config, load_config, load_config_from_str,
    CONFIG_PATH, DEFAULT_ENDPOINT, REGISTERED_EXTENSIONS,
};
pub use storage::{FsStorage, MemoryStorage, Storage};
