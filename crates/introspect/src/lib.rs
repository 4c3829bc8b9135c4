//! Talking to a GraphQL endpoint.
//!
//! This crate owns everything the playground sends over the wire:
//!
//! - the standard introspection query and its typed response
//! - conversion of an introspection result to SDL and to a validated
//!   [`apollo_compiler::Schema`]
//! - execution of user operations
//!
//! # Example
//!
//! ```no_run
//! use graphql_introspect::GraphQLClient;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GraphQLClient::new("https://api.example.com/graphql");
//! let introspection = client.introspect().await?;
//! let schema = graphql_introspect::build_client_schema(&introspection)?;
//! println!("{} types", schema.types.len());
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod query;
mod schema;
mod sdl;
mod types;

pub use client::{ExecutionResponse, GraphQLClient, OperationRequest};
pub use error::{IntrospectionError, Result};
pub use query::INTROSPECTION_QUERY;
pub use schema::build_client_schema;
pub use sdl::introspection_to_sdl;
pub use types::{
    IntrospectionData, IntrospectionDirective, IntrospectionEnumValue, IntrospectionField,
    IntrospectionInputValue, IntrospectionResponse, IntrospectionSchema, IntrospectionType,
    NamedTypeRef, TypeKind, TypeRef,
};
