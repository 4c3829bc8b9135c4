use graphql_config::ConfigError;
use graphql_editor::EditorError;
use graphql_introspect::IntrospectionError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlaygroundError>;

#[derive(Debug, Error)]
pub enum PlaygroundError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Introspection(#[from] IntrospectionError),

    #[error(transparent)]
    Editor(#[from] EditorError),
}
