use thiserror::Error;

pub type Result<T> = std::result::Result<T, EditorError>;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("No element with id `{0}` to host an editor")]
    ContainerNotFound(String),

    #[error("Action `{action}` is already registered on editor {editor}")]
    DuplicateAction { editor: String, action: String },

    #[error("Edit range {range:?} is outside model {model}")]
    InvalidEdit {
        model: String,
        range: graphql_types::EditorRange,
    },
}
