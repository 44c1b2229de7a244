use thiserror::Error;

/// Errors from session store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Session {0} not found")]
    NotFound(String),
}

/// A failure from the model backend, whatever its cause.
///
/// Carries the description of the original failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Error communicating with model: {0}")]
pub struct UpstreamError(pub String);

/// Errors surfaced by the chat flow.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("{0}")]
    Validation(String),
}

/// Errors while assembling gateway configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unsupported model provider '{0}'")]
    UnsupportedProvider(String),

    #[error("model identifier must not be empty")]
    EmptyModel,
}
