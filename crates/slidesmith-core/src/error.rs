use thiserror::Error;

/// Failure taxonomy for every deck operation.
///
/// Tools surface these as human-readable strings, but callers inside the
/// workspace branch on the variant instead of parsing text.
#[derive(Debug, Error)]
pub enum DeckError {
    #[error("Presentation '{0}' not found")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Google API failure: {0}")]
    Remote(String),
    #[error("Credential error: {0}")]
    Auth(String),
    #[error("Chart rendering failed: {0}")]
    Render(String),
}

impl DeckError {
    pub fn invalid(message: impl Into<String>) -> Self {
        DeckError::InvalidInput(message.into())
    }

    pub fn remote(message: impl Into<String>) -> Self {
        DeckError::Remote(message.into())
    }
}
