use thiserror::Error;

use super::controller::SessionState;

/// Classified failure of a backend call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("not found")]
    NotFound,
    #[error("not authorized")]
    Unauthorized,
    #[error("too many requests, try again in a minute")]
    RateLimited,
    #[error("network error: {0}")]
    Network(String),
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },
}

impl ClientError {
    /// Maps a non-success HTTP status onto the error taxonomy.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        match status {
            401 | 403 => ClientError::Unauthorized,
            404 => ClientError::NotFound,
            429 => ClientError::RateLimited,
            _ => ClientError::Server {
                status,
                message: message.into(),
            },
        }
    }
}

/// Failure surfaced by the document session, one per attempted operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Failed to load document: {0}")]
    Load(ClientError),
    #[error("Error creating content: {0}")]
    Create(ClientError),
    #[error("Error updating content: {0}")]
    Update(ClientError),
    #[error("Failed to delete document: {0}")]
    Delete(ClientError),
    #[error("Generation failed: {0}")]
    Generation(ClientError),
    #[error("{0}")]
    Validation(String),
    #[error("Please wait, the document is {0}")]
    Rejected(SessionState),
    #[error("Only saved documents can be deleted")]
    NotPersisted,
}

impl SessionError {
    /// The backend error behind this failure, if it came from the network.
    pub fn client_error(&self) -> Option<&ClientError> {
        match self {
            SessionError::Load(e)
            | SessionError::Create(e)
            | SessionError::Update(e)
            | SessionError::Delete(e)
            | SessionError::Generation(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.client_error(), Some(ClientError::Unauthorized))
    }
}
