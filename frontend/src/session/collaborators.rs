//! Backend services the session depends on.
//!
//! The browser build implements both traits over HTTP (`crate::api`); tests
//! substitute in-memory doubles. Futures are not required to be `Send`: the
//! application runs on the single browser thread.

use common::model::document::{Document, DocumentId};

use super::errors::ClientError;

/// Persistence of documents on the server.
#[allow(async_fn_in_trait)]
pub trait DocumentRepository {
    async fn fetch_by_id(&self, id: DocumentId) -> Result<Document, ClientError>;

    /// Creates a document; the returned snapshot carries the server-assigned id.
    async fn create(&self, title: &str, body: &str) -> Result<Document, ClientError>;

    async fn update(&self, id: DocumentId, title: &str, body: &str)
    -> Result<Document, ClientError>;

    async fn delete(&self, id: DocumentId) -> Result<(), ClientError>;
}

/// Content produced by the generation service, ready for the editing surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDraft {
    pub title: String,
    pub markup: String,
}

/// AI-backed drafting from a topic prompt.
#[allow(async_fn_in_trait)]
pub trait GenerationService {
    async fn generate(&self, topic: &str) -> Result<GeneratedDraft, ClientError>;
}

/// Yes/no gate shown before destructive operations.
pub trait ConfirmationGate {
    fn confirm(&self, question: &str) -> bool;
}

impl<F: Fn(&str) -> bool> ConfirmationGate for F {
    fn confirm(&self, question: &str) -> bool {
        self(question)
    }
}
