//! Network calls requested by the session and their results.
//!
//! The session never awaits anything itself. Each transition into a busy
//! state hands back a [`Command`]; the caller runs it with [`perform`] and
//! feeds the [`Outcome`] to `DocumentSession::complete` whenever it arrives.

use common::model::document::{Document, DocumentId};

use super::collaborators::{DocumentRepository, GeneratedDraft, GenerationService};
use super::errors::ClientError;

/// A single backend call the session is waiting on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Fetch(DocumentId),
    Create {
        title: String,
        body: String,
    },
    Update {
        id: DocumentId,
        title: String,
        body: String,
    },
    Delete(DocumentId),
    Generate {
        topic: String,
    },
}

/// Result of a [`Command`], tagged with the call that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Fetched(Result<Document, ClientError>),
    Created(Result<Document, ClientError>),
    Updated(Result<Document, ClientError>),
    Deleted(Result<(), ClientError>),
    Generated(Result<GeneratedDraft, ClientError>),
}

impl Outcome {
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Fetched(_) => "fetch",
            Outcome::Created(_) => "create",
            Outcome::Updated(_) => "update",
            Outcome::Deleted(_) => "delete",
            Outcome::Generated(_) => "generate",
        }
    }
}

/// Executes `command` against the collaborators.
pub async fn perform<R, G>(command: Command, repository: &R, generator: &G) -> Outcome
where
    R: DocumentRepository,
    G: GenerationService,
{
    match command {
        Command::Fetch(id) => Outcome::Fetched(repository.fetch_by_id(id).await),
        Command::Create { title, body } => Outcome::Created(repository.create(&title, &body).await),
        Command::Update { id, title, body } => {
            Outcome::Updated(repository.update(id, &title, &body).await)
        }
        Command::Delete(id) => Outcome::Deleted(repository.delete(id).await),
        Command::Generate { topic } => Outcome::Generated(generator.generate(&topic).await),
    }
}
