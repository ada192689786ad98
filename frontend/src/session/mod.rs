//! Document editing and synchronization core.
//!
//! Independent of yew and the DOM: the editor component drives a
//! [`DocumentSession`] with user events and backend outcomes, and the session
//! decides what is persisted, what the surface shows and which calls to make.

mod collaborators;
mod controller;
mod effects;
mod errors;
mod metrics;
mod surface;

pub use collaborators::{ConfirmationGate, DocumentRepository, GeneratedDraft, GenerationService};
pub use controller::{DocumentSession, EditorMode, SessionEvent, SessionState, DELETE_QUESTION};
pub use effects::{perform, Command, Outcome};
pub use errors::{ClientError, SessionError};
pub use metrics::{derive_metrics, plain_text, DocumentMetrics};
pub use surface::EditableSurface;
