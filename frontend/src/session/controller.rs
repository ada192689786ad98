//! Document session state machine.
//!
//! One [`DocumentSession`] exists per open editor. It owns the document being
//! edited, keeps metrics in sync with the editing surface and arbitrates the
//! save, delete and generate transitions:
//!
//! ```text
//! Idle ──enter(Edit)──▶ Loading ──fetched──▶ Ready ◀──────────────┐
//!   └───enter(New)──────────────────────────▶ Ready ──save──▶ Saving ┘
//!                                             Ready ──generate──▶ Generating ──▶ Ready
//!                                             Ready ──delete──▶ Deleting ──▶ Closed
//! ```
//!
//! Only `Ready` accepts a new operation; anything requested while a call is
//! in flight is rejected, not queued. Once `Closed`, late outcomes are dropped.

use std::fmt;

use common::model::document::{Document, DocumentId};
use log::{debug, warn};

use super::collaborators::ConfirmationGate;
use super::effects::{Command, Outcome};
use super::errors::{ClientError, SessionError};
use super::metrics::{derive_metrics, DocumentMetrics};
use super::surface::{EditableSurface, SurfaceBinding};

pub const EMPTY_DOCUMENT_MESSAGE: &str = "Title or content cannot be empty!";
pub const EMPTY_TOPIC_MESSAGE: &str = "Please enter a topic to write about.";
pub const STORED_MISMATCH_MESSAGE: &str = "the server kept different content";
pub const DELETE_QUESTION: &str = "Are you sure you want to delete this document?";

/// How the editor was opened: a blank draft or an existing document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    New,
    Edit(DocumentId),
}

impl EditorMode {
    pub fn from_id(id: Option<DocumentId>) -> Self {
        id.map_or(EditorMode::New, EditorMode::Edit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Loading,
    Ready,
    Saving,
    Generating,
    Deleting,
    Closed,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SessionState::Idle => "idle",
            SessionState::Loading => "loading",
            SessionState::Ready => "ready",
            SessionState::Saving => "saving",
            SessionState::Generating => "generating",
            SessionState::Deleting => "deleting",
            SessionState::Closed => "closed",
        };
        f.write_str(label)
    }
}

/// What a completed call changed, for the presentation layer to react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Loaded,
    Created(DocumentId),
    Updated,
    Generated,
    /// The document is gone; the editor should return to the listing.
    Deleted,
    Failed(SessionError),
}

impl SessionEvent {
    /// Whether any cached document listing is now out of date.
    pub fn invalidates_listing(&self) -> bool {
        matches!(
            self,
            SessionEvent::Created(_) | SessionEvent::Updated | SessionEvent::Deleted
        )
    }
}

struct Snapshot {
    title: String,
    body: String,
}

pub struct DocumentSession<S> {
    state: SessionState,
    document: Document,
    metrics: DocumentMetrics,
    surface: SurfaceBinding<S>,
    in_flight: Option<Snapshot>,
    saved_fingerprint: Option<String>,
}

impl<S: EditableSurface> Default for DocumentSession<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EditableSurface> DocumentSession<S> {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            document: Document::draft(),
            metrics: DocumentMetrics::default(),
            surface: SurfaceBinding::default(),
            in_flight: None,
            saved_fingerprint: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn metrics(&self) -> DocumentMetrics {
        self.metrics
    }

    pub fn is_ready(&self) -> bool {
        self.state == SessionState::Ready
    }

    pub fn is_closed(&self) -> bool {
        self.state == SessionState::Closed
    }

    pub fn surface_ready(&self) -> bool {
        self.surface.is_ready()
    }

    /// Whether title or body differ from what the server last acknowledged.
    ///
    /// A draft that was never saved is dirty as soon as it has any content.
    pub fn is_dirty(&self) -> bool {
        match &self.saved_fingerprint {
            Some(saved) => *saved != fingerprint(&self.document.title, &self.document.body),
            None => !(self.document.title.is_empty() && self.document.body.is_empty()),
        }
    }

    /// Starts the session. `Edit` asks for the document to be fetched.
    pub fn enter(&mut self, mode: EditorMode) -> Result<Option<Command>, SessionError> {
        if self.state != SessionState::Idle {
            return Err(SessionError::Rejected(self.state));
        }
        match mode {
            EditorMode::New => {
                self.document = Document::draft();
                self.metrics = DocumentMetrics::default();
                self.saved_fingerprint = None;
                self.transition(SessionState::Ready);
                Ok(None)
            }
            EditorMode::Edit(id) => {
                self.transition(SessionState::Loading);
                Ok(Some(Command::Fetch(id)))
            }
        }
    }

    /// The surface is mounted; any body loaded before now is applied to it.
    pub fn on_editor_ready(&mut self, handle: S) {
        if self.is_closed() {
            return;
        }
        self.surface.attach(handle);
    }

    /// The surface went away. The current body is kept for the next mount.
    pub fn on_editor_disposed(&mut self) {
        if self.surface.detach().is_some() && !self.is_closed() {
            self.surface.buffer(&self.document.body);
        }
    }

    /// User edit on the surface. Synchronous and free of I/O.
    pub fn on_content_changed(&mut self, markup: &str) {
        if self.is_closed() {
            return;
        }
        self.document.body = markup.to_owned();
        self.metrics = derive_metrics(markup);
    }

    pub fn on_title_changed(&mut self, title: &str) {
        if self.is_closed() {
            return;
        }
        self.document.title = title.to_owned();
    }

    /// Persists the document: create for a draft, update otherwise.
    pub fn save(&mut self) -> Result<Command, SessionError> {
        self.ensure_ready()?;
        if let Some(markup) = self.surface.read() {
            self.on_content_changed(&markup);
        }

        let title = self.document.title.clone();
        let body = self.document.body.clone();
        if title.trim().is_empty() && body.trim().is_empty() {
            return Err(SessionError::Validation(EMPTY_DOCUMENT_MESSAGE.to_string()));
        }

        self.in_flight = Some(Snapshot {
            title: title.clone(),
            body: body.clone(),
        });
        self.transition(SessionState::Saving);
        Ok(match self.document.id {
            None => Command::Create { title, body },
            Some(id) => Command::Update { id, title, body },
        })
    }

    /// Deletes a persisted document once `gate` confirms.
    ///
    /// Declining the confirmation is not an error and returns `Ok(None)`.
    pub fn delete(&mut self, gate: &impl ConfirmationGate) -> Result<Option<Command>, SessionError> {
        self.ensure_ready()?;
        let id = self.document.id.ok_or(SessionError::NotPersisted)?;
        if !gate.confirm(DELETE_QUESTION) {
            return Ok(None);
        }
        self.transition(SessionState::Deleting);
        Ok(Some(Command::Delete(id)))
    }

    /// Asks the generation service for a draft about `topic`.
    pub fn generate(&mut self, topic: &str) -> Result<Command, SessionError> {
        self.ensure_ready()?;
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(SessionError::Validation(EMPTY_TOPIC_MESSAGE.to_string()));
        }
        self.transition(SessionState::Generating);
        Ok(Command::Generate {
            topic: topic.to_string(),
        })
    }

    /// Disposes the session. Outcomes arriving later are ignored.
    pub fn close(&mut self) {
        self.transition(SessionState::Closed);
        self.surface.detach();
        self.in_flight = None;
    }

    /// Applies the result of the call started by the last transition.
    pub fn complete(&mut self, outcome: Outcome) -> Option<SessionEvent> {
        let label = outcome.label();
        let event = match (self.state, outcome) {
            (SessionState::Loading, Outcome::Fetched(Ok(document))) => {
                self.saved_fingerprint = Some(fingerprint(&document.title, &document.body));
                self.hydrate(document);
                self.transition(SessionState::Ready);
                SessionEvent::Loaded
            }
            (SessionState::Loading, Outcome::Fetched(Err(e))) => {
                self.close();
                SessionEvent::Failed(SessionError::Load(e))
            }
            (SessionState::Saving, Outcome::Created(Ok(created))) => match created.id {
                Some(id) => {
                    self.document.id = Some(id);
                    self.document.created_at = created.created_at;
                    self.acknowledge_save();
                    SessionEvent::Created(id)
                }
                None => {
                    self.abort_save();
                    SessionEvent::Failed(SessionError::Create(ClientError::Server {
                        status: 200,
                        message: "response carried no content id".to_string(),
                    }))
                }
            },
            (SessionState::Saving, Outcome::Created(Err(e))) => {
                self.abort_save();
                SessionEvent::Failed(SessionError::Create(e))
            }
            (SessionState::Saving, Outcome::Updated(Ok(updated))) => {
                self.document.updated_at = updated.updated_at.clone();
                if self.server_matches_snapshot(&updated) {
                    self.acknowledge_save();
                    SessionEvent::Updated
                } else {
                    // Keep the local edits, but only count what the server
                    // actually holds as saved.
                    self.in_flight = None;
                    self.saved_fingerprint = Some(fingerprint(&updated.title, &updated.body));
                    self.transition(SessionState::Ready);
                    SessionEvent::Failed(SessionError::Update(ClientError::Server {
                        status: 200,
                        message: STORED_MISMATCH_MESSAGE.to_string(),
                    }))
                }
            }
            (SessionState::Saving, Outcome::Updated(Err(e))) => {
                self.abort_save();
                SessionEvent::Failed(SessionError::Update(e))
            }
            (SessionState::Deleting, Outcome::Deleted(Ok(()))) => {
                self.close();
                SessionEvent::Deleted
            }
            (SessionState::Deleting, Outcome::Deleted(Err(e))) => {
                self.transition(SessionState::Ready);
                SessionEvent::Failed(SessionError::Delete(e))
            }
            (SessionState::Generating, Outcome::Generated(Ok(draft))) => {
                self.document.title = draft.title;
                self.document.body = draft.markup;
                self.surface.populate(&self.document.body);
                self.metrics = derive_metrics(&self.document.body);
                self.transition(SessionState::Ready);
                SessionEvent::Generated
            }
            (SessionState::Generating, Outcome::Generated(Err(e))) => {
                self.transition(SessionState::Ready);
                SessionEvent::Failed(SessionError::Generation(e))
            }
            (state, _) => {
                warn!("dropping {label} result, session is {state}");
                return None;
            }
        };
        Some(event)
    }

    fn ensure_ready(&self) -> Result<(), SessionError> {
        if self.state == SessionState::Ready {
            Ok(())
        } else {
            Err(SessionError::Rejected(self.state))
        }
    }

    fn hydrate(&mut self, document: Document) {
        self.metrics = derive_metrics(&document.body);
        self.surface.populate(&document.body);
        self.document = document;
    }

    fn server_matches_snapshot(&self, stored: &Document) -> bool {
        match &self.in_flight {
            Some(sent) => sent.title == stored.title && sent.body == stored.body,
            None => true,
        }
    }

    fn acknowledge_save(&mut self) {
        if let Some(snapshot) = self.in_flight.take() {
            self.saved_fingerprint = Some(fingerprint(&snapshot.title, &snapshot.body));
        }
        self.transition(SessionState::Ready);
    }

    fn abort_save(&mut self) {
        self.in_flight = None;
        self.transition(SessionState::Ready);
    }

    fn transition(&mut self, next: SessionState) {
        debug!("document session: {} -> {}", self.state, next);
        self.state = next;
    }
}

fn fingerprint(title: &str, body: &str) -> String {
    format!("{:x}", md5::compute(format!("{title}\u{0}{body}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::collaborators::{DocumentRepository, GeneratedDraft, GenerationService};
    use crate::session::effects::perform;
    use crate::session::surface::testing::RecordingSurface;
    use std::cell::{Cell, RefCell};

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Fetch(DocumentId),
        Create(String, String),
        Update(DocumentId, String, String),
        Delete(DocumentId),
        Generate(String),
    }

    /// In-memory backend recording every call it receives.
    #[derive(Default)]
    struct MockBackend {
        calls: RefCell<Vec<Call>>,
        stored: RefCell<Option<Document>>,
        next_id: Cell<DocumentId>,
        fail_with: RefCell<Option<ClientError>>,
        draft: RefCell<Option<GeneratedDraft>>,
    }

    impl MockBackend {
        fn with_document(document: Document) -> Self {
            let backend = Self::default();
            *backend.stored.borrow_mut() = Some(document);
            backend
        }

        fn failing(error: ClientError) -> Self {
            let backend = Self::default();
            *backend.fail_with.borrow_mut() = Some(error);
            backend
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }

        fn check(&self) -> Result<(), ClientError> {
            match self.fail_with.borrow().clone() {
                Some(error) => Err(error),
                None => Ok(()),
            }
        }
    }

    impl DocumentRepository for MockBackend {
        async fn fetch_by_id(&self, id: DocumentId) -> Result<Document, ClientError> {
            self.calls.borrow_mut().push(Call::Fetch(id));
            self.check()?;
            self.stored.borrow().clone().ok_or(ClientError::NotFound)
        }

        async fn create(&self, title: &str, body: &str) -> Result<Document, ClientError> {
            self.calls
                .borrow_mut()
                .push(Call::Create(title.to_string(), body.to_string()));
            self.check()?;
            let id = self.next_id.get() + 100;
            self.next_id.set(id);
            Ok(Document {
                id: Some(id),
                title: title.to_string(),
                body: body.to_string(),
                ..Document::default()
            })
        }

        async fn update(
            &self,
            id: DocumentId,
            title: &str,
            body: &str,
        ) -> Result<Document, ClientError> {
            self.calls
                .borrow_mut()
                .push(Call::Update(id, title.to_string(), body.to_string()));
            self.check()?;
            Ok(Document {
                id: Some(id),
                title: title.to_string(),
                body: body.to_string(),
                updated_at: Some("2025-06-01T00:00:00+00:00".to_string()),
                ..Document::default()
            })
        }

        async fn delete(&self, id: DocumentId) -> Result<(), ClientError> {
            self.calls.borrow_mut().push(Call::Delete(id));
            self.check()
        }
    }

    impl GenerationService for MockBackend {
        async fn generate(&self, topic: &str) -> Result<GeneratedDraft, ClientError> {
            self.calls.borrow_mut().push(Call::Generate(topic.to_string()));
            self.check()?;
            Ok(self.draft.borrow().clone().unwrap_or(GeneratedDraft {
                title: topic.to_string(),
                markup: format!("<p>All about {topic}</p>"),
            }))
        }
    }

    type Session = DocumentSession<RecordingSurface>;

    fn stored_draft() -> Document {
        Document {
            id: Some(42),
            title: "Draft".to_string(),
            body: "<p>Hello world</p>".to_string(),
            ..Document::default()
        }
    }

    async fn run(session: &mut Session, backend: &MockBackend, command: Command) -> SessionEvent {
        let outcome = perform(command, backend, backend).await;
        session.complete(outcome).expect("outcome applies to session")
    }

    async fn loaded_session(backend: &MockBackend) -> Session {
        let mut session = Session::new();
        let command = session.enter(EditorMode::Edit(42)).unwrap().unwrap();
        assert_eq!(session.state(), SessionState::Loading);
        assert_eq!(run(&mut session, backend, command).await, SessionEvent::Loaded);
        session
    }

    fn ready_new_session() -> Session {
        let mut session = Session::new();
        assert_eq!(session.enter(EditorMode::New).unwrap(), None);
        session
    }

    #[tokio::test]
    async fn loading_a_document_derives_metrics() {
        let backend = MockBackend::with_document(stored_draft());
        let session = loaded_session(&backend).await;

        assert_eq!(session.state(), SessionState::Ready);
        assert_eq!(session.document().title, "Draft");
        assert_eq!(
            session.metrics(),
            DocumentMetrics {
                word_count: 2,
                char_count: 11
            }
        );
        assert!(!session.is_dirty());
        assert_eq!(backend.calls(), vec![Call::Fetch(42)]);
    }

    #[tokio::test]
    async fn body_loaded_before_surface_is_applied_once_on_ready() {
        let backend = MockBackend::with_document(stored_draft());
        let mut session = loaded_session(&backend).await;
        let surface = RecordingSurface::default();

        session.on_editor_ready(surface.clone());
        session.on_editor_ready(surface.clone());

        assert_eq!(surface.writes(), vec!["<p>Hello world</p>".to_string()]);
    }

    #[tokio::test]
    async fn body_loaded_after_surface_is_written_through() {
        let backend = MockBackend::with_document(stored_draft());
        let mut session = Session::new();
        let surface = RecordingSurface::default();
        session.on_editor_ready(surface.clone());

        let command = session.enter(EditorMode::Edit(42)).unwrap().unwrap();
        run(&mut session, &backend, command).await;

        assert_eq!(surface.writes(), vec!["<p>Hello world</p>".to_string()]);
    }

    #[tokio::test]
    async fn failed_load_closes_the_session() {
        let backend = MockBackend::failing(ClientError::NotFound);
        let mut session = Session::new();
        let command = session.enter(EditorMode::Edit(7)).unwrap().unwrap();

        let event = run(&mut session, &backend, command).await;

        assert_eq!(event, SessionEvent::Failed(SessionError::Load(ClientError::NotFound)));
        assert!(session.is_closed());
        assert_eq!(session.document(), &Document::draft());
    }

    #[test]
    fn entering_twice_is_rejected() {
        let mut session = ready_new_session();
        assert_eq!(
            session.enter(EditorMode::Edit(1)),
            Err(SessionError::Rejected(SessionState::Ready))
        );
    }

    #[test]
    fn content_changes_update_body_and_metrics() {
        let mut session = ready_new_session();
        session.on_content_changed("<p>one two three</p>");

        assert_eq!(session.document().body, "<p>one two three</p>");
        assert_eq!(session.metrics().word_count, 3);
        assert_eq!(session.metrics().char_count, 13);
        assert!(session.is_dirty());
    }

    #[test]
    fn saving_an_empty_draft_fails_validation_without_a_call() {
        let mut session = ready_new_session();
        session.on_title_changed("   ");
        session.on_content_changed(" \n ");

        assert_eq!(
            session.save(),
            Err(SessionError::Validation(EMPTY_DOCUMENT_MESSAGE.to_string()))
        );
        assert_eq!(session.state(), SessionState::Ready);
    }

    #[tokio::test]
    async fn first_save_creates_and_later_saves_update() {
        let backend = MockBackend::default();
        let mut session = ready_new_session();
        session.on_title_changed("Notes");

        let command = session.save().unwrap();
        assert_eq!(
            command,
            Command::Create {
                title: "Notes".to_string(),
                body: String::new()
            }
        );
        assert_eq!(session.state(), SessionState::Saving);
        assert_eq!(run(&mut session, &backend, command).await, SessionEvent::Created(100));
        assert_eq!(session.document().id, Some(100));
        assert!(!session.is_dirty());

        session.on_content_changed("<p>more</p>");
        assert!(session.is_dirty());
        let command = session.save().unwrap();
        assert_eq!(run(&mut session, &backend, command).await, SessionEvent::Updated);

        assert_eq!(
            backend.calls(),
            vec![
                Call::Create("Notes".to_string(), String::new()),
                Call::Update(100, "Notes".to_string(), "<p>more</p>".to_string()),
            ]
        );
        assert_eq!(
            session.document().updated_at.as_deref(),
            Some("2025-06-01T00:00:00+00:00")
        );
        assert!(!session.is_dirty());
    }

    #[tokio::test]
    async fn update_the_server_did_not_apply_stays_dirty() {
        let backend = MockBackend::with_document(stored_draft());
        let mut session = loaded_session(&backend).await;
        session.on_content_changed("");

        let command = session.save().unwrap();
        assert_eq!(
            command,
            Command::Update {
                id: 42,
                title: "Draft".to_string(),
                body: String::new()
            }
        );

        // The server answers with the body it still holds.
        let event = session.complete(Outcome::Updated(Ok(stored_draft())));

        assert!(matches!(
            event,
            Some(SessionEvent::Failed(SessionError::Update(ClientError::Server { .. })))
        ));
        assert_eq!(session.state(), SessionState::Ready);
        assert_eq!(session.document().body, "");
        assert!(session.is_dirty());
    }

    #[test]
    fn save_reads_the_latest_surface_content() {
        let mut session = ready_new_session();
        let surface = RecordingSurface::default();
        session.on_editor_ready(surface.clone());
        surface.type_markup("<p>typed but not notified</p>");

        let command = session.save().unwrap();

        assert_eq!(
            command,
            Command::Create {
                title: String::new(),
                body: "<p>typed but not notified</p>".to_string()
            }
        );
        assert_eq!(session.metrics().word_count, 4);
    }

    #[tokio::test]
    async fn failed_save_returns_to_ready_unchanged() {
        let backend = MockBackend::failing(ClientError::Network("offline".to_string()));
        let mut session = ready_new_session();
        session.on_title_changed("Notes");

        let command = session.save().unwrap();
        let event = run(&mut session, &backend, command).await;

        assert_eq!(
            event,
            SessionEvent::Failed(SessionError::Create(ClientError::Network(
                "offline".to_string()
            )))
        );
        assert_eq!(session.state(), SessionState::Ready);
        assert_eq!(session.document().id, None);
        assert_eq!(session.document().title, "Notes");
        assert!(session.is_dirty());
    }

    #[tokio::test]
    async fn edits_made_while_saving_stay_dirty() {
        let backend = MockBackend::with_document(stored_draft());
        let mut session = loaded_session(&backend).await;
        session.on_title_changed("Renamed");

        let command = session.save().unwrap();
        session.on_title_changed("Renamed again");
        run(&mut session, &backend, command).await;

        assert_eq!(session.document().title, "Renamed again");
        assert!(session.is_dirty());
    }

    #[tokio::test]
    async fn operations_are_rejected_while_busy() {
        let backend = MockBackend::with_document(stored_draft());
        let confirm_calls = Cell::new(0);
        let gate = |_: &str| {
            confirm_calls.set(confirm_calls.get() + 1);
            true
        };

        for start in ["save", "generate", "delete"] {
            let mut session = loaded_session(&backend).await;
            let busy_state = match start {
                "save" => {
                    session.save().unwrap();
                    SessionState::Saving
                }
                "generate" => {
                    session.generate("topic").unwrap();
                    SessionState::Generating
                }
                _ => {
                    session.delete(&gate).unwrap().unwrap();
                    SessionState::Deleting
                }
            };
            let before = session.document().clone();
            let confirmations = confirm_calls.get();

            assert_eq!(session.save(), Err(SessionError::Rejected(busy_state)));
            assert_eq!(session.generate("other"), Err(SessionError::Rejected(busy_state)));
            assert_eq!(session.delete(&gate), Err(SessionError::Rejected(busy_state)));

            assert_eq!(session.state(), busy_state);
            assert_eq!(session.document(), &before);
            assert_eq!(confirm_calls.get(), confirmations);
        }
    }

    #[tokio::test]
    async fn delete_requires_confirmation() {
        let backend = MockBackend::with_document(stored_draft());
        let mut session = loaded_session(&backend).await;

        assert_eq!(session.delete(&|_: &str| false), Ok(None));
        assert_eq!(session.state(), SessionState::Ready);
        assert_eq!(backend.calls(), vec![Call::Fetch(42)]);

        let command = session.delete(&|_: &str| true).unwrap().unwrap();
        let event = run(&mut session, &backend, command).await;

        assert_eq!(event, SessionEvent::Deleted);
        assert!(event.invalidates_listing());
        assert!(session.is_closed());
        assert_eq!(backend.calls(), vec![Call::Fetch(42), Call::Delete(42)]);
    }

    #[test]
    fn drafts_cannot_be_deleted() {
        let mut session = ready_new_session();
        let asked = Cell::new(false);
        let result = session.delete(&|_: &str| {
            asked.set(true);
            true
        });

        assert_eq!(result, Err(SessionError::NotPersisted));
        assert!(!asked.get());
    }

    #[tokio::test]
    async fn failed_delete_returns_to_ready() {
        let backend = MockBackend::with_document(stored_draft());
        let mut session = loaded_session(&backend).await;
        let command = session.delete(&|_: &str| true).unwrap().unwrap();
        *backend.fail_with.borrow_mut() = Some(ClientError::Unauthorized);

        let event = run(&mut session, &backend, command).await;

        assert_eq!(event, SessionEvent::Failed(SessionError::Delete(ClientError::Unauthorized)));
        assert_eq!(session.state(), SessionState::Ready);
        assert_eq!(session.document().id, Some(42));
    }

    #[tokio::test]
    async fn generation_replaces_title_and_body_once_on_surface() {
        let backend = MockBackend::with_document(stored_draft());
        *backend.draft.borrow_mut() = Some(GeneratedDraft {
            title: "AI in healthcare".to_string(),
            markup: "<h1>AI</h1><p>Models assist doctors</p>".to_string(),
        });
        let mut session = loaded_session(&backend).await;
        let surface = RecordingSurface::default();
        session.on_editor_ready(surface.clone());
        session.on_title_changed("Something else");

        let command = session.generate("AI in healthcare").unwrap();
        assert_eq!(session.state(), SessionState::Generating);
        let event = run(&mut session, &backend, command).await;

        assert_eq!(event, SessionEvent::Generated);
        assert_eq!(session.state(), SessionState::Ready);
        assert_eq!(session.document().title, "AI in healthcare");
        assert_eq!(session.document().body, "<h1>AI</h1><p>Models assist doctors</p>");
        assert_eq!(
            surface.writes(),
            vec![
                "<p>Hello world</p>".to_string(),
                "<h1>AI</h1><p>Models assist doctors</p>".to_string(),
            ]
        );
        assert_eq!(session.metrics().word_count, 3);
        assert_eq!(session.document().id, Some(42));
    }

    #[tokio::test]
    async fn rate_limited_generation_leaves_document_untouched() {
        let backend = MockBackend::with_document(stored_draft());
        let mut session = loaded_session(&backend).await;
        let surface = RecordingSurface::default();
        session.on_editor_ready(surface.clone());
        *backend.fail_with.borrow_mut() = Some(ClientError::RateLimited);

        let command = session.generate("AI in healthcare").unwrap();
        let event = run(&mut session, &backend, command).await;

        assert_eq!(
            event,
            SessionEvent::Failed(SessionError::Generation(ClientError::RateLimited))
        );
        assert_eq!(session.state(), SessionState::Ready);
        assert_eq!(session.document(), &stored_draft());
        assert_eq!(surface.writes(), vec!["<p>Hello world</p>".to_string()]);
    }

    #[test]
    fn blank_topic_is_rejected_locally() {
        let mut session = ready_new_session();
        assert_eq!(
            session.generate("  "),
            Err(SessionError::Validation(EMPTY_TOPIC_MESSAGE.to_string()))
        );
        assert_eq!(session.state(), SessionState::Ready);
    }

    #[test]
    fn generation_before_surface_is_buffered() {
        let mut session = ready_new_session();
        session.generate("rust").unwrap();
        session.complete(Outcome::Generated(Ok(GeneratedDraft {
            title: "Rust".to_string(),
            markup: "<p>Ownership</p>".to_string(),
        })));

        let surface = RecordingSurface::default();
        session.on_editor_ready(surface.clone());

        assert_eq!(surface.writes(), vec!["<p>Ownership</p>".to_string()]);
    }

    #[test]
    fn late_outcomes_after_close_are_ignored() {
        let mut session = ready_new_session();
        session.on_title_changed("Notes");
        session.save().unwrap();
        session.close();

        let event = session.complete(Outcome::Created(Ok(Document {
            id: Some(9),
            ..Document::default()
        })));

        assert_eq!(event, None);
        assert!(session.is_closed());
        assert_eq!(session.document().id, None);
    }

    #[test]
    fn mismatched_outcomes_are_ignored() {
        let mut session = ready_new_session();
        let event = session.complete(Outcome::Deleted(Ok(())));

        assert_eq!(event, None);
        assert_eq!(session.state(), SessionState::Ready);
    }

    #[test]
    fn closed_session_never_touches_the_surface() {
        let mut session = ready_new_session();
        let surface = RecordingSurface::default();
        session.close();
        session.on_editor_ready(surface.clone());
        session.on_content_changed("<p>ignored</p>");

        assert!(!session.surface_ready());
        assert!(surface.writes().is_empty());
        assert_eq!(session.document().body, "");
    }

    #[tokio::test]
    async fn remounted_surface_receives_current_body() {
        let backend = MockBackend::with_document(stored_draft());
        let mut session = loaded_session(&backend).await;
        let first = RecordingSurface::default();
        session.on_editor_ready(first.clone());
        session.on_content_changed("<p>edited</p>");

        session.on_editor_disposed();
        let second = RecordingSurface::default();
        session.on_editor_ready(second.clone());

        assert_eq!(second.writes(), vec!["<p>edited</p>".to_string()]);
        assert_eq!(first.writes(), vec!["<p>Hello world</p>".to_string()]);
    }
}
