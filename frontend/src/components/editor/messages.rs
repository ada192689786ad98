use crate::session::Outcome;

pub enum Msg {
    TitleChanged(String),
    ContentChanged(String),
    Save,
    Delete,
    Back,
    OpenAssistant,
    CloseAssistant,
    TopicChanged(String),
    Generate,
    /// A backend call started by the session has finished.
    Completed(Outcome),
}
