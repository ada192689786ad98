//! Component state for the document editor.

use wasm_bindgen::JsCast;
use web_sys::Element;
use yew::prelude::*;

use crate::api::ApiClient;
use crate::session::{DocumentSession, EditableSurface};

/// `contenteditable` element driven as the session's editing surface.
#[derive(Clone)]
pub struct ContentEditableSurface {
    node: NodeRef,
}

impl ContentEditableSurface {
    pub fn new(node: NodeRef) -> Self {
        Self { node }
    }

    fn element(&self) -> Option<Element> {
        self.node.get().and_then(|n| n.dyn_into::<Element>().ok())
    }
}

impl EditableSurface for ContentEditableSurface {
    fn get_content(&self) -> String {
        self.element().map(|e| e.inner_html()).unwrap_or_default()
    }

    fn set_content(&mut self, markup: &str) {
        if let Some(element) = self.element() {
            element.set_inner_html(markup);
        }
    }
}

pub struct EditorView {
    pub session: DocumentSession<ContentEditableSurface>,
    pub api: ApiClient,

    /// The `contenteditable` body.
    pub surface_ref: NodeRef,

    /// Top sheet hosting the assistant topic form.
    pub assistant_sheet_ref: NodeRef,

    /// Topic typed in the assistant form.
    pub topic: String,

    /// Guard for the one-time surface attach in `rendered`.
    pub started: bool,
}

impl Default for EditorView {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorView {
    pub fn new() -> Self {
        Self {
            session: DocumentSession::new(),
            api: ApiClient,
            surface_ref: NodeRef::default(),
            assistant_sheet_ref: NodeRef::default(),
            topic: String::new(),
            started: false,
        }
    }
}
