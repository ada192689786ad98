//! Properties for the `EditorView`.

use common::model::document::DocumentId;
use yew::prelude::*;

use crate::components::dashboard::ListingMessage;

#[derive(Properties, PartialEq, Clone)]
pub struct EditorProps {
    /// Document to open; `None` starts a blank draft.
    ///
    /// Read once, on the first render. The parent keys the editor by this id
    /// so switching documents mounts a fresh component.
    #[prop_or_default]
    pub document_id: Option<DocumentId>,

    /// Leave the editor and return to the document listing.
    pub on_close: Callback<()>,

    /// Changes the listing cache must reflect.
    pub on_listing_changed: Callback<ListingMessage>,

    /// The backend rejected the session cookie.
    pub on_unauthorized: Callback<()>,
}
