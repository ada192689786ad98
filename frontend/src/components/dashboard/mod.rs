//! Document listing: cards for the user's documents, a "New document"
//! entry, per-card delete and the logout button.
//!
//! The listing itself is owned by the app as a [`ListingCache`]; deletions
//! made here are reported back through `on_listing_changed`.

use common::model::document::{Document, DocumentId};
use common::model::user::UserProfile;
use yew::platform::spawn_local;
use yew::prelude::*;

mod cache;

pub use cache::{ListingCache, ListingMessage};

use crate::api::ApiClient;
use crate::components::helpers::{format_date, preview_text, show_toast, BrowserConfirm};
use crate::session::{ClientError, ConfirmationGate, DocumentRepository, DELETE_QUESTION};

pub enum Msg {
    Open(Option<DocumentId>),
    Delete(DocumentId),
    Deleted(DocumentId, Result<(), ClientError>),
    Retry,
    Logout,
    LoggedOut,
}

#[derive(Properties, PartialEq, Clone)]
pub struct DashboardProps {
    pub user: UserProfile,
    /// `None` until the first fetch succeeds.
    pub documents: Option<Vec<Document>>,
    #[prop_or_default]
    pub loading: bool,
    #[prop_or_default]
    pub failed: bool,
    pub on_open: Callback<Option<DocumentId>>,
    pub on_listing_changed: Callback<ListingMessage>,
    pub on_logout: Callback<()>,
    pub on_unauthorized: Callback<()>,
}

pub struct Dashboard {
    api: ApiClient,
    deleting: Option<DocumentId>,
}

impl Component for Dashboard {
    type Message = Msg;
    type Properties = DashboardProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            api: ApiClient,
            deleting: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        let props = ctx.props();
        match msg {
            Msg::Open(id) => {
                props.on_open.emit(id);
                false
            }
            Msg::Delete(id) => {
                if self.deleting.is_some() || !BrowserConfirm.confirm(DELETE_QUESTION) {
                    return false;
                }
                self.deleting = Some(id);
                let api = self.api;
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = api.delete(id).await;
                    link.send_message(Msg::Deleted(id, result));
                });
                true
            }
            Msg::Deleted(id, result) => {
                self.deleting = None;
                match result {
                    Ok(()) => {
                        props.on_listing_changed.emit(ListingMessage::Removed(id));
                        show_toast("Document deleted successfully!");
                    }
                    Err(ClientError::Unauthorized) => props.on_unauthorized.emit(()),
                    Err(err) => show_toast(&format!("Error deleting document: {err}")),
                }
                true
            }
            Msg::Retry => {
                props.on_listing_changed.emit(ListingMessage::Invalidate);
                false
            }
            Msg::Logout => {
                let api = self.api;
                let link = ctx.link().clone();
                spawn_local(async move {
                    if let Err(err) = api.logout().await {
                        log::warn!("logout failed: {err}");
                    }
                    link.send_message(Msg::LoggedOut);
                });
                false
            }
            Msg::LoggedOut => {
                props.on_logout.emit(());
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let link = ctx.link();

        html! {
            <div class="dashboard">
                <div class="dashboard-header">
                    <h2>{ format!("Welcome, {}", props.user.name) }</h2>
                    {
                        if props.loading {
                            html! { <span class="listing-refresh">{"Refreshing..."}</span> }
                        } else {
                            html! {}
                        }
                    }
                    <button class="btn" onclick={link.callback(|_| Msg::Logout)}>
                        <i class="material-icons">{"logout"}</i>{"Log out"}
                    </button>
                </div>
                <div class="document-grid">
                    <div class="document-card new" onclick={link.callback(|_| Msg::Open(None))}>
                        <i class="material-icons">{"add"}</i>
                        <span>{"New document"}</span>
                    </div>
                    { self.build_cards(ctx) }
                </div>
            </div>
        }
    }
}

impl Dashboard {
    fn build_cards(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let link = ctx.link();

        match props.documents.as_deref() {
            None if props.failed => html! {
                <div class="listing-status">
                    <span>{"Could not load your documents."}</span>
                    <button class="btn" onclick={link.callback(|_| Msg::Retry)}>{"Retry"}</button>
                </div>
            },
            None => html! { <div class="listing-status">{"Loading..."}</div> },
            Some([]) => html! {
                <div class="listing-status">{"No documents yet. Create your first one."}</div>
            },
            Some(documents) => documents
                .iter()
                .filter_map(|document| document.id.map(|id| (id, document)))
                .map(|(id, document)| {
                    let title = if document.title.trim().is_empty() {
                        "Untitled".to_string()
                    } else {
                        document.title.clone()
                    };
                    let onedit = link.callback(move |e: MouseEvent| {
                        e.stop_propagation();
                        Msg::Open(Some(id))
                    });
                    let ondelete = link.callback(move |e: MouseEvent| {
                        e.stop_propagation();
                        Msg::Delete(id)
                    });
                    html! {
                        <div
                            key={id.to_string()}
                            class={classes!("document-card", (self.deleting == Some(id)).then_some("busy"))}
                            onclick={link.callback(move |_| Msg::Open(Some(id)))}
                        >
                            <h3>{ title }</h3>
                            <p class="preview">{ preview_text(&document.body) }</p>
                            <div class="card-footer">
                                <span class="date">
                                    { format_date(document.updated_at.as_deref().or(document.created_at.as_deref())) }
                                </span>
                                <span>
                                    <button class="icon-btn" title="Edit" onclick={onedit}>
                                        <i class="material-icons">{"edit"}</i>
                                    </button>
                                    <button class="icon-btn" title="Delete" onclick={ondelete}>
                                        <i class="material-icons">{"delete"}</i>
                                    </button>
                                </span>
                            </div>
                        </div>
                    }
                })
                .collect::<Html>(),
        }
    }
}
