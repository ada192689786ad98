//! Application shell: session check, page switching and the listing cache.

use common::model::document::{Document, DocumentId};
use common::model::user::UserProfile;
use log::{info, warn};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::ApiClient;
use crate::components::auth::LoginView;
use crate::components::dashboard::{Dashboard, ListingCache, ListingMessage};
use crate::components::editor::EditorView;
use crate::components::helpers::show_toast;
use crate::session::ClientError;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Page {
    /// Waiting for `/me`.
    Checking,
    Login,
    Dashboard,
    Editor(Option<DocumentId>),
}

pub enum Msg {
    SessionChecked(Result<UserProfile, ClientError>),
    LoggedIn(UserProfile),
    LoggedOut,
    Unauthorized,
    Open(Option<DocumentId>),
    ShowListing,
    Listing(ListingMessage),
    ListingFetched(u32, Result<Vec<Document>, ClientError>),
}

pub struct App {
    page: Page,
    user: Option<UserProfile>,
    listing: ListingCache,
    api: ApiClient,
    /// Bumped on every editor open so reopening the same id remounts it.
    editor_generation: u32,
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let api = ApiClient;
        let link = ctx.link().clone();
        spawn_local(async move {
            link.send_message(Msg::SessionChecked(api.me().await));
        });
        Self {
            page: Page::Checking,
            user: None,
            listing: ListingCache::default(),
            api,
            editor_generation: 0,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SessionChecked(Ok(user)) | Msg::LoggedIn(user) => {
                info!("signed in as {}", user.email);
                self.user = Some(user);
                self.page = Page::Dashboard;
            }
            Msg::SessionChecked(Err(err)) => {
                if err != ClientError::Unauthorized {
                    warn!("session check failed: {err}");
                }
                self.page = Page::Login;
            }
            Msg::LoggedOut => {
                self.sign_out();
            }
            Msg::Unauthorized => {
                show_toast("Your session has expired. Please sign in again.");
                self.sign_out();
            }
            Msg::Open(id) => {
                self.editor_generation = self.editor_generation.wrapping_add(1);
                self.page = Page::Editor(id);
            }
            Msg::ShowListing => {
                self.page = Page::Dashboard;
            }
            Msg::Listing(message) => {
                self.listing.apply(message);
            }
            Msg::ListingFetched(epoch, Ok(documents)) => {
                self.listing.fetched(epoch, documents);
            }
            Msg::ListingFetched(epoch, Err(ClientError::Unauthorized)) => {
                self.listing.fetch_failed(epoch);
                ctx.link().send_message(Msg::Unauthorized);
            }
            Msg::ListingFetched(epoch, Err(err)) => {
                warn!("listing fetch failed: {err}");
                self.listing.fetch_failed(epoch);
            }
        }
        self.refresh_listing(ctx);
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();

        let page = match (self.page, &self.user) {
            (Page::Checking, _) => html! { <div class="app-loading">{"Loading..."}</div> },
            (Page::Login, _) | (_, None) => html! {
                <LoginView on_logged_in={link.callback(Msg::LoggedIn)} />
            },
            (Page::Dashboard, Some(user)) => html! {
                <Dashboard
                    user={user.clone()}
                    documents={self.listing.documents().map(|d| d.to_vec())}
                    loading={self.listing.is_fetching()}
                    failed={self.listing.has_failed()}
                    on_open={link.callback(Msg::Open)}
                    on_listing_changed={link.callback(Msg::Listing)}
                    on_logout={link.callback(|_| Msg::LoggedOut)}
                    on_unauthorized={link.callback(|_| Msg::Unauthorized)}
                />
            },
            (Page::Editor(id), Some(_)) => html! {
                <EditorView
                    key={format!("{}-{:?}", self.editor_generation, id)}
                    document_id={id}
                    on_close={link.callback(|_| Msg::ShowListing)}
                    on_listing_changed={link.callback(Msg::Listing)}
                    on_unauthorized={link.callback(|_| Msg::Unauthorized)}
                />
            },
        };

        html! { <div class="app">{ page }</div> }
    }
}

impl App {
    fn sign_out(&mut self) {
        self.user = None;
        self.listing.apply(ListingMessage::Cleared);
        self.page = Page::Login;
    }

    /// Starts a listing fetch when the dashboard is showing stale data.
    fn refresh_listing(&mut self, ctx: &Context<Self>) {
        if self.page != Page::Dashboard || self.user.is_none() || !self.listing.needs_fetch() {
            return;
        }
        let epoch = self.listing.begin_fetch();
        let api = self.api;
        let link = ctx.link().clone();
        spawn_local(async move {
            link.send_message(Msg::ListingFetched(epoch, api.list().await));
        });
    }
}
