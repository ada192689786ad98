//! Update function for the document editor.
//!
//! User messages are turned into session operations. Operations that need the
//! backend return a [`Command`], which is run in a `spawn_local` task and
//! comes back as `Msg::Completed`. The session decides what the outcome
//! changes; this module only reacts to the resulting [`SessionEvent`] with
//! toasts, navigation and listing updates.

use log::debug;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::components::dashboard::ListingMessage;
use crate::components::helpers::{set_window_dirty_flag, show_toast, BrowserConfirm};
use crate::session::{perform, Command, SessionError, SessionEvent};
use crate::tops_sheet::yw_material_top_sheet::{close_top_sheet, open_top_sheet};

use super::messages::Msg;
use super::state::EditorView;

const DISCARD_QUESTION: &str = "You have unsaved changes. Leave the editor anyway?";

pub fn update(component: &mut EditorView, ctx: &Context<EditorView>, msg: Msg) -> bool {
    let rerender = match msg {
        Msg::TitleChanged(title) => {
            component.session.on_title_changed(&title);
            true
        }
        Msg::ContentChanged(markup) => {
            component.session.on_content_changed(&markup);
            true
        }
        Msg::Save => {
            let result = component.session.save();
            run(component, ctx, result)
        }
        Msg::Delete => match component.session.delete(&BrowserConfirm) {
            Ok(Some(command)) => {
                dispatch(component, ctx, command);
                true
            }
            Ok(None) => false,
            Err(err) => {
                report(&err);
                false
            }
        },
        Msg::Back => {
            let leave = !component.session.is_dirty()
                || web_sys::window()
                    .and_then(|w| w.confirm_with_message(DISCARD_QUESTION).ok())
                    .unwrap_or(false);
            if leave {
                ctx.props().on_close.emit(());
            }
            false
        }
        Msg::OpenAssistant => {
            open_top_sheet(component.assistant_sheet_ref.clone());
            false
        }
        Msg::CloseAssistant => {
            close_top_sheet(component.assistant_sheet_ref.clone());
            false
        }
        Msg::TopicChanged(topic) => {
            component.topic = topic;
            false
        }
        Msg::Generate => {
            let result = component.session.generate(&component.topic);
            run(component, ctx, result)
        }
        Msg::Completed(outcome) => {
            debug!("{} call finished", outcome.label());
            if let Some(event) = component.session.complete(outcome) {
                on_event(component, ctx, event);
            }
            true
        }
    };
    set_window_dirty_flag(component.session.is_dirty());
    rerender
}

/// Runs the backend call for `command` and feeds the outcome back.
pub fn dispatch(component: &EditorView, ctx: &Context<EditorView>, command: Command) {
    let link = ctx.link().clone();
    let api = component.api;
    spawn_local(async move {
        let outcome = perform(command, &api, &api).await;
        link.send_message(Msg::Completed(outcome));
    });
}

fn run(
    component: &mut EditorView,
    ctx: &Context<EditorView>,
    result: Result<Command, SessionError>,
) -> bool {
    match result {
        Ok(command) => {
            dispatch(component, ctx, command);
            true
        }
        Err(err) => {
            report(&err);
            false
        }
    }
}

fn report(err: &SessionError) {
    match err {
        // A click while a call is in flight; the buttons already show it.
        SessionError::Rejected(state) => debug!("ignored while {state}"),
        other => show_toast(&other.to_string()),
    }
}

fn on_event(component: &mut EditorView, ctx: &Context<EditorView>, event: SessionEvent) {
    let props = ctx.props();
    let document = component.session.document().clone();

    match event {
        SessionEvent::Loaded => {}
        SessionEvent::Created(_) => {
            props.on_listing_changed.emit(ListingMessage::Upserted(document));
            show_toast("Content created successfully!");
        }
        SessionEvent::Updated => {
            props.on_listing_changed.emit(ListingMessage::Upserted(document));
            show_toast("Document updated successfully!");
        }
        SessionEvent::Generated => {
            component.topic.clear();
            close_top_sheet(component.assistant_sheet_ref.clone());
            show_toast("Content generated!");
        }
        SessionEvent::Deleted => {
            if let Some(id) = document.id {
                props.on_listing_changed.emit(ListingMessage::Removed(id));
            }
            show_toast("Document deleted successfully!");
            props.on_close.emit(());
        }
        SessionEvent::Failed(err) => {
            show_toast(&err.to_string());
            if err.is_unauthorized() {
                props.on_unauthorized.emit(());
            } else if component.session.is_closed() {
                // Nothing to edit after a failed load.
                props.on_close.emit(());
            }
        }
    }
}
