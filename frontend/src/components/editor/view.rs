//! View rendering for the document editor.
//!
//! Layout: a header with the back button, title input, live counts and the
//! assistant button; the `contenteditable` body; a footer with Save and
//! Delete. The assistant form lives in a top sheet.

use web_sys::{HtmlElement, HtmlInputElement, InputEvent, KeyboardEvent};
use yew::html::Scope;
use yew::prelude::*;

use crate::components::helpers::format_count;
use crate::session::SessionState;
use crate::tops_sheet::yw_material_top_sheet::YwMaterialTopSheet;

use super::messages::Msg;
use super::state::EditorView;

pub fn view(component: &EditorView, ctx: &Context<EditorView>) -> Html {
    let link = ctx.link();

    // Ctrl+S / Cmd+S saves.
    let onkeydown = link.batch_callback(|e: KeyboardEvent| {
        if (e.ctrl_key() || e.meta_key()) && e.key().eq_ignore_ascii_case("s") {
            e.prevent_default();
            Some(Msg::Save)
        } else {
            None
        }
    });

    html! {
        <div class="editor-root" {onkeydown}>
            { build_header(component, link) }
            { build_body(component, link) }
            { build_footer(component, link) }
            { build_assistant_sheet(component, link) }
        </div>
    }
}

fn build_header(component: &EditorView, link: &Scope<EditorView>) -> Html {
    let session = &component.session;
    let metrics = session.metrics();
    let oninput = link.callback(|e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::TitleChanged(input.value())
    });

    html! {
        <div class="editor-header">
            <button class="icon-btn" title="Back to documents" onclick={link.callback(|_| Msg::Back)}>
                <i class="material-icons">{"arrow_back"}</i>
            </button>
            <div class="editor-title" style="position: relative;">
                <input
                    type="text"
                    class="title-input"
                    placeholder="Untitled document"
                    value={session.document().title.clone()}
                    disabled={!session.is_ready()}
                    {oninput}
                />
                {
                    if session.is_dirty() {
                        html! {
                            <span
                                title="Unsaved changes"
                                style="
                                    position: absolute;
                                    top: 4px;
                                    right: 6px;
                                    width: 8px;
                                    height: 8px;
                                    background: #e53935;
                                    border-radius: 50%;
                                    display: inline-block;
                                "
                            />
                        }
                    } else {
                        html! {}
                    }
                }
            </div>
            <span class="editor-metrics">
                { format!("{} words · {} characters", format_count(metrics.word_count), format_count(metrics.char_count)) }
            </span>
            <button
                class="icon-btn"
                title="Writing assistant"
                disabled={!session.is_ready()}
                onclick={link.callback(|_| Msg::OpenAssistant)}
            >
                <i class="material-icons">{"auto_awesome"}</i>
            </button>
        </div>
    }
}

fn build_body(component: &EditorView, link: &Scope<EditorView>) -> Html {
    let state = component.session.state();
    let oninput = link.callback(|e: InputEvent| {
        let surface: HtmlElement = e.target_unchecked_into();
        Msg::ContentChanged(surface.inner_html())
    });

    // The surface stays mounted while loading so its handle exists when the
    // document arrives.
    html! {
        <div class="editor-body" style="position: relative;">
            <div
                class="editor-surface"
                contenteditable={if component.session.is_ready() { "true" } else { "false" }}
                ref={component.surface_ref.clone()}
                {oninput}
            />
            {
                match state {
                    SessionState::Idle | SessionState::Loading => overlay("Loading..."),
                    SessionState::Generating => overlay("Writing your draft..."),
                    _ => html! {},
                }
            }
        </div>
    }
}

fn build_footer(component: &EditorView, link: &Scope<EditorView>) -> Html {
    let session = &component.session;
    let save_label = if session.state() == SessionState::Saving {
        "Saving..."
    } else {
        "Save"
    };
    let delete_label = if session.state() == SessionState::Deleting {
        "Deleting..."
    } else {
        "Delete"
    };

    html! {
        <div class="editor-footer">
            <button
                class="btn primary"
                disabled={!session.is_ready()}
                onclick={link.callback(|_| Msg::Save)}
            >
                <i class="material-icons">{"save"}</i>{ save_label }
            </button>
            {
                if session.document().is_persisted() {
                    html! {
                        <button
                            class="btn danger"
                            disabled={!session.is_ready()}
                            onclick={link.callback(|_| Msg::Delete)}
                        >
                            <i class="material-icons">{"delete"}</i>{ delete_label }
                        </button>
                    }
                } else {
                    html! {}
                }
            }
        </div>
    }
}

fn build_assistant_sheet(component: &EditorView, link: &Scope<EditorView>) -> Html {
    let generating = component.session.state() == SessionState::Generating;
    let oninput = link.callback(|e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::TopicChanged(input.value())
    });
    let onkeydown = link.batch_callback(|e: KeyboardEvent| {
        (e.key() == "Enter").then_some(Msg::Generate)
    });

    html! {
        <YwMaterialTopSheet node_ref={component.assistant_sheet_ref.clone()}>
            <div class="assistant-form">
                <h3>{"What should I write about?"}</h3>
                <input
                    type="text"
                    placeholder="e.g. The benefits of remote work"
                    value={component.topic.clone()}
                    disabled={generating}
                    {oninput}
                    {onkeydown}
                />
                <div class="assistant-actions">
                    <button class="btn" disabled={generating} onclick={link.callback(|_| Msg::CloseAssistant)}>
                        {"Cancel"}
                    </button>
                    <button class="btn primary" disabled={generating} onclick={link.callback(|_| Msg::Generate)}>
                        { if generating { "Generating..." } else { "Generate" } }
                    </button>
                </div>
            </div>
        </YwMaterialTopSheet>
    }
}

fn overlay(label: &str) -> Html {
    html! {
        <div
            class="editor-overlay"
            style="
                position: absolute;
                inset: 0;
                display: flex;
                align-items: center;
                justify-content: center;
                background: rgba(255, 255, 255, 0.7);
            "
        >
            <div class="spinner" />
            <span>{ label.to_string() }</span>
        </div>
    }
}

