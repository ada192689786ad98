//! Browser-side helpers shared by the views.
//!
//! - **User feedback**: transient toasts and the yes/no confirmation gate.
//! - **Unsaved-changes flag**: the window-level `app_dirty` property read by
//!   the page's `beforeunload` handler.
//! - **Formatting**: counts, dates and plain-text previews for the listing.

use js_sys::Reflect;
use num_format::{Locale, ToFormattedString};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlElement;

use crate::session::{plain_text, ConfirmationGate};

const PREVIEW_CHARS: usize = 140;

/// Displays a temporary notification message at the bottom of the screen.
///
/// The toast is a styled `div` appended to `body` that removes itself after
/// three seconds.
pub fn show_toast(message: &str) {
    if let Some(window) = web_sys::window() {
        if let Some(document) = window.document() {
            if let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) {
                toast.set_text_content(Some(message));
                let html_toast: HtmlElement = toast.unchecked_into();
                let style = html_toast.style();
                style.set_property("position", "fixed").ok();
                style.set_property("bottom", "20px").ok();
                style.set_property("left", "50%").ok();
                style.set_property("transform", "translateX(-50%)").ok();
                style.set_property("background", "rgba(0, 0, 0, 0.8)").ok();
                style.set_property("color", "#fff").ok();
                style.set_property("padding", "10px 20px").ok();
                style.set_property("border-radius", "4px").ok();
                style.set_property("z-index", "10000").ok();
                style.set_property("font-family", "Arial, sans-serif").ok();

                if body.append_child(&html_toast).is_ok() {
                    wasm_bindgen_futures::spawn_local(async move {
                        gloo_timers::future::TimeoutFuture::new(3000).await;
                        if let Some(parent) = html_toast.parent_node() {
                            parent.remove_child(&html_toast).ok();
                        }
                    });
                }
            }
        }
    }
}

/// Confirmation through the native `window.confirm` dialog.
pub struct BrowserConfirm;

impl ConfirmationGate for BrowserConfirm {
    fn confirm(&self, question: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(question).ok())
            .unwrap_or(false)
    }
}

/// Mirrors the editor's unsaved-changes state into `window.app_dirty`.
pub fn set_window_dirty_flag(dirty: bool) {
    if let Some(window) = web_sys::window() {
        let _ = Reflect::set(
            &window,
            &JsValue::from_str("app_dirty"),
            &JsValue::from_bool(dirty),
        );
    }
}

/// `1234` → `"1,234"`.
pub fn format_count(count: usize) -> String {
    count.to_formatted_string(&Locale::en)
}

/// Localized date for an RFC 3339 timestamp, or an empty string when absent.
pub fn format_date(timestamp: Option<&str>) -> String {
    match timestamp {
        Some(ts) => {
            let date = js_sys::Date::new(&JsValue::from_str(ts));
            String::from(date.to_locale_date_string("en-US", &JsValue::UNDEFINED))
        }
        None => String::new(),
    }
}

/// First characters of a document body as plain text, ellipsized.
pub fn preview_text(markup: &str) -> String {
    let text = plain_text(markup);
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.chars().count() <= PREVIEW_CHARS {
        return text;
    }
    let cut: String = text.chars().take(PREVIEW_CHARS).collect();
    format!("{}…", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_use_thousands_separators() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(12_345), "12,345");
    }

    #[test]
    fn previews_collapse_markup_and_whitespace() {
        assert_eq!(preview_text("<h1>Title</h1>\n<p>Body   text</p>"), "Title Body text");
    }

    #[test]
    fn long_previews_are_ellipsized() {
        let body = format!("<p>{}</p>", "word ".repeat(100));
        let preview = preview_text(&body);
        assert!(preview.ends_with('…'));
        assert!(preview.chars().count() <= PREVIEW_CHARS + 1);
    }
}
