//! Word and character counts derived from editor markup.
//!
//! The counts mirror what a reader sees: tags are dropped, character
//! references are decoded, and the zero-width space the rich-text surface
//! uses as a caret placeholder is removed before counting.

use regex::{Captures, Regex};
use std::sync::OnceLock;

const ZERO_WIDTH_SPACE: char = '\u{200b}';

/// Counts shown next to the document title.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentMetrics {
    pub word_count: usize,
    pub char_count: usize,
}

/// Derives metrics from serialized markup.
///
/// Pure and deterministic: safe to call on every keystroke. Empty or
/// whitespace-only input yields zero for both counts.
pub fn derive_metrics(markup: &str) -> DocumentMetrics {
    let text = plain_text(markup).replace(ZERO_WIDTH_SPACE, "");
    let text = text.trim();

    DocumentMetrics {
        word_count: text.split_whitespace().count(),
        char_count: text.chars().count(),
    }
}

/// Strips tags and decodes character references, like a DOM `textContent`.
pub fn plain_text(markup: &str) -> String {
    let without_tags = tag_regex().replace_all(markup, "");
    entity_regex()
        .replace_all(&without_tags, |caps: &Captures| {
            decode_entity(&caps[1]).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn tag_regex() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"))
}

fn entity_regex() -> &'static Regex {
    static ENTITY: OnceLock<Regex> = OnceLock::new();
    ENTITY.get_or_init(|| {
        Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|[a-zA-Z]+);").expect("entity pattern is valid")
    })
}

fn decode_entity(entity: &str) -> Option<String> {
    let decoded = match entity {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        _ => {
            let code = if let Some(hex) = entity
                .strip_prefix("#x")
                .or_else(|| entity.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                entity.strip_prefix('#')?.parse::<u32>().ok()?
            };
            char::from_u32(code)?
        }
    };
    Some(decoded.to_string())
}
