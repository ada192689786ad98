use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};

/// Renders generated Markdown into HTML markup for the editing surface.
///
/// Line endings are normalized and leading BOM / zero-width characters are
/// dropped before parsing. Raw HTML in the source is emitted as escaped
/// text and script-capable link targets are replaced, since the result is
/// written into the page with `innerHTML`.
pub fn render_markdown(markdown: &str) -> String {
    let text = markdown
        .replace("\r\n", "\n")
        .replace('\r', "\n");
    let text = text.trim_start_matches(|c: char| c == '\u{feff}' || c == '\u{200b}');

    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(text, options).map(neutralize);
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    html_output
}

fn neutralize(event: Event<'_>) -> Event<'_> {
    match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        other => other,
    }
}

fn safe_url(url: CowStr<'_>) -> CowStr<'_> {
    let scheme = url.trim_start().to_ascii_lowercase();
    if ["javascript:", "vbscript:", "data:"]
        .iter()
        .any(|unsafe_scheme| scheme.starts_with(unsafe_scheme))
    {
        CowStr::Borrowed("#")
    } else {
        url
    }
}
