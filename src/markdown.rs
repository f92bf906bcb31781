//! Markdown-to-HTML conversion for generated analysis text.
//!
//! Raw HTML in the source is never passed through: it is emitted as text and
//! escaped like any other content.

use pulldown_cmark::{html, Event, Options, Parser};

pub fn markdown_html(text: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
    let events = Parser::new_ext(text, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, events);
    out
}

/// Template filter: `{{ text|markdown }}`.
pub fn markdown_filter(text: &str) -> minijinja::Value {
    minijinja::Value::from_safe_string(markdown_html(text))
}
