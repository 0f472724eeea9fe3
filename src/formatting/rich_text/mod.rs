// src/formatting/rich_text/mod.rs
//! Renders rich text spans into inline HTML.

mod annotations;

pub use annotations::html_escape;

use crate::types::{RichTextItem, RichTextType};
use annotations::HtmlStyleRenderer;

/// Renders a sequence of spans, in order, into one inline fragment.
pub fn render_rich_text(items: &[RichTextItem]) -> String {
    items.iter().map(render_span).collect()
}

/// Renders a single span.
///
/// Text spans show their content and honor their link; mentions and
/// equations show their plain text.
pub fn render_span(item: &RichTextItem) -> String {
    let (text, link) = match &item.text_type {
        RichTextType::Text { content, link } => (content.as_str(), link.as_ref()),
        RichTextType::Mention(_) | RichTextType::Equation { .. } => {
            (item.plain_text.as_str(), None)
        }
    };

    let styled = HtmlStyleRenderer::apply_styles(&html_escape(text), &item.annotations);
    match link {
        Some(link) => HtmlStyleRenderer::apply_link(&styled, &link.url),
        None => styled,
    }
}
