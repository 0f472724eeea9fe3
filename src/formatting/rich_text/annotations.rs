// src/formatting/rich_text/annotations.rs
//! Annotation styling for rich text spans.

use crate::types::Annotations;

/// Class names for the active annotation flags, in a fixed order.
pub fn annotation_classes(annotations: &Annotations) -> Vec<&'static str> {
    [
        (annotations.bold, "bold"),
        (annotations.code, "code"),
        (annotations.italic, "italic"),
        (annotations.strikethrough, "strikethrough"),
        (annotations.underline, "underline"),
    ]
    .into_iter()
    .filter_map(|(active, class)| active.then_some(class))
    .collect()
}

/// Renderer for span styles to HTML.
pub struct HtmlStyleRenderer;

impl HtmlStyleRenderer {
    /// Wraps already-escaped `content` in a span carrying the annotation
    /// classes and color. Unstyled content is returned as is.
    pub fn apply_styles(content: &str, annotations: &Annotations) -> String {
        let classes = annotation_classes(annotations);
        let style = annotations.color.css_declaration();

        if classes.is_empty() && style.is_none() {
            return content.to_string();
        }

        let mut result = String::from("<span");
        if !classes.is_empty() {
            result.push_str(&format!(" class=\"{}\"", classes.join(" ")));
        }
        if let Some(style) = style {
            result.push_str(&format!(" style=\"{}\"", style));
        }
        result.push('>');
        result.push_str(content);
        result.push_str("</span>");
        result
    }

    /// Wraps `content` in a hyperlink to `url`.
    pub fn apply_link(content: &str, url: &str) -> String {
        format!("<a href=\"{}\">{}</a>", html_escape(url), content)
    }
}

/// Basic HTML escaping.
pub fn html_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
