use super::PageId;
use serde::{Deserialize, Serialize};

/// Rich text item with formatting annotations.
///
/// The `text_type` field carries the content variant (text, mention, or
/// equation) and `plain_text` provides the fallback rendering for any variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichTextItem {
    pub text_type: RichTextType,
    pub annotations: Annotations,
    pub plain_text: String,
    pub href: Option<String>,
}

impl RichTextItem {
    /// Create a plain text item, the most common rich text variant.
    ///
    /// ```
    /// # use notion2blog::RichTextItem;
    /// let item = RichTextItem::plain_text("hello");
    /// assert_eq!(item.plain_text, "hello");
    /// ```
    pub fn plain_text(text: &str) -> Self {
        Self {
            text_type: RichTextType::Text {
                content: text.to_string(),
                link: None,
            },
            annotations: Annotations::default(),
            plain_text: text.to_string(),
            href: None,
        }
    }

    /// A text item that links to `url`.
    pub fn link(text: &str, url: &str) -> Self {
        Self {
            text_type: RichTextType::Text {
                content: text.to_string(),
                link: Some(Link {
                    url: url.to_string(),
                }),
            },
            href: Some(url.to_string()),
            ..Self::plain_text(text)
        }
    }

    /// A mention of another page, displayed as `text`.
    pub fn page_mention(page: PageId, text: &str) -> Self {
        Self {
            text_type: RichTextType::Mention(MentionType::Page { id: page }),
            ..Self::plain_text(text)
        }
    }

    pub fn with_annotations(mut self, annotations: Annotations) -> Self {
        self.annotations = annotations;
        self
    }

    /// The id of the mentioned page, if this span is a page mention.
    pub fn mentioned_page(&self) -> Option<&PageId> {
        match &self.text_type {
            RichTextType::Mention(MentionType::Page { id }) => Some(id),
            _ => None,
        }
    }
}

/// Concatenates the plain text of every span.
pub fn plain_text_of(items: &[RichTextItem]) -> String {
    items.iter().map(|item| item.plain_text.as_str()).collect()
}

/// The kind of rich text content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RichTextType {
    Text { content: String, link: Option<Link> },
    Mention(MentionType),
    Equation { expression: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
    pub color: crate::types::Color,
}

/// What an inline mention points at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MentionType {
    User { id: String, name: Option<String> },
    Page { id: PageId },
    Database { id: String },
    Date {
        start: chrono::NaiveDate,
        end: Option<chrono::NaiveDate>,
    },
    LinkPreview { url: String },
    Link { url: String },
}
