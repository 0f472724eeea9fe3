//! Blog post rows and the per-genre databases they live in.

use crate::types::{plain_text_of, PageId, RichTextItem};
use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// A tag label on a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub name: String,
}

impl Tag {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// One row of a genre's content database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRecord {
    pub id: PageId,
    pub title: Vec<RichTextItem>,
    pub cover_url: Option<String>,
    pub tags: Vec<Tag>,
    pub created_time: DateTime<Utc>,
    pub last_edited_time: DateTime<Utc>,
}

impl PageRecord {
    pub fn title_text(&self) -> String {
        plain_text_of(&self.title)
    }

    /// Whether any of the record's tags is named `name`.
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|tag| tag.name == name)
    }
}

/// Every record of one genre, as listed by the content store.
///
/// Entries the store could not produce are kept as `None` so callers see
/// the listing as it was returned; every derived view skips them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GenreDatabase {
    pub records: Vec<Option<PageRecord>>,
}

impl GenreDatabase {
    pub fn new(records: Vec<Option<PageRecord>>) -> Self {
        Self { records }
    }

    /// The records that are present, in listing order.
    pub fn present_records(&self) -> impl Iterator<Item = &PageRecord> {
        self.records.iter().flatten()
    }

    /// Distinct tag names across all records, in first-seen order.
    pub fn tag_vocabulary(&self) -> Vec<String> {
        let vocabulary: IndexSet<&str> = self
            .present_records()
            .flat_map(|record| record.tags.iter().map(|tag| tag.name.as_str()))
            .collect();
        vocabulary.into_iter().map(str::to_string).collect()
    }

    /// `base` followed by every tag name of every record, duplicates included.
    pub fn compose_title(&self, base: &str) -> String {
        let mut title = base.to_string();
        for tag in self.present_records().flat_map(|record| &record.tags) {
            title.push(' ');
            title.push_str(&tag.name);
        }
        title
    }

    /// Records carrying the tag `name`, in listing order.
    pub fn records_tagged(&self, name: &str) -> Vec<&PageRecord> {
        self.present_records()
            .filter(|record| record.has_tag(name))
            .collect()
    }
}
