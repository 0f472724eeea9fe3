//! An in-memory content store for integration tests.

#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use notion2blog::model::{BlockCommon, ParagraphBlock, TextBlockContent};
use notion2blog::site::Genre;
use notion2blog::{
    AppError, Block, ContentRepository, DatabaseId, GenreTable, NotionErrorCode, PageId,
    PageRecord, RichTextItem, Tag,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const AI_DB: &str = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
pub const TECH_DB: &str = "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";

#[derive(Default)]
pub struct FakeRepository {
    databases: HashMap<DatabaseId, Vec<Option<PageRecord>>>,
    bodies: HashMap<PageId, Vec<Block>>,
    pub list_calls: AtomicUsize,
}

impl FakeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `rows` to `database`; every present row gets a one-paragraph body.
    pub fn with_database(mut self, database: &str, rows: Vec<Option<PageRecord>>) -> Self {
        for record in rows.iter().flatten() {
            self.bodies.insert(
                record.id.clone(),
                vec![paragraph(&format!("Body of {}", record.title_text()))],
            );
        }
        self.databases
            .entry(DatabaseId::parse(database).unwrap())
            .or_default()
            .extend(rows);
        self
    }

    /// Forgets the body of `id`, so fetching it reports "not found".
    pub fn without_body(mut self, id: &PageId) -> Self {
        self.bodies.remove(id);
        self
    }

    pub fn set_rows(&mut self, database: &str, rows: Vec<Option<PageRecord>>) {
        self.databases
            .insert(DatabaseId::parse(database).unwrap(), rows);
    }
}

fn not_found(what: &str) -> AppError {
    AppError::NotionService {
        code: NotionErrorCode::ObjectNotFound,
        message: format!("Could not find {}", what),
        status: reqwest::StatusCode::NOT_FOUND,
    }
}

#[async_trait::async_trait]
impl ContentRepository for FakeRepository {
    async fn list_records(
        &self,
        database: &DatabaseId,
    ) -> Result<Vec<Option<PageRecord>>, AppError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.databases.get(database).cloned().unwrap_or_default())
    }

    async fn get_record(&self, page: &PageId) -> Result<PageRecord, AppError> {
        self.databases
            .values()
            .flatten()
            .flatten()
            .find(|record| &record.id == page)
            .cloned()
            .ok_or_else(|| not_found(page.as_str()))
    }

    async fn get_block_tree(&self, page: &PageId) -> Result<Vec<Block>, AppError> {
        self.bodies
            .get(page)
            .cloned()
            .ok_or_else(|| not_found(page.as_str()))
    }
}

pub fn paragraph(text: &str) -> Block {
    Block::Paragraph(ParagraphBlock {
        common: BlockCommon::default(),
        content: TextBlockContent::new(vec![RichTextItem::plain_text(text)]),
    })
}

/// A record with id `n` repeated to 32 hex digits.
pub fn record(n: char, title: &str, tags: &[&str]) -> PageRecord {
    let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    PageRecord {
        id: page_id(n),
        title: vec![RichTextItem::plain_text(title)],
        cover_url: Some(format!("https://img.example.com/{}.png", n)),
        tags: tags.iter().map(|name| Tag::new(*name, *name)).collect(),
        created_time: at,
        last_edited_time: at,
    }
}

pub fn page_id(n: char) -> PageId {
    PageId::parse(&n.to_string().repeat(32)).unwrap()
}

/// Two genres: `ai` (the default) and `tech`.
pub fn genres() -> GenreTable {
    GenreTable::new(
        vec![
            Genre::new("ai", "AI", DatabaseId::parse(AI_DB).unwrap()),
            Genre::new("tech", "Tech", DatabaseId::parse(TECH_DB).unwrap()),
        ],
        "ai",
    )
    .unwrap()
}
