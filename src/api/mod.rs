// src/api/mod.rs
//! Content retrieval: the repository seam the site is built against and its
//! Notion implementation.

pub mod client;
pub mod notion_client_adapter;
pub mod parser;
mod responses;
mod simple_pagination;
mod types;

use crate::error::AppError;
use crate::model::{Block, PageRecord};
use crate::types::{DatabaseId, PageId};

/// The ability to read blog content from the content store.
///
/// The site assembler depends on this trait, never on HTTP details, so a
/// fake can stand in for Notion in tests.
#[async_trait::async_trait]
pub trait ContentRepository: Send + Sync {
    /// Every row of a genre database. Rows that could not be read are `None`.
    async fn list_records(&self, database: &DatabaseId)
        -> Result<Vec<Option<PageRecord>>, AppError>;

    async fn get_record(&self, page: &PageId) -> Result<PageRecord, AppError>;

    /// The page's content as a tree, with list runs grouped.
    async fn get_block_tree(&self, page: &PageId) -> Result<Vec<Block>, AppError>;
}

pub use client::{extract_response_text, ApiResponse, NotionHttpClient};
pub use types::{PaginatedResponse, PaginationResult};
