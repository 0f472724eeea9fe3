// src/api/responses.rs
//! Notion response payloads, deserialized with notion-client's types.

use super::types::PaginatedResponse;
use crate::error::AppError;
use crate::model::{Block, BlockCommon, UnsupportedBlock};
use crate::types::BlockId;

pub use notion_client::objects::{
    block::Block as NotionBlock, error::Error as NotionError, page::Page as NotionPage,
};

/// Block children listing. Blocks stay as raw JSON so that a block kind
/// notion-client does not know only affects that block.
pub type RetrieveBlockChildrenResponse = PaginatedResponse<serde_json::Value>;

/// Database query listing. Rows stay as raw JSON so that one row notion-client
/// cannot decode does not fail the whole page of results.
pub type QueryDatabaseResponse = PaginatedResponse<serde_json::Value>;

/// Conversion from a notion-client payload into the domain model.
pub trait ToDomain<T> {
    fn to_domain(self) -> Result<T, AppError>;
}

impl ToDomain<crate::model::PageRecord> for NotionPage {
    fn to_domain(self) -> Result<crate::model::PageRecord, AppError> {
        super::notion_client_adapter::convert_page_record(self)
    }
}

impl ToDomain<crate::model::Block> for NotionBlock {
    fn to_domain(self) -> Result<crate::model::Block, AppError> {
        super::notion_client_adapter::convert_block(self)
    }
}

impl PaginatedResponse<serde_json::Value> {
    /// Converts every block of a children listing. Archived blocks are
    /// dropped; a block that cannot be decoded becomes `Unsupported`.
    pub fn into_domain_blocks(self) -> Vec<Block> {
        self.results
            .into_iter()
            .filter(|raw| !is_archived(raw))
            .map(|raw| match decode_block(raw.clone()) {
                Ok(block) => block,
                Err(e) => {
                    log::warn!("Rendering block as unsupported: {}", e);
                    unsupported_from_raw(&raw)
                }
            })
            .collect()
    }

    /// Converts every row, turning the rows that fail into `None`.
    pub fn into_domain_records(self) -> Vec<Option<crate::model::PageRecord>> {
        self.results
            .into_iter()
            .map(|row| match decode_record(row) {
                Ok(record) => Some(record),
                Err(e) => {
                    log::warn!("Skipping database row that could not be read: {}", e);
                    None
                }
            })
            .collect()
    }
}

fn decode_record(row: serde_json::Value) -> Result<crate::model::PageRecord, AppError> {
    let page: NotionPage = serde_json::from_value(row)?;
    page.to_domain()
}

fn decode_block(raw: serde_json::Value) -> Result<Block, AppError> {
    let block: NotionBlock = serde_json::from_value(raw)?;
    block.to_domain()
}

fn is_archived(raw: &serde_json::Value) -> bool {
    raw.get("archived").and_then(serde_json::Value::as_bool) == Some(true)
}

/// An `Unsupported` block from the fields every Notion block carries. Without
/// a readable id the block keeps a synthetic one and its children are not
/// fetched.
fn unsupported_from_raw(raw: &serde_json::Value) -> Block {
    let block_type = raw
        .get("type")
        .and_then(serde_json::Value::as_str)
        .unwrap_or("unsupported")
        .to_string();
    let id = raw
        .get("id")
        .and_then(serde_json::Value::as_str)
        .and_then(|id| BlockId::parse(id).ok());

    let common = match id {
        Some(id) => BlockCommon {
            has_children: raw
                .get("has_children")
                .and_then(serde_json::Value::as_bool)
                .unwrap_or(false),
            ..BlockCommon::new(id)
        },
        None => BlockCommon::default(),
    };

    Block::Unsupported(UnsupportedBlock { common, block_type })
}
