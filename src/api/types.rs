// src/api/types.rs
//! Wire-level shapes shared by the request and parsing halves of the API
//! module.

use serde::{Deserialize, Serialize};

/// One page of a cursor-paginated Notion listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub object: String,
    pub results: Vec<T>,
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

/// Every item collected by walking a listing to its end.
#[derive(Debug, Clone)]
pub struct PaginationResult<T> {
    pub items: Vec<T>,
    pub pages_fetched: u32,
}
