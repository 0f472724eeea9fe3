// src/lib.rs
//! notion2blog library: builds a static, genre-grouped HTML blog from Notion databases.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `ValidationError`
//! - **Configuration**: `SiteConfig`, `CommandLineInput`
//! - **Domain model**: `Block`, `PageRecord`, `GenreDatabase`, `Tag`
//! - **Domain types**: `PageId`, `DatabaseId`, `ApiKey`, `Markup`, `RichTextItem`
//! - **Content store**: `ContentRepository`, `NotionHttpClient`
//! - **Rendering**: `render_blocks`, `HtmlBlockRenderer`, `RenderContext`
//! - **Site**: `Route`, `RouteAssembler`, `PageRenderer`, `SiteBuilder`

pub mod api;
mod config;
mod constants;
mod error;
pub mod formatting;
pub mod model;
pub mod output;
mod pipeline;
pub mod site;
pub mod types;

// --- Error Handling ---
pub use crate::error::{AppError, NotionClientError, NotionErrorCode};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{CommandLineInput, SiteConfig};

// --- Domain Model ---
pub use crate::model::{group_list_items, Block, BlockCommon, GenreDatabase, PageRecord, Tag};

// --- Domain Types ---
pub use crate::types::{
    Annotations, ApiKey, BlockId, Color, DatabaseId, Link, Markup, MentionType, PageId,
    RichTextItem, RichTextType,
};

// --- Content Store ---
pub use crate::api::{ContentRepository, NotionHttpClient};

// --- Rendering ---
pub use crate::formatting::{
    render_blocks, render_document, render_rich_text, BlockRenderer, HtmlBlockRenderer,
    RenderContext,
};

// --- Site ---
pub use crate::output::RevalidationLedger;
pub use crate::pipeline::{BuildOptions, BuildReport, SiteBuilder};
pub use crate::site::{GenreSnapshot, GenreTable, PageRenderer, Route, RouteAssembler};
