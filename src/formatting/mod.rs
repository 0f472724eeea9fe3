// src/formatting/mod.rs
//! Renders content blocks and rich text into HTML.

pub mod block_renderer;
mod embed;
mod rich_text;

pub use block_renderer::{
    render_blocks, render_document, BlockRenderer, HtmlBlockRenderer, RenderContext,
};
pub use embed::{is_social_embed, tweet_id};
pub use rich_text::{html_escape, render_rich_text, render_span};
