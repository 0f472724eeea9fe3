//! The content model: block trees and blog post records.

mod block;
pub mod blocks;
pub mod common;
mod grouping;
mod record;

pub use block::Block;
pub use blocks::*;
pub use common::*;
pub use grouping::group_list_items;
pub use record::{GenreDatabase, PageRecord, Tag};
