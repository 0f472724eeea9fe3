//! Folding runs of list items into list containers.

use super::blocks::{BulletedListBlock, NumberedListBlock};
use super::common::BlockCommon;
use super::Block;

/// Groups each run of consecutive same-kind list items under a synthetic
/// `BulletedList` / `NumberedList` container. All other blocks pass
/// through in order.
///
/// Only sibling sequences are grouped; the children of the items are left
/// as they are.
pub fn group_list_items(blocks: Vec<Block>) -> Vec<Block> {
    let mut grouped: Vec<Block> = Vec::with_capacity(blocks.len());

    for block in blocks {
        match block {
            Block::BulletedListItem(_) => {
                if let Some(Block::BulletedList(list)) = grouped.last_mut() {
                    list.common.children.push(block);
                    continue;
                }
                let common = BlockCommon::new(block.id().clone()).with_children(vec![block]);
                grouped.push(Block::BulletedList(BulletedListBlock { common }));
            }
            Block::NumberedListItem(_) => {
                if let Some(Block::NumberedList(list)) = grouped.last_mut() {
                    list.common.children.push(block);
                    continue;
                }
                let common = BlockCommon::new(block.id().clone()).with_children(vec![block]);
                grouped.push(Block::NumberedList(NumberedListBlock { common }));
            }
            other => grouped.push(other),
        }
    }

    grouped
}
