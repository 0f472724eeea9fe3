use super::blocks::*;
use super::common::BlockCommon;
use crate::types::BlockId;
use serde::{Deserialize, Serialize};

/// Macro to reduce boilerplate in Block enum methods
macro_rules! match_all_blocks {
    ($self:expr, $pattern:pat => $result:expr) => {
        match $self {
            Block::Paragraph($pattern) => $result,
            Block::Heading($pattern) => $result,
            Block::BulletedList($pattern) => $result,
            Block::NumberedList($pattern) => $result,
            Block::BulletedListItem($pattern) => $result,
            Block::NumberedListItem($pattern) => $result,
            Block::ToDo($pattern) => $result,
            Block::Toggle($pattern) => $result,
            Block::ChildPage($pattern) => $result,
            Block::Image($pattern) => $result,
            Block::Divider($pattern) => $result,
            Block::Quote($pattern) => $result,
            Block::Code($pattern) => $result,
            Block::File($pattern) => $result,
            Block::Bookmark($pattern) => $result,
            Block::Table($pattern) => $result,
            Block::TableRow($pattern) => $result,
            Block::ColumnList($pattern) => $result,
            Block::Column($pattern) => $result,
            Block::Embed($pattern) => $result,
            Block::Unsupported($pattern) => $result,
        }
    };
}

/// One unit of page content, tagged by kind.
///
/// `BulletedList` and `NumberedList` do not exist in Notion; they are the
/// containers that consecutive list items are grouped under after fetching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Block {
    Paragraph(ParagraphBlock),
    Heading(HeadingBlock),
    BulletedList(BulletedListBlock),
    NumberedList(NumberedListBlock),
    BulletedListItem(BulletedListItemBlock),
    NumberedListItem(NumberedListItemBlock),
    ToDo(ToDoBlock),
    Toggle(ToggleBlock),
    ChildPage(ChildPageBlock),
    Image(ImageBlock),
    Divider(DividerBlock),
    Quote(QuoteBlock),
    Code(CodeBlock),
    File(FileBlock),
    Bookmark(BookmarkBlock),
    Table(TableBlock),
    TableRow(TableRowBlock),
    ColumnList(ColumnListBlock),
    Column(ColumnBlock),
    Embed(EmbedBlock),
    Unsupported(UnsupportedBlock),
}

impl Block {
    pub fn id(&self) -> &BlockId {
        match_all_blocks!(self, b => &b.common.id)
    }

    pub fn children(&self) -> &[Block] {
        match_all_blocks!(self, b => &b.common.children)
    }

    /// Whether Notion reported nested content under this block.
    pub fn has_children(&self) -> bool {
        self.common().has_children
    }

    pub fn common(&self) -> &BlockCommon {
        match_all_blocks!(self, b => &b.common)
    }

    pub fn common_mut(&mut self) -> &mut BlockCommon {
        match_all_blocks!(self, b => &mut b.common)
    }

    pub fn set_children(&mut self, children: Vec<Block>) {
        self.common_mut().children = children;
    }

    pub fn is_list_item(&self) -> bool {
        matches!(self, Block::BulletedListItem(_) | Block::NumberedListItem(_))
    }

    /// The Notion type tag of the block.
    pub fn block_type(&self) -> &str {
        match self {
            Block::Paragraph(_) => "paragraph",
            Block::Heading(h) => match h.level {
                1 => "heading_1",
                2 => "heading_2",
                _ => "heading_3",
            },
            Block::BulletedList(_) => "bulleted_list",
            Block::NumberedList(_) => "numbered_list",
            Block::BulletedListItem(_) => "bulleted_list_item",
            Block::NumberedListItem(_) => "numbered_list_item",
            Block::ToDo(_) => "to_do",
            Block::Toggle(_) => "toggle",
            Block::ChildPage(_) => "child_page",
            Block::Image(_) => "image",
            Block::Divider(_) => "divider",
            Block::Quote(_) => "quote",
            Block::Code(_) => "code",
            Block::File(_) => "file",
            Block::Bookmark(_) => "bookmark",
            Block::Table(_) => "table",
            Block::TableRow(_) => "table_row",
            Block::ColumnList(_) => "column_list",
            Block::Column(_) => "column",
            Block::Embed(_) => "embed",
            Block::Unsupported(b) => &b.block_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_reports_its_notion_type() {
        let block = Block::Unsupported(UnsupportedBlock {
            common: BlockCommon::default(),
            block_type: "callout".to_string(),
        });
        assert_eq!(block.block_type(), "callout");
        assert!(!block.is_list_item());
    }

    #[test]
    fn test_set_children_replaces_nested_blocks() {
        let mut toggle = Block::Toggle(ToggleBlock {
            common: BlockCommon::default(),
            content: TextBlockContent::default(),
        });
        toggle.set_children(vec![Block::Divider(DividerBlock {
            common: BlockCommon::default(),
        })]);
        assert_eq!(toggle.children().len(), 1);
        assert_eq!(toggle.children()[0].block_type(), "divider");
    }
}
