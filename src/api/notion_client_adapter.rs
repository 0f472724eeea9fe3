// src/api/notion_client_adapter.rs
//! Adapter layer converting notion-client types into the content model.

use crate::constants::{COVER_IMAGE_PROPERTY, TAGS_PROPERTY, TITLE_PROPERTY};
use crate::error::{AppError, NotionClientError};
use crate::model::blocks::*;
use crate::model::common::BlockCommon;
use crate::model::{Block, PageRecord, Tag};
use crate::types::{
    Annotations, BlockId, Color, Link, MentionType, PageId, RichTextItem, RichTextType,
};
use notion_client::objects::block::BlockType;
use notion_client::objects::page::PageProperty;
use std::collections::HashMap;

/// Convert a database row into a post record.
///
/// The title comes from the `Name` property, or from whichever property is
/// the title when `Name` is absent.
pub fn convert_page_record(
    notion_page: notion_client::objects::page::Page,
) -> Result<PageRecord, AppError> {
    let id = PageId::parse(&notion_page.id)?;
    let mut properties = notion_page.properties;

    let title = take_title(&mut properties)?;
    let cover_url = properties
        .remove(COVER_IMAGE_PROPERTY)
        .and_then(extract_cover_url);
    let tags = match properties.remove(TAGS_PROPERTY) {
        Some(PageProperty::MultiSelect { multi_select, .. }) => multi_select
            .into_iter()
            .filter_map(|option| {
                let name = option.name?;
                Some(Tag::new(option.id.unwrap_or_else(|| name.clone()), name))
            })
            .collect(),
        _ => Vec::new(),
    };

    Ok(PageRecord {
        id,
        title,
        cover_url,
        tags,
        created_time: notion_page.created_time,
        last_edited_time: notion_page.last_edited_time,
    })
}

fn take_title(
    properties: &mut HashMap<String, PageProperty>,
) -> Result<Vec<RichTextItem>, AppError> {
    let key = match properties.get(TITLE_PROPERTY) {
        Some(PageProperty::Title { .. }) => Some(TITLE_PROPERTY.to_string()),
        _ => properties
            .iter()
            .find(|(_, property)| matches!(property, PageProperty::Title { .. }))
            .map(|(name, _)| name.clone()),
    };

    match key.and_then(|key| properties.remove(&key)) {
        Some(PageProperty::Title { title, .. }) => convert_rich_text_array(title),
        _ => Err(NotionClientError::ConversionError {
            message: "Page has no title property".to_string(),
        }
        .into()),
    }
}

/// A cover is either a URL property or the first entry of a files property.
fn extract_cover_url(property: PageProperty) -> Option<String> {
    match property {
        PageProperty::Url { url, .. } => url.filter(|url| !url.is_empty()),
        PageProperty::Files { files, .. } => files
            .into_iter()
            .next()
            .map(|file| convert_file_object(file.file).url().to_string()),
        _ => None,
    }
}

/// Convert notion-client Block to our domain Block
pub fn convert_block(
    notion_block: notion_client::objects::block::Block,
) -> Result<Block, AppError> {
    let common = convert_block_common(&notion_block)?;

    let block = match notion_block.block_type {
        BlockType::Paragraph { paragraph } => Block::Paragraph(ParagraphBlock {
            common,
            content: convert_text_block_content(paragraph.rich_text, paragraph.color)?,
        }),

        BlockType::Heading1 { heading_1 } => Block::Heading(HeadingBlock {
            common,
            content: convert_text_block_content(heading_1.rich_text, heading_1.color)?,
            level: 1,
        }),
        BlockType::Heading2 { heading_2 } => Block::Heading(HeadingBlock {
            common,
            content: convert_text_block_content(heading_2.rich_text, heading_2.color)?,
            level: 2,
        }),
        BlockType::Heading3 { heading_3 } => Block::Heading(HeadingBlock {
            common,
            content: convert_text_block_content(heading_3.rich_text, heading_3.color)?,
            level: 3,
        }),

        BlockType::BulletedListItem { bulleted_list_item } => {
            Block::BulletedListItem(BulletedListItemBlock {
                common,
                content: convert_text_block_content(
                    bulleted_list_item.rich_text,
                    Some(bulleted_list_item.color),
                )?,
            })
        }

        BlockType::NumberedListItem { numbered_list_item } => {
            Block::NumberedListItem(NumberedListItemBlock {
                common,
                content: convert_text_block_content(
                    numbered_list_item.rich_text,
                    Some(numbered_list_item.color),
                )?,
            })
        }

        BlockType::ToDo { to_do } => Block::ToDo(ToDoBlock {
            common,
            content: convert_text_block_content(to_do.rich_text, to_do.color)?,
            checked: to_do.checked.unwrap_or(false),
        }),

        BlockType::Toggle { toggle } => Block::Toggle(ToggleBlock {
            common,
            content: convert_text_block_content(toggle.rich_text, Some(toggle.color))?,
        }),

        BlockType::Quote { quote } => Block::Quote(QuoteBlock {
            common,
            content: convert_text_block_content(quote.rich_text, Some(quote.color))?,
        }),

        BlockType::Code { code } => Block::Code(CodeBlock {
            common,
            content: convert_text_block_content(code.rich_text, None)?,
            language: code_language_name(&format!("{:?}", code.language)),
            caption: convert_rich_text_array(code.caption)?,
        }),

        BlockType::Divider { .. } => Block::Divider(DividerBlock { common }),

        BlockType::Bookmark { bookmark } => Block::Bookmark(BookmarkBlock {
            common,
            url: bookmark.url,
            caption: convert_rich_text_array(bookmark.caption)?,
        }),

        BlockType::Embed { embed } => Block::Embed(EmbedBlock {
            common,
            url: embed.url,
        }),

        BlockType::ChildPage { child_page } => Block::ChildPage(ChildPageBlock {
            common,
            title: child_page.title,
        }),

        BlockType::Image { image } => Block::Image(ImageBlock {
            common,
            image: convert_file_object(image.file_type),
            // notion-client's image value carries no caption
            caption: Vec::new(),
        }),

        BlockType::File { file } => Block::File(FileBlock {
            common,
            file: convert_file_object(file.file_type),
            caption: convert_rich_text_array(file.caption)?,
        }),

        BlockType::Table { table } => Block::Table(TableBlock {
            common,
            table_width: table.table_width as usize,
            has_column_header: table.has_column_header,
            has_row_header: table.has_row_header,
        }),

        BlockType::TableRow { table_row } => Block::TableRow(TableRowBlock {
            common,
            cells: table_row
                .cells
                .into_iter()
                .map(convert_rich_text_array)
                .collect::<Result<Vec<_>, _>>()?,
        }),

        BlockType::ColumnList { .. } => Block::ColumnList(ColumnListBlock { common }),

        BlockType::Column { .. } => Block::Column(ColumnBlock { common }),

        other => {
            let block_type = unsupported_type_name(&other).to_string();
            log::debug!("Block {} has unrendered type {}", common.id, block_type);
            Block::Unsupported(UnsupportedBlock { common, block_type })
        }
    };

    Ok(block)
}

/// The Notion type tag of a block kind the site does not render.
fn unsupported_type_name(block_type: &BlockType) -> &'static str {
    match block_type {
        BlockType::Breadcrumb { .. } => "breadcrumb",
        BlockType::TableOfContents { .. } => "table_of_contents",
        BlockType::Equation { .. } => "equation",
        BlockType::Video { .. } => "video",
        BlockType::Pdf { .. } => "pdf",
        BlockType::Callout { .. } => "callout",
        BlockType::LinkToPage { .. } => "link_to_page",
        BlockType::SyncedBlock { .. } => "synced_block",
        BlockType::Template { .. } => "template",
        BlockType::LinkPreview { .. } => "link_preview",
        BlockType::ChildDatabase { .. } => "child_database",
        _ => "unsupported",
    }
}

/// notion-client spells languages as enum variants (`Rust`, `JavaScript`,
/// `PlainText`); highlighters expect Notion's lowercase names.
fn code_language_name(variant: &str) -> String {
    match variant {
        "PlainText" => "plain text".to_string(),
        other => other.to_lowercase(),
    }
}

fn convert_block_common(
    notion_block: &notion_client::objects::block::Block,
) -> Result<BlockCommon, AppError> {
    let id = BlockId::parse(notion_block.id.as_deref().ok_or_else(|| {
        NotionClientError::ConversionError {
            message: "Block missing required ID field".to_string(),
        }
    })?)?;

    Ok(BlockCommon {
        id,
        children: Vec::new(),
        has_children: notion_block.has_children.unwrap_or(false),
    })
}

fn convert_text_block_content(
    rich_text: Vec<notion_client::objects::rich_text::RichText>,
    color: Option<notion_client::objects::block::TextColor>,
) -> Result<TextBlockContent, AppError> {
    Ok(TextBlockContent {
        rich_text: convert_rich_text_array(rich_text)?,
        color: convert_block_color(
            color.unwrap_or(notion_client::objects::block::TextColor::Default),
        ),
    })
}

fn convert_rich_text_array(
    rich_texts: Vec<notion_client::objects::rich_text::RichText>,
) -> Result<Vec<RichTextItem>, AppError> {
    rich_texts.into_iter().map(convert_rich_text).collect()
}

fn convert_rich_text(
    rich_text: notion_client::objects::rich_text::RichText,
) -> Result<RichTextItem, AppError> {
    use notion_client::objects::rich_text::RichText as NcRichText;

    let item = match rich_text {
        NcRichText::Text {
            text,
            annotations,
            plain_text,
            href,
        } => RichTextItem {
            plain_text: plain_text.unwrap_or_else(|| text.content.clone()),
            text_type: RichTextType::Text {
                content: text.content,
                link: text.link.map(|link| Link { url: link.url }),
            },
            annotations: convert_annotations(annotations.unwrap_or_default()),
            href,
        },

        NcRichText::Mention {
            mention,
            annotations,
            plain_text,
            href,
        } => {
            let mention_type = convert_mention(mention).unwrap_or_else(|e| {
                log::debug!("Falling back to a link mention: {}", e);
                MentionType::Link {
                    url: href.clone().unwrap_or_default(),
                }
            });
            RichTextItem {
                text_type: RichTextType::Mention(mention_type),
                annotations: convert_annotations(annotations),
                plain_text,
                href,
            }
        }

        NcRichText::Equation {
            equation,
            annotations,
            plain_text,
            href,
        } => RichTextItem {
            text_type: RichTextType::Equation {
                expression: equation.expression,
            },
            annotations: convert_annotations(annotations),
            plain_text,
            href,
        },

        _ => {
            log::debug!("Unsupported rich text type, rendering as empty text");
            RichTextItem::plain_text("")
        }
    };

    Ok(item)
}

fn convert_annotations(annotations: notion_client::objects::rich_text::Annotations) -> Annotations {
    Annotations {
        bold: annotations.bold,
        italic: annotations.italic,
        strikethrough: annotations.strikethrough,
        underline: annotations.underline,
        code: annotations.code,
        color: convert_rich_text_color(annotations.color),
    }
}

fn convert_mention(
    mention: notion_client::objects::rich_text::Mention,
) -> Result<MentionType, AppError> {
    use notion_client::objects::rich_text::Mention as NcMention;

    match mention {
        NcMention::User { user } => Ok(MentionType::User {
            id: user.id,
            name: user.name,
        }),
        NcMention::Page { page } => Ok(MentionType::Page {
            id: PageId::parse(&page.id)?,
        }),
        NcMention::Database { database } => Ok(MentionType::Database { id: database.id }),
        NcMention::Date { date } => Ok(MentionType::Date {
            start: date.start.naive_utc().date(),
            end: date.end.map(|end| end.naive_utc().date()),
        }),
        NcMention::LinkPreview { link_preview } => Ok(MentionType::LinkPreview {
            url: link_preview.url,
        }),
        _ => Err(NotionClientError::ConversionError {
            message: "Unsupported mention type".to_string(),
        }
        .into()),
    }
}

fn convert_file_object(file: notion_client::objects::file::File) -> FileObject {
    use notion_client::objects::file::File as NcFile;

    match file {
        NcFile::External { external } => FileObject::External {
            external: ExternalFile { url: external.url },
        },
        NcFile::File { file } => FileObject::File {
            file: NotionFile {
                url: file.url,
                expiry_time: Some(file.expiry_time),
            },
        },
    }
}

/// Generates a conversion from a Notion color enum to our Color, keeping
/// background colors distinct from foreground ones.
macro_rules! impl_color_conversion {
    ($fn_name:ident, $source:ty) => {
        fn $fn_name(color: $source) -> Color {
            match color {
                <$source>::Default => Color::Default,
                <$source>::Gray => Color::Gray,
                <$source>::Brown => Color::Brown,
                <$source>::Orange => Color::Orange,
                <$source>::Yellow => Color::Yellow,
                <$source>::Green => Color::Green,
                <$source>::Blue => Color::Blue,
                <$source>::Purple => Color::Purple,
                <$source>::Pink => Color::Pink,
                <$source>::Red => Color::Red,
                <$source>::GrayBackground => Color::GrayBackground,
                <$source>::BrownBackground => Color::BrownBackground,
                <$source>::OrangeBackground => Color::OrangeBackground,
                <$source>::YellowBackground => Color::YellowBackground,
                <$source>::GreenBackground => Color::GreenBackground,
                <$source>::BlueBackground => Color::BlueBackground,
                <$source>::PurpleBackground => Color::PurpleBackground,
                <$source>::PinkBackground => Color::PinkBackground,
                <$source>::RedBackground => Color::RedBackground,
            }
        }
    };
}

impl_color_conversion!(convert_block_color, notion_client::objects::block::TextColor);
impl_color_conversion!(
    convert_rich_text_color,
    notion_client::objects::rich_text::TextColor
);
