// src/formatting/block_renderer.rs
//! Block rendering engine: converts content blocks to HTML.
//!
//! Rendering is a pure, structurally recursive function of the block tree.
//! Every block yields exactly one markup node, in input order; kinds the site
//! does not draw yield a visible placeholder instead of an error.

use super::embed::{is_social_embed, tweet_id};
use super::rich_text::{html_escape, render_rich_text};
use crate::constants::CHARS_PER_BLOCK_ESTIMATE;
use crate::model::*;
use crate::site::Route;
use crate::types::{plain_text_of, Markup, RichTextItem};

/// Context passed through the rendering pipeline.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Genre of the page being rendered; page mentions link within it.
    pub genre: &'a str,
}

impl<'a> RenderContext<'a> {
    pub fn new(genre: &'a str) -> Self {
        Self { genre }
    }
}

/// Trait for rendering blocks into markup.
pub trait BlockRenderer {
    /// Render one block, including its children.
    fn render_block(&self, block: &Block) -> Markup;

    /// Render sibling blocks in order, one node per block.
    fn render_children(&self, blocks: &[Block]) -> Vec<Markup> {
        blocks.iter().map(|block| self.render_block(block)).collect()
    }
}

/// Renders blocks as HTML.
pub struct HtmlBlockRenderer<'a> {
    context: RenderContext<'a>,
}

impl<'a> HtmlBlockRenderer<'a> {
    pub fn new(context: RenderContext<'a>) -> Self {
        Self { context }
    }

    fn children_html(&self, blocks: &[Block]) -> String {
        self.render_children(blocks)
            .into_iter()
            .map(Markup::into_string)
            .collect()
    }

    fn render_paragraph(&self, p: &ParagraphBlock) -> String {
        let spans = &p.content.rich_text;
        if spans.len() > 1 {
            if let Some(page) = spans[0].mentioned_page() {
                let href = Route::detail(self.context.genre, page.clone()).path();
                return format!(
                    "<p><a href=\"{}\">{}</a></p>",
                    html_escape(&href),
                    html_escape(&spans[0].plain_text)
                );
            }
        }
        format!("<p>{}</p>", render_rich_text(spans))
    }

    fn render_heading(&self, level: u8, content: &TextBlockContent) -> String {
        let class = match level {
            1 => "display-3",
            2 => "display-4",
            _ => "display-6",
        };
        format!(
            "<h{level} class=\"{class}\">{}</h{level}>",
            render_rich_text(&content.rich_text)
        )
    }

    /// A list item's nested list is ordered or unordered according to its
    /// first child only; later children of the other kind are drawn inside
    /// that same list.
    fn render_list_item(&self, content: &TextBlockContent, children: &[Block]) -> String {
        let nested = match children.first() {
            None => String::new(),
            Some(first) => {
                let tag = if matches!(first, Block::NumberedListItem(_)) {
                    "ol"
                } else {
                    "ul"
                };
                format!("<{tag}>{}</{tag}>", self.children_html(children))
            }
        };
        format!("<li>{}{}</li>", render_rich_text(&content.rich_text), nested)
    }

    fn render_to_do(&self, b: &ToDoBlock) -> String {
        let id = html_escape(b.common.id.as_str());
        format!(
            "<div><label for=\"{id}\"><input type=\"checkbox\" id=\"{id}\"{}> {}</label></div>",
            if b.checked { " checked" } else { "" },
            render_rich_text(&b.content.rich_text)
        )
    }

    fn render_image(&self, b: &ImageBlock) -> String {
        let caption = first_plain_text(&b.caption);
        format!(
            "<figure><img src=\"{}\" alt=\"{}\" style=\"width: 100%\">{}</figure>",
            html_escape(b.image.url()),
            html_escape(caption),
            figcaption(caption)
        )
    }

    fn render_file(&self, b: &FileBlock) -> String {
        let url = b.file.url();
        let name = url
            .rsplit('/')
            .next()
            .and_then(|last| last.split('?').next())
            .unwrap_or(url);
        let caption = first_plain_text(&b.caption);
        format!(
            "<figure><div class=\"file\">📎 <a href=\"{}\">{}</a></div>{}</figure>",
            html_escape(url),
            html_escape(name),
            figcaption(caption)
        )
    }

    fn render_table(&self, b: &TableBlock) -> String {
        let rows: String = b
            .common
            .children
            .iter()
            .enumerate()
            .map(|(i, child)| match child {
                Block::TableRow(row) => {
                    let cell_tag = if b.has_column_header && i == 0 {
                        "th"
                    } else {
                        "td"
                    };
                    render_row(row, cell_tag)
                }
                other => self.render_block(other).into_string(),
            })
            .collect();
        format!("<table><tbody>{}</tbody></table>", rows)
    }

    fn render_embed(&self, b: &EmbedBlock) -> String {
        if is_social_embed(&b.url) {
            if let Some(id) = tweet_id(&b.url) {
                let id = html_escape(&id);
                return format!(
                    "<blockquote class=\"twitter-tweet\" data-tweet-id=\"{id}\"><a href=\"https://twitter.com/i/status/{id}\"></a></blockquote>"
                );
            }
            log::debug!("No tweet id in embed {}, linking instead", b.url);
        }
        external_link(&b.url)
    }
}

impl BlockRenderer for HtmlBlockRenderer<'_> {
    fn render_block(&self, block: &Block) -> Markup {
        let html = match block {
            Block::Paragraph(p) => self.render_paragraph(p),
            Block::Heading(h) => self.render_heading(h.level, &h.content),
            Block::BulletedList(list) => {
                format!("<ul>{}</ul>", self.children_html(&list.common.children))
            }
            Block::NumberedList(list) => {
                format!("<ol>{}</ol>", self.children_html(&list.common.children))
            }
            Block::BulletedListItem(item) => {
                self.render_list_item(&item.content, &item.common.children)
            }
            Block::NumberedListItem(item) => {
                self.render_list_item(&item.content, &item.common.children)
            }
            Block::ToDo(b) => self.render_to_do(b),
            Block::Toggle(b) => format!(
                "<details><summary>{}</summary>{}</details>",
                render_rich_text(&b.content.rich_text),
                self.children_html(&b.common.children)
            ),
            Block::ChildPage(b) => format!(
                "<div class=\"child-page\"><strong>{}</strong>{}</div>",
                html_escape(&b.title),
                self.children_html(&b.common.children)
            ),
            Block::Image(b) => self.render_image(b),
            Block::Divider(_) => "<hr>".to_string(),
            Block::Quote(b) => format!(
                "<blockquote>{}</blockquote>",
                html_escape(&plain_text_of(&b.content.rich_text))
            ),
            Block::Code(b) => format!(
                "<pre><code class=\"language-{}\">{}</code></pre>",
                html_escape(&b.language),
                html_escape(first_plain_text(&b.content.rich_text))
            ),
            Block::File(b) => self.render_file(b),
            Block::Bookmark(b) => external_link(&b.url),
            Block::Table(b) => self.render_table(b),
            Block::TableRow(row) => render_row(row, "td"),
            Block::ColumnList(b) => format!(
                "<div class=\"row\">{}</div>",
                self.children_html(&b.common.children)
            ),
            Block::Column(b) => format!(
                "<div class=\"col\">{}</div>",
                self.children_html(&b.common.children)
            ),
            Block::Embed(b) => self.render_embed(b),
            Block::Unsupported(b) => {
                log::debug!("Placeholder for unsupported block {} ({})", b.common.id, b.block_type);
                unsupported_placeholder(&b.block_type)
            }
        };
        Markup::new(html)
    }
}

fn render_row(row: &TableRowBlock, cell_tag: &str) -> String {
    let cells: String = row
        .cells
        .iter()
        .map(|cell| format!("<{cell_tag}>{}</{cell_tag}>", render_rich_text(cell)))
        .collect();
    format!("<tr>{}</tr>", cells)
}

fn external_link(url: &str) -> String {
    let url = html_escape(url);
    format!("<a href=\"{url}\" target=\"_blank\" class=\"bookmark\">{url}</a>")
}

fn first_plain_text(items: &[RichTextItem]) -> &str {
    items.first().map(|item| item.plain_text.as_str()).unwrap_or("")
}

fn figcaption(caption: &str) -> String {
    if caption.is_empty() {
        String::new()
    } else {
        format!("<figcaption>{}</figcaption>", html_escape(caption))
    }
}

fn unsupported_placeholder(block_type: &str) -> String {
    let reason = if block_type == "unsupported" {
        "unsupported by Notion API"
    } else {
        block_type
    };
    html_escape(&format!("❌ Unsupported block ({})", reason))
}

// --- Public API ---

/// Renders a sequence of blocks, one markup node per block, in order.
pub fn render_blocks(blocks: &[Block], context: &RenderContext) -> Vec<Markup> {
    log::debug!("Rendering {} blocks for genre {}", blocks.len(), context.genre);
    HtmlBlockRenderer::new(*context).render_children(blocks)
}

/// Renders a page body into a single fragment.
pub fn render_document(blocks: &[Block], context: &RenderContext) -> Markup {
    let mut output = String::with_capacity(blocks.len() * CHARS_PER_BLOCK_ESTIMATE);
    for markup in render_blocks(blocks, context) {
        output.push_str(markup.as_str());
    }
    Markup::new(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PageId;

    fn ctx() -> RenderContext<'static> {
        RenderContext::new("tech")
    }

    fn render(block: &Block) -> String {
        HtmlBlockRenderer::new(ctx()).render_block(block).into_string()
    }

    fn text(s: &str) -> TextBlockContent {
        TextBlockContent::new(vec![RichTextItem::plain_text(s)])
    }

    fn bullet(s: &str, children: Vec<Block>) -> Block {
        Block::BulletedListItem(BulletedListItemBlock {
            common: BlockCommon::default().with_children(children),
            content: text(s),
        })
    }

    fn numbered(s: &str, children: Vec<Block>) -> Block {
        Block::NumberedListItem(NumberedListItemBlock {
            common: BlockCommon::default().with_children(children),
            content: text(s),
        })
    }

    #[test]
    fn test_empty_paragraph() {
        let block = Block::Paragraph(ParagraphBlock::default());
        assert_eq!(render(&block), "<p></p>");
    }

    #[test]
    fn test_page_mention_short_circuits_paragraph() {
        let page = PageId::parse("0123456789abcdef0123456789abcdef").unwrap();
        let block = Block::Paragraph(ParagraphBlock {
            common: BlockCommon::default(),
            content: TextBlockContent::new(vec![
                RichTextItem::page_mention(page, "Related post"),
                RichTextItem::plain_text(" and more"),
            ]),
        });
        assert_eq!(
            render(&block),
            "<p><a href=\"/blog/tech/detail/01234567-89ab-cdef-0123-456789abcdef\">Related post</a></p>"
        );
    }

    #[test]
    fn test_lone_page_mention_renders_normally() {
        let page = PageId::parse("0123456789abcdef0123456789abcdef").unwrap();
        let block = Block::Paragraph(ParagraphBlock {
            common: BlockCommon::default(),
            content: TextBlockContent::new(vec![RichTextItem::page_mention(page, "Alone")]),
        });
        assert_eq!(render(&block), "<p>Alone</p>");
    }

    #[test]
    fn test_nested_list_kind_comes_from_first_child() {
        let item = bullet("parent", vec![numbered("one", vec![]), bullet("stray", vec![])]);
        assert_eq!(
            render(&item),
            "<li>parent<ol><li>one</li><li>stray</li></ol></li>"
        );
    }

    #[test]
    fn test_headings_carry_display_classes() {
        let h2 = Block::Heading(HeadingBlock {
            common: BlockCommon::default(),
            content: text("Section"),
            level: 2,
        });
        assert_eq!(render(&h2), "<h2 class=\"display-4\">Section</h2>");
    }

    #[test]
    fn test_code_uses_first_span() {
        let code = Block::Code(CodeBlock {
            common: BlockCommon::default(),
            content: TextBlockContent::new(vec![
                RichTextItem::plain_text("let x = 1 < 2;"),
                RichTextItem::plain_text("ignored"),
            ]),
            language: "rust".to_string(),
            caption: vec![],
        });
        assert_eq!(
            render(&code),
            "<pre><code class=\"language-rust\">let x = 1 &lt; 2;</code></pre>"
        );
    }

    #[test]
    fn test_file_link_text_is_last_segment_without_query() {
        let file = Block::File(FileBlock {
            common: BlockCommon::default(),
            file: FileObject::external("https://files.example.com/a/report.pdf?sig=abc"),
            caption: vec![RichTextItem::plain_text("Q3")],
        });
        assert_eq!(
            render(&file),
            "<figure><div class=\"file\">📎 <a href=\"https://files.example.com/a/report.pdf?sig=abc\">report.pdf</a></div><figcaption>Q3</figcaption></figure>"
        );
    }

    #[test]
    fn test_unsupported_placeholders() {
        let named = Block::Unsupported(UnsupportedBlock {
            common: BlockCommon::default(),
            block_type: "callout".to_string(),
        });
        assert_eq!(render(&named), "❌ Unsupported block (callout)");

        let api = Block::Unsupported(UnsupportedBlock {
            common: BlockCommon::default(),
            block_type: "unsupported".to_string(),
        });
        assert_eq!(render(&api), "❌ Unsupported block (unsupported by Notion API)");
    }

    #[test]
    fn test_social_embed_without_id_falls_back_to_link() {
        let embed = Block::Embed(EmbedBlock {
            common: BlockCommon::default(),
            url: "https://twitter.com/user".to_string(),
        });
        assert_eq!(
            render(&embed),
            "<a href=\"https://twitter.com/user\" target=\"_blank\" class=\"bookmark\">https://twitter.com/user</a>"
        );
    }
}
