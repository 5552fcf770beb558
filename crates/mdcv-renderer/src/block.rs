//! Block tree parsed from a section body.
//!
//! The per-section rules operate on this tree rather than on rendered
//! HTML strings, so a rule is a structural transform instead of a
//! pattern substitution over markup.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};

/// Inline content inside a block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Code(String),
    Strong(Vec<Inline>),
    Emphasis(Vec<Inline>),
    Link { href: String, children: Vec<Inline> },
    SoftBreak,
    HardBreak,
}

/// Block-level element of a section body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, content: Vec<Inline> },
    Paragraph(Vec<Inline>),
    List { items: Vec<Vec<Inline>> },
}

impl Block {
    /// Plain text of the block's inline content, ignoring formatting.
    #[must_use]
    pub fn plain_text(&self) -> String {
        let inlines = match self {
            Self::Heading { content, .. } | Self::Paragraph(content) => content,
            Self::List { .. } => return String::new(),
        };
        plain_text(inlines)
    }
}

/// Concatenate the text content of inlines, ignoring formatting.
#[must_use]
pub(crate) fn plain_text(inlines: &[Inline]) -> String {
    let mut out = String::new();
    collect_text(inlines, &mut out);
    out
}

fn collect_text(inlines: &[Inline], out: &mut String) {
    for inline in inlines {
        match inline {
            Inline::Text(text) | Inline::Code(text) => out.push_str(text),
            Inline::Strong(children) | Inline::Emphasis(children) => collect_text(children, out),
            Inline::Link { children, .. } => collect_text(children, out),
            Inline::SoftBreak | Inline::HardBreak => out.push(' '),
        }
    }
}

fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Parse a section body into a block tree.
///
/// Only the markdown subset used by CV documents is represented:
/// headings, paragraphs, unordered/ordered lists, bold, emphasis,
/// links, inline code and line breaks. Other constructs (blockquotes,
/// code fences, images) contribute their text content to the enclosing
/// block so that nothing is lost, in keeping with the renderer's
/// graceful-degradation policy.
#[must_use]
pub fn parse_blocks(markdown: &str) -> Vec<Block> {
    let parser = Parser::new_ext(markdown, Options::empty());
    let mut builder = TreeBuilder::default();
    for event in parser {
        builder.process(event);
    }
    builder.finish()
}

/// Where inline content currently flows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Container {
    Paragraph,
    Heading(u8),
    ListItem,
}

#[derive(Default)]
struct TreeBuilder {
    blocks: Vec<Block>,
    /// Open inline frames for Strong/Emphasis/Link nesting. The frame
    /// at index 0 is the current block's direct content.
    frames: Vec<Frame>,
    container: Option<Container>,
    list_items: Vec<Vec<Inline>>,
    list_depth: usize,
}

enum Frame {
    Root(Vec<Inline>),
    Strong(Vec<Inline>),
    Emphasis(Vec<Inline>),
    Link { href: String, children: Vec<Inline> },
}

impl Frame {
    fn children_mut(&mut self) -> &mut Vec<Inline> {
        match self {
            Self::Root(children)
            | Self::Strong(children)
            | Self::Emphasis(children)
            | Self::Link { children, .. } => children,
        }
    }
}

impl TreeBuilder {
    fn process(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.push_inline(Inline::Text(text.into_string())),
            Event::Code(code) => self.push_inline(Inline::Code(code.into_string())),
            Event::SoftBreak => self.push_inline(Inline::SoftBreak),
            Event::HardBreak => self.push_inline(Inline::HardBreak),
            // Raw HTML in a CV body is treated as literal text.
            Event::Html(html) | Event::InlineHtml(html) => {
                self.push_inline(Inline::Text(html.into_string()));
            }
            _ => {}
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                // Paragraphs inside loose list items flow into the item.
                if self.list_depth == 0 {
                    self.open_block(Container::Paragraph);
                }
            }
            Tag::Heading { level, .. } => {
                self.open_block(Container::Heading(heading_level_to_num(level)));
            }
            Tag::List(_) => {
                // Nested lists flatten into the outer list's items.
                if self.list_depth == 0 {
                    self.flush_block();
                    self.list_items = Vec::new();
                }
                self.list_depth += 1;
            }
            Tag::Item => {
                if self.list_depth == 1 && self.frames.is_empty() {
                    self.frames.push(Frame::Root(Vec::new()));
                    self.container = Some(Container::ListItem);
                }
            }
            Tag::Strong => self.frames.push(Frame::Strong(Vec::new())),
            Tag::Emphasis => self.frames.push(Frame::Emphasis(Vec::new())),
            Tag::Link { dest_url, .. } => self.frames.push(Frame::Link {
                href: dest_url.into_string(),
                children: Vec::new(),
            }),
            _ => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                if self.list_depth == 0 {
                    self.flush_block();
                }
            }
            TagEnd::Heading(_) => self.flush_block(),
            TagEnd::Item => {
                if self.list_depth == 1
                    && let Some(Frame::Root(children)) = self.frames.pop()
                {
                    self.list_items.push(children);
                    self.container = None;
                }
            }
            TagEnd::List(_) => {
                self.list_depth = self.list_depth.saturating_sub(1);
                if self.list_depth == 0 {
                    self.blocks.push(Block::List {
                        items: std::mem::take(&mut self.list_items),
                    });
                }
            }
            TagEnd::Strong | TagEnd::Emphasis | TagEnd::Link => {
                if let Some(frame) = self.frames.pop() {
                    let inline = match frame {
                        Frame::Strong(children) => Inline::Strong(children),
                        Frame::Emphasis(children) => Inline::Emphasis(children),
                        Frame::Link { href, children } => Inline::Link { href, children },
                        Frame::Root(children) => {
                            // Unbalanced events; keep the content.
                            self.frames.push(Frame::Root(children));
                            return;
                        }
                    };
                    self.push_inline(inline);
                }
            }
            _ => {}
        }
    }

    fn open_block(&mut self, container: Container) {
        self.flush_block();
        self.frames.push(Frame::Root(Vec::new()));
        self.container = Some(container);
    }

    fn flush_block(&mut self) {
        let Some(container) = self.container.take() else {
            return;
        };
        // Collapse any frames left open by unbalanced input.
        let mut content = Vec::new();
        while let Some(mut frame) = self.frames.pop() {
            let mut children = std::mem::take(frame.children_mut());
            children.append(&mut content);
            content = children;
        }
        match container {
            Container::Paragraph => self.blocks.push(Block::Paragraph(content)),
            Container::Heading(level) => self.blocks.push(Block::Heading { level, content }),
            Container::ListItem => self.list_items.push(content),
        }
    }

    fn push_inline(&mut self, inline: Inline) {
        if self.frames.is_empty() {
            // Inline content outside any block (e.g. stray HTML):
            // open an implicit paragraph so nothing is dropped.
            self.open_block(Container::Paragraph);
        }
        if let Some(frame) = self.frames.last_mut() {
            frame.children_mut().push(inline);
        }
    }

    fn finish(mut self) -> Vec<Block> {
        self.flush_block();
        self.blocks
    }
}
