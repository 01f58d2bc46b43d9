//! pulldown-cmark event stream to [`Tree`] adapter.

use pulldown_cmark::{
    CodeBlockKind, Event, HeadingLevel, LinkType, Options, Parser, Tag, TagEnd, TextMergeStream,
};

use crate::builder::TreeBuilder;
use crate::node::{NodeId, NodeKind};
use crate::tree::Tree;

/// Parser options used by [`parse`]: GFM tables, strikethrough and task lists.
#[must_use]
pub fn default_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

/// Parse Markdown into a tree using [`default_options`].
#[must_use]
pub fn parse(markdown: &str) -> Tree {
    parse_with(markdown, default_options())
}

/// Parse Markdown into a tree with explicit parser options.
///
/// Adjacent text events are merged, so one run of plain text is one
/// `Text` node.
#[must_use]
pub fn parse_with(markdown: &str, options: Options) -> Tree {
    let mut adapter = EventAdapter::default();
    for event in TextMergeStream::new(Parser::new_ext(markdown, options)) {
        adapter.process_event(event);
    }
    adapter.builder.finish()
}

/// Literal being collected for a leaf block.
enum PendingLeaf {
    Code { info: String, literal: String },
    Html(String),
}

#[derive(Default)]
struct EventAdapter {
    builder: TreeBuilder,
    pending: Option<PendingLeaf>,
    /// Paragraph opened for inline content sitting directly in a list item.
    implicit_paragraph: Option<NodeId>,
    /// Open lists and whether an explicit paragraph made them loose.
    lists: Vec<(NodeId, bool)>,
    /// Task marker seen before the item's paragraph was opened.
    task_marker: Option<bool>,
}

impl EventAdapter {
    fn process_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => {
                if let Some(pending) = &mut self.pending {
                    match pending {
                        PendingLeaf::Code { literal, .. } => literal.push_str(&text),
                        PendingLeaf::Html(literal) => literal.push_str(&text),
                    }
                } else {
                    self.inline_leaf(NodeKind::Text(text.into_string()));
                }
            }
            Event::Code(code) => self.inline_leaf(NodeKind::CodeSpan(code.into_string())),
            Event::Html(html) => match &mut self.pending {
                Some(PendingLeaf::Html(literal)) => literal.push_str(&html),
                _ => self.block_leaf(NodeKind::HtmlBlock(html.into_string())),
            },
            Event::InlineHtml(html) => self.inline_leaf(NodeKind::InlineHtml(html.into_string())),
            Event::SoftBreak => self.inline_leaf(NodeKind::SoftBreak),
            Event::HardBreak => self.inline_leaf(NodeKind::HardBreak),
            Event::Rule => self.block_leaf(NodeKind::HorizontalRule),
            Event::TaskListMarker(checked) => {
                if self.builder.current_kind() == &NodeKind::ListItem {
                    self.task_marker = Some(checked);
                } else {
                    self.inline_leaf(NodeKind::TaskMarker(checked));
                }
            }
            Event::FootnoteReference(_) => self.inline_leaf(unsupported("footnote_reference", false)),
            Event::InlineMath(_) => self.inline_leaf(unsupported("inline_math", false)),
            Event::DisplayMath(_) => self.inline_leaf(unsupported("display_math", false)),
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                self.close_implicit_paragraph();
                if self.builder.current_kind() == &NodeKind::ListItem
                    && let Some((_, loose)) = self.lists.last_mut()
                {
                    *loose = true;
                }
                self.builder.open(NodeKind::Paragraph);
                self.flush_task_marker();
            }
            Tag::Heading { level, .. } => {
                self.open_block(NodeKind::Heading(heading_level_to_num(level)));
            }
            Tag::BlockQuote(_) => {
                self.open_block(NodeKind::BlockQuote);
            }
            Tag::CodeBlock(kind) => {
                self.close_implicit_paragraph();
                let info = match kind {
                    CodeBlockKind::Fenced(info) => info.trim().to_owned(),
                    CodeBlockKind::Indented => String::new(),
                };
                self.pending = Some(PendingLeaf::Code {
                    info,
                    literal: String::new(),
                });
            }
            Tag::HtmlBlock => {
                self.close_implicit_paragraph();
                self.pending = Some(PendingLeaf::Html(String::new()));
            }
            Tag::List(start) => {
                let id = self.open_block(NodeKind::List {
                    ordered: start.is_some(),
                    start,
                    tight: true,
                });
                self.lists.push((id, false));
            }
            Tag::Item => {
                self.builder.open(NodeKind::ListItem);
            }
            Tag::Table(alignments) => {
                let alignments = alignments.into_iter().map(Into::into).collect();
                self.open_block(NodeKind::Table(alignments));
            }
            Tag::TableHead => {
                self.builder.open(NodeKind::TableHead);
            }
            Tag::TableRow => {
                self.builder.open(NodeKind::TableRow);
            }
            Tag::TableCell => {
                self.builder.open(NodeKind::TableCell);
            }
            Tag::Emphasis => self.open_inline(NodeKind::Emphasis),
            Tag::Strong => self.open_inline(NodeKind::Strong),
            Tag::Strikethrough => self.open_inline(NodeKind::Strikethrough),
            Tag::Link {
                link_type,
                dest_url,
                title,
                ..
            } => self.open_inline(NodeKind::Link {
                destination: dest_url.into_string(),
                title: title.into_string(),
                autolink: matches!(link_type, LinkType::Autolink | LinkType::Email),
            }),
            Tag::Image {
                dest_url, title, ..
            } => self.open_inline(NodeKind::Image {
                destination: dest_url.into_string(),
                title: title.into_string(),
            }),
            Tag::FootnoteDefinition(_) => {
                self.open_block(unsupported("footnote_definition", true));
            }
            Tag::DefinitionList => {
                self.open_block(unsupported("definition_list", true));
            }
            Tag::DefinitionListTitle => {
                self.builder.open(unsupported("definition_list_title", true));
            }
            Tag::DefinitionListDefinition => {
                self.builder
                    .open(unsupported("definition_list_definition", true));
            }
            Tag::MetadataBlock(_) => {
                self.open_block(unsupported("metadata_block", true));
            }
            Tag::Superscript => self.open_inline(unsupported("superscript", false)),
            Tag::Subscript => self.open_inline(unsupported("subscript", false)),
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::CodeBlock => {
                if let Some(PendingLeaf::Code { info, literal }) = self.pending.take() {
                    self.builder.leaf(NodeKind::CodeBlock { literal, info });
                }
            }
            TagEnd::HtmlBlock => {
                if let Some(PendingLeaf::Html(literal)) = self.pending.take() {
                    self.builder.leaf(NodeKind::HtmlBlock(literal));
                }
            }
            TagEnd::List(_) => {
                self.close_implicit_paragraph();
                if let Some((id, loose)) = self.lists.pop()
                    && let NodeKind::List { tight, .. } = self.builder.kind_mut(id)
                {
                    *tight = !loose;
                }
                self.builder.close();
            }
            TagEnd::Item => {
                self.close_implicit_paragraph();
                self.builder.close();
            }
            _ => {
                self.builder.close();
            }
        }
    }

    /// Open a block container, ending any implicit paragraph first.
    fn open_block(&mut self, kind: NodeKind) -> NodeId {
        self.close_implicit_paragraph();
        self.builder.open(kind)
    }

    fn block_leaf(&mut self, kind: NodeKind) {
        self.close_implicit_paragraph();
        self.builder.leaf(kind);
    }

    fn open_inline(&mut self, kind: NodeKind) {
        self.ensure_paragraph();
        self.builder.open(kind);
    }

    fn inline_leaf(&mut self, kind: NodeKind) {
        self.ensure_paragraph();
        self.builder.leaf(kind);
    }

    /// Tight list items carry inline content without a paragraph around it.
    fn ensure_paragraph(&mut self) {
        if self.builder.current_kind() == &NodeKind::ListItem {
            self.implicit_paragraph = Some(self.builder.open(NodeKind::Paragraph));
            self.flush_task_marker();
        }
    }

    fn flush_task_marker(&mut self) {
        if let Some(checked) = self.task_marker.take() {
            self.builder.leaf(NodeKind::TaskMarker(checked));
        }
    }

    fn close_implicit_paragraph(&mut self) {
        if let Some(id) = self.implicit_paragraph
            && self.builder.current() == id
        {
            self.builder.close();
            self.implicit_paragraph = None;
        }
    }
}

fn unsupported(name: &'static str, block: bool) -> NodeKind {
    NodeKind::Unsupported { name, block }
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
