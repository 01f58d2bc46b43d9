//! Tree to canonical Markdown renderer.

use std::borrow::Cow;
use std::collections::HashMap;

use mdnorm_tree::{NodeId, NodeKind, NodeRef, Options, Tree, Visitor, WalkStatus};

use crate::error::RenderError;
use crate::escape::{code_fence, code_span, inline_text, link_destination, link_title};
use crate::options::{FormatOptions, HeadingStyle};
use crate::stack::{ContextStack, StackStats};
use crate::state::TableState;
use crate::wrap::{escape_block_start, wrap};

/// Fenced code inside list items is indented to a multiple of this.
const BLOCK_UNIT: usize = 4;

/// Backslash hard break. Paragraph text holds no other newline.
const HARD_BREAK: &str = "\\\n";

/// Result of rendering a document.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Canonical Markdown, newline-terminated unless empty.
    pub markdown: String,
    /// One entry per unsupported node that was skipped.
    pub warnings: Vec<String>,
    /// Context stack counters for the walk.
    pub stats: StackStats,
}

/// Renders a [`Tree`] back to canonical Markdown.
///
/// The renderer holds only options. Every call to [`render`](Self::render)
/// walks the tree with fresh state, so one renderer can format many
/// documents, from many threads.
///
/// # Example
///
/// ```
/// use mdnorm_fmt::MarkdownRenderer;
///
/// let result = MarkdownRenderer::new()
///     .with_line_width(20)
///     .render_markdown("* one\n* two\n\n1. a\n1. b")
///     .unwrap();
/// assert_eq!(result.markdown, "- one\n- two\n\n1. a\n2. b\n");
/// ```
#[derive(Clone, Debug, Default)]
pub struct MarkdownRenderer {
    options: FormatOptions,
}

impl MarkdownRenderer {
    /// Create a renderer with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all options.
    #[must_use]
    pub fn with_options(mut self, options: FormatOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the wrap column. Values `<= 1` disable wrapping.
    #[must_use]
    pub fn with_line_width(mut self, width: i32) -> Self {
        self.options.line_width = width;
        self
    }

    #[must_use]
    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Render a parsed document.
    pub fn render(&self, tree: &Tree) -> Result<RenderResult, RenderError> {
        let mut state = RenderState::new(&self.options);
        tree.walk(&mut state)?;
        state.finish()
    }

    /// Parse `markdown` with the default parser options and render it.
    pub fn render_markdown(&self, markdown: &str) -> Result<RenderResult, RenderError> {
        self.render(&mdnorm_tree::parse(markdown))
    }

    /// Parse `markdown` with explicit parser options and render it.
    pub fn render_markdown_with(
        &self,
        markdown: &str,
        parser_options: Options,
    ) -> Result<RenderResult, RenderError> {
        self.render(&mdnorm_tree::parse_with(markdown, parser_options))
    }
}

/// Mutable state of one render.
struct RenderState<'o> {
    options: &'o FormatOptions,
    stack: ContextStack,
    /// Last ordinal emitted per open ordered list.
    ordinals: HashMap<NodeId, usize>,
    /// Rendered bullet widths of the open list items.
    bullet_widths: Vec<usize>,
    list_depth: usize,
    tables: Vec<TableState>,
    warnings: Vec<String>,
}

impl Visitor for RenderState<'_> {
    type Error = RenderError;

    fn visit(&mut self, node: NodeRef<'_>, entering: bool) -> Result<WalkStatus, RenderError> {
        match node.kind() {
            NodeKind::Document => {}
            NodeKind::Text(text) => {
                if entering {
                    self.text(node, text)?;
                }
            }
            NodeKind::InlineHtml(html) => {
                if entering {
                    self.stack.peek()?.push_str(&html.replace('\n', " "));
                }
            }
            NodeKind::SoftBreak => {
                if entering {
                    self.stack.peek()?.push(' ');
                }
            }
            NodeKind::HardBreak => {
                if entering {
                    let out = self.stack.peek()?;
                    out.truncate(out.trim_end().len());
                    out.push_str(HARD_BREAK);
                }
            }
            NodeKind::TaskMarker(checked) => {
                if entering {
                    let marker = if *checked { "[x] " } else { "[ ] " };
                    self.stack.peek()?.push_str(marker);
                }
            }
            NodeKind::CodeSpan(code) => {
                if entering {
                    let span = code_span(code);
                    self.stack.peek()?.push_str(&span);
                }
            }
            NodeKind::Emphasis => self.inline_markup(entering, "*")?,
            NodeKind::Strong => self.inline_markup(entering, "**")?,
            NodeKind::Strikethrough => self.inline_markup(entering, "~~")?,
            NodeKind::Heading(level) => {
                if entering {
                    self.stack.push("");
                } else {
                    self.heading(node, *level)?;
                }
            }
            NodeKind::HorizontalRule => {
                if entering {
                    let indent = self.stack.indent()?.to_owned();
                    let rule = format!("{indent}{}", self.options.rule());
                    self.push_block(node, &rule, &indent)?;
                }
            }
            NodeKind::CodeBlock { literal, info } => {
                if entering {
                    self.code_block(node, literal, info)?;
                }
            }
            NodeKind::HtmlBlock(html) => {
                if entering {
                    self.html_block(node, html)?;
                }
            }
            NodeKind::Paragraph => {
                if entering {
                    self.stack.push("");
                } else {
                    self.paragraph(node)?;
                }
            }
            NodeKind::BlockQuote => {
                if entering {
                    self.stack.push("> ");
                } else {
                    self.block_quote(node)?;
                }
            }
            NodeKind::List { ordered, .. } => {
                if entering {
                    self.enter_list(node, *ordered);
                } else {
                    self.exit_list(node)?;
                }
            }
            NodeKind::ListItem => {
                if entering {
                    self.enter_item(node)?;
                } else {
                    self.exit_item()?;
                }
            }
            NodeKind::Link {
                destination,
                title,
                autolink,
            } => {
                if entering {
                    self.stack.push("");
                } else if *autolink {
                    self.stack.pop()?;
                    let out = self.stack.peek()?;
                    out.push('<');
                    out.push_str(destination);
                    out.push('>');
                } else {
                    self.link("", destination, title)?;
                }
            }
            NodeKind::Image { destination, title } => {
                if entering {
                    self.stack.push("");
                } else {
                    self.link("!", destination, title)?;
                }
            }
            NodeKind::Table(alignments) => {
                if entering {
                    self.tables.push(TableState::new(alignments.clone()));
                } else {
                    self.table(node)?;
                }
            }
            NodeKind::TableHead => {
                if !entering {
                    self.current_table("table head")?.end_head();
                }
            }
            NodeKind::TableRow => {
                if !entering {
                    self.current_table("table row")?.end_row();
                }
            }
            NodeKind::TableCell => {
                if entering {
                    self.stack.push("");
                } else {
                    let (text, _) = self.stack.pop()?;
                    self.current_table("table cell")?.push_cell(&text);
                }
            }
            NodeKind::Unsupported { name, .. } => {
                if entering {
                    tracing::debug!(kind = *name, "Skipping unsupported node");
                    self.warnings.push(format!("unsupported {name} node skipped"));
                    return Ok(WalkStatus::SkipChildren);
                }
            }
        }
        Ok(WalkStatus::Continue)
    }
}

impl<'o> RenderState<'o> {
    fn new(options: &'o FormatOptions) -> Self {
        Self {
            options,
            stack: ContextStack::new(),
            ordinals: HashMap::new(),
            bullet_widths: Vec::new(),
            list_depth: 0,
            tables: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Check the walk left everything balanced and take the output.
    fn finish(mut self) -> Result<RenderResult, RenderError> {
        let stats = self.stack.stats();
        if self.stack.depth() != 1
            || stats.pushes != stats.pops
            || self.list_depth != 0
            || !self.ordinals.is_empty()
        {
            return Err(RenderError::Unbalanced {
                pushes: stats.pushes,
                pops: stats.pops,
            });
        }

        let (mut markdown, _) = self.stack.pop()?;
        if !markdown.is_empty() && !markdown.ends_with('\n') {
            markdown.push('\n');
        }
        tracing::trace!(
            pushes = stats.pushes,
            max_depth = stats.max_depth,
            warnings = self.warnings.len(),
            "Rendered document"
        );

        Ok(RenderResult {
            markdown,
            warnings: self.warnings,
            stats,
        })
    }

    /// Append a finished block to the current frame.
    ///
    /// Adjacent blocks are separated by exactly one blank line, except inside
    /// tight list items where a plain newline keeps the list tight.
    fn append_block(&mut self, node: NodeRef<'_>, block: &str) -> Result<(), RenderError> {
        let prev = node.prev().filter(|prev| prev.kind().is_block());
        let blank = prev.is_some_and(|prev| self.needs_blank_line(prev, node));
        let blank_line = self.stack.indent()?.trim_end().to_owned();
        let out = self.stack.peek()?;
        if prev.is_some() && !out.is_empty() {
            if !out.ends_with('\n') {
                out.push('\n');
            }
            if blank {
                out.push_str(&blank_line);
                out.push('\n');
            }
        }
        out.push_str(block);
        Ok(())
    }

    /// Append a block whose every line starts with `indent`.
    ///
    /// The first block of a list item continues the bullet line, so its
    /// leading indent is dropped.
    fn push_block(&mut self, node: NodeRef<'_>, block: &str, indent: &str) -> Result<(), RenderError> {
        let block = if node.is_first_in_item() {
            block.strip_prefix(indent).unwrap_or(block)
        } else {
            block
        };
        self.append_block(node, block)
    }

    fn needs_blank_line(&self, prev: NodeRef<'_>, node: NodeRef<'_>) -> bool {
        if !in_tight_item(node) {
            return true;
        }
        // A tight item only holds blocks that could follow each other without
        // a blank line. These could not once re-rendered after a paragraph.
        prev.kind() == &NodeKind::Paragraph
            && match node.kind() {
                NodeKind::HorizontalRule | NodeKind::Table(_) | NodeKind::HtmlBlock(_) => true,
                NodeKind::Heading(level) => self.is_setext(*level),
                _ => false,
            }
    }

    fn is_setext(&self, level: u8) -> bool {
        self.options.heading_style == HeadingStyle::Setext && level <= 2
    }

    /// Append a text literal, escaped so it cannot turn into markup.
    fn text(&mut self, node: NodeRef<'_>, text: &str) -> Result<(), RenderError> {
        let out = self.stack.peek()?;
        out.push_str(&inline_text(text));
        // `!` right before a link would make it an image
        let before_link = node
            .next()
            .is_some_and(|next| matches!(next.kind(), NodeKind::Link { autolink: false, .. }));
        if before_link && out.ends_with('!') {
            out.insert(out.len() - 1, '\\');
        }
        Ok(())
    }

    fn inline_markup(&mut self, entering: bool, marker: &str) -> Result<(), RenderError> {
        if entering {
            self.stack.push("");
            return Ok(());
        }
        let (text, _) = self.stack.pop()?;
        if !text.is_empty() {
            let out = self.stack.peek()?;
            out.push_str(marker);
            out.push_str(&text);
            out.push_str(marker);
        }
        Ok(())
    }

    fn heading(&mut self, node: NodeRef<'_>, level: u8) -> Result<(), RenderError> {
        let (text, indent) = self.stack.pop()?;
        let text = text.replace(HARD_BREAK, " ");
        let mut words: Vec<Cow<'_, str>> = text.split_ascii_whitespace().map(Cow::Borrowed).collect();
        let setext = self.is_setext(level);
        if !setext
            && let Some(last) = words.last_mut()
            && last.bytes().all(|b| b == b'#')
        {
            // would read as a closing sequence
            *last = Cow::Owned(format!("\\{last}"));
        }
        let text = words.join(" ");
        let block = if setext && !text.is_empty() {
            let underline = if level == 1 { "=" } else { "-" };
            let underline = underline.repeat(text.chars().count());
            format!("{indent}{text}\n{indent}{underline}")
        } else {
            let marker = "#".repeat(usize::from(level));
            if text.is_empty() {
                format!("{indent}{marker}")
            } else {
                format!("{indent}{marker} {text}")
            }
        };
        self.push_block(node, &block, &indent)
    }

    /// Wrap a paragraph, one run of lines per hard-break segment.
    ///
    /// The first word of each segment stays on the segment's first line, so
    /// an overlong word never leaves an empty line behind the bullet or
    /// quote marker.
    fn paragraph(&mut self, node: NodeRef<'_>) -> Result<(), RenderError> {
        let (text, indent) = self.stack.pop()?;
        let first_prefix = if node.is_first_in_item() { "" } else { indent.as_str() };
        let mut lines: Vec<String> = Vec::new();
        for segment in text.split('\n') {
            let mut words = segment.split_ascii_whitespace();
            let Some(first) = words.next() else {
                continue;
            };
            let lead = if lines.is_empty() { first_prefix } else { indent.as_str() };
            let first = escape_block_start(first).map_or(Cow::Borrowed(first), Cow::Owned);
            lines.push(wrap(words, self.options.wrap_width(), &format!("{lead}{first}"), &indent));
        }
        if lines.is_empty() {
            return Ok(());
        }
        self.append_block(node, &lines.join("\n"))
    }

    fn block_quote(&mut self, node: NodeRef<'_>) -> Result<(), RenderError> {
        let (text, quote_indent) = self.stack.pop()?;
        let indent = self.stack.indent()?.to_owned();
        let block = if text.is_empty() {
            quote_indent.trim_end().to_owned()
        } else {
            text
        };
        self.push_block(node, &block, &indent)
    }

    fn code_block(&mut self, node: NodeRef<'_>, literal: &str, info: &str) -> Result<(), RenderError> {
        let frame_indent = self.stack.indent()?.to_owned();
        let in_item = node
            .parent()
            .is_some_and(|parent| parent.kind() == &NodeKind::ListItem);
        let indent = if in_item && !node.is_first_in_item() {
            fence_indent(&frame_indent)
        } else {
            frame_indent
        };

        let fence = code_fence(literal);
        let mut block = format!("{indent}{fence}{info}\n");
        for line in literal.lines() {
            if line.is_empty() {
                block.push_str(indent.trim_end());
            } else {
                block.push_str(&indent);
                block.push_str(line);
            }
            block.push('\n');
        }
        block.push_str(&indent);
        block.push_str(&fence);
        self.push_block(node, &block, &indent)
    }

    fn html_block(&mut self, node: NodeRef<'_>, html: &str) -> Result<(), RenderError> {
        let indent = self.stack.indent()?.to_owned();
        let block = html
            .trim_end_matches('\n')
            .lines()
            .map(|line| {
                if line.is_empty() {
                    indent.trim_end().to_owned()
                } else {
                    format!("{indent}{line}")
                }
            })
            .collect::<Vec<_>>()
            .join("\n");
        self.push_block(node, &block, &indent)
    }

    fn enter_list(&mut self, node: NodeRef<'_>, ordered: bool) {
        let nested = node
            .parent()
            .is_some_and(|parent| parent.kind() == &NodeKind::ListItem);
        let delta = if nested {
            let bullet = self.bullet_widths.last().copied().unwrap_or(0);
            " ".repeat(self.options.list_indent().len().saturating_sub(bullet))
        } else {
            String::new()
        };
        if ordered {
            self.ordinals.insert(node.id(), 0);
        }
        self.list_depth += 1;
        self.stack.push(&delta);
    }

    fn exit_list(&mut self, node: NodeRef<'_>) -> Result<(), RenderError> {
        let (text, _) = self.stack.pop()?;
        self.list_depth = self
            .list_depth
            .checked_sub(1)
            .ok_or(RenderError::ListDepthUnderflow)?;
        self.ordinals.remove(&node.id());
        let indent = self.stack.indent()?.to_owned();
        self.push_block(node, &text, &indent)
    }

    fn enter_item(&mut self, node: NodeRef<'_>) -> Result<(), RenderError> {
        let ordinal = match node.parent() {
            Some(list) if matches!(list.kind(), NodeKind::List { ordered: true, .. }) => {
                let ordinal = self.ordinals.entry(list.id()).or_insert(0);
                *ordinal += 1;
                Some(*ordinal)
            }
            _ => None,
        };
        let bullet = match ordinal {
            Some(n) => format!("{n}. "),
            None => format!("{} ", self.options.bullet.as_char()),
        };

        let indent = self.stack.indent()?.to_owned();
        let out = self.stack.peek()?;
        out.push_str(&indent);
        out.push_str(&bullet);
        self.bullet_widths.push(bullet.len());
        self.stack.push(&" ".repeat(bullet.len()));
        Ok(())
    }

    fn exit_item(&mut self) -> Result<(), RenderError> {
        let (text, _) = self.stack.pop()?;
        self.bullet_widths.pop();
        let out = self.stack.peek()?;
        if text.is_empty() {
            // bare bullet, no trailing space
            out.truncate(out.trim_end_matches(' ').len());
        }
        out.push_str(&text);
        if !out.ends_with('\n') {
            out.push('\n');
        }
        Ok(())
    }

    /// Emit `[text](destination "title")`, prefixed with `!` for images.
    fn link(&mut self, bang: &str, destination: &str, title: &str) -> Result<(), RenderError> {
        let (text, _) = self.stack.pop()?;
        let out = self.stack.peek()?;
        out.push_str(bang);
        out.push('[');
        out.push_str(&text);
        out.push_str("](");
        out.push_str(&link_destination(destination));
        if !title.is_empty() {
            out.push_str(" \"");
            out.push_str(&link_title(title));
            out.push('"');
        }
        out.push(')');
        Ok(())
    }

    fn table(&mut self, node: NodeRef<'_>) -> Result<(), RenderError> {
        let table = self
            .tables
            .pop()
            .ok_or(RenderError::OrphanTablePart("table"))?;
        let indent = self.stack.indent()?.to_owned();
        let block = table.render(&indent);
        self.push_block(node, &block, &indent)
    }

    fn current_table(&mut self, part: &'static str) -> Result<&mut TableState, RenderError> {
        self.tables
            .last_mut()
            .ok_or(RenderError::OrphanTablePart(part))
    }
}

/// Whether `node` sits directly in an item of a tight list.
fn in_tight_item(node: NodeRef<'_>) -> bool {
    node.parent()
        .filter(|item| item.kind() == &NodeKind::ListItem)
        .and_then(NodeRef::parent)
        .is_some_and(|list| matches!(list.kind(), NodeKind::List { tight: true, .. }))
}

/// Indent for a fence that follows other blocks in a list item.
///
/// The fence is moved to a multiple of [`BLOCK_UNIT`] columns that stays
/// within three columns of the item's content. Indents that carry block
/// quote markers are left alone.
fn fence_indent(indent: &str) -> String {
    if indent.bytes().any(|b| b != b' ') {
        return indent.to_owned();
    }
    let col = indent.len();
    let mut width = (col + BLOCK_UNIT) / BLOCK_UNIT * BLOCK_UNIT;
    if width - col > 3 {
        width -= BLOCK_UNIT;
    }
    " ".repeat(width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{Bullet, RuleChar};
    use mdnorm_tree::TreeBuilder;
    use pretty_assertions::assert_eq;

    fn render(markdown: &str) -> String {
        MarkdownRenderer::new()
            .render_markdown(markdown)
            .unwrap()
            .markdown
    }

    fn render_with(markdown: &str, options: FormatOptions) -> String {
        MarkdownRenderer::new()
            .with_options(options)
            .render_markdown(markdown)
            .unwrap()
            .markdown
    }

    fn assert_idempotent(markdown: &str) {
        assert_idempotent_with(markdown, FormatOptions::default());
    }

    fn assert_idempotent_with(markdown: &str, options: FormatOptions) {
        let once = render_with(markdown, options.clone());
        let twice = render_with(&once, options);
        assert_eq!(once, twice, "not a fixed point for input {markdown:?}");
    }

    #[test]
    fn test_headings() {
        assert_eq!(render("# h1"), "# h1\n");
        assert_eq!(render("#  h1"), "# h1\n");
        assert_eq!(render("###### h6 #####"), "###### h6\n");
        assert_eq!(render("# h1 *emph*"), "# h1 *emph*\n");
        assert_eq!(
            render("# h1 *emph* **strong** ***triple***"),
            "# h1 *emph* **strong** ***triple***\n"
        );
    }

    #[test]
    fn test_setext_source_becomes_atx() {
        assert_eq!(render("Title\n=====\n\nSub\n---\n"), "# Title\n\n## Sub\n");
    }

    #[test]
    fn test_setext_style() {
        let mut options = FormatOptions::default();
        options.heading_style = HeadingStyle::Setext;
        assert_eq!(
            render_with("# Title\n\n## Sub\n\n### Deep", options),
            "Title\n=====\n\nSub\n---\n\n### Deep\n"
        );
    }

    #[test]
    fn test_inline_markup() {
        assert_eq!(render("`foo`"), "`foo`\n");
        assert_eq!(render("*a* **b** ~~c~~"), "*a* **b** ~~c~~\n");
        assert_eq!(render("_a_ __b__"), "*a* **b**\n");
        assert_eq!(render("``a`b``"), "``a`b``\n");
    }

    #[test]
    fn test_empty_emphasis_renders_nothing() {
        let mut builder = TreeBuilder::new();
        builder.open(NodeKind::Paragraph);
        builder.leaf(NodeKind::Text("x".to_owned()));
        builder.open(NodeKind::Emphasis);
        builder.close();
        builder.open(NodeKind::Strong);
        builder.close();
        builder.close();
        let result = MarkdownRenderer::new().render(&builder.finish()).unwrap();
        assert_eq!(result.markdown, "x\n");
    }

    #[test]
    fn test_code_block() {
        assert_eq!(render("``` foo\ncode\n```"), "```foo\ncode\n```\n");
        assert_eq!(render("    indented\n"), "```\nindented\n```\n");
        assert_eq!(render("```\n```"), "```\n```\n");
        assert_eq!(
            render("````md\n```\nnested\n```\n````"),
            "````md\n```\nnested\n```\n````\n"
        );
    }

    #[test]
    fn test_unordered_list() {
        assert_eq!(render("* 1\n* 2\n* 3"), "- 1\n- 2\n- 3\n");
        assert_eq!(render("+ a\n+ b"), "- a\n- b\n");
    }

    #[test]
    fn test_nested_unordered_list() {
        assert_eq!(
            render("- 1.1\n- 1.2\n  - 2.1\n  - 2.2\n- 1.3\n"),
            "- 1.1\n- 1.2\n    - 2.1\n    - 2.2\n- 1.3\n"
        );
    }

    #[test]
    fn test_ordered_list_renumbers() {
        assert_eq!(render("1. one\n1. two\n1. three"), "1. one\n2. two\n3. three\n");
        assert_eq!(render("3. one\n7. two"), "1. one\n2. two\n");
    }

    #[test]
    fn test_nested_ordered_list_restarts_and_resumes() {
        assert_eq!(
            render("1. one\n1. two\n   1. two.one\n   1. two.two\n1. three\n"),
            "1. one\n2. two\n    1. two.one\n    2. two.two\n3. three\n"
        );
    }

    #[test]
    fn test_sibling_lists_do_not_share_counters() {
        assert_eq!(
            render("1. a\n2. b\n\ntext\n\n1. c\n"),
            "1. a\n2. b\n\ntext\n\n1. c\n"
        );
    }

    #[test]
    fn test_list_first_block_nested_list() {
        assert_eq!(render("- - a\n  - b\n"), "-   - a\n    - b\n");
    }

    #[test]
    fn test_empty_item() {
        assert_eq!(render("- a\n-\n- b\n"), "- a\n-\n- b\n");
    }

    #[test]
    fn test_task_list() {
        assert_eq!(render("- [ ] todo\n- [x] done\n"), "- [ ] todo\n- [x] done\n");
    }

    #[test]
    fn test_block_quote() {
        assert_eq!(render("> quote"), "> quote\n");
        assert_eq!(render("> a\n>\n> b"), "> a\n>\n> b\n");
        assert_eq!(render("> > deep"), "> > deep\n");
    }

    #[test]
    fn test_list_inside_quote() {
        assert_eq!(render("> - a\n> - b\n"), "> - a\n> - b\n");
    }

    #[test]
    fn test_quote_inside_list_item() {
        assert_eq!(render("- item\n\n  > quoted\n"), "- item\n\n  > quoted\n");
        assert_eq!(render("- > quoted\n"), "- > quoted\n");
    }

    #[test]
    fn test_code_block_in_loose_item() {
        assert_eq!(
            render("- item\n\n  ```rust\n  fn main() {}\n  ```\n"),
            "- item\n\n    ```rust\n    fn main() {}\n    ```\n"
        );
    }

    #[test]
    fn test_code_block_in_tight_item() {
        assert_eq!(
            render("- item\n  ```\n  code\n  ```\n"),
            "- item\n    ```\n    code\n    ```\n"
        );
    }

    #[test]
    fn test_code_block_first_in_item() {
        assert_eq!(render("- ```\n  code\n  ```\n"), "- ```\n  code\n  ```\n");
    }

    #[test]
    fn test_fence_indent_policy() {
        assert_eq!(fence_indent("  "), "    ");
        assert_eq!(fence_indent("   "), "    ");
        assert_eq!(fence_indent("    "), "    ");
        assert_eq!(fence_indent("      "), "        ");
        assert_eq!(fence_indent("  > "), "  > ");
    }

    #[test]
    fn test_horizontal_rule() {
        assert_eq!(render("a\n\n***\n\nb"), "a\n\n---\n\nb\n");
        let mut options = FormatOptions::default();
        options.hr_char = RuleChar::Underscore;
        options.set_hr_length(5).unwrap();
        assert_eq!(render_with("a\n\n---\n\nb", options), "a\n\n_____\n\nb\n");
    }

    #[test]
    fn test_bullet_option() {
        let mut options = FormatOptions::default();
        options.bullet = Bullet::Star;
        assert_eq!(render_with("- a\n- b", options), "* a\n* b\n");
    }

    #[test]
    fn test_list_indent_option() {
        let mut options = FormatOptions::default();
        options.set_list_indent("  ").unwrap();
        assert_eq!(render_with("- a\n  - b\n", options), "- a\n  - b\n");
    }

    #[test]
    fn test_links_and_images() {
        assert_eq!(render("[text](http://x/ \"T\")"), "[text](http://x/ \"T\")\n");
        assert_eq!(render("![alt](img.png)"), "![alt](img.png)\n");
        assert_eq!(
            render("[![alt](img.png)](http://x/)"),
            "[![alt](img.png)](http://x/)\n"
        );
        assert_eq!(render("<http://x/>"), "<http://x/>\n");
        assert_eq!(render("[a](<my file.md>)"), "[a](my%20file.md)\n");
        assert_eq!(render("[*em* text](u)"), "[*em* text](u)\n");
    }

    #[test]
    fn test_reference_link_becomes_inline() {
        assert_eq!(render("[a][r]\n\n[r]: http://x/\n"), "[a](http://x/)\n");
    }

    #[test]
    fn test_paragraph_wrapping() {
        let mut options = FormatOptions::default();
        options.line_width = 20;
        let text = "aaa bbb ccc ddd eee fff ggg";
        assert_eq!(
            render_with(text, options.clone()),
            "aaa bbb ccc ddd eee\nfff ggg\n"
        );
        assert_eq!(
            render_with(&format!("> {text}"), options.clone()),
            "> aaa bbb ccc ddd\n> eee fff ggg\n"
        );
        assert_eq!(
            render_with(&format!("- {text}"), options),
            "- aaa bbb ccc ddd eee\n  fff ggg\n"
        );
    }

    #[test]
    fn test_overlong_first_word_stays_on_prefix_line() {
        let mut options = FormatOptions::default();
        options.line_width = 10;
        assert_eq!(
            render_with("averylongwordexceedingwidth tail", options.clone()),
            "averylongwordexceedingwidth\ntail\n"
        );
        assert_eq!(
            render_with("- averylongwordexceedingwidth tail", options.clone()),
            "- averylongwordexceedingwidth\n  tail\n"
        );
        assert_eq!(
            render_with("> averylongwordexceedingwidth", options),
            "> averylongwordexceedingwidth\n"
        );
    }

    #[test]
    fn test_wrapping_keeps_html_openers_inline() {
        let mut options = FormatOptions::default();
        options.line_width = 16;
        let doc = "aaaa bbbb cccc <div> dddd";
        assert_eq!(render_with(doc, options.clone()), "aaaa bbbb cccc <div>\ndddd\n");
        assert_idempotent_with(doc, options.clone());
        assert_idempotent_with("aaaa bbbb cccc <!-- note --> dddd", options);
    }

    #[test]
    fn test_hard_breaks() {
        assert_eq!(render("a  \nb"), "a\\\nb\n");
        assert_eq!(render("a\\\nb"), "a\\\nb\n");
        assert_eq!(render("> a  \n> b"), "> a\\\n> b\n");
        assert_eq!(render("- a  \n  b"), "- a\\\n  b\n");
        assert_eq!(render("*a  \nb*"), "*a\\\nb*\n");
    }

    #[test]
    fn test_hard_break_segments_wrap_separately() {
        let mut options = FormatOptions::default();
        options.line_width = 20;
        assert_eq!(
            render_with("aaa bbb ccc ddd eee fff\\\nggg", options),
            "aaa bbb ccc ddd eee\nfff\\\nggg\n"
        );
        assert_eq!(render("a\\\n\\- b"), "a\\\n\\- b\n");
    }

    #[test]
    fn test_hard_break_in_heading_becomes_space() {
        assert_eq!(render("a\\\nb\n==="), "# a b\n");
    }

    #[test]
    fn test_escaped_markup_stays_literal() {
        assert_eq!(render("\\*not em\\*"), "\\*not em\\*\n");
        assert_eq!(render("a \\[b](c)"), "a \\[b\\](c)\n");
        assert_eq!(render("\\`code\\`"), "\\`code\\`\n");
        assert_eq!(render("\\_x\\_ snake_case"), "\\_x\\_ snake_case\n");
        assert_eq!(render("\\<div> x"), "\\<div> x\n");
        assert_eq!(render("&amp;copy;"), "\\&copy;\n");
        assert_eq!(render("\\![a](b)"), "\\![a](b)\n");
        assert_eq!(render("Wow! [a](b)"), "Wow! [a](b)\n");
        assert_eq!(render("# a \\#"), "# a \\#\n");
        assert_eq!(render("[a\\]b](c)"), "[a\\]b](c)\n");
    }

    #[test]
    fn test_unlimited_width_joins_lines() {
        let mut options = FormatOptions::default();
        options.line_width = 0;
        assert_eq!(render_with("one\ntwo\nthree", options), "one two three\n");
    }

    #[test]
    fn test_escapes_block_syntax_at_paragraph_start() {
        assert_eq!(render("\\- not a list"), "\\- not a list\n");
        assert_eq!(render("1\\. not ordered"), "1\\. not ordered\n");
        assert_eq!(render("\\# not a heading"), "\\# not a heading\n");
    }

    #[test]
    fn test_html_block() {
        assert_eq!(
            render("<div>\nhi\n</div>\n\npara"),
            "<div>\nhi\n</div>\n\npara\n"
        );
        assert_eq!(render("a <b>bold</b> c"), "a <b>bold</b> c\n");
    }

    #[test]
    fn test_table() {
        assert_eq!(
            render("| a | b |\n|---|:-:|\n| 1 | 2 |"),
            "| a   |  b  |\n|-----|:---:|\n| 1   |  2  |\n"
        );
    }

    #[test]
    fn test_unsupported_nodes_are_skipped_with_warning() {
        let result = MarkdownRenderer::new()
            .render_markdown_with("Text[^1].\n\n[^1]: Note.\n", Options::ENABLE_FOOTNOTES)
            .unwrap();
        assert_eq!(result.markdown, "Text.\n");
        assert_eq!(result.warnings.len(), 2);
        assert!(result.warnings[0].contains("footnote_reference"));
        assert!(result.warnings[1].contains("footnote_definition"));
    }

    #[test]
    fn test_block_after_unsupported_block_is_separated() {
        let result = MarkdownRenderer::new()
            .render_markdown_with("a\n\n[^1]: note\n\nb\n", Options::ENABLE_FOOTNOTES)
            .unwrap();
        assert_eq!(result.markdown, "a\n\nb\n");
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(render(""), "");
        assert_eq!(render("\n\n"), "");
    }

    #[test]
    fn test_stack_balance() {
        let doc = "# T\n\n- a *b* [c](d)\n    1. e\n\n> f\n> - g\n\n| x |\n|---|\n| `y` |\n";
        let result = MarkdownRenderer::new().render_markdown(doc).unwrap();
        assert!(result.stats.pushes > 10);
        assert_eq!(result.stats.pushes, result.stats.pops);
        assert!(result.stats.max_depth >= 5);
    }

    #[test]
    fn test_orphan_table_cell_is_an_error() {
        let mut builder = TreeBuilder::new();
        builder.open(NodeKind::TableCell);
        builder.leaf(NodeKind::Text("x".to_owned()));
        builder.close();
        let err = MarkdownRenderer::new().render(&builder.finish()).unwrap_err();
        assert_eq!(err, RenderError::OrphanTablePart("table cell"));
    }

    #[test]
    fn test_renderer_is_reusable() {
        let renderer = MarkdownRenderer::new();
        let first = renderer.render_markdown("1. a\n1. b").unwrap();
        let second = renderer.render_markdown("1. a\n1. b").unwrap();
        assert_eq!(first.markdown, second.markdown);
        assert_eq!(first.stats, second.stats);
    }

    #[test]
    fn test_idempotence() {
        let corpus = [
            "# h1 *emph* **strong** ***triple***",
            "* 1\n* 2\n* 3",
            "- 1.1\n- 1.2\n  - 2.1\n  - 2.2\n- 1.3\n",
            "1. one\n1. two\n   1. two.one\n   1. two.two\n1. three\n",
            "- - a\n  - b\n",
            "> a\n>\n> b",
            "> - a\n> - b\n",
            "- item\n\n  > quoted\n",
            "- item\n\n  ```rust\n  fn main() {}\n  ```\n",
            "- item\n  ```\n  code\n  ```\n",
            "a\n\n***\n\nb",
            "[![alt](img.png)](http://x/) and <http://y/>",
            "| a | b |\n|---|:-:|\n| 1 | 2 |",
            "<div>\nhi\n</div>\n\npara",
            "\\- not a list",
            "a  \nb\\\nc",
            "> quote  \n> \\- not a list",
            "\\*x\\* \\[y](z) \\`w\\` snake_case \\_lead",
            "\\<div> \\&amp; \\![a](b)",
            "- [ ] todo \\[x]\n- [x] done",
            "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do \
             eiusmod tempor incididunt ut labore et dolore magna aliqua. Ut \
             enim ad minim veniam, quis nostrud exercitation ullamco laboris.",
            "- Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do \
             eiusmod tempor incididunt ut labore et dolore magna aliqua.\n\
             - second item\n",
            "# Title\n\nIntro with *emphasis*, **strong** and `code`.\n\n\
             - one\n- two\n    - nested\n- three\n\n1. first\n1. second\n\n\
             > quote line\n> continues\n\n```rust\nfn main() {}\n```\n\n---\n\n\
             [link](http://example.com \"Example\") and ![img](a.png)\n",
        ];
        for doc in corpus {
            assert_idempotent(doc);
        }
    }

    #[test]
    fn test_mixed_document() {
        let doc = "# Title\n\nIntro with *emphasis*, **strong** and `code`.\n\n\
                   - one\n- two\n    - nested\n- three\n\n1. first\n1. second\n\n\
                   > quote line\n> continues\n\n```rust\nfn main() {}\n```\n\n***\n\n\
                   [link](http://example.com \"Example\") and ![img](a.png)\n";
        assert_eq!(
            render(doc),
            "# Title\n\nIntro with *emphasis*, **strong** and `code`.\n\n\
             - one\n- two\n    - nested\n- three\n\n1. first\n2. second\n\n\
             > quote line continues\n\n```rust\nfn main() {}\n```\n\n---\n\n\
             [link](http://example.com \"Example\") and ![img](a.png)\n"
        );
    }
}
