//! Node identity and kinds.

/// Index of a node inside its [`Tree`](crate::Tree).
///
/// Ids are only meaningful for the tree that issued them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in creation order.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Column alignment of a table, as written in its delimiter row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    None,
    Left,
    Center,
    Right,
}

impl From<pulldown_cmark::Alignment> for Alignment {
    fn from(alignment: pulldown_cmark::Alignment) -> Self {
        match alignment {
            pulldown_cmark::Alignment::None => Self::None,
            pulldown_cmark::Alignment::Left => Self::Left,
            pulldown_cmark::Alignment::Center => Self::Center,
            pulldown_cmark::Alignment::Right => Self::Right,
        }
    }
}

/// Typed payload of a document node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// The single root of every tree.
    Document,
    Paragraph,
    /// ATX or setext heading, level 1 to 6.
    Heading(u8),
    Text(String),
    /// Line ending inside a paragraph, rendered as a space.
    SoftBreak,
    /// Forced line break (trailing `\` or two trailing spaces).
    HardBreak,
    /// `[ ]` or `[x]` at the start of a task list item.
    TaskMarker(bool),
    Emphasis,
    Strong,
    Strikethrough,
    CodeSpan(String),
    /// Fenced or indented code block. `info` is empty when absent.
    CodeBlock { literal: String, info: String },
    List {
        ordered: bool,
        /// First ordinal as written in the source (ordered lists only).
        start: Option<u64>,
        /// False once any item holds an explicit paragraph.
        tight: bool,
    },
    ListItem,
    Link {
        destination: String,
        title: String,
        /// `<https://...>` form.
        autolink: bool,
    },
    Image { destination: String, title: String },
    BlockQuote,
    HorizontalRule,
    HtmlBlock(String),
    InlineHtml(String),
    Table(Vec<Alignment>),
    TableHead,
    TableRow,
    TableCell,
    /// Construct the model has no kind for, kept so the walk can skip it.
    Unsupported { name: &'static str, block: bool },
}

impl NodeKind {
    /// Whether the node occupies its own block in the rendered document.
    ///
    /// List items are excluded: they are laid out by their list.
    #[must_use]
    pub fn is_block(&self) -> bool {
        match self {
            Self::Paragraph
            | Self::Heading(_)
            | Self::CodeBlock { .. }
            | Self::List { .. }
            | Self::BlockQuote
            | Self::HorizontalRule
            | Self::HtmlBlock(_)
            | Self::Table(_) => true,
            Self::Unsupported { block, .. } => *block,
            _ => false,
        }
    }

    /// Short lowercase name, used in diagnostics and the AST dump.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Paragraph => "paragraph",
            Self::Heading(_) => "heading",
            Self::Text(_) => "text",
            Self::SoftBreak => "soft_break",
            Self::HardBreak => "hard_break",
            Self::TaskMarker(_) => "task_marker",
            Self::Emphasis => "emphasis",
            Self::Strong => "strong",
            Self::Strikethrough => "strikethrough",
            Self::CodeSpan(_) => "code_span",
            Self::CodeBlock { .. } => "code_block",
            Self::List { .. } => "list",
            Self::ListItem => "list_item",
            Self::Link { .. } => "link",
            Self::Image { .. } => "image",
            Self::BlockQuote => "block_quote",
            Self::HorizontalRule => "horizontal_rule",
            Self::HtmlBlock(_) => "html_block",
            Self::InlineHtml(_) => "inline_html",
            Self::Table(_) => "table",
            Self::TableHead => "table_head",
            Self::TableRow => "table_row",
            Self::TableCell => "table_cell",
            Self::Unsupported { name, .. } => *name,
        }
    }

    /// Literal payload for leaf kinds.
    #[must_use]
    pub fn literal(&self) -> Option<&str> {
        match self {
            Self::Text(s) | Self::CodeSpan(s) | Self::HtmlBlock(s) | Self::InlineHtml(s) => {
                Some(s)
            }
            Self::CodeBlock { literal, .. } => Some(literal),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_kinds() {
        assert!(NodeKind::Paragraph.is_block());
        assert!(NodeKind::HorizontalRule.is_block());
        assert!(NodeKind::Table(Vec::new()).is_block());
        assert!(!NodeKind::ListItem.is_block());
        assert!(!NodeKind::Text("x".to_owned()).is_block());
    }

    #[test]
    fn test_unsupported_block_flag() {
        let block = NodeKind::Unsupported {
            name: "footnote_definition",
            block: true,
        };
        let inline = NodeKind::Unsupported {
            name: "footnote_reference",
            block: false,
        };
        assert!(block.is_block());
        assert!(!inline.is_block());
        assert_eq!(block.name(), "footnote_definition");
    }

    #[test]
    fn test_literal() {
        let code = NodeKind::CodeBlock {
            literal: "fn main() {}\n".to_owned(),
            info: "rust".to_owned(),
        };
        assert_eq!(code.literal(), Some("fn main() {}\n"));
        assert_eq!(NodeKind::Emphasis.literal(), None);
    }
}
