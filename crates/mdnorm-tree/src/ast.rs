//! Serializable view of a tree, for JSON dumps.

use serde::Serialize;

use crate::node::{Alignment, NodeKind};
use crate::tree::{NodeRef, Tree};

/// One node of the dump.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AstNode {
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub literal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attrs: Option<AstAttrs>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<AstNode>,
}

/// Structured attributes of the kinds that carry any.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AstAttrs {
    Heading {
        level: u8,
    },
    CodeBlock {
        info: String,
    },
    List {
        ordered: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        start: Option<u64>,
        tight: bool,
    },
    Link {
        destination: String,
        title: String,
    },
    Table {
        alignments: Vec<&'static str>,
    },
    TaskMarker {
        checked: bool,
    },
}

impl Tree {
    /// Build the serializable dump of the whole tree.
    ///
    /// Built with an explicit stack of open nodes. Serializing and dropping
    /// the result still recurse once per nesting level.
    #[must_use]
    pub fn to_ast(&self) -> AstNode {
        let root = self.root();
        let mut open = vec![(shallow_ast(root), root.children())];
        let mut done = None;
        while let Some((_, children)) = open.last_mut() {
            if let Some(child) = children.next() {
                open.push((shallow_ast(child), child.children()));
            } else if let Some((node, _)) = open.pop() {
                match open.last_mut() {
                    Some((parent, _)) => parent.children.push(node),
                    None => done = Some(node),
                }
            }
        }
        done.unwrap_or_else(|| shallow_ast(root))
    }
}

/// Dump of `node` without its children.
fn shallow_ast(node: NodeRef<'_>) -> AstNode {
    let kind = node.kind();
    AstNode {
        kind: kind.name(),
        literal: kind.literal().map(str::to_owned),
        attrs: attrs(kind),
        children: Vec::new(),
    }
}

fn attrs(kind: &NodeKind) -> Option<AstAttrs> {
    match kind {
        NodeKind::Heading(level) => Some(AstAttrs::Heading { level: *level }),
        NodeKind::CodeBlock { info, .. } if !info.is_empty() => {
            Some(AstAttrs::CodeBlock { info: info.clone() })
        }
        NodeKind::List {
            ordered,
            start,
            tight,
        } => Some(AstAttrs::List {
            ordered: *ordered,
            start: *start,
            tight: *tight,
        }),
        NodeKind::Link {
            destination, title, ..
        }
        | NodeKind::Image { destination, title } => Some(AstAttrs::Link {
            destination: destination.clone(),
            title: title.clone(),
        }),
        NodeKind::Table(alignments) => Some(AstAttrs::Table {
            alignments: alignments.iter().map(|a| alignment_name(*a)).collect(),
        }),
        NodeKind::TaskMarker(checked) => Some(AstAttrs::TaskMarker { checked: *checked }),
        _ => None,
    }
}

fn alignment_name(alignment: Alignment) -> &'static str {
    match alignment {
        Alignment::None => "none",
        Alignment::Left => "left",
        Alignment::Center => "center",
        Alignment::Right => "right",
    }
}
