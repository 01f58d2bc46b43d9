//! Arena-backed document tree.

use crate::node::{NodeId, NodeKind};

/// Storage for one node and its structural links.
#[derive(Clone, Debug)]
pub(crate) struct NodeData {
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) first_child: Option<NodeId>,
    pub(crate) last_child: Option<NodeId>,
    pub(crate) prev: Option<NodeId>,
    pub(crate) next: Option<NodeId>,
}

/// Parsed Markdown document.
///
/// Nodes live in a flat arena and refer to each other by [`NodeId`], so
/// parent and sibling links never own what they point at. Index 0 is always
/// the `Document` root.
#[derive(Clone, Debug)]
pub struct Tree {
    pub(crate) nodes: Vec<NodeData>,
}

impl Tree {
    /// Create a tree holding only the `Document` root.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData {
                kind: NodeKind::Document,
                parent: None,
                first_child: None,
                last_child: None,
                prev: None,
                next: None,
            }],
        }
    }

    /// The `Document` node.
    #[must_use]
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            tree: self,
            id: NodeId(0),
        }
    }

    /// Look up a node by id.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_>> {
        (id.0 < self.nodes.len()).then_some(NodeRef { tree: self, id })
    }

    /// Number of nodes, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always has its root, so it is never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Append a new last child under `parent`.
    pub(crate) fn append(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        let prev = self.nodes[parent.0].last_child;
        self.nodes.push(NodeData {
            kind,
            parent: Some(parent),
            first_child: None,
            last_child: None,
            prev,
            next: None,
        });
        match prev {
            Some(prev) => self.nodes[prev.0].next = Some(id),
            None => self.nodes[parent.0].first_child = Some(id),
        }
        self.nodes[parent.0].last_child = Some(id);
        id
    }

    pub(crate) fn kind_mut(&mut self, id: NodeId) -> &mut NodeKind {
        &mut self.nodes[id.0].kind
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

/// Borrowed handle to a node, with navigation to its neighbours.
#[derive(Clone, Copy, Debug)]
pub struct NodeRef<'a> {
    tree: &'a Tree,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    #[must_use]
    pub fn id(self) -> NodeId {
        self.id
    }

    #[must_use]
    pub fn kind(self) -> &'a NodeKind {
        &self.tree.data(self.id).kind
    }

    #[must_use]
    pub fn parent(self) -> Option<Self> {
        self.link(self.tree.data(self.id).parent)
    }

    /// Previous sibling.
    #[must_use]
    pub fn prev(self) -> Option<Self> {
        self.link(self.tree.data(self.id).prev)
    }

    /// Next sibling.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        self.link(self.tree.data(self.id).next)
    }

    #[must_use]
    pub fn first_child(self) -> Option<Self> {
        self.link(self.tree.data(self.id).first_child)
    }

    #[must_use]
    pub fn last_child(self) -> Option<Self> {
        self.link(self.tree.data(self.id).last_child)
    }

    /// Iterate over direct children in document order.
    #[must_use]
    pub fn children(self) -> Children<'a> {
        Children {
            next: self.first_child(),
        }
    }

    /// Whether this node is the first block of a list item.
    #[must_use]
    pub fn is_first_in_item(self) -> bool {
        self.prev().is_none() && self.parent().is_some_and(|p| p.kind() == &NodeKind::ListItem)
    }

    /// Plain text of the subtree: text, code spans, line breaks and task
    /// markers.
    #[must_use]
    pub fn text_content(self) -> String {
        let mut out = String::new();
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            match node.kind() {
                NodeKind::Text(s) | NodeKind::CodeSpan(s) => out.push_str(s),
                NodeKind::SoftBreak | NodeKind::HardBreak => out.push('\n'),
                NodeKind::TaskMarker(true) => out.push_str("[x] "),
                NodeKind::TaskMarker(false) => out.push_str("[ ] "),
                _ => {
                    let children: Vec<_> = node.children().collect();
                    pending.extend(children.into_iter().rev());
                }
            }
        }
        out
    }

    fn link(self, id: Option<NodeId>) -> Option<Self> {
        id.map(|id| Self {
            tree: self.tree,
            id,
        })
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

/// Iterator over the children of a node.
pub struct Children<'a> {
    next: Option<NodeRef<'a>>,
}

impl<'a> Iterator for Children<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.next();
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> NodeKind {
        NodeKind::Text(s.to_owned())
    }

    #[test]
    fn test_new_tree_has_document_root() {
        let tree = Tree::new();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.root().kind(), &NodeKind::Document);
        assert!(tree.root().parent().is_none());
        assert!(tree.root().first_child().is_none());
    }

    #[test]
    fn test_append_links_siblings() {
        let mut tree = Tree::new();
        let root = tree.root().id();
        let a = tree.append(root, NodeKind::Paragraph);
        let b = tree.append(root, NodeKind::HorizontalRule);
        let c = tree.append(root, NodeKind::Paragraph);

        let b_ref = tree.get(b).unwrap();
        assert_eq!(b_ref.prev().map(NodeRef::id), Some(a));
        assert_eq!(b_ref.next().map(NodeRef::id), Some(c));
        assert_eq!(b_ref.parent().map(NodeRef::id), Some(root));
        assert_eq!(tree.root().first_child().map(NodeRef::id), Some(a));
        assert_eq!(tree.root().last_child().map(NodeRef::id), Some(c));

        let ids: Vec<_> = tree.root().children().map(NodeRef::id).collect();
        assert_eq!(ids, vec![a, b, c]);
    }

    #[test]
    fn test_first_in_item() {
        let mut tree = Tree::new();
        let root = tree.root().id();
        let list = tree.append(
            root,
            NodeKind::List {
                ordered: false,
                start: None,
                tight: true,
            },
        );
        let item = tree.append(list, NodeKind::ListItem);
        let first = tree.append(item, NodeKind::Paragraph);
        let second = tree.append(item, NodeKind::Paragraph);

        assert!(tree.get(first).unwrap().is_first_in_item());
        assert!(!tree.get(second).unwrap().is_first_in_item());
        assert!(!tree.get(list).unwrap().is_first_in_item());
    }

    #[test]
    fn test_text_content_in_document_order() {
        let mut tree = Tree::new();
        let root = tree.root().id();
        let heading = tree.append(root, NodeKind::Heading(1));
        tree.append(heading, text("Hello "));
        let em = tree.append(heading, NodeKind::Emphasis);
        tree.append(em, text("big"));
        tree.append(heading, NodeKind::CodeSpan(" world".to_owned()));

        assert_eq!(tree.get(heading).unwrap().text_content(), "Hello big world");
    }

    #[test]
    fn test_get_out_of_range() {
        let tree = Tree::new();
        assert!(tree.get(NodeId(5)).is_none());
    }
}
