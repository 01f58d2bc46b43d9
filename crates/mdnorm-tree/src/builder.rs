//! Incremental tree construction.

use crate::node::{NodeId, NodeKind};
use crate::tree::Tree;

/// Builds a [`Tree`] top-down, one open container at a time.
///
/// The event adapter drives it from pulldown-cmark events; tests use it to
/// assemble trees no parser would emit.
///
/// # Example
///
/// ```
/// use mdnorm_tree::{NodeKind, TreeBuilder};
///
/// let mut builder = TreeBuilder::new();
/// builder.open(NodeKind::Paragraph);
/// builder.leaf(NodeKind::Text("hello".to_owned()));
/// builder.close();
/// let tree = builder.finish();
/// assert_eq!(tree.len(), 3);
/// ```
#[derive(Debug)]
pub struct TreeBuilder {
    tree: Tree,
    /// Open containers, root first. Never empty.
    open: Vec<NodeId>,
}

impl TreeBuilder {
    #[must_use]
    pub fn new() -> Self {
        let tree = Tree::new();
        let root = tree.root().id();
        Self {
            tree,
            open: vec![root],
        }
    }

    /// The container new nodes are appended to.
    #[must_use]
    pub fn current(&self) -> NodeId {
        self.open[self.open.len() - 1]
    }

    /// Kind of the current container.
    #[must_use]
    pub fn current_kind(&self) -> &NodeKind {
        &self.tree.nodes[self.current().0].kind
    }

    /// Number of open containers below the root.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.open.len() - 1
    }

    /// Append a container under the current node and make it current.
    pub fn open(&mut self, kind: NodeKind) -> NodeId {
        let id = self.tree.append(self.current(), kind);
        self.open.push(id);
        id
    }

    /// Append a childless node under the current node.
    pub fn leaf(&mut self, kind: NodeKind) -> NodeId {
        self.tree.append(self.current(), kind)
    }

    /// Close the current container. The root is never closed.
    pub fn close(&mut self) -> Option<NodeId> {
        if self.open.len() > 1 {
            self.open.pop()
        } else {
            tracing::debug!("Ignoring close with no open container");
            None
        }
    }

    /// Replace the kind of a node that is already in the tree.
    pub fn set_kind(&mut self, id: NodeId, kind: NodeKind) {
        *self.tree.kind_mut(id) = kind;
    }

    /// Mutable access to the kind of an existing node.
    pub fn kind_mut(&mut self, id: NodeId) -> &mut NodeKind {
        self.tree.kind_mut(id)
    }

    /// Finish building. Containers left open are closed implicitly.
    #[must_use]
    pub fn finish(self) -> Tree {
        if self.open.len() > 1 {
            tracing::debug!(open = self.open.len() - 1, "Closing unterminated containers");
        }
        self.tree
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
