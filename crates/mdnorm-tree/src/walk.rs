//! Depth-first enter/exit traversal.

use crate::tree::{NodeRef, Tree};

/// What the walker does after a node has been entered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WalkStatus {
    /// Descend into the children.
    Continue,
    /// Skip the subtree. The exit event for the node is still delivered.
    SkipChildren,
}

/// Callbacks invoked by [`Tree::walk`].
///
/// Every visited node receives exactly one `entering == true` call followed,
/// after its subtree, by exactly one `entering == false` call. The status
/// returned on exit is ignored.
pub trait Visitor {
    type Error;

    fn visit(&mut self, node: NodeRef<'_>, entering: bool) -> Result<WalkStatus, Self::Error>;
}

impl Tree {
    /// Drive `visitor` over the whole tree, depth first.
    ///
    /// The traversal keeps an explicit stack, so deeply nested documents do
    /// not grow the call stack. The first error aborts the walk.
    pub fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut stack = vec![(self.root(), true)];
        while let Some((node, entering)) = stack.pop() {
            let status = visitor.visit(node, entering)?;
            if !entering {
                continue;
            }
            stack.push((node, false));
            if status == WalkStatus::Continue {
                let mut child = node.last_child();
                while let Some(current) = child {
                    stack.push((current, true));
                    child = current.prev();
                }
            }
        }
        Ok(())
    }
}
