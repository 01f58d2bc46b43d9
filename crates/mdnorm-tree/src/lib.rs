//! Markdown document tree for the mdnorm formatter.
//!
//! pulldown-cmark produces a flat stream of start/end events. The formatter
//! needs more than that: when a node is entered it asks for its parent, its
//! previous sibling and whether it is the first child of a list item. This
//! crate folds the event stream into an arena [`Tree`] that answers those
//! questions and drives any [`Visitor`] through a depth-first enter/exit walk.
//!
//! # Example
//!
//! ```
//! use mdnorm_tree::{NodeKind, parse};
//!
//! let tree = parse("# Title\n\nSome *text*.");
//! let heading = tree.root().first_child().unwrap();
//! assert_eq!(heading.kind(), &NodeKind::Heading(1));
//! ```

#[cfg(feature = "serde")]
mod ast;
mod builder;
mod node;
mod parse;
mod tree;
mod walk;

#[cfg(feature = "serde")]
pub use ast::{AstAttrs, AstNode};
pub use builder::TreeBuilder;
pub use node::{Alignment, NodeId, NodeKind};
pub use parse::{default_options, parse, parse_with};
pub use pulldown_cmark::Options;
pub use tree::{Children, NodeRef, Tree};
pub use walk::{Visitor, WalkStatus};
