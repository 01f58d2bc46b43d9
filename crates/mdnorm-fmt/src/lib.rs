//! Canonical Markdown renderer.
//!
//! Walks an [`mdnorm_tree::Tree`] and writes it back as Markdown with one
//! consistent style: ATX headings, `-` bullets, renumbered ordered lists,
//! backtick fences, inline links and paragraphs re-wrapped to a configurable
//! width. Rendering a document, parsing the output and rendering again yields
//! the same text.
//!
//! Output for nested constructs is assembled on a [`ContextStack`]: every
//! open container owns a text buffer and knows the full line prefix (list
//! indentation, `> ` markers) its content must carry.
//!
//! # Example
//!
//! ```
//! use mdnorm_fmt::MarkdownRenderer;
//!
//! let result = MarkdownRenderer::new()
//!     .render_markdown("Heading\n=======\n\n* item\n")
//!     .unwrap();
//! assert_eq!(result.markdown, "# Heading\n\n- item\n");
//! ```

mod error;
mod escape;
mod options;
mod renderer;
mod stack;
mod state;
mod wrap;

pub use error::{OptionsError, RenderError};
pub use options::{Bullet, DEFAULT_LINE_WIDTH, FormatOptions, HeadingStyle, RuleChar};
pub use renderer::{MarkdownRenderer, RenderResult};
pub use stack::{ContextStack, StackStats};
pub use wrap::wrap;
