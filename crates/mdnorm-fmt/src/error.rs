//! Error types for formatting.

/// Internal-consistency failure during a render.
///
/// These never describe a property of the input document: they mean the
/// walk delivered events out of order or a tree was assembled by hand with
/// parts in impossible places.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("render stack underflow")]
    StackUnderflow,
    #[error("render stack unbalanced after walk: {pushes} pushes, {pops} pops")]
    Unbalanced { pushes: usize, pops: usize },
    #[error("list nesting depth underflow")]
    ListDepthUnderflow,
    #[error("{0} outside of a table")]
    OrphanTablePart(&'static str),
}

/// Invalid formatting option.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OptionsError {
    #[error("unsupported bullet character {0:?} (expected '-', '+' or '*')")]
    Bullet(String),
    #[error("unsupported rule character {0:?} (expected '-', '*' or '_')")]
    RuleChar(String),
    #[error("rule length must be at least 3, got {0}")]
    RuleLength(usize),
    #[error("list indent must be one or more spaces, got {0:?}")]
    ListIndent(String),
    #[error("unknown heading style {0:?} (expected \"atx\" or \"setext\")")]
    HeadingStyle(String),
}
