//! Fault records.

use std::fmt;

/// Kind of structural defect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FaultKind {
    /// A line-leading triple-backtick fence that is never closed.
    RunawayCodeFence,
    /// `[` without a matching `]`.
    RunawayLinkText,
    /// `](` without a matching `)`.
    #[cfg_attr(feature = "serde", serde(rename = "RunawayLinkURL"))]
    RunawayLinkUrl,
    /// Link text spanning a blank line.
    LinkTextWhitespace,
    /// Link destination containing a newline.
    #[cfg_attr(feature = "serde", serde(rename = "LinkURLWhitespace"))]
    LinkUrlWhitespace,
    /// Spaces or tabs between `]` and `(`.
    LinkSpaceBetweenTextAndLink,
}

impl FaultKind {
    /// Stable name used in reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RunawayCodeFence => "RunawayCodeFence",
            Self::RunawayLinkText => "RunawayLinkText",
            Self::RunawayLinkUrl => "RunawayLinkURL",
            Self::LinkTextWhitespace => "LinkTextWhitespace",
            Self::LinkUrlWhitespace => "LinkURLWhitespace",
            Self::LinkSpaceBetweenTextAndLink => "LinkSpaceBetweenTextAndLink",
        }
    }

    /// Human-readable description.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::RunawayCodeFence => "code fence is never closed",
            Self::RunawayLinkText => "link text is never closed with ']'",
            Self::RunawayLinkUrl => "link URL is never closed with ')'",
            Self::LinkTextWhitespace => "link text contains a blank line",
            Self::LinkUrlWhitespace => "link URL contains a newline",
            Self::LinkSpaceBetweenTextAndLink => "whitespace between link text and link URL",
        }
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A located structural defect.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Fault {
    /// Byte offset of the construct that triggered the fault.
    pub offset: usize,
    pub reason: FaultKind,
    /// 1-based line number.
    pub row: usize,
    /// 1-based byte column within the line.
    pub column: usize,
    /// Source line holding `offset`, without its line terminator.
    pub line: String,
}

impl Fault {
    /// Unlocated fault; position fields are filled in by [`crate::vet`].
    pub(crate) fn new(offset: usize, reason: FaultKind) -> Self {
        Self {
            offset,
            reason,
            row: 0,
            column: 0,
            line: String::new(),
        }
    }
}
