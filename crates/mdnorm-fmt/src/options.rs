//! Formatting options.

use std::fmt;
use std::str::FromStr;

use crate::error::OptionsError;

/// Default wrap column.
pub const DEFAULT_LINE_WIDTH: i32 = 70;

/// Marker used for unordered list items.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Bullet {
    #[default]
    Dash,
    Plus,
    Star,
}

impl Bullet {
    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Self::Dash => '-',
            Self::Plus => '+',
            Self::Star => '*',
        }
    }
}

impl FromStr for Bullet {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "-" => Ok(Self::Dash),
            "+" => Ok(Self::Plus),
            "*" => Ok(Self::Star),
            _ => Err(OptionsError::Bullet(s.to_owned())),
        }
    }
}

/// Character repeated to draw a horizontal rule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RuleChar {
    #[default]
    Dash,
    Star,
    Underscore,
}

impl RuleChar {
    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Self::Dash => '-',
            Self::Star => '*',
            Self::Underscore => '_',
        }
    }
}

impl FromStr for RuleChar {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "-" => Ok(Self::Dash),
            "*" => Ok(Self::Star),
            "_" => Ok(Self::Underscore),
            _ => Err(OptionsError::RuleChar(s.to_owned())),
        }
    }
}

/// How headings of level 1 and 2 are written.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HeadingStyle {
    /// `# Title`
    #[default]
    Atx,
    /// `Title` underlined with `=` or `-`. Levels 3 to 6 stay ATX.
    Setext,
}

impl FromStr for HeadingStyle {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "atx" => Ok(Self::Atx),
            "setext" => Ok(Self::Setext),
            _ => Err(OptionsError::HeadingStyle(s.to_owned())),
        }
    }
}

impl fmt::Display for HeadingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Atx => "atx",
            Self::Setext => "setext",
        })
    }
}

/// Options controlling the canonical output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormatOptions {
    /// Wrap column. Values `<= 1` disable wrapping.
    pub line_width: i32,
    /// Offset between a list's bullets and those of a list nested in it.
    list_indent: String,
    pub bullet: Bullet,
    pub hr_char: RuleChar,
    hr_length: usize,
    pub heading_style: HeadingStyle,
}

impl FormatOptions {
    /// Set the nested-list indent unit.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::ListIndent`] unless `indent` is one or more spaces.
    pub fn set_list_indent(&mut self, indent: &str) -> Result<(), OptionsError> {
        if indent.is_empty() || indent.bytes().any(|b| b != b' ') {
            return Err(OptionsError::ListIndent(indent.to_owned()));
        }
        indent.clone_into(&mut self.list_indent);
        Ok(())
    }

    /// Set how many rule characters a horizontal rule has.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::RuleLength`] for lengths below 3, which would
    /// no longer parse as a rule.
    pub fn set_hr_length(&mut self, length: usize) -> Result<(), OptionsError> {
        if length < 3 {
            return Err(OptionsError::RuleLength(length));
        }
        self.hr_length = length;
        Ok(())
    }

    #[must_use]
    pub fn list_indent(&self) -> &str {
        &self.list_indent
    }

    #[must_use]
    pub fn hr_length(&self) -> usize {
        self.hr_length
    }

    /// Wrap width with the "unlimited" convention resolved.
    #[must_use]
    pub(crate) fn wrap_width(&self) -> usize {
        usize::try_from(self.line_width).unwrap_or(0)
    }

    /// Rendered horizontal rule, without indentation.
    #[must_use]
    pub(crate) fn rule(&self) -> String {
        std::iter::repeat_n(self.hr_char.as_char(), self.hr_length).collect()
    }
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            line_width: DEFAULT_LINE_WIDTH,
            list_indent: "    ".to_owned(),
            bullet: Bullet::Dash,
            hr_char: RuleChar::Dash,
            hr_length: 3,
            heading_style: HeadingStyle::Atx,
        }
    }
}
