//! Render context stack.

use crate::error::RenderError;

/// One open construct: its private output and its resolved indent.
#[derive(Debug, Default)]
struct Frame {
    text: String,
    indent: String,
}

/// Push and pop counters of a [`ContextStack`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StackStats {
    pub pushes: usize,
    pub pops: usize,
    /// Deepest nesting reached, root frame included.
    pub max_depth: usize,
}

/// Stack of nested text buffers, one per open construct.
///
/// Each frame's indent is the concatenation of every ancestor's delta, so a
/// paragraph inside a block quote inside a list item knows its full line
/// prefix without asking its ancestors.
///
/// # Example
///
/// ```
/// use mdnorm_fmt::ContextStack;
///
/// let mut stack = ContextStack::new();
/// stack.push("  ");
/// stack.push("> ");
/// stack.peek().unwrap().push_str("quoted");
/// let (text, indent) = stack.pop().unwrap();
/// assert_eq!(text, "quoted");
/// assert_eq!(indent, "  > ");
/// ```
#[derive(Debug)]
pub struct ContextStack {
    frames: Vec<Frame>,
    stats: StackStats,
}

impl ContextStack {
    /// Create a stack holding an empty, unindented frame.
    ///
    /// The initial frame is not counted as a push.
    #[must_use]
    pub fn new() -> Self {
        Self {
            frames: vec![Frame::default()],
            stats: StackStats {
                max_depth: 1,
                ..StackStats::default()
            },
        }
    }

    /// Open a frame indented by the current indent plus `delta`.
    pub fn push(&mut self, delta: &str) {
        let mut indent = self.frames.last().map(|f| f.indent.clone()).unwrap_or_default();
        indent.push_str(delta);
        self.frames.push(Frame {
            text: String::new(),
            indent,
        });
        self.stats.pushes += 1;
        self.stats.max_depth = self.stats.max_depth.max(self.frames.len());
    }

    /// Accumulator of the top frame.
    pub fn peek(&mut self) -> Result<&mut String, RenderError> {
        self.frames
            .last_mut()
            .map(|f| &mut f.text)
            .ok_or(RenderError::StackUnderflow)
    }

    /// Resolved indent of the top frame.
    pub fn indent(&self) -> Result<&str, RenderError> {
        self.frames
            .last()
            .map(|f| f.indent.as_str())
            .ok_or(RenderError::StackUnderflow)
    }

    /// Remove the top frame, returning its text and resolved indent.
    pub fn pop(&mut self) -> Result<(String, String), RenderError> {
        let frame = self.frames.pop().ok_or(RenderError::StackUnderflow)?;
        self.stats.pops += 1;
        Ok((frame.text, frame.indent))
    }

    /// Number of open frames.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn stats(&self) -> StackStats {
        self.stats
    }
}

impl Default for ContextStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_concatenates() {
        let mut stack = ContextStack::new();
        assert_eq!(stack.indent().unwrap(), "");
        stack.push("    ");
        stack.push("> ");
        stack.push("  ");
        assert_eq!(stack.indent().unwrap(), "    >   ");
        assert_eq!(stack.depth(), 4);
    }

    #[test]
    fn test_frames_are_isolated() {
        let mut stack = ContextStack::new();
        stack.peek().unwrap().push_str("outer");
        stack.push("");
        stack.peek().unwrap().push_str("inner");
        let (inner, _) = stack.pop().unwrap();
        assert_eq!(inner, "inner");
        assert_eq!(stack.peek().unwrap(), "outer");
    }

    #[test]
    fn test_underflow() {
        let mut stack = ContextStack::new();
        stack.pop().unwrap();
        assert_eq!(stack.pop(), Err(RenderError::StackUnderflow));
        assert_eq!(stack.peek().map(|s| s.len()), Err(RenderError::StackUnderflow));
        assert_eq!(stack.indent(), Err(RenderError::StackUnderflow));
    }

    #[test]
    fn test_stats() {
        let mut stack = ContextStack::new();
        stack.push("a");
        stack.push("b");
        stack.pop().unwrap();
        stack.push("c");
        stack.pop().unwrap();
        stack.pop().unwrap();
        assert_eq!(
            stack.stats(),
            StackStats {
                pushes: 3,
                pops: 3,
                max_depth: 3,
            }
        );
        assert_eq!(stack.depth(), 1);
    }
}
