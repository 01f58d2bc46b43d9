//! Status lines on stderr for `fmt` and `vet`.
//!
//! Formatted Markdown and fault reports go to stdout; everything here goes
//! to stderr so the two never mix.

use console::{Style, Term};

/// Colored status lines: files rewritten, files left alone, fault counts
/// and renderer warnings.
pub(crate) struct Output {
    term: Term,
    green: Style,
    yellow: Style,
    red: Style,
}

impl Output {
    /// Write to stderr.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
        }
    }

    /// Neutral note, e.g. a file `fmt --write` left unchanged.
    pub(crate) fn info(&self, msg: &str) {
        self.line(msg);
    }

    /// Green: a file was rewritten, or `vet` found nothing.
    pub(crate) fn success(&self, msg: &str) {
        self.line(&self.green.apply_to(msg).to_string());
    }

    /// Yellow: renderer warnings and fault summaries.
    pub(crate) fn warning(&self, msg: &str) {
        self.line(&self.yellow.apply_to(msg).to_string());
    }

    /// Red: the final `Error: ...` line before a non-zero exit.
    pub(crate) fn error(&self, msg: &str) {
        self.line(&self.red.apply_to(msg).to_string());
    }

    /// Write one line. Failures are logged, not returned.
    fn line(&self, text: &str) {
        if let Err(err) = self.term.write_line(text) {
            tracing::debug!(error = %err, "Status line dropped");
        }
    }
}
