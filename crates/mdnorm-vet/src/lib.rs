//! Structural fault scanner for raw Markdown.
//!
//! Some malformed documents still parse: an unclosed fence swallows the rest
//! of the file as code, a link whose text spans a blank line silently turns
//! into two paragraphs of brackets. [`vet`] looks for these patterns directly
//! in the bytes, without a Markdown parser, and reports where they are.
//!
//! # Example
//!
//! ```
//! use mdnorm_vet::{FaultKind, vet};
//!
//! let faults = vet(b"See [docs] (http://example.com).\n");
//! assert_eq!(faults.len(), 1);
//! assert_eq!(faults[0].reason, FaultKind::LinkSpaceBetweenTextAndLink);
//! assert_eq!((faults[0].row, faults[0].column), (1, 5));
//! ```

mod fault;
mod position;
mod scan;

pub use fault::{Fault, FaultKind};

/// Scan `raw` for structural faults.
///
/// Faults are ordered by byte offset; faults at the same offset keep the
/// order in which they were found. An empty result means the document is
/// clean. Any byte sequence is accepted.
pub fn vet(raw: &[u8]) -> Vec<Fault> {
    let mut faults = Vec::new();
    for scan in scan::SCANS {
        scan(raw, &mut faults);
    }
    faults.sort_by_key(|fault| fault.offset);
    position::locate(raw, &mut faults);

    tracing::debug!(bytes = raw.len(), faults = faults.len(), "Vetted document");
    faults
}
