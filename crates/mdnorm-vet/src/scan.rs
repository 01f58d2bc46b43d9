//! The byte-level scans.
//!
//! Each scan appends unlocated faults in the order it finds them. Scans are
//! independent of each other and of any Markdown parser.

use memchr::{memchr, memmem};

use crate::fault::{Fault, FaultKind};

/// A single pass over the raw document.
pub(crate) type Scan = fn(&[u8], &mut Vec<Fault>);

/// Every scan run by [`crate::vet`].
pub(crate) const SCANS: [Scan; 2] = [scan_links, scan_code_fences];

const FENCE: &[u8] = b"```";

/// Check `[text](url)` syntax.
///
/// A bracket not followed by `(` is plain text. The first runaway bracket or
/// parenthesis ends the scan, since everything after it is ambiguous.
pub(crate) fn scan_links(raw: &[u8], faults: &mut Vec<Fault>) {
    let mut pos = 0;
    while let Some(found) = memchr(b'[', &raw[pos..]) {
        let start = pos + found;
        let text_start = start + 1;
        let Some(text_len) = memchr(b']', &raw[text_start..]) else {
            faults.push(Fault::new(start, FaultKind::RunawayLinkText));
            return;
        };
        let text = &raw[text_start..text_start + text_len];
        let after_text = text_start + text_len + 1;

        let gap = raw[after_text..]
            .iter()
            .take_while(|&&b| b == b' ' || b == b'\t')
            .count();
        match raw.get(after_text + gap) {
            None => return,
            Some(b'(') => {}
            Some(_) => {
                pos = after_text;
                continue;
            }
        }
        if gap > 0 {
            faults.push(Fault::new(start, FaultKind::LinkSpaceBetweenTextAndLink));
        }

        let url_start = after_text + gap + 1;
        let Some(url_len) = memchr(b')', &raw[url_start..]) else {
            faults.push(Fault::new(start, FaultKind::RunawayLinkUrl));
            return;
        };
        let url = &raw[url_start..url_start + url_len];

        if contains_blank_line(text) {
            faults.push(Fault::new(start, FaultKind::LinkTextWhitespace));
        }
        if memchr(b'\n', url).is_some() {
            faults.push(Fault::new(start, FaultKind::LinkUrlWhitespace));
        }
        pos = url_start + url_len + 1;
    }
}

fn contains_blank_line(text: &[u8]) -> bool {
    memmem::find(text, b"\n\n").is_some() || memmem::find(text, b"\n\r\n").is_some()
}

/// Check that line-leading triple-backtick fences pair up.
///
/// An odd count means the last fence was never closed.
pub(crate) fn scan_code_fences(raw: &[u8], faults: &mut Vec<Fault>) {
    let mut count = 0usize;
    let mut last = 0;
    for offset in memmem::find_iter(raw, FENCE) {
        let line_start = offset
            .checked_sub(1)
            .is_none_or(|prev| raw.get(prev) == Some(&b'\n'));
        if line_start {
            count += 1;
            last = offset;
        }
    }
    if count % 2 == 1 {
        faults.push(Fault::new(last, FaultKind::RunawayCodeFence));
    }
}
