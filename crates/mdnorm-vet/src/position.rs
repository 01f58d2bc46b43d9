//! Offset to row/column conversion.

use memchr::memchr;

use crate::fault::Fault;

/// Fill in row, column and line text for faults sorted by offset.
///
/// Walks the document once, whatever the number of faults.
pub(crate) fn locate(raw: &[u8], faults: &mut [Fault]) {
    let mut row = 1;
    let mut line_start = 0;
    let mut line_end = find_line_end(raw, 0);
    let mut line: Option<String> = None;

    for fault in faults {
        // the terminating '\n' belongs to its line
        while fault.offset > line_end && line_end < raw.len() {
            line_start = line_end + 1;
            line_end = find_line_end(raw, line_start);
            row += 1;
            line = None;
        }
        fault.row = row;
        fault.column = fault.offset.saturating_sub(line_start) + 1;
        fault.line = line
            .get_or_insert_with(|| line_text(&raw[line_start..line_end]))
            .clone();
    }
}

fn find_line_end(raw: &[u8], from: usize) -> usize {
    memchr(b'\n', &raw[from..]).map_or(raw.len(), |i| from + i)
}

fn line_text(line: &[u8]) -> String {
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    String::from_utf8_lossy(line).into_owned()
}
