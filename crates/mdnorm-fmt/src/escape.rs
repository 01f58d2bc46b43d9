//! Escaping helpers for inline constructs.

use std::borrow::Cow;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// Characters that cannot appear raw in an inline link destination.
const DESTINATION: &AsciiSet = &CONTROLS.add(b' ').add(b'<').add(b'>');

/// Longest run of `c` in `content`.
fn longest_run(content: &str, c: char) -> usize {
    let mut max_run = 0;
    let mut current_run = 0;
    for ch in content.chars() {
        if ch == c {
            current_run += 1;
            max_run = max_run.max(current_run);
        } else {
            current_run = 0;
        }
    }
    max_run
}

/// Backtick fence long enough not to be closed by `content`.
pub(crate) fn code_fence(content: &str) -> String {
    "`".repeat(longest_run(content, '`').max(2) + 1)
}

/// Inline code span for `literal`.
pub(crate) fn code_span(literal: &str) -> String {
    let ticks = "`".repeat(longest_run(literal, '`') + 1);
    if literal.starts_with('`') || literal.ends_with('`') {
        format!("{ticks} {literal} {ticks}")
    } else {
        format!("{ticks}{literal}{ticks}")
    }
}

/// Destination of an inline link, percent-encoded where it would break
/// the `(...)` syntax.
///
/// Destinations that are already safe are returned untouched, so non-ASCII
/// paths stay readable.
pub(crate) fn link_destination(destination: &str) -> Cow<'_, str> {
    let unsafe_byte = destination
        .bytes()
        .any(|b| b.is_ascii_control() || matches!(b, b' ' | b'<' | b'>'));
    if unsafe_byte {
        utf8_percent_encode(destination, DESTINATION).into()
    } else {
        Cow::Borrowed(destination)
    }
}

/// Link title body for a `"..."` title.
pub(crate) fn link_title(title: &str) -> Cow<'_, str> {
    if title.contains('"') {
        Cow::Owned(title.replace('"', "\\\""))
    } else {
        Cow::Borrowed(title)
    }
}

/// Text literal with every character that could start inline markup
/// backslash-escaped.
///
/// `_` is left alone inside a word, where it can never open emphasis.
/// `<` and `&` are escaped only where they would start a tag or an entity.
/// Newlines become spaces.
pub(crate) fn inline_text(text: &str) -> Cow<'_, str> {
    let special = text
        .bytes()
        .any(|b| matches!(b, b'\\' | b'`' | b'*' | b'_' | b'[' | b']' | b'~' | b'<' | b'&' | b'\n'));
    if !special {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 8);
    let mut prev: Option<char> = None;
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        let next = chars.peek().map(|&(_, n)| n);
        let escape = match c {
            '\\' | '`' | '*' | '[' | ']' | '~' => true,
            '_' => !(prev.is_some_and(char::is_alphanumeric) && next.is_some_and(char::is_alphanumeric)),
            '<' => next.is_some_and(|n| n.is_ascii_alphabetic() || matches!(n, '/' | '!' | '?')),
            '&' => starts_entity(&text[i + 1..]),
            _ => false,
        };
        if escape {
            out.push('\\');
        }
        let c = if c == '\n' { ' ' } else { c };
        out.push(c);
        prev = Some(c);
    }
    Cow::Owned(out)
}

/// Whether `rest`, the text after an `&`, reads as an entity reference.
fn starts_entity(rest: &str) -> bool {
    let len = rest
        .bytes()
        .take_while(|b| b.is_ascii_alphanumeric() || *b == b'#')
        .count();
    len > 0 && rest.as_bytes().get(len) == Some(&b';')
}

/// Table cell content with pipes escaped.
pub(crate) fn table_cell(content: &str) -> Cow<'_, str> {
    if content.contains('|') {
        Cow::Owned(content.replace('|', "\\|"))
    } else {
        Cow::Borrowed(content)
    }
}
