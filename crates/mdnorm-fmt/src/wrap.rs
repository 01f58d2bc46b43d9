//! Greedy word wrapping with a first-line prefix and continuation indent.

/// Wrap `words` into lines shorter than `width` characters.
///
/// The first line starts with `first_prefix`, every following line with
/// `cont_indent`. Columns are counted in `char`s. A `width` of 0 or 1 means
/// no wrapping at all.
///
/// Words are never split. A word too long to fit even on an empty
/// continuation line is placed alone on a continuation line, even when it
/// is the first word, and the word after it starts a new line. A word that
/// would read as block syntax at the start of a line (a list marker, `#`,
/// `>`, a fence, a rule or an HTML block opener) is kept on the current line
/// even when that overflows `width`, so wrapping never changes the structure
/// of the document on re-parse.
///
/// # Examples
///
/// ```
/// use mdnorm_fmt::wrap;
///
/// assert_eq!(wrap(["foo"], 78, "", ""), "foo");
/// assert_eq!(wrap(["aaa", "bbb", "ccc"], 8, "> ", "> "), "> aaa\n> bbb\n> ccc");
/// assert_eq!(wrap(["overlong"], 5, "", "  "), "\n  overlong");
/// ```
pub fn wrap<'a, I>(words: I, width: usize, first_prefix: &str, cont_indent: &str) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let width = if width <= 1 { usize::MAX } else { width };
    let cont_len = cont_indent.chars().count();
    let overlong = width.saturating_sub(cont_len);

    let mut out = String::from(first_prefix);
    let mut col = first_prefix.chars().count();
    let mut line_has_words = false;
    let mut break_next = false;

    for word in words {
        let len = word.chars().count();
        let too_long = len > overlong;
        let overflows = col.saturating_add(1).saturating_add(len) >= width;
        let wants_break = too_long || (line_has_words && (break_next || overflows));
        if wants_break && !starts_block(word) {
            out.push('\n');
            out.push_str(cont_indent);
            col = cont_len;
            line_has_words = false;
        }
        if line_has_words {
            out.push(' ');
            col += 1;
        }
        out.push_str(word);
        col += len;
        line_has_words = true;
        break_next = too_long;
    }

    out
}

/// Whether `word` at the start of a line would open a block construct.
fn starts_block(word: &str) -> bool {
    let bytes = word.as_bytes();
    let Some(&first) = bytes.first() else {
        return false;
    };
    if first == b'>' || bytes.starts_with(b"```") || bytes.starts_with(b"~~~") {
        return true;
    }
    // bullets, ATX markers, rules and setext underlines
    if matches!(first, b'-' | b'+' | b'*' | b'_' | b'=' | b'#') && bytes.iter().all(|&b| b == first)
    {
        return true;
    }
    // ordered list markers: `1.` or `1)`
    let digits = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    if (1..=9).contains(&digits) && bytes.len() == digits + 1 && matches!(bytes[digits], b'.' | b')')
    {
        return true;
    }
    opens_html_block(bytes)
}

/// Tags whose opening or closing tag starts an HTML block that may
/// interrupt a paragraph.
const BLOCK_TAGS: [&str; 62] = [
    "address", "article", "aside", "base", "basefont", "blockquote", "body", "caption", "center",
    "col", "colgroup", "dd", "details", "dialog", "dir", "div", "dl", "dt", "fieldset",
    "figcaption", "figure", "footer", "form", "frame", "frameset", "h1", "h2", "h3", "h4", "h5",
    "h6", "head", "header", "hr", "html", "iframe", "legend", "li", "link", "main", "menu",
    "menuitem", "nav", "noframes", "ol", "optgroup", "option", "p", "param", "search", "section",
    "summary", "table", "tbody", "td", "tfoot", "th", "thead", "title", "tr", "track", "ul",
];

/// Tags whose raw content runs to the matching closing tag.
const RAW_TAGS: [&str; 4] = ["pre", "script", "style", "textarea"];

/// Whether `word` at the start of a line opens an HTML block that can
/// interrupt a paragraph: comments, processing instructions, declarations,
/// CDATA, raw-content tags and block-level tags.
fn opens_html_block(word: &[u8]) -> bool {
    let Some(rest) = word.strip_prefix(b"<") else {
        return false;
    };
    if rest.starts_with(b"!--") || rest.starts_with(b"?") || rest.starts_with(b"![CDATA[") {
        return true;
    }
    if rest.first() == Some(&b'!') && rest.get(1).is_some_and(u8::is_ascii_alphabetic) {
        return true;
    }

    let closing = rest.first() == Some(&b'/');
    let tag = if closing { &rest[1..] } else { rest };
    let name_len = tag.iter().take_while(|b| b.is_ascii_alphanumeric()).count();
    let (name, after) = tag.split_at(name_len);
    let is = |tags: &[&str]| tags.iter().any(|t| t.as_bytes().eq_ignore_ascii_case(name));

    if !closing && is(&RAW_TAGS) && (after.is_empty() || after[0] == b'>') {
        return true;
    }
    is(&BLOCK_TAGS) && (after.is_empty() || after[0] == b'>' || after.starts_with(b"/>"))
}

/// Backslash-escape `word` if it would open a block at the start of a
/// paragraph. Returns `None` when no escape is needed.
pub(crate) fn escape_block_start(word: &str) -> Option<String> {
    if !starts_block(word) {
        return None;
    }
    let digits = word.bytes().take_while(u8::is_ascii_digit).count();
    if digits > 0 {
        // `1.` -> `1\.`
        let (number, marker) = word.split_at(digits);
        return Some(format!("{number}\\{marker}"));
    }
    Some(format!("\\{word}"))
}
