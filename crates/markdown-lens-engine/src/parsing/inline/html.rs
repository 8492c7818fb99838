//! Structural scan for inline HTML fragments.
//!
//! A regex cannot pair up nested tags, so fragments are found by walking the
//! text with a cursor: each opening tag is parsed, and for paired tags the
//! scan counts same-name opens and closes until the element's own close tag.
//! Nested elements are reported as fragments of their own in addition to the
//! enclosing element, matching a full element enumeration of the text.

use super::cursor::Cursor;

struct OpenTag {
    name: String,
    /// Byte length of the `<...>` source text.
    len: usize,
    self_closing: bool,
}

/// Extracts every HTML element fragment from `text`, in source order.
///
/// Closing tags, comments, and doctype-style declarations are skipped.
/// An opening tag with no matching close yields just the tag itself.
pub(crate) fn scan_fragments(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut cur = Cursor::new(text);
    while !cur.eof() {
        if cur.peek() != Some(b'<') {
            cur.bump();
            continue;
        }
        match cur.peek_at(1) {
            Some(b) if b.is_ascii_alphabetic() => {
                let Some(open) = parse_open_tag(cur.rest()) else {
                    cur.bump();
                    continue;
                };
                let start = cur.pos();
                let end = if open.self_closing {
                    start + open.len
                } else {
                    find_element_end(text, start + open.len, &open.name)
                        .unwrap_or(start + open.len)
                };
                out.push(text[start..end].to_string());
                // Step past the opening tag only, so nested elements are
                // scanned and reported too.
                cur.bump_n(open.len);
            }
            Some(b'/') => skip_past_gt(&mut cur),
            Some(b'!') => {
                if cur.rest().starts_with("<!--") {
                    match cur.rest().find("-->") {
                        Some(idx) => cur.bump_n(idx + 3),
                        None => cur.seek(text.len()),
                    }
                } else {
                    skip_past_gt(&mut cur);
                }
            }
            _ => {
                cur.bump();
            }
        }
    }
    out
}

fn skip_past_gt(cur: &mut Cursor<'_>) {
    while let Some(b) = cur.bump() {
        if b == b'>' {
            break;
        }
    }
}

/// Parses `<name attrs...>` at the start of `rest`.
///
/// Returns `None` when no `>` closes the tag before another `<` begins.
fn parse_open_tag(rest: &str) -> Option<OpenTag> {
    let bytes = rest.as_bytes();
    debug_assert_eq!(bytes.first(), Some(&b'<'));
    let mut i = 1;
    while i < bytes.len() && bytes[i].is_ascii_alphanumeric() {
        i += 1;
    }
    if i == 1 {
        return None;
    }
    let name = rest[1..i].to_string();
    while i < bytes.len() {
        match bytes[i] {
            b'>' => {
                return Some(OpenTag {
                    name,
                    len: i + 1,
                    self_closing: i >= 1 && bytes[i - 1] == b'/',
                });
            }
            b'<' => return None,
            _ => i += 1,
        }
    }
    None
}

/// Finds the byte offset just past the close tag matching `name`, starting
/// the scan at `from`. Same-name nested opens are counted so the outermost
/// close wins.
fn find_element_end(text: &str, from: usize, name: &str) -> Option<usize> {
    let mut cur = Cursor::new(text);
    cur.seek(from);
    let mut depth = 1usize;
    while !cur.eof() {
        if cur.peek() != Some(b'<') {
            cur.bump();
            continue;
        }
        if cur.peek_at(1) == Some(b'/') {
            let rest = cur.rest();
            if let Some(close_len) = parse_close_tag(rest, name) {
                depth -= 1;
                if depth == 0 {
                    return Some(cur.pos() + close_len);
                }
                cur.bump_n(close_len);
                continue;
            }
            cur.bump();
            continue;
        }
        if cur.peek_at(1).is_some_and(|b| b.is_ascii_alphabetic()) {
            if let Some(open) = parse_open_tag(cur.rest()) {
                if !open.self_closing && open.name.eq_ignore_ascii_case(name) {
                    depth += 1;
                }
                cur.bump_n(open.len);
                continue;
            }
        }
        cur.bump();
    }
    None
}

/// Parses `</name>` (whitespace allowed before `>`) against the expected
/// name, returning the tag's byte length on a case-insensitive match.
fn parse_close_tag(rest: &str, expected: &str) -> Option<usize> {
    let bytes = rest.as_bytes();
    let mut i = 2;
    while i < bytes.len() && bytes[i].is_ascii_alphanumeric() {
        i += 1;
    }
    if !rest[2..i].eq_ignore_ascii_case(expected) {
        return None;
    }
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    if bytes.get(i) == Some(&b'>') {
        Some(i + 1)
    } else {
        None
    }
}
