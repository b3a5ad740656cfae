//! Line and whitespace rules shared by the scanner, tokenizer and driver.
//!
//! Both follow Python's `str` methods, since the converted script is read
//! by a Python runtime: any break it honours must also end a line here.

/// Whitespace as `str.isspace` sees it: Unicode `White_Space` plus the
/// ASCII separators `\x1c`..`\x1f`.
pub fn is_space(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, '\x1c'..='\x1f')
}

/// Line terminators of `str.splitlines`
pub fn is_line_break(ch: char) -> bool {
    matches!(
        ch,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Split a document into lines without their terminators.
///
/// `\r\n` counts as one break and a lone `\r` as another. A trailing
/// terminator does not start an extra empty line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if !is_line_break(ch) {
            continue;
        }
        lines.push(&text[start..idx]);
        start = idx + ch.len_utf8();
        if ch == '\r' && chars.next_if(|&(_, next)| next == '\n').is_some() {
            start += 1;
        }
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }

    lines
}
