//! String-literal escaping between the macro language and Python.

use std::borrow::Cow;

/// Undo macro string escapes: `\\`, `\"`, `\n`, `\t`.
///
/// Each rule is a full find-and-replace applied to the output of the
/// previous one, in that order. `\\n` therefore ends up as a newline, not
/// as a backslash followed by `n`.
pub fn decode(raw: &str) -> Cow<'_, str> {
    if !raw.contains('\\') {
        return Cow::Borrowed(raw);
    }

    Cow::Owned(
        raw.replace(r"\\", "\\")
            .replace(r#"\""#, "\"")
            .replace(r"\n", "\n")
            .replace(r"\t", "\t"),
    )
}

/// Escape text for the inside of a double-quoted Python literal.
/// Only backslashes and quotes are touched; newlines and tabs pass through.
pub fn encode(text: &str) -> Cow<'_, str> {
    if !text.contains(['\\', '"']) {
        return Cow::Borrowed(text);
    }

    Cow::Owned(text.replace('\\', r"\\").replace('"', r#"\""#))
}
