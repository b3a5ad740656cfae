use pest::{Parser, iterators::Pair};
use pest_derive::Parser;
use tracing::trace;

use crate::ast::RunCall;
use crate::escape::decode;
use crate::text::is_space;

#[derive(Parser)]
#[grammar = "ijm.pest"]
pub struct IjmParser;

impl IjmParser {
    /// Read the double-quoted literal starting at `start`.
    ///
    /// Returns the raw contents, escapes left as written, and the byte
    /// index just past the closing quote. An unterminated literal yields
    /// everything up to the end of `text`.
    ///
    /// Panics if `text[start..]` does not begin with `"`.
    pub fn read_quoted(text: &str, start: usize) -> (&str, usize) {
        assert!(
            text[start..].starts_with('"'),
            "read_quoted called off a quote at byte {start}"
        );

        let string = IjmParser::parse(Rule::string, &text[start..])
            .ok()
            .and_then(|mut pairs| pairs.next())
            .expect("string rule accepts any quoted input");
        let end = start + string.as_span().end();

        (Self::raw_body(string), end)
    }

    /// Parse the first `run("command", "args")` call on a line.
    ///
    /// Both literals are read with [`IjmParser::read_quoted`]. Returns
    /// `None` when the keyword is absent or a quote or the separating comma
    /// is not where it should be. Text after the second literal is ignored.
    pub fn parse_run_call(line: &str) -> Option<RunCall<'_>> {
        let start = skip_space(line, Self::find_run_open(line)?);
        let Some((command, end)) = Self::quoted_at(line, start) else {
            trace!(line, "run( without a quoted command");
            return None;
        };

        let comma = skip_space(line, end);
        if !line[comma..].starts_with(',') {
            trace!(line, "run( without a second argument");
            return None;
        }

        let Some((args, _)) = Self::quoted_at(line, skip_space(line, comma + 1)) else {
            trace!(line, "run( without quoted arguments");
            return None;
        };

        Some(RunCall {
            command: decode(command),
            args: decode(args),
        })
    }

    fn quoted_at(line: &str, pos: usize) -> Option<(&str, usize)> {
        line[pos..]
            .starts_with('"')
            .then(|| Self::read_quoted(line, pos))
    }

    /// Byte index just past the `(` of the first whole-word `run (`.
    fn find_run_open(line: &str) -> Option<usize> {
        let mut prev: Option<char> = None;
        for (idx, ch) in line.char_indices() {
            let at_word_start = !prev.is_some_and(is_word_char);
            if at_word_start
                && ch.eq_ignore_ascii_case(&'r')
                && let Ok(mut pairs) = IjmParser::parse(Rule::run_open, &line[idx..])
            {
                return pairs.next().map(|open| idx + open.as_span().end());
            }
            prev = Some(ch);
        }
        None
    }

    fn raw_body(string: Pair<'_, Rule>) -> &str {
        string
            .into_inner()
            .find(|p| p.as_rule() == Rule::raw)
            .map(|raw| raw.as_str())
            .unwrap_or("")
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// First index at or after `pos` that is not whitespace
fn skip_space(line: &str, pos: usize) -> usize {
    line[pos..]
        .find(|ch: char| !is_space(ch))
        .map_or(line.len(), |offset| pos + offset)
}
