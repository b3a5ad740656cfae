//! Splitting of recorded-macro argument strings.

use crate::text::is_space;

/// Open bracket counts. A closer only counts when its opener is open.
#[derive(Debug, Default)]
struct Depth {
    square: usize,
    curly: usize,
    paren: usize,
}

impl Depth {
    fn track(&mut self, ch: char) {
        match ch {
            '[' => self.square += 1,
            ']' => self.square = self.square.saturating_sub(1),
            '{' => self.curly += 1,
            '}' => self.curly = self.curly.saturating_sub(1),
            '(' => self.paren += 1,
            ')' => self.paren = self.paren.saturating_sub(1),
            _ => {}
        }
    }

    fn at_top_level(&self) -> bool {
        self.square == 0 && self.curly == 0 && self.paren == 0
    }
}

/// Split an argument string such as `key=val key2=[val with spaces] flag`
/// on whitespace, leaving `[...]`, `{...}` and `(...)` spans whole.
///
/// Tokens are trimmed and empty ones are dropped, so an empty or blank
/// argument string gives no tokens.
pub fn split_args(args: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut depth = Depth::default();
    let mut start = 0;

    for (idx, ch) in args.char_indices() {
        depth.track(ch);
        if is_space(ch) && depth.at_top_level() {
            push_token(&mut tokens, &args[start..idx]);
            start = idx + ch.len_utf8();
        }
    }
    push_token(&mut tokens, &args[start..]);

    tokens
}

fn push_token<'a>(tokens: &mut Vec<&'a str>, token: &'a str) {
    let token = token.trim_matches(is_space);
    if !token.is_empty() {
        tokens.push(token);
    }
}
