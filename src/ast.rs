use std::borrow::Cow;

/// A `run("command", "args")` call lifted out of one macro line.
/// Both fields are already decoded from macro string escapes.
#[derive(Debug, Clone, PartialEq)]
pub struct RunCall<'a> {
    pub command: Cow<'a, str>,
    pub args: Cow<'a, str>,
}

/// Classification of a single source line
#[derive(Debug, Clone, PartialEq)]
pub enum Line<'a> {
    /// Empty or whitespace-only
    Blank,
    /// `//` comment; holds the text after the marker with leading whitespace removed
    Comment(&'a str),
    /// Recognised `run(...)` call
    Call(RunCall<'a>),
    /// Anything else, kept verbatim
    Unconverted(&'a str),
}

impl Line<'_> {
    pub fn kind(&self) -> &'static str {
        match self {
            Line::Blank => "blank",
            Line::Comment(_) => "comment",
            Line::Call(_) => "call",
            Line::Unconverted(_) => "unconverted",
        }
    }
}
