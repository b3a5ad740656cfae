//! Rendering of Fiji Jython source.

use crate::escape::encode;

/// Header written once before any converted line.
pub const PROLOGUE: &str = "#@String \nfrom ij import IJ\n\n";

/// Suffix placed inside every argument literal but the last, so the
/// concatenated argument string has one `key=value` per line.
const CONTINUATION: &str = r"\n ";

/// A double-quoted Python literal holding `text`.
pub fn quote(text: &str) -> String {
    format!("\"{}\"", encode(text))
}

/// Render argument tokens as a Python expression.
///
/// No tokens give `""`, one token a single literal. More than one token
/// give a parenthesised run of adjacent literals, one per line, each
/// continuation line prefixed with `indent`:
///
/// ```text
/// (
///         "a=X\n "
///         "flag"
/// )
/// ```
pub fn format_args(tokens: &[&str], indent: &str) -> String {
    match tokens {
        [] => "\"\"".to_string(),
        [token] => quote(token),
        [init @ .., last] => {
            let mut expr = String::from("(");
            for token in init {
                expr.push('\n');
                expr.push_str(indent);
                expr.push_str(&format!("\"{}{CONTINUATION}\"", encode(token)));
            }
            expr.push('\n');
            expr.push_str(indent);
            expr.push_str(&quote(last));
            expr.push_str("\n)");
            expr
        }
    }
}

/// A complete `IJ.run(...)` statement, without the trailing newline.
pub fn run_statement(command: &str, args_expr: &str) -> String {
    format!("IJ.run({}, {args_expr})", quote(command))
}

/// A Python comment line, without the trailing newline.
pub fn comment(text: &str) -> String {
    format!("# {text}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_no_tokens() {
        assert_eq!(format_args(&[], "    "), "\"\"");
    }

    #[test]
    fn test_format_single_token() {
        assert_eq!(format_args(&["stack"], "    "), "\"stack\"");
    }

    #[test]
    fn test_format_single_token_escaped() {
        assert_eq!(
            format_args(&[r"dir=[C:\in]"], "    "),
            r#""dir=[C:\\in]""#
        );
    }

    #[test]
    fn test_format_multiple_tokens() {
        let expr = format_args(&["sigma=2", "slice"], "  ");
        assert_eq!(expr, "(\n  \"sigma=2\\n \"\n  \"slice\"\n)");
    }

    #[test]
    fn test_format_three_tokens() {
        let expr = format_args(&["a=1", "b=[x y]", "c"], "\t");
        let lines: Vec<&str> = expr.lines().collect();
        assert_eq!(
            lines,
            vec!["(", "\t\"a=1\\n \"", "\t\"b=[x y]\\n \"", "\t\"c\"", ")"]
        );
    }

    #[test]
    fn test_run_statement() {
        assert_eq!(
            run_statement("Say \"hi\"", "\"\""),
            r#"IJ.run("Say \"hi\"", "")"#
        );
    }

    #[test]
    fn test_comment() {
        assert_eq!(comment("crop image"), "# crop image");
    }
}
