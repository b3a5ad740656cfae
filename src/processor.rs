use std::io::{self, BufRead, Read};

use tracing::{debug, info, warn};

use crate::ast::{Line, RunCall};
use crate::emitter::{self, PROLOGUE};
use crate::parser::IjmParser;
use crate::text::{is_space, split_lines};
use crate::tokenizer::split_args;

/// Macro comment marker
const COMMENT_MARKER: &str = "//";

/// Indent of continuation lines in multi-token argument expressions
pub const DEFAULT_INDENT: usize = 8;

/// Per-classification line counts for one conversion
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ConversionStats {
    pub calls: usize,
    pub comments: usize,
    pub unconverted: usize,
    pub blank: usize,
}

impl ConversionStats {
    fn record(&mut self, line: &Line) {
        match line {
            Line::Blank => self.blank += 1,
            Line::Comment(_) => self.comments += 1,
            Line::Call(_) => self.calls += 1,
            Line::Unconverted(_) => self.unconverted += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.calls + self.comments + self.unconverted + self.blank
    }
}

/// Classify one source line. Comments win over calls, so a commented-out
/// `run(...)` stays a comment.
pub fn classify(line: &str) -> Line<'_> {
    let stripped = line.trim_start_matches(is_space);
    if let Some(rest) = stripped.strip_prefix(COMMENT_MARKER) {
        return Line::Comment(rest.trim_start_matches(is_space));
    }

    if let Some(call) = IjmParser::parse_run_call(line) {
        return Line::Call(call);
    }

    if stripped.is_empty() {
        Line::Blank
    } else {
        Line::Unconverted(line)
    }
}

/// ImageJ macro to Fiji Jython converter
#[derive(Debug, Clone)]
pub struct Converter {
    indent: String,
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(DEFAULT_INDENT)
    }
}

impl Converter {
    /// `indent` is the number of spaces before each continuation literal
    pub fn new(indent: usize) -> Self {
        Self {
            indent: " ".repeat(indent),
        }
    }

    /// Convert a whole macro document (main entry point)
    pub fn convert(&self, source: &str) -> String {
        self.convert_with_stats(source).0
    }

    /// Convert a whole macro document and report what each line became
    pub fn convert_with_stats(&self, source: &str) -> (String, ConversionStats) {
        let mut out = String::with_capacity(PROLOGUE.len() + source.len() * 2);
        let mut stats = ConversionStats::default();
        out.push_str(PROLOGUE);

        for (idx, raw) in split_lines(source).into_iter().enumerate() {
            let line = classify(raw);
            debug!(line = idx + 1, kind = line.kind(), "classified");
            if let Line::Unconverted(text) = &line {
                warn!(line = idx + 1, text, "left unconverted");
            }
            stats.record(&line);
            self.emit(&line, &mut out);
        }

        info!(
            lines = stats.total(),
            calls = stats.calls,
            comments = stats.comments,
            unconverted = stats.unconverted,
            "conversion finished"
        );
        (out, stats)
    }

    /// Convert a single line, newline included
    pub fn convert_line(&self, line: &str) -> String {
        let mut out = String::new();
        self.emit(&classify(line), &mut out);
        out
    }

    fn emit(&self, line: &Line, out: &mut String) {
        match line {
            Line::Blank => {}
            Line::Comment(text) => out.push_str(&emitter::comment(text)),
            Line::Call(call) => out.push_str(&self.render_call(call)),
            Line::Unconverted(text) => {
                out.push_str(&emitter::comment(&format!("[unconverted] {text}")))
            }
        }
        out.push('\n');
    }

    fn render_call(&self, call: &RunCall) -> String {
        let tokens = split_args(&call.args);
        let args_expr = emitter::format_args(&tokens, &self.indent);
        emitter::run_statement(&call.command, &args_expr)
    }
}

/// A reader wrapper that converts a macro document on the fly.
///
/// The inner reader is drained on the first non-empty read; invalid UTF-8
/// is replaced with U+FFFD rather than failing.
pub struct ConvertingReader<R: Read> {
    inner: R,
    converter: Converter,
    script: Vec<u8>,
    script_pos: usize,
    stats: Option<ConversionStats>,
}

impl<R: Read> ConvertingReader<R> {
    pub fn new(inner: R, converter: Converter) -> Self {
        Self {
            inner,
            converter,
            script: Vec::new(),
            script_pos: 0,
            stats: None,
        }
    }

    /// Line counts, once the input has been converted
    pub fn stats(&self) -> Option<ConversionStats> {
        self.stats
    }

    /// Converted script not yet handed out
    fn pending(&mut self) -> io::Result<&[u8]> {
        if self.stats.is_none() {
            let mut input = Vec::new();
            self.inner.read_to_end(&mut input)?;

            let source = String::from_utf8_lossy(&input);
            let (script, stats) = self.converter.convert_with_stats(&source);
            self.script = script.into_bytes();
            self.stats = Some(stats);
        }

        Ok(&self.script[self.script_pos..])
    }
}

impl<R: Read> Read for ConvertingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        let pending = self.pending()?;
        let n = pending.len().min(buf.len());
        buf[..n].copy_from_slice(&pending[..n]);
        self.script_pos += n;

        Ok(n)
    }
}

impl<R: Read> BufRead for ConvertingReader<R> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.pending()
    }

    fn consume(&mut self, amt: usize) {
        self.script_pos = (self.script_pos + amt).min(self.script.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(output: &str) -> &str {
        output.strip_prefix(PROLOGUE).expect("output starts with prologue")
    }

    #[test]
    fn test_prologue_on_empty_input() {
        assert_eq!(Converter::default().convert(""), PROLOGUE);
    }

    #[test]
    fn test_comment_line() {
        let converter = Converter::default();
        assert_eq!(converter.convert_line("// crop image"), "# crop image\n");
        assert_eq!(converter.convert_line("   //crop"), "# crop\n");
        assert_eq!(converter.convert_line("//"), "# \n");
    }

    #[test]
    fn test_commented_run_stays_comment() {
        let line = r#"// run("Close", "")"#;
        assert!(matches!(classify(line), Line::Comment(_)));
        assert_eq!(
            Converter::default().convert_line(line),
            "# run(\"Close\", \"\")\n"
        );
    }

    #[test]
    fn test_run_multiple_tokens() {
        let converter = Converter::default();
        let out = converter.convert_line(r#"run("Gaussian Blur...", "sigma=2 slice");"#);
        assert_eq!(
            out,
            "IJ.run(\"Gaussian Blur...\", (\n        \"sigma=2\\n \"\n        \"slice\"\n))\n"
        );
    }

    #[test]
    fn test_run_single_token() {
        let out = Converter::default().convert_line(r#"run("Invert", "stack");"#);
        assert_eq!(out, "IJ.run(\"Invert\", \"stack\")\n");
    }

    #[test]
    fn test_run_empty_args() {
        let out = Converter::default().convert_line(r#"run("Close", "");"#);
        assert_eq!(out, "IJ.run(\"Close\", \"\")\n");
    }

    #[test]
    fn test_run_bracketed_path() {
        let out = Converter::new(4)
            .convert_line(r#"run("Image Sequence...", "open=[D:/10 mW/subsampled] sort");"#);
        assert_eq!(
            out,
            "IJ.run(\"Image Sequence...\", (\n    \"open=[D:/10 mW/subsampled]\\n \"\n    \"sort\"\n))\n"
        );
    }

    #[test]
    fn test_unconverted_line() {
        let out = Converter::default().convert_line("var x = 5;");
        assert_eq!(out, "# [unconverted] var x = 5;\n");
    }

    #[test]
    fn test_unconverted_keeps_indentation() {
        let out = Converter::default().convert_line("    x = getWidth();");
        assert_eq!(out, "# [unconverted]     x = getWidth();\n");
    }

    #[test]
    fn test_blank_lines() {
        let converter = Converter::default();
        assert_eq!(converter.convert_line(""), "\n");
        assert_eq!(converter.convert_line(" \t "), "\n");
    }

    #[test]
    fn test_document() {
        let source = "// open\nopen(\"a.tif\");\n\nrun(\"8-bit\", \"\");\n";
        let (out, stats) = Converter::default().convert_with_stats(source);
        assert_eq!(
            body(&out),
            "# open\n# [unconverted] open(\"a.tif\");\n\nIJ.run(\"8-bit\", \"\")\n"
        );
        assert_eq!(
            stats,
            ConversionStats {
                calls: 1,
                comments: 1,
                unconverted: 1,
                blank: 1,
            }
        );
    }

    #[test]
    fn test_line_count_without_multi_token_calls() {
        let source = "// a\r\nrun(\"Close\", \"\")\r\nx = 1;\r\n\r\nrun(\"Invert\", \"stack\")";
        let out = Converter::default().convert(source);
        // two header lines and the blank separator
        assert_eq!(out.lines().count(), source.lines().count() + 3);
    }

    #[test]
    fn test_carriage_return_ends_line() {
        let source = "// note\rrun(\"Close\", \"\")\nx = 1;\rIJ.log(\"live\")\n";
        let out = Converter::default().convert(source);
        assert_eq!(
            body(&out),
            "# note\nIJ.run(\"Close\", \"\")\n# [unconverted] x = 1;\n# [unconverted] IJ.log(\"live\")\n"
        );
    }

    #[test]
    fn test_unconverted_output_has_no_stray_breaks() {
        let source = "a = 1;\u{2028}b = 2;\x0cc = 3;\u{85}d = 4;";
        let out = Converter::default().convert(source);
        assert_eq!(
            body(&out),
            "# [unconverted] a = 1;\n# [unconverted] b = 2;\n# [unconverted] c = 3;\n# [unconverted] d = 4;\n"
        );
    }

    #[test]
    fn test_ascii_separators_split_tokens() {
        let out = Converter::new(2).convert_line("run(\"A\", \"a\u{1f}b\");");
        assert_eq!(out, "IJ.run(\"A\", (\n  \"a\\n \"\n  \"b\"\n))\n");
    }

    #[test]
    fn test_multi_token_call_expands_lines() {
        let source = "run(\"Blur\", \"a b c\")\n";
        let out = Converter::default().convert(source);
        assert!(out.lines().count() > source.lines().count() + 2);
    }

    #[test]
    fn test_converting_reader() {
        let input = "// hi\nrun(\"Invert\", \"stack\");\n";
        let mut reader = ConvertingReader::new(input.as_bytes(), Converter::default());

        let mut output = String::new();
        reader.read_to_string(&mut output).unwrap();

        assert_eq!(body(&output), "# hi\nIJ.run(\"Invert\", \"stack\")\n");
        let stats = reader.stats().unwrap();
        assert_eq!(stats.calls, 1);
        assert_eq!(stats.comments, 1);
    }

    #[test]
    fn test_converting_reader_empty_read_does_not_convert() {
        let mut reader = ConvertingReader::new("x = 1;\n".as_bytes(), Converter::default());

        assert_eq!(reader.read(&mut []).unwrap(), 0);
        assert_eq!(reader.stats(), None);
    }

    #[test]
    fn test_converting_reader_buf_read_lines() {
        let input = "// a\nrun(\"Close\", \"\")\n";
        let reader = ConvertingReader::new(input.as_bytes(), Converter::default());

        let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
        assert_eq!(
            lines,
            vec!["#@String ", "from ij import IJ", "", "# a", "IJ.run(\"Close\", \"\")"]
        );
    }

    #[test]
    fn test_converting_reader_replaces_invalid_utf8() {
        let input: &[u8] = b"// caf\xe9\n";
        let mut reader = ConvertingReader::new(input, Converter::default());

        let mut output = String::new();
        reader.read_to_string(&mut output).unwrap();

        assert_eq!(body(&output), "# caf\u{FFFD}\n");
    }
}
