//! Conversion of recorded ImageJ macros (`.ijm`) into Fiji Jython scripts.
//!
//! Only the recorded-macro shape is understood: `run("Command", "args")`
//! calls and `//` comments. Every other line is kept as a Python comment.

pub mod ast;
pub mod emitter;
pub mod error;
pub mod escape;
pub mod parser;
pub mod processor;
pub mod text;
pub mod tokenizer;

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

pub use error::{Error, Result};
pub use processor::{ConversionStats, Converter, ConvertingReader};

/// Extension given to converted scripts
pub const OUTPUT_EXTENSION: &str = "py";

/// `input` with its extension swapped for `.py`
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension(OUTPUT_EXTENSION)
}

/// Convert the macro at `input` and write the script to `output`
pub fn convert_file(
    converter: &Converter,
    input: &Path,
    output: &Path,
) -> Result<ConversionStats> {
    let source = File::open(input).map_err(|source| Error::Read {
        path: input.to_path_buf(),
        source,
    })?;
    let mut reader = ConvertingReader::new(source, converter.clone());

    let mut script = Vec::new();
    reader.read_to_end(&mut script).map_err(|source| Error::Read {
        path: input.to_path_buf(),
        source,
    })?;

    File::create(output)
        .and_then(|mut target| target.write_all(&script))
        .map_err(|source| Error::Write {
            path: output.to_path_buf(),
            source,
        })?;

    debug!(input = %input.display(), output = %output.display(), "wrote script");
    Ok(reader.stats().unwrap_or_default())
}
