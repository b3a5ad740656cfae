use std::path::PathBuf;

use clap::Parser;

/// Convert an ImageJ macro (.ijm) into a Fiji Jython script (.py)
#[derive(Debug, Parser)]
#[command(name = "ijm2py", version)]
pub struct CommandLine {
    /// Path to the input .ijm file
    pub input: PathBuf,
    /// Path to the output .py file (default: <input>.py)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Spaces before each continuation line of a multi-token argument
    #[arg(long, default_value_t = ijm2py::processor::DEFAULT_INDENT)]
    pub indent: usize,
    /// Log every classified line to stderr
    #[arg(short, long)]
    pub verbose: bool,
}
