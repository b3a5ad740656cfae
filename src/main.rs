use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use cli::CommandLine;
use ijm2py::{Converter, convert_file, default_output_path};

mod cli;

fn main() -> Result<()> {
    let args = CommandLine::parse();

    // stdout only carries the confirmation line
    let default_filter = if args.verbose { "ijm2py=debug" } else { "ijm2py=warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input));

    convert_file(&Converter::new(args.indent), &args.input, &output)?;

    println!("Wrote: {}", output.display());
    Ok(())
}
