use clap::Parser;
use console::style;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use webp_squeeze::cli::Args;
use webp_squeeze::constants::ERROR_PREFIX;
use webp_squeeze::{batch, CompressionConfig, Result};

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", style(format!("{} {}", ERROR_PREFIX, e)).for_stderr().red());
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    // Validated before the input is looked at, so a bad factor never touches disk.
    let config = CompressionConfig::new(args.quality, args.resize)?;
    batch::run(&args.input, args.output.as_deref(), &config)?;
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "webp_squeeze=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
