use clap::Parser;
use pumapi_client::cli::{args::Args, commands};
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(error) = commands::run(args) {
        eprintln!("Error: {:#}", error);
        process::exit(1);
    }
}

/// Initialize log output; `RUST_LOG` overrides the verbosity flags
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
