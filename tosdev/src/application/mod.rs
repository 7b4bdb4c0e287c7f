pub mod handlers;

use crate::presentation::cli::{Cli, Commands};
use clap::Parser;
use tos_core::error::Result;
use tracing::Level;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    // RUST_LOG wins when set; otherwise fall back to `level`
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Commands::Extract {
            format,
            input,
            out,
            key,
            config,
            keep_going,
            verify_crc,
            parallel,
        } => handlers::handle_extract(
            format, input, out, key, config, keep_going, verify_crc, parallel,
        ),
        Commands::List {
            format,
            input,
            key,
            config,
        } => handlers::handle_list(format, input, key, config),
    }
}
