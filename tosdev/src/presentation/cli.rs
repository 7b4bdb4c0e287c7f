use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "IES/IPF extractor", long_about = None)]
pub struct Cli {
    /// Debug-level logging when RUST_LOG is unset
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Decode a table to CSV, or unpack an archive
    Extract {
        /// ies | ipf
        format: String,
        /// File, or a directory searched recursively for the format's extension
        input: PathBuf,
        /// Output root
        out: PathBuf,

        /// XOR key for obfuscated text, decimal or 0x-prefixed hex
        #[arg(long)]
        key: Option<String>,

        /// JSON decode settings; flags below override it
        #[arg(long)]
        config: Option<PathBuf>,

        /// Skip failing entries and files instead of stopping at the first one
        #[arg(long)]
        keep_going: bool,

        /// Check each extracted entry against its stored CRC32
        #[arg(long)]
        verify_crc: bool,

        /// Extract archive entries on a worker pool
        #[arg(long)]
        parallel: bool,
    },

    /// Print a table's columns or an archive's index
    List {
        /// ies | ipf
        format: String,
        input: PathBuf,

        #[arg(long)]
        key: Option<String>,

        #[arg(long)]
        config: Option<PathBuf>,
    },
}
