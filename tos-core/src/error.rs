use thiserror::Error;

#[derive(Error, Debug)]
pub enum TosError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Fewer bytes were available than a fixed-size record requires.
    #[error("truncated {what}: needed {need} bytes at offset {offset}")]
    Truncated {
        what: &'static str,
        offset: u64,
        need: usize,
    },

    #[error("unsupported table layout: flag {flag:#06x} at offset 0x92")]
    UnsupportedLayout { flag: u16 },

    #[error("failed to decompress {entry}: {reason}")]
    Decompress { entry: String, reason: String },

    #[error("checksum mismatch for {entry}: stored {stored:#010x}, computed {computed:#010x}")]
    Checksum {
        entry: String,
        stored: u32,
        computed: u32,
    },

    #[error("unsafe entry path: {0}")]
    UnsafePath(String),

    #[error("{0} has not been parsed yet")]
    NotParsed(&'static str),

    #[error("Format error: {0}")]
    Format(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Config error: {0}")]
    Config(String),
}

// Convenient crate-wide result type
pub type Result<T> = std::result::Result<T, TosError>;
