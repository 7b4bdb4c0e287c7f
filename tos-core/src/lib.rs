#![forbid(unsafe_code)]

pub mod config;
pub mod domain;
pub mod error;
pub mod format;
pub mod list;
pub mod stats;

pub mod util {
    pub mod prim;
    pub mod sanitize;
}

pub mod codec;

pub mod archive;
pub mod table;

// Re-exports: stable API surface
pub use archive::{Archive, IpfFile};
pub use config::{DecodeConfig, EntryErrorPolicy};
pub use error::{Result, TosError};
pub use format::{FormatTag, TosFormat, open_format};
pub use list::list;
pub use stats::ExtractStats;
pub use table::{IesFile, Table};
