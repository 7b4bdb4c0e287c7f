use crate::error::{Result, TosError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// XOR key observed in every shipped IES and IPF file.
pub const DEFAULT_XOR_KEY: u8 = 0x01;

/// What to do when one archive entry fails to extract.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryErrorPolicy {
    /// Stop at the first failing entry and return its error.
    #[default]
    Abort,
    /// Log the failure and carry on with the next entry.
    Skip,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeConfig {
    /// Single-byte key applied to every obfuscated text field.
    pub xor_key: u8,
    /// Entry extensions (without the dot, matched case-insensitively) whose
    /// payload is stored raw instead of deflated.
    pub passthrough_extensions: Vec<String>,
    pub on_entry_error: EntryErrorPolicy,
    /// Compare extracted bytes against the CRC32 stored in the index.
    pub verify_crc: bool,
    /// Extract archive entries on the rayon pool.
    pub parallel: bool,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            xor_key: DEFAULT_XOR_KEY,
            passthrough_extensions: ["mp3", "fsb", "jpg"].map(String::from).to_vec(),
            on_entry_error: EntryErrorPolicy::Abort,
            verify_crc: false,
            parallel: false,
        }
    }
}

impl DecodeConfig {
    pub fn from_json_str(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|e| TosError::Config(e.to_string()))
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
            .map_err(|e| TosError::Config(format!("{}: {e}", path.display())))
    }

    /// True when `entry_name` should be copied without inflating.
    pub fn is_passthrough(&self, entry_name: &str) -> bool {
        let Some(ext) = Path::new(entry_name).extension().and_then(|e| e.to_str()) else {
            return false;
        };
        self.passthrough_extensions
            .iter()
            .any(|p| p.trim_start_matches('.').eq_ignore_ascii_case(ext))
    }
}

/// Parse a key given as decimal (`1`) or hex (`0x01`).
pub fn parse_key(s: &str) -> Result<u8> {
    let s = s.trim();
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => s.parse::<u8>(),
    };
    parsed.map_err(|e| TosError::Config(format!("invalid key {s:?}: {e}")))
}
