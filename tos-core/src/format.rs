use crate::archive::IpfFile;
use crate::config::DecodeConfig;
use crate::error::{Result, TosError};
use crate::table::IesFile;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Contract shared by both decoders: parse everything, then materialize it.
pub trait TosFormat {
    fn parse(&mut self) -> Result<()>;

    fn extract(&mut self, out_root: &Path) -> Result<()>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormatTag {
    Ies,
    Ipf,
}

impl FormatTag {
    /// File extension used by the game client, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            FormatTag::Ies => "ies",
            FormatTag::Ipf => "ipf",
        }
    }
}

impl FromStr for FormatTag {
    type Err = TosError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "IES" => Ok(FormatTag::Ies),
            "IPF" => Ok(FormatTag::Ipf),
            _ => Err(TosError::Config(format!(
                "unsupported file format {s:?}; choices are ies, ipf"
            ))),
        }
    }
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.extension().to_ascii_uppercase())
    }
}

pub fn open_format(tag: FormatTag, path: &Path, cfg: &DecodeConfig) -> Result<Box<dyn TosFormat>> {
    match tag {
        FormatTag::Ies => Ok(Box::new(IesFile::open(path, cfg)?)),
        FormatTag::Ipf => Ok(Box::new(IpfFile::open(path, cfg)?)),
    }
}
