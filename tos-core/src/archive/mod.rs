//! IPF: deflated entries followed by a variable-length index and a fixed
//! 24-byte trailer that points back at the index.

pub mod extract;
pub mod index;
pub mod trailer;

use crate::config::DecodeConfig;
use crate::error::{Result, TosError};
use crate::format::TosFormat;
use crate::stats::ExtractStats;
use index::{EntryDescriptor, read_index};
use trailer::{ArchiveMeta, read_trailer_at_eof};

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ArchiveState {
    Unopened,
    MetaParsed,
    IndexParsed,
    Extracted,
}

#[derive(Clone, Debug)]
pub struct Archive {
    pub meta: ArchiveMeta,
    /// On-disk order, which is also extraction order.
    pub entries: Vec<EntryDescriptor>,
    pub file_len: u64,
    /// Offset just past the last index entry.
    pub index_end: u64,
}

pub struct ArchiveDecoder<R> {
    r: R,
    state: ArchiveState,
    meta: Option<(ArchiveMeta, u64)>,
    entries: Vec<EntryDescriptor>,
    index_end: u64,
}

impl<R: Read + Seek> ArchiveDecoder<R> {
    pub fn new(r: R) -> Self {
        Self {
            r,
            state: ArchiveState::Unopened,
            meta: None,
            entries: Vec::new(),
            index_end: 0,
        }
    }

    pub fn state(&self) -> ArchiveState {
        self.state
    }

    pub fn parse_meta(&mut self) -> Result<&ArchiveMeta> {
        let (meta, len) = read_trailer_at_eof(&mut self.r)?;
        debug!(
            entries = meta.entry_count,
            index_offset = meta.index_offset,
            flag = meta.flag,
            file_len = len,
            "archive trailer"
        );
        self.state = ArchiveState::MetaParsed;
        Ok(&self.meta.insert((meta, len)).0)
    }

    pub fn parse_index(&mut self) -> Result<&[EntryDescriptor]> {
        let (meta, len) = self.meta.ok_or(TosError::NotParsed("archive trailer"))?;
        let (entries, end) = read_index(&mut self.r, &meta, len)?;
        self.entries = entries;
        self.index_end = end;
        self.state = ArchiveState::IndexParsed;
        Ok(&self.entries)
    }

    pub fn decode(mut self) -> Result<Archive> {
        if self.state < ArchiveState::MetaParsed {
            self.parse_meta()?;
        }
        if self.state < ArchiveState::IndexParsed {
            self.parse_index()?;
        }
        let (meta, file_len) = self.meta.ok_or(TosError::NotParsed("archive trailer"))?;
        Ok(Archive {
            meta,
            entries: self.entries,
            file_len,
            index_end: self.index_end,
        })
    }
}

/// An IPF file on disk.
pub struct IpfFile {
    path: PathBuf,
    cfg: DecodeConfig,
    state: ArchiveState,
    decoder: Option<ArchiveDecoder<BufReader<File>>>,
    archive: Option<Archive>,
    last_stats: Option<ExtractStats>,
}

impl IpfFile {
    pub fn open(path: &Path, cfg: &DecodeConfig) -> Result<Self> {
        let f = File::open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            cfg: cfg.clone(),
            state: ArchiveState::Unopened,
            decoder: Some(ArchiveDecoder::new(BufReader::new(f))),
            archive: None,
            last_stats: None,
        })
    }

    pub fn state(&self) -> ArchiveState {
        self.state
    }

    /// Counters from the most recent [`TosFormat::extract`].
    pub fn last_stats(&self) -> Option<&ExtractStats> {
        self.last_stats.as_ref()
    }
}

impl TosFormat for IpfFile {
    fn parse(&mut self) -> Result<()> {
        let decoder = match self.decoder.take() {
            Some(d) => d,
            None => ArchiveDecoder::new(BufReader::new(File::open(&self.path)?)),
        };
        let archive = decoder.decode()?;
        info!(
            file = %self.path.display(),
            entries = archive.entries.len(),
            "parsed archive index"
        );
        self.archive = Some(archive);
        self.state = ArchiveState::IndexParsed;
        Ok(())
    }

    fn extract(&mut self, out_root: &Path) -> Result<()> {
        let archive = self
            .archive
            .as_ref()
            .ok_or(TosError::NotParsed("archive index"))?;
        let stats = extract::extract_archive(&self.path, archive, out_root, &self.cfg)?;
        self.last_stats = Some(stats);
        self.state = ArchiveState::Extracted;
        Ok(())
    }
}
