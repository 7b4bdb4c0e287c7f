use super::Archive;
use super::index::EntryDescriptor;
use crate::codec::{CodecId, decoder_for};
use crate::config::{DecodeConfig, EntryErrorPolicy};
use crate::error::{Result, TosError};
use crate::stats::ExtractStats;
use crate::util::prim::read_record;
use crate::util::sanitize::safe_join;

use rayon::prelude::*;
use std::fs::{self, File};
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Directory under the output root that receives an archive's entries:
/// the archive's own file name (`ui.ipf`).
pub fn archive_dir_name(src: &Path) -> String {
    src.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "archive".to_string())
}

/// Write every entry of `archive` (read from `src`) under
/// `out_root/<archive file name>/`.
pub fn extract_archive(
    src: &Path,
    archive: &Archive,
    out_root: &Path,
    cfg: &DecodeConfig,
) -> Result<ExtractStats> {
    let root = out_root.join(archive_dir_name(src));
    fs::create_dir_all(&root)?;

    let mut stats = ExtractStats::default();
    if cfg.parallel {
        let results: Vec<Result<(CodecId, u64)>> = archive
            .entries
            .par_iter()
            // one read handle per worker
            .map_init(
                || File::open(src).map(BufReader::new),
                |handle, e| match handle {
                    Ok(f) => extract_entry(f, e, archive.file_len, &root, cfg),
                    Err(err) => Err(io::Error::new(err.kind(), err.to_string()).into()),
                },
            )
            .collect();
        // settle in index order so `abort` reports the first failing entry
        for (e, res) in archive.entries.iter().zip(results) {
            settle(e, res, cfg.on_entry_error, &mut stats)?;
        }
    } else {
        let mut f = BufReader::new(File::open(src)?);
        for e in &archive.entries {
            let res = extract_entry(&mut f, e, archive.file_len, &root, cfg);
            settle(e, res, cfg.on_entry_error, &mut stats)?;
        }
    }

    info!(
        archive = %src.display(),
        written = stats.written,
        inflated = stats.inflated,
        passthrough = stats.passthrough,
        skipped = stats.skipped,
        bytes = stats.bytes_written,
        "extracted archive"
    );
    Ok(stats)
}

fn settle(
    e: &EntryDescriptor,
    res: Result<(CodecId, u64)>,
    policy: EntryErrorPolicy,
    stats: &mut ExtractStats,
) -> Result<()> {
    match res {
        Ok((codec, bytes)) => {
            stats.record(codec, bytes);
            Ok(())
        }
        Err(err) => match policy {
            EntryErrorPolicy::Abort => {
                error!(entry = %e.name, "aborting extraction: {err}");
                Err(err)
            }
            EntryErrorPolicy::Skip => {
                warn!(entry = %e.name, "skipping entry: {err}");
                stats.skipped += 1;
                Ok(())
            }
        },
    }
}

/// Read, decode, check and write a single entry. `file_len` bounds the
/// payload range before anything is allocated for it.
pub fn extract_entry<R: Read + Seek>(
    r: &mut R,
    e: &EntryDescriptor,
    file_len: u64,
    root: &Path,
    cfg: &DecodeConfig,
) -> Result<(CodecId, u64)> {
    let dest: PathBuf = safe_join(root, &e.name)?;

    let end = e.data_offset as u64 + e.compressed_size as u64;
    if end > file_len {
        return Err(TosError::Truncated {
            what: "entry payload",
            offset: e.data_offset as u64,
            need: e.compressed_size as usize,
        });
    }
    r.seek(SeekFrom::Start(e.data_offset as u64))?;
    let mut payload = vec![0u8; e.compressed_size as usize];
    read_record(r, &mut payload, "entry payload")?;

    let codec = e.codec(cfg);
    let data = decoder_for(codec)
        .decompress(&payload, e.uncompressed_size as usize)
        .map_err(|err| TosError::Decompress {
            entry: e.name.clone(),
            reason: err.to_string(),
        })?;
    if codec == CodecId::Deflate && data.len() != e.uncompressed_size as usize {
        return Err(TosError::Decompress {
            entry: e.name.clone(),
            reason: format!(
                "inflated to {} bytes, index declares {}",
                data.len(),
                e.uncompressed_size
            ),
        });
    }
    if cfg.verify_crc {
        let computed = crc32fast::hash(&data);
        if computed != e.crc {
            return Err(TosError::Checksum {
                entry: e.name.clone(),
                stored: e.crc,
                computed,
            });
        }
    }

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&dest, &data)?;
    debug!(entry = %e.name, codec = codec.name(), bytes = data.len(), "wrote entry");
    Ok((codec, data.len() as u64))
}
