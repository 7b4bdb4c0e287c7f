use std::path::{Path, PathBuf};

use tos_core::config::parse_key;
use tos_core::domain::Listing;
use tos_core::error::Result;
use tos_core::{DecodeConfig, EntryErrorPolicy, FormatTag, TosError, list, open_format};
use tracing::{info, warn};
use walkdir::WalkDir;

fn config_from_args(config: Option<PathBuf>, key: Option<String>) -> Result<DecodeConfig> {
    let mut cfg = match config {
        Some(path) => DecodeConfig::from_json_file(&path)?,
        None => DecodeConfig::default(),
    };
    if let Some(k) = key {
        cfg.xor_key = parse_key(&k)?;
    }
    Ok(cfg)
}

/// `input` itself when it is a file, otherwise every file below it carrying
/// the format's extension, in file-name order.
fn collect_inputs(input: &Path, tag: FormatTag) -> Result<Vec<PathBuf>> {
    if !input.is_dir() {
        return Ok(vec![input.to_path_buf()]);
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(input).sort_by_file_name() {
        let entry = entry.map_err(|e| TosError::Io(e.into()))?;
        let matches = entry
            .path()
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(tag.extension()));
        if entry.file_type().is_file() && matches {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Output root for one input: batch runs mirror the input's subdirectory.
fn out_root_for(input_root: &Path, file: &Path, out: &Path) -> PathBuf {
    file.strip_prefix(input_root)
        .ok()
        .and_then(|rel| rel.parent())
        .map_or_else(|| out.to_path_buf(), |dir| out.join(dir))
}

fn extract_one(tag: FormatTag, file: &Path, out: &Path, cfg: &DecodeConfig) -> Result<()> {
    let mut f = open_format(tag, file, cfg)?;
    f.parse()?;
    f.extract(out)
}

#[allow(clippy::too_many_arguments)]
pub fn handle_extract(
    format: String,
    input: PathBuf,
    out: PathBuf,
    key: Option<String>,
    config: Option<PathBuf>,
    keep_going: bool,
    verify_crc: bool,
    parallel: bool,
) -> Result<()> {
    let tag: FormatTag = format.parse()?;
    let mut cfg = config_from_args(config, key)?;
    if keep_going {
        cfg.on_entry_error = EntryErrorPolicy::Skip;
    }
    cfg.verify_crc |= verify_crc;
    cfg.parallel |= parallel;

    let files = collect_inputs(&input, tag)?;
    if files.is_empty() {
        warn!(input = %input.display(), "no {tag} files found");
    }

    let mut first_err = None;
    let mut failed = 0usize;
    for file in &files {
        let dest = out_root_for(&input, file, &out);
        match extract_one(tag, file, &dest, &cfg) {
            Ok(()) => {}
            Err(e) if cfg.on_entry_error == EntryErrorPolicy::Skip => {
                warn!(file = %file.display(), "failed: {e}");
                failed += 1;
                first_err.get_or_insert(e);
            }
            Err(e) => return Err(e),
        }
    }

    info!(
        format = %tag,
        files = files.len(),
        failed,
        out = %out.display(),
        "extract finished"
    );
    match first_err {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

pub fn handle_list(
    format: String,
    input: PathBuf,
    key: Option<String>,
    config: Option<PathBuf>,
) -> Result<()> {
    let tag: FormatTag = format.parse()?;
    let cfg = config_from_args(config, key)?;

    match list(tag, &input, &cfg)? {
        Listing::Columns {
            table,
            rows,
            columns,
        } => {
            println!("table={table} rows={rows} columns={}", columns.len());
            for c in columns {
                println!(
                    "#{:<4} {:<6} order={:<3} {} ({})",
                    c.position,
                    c.kind.name(),
                    c.order,
                    c.name,
                    c.alt_name
                );
            }
        }
        Listing::Entries(entries) => {
            for e in entries {
                println!(
                    "{:<8} c={:<9} u={:<9} crc={:08x} off={:<10} {}",
                    e.codec.name(),
                    e.c_size,
                    e.u_size,
                    e.crc,
                    e.data_off,
                    e.path
                );
            }
        }
    }
    Ok(())
}
