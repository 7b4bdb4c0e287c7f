use crate::archive::ArchiveDecoder;
use crate::config::DecodeConfig;
use crate::domain::{ColumnRow, EntryRow, Listing};
use crate::error::Result;
use crate::format::FormatTag;
use crate::table::TableDecoder;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub fn list(tag: FormatTag, path: &Path, cfg: &DecodeConfig) -> Result<Listing> {
    match tag {
        FormatTag::Ies => list_table(path, cfg),
        FormatTag::Ipf => list_archive(path, cfg).map(Listing::Entries),
    }
}

/// Column layout only; the row section is never read.
pub fn list_table(path: &Path, cfg: &DecodeConfig) -> Result<Listing> {
    let f = File::open(path)?;
    let mut d = TableDecoder::new(BufReader::new(f), cfg.xor_key);
    let table = d.parse_header()?.name.clone();
    let rows = d.parse_schema()?.rows;
    let columns = d
        .parse_columns()?
        .ordered()
        .enumerate()
        .map(|(position, c)| ColumnRow {
            position,
            name: c.name.clone(),
            alt_name: c.alt_name.clone(),
            kind: c.kind(),
            order: c.order,
        })
        .collect();
    Ok(Listing::Columns {
        table,
        rows,
        columns,
    })
}

pub fn list_archive(path: &Path, cfg: &DecodeConfig) -> Result<Vec<EntryRow>> {
    let f = File::open(path)?;
    let archive = ArchiveDecoder::new(BufReader::new(f)).decode()?;
    Ok(archive
        .entries
        .iter()
        .map(|e| EntryRow {
            path: e.name.clone(),
            c_size: e.compressed_size,
            u_size: e.uncompressed_size,
            crc: e.crc,
            data_off: e.data_offset,
            codec: e.codec(cfg),
            comment: e.comment.clone(),
        })
        .collect())
}
