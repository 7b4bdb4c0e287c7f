use super::trailer::ArchiveMeta;
use crate::codec::CodecId;
use crate::config::DecodeConfig;
use crate::error::{Result, TosError};
use crate::util::prim::{read_record, read_u16_le, read_u32_le, take};
use std::io::{Read, Seek, SeekFrom};
use tracing::trace;

/// Fixed part of an index entry. Comment and name follow it unpadded.
pub const DESCRIPTOR_LEN: usize = 20;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryDescriptor {
    pub name_len: u16,
    pub crc: u32,
    pub compressed_size: u32,
    pub uncompressed_size: u32,
    pub data_offset: u32,
    pub comment_len: u16,
    pub comment: String,
    /// Path inside the archive, `/`-separated.
    pub name: String,
}

impl EntryDescriptor {
    pub fn codec(&self, cfg: &DecodeConfig) -> CodecId {
        if cfg.is_passthrough(&self.name) {
            CodecId::Store
        } else {
            CodecId::Deflate
        }
    }
}

#[cfg(test)]
impl EntryDescriptor {
    pub(crate) fn to_bytes(&self) -> Vec<u8> {
        let mut b = Vec::with_capacity(
            DESCRIPTOR_LEN + self.comment_len as usize + self.name_len as usize,
        );
        b.extend(self.name_len.to_le_bytes());
        b.extend(self.crc.to_le_bytes());
        b.extend(self.compressed_size.to_le_bytes());
        b.extend(self.uncompressed_size.to_le_bytes());
        b.extend(self.data_offset.to_le_bytes());
        b.extend(self.comment_len.to_le_bytes());
        b.extend(self.comment.as_bytes());
        b.extend(self.name.as_bytes());
        b
    }
}

/// Decode the entry starting at `at`; returns it with the cursor just past it.
/// `base` is the file offset of `buf[0]`, used for error reporting.
pub fn parse_entry(buf: &[u8], at: usize, base: u64) -> Result<(EntryDescriptor, usize)> {
    let d = take(buf, at, DESCRIPTOR_LEN, base, "index entry")?;
    let name_len = read_u16_le(&d[0..2]);
    let comment_len = read_u16_le(&d[18..20]);

    let mut cur = at + DESCRIPTOR_LEN;
    let comment = take(buf, cur, comment_len as usize, base, "entry comment")?;
    cur += comment.len();
    let name = take(buf, cur, name_len as usize, base, "entry name")?;
    cur += name.len();

    let e = EntryDescriptor {
        name_len,
        crc: read_u32_le(&d[2..6]),
        compressed_size: read_u32_le(&d[6..10]),
        uncompressed_size: read_u32_le(&d[10..14]),
        data_offset: read_u32_le(&d[14..18]),
        comment_len,
        comment: String::from_utf8_lossy(comment).into_owned(),
        name: String::from_utf8_lossy(name).into_owned(),
    };
    Ok((e, cur))
}

/// Fold `count` entries out of `buf`, carrying the cursor from one entry to
/// the next. Returns the entries and the number of bytes consumed.
pub fn parse_index(buf: &[u8], base: u64, count: u16) -> Result<(Vec<EntryDescriptor>, usize)> {
    (0..count).try_fold(
        (Vec::with_capacity(count as usize), 0usize),
        |(mut entries, cur), i| -> Result<(Vec<EntryDescriptor>, usize)> {
            let (e, next) = parse_entry(buf, cur, base)?;
            trace!(
                index = i,
                name = %e.name,
                c = e.compressed_size,
                u = e.uncompressed_size,
                off = e.data_offset,
                "index entry"
            );
            entries.push(e);
            Ok((entries, next))
        },
    )
}

/// Read the index described by `meta` out of a file of length `file_len`.
/// Returns the entries and the absolute offset just past the last one.
pub fn read_index<R: Read + Seek>(
    r: &mut R,
    meta: &ArchiveMeta,
    file_len: u64,
) -> Result<(Vec<EntryDescriptor>, u64)> {
    let start = meta.index_offset as u64;
    if start > file_len {
        return Err(TosError::Truncated {
            what: "index entry",
            offset: start,
            need: DESCRIPTOR_LEN,
        });
    }
    r.seek(SeekFrom::Start(start))?;
    let mut region = vec![0u8; (file_len - start) as usize];
    read_record(r, &mut region, "archive index")?;

    let (entries, used) = parse_index(&region, start, meta.entry_count)?;
    Ok((entries, start + used as u64))
}
