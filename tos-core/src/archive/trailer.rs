use crate::error::{Result, TosError};
use crate::util::prim::{read_record, read_u16_le, read_u32_le};
use std::io::{Read, Seek, SeekFrom};

pub const TRAILER_LEN: u64 = 24;

/// Fixed trailer in the last 24 bytes of an IPF file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ArchiveMeta {
    pub entry_count: u16,
    /// Absolute offset of the first index entry.
    pub index_offset: u32,
    /// Not interpreted.
    pub flag: u16,
    pub reserved: [u8; 16],
}

impl ArchiveMeta {
    pub fn from_bytes(b: &[u8; TRAILER_LEN as usize]) -> Self {
        let mut reserved = [0u8; 16];
        reserved.copy_from_slice(&b[8..24]);
        Self {
            entry_count: read_u16_le(&b[0..2]),
            index_offset: read_u32_le(&b[2..6]),
            flag: read_u16_le(&b[6..8]),
            reserved,
        }
    }
}

#[cfg(test)]
impl ArchiveMeta {
    pub(crate) fn to_bytes(&self) -> [u8; TRAILER_LEN as usize] {
        let mut b = [0u8; TRAILER_LEN as usize];
        b[0..2].copy_from_slice(&self.entry_count.to_le_bytes());
        b[2..6].copy_from_slice(&self.index_offset.to_le_bytes());
        b[6..8].copy_from_slice(&self.flag.to_le_bytes());
        b[8..24].copy_from_slice(&self.reserved);
        b
    }
}

/// Locate the trailer by reading the last 24 bytes of the file.
/// Returns it together with the file length.
pub fn read_trailer_at_eof<F: Read + Seek>(f: &mut F) -> Result<(ArchiveMeta, u64)> {
    let len = f.seek(SeekFrom::End(0))?;
    if len < TRAILER_LEN {
        return Err(TosError::Truncated {
            what: "archive trailer",
            offset: 0,
            need: TRAILER_LEN as usize,
        });
    }
    f.seek(SeekFrom::Start(len - TRAILER_LEN))?;
    let mut buf = [0u8; TRAILER_LEN as usize];
    read_record(f, &mut buf, "archive trailer")?;
    Ok((ArchiveMeta::from_bytes(&buf), len))
}
