use crate::error::{Result, TosError};
use crate::util::prim::{deobfuscate_text, read_record, read_u32_le};
use std::io::{Read, Seek, SeekFrom};

pub const HEADER_LEN: usize = 144;
pub const NAME_LEN: usize = 128;

/// Fixed header at the start of an IES file.
///
/// Neither section offset is stored on disk. Both are derived from the two
/// hint fields and the recorded file size; see [`IesHeader::column_offset`]
/// and [`IesHeader::row_offset`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IesHeader {
    pub name: String,
    pub reserved: u32,
    pub hint_a: u32,
    pub hint_b: u32,
    pub file_size: u32,
}

impl IesHeader {
    pub fn read_from<R: Read + Seek>(r: &mut R, key: u8) -> Result<Self> {
        r.seek(SeekFrom::Start(0))?;
        let mut buf = [0u8; HEADER_LEN];
        read_record(r, &mut buf, "table header")?;
        let h = Self::from_bytes(&buf, key);
        // validate both derivations up front so later steps can rely on them
        h.column_offset()?;
        h.row_offset()?;
        Ok(h)
    }

    pub fn from_bytes(buf: &[u8; HEADER_LEN], key: u8) -> Self {
        Self {
            name: deobfuscate_text(&buf[..NAME_LEN], key),
            reserved: read_u32_le(&buf[128..132]),
            hint_a: read_u32_le(&buf[132..136]),
            hint_b: read_u32_le(&buf[136..140]),
            file_size: read_u32_le(&buf[140..144]),
        }
    }

    /// Start of the column-descriptor section: `file_size - (hint_a + hint_b)`.
    pub fn column_offset(&self) -> Result<u64> {
        (self.hint_a as u64)
            .checked_add(self.hint_b as u64)
            .and_then(|hints| (self.file_size as u64).checked_sub(hints))
            .ok_or_else(|| {
                TosError::Format(format!(
                    "column section hints {} + {} exceed file size {}",
                    self.hint_a, self.hint_b, self.file_size
                ))
            })
    }

    /// Start of the row section: `file_size - hint_b`.
    pub fn row_offset(&self) -> Result<u64> {
        (self.file_size as u64)
            .checked_sub(self.hint_b as u64)
            .ok_or_else(|| {
                TosError::Format(format!(
                    "row section hint {} exceeds file size {}",
                    self.hint_b, self.file_size
                ))
            })
    }
}
