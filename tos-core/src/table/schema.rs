use super::header::HEADER_LEN;
use crate::error::{Result, TosError};
use crate::util::prim::{read_record, read_u16_le};
use std::io::{Read, Seek, SeekFrom};

/// Offset of the u16 that marks the alternate on-disk layout.
pub const LAYOUT_FLAG_OFFSET: u64 = 0x92;
pub const ALTERNATE_LAYOUT: u16 = 0x01;
pub const SCHEMA_LEN: usize = 12;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SchemaInfo {
    pub reserved: u16,
    pub rows: u16,
    pub columns: u16,
    pub int_columns: u16,
    pub string_columns: u16,
}

impl SchemaInfo {
    pub fn read_from<R: Read + Seek>(r: &mut R) -> Result<Self> {
        r.seek(SeekFrom::Start(LAYOUT_FLAG_OFFSET))?;
        let mut flag = [0u8; 2];
        read_record(r, &mut flag, "layout flag")?;
        let flag = read_u16_le(&flag);
        if flag == ALTERNATE_LAYOUT {
            return Err(TosError::UnsupportedLayout { flag });
        }

        r.seek(SeekFrom::Start(HEADER_LEN as u64))?;
        let mut buf = [0u8; SCHEMA_LEN];
        read_record(r, &mut buf, "schema record")?;
        let s = Self {
            reserved: read_u16_le(&buf[0..2]),
            rows: read_u16_le(&buf[2..4]),
            columns: read_u16_le(&buf[4..6]),
            int_columns: read_u16_le(&buf[6..8]),
            string_columns: read_u16_le(&buf[8..10]),
        };
        s.check()?;
        Ok(s)
    }

    fn check(&self) -> Result<()> {
        if self.int_columns as u32 + self.string_columns as u32 != self.columns as u32 {
            return Err(TosError::Format(format!(
                "column counts disagree: {} int + {} string != {} total",
                self.int_columns, self.string_columns, self.columns
            )));
        }
        Ok(())
    }
}
