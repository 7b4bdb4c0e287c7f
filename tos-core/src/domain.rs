use crate::codec::CodecId;
use crate::table::column::ColumnKind;

/// One column of an IES file, in final (sorted) position.
#[derive(Clone, Debug)]
pub struct ColumnRow {
    pub position: usize,
    pub name: String,
    pub alt_name: String,
    pub kind: ColumnKind,
    pub order: u8,
}

/// One entry of an IPF index.
#[derive(Clone, Debug)]
pub struct EntryRow {
    pub path: String,
    pub c_size: u32,
    pub u_size: u32,
    pub crc: u32,
    pub data_off: u32,
    pub codec: CodecId,
    pub comment: String,
}

#[derive(Clone, Debug)]
pub enum Listing {
    Columns { table: String, rows: u16, columns: Vec<ColumnRow> },
    Entries(Vec<EntryRow>),
}
