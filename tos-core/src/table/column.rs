use crate::error::Result;
use crate::util::prim::{deobfuscate_text, read_record};
use std::io::{Read, Seek, SeekFrom};

pub const COLUMN_LEN: usize = 136;
const COLUMN_NAME_LEN: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    Int,
    Str,
}

impl ColumnKind {
    pub fn from_tag(tag: u8) -> Self {
        if tag == 0 { ColumnKind::Int } else { ColumnKind::Str }
    }

    pub fn name(self) -> &'static str {
        match self {
            ColumnKind::Int => "int",
            ColumnKind::Str => "string",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnDescriptor {
    /// Primary name; rows are keyed by it.
    pub name: String,
    pub alt_name: String,
    pub type_tag: u8,
    pub reserved: [u8; 5],
    pub order: u8,
}

impl ColumnDescriptor {
    pub fn from_bytes(b: &[u8; COLUMN_LEN], key: u8) -> Self {
        let mut reserved = [0u8; 5];
        reserved.copy_from_slice(&b[129..134]);
        Self {
            name: deobfuscate_text(&b[..COLUMN_NAME_LEN], key),
            alt_name: deobfuscate_text(&b[COLUMN_NAME_LEN..2 * COLUMN_NAME_LEN], key),
            type_tag: b[128],
            reserved,
            order: b[134],
        }
    }

    pub fn kind(&self) -> ColumnKind {
        ColumnKind::from_tag(self.type_tag)
    }
}

/// Column descriptors split by type, each bucket sorted by ordering key.
///
/// Row cells are positional: all int cells come first, in `ints` order, then
/// all string cells in `strings` order. Declaration order in the file is
/// irrelevant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColumnSet {
    pub ints: Vec<ColumnDescriptor>,
    pub strings: Vec<ColumnDescriptor>,
}

impl ColumnSet {
    pub fn from_descriptors(descs: impl IntoIterator<Item = ColumnDescriptor>) -> Self {
        let (mut ints, mut strings): (Vec<_>, Vec<_>) = descs
            .into_iter()
            .partition(|d| d.kind() == ColumnKind::Int);
        // sort_by_key is stable: equal keys keep file order
        ints.sort_by_key(|d| d.order);
        strings.sort_by_key(|d| d.order);
        Self { ints, strings }
    }

    pub fn read_from<R: Read + Seek>(
        r: &mut R,
        offset: u64,
        count: u16,
        key: u8,
    ) -> Result<Self> {
        r.seek(SeekFrom::Start(offset))?;
        let mut descs = Vec::with_capacity(count as usize);
        let mut buf = [0u8; COLUMN_LEN];
        for _ in 0..count {
            read_record(r, &mut buf, "column descriptor")?;
            descs.push(ColumnDescriptor::from_bytes(&buf, key));
        }
        Ok(Self::from_descriptors(descs))
    }

    /// Final column sequence.
    pub fn ordered(&self) -> impl Iterator<Item = &ColumnDescriptor> {
        self.ints.iter().chain(self.strings.iter())
    }

    pub fn into_ordered(self) -> Vec<ColumnDescriptor> {
        let mut v = self.ints;
        v.extend(self.strings);
        v
    }
}
