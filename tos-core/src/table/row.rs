use super::schema::SchemaInfo;
use crate::error::Result;
use crate::util::prim::{deobfuscate_text, read_prefixed, read_record, read_u32_le};
use std::fmt;
use std::io::{Read, Seek};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Int(u32),
    Str(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::Str(s) => f.write_str(s),
        }
    }
}

/// One decoded row. `cells[i]` belongs to the i-th column of the table's
/// sorted column list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    pub cells: Vec<Value>,
}

impl Row {
    /// Decode one row at the reader's position. Nothing is returned unless
    /// the whole row, trailing pad included, was readable.
    pub fn read_from<R: Read + Seek>(r: &mut R, schema: &SchemaInfo, key: u8) -> Result<Self> {
        let mut index = [0u8; 4];
        read_record(r, &mut index, "row index")?;
        read_prefixed(r, "row optional blob")?;

        let mut cells = Vec::with_capacity(schema.columns as usize);
        let mut int = [0u8; 4];
        for _ in 0..schema.int_columns {
            read_record(r, &mut int, "int cell")?;
            cells.push(Value::Int(read_u32_le(&int)));
        }
        for _ in 0..schema.string_columns {
            let raw = read_prefixed(r, "string cell")?;
            cells.push(Value::Str(deobfuscate_text(&raw, key)));
        }

        let mut pad = vec![0u8; schema.string_columns as usize];
        read_record(r, &mut pad, "row pad")?;
        Ok(Self { cells })
    }
}
