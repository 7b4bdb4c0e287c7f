//! IES: a flat table with a named header, a column-descriptor section and a
//! row section. Section offsets are derived from the header.

pub mod column;
pub mod export;
pub mod header;
pub mod row;
pub mod schema;

use crate::config::DecodeConfig;
use crate::error::{Result, TosError};
use crate::format::TosFormat;
use column::{ColumnDescriptor, ColumnSet};
use header::IesHeader;
use row::{Row, Value};
use schema::SchemaInfo;

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum TableState {
    Unopened,
    HeaderParsed,
    SchemaParsed,
    SchemaSorted,
    RowsParsed,
}

/// A fully decoded table.
#[derive(Clone, Debug)]
pub struct Table {
    pub header: IesHeader,
    pub schema: SchemaInfo,
    /// Sorted column sequence: int bucket, then string bucket.
    pub columns: Vec<ColumnDescriptor>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn name(&self) -> &str {
        &self.header.name
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Row `i` keyed by column name.
    pub fn record(&self, i: usize) -> Option<BTreeMap<&str, &Value>> {
        let row = self.rows.get(i)?;
        Some(self.column_names().zip(row.cells.iter()).collect())
    }
}

/// Step-wise decoder over any seekable source.
pub struct TableDecoder<R> {
    r: R,
    key: u8,
    state: TableState,
    header: Option<IesHeader>,
    schema: Option<SchemaInfo>,
    columns: Option<ColumnSet>,
    rows: Vec<Row>,
}

impl<R: Read + Seek> TableDecoder<R> {
    pub fn new(r: R, key: u8) -> Self {
        Self {
            r,
            key,
            state: TableState::Unopened,
            header: None,
            schema: None,
            columns: None,
            rows: Vec::new(),
        }
    }

    pub fn state(&self) -> TableState {
        self.state
    }

    pub fn parse_header(&mut self) -> Result<&IesHeader> {
        let h = IesHeader::read_from(&mut self.r, self.key)?;
        debug!(
            name = %h.name,
            file_size = h.file_size,
            hint_a = h.hint_a,
            hint_b = h.hint_b,
            "table header"
        );
        self.state = TableState::HeaderParsed;
        Ok(self.header.insert(h))
    }

    pub fn parse_schema(&mut self) -> Result<&SchemaInfo> {
        if self.header.is_none() {
            return Err(TosError::NotParsed("table header"));
        }
        let s = SchemaInfo::read_from(&mut self.r)?;
        debug!(
            rows = s.rows,
            int_columns = s.int_columns,
            string_columns = s.string_columns,
            "table schema"
        );
        self.state = TableState::SchemaParsed;
        Ok(self.schema.insert(s))
    }

    pub fn parse_columns(&mut self) -> Result<&ColumnSet> {
        let header = self
            .header
            .as_ref()
            .ok_or(TosError::NotParsed("table header"))?;
        let schema = self.schema.ok_or(TosError::NotParsed("table schema"))?;
        let offset = header.column_offset()?;

        let set = ColumnSet::read_from(&mut self.r, offset, schema.columns, self.key)?;
        if set.ints.len() != schema.int_columns as usize
            || set.strings.len() != schema.string_columns as usize
        {
            return Err(TosError::Format(format!(
                "descriptors declare {} int / {} string columns, schema says {} / {}",
                set.ints.len(),
                set.strings.len(),
                schema.int_columns,
                schema.string_columns
            )));
        }
        self.state = TableState::SchemaSorted;
        Ok(self.columns.insert(set))
    }

    pub fn parse_rows(&mut self) -> Result<&[Row]> {
        let header = self
            .header
            .as_ref()
            .ok_or(TosError::NotParsed("table header"))?;
        let schema = self.schema.ok_or(TosError::NotParsed("table schema"))?;
        if self.columns.is_none() {
            return Err(TosError::NotParsed("column descriptors"));
        }
        let offset = header.row_offset()?;

        self.r.seek(SeekFrom::Start(offset))?;
        let mut rows = Vec::with_capacity(schema.rows as usize);
        for i in 0..schema.rows {
            let row = Row::read_from(&mut self.r, &schema, self.key)?;
            debug!(row = i, cells = row.cells.len(), "decoded row");
            rows.push(row);
        }
        self.rows = rows;
        self.state = TableState::RowsParsed;
        Ok(&self.rows)
    }

    /// Run whichever steps have not run yet and hand back the table.
    pub fn decode(mut self) -> Result<Table> {
        if self.state < TableState::HeaderParsed {
            self.parse_header()?;
        }
        if self.state < TableState::SchemaParsed {
            self.parse_schema()?;
        }
        if self.state < TableState::SchemaSorted {
            self.parse_columns()?;
        }
        if self.state < TableState::RowsParsed {
            self.parse_rows()?;
        }
        match (self.header, self.schema, self.columns) {
            (Some(header), Some(schema), Some(columns)) => Ok(Table {
                header,
                schema,
                columns: columns.into_ordered(),
                rows: self.rows,
            }),
            _ => Err(TosError::NotParsed("table")),
        }
    }
}

/// An IES file on disk.
pub struct IesFile {
    path: PathBuf,
    key: u8,
    decoder: Option<TableDecoder<BufReader<File>>>,
    table: Option<Table>,
}

impl IesFile {
    pub fn open(path: &Path, cfg: &DecodeConfig) -> Result<Self> {
        let f = File::open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            key: cfg.xor_key,
            decoder: Some(TableDecoder::new(BufReader::new(f), cfg.xor_key)),
            table: None,
        })
    }

    pub fn table(&self) -> Option<&Table> {
        self.table.as_ref()
    }
}

impl TosFormat for IesFile {
    fn parse(&mut self) -> Result<()> {
        let decoder = match self.decoder.take() {
            Some(d) => d,
            // a failed earlier parse consumed the decoder; start over
            None => TableDecoder::new(BufReader::new(File::open(&self.path)?), self.key),
        };
        let table = decoder.decode()?;
        info!(
            file = %self.path.display(),
            table = %table.name(),
            rows = table.rows.len(),
            columns = table.columns.len(),
            "parsed table"
        );
        self.table = Some(table);
        Ok(())
    }

    fn extract(&mut self, out_root: &Path) -> Result<()> {
        let table = self.table.as_ref().ok_or(TosError::NotParsed("table"))?;
        let written = export::write_table(table, out_root, &self.path)?;
        info!(out = %written.display(), rows = table.rows.len(), "wrote table");
        Ok(())
    }
}
