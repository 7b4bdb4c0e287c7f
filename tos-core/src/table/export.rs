use super::Table;
use crate::error::Result;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// `item.ies` becomes `item.ies.csv`.
pub fn csv_file_name(source: &Path) -> String {
    let base = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "table".to_string());
    format!("{base}.csv")
}

/// Header line of sorted column names, then one line per row.
pub fn write_csv<W: Write>(table: &Table, mut w: W) -> Result<()> {
    if table.columns.is_empty() {
        // csv renders an empty record as `""`; every line is blank instead
        for _ in 0..=table.rows.len() {
            w.write_all(b"\n")?;
        }
        w.flush()?;
        return Ok(());
    }
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(w);
    wtr.write_record(table.column_names())?;
    for row in &table.rows {
        wtr.write_record(row.cells.iter().map(|v| v.to_string()))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write `<out_dir>/<source name>.csv`, creating `out_dir` if needed.
pub fn write_table(table: &Table, out_dir: &Path, source: &Path) -> Result<PathBuf> {
    fs::create_dir_all(out_dir)?;
    let dest = out_dir.join(csv_file_name(source));
    let f = fs::File::create(&dest)?;
    write_csv(table, std::io::BufWriter::new(f))?;
    Ok(dest)
}
