//! CSV export of crosstabs

use crate::table::CrossTable;
use num_traits::Zero;
use std::fmt::Display;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use survey_core::Result;
use tracing::debug;

/// Write one table as CSV: a header of column labels (led by the row
/// variable name), then one line per row label.
pub fn write_csv<T, W>(table: &CrossTable<T>, writer: W) -> Result<()>
where
    T: Copy + Zero + Display,
    W: Write,
{
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec![table.row_name().to_string()];
    header.extend(table.col_labels().iter().cloned());
    wtr.write_record(&header).map_err(std::io::Error::from)?;

    for (i, label) in table.row_labels().iter().enumerate() {
        let mut record = vec![label.clone()];
        record.extend(table.row(i).iter().map(|v| v.to_string()));
        wtr.write_record(&record).map_err(std::io::Error::from)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write every table to `<dir>/<prefix>_<key>.csv`, creating `dir` if
/// needed. Files start with a UTF-8 byte order mark so spreadsheet tools
/// detect the encoding. Returns the written paths in input order.
pub fn export_csv<'a, T, I>(
    tables: I,
    dir: impl AsRef<Path>,
    prefix: &str,
) -> Result<Vec<PathBuf>>
where
    T: Copy + Zero + Display + 'a,
    I: IntoIterator<Item = (&'a str, &'a CrossTable<T>)>,
{
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;

    let mut saved = Vec::new();
    for (key, table) in tables {
        let path = dir.join(format!("{prefix}_{key}.csv"));
        let mut file = File::create(&path)?;
        file.write_all("\u{feff}".as_bytes())?;
        write_csv(table, file)?;
        debug!(path = %path.display(), "saved crosstab");
        saved.push(path);
    }
    Ok(saved)
}
