use super::*;
use std::fs;
use std::io::{self, prelude::*, BufWriter};

/// Token written for a missing cell
pub const NA: &str = "NA";

/// Write `columns` of `frame` to `path` as tab-delimited text.
///
/// A header row is written, no index column, and missing cells become `NA`.
/// All columns are checked before the file is created.
pub fn write_table<P: AsRef<Path>, S: AsRef<str>>(
    frame: &Frame,
    path: P,
    columns: &[S],
) -> Result<()> {
    let path = path.as_ref();
    let selected = frame.select(columns)?;

    let file = fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })?;

    let mut w = BufWriter::new(file);
    write_frame(&selected, &mut w)
        .and_then(|_| w.flush())
        .map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })?;

    info!(
        "wrote {} rows x {} columns to {}",
        selected.height(),
        selected.width(),
        path.display()
    );
    Ok(())
}

/// Write `columns` of `frame` to any writer, as [`write_table`] does
pub fn write_to<W: Write, S: AsRef<str>>(frame: &Frame, mut w: W, columns: &[S]) -> Result<()> {
    let selected = frame.select(columns)?;
    write_frame(&selected, &mut w)?;
    Ok(())
}

fn write_frame<W: Write>(frame: &Frame, w: &mut W) -> io::Result<()> {
    writeln!(w, "{}", frame.names().join("\t"))?;

    let columns = frame
        .names()
        .iter()
        .filter_map(|n| frame.column(n))
        .collect::<Vec<_>>();

    let mut line = String::new();
    for row in 0..frame.height() {
        line.clear();
        for (idx, column) in columns.iter().enumerate() {
            if idx > 0 {
                line.push('\t');
            }
            match column {
                Column::Numeric(v) => match v[row] {
                    Some(x) if !x.is_nan() => line.push_str(&x.to_string()),
                    _ => line.push_str(NA),
                },
                Column::Text(v) => line.push_str(v[row].as_deref().unwrap_or(NA)),
            }
        }
        writeln!(w, "{}", line)?;
    }
    Ok(())
}
