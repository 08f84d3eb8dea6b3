//! Tab-delimited text parsing shared by the table readers
use super::*;
use memchr::{memchr_iter, Memchr};
use std::fs;

/// Cell tokens read as missing. The number zero is never one of them.
pub const MISSING_VALUES: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "#N/A", "#N/A N/A", "#NA", "-1.#IND",
    "-1.#QNAN", "1.#IND", "1.#QNAN", "<NA>", "NULL", "null", "None",
];

#[inline]
pub fn is_missing(cell: &str) -> bool {
    MISSING_VALUES.contains(&cell)
}

/// Generalized wrapper around [`Memchr`] iterator for splitting `&str` slices
/// by a byte.
pub(crate) struct Pitchfork<'a> {
    pos: usize,
    haystack: &'a str,
    inner: Memchr<'a>,
    /// Yield an empty final slice after a trailing needle
    trailing: bool,
}

impl<'a> Pitchfork<'a> {
    /// Split into lines; a trailing newline does not start a new line
    pub fn new(needle: u8, haystack: &'a str) -> Self {
        Self {
            pos: 0,
            haystack,
            inner: memchr_iter(needle, haystack.as_bytes()),
            trailing: false,
        }
    }

    /// Split into fields; a trailing delimiter ends with an empty field
    pub fn fields(needle: u8, haystack: &'a str) -> Self {
        Self {
            trailing: true,
            ..Self::new(needle, haystack)
        }
    }
}

impl<'a> Iterator for Pitchfork<'a> {
    type Item = &'a str;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let end = match self.inner.next() {
            Some(e) => e,
            None => {
                let len = self.haystack.len();
                if self.pos < len || (self.trailing && self.pos == len) {
                    len
                } else {
                    return None;
                }
            }
        };
        // `needle` is ASCII, so both ends fall on char boundaries
        let slice = &self.haystack[self.pos..end];
        self.pos = end + 1;
        Some(slice)
    }
}

#[derive(Debug)]
pub(crate) struct Row<'a> {
    /// 1-based line number in the source file
    pub line: usize,
    pub fields: Vec<&'a str>,
}

/// A parsed tab-delimited file, borrowing from the file contents
#[derive(Debug)]
pub(crate) struct Records<'a> {
    pub path: &'a Path,
    pub header: Vec<&'a str>,
    pub rows: Vec<Row<'a>>,
}

/// Read the whole file at `path` into memory
pub(crate) fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Split `buffer` into a header and rows of trimmed fields.
///
/// A short row is an error rather than being padded with missing cells.
pub(crate) fn parse<'a>(path: &'a Path, buffer: &'a str) -> Result<Records<'a>> {
    let buffer = buffer.strip_prefix('\u{feff}').unwrap_or(buffer);
    let mut lines = Pitchfork::new(b'\n', buffer)
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.strip_suffix('\r').unwrap_or(line)))
        .filter(|(_, line)| !line.trim().is_empty());

    let header = match lines.next() {
        Some((_, line)) => split(line),
        None => {
            return Err(Error::EmptyFile {
                path: path.to_path_buf(),
            })
        }
    };

    let mut rows = Vec::new();
    for (line, text) in lines {
        let fields = split(text);
        if fields.len() != header.len() {
            return Err(Error::RaggedRow {
                path: path.to_path_buf(),
                line,
                expected: header.len(),
                found: fields.len(),
            });
        }
        rows.push(Row { line, fields });
    }

    Ok(Records { path, header, rows })
}

fn split(line: &str) -> Vec<&str> {
    Pitchfork::fields(b'\t', line).map(str::trim).collect()
}

impl<'a> Records<'a> {
    /// Index of `column` in the header
    pub fn position(&self, column: &str) -> Result<usize> {
        self.header
            .iter()
            .position(|&h| h == column)
            .ok_or_else(|| Error::MissingColumn {
                column: column.into(),
                path: self.path.to_path_buf(),
            })
    }

    /// Peptide keys from the column at `idx`, for rows where `keep` is true.
    /// A missing key in a kept row is an error.
    pub fn keys(&self, idx: usize, keep: &[bool]) -> Result<Vec<String>> {
        self.rows
            .iter()
            .zip(keep)
            .filter(|(_, k)| **k)
            .map(|(row, _)| {
                let cell = row.fields[idx];
                if is_missing(cell) {
                    Err(Error::MissingKey {
                        path: self.path.to_path_buf(),
                        line: row.line,
                        column: self.header[idx].into(),
                    })
                } else {
                    Ok(cell.to_string())
                }
            })
            .collect()
    }

    /// Coerce the column at `idx` to numbers of type `ty`
    pub fn numeric(&self, idx: usize, ty: NumericType) -> Result<Column> {
        self.rows
            .iter()
            .map(|row| {
                let cell = row.fields[idx];
                if is_missing(cell) {
                    return Ok(None);
                }
                // NaN parses, but is missing like any other NA token
                let value = parse_number(cell, ty).ok_or_else(|| Error::InvalidNumber {
                    path: self.path.to_path_buf(),
                    line: row.line,
                    column: self.header[idx].into(),
                    value: cell.into(),
                    expected: match ty {
                        NumericType::Float => "a number",
                        NumericType::Integer => "an integer",
                    },
                })?;
                Ok(Some(value).filter(|x| !x.is_nan()))
            })
            .collect::<Result<Vec<_>>>()
            .map(Column::Numeric)
    }

    /// Read the column at `idx` as opaque tokens, however numeric they look
    pub fn text(&self, idx: usize) -> Column {
        Column::Text(
            self.rows
                .iter()
                .map(|row| {
                    let cell = row.fields[idx];
                    if is_missing(cell) {
                        None
                    } else {
                        Some(cell.to_string())
                    }
                })
                .collect(),
        )
    }
}

fn parse_number(cell: &str, ty: NumericType) -> Option<f64> {
    match ty {
        NumericType::Float => cell.parse::<f64>().ok(),
        NumericType::Integer => cell.parse::<i64>().ok().map(|i| i as f64),
    }
}
