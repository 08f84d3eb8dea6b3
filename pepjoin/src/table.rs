//! In-memory tables: a [`Frame`] of named, typed columns, and a
//! [`PeptideTable`] that adds a unique peptide key to each row.
use super::*;

#[derive(Clone, Debug, PartialEq)]
/// A single column of cells. `None` marks a missing cell, and so does a
/// numeric NaN.
pub enum Column {
    Numeric(Vec<Option<f64>>),
    /// Opaque string tokens, e.g. taxon ids or functional terms
    Text(Vec<Option<String>>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Numeric(v) => v.len(),
            Column::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_missing(&self, row: usize) -> bool {
        match self {
            Column::Numeric(v) => is_nan_or_none(v[row]),
            Column::Text(v) => v[row].is_none(),
        }
    }

    pub fn as_numeric(&self) -> Option<&[Option<f64>]> {
        match self {
            Column::Numeric(v) => Some(v),
            Column::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&[Option<String>]> {
        match self {
            Column::Text(v) => Some(v),
            Column::Numeric(_) => None,
        }
    }

    fn take(&self, rows: &[usize]) -> Column {
        match self {
            Column::Numeric(v) => Column::Numeric(rows.iter().map(|&i| v[i]).collect()),
            Column::Text(v) => Column::Text(rows.iter().map(|&i| v[i].clone()).collect()),
        }
    }

    fn retain(&mut self, mask: &[bool]) {
        let mut keep = mask.iter();
        match self {
            Column::Numeric(v) => v.retain(|_| keep.next().copied().unwrap_or(false)),
            Column::Text(v) => v.retain(|_| keep.next().copied().unwrap_or(false)),
        }
    }
}

#[inline]
fn is_nan_or_none(cell: Option<f64>) -> bool {
    cell.map_or(true, f64::is_nan)
}

/// How [`Frame::drop_missing`] decides whether a row goes
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum How {
    /// Drop the row if any of the columns is missing
    Any,
    /// Drop the row only if every one of the columns is missing
    All,
}

/// Ordered collection of equal-height named columns
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    names: Vec<String>,
    columns: Vec<Column>,
    height: usize,
}

impl Frame {
    pub fn new() -> Frame {
        Frame::default()
    }

    /// Append a column. The first column pushed fixes the frame's height.
    pub fn push_column<S: Into<String>>(&mut self, name: S, column: Column) -> Result<()> {
        let name = name.into();
        if self.names.contains(&name) {
            return Err(Error::ColumnCollision { column: name });
        }
        if !self.columns.is_empty() && column.len() != self.height {
            return Err(Error::ColumnLength {
                column: name,
                expected: self.height,
                found: column.len(),
            });
        }
        self.height = column.len();
        self.names.push(name);
        self.columns.push(column);
        Ok(())
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.position(name).map(|idx| &self.columns[idx])
    }

    fn require(&self, name: &str) -> Result<usize> {
        self.position(name).ok_or_else(|| Error::UnknownColumn {
            column: name.into(),
        })
    }

    /// Project onto `names`, in the order given
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Frame> {
        let mut frame = Frame::new();
        for name in names {
            let idx = self.require(name.as_ref())?;
            frame.push_column(name.as_ref(), self.columns[idx].clone())?;
        }
        // An empty projection still describes `height` rows
        if names.is_empty() {
            frame.height = self.height;
        }
        Ok(frame)
    }

    /// Build a new frame from the given row indices, in order
    pub fn take_rows(&self, rows: &[usize]) -> Frame {
        Frame {
            names: self.names.clone(),
            columns: self.columns.iter().map(|c| c.take(rows)).collect(),
            height: rows.len(),
        }
    }

    /// Keep only rows where `mask` is true
    pub fn retain_rows(&mut self, mask: &[bool]) {
        for column in &mut self.columns {
            column.retain(mask);
        }
        self.height = mask.iter().take(self.height).filter(|&&k| k).count();
    }

    /// Row mask: which rows survive a missing-value check over `names`
    pub fn present_mask<S: AsRef<str>>(&self, names: &[S], how: How) -> Result<Vec<bool>> {
        let indices = names
            .iter()
            .map(|n| self.require(n.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        Ok((0..self.height)
            .map(|row| {
                let mut missing = indices.iter().map(|&c| self.columns[c].is_missing(row));
                match how {
                    How::Any => !missing.any(|m| m),
                    How::All => !missing.all(|m| m),
                }
            })
            .collect())
    }

    /// Drop rows that are missing in `names`, returning the number dropped
    pub fn drop_missing<S: AsRef<str>>(&mut self, names: &[S], how: How) -> Result<usize> {
        let mask = self.present_mask(names, how)?;
        let before = self.height;
        self.retain_rows(&mask);
        Ok(before - self.height)
    }

    /// Replace missing (or NaN) cells in the numeric columns `names` with `value`
    pub fn fill_missing<S: AsRef<str>>(&mut self, names: &[S], value: f64) -> Result<()> {
        for name in names {
            let idx = self.require(name.as_ref())?;
            if let Column::Numeric(cells) = &mut self.columns[idx] {
                cells
                    .iter_mut()
                    .filter(|c| is_nan_or_none(**c))
                    .for_each(|c| *c = Some(value));
            }
        }
        Ok(())
    }
}

/// A [`Frame`] whose rows are uniquely keyed by peptide sequence
#[derive(Clone, Debug, PartialEq)]
pub struct PeptideTable {
    key_name: String,
    keys: Vec<String>,
    index: HashMap<String, usize>,
    frame: Frame,
}

impl PeptideTable {
    /// Attach `keys` to the rows of `frame`. Keys must be unique.
    pub fn new<S: Into<String>>(
        key_name: S,
        keys: Vec<String>,
        frame: Frame,
    ) -> Result<PeptideTable> {
        let key_name = key_name.into();
        if frame.width() > 0 && keys.len() != frame.height() {
            return Err(Error::ColumnLength {
                column: key_name,
                expected: frame.height(),
                found: keys.len(),
            });
        }
        if frame.names().contains(&key_name) {
            return Err(Error::ColumnCollision { column: key_name });
        }

        let mut index = HashMap::with_capacity(keys.len());
        for (idx, key) in keys.iter().enumerate() {
            if index.insert(key.clone(), idx).is_some() {
                return Err(Error::DuplicateKey {
                    key: key.clone(),
                    source_name: key_name,
                });
            }
        }

        let mut frame = frame;
        frame.height = keys.len();
        Ok(PeptideTable {
            key_name,
            keys,
            index,
            frame,
        })
    }

    /// Peptide keys in row order
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn contains(&self, peptide: &str) -> bool {
        self.index.contains_key(peptide)
    }

    /// Row index of `peptide`
    pub fn row(&self, peptide: &str) -> Option<usize> {
        self.index.get(peptide).copied()
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Numeric cell for `peptide` in `column`
    pub fn numeric(&self, peptide: &str, column: &str) -> Option<Option<f64>> {
        let row = self.row(peptide)?;
        self.frame.column(column)?.as_numeric().map(|v| v[row])
    }

    /// Text cell for `peptide` in `column`
    pub fn text(&self, peptide: &str, column: &str) -> Option<Option<&str>> {
        let row = self.row(peptide)?;
        self.frame
            .column(column)?
            .as_text()
            .map(|v| v[row].as_deref())
    }

    /// Inner join on the peptide key.
    ///
    /// Rows keep the order of `self`; the columns of `other` are appended
    /// after those of `self`.
    pub fn inner_join(&self, other: &PeptideTable) -> Result<PeptideTable> {
        let mut left = Vec::new();
        let mut right = Vec::new();
        for (idx, key) in self.keys.iter().enumerate() {
            if let Some(r) = other.row(key) {
                left.push(idx);
                right.push(r);
            }
        }

        let mut frame = self.frame.take_rows(&left);
        let rhs = other.frame.take_rows(&right);
        for (name, column) in rhs.names.into_iter().zip(rhs.columns) {
            frame.push_column(name, column)?;
        }
        frame.height = left.len();

        let keys = left.iter().map(|&i| self.keys[i].clone()).collect();
        PeptideTable::new(self.key_name.clone(), keys, frame)
    }

    /// Convert into a plain [`Frame`], with the peptide key as the first column
    pub fn into_frame(self) -> Frame {
        let mut names = Vec::with_capacity(self.frame.width() + 1);
        let mut columns = Vec::with_capacity(self.frame.width() + 1);
        names.push(self.key_name);
        columns.push(Column::Text(self.keys.into_iter().map(Some).collect()));
        names.extend(self.frame.names);
        columns.extend(self.frame.columns);
        Frame {
            names,
            columns,
            height: self.frame.height,
        }
    }
}
