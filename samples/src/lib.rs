//! Sample group definitions for peptide intensity tables
//!
//! # File format
//!
//! Sample groups are described by a JSON object mapping each experimental
//! group to the intensity columns (samples) that belong to it. Group order,
//! and sample order within a group, is taken from the document.
//!
//! ```text
//! $ cat samples.json
//! {"NS": ["int737NS", "int852NS", "int867NS"],
//!  "WS": ["int737WS", "int852WS", "int867WS"]}
//! ```
//!
//! Intensities are read as floats. A sample may instead be given as an object
//! to declare its type, e.g. for spectral counts:
//!
//! ```text
//! {"NS": ["int737NS", {"name": "sc852NS", "type": "integer"}]}
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! # use samples::SampleGroups;
//! let groups = match SampleGroups::parse("samples.json") {
//!     Ok(groups) => groups,
//!     Err(e) => panic!("Error loading sample groups: {}", e),
//! };
//! assert_eq!(groups.mean_names(), &["NS_mean", "WS_mean"]);
//! ```
//!

use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Suffix for the per-group mean intensity column
pub const MEAN_SUFFIX: &str = "_mean";
/// Suffix for the per-sample count of peptides attributed to a node
pub const N_PEPTIDE_SUFFIX: &str = "_n_peptide";
/// Suffix for the per-sample count of a node's children with intensity
pub const N_CHILDREN_SUFFIX: &str = "_n_samp_children";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read sample groups from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid sample group JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("sample groups must define at least one group")]
    Empty,

    #[error("sample group '{group}' has no samples")]
    EmptyGroup { group: String },

    #[error("sample column '{sample}' is listed more than once")]
    DuplicateSample { sample: String },

    #[error("derived column name '{name}' clashes with another column")]
    NameClash { name: String },

    #[error("column '{column}' is not a sample in any group")]
    UnknownColumn { column: String },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Declared type of an intensity column
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumericType {
    /// Any decimal number
    Float,
    /// Whole numbers only, e.g. spectral counts
    Integer,
}

impl Default for NumericType {
    fn default() -> NumericType {
        NumericType::Float
    }
}

/// One sample as written in the JSON document
#[derive(Deserialize)]
#[serde(untagged)]
enum SampleEntry {
    Name(String),
    Typed {
        name: String,
        #[serde(rename = "type", default)]
        ty: NumericType,
    },
}

impl SampleEntry {
    fn into_parts(self) -> (String, NumericType) {
        match self {
            SampleEntry::Name(name) => (name, NumericType::default()),
            SampleEntry::Typed { name, ty } => (name, ty),
        }
    }
}

/// Experimental groups and the intensity columns that belong to them.
///
/// Derived column names (group means, per-sample node counts) are computed
/// once in [`SampleGroups::new`], which also guarantees that no two columns
/// named by the configuration collide.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleGroups {
    all_intcols: Vec<String>,
    numeric_types: HashMap<String, NumericType>,
    mean_names: Vec<String>,
    n_peptide_names: Vec<String>,
    children_names: Vec<String>,
}

impl SampleGroups {
    pub fn new(groups: Vec<(String, Vec<String>)>) -> Result<SampleGroups> {
        if groups.is_empty() {
            return Err(Error::Empty);
        }

        let mut all_intcols = Vec::new();
        let mut seen = HashSet::new();
        for (group, samples) in &groups {
            if samples.is_empty() {
                return Err(Error::EmptyGroup {
                    group: group.clone(),
                });
            }
            for sample in samples {
                if !seen.insert(sample.as_str()) {
                    return Err(Error::DuplicateSample {
                        sample: sample.clone(),
                    });
                }
                all_intcols.push(sample.clone());
            }
        }

        let mean_names = groups
            .iter()
            .map(|(group, _)| format!("{}{}", group, MEAN_SUFFIX))
            .collect::<Vec<_>>();
        let n_peptide_names = all_intcols
            .iter()
            .map(|s| format!("{}{}", s, N_PEPTIDE_SUFFIX))
            .collect::<Vec<_>>();
        let children_names = all_intcols
            .iter()
            .map(|s| format!("{}{}", s, N_CHILDREN_SUFFIX))
            .collect::<Vec<_>>();

        // Derived names share one namespace with the samples themselves
        for name in mean_names
            .iter()
            .chain(n_peptide_names.iter())
            .chain(children_names.iter())
        {
            if !seen.insert(name.as_str()) {
                return Err(Error::NameClash { name: name.clone() });
            }
        }

        let numeric_types = all_intcols
            .iter()
            .map(|s| (s.clone(), NumericType::default()))
            .collect();

        Ok(SampleGroups {
            all_intcols,
            numeric_types,
            mean_names,
            n_peptide_names,
            children_names,
        })
    }

    /// Build sample groups from a JSON object of `group -> [samples]`
    pub fn from_json(json: &str) -> Result<SampleGroups> {
        let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
        let mut groups = Vec::with_capacity(map.len());
        let mut types = Vec::new();
        for (group, samples) in map {
            let entries: Vec<SampleEntry> = serde_json::from_value(samples)?;
            let mut names = Vec::with_capacity(entries.len());
            for (name, ty) in entries.into_iter().map(SampleEntry::into_parts) {
                if ty != NumericType::default() {
                    types.push((name.clone(), ty));
                }
                names.push(name);
            }
            groups.push((group, names));
        }
        types
            .into_iter()
            .try_fold(SampleGroups::new(groups)?, |g, (name, ty)| {
                g.with_numeric_type(&name, ty)
            })
    }

    /// Load sample groups from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<SampleGroups> {
        let json = fs::read_to_string(path.as_ref()).map_err(|source| Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        })?;
        SampleGroups::from_json(&json)
    }

    /// Accept either inline JSON or the path of a JSON file
    pub fn parse(arg: &str) -> Result<SampleGroups> {
        if arg.trim_start().starts_with('{') {
            SampleGroups::from_json(arg)
        } else {
            SampleGroups::load(arg)
        }
    }

    /// Declare `column` as holding values of type `ty`
    pub fn with_numeric_type(mut self, column: &str, ty: NumericType) -> Result<SampleGroups> {
        match self.numeric_types.get_mut(column) {
            Some(t) => *t = ty,
            None => {
                return Err(Error::UnknownColumn {
                    column: column.into(),
                })
            }
        }
        Ok(self)
    }

    /// All intensity columns, in group order
    pub fn all_intcols(&self) -> &[String] {
        &self.all_intcols
    }

    pub fn numeric_type(&self, column: &str) -> Option<NumericType> {
        self.numeric_types.get(column).copied()
    }

    pub fn mean_names(&self) -> &[String] {
        &self.mean_names
    }

    pub fn n_peptide_names(&self) -> &[String] {
        &self.n_peptide_names
    }

    pub fn children_names(&self) -> &[String] {
        &self.children_names
    }
}
