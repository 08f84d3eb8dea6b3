//! Read, merge and export peptide-level quantitative tables.
//!
//! This library's API is based around a handful of functions that form
//! the input/output half of a metaproteomics analysis pipeline.
//!
//! A per-sample intensity table, and optionally taxonomy and/or function
//! tables, are read into [`PeptideTable`]s keyed by peptide sequence, and
//! then inner joined on peptide:
//!
//! ```rust,ignore
//! # use pepjoin::*;
//! let groups = SampleGroups::parse(r#"{"NS": ["int737NS", "int852NS"]}"#)?;
//! let int = read_intensity_table("int.tab", &groups, "peptide")?;
//! let tax = read_taxonomy_table("tax.tab", "peptide", "lca")?;
//! let joined = join_on_peptide(vec![int, tax])?;
//! ```
//!
//! Missing intensities are read as 0, so that downstream aggregation can sum
//! over peptides. After aggregation, the exported columns are a function of
//! the processing [`Mode`] and [`Ontology`] alone, and any cell still
//! missing is written as `NA`:
//!
//! ```rust,ignore
//! # use pepjoin::*;
//! let cols = output_columns(&groups, Mode::Function, Some(Ontology::Go))?;
//! write_table(&aggregated, "out.tab", &cols)?;
//! ```
//!
//! When intensities and annotations come in a single wide file, without a
//! peptide column, [`read_nopep_table`] replaces the read-and-join step.

use log::{debug, info, warn};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

mod columns;
mod error;
mod join;
mod parser;
mod pipeline;
mod reader;
mod table;
mod writer;

pub use columns::{output_columns, Mode, Ontology};
pub use error::{Error, Result};
pub use join::join_on_peptide;
pub use parser::{is_missing, MISSING_VALUES};
pub use pipeline::{read_and_join_files, Annotation, JoinRequest};
pub use reader::{read_function_table, read_intensity_table, read_nopep_table, read_taxonomy_table};
pub use samples::{NumericType, SampleGroups};
pub use table::{Column, Frame, How, PeptideTable};
pub use writer::{write_table, write_to, NA};
