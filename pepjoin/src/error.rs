//! Error types for reading, joining and writing peptide tables.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    // === File system ===
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Schema ===
    #[error("file {path} has no header row")]
    EmptyFile { path: PathBuf },

    #[error("required column '{column}' not found in {path}")]
    MissingColumn { column: String, path: PathBuf },

    #[error("column '{column}' not found in table")]
    UnknownColumn { column: String },

    #[error("{path}:{line}: expected {expected} fields, found {found}")]
    RaggedRow {
        path: PathBuf,
        line: usize,
        expected: usize,
        found: usize,
    },

    // === Types ===
    #[error("{path}:{line}: cannot read '{value}' in column '{column}' as {expected}")]
    InvalidNumber {
        path: PathBuf,
        line: usize,
        column: String,
        value: String,
        expected: &'static str,
    },

    // === Data ===
    #[error("{path}:{line}: missing peptide in column '{column}'")]
    MissingKey {
        path: PathBuf,
        line: usize,
        column: String,
    },

    #[error("peptide '{key}' appears more than once in {source_name}")]
    DuplicateKey { key: String, source_name: String },

    #[error("column '{column}' has {found} rows, expected {expected}")]
    ColumnLength {
        column: String,
        expected: usize,
        found: usize,
    },

    #[error("column '{column}' is present in more than one table")]
    ColumnCollision { column: String },

    // === Configuration ===
    #[error("invalid mode '{value}'. Expected one of: {}", crate::columns::Mode::ALLOWED.join(", "))]
    InvalidMode { value: String },

    #[error("invalid ontology '{value}'. Expected one of: {}", crate::columns::Ontology::ALLOWED.join(", "))]
    InvalidOntology { value: String },

    #[error("mode '{mode}' requires an ontology. Expected one of: {}", crate::columns::Ontology::ALLOWED.join(", "))]
    MissingOntology { mode: crate::columns::Mode },

    #[error("mode '{mode}' requires a {what}")]
    MissingArgument {
        mode: crate::columns::Mode,
        what: &'static str,
    },

    #[error("output column '{column}' appears more than once")]
    DuplicateOutputColumn { column: String },

    #[error("at least one table is required to join")]
    EmptyJoin,

    #[error(transparent)]
    Samples(#[from] samples::Error),
}

/// Result type for peptide table operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display() {
        let err = Error::MissingColumn {
            column: "peptide".into(),
            path: PathBuf::from("int.tab"),
        };
        assert_eq!(err.to_string(), "required column 'peptide' not found in int.tab");

        let err = Error::InvalidMode {
            value: "fun".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid mode 'fun'. Expected one of: fn, tax, taxfn"
        );

        let err = Error::InvalidOntology { value: "kegg".into() };
        assert_eq!(
            err.to_string(),
            "invalid ontology 'kegg'. Expected one of: go, cog, ec"
        );
    }
}
