//! Readers for intensity, taxonomy and function tables
//!
//! Each reader applies the missing-value rules for its table's role:
//! intensities are kept only if at least one sample was measured and are then
//! zero-filled, while annotation tables simply drop unannotated peptides.
use super::*;
use crate::parser::{parse, read_file, Records};

/// Read a table of per-sample intensities keyed by `pep_colname`.
///
/// Only the intensity columns named in `groups` are kept, in the order of
/// `groups`. Rows with every intensity missing are dropped, and remaining
/// missing intensities are set to 0 for arithmetic.
pub fn read_intensity_table<P: AsRef<Path>>(
    path: P,
    groups: &SampleGroups,
    pep_colname: &str,
) -> Result<PeptideTable> {
    let path = path.as_ref();
    let buffer = read_file(path)?;
    let records = parse(path, &buffer)?;

    let key = records.position(pep_colname)?;
    let mut frame = intensity_frame(&records, groups)?;

    // Rows without any intensity go before keys are checked
    let mask = frame.present_mask(groups.all_intcols(), How::All)?;
    let keys = records.keys(key, &mask)?;
    let dropped = mask.len() - keys.len();
    frame.retain_rows(&mask);
    frame.fill_missing(groups.all_intcols(), 0.0)?;

    debug!(
        "{}: {} peptides, {} dropped without intensity",
        path.display(),
        keys.len(),
        dropped
    );
    PeptideTable::new(pep_colname, keys, frame).map_err(|e| keyed_by_file(e, path))
}

/// Read a taxonomy table, such as Unipept output, keeping only `tax_colname`.
///
/// Taxon identifiers are kept as text: `"000123"` is not the number 123.
/// Peptides without a taxon are dropped.
pub fn read_taxonomy_table<P: AsRef<Path>>(
    path: P,
    pep_colname: &str,
    tax_colname: &str,
) -> Result<PeptideTable> {
    read_annotation_table(path.as_ref(), pep_colname, tax_colname)
}

/// Read a functional annotation table, keeping only `func_colname`.
/// Peptides without a functional term are dropped.
pub fn read_function_table<P: AsRef<Path>>(
    path: P,
    pep_colname: &str,
    func_colname: &str,
) -> Result<PeptideTable> {
    read_annotation_table(path.as_ref(), pep_colname, func_colname)
}

fn read_annotation_table(path: &Path, pep_colname: &str, colname: &str) -> Result<PeptideTable> {
    let buffer = read_file(path)?;
    let records = parse(path, &buffer)?;

    let key = records.position(pep_colname)?;
    let col = records.position(colname)?;

    let mut frame = Frame::new();
    frame.push_column(colname, records.text(col))?;

    // Drop unannotated rows before the key index is built, so only
    // annotated peptides need a unique, present key
    let mask = frame.present_mask(&[colname], How::Any)?;
    let keys = records.keys(key, &mask)?;
    frame.retain_rows(&mask);

    debug!(
        "{}: {} peptides annotated in '{}', {} dropped",
        path.display(),
        keys.len(),
        colname,
        mask.len() - keys.len()
    );
    PeptideTable::new(pep_colname, keys, frame).map_err(|e| keyed_by_file(e, path))
}

/// Read a file holding intensities and annotations together, without a
/// peptide column.
///
/// Every column is retained. Intensity columns are typed and zero-filled;
/// all other columns are read as text. Rows are then dropped if the
/// annotation(s) relevant to `mode` are missing:
///
/// * [`Mode::Function`]: `func_colname` must be present
/// * [`Mode::Taxonomy`]: `tax_colname` must be present
/// * [`Mode::Combined`]: at least one of the two must be present
pub fn read_nopep_table<P: AsRef<Path>>(
    path: P,
    mode: Mode,
    groups: &SampleGroups,
    func_colname: Option<&str>,
    tax_colname: Option<&str>,
) -> Result<Frame> {
    let path = path.as_ref();
    let buffer = read_file(path)?;
    let records = parse(path, &buffer)?;

    let subset = match mode {
        Mode::Function => vec![require_arg(func_colname, mode, "function column")?],
        Mode::Taxonomy => vec![require_arg(tax_colname, mode, "taxonomy column")?],
        Mode::Combined => vec![
            require_arg(func_colname, mode, "function column")?,
            require_arg(tax_colname, mode, "taxonomy column")?,
        ],
    };
    for column in &subset {
        records.position(column)?;
    }
    for column in groups.all_intcols() {
        records.position(column)?;
    }

    let mut frame = Frame::new();
    for (idx, &name) in records.header.iter().enumerate() {
        let column = match groups.numeric_type(name) {
            Some(ty) => records.numeric(idx, ty)?,
            None => records.text(idx),
        };
        frame.push_column(name, column).map_err(|e| match e {
            Error::ColumnCollision { column } => Error::ColumnCollision {
                column: format!("{} (in {})", column, path.display()),
            },
            e => e,
        })?;
    }
    frame.fill_missing(groups.all_intcols(), 0.0)?;

    let dropped = frame.drop_missing(&subset, How::All)?;
    debug!(
        "{}: {} rows, {} dropped without annotation",
        path.display(),
        frame.height(),
        dropped
    );
    Ok(frame)
}

fn require_arg<'a>(arg: Option<&'a str>, mode: Mode, what: &'static str) -> Result<&'a str> {
    arg.ok_or(Error::MissingArgument { mode, what })
}

/// Collect the configured intensity columns, typed per `groups`
fn intensity_frame(records: &Records<'_>, groups: &SampleGroups) -> Result<Frame> {
    let mut frame = Frame::new();
    for name in groups.all_intcols() {
        let idx = records.position(name)?;
        // Unknown columns are impossible here, every name comes from `groups`
        let ty = groups.numeric_type(name).unwrap_or_default();
        frame.push_column(name.as_str(), records.numeric(idx, ty)?)?;
    }
    Ok(frame)
}

/// Point duplicate key errors at the offending file
fn keyed_by_file(err: Error, path: &Path) -> Error {
    match err {
        Error::DuplicateKey { key, .. } => Error::DuplicateKey {
            key,
            source_name: path.display().to_string(),
        },
        e => e,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn tab(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    fn groups() -> SampleGroups {
        SampleGroups::from_json(r#"{"grp": ["A", "B"]}"#).unwrap()
    }

    #[test]
    fn intensity_drops_all_missing_and_fills_zero() {
        let f = tab("peptide\tA\tB\nP1\t5\tNA\nP2\tNA\t\n");
        let t = read_intensity_table(f.path(), &groups(), "peptide").unwrap();
        assert_eq!(t.keys(), &["P1"]);
        assert_eq!(t.numeric("P1", "A"), Some(Some(5.0)));
        assert_eq!(t.numeric("P1", "B"), Some(Some(0.0)));
        assert!(!t.contains("P2"));
    }

    #[test]
    fn intensity_keeps_zero_measurements() {
        // 0 is a measurement, not a missing value
        let f = tab("peptide\tA\tB\nP1\t0\t0\n");
        let t = read_intensity_table(f.path(), &groups(), "peptide").unwrap();
        assert_eq!(t.keys(), &["P1"]);
    }

    #[test]
    fn intensity_extra_columns_and_order() {
        let f = tab("B\textra\tpeptide\tA\n2\tx\tP1\t1\n");
        let t = read_intensity_table(f.path(), &groups(), "peptide").unwrap();
        assert_eq!(t.frame().names(), &["A", "B"]);
        assert_eq!(t.numeric("P1", "B"), Some(Some(2.0)));
    }

    #[test]
    fn intensity_schema_errors() {
        let f = tab("peptide\tA\nP1\t5\n");
        match read_intensity_table(f.path(), &groups(), "peptide") {
            Err(Error::MissingColumn { column, .. }) => assert_eq!(column, "B"),
            _ => panic!("expected missing column"),
        }
        assert!(matches!(
            read_intensity_table(f.path(), &groups(), "sequence"),
            Err(Error::MissingColumn { .. })
        ));
        assert!(matches!(
            read_intensity_table("/no/such/file.tab", &groups(), "peptide"),
            Err(Error::Read { .. })
        ));
    }

    #[test]
    fn intensity_type_errors() {
        let f = tab("peptide\tA\tB\nP1\t5\tabc\n");
        assert!(matches!(
            read_intensity_table(f.path(), &groups(), "peptide"),
            Err(Error::InvalidNumber { line: 2, .. })
        ));

        let g = groups()
            .with_numeric_type("A", NumericType::Integer)
            .unwrap();
        let f = tab("peptide\tA\tB\nP1\t5.5\t1\n");
        assert!(matches!(
            read_intensity_table(f.path(), &g, "peptide"),
            Err(Error::InvalidNumber { .. })
        ));
    }

    #[test]
    fn intensity_key_errors() {
        let f = tab("peptide\tA\tB\nP1\t5\t1\nP1\t3\t1\n");
        match read_intensity_table(f.path(), &groups(), "peptide") {
            Err(Error::DuplicateKey { key, source_name }) => {
                assert_eq!(key, "P1");
                assert_eq!(source_name, f.path().display().to_string());
            }
            _ => panic!("expected duplicate key"),
        }

        let f = tab("peptide\tA\tB\nNA\t5\t1\n");
        assert!(matches!(
            read_intensity_table(f.path(), &groups(), "peptide"),
            Err(Error::MissingKey { .. })
        ));
    }

    #[test]
    fn intensity_row_without_key_or_values_is_dropped() {
        let f = tab("peptide\tA\tB\nP1\t5\t1\nNA\tNA\tNA\n");
        let t = read_intensity_table(f.path(), &groups(), "peptide").unwrap();
        assert_eq!(t.keys(), &["P1"]);
    }

    #[test]
    fn intensity_nan_is_missing() {
        let f = tab("peptide\tA\tB\nP1\t5\tNAN\nP2\tNAN\tnan\n");
        let t = read_intensity_table(f.path(), &groups(), "peptide").unwrap();
        assert_eq!(t.keys(), &["P1"]);
        assert_eq!(t.numeric("P1", "B"), Some(Some(0.0)));
    }

    #[test]
    fn taxonomy_ids_are_text() {
        let f = tab("peptide\tlca\tname\nP1\t000123\tx\nP2\tNA\ty\nP3\t9606\tz\n");
        let t = read_taxonomy_table(f.path(), "peptide", "lca").unwrap();
        assert_eq!(t.keys(), &["P1", "P3"]);
        assert_eq!(t.frame().names(), &["lca"]);
        assert_eq!(t.text("P1", "lca"), Some(Some("000123")));
        assert!(matches!(
            read_taxonomy_table(f.path(), "peptide", "taxon_id"),
            Err(Error::MissingColumn { .. })
        ));
    }

    #[test]
    fn function_drops_unannotated() {
        let f = tab("peptide\tgo\nP1\tGO:0008150\nP2\t\n");
        let t = read_function_table(f.path(), "peptide", "go").unwrap();
        assert_eq!(t.keys(), &["P1"]);
        assert_eq!(t.text("P1", "go"), Some(Some("GO:0008150")));
    }

    #[test]
    fn annotation_row_without_key_or_term_is_dropped() {
        let f = tab("peptide\tlca\nP1\t9606\n\tNA\n");
        let t = read_taxonomy_table(f.path(), "peptide", "lca").unwrap();
        assert_eq!(t.keys(), &["P1"]);

        let f = tab("peptide\tgo\nNA\tGO:1\n");
        assert!(matches!(
            read_function_table(f.path(), "peptide", "go"),
            Err(Error::MissingKey { line: 2, .. })
        ));
    }

    #[test]
    fn annotation_duplicates_only_count_when_annotated() {
        let f = tab("peptide\tgo\nP1\tGO:1\nP1\tNA\n");
        let t = read_function_table(f.path(), "peptide", "go").unwrap();
        assert_eq!(t.len(), 1);
    }

    const NOPEP: &str = "go\tlca\tA\tB\n\
                         GO:1\t9606\t1\tNA\n\
                         GO:2\tNA\tNA\t2\n\
                         NA\t562\t3\t3\n\
                         NA\tNA\t4\t4\n";

    #[test]
    fn nopep_function() {
        let f = tab(NOPEP);
        let t = read_nopep_table(f.path(), Mode::Function, &groups(), Some("go"), None).unwrap();
        assert_eq!(t.height(), 2);
        assert_eq!(t.names(), &["go", "lca", "A", "B"]);
        assert_eq!(
            t.column("B").unwrap(),
            &Column::Numeric(vec![Some(0.0), Some(2.0)])
        );
    }

    #[test]
    fn nopep_taxonomy() {
        let f = tab(NOPEP);
        let t =
            read_nopep_table(f.path(), Mode::Taxonomy, &groups(), None, Some("lca")).unwrap();
        assert_eq!(
            t.column("lca").unwrap(),
            &Column::Text(vec![Some("9606".into()), Some("562".into())])
        );
    }

    #[test]
    fn nopep_combined_keeps_either() {
        let f = tab(NOPEP);
        let t = read_nopep_table(f.path(), Mode::Combined, &groups(), Some("go"), Some("lca"))
            .unwrap();
        assert_eq!(t.height(), 3);
        assert_eq!(
            t.column("A").unwrap(),
            &Column::Numeric(vec![Some(1.0), Some(0.0), Some(3.0)])
        );
    }

    #[test]
    fn nopep_requirements() {
        let f = tab(NOPEP);
        assert!(matches!(
            read_nopep_table(f.path(), Mode::Function, &groups(), None, Some("lca")),
            Err(Error::MissingArgument { .. })
        ));
        assert!(matches!(
            read_nopep_table(f.path(), Mode::Taxonomy, &groups(), None, Some("taxon")),
            Err(Error::MissingColumn { .. })
        ));
        let g = SampleGroups::from_json(r#"{"grp": ["A", "C"]}"#).unwrap();
        assert!(matches!(
            read_nopep_table(f.path(), Mode::Function, &g, Some("go"), None),
            Err(Error::MissingColumn { .. })
        ));
    }
}
