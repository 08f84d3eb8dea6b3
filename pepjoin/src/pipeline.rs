use super::*;

/// An annotation file and the column within it to use
#[derive(Clone, Debug, PartialEq)]
pub struct Annotation {
    pub path: PathBuf,
    pub column: String,
}

/// Inputs for one read-and-join run
#[derive(Clone, Debug)]
pub struct JoinRequest<'a> {
    pub mode: Mode,
    pub pep_colname: &'a str,
    pub groups: &'a SampleGroups,
    pub int_file: &'a Path,
    pub tax: Option<Annotation>,
    pub func: Option<Annotation>,
}

/// Read the intensity table and the annotation tables `mode` calls for, and
/// inner join them on peptide, in the order intensity, taxonomy, function.
///
/// Returns the joined table; missing intensities are 0.
pub fn read_and_join_files(req: &JoinRequest<'_>) -> Result<PeptideTable> {
    let int = read_intensity_table(req.int_file, req.groups, req.pep_colname)?;
    info!(
        "{} peptides with intensity in {}",
        int.len(),
        req.int_file.display()
    );

    let mut tables = vec![int];
    if req.mode.needs_taxonomy() {
        let tax = required(req.tax.as_ref(), req.mode, "taxonomy file and column")?;
        tables.push(read_taxonomy_table(&tax.path, req.pep_colname, &tax.column)?);
    }
    if req.mode.needs_function() {
        let func = required(req.func.as_ref(), req.mode, "function file and column")?;
        tables.push(read_function_table(&func.path, req.pep_colname, &func.column)?);
    }

    let joined = join_on_peptide(tables)?;
    info!("{} peptides after joining ({} mode)", joined.len(), req.mode);
    Ok(joined)
}

fn required<'a>(
    ann: Option<&'a Annotation>,
    mode: Mode,
    what: &'static str,
) -> Result<&'a Annotation> {
    match ann {
        Some(a) if !a.column.is_empty() => Ok(a),
        _ => Err(Error::MissingArgument { mode, what }),
    }
}
