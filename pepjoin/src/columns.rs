//! Processing modes, ontologies, and the output column manifest
use super::*;
use std::fmt;
use std::str::FromStr;

/// Which annotation axes a run works with
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Functional annotations only
    Function,
    /// Taxonomic annotations only
    Taxonomy,
    /// Function and taxonomy together
    Combined,
}

impl Mode {
    pub const ALLOWED: &'static [&'static str] = &["fn", "tax", "taxfn"];

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Function => "fn",
            Mode::Taxonomy => "tax",
            Mode::Combined => "taxfn",
        }
    }

    pub fn needs_taxonomy(self) -> bool {
        matches!(self, Mode::Taxonomy | Mode::Combined)
    }

    pub fn needs_function(self) -> bool {
        matches!(self, Mode::Function | Mode::Combined)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Mode> {
        match s {
            "fn" | "function" => Ok(Mode::Function),
            "tax" | "taxonomy" => Ok(Mode::Taxonomy),
            "taxfn" | "combined" => Ok(Mode::Combined),
            _ => Err(Error::InvalidMode { value: s.into() }),
        }
    }
}

/// Annotation vocabulary for functional terms
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Ontology {
    /// Gene Ontology
    Go,
    /// Clusters of Orthologous Groups
    Cog,
    /// Enzyme Commission numbers
    Ec,
}

impl Ontology {
    pub const ALLOWED: &'static [&'static str] = &["go", "cog", "ec"];

    pub fn as_str(self) -> &'static str {
        match self {
            Ontology::Go => "go",
            Ontology::Cog => "cog",
            Ontology::Ec => "ec",
        }
    }
}

impl fmt::Display for Ontology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Ontology {
    type Err = Error;

    fn from_str(s: &str) -> Result<Ontology> {
        match s {
            "go" => Ok(Ontology::Go),
            "cog" => Ok(Ontology::Cog),
            "ec" => Ok(Ontology::Ec),
            _ => Err(Error::InvalidOntology { value: s.into() }),
        }
    }
}

/// Fixed descriptive columns that lead the output for `mode`
fn prefix(mode: Mode, ontology: Option<Ontology>) -> Result<&'static [&'static str]> {
    let cols: &'static [&'static str] = match (mode, ontology) {
        (Mode::Function, Some(Ontology::Go)) => &["id", "name", "namespace"],
        (Mode::Function, Some(Ontology::Cog)) | (Mode::Function, Some(Ontology::Ec)) => {
            &["id", "description"]
        }
        (Mode::Function, None) => return Err(Error::MissingOntology { mode }),
        (Mode::Taxonomy, _) => &["id", "taxon_name", "rank"],
        (Mode::Combined, _) => &["go_id", "name", "namespace", "tax_id", "taxon_name", "rank"],
    };
    Ok(cols)
}

/// Compute the ordered list of columns written for an aggregated table.
///
/// The layout is: descriptive columns for the mode, group means, raw sample
/// intensities, then per-node peptide counts (unless the ontology is COG),
/// then per-node children counts (additionally skipped in combined mode).
///
/// The result depends only on the arguments, never on table contents.
pub fn output_columns(
    groups: &SampleGroups,
    mode: Mode,
    ontology: Option<Ontology>,
) -> Result<Vec<String>> {
    let mut cols = prefix(mode, ontology)?
        .iter()
        .map(|&s| String::from(s))
        .collect::<Vec<_>>();

    cols.extend(groups.mean_names().iter().cloned());
    cols.extend(groups.all_intcols().iter().cloned());
    if ontology != Some(Ontology::Cog) {
        cols.extend(groups.n_peptide_names().iter().cloned());
        // combined nodes carry no children count
        if mode != Mode::Combined {
            cols.extend(groups.children_names().iter().cloned());
        }
    }

    let mut seen = HashSet::with_capacity(cols.len());
    for col in &cols {
        if !seen.insert(col.as_str()) {
            return Err(Error::DuplicateOutputColumn {
                column: col.clone(),
            });
        }
    }
    Ok(cols)
}
