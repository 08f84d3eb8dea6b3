//! Command-line driver: read peptide tables, join them, and write the result
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;
use pepjoin::*;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "expand", about = "Join peptide intensities with their annotations")]
struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Common {
    /// Sample groups, as inline JSON or the path to a JSON file
    #[arg(long)]
    samps: String,

    /// Processing mode: fn, tax, or taxfn
    #[arg(long)]
    mode: Mode,
}

#[derive(Subcommand)]
enum Commands {
    /// Read intensity and annotation files, and join them on peptide
    Join {
        #[command(flatten)]
        common: Common,

        /// Tab-delimited file of per-sample intensities
        #[arg(long)]
        int_file: PathBuf,

        /// Name of the peptide sequence column, shared by all files
        #[arg(long, default_value = "peptide")]
        pep_colname: String,

        #[arg(long)]
        tax_file: Option<PathBuf>,

        /// Column of `tax_file` holding taxon identifiers
        #[arg(long)]
        tax_colname: Option<String>,

        #[arg(long)]
        func_file: Option<PathBuf>,

        /// Column of `func_file` holding functional terms
        #[arg(long)]
        func_colname: Option<String>,

        #[arg(long)]
        outfile: PathBuf,
    },

    /// Read a single file holding intensities and annotations, without peptides
    Nopep {
        #[command(flatten)]
        common: Common,

        #[arg(long)]
        file: PathBuf,

        #[arg(long)]
        tax_colname: Option<String>,

        #[arg(long)]
        func_colname: Option<String>,

        #[arg(long)]
        outfile: PathBuf,
    },

    /// Print the columns written for aggregated output, one per line
    Columns {
        #[command(flatten)]
        common: Common,

        /// Functional ontology: go, cog, or ec
        #[arg(long)]
        ontology: Option<Ontology>,
    },
}

fn annotation(path: Option<PathBuf>, column: Option<String>) -> Option<Annotation> {
    Some(Annotation {
        path: path?,
        column: column?,
    })
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Join {
            common,
            int_file,
            pep_colname,
            tax_file,
            tax_colname,
            func_file,
            func_colname,
            outfile,
        } => {
            let groups = SampleGroups::parse(&common.samps).context("loading sample groups")?;
            let joined = read_and_join_files(&JoinRequest {
                mode: common.mode,
                pep_colname: &pep_colname,
                groups: &groups,
                int_file: &int_file,
                tax: annotation(tax_file, tax_colname),
                func: annotation(func_file, func_colname),
            })?;
            let frame = joined.into_frame();
            write_table(&frame, &outfile, frame.names())?;
        }
        Commands::Nopep {
            common,
            file,
            tax_colname,
            func_colname,
            outfile,
        } => {
            let groups = SampleGroups::parse(&common.samps).context("loading sample groups")?;
            let frame = read_nopep_table(
                &file,
                common.mode,
                &groups,
                func_colname.as_deref(),
                tax_colname.as_deref(),
            )?;
            write_table(&frame, &outfile, frame.names())?;
        }
        Commands::Columns { common, ontology } => {
            let groups = SampleGroups::parse(&common.samps).context("loading sample groups")?;
            let cols = output_columns(&groups, common.mode, ontology)?;
            let stdout = io::stdout();
            let mut out = stdout.lock();
            for col in cols {
                writeln!(out, "{}", col)?;
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    run(cli)?;
    info!("done");
    Ok(())
}
