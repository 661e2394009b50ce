use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "modelsel - select non-redundant SWISS-MODEL homology models covering a proteome, and prepare them for variant analysis.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads used to process proteins in parallel.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Select a non-redundant set of models covering each protein and write `<protein>.models` tables.
    Select(SelectArgs),
    /// List every possible single amino acid substitution of the residues in a PDB file.
    Variants(VariantsArgs),
    /// List selected models across proteins as `<gene>_<model>`.
    List(ListArgs),
    /// Copy the structures of selected models into a per-protein directory layout.
    Copy(CopyArgs),
}

/// Arguments for the `select` subcommand.
#[derive(Args, Debug)]
pub struct SelectArgs {
    /// SWISS-MODEL directories, one per protein, each containing two-digit model directories.
    #[arg(required = true, value_name = "DIR")]
    pub swissmodel: Vec<PathBuf>,

    /// Directory for the selection tables. Defaults to writing each table beside its protein directory.
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Configuration file in TOML format with a `[thresholds]` table.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Threshold Overrides ---
    /// Models must have a sequence identity (%) above this value.
    #[arg(long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub min_seq_id: Option<f64>,

    /// Models must cover more than this fraction of the sequence.
    #[arg(long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub min_coverage: Option<f64>,

    /// Models must have a QMEAN6 Z-score above this value.
    #[arg(long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub min_qmean_z: Option<f64>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S thresholds.min-seq-id=30
    #[arg(
        short = 'S',
        long = "set",
        value_name = "KEY=VALUE",
        action = clap::ArgAction::Append
    )]
    pub set_values: Vec<String>,

    /// Do not draw a progress bar.
    #[arg(long)]
    pub no_progress: bool,
}

/// Arguments for the `variants` subcommand.
#[derive(Args, Debug)]
pub struct VariantsArgs {
    /// Input PDB file.
    #[arg(value_name = "PDB")]
    pub pdb: PathBuf,

    /// TOML file of `[[sections]]` (chain, positions) restricting which residues are mutated.
    #[arg(short, long, value_name = "PATH")]
    pub sections: Option<PathBuf>,

    /// Write the substitutions to a file instead of standard output.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `list` subcommand.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Selection tables written by `select`.
    #[arg(required = true, value_name = "MODELS")]
    pub models: Vec<PathBuf>,
}

/// Arguments for the `copy` subcommand.
#[derive(Args, Debug)]
pub struct CopyArgs {
    /// Directory holding `<protein>.models` tables next to their SWISS-MODEL protein directories.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Directory to copy structures into, as `<protein>/<template>.pdb`.
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,
}
