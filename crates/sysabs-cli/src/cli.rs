use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "sysabs contributors",
    version,
    about = "sysabs CLI - Detect and correct systematic absences in autoindexed crystallographic data.",
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
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print every presence condition with its reindex transform.
    Conditions(ConditionsArgs),
    /// Test a reflection list for systematic absences.
    Detect(DetectArgs),
    /// List the low-order residues of every reflection.
    List(ListArgs),
    /// Correct an orientation and reindex its reflections until no absence remains.
    Correct(CorrectArgs),
}

/// Parameters shared by every command that builds a condition table or runs detection.
#[derive(Args, Debug, Clone, Default)]
pub struct TuningArgs {
    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the fraction of reflections above which a condition is flagged.
    #[arg(short = 't', long, value_name = "FLOAT")]
    pub threshold: Option<f64>,

    /// Override the smallest acceptable corrected cell volume, in cubic Angstrom.
    #[arg(long, value_name = "FLOAT")]
    pub min_cell_volume: Option<f64>,

    /// Override the moduli tested for each condition vector (e.g. 2,3,5,7).
    #[arg(short, long, value_name = "LIST", value_delimiter = ',')]
    pub modularities: Option<Vec<u32>>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S detection.recursion-limit=4
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `conditions` subcommand.
#[derive(Args, Debug)]
pub struct ConditionsArgs {
    #[command(flatten)]
    pub tuning: TuningArgs,
}

/// Arguments for the `detect` subcommand.
#[derive(Args, Debug)]
pub struct DetectArgs {
    /// Reflection list (.hkl whitespace columns or .csv with an h,k,l header).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    #[command(flatten)]
    pub tuning: TuningArgs,
}

/// Arguments for the `list` subcommand.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Reflection list (.hkl whitespace columns or .csv with an h,k,l header).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,
}

/// Arguments for the `correct` subcommand.
#[derive(Args, Debug)]
pub struct CorrectArgs {
    /// Reflection list (.hkl whitespace columns or .csv with an h,k,l header).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Orientation matrix in TOML format.
    #[arg(short = 'r', long, required = true, value_name = "PATH")]
    pub orientation: PathBuf,

    /// Path for the reindexed reflection list; the format follows the extension.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Path for the corrected orientation. Defaults to the output path with a
    /// `.orientation.toml` suffix.
    #[arg(long, value_name = "PATH")]
    pub orientation_out: Option<PathBuf>,

    /// Override the maximum number of successive corrections.
    #[arg(long, value_name = "INT")]
    pub recursion_limit: Option<usize>,

    #[command(flatten)]
    pub tuning: TuningArgs,
}
