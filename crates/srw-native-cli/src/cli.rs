use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "srw-native - inspect, sum, scale and export SRW mesh data files.",
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

    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S output.precision=4
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", global = true)]
    pub set_values: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the decoded mesh header, header lines and value statistics of a file.
    Inspect(InspectArgs),
    /// Print the sum of all values in a file.
    Sum(SumArgs),
    /// Multiply every value by a factor and write the result as a new mesh file.
    Scale(ScaleArgs),
    /// Write the mesh as CSV rows of energy, x, y and value.
    Export(ExportArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

/// Arguments for the `inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Path to the SRW mesh file (e.g., intensity.dat).
    #[arg(required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Override `output.format` from the config file.
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Override `output.precision` from the config file.
    #[arg(short, long, value_name = "DIGITS")]
    pub precision: Option<usize>,
}

/// Arguments for the `sum` subcommand.
#[derive(Args, Debug)]
pub struct SumArgs {
    /// Path to the data file.
    #[arg(required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Read the file without decoding a mesh header (any number of `#` lines).
    #[arg(long)]
    pub raw: bool,

    /// Override `output.format` from the config file.
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Override `output.precision` from the config file.
    #[arg(short, long, value_name = "DIGITS")]
    pub precision: Option<usize>,
}

/// Arguments for the `scale` subcommand.
#[derive(Args, Debug)]
pub struct ScaleArgs {
    /// Path to the SRW mesh file.
    #[arg(required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Factor every value is multiplied by.
    #[arg(long, required = true, allow_hyphen_values = true, value_name = "FLOAT")]
    pub factor: f64,

    /// Path for the scaled output file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,
}

/// Arguments for the `export` subcommand.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Path to the SRW mesh file.
    #[arg(required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the CSV output file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Override `export.delimiter` from the config file.
    #[arg(short, long, value_name = "CHAR")]
    pub delimiter: Option<char>,

    /// Override `export.include-header` from the config file.
    #[command(flatten)]
    pub header: IncludeHeader,

    /// Override `output.precision` from the config file.
    #[arg(short, long, value_name = "DIGITS")]
    pub precision: Option<usize>,
}

/// A group to handle mutually exclusive flags for the CSV column header.
#[derive(Args, Debug, Clone, Copy)]
#[group(required = false, multiple = false)]
pub struct IncludeHeader {
    /// Force a column header row in the CSV output.
    #[arg(long)]
    pub with_header: bool,
    /// Omit the column header row from the CSV output.
    #[arg(long)]
    pub no_header: bool,
}

impl IncludeHeader {
    pub fn as_override(&self) -> Option<bool> {
        match (self.with_header, self.no_header) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}
