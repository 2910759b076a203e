use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Canopy EPW metadata reader and urban weather generator.
#[derive(Parser)]
#[command(
    name = "canopy",
    version,
    about = "EPW metadata reader and urban weather generator"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Print the location metadata of an EPW file.
    Metadata(MetadataArgs),
    /// Generate urban weather from a rural EPW file.
    Uwg(UwgArgs),
}

/// Output layout for the `metadata` subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One `key: value` line per metadata key.
    Table,
    /// Pretty-printed JSON object.
    Json,
}

/// Arguments for the `metadata` subcommand.
#[derive(clap::Args)]
pub struct MetadataArgs {
    /// Path to the EPW file.
    #[arg(long)]
    pub epw_path: PathBuf,

    /// Output layout.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

/// Arguments for the `uwg` subcommand.
#[derive(clap::Args)]
pub struct UwgArgs {
    /// Path to the rural EPW file.
    #[arg(long)]
    pub epw_path: PathBuf,

    /// Average building height (m).
    #[arg(long)]
    pub bldheight: f64,

    /// Plan-area fraction covered by buildings.
    #[arg(long)]
    pub blddensity: f64,

    /// Vertical-to-horizontal surface area ratio.
    #[arg(long)]
    pub vertohor: f64,

    /// Urban grass cover fraction.
    #[arg(long)]
    pub grasscover: f64,

    /// Urban tree cover fraction.
    #[arg(long)]
    pub treecover: f64,

    /// Climate zone code (1A, 2A, 2B, 3A, 3B-CA, 3B, 3C, 4A, 4B, 4C, 5A, 5B,
    /// 5C, 6A, 6B, 7, 8).
    #[arg(long)]
    pub zone: String,

    /// Output EPW path. Defaults to the input path with `_UWG` appended to
    /// the file stem.
    #[arg(short, long)]
    pub output_path: Option<PathBuf>,

    /// TOML file with supplemental model parameters.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
