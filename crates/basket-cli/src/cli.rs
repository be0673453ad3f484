//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Basket CLI - Turn free-text shopping items into structured records.
#[derive(Debug, Parser)]
#[command(name = "basket")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true, default_value = "table")]
    pub format: CliFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Extractor configuration file (TOML)
    #[arg(short, long, global = true, env = "EXTRACTOR_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Load a `.env` file into the environment, then parse `args`
    ///
    /// `.env` has to be loaded first so it can supply `EXTRACTOR_CONFIG` for
    /// `--config`. With no `env_file`, `.env` is looked up from the current
    /// directory upwards; a missing file is not an error.
    pub fn try_parse_with_env_file<I, T>(
        env_file: Option<&Path>,
        args: I,
    ) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        if let Some(path) = env_file {
            dotenvy::from_path(path).ok();
        } else {
            dotenvy::dotenv().ok();
        }
        Self::try_parse_from(args)
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze a single shopping item
    Analyze(AnalyzeArgs),

    /// Analyze every row of a spreadsheet and write the results
    Batch(BatchArgs),
}

/// Arguments for the analyze command.
#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    /// Free-text item, e.g. "1l milk of amul brand"
    pub text: String,
}

/// Arguments for the batch command.
#[derive(Debug, Parser)]
pub struct BatchArgs {
    /// Input spreadsheet (.xlsx, .xlsm, .xls, .ods or .csv); items in the first column
    pub input: PathBuf,

    /// Output path (.xlsx workbook or .csv)
    pub output: PathBuf,
}
