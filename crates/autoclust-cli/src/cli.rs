//! CLI argument definitions for the `autoclust` binary.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use autoclust_model::SemanticType;

#[derive(Parser)]
#[command(
    name = "autoclust",
    version,
    about = "Prepare tabular data for AutoClass C and reconstruct its results",
    long_about = "Prepare heterogeneous tabular measurements for the AutoClass C\n\
                  unsupervised classifier and reconstruct its per-case results into\n\
                  analyst-usable tables.\n\n\
                  The prepare command merges typed input tables and emits the\n\
                  classifier's input artifact family; the report command parses the\n\
                  classifier's case report and derives the sorted table, the cdt\n\
                  visualization matrix and per-cluster statistics."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Merge typed input tables and write the classifier's input artifacts.
    Prepare(PrepareArgs),

    /// Parse the classifier's case report and derive analyst tables.
    Report(ReportArgs),

    /// Check for the external classifier binary and print its version.
    Doctor,
}

#[derive(Parser)]
pub struct PrepareArgs {
    /// Input table spec PATH,TYPE[,ERROR]; TYPE is real-scalar,
    /// real-location or discrete. Repeatable.
    #[arg(
        short = 'i',
        long = "input",
        value_name = "SPEC",
        required = true
    )]
    pub inputs: Vec<InputSpec>,

    /// Root name of the generated artifact family.
    #[arg(long = "root", value_name = "NAME", default_value = "autoclust")]
    pub root: String,

    /// Directory receiving the generated artifacts.
    #[arg(long = "output-dir", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Column separator of the input tables.
    #[arg(long = "input-separator", value_name = "CHAR", default_value_t = '\t')]
    pub input_separator: char,

    /// Marker encoding missing data in the input tables (empty cells are
    /// always treated as missing).
    #[arg(long = "input-missing", value_name = "MARKER", default_value = "")]
    pub input_missing: String,

    /// Column separator of the generated data file.
    #[arg(long = "data-separator", value_name = "CHAR", default_value_t = '\t')]
    pub data_separator: char,

    /// Marker rendered for missing values in the generated data file.
    #[arg(long = "data-missing", value_name = "MARKER", default_value = "?")]
    pub data_missing: String,

    /// Maximum search duration in seconds (0 = no time limit).
    #[arg(long = "max-duration", value_name = "SECONDS", default_value_t = 3600)]
    pub max_duration: u64,

    /// Maximum number of independent trial restarts.
    #[arg(long = "max-tries", value_name = "N", default_value_t = 200)]
    pub max_n_tries: u32,

    /// Maximum optimization cycles per trial.
    #[arg(long = "max-cycles", value_name = "N", default_value_t = 1000)]
    pub max_cycles: u32,

    /// Comma-separated initial cluster-count guesses.
    #[arg(long = "start-j", value_name = "LIST", value_delimiter = ',')]
    pub start_j_list: Option<Vec<u32>>,

    /// Pin the random seed and starting partition for a deterministic run.
    ///
    /// Testing only: determinism comes at the cost of search diversity, so
    /// this mode is unsuitable for production classification runs.
    #[arg(long = "reproducible")]
    pub reproducible: bool,

    /// Also write the shell script that drives the classifier.
    #[arg(long = "with-script")]
    pub with_script: bool,

    /// Attempt every stage even after a failure (inspect multiple problems
    /// in one pass).
    #[arg(long = "tolerant")]
    pub tolerant: bool,
}

#[derive(Parser)]
pub struct ReportArgs {
    /// Case-classification report produced by the classifier.
    #[arg(long = "results", value_name = "FILE")]
    pub results: PathBuf,

    /// Prepared data table written by the prepare command (.tsv companion).
    #[arg(long = "data", value_name = "FILE")]
    pub data: PathBuf,

    /// Directory receiving the derived outputs (default: alongside --data).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Also write the probability-annotated visualization matrix.
    #[arg(long = "with-probs")]
    pub with_probs: bool,

    /// Copy the outputs into a timestamped export directory.
    #[arg(long = "export")]
    pub export: bool,

    /// Attempt every stage even after a failure.
    #[arg(long = "tolerant")]
    pub tolerant: bool,
}

/// One input table declaration: `PATH,TYPE[,ERROR]`.
#[derive(Debug, Clone)]
pub struct InputSpec {
    pub path: PathBuf,
    pub semantic_type: SemanticType,
    pub error: f64,
}

impl FromStr for InputSpec {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let mut parts = value.splitn(3, ',');
        let path = parts
            .next()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| "expected PATH,TYPE[,ERROR]".to_string())?;
        let type_token = parts
            .next()
            .ok_or_else(|| format!("missing type in '{value}': expected PATH,TYPE[,ERROR]"))?;
        let semantic_type: SemanticType =
            type_token.parse().map_err(|e| format!("{e}"))?;
        if semantic_type == SemanticType::Merged {
            return Err("'merged' is not a valid input type".to_string());
        }
        let error = match parts.next() {
            Some(token) => token
                .parse::<f64>()
                .map_err(|_| format!("invalid error value '{token}' in '{value}'"))?,
            None => 0.01,
        };
        Ok(Self {
            path: PathBuf::from(path),
            semantic_type,
            error,
        })
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
