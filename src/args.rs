use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// Module description (JSON) of the reference build.
    #[arg(long, value_name = "PATH")]
    pub reference: PathBuf,

    /// Module description (JSON) of the renamed build.
    #[arg(long, value_name = "PATH")]
    pub renamed: PathBuf,

    /// Top-level correspondences: JSON list of `{renamed, reference, score}`.
    #[arg(long, value_name = "PATH")]
    pub seeds: Option<PathBuf>,

    /// Also pair top-level types whose full name is identical in both builds
    /// (env: NAME_RECOVERY_PAIR_BY_NAME). `--pair-by-name false` turns it off.
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub pair_by_name: Option<bool>,

    /// Skip seeds scoring below this value (env: NAME_RECOVERY_MIN_SCORE).
    #[arg(long, value_name = "SCORE")]
    pub min_score: Option<f64>,

    /// Length of identifiers produced by the renaming (env: NAME_RECOVERY_RENAMED_LENGTH).
    #[arg(long, value_name = "N")]
    pub renamed_length: Option<usize>,

    /// Where to write the recovered names (`-` for stdout).
    #[arg(long, value_name = "PATH", default_value = "-")]
    pub output: PathBuf,

    /// Log level when RUST_LOG is not set. Logs go to stderr.
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,
}
