//! Recover original names of a renamed module.
//!
//! **Inputs**
//! - `--reference`: JSON description of the reference (un-renamed) module
//! - `--renamed`: JSON description of the renamed module
//! - `--seeds` and/or `--pair-by-name`: top-level type correspondences
//!
//! **Output**: the recovered-name trees as JSON (`--output`, stdout by default).
//!
//! Configuration defaults come from `NAME_RECOVERY_*` environment variables;
//! flags override them. Logs go to stderr and honour `RUST_LOG`.
use anyhow::{anyhow, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use name_recovery::args::{Args, LogLevel};
use name_recovery::loader::{read_module, read_seeds};
use name_recovery::recovery_core::RecoveryConfig;
use name_recovery::runner::recover;
use name_recovery::utils::write_json;

fn init_logging(level: LogLevel) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();
}

fn config_from_args(args: &Args) -> RecoveryConfig {
    let mut config = RecoveryConfig::from_env();
    if let Some(length) = args.renamed_length {
        config.renamed_length = length;
    }
    if let Some(min_score) = args.min_score {
        config.min_score = min_score;
    }
    if let Some(pair_by_name) = args.pair_by_name {
        config.pair_by_name = pair_by_name;
    }
    config
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_level);

    let config = config_from_args(&args);
    if args.seeds.is_none() && !config.pair_by_name {
        return Err(anyhow!(
            "no correspondences to start from (use --seeds and/or --pair-by-name)"
        ));
    }

    let reference = read_module(&args.reference)?;
    let renamed = read_module(&args.renamed)?;
    let seeds = match &args.seeds {
        Some(path) => read_seeds(path)?,
        None => Vec::new(),
    };

    let map = recover(&reference, &renamed, &seeds, &config)?;
    let summary = map.summary();
    info!(
        types = summary.types,
        renamed_types = summary.renamed_types,
        fields = summary.fields,
        properties = summary.properties,
        methods = summary.methods,
        "recovery finished"
    );

    write_json(&args.output, &map)
}
