use recovery_types::env_utils::{env_bool_or, env_var_or};

use crate::predicate::UppercaseRun;

pub const ENV_RENAMED_LENGTH: &str = "NAME_RECOVERY_RENAMED_LENGTH";
pub const ENV_MIN_SCORE: &str = "NAME_RECOVERY_MIN_SCORE";
pub const ENV_PAIR_BY_NAME: &str = "NAME_RECOVERY_PAIR_BY_NAME";

/// Run configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecoveryConfig {
    /// Length of identifiers produced by the renaming transformation.
    pub renamed_length: usize,
    /// Seeds scoring below this are skipped.
    pub min_score: f64,
    /// Also seed top-level types whose full name survived unchanged.
    pub pair_by_name: bool,
}

impl RecoveryConfig {
    /// Defaults overridden by `NAME_RECOVERY_*` environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            renamed_length: env_var_or(ENV_RENAMED_LENGTH, defaults.renamed_length),
            min_score: env_var_or(ENV_MIN_SCORE, defaults.min_score),
            pair_by_name: env_bool_or(ENV_PAIR_BY_NAME, defaults.pair_by_name),
        }
    }

    pub fn predicate(&self) -> UppercaseRun {
        UppercaseRun::new(self.renamed_length)
    }
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            renamed_length: UppercaseRun::DEFAULT_LENGTH,
            min_score: 0.0,
            pair_by_name: false,
        }
    }
}
