//! End-to-end recovery: seed the registry, build the recovered-name trees.

use anyhow::Result;
use tracing::{debug, info, warn};

use recovery_core::{IdentityRegistry, RecoveryConfig, RecoveryError, TreeBuilder};
use recovery_types::{RecoveryMap, TypeGraph};

use crate::loader::Seed;

/// Score given to pairs found by identical full names. They are not subject
/// to `min_score`.
pub const UNCHANGED_NAME_SCORE: f64 = f64::INFINITY;

/// Seeds the registry and builds the recovered-name trees.
///
/// Seeds below `config.min_score` are skipped. Seeds naming a type missing
/// from either module, or a nested type, are skipped with a warning.
pub fn recover(
    reference: &TypeGraph,
    renamed: &TypeGraph,
    seeds: &[Seed],
    config: &RecoveryConfig,
) -> Result<RecoveryMap> {
    let mut registry = IdentityRegistry::new(reference, renamed);

    for seed in seeds {
        if seed.score < config.min_score {
            debug!(
                renamed = %seed.renamed,
                reference = %seed.reference,
                score = seed.score,
                "seed below minimum score, skipping"
            );
            continue;
        }
        match registry.seed_by_name(&seed.renamed, &seed.reference, seed.score) {
            Ok(_) => {}
            Err(
                err @ (RecoveryError::UnknownSeedType { .. }
                | RecoveryError::NestedSeedType { .. }),
            ) => warn!("{}", err),
            Err(err) => return Err(err.into()),
        }
    }

    if config.pair_by_name {
        let paired = registry.seed_unchanged_names(UNCHANGED_NAME_SCORE)?;
        info!(paired, "paired top-level types with unchanged names");
    }

    info!(
        roots = registry.roots().len(),
        correspondences = registry.len(),
        "seeding done"
    );

    let map = TreeBuilder::new(&registry, config.predicate()).build_all();
    Ok(map)
}
