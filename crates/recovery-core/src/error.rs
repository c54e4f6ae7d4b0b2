use recovery_types::TypeId;
use thiserror::Error;

use crate::registry::NodeId;

/// Which of the two graphs a seed name was looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphSide {
    Reference,
    Renamed,
}

impl std::fmt::Display for GraphSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphSide::Reference => write!(f, "reference"),
            GraphSide::Renamed => write!(f, "renamed"),
        }
    }
}

#[derive(Debug, Error)]
pub enum RecoveryError {
    #[error("{0} is not a type of the reference module")]
    UnknownReferenceType(TypeId),

    #[error("{0} is not a type of the renamed module")]
    UnknownRenamedType(TypeId),

    #[error("correspondence node {0} does not exist")]
    UnknownNode(NodeId),

    #[error("seed type `{name}` not found in the {side} module")]
    UnknownSeedType { side: GraphSide, name: String },

    #[error("seed type `{name}` is nested in the {side} module; seeds must be top-level types")]
    NestedSeedType { side: GraphSide, name: String },

    #[error("invalid generated-construct rule `{name}`: {source}")]
    InvalidRule {
        name: String,
        #[source]
        source: regex::Error,
    },
}
