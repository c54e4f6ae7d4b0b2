//! Shared types for the name-recovery workspace.
//!
//! - [`graph`]: type graphs flattened from an extracted module description
//! - [`attributes`]: method attribute flags used in signature comparison
//! - [`recovered`]: recovered-name trees produced by a recovery run
//! - [`env_utils`]: environment variable helpers for configuration defaults

pub mod attributes;
pub mod env_utils;
pub mod graph;
pub mod recovered;

pub use attributes::MethodAttributes;
pub use graph::{
    FieldDef, GraphError, MethodDef, ModuleDef, ParameterDef, PropertyDef, TypeDef, TypeEntry,
    TypeGraph, TypeId,
};
pub use recovered::{
    RecoveredMember, RecoveredMethod, RecoveredType, RecoveryMap, RecoverySummary,
};
