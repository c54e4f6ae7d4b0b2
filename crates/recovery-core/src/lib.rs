//! Recovery Core
//!
//! Recovers original identifier names for a module whose symbols were renamed
//! by an automated transformation, by comparing it against a reference build
//! of the same program.
//!
//! - [`registry`]: correspondence nodes binding renamed types to reference
//!   types, and the nested-type linker
//! - [`generated`]: naming conventions of toolchain-generated constructs
//! - [`matcher`]: field, property and method matchers
//! - [`builder`]: recovered-name tree builder
//! - [`predicate`]: classification of identifiers as renamed
//!
//! # Example
//!
//! ```ignore
//! use recovery_core::{IdentityRegistry, TreeBuilder, UppercaseRun};
//!
//! let mut registry = IdentityRegistry::new(&reference, &renamed);
//! registry.seed_by_name("FFGALNAPKCD", "PlayerControl", 1.0)?;
//!
//! let map = TreeBuilder::new(&registry, UppercaseRun::default()).build_all();
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod generated;
pub mod matcher;
pub mod predicate;
pub mod registry;

pub use builder::TreeBuilder;
pub use config::RecoveryConfig;
pub use error::{GraphSide, RecoveryError};
pub use generated::{GeneratedConstructs, GeneratedRule};
pub use matcher::{MemberMatcher, ModifierNormalizer};
pub use predicate::{RenamePredicate, UppercaseRun};
pub use registry::{CorrespondenceNode, IdentityRegistry, NodeId};
