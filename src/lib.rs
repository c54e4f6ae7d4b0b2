//! Name recovery for renamed modules.
//!
//! Recovers the original names of types and members in a module whose
//! identifiers were scrambled by an automated renaming pass, by matching it
//! structurally against a reference build of the same program.
//!
//! - **Type graphs**: [`loader`] reads JSON module descriptions into
//!   [`recovery_types::TypeGraph`]s
//! - **Correspondence**: [`recovery_core::IdentityRegistry`] binds renamed
//!   types to reference types, starting from seed pairs
//! - **Recovery**: [`recovery_core::TreeBuilder`] produces the
//!   recovered-name trees; [`runner::recover`] runs the whole pipeline
//!
//! The `name-recovery` binary wires these together and writes the result as
//! JSON.

pub mod args;
pub mod loader;
pub mod runner;
pub mod utils;

pub use recovery_core;
pub use recovery_types;

pub use loader::{read_module, read_seeds, Seed};
pub use runner::recover;
