//! Classification of identifiers as machine-renamed or human-authored.

/// Decides whether an identifier looks like the output of the renaming
/// transformation. Names that do not are never relabelled.
pub trait RenamePredicate {
    fn looks_renamed(&self, identifier: &str) -> bool;
}

impl<F> RenamePredicate for F
where
    F: Fn(&str) -> bool,
{
    fn looks_renamed(&self, identifier: &str) -> bool {
        self(identifier)
    }
}

/// Renamed identifiers are runs of exactly `length` ASCII uppercase letters,
/// e.g. `KMGFBENDNFO`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UppercaseRun {
    pub length: usize,
}

impl UppercaseRun {
    pub const DEFAULT_LENGTH: usize = 11;

    pub fn new(length: usize) -> Self {
        Self { length }
    }
}

impl Default for UppercaseRun {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LENGTH)
    }
}

impl RenamePredicate for UppercaseRun {
    fn looks_renamed(&self, identifier: &str) -> bool {
        identifier.len() == self.length && identifier.bytes().all(|b| b.is_ascii_uppercase())
    }
}
