//! Recovered-name trees: the output of a recovery run.
//!
//! Each [`RecoveredType`] mirrors one renamed type and carries the names
//! recovered for it and its members. Nested types form child trees.

use serde::{Deserialize, Serialize};

/// A renamed member and the name recovered for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveredMember {
    pub original: String,
    pub mapped: String,
}

impl RecoveredMember {
    pub fn new(original: impl Into<String>, mapped: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            mapped: mapped.into(),
        }
    }
}

/// A renamed method and the name recovered for it.
///
/// `signature` lists the renamed method's parameter types so that overloads
/// sharing one renamed name stay distinguishable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveredMethod {
    pub original: String,
    pub mapped: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub signature: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RecoveredType {
    /// Full name of the renamed type.
    pub original: String,
    /// `None` when no new name was produced for the type itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapped: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<RecoveredMember>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<RecoveredMember>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<RecoveredMethod>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nested: Vec<RecoveredType>,
}

impl RecoveredType {
    pub fn new(original: impl Into<String>, mapped: Option<String>) -> Self {
        Self {
            original: original.into(),
            mapped,
            ..Default::default()
        }
    }

    /// True when nothing was recovered for members or nested types.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
            && self.properties.is_empty()
            && self.methods.is_empty()
            && self.nested.is_empty()
    }

    fn accumulate(&self, summary: &mut RecoverySummary) {
        summary.types += 1;
        summary.renamed_types += usize::from(self.mapped.is_some());
        summary.fields += self.fields.len();
        summary.properties += self.properties.len();
        summary.methods += self.methods.len();
        for nested in &self.nested {
            nested.accumulate(summary);
        }
    }
}

/// Every recovered tree of a run, one per root correspondence.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RecoveryMap {
    pub types: Vec<RecoveredType>,
}

impl RecoveryMap {
    pub fn summary(&self) -> RecoverySummary {
        let mut summary = RecoverySummary::default();
        for ty in &self.types {
            ty.accumulate(&mut summary);
        }
        summary
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Counts over a whole [`RecoveryMap`], nested trees included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RecoverySummary {
    pub types: usize,
    pub renamed_types: usize,
    pub fields: usize,
    pub properties: usize,
    pub methods: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts_nested() {
        let mut outer = RecoveredType::new("ABCDEFGHIJK", Some("Player".to_string()));
        outer
            .fields
            .push(RecoveredMember::new("LMNOPQRSTUV", "health"));
        let mut inner = RecoveredType::new("ABCDEFGHIJK/WXYZABCDEFG", None);
        inner.methods.push(RecoveredMethod {
            original: "HIJKLMNOPQR".to_string(),
            mapped: "Tick".to_string(),
            signature: vec!["System.Single".to_string()],
        });
        outer.nested.push(inner);

        let map = RecoveryMap { types: vec![outer] };
        let summary = map.summary();

        assert_eq!(summary.types, 2);
        assert_eq!(summary.renamed_types, 1);
        assert_eq!(summary.fields, 1);
        assert_eq!(summary.methods, 1);
        assert_eq!(summary.properties, 0);
    }

    #[test]
    fn test_serialization_skips_empty_parts() {
        let ty = RecoveredType::new("Game.Player", None);
        let value = serde_json::to_value(&ty).unwrap();
        assert_eq!(value, serde_json::json!({ "original": "Game.Player" }));
        assert!(ty.is_empty());
    }
}
