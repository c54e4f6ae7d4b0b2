//! Recognition of toolchain-generated constructs.
//!
//! Compilers synthesize nested types and members for iterators, async state
//! machines and closures, and name them after the member they were generated
//! from: `<Compute>d__4` is the state machine of `Compute`, `<total>5__2` a
//! hoisted local. Those names survive renaming, so the convention alone is
//! trusted to recover them.
//!
//! Conventions are kept in a table of [`GeneratedRule`]s plus a list of
//! well-known field names, so new conventions can be added without touching
//! the matchers.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::RecoveryError;

/// `<host>X__N`: the capture is the host member's name.
static BRACKETED_HOST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<([\w\d]+)>.__\d+$").expect("bracketed host regex"));

/// Suffix appended to a generated type's host name so the recovered type
/// does not collide with the host member.
pub const GENERATED_TYPE_SUFFIX: &str = "__d";

#[derive(Debug, Clone)]
pub struct GeneratedRule {
    name: String,
    pattern: Regex,
    type_suffix: String,
}

impl GeneratedRule {
    /// `pattern` must contain one capture group holding the host name.
    pub fn new(
        name: impl Into<String>,
        pattern: &str,
        type_suffix: impl Into<String>,
    ) -> Result<Self, RecoveryError> {
        let name = name.into();
        let pattern = Regex::new(pattern).map_err(|source| RecoveryError::InvalidRule {
            name: name.clone(),
            source,
        })?;
        Ok(Self {
            name,
            pattern,
            type_suffix: type_suffix.into(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capture<'a>(&self, identifier: &'a str) -> Option<&'a str> {
        self.pattern
            .captures(identifier)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .filter(|host| !host.is_empty())
    }
}

#[derive(Debug, Clone)]
pub struct GeneratedConstructs {
    rules: Vec<GeneratedRule>,
    well_known_fields: Vec<(String, String)>,
}

impl GeneratedConstructs {
    /// An empty table: nothing is treated as generated.
    pub fn empty() -> Self {
        Self {
            rules: Vec::new(),
            well_known_fields: Vec::new(),
        }
    }

    /// The C# compiler's iterator/async conventions.
    pub fn csharp() -> Self {
        Self::empty()
            .with_rule(GeneratedRule {
                name: "bracketed-host".to_string(),
                pattern: BRACKETED_HOST.clone(),
                type_suffix: GENERATED_TYPE_SUFFIX.to_string(),
            })
            .with_well_known_field("<>1__state", "__state")
            .with_well_known_field("<>2__current", "__current")
            .with_well_known_field("<>4__this", "__this")
    }

    pub fn with_rule(mut self, rule: GeneratedRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn with_well_known_field(
        mut self,
        generated: impl Into<String>,
        recovered: impl Into<String>,
    ) -> Self {
        self.well_known_fields
            .push((generated.into(), recovered.into()));
        self
    }

    pub fn rules(&self) -> &[GeneratedRule] {
        &self.rules
    }

    /// Recovered name for a generated type: the host name plus the rule's
    /// suffix. `None` when no rule matches.
    pub fn type_name(&self, type_name: &str) -> Option<String> {
        self.rules.iter().find_map(|rule| {
            rule.capture(type_name)
                .map(|host| format!("{}{}", host, rule.type_suffix))
        })
    }

    /// Host name captured from a generated member name.
    pub fn member_name<'a>(&self, member_name: &'a str) -> Option<&'a str> {
        self.rules.iter().find_map(|rule| rule.capture(member_name))
    }

    pub fn well_known_field(&self, field_name: &str) -> Option<&str> {
        self.well_known_fields
            .iter()
            .find(|(generated, _)| generated == field_name)
            .map(|(_, recovered)| recovered.as_str())
    }
}

impl Default for GeneratedConstructs {
    fn default() -> Self {
        Self::csharp()
    }
}

/// Name of a non-generated reference type with anonymous-type markers removed.
pub fn strip_anonymous_markers(name: &str) -> String {
    name.replace("<>", "")
}
