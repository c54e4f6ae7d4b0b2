//! Member matchers.
//!
//! Fields and properties are paired by declaration order when both sides
//! declare the same number of them. Methods are paired by signature: a
//! reference method is recovered only when exactly one renamed method is
//! compatible with it.
//!
//! Positional pairing assumes the renaming transformation kept declaration
//! order. Nothing checks that assumption.

use recovery_types::{MethodAttributes, MethodDef, RecoveredMember, RecoveredMethod, TypeEntry};
use tracing::{debug, trace};

use crate::generated::GeneratedConstructs;
use crate::predicate::RenamePredicate;
use crate::registry::IdentityRegistry;

/// Reduces method attributes to the bits that matter for signature identity.
pub type ModifierNormalizer = fn(MethodAttributes) -> MethodAttributes;

pub struct MemberMatcher<'a, 'g> {
    pub registry: &'a IdentityRegistry<'g>,
    pub predicate: &'a dyn RenamePredicate,
    pub generated: &'a GeneratedConstructs,
    pub normalize: ModifierNormalizer,
}

impl<'a, 'g> MemberMatcher<'a, 'g> {
    pub fn fields(&self, reference: &TypeEntry, renamed: &TypeEntry) -> Vec<RecoveredMember> {
        let mut out = Vec::new();
        if renamed.fields().len() != reference.fields().len() {
            debug!(
                renamed = %renamed.full_name,
                reference = %reference.full_name,
                "field counts differ, skipping fields"
            );
            return out;
        }

        for (clean, field) in reference.fields().iter().zip(renamed.fields()) {
            if renamed.is_nested() {
                let generated = self
                    .generated
                    .well_known_field(&field.name)
                    .or_else(|| self.generated.member_name(&field.name));
                if let Some(recovered) = generated {
                    out.push(RecoveredMember::new(&field.name, recovered));
                    continue;
                }
            }

            if !self.predicate.looks_renamed(&field.name) {
                continue;
            }
            trace!(from = %field.name, to = %clean.name, "field");
            out.push(RecoveredMember::new(&field.name, &clean.name));
        }
        out
    }

    pub fn properties(&self, reference: &TypeEntry, renamed: &TypeEntry) -> Vec<RecoveredMember> {
        if renamed.properties().len() != reference.properties().len() {
            debug!(
                renamed = %renamed.full_name,
                reference = %reference.full_name,
                "property counts differ, skipping properties"
            );
            return Vec::new();
        }

        reference
            .properties()
            .iter()
            .zip(renamed.properties())
            .filter(|(_, property)| self.predicate.looks_renamed(&property.name))
            .map(|(clean, property)| RecoveredMember::new(&property.name, &clean.name))
            .collect()
    }

    pub fn methods(&self, reference: &TypeEntry, renamed: &TypeEntry) -> Vec<RecoveredMethod> {
        let mut out: Vec<RecoveredMethod> = Vec::new();

        for clean in reference.plain_methods() {
            if renamed.plain_methods().any(|m| m.name == clean.name) {
                continue;
            }

            let mut matching: Vec<&MethodDef> = Vec::new();
            for candidate in renamed
                .plain_methods()
                .filter(|m| self.predicate.looks_renamed(&m.name))
            {
                if !self.is_compatible(clean, candidate) {
                    continue;
                }
                matching.push(candidate);
                if matching.len() > 1 {
                    break;
                }
            }

            match matching.as_slice() {
                [only] => {
                    trace!(from = %only.name, to = %clean.name, "method");
                    out.push(recovered_method(only, &clean.name));
                }
                [] => {}
                _ => debug!(
                    ty = %renamed.full_name,
                    method = %clean.name,
                    "ambiguous method candidates, not recovering"
                ),
            }
        }

        if renamed.is_nested() {
            for method in renamed.methods() {
                let Some(host) = self.generated.member_name(&method.name) else {
                    continue;
                };
                let recovered = recovered_method(method, host);
                if !out.contains(&recovered) {
                    out.push(recovered);
                }
            }
        }
        out
    }

    fn is_compatible(&self, clean: &MethodDef, candidate: &MethodDef) -> bool {
        clean.return_type == candidate.return_type
            && (self.normalize)(clean.attributes) == (self.normalize)(candidate.attributes)
            && clean.parameters.len() == candidate.parameters.len()
            && clean
                .parameters
                .iter()
                .zip(&candidate.parameters)
                .all(|(c, r)| c.parameter_type == self.resolve_parameter_type(&r.parameter_type))
    }

    /// Reference-side full name of a renamed parameter type, when that type
    /// has a correspondence; otherwise the name itself.
    fn resolve_parameter_type<'n>(&self, renamed_type: &'n str) -> &'n str
    where
        'g: 'n,
    {
        match self.registry.lookup_by_renamed_name(renamed_type) {
            Some(node) => &self.registry.reference_entry(node).full_name,
            None => renamed_type,
        }
    }
}

fn recovered_method(method: &MethodDef, mapped: &str) -> RecoveredMethod {
    RecoveredMethod {
        original: method.name.clone(),
        mapped: mapped.to_string(),
        signature: method
            .parameters
            .iter()
            .map(|p| p.parameter_type.clone())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recovery_types::{ModuleDef, TypeDef, TypeGraph};

    fn graph(types: Vec<TypeDef>) -> TypeGraph {
        TypeGraph::from_module(ModuleDef {
            name: "test".to_string(),
            types,
        })
        .unwrap()
    }

    fn looks_renamed(name: &str) -> bool {
        name.len() == 1 && name.chars().all(|c| c.is_ascii_lowercase())
    }

    fn with_matcher<R>(
        reference: &TypeGraph,
        renamed: &TypeGraph,
        seeds: &[(&str, &str)],
        f: impl FnOnce(&MemberMatcher<'_, '_>) -> R,
    ) -> R {
        with_predicate(reference, renamed, seeds, &looks_renamed, f)
    }

    fn with_predicate<R>(
        reference: &TypeGraph,
        renamed: &TypeGraph,
        seeds: &[(&str, &str)],
        predicate: &dyn RenamePredicate,
        f: impl FnOnce(&MemberMatcher<'_, '_>) -> R,
    ) -> R {
        let mut registry = IdentityRegistry::new(reference, renamed);
        for (r, c) in seeds {
            registry.seed_by_name(r, c, 0.0).unwrap();
        }
        let generated = GeneratedConstructs::default();
        let matcher = MemberMatcher {
            registry: &registry,
            predicate,
            generated: &generated,
            normalize: MethodAttributes::ignore_visibility,
        };
        f(&matcher)
    }

    #[test]
    fn test_fields_positional_and_predicate() {
        let reference = graph(vec![TypeDef::new("", "Player")
            .with_field("health", "System.Int32")
            .with_field("Name", "System.String")
            .with_field("speed", "System.Single")]);
        let renamed = graph(vec![TypeDef::new("", "p")
            .with_field("a", "System.Int32")
            .with_field("Name", "System.String")
            .with_field("c", "System.Single")]);

        let fields = with_matcher(&reference, &renamed, &[], |m| {
            m.fields(&reference[reference.roots()[0]], &renamed[renamed.roots()[0]])
        });

        assert_eq!(
            fields,
            vec![
                RecoveredMember::new("a", "health"),
                RecoveredMember::new("c", "speed"),
            ]
        );
    }

    #[test]
    fn test_fields_count_mismatch() {
        let reference = graph(vec![TypeDef::new("", "Player")
            .with_field("health", "System.Int32")
            .with_field("speed", "System.Single")]);
        let renamed = graph(vec![TypeDef::new("", "p").with_field("a", "System.Int32")]);

        let fields = with_matcher(&reference, &renamed, &[], |m| {
            m.fields(&reference[reference.roots()[0]], &renamed[renamed.roots()[0]])
        });
        assert!(fields.is_empty());
    }

    #[test]
    fn test_generated_fields_in_nested_type() {
        let reference = graph(vec![TypeDef::new("", "Player").with_nested(
            TypeDef::new("", "<Run>d__3")
                .with_field("<>1__state", "System.Int32")
                .with_field("<>2__current", "System.Object")
                .with_field("<>4__this", "Player")
                .with_field("<elapsed>5__1", "System.Single")
                .with_field("limit", "System.Int32"),
        )]);
        let renamed = graph(vec![TypeDef::new("", "p").with_nested(
            TypeDef::new("", "<Run>d__3")
                .with_field("<>1__state", "System.Int32")
                .with_field("<>2__current", "System.Object")
                .with_field("<>4__this", "p")
                .with_field("<elapsed>5__1", "System.Single")
                .with_field("q", "System.Int32"),
        )]);

        let fields = with_matcher(&reference, &renamed, &[("p", "Player")], |m| {
            let r = reference.find("Player/<Run>d__3").unwrap();
            let o = renamed.find("p/<Run>d__3").unwrap();
            m.fields(&reference[r], &renamed[o])
        });

        assert_eq!(
            fields,
            vec![
                RecoveredMember::new("<>1__state", "__state"),
                RecoveredMember::new("<>2__current", "__current"),
                RecoveredMember::new("<>4__this", "__this"),
                RecoveredMember::new("<elapsed>5__1", "elapsed"),
                RecoveredMember::new("q", "limit"),
            ]
        );
    }

    #[test]
    fn test_properties_positional() {
        let reference = graph(vec![TypeDef::new("", "Player")
            .with_property("IsDead", "System.Boolean")
            .with_property("Data", "PlayerData")]);
        let renamed = graph(vec![TypeDef::new("", "p")
            .with_property("b", "System.Boolean")
            .with_property("Data", "d")]);

        let properties = with_matcher(&reference, &renamed, &[], |m| {
            m.properties(&reference[reference.roots()[0]], &renamed[renamed.roots()[0]])
        });
        assert_eq!(properties, vec![RecoveredMember::new("b", "IsDead")]);
    }

    #[test]
    fn test_properties_count_mismatch() {
        let reference = graph(vec![TypeDef::new("", "Player")
            .with_property("IsDead", "System.Boolean")
            .with_property("Data", "PlayerData")]);
        let renamed = graph(vec![TypeDef::new("", "p").with_property("b", "System.Boolean")]);

        let properties = with_matcher(&reference, &renamed, &[], |m| {
            m.properties(&reference[reference.roots()[0]], &renamed[renamed.roots()[0]])
        });
        assert!(properties.is_empty());
    }

    #[test]
    fn test_properties_in_nested_type_use_predicate_only() {
        let reference = graph(vec![TypeDef::new("", "Player").with_nested(
            TypeDef::new("", "<Run>d__3")
                .with_property("<Items>5__2", "System.Object")
                .with_property("Count", "System.Int32"),
        )]);
        let renamed = graph(vec![TypeDef::new("", "p").with_nested(
            TypeDef::new("", "<Run>d__3")
                .with_property("<Items>5__2", "System.Object")
                .with_property("c", "System.Int32"),
        )]);

        let properties = with_matcher(&reference, &renamed, &[("p", "Player")], |m| {
            let r = reference.find("Player/<Run>d__3").unwrap();
            let o = renamed.find("p/<Run>d__3").unwrap();
            m.properties(&reference[r], &renamed[o])
        });
        assert_eq!(properties, vec![RecoveredMember::new("c", "Count")]);
    }

    #[test]
    fn test_method_name_kept_on_renamed_side_is_skipped() {
        let reference = graph(vec![TypeDef::new("", "Player")
            .with_method(MethodDef::new("Update", "System.Void"))]);
        let renamed = graph(vec![TypeDef::new("", "p")
            .with_method(MethodDef::new("Update", "System.Void"))
            .with_method(MethodDef::new("a", "System.Void"))]);

        let methods = with_matcher(&reference, &renamed, &[], |m| {
            m.methods(&reference[reference.roots()[0]], &renamed[renamed.roots()[0]])
        });
        assert!(methods.is_empty());
    }

    #[test]
    fn test_generated_method_matched_by_signature_listed_once() {
        let reference = graph(vec![TypeDef::new("", "Player")
            .with_nested(TypeDef::new("", "<>c").with_method(MethodDef::new("Run", "System.Void")))]);
        let renamed = graph(vec![TypeDef::new("", "p")
            .with_nested(TypeDef::new("", "<>c").with_method(MethodDef::new("<Run>b__0", "System.Void")))]);
        let bracketed = |name: &str| name.starts_with('<') || looks_renamed(name);

        let methods = with_predicate(&reference, &renamed, &[("p", "Player")], &bracketed, |m| {
            let r = reference.find("Player/<>c").unwrap();
            let o = renamed.find("p/<>c").unwrap();
            m.methods(&reference[r], &renamed[o])
        });
        assert_eq!(
            methods,
            vec![RecoveredMethod {
                original: "<Run>b__0".to_string(),
                mapped: "Run".to_string(),
                signature: Vec::new(),
            }]
        );
    }

    #[test]
    fn test_method_parameter_resolved_through_registry() {
        let reference = graph(vec![
            TypeDef::new("", "Worker").with_method(
                MethodDef::new("DoWork", "System.Void")
                    .with_attributes(MethodAttributes::PUBLIC)
                    .with_parameter("bar", "Bar"),
            ),
            TypeDef::new("", "Bar"),
        ]);
        let renamed = graph(vec![
            TypeDef::new("", "w").with_method(
                MethodDef::new("a", "System.Void")
                    .with_attributes(MethodAttributes::PUBLIC)
                    .with_parameter("x", "b"),
            ),
            TypeDef::new("", "b"),
        ]);

        let methods = with_matcher(&reference, &renamed, &[("w", "Worker"), ("b", "Bar")], |m| {
            m.methods(&reference[reference.roots()[0]], &renamed[renamed.roots()[0]])
        });
        assert_eq!(
            methods,
            vec![RecoveredMethod {
                original: "a".to_string(),
                mapped: "DoWork".to_string(),
                signature: vec!["b".to_string()],
            }]
        );

        // Without the correspondence for `b` the parameter types differ.
        let methods = with_matcher(&reference, &renamed, &[("w", "Worker")], |m| {
            m.methods(&reference[reference.roots()[0]], &renamed[renamed.roots()[0]])
        });
        assert!(methods.is_empty());
    }

    #[test]
    fn test_method_ambiguity_abstains() {
        let reference = graph(vec![TypeDef::new("", "Player")
            .with_method(MethodDef::new("M", "System.Void"))]);
        let renamed = graph(vec![TypeDef::new("", "p")
            .with_method(MethodDef::new("a", "System.Void"))
            .with_method(MethodDef::new("b", "System.Void"))]);

        let methods = with_matcher(&reference, &renamed, &[], |m| {
            m.methods(&reference[reference.roots()[0]], &renamed[renamed.roots()[0]])
        });
        assert!(methods.is_empty());
    }

    #[test]
    fn test_method_signature_checks() {
        let reference = graph(vec![TypeDef::new("", "Player")
            .with_method(
                MethodDef::new("Kill", "System.Void")
                    .with_attributes(MethodAttributes::PUBLIC | MethodAttributes::VIRTUAL),
            )
            .with_method(MethodDef::new("GetName", "System.String"))
            .with_method(MethodDef::new("SetSpeed", "System.Void").with_parameter("v", "System.Single"))
            .with_method(MethodDef::new("Update", "System.Void"))
            .with_method(MethodDef::new(".ctor", "System.Void"))]);
        let renamed = graph(vec![TypeDef::new("", "p")
            .with_method(
                MethodDef::new("k", "System.Void")
                    .with_attributes(MethodAttributes::PRIVATE | MethodAttributes::VIRTUAL),
            )
            .with_method(MethodDef::new("n", "System.String"))
            .with_method(MethodDef::new("s", "System.Void").with_parameter("a", "System.Single"))
            .with_method(MethodDef::new("Update", "System.Void"))
            .with_method(MethodDef::new(".ctor", "System.Void"))]);

        let methods = with_matcher(&reference, &renamed, &[], |m| {
            m.methods(&reference[reference.roots()[0]], &renamed[renamed.roots()[0]])
        });
        let pairs: Vec<(&str, &str)> = methods
            .iter()
            .map(|m| (m.original.as_str(), m.mapped.as_str()))
            .collect();

        assert_eq!(pairs, vec![("k", "Kill"), ("n", "GetName"), ("s", "SetSpeed")]);
    }

    #[test]
    fn test_generated_methods_recovered_without_signature() {
        let reference = graph(vec![TypeDef::new("", "Player")
            .with_nested(TypeDef::new("", "<>c").with_method(MethodDef::new("<Start>b__0", "System.Void")))]);
        let renamed = graph(vec![TypeDef::new("", "p").with_nested(
            TypeDef::new("", "<>c")
                .with_method(MethodDef::new("<Start>b__0", "System.Boolean").with_parameter("x", "System.Int32")),
        )]);

        let methods = with_matcher(&reference, &renamed, &[("p", "Player")], |m| {
            let r = reference.find("Player/<>c").unwrap();
            let o = renamed.find("p/<>c").unwrap();
            m.methods(&reference[r], &renamed[o])
        });
        assert_eq!(
            methods,
            vec![RecoveredMethod {
                original: "<Start>b__0".to_string(),
                mapped: "Start".to_string(),
                signature: vec!["System.Int32".to_string()],
            }]
        );
    }
}
