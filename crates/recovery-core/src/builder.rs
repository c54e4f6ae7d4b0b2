//! Recovered-name tree builder.
//!
//! Walks the correspondence tree of a registry and produces one
//! [`RecoveredType`] per node: the type's own recovered name, its recovered
//! members and the trees of its nested types. Types the renaming left alone
//! and that yield nothing are dropped.
//!
//! Building only reads the registry, so building twice gives the same trees.

use recovery_types::{MethodAttributes, RecoveredType, RecoveryMap};
use tracing::debug;

use crate::generated::{strip_anonymous_markers, GeneratedConstructs};
use crate::matcher::{MemberMatcher, ModifierNormalizer};
use crate::predicate::RenamePredicate;
use crate::registry::{IdentityRegistry, NodeId};

pub struct TreeBuilder<'r, 'g, P> {
    registry: &'r IdentityRegistry<'g>,
    predicate: P,
    generated: GeneratedConstructs,
    normalize: ModifierNormalizer,
}

impl<'r, 'g, P: RenamePredicate> TreeBuilder<'r, 'g, P> {
    pub fn new(registry: &'r IdentityRegistry<'g>, predicate: P) -> Self {
        Self {
            registry,
            predicate,
            generated: GeneratedConstructs::default(),
            normalize: MethodAttributes::ignore_visibility,
        }
    }

    pub fn with_generated(mut self, generated: GeneratedConstructs) -> Self {
        self.generated = generated;
        self
    }

    pub fn with_modifier_normalizer(mut self, normalize: ModifierNormalizer) -> Self {
        self.normalize = normalize;
        self
    }

    /// Trees for every root of the registry, in seeding order.
    pub fn build_all(&self) -> RecoveryMap {
        let types = self
            .registry
            .roots()
            .iter()
            .filter_map(|&root| self.build(root))
            .collect();
        RecoveryMap { types }
    }

    /// Tree for one node, or `None` when it contributes nothing.
    pub fn build(&self, id: NodeId) -> Option<RecoveredType> {
        let node = self.registry.node(id)?;
        let reference = self.registry.reference_entry(node);
        let renamed = self.registry.renamed_entry(node);

        let recovered_name = self
            .generated
            .type_name(reference.name())
            .or_else(|| self.generated.type_name(renamed.name()))
            .unwrap_or_else(|| strip_anonymous_markers(reference.name()));
        let mapped = (recovered_name != renamed.name()).then_some(recovered_name);

        let matcher = MemberMatcher {
            registry: self.registry,
            predicate: &self.predicate,
            generated: &self.generated,
            normalize: self.normalize,
        };

        let mut ty = RecoveredType::new(renamed.full_name.clone(), mapped);
        ty.fields = matcher.fields(reference, renamed);
        ty.properties = matcher.properties(reference, renamed);
        ty.methods = matcher.methods(reference, renamed);
        ty.nested = node
            .nested
            .iter()
            .filter_map(|&child| self.build(child))
            .collect();

        if !self.predicate.looks_renamed(renamed.name()) && ty.is_empty() {
            debug!(ty = %renamed.full_name, "nothing recovered for untouched type");
            return None;
        }
        Some(ty)
    }
}
