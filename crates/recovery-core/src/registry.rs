//! Correspondence nodes and the identity registry.
//!
//! A [`CorrespondenceNode`] binds one renamed type to its reference
//! counterpart. Nodes live in an arena owned by the [`IdentityRegistry`] and
//! point at each other by [`NodeId`]: a node stores the id of its declaring
//! node and the ids of the nodes for its nested types.
//!
//! The registry is keyed by renamed [`TypeId`], so every renamed type has at
//! most one node no matter how often it is reached. A second index by renamed
//! full name lets the method matcher map a parameter type back to the
//! reference side.

use std::collections::HashMap;
use std::fmt;

use recovery_types::{TypeEntry, TypeGraph, TypeId};
use tracing::{debug, trace};

use crate::error::{GraphSide, RecoveryError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CorrespondenceNode {
    pub reference: TypeId,
    pub renamed: TypeId,
    /// Confidence of the seed this node descends from.
    pub score: f64,
    pub declaring: Option<NodeId>,
    /// Nodes of nested types, in pairing order, without duplicates.
    pub nested: Vec<NodeId>,
}

impl CorrespondenceNode {
    /// Fails unless `reference` is a type of `reference_graph`: a node always
    /// anchors to a known reference type.
    pub fn new(
        reference_graph: &TypeGraph,
        reference: TypeId,
        renamed: TypeId,
        declaring: Option<NodeId>,
        score: f64,
    ) -> Result<Self, RecoveryError> {
        if !reference_graph.contains(reference) {
            return Err(RecoveryError::UnknownReferenceType(reference));
        }
        Ok(Self {
            reference,
            renamed,
            score,
            declaring,
            nested: Vec::new(),
        })
    }
}

/// Registry of correspondence nodes for one recovery run.
///
/// Grows monotonically: nodes are never removed or rebound.
#[derive(Debug, Clone)]
pub struct IdentityRegistry<'g> {
    reference: &'g TypeGraph,
    renamed: &'g TypeGraph,
    nodes: Vec<CorrespondenceNode>,
    by_renamed: HashMap<TypeId, NodeId>,
    by_renamed_name: HashMap<String, NodeId>,
    roots: Vec<NodeId>,
}

impl<'g> IdentityRegistry<'g> {
    pub fn new(reference: &'g TypeGraph, renamed: &'g TypeGraph) -> Self {
        Self {
            reference,
            renamed,
            nodes: Vec::new(),
            by_renamed: HashMap::new(),
            by_renamed_name: HashMap::new(),
            roots: Vec::new(),
        }
    }

    /// Returns the node already bound to `renamed`, or creates one bound to
    /// `reference` and attaches it under `declaring`.
    ///
    /// Repeated calls with the same `renamed` type return the same node; the
    /// first binding wins and only the declaring node's child list is updated.
    /// New nodes inherit the declaring node's score.
    pub fn get_or_create(
        &mut self,
        renamed: TypeId,
        reference: TypeId,
        declaring: Option<NodeId>,
    ) -> Result<NodeId, RecoveryError> {
        if let Some(parent) = declaring {
            if parent.index() >= self.nodes.len() {
                return Err(RecoveryError::UnknownNode(parent));
            }
        }

        let id = match self.by_renamed.get(&renamed) {
            Some(&existing) => existing,
            None => {
                if !self.renamed.contains(renamed) {
                    return Err(RecoveryError::UnknownRenamedType(renamed));
                }
                let score = declaring.map_or(0.0, |parent| self.nodes[parent.index()].score);
                let node =
                    CorrespondenceNode::new(self.reference, reference, renamed, declaring, score)?;

                let id = NodeId(self.nodes.len() as u32);
                self.nodes.push(node);
                self.by_renamed.insert(renamed, id);
                self.by_renamed_name
                    .insert(self.renamed[renamed].full_name.clone(), id);
                if declaring.is_none() {
                    self.roots.push(id);
                }
                trace!(
                    node = %id,
                    renamed = %self.renamed[renamed].full_name,
                    reference = %self.reference[reference].full_name,
                    "registered correspondence"
                );
                id
            }
        };

        if let Some(parent) = declaring {
            let children = &mut self.nodes[parent.index()].nested;
            if parent != id && !children.contains(&id) {
                children.push(id);
            }
        }
        Ok(id)
    }

    /// Pairs the nested types of `node` by declaration order and registers
    /// each pair under it. Nothing is paired when the two sides declare a
    /// different number of nested types.
    ///
    /// Returns the nodes created by this call.
    pub fn link_nested(&mut self, node: NodeId) -> Result<Vec<NodeId>, RecoveryError> {
        let (renamed_graph, reference_graph) = (self.renamed, self.reference);
        let n = self.node(node).ok_or(RecoveryError::UnknownNode(node))?;
        let renamed = &renamed_graph[n.renamed];
        let reference = &reference_graph[n.reference];

        if renamed.nested.len() != reference.nested.len() {
            debug!(
                renamed = %renamed.full_name,
                reference = %reference.full_name,
                renamed_count = renamed.nested.len(),
                reference_count = reference.nested.len(),
                "nested type counts differ, skipping nested pairing"
            );
            return Ok(Vec::new());
        }

        let pairs: Vec<(TypeId, TypeId)> = renamed
            .nested
            .iter()
            .copied()
            .zip(reference.nested.iter().copied())
            .collect();

        let mut created = Vec::new();
        for (renamed_nested, reference_nested) in pairs {
            let before = self.nodes.len();
            let child = self.get_or_create(renamed_nested, reference_nested, Some(node))?;
            if self.nodes.len() > before {
                created.push(child);
            }
        }
        Ok(created)
    }

    /// Registers a top-level pair and links its whole nested subtree.
    ///
    /// Nested types are reached through their declaring type and cannot be
    /// seeded on their own.
    pub fn seed(
        &mut self,
        renamed: TypeId,
        reference: TypeId,
        score: f64,
    ) -> Result<NodeId, RecoveryError> {
        for (side, graph, id) in [
            (GraphSide::Renamed, self.renamed, renamed),
            (GraphSide::Reference, self.reference, reference),
        ] {
            if graph.contains(id) && graph[id].is_nested() {
                return Err(RecoveryError::NestedSeedType {
                    side,
                    name: graph[id].full_name.clone(),
                });
            }
        }

        let before = self.nodes.len();
        let root = self.get_or_create(renamed, reference, None)?;
        if self.nodes.len() == before {
            return Ok(root);
        }
        self.nodes[root.index()].score = score;

        let mut pending = vec![root];
        while let Some(next) = pending.pop() {
            pending.extend(self.link_nested(next)?);
        }
        debug!(
            renamed = %self.renamed[renamed].full_name,
            reference = %self.reference[reference].full_name,
            score,
            nodes = self.nodes.len() - before,
            "seeded correspondence"
        );
        Ok(root)
    }

    /// [`IdentityRegistry::seed`] by full names.
    pub fn seed_by_name(
        &mut self,
        renamed: &str,
        reference: &str,
        score: f64,
    ) -> Result<NodeId, RecoveryError> {
        let renamed_id = self
            .renamed
            .find(renamed)
            .ok_or_else(|| RecoveryError::UnknownSeedType {
                side: GraphSide::Renamed,
                name: renamed.to_string(),
            })?;
        let reference_id =
            self.reference
                .find(reference)
                .ok_or_else(|| RecoveryError::UnknownSeedType {
                    side: GraphSide::Reference,
                    name: reference.to_string(),
                })?;
        self.seed(renamed_id, reference_id, score)
    }

    /// Seeds every top-level reference type whose full name also exists as a
    /// top-level renamed type. Returns the number of new roots.
    pub fn seed_unchanged_names(&mut self, score: f64) -> Result<usize, RecoveryError> {
        let (renamed_graph, reference_graph) = (self.renamed, self.reference);
        let before = self.roots.len();
        for &reference in reference_graph.roots() {
            let name = &reference_graph[reference].full_name;
            let Some(renamed) = renamed_graph.find(name) else {
                continue;
            };
            if renamed_graph[renamed].is_nested() {
                continue;
            }
            self.seed(renamed, reference, score)?;
        }
        Ok(self.roots.len() - before)
    }

    pub fn get(&self, renamed: TypeId) -> Option<NodeId> {
        self.by_renamed.get(&renamed).copied()
    }

    pub fn lookup_by_renamed_name(&self, full_name: &str) -> Option<&CorrespondenceNode> {
        self.by_renamed_name
            .get(full_name)
            .map(|id| &self.nodes[id.index()])
    }

    pub fn node(&self, id: NodeId) -> Option<&CorrespondenceNode> {
        self.nodes.get(id.index())
    }

    pub fn reference_entry(&self, node: &CorrespondenceNode) -> &'g TypeEntry {
        let graph: &'g TypeGraph = self.reference;
        &graph[node.reference]
    }

    pub fn renamed_entry(&self, node: &CorrespondenceNode) -> &'g TypeEntry {
        let graph: &'g TypeGraph = self.renamed;
        &graph[node.renamed]
    }

    /// Nodes created without a declaring node, in creation order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
