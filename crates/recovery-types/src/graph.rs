//! Type graphs extracted from a module.
//!
//! A module is described as a tree of [`TypeDef`]s (the JSON form written by
//! the extraction tooling) and flattened into a [`TypeGraph`]: an arena of
//! [`TypeEntry`] values addressed by [`TypeId`]. Each entry knows its
//! declaring type, its nested types in declaration order and its full name.
//!
//! Full names use the metadata convention: `Namespace.Name` for top-level
//! types and `Outer/Inner` for nested ones.

use std::collections::HashMap;
use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::attributes::MethodAttributes;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("duplicate type `{full_name}` in module `{module}`")]
    DuplicateType { full_name: String, module: String },
}

/// One module as produced by the extraction tooling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleDef {
    pub name: String,
    #[serde(default)]
    pub types: Vec<TypeDef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeDef {
    #[serde(default)]
    pub namespace: String,
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldDef>,
    #[serde(default)]
    pub properties: Vec<PropertyDef>,
    #[serde(default)]
    pub methods: Vec<MethodDef>,
    #[serde(default)]
    pub nested_types: Vec<TypeDef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    pub field_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDef {
    pub name: String,
    pub property_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDef {
    pub name: String,
    pub return_type: String,
    #[serde(default)]
    pub attributes: MethodAttributes,
    #[serde(default)]
    pub parameters: Vec<ParameterDef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDef {
    #[serde(default)]
    pub name: String,
    pub parameter_type: String,
}

impl TypeDef {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, field_type: impl Into<String>) -> Self {
        self.fields.push(FieldDef {
            name: name.into(),
            field_type: field_type.into(),
        });
        self
    }

    pub fn with_property(
        mut self,
        name: impl Into<String>,
        property_type: impl Into<String>,
    ) -> Self {
        self.properties.push(PropertyDef {
            name: name.into(),
            property_type: property_type.into(),
        });
        self
    }

    pub fn with_method(mut self, method: MethodDef) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_nested(mut self, nested: TypeDef) -> Self {
        self.nested_types.push(nested);
        self
    }
}

impl MethodDef {
    pub fn new(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            return_type: return_type.into(),
            attributes: MethodAttributes::default(),
            parameters: Vec::new(),
        }
    }

    pub fn with_attributes(mut self, attributes: MethodAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_parameter(
        mut self,
        name: impl Into<String>,
        parameter_type: impl Into<String>,
    ) -> Self {
        self.parameters.push(ParameterDef {
            name: name.into(),
            parameter_type: parameter_type.into(),
        });
        self
    }

    /// Instance and type initializers never take part in name matching.
    pub fn is_constructor(&self) -> bool {
        self.name == ".ctor" || self.name == ".cctor"
    }
}

/// Handle of a type inside one [`TypeGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeId(pub u32);

impl TypeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type#{}", self.0)
    }
}

/// A flattened type declaration. `def.nested_types` is always empty here;
/// nesting lives in `nested`.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeEntry {
    pub id: TypeId,
    pub full_name: String,
    pub declaring: Option<TypeId>,
    pub nested: Vec<TypeId>,
    pub def: TypeDef,
}

impl TypeEntry {
    pub fn name(&self) -> &str {
        &self.def.name
    }

    pub fn fields(&self) -> &[FieldDef] {
        &self.def.fields
    }

    pub fn properties(&self) -> &[PropertyDef] {
        &self.def.properties
    }

    /// All declared methods, constructors included.
    pub fn methods(&self) -> &[MethodDef] {
        &self.def.methods
    }

    /// Declared methods without constructors.
    pub fn plain_methods(&self) -> impl Iterator<Item = &MethodDef> + '_ {
        self.def.methods.iter().filter(|m| !m.is_constructor())
    }

    pub fn is_nested(&self) -> bool {
        self.declaring.is_some()
    }
}

#[derive(Debug, Clone, Default)]
pub struct TypeGraph {
    name: String,
    entries: Vec<TypeEntry>,
    roots: Vec<TypeId>,
    by_full_name: HashMap<String, TypeId>,
}

impl TypeGraph {
    pub fn from_module(module: ModuleDef) -> Result<Self, GraphError> {
        let mut graph = Self {
            name: module.name,
            ..Default::default()
        };
        for def in module.types {
            let id = graph.insert(def, None)?;
            graph.roots.push(id);
        }
        Ok(graph)
    }

    fn insert(&mut self, mut def: TypeDef, declaring: Option<TypeId>) -> Result<TypeId, GraphError> {
        let full_name = match declaring {
            Some(parent) => format!("{}/{}", self[parent].full_name, def.name),
            None if def.namespace.is_empty() => def.name.clone(),
            None => format!("{}.{}", def.namespace, def.name),
        };
        if self.by_full_name.contains_key(&full_name) {
            return Err(GraphError::DuplicateType {
                full_name,
                module: self.name.clone(),
            });
        }

        let id = TypeId(self.entries.len() as u32);
        let nested_defs = std::mem::take(&mut def.nested_types);
        self.by_full_name.insert(full_name.clone(), id);
        self.entries.push(TypeEntry {
            id,
            full_name,
            declaring,
            nested: Vec::with_capacity(nested_defs.len()),
            def,
        });

        for nested in nested_defs {
            let nested_id = self.insert(nested, Some(id))?;
            self.entries[id.index()].nested.push(nested_id);
        }
        Ok(id)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contains(&self, id: TypeId) -> bool {
        id.index() < self.entries.len()
    }

    pub fn find(&self, full_name: &str) -> Option<TypeId> {
        self.by_full_name.get(full_name).copied()
    }

    /// Top-level types in declaration order.
    pub fn roots(&self) -> &[TypeId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Index<TypeId> for TypeGraph {
    type Output = TypeEntry;

    fn index(&self, id: TypeId) -> &TypeEntry {
        &self.entries[id.index()]
    }
}
