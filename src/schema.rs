//! Static schema tables
//!
//! A [`NodeSchema`] describes one node type: where it sits in the figure
//! tree, the validator for each declared field (in declaration order), a
//! one-line description per field, and deprecated aliases. Tables are built
//! once, behind a `static`, and shared by every node of the type.

use indexmap::IndexMap;
use std::fmt;

use crate::factory::NodeFactory;
use crate::validators::{Validator, ValidatorKind};

/// Schema of one node type
pub struct NodeSchema {
    /// Key of this node in its parent (e.g. "slices")
    name: &'static str,
    /// Dotted path of the parent (e.g. "isosurface"); empty for roots
    parent_path: &'static str,
    /// Rust-side type name, for diagnostics
    type_name: &'static str,
    validators: IndexMap<&'static str, Validator>,
    descriptions: IndexMap<&'static str, &'static str>,
    /// Deprecated key -> property path
    aliases: IndexMap<&'static str, &'static str>,
}

impl NodeSchema {
    pub fn new(name: &'static str, parent_path: &'static str, type_name: &'static str) -> Self {
        Self {
            name,
            parent_path,
            type_name,
            validators: IndexMap::new(),
            descriptions: IndexMap::new(),
            aliases: IndexMap::new(),
        }
    }

    /// Declare a field. Its validator reports this node's full path as its
    /// parent path.
    pub fn field(mut self, name: &'static str, kind: ValidatorKind, edit_type: &'static str, description: &'static str) -> Self {
        let validator = Validator::new(name, self.path(), kind).with_edit_type(edit_type);
        self.validators.insert(name, validator);
        self.descriptions.insert(name, description);
        self
    }

    /// Map a deprecated key onto a property path
    pub fn alias(mut self, key: &'static str, path: &'static str) -> Self {
        self.aliases.insert(key, path);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn parent_path(&self) -> &'static str {
        self.parent_path
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Full dotted path of this node type
    pub fn path(&self) -> String {
        if self.parent_path.is_empty() {
            self.name.to_string()
        } else {
            format!("{}.{}", self.parent_path, self.name)
        }
    }

    /// Whether both schemas describe the same node type
    pub fn is(&self, other: &NodeSchema) -> bool {
        std::ptr::eq(self, other) || (self.name == other.name && self.parent_path == other.parent_path)
    }

    pub fn validator(&self, field: &str) -> Option<&Validator> {
        self.validators.get(field)
    }

    /// Declared name and validator for `field`
    pub fn field_entry(&self, field: &str) -> Option<(&'static str, &Validator)> {
        self.validators.get_key_value(field).map(|(k, v)| (*k, v))
    }

    pub fn validators(&self) -> impl Iterator<Item = (&'static str, &Validator)> {
        self.validators.iter().map(|(k, v)| (*k, v))
    }

    pub fn declares(&self, field: &str) -> bool {
        self.validators.contains_key(field)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.validators.keys().copied()
    }

    pub fn resolve_alias(&self, key: &str) -> Option<&'static str> {
        self.aliases.get(key).copied()
    }

    /// `(name, description)` for every declared field, in declaration order
    pub fn describe_fields(&self) -> Vec<(&'static str, &'static str)> {
        self.descriptions.iter().map(|(k, v)| (*k, *v)).collect()
    }

    /// Factory with default build options
    pub fn factory(&'static self) -> NodeFactory {
        NodeFactory::new(self)
    }
}

impl fmt::Debug for NodeSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeSchema")
            .field("path", &self.path())
            .field("fields", &self.validators.keys().collect::<Vec<_>>())
            .finish()
    }
}
