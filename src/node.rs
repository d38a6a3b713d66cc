//! Attribute nodes
//!
//! A [`Node`] is one object in the figure tree. It owns the validated values
//! of its declared fields, any pass-through keys it was asked to keep, and
//! the changes recorded since they were last drained.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::change::Change;
use crate::checksum::Checksum;
use crate::config::OutputConfig;
use crate::config::OutputFormat;
use crate::error::{Result, SchemaError};
use crate::factory::BuildOptions;
use crate::path::PropPath;
use crate::schema::NodeSchema;
use crate::suggest;
use crate::validators::{compound, Raw};

/// Stored value of a declared field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Scalar(Value),
    Node(Node),
    Nodes(Vec<Node>),
}

impl FieldValue {
    pub fn as_scalar(&self) -> Option<&Value> {
        match self {
            FieldValue::Scalar(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            FieldValue::Node(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_nodes(&self) -> Option<&[Node]> {
        match self {
            FieldValue::Nodes(n) => Some(n),
            _ => None,
        }
    }

    /// Plain (JSON) form of the value
    pub fn to_plain(&self) -> Value {
        self.plain(true)
    }

    fn plain(&self, include_pass_through: bool) -> Value {
        match self {
            FieldValue::Scalar(v) => v.clone(),
            FieldValue::Node(n) => Value::Object(n.plain_form(include_pass_through)),
            FieldValue::Nodes(nodes) => Value::Array(
                nodes
                    .iter()
                    .map(|n| Value::Object(n.plain_form(include_pass_through)))
                    .collect(),
            ),
        }
    }
}

/// A validated schema node
#[derive(Debug, Clone)]
pub struct Node {
    schema: &'static NodeSchema,
    fields: IndexMap<&'static str, FieldValue>,
    pass_through: Map<String, Value>,
    options: BuildOptions,
    changes: Vec<Change>,
}

impl Node {
    /// Empty strict node
    pub fn new(schema: &'static NodeSchema) -> Self {
        Self::with_options(schema, &BuildOptions::default())
    }

    /// Empty node carrying the given options
    pub fn with_options(schema: &'static NodeSchema, options: &BuildOptions) -> Self {
        Self {
            schema,
            fields: IndexMap::new(),
            pass_through: Map::new(),
            options: *options,
            changes: Vec::new(),
        }
    }

    pub fn schema(&self) -> &'static NodeSchema {
        self.schema
    }

    /// Key of this node in its parent
    pub fn plotly_name(&self) -> &'static str {
        self.schema.name()
    }

    pub fn parent_path(&self) -> &'static str {
        self.schema.parent_path()
    }

    /// Number of declared fields currently set
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// No declared field set and no pass-through keys
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.pass_through.is_empty()
    }

    pub fn is_strict(&self) -> bool {
        self.options.is_strict()
    }

    pub fn skip_invalid(&self) -> bool {
        self.options.skip_invalid
    }

    /// Drop invalid assignments silently instead of failing
    pub fn set_skip_invalid(&mut self, skip_invalid: bool) {
        self.options.skip_invalid = skip_invalid;
    }

    pub fn describe_fields(&self) -> Vec<(&'static str, &'static str)> {
        self.schema.describe_fields()
    }

    /// Retained keys that name no declared field
    pub fn pass_through(&self) -> &Map<String, Value> {
        &self.pass_through
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// Current value of a declared field.
    ///
    /// Undeclared names fail on strict nodes and read as absent otherwise.
    pub fn get(&self, field: &str) -> Result<Option<&FieldValue>> {
        if self.schema.declares(field) {
            Ok(self.fields.get(field))
        } else if self.is_strict() {
            Err(self.unknown_field(field))
        } else {
            Ok(None)
        }
    }

    pub fn scalar(&self, field: &str) -> Option<&Value> {
        self.fields.get(field).and_then(FieldValue::as_scalar)
    }

    pub fn get_bool(&self, field: &str) -> Option<bool> {
        self.scalar(field).and_then(Value::as_bool)
    }

    pub fn get_f64(&self, field: &str) -> Option<f64> {
        self.scalar(field).and_then(Value::as_f64)
    }

    pub fn get_i64(&self, field: &str) -> Option<i64> {
        self.scalar(field).and_then(Value::as_i64)
    }

    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.scalar(field).and_then(Value::as_str)
    }

    pub fn child(&self, field: &str) -> Option<&Node> {
        self.fields.get(field).and_then(FieldValue::as_node)
    }

    pub fn children(&self, field: &str) -> Option<&[Node]> {
        self.fields.get(field).and_then(FieldValue::as_nodes)
    }

    /// Plain value at a property path (`x.show`, `annotations[0].text`,
    /// `title_font_size`, or an alias)
    pub fn get_path(&self, path: &str) -> Result<Option<Value>> {
        if let Some(value) = self.pass_through.get(path) {
            return Ok(Some(value.clone()));
        }
        let parsed = self.parse_key(path)?;
        self.lookup(&parsed)
    }

    fn lookup(&self, path: &PropPath) -> Result<Option<Value>> {
        let (head, rest) = path.split_first();
        if !self.schema.declares(&head.name) {
            // retained keys are readable whatever the policy
            if let (None, None, Some(value)) = (head.index, &rest, self.pass_through.get(&head.name)) {
                return Ok(Some(value.clone()));
            }
            if self.is_strict() {
                return Err(self.unknown_field(&head.name));
            }
            return Ok(None);
        }

        let Some(value) = self.fields.get(head.name.as_str()) else {
            return Ok(None);
        };
        match (head.index, value, rest) {
            (None, v, None) => Ok(Some(v.to_plain())),
            (None, FieldValue::Node(child), Some(rest)) => child.lookup(&rest),
            (Some(i), FieldValue::Nodes(nodes), rest) => match (nodes.get(i), rest) {
                (None, _) => Ok(None),
                (Some(n), None) => Ok(Some(Value::Object(n.to_plain_form()))),
                (Some(n), Some(rest)) => n.lookup(&rest),
            },
            (Some(i), FieldValue::Scalar(Value::Array(items)), None) => Ok(items.get(i).cloned()),
            _ => Err(SchemaError::InvalidPath {
                path: path.to_string(),
                reason: format!("'{}' of {} cannot be traversed", head, self.schema.path()),
            }),
        }
    }

    // ------------------------------------------------------------------
    // Writes
    // ------------------------------------------------------------------

    /// Validate and assign a field, a property path, or an alias.
    ///
    /// Invalid values fail unless `skip_invalid` is set on this node, in
    /// which case the assignment is dropped. Undeclared keys fail on strict
    /// nodes and are kept as pass-through otherwise.
    pub fn set(&mut self, key: &str, value: impl Into<Raw>) -> Result<()> {
        let options = self.options;
        let raw = value.into();
        if self.schema.declares(key) {
            self.assign_field(key, raw, &options, true)
        } else {
            self.assign_unknown(key, raw, &options, true)
        }
    }

    /// Remove a field or pass-through key
    pub fn clear(&mut self, key: &str) -> Result<Option<Value>> {
        if let Some(validator) = self.schema.validator(key) {
            let removed = self.fields.shift_remove(key).map(|v| v.to_plain());
            if removed.is_some() {
                self.changes
                    .push(Change::new(key, Some(validator.edit_type()), Value::Null));
            }
            return Ok(removed);
        }
        if let Some(removed) = self.pass_through.remove(key) {
            self.changes.push(Change::new(key, None, Value::Null));
            return Ok(Some(removed));
        }
        if self.is_strict() {
            return Err(self.unknown_field(key));
        }
        Ok(None)
    }

    /// Mutable access to a compound child, creating an empty one if unset
    pub fn child_mut(&mut self, field: &str) -> Result<&mut Node> {
        let options = self.options;
        self.child_entry(field, &options)
    }

    /// Mutable access to the elements of a compound-array field
    pub fn children_mut(&mut self, field: &str) -> Result<&mut [Node]> {
        let schema = self.schema;
        let validator = schema
            .validator(field)
            .ok_or_else(|| self.unknown_field(field))?;
        if !validator.is_compound_array() {
            return Err(SchemaError::InvalidPath {
                path: field.to_string(),
                reason: format!("not an array property of {}", schema.path()),
            });
        }
        Ok(match self.fields.get_mut(field) {
            Some(FieldValue::Nodes(nodes)) => nodes.as_mut_slice(),
            _ => &mut [],
        })
    }

    /// Recursively merge a raw mapping into this node.
    ///
    /// Existing compound children are updated in place; compound arrays of
    /// the same length are updated element by element; everything else is
    /// assigned with [`Node::set`].
    pub fn update(&mut self, patch: &Map<String, Value>) -> Result<()> {
        let schema = self.schema;
        for (key, value) in patch {
            let Some(validator) = schema.validator(key) else {
                if let (Value::Object(sub), Some(path)) = (value, self.resolve_key(key)?) {
                    if let Some(child) = self.existing_child_mut(&path) {
                        child.update(sub)?;
                        continue;
                    }
                }
                self.set(key, value.clone())?;
                continue;
            };
            match (self.fields.get_mut(key.as_str()), value) {
                (Some(FieldValue::Node(child)), Value::Object(sub)) if validator.is_compound() => {
                    child.update(sub)?;
                }
                (Some(FieldValue::Nodes(nodes)), Value::Array(items))
                    if nodes.len() == items.len() && items.iter().all(Value::is_object) =>
                {
                    for (node, item) in nodes.iter_mut().zip(items) {
                        if let Value::Object(sub) = item {
                            node.update(sub)?;
                        }
                    }
                }
                _ => self.set(key, value.clone())?,
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Change tracking
    // ------------------------------------------------------------------

    /// Pending changes in this node or any descendant
    pub fn is_dirty(&self) -> bool {
        !self.changes.is_empty()
            || self.fields.values().any(|v| match v {
                FieldValue::Node(child) => child.is_dirty(),
                FieldValue::Nodes(nodes) => nodes.iter().any(Node::is_dirty),
                FieldValue::Scalar(_) => false,
            })
    }

    /// Drain pending changes, with paths relative to this node.
    ///
    /// Changes are grouped per node: this node's own first, then each
    /// child's in field order.
    pub fn take_changes(&mut self) -> Vec<Change> {
        let mut out = std::mem::take(&mut self.changes);
        for (name, value) in self.fields.iter_mut() {
            match value {
                FieldValue::Node(child) => {
                    out.extend(child.take_changes().into_iter().map(|c| c.prefixed(name)));
                }
                FieldValue::Nodes(nodes) => {
                    for (i, child) in nodes.iter_mut().enumerate() {
                        let prefix = format!("{}[{}]", name, i);
                        out.extend(child.take_changes().into_iter().map(|c| c.prefixed(&prefix)));
                    }
                }
                FieldValue::Scalar(_) => {}
            }
        }
        out
    }

    // ------------------------------------------------------------------
    // Serialization
    // ------------------------------------------------------------------

    /// Plain nested mapping: declared fields in declaration order, then
    /// pass-through keys
    pub fn to_plain_form(&self) -> Map<String, Value> {
        self.plain_form(true)
    }

    fn plain_form(&self, include_pass_through: bool) -> Map<String, Value> {
        let mut out = Map::new();
        for name in self.schema.field_names() {
            if let Some(value) = self.fields.get(name) {
                out.insert(name.to_string(), value.plain(include_pass_through));
            }
        }
        if include_pass_through {
            for (key, value) in &self.pass_through {
                out.insert(key.clone(), value.clone());
            }
        }
        out
    }

    pub fn to_json(&self) -> Value {
        Value::Object(self.to_plain_form())
    }

    pub fn to_json_string(&self, output: &OutputConfig) -> Result<String> {
        let plain = Value::Object(self.plain_form(output.include_pass_through));
        let text = match output.format {
            OutputFormat::Pretty => serde_json::to_string_pretty(&plain)?,
            OutputFormat::Compact => serde_json::to_string(&plain)?,
        };
        Ok(text)
    }

    /// Checksum of the plain form, independent of field order
    pub fn fingerprint(&self) -> Checksum {
        Checksum::from_json(&self.to_json())
    }

    // ------------------------------------------------------------------
    // Assignment internals
    // ------------------------------------------------------------------

    /// Run `raw` through the validator of declared field `name` and store it
    pub(crate) fn assign_field(&mut self, name: &str, raw: Raw, options: &BuildOptions, track: bool) -> Result<()> {
        let schema = self.schema;
        let Some((key, validator)) = schema.field_entry(name) else {
            return Err(self.unknown_field(name));
        };

        let result = validator.validate(raw, options);
        let value = match skipping(result, options, schema, key)? {
            Some(value) => value,
            None => return Ok(()),
        };

        match value {
            Some(value) => {
                trace!(type_path = %schema.path(), field = key, "assigned field");
                if track {
                    self.changes
                        .push(Change::new(key, Some(validator.edit_type()), value.to_plain()));
                }
                self.fields.insert(key, value);
            }
            None => {
                if self.fields.shift_remove(key).is_some() && track {
                    self.changes
                        .push(Change::new(key, Some(validator.edit_type()), Value::Null));
                }
            }
        }
        Ok(())
    }

    /// Resolve a key that is not a declared field name
    pub(crate) fn assign_unknown(&mut self, key: &str, raw: Raw, options: &BuildOptions, track: bool) -> Result<()> {
        if let Some(path) = self.resolve_key(key)? {
            return self.assign_path(&path, raw, options, track);
        }

        if options.skip_invalid || !options.is_strict() {
            debug!(type_path = %self.schema.path(), key, "retained pass-through key");
            let plain = raw.into_plain();
            if track {
                self.changes.push(Change::new(key, None, plain.clone()));
            }
            self.pass_through.insert(key.to_string(), plain);
            return Ok(());
        }

        Err(self.unknown_field(key))
    }

    fn assign_path(&mut self, path: &PropPath, raw: Raw, options: &BuildOptions, track: bool) -> Result<()> {
        let schema = self.schema;
        let (head, rest) = path.split_first();
        let Some(validator) = schema.validator(&head.name) else {
            return Err(self.unknown_field(&head.name));
        };

        match (head.index, rest) {
            (None, None) => self.assign_field(&head.name, raw, options, track),
            (None, Some(rest)) => {
                if !validator.is_compound() {
                    return Err(SchemaError::InvalidPath {
                        path: path.to_string(),
                        reason: format!("'{}' of {} is not a compound property", head.name, schema.path()),
                    });
                }
                let created = !self.fields.contains_key(head.name.as_str());
                let result = self
                    .child_entry(&head.name, options)?
                    .assign_path(&rest, raw, options, track);
                // a child created only for this assignment goes away with it
                let left_empty = self.child(&head.name).map_or(false, Node::is_empty);
                if created && (result.is_err() || left_empty) {
                    self.fields.shift_remove(head.name.as_str());
                }
                result
            }
            (Some(index), rest) => {
                let (Some(child_schema), true) = (validator.child_schema(), validator.is_compound_array()) else {
                    return Err(SchemaError::InvalidPath {
                        path: path.to_string(),
                        reason: format!("'{}' of {} is not an array property", head.name, schema.path()),
                    });
                };
                let len = self.children(&head.name).map_or(0, <[Node]>::len);
                let out_of_range = || SchemaError::InvalidPath {
                    path: path.to_string(),
                    reason: format!("index {} out of range for '{}' with {} elements", index, head.name, len),
                };
                let Some(FieldValue::Nodes(nodes)) = self.fields.get_mut(head.name.as_str()) else {
                    return Err(out_of_range());
                };
                let element = nodes.get_mut(index).ok_or_else(out_of_range)?;

                match rest {
                    Some(rest) => element.assign_path(&rest, raw, options, track),
                    None => {
                        let result = compound::coerce_node(validator, child_schema, raw, options);
                        let Some(node) = skipping(result, options, schema, validator.field_name())? else {
                            return Ok(());
                        };
                        let plain = if track { Some(node.to_json()) } else { None };
                        *element = node;
                        if let Some(plain) = plain {
                            self.changes
                                .push(Change::new(head.to_string(), Some(validator.edit_type()), plain));
                        }
                        Ok(())
                    }
                }
            }
        }
    }

    /// Child already present at `path`, without creating anything
    fn existing_child_mut(&mut self, path: &PropPath) -> Option<&mut Node> {
        let (head, rest) = path.split_first();
        let node = match (head.index, self.fields.get_mut(head.name.as_str())?) {
            (None, FieldValue::Node(node)) => node,
            (Some(i), FieldValue::Nodes(nodes)) => nodes.get_mut(i)?,
            _ => return None,
        };
        match rest {
            None => Some(node),
            Some(rest) => node.existing_child_mut(&rest),
        }
    }

    fn child_entry(&mut self, field: &str, options: &BuildOptions) -> Result<&mut Node> {
        let schema = self.schema;
        let Some((key, validator)) = schema.field_entry(field) else {
            return Err(self.unknown_field(field));
        };
        let Some(child_schema) = validator.child_schema().filter(|_| validator.is_compound()) else {
            return Err(SchemaError::InvalidPath {
                path: field.to_string(),
                reason: format!("'{}' of {} is not a compound property", field, schema.path()),
            });
        };

        let slot = self
            .fields
            .entry(key)
            .or_insert_with(|| FieldValue::Node(Node::with_options(child_schema, &options.skip_invalid(false))));
        match slot {
            FieldValue::Node(node) => Ok(node),
            _ => Err(SchemaError::InvalidPath {
                path: field.to_string(),
                reason: format!("'{}' of {} does not hold a node", field, schema.path()),
            }),
        }
    }

    /// Turn any key into a path: aliases, declared names, underscore keys,
    /// then dotted paths
    fn parse_key(&self, key: &str) -> Result<PropPath> {
        if let Some(target) = self.schema.resolve_alias(key) {
            return PropPath::parse(target);
        }
        if !self.schema.declares(key) {
            if let Some(path) = PropPath::resolve_underscore(self.schema, key) {
                return Ok(path);
            }
        }
        PropPath::parse(key)
    }

    /// Path for an undeclared key, if it leads into a declared field
    fn resolve_key(&self, key: &str) -> Result<Option<PropPath>> {
        if let Some(target) = self.schema.resolve_alias(key) {
            return PropPath::parse(target).map(Some);
        }
        if key.contains('.') || key.contains('[') {
            return Ok(PropPath::parse(key).ok().filter(|p| p.resolves_in(self.schema)));
        }
        Ok(PropPath::resolve_underscore(self.schema, key))
    }

    fn unknown_field(&self, field: &str) -> SchemaError {
        SchemaError::UnknownField {
            field: field.to_string(),
            type_path: self.schema.path(),
            suggestion: suggest::closest(field, self.schema.field_names()),
        }
    }
}

/// Apply `skip_invalid` to a validation result: `Ok(None)` means the value
/// was dropped
fn skipping<T>(result: Result<T>, options: &BuildOptions, schema: &NodeSchema, field: &str) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if options.skip_invalid && err.is_validation() => {
            debug!(type_path = %schema.path(), field, error = %err, "skipped invalid value");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

impl PartialEq for Node {
    /// Same node type and same values; flags and pending changes are ignored
    fn eq(&self, other: &Self) -> bool {
        self.schema.is(other.schema) && self.fields == other.fields && self.pass_through == other.pass_through
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_plain_form().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::change::EditType;
    use crate::factory::{Arg, Overrides, UnknownFieldPolicy};
    use crate::graph_objs::isosurface::{SLICES, SLICES_X};
    use crate::graph_objs::layout::{LAYOUT, XAXIS};
    use serde_json::json;

    fn layout(json: Value) -> Node {
        LAYOUT.factory().build_value(&json, Overrides::new()).unwrap()
    }

    #[test]
    fn test_get_unknown_strict_and_lenient() {
        let strict = Node::new(&SLICES);
        assert!(matches!(strict.get("w"), Err(SchemaError::UnknownField { .. })));

        let lenient = Node::with_options(&SLICES, &BuildOptions::default().unknown_fields(UnknownFieldPolicy::PassThrough));
        assert!(lenient.get("w").unwrap().is_none());
    }

    #[test]
    fn test_set_records_edit_type() {
        let mut axis = Node::new(&XAXIS);
        axis.set("exponentformat", "E").unwrap();
        assert!(axis.is_dirty());

        let changes = axis.take_changes();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].path, "exponentformat");
        assert_eq!(changes[0].edit_type, Some(EditType::new("ticks+margins")));
        assert_eq!(changes[0].value, json!("E"));
        assert!(!axis.is_dirty());
    }

    #[test]
    fn test_set_invalid_enumerated() {
        let mut axis = Node::new(&XAXIS);
        let err = axis.set("exponentformat", "e2").unwrap_err();
        match err {
            SchemaError::Validation { field, parent_path, allowed, .. } => {
                assert_eq!(field, "exponentformat");
                assert_eq!(parent_path, "layout.xaxis");
                assert_eq!(allowed.len(), 6);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(axis.get("exponentformat").unwrap().is_none());
        assert!(!axis.is_dirty());
    }

    #[test]
    fn test_set_skip_invalid_flag() {
        let mut axis = Node::new(&XAXIS);
        axis.set("exponentformat", "power").unwrap();
        axis.set_skip_invalid(true);
        axis.set("exponentformat", "bogus").unwrap();
        assert_eq!(axis.get_str("exponentformat"), Some("power"));
    }

    #[test]
    fn test_set_null_unsets_scalar() {
        let mut axis = layout(json!({"xaxis": {"nticks": 5}}));
        axis.child_mut("xaxis").unwrap().set("nticks", Value::Null).unwrap();
        assert_eq!(axis.get_path("xaxis.nticks").unwrap(), None);
        let changes = axis.take_changes();
        assert_eq!(changes[0].path, "xaxis.nticks");
        assert_eq!(changes[0].value, Value::Null);
    }

    #[test]
    fn test_dotted_path_set_creates_children() {
        let mut node = Node::new(&LAYOUT);
        node.set("xaxis.title.font.size", 14).unwrap();
        assert_eq!(node.get_path("xaxis.title.font.size").unwrap(), Some(json!(14)));

        let changes = node.take_changes();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].path, "xaxis.title.font.size");
    }

    #[test]
    fn test_underscore_and_alias_set() {
        let mut axis = Node::new(&XAXIS);
        axis.set("title_text", "Time").unwrap();
        axis.set("titlefont", json!({"size": 12})).unwrap();
        assert_eq!(axis.get_path("title.text").unwrap(), Some(json!("Time")));
        assert_eq!(axis.get_path("title_font_size").unwrap(), Some(json!(12)));
        assert_eq!(axis.get_path("titlefont").unwrap(), Some(json!({"size": 12})));
    }

    #[test]
    fn test_indexed_path() {
        let mut node = layout(json!({"annotations": [{"text": "a"}, {"text": "b"}]}));
        node.set("annotations[1].text", "B").unwrap();
        assert_eq!(node.get_path("annotations[1].text").unwrap(), Some(json!("B")));
        assert_eq!(node.get_path("annotations[5]").unwrap(), None);

        let err = node.set("annotations[5].text", "x").unwrap_err();
        assert!(matches!(err, SchemaError::InvalidPath { .. }));

        node.set("annotations[0]", json!({"text": "new", "showarrow": false})).unwrap();
        assert_eq!(node.get_path("annotations[0].showarrow").unwrap(), Some(json!(false)));

        let paths: Vec<_> = node.take_changes().into_iter().map(|c| c.path).collect();
        assert_eq!(paths, vec!["annotations[0]", "annotations[1].text"]);
    }

    #[test]
    fn test_path_through_scalar_fails() {
        let mut node = Node::new(&LAYOUT);
        let err = node.set("showlegend.x", true).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidPath { .. }));
    }

    #[test]
    fn test_unknown_key_on_set() {
        let mut strict = Node::new(&XAXIS);
        match strict.set("colr", "red").unwrap_err() {
            SchemaError::UnknownField { suggestion, .. } => assert_eq!(suggestion.as_deref(), Some("color")),
            other => panic!("expected unknown field, got {:?}", other),
        }

        let mut lenient = Node::with_options(&XAXIS, &BuildOptions::default().unknown_fields(UnknownFieldPolicy::PassThrough));
        lenient.set("futureprop", json!({"a": 1})).unwrap();
        assert_eq!(lenient.pass_through().get("futureprop"), Some(&json!({"a": 1})));
        assert_eq!(lenient.to_json(), json!({"futureprop": {"a": 1}}));
        assert_eq!(lenient.get_path("futureprop").unwrap(), Some(json!({"a": 1})));
    }

    #[test]
    fn test_update_merges_children() {
        let mut node = layout(json!({"xaxis": {"nticks": 4, "color": "red"}, "annotations": [{"text": "a"}]}));
        let patch = json!({
            "xaxis": {"nticks": 8},
            "annotations": [{"showarrow": true}],
            "showlegend": false
        });
        let Value::Object(patch) = patch else { unreachable!() };
        node.update(&patch).unwrap();

        assert_eq!(node.get_path("xaxis.nticks").unwrap(), Some(json!(8)));
        assert_eq!(node.get_path("xaxis.color").unwrap(), Some(json!("red")));
        assert_eq!(node.get_path("annotations[0].text").unwrap(), Some(json!("a")));
        assert_eq!(node.get_path("annotations[0].showarrow").unwrap(), Some(json!(true)));
        assert_eq!(node.get_bool("showlegend"), Some(false));
    }

    #[test]
    fn test_update_replaces_array_of_different_length() {
        let mut node = layout(json!({"annotations": [{"text": "a"}]}));
        let Value::Object(patch) = json!({"annotations": [{"text": "x"}, {"text": "y"}]}) else { unreachable!() };
        node.update(&patch).unwrap();
        assert_eq!(node.children("annotations").unwrap().len(), 2);
        assert_eq!(node.get_path("annotations[0].text").unwrap(), Some(json!("x")));
    }

    #[test]
    fn test_update_alias_merges_into_child() {
        let mut axis = XAXIS
            .factory()
            .build_value(&json!({"title": {"font": {"size": 10, "color": "red"}}}), Overrides::new())
            .unwrap();
        let Value::Object(patch) = json!({"titlefont": {"size": 14}}) else { unreachable!() };
        axis.update(&patch).unwrap();
        assert_eq!(axis.get_path("title.font").unwrap(), Some(json!({"size": 14, "color": "red"})));
    }

    #[test]
    fn test_failed_nested_set_leaves_no_children() {
        let mut node = Node::new(&LAYOUT);
        assert!(node.set("xaxis.title.font.size", 0).is_err());
        assert!(node.is_empty());

        node.set_skip_invalid(true);
        node.set("xaxis.nticks", -3).unwrap();
        assert_eq!(node.to_json(), json!({}));

        // existing children are kept
        node.set_skip_invalid(false);
        node.set("xaxis.nticks", 2).unwrap();
        assert!(node.set("xaxis.title.text", true).is_err());
        assert_eq!(node.to_json(), json!({"xaxis": {"nticks": 2}}));
    }

    #[test]
    fn test_get_path_reads_retained_keys_on_strict_node() {
        let node = XAXIS.factory().skip_invalid(true).from_json_str(r#"{"minorgridcount": 4}"#).unwrap();
        assert!(node.is_strict());
        assert_eq!(node.get_path("minorgridcount").unwrap(), Some(json!(4)));
        assert!(node.get_path("majorgridcount").is_err());
    }

    #[test]
    fn test_clear() {
        let mut node = SLICES_X.factory().from_json_str(r#"{"fill": 0.2}"#).unwrap();
        assert_eq!(node.clear("fill").unwrap(), Some(json!(0.2)));
        assert!(node.is_empty());
        assert!(node.clear("bogus").is_err());
    }

    #[test]
    fn test_children_mut() {
        let mut node = layout(json!({"annotations": [{"text": "a"}]}));
        node.children_mut("annotations").unwrap()[0].set("text", "b").unwrap();
        assert_eq!(node.take_changes()[0].path, "annotations[0].text");
        assert!(node.children_mut("xaxis").is_err());
    }

    #[test]
    fn test_plain_form_order_and_json() {
        let mut node = SLICES_X.factory().build(Arg::None, Overrides::new()).unwrap();
        node.set("show", true).unwrap();
        node.set("fill", 0.5).unwrap();
        let keys: Vec<_> = node.to_plain_form().keys().cloned().collect();
        assert_eq!(keys, vec!["fill", "show"]);

        let compact = node
            .to_json_string(&OutputConfig {
                format: OutputFormat::Compact,
                include_pass_through: true,
            })
            .unwrap();
        assert_eq!(compact, r#"{"fill":0.5,"show":true}"#);
        assert_eq!(serde_json::to_string(&node).unwrap(), compact);
    }

    #[test]
    fn test_fingerprint_ignores_assignment_order() {
        let mut a = Node::new(&SLICES_X);
        a.set("fill", 0.5).unwrap();
        a.set("show", true).unwrap();
        let mut b = Node::new(&SLICES_X);
        b.set("show", true).unwrap();
        b.set("fill", 0.5).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.fingerprint(), b.fingerprint());
    }
}
