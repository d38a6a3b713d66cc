//! Node construction
//!
//! [`NodeFactory::build`] turns one of three input shapes plus keyword
//! overrides into a validated [`Node`]:
//!
//! 1. For each declared field, in declaration order, the value from `arg` is
//!    the base and a non-null override replaces it. The winner goes through
//!    the field's validator; when neither is present the field stays unset.
//! 2. Keys left over in `arg` and the overrides are resolved as aliases or
//!    property paths, retained as pass-through fields, or rejected, depending
//!    on `skip_invalid` and the [`UnknownFieldPolicy`].

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::config::ValidationConfig;
use crate::error::{Result, SchemaError};
use crate::node::Node;
use crate::schema::NodeSchema;
use crate::validators::Raw;

const EXPECTED_ARG: &str = "mapping or compatible node instance";

/// What to do with keys that name no declared field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownFieldPolicy {
    /// Reject with an unknown-field error
    #[default]
    Strict,
    /// Keep them verbatim as pass-through fields
    PassThrough,
}

/// Options threaded through construction of a node and its children
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BuildOptions {
    /// Drop invalid field values instead of failing
    pub skip_invalid: bool,
    pub unknown_fields: UnknownFieldPolicy,
}

impl BuildOptions {
    pub fn skip_invalid(mut self, skip_invalid: bool) -> Self {
        self.skip_invalid = skip_invalid;
        self
    }

    pub fn unknown_fields(mut self, policy: UnknownFieldPolicy) -> Self {
        self.unknown_fields = policy;
        self
    }

    pub fn is_strict(&self) -> bool {
        self.unknown_fields == UnknownFieldPolicy::Strict
    }
}

impl From<&ValidationConfig> for BuildOptions {
    fn from(config: &ValidationConfig) -> Self {
        Self {
            skip_invalid: config.skip_invalid,
            unknown_fields: config.unknown_fields,
        }
    }
}

/// The positional constructor argument
#[derive(Debug, Clone, Copy)]
pub enum Arg<'a> {
    /// No argument; same as an empty mapping
    None,
    /// An existing node, copied through its plain form
    Instance(&'a Node),
    /// A raw nested mapping, copied before use
    Mapping(&'a Map<String, Value>),
}

impl<'a> Arg<'a> {
    /// Interpret a JSON value as a constructor argument. Only `null` and
    /// objects are valid shapes.
    fn from_value(schema: &NodeSchema, value: &'a Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Arg::None),
            Value::Object(map) => Ok(Arg::Mapping(map)),
            other => Err(SchemaError::Construction {
                type_path: schema.path(),
                expected: EXPECTED_ARG,
                found: shape_name(other).to_string(),
            }),
        }
    }
}

impl<'a> From<&'a Node> for Arg<'a> {
    fn from(node: &'a Node) -> Self {
        Arg::Instance(node)
    }
}

impl<'a> From<&'a Map<String, Value>> for Arg<'a> {
    fn from(map: &'a Map<String, Value>) -> Self {
        Arg::Mapping(map)
    }
}

fn shape_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}

/// Keyword overrides, in the order they were given
#[derive(Debug, Clone, Default)]
pub struct Overrides(IndexMap<String, Raw>);

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an override; chainable
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Raw>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Raw>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Take a non-null override for `key`
    fn take(&mut self, key: &str) -> Option<Raw> {
        self.0.shift_remove(key).filter(|raw| !raw.is_absent())
    }

    fn into_remaining(self) -> impl Iterator<Item = (String, Raw)> {
        self.0.into_iter().filter(|(_, raw)| !raw.is_absent())
    }
}

impl<K: Into<String>, V: Into<Raw>> FromIterator<(K, V)> for Overrides {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Builds nodes of one type
#[derive(Debug, Clone, Copy)]
pub struct NodeFactory {
    schema: &'static NodeSchema,
    options: BuildOptions,
}

impl NodeFactory {
    pub fn new(schema: &'static NodeSchema) -> Self {
        Self {
            schema,
            options: BuildOptions::default(),
        }
    }

    pub fn with_options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }

    pub fn skip_invalid(mut self, skip_invalid: bool) -> Self {
        self.options.skip_invalid = skip_invalid;
        self
    }

    pub fn unknown_fields(mut self, policy: UnknownFieldPolicy) -> Self {
        self.options.unknown_fields = policy;
        self
    }

    pub fn schema(&self) -> &'static NodeSchema {
        self.schema
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Build a node from `arg` and `overrides`
    pub fn build(&self, arg: Arg<'_>, overrides: Overrides) -> Result<Node> {
        let mut base = self.copy_arg(arg)?;
        let mut overrides = overrides;
        let mut node = Node::with_options(self.schema, &self.options);
        node.set_skip_invalid(self.options.skip_invalid);

        for name in self.schema.field_names() {
            let from_arg = base.shift_remove(name).map(Raw::Value);
            let Some(raw) = overrides.take(name).or(from_arg) else {
                continue;
            };
            node.assign_field(name, raw, &self.options, false)?;
        }

        // overrides win over arg for leftover keys as well
        let mut unknown: IndexMap<String, Raw> = base.into_iter().map(|(k, v)| (k, Raw::Value(v))).collect();
        for (key, raw) in overrides.into_remaining() {
            unknown.insert(key, raw);
        }
        for (key, raw) in unknown {
            node.assign_unknown(&key, raw, &self.options, false)?;
        }

        node.set_skip_invalid(false);
        debug!(
            type_path = %self.schema.path(),
            fields = node.len(),
            pass_through = node.pass_through().len(),
            "built node"
        );
        Ok(node)
    }

    /// Build from a JSON value (`null` or an object)
    pub fn build_value(&self, value: &Value, overrides: Overrides) -> Result<Node> {
        let arg = Arg::from_value(self.schema, value)?;
        self.build(arg, overrides)
    }

    /// Parse JSON text and build from it
    pub fn from_json_str(&self, json: &str) -> Result<Node> {
        let value: Value = serde_json::from_str(json)?;
        self.build_value(&value, Overrides::new())
    }

    fn copy_arg(&self, arg: Arg<'_>) -> Result<Map<String, Value>> {
        match arg {
            Arg::None => Ok(Map::new()),
            Arg::Instance(node) if node.schema().is(self.schema) => Ok(node.to_plain_form()),
            Arg::Instance(node) => Err(SchemaError::Construction {
                type_path: self.schema.path(),
                expected: EXPECTED_ARG,
                found: format!("instance of {}", node.schema().path()),
            }),
            Arg::Mapping(map) => Ok(map.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph_objs::isosurface::{SLICES, SLICES_X};
    use crate::node::FieldValue;
    use serde_json::json;

    fn as_map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {}", other),
        }
    }

    #[test]
    fn test_empty_arg() {
        let node = SLICES.factory().build(Arg::None, Overrides::new()).unwrap();
        assert!(node.is_empty());
        assert!(node.get("x").unwrap().is_none());
    }

    #[test]
    fn test_override_precedence() {
        let arg = as_map(json!({"fill": 0.5, "show": true}));
        let node = SLICES_X
            .factory()
            .build(Arg::Mapping(&arg), Overrides::new().with("fill", 0.9))
            .unwrap();
        assert_eq!(node.scalar("fill"), Some(&json!(0.9)));
        assert_eq!(node.scalar("show"), Some(&json!(true)));
    }

    #[test]
    fn test_null_override_keeps_base() {
        let arg = as_map(json!({"fill": 0.5}));
        let node = SLICES_X
            .factory()
            .build(Arg::Mapping(&arg), Overrides::new().with("fill", Value::Null))
            .unwrap();
        assert_eq!(node.scalar("fill"), Some(&json!(0.5)));
    }

    #[test]
    fn test_mapping_not_mutated() {
        let arg = as_map(json!({"x": {"show": true}, "bogus": 1}));
        let before = arg.clone();
        let _ = SLICES.factory().skip_invalid(true).build(Arg::Mapping(&arg), Overrides::new()).unwrap();
        assert_eq!(arg, before);
    }

    #[test]
    fn test_instance_copied_through_plain_form() {
        let arg = as_map(json!({"x": {"fill": 0.3}}));
        let original = SLICES.factory().build(Arg::Mapping(&arg), Overrides::new()).unwrap();
        let mut copy = SLICES.factory().build(Arg::Instance(&original), Overrides::new()).unwrap();
        assert_eq!(copy, original);

        copy.set("x.fill", 0.7).unwrap();
        assert_ne!(copy, original);
        assert_eq!(original.get_path("x.fill").unwrap(), Some(json!(0.3)));
    }

    #[test]
    fn test_instance_of_other_type() {
        let other = SLICES_X.factory().build(Arg::None, Overrides::new()).unwrap();
        let err = SLICES.factory().build(Arg::Instance(&other), Overrides::new()).unwrap_err();
        assert!(matches!(err, SchemaError::Construction { .. }));
    }

    #[test]
    fn test_bad_arg_shape() {
        let err = SLICES.factory().build_value(&json!([1, 2]), Overrides::new()).unwrap_err();
        match err {
            SchemaError::Construction { expected, found, .. } => {
                assert_eq!(expected, "mapping or compatible node instance");
                assert_eq!(found, "sequence");
            }
            other => panic!("expected construction error, got {:?}", other),
        }
        assert!(SLICES.factory().build_value(&json!(null), Overrides::new()).is_ok());
    }

    #[test]
    fn test_skip_invalid_does_not_mask_construction_errors() {
        let err = SLICES
            .factory()
            .skip_invalid(true)
            .build_value(&json!("nope"), Overrides::new())
            .unwrap_err();
        assert!(matches!(err, SchemaError::Construction { .. }));
    }

    #[test]
    fn test_override_with_node_instance() {
        let x = SLICES_X.factory().from_json_str(r#"{"show": false}"#).unwrap();
        let node = SLICES
            .factory()
            .build(Arg::None, Overrides::new().with("x", x))
            .unwrap();
        match node.get("x").unwrap() {
            Some(FieldValue::Node(child)) => assert_eq!(child.scalar("show"), Some(&json!(false))),
            other => panic!("expected child node, got {:?}", other),
        }
    }

    #[test]
    fn test_construction_records_no_changes() {
        let node = SLICES.factory().from_json_str(r#"{"x": {"show": true}}"#).unwrap();
        assert!(!node.is_dirty());
    }

    #[test]
    fn test_options_from_config() {
        let config = ValidationConfig {
            skip_invalid: true,
            unknown_fields: UnknownFieldPolicy::PassThrough,
        };
        let options = BuildOptions::from(&config);
        assert!(options.skip_invalid);
        assert!(!options.is_strict());

        let node = SLICES_X
            .factory()
            .with_options(options)
            .from_json_str(r#"{"fill": 3, "future": 1}"#)
            .unwrap();
        assert!(node.get("fill").unwrap().is_none());
        assert_eq!(node.pass_through().get("future"), Some(&json!(1)));
    }

    #[test]
    fn test_pass_through_keeps_input_order() {
        let node = crate::graph_objs::layout::XAXIS
            .factory()
            .skip_invalid(true)
            .from_json_str(r#"{"a": 1, "nticks": 3, "b": 2, "c": 3}"#)
            .unwrap();
        let keys: Vec<_> = node.pass_through().keys().cloned().collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_skip_invalid_reset_after_build() {
        let node = SLICES.factory().skip_invalid(true).build(Arg::None, Overrides::new()).unwrap();
        assert!(!node.skip_invalid());
    }
}
