//! Field validators
//!
//! A [`Validator`] turns a raw input into the stored form of one field, or
//! rejects it. Scalar variants work on plain JSON values; the compound
//! variants build child nodes through the child type's factory.
//!
//! | Variant         | Accepts                                              |
//! |-----------------|------------------------------------------------------|
//! | Enumerated      | exact literals, `/regex/` patterns                   |
//! | Number          | JSON numbers within an inclusive range               |
//! | Boolean         | JSON booleans                                        |
//! | String          | strings (numbers too when not strict)                |
//! | Color           | hex, `rgb()`-style functions, CSS color names        |
//! | DataArray       | any JSON array                                       |
//! | Compound        | null, mapping, node of the child type                |
//! | CompoundArray   | sequence of the compound shapes                      |

pub mod color;
pub mod compound;
pub mod enumerated;
pub mod number;
pub mod string;

use serde_json::{Map, Value};

use crate::change::EditType;
use crate::error::{Result, SchemaError};
use crate::factory::BuildOptions;
use crate::node::{FieldValue, Node};
use crate::schema::NodeSchema;

pub use color::ColorRules;
pub use enumerated::Enumerated;
pub use number::NumberRange;
pub use string::StringRules;

/// Link from a compound field to the schema of its child type
pub type ChildSchema = fn() -> &'static NodeSchema;

/// Raw input to a field assignment
#[derive(Debug, Clone)]
pub enum Raw {
    /// A plain value; `null` means absent
    Value(Value),
    /// An already constructed node
    Node(Node),
    /// A sequence that may mix nodes and plain mappings
    Nodes(Vec<Raw>),
}

impl Raw {
    pub fn absent() -> Self {
        Raw::Value(Value::Null)
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Raw::Value(Value::Null))
    }

    /// Short shape name used in error messages
    pub(crate) fn describe(&self) -> String {
        match self {
            Raw::Value(v) => describe_value(v),
            Raw::Node(n) => format!("instance of {}", n.schema().path()),
            Raw::Nodes(items) => format!("sequence of {} items", items.len()),
        }
    }

    /// Plain form of the input, for pass-through storage and change records
    pub(crate) fn into_plain(self) -> Value {
        match self {
            Raw::Value(v) => v,
            Raw::Node(n) => Value::Object(n.to_plain_form()),
            Raw::Nodes(items) => Value::Array(items.into_iter().map(Raw::into_plain).collect()),
        }
    }
}

impl From<Value> for Raw {
    fn from(v: Value) -> Self {
        Raw::Value(v)
    }
}

impl From<Map<String, Value>> for Raw {
    fn from(m: Map<String, Value>) -> Self {
        Raw::Value(Value::Object(m))
    }
}

impl From<Node> for Raw {
    fn from(n: Node) -> Self {
        Raw::Node(n)
    }
}

impl From<Vec<Node>> for Raw {
    fn from(nodes: Vec<Node>) -> Self {
        Raw::Nodes(nodes.into_iter().map(Raw::Node).collect())
    }
}

impl From<&str> for Raw {
    fn from(s: &str) -> Self {
        Raw::Value(Value::String(s.to_string()))
    }
}

impl From<String> for Raw {
    fn from(s: String) -> Self {
        Raw::Value(Value::String(s))
    }
}

impl From<bool> for Raw {
    fn from(b: bool) -> Self {
        Raw::Value(Value::Bool(b))
    }
}

impl From<f64> for Raw {
    fn from(n: f64) -> Self {
        Raw::Value(Value::from(n))
    }
}

impl From<i64> for Raw {
    fn from(n: i64) -> Self {
        Raw::Value(Value::from(n))
    }
}

impl From<i32> for Raw {
    fn from(n: i32) -> Self {
        Raw::Value(Value::from(n))
    }
}

impl From<u64> for Raw {
    fn from(n: u64) -> Self {
        Raw::Value(Value::from(n))
    }
}

impl<T: Into<Raw>> From<Option<T>> for Raw {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or_else(Raw::absent)
    }
}

/// Why a scalar coercion failed
#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    pub reason: String,
    pub allowed: Vec<String>,
}

impl Rejection {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            allowed: Vec::new(),
        }
    }

    pub fn with_allowed(mut self, allowed: Vec<String>) -> Self {
        self.allowed = allowed;
        self
    }
}

/// Kind-specific coercion rules
#[derive(Debug, Clone)]
pub enum ValidatorKind {
    Enumerated(Enumerated),
    Number(NumberRange),
    Boolean,
    String(StringRules),
    Color(ColorRules),
    DataArray,
    Compound(ChildSchema),
    CompoundArray(ChildSchema),
}

/// Validator for a single declared field
#[derive(Debug, Clone)]
pub struct Validator {
    field_name: &'static str,
    parent_path: String,
    edit_type: EditType,
    kind: ValidatorKind,
}

impl Validator {
    pub fn new(field_name: &'static str, parent_path: impl Into<String>, kind: ValidatorKind) -> Self {
        Self {
            field_name,
            parent_path: parent_path.into(),
            edit_type: EditType::default(),
            kind,
        }
    }

    pub fn with_edit_type(mut self, edit_type: &'static str) -> Self {
        self.edit_type = EditType::new(edit_type);
        self
    }

    pub fn field_name(&self) -> &'static str {
        self.field_name
    }

    pub fn parent_path(&self) -> &str {
        &self.parent_path
    }

    pub fn edit_type(&self) -> EditType {
        self.edit_type
    }

    pub fn kind(&self) -> &ValidatorKind {
        &self.kind
    }

    /// Schema of the child type, for compound and compound-array fields
    pub fn child_schema(&self) -> Option<&'static NodeSchema> {
        match self.kind {
            ValidatorKind::Compound(child) | ValidatorKind::CompoundArray(child) => Some(child()),
            _ => None,
        }
    }

    pub fn is_compound(&self) -> bool {
        matches!(self.kind, ValidatorKind::Compound(_))
    }

    pub fn is_compound_array(&self) -> bool {
        matches!(self.kind, ValidatorKind::CompoundArray(_))
    }

    /// Coerce `raw` into the stored form of this field.
    ///
    /// `Ok(None)` means the field ends up unset (null input to a scalar
    /// field).
    pub fn validate(&self, raw: Raw, options: &BuildOptions) -> Result<Option<FieldValue>> {
        match self.kind {
            ValidatorKind::Compound(child) => {
                compound::coerce_node(self, child(), raw, options).map(|n| Some(FieldValue::Node(n)))
            }
            ValidatorKind::CompoundArray(child) => {
                compound::coerce_array(self, child(), raw, options).map(|n| Some(FieldValue::Nodes(n)))
            }
            _ => {
                let value = match raw {
                    Raw::Value(Value::Null) => return Ok(None),
                    Raw::Value(v) => v,
                    other => {
                        return Err(self.reject(Rejection::new(format!(
                            "expected a plain value, received {}",
                            other.describe()
                        ))))
                    }
                };
                self.coerce_scalar(value)
                    .map(|v| Some(FieldValue::Scalar(v)))
                    .map_err(|r| self.reject(r))
            }
        }
    }

    fn coerce_scalar(&self, value: Value) -> std::result::Result<Value, Rejection> {
        match &self.kind {
            ValidatorKind::Enumerated(rules) => rules.coerce(value),
            ValidatorKind::Number(rules) => rules.coerce(value),
            ValidatorKind::Boolean => match value {
                Value::Bool(_) => Ok(value),
                other => Err(Rejection::new(format!(
                    "received {}, expected a boolean (true or false)",
                    describe_value(&other)
                ))),
            },
            ValidatorKind::String(rules) => rules.coerce(value),
            ValidatorKind::Color(rules) => rules.coerce(value),
            ValidatorKind::DataArray => match value {
                Value::Array(_) => Ok(value),
                other => Err(Rejection::new(format!(
                    "received {}, expected a sequence of data values",
                    describe_value(&other)
                ))),
            },
            ValidatorKind::Compound(_) | ValidatorKind::CompoundArray(_) => {
                Err(Rejection::new("compound fields take nodes, not scalars"))
            }
        }
    }

    pub(crate) fn reject(&self, rejection: Rejection) -> SchemaError {
        SchemaError::Validation {
            field: self.field_name.to_string(),
            parent_path: self.parent_path.clone(),
            reason: rejection.reason,
            allowed: rejection.allowed,
        }
    }
}

/// Apply `check` to a scalar, or to every element when `array_ok` allows a
/// sequence
pub(crate) fn each_element<F>(value: Value, array_ok: bool, check: F) -> std::result::Result<Value, Rejection>
where
    F: Fn(Value) -> std::result::Result<Value, Rejection>,
{
    match value {
        Value::Array(items) if array_ok => {
            let mut out = Vec::with_capacity(items.len());
            for (i, item) in items.into_iter().enumerate() {
                let coerced = check(item).map_err(|r| Rejection {
                    reason: format!("element {}: {}", i, r.reason),
                    allowed: r.allowed,
                })?;
                out.push(coerced);
            }
            Ok(Value::Array(out))
        }
        other => check(other),
    }
}

/// Human-readable rendering of a received value
pub(crate) fn describe_value(value: &Value) -> String {
    const MAX: usize = 40;
    let text = match value {
        Value::Null => return "null".to_string(),
        Value::String(s) => format!("'{}'", s),
        Value::Object(m) => return format!("mapping with {} keys", m.len()),
        other => other.to_string(),
    };
    if text.chars().count() > MAX {
        let cut: String = text.chars().take(MAX).collect();
        format!("{}...", cut)
    } else {
        text
    }
}
