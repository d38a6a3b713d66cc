//! Compound and compound-array coercion
//!
//! Child nodes are built through the child type's [`NodeFactory`] with the
//! parent's build options, so `skip_invalid` and the unknown-field policy
//! reach every level of the tree.

use serde_json::Value;

use super::{Raw, Rejection, Validator};
use crate::error::Result;
use crate::factory::{Arg, BuildOptions, NodeFactory, Overrides};
use crate::node::Node;
use crate::schema::NodeSchema;

/// Coerce one raw value into a child node
pub(crate) fn coerce_node(
    validator: &Validator,
    child: &'static NodeSchema,
    raw: Raw,
    options: &BuildOptions,
) -> Result<Node> {
    match raw {
        Raw::Value(Value::Null) => Ok(empty(child, options)),
        Raw::Value(Value::Object(map)) => {
            NodeFactory::new(child)
                .with_options(*options)
                .build(Arg::Mapping(&map), Overrides::new())
        }
        Raw::Node(node) if node.schema().is(child) => Ok(node),
        other => Err(validator.reject(Rejection::new(format!(
            "received {}, expected a mapping or an instance of {}",
            other.describe(),
            child.path()
        )))),
    }
}

/// Coerce a raw sequence into an ordered list of child nodes.
///
/// With `skip_invalid`, an element of the wrong shape becomes an empty node
/// so sibling indices are unchanged.
pub(crate) fn coerce_array(
    validator: &Validator,
    child: &'static NodeSchema,
    raw: Raw,
    options: &BuildOptions,
) -> Result<Vec<Node>> {
    let items = match raw {
        Raw::Value(Value::Null) => return Ok(Vec::new()),
        Raw::Value(Value::Array(items)) => items.into_iter().map(Raw::Value).collect(),
        Raw::Nodes(items) => items,
        other => {
            return Err(validator.reject(Rejection::new(format!(
                "received {}, expected a sequence of mappings or instances of {}",
                other.describe(),
                child.path()
            ))))
        }
    };

    let mut nodes = Vec::with_capacity(items.len());
    for (i, item) in items.into_iter().enumerate() {
        let node = match item {
            Raw::Value(Value::Null) => empty(child, options),
            Raw::Value(Value::Object(map)) => NodeFactory::new(child)
                .with_options(*options)
                .build(Arg::Mapping(&map), Overrides::new())?,
            Raw::Node(node) if node.schema().is(child) => node,
            _ if options.skip_invalid => empty(child, options),
            other => {
                return Err(validator.reject(Rejection::new(format!(
                    "element {}: received {}, expected a mapping or an instance of {}",
                    i,
                    other.describe(),
                    child.path()
                ))))
            }
        };
        nodes.push(node);
    }
    Ok(nodes)
}

/// Empty child carrying the policy but not the construction-time skip flag
fn empty(child: &'static NodeSchema, options: &BuildOptions) -> Node {
    Node::with_options(child, &options.skip_invalid(false))
}
