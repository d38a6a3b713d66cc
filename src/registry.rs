//! Schema Registry
//!
//! Looks up node types by their dotted path (`layout.xaxis`,
//! `isosurface.slices.x`, ...) for callers that only know the path at
//! runtime, e.g. when rebuilding a figure from serialized JSON.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde_json::Value;

use crate::error::{Result, SchemaError};
use crate::factory::{BuildOptions, NodeFactory, Overrides};
use crate::graph_objs::{isosurface, layout};
use crate::node::Node;
use crate::schema::NodeSchema;
use crate::suggest;

static GLOBAL: Lazy<SchemaRegistry> = Lazy::new(|| {
    SchemaRegistry::from_schemas([
        &*isosurface::ISOSURFACE,
        &*isosurface::SLICES,
        &*isosurface::SLICES_X,
        &*isosurface::SLICES_Y,
        &*isosurface::SLICES_Z,
        &*layout::LAYOUT,
        &*layout::XAXIS,
        &*layout::XAXIS_TITLE,
        &*layout::XAXIS_TITLE_FONT,
        &*layout::XAXIS_TICKFONT,
        &*layout::ANNOTATION,
        &*layout::ANNOTATION_FONT,
    ])
});

/// Node types indexed by path
pub struct SchemaRegistry {
    schemas: IndexMap<String, &'static NodeSchema>,
}

impl SchemaRegistry {
    /// Registry of every built-in node type
    pub fn global() -> &'static SchemaRegistry {
        &GLOBAL
    }

    pub fn from_schemas(schemas: impl IntoIterator<Item = &'static NodeSchema>) -> Self {
        Self {
            schemas: schemas.into_iter().map(|s| (s.path(), s)).collect(),
        }
    }

    pub fn get(&self, path: &str) -> Option<&'static NodeSchema> {
        self.schemas.get(path).copied()
    }

    /// All registered paths, in registration order
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Factory for the node type at `path`
    pub fn factory(&self, path: &str) -> Result<NodeFactory> {
        self.get(path)
            .map(NodeFactory::new)
            .ok_or_else(|| SchemaError::UnknownSchema {
                path: path.to_string(),
                suggestion: suggest::closest(path, self.paths()),
            })
    }

    /// Build a node of the type at `path` from a JSON value
    pub fn build(&self, path: &str, value: &Value, options: BuildOptions) -> Result<Node> {
        self.factory(path)?
            .with_options(options)
            .build_value(value, Overrides::new())
    }
}
