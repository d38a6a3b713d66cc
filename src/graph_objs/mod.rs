//! Figure object types
//!
//! Each type pairs a static [`NodeSchema`](crate::schema::NodeSchema) table
//! with a thin typed wrapper around [`Node`](crate::node::Node). Wrappers
//! deref to the node, so the generic API (`set`, `get_path`, `update`,
//! `take_changes`, ...) is always available next to the typed accessors.

/// Declare a typed wrapper over the node type described by a schema static.
///
/// Accessors are listed as `getter / setter: kind = "field"`, where `kind`
/// selects the getter's return type: `f64`, `i64`, `bool`, `str`, `value`,
/// `node` or `nodes`.
macro_rules! node_type {
    (
        $(#[$meta:meta])*
        pub struct $name:ident($schema:ident) {
            $( $get:ident / $set:ident : $kind:ident = $key:literal ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name($crate::node::Node);

        impl $name {
            pub fn type_schema() -> &'static $crate::schema::NodeSchema {
                &$schema
            }

            /// Empty instance
            pub fn new() -> Self {
                Self($crate::node::Node::new(&$schema))
            }

            pub fn build(
                arg: $crate::factory::Arg<'_>,
                overrides: $crate::factory::Overrides,
                options: &$crate::factory::BuildOptions,
            ) -> $crate::error::Result<Self> {
                $crate::factory::NodeFactory::new(&$schema)
                    .with_options(*options)
                    .build(arg, overrides)
                    .map(Self)
            }

            /// Wrap a node built elsewhere; it must be of this type
            pub fn from_node(node: $crate::node::Node) -> $crate::error::Result<Self> {
                if node.schema().is(&$schema) {
                    Ok(Self(node))
                } else {
                    Err($crate::error::SchemaError::Construction {
                        type_path: $schema.path(),
                        expected: "instance of the same node type",
                        found: format!("instance of {}", node.schema().path()),
                    })
                }
            }

            pub fn into_node(self) -> $crate::node::Node {
                self.0
            }

            $(
                node_type!(@get $get $kind $key);

                pub fn $set(&mut self, value: impl Into<$crate::validators::Raw>) -> $crate::error::Result<()> {
                    self.0.set($key, value)
                }
            )*
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::ops::Deref for $name {
            type Target = $crate::node::Node;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl std::ops::DerefMut for $name {
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.0
            }
        }

        impl From<$name> for $crate::validators::Raw {
            fn from(value: $name) -> Self {
                $crate::validators::Raw::Node(value.0)
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                self.0.serialize(serializer)
            }
        }
    };

    (@get $get:ident f64 $key:literal) => {
        pub fn $get(&self) -> Option<f64> {
            self.0.get_f64($key)
        }
    };
    (@get $get:ident i64 $key:literal) => {
        pub fn $get(&self) -> Option<i64> {
            self.0.get_i64($key)
        }
    };
    (@get $get:ident bool $key:literal) => {
        pub fn $get(&self) -> Option<bool> {
            self.0.get_bool($key)
        }
    };
    (@get $get:ident str $key:literal) => {
        pub fn $get(&self) -> Option<&str> {
            self.0.get_str($key)
        }
    };
    (@get $get:ident value $key:literal) => {
        pub fn $get(&self) -> Option<&serde_json::Value> {
            self.0.scalar($key)
        }
    };
    (@get $get:ident node $key:literal) => {
        pub fn $get(&self) -> Option<&$crate::node::Node> {
            self.0.child($key)
        }
    };
    (@get $get:ident nodes $key:literal) => {
        pub fn $get(&self) -> &[$crate::node::Node] {
            self.0.children($key).unwrap_or(&[])
        }
    };
}

pub mod isosurface;
pub mod layout;

pub use isosurface::{Isosurface, Slices, SlicesX, SlicesY, SlicesZ};
pub use layout::{Annotation, Layout, XAxis};
