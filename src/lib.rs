//! Figure Schema
//!
//! Validated attribute trees for declarative chart figures. Every object in
//! a figure (a trace, the layout, an axis, a font) is a [`Node`] whose
//! fields are checked by a per-field [`Validator`] on construction and on
//! every assignment.
//!
//! ## Features
//!
//! - **Static schemas**: field tables are built once per node type and shared
//! - **Validation**: enumerations (with regex entries), numeric ranges,
//!   booleans, strings, colors, data arrays, nested nodes and node arrays
//! - **Flexible construction**: from nothing, a raw mapping, or another
//!   instance, with keyword overrides on top
//! - **Property paths**: `title.font.size`, `annotations[0].text` and
//!   `title_font_size` address nested fields
//! - **Change tracking**: assignments after construction are recorded with
//!   their edit type
//!
//! ## Example
//!
//! ```
//! use figure_schema::graph_objs::layout::XAXIS;
//! use figure_schema::Overrides;
//! use serde_json::json;
//!
//! let axis = XAXIS
//!     .factory()
//!     .build_value(&json!({"exponentformat": "E"}), Overrides::new().with("nticks", 5))
//!     .unwrap();
//! assert_eq!(axis.get_str("exponentformat"), Some("E"));
//! assert_eq!(axis.to_json(), json!({"exponentformat": "E", "nticks": 5}));
//! ```

pub mod change;
pub mod checksum;
pub mod config;
pub mod error;
pub mod factory;
pub mod graph_objs;
pub mod node;
pub mod path;
pub mod registry;
pub mod schema;
pub mod suggest;
pub mod validators;

pub use change::{Change, EditType};
pub use checksum::Checksum;
pub use config::{OutputConfig, OutputFormat, SchemaConfig, ValidationConfig};
pub use error::{Result, SchemaError};
pub use factory::{Arg, BuildOptions, NodeFactory, Overrides, UnknownFieldPolicy};
pub use node::{FieldValue, Node};
pub use path::PropPath;
pub use registry::SchemaRegistry;
pub use schema::NodeSchema;
pub use validators::{Raw, Validator, ValidatorKind};
