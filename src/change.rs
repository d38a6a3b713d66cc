//! Pending-edit tracking
//!
//! Every successful assignment after construction records a [`Change`]. A
//! renderer drains them with [`Node::take_changes`](crate::Node::take_changes)
//! and uses the [`EditType`] flags to decide which recompute pass to run.

use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Opaque description of the recompute a field change triggers.
///
/// Flags are joined with `+`, e.g. `ticks+margins`. Nothing in this crate
/// interprets them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EditType(&'static str);

impl EditType {
    pub const CALC: EditType = EditType("calc");
    pub const NONE: EditType = EditType("none");

    pub const fn new(tag: &'static str) -> Self {
        Self(tag)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// Individual flags of a compound tag
    pub fn flags(&self) -> impl Iterator<Item = &'static str> {
        self.0.split('+').filter(|f| !f.is_empty())
    }

    pub fn contains(&self, flag: &str) -> bool {
        self.flags().any(|f| f == flag)
    }
}

impl Default for EditType {
    fn default() -> Self {
        Self::CALC
    }
}

impl fmt::Display for EditType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A recorded assignment, relative to the node it was drained from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Change {
    /// Property path, e.g. `x.show` or `annotations[0].text`
    pub path: String,
    /// Edit type of the assigned field; `None` for pass-through keys
    pub edit_type: Option<EditType>,
    /// New plain value; `null` when the field was cleared
    pub value: Value,
}

impl Change {
    pub(crate) fn new(path: impl Into<String>, edit_type: Option<EditType>, value: Value) -> Self {
        Self {
            path: path.into(),
            edit_type,
            value,
        }
    }

    /// Re-root the change under a parent field
    pub(crate) fn prefixed(mut self, prefix: &str) -> Self {
        self.path = format!("{}.{}", prefix, self.path);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_type_flags() {
        let edit = EditType::new("ticks+margins");
        assert_eq!(edit.flags().collect::<Vec<_>>(), vec!["ticks", "margins"]);
        assert!(edit.contains("margins"));
        assert!(!edit.contains("calc"));
    }

    #[test]
    fn test_change_prefix() {
        let change = Change::new("show", Some(EditType::CALC), Value::Bool(true)).prefixed("x");
        assert_eq!(change.path, "x.show");
    }
}
