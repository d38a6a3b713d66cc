//! Property paths
//!
//! Two spellings address a nested property:
//! - dotted, with optional indices: `title.font.size`, `annotations[1].text`
//! - magic underscore: `title_font_size`
//!
//! Dotted paths parse without a schema. Underscore keys are ambiguous
//! (`paper_bgcolor` is a single field) so they only resolve against a schema,
//! when every segment names a declared field.

use std::fmt;

use crate::error::{Result, SchemaError};
use crate::schema::NodeSchema;

/// One step of a property path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub name: String,
    pub index: Option<usize>,
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(i) => write!(f, "{}[{}]", self.name, i),
            None => write!(f, "{}", self.name),
        }
    }
}

/// A parsed property path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropPath {
    segments: Vec<Segment>,
}

impl PropPath {
    /// Parse a dotted path
    pub fn parse(path: &str) -> Result<Self> {
        let invalid = |reason: &str| SchemaError::InvalidPath {
            path: path.to_string(),
            reason: reason.to_string(),
        };

        if path.is_empty() {
            return Err(invalid("empty path"));
        }

        let mut segments = Vec::new();
        for part in path.split('.') {
            let (name, index) = match part.find('[') {
                Some(open) => {
                    let close = part
                        .strip_suffix(']')
                        .ok_or_else(|| invalid("unterminated index"))?;
                    let index = close[open + 1..]
                        .parse::<usize>()
                        .map_err(|_| invalid("index must be a non-negative integer"))?;
                    (&part[..open], Some(index))
                }
                None => (part, None),
            };
            if name.is_empty() {
                return Err(invalid("empty segment"));
            }
            if name.contains(']') {
                return Err(invalid("unexpected ']'"));
            }
            segments.push(Segment {
                name: name.to_string(),
                index,
            });
        }
        Ok(Self { segments })
    }

    /// Resolve a magic-underscore key against `schema`.
    ///
    /// Declared names may themselves contain underscores, so each segment
    /// takes the shortest run of parts that names a declared field.
    pub fn resolve_underscore(schema: &'static NodeSchema, key: &str) -> Option<Self> {
        let parts: Vec<&str> = key.split('_').collect();
        if parts.len() < 2 || parts.iter().any(|p| p.is_empty()) {
            return None;
        }
        let mut segments = Vec::new();
        if walk_underscore(schema, &parts, &mut segments) && segments.len() > 1 {
            Some(Self { segments })
        } else {
            None
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Whether this path is a plain field name
    pub fn is_simple(&self) -> bool {
        self.segments.len() == 1 && self.segments[0].index.is_none()
    }

    /// First segment and the remaining path, if any
    pub fn split_first(&self) -> (&Segment, Option<PropPath>) {
        let rest = if self.segments.len() > 1 {
            Some(PropPath {
                segments: self.segments[1..].to_vec(),
            })
        } else {
            None
        };
        (&self.segments[0], rest)
    }

    /// Whether every segment names a declared field along the schema chain.
    ///
    /// Walking stops at the first field without a child schema; whatever
    /// follows it is reported as a structural error on assignment.
    pub fn resolves_in(&self, schema: &'static NodeSchema) -> bool {
        let mut current = schema;
        for segment in &self.segments {
            let Some(validator) = current.validator(&segment.name) else {
                return false;
            };
            match validator.child_schema() {
                Some(child) => current = child,
                None => return true,
            }
        }
        true
    }
}

fn walk_underscore(schema: &'static NodeSchema, parts: &[&str], out: &mut Vec<Segment>) -> bool {
    for take in 1..=parts.len() {
        let name = parts[..take].join("_");
        let Some(validator) = schema.validator(&name) else {
            continue;
        };
        out.push(Segment { name, index: None });
        let rest = &parts[take..];
        if rest.is_empty() {
            return true;
        }
        if let Some(child) = validator.child_schema().filter(|_| validator.is_compound()) {
            if walk_underscore(child, rest, out) {
                return true;
            }
        }
        out.pop();
    }
    false
}

impl fmt::Display for PropPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.segments.iter().map(Segment::to_string).collect();
        write!(f, "{}", parts.join("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph_objs::layout::{LAYOUT, XAXIS};

    #[test]
    fn test_parse_dotted() {
        let path = PropPath::parse("annotations[1].font.size").unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path.segments()[0], Segment { name: "annotations".into(), index: Some(1) });
        assert_eq!(path.to_string(), "annotations[1].font.size");
        assert!(PropPath::parse("show").unwrap().is_simple());
    }

    #[test]
    fn test_parse_errors() {
        assert!(PropPath::parse("").is_err());
        assert!(PropPath::parse("a..b").is_err());
        assert!(PropPath::parse("a[x]").is_err());
        assert!(PropPath::parse("a[1").is_err());
        assert!(PropPath::parse("[1]").is_err());
    }

    #[test]
    fn test_underscore_resolution() {
        let path = PropPath::resolve_underscore(&XAXIS, "title_font_size").unwrap();
        assert_eq!(path.to_string(), "title.font.size");

        // a declared name with an underscore is not split
        assert!(PropPath::resolve_underscore(&LAYOUT, "paper_bgcolor").is_none());

        let path = PropPath::resolve_underscore(&LAYOUT, "xaxis_title_text").unwrap();
        assert_eq!(path.to_string(), "xaxis.title.text");

        assert!(PropPath::resolve_underscore(&XAXIS, "title_bogus").is_none());
        assert!(PropPath::resolve_underscore(&XAXIS, "nope").is_none());
    }

    #[test]
    fn test_resolves_in() {
        assert!(PropPath::parse("title.font.size").unwrap().resolves_in(&XAXIS));
        assert!(PropPath::parse("annotations[0].text").unwrap().resolves_in(&LAYOUT));
        assert!(!PropPath::parse("title.bogus").unwrap().resolves_in(&XAXIS));
        assert!(!PropPath::parse("annotations[0].bogus").unwrap().resolves_in(&LAYOUT));
        // scalar fields end the walk
        assert!(PropPath::parse("nticks.x").unwrap().resolves_in(&XAXIS));
    }
}
