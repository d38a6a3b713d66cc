//! Enumerated values
//!
//! A field whose value must be exactly one of a fixed, ordered set. String
//! entries written as `/.../` are regular expressions, used for families such
//! as axis references (`x`, `x2`, `x3`, ...).

use regex::Regex;
use serde_json::Value;

use super::{describe_value, each_element, Rejection};

#[derive(Debug, Clone)]
enum Permitted {
    Literal(Value),
    Pattern { source: String, regex: Regex },
}

impl Permitted {
    fn matches(&self, value: &Value) -> bool {
        match self {
            Permitted::Literal(Value::Number(n)) => value.as_f64().is_some_and(|v| n.as_f64() == Some(v)),
            Permitted::Literal(lit) => lit == value,
            Permitted::Pattern { regex, .. } => value.as_str().is_some_and(|s| regex.is_match(s)),
        }
    }

    fn display(&self) -> String {
        match self {
            Permitted::Literal(Value::String(s)) => format!("'{}'", s),
            Permitted::Literal(other) => other.to_string(),
            Permitted::Pattern { source, .. } => format!("/{}/", source),
        }
    }
}

/// Permitted-set rules for an enumerated field
#[derive(Debug, Clone)]
pub struct Enumerated {
    values: Vec<Permitted>,
    array_ok: bool,
}

impl Enumerated {
    /// Build from literal values. Strings of the form `/pattern/` become
    /// regex entries.
    ///
    /// # Panics
    /// If a pattern entry is not a valid regex. Schema tables are static, so
    /// this surfaces on first use of the node type.
    pub fn new(values: Vec<Value>) -> Self {
        let values = values
            .into_iter()
            .map(|v| match v.as_str().and_then(as_pattern) {
                Some(source) => Permitted::Pattern {
                    regex: Regex::new(source).expect("enumeration pattern must be a valid regex"),
                    source: source.to_string(),
                },
                None => Permitted::Literal(v),
            })
            .collect();
        Self {
            values,
            array_ok: false,
        }
    }

    pub fn from_strs(values: &[&str]) -> Self {
        Self::new(values.iter().map(|s| Value::String(s.to_string())).collect())
    }

    pub fn array_ok(mut self) -> Self {
        self.array_ok = true;
        self
    }

    /// The permitted set as displayed in error messages
    pub fn permitted(&self) -> Vec<String> {
        self.values.iter().map(Permitted::display).collect()
    }

    pub fn is_permitted(&self, value: &Value) -> bool {
        self.values.iter().any(|p| p.matches(value))
    }

    pub(crate) fn coerce(&self, value: Value) -> Result<Value, Rejection> {
        each_element(value, self.array_ok, |v| {
            if self.is_permitted(&v) {
                Ok(v)
            } else {
                let permitted = self.permitted();
                Err(Rejection::new(format!(
                    "received {}, expected one of: {}",
                    describe_value(&v),
                    permitted.join(", ")
                ))
                .with_allowed(permitted))
            }
        })
    }
}

fn as_pattern(s: &str) -> Option<&str> {
    if s.len() >= 2 && s.starts_with('/') && s.ends_with('/') {
        Some(&s[1..s.len() - 1])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn exponentformat() -> Enumerated {
        Enumerated::from_strs(&["none", "e", "E", "power", "SI", "B"])
    }

    #[test]
    fn test_exact_match_only() {
        let rules = exponentformat();
        assert_eq!(rules.coerce(json!("E")).unwrap(), json!("E"));
        assert_eq!(rules.coerce(json!("e")).unwrap(), json!("e"));
        assert!(rules.coerce(json!("e2")).is_err());
        assert!(rules.coerce(json!("si")).is_err());
        assert!(rules.coerce(json!(" E")).is_err());
    }

    #[test]
    fn test_rejection_lists_permitted_set() {
        let err = exponentformat().coerce(json!("e2")).unwrap_err();
        assert_eq!(err.allowed, vec!["'none'", "'e'", "'E'", "'power'", "'SI'", "'B'"]);
        assert!(err.reason.contains("'e2'"));
    }

    #[test]
    fn test_mixed_literals() {
        let rules = Enumerated::new(vec![json!(true), json!(false), json!("reversed")]);
        assert!(rules.coerce(json!(true)).is_ok());
        assert!(rules.coerce(json!("reversed")).is_ok());
        assert!(rules.coerce(json!("true")).is_err());
    }

    #[test]
    fn test_numeric_literals_compare_by_value() {
        let rules = Enumerated::new(vec![json!(0), json!(1), json!("auto")]);
        assert_eq!(rules.coerce(json!(1.0)).unwrap(), json!(1.0));
        assert!(rules.coerce(json!(0.0)).is_ok());
        assert!(rules.coerce(json!(1.5)).is_err());
        assert!(rules.coerce(json!("1")).is_err());
        assert!(rules.coerce(json!(true)).is_err());
    }

    #[test]
    fn test_pattern_entries() {
        let rules = Enumerated::from_strs(&["free", "/^y([2-9]|[1-9][0-9]+)?$/"]);
        assert!(rules.coerce(json!("y")).is_ok());
        assert!(rules.coerce(json!("y2")).is_ok());
        assert!(rules.coerce(json!("y10")).is_ok());
        assert!(rules.coerce(json!("free")).is_ok());
        assert!(rules.coerce(json!("y1")).is_err());
        assert!(rules.coerce(json!("x")).is_err());
    }

    #[test]
    fn test_array_ok() {
        let rules = exponentformat().array_ok();
        assert!(rules.coerce(json!(["e", "E"])).is_ok());
        let err = rules.coerce(json!(["e", "bogus"])).unwrap_err();
        assert!(err.reason.starts_with("element 1"));

        assert!(exponentformat().coerce(json!(["e"])).is_err());
    }
}
