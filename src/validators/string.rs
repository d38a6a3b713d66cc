//! String validation

use serde_json::Value;

use super::{describe_value, each_element, Rejection};

/// Rules for a string field
#[derive(Debug, Clone, Default)]
pub struct StringRules {
    strict: bool,
    no_blank: bool,
    array_ok: bool,
}

impl StringRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only accept strings; numbers are not converted
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Reject empty and whitespace-only strings
    pub fn no_blank(mut self) -> Self {
        self.no_blank = true;
        self
    }

    pub fn array_ok(mut self) -> Self {
        self.array_ok = true;
        self
    }

    pub(crate) fn coerce(&self, value: Value) -> Result<Value, Rejection> {
        each_element(value, self.array_ok, |v| self.check(v))
    }

    fn check(&self, value: Value) -> Result<Value, Rejection> {
        let s = match value {
            Value::String(s) => s,
            Value::Number(n) if !self.strict => n.to_string(),
            other => {
                let expected = if self.strict { "a string" } else { "a string or number" };
                return Err(Rejection::new(format!(
                    "received {}, expected {}",
                    describe_value(&other),
                    expected
                )));
            }
        };
        if self.no_blank && s.trim().is_empty() {
            return Err(Rejection::new("received a blank string, expected a non-blank string"));
        }
        Ok(Value::String(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numbers_coerced_when_lenient() {
        let rules = StringRules::new();
        assert_eq!(rules.coerce(json!(12)).unwrap(), json!("12"));
        assert_eq!(rules.coerce(json!("abc")).unwrap(), json!("abc"));
        assert!(rules.coerce(json!(false)).is_err());
    }

    #[test]
    fn test_strict_rejects_numbers() {
        let rules = StringRules::new().strict();
        assert!(rules.coerce(json!(12)).is_err());
    }

    #[test]
    fn test_no_blank() {
        let rules = StringRules::new().no_blank();
        assert!(rules.coerce(json!("   ")).is_err());
        assert!(rules.coerce(json!("Arial")).is_ok());
    }
}
