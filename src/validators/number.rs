//! Numeric range validation

use serde_json::Value;

use super::{describe_value, each_element, Rejection};

/// Inclusive bounds and integer-only flag for a numeric field
#[derive(Debug, Clone, Default)]
pub struct NumberRange {
    min: Option<f64>,
    max: Option<f64>,
    integer: bool,
    array_ok: bool,
}

impl NumberRange {
    pub fn any() -> Self {
        Self::default()
    }

    pub fn between(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            ..Self::default()
        }
    }

    pub fn at_least(min: f64) -> Self {
        Self {
            min: Some(min),
            ..Self::default()
        }
    }

    /// Integer-only variant
    pub fn integer(mut self) -> Self {
        self.integer = true;
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
        let Some(n) = value.as_f64() else {
            return Err(Rejection::new(format!(
                "received {}, expected {}",
                describe_value(&value),
                self.expectation()
            )));
        };
        if self.integer && !(value.is_i64() || value.is_u64()) {
            return Err(Rejection::new(format!(
                "received {}, expected {}",
                describe_value(&value),
                self.expectation()
            )));
        }
        let below = self.min.is_some_and(|min| n < min);
        let above = self.max.is_some_and(|max| n > max);
        if below || above {
            return Err(Rejection::new(format!(
                "received {}, expected {}",
                describe_value(&value),
                self.expectation()
            )));
        }
        Ok(value)
    }

    fn expectation(&self) -> String {
        let kind = if self.integer { "an integer" } else { "a number" };
        match (self.min, self.max) {
            (Some(min), Some(max)) => format!("{} in the interval [{}, {}]", kind, min, max),
            (Some(min), None) => format!("{} greater than or equal to {}", kind, min),
            (None, Some(max)) => format!("{} less than or equal to {}", kind, max),
            (None, None) => kind.to_string(),
        }
    }
}
