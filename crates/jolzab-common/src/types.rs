use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sentinel value emitted for an attribute read that did not succeed.
///
/// Forwarded like any other value so the backend can alert on it.
pub const ERROR_VALUE: &str = "Err";

/// One management-bean attribute query, as written in the target list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSpec {
    pub mbean: String,
    pub attribute: String,
    /// Optional sub-path inside the attribute; empty when omitted.
    #[serde(default)]
    pub path: String,
}

/// One canonical output unit: a flat metric key plus the raw attribute
/// value as returned by the endpoint (or [`ERROR_VALUE`] on a failed
/// read).
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSample {
    pub key: String,
    pub value: Value,
}

impl MetricSample {
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    /// A sample carrying the failure sentinel instead of a reading.
    pub fn error(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Value::String(ERROR_VALUE.to_string()),
        }
    }

    /// Renders the value the way the sink expects: JSON strings
    /// unquoted, everything else in compact JSON form.
    ///
    /// # Examples
    ///
    /// ```
    /// use jolzab_common::types::MetricSample;
    /// use serde_json::json;
    ///
    /// assert_eq!(MetricSample::new("k", json!("42")).value_text(), "42");
    /// assert_eq!(MetricSample::new("k", json!(17.5)).value_text(), "17.5");
    /// assert_eq!(MetricSample::new("k", json!({"used": 1})).value_text(), "{\"used\":1}");
    /// ```
    pub fn value_text(&self) -> String {
        match &self.value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}
