//! Record accessors
//!
//! The engine never inspects records directly. An accessor tells it where a
//! record keeps its timestamp, its categorical value and (optionally) its
//! numeric amount. Anything missing or unparseable comes back as None.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::range::parse_timestamp;

/// Field extraction used by the engine
pub trait RecordAccessor<R: ?Sized> {
    /// Record timestamp, None if missing or unparseable
    fn timestamp(&self, record: &R) -> Option<NaiveDateTime>;

    /// Categorical (status) value, None if missing
    fn category<'r>(&self, record: &'r R) -> Option<&'r str>;

    /// Numeric amount used for sums
    fn amount(&self, _record: &R) -> Option<f64> {
        None
    }
}

impl<R: ?Sized, A: RecordAccessor<R> + ?Sized> RecordAccessor<R> for &A {
    fn timestamp(&self, record: &R) -> Option<NaiveDateTime> {
        (**self).timestamp(record)
    }

    fn category<'r>(&self, record: &'r R) -> Option<&'r str> {
        (**self).category(record)
    }

    fn amount(&self, record: &R) -> Option<f64> {
        (**self).amount(record)
    }
}

/// Accessor for raw JSON objects, addressed by field name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonAccessor {
    /// Field holding the timestamp
    #[serde(default = "default_timestamp_field")]
    pub timestamp_field: String,
    /// Field holding the status
    #[serde(default = "default_category_field")]
    pub category_field: String,
    /// Field holding the amount, if sums are wanted
    #[serde(default)]
    pub amount_field: Option<String>,
}

fn default_timestamp_field() -> String {
    "fecha".to_string()
}

fn default_category_field() -> String {
    "estado".to_string()
}

impl Default for JsonAccessor {
    fn default() -> Self {
        Self {
            timestamp_field: default_timestamp_field(),
            category_field: default_category_field(),
            amount_field: None,
        }
    }
}

impl JsonAccessor {
    /// Accessor over the given timestamp and category fields
    pub fn new(timestamp_field: impl Into<String>, category_field: impl Into<String>) -> Self {
        Self {
            timestamp_field: timestamp_field.into(),
            category_field: category_field.into(),
            amount_field: None,
        }
    }

    /// Adds an amount field
    pub fn with_amount(mut self, amount_field: impl Into<String>) -> Self {
        self.amount_field = Some(amount_field.into());
        self
    }
}

impl RecordAccessor<Value> for JsonAccessor {
    fn timestamp(&self, record: &Value) -> Option<NaiveDateTime> {
        match record.get(&self.timestamp_field)? {
            Value::String(s) => parse_timestamp(s),
            // Epoch milliseconds
            Value::Number(n) => n
                .as_i64()
                .and_then(DateTime::from_timestamp_millis)
                .map(|at| at.naive_utc()),
            _ => None,
        }
    }

    fn category<'r>(&self, record: &'r Value) -> Option<&'r str> {
        record.get(&self.category_field)?.as_str()
    }

    fn amount(&self, record: &Value) -> Option<f64> {
        let field = self.amount_field.as_deref()?;
        lenient_amount(record.get(field)?)
    }
}

/// Reads a JSON number or numeric string as a finite amount
pub fn lenient_amount(value: &Value) -> Option<f64> {
    let amount = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    amount.is_finite().then_some(amount)
}
