//! # Field Predicates
//!
//! Free-form predicates for list queries, addressed by field name.
//! A `PredicateSet` ANDs its members and is handed to
//! `ListQueryEngine::query_where`.

use std::borrow::Cow;
use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Anything whose fields can be looked up by name
pub trait FieldSource {
    /// Field value, None when absent
    fn field(&self, name: &str) -> Option<Cow<'_, Value>>;
}

impl FieldSource for Value {
    fn field(&self, name: &str) -> Option<Cow<'_, Value>> {
        self.get(name).map(Cow::Borrowed)
    }
}

/// Predicate operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    /// Equals
    Eq,
    /// Not equals
    Neq,
    /// Greater than
    Gt,
    /// Greater than or equal
    Gte,
    /// Less than
    Lt,
    /// Less than or equal
    Lte,
    /// Case-insensitive pattern, `%` any run, `_` one char
    Like,
    /// Value in list
    In,
    /// `null` = missing or null, anything else = present and not null
    Is,
}

impl Operator {
    /// Get the operator string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "eq",
            Operator::Neq => "neq",
            Operator::Gt => "gt",
            Operator::Gte => "gte",
            Operator::Lt => "lt",
            Operator::Lte => "lte",
            Operator::Like => "like",
            Operator::In => "in",
            Operator::Is => "is",
        }
    }
}

/// A single field predicate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldPredicate {
    /// Field to test
    pub field: String,

    /// Comparison operator
    #[serde(rename = "op")]
    pub operator: Operator,

    /// Value to compare against
    #[serde(default)]
    pub value: Value,
}

impl FieldPredicate {
    /// Create a new predicate
    pub fn new(field: impl Into<String>, operator: Operator, value: Value) -> Self {
        Self {
            field: field.into(),
            operator,
            value,
        }
    }

    /// Create an equality predicate
    pub fn eq(field: impl Into<String>, value: Value) -> Self {
        Self::new(field, Operator::Eq, value)
    }

    /// Create a pattern predicate
    pub fn like(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::new(field, Operator::Like, Value::String(pattern.into()))
    }

    /// Create an "in list" predicate
    pub fn in_list(field: impl Into<String>, values: Vec<Value>) -> Self {
        Self::new(field, Operator::In, Value::Array(values))
    }

    /// Check a record against this predicate.
    ///
    /// A missing field only satisfies `is null` and `neq`.
    pub fn matches<S: FieldSource + ?Sized>(&self, record: &S) -> bool {
        let field = match record.field(&self.field) {
            Some(v) => v,
            None => {
                return match self.operator {
                    Operator::Is => self.value.is_null(),
                    Operator::Neq => true,
                    _ => false,
                }
            }
        };
        let actual: &Value = &field;

        match self.operator {
            Operator::Eq => loose_eq(actual, &self.value),
            Operator::Neq => !loose_eq(actual, &self.value),
            Operator::Gt => compare(actual, &self.value) == Some(Ordering::Greater),
            Operator::Gte => matches!(
                compare(actual, &self.value),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            Operator::Lt => compare(actual, &self.value) == Some(Ordering::Less),
            Operator::Lte => matches!(
                compare(actual, &self.value),
                Some(Ordering::Less | Ordering::Equal)
            ),
            Operator::Like => match (actual.as_str(), self.value.as_str()) {
                (Some(text), Some(pattern)) => like(text, pattern),
                _ => false,
            },
            Operator::In => match self.value.as_array() {
                Some(list) => list.iter().any(|v| loose_eq(actual, v)),
                None => false,
            },
            Operator::Is => {
                if self.value.is_null() {
                    actual.is_null()
                } else {
                    !actual.is_null()
                }
            }
        }
    }
}

/// Equality with numbers compared by value (`30` == `30.0`)
fn loose_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}

/// Ordering for numbers and strings only; mixed types are incomparable
fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

/// Case-insensitive LIKE matching
fn like(text: &str, pattern: &str) -> bool {
    let text: Vec<char> = text.to_lowercase().chars().collect();
    let pattern: Vec<char> = pattern.to_lowercase().chars().collect();
    like_at(&text, &pattern)
}

/// Wildcard match that backtracks only to the last `%` seen
fn like_at(text: &[char], pattern: &[char]) -> bool {
    let (mut t, mut p) = (0, 0);
    // (pattern index of the last `%`, text index it currently absorbs up to)
    let mut star: Option<(usize, usize)> = None;

    while t < text.len() {
        match pattern.get(p) {
            Some('%') => {
                star = Some((p, t));
                p += 1;
            }
            Some(&c) if c == '_' || c == text[t] => {
                t += 1;
                p += 1;
            }
            _ => match star {
                Some((star_p, star_t)) => {
                    star = Some((star_p, star_t + 1));
                    p = star_p + 1;
                    t = star_t + 1;
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|&c| c == '%')
}

/// A set of predicates combined with AND logic
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PredicateSet {
    pub predicates: Vec<FieldPredicate>,
}

impl PredicateSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn and(mut self, predicate: FieldPredicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Check if a record matches all predicates
    pub fn matches<S: FieldSource + ?Sized>(&self, record: &S) -> bool {
        self.predicates.iter().all(|p| p.matches(record))
    }
}

impl From<Vec<FieldPredicate>> for PredicateSet {
    fn from(predicates: Vec<FieldPredicate>) -> Self {
        Self { predicates }
    }
}
