//! Shared view over dated, priced, status-carrying records

use chrono::NaiveDateTime;
use serde_json::{Number, Value};

use crate::query::{parse_timestamp, RecordAccessor};

/// A dated record with a status and an optional amount
pub trait LedgerEntry {
    /// Raw `fecha` text, if any
    fn fecha(&self) -> Option<&str>;

    /// Status (`estado`), if any
    fn estado(&self) -> Option<&str>;

    /// Amount (`costo` for charges, `monto` for payments)
    fn amount(&self) -> Option<f64>;

    /// Replaces the amount
    fn set_amount(&mut self, amount: f64);
}

/// Accessor that reads any `LedgerEntry`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LedgerAccessor;

impl<E: LedgerEntry> RecordAccessor<E> for LedgerAccessor {
    fn timestamp(&self, record: &E) -> Option<NaiveDateTime> {
        record.fecha().and_then(parse_timestamp)
    }

    fn category<'r>(&self, record: &'r E) -> Option<&'r str> {
        record.estado()
    }

    fn amount(&self, record: &E) -> Option<f64> {
        record.amount()
    }
}

/// Fills missing amounts with `default`, returning how many were filled.
///
/// Runs before querying; the engine itself never invents amounts.
pub fn fill_default_amount<E: LedgerEntry>(records: &mut [E], default: f64) -> usize {
    let mut filled = 0;
    for record in records.iter_mut() {
        if record.amount().is_none() {
            record.set_amount(default);
            filled += 1;
        }
    }
    filled
}

pub(crate) fn text_value(text: Option<&str>) -> Value {
    text.map_or(Value::Null, |s| Value::String(s.to_string()))
}

pub(crate) fn number_value(number: Option<f64>) -> Value {
    number
        .and_then(Number::from_f64)
        .map_or(Value::Null, Value::Number)
}
