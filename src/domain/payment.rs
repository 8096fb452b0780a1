//! Payments (pagos)

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::de;
use super::ledger::{number_value, text_value, LedgerEntry};
use crate::predicate::FieldSource;

/// One payment received from a customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// Payment id
    #[serde(deserialize_with = "de::string_or_number")]
    pub id: String,

    /// Payment date or datetime
    #[serde(default, deserialize_with = "de::optional_text")]
    pub fecha: Option<String>,

    /// Payment status
    #[serde(default, deserialize_with = "de::optional_text")]
    pub estado: Option<String>,

    /// Amount paid
    #[serde(default, deserialize_with = "de::optional_amount")]
    pub monto: Option<f64>,

    /// Customer name
    #[serde(default, deserialize_with = "de::optional_text")]
    pub cliente: Option<String>,

    /// Payment method (efectivo, transferencia, ...)
    #[serde(default, deserialize_with = "de::optional_text")]
    pub metodo: Option<String>,
}

impl LedgerEntry for Payment {
    fn fecha(&self) -> Option<&str> {
        self.fecha.as_deref()
    }

    fn estado(&self) -> Option<&str> {
        self.estado.as_deref()
    }

    fn amount(&self) -> Option<f64> {
        self.monto
    }

    fn set_amount(&mut self, amount: f64) {
        self.monto = Some(amount);
    }
}

impl FieldSource for Payment {
    fn field(&self, name: &str) -> Option<Cow<'_, Value>> {
        let value = match name {
            "id" => Value::String(self.id.clone()),
            "fecha" => text_value(self.fecha.as_deref()),
            "estado" => text_value(self.estado.as_deref()),
            "monto" => number_value(self.monto),
            "cliente" => text_value(self.cliente.as_deref()),
            "metodo" => text_value(self.metodo.as_deref()),
            _ => return None,
        };
        Some(Cow::Owned(value))
    }
}
