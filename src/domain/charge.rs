//! Water charges (cargas de agua)

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::de;
use super::ledger::{number_value, text_value, LedgerEntry};
use crate::predicate::FieldSource;

/// One water delivery charged to a customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterCharge {
    /// Charge id
    #[serde(deserialize_with = "de::string_or_number")]
    pub id: String,

    /// Delivery date or datetime
    #[serde(default, deserialize_with = "de::optional_text")]
    pub fecha: Option<String>,

    /// Charge status
    #[serde(default, deserialize_with = "de::optional_text")]
    pub estado: Option<String>,

    /// Price of the charge
    #[serde(default, deserialize_with = "de::optional_amount")]
    pub costo: Option<f64>,

    /// Customer name
    #[serde(default, deserialize_with = "de::optional_text")]
    pub cliente: Option<String>,

    /// Delivered volume in liters
    #[serde(default, deserialize_with = "de::optional_amount")]
    pub litros: Option<f64>,
}

impl LedgerEntry for WaterCharge {
    fn fecha(&self) -> Option<&str> {
        self.fecha.as_deref()
    }

    fn estado(&self) -> Option<&str> {
        self.estado.as_deref()
    }

    fn amount(&self) -> Option<f64> {
        self.costo
    }

    fn set_amount(&mut self, amount: f64) {
        self.costo = Some(amount);
    }
}

impl FieldSource for WaterCharge {
    fn field(&self, name: &str) -> Option<Cow<'_, Value>> {
        let value = match name {
            "id" => Value::String(self.id.clone()),
            "fecha" => text_value(self.fecha.as_deref()),
            "estado" => text_value(self.estado.as_deref()),
            "costo" => number_value(self.costo),
            "cliente" => text_value(self.cliente.as_deref()),
            "litros" => number_value(self.litros),
            _ => return None,
        };
        Some(Cow::Owned(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fill_default_amount;
    use serde_json::json;

    #[test]
    fn test_decode_api_payload() {
        let charge: WaterCharge = serde_json::from_value(json!({
            "id": 17,
            "fecha": "2024-05-02T08:15:00",
            "estado": "pendiente",
            "costo": "45.00",
            "cliente": "Rosa Méndez",
            "litros": 20
        }))
        .unwrap();

        assert_eq!(charge.id, "17");
        assert_eq!(charge.costo, Some(45.0));
        assert_eq!(charge.litros, Some(20.0));
        assert_eq!(charge.estado(), Some("pendiente"));
    }

    #[test]
    fn test_decode_sparse_payload() {
        let charge: WaterCharge =
            serde_json::from_value(json!({"id": "c-1", "fecha": "", "costo": null})).unwrap();

        assert_eq!(charge.fecha, None);
        assert_eq!(charge.estado, None);
        assert_eq!(charge.costo, None);
    }

    #[test]
    fn test_missing_id_rejected() {
        let result: Result<WaterCharge, _> = serde_json::from_value(json!({"fecha": "2024-05-02"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_fill_default_amount() {
        let mut charges: Vec<WaterCharge> = serde_json::from_value(json!([
            {"id": 1, "costo": 45},
            {"id": 2},
            {"id": 3, "costo": "n/a"}
        ]))
        .unwrap();

        let filled = fill_default_amount(&mut charges, 30.0);

        assert_eq!(filled, 2);
        assert_eq!(
            charges.iter().map(|c| c.costo).collect::<Vec<_>>(),
            vec![Some(45.0), Some(30.0), Some(30.0)]
        );
    }

    #[test]
    fn test_field_source() {
        let charge: WaterCharge =
            serde_json::from_value(json!({"id": 5, "cliente": "Ana", "costo": 30})).unwrap();

        assert_eq!(*charge.field("cliente").unwrap(), json!("Ana"));
        assert_eq!(*charge.field("costo").unwrap(), json!(30.0));
        assert_eq!(*charge.field("estado").unwrap(), Value::Null);
        assert!(charge.field("monto").is_none());
    }
}
