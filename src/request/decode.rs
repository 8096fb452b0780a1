//! # Request Decoding
//!
//! Parses a JSON list request and validates it into a `ListQuery`.
//!
//! ```json
//! {
//!   "collection": "charges",
//!   "records": [ ... ],
//!   "from": "2024-03-01",
//!   "to": "2024-03-31",
//!   "status": ["pendiente"],
//!   "page": 1,
//!   "page_size": 6,
//!   "sort": "desc",
//!   "aggregate": true,
//!   "where": [{"field": "cliente", "op": "like", "value": "%ana%"}]
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::Config;
use crate::predicate::PredicateSet;
use crate::query::{DateBound, DateRange, JsonAccessor, ListQuery, Page, SortOrder, StatusFilter};

use super::errors::{RequestError, RequestResult};

/// Which record type the request carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    /// Water charges (`WaterCharge`)
    Charges,
    /// Payments (`Payment`)
    Payments,
    /// Untyped JSON objects, fields named by `fields`
    #[default]
    Records,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Charges => "charges",
            Collection::Payments => "payments",
            Collection::Records => "records",
        }
    }
}

/// A list request as read from the wire
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListRequest {
    #[serde(default)]
    pub collection: Collection,

    #[serde(default)]
    pub records: Vec<Value>,

    /// Inclusive start bound
    #[serde(default)]
    pub from: Option<String>,

    /// Inclusive end bound; a bare date covers the whole day
    #[serde(default)]
    pub to: Option<String>,

    #[serde(default)]
    pub status: Vec<String>,

    #[serde(default = "first_page")]
    pub page: usize,

    /// Falls back to the configured default
    #[serde(default)]
    pub page_size: Option<usize>,

    #[serde(default)]
    pub sort: SortOrder,

    #[serde(default)]
    pub aggregate: bool,

    /// Extra predicates, ANDed with the date and status filters
    #[serde(default, rename = "where")]
    pub predicates: PredicateSet,

    /// Field names for `records` collections
    #[serde(default)]
    pub fields: JsonAccessor,
}

fn first_page() -> usize {
    1
}

impl ListRequest {
    /// Parses a request from JSON text
    pub fn from_json(line: &str) -> RequestResult<Self> {
        Ok(serde_json::from_str(line)?)
    }

    /// Validates paging and dates, producing the engine query
    pub fn to_query(&self, config: &Config) -> RequestResult<ListQuery> {
        let page = self.page(config)?;

        let mut query = ListQuery::new(page).with_sort(self.sort);
        query.status = StatusFilter::only(self.status.iter().cloned());
        query.aggregate = self.aggregate;

        if let Some(range) = self.date_range()? {
            query = query.with_date_range(range);
        }

        Ok(query)
    }

    fn page(&self, config: &Config) -> RequestResult<Page> {
        if self.page == 0 {
            return Err(RequestError::InvalidPage(self.page));
        }

        let size = self.page_size.unwrap_or(config.default_page_size);
        if size == 0 || size > config.max_page_size {
            return Err(RequestError::InvalidPageSize {
                size,
                max: config.max_page_size,
            });
        }

        Page::new(self.page, size).ok_or(RequestError::InvalidPage(self.page))
    }

    /// None when neither bound is given
    fn date_range(&self) -> RequestResult<Option<DateRange>> {
        let start = parse_bound("from", self.from.as_deref())?;
        let end = parse_bound("to", self.to.as_deref())?;

        if start.is_none() && end.is_none() {
            return Ok(None);
        }
        Ok(Some(DateRange::new(start, end)))
    }
}

/// Blank bounds count as unset
fn parse_bound(bound: &'static str, value: Option<&str>) -> RequestResult<Option<DateBound>> {
    let value = match value.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => return Ok(None),
    };

    DateBound::parse(value)
        .map(Some)
        .ok_or_else(|| RequestError::InvalidDate {
            bound,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn config() -> Config {
        Config::default()
    }

    #[test]
    fn test_minimal_request_defaults() {
        let request = ListRequest::from_json("{}").unwrap();
        let query = request.to_query(&config()).unwrap();

        assert_eq!(request.collection, Collection::Records);
        assert_eq!(query.page, Page::new(1, 6).unwrap());
        assert_eq!(query.sort, SortOrder::TimestampDesc);
        assert!(query.date_range.is_none());
        assert!(query.status.is_empty());
        assert!(!query.aggregate);
    }

    #[test]
    fn test_full_request() {
        let request = ListRequest::from_json(
            r#"{
                "collection": "payments",
                "from": "2024-03-01",
                "to": "2024-03-31",
                "status": ["completado"],
                "page": 2,
                "page_size": 10,
                "sort": "input",
                "aggregate": true,
                "where": [{"field": "metodo", "op": "eq", "value": "efectivo"}]
            }"#,
        )
        .unwrap();
        let query = request.to_query(&config()).unwrap();

        assert_eq!(request.collection, Collection::Payments);
        assert_eq!(request.predicates.predicates.len(), 1);
        assert_eq!(query.page, Page::new(2, 10).unwrap());
        assert_eq!(query.sort, SortOrder::Input);
        assert!(query.aggregate);
        assert_eq!(query.status.values().collect::<Vec<_>>(), vec!["completado"]);

        let range = query.date_range.unwrap();
        let end_of_march = NaiveDate::from_ymd_opt(2024, 3, 31)
            .unwrap()
            .and_hms_milli_opt(23, 59, 59, 999)
            .unwrap();
        assert_eq!(range.end(), Some(end_of_march));
    }

    #[test]
    fn test_page_zero_rejected() {
        let request = ListRequest::from_json(r#"{"page": 0}"#).unwrap();
        let err = request.to_query(&config()).unwrap_err();
        assert_eq!(err, RequestError::InvalidPage(0));
    }

    #[test]
    fn test_page_size_bounds() {
        let zero = ListRequest::from_json(r#"{"page_size": 0}"#).unwrap();
        assert_eq!(zero.to_query(&config()).unwrap_err().code(), "PINOS_INVALID_PAGE_SIZE");

        let huge = ListRequest::from_json(r#"{"page_size": 101}"#).unwrap();
        assert_eq!(
            huge.to_query(&config()).unwrap_err(),
            RequestError::InvalidPageSize { size: 101, max: 100 }
        );
    }

    #[test]
    fn test_bad_date_rejected() {
        let request = ListRequest::from_json(r#"{"to": "31/03/2024"}"#).unwrap();
        let err = request.to_query(&config()).unwrap_err();

        assert_eq!(
            err,
            RequestError::InvalidDate {
                bound: "to",
                value: "31/03/2024".to_string()
            }
        );
    }

    #[test]
    fn test_blank_dates_are_unset() {
        let request = ListRequest::from_json(r#"{"from": "", "to": "  "}"#).unwrap();
        let query = request.to_query(&config()).unwrap();
        assert!(query.date_range.is_none());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = ListRequest::from_json(r#"{"pagina": 2}"#).unwrap_err();
        assert_eq!(err.code(), "PINOS_MALFORMED_REQUEST");
    }

    #[test]
    fn test_custom_fields_for_records() {
        let request = ListRequest::from_json(
            r#"{"fields": {"timestamp_field": "created_at", "category_field": "state", "amount_field": "total"}}"#,
        )
        .unwrap();

        assert_eq!(
            request.fields,
            JsonAccessor::new("created_at", "state").with_amount("total")
        );
    }
}
