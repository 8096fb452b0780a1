//! Ledger Request Tests
//!
//! End-to-end tests for the admin list views:
//! - Charges and payments decode from API payloads
//! - Missing amounts are defaulted before querying
//! - Request validation errors carry stable codes
//! - Serve loop answers every line

use std::io::Cursor;

use lospinos::cli;
use lospinos::config::Config;
use lospinos::domain::{fill_default_amount, LedgerAccessor, Payment, WaterCharge};
use lospinos::predicate::{FieldPredicate, PredicateSet};
use lospinos::query::{DateRange, ListQuery, ListQueryEngine, Page, StatusFilter};
use lospinos::request::{RequestError, RequestHandler};
use serde_json::{json, Value};

// =============================================================================
// Helper Functions
// =============================================================================

fn charge_payload() -> Value {
    json!([
        {"id": 101, "fecha": "2024-02-28T09:00:00", "estado": "pagado", "costo": 30, "cliente": "Ana Ruiz", "litros": 20},
        {"id": 102, "fecha": "2024-03-01", "estado": "pendiente", "cliente": "Luis Soto"},
        {"id": 103, "fecha": "2024-03-04T17:30:00", "estado": "pendiente", "costo": "45", "cliente": "Ana Ruiz"},
        {"id": 104, "fecha": "2024-03-31", "estado": "cancelado", "costo": 30, "cliente": "Marta Gil"},
        {"id": 105, "fecha": "2024-04-01T00:00:00", "estado": "pagado", "costo": 30, "cliente": "Luis Soto"}
    ])
}

fn handle(request: Value) -> Result<Value, RequestError> {
    let config = Config::default();
    RequestHandler::new(&config)
        .handle_line(&request.to_string())
        .map(|(data, _)| data)
}

fn record_ids(data: &Value) -> Vec<String> {
    data["records"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap().to_string())
        .collect()
}

// =============================================================================
// Typed Records
// =============================================================================

/// Charges query directly through the typed accessor.
#[test]
fn test_typed_charges_march_pending() {
    let mut charges: Vec<WaterCharge> = serde_json::from_value(charge_payload()).unwrap();
    assert_eq!(fill_default_amount(&mut charges, 30.0), 1);

    let march = DateRange::between(
        chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        chrono::NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
    );
    let query = ListQuery::new(Page::first(6).unwrap())
        .with_date_range(march)
        .with_status(StatusFilter::only(["pendiente"]))
        .aggregated();

    let result = ListQueryEngine::new(LedgerAccessor).query(&charges, &query);

    let ids: Vec<&str> = result.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["103", "102"]);

    let summary = result.summary.unwrap();
    assert_eq!(summary.count, 2);
    assert_eq!(summary.sum, 75.0);
}

/// A predicate set works as the free predicate on typed records.
#[test]
fn test_typed_payments_with_predicates() {
    let payments: Vec<Payment> = serde_json::from_value(json!([
        {"id": 1, "fecha": "2024-03-02", "estado": "completado", "monto": 60, "metodo": "efectivo"},
        {"id": 2, "fecha": "2024-03-03", "estado": "completado", "monto": 90, "metodo": "transferencia"},
        {"id": 3, "fecha": "2024-03-05", "estado": "completado", "monto": 30, "metodo": "efectivo"}
    ]))
    .unwrap();

    let predicates = PredicateSet::new()
        .and(FieldPredicate::eq("metodo", json!("efectivo")))
        .and(FieldPredicate::new("monto", lospinos::predicate::Operator::Gte, json!(50)));

    let query = ListQuery::new(Page::first(10).unwrap());
    let result = ListQueryEngine::new(LedgerAccessor)
        .query_where(&payments, &query, |p| predicates.matches(p));

    assert_eq!(result.total_matching, 1);
    assert_eq!(result.records[0].id, "1");
}

// =============================================================================
// JSON Requests
// =============================================================================

/// Charges request: defaults, filters, sort and summary in one go.
#[test]
fn test_charges_request() {
    let data = handle(json!({
        "collection": "charges",
        "records": charge_payload(),
        "from": "2024-03-01",
        "to": "2024-03-31",
        "aggregate": true
    }))
    .unwrap();

    assert_eq!(record_ids(&data), vec!["104", "103", "102"]);
    assert_eq!(data["total_matching"], 3);
    assert_eq!(data["summary"]["sum"], 105.0);
    assert_eq!(data["summary"]["by_status"]["pendiente"], 2);
    assert_eq!(data["summary"]["by_status"]["cancelado"], 1);
}

/// A timestamp with an offset counts on the day it was recorded.
#[test]
fn test_offset_timestamp_on_last_day_of_range() {
    let data = handle(json!({
        "collection": "payments",
        "records": [
            {"id": 1, "fecha": "2024-03-31T20:00:00-06:00", "estado": "completado", "monto": 60},
            {"id": 2, "fecha": "2024-04-01T01:00:00+02:00", "estado": "completado", "monto": 90}
        ],
        "from": "2024-03-01",
        "to": "2024-03-31"
    }))
    .unwrap();

    assert_eq!(record_ids(&data), vec!["1"]);
}

/// Customer search with a case-insensitive pattern.
#[test]
fn test_charges_customer_search() {
    let data = handle(json!({
        "collection": "charges",
        "records": charge_payload(),
        "where": [{"field": "cliente", "op": "like", "value": "%ana%"}]
    }))
    .unwrap();

    assert_eq!(record_ids(&data), vec!["103", "101"]);
}

/// An out-of-range page is an empty answer, not an error.
#[test]
fn test_out_of_range_page_answers_empty() {
    let data = handle(json!({
        "collection": "charges",
        "records": charge_payload(),
        "page": 9,
        "page_size": 2
    }))
    .unwrap();

    assert_eq!(data["records"], json!([]));
    assert_eq!(data["total_pages"], 3);
    assert_eq!(data["page"]["number"], 9);
}

/// Validation failures carry stable codes.
#[test]
fn test_request_validation_codes() {
    let cases = [
        (json!({"page": 0}), "PINOS_INVALID_PAGE"),
        (json!({"page_size": 1000}), "PINOS_INVALID_PAGE_SIZE"),
        (json!({"from": "ayer"}), "PINOS_INVALID_DATE"),
        (json!({"collection": "payments", "records": [{"monto": 5}]}), "PINOS_INVALID_RECORD"),
        (json!({"collection": "clientes"}), "PINOS_MALFORMED_REQUEST"),
    ];

    for (request, code) in cases {
        let err = handle(request.clone()).unwrap_err();
        assert_eq!(err.code(), code, "request {}", request);
    }
}

// =============================================================================
// Serve Loop
// =============================================================================

/// One response line per request line, in order.
#[test]
fn test_serve_answers_each_line() {
    let requests = [
        json!({"collection": "charges", "records": charge_payload(), "page_size": 2}),
        json!({"collection": "charges", "records": charge_payload(), "page": 3, "page_size": 2}),
        json!({"page": 0}),
    ];
    let input: String = requests.iter().map(|r| format!("{}\n", r)).collect();

    let mut out = Vec::new();
    cli::serve(&Config::default(), &mut Cursor::new(input), &mut out).unwrap();

    let lines: Vec<Value> = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(record_ids(&lines[0]["data"]), vec!["105", "104"]);
    assert_eq!(record_ids(&lines[1]["data"]), vec!["101"]);
    assert_eq!(lines[2]["status"], "error");
}
