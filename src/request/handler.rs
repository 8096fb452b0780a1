//! # Request Handler
//!
//! Runs a decoded `ListRequest` through the engine with the record type its
//! collection names.
//!
//! Flow:
//! 1. Validate paging and dates into a `ListQuery`
//! 2. Decode records (typed collections only)
//! 3. Fill missing amounts with the configured default (typed collections)
//! 4. Query with the request's predicates as the free predicate
//! 5. Serialize the result

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::config::Config;
use crate::domain::{fill_default_amount, LedgerAccessor, LedgerEntry, Payment, WaterCharge};
use crate::observability::Event;
use crate::predicate::FieldSource;
use crate::query::{ListQuery, ListQueryEngine, QueryResult};

use super::decode::{Collection, ListRequest};
use super::errors::{RequestError, RequestResult};

/// Counters reported alongside a handled request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HandleStats {
    pub input: usize,
    pub matching: usize,
    pub visible: usize,
    pub amounts_defaulted: usize,
}

/// Handles list requests against a fixed configuration
pub struct RequestHandler<'a> {
    config: &'a Config,
}

impl<'a> RequestHandler<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Parses and handles one request line
    pub fn handle_line(&self, line: &str) -> RequestResult<(Value, HandleStats)> {
        let request = ListRequest::from_json(line)?;
        self.handle(&request)
    }

    /// Handles a decoded request, returning the serialized result
    pub fn handle(&self, request: &ListRequest) -> RequestResult<(Value, HandleStats)> {
        let query = request.to_query(self.config)?;

        match request.collection {
            Collection::Charges => self.handle_ledger::<WaterCharge>(request, &query),
            Collection::Payments => self.handle_ledger::<Payment>(request, &query),
            Collection::Records => {
                let engine = ListQueryEngine::new(&request.fields);
                let result = engine.query_where(&request.records, &query, |r| {
                    request.predicates.matches(r)
                });
                let stats = stats_for(&result, request.records.len(), 0);
                Ok((to_value(&result)?, stats))
            }
        }
    }

    fn handle_ledger<E>(
        &self,
        request: &ListRequest,
        query: &ListQuery,
    ) -> RequestResult<(Value, HandleStats)>
    where
        E: LedgerEntry + FieldSource + DeserializeOwned + Serialize + Clone,
    {
        let mut records: Vec<E> = decode_records(&request.records)?;

        let defaulted = fill_default_amount(&mut records, self.config.default_amount);
        if defaulted > 0 {
            Event::AmountsDefaulted.log(&[
                ("collection", request.collection.as_str()),
                ("count", &defaulted.to_string()),
                ("default_amount", &self.config.default_amount.to_string()),
            ]);
        }

        let engine = ListQueryEngine::new(LedgerAccessor);
        let result = engine.query_where(&records, query, |r| request.predicates.matches(r));
        let stats = stats_for(&result, records.len(), defaulted);

        Ok((to_value(&result)?, stats))
    }
}

fn decode_records<E: DeserializeOwned>(raw: &[Value]) -> RequestResult<Vec<E>> {
    raw.iter()
        .enumerate()
        .map(|(index, value)| {
            E::deserialize(value).map_err(|e| RequestError::InvalidRecord {
                index,
                reason: e.to_string(),
            })
        })
        .collect()
}

fn stats_for<R>(result: &QueryResult<R>, input: usize, amounts_defaulted: usize) -> HandleStats {
    HandleStats {
        input,
        matching: result.total_matching,
        visible: result.len(),
        amounts_defaulted,
    }
}

fn to_value<T: Serialize>(value: &T) -> RequestResult<Value> {
    serde_json::to_value(value).map_err(|e| RequestError::Malformed(e.to_string()))
}
