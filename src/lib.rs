//! lospinos - list query engine for the Los Pinos water-delivery admin
//!
//! Filters, sorts, pages and totals water charges, payments or any other
//! record collection handed over by the UI layer.

pub mod cli;
pub mod config;
pub mod domain;
pub mod observability;
pub mod predicate;
pub mod query;
pub mod request;
