//! # List Requests
//!
//! JSON front door to the query engine: decode a request, validate it into a
//! `ListQuery`, run it against the collection it names.
//!
//! ## Collections
//!
//! - `charges`: records decode as `WaterCharge`, amounts defaulted
//! - `payments`: records decode as `Payment`, amounts defaulted
//! - `records`: raw JSON objects read through `fields`

mod decode;
mod errors;
mod handler;

pub use decode::{Collection, ListRequest};
pub use errors::{ErrorBody, RequestError, RequestResult};
pub use handler::{HandleStats, RequestHandler};
