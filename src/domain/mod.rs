//! Domain records served by the admin list views
//!
//! - `WaterCharge`: cargas de agua, amount field `costo`
//! - `Payment`: pagos, amount field `monto`
//!
//! Both read `fecha` as timestamp and `estado` as status through
//! `LedgerAccessor`. Missing amounts are filled by `fill_default_amount`
//! before querying, never by the engine.

mod charge;
mod de;
mod ledger;
mod payment;

pub use charge::WaterCharge;
pub use ledger::{fill_default_amount, LedgerAccessor, LedgerEntry};
pub use payment::Payment;
