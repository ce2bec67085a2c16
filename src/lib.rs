#![doc(test(attr(deny(warnings))))]

//! Proration Core splits a monthly recurring charge (management fee, reserve
//! fund, rent) between the seller and the buyer of a property around the
//! settlement date, and ships the shell that collects those inputs.
//!
//! ```
//! use proration_core::{calendar::SettlementDate, proration::prorate};
//!
//! let date = SettlementDate::parse("2025-01-11").unwrap();
//! let result = prorate(date, 10000.0);
//! assert_eq!((result.seller_days, result.buyer_days), (10, 21));
//! assert_eq!((result.seller_amount, result.buyer_amount), (3226, 6774));
//! ```

pub mod calendar;
pub mod cli;
pub mod config;
pub mod currency;
pub mod errors;
pub mod input;
pub mod proration;
pub mod report;
pub mod session;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Proration Core tracing initialized.");
    });
}
