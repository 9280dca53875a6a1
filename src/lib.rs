#![doc(test(attr(deny(warnings))))]

//! Tracker Core computes per-client budget status for the agency dashboard:
//! month and quarter spend against a committed budget, rollover credit, and
//! the carousel that pages through the months of the active quarter.

pub mod calendar;
pub mod cli;
pub mod config;
pub mod currency;
pub mod errors;
pub mod source;
pub mod tracker;
pub mod utils;
pub mod view;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Tracker Core tracing initialized.");
    });
}
