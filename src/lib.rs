#![doc(test(attr(deny(warnings))))]

//! Finance Tracker keeps expenses, upcoming payments and category budgets,
//! driven by a slash-parameter command line.

pub mod cli;
pub mod config;
pub mod errors;
pub mod model;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!(
            build = %utils::build_info::current().summary(),
            "Finance Tracker tracing initialized."
        );
    });
}
