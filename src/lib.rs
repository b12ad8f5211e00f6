#![doc(test(attr(deny(warnings))))]

//! Ticket Core reports the lifecycle of a wallet's stake tickets: which are
//! still maturing, live in the pool, voted, or expired, and how long they waited.

pub mod cli;
pub mod errors;
pub mod report;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing at the default level and emits a startup debug log.
pub fn init() {
    init_with_level("info");
}

/// Initializes global tracing with `level` as the crate's default directive.
pub fn init_with_level(level: &str) {
    INIT_TRACING.call_once(|| {
        utils::init_tracing(level);
        tracing::debug!("Ticket Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init_with_level("debug");
    }
}
