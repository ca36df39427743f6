#![doc(test(attr(deny(warnings))))]

//! kakeibo records daily expenses and judges each day's spending against a
//! savings-driven allowance. The library wires configuration, storage backends and
//! the interactive shell around the `kakeibo-*` crates.

pub mod cli;
pub mod config;
pub mod core;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("kakeibo tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
