//! kakeibo-core
//!
//! Ledger and budget services for kakeibo.
//! Depends on kakeibo-domain. No CLI, no terminal I/O; persistence goes through [`ExpenseStore`].

pub mod budget_service;
pub mod error;
pub mod ledger_service;
pub mod memory_store;
pub mod storage;
pub mod time;

pub use budget_service::*;
pub use error::CoreError;
pub use ledger_service::*;
pub use memory_store::InMemoryExpenseStore;
pub use storage::ExpenseStore;
pub use time::{Clock, FixedClock};

pub type CoreResult<T> = Result<T, CoreError>;
