//! kakeibo-domain
//!
//! Pure domain models (Expense, Category, TimeWindow, budget judgements).
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod budget;
pub mod category;
pub mod common;
pub mod expense;
pub mod window;

pub use budget::*;
pub use category::*;
pub use common::*;
pub use expense::*;
pub use window::*;
