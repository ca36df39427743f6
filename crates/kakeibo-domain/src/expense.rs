//! Expense records and the submissions that create them.

use std::fmt;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::category::Category;

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Default,
)]
#[serde(transparent)]
/// Identifier assigned by the store when an expense is recorded.
pub struct ExpenseId(pub i64);

impl ExpenseId {
    /// Placeholder value the entry form starts with; never assigned to a record.
    pub const PLACEHOLDER: ExpenseId = ExpenseId(0);

    pub fn value(self) -> i64 {
        self.0
    }

    pub fn is_placeholder(self) -> bool {
        self == Self::PLACEHOLDER
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ExpenseId {
    fn from(value: i64) -> Self {
        ExpenseId(value)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Expense {
    pub id: ExpenseId,
    pub timestamp: DateTime<Utc>,
    pub category: Category,
    pub amount: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

impl Expense {
    /// Materialises a stored record from a submission and its assigned id.
    pub fn from_new(id: ExpenseId, new: &NewExpense) -> Self {
        Self {
            id,
            timestamp: new.timestamp,
            category: new.category,
            amount: new.amount,
            memo: new.memo.clone(),
        }
    }
}

/// A user submission that has not been assigned an id yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewExpense {
    pub timestamp: DateTime<Utc>,
    pub category: Category,
    pub amount: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

impl NewExpense {
    /// Builds a submission, truncating the timestamp to whole seconds and dropping blank memos.
    pub fn new(
        timestamp: DateTime<Utc>,
        category: Category,
        amount: i64,
        memo: Option<String>,
    ) -> Self {
        let memo = memo
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty());
        Self {
            timestamp: timestamp.trunc_subsecs(0),
            category,
            amount,
            memo,
        }
    }

    pub fn validate(&self) -> Result<(), InvalidExpense> {
        if self.amount < 0 {
            return Err(InvalidExpense::NegativeAmount(self.amount));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Reasons a [`NewExpense`] is rejected before reaching storage.
pub enum InvalidExpense {
    NegativeAmount(i64),
}

impl fmt::Display for InvalidExpense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidExpense::NegativeAmount(amount) => {
                write!(f, "amount must not be negative (got {amount})")
            }
        }
    }
}

impl std::error::Error for InvalidExpense {}
