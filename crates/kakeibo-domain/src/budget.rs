//! Outcome types produced by the budget calculator.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Whether today's spending stayed inside the daily allowance.
pub enum Judgement {
    Ok,
    Over,
}

impl fmt::Display for Judgement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Judgement::Ok => "OK",
            Judgement::Over => "OVER",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Names the amount the daily limit was divided from.
pub enum LimitBasis {
    SavingsGoal,
    RemainingBudget,
}

impl fmt::Display for LimitBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LimitBasis::SavingsGoal => "goal",
            LimitBasis::RemainingBudget => "remaining budget",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Today's allowance together with the verdict on today's spending.
pub struct DailyReport {
    pub basis: LimitBasis,
    /// Amount divided by `days_remaining` to get `limit`.
    pub basis_amount: i64,
    pub days_remaining: i64,
    pub limit: f64,
    pub spent_today: i64,
    pub judgement: Judgement,
    pub overage: f64,
}

impl DailyReport {
    pub fn is_over(&self) -> bool {
        self.judgement == Judgement::Over
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
/// A judgement plus how far spending went past the limit (zero when within it).
pub struct Verdict {
    pub judgement: Judgement,
    pub overage: f64,
}
