//! Daily allowance derivation and the over/under judgement.

use chrono::NaiveDate;
use kakeibo_domain::{DailyReport, Judgement, LimitBasis, Verdict};
use tracing::debug;

use crate::{ledger_service::LedgerService, time::days_left_in_month, CoreError};

/// `amount / days_remaining`, or zero when no days remain.
pub fn daily_limit(amount: i64, days_remaining: i64) -> f64 {
    if days_remaining > 0 {
        amount as f64 / days_remaining as f64
    } else {
        0.0
    }
}

/// Spending equal to the limit still counts as OK.
pub fn judge(spent_today: i64, limit: f64) -> Verdict {
    let spent = spent_today as f64;
    if spent <= limit {
        Verdict {
            judgement: Judgement::Ok,
            overage: 0.0,
        }
    } else {
        Verdict {
            judgement: Judgement::Over,
            overage: spent - limit,
        }
    }
}

/// Figures a limit policy may draw on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BudgetInputs {
    pub days_remaining: i64,
    pub spent_today: i64,
    pub month_spent_before_today: i64,
}

/// Decides which amount gets spread over the remaining days.
pub trait LimitPolicy: Send + Sync {
    fn basis(&self) -> LimitBasis;

    fn basis_amount(&self, inputs: &BudgetInputs) -> i64;

    fn daily_limit(&self, inputs: &BudgetInputs) -> f64 {
        daily_limit(self.basis_amount(inputs), inputs.days_remaining)
    }
}

/// Spreads the monthly savings goal evenly over the remaining days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavingsGoalPolicy {
    pub goal: i64,
}

impl LimitPolicy for SavingsGoalPolicy {
    fn basis(&self) -> LimitBasis {
        LimitBasis::SavingsGoal
    }

    fn basis_amount(&self, _inputs: &BudgetInputs) -> i64 {
        self.goal
    }
}

/// Spreads what is left of income after fixed costs, savings and earlier spending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpendablePolicy {
    pub income: i64,
    pub fixed_costs: i64,
    pub goal_saving: i64,
}

impl SpendablePolicy {
    pub fn spendable(&self) -> i64 {
        self.income
            .saturating_sub(self.fixed_costs)
            .saturating_sub(self.goal_saving)
            .max(0)
    }

    pub fn remaining_budget(&self, month_spent: i64) -> i64 {
        self.spendable().saturating_sub(month_spent).max(0)
    }
}

impl LimitPolicy for SpendablePolicy {
    fn basis(&self) -> LimitBasis {
        LimitBasis::RemainingBudget
    }

    fn basis_amount(&self, inputs: &BudgetInputs) -> i64 {
        self.remaining_budget(inputs.month_spent_before_today)
    }
}

/// Applies a [`LimitPolicy`] and the shared judgement rule.
pub struct BudgetCalculator {
    policy: Box<dyn LimitPolicy>,
}

impl BudgetCalculator {
    pub fn new(policy: Box<dyn LimitPolicy>) -> Self {
        Self { policy }
    }

    pub fn savings_goal(goal: i64) -> Self {
        Self::new(Box::new(SavingsGoalPolicy { goal }))
    }

    pub fn policy(&self) -> &dyn LimitPolicy {
        self.policy.as_ref()
    }

    pub fn evaluate(&self, inputs: &BudgetInputs) -> DailyReport {
        let basis_amount = self.policy.basis_amount(inputs);
        let limit = self.policy.daily_limit(inputs);
        let verdict = judge(inputs.spent_today, limit);
        DailyReport {
            basis: self.policy.basis(),
            basis_amount,
            days_remaining: inputs.days_remaining,
            limit,
            spent_today: inputs.spent_today,
            judgement: verdict.judgement,
            overage: verdict.overage,
        }
    }
}

/// Gathers today's figures from the ledger and evaluates them.
pub struct BudgetService;

impl BudgetService {
    /// `days_remaining` falls back to the days left in `today`'s month, today included.
    pub fn daily_report(
        ledger: &LedgerService,
        calculator: &BudgetCalculator,
        today: NaiveDate,
        days_remaining: Option<i64>,
    ) -> Result<DailyReport, CoreError> {
        let inputs = BudgetInputs {
            days_remaining: days_remaining.unwrap_or_else(|| days_left_in_month(today)),
            spent_today: ledger.spent_on(today)?,
            month_spent_before_today: ledger.month_spent_before(today)?,
        };
        let report = calculator.evaluate(&inputs);
        debug!(
            limit = report.limit,
            spent = report.spent_today,
            judgement = %report.judgement,
            "evaluated daily budget"
        );
        Ok(report)
    }
}
