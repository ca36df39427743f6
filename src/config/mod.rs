use std::path::PathBuf;

use chrono::FixedOffset;
pub use kakeibo_config::{Config, ConfigError, ConfigManager, MonthlyPlan, StorageBackendKind};
use kakeibo_core::{
    time, BudgetCalculator, CoreError, LimitPolicy, SavingsGoalPolicy, SpendablePolicy,
};

pub fn manager_with_base(base: PathBuf) -> Result<ConfigManager, ConfigError> {
    ConfigManager::with_base_dir(base)
}

/// A monthly plan switches the allowance to what is left of income; otherwise the goal is spread.
pub fn limit_policy(config: &Config) -> Box<dyn LimitPolicy> {
    match config.monthly_plan {
        Some(plan) => Box::new(SpendablePolicy {
            income: plan.income,
            fixed_costs: plan.fixed_costs,
            goal_saving: config.savings_goal,
        }),
        None => Box::new(SavingsGoalPolicy {
            goal: config.savings_goal,
        }),
    }
}

pub fn budget_calculator(config: &Config) -> BudgetCalculator {
    BudgetCalculator::new(limit_policy(config))
}

pub fn civil_offset(config: &Config) -> Result<FixedOffset, CoreError> {
    time::civil_offset(config.utc_offset_hours)
}
