use std::cmp::Reverse;

use kakeibo_domain::{Expense, ExpenseId, NewExpense, TimeWindow};

use crate::CoreError;

/// Abstraction over persistence backends holding the expense table.
///
/// Backends persist what they are given; business rules are enforced by
/// [`crate::LedgerService`] before a call reaches the store.
pub trait ExpenseStore: Send + Sync {
    /// Short backend label used in logs and `config` output.
    fn backend_name(&self) -> &'static str;

    /// Persists `expense` under a fresh id that has never been handed out before.
    fn insert(&self, expense: &NewExpense) -> Result<Expense, CoreError>;

    /// Removes the record, failing with [`CoreError::NotFound`] when absent.
    fn remove(&self, id: ExpenseId) -> Result<Expense, CoreError>;

    /// Records inside `window`, most recent first.
    fn list_in_range(&self, window: &TimeWindow) -> Result<Vec<Expense>, CoreError>;

    /// Total amount inside `window`; zero when nothing matches.
    fn sum_in_range(&self, window: &TimeWindow) -> Result<i64, CoreError> {
        checked_total(self.list_in_range(window)?.iter().map(|expense| expense.amount))
    }

    fn count(&self) -> Result<usize, CoreError>;
}

/// Adds amounts, failing with [`CoreError::total_overflow`] instead of wrapping.
pub fn checked_total(amounts: impl IntoIterator<Item = i64>) -> Result<i64, CoreError> {
    amounts
        .into_iter()
        .try_fold(0i64, |total, amount| total.checked_add(amount))
        .ok_or_else(CoreError::total_overflow)
}

/// Orders records most recent first, newer ids first on equal timestamps.
pub fn sort_most_recent_first(expenses: &mut [Expense]) {
    expenses.sort_by_key(|expense| Reverse((expense.timestamp, expense.id)));
}

/// Selects the records inside `window` in display order.
pub fn select_in_window<'a>(
    expenses: impl IntoIterator<Item = &'a Expense>,
    window: &TimeWindow,
) -> Vec<Expense> {
    let mut selected: Vec<Expense> = expenses
        .into_iter()
        .filter(|expense| window.contains(expense.timestamp))
        .cloned()
        .collect();
    sort_most_recent_first(&mut selected);
    selected
}
