//! Validated access to the expense ledger.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Utc};
use kakeibo_domain::{Category, Expense, ExpenseId, NewExpense, TimeWindow};
use tracing::{debug, info};

use crate::{storage::ExpenseStore, CoreError};

/// Wraps an injected [`ExpenseStore`] with input validation and civil-time queries.
pub struct LedgerService {
    store: Box<dyn ExpenseStore>,
    offset: FixedOffset,
}

impl LedgerService {
    pub fn new(store: Box<dyn ExpenseStore>, offset: FixedOffset) -> Self {
        Self { store, offset }
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }

    /// Records a raw form submission and returns the id it was stored under.
    pub fn add(
        &self,
        timestamp: DateTime<Utc>,
        category: &str,
        amount: i64,
        memo: Option<&str>,
    ) -> Result<ExpenseId, CoreError> {
        let category: Category = category.parse()?;
        let expense = NewExpense::new(timestamp, category, amount, memo.map(str::to_string));
        self.record(expense).map(|stored| stored.id)
    }

    /// Validates and persists a typed submission.
    pub fn record(&self, expense: NewExpense) -> Result<Expense, CoreError> {
        expense.validate()?;
        let stored = self.store.insert(&expense)?;
        info!(
            id = stored.id.value(),
            category = %stored.category,
            amount = stored.amount,
            backend = self.store.backend_name(),
            "expense recorded"
        );
        Ok(stored)
    }

    /// Deletes the expense, reporting [`CoreError::NotFound`] for unknown ids.
    pub fn delete(&self, id: ExpenseId) -> Result<Expense, CoreError> {
        let removed = self.store.remove(id)?;
        info!(id = id.value(), amount = removed.amount, "expense deleted");
        Ok(removed)
    }

    pub fn list_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Expense>, CoreError> {
        self.list_window(&TimeWindow::new(start, end)?)
    }

    pub fn sum_in_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<i64, CoreError> {
        self.sum_window(&TimeWindow::new(start, end)?)
    }

    pub fn list_window(&self, window: &TimeWindow) -> Result<Vec<Expense>, CoreError> {
        let expenses = self.store.list_in_range(window)?;
        debug!(count = expenses.len(), start = %window.start, end = %window.end, "listed expenses");
        Ok(expenses)
    }

    pub fn sum_window(&self, window: &TimeWindow) -> Result<i64, CoreError> {
        self.store.sum_in_range(window)
    }

    pub fn month_window(&self, year: i32, month: u32) -> Result<TimeWindow, CoreError> {
        Ok(TimeWindow::month(year, month, self.offset)?)
    }

    pub fn month_expenses(&self, year: i32, month: u32) -> Result<Vec<Expense>, CoreError> {
        self.list_window(&self.month_window(year, month)?)
    }

    pub fn month_total(&self, year: i32, month: u32) -> Result<i64, CoreError> {
        self.sum_window(&self.month_window(year, month)?)
    }

    /// Total spent during the civil day `date`.
    pub fn spent_on(&self, date: NaiveDate) -> Result<i64, CoreError> {
        self.sum_window(&TimeWindow::day(date, self.offset))
    }

    /// Month-to-date spending strictly before `date`.
    pub fn month_spent_before(&self, date: NaiveDate) -> Result<i64, CoreError> {
        let first = date.with_day(1).unwrap_or(date);
        if first == date {
            return Ok(0);
        }
        self.sum_window(&TimeWindow::civil_days(first, date, self.offset)?)
    }

    pub fn count(&self) -> Result<usize, CoreError> {
        self.store.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{time::civil_offset, InMemoryExpenseStore};
    use chrono::TimeZone;

    fn service() -> LedgerService {
        LedgerService::new(Box::new(InMemoryExpenseStore::new()), civil_offset(9).unwrap())
    }

    fn jst(d: u32, h: u32) -> DateTime<Utc> {
        civil_offset(9)
            .unwrap()
            .with_ymd_and_hms(2026, 10, d, h, 0, 0)
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn add_rejects_negative_amount_and_unknown_category() {
        let ledger = service();
        let negative = ledger.add(jst(17, 12), "food", -5, None).unwrap_err();
        assert!(matches!(negative, CoreError::Validation(_)), "{negative:?}");
        let unknown = ledger.add(jst(17, 12), "rent", 5, None).unwrap_err();
        assert!(matches!(unknown, CoreError::Validation(ref m) if m.contains("rent")));
        assert_eq!(ledger.count().unwrap(), 0);
    }

    #[test]
    fn delete_reports_missing_ids() {
        let ledger = service();
        let err = ledger.delete(ExpenseId(42)).unwrap_err();
        assert!(matches!(err, CoreError::NotFound(ExpenseId(42))));
    }

    #[test]
    fn spent_on_uses_civil_day_boundaries() {
        let ledger = service();
        ledger.add(jst(17, 0), "food", 300, None).unwrap();
        ledger.add(jst(16, 23), "food", 1000, None).unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        assert_eq!(ledger.spent_on(today).unwrap(), 300);
        assert_eq!(ledger.month_spent_before(today).unwrap(), 1000);
    }

    #[test]
    fn month_spent_before_first_day_is_zero() {
        let ledger = service();
        ledger.add(jst(1, 8), "transport", 220, None).unwrap();
        let first = NaiveDate::from_ymd_opt(2026, 10, 1).unwrap();
        assert_eq!(ledger.month_spent_before(first).unwrap(), 0);
    }

    #[test]
    fn list_in_range_rejects_inverted_windows() {
        let ledger = service();
        let err = ledger.list_in_range(jst(17, 0), jst(16, 0)).unwrap_err();
        assert!(matches!(err, CoreError::Validation(ref m) if m.contains("precede")));
    }

    #[test]
    fn zero_width_range_is_empty_not_an_error() {
        let ledger = service();
        ledger.add(jst(17, 9), "food", 500, None).unwrap();
        assert_eq!(ledger.sum_in_range(jst(17, 9), jst(17, 9)).unwrap(), 0);
        assert!(ledger.list_in_range(jst(17, 9), jst(17, 9)).unwrap().is_empty());
    }
}
