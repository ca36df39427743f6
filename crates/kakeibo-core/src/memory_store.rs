//! Volatile [`ExpenseStore`] used by tests and as the reference for the store contract.

use std::sync::{Mutex, MutexGuard};

use kakeibo_domain::{Expense, ExpenseId, NewExpense, TimeWindow};

use crate::{
    storage::{select_in_window, ExpenseStore},
    CoreError,
};

#[derive(Debug, Default)]
struct MemoryState {
    last_id: i64,
    expenses: Vec<Expense>,
}

#[derive(Debug, Default)]
pub struct InMemoryExpenseStore {
    state: Mutex<MemoryState>,
}

impl InMemoryExpenseStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> Result<MutexGuard<'_, MemoryState>, CoreError> {
        self.state
            .lock()
            .map_err(|_| CoreError::storage("in-memory store lock poisoned"))
    }
}

impl ExpenseStore for InMemoryExpenseStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    fn insert(&self, expense: &NewExpense) -> Result<Expense, CoreError> {
        let mut state = self.state()?;
        state.last_id += 1;
        let stored = Expense::from_new(ExpenseId(state.last_id), expense);
        state.expenses.push(stored.clone());
        Ok(stored)
    }

    fn remove(&self, id: ExpenseId) -> Result<Expense, CoreError> {
        let mut state = self.state()?;
        let index = state
            .expenses
            .iter()
            .position(|expense| expense.id == id)
            .ok_or(CoreError::NotFound(id))?;
        Ok(state.expenses.remove(index))
    }

    fn list_in_range(&self, window: &TimeWindow) -> Result<Vec<Expense>, CoreError> {
        let state = self.state()?;
        Ok(select_in_window(&state.expenses, window))
    }

    fn count(&self) -> Result<usize, CoreError> {
        Ok(self.state()?.expenses.len())
    }
}
