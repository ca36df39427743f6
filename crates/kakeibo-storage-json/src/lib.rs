//! kakeibo-storage-json
//!
//! Keeps the whole expense table in one pretty-printed JSON document that is rewritten
//! through a temporary file and an atomic rename on every mutation.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
};

use kakeibo_core::{
    storage::{select_in_window, ExpenseStore},
    CoreError,
};
use kakeibo_domain::{Expense, ExpenseId, NewExpense, TimeWindow};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const EXPENSES_FILE: &str = "expenses.json";
const TMP_SUFFIX: &str = "tmp";

#[derive(Debug, Default, Serialize, Deserialize)]
struct ExpenseDocument {
    /// Highest id ever assigned; survives deletion of the newest record.
    #[serde(default)]
    last_id: i64,
    #[serde(default)]
    expenses: Vec<Expense>,
}

/// Filesystem-backed JSON persistence for the expense table.
pub struct JsonExpenseStore {
    path: PathBuf,
    guard: Mutex<()>,
}

impl JsonExpenseStore {
    /// Opens (or prepares) the document at `path`. A missing file is an empty ledger.
    pub fn open(path: PathBuf) -> Result<Self, CoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let store = Self {
            path,
            guard: Mutex::new(()),
        };
        store.read_document()?;
        Ok(store)
    }

    /// Opens `expenses.json` inside `dir`.
    pub fn in_dir(dir: &Path) -> Result<Self, CoreError> {
        Self::open(dir.join(EXPENSES_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> Result<MutexGuard<'_, ()>, CoreError> {
        self.guard
            .lock()
            .map_err(|_| CoreError::storage("json store lock poisoned"))
    }

    fn read_document(&self) -> Result<ExpenseDocument, CoreError> {
        if !self.path.exists() {
            return Ok(ExpenseDocument::default());
        }
        let data = fs::read_to_string(&self.path)?;
        if data.trim().is_empty() {
            return Ok(ExpenseDocument::default());
        }
        serde_json::from_str(&data).map_err(|err| {
            CoreError::StorageUnavailable(format!("{}: {err}", self.path.display()))
        })
    }

    fn write_document(&self, document: &ExpenseDocument) -> Result<(), CoreError> {
        let json = serde_json::to_string_pretty(document).map_err(CoreError::storage)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), records = document.expenses.len(), "wrote expense document");
        Ok(())
    }
}

impl ExpenseStore for JsonExpenseStore {
    fn backend_name(&self) -> &'static str {
        "json"
    }

    fn insert(&self, expense: &NewExpense) -> Result<Expense, CoreError> {
        let _guard = self.lock()?;
        let mut document = self.read_document()?;
        let next = document
            .expenses
            .iter()
            .map(|stored| stored.id.value())
            .max()
            .unwrap_or(0)
            .max(document.last_id)
            + 1;
        let stored = Expense::from_new(ExpenseId(next), expense);
        document.last_id = next;
        document.expenses.push(stored.clone());
        self.write_document(&document)?;
        Ok(stored)
    }

    fn remove(&self, id: ExpenseId) -> Result<Expense, CoreError> {
        let _guard = self.lock()?;
        let mut document = self.read_document()?;
        let index = document
            .expenses
            .iter()
            .position(|stored| stored.id == id)
            .ok_or(CoreError::NotFound(id))?;
        let removed = document.expenses.remove(index);
        self.write_document(&document)?;
        Ok(removed)
    }

    fn list_in_range(&self, window: &TimeWindow) -> Result<Vec<Expense>, CoreError> {
        let _guard = self.lock()?;
        let document = self.read_document()?;
        Ok(select_in_window(&document.expenses, window))
    }

    fn count(&self) -> Result<usize, CoreError> {
        let _guard = self.lock()?;
        Ok(self.read_document()?.expenses.len())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
