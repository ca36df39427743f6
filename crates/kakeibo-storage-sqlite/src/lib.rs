//! kakeibo-storage-sqlite
//!
//! Embedded SQLite persistence for the `expenses` table. One connection is opened per store
//! and shared behind a mutex for the lifetime of the process.

use std::{
    fs,
    path::Path,
    sync::{Mutex, MutexGuard},
};

use kakeibo_core::{storage::ExpenseStore, CoreError};
use kakeibo_domain::{
    format_stored_timestamp, parse_stored_timestamp, Category, Expense, ExpenseId, NewExpense,
    TimeWindow,
};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, info};

pub const DATABASE_FILE: &str = "expenses.db";

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS expenses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    dt TEXT NOT NULL,
    category TEXT NOT NULL CHECK (category IN (
        'food', 'daily_goods', 'transport', 'entertainment', 'social', 'medical', 'other'
    )),
    amount INTEGER NOT NULL CHECK (amount >= 0),
    memo TEXT
);
CREATE INDEX IF NOT EXISTS idx_expenses_dt ON expenses (dt);
";

const SELECT_COLUMNS: &str = "SELECT id, dt, category, amount, memo FROM expenses";

pub struct SqliteExpenseStore {
    conn: Mutex<Connection>,
}

impl SqliteExpenseStore {
    /// Opens the database file at `path`, creating it and the schema when missing.
    pub fn open(path: &Path) -> Result<Self, CoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path).map_err(storage_error)?;
        info!(path = %path.display(), "opened expense database");
        Self::with_connection(conn)
    }

    /// Opens `expenses.db` inside `dir`.
    pub fn in_dir(dir: &Path) -> Result<Self, CoreError> {
        Self::open(&dir.join(DATABASE_FILE))
    }

    /// Private database that disappears with the store.
    pub fn in_memory() -> Result<Self, CoreError> {
        Self::with_connection(Connection::open_in_memory().map_err(storage_error)?)
    }

    fn with_connection(conn: Connection) -> Result<Self, CoreError> {
        conn.execute_batch(SCHEMA).map_err(storage_error)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, CoreError> {
        self.conn
            .lock()
            .map_err(|_| CoreError::storage("sqlite connection lock poisoned"))
    }

    fn find_by_id(conn: &Connection, id: ExpenseId) -> Result<Option<Expense>, CoreError> {
        conn.query_row(
            &format!("{SELECT_COLUMNS} WHERE id = ?1"),
            params![id.value()],
            read_row,
        )
        .optional()
        .map_err(storage_error)?
        .transpose()
    }
}

impl ExpenseStore for SqliteExpenseStore {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    fn insert(&self, expense: &NewExpense) -> Result<Expense, CoreError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO expenses (dt, category, amount, memo) VALUES (?1, ?2, ?3, ?4)",
            params![
                format_stored_timestamp(&expense.timestamp),
                expense.category.key(),
                expense.amount,
                expense.memo,
            ],
        )
        .map_err(storage_error)?;
        let id = ExpenseId(conn.last_insert_rowid());
        Ok(Expense::from_new(id, expense))
    }

    fn remove(&self, id: ExpenseId) -> Result<Expense, CoreError> {
        let conn = self.conn()?;
        let existing = Self::find_by_id(&conn, id)?.ok_or(CoreError::NotFound(id))?;
        conn.execute("DELETE FROM expenses WHERE id = ?1", params![id.value()])
            .map_err(storage_error)?;
        Ok(existing)
    }

    fn list_in_range(&self, window: &TimeWindow) -> Result<Vec<Expense>, CoreError> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare(&format!(
                "{SELECT_COLUMNS} WHERE dt >= ?1 AND dt < ?2 ORDER BY dt DESC, id DESC"
            ))
            .map_err(storage_error)?;
        let rows = stmt
            .query_map(
                params![
                    format_stored_timestamp(&window.start),
                    format_stored_timestamp(&window.end)
                ],
                read_row,
            )
            .map_err(storage_error)?;

        let mut expenses = Vec::new();
        for row in rows {
            expenses.push(row.map_err(storage_error)??);
        }
        debug!(count = expenses.len(), "queried expenses");
        Ok(expenses)
    }

    fn sum_in_range(&self, window: &TimeWindow) -> Result<i64, CoreError> {
        let conn = self.conn()?;
        conn.query_row(
            "SELECT COALESCE(SUM(amount), 0) FROM expenses WHERE dt >= ?1 AND dt < ?2",
            params![
                format_stored_timestamp(&window.start),
                format_stored_timestamp(&window.end)
            ],
            |row| row.get(0),
        )
        .map_err(sum_error)
    }

    fn count(&self) -> Result<usize, CoreError> {
        let conn = self.conn()?;
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM expenses", [], |row| row.get(0))
            .map_err(storage_error)?;
        Ok(usize::try_from(count).unwrap_or(0))
    }
}

/// Column decoding problems surface as the inner error so a bad row is reported, not skipped.
fn read_row(row: &Row<'_>) -> rusqlite::Result<Result<Expense, CoreError>> {
    let id: i64 = row.get(0)?;
    let dt: String = row.get(1)?;
    let category: String = row.get(2)?;
    let amount: i64 = row.get(3)?;
    let memo: Option<String> = row.get(4)?;

    let Some(timestamp) = parse_stored_timestamp(&dt) else {
        return Ok(Err(CoreError::StorageUnavailable(format!(
            "expense {id} has an unreadable timestamp `{dt}`"
        ))));
    };
    let category = match category.parse::<Category>() {
        Ok(category) => category,
        Err(err) => {
            return Ok(Err(CoreError::StorageUnavailable(format!(
                "expense {id}: {err}"
            ))))
        }
    };
    Ok(Ok(Expense {
        id: ExpenseId(id),
        timestamp,
        category,
        amount,
        memo,
    }))
}

fn storage_error(err: rusqlite::Error) -> CoreError {
    CoreError::StorageUnavailable(err.to_string())
}

/// SQLite's `SUM` fails with "integer overflow"; report it like the other backends.
fn sum_error(err: rusqlite::Error) -> CoreError {
    if err.to_string().contains("integer overflow") {
        CoreError::total_overflow()
    } else {
        storage_error(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn schema_rejects_negative_amounts() {
        let store = SqliteExpenseStore::in_memory().expect("in-memory db");
        let conn = store.conn().unwrap();
        let result = conn.execute(
            "INSERT INTO expenses (dt, category, amount) VALUES ('2026-10-17T00:00:00Z', 'food', -1)",
            [],
        );
        assert!(result.is_err(), "CHECK constraint should reject negative amount");
    }

    #[test]
    fn schema_rejects_unknown_category() {
        let store = SqliteExpenseStore::in_memory().expect("in-memory db");
        let conn = store.conn().unwrap();
        let result = conn.execute(
            "INSERT INTO expenses (dt, category, amount) VALUES ('2026-10-17T00:00:00Z', 'rent', 1)",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn stores_timestamp_as_sortable_text() {
        let store = SqliteExpenseStore::in_memory().expect("in-memory db");
        let stamp = Utc.with_ymd_and_hms(2026, 10, 17, 3, 4, 5).unwrap();
        store
            .insert(&NewExpense::new(stamp, Category::Medical, 1_980, None))
            .unwrap();
        let conn = store.conn().unwrap();
        let dt: String = conn
            .query_row("SELECT dt FROM expenses", [], |row| row.get(0))
            .unwrap();
        assert_eq!(dt, "2026-10-17T03:04:05Z");
    }
}
