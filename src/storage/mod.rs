//! Opens the configured expense backend.

use std::path::Path;

use kakeibo_config::{Config, StorageBackendKind};
use kakeibo_core::{ExpenseStore, LedgerService};
pub use kakeibo_storage_json::JsonExpenseStore;
pub use kakeibo_storage_sqlite::SqliteExpenseStore;
use tracing::info;

use crate::{config::civil_offset, core::errors::Result};

pub fn open_store(config: &Config, base: &Path) -> Result<Box<dyn ExpenseStore>> {
    let dir = config.resolve_data_dir(base);
    let store: Box<dyn ExpenseStore> = match config.storage_backend {
        StorageBackendKind::Sqlite => Box::new(SqliteExpenseStore::in_dir(&dir)?),
        StorageBackendKind::Json => Box::new(JsonExpenseStore::in_dir(&dir)?),
    };
    info!(backend = store.backend_name(), dir = %dir.display(), "expense store ready");
    Ok(store)
}

/// Ledger over the configured backend, using the configured civil offset.
pub fn open_ledger(config: &Config, base: &Path) -> Result<LedgerService> {
    let offset = civil_offset(config)?;
    Ok(LedgerService::new(open_store(config, base)?, offset))
}
