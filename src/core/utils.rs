use dirs::home_dir;
use std::{env, path::PathBuf};

const DEFAULT_DIR_NAME: &str = ".kakeibo";
pub const HOME_ENV: &str = "KAKEIBO_HOME";

/// Resolves where kakeibo keeps its configuration and data.
pub struct PathResolver;

impl PathResolver {
    /// `$KAKEIBO_HOME`, defaulting to `~/.kakeibo`.
    pub fn base_dir() -> PathBuf {
        if let Some(custom) = env::var_os(HOME_ENV) {
            return PathBuf::from(custom);
        }
        home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }
}
