use std::{io, result::Result as StdResult};

use kakeibo_config::ConfigError;
use kakeibo_core::CoreError;
use rustyline::error::ReadlineError;
use thiserror::Error;

/// Unified error type for the ledger, configuration and storage layers.
#[derive(Error, Debug)]
pub enum KakeiboError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = StdResult<T, KakeiboError>;

/// Failures that stop the shell itself.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Kakeibo(#[from] KakeiboError),
    #[error("Line editor error: {0}")]
    Readline(#[from] ReadlineError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        CliError::from(KakeiboError::from(err))
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::from(KakeiboError::from(err))
    }
}
