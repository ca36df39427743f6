//! Core CLI dispatch, error reporting, and shell context helpers.

use std::{io, path::PathBuf, sync::Arc};

use chrono::{DateTime, FixedOffset, NaiveDate};
use dialoguer::{theme::ColorfulTheme, Confirm};
use kakeibo_config::ConfigError;
use kakeibo_core::{time, Clock, CoreError};
use thiserror::Error;
use tracing::info;

use crate::{
    config::{self, Config},
    core::{errors::KakeiboError, utils::PathResolver},
    storage,
};

pub use crate::core::errors::CliError;
pub use crate::cli::shell_context::{CliMode, ShellContext};

use super::commands;
use super::formatters::CliFormatters;
use super::io as cli_io;
use super::registry::{CommandEntry, CommandRegistry};
use super::system_clock::SystemClock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

/// Failure of a single command. The shell reports it and keeps running.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<KakeiboError> for CommandError {
    fn from(err: KakeiboError) -> Self {
        match err {
            KakeiboError::Core(err) => CommandError::Core(err),
            KakeiboError::Config(err) => CommandError::Config(err),
            KakeiboError::Io(err) => CommandError::Io(err),
        }
    }
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_home(mode, PathResolver::base_dir(), Arc::new(SystemClock))
    }

    /// Context rooted at `base_dir` with an injected clock.
    pub fn with_home(
        mode: CliMode,
        base_dir: PathBuf,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, CliError> {
        let config_manager = config::manager_with_base(base_dir.clone())?;
        let config = config_manager.load()?;
        let offset = config::civil_offset(&config)?;
        let ledger = storage::open_ledger(&config, &base_dir)?;

        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        info!(
            home = %base_dir.display(),
            backend = ledger.backend_name(),
            "shell context ready"
        );

        Ok(ShellContext {
            mode,
            registry,
            theme: ColorfulTheme::default(),
            clock,
            formatters: CliFormatters::new(&config, offset),
            calculator: config::budget_calculator(&config),
            base_dir,
            config_manager,
            config,
            ledger,
            last_command: None,
            running: true,
        })
    }

    pub(crate) fn mode(&self) -> CliMode {
        self.mode
    }

    pub(crate) fn prompt(&self) -> String {
        "kakeibo> ".to_string()
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn now_civil(&self) -> DateTime<FixedOffset> {
        time::civil_now(self.clock.as_ref(), self.ledger.offset())
    }

    pub(crate) fn today(&self) -> NaiveDate {
        self.now_civil().date_naive()
    }

    /// Applies `change` to a copy of the configuration and commits it via [`apply_config`].
    ///
    /// [`apply_config`]: ShellContext::apply_config
    pub(crate) fn update_config<F>(&mut self, change: F) -> CommandResult
    where
        F: FnOnce(&mut Config) -> Result<(), ConfigError>,
    {
        let mut next = self.config.clone();
        change(&mut next)?;
        self.apply_config(next)
    }

    /// Saves `next` and makes it active. Storage is reopened when the backend, data
    /// directory, or offset changed; nothing is saved if that reopen fails.
    pub(crate) fn apply_config(&mut self, next: Config) -> CommandResult {
        let offset = config::civil_offset(&next)?;
        let reopen = next.storage_backend != self.config.storage_backend
            || next.data_dir != self.config.data_dir
            || next.utc_offset_hours != self.config.utc_offset_hours;
        let ledger = if reopen {
            Some(storage::open_ledger(&next, &self.base_dir)?)
        } else {
            None
        };

        self.config_manager.save(&next)?;
        if let Some(ledger) = ledger {
            self.ledger = ledger;
        }
        self.formatters = CliFormatters::new(&next, offset);
        self.calculator = config::budget_calculator(&next);
        self.config = next;
        Ok(())
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match crate::cli::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                self.print_warning(&err.to_string());
                return Ok(LoopControl::Continue);
            }
        };

        if tokens.is_empty() {
            return Ok(LoopControl::Continue);
        }

        let command = tokens[0].to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        self.dispatch(&command, &tokens[0], &args)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));
        if let Some(best) = self.registry.suggest(input) {
            cli_io::print_info(format!("Suggestion: `{}`?", best));
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Confirm::with_theme(&self.theme)
            .with_prompt("Exit shell?")
            .default(true)
            .interact()
            .map_err(CliError::from)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                self.print_error(&message);
                self.print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Core(CoreError::StorageUnavailable(message)) => {
                self.print_error(&format!("Storage unavailable: {message}"));
                self.print_hint("Check `config` for the data directory and backend.");
                Ok(())
            }
            other => {
                self.print_error(&other.to_string());
                Ok(())
            }
        }
    }

    /// Prompts only make sense when a person is at the terminal.
    pub(crate) fn can_prompt(&self) -> bool {
        self.mode == CliMode::Interactive
    }

    pub(crate) fn print_error(&self, message: &str) {
        cli_io::print_error(message);
    }

    pub(crate) fn print_warning(&self, message: &str) {
        cli_io::print_warning(message);
    }

    pub(crate) fn print_hint(&self, message: &str) {
        cli_io::print_hint(message);
    }
}

/// Parses a whole amount, tolerating a leading `¥` and thousands separators.
pub(crate) fn parse_amount(input: &str) -> Result<i64, CommandError> {
    let cleaned: String = input
        .trim()
        .trim_start_matches('¥')
        .chars()
        .filter(|ch| *ch != ',')
        .collect();
    cleaned.parse::<i64>().map_err(|_| {
        CommandError::InvalidArguments(format!("invalid amount `{}` (use whole yen)", input))
    })
}
