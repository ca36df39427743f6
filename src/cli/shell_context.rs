//! Shared runtime state for CLI interactions and command execution.

use std::{path::PathBuf, sync::Arc};

use dialoguer::theme::ColorfulTheme;
use kakeibo_core::{BudgetCalculator, Clock, LedgerService};

use crate::config::{Config, ConfigManager};

use super::{formatters::CliFormatters, registry::CommandRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub theme: ColorfulTheme,
    pub clock: Arc<dyn Clock>,
    pub formatters: CliFormatters,
    /// Home directory holding `config/` and, unless overridden, `data/`.
    pub base_dir: PathBuf,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub ledger: LedgerService,
    pub calculator: BudgetCalculator,
    pub last_command: Option<String>,
    pub running: bool,
}
