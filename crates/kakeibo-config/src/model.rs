use serde::{de::Deserializer, Deserialize, Serialize};
use std::{fmt, path::PathBuf};

use crate::ConfigError;

/// Stores user-configurable budget settings and storage preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "Config::default_utc_offset_hours")]
    pub utc_offset_hours: i32,
    #[serde(default = "Config::default_currency")]
    pub currency: String,
    #[serde(default)]
    pub storage_backend: StorageBackendKind,
    #[serde(default = "Config::default_savings_goal")]
    pub savings_goal: i64,
    /// Days the goal is spread over. `None` follows the calendar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_remaining: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_plan: Option<MonthlyPlan>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom directory for the expense store. Defaults to `<home>/data`.
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            utc_offset_hours: Self::default_utc_offset_hours(),
            currency: Self::default_currency(),
            storage_backend: StorageBackendKind::default(),
            savings_goal: Self::default_savings_goal(),
            days_remaining: None,
            monthly_plan: None,
            data_dir: None,
        }
    }
}

impl Config {
    pub fn default_utc_offset_hours() -> i32 {
        9
    }

    pub fn default_currency() -> String {
        "JPY".into()
    }

    pub fn default_savings_goal() -> i64 {
        30_000
    }

    pub fn resolve_data_dir(&self, home: &std::path::Path) -> PathBuf {
        if let Some(path) = &self.data_dir {
            return path.clone();
        }
        home.join("data")
    }

    pub fn set_savings_goal(&mut self, goal: i64) -> Result<(), ConfigError> {
        if goal < 0 {
            return Err(ConfigError::invalid("goal", "must not be negative"));
        }
        self.savings_goal = goal;
        Ok(())
    }

    /// `None` restores the calendar-derived default.
    pub fn set_days_remaining(&mut self, days: Option<i64>) -> Result<(), ConfigError> {
        if let Some(value) = days {
            if value < 1 {
                return Err(ConfigError::invalid("days", "must be at least 1"));
            }
        }
        self.days_remaining = days;
        Ok(())
    }

    pub fn set_monthly_plan(&mut self, plan: Option<MonthlyPlan>) -> Result<(), ConfigError> {
        if let Some(plan) = &plan {
            if plan.income < 0 || plan.fixed_costs < 0 {
                return Err(ConfigError::invalid(
                    "plan",
                    "income and fixed costs must not be negative",
                ));
            }
        }
        self.monthly_plan = plan;
        Ok(())
    }

    /// Applies a `config set <key> <value>` style update.
    pub fn apply_setting(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        match key.trim().to_ascii_lowercase().as_str() {
            "offset" | "utc_offset" | "utc_offset_hours" => {
                let hours: i32 = value
                    .parse()
                    .map_err(|_| ConfigError::invalid(key, "expected whole hours, e.g. 9"))?;
                if !(-23..=23).contains(&hours) {
                    return Err(ConfigError::invalid(key, "must be between -23 and 23"));
                }
                self.utc_offset_hours = hours;
            }
            "currency" => {
                if value.is_empty() {
                    return Err(ConfigError::invalid(key, "must not be empty"));
                }
                self.currency = value.to_ascii_uppercase();
            }
            "backend" | "storage_backend" => {
                self.storage_backend = StorageBackendKind::parse(value)
                    .ok_or_else(|| ConfigError::invalid(key, "expected `sqlite` or `json`"))?;
            }
            "data_dir" => {
                self.data_dir = match value {
                    "" | "default" => None,
                    path => Some(PathBuf::from(path)),
                };
            }
            "goal" | "savings_goal" => {
                let goal = value
                    .parse()
                    .map_err(|_| ConfigError::invalid(key, "expected a whole amount"))?;
                self.set_savings_goal(goal)?;
            }
            "days" | "days_remaining" => {
                let days = match value {
                    "auto" => None,
                    raw => Some(raw.parse().map_err(|_| {
                        ConfigError::invalid(key, "expected a day count or `auto`")
                    })?),
                };
                self.set_days_remaining(days)?;
            }
            other => {
                return Err(ConfigError::invalid(
                    other,
                    "unknown key (offset, currency, backend, data_dir, goal, days)",
                ))
            }
        }
        Ok(())
    }
}

/// Income side of the month used by the spendable-budget policy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonthlyPlan {
    pub income: i64,
    pub fixed_costs: i64,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackendKind {
    #[default]
    Sqlite,
    Json,
}

impl StorageBackendKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sqlite" | "db" => Some(StorageBackendKind::Sqlite),
            "json" => Some(StorageBackendKind::Json),
            _ => None,
        }
    }
}

impl fmt::Display for StorageBackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StorageBackendKind::Sqlite => "sqlite",
            StorageBackendKind::Json => "json",
        };
        f.write_str(label)
    }
}

impl<'de> Deserialize<'de> for StorageBackendKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value
            .as_deref()
            .and_then(StorageBackendKind::parse)
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_setting_updates_known_keys() {
        let mut config = Config::default();
        config.apply_setting("offset", "-5").unwrap();
        config.apply_setting("backend", "JSON").unwrap();
        config.apply_setting("currency", "usd").unwrap();
        config.apply_setting("days", "12").unwrap();
        assert_eq!(config.utc_offset_hours, -5);
        assert_eq!(config.storage_backend, StorageBackendKind::Json);
        assert_eq!(config.currency, "USD");
        assert_eq!(config.days_remaining, Some(12));

        config.apply_setting("days", "auto").unwrap();
        assert_eq!(config.days_remaining, None);
    }

    #[test]
    fn apply_setting_rejects_bad_values() {
        let mut config = Config::default();
        assert!(config.apply_setting("offset", "30").is_err());
        assert!(config.apply_setting("goal", "-1").is_err());
        assert!(config.apply_setting("days", "0").is_err());
        assert!(config.apply_setting("colour", "blue").is_err());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn unknown_backend_falls_back_to_default() {
        let config: Config = serde_json::from_str(r#"{"storage_backend":"mongo"}"#).unwrap();
        assert_eq!(config.storage_backend, StorageBackendKind::Sqlite);
        assert_eq!(config.utc_offset_hours, 9);
    }
}
