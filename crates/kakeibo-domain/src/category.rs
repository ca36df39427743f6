//! Fixed expense categories.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
/// Enumerates the spending buckets an expense can be filed under.
pub enum Category {
    Food,
    DailyGoods,
    Transport,
    Entertainment,
    Social,
    Medical,
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Food,
        Category::DailyGoods,
        Category::Transport,
        Category::Entertainment,
        Category::Social,
        Category::Medical,
        Category::Other,
    ];

    /// Storage key, also accepted by [`Category::from_str`].
    pub fn key(self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::DailyGoods => "daily_goods",
            Category::Transport => "transport",
            Category::Entertainment => "entertainment",
            Category::Social => "social",
            Category::Medical => "medical",
            Category::Other => "other",
        }
    }

    /// Household-book label shown next to the key in listings.
    pub fn label(self) -> &'static str {
        match self {
            Category::Food => "食費",
            Category::DailyGoods => "日用品",
            Category::Transport => "交通",
            Category::Entertainment => "娯楽",
            Category::Social => "交際",
            Category::Medical => "医療",
            Category::Other => "その他",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let normalized = trimmed.to_ascii_lowercase().replace(['-', ' '], "_");
        let category = match normalized.as_str() {
            "food" | "食費" => Category::Food,
            "daily_goods" | "daily" | "goods" | "日用品" => Category::DailyGoods,
            "transport" | "交通" => Category::Transport,
            "entertainment" | "娯楽" => Category::Entertainment,
            "social" | "交際" => Category::Social,
            "medical" | "医療" => Category::Medical,
            "other" | "その他" => Category::Other,
            _ => return Err(ParseCategoryError(trimmed.to_string())),
        };
        Ok(category)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Raised when text does not name one of the fixed categories.
pub struct ParseCategoryError(pub String);

impl fmt::Display for ParseCategoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let choices: Vec<&str> = Category::ALL.iter().map(|c| c.key()).collect();
        write!(
            f,
            "unknown category `{}` (expected one of: {})",
            self.0,
            choices.join(", ")
        )
    }
}

impl std::error::Error for ParseCategoryError {}
