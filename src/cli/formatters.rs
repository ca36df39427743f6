use chrono::{DateTime, FixedOffset, Utc};
use kakeibo_config::Config;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Renders amounts and instants for the active configuration.
#[derive(Debug, Clone)]
pub struct CliFormatters {
    currency: String,
    offset: FixedOffset,
}

impl CliFormatters {
    pub fn new(config: &Config, offset: FixedOffset) -> Self {
        Self {
            currency: config.currency.clone(),
            offset,
        }
    }

    /// `¥1,500` for yen, `1,500 USD` for anything else.
    pub fn format_amount(&self, amount: i64) -> String {
        self.with_currency(group_thousands(amount))
    }

    /// Whole-unit rendering of a fractional amount, e.g. a daily limit.
    pub fn format_rounded(&self, amount: f64) -> String {
        self.format_amount(amount.round() as i64)
    }

    pub fn format_timestamp(&self, timestamp: &DateTime<Utc>) -> String {
        timestamp
            .with_timezone(&self.offset)
            .format(TIMESTAMP_FORMAT)
            .to_string()
    }

    pub fn offset_label(&self) -> String {
        format!("UTC{}", self.offset)
    }

    fn with_currency(&self, digits: String) -> String {
        if self.currency.eq_ignore_ascii_case("JPY") {
            match digits.strip_prefix('-') {
                Some(positive) => format!("-¥{positive}"),
                None => format!("¥{digits}"),
            }
        } else {
            format!("{digits} {}", self.currency)
        }
    }
}

/// Inserts `,` every three digits: `1234567` becomes `1,234,567`.
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Two decimals with grouped whole part: `1000.0` becomes `1,000.00`.
pub fn format_decimal(value: f64) -> String {
    let cents = (value * 100.0).round() as i64;
    let whole = cents / 100;
    let fraction = (cents % 100).abs();
    let sign = if cents < 0 && whole == 0 { "-" } else { "" };
    format!("{sign}{}.{fraction:02}", group_thousands(whole))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn formatters(currency: &str) -> CliFormatters {
        let config = Config {
            currency: currency.into(),
            ..Config::default()
        };
        CliFormatters::new(&config, FixedOffset::east_opt(9 * 3600).unwrap())
    }

    #[test]
    fn groups_digits() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_500), "1,500");
        assert_eq!(group_thousands(-1_234_567), "-1,234,567");
    }

    #[test]
    fn yen_prefix_and_other_currency_suffix() {
        assert_eq!(formatters("JPY").format_amount(1_500), "¥1,500");
        assert_eq!(formatters("JPY").format_amount(-20), "-¥20");
        assert_eq!(formatters("USD").format_amount(30_000), "30,000 USD");
        assert_eq!(formatters("JPY").format_rounded(1000.4), "¥1,000");
    }

    #[test]
    fn decimals_keep_two_places() {
        assert_eq!(format_decimal(1000.0), "1,000.00");
        assert_eq!(format_decimal(967.741), "967.74");
        assert_eq!(format_decimal(0.0), "0.00");
    }

    #[test]
    fn timestamps_render_in_civil_time() {
        let stamp = Utc.with_ymd_and_hms(2026, 10, 16, 15, 30, 0).unwrap();
        assert_eq!(formatters("JPY").format_timestamp(&stamp), "2026-10-17 00:30");
        assert_eq!(formatters("JPY").offset_label(), "UTC+09:00");
    }
}
