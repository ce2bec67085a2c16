//! Yen amounts and settlement dates as shown to the user.
//!
//! Every share is a whole number of yen, so amounts are formatted without
//! minor units. The locale only picks the thousands separator and the
//! wording of long dates.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

pub const CURRENCY_CODE: &str = "JPY";
pub const CURRENCY_SYMBOL: &str = "¥";

/// Locale-aware formatting preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocaleConfig {
    pub language_tag: String,
    pub grouping_separator: char,
    pub date_format: DateFormatStyle,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self::for_tag("ja-JP")
    }
}

impl LocaleConfig {
    /// Picks the thousands separator for a BCP 47 tag; unknown tags use `,`.
    pub fn for_tag(tag: &str) -> Self {
        let grouping_separator = match primary_language(tag).as_str() {
            "de" | "es" | "it" | "nl" | "pt" => '.',
            "fr" => ' ',
            _ => ',',
        };
        Self {
            language_tag: tag.trim().to_string(),
            grouping_separator,
            date_format: DateFormatStyle::Long,
        }
    }

    pub fn with_date_format(mut self, style: DateFormatStyle) -> Self {
        self.date_format = style;
        self
    }

    pub fn is_japanese(&self) -> bool {
        primary_language(&self.language_tag) == "ja"
    }
}

fn primary_language(tag: &str) -> String {
    tag.trim()
        .split(|ch: char| ch == '-' || ch == '_')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct FormatOptions {
    pub currency_display: CurrencyDisplay,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CurrencyDisplay {
    #[default]
    Symbol,
    Code,
    SymbolAndCode,
}

impl CurrencyDisplay {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "symbol" => Some(Self::Symbol),
            "code" => Some(Self::Code),
            "symbol_and_code" | "symbolandcode" | "both" => Some(Self::SymbolAndCode),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DateFormatStyle {
    Short,
    Medium,
    #[default]
    Long,
}

impl DateFormatStyle {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "short" => Some(Self::Short),
            "medium" => Some(Self::Medium),
            "long" => Some(Self::Long),
            _ => None,
        }
    }
}

/// Groups the digits of a whole number with the locale's separator.
pub fn format_number(locale: &LocaleConfig, value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let grouped = group_digits(&digits, locale.grouping_separator);
    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

pub(crate) fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    grouped
}

/// Formats a whole yen amount, the unit every prorated share is expressed in.
pub fn format_yen(amount: i64, locale: &LocaleConfig, options: &FormatOptions) -> String {
    let body = format_number(locale, amount);
    match options.currency_display {
        CurrencyDisplay::Symbol => format!("{}{}", CURRENCY_SYMBOL, body),
        CurrencyDisplay::Code => format!("{} {}", CURRENCY_CODE, body),
        CurrencyDisplay::SymbolAndCode => {
            format!("{}{} ({})", CURRENCY_SYMBOL, body, CURRENCY_CODE)
        }
    }
}

pub fn format_date(locale: &LocaleConfig, date: NaiveDate) -> String {
    match locale.date_format {
        DateFormatStyle::Short => date.format("%Y-%m-%d").to_string(),
        DateFormatStyle::Medium => format!(
            "{:02} {} {}",
            date.day(),
            month_label(date.month()),
            date.year()
        ),
        DateFormatStyle::Long if locale.is_japanese() => {
            format!("{}年{}月{}日", date.year(), date.month(), date.day())
        }
        DateFormatStyle::Long => format!(
            "{} {}, {}",
            month_name(date.month()),
            date.day(),
            date.year()
        ),
    }
}

fn month_label(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        12 => "Dec",
        _ => "",
    }
}

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yen_has_no_minor_units() {
        let locale = LocaleConfig::default();
        assert_eq!(format_yen(3226, &locale, &FormatOptions::default()), "¥3,226");
        let code = FormatOptions {
            currency_display: CurrencyDisplay::Code,
        };
        assert_eq!(format_yen(3226, &locale, &code), "JPY 3,226");
    }

    #[test]
    fn grouping_handles_short_and_long_numbers() {
        let locale = LocaleConfig::for_tag("en-US");
        assert_eq!(format_number(&locale, 0), "0");
        assert_eq!(format_number(&locale, 999), "999");
        assert_eq!(format_number(&locale, 1234567), "1,234,567");
        assert_eq!(format_number(&locale, -1234), "-1,234");
        assert_eq!(format_number(&locale, i64::MIN), "-9,223,372,036,854,775,808");
    }

    #[test]
    fn locale_presets_pick_separators() {
        assert_eq!(format_number(&LocaleConfig::for_tag("de-DE"), 1234567), "1.234.567");
        assert_eq!(format_number(&LocaleConfig::for_tag("fr_FR"), 1234), "1 234");
        assert_eq!(format_number(&LocaleConfig::for_tag("xx"), 1234), "1,234");
    }

    #[test]
    fn long_dates_follow_language() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 11).unwrap();
        assert_eq!(format_date(&LocaleConfig::for_tag("ja-JP"), date), "2025年1月11日");
        assert_eq!(
            format_date(&LocaleConfig::for_tag("en-US"), date),
            "January 11, 2025"
        );
        let short = LocaleConfig::for_tag("en-US").with_date_format(DateFormatStyle::Short);
        assert_eq!(format_date(&short, date), "2025-01-11");
        let medium = LocaleConfig::for_tag("en-US").with_date_format(DateFormatStyle::Medium);
        assert_eq!(format_date(&medium, date), "11 Jan 2025");
    }
}
