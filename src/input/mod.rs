//! Text transforms applied to amount fields before they reach the calculator.
//!
//! Amounts are typed as digit strings. While a field is being edited it shows
//! bare digits; once it loses focus the digits are grouped with the locale's
//! thousands separator. Parsing is lenient: anything that does not start with
//! a number counts as zero.

use crate::currency::group_digits;

pub const DEFAULT_GROUPING_SEPARATOR: char = ',';

/// Keeps ASCII digits only.
pub fn digits_only(text: &str) -> String {
    text.chars().filter(|ch| ch.is_ascii_digit()).collect()
}

/// Inserts `separator` every three digits, counting from the right.
pub fn group_thousands(digits: &str, separator: char) -> String {
    let plain = strip_grouping(digits, separator);
    if plain.is_empty() {
        return plain;
    }
    group_digits(&plain, separator)
}

/// Removes every occurrence of `separator`.
pub fn strip_grouping(text: &str, separator: char) -> String {
    text.chars().filter(|ch| *ch != separator).collect()
}

/// Parses a monthly amount, degrading to `0.0` instead of failing.
///
/// Grouping commas and whitespace are ignored, then the longest leading
/// decimal number is taken, so `"12,500円"` reads as `12500.0`. Negative and
/// non-finite values are clamped to zero.
pub fn parse_amount(text: &str) -> f64 {
    parse_amount_with(text, DEFAULT_GROUPING_SEPARATOR)
}

pub fn parse_amount_with(text: &str, separator: char) -> f64 {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|ch| *ch != separator && !ch.is_whitespace())
        .collect();
    let body = cleaned.strip_prefix('+').unwrap_or(&cleaned);

    let mut end = 0;
    let mut seen_dot = false;
    let mut seen_digit = false;
    for (idx, ch) in body.char_indices() {
        if ch.is_ascii_digit() {
            seen_digit = true;
            end = idx + 1;
        } else if ch == '.' && !seen_dot {
            seen_dot = true;
            end = idx + 1;
        } else {
            break;
        }
    }
    if !seen_digit {
        return 0.0;
    }

    match body[..end].parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => value,
        _ => 0.0,
    }
}

/// One amount entry field of the calculator form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountField {
    digits: String,
    focused: bool,
    separator: char,
}

impl Default for AmountField {
    fn default() -> Self {
        Self::new(DEFAULT_GROUPING_SEPARATOR)
    }
}

impl AmountField {
    pub fn new(separator: char) -> Self {
        Self {
            digits: String::new(),
            focused: false,
            separator,
        }
    }

    /// Field already holding `text`, as if typed and then left.
    pub fn with_text(text: &str, separator: char) -> Self {
        let mut field = Self::new(separator);
        field.set_text(text);
        field
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    /// Switches the grouping separator used for display; the digits are kept.
    pub fn set_separator(&mut self, separator: char) {
        self.separator = separator;
    }

    /// Replaces the field content; non-digit characters are dropped.
    pub fn set_text(&mut self, text: &str) {
        self.digits = digits_only(text);
    }

    pub fn clear(&mut self) {
        self.digits.clear();
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// Text as it would be shown: bare digits while editing, grouped otherwise.
    pub fn display(&self) -> String {
        if self.focused {
            self.digits.clone()
        } else {
            group_thousands(&self.digits, self.separator)
        }
    }

    /// Raw digits with no separators.
    pub fn digits(&self) -> &str {
        &self.digits
    }

    pub fn value(&self) -> f64 {
        parse_amount_with(&self.digits, self.separator)
    }
}
