//! User preferences for the calculator shell.
//!
//! Only display preferences are stored. Amounts and dates typed into the
//! calculator are never written to disk.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    currency::{CurrencyDisplay, DateFormatStyle, FormatOptions, LocaleConfig},
    errors::{ProrationError, Result},
    session::RecalcMode,
    utils::paths,
};

const TMP_SUFFIX: &str = "tmp";
const MIN_BAR_WIDTH: usize = 10;
const MAX_BAR_WIDTH: usize = 80;

/// Keys accepted by [`Config::set`].
pub const CONFIG_KEYS: &[&str] = &[
    "locale",
    "date_style",
    "currency_display",
    "recalc_mode",
    "ui_color_enabled",
    "bar_width",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_locale")]
    pub locale: String,
    #[serde(default)]
    pub date_style: DateFormatStyle,
    #[serde(default)]
    pub currency_display: CurrencyDisplay,
    #[serde(default)]
    pub recalc_mode: RecalcMode,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    #[serde(default = "Config::default_bar_width")]
    pub bar_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Self::default_locale(),
            date_style: DateFormatStyle::Long,
            currency_display: CurrencyDisplay::Symbol,
            recalc_mode: RecalcMode::Automatic,
            ui_color_enabled: Self::default_ui_color_enabled(),
            bar_width: Self::default_bar_width(),
        }
    }
}

impl Config {
    fn default_locale() -> String {
        "ja-JP".into()
    }

    fn default_ui_color_enabled() -> bool {
        true
    }

    fn default_bar_width() -> usize {
        30
    }

    pub fn locale_config(&self) -> LocaleConfig {
        LocaleConfig::for_tag(&self.locale).with_date_format(self.date_style)
    }

    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            currency_display: self.currency_display,
        }
    }

    /// Updates a single preference from its textual form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "locale" => {
                if value.is_empty() {
                    return Err(invalid(key, value));
                }
                self.locale = value.to_string();
            }
            "date_style" => {
                self.date_style = DateFormatStyle::parse(value).ok_or_else(|| invalid(key, value))?;
            }
            "currency_display" => {
                self.currency_display =
                    CurrencyDisplay::parse(value).ok_or_else(|| invalid(key, value))?;
            }
            "recalc_mode" => {
                self.recalc_mode = RecalcMode::parse(value).ok_or_else(|| invalid(key, value))?;
            }
            "ui_color_enabled" => {
                self.ui_color_enabled = parse_bool(value).ok_or_else(|| invalid(key, value))?;
            }
            "bar_width" => {
                let width = value
                    .parse::<usize>()
                    .ok()
                    .filter(|width| (MIN_BAR_WIDTH..=MAX_BAR_WIDTH).contains(width))
                    .ok_or_else(|| invalid(key, value))?;
                self.bar_width = width;
            }
            other => {
                return Err(ProrationError::ConfigError(format!(
                    "unknown setting `{}` (expected one of: {})",
                    other,
                    CONFIG_KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }

    /// Key/value pairs in display order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("locale", self.locale.clone()),
            ("date_style", format!("{:?}", self.date_style).to_lowercase()),
            ("currency_display", format!("{:?}", self.currency_display).to_lowercase()),
            ("recalc_mode", self.recalc_mode.as_str().to_string()),
            ("ui_color_enabled", self.ui_color_enabled.to_string()),
            ("bar_width", self.bar_width.to_string()),
        ]
    }
}

fn invalid(key: &str, value: &str) -> ProrationError {
    ProrationError::ConfigError(format!("`{}` is not a valid value for `{}`", value, key))
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Some(true),
        "false" | "off" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// Handles persistence for [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(paths::app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        let config_root = paths::config_dir_in(&base);
        fs::create_dir_all(&config_root)?;
        Ok(Self {
            path: paths::config_file_in(&base),
        })
    }

    pub fn load(&self) -> Result<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            let config = serde_json::from_str(&data)?;
            tracing::debug!(path = %self.path.display(), "loaded configuration");
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        tracing::debug!(path = %self.path.display(), "saved configuration");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
