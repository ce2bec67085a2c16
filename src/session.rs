//! The calculator's live input snapshot and its most recent result.
//!
//! Every change replaces the previous result; nothing is kept from earlier
//! inputs. With [`RecalcMode::Automatic`] the result follows each change, with
//! [`RecalcMode::Manual`] it only moves on an explicit [`CalculatorSession::calculate`].
//! An unusable date withholds the result instead of failing.

use serde::{Deserialize, Serialize};

use crate::{
    calendar::{Clock, SettlementDate},
    errors::Result,
    input::AmountField,
    proration::{prorate_settlement, FeeKind, SettlementProration},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecalcMode {
    #[default]
    Automatic,
    Manual,
}

impl RecalcMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "auto" | "automatic" => Some(Self::Automatic),
            "manual" => Some(Self::Manual),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RecalcMode::Automatic => "automatic",
            RecalcMode::Manual => "manual",
        }
    }
}

#[derive(Debug, Clone)]
pub struct CalculatorSession {
    date_text: String,
    management_fee: AmountField,
    reserve_fund: AmountField,
    mode: RecalcMode,
    result: Option<SettlementProration>,
    stale: bool,
}

impl CalculatorSession {
    /// Starts a session dated today according to `clock`.
    pub fn new(clock: &dyn Clock, mode: RecalcMode, grouping_separator: char) -> Self {
        let mut session = Self {
            date_text: SettlementDate::today(clock).to_string(),
            management_fee: AmountField::new(grouping_separator),
            reserve_fund: AmountField::new(grouping_separator),
            mode,
            result: None,
            stale: false,
        };
        session.inputs_changed();
        session
    }

    pub fn mode(&self) -> RecalcMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: RecalcMode) {
        self.mode = mode;
        if mode == RecalcMode::Automatic && self.stale {
            self.recompute();
        }
    }

    pub fn grouping_separator(&self) -> char {
        self.management_fee.separator()
    }

    /// Regroups both amount fields after a locale change.
    pub fn set_grouping_separator(&mut self, separator: char) {
        self.management_fee.set_separator(separator);
        self.reserve_fund.set_separator(separator);
    }

    pub fn date_text(&self) -> &str {
        &self.date_text
    }

    /// Parses the current date text; `None` while it is not a valid date.
    pub fn settlement_date(&self) -> Option<SettlementDate> {
        SettlementDate::parse(&self.date_text).ok()
    }

    /// Stores the date text even when it does not parse, then reports whether it did.
    pub fn set_date_text(&mut self, text: &str) -> Result<SettlementDate> {
        self.date_text = text.trim().to_string();
        let parsed = SettlementDate::parse(&self.date_text);
        if let Err(err) = &parsed {
            tracing::debug!(input = %self.date_text, error = %err, "withholding result");
        }
        self.inputs_changed();
        parsed
    }

    pub fn set_fee_text(&mut self, kind: FeeKind, text: &str) {
        self.field_mut(kind).set_text(text);
        self.inputs_changed();
    }

    pub fn fee_field(&self, kind: FeeKind) -> &AmountField {
        match kind {
            FeeKind::ManagementFee => &self.management_fee,
            FeeKind::ReserveFund => &self.reserve_fund,
        }
    }

    pub fn field_mut(&mut self, kind: FeeKind) -> &mut AmountField {
        match kind {
            FeeKind::ManagementFee => &mut self.management_fee,
            FeeKind::ReserveFund => &mut self.reserve_fund,
        }
    }

    /// Recomputes from the current snapshot regardless of mode.
    pub fn calculate(&mut self) -> Option<&SettlementProration> {
        self.recompute();
        self.result.as_ref()
    }

    pub fn result(&self) -> Option<&SettlementProration> {
        self.result.as_ref()
    }

    /// True when inputs changed after the shown result was computed.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Clears both amounts and moves the date back to today.
    pub fn reset(&mut self, clock: &dyn Clock) {
        self.date_text = SettlementDate::today(clock).to_string();
        self.management_fee.clear();
        self.reserve_fund.clear();
        self.result = None;
        self.stale = false;
        self.inputs_changed();
    }

    fn inputs_changed(&mut self) {
        if self.settlement_date().is_none() {
            self.result = None;
            self.stale = false;
            return;
        }
        match self.mode {
            RecalcMode::Automatic => self.recompute(),
            RecalcMode::Manual => self.stale = self.result.is_some(),
        }
    }

    fn recompute(&mut self) {
        self.stale = false;
        self.result = self.settlement_date().map(|date| {
            prorate_settlement(
                date,
                self.management_fee.value(),
                self.reserve_fund.value(),
            )
        });
    }
}
