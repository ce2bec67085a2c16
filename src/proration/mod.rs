//! Day-based proration of a monthly charge between seller and buyer.
//!
//! The settlement day itself belongs to the buyer: the seller carries days
//! `1..day`, the buyer carries `day..=days_in_month`. Each party's share is
//! rounded half away from zero on its own, so the two shares can add up to
//! one unit more than the monthly amount. No remainder is moved between the
//! parties.

use std::fmt;

use serde::Serialize;

use crate::calendar::SettlementDate;
use crate::input::parse_amount;

/// Rounds to the nearest whole currency unit, halves away from zero.
pub fn round_half_away_from_zero(value: f64) -> i64 {
    value.round() as i64
}

/// Largest monthly amount that is prorated; larger inputs are clamped to it.
///
/// Every share, and the sum of both fees for one party, stays far inside
/// `i64` at this bound.
pub const MAX_MONTHLY_AMOUNT: f64 = 1e15;

fn sanitize_amount(amount: f64) -> f64 {
    if amount.is_finite() && amount > 0.0 {
        amount.min(MAX_MONTHLY_AMOUNT)
    } else {
        0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Party {
    Seller,
    Buyer,
}

impl Party {
    pub fn label(&self) -> &'static str {
        match self {
            Party::Seller => "Seller",
            Party::Buyer => "Buyer",
        }
    }
}

/// The two monthly charges handled by the settlement form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeKind {
    ManagementFee,
    ReserveFund,
}

impl FeeKind {
    pub fn label(&self) -> &'static str {
        match self {
            FeeKind::ManagementFee => "Management fee",
            FeeKind::ReserveFund => "Reserve fund",
        }
    }

    /// Accepts the short names used on the command line.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "management" | "management-fee" | "mgmt" => Some(FeeKind::ManagementFee),
            "reserve" | "reserve-fund" | "repair" => Some(FeeKind::ReserveFund),
            _ => None,
        }
    }
}

impl fmt::Display for FeeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How the days of the settlement month are attributed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DaySplit {
    pub days_in_month: u32,
    pub seller_days: u32,
    pub buyer_days: u32,
}

impl DaySplit {
    pub fn for_date(date: SettlementDate) -> Self {
        let days_in_month = date.days_in_month();
        let day = date.day();
        Self {
            days_in_month,
            seller_days: day - 1,
            buyer_days: days_in_month - day + 1,
        }
    }

    pub fn days_for(&self, party: Party) -> u32 {
        match party {
            Party::Seller => self.seller_days,
            Party::Buyer => self.buyer_days,
        }
    }

    /// Fraction of the month carried by `party`, in `[0, 1]`.
    pub fn share_of(&self, party: Party) -> f64 {
        f64::from(self.days_for(party)) / f64::from(self.days_in_month)
    }
}

/// Outcome of prorating one monthly amount.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProrationResult {
    pub monthly_amount: f64,
    pub days_in_month: u32,
    pub seller_days: u32,
    pub buyer_days: u32,
    pub seller_amount: i64,
    pub buyer_amount: i64,
}

impl ProrationResult {
    pub fn split(&self) -> DaySplit {
        DaySplit {
            days_in_month: self.days_in_month,
            seller_days: self.seller_days,
            buyer_days: self.buyer_days,
        }
    }

    pub fn daily_amount(&self) -> f64 {
        self.monthly_amount / f64::from(self.days_in_month)
    }

    pub fn amount_for(&self, party: Party) -> i64 {
        match party {
            Party::Seller => self.seller_amount,
            Party::Buyer => self.buyer_amount,
        }
    }

    pub fn allocated_total(&self) -> i64 {
        self.seller_amount + self.buyer_amount
    }

    /// Allocated total minus the rounded monthly amount.
    pub fn rounding_discrepancy(&self) -> i64 {
        self.allocated_total() - round_half_away_from_zero(self.monthly_amount)
    }
}

/// Splits `monthly_amount` around `date`.
///
/// Non-finite or negative amounts are treated as zero; amounts above
/// [`MAX_MONTHLY_AMOUNT`] are clamped to it.
pub fn prorate(date: SettlementDate, monthly_amount: f64) -> ProrationResult {
    let monthly_amount = sanitize_amount(monthly_amount);
    let split = DaySplit::for_date(date);
    let daily_amount = monthly_amount / f64::from(split.days_in_month);
    let seller_amount = round_half_away_from_zero(daily_amount * f64::from(split.seller_days));
    let buyer_amount = round_half_away_from_zero(daily_amount * f64::from(split.buyer_days));

    tracing::debug!(
        %date,
        monthly_amount,
        days_in_month = split.days_in_month,
        seller_days = split.seller_days,
        buyer_days = split.buyer_days,
        seller_amount,
        buyer_amount,
        "prorated monthly amount"
    );

    ProrationResult {
        monthly_amount,
        days_in_month: split.days_in_month,
        seller_days: split.seller_days,
        buyer_days: split.buyer_days,
        seller_amount,
        buyer_amount,
    }
}

/// Parses `amount_text` leniently and prorates it.
pub fn prorate_amount_text(date: SettlementDate, amount_text: &str) -> ProrationResult {
    prorate(date, parse_amount(amount_text))
}

/// One party's side of a dual-fee settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PartyBurden {
    pub party: Party,
    pub days: u32,
    pub management_fee: i64,
    pub reserve_fund: i64,
    pub total: i64,
}

/// Management fee and reserve fund prorated over the same day split.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SettlementProration {
    pub settlement_date: SettlementDate,
    pub split: DaySplit,
    pub management_fee: ProrationResult,
    pub reserve_fund: ProrationResult,
}

impl SettlementProration {
    pub fn fee(&self, kind: FeeKind) -> &ProrationResult {
        match kind {
            FeeKind::ManagementFee => &self.management_fee,
            FeeKind::ReserveFund => &self.reserve_fund,
        }
    }

    pub fn burden(&self, party: Party) -> PartyBurden {
        let management_fee = self.management_fee.amount_for(party);
        let reserve_fund = self.reserve_fund.amount_for(party);
        PartyBurden {
            party,
            days: self.split.days_for(party),
            management_fee,
            reserve_fund,
            total: management_fee + reserve_fund,
        }
    }

    pub fn seller_burden(&self) -> PartyBurden {
        self.burden(Party::Seller)
    }

    pub fn buyer_burden(&self) -> PartyBurden {
        self.burden(Party::Buyer)
    }

    pub fn monthly_total(&self) -> f64 {
        self.management_fee.monthly_amount + self.reserve_fund.monthly_amount
    }

    pub fn rounding_discrepancy(&self) -> i64 {
        self.management_fee.rounding_discrepancy() + self.reserve_fund.rounding_discrepancy()
    }
}

pub fn prorate_settlement(
    date: SettlementDate,
    management_fee: f64,
    reserve_fund: f64,
) -> SettlementProration {
    SettlementProration {
        settlement_date: date,
        split: DaySplit::for_date(date),
        management_fee: prorate(date, management_fee),
        reserve_fund: prorate(date, reserve_fund),
    }
}
