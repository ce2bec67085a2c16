//! Presentation of a settlement proration: money and date formatting, the
//! day-split bar and the rounding notice.

use serde::Serialize;

use crate::{
    calendar::SettlementDate,
    config::Config,
    currency::{format_date, format_yen, FormatOptions, LocaleConfig},
    proration::{
        round_half_away_from_zero, DaySplit, Party, PartyBurden, ProrationResult,
        SettlementProration,
    },
};

pub const ROUNDING_DISCLAIMER: &str =
    "Each share is rounded to the nearest currency unit on its own, so the shares may differ from the monthly amount by one unit.";

const SELLER_CELL: char = '█';
const BUYER_CELL: char = '░';

/// Draws the seller/buyer day split as a fixed-width bar with percentages.
pub fn share_bar(split: &DaySplit, width: usize) -> String {
    let width = width.max(1);
    let seller_share = split.share_of(Party::Seller);
    let seller_cells = ((width as f64) * seller_share).round() as usize;
    let seller_cells = seller_cells.min(width);
    let mut bar = String::with_capacity(width + 2);
    bar.push('[');
    bar.extend(std::iter::repeat(SELLER_CELL).take(seller_cells));
    bar.extend(std::iter::repeat(BUYER_CELL).take(width - seller_cells));
    bar.push(']');
    format!(
        "{} Seller {:.1}% | Buyer {:.1}%",
        bar,
        seller_share * 100.0,
        split.share_of(Party::Buyer) * 100.0
    )
}

/// Formats results with the active locale.
#[derive(Debug, Clone)]
pub struct ReportFormatter {
    locale: LocaleConfig,
    options: FormatOptions,
    bar_width: usize,
}

impl ReportFormatter {
    pub fn new(
        locale: LocaleConfig,
        options: FormatOptions,
        bar_width: usize,
    ) -> Self {
        Self {
            locale,
            options,
            bar_width,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.locale_config(),
            config.format_options(),
            config.bar_width,
        )
    }

    pub fn money(&self, amount: i64) -> String {
        format_yen(amount, &self.locale, &self.options)
    }

    pub fn date(&self, date: SettlementDate) -> String {
        format_date(&self.locale, date.date())
    }

    pub fn heading(&self, settlement: &SettlementProration) -> String {
        format!(
            "Settlement on {} ({} days in month)",
            self.date(settlement.settlement_date),
            settlement.split.days_in_month
        )
    }

    pub fn burden_lines(&self, burden: &PartyBurden) -> Vec<String> {
        vec![
            format!("{} burden ({} days)", burden.party.label(), burden.days),
            format!("  Management fee: {}", self.money(burden.management_fee)),
            format!("  Reserve fund:   {}", self.money(burden.reserve_fund)),
            format!("  Total:          {}", self.money(burden.total)),
        ]
    }

    /// Lines for a single prorated charge.
    pub fn single_lines(&self, date: SettlementDate, result: &ProrationResult) -> Vec<String> {
        let mut lines = vec![
            format!("Settlement on {}", self.date(date)),
            format!(
                "Seller: {} days, {}",
                result.seller_days,
                self.money(result.seller_amount)
            ),
            format!(
                "Buyer:  {} days, {}",
                result.buyer_days,
                self.money(result.buyer_amount)
            ),
            share_bar(&result.split(), self.bar_width),
        ];
        lines.extend(self.rounding_lines(
            result.allocated_total(),
            result.monthly_amount,
            result.rounding_discrepancy(),
        ));
        lines
    }

    pub fn render(&self, settlement: &SettlementProration) -> Vec<String> {
        let mut lines = vec![self.heading(settlement)];
        lines.extend(self.burden_lines(&settlement.seller_burden()));
        lines.extend(self.burden_lines(&settlement.buyer_burden()));
        lines.push(share_bar(&settlement.split, self.bar_width));
        lines.extend(self.rounding_lines(
            settlement.seller_burden().total + settlement.buyer_burden().total,
            settlement.monthly_total(),
            settlement.rounding_discrepancy(),
        ));
        lines
    }

    fn rounding_lines(&self, allocated: i64, monthly: f64, discrepancy: i64) -> Vec<String> {
        let mut lines = Vec::with_capacity(2);
        if discrepancy != 0 {
            lines.push(format!(
                "Shares total {} against monthly charges of {} ({:+}).",
                self.money(allocated),
                self.money(round_half_away_from_zero(monthly)),
                discrepancy
            ));
        }
        lines.push(format!("Note: {}", ROUNDING_DISCLAIMER));
        lines
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    settlement_date: SettlementDate,
    days_in_month: u32,
    seller: PartyBurden,
    buyer: PartyBurden,
    management_fee: &'a ProrationResult,
    reserve_fund: &'a ProrationResult,
    rounding_discrepancy: i64,
}

pub fn to_json(settlement: &SettlementProration) -> serde_json::Result<String> {
    let report = JsonReport {
        settlement_date: settlement.settlement_date,
        days_in_month: settlement.split.days_in_month,
        seller: settlement.seller_burden(),
        buyer: settlement.buyer_burden(),
        management_fee: &settlement.management_fee,
        reserve_fund: &settlement.reserve_fund,
        rounding_discrepancy: settlement.rounding_discrepancy(),
    };
    serde_json::to_string_pretty(&report)
}
