use chrono::{Datelike, Duration, NaiveDate};
use proration_core::{
    calendar::{days_in_month, is_leap_year, SettlementDate},
    input::parse_amount,
    proration::{prorate, prorate_amount_text, prorate_settlement, round_half_away_from_zero},
};

fn every_day(from: (i32, u32, u32), to: (i32, u32, u32)) -> impl Iterator<Item = SettlementDate> {
    let start = NaiveDate::from_ymd_opt(from.0, from.1, from.2).unwrap();
    let end = NaiveDate::from_ymd_opt(to.0, to.1, to.2).unwrap();
    let days = (end - start).num_days();
    (0..=days).map(move |offset| SettlementDate::from(start + Duration::days(offset)))
}

#[test]
fn day_counts_cover_the_month_exactly() {
    for date in every_day((2023, 1, 1), (2025, 12, 31)) {
        let result = prorate(date, 10_000.0);
        assert_eq!(result.seller_days, date.day() - 1, "{date}");
        assert_eq!(result.seller_days + result.buyer_days, result.days_in_month, "{date}");
        assert!(result.buyer_days >= 1);
        assert_eq!(Some(result.days_in_month), days_in_month(date.year(), date.month()));
    }
}

#[test]
fn shares_stay_within_one_unit_of_the_monthly_amount() {
    let amounts = [0.0, 1.0, 15.0, 999.0, 10_000.0, 12_345.0, 87_654.0, 1_000_001.0];
    for date in every_day((2024, 1, 1), (2024, 12, 31)) {
        for amount in amounts {
            let result = prorate(date, amount);
            let gap = result.seller_amount + result.buyer_amount - amount as i64;
            assert!(gap.abs() <= 1, "{date} {amount}: gap {gap}");
            assert!(result.seller_amount >= 0 && result.buyer_amount >= 0);
        }
    }
}

#[test]
fn first_of_month_puts_everything_on_the_buyer() {
    for month in 1..=12 {
        let date = SettlementDate::new(2025, month, 1).unwrap();
        let result = prorate(date, 12_345.0);
        assert_eq!(result.seller_days, 0);
        assert_eq!(result.seller_amount, 0);
        assert_eq!(result.buyer_amount, 12_345);
    }
}

#[test]
fn seller_share_grows_with_the_settlement_day() {
    let mut previous = -1;
    for date in every_day((2025, 3, 1), (2025, 3, 31)) {
        let result = prorate(date, 31_000.0);
        assert!(result.seller_amount > previous);
        previous = result.seller_amount;
    }
    assert_eq!(previous, 30_000);
}

#[test]
fn leap_years_follow_the_gregorian_rule() {
    assert!(is_leap_year(2000));
    assert!(is_leap_year(2024));
    assert!(!is_leap_year(1900));
    assert!(!is_leap_year(2100));

    let leap = prorate(SettlementDate::new(2024, 2, 29).unwrap(), 2_900.0);
    assert_eq!((leap.days_in_month, leap.seller_days, leap.buyer_days), (29, 28, 1));
    assert_eq!((leap.seller_amount, leap.buyer_amount), (2_800, 100));

    let common = prorate(SettlementDate::new(2025, 2, 15).unwrap(), 2_800.0);
    assert_eq!((common.days_in_month, common.seller_amount, common.buyer_amount), (28, 1_400, 1_400));
}

#[test]
fn halves_round_away_from_zero_on_each_share() {
    assert_eq!(round_half_away_from_zero(0.5), 1);
    assert_eq!(round_half_away_from_zero(2.5), 3);
    assert_eq!(round_half_away_from_zero(-2.5), -3);
    assert_eq!(round_half_away_from_zero(2.4999), 2);

    let result = prorate(SettlementDate::new(2025, 4, 16).unwrap(), 15.0);
    assert_eq!((result.seller_amount, result.buyer_amount), (8, 8));
    assert_eq!(result.rounding_discrepancy(), 1);
}

#[test]
fn prorating_is_deterministic() {
    let date = SettlementDate::new(2025, 1, 11).unwrap();
    assert_eq!(prorate(date, 10_000.0), prorate(date, 10_000.0));
    assert_eq!(
        prorate_settlement(date, 10_000.0, 15_000.0),
        prorate_settlement(date, 10_000.0, 15_000.0)
    );
}

#[test]
fn non_numeric_amounts_prorate_as_zero() {
    let date = SettlementDate::new(2025, 1, 11).unwrap();
    for text in ["", "abc", "-500", "NaN", "inf", "¥"] {
        let result = prorate_amount_text(date, text);
        assert_eq!(result.monthly_amount, 0.0, "{text:?}");
        assert_eq!((result.seller_amount, result.buyer_amount), (0, 0));
    }
    assert_eq!(parse_amount("10,000"), 10_000.0);
    assert_eq!(parse_amount("12,500円"), 12_500.0);
    assert_eq!(prorate_amount_text(date, "10,000").seller_amount, 3_226);
}

#[test]
fn invalid_dates_are_rejected_before_prorating() {
    for text in ["2025-02-30", "2025-13-01", "2023-02-29", "11/01/2025", ""] {
        assert!(SettlementDate::parse(text).is_err(), "{text:?}");
    }
    assert!(SettlementDate::parse("2024-02-29").is_ok());
}

#[test]
fn dual_fee_burdens_sum_per_party() {
    let date = SettlementDate::new(2025, 1, 11).unwrap();
    let settlement = prorate_settlement(date, 10_000.0, 15_000.0);
    let seller = settlement.seller_burden();
    let buyer = settlement.buyer_burden();
    assert_eq!((seller.management_fee, seller.reserve_fund, seller.total), (3_226, 4_839, 8_065));
    assert_eq!((buyer.management_fee, buyer.reserve_fund, buyer.total), (6_774, 10_161, 16_935));
    assert_eq!(settlement.rounding_discrepancy(), 0);
    assert_eq!(settlement.settlement_date.date().weekday(), chrono::Weekday::Sat);
}
