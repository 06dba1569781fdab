//! Reference scenarios: start 01/01/2020 (except scenario 4), next-day
//! chaining, official view, ceil rounding.

use chrono::NaiveDate;
use computo_core::{compute, Cause, ChainConfig, Regime};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn two_years() -> Vec<Cause> {
    vec![Cause::new(2, 0, 0)]
}

#[test]
fn two_year_cause_without_credit() {
    let result = compute(ymd(2020, 1, 1), &two_years(), &ChainConfig::default());

    assert!(result.valid);
    assert_eq!(result.gross_total_days, 732);
    assert_eq!(result.credited_total_days, 732);
    assert_eq!(result.effective_base_days, 732);
    assert_eq!(result.completion_date, Some(ymd(2022, 1, 1)));

    assert!((result.tm_fraction - 488.0).abs() < 1e-9);
    assert_eq!(result.tm_days, 488);
    assert_eq!(result.tm_inclusive_date, Some(ymd(2021, 5, 2)));
    assert_eq!(result.tm_view_date, Some(ymd(2021, 5, 3)));
    assert_eq!(result.tmbi_date, Some(ymd(2020, 5, 3)));
    assert_eq!(result.start_to_tmbi_days, 124);

    assert!((result.cet_fraction - 82.666_666_666_7).abs() < 1e-6);
    assert_eq!(result.cet_days, 83);
    assert_eq!(result.cet_inclusive_date, Some(ymd(2020, 3, 23)));
    assert_eq!(result.cet_view_date, Some(ymd(2020, 3, 22)));
    assert!(result.warnings.is_empty());
}

#[test]
fn global_credit_applied_to_minimums() {
    let config = ChainConfig {
        global_credit_days: 100,
        apply_global_credit_to_minimums: true,
        ..ChainConfig::default()
    };
    let result = compute(ymd(2020, 1, 1), &two_years(), &config);

    assert!(result.valid);
    assert_eq!(result.effective_base_days, 632);
    assert_eq!(result.global_credit_applied_to_minimums, 100);
    assert_eq!(result.completion_date, Some(ymd(2021, 9, 23)));

    assert!((result.tm_fraction - 421.333_333_333_3).abs() < 1e-6);
    assert_eq!(result.tm_days, 422);
    assert_eq!(result.tm_inclusive_date, Some(ymd(2021, 2, 25)));
    assert_eq!(result.tm_view_date, Some(ymd(2021, 2, 26)));
    assert_eq!(result.tmbi_date, Some(ymd(2020, 2, 26)));
    assert_eq!(result.start_to_tmbi_days, 57);

    assert_eq!(result.cet_days, 38);
    assert_eq!(result.cet_inclusive_date, Some(ymd(2020, 2, 7)));
    assert_eq!(result.cet_view_date, Some(ymd(2020, 2, 6)));
}

#[test]
fn global_credit_not_applied_to_minimums_still_moves_completion() {
    let config = ChainConfig {
        global_credit_days: 100,
        apply_global_credit_to_minimums: false,
        ..ChainConfig::default()
    };
    let result = compute(ymd(2020, 1, 1), &two_years(), &config);

    assert!(result.valid);
    assert_eq!(result.effective_base_days, 732);
    assert_eq!(result.global_credit_days, 100);
    assert_eq!(result.global_credit_applied_to_minimums, 0);
    assert_eq!(result.completion_date, Some(ymd(2021, 9, 23)));

    assert_eq!(result.tm_days, 488);
    assert_eq!(result.tm_inclusive_date, Some(ymd(2021, 5, 2)));
    assert_eq!(result.tm_view_date, Some(ymd(2021, 5, 3)));
    assert_eq!(result.tmbi_date, Some(ymd(2020, 5, 3)));
}

#[test]
fn six_month_cause_under_half_regime() {
    let config = ChainConfig {
        regime: Regime::Half,
        ..ChainConfig::default()
    };
    let result = compute(ymd(2021, 7, 15), &[Cause::new(0, 6, 0)], &config);

    assert!(result.valid);
    assert_eq!(result.gross_total_days, 185);
    assert_eq!(result.effective_base_days, 185);
    assert_eq!(result.completion_date, Some(ymd(2022, 1, 15)));

    assert!((result.tm_fraction - 92.5).abs() < 1e-9);
    assert_eq!(result.tm_days, 93);
    assert_eq!(result.tm_inclusive_date, Some(ymd(2021, 10, 15)));
    assert_eq!(result.tm_view_date, Some(ymd(2021, 10, 16)));
    assert_eq!(result.tmbi_date, Some(ymd(2020, 10, 16)));
    assert_eq!(result.start_to_tmbi_days, 0);

    assert_eq!(result.cet_fraction, 0.0);
    assert_eq!(result.cet_days, 0);
    assert_eq!(result.cet_inclusive_date, None);
    assert_eq!(result.cet_view_date, None);
}

#[test]
fn per_cause_credit_chains_into_following_causes() {
    let causes = vec![
        Cause::new(1, 0, 0).with_credit(30),
        Cause::new(0, 6, 0),
        Cause::new(0, 0, 45).with_credit(5),
    ];
    let result = compute(ymd(2020, 1, 1), &causes, &ChainConfig::default());

    // Gross: 01/01/2020 → 01/01/2021 (367), 02/01/2021 → 02/07/2021 (182),
    // 03/07/2021 + 44 days (45).
    assert_eq!(result.spans[0].gross_days, 367);
    assert_eq!(result.spans[1].gross_days, 182);
    assert_eq!(result.spans[2].gross_days, 45);
    assert_eq!(result.gross_total_days, 594);
    assert_eq!(result.gross_chain_end, ymd(2021, 8, 16));

    assert_eq!(result.per_cause_credit_days, 35);
    assert_eq!(result.credited_total_days, 559);
    assert_eq!(result.completion_date, Some(ymd(2021, 7, 12)));
    assert_eq!(result.credited_chain_end, result.completion_date.unwrap());
}
