//! Property tests for the computation engine.

use chrono::NaiveDate;
use computo_core::{
    chain, compute, Cause, ChainConfig, ChainMode, Ratio, Regime, RoundingMode, View,
};
use proptest::prelude::*;

fn arb_start() -> impl Strategy<Value = NaiveDate> {
    (1990i32..2040, 1u32..=12, 1u32..=31).prop_map(|(y, m, d)| {
        NaiveDate::from_ymd_opt(y, m, d)
            .or_else(|| NaiveDate::from_ymd_opt(y, m, 28))
            .unwrap()
    })
}

fn arb_cause() -> impl Strategy<Value = Cause> {
    (0u32..6, 0u32..12, 0u32..400, 0u32..800).prop_map(|(y, m, d, credit)| Cause {
        years: y,
        months: m,
        days: d,
        credit_days: credit,
        regime: None,
    })
}

fn arb_causes() -> impl Strategy<Value = Vec<Cause>> {
    prop::collection::vec(arb_cause(), 0..6)
}

fn arb_config() -> impl Strategy<Value = ChainConfig> {
    (
        prop_oneof![Just(ChainMode::NextDay), Just(ChainMode::SameDay)],
        prop_oneof![Just(Regime::Half), Just(Regime::TwoThirds)],
        prop_oneof![Just(View::Official), Just(View::Doctrinal)],
        prop_oneof![
            Just(RoundingMode::Ceil),
            Just(RoundingMode::Floor),
            Just(RoundingMode::Nearest)
        ],
        0u32..1000,
        any::<bool>(),
    )
        .prop_map(
            |(chain_mode, regime, view, rounding, global, apply)| ChainConfig {
                chain_mode,
                regime,
                view,
                rounding,
                global_credit_days: global,
                apply_global_credit_to_minimums: apply,
                ..ChainConfig::default()
            },
        )
}

proptest! {
    #[test]
    fn compute_is_deterministic(
        start in arb_start(),
        causes in arb_causes(),
        config in arb_config(),
    ) {
        let first = compute(start, &causes, &config);
        let second = compute(start, &causes, &config);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn applied_credit_is_clamped_to_gross_duration(
        start in arb_start(),
        causes in arb_causes(),
        same_day in any::<bool>(),
    ) {
        let mode = if same_day { ChainMode::SameDay } else { ChainMode::NextDay };
        let outcome = chain(start, &causes, mode);
        for span in &outcome.spans {
            prop_assert!(span.applied_credit >= 0);
            prop_assert!(span.applied_credit <= span.gross_days);
            prop_assert!(span.credited_days >= 0);
        }
    }

    #[test]
    fn credited_days_sum_to_reported_total(
        start in arb_start(),
        causes in arb_causes(),
        same_day in any::<bool>(),
    ) {
        let mode = if same_day { ChainMode::SameDay } else { ChainMode::NextDay };
        let outcome = chain(start, &causes, mode);
        let sum: i64 = outcome.spans.iter().map(|s| s.credited_days).sum();
        prop_assert_eq!(sum, outcome.total_credited_days);
        let gross: i64 = outcome.spans.iter().map(|s| s.gross_days).sum();
        prop_assert_eq!(gross, outcome.total_gross_days);
    }

    #[test]
    fn effective_base_never_exceeds_credited_total(
        start in arb_start(),
        causes in arb_causes(),
        config in arb_config(),
    ) {
        let result = compute(start, &causes, &config);
        prop_assert!(result.effective_base_days >= 0);
        prop_assert!(result.effective_base_days <= result.credited_total_days);
        prop_assert!(result.termination_base_days <= result.effective_base_days);
        prop_assert!(result.start_to_tmbi_days >= 0);
        prop_assert!(result.cet_days >= 0);
    }

    #[test]
    fn more_cause_credit_never_delays_completion(
        start in arb_start(),
        causes in arb_causes().prop_filter("need a cause", |c| !c.is_empty()),
        config in arb_config(),
        pick in any::<prop::sample::Index>(),
        extra in 1u32..200,
    ) {
        let before = compute(start, &causes, &config);
        let mut more = causes.clone();
        let i = pick.index(more.len());
        more[i].credit_days = more[i].credit_days.saturating_add(extra);
        let after = compute(start, &more, &config);
        // None (nothing left to serve) orders before any date.
        prop_assert!(after.completion_date <= before.completion_date);
    }

    #[test]
    fn more_global_credit_never_delays_minimums(
        start in arb_start(),
        causes in arb_causes(),
        config in arb_config(),
        extra in 1u32..300,
    ) {
        let config = ChainConfig { apply_global_credit_to_minimums: true, ..config };
        let before = compute(start, &causes, &config);
        let more = ChainConfig {
            global_credit_days: config.global_credit_days + extra,
            ..config.clone()
        };
        let after = compute(start, &causes, &more);
        prop_assert!(after.tm_days <= before.tm_days);
        prop_assert!(after.tm_view_date <= before.tm_view_date);
        prop_assert!(after.tmbi_date <= before.tmbi_date);
        prop_assert!(after.cet_view_date <= before.cet_view_date);
    }

    #[test]
    fn rounding_modes_are_ordered(days in 0i64..100_000, half in any::<bool>()) {
        let ratio = if half { Regime::Half.ratio() } else { Ratio::TWO_THIRDS };
        let ceil = ratio.apply(days, RoundingMode::Ceil);
        let nearest = ratio.apply(days, RoundingMode::Nearest);
        let floor = ratio.apply(days, RoundingMode::Floor);
        prop_assert!(ceil >= nearest);
        prop_assert!(nearest >= floor);
        prop_assert!(ceil - floor <= 1);
        let exact = ratio.fraction_of(days);
        prop_assert!((ceil as f64) >= exact - 1e-9);
        prop_assert!((floor as f64) <= exact + 1e-9);
    }
}
