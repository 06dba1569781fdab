//! Policy configuration for a computation.
//!
//! [`ChainConfig`] bundles every independently configurable policy axis. It
//! deserializes with per-field defaults so a partial `computo.toml` or case
//! file only needs to name what differs from [`ChainConfig::default`].

use serde::{Deserialize, Serialize};

use crate::cause::Cause;
use crate::error::InputError;

/// When the next cause's clock starts relative to the previous cause's end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChainMode {
    /// The next cause starts the day after the previous (adjusted) end.
    #[default]
    NextDay,
    /// The next cause starts on the same calendar day the previous one ended.
    SameDay,
}

/// Fraction of the sentence base used for the minimum term (TM).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Regime {
    #[serde(rename = "1/2")]
    Half,
    #[default]
    #[serde(rename = "2/3")]
    TwoThirds,
}

impl Regime {
    /// The regime as an exact fraction.
    #[must_use]
    pub fn ratio(self) -> Ratio {
        match self {
            Regime::Half => Ratio::new(1, 2),
            Regime::TwoThirds => Ratio::TWO_THIRDS,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Regime::Half => "1/2",
            Regime::TwoThirds => "2/3",
        }
    }

    /// Regime suggested by the causes themselves: two-thirds as soon as one
    /// cause is marked two-thirds, and also for an empty list.
    #[must_use]
    pub fn suggested_for(causes: &[Cause]) -> Regime {
        if causes.is_empty() || causes.iter().any(|c| c.regime == Some(Regime::TwoThirds)) {
            Regime::TwoThirds
        } else {
            Regime::Half
        }
    }
}

impl std::str::FromStr for Regime {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1/2" => Ok(Regime::Half),
            "2/3" => Ok(Regime::TwoThirds),
            other => Err(InputError::UnknownRegime(other.to_string())),
        }
    }
}

impl std::fmt::Display for Regime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Date-reporting convention for TM and CET.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    /// Exclusive convention: TM is shown one day after its inclusive date and
    /// CET one day before.
    #[default]
    Official,
    /// Inclusive convention: dates are shown as computed.
    Doctrinal,
}

/// Policy for turning a fractional day count into whole days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundingMode {
    /// Residual/official: round up, in favour of the longer minimum.
    #[default]
    Ceil,
    /// Truncated: keep the integer part.
    Floor,
    /// Mathematical: round half up.
    Nearest,
}

/// An exact non-negative fraction `num / den`.
///
/// Minimum-term fractions are evaluated in integer arithmetic so that, for
/// example, `732 × 2/3` is exactly 488 and never `488.00000000000006`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ratio {
    pub num: i64,
    pub den: i64,
}

impl Ratio {
    pub const TWO_THIRDS: Ratio = Ratio { num: 2, den: 3 };

    #[must_use]
    pub const fn new(num: i64, den: i64) -> Self {
        Self { num, den }
    }

    /// `days × ratio` as a float, for display only.
    #[must_use]
    pub fn fraction_of(self, days: i64) -> f64 {
        days as f64 * self.num as f64 / self.den as f64
    }

    /// `days × ratio` rounded with `mode`. Negative `days` count as zero.
    #[must_use]
    pub fn apply(self, days: i64, mode: RoundingMode) -> i64 {
        let scaled = days.max(0).saturating_mul(self.num);
        match mode {
            RoundingMode::Ceil => (scaled + self.den - 1).div_euclid(self.den),
            RoundingMode::Floor => scaled.div_euclid(self.den),
            RoundingMode::Nearest => (2 * scaled + self.den).div_euclid(2 * self.den),
        }
    }
}

/// Presentation-only shifts of the displayed TM and CET dates.
///
/// These never touch bases, day counts, TMBI or CET derivation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Adjustments {
    pub tm_days: i8,
    pub cet_days: i8,
}

impl Adjustments {
    /// Checks both shifts are within `-1..=1`.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::AdjustmentOutOfRange`] for the first shift
    /// outside the allowed range.
    pub fn validate(self) -> Result<Self, InputError> {
        for shift in [self.tm_days, self.cet_days] {
            if !(-1..=1).contains(&shift) {
                return Err(InputError::AdjustmentOutOfRange(shift));
            }
        }
        Ok(self)
    }
}

/// Policy bundle for one computation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    pub chain_mode: ChainMode,
    pub regime: Regime,
    pub view: View,
    pub rounding: RoundingMode,
    /// Expedient-wide credit, always subtracted from the completion date.
    pub global_credit_days: u32,
    /// Whether the global credit also reduces the TM/TMBI/CET base.
    pub apply_global_credit_to_minimums: bool,
    /// Reorder causes most-severe-first before chaining.
    pub order_most_severe_first: bool,
    pub adjustments: Adjustments,
}
