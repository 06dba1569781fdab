//! # computo-core
//!
//! Date and credit computation engine for chained custodial terms.
//!
//! This crate defines the pure computation core used by the other computo
//! crates:
//! - Calendar primitives ([`calendar`]) over UTC-free [`chrono::NaiveDate`]
//! - [`Cause`] and the cause-span calculator
//! - [`ChainConfig`]: chaining mode, regime, view, rounding and credit policy
//! - The chaining engine ([`chain()`]) over gross and credited timelines
//! - The minimum-term pipeline ([`minimums`]): TM → TMBI → CET
//! - [`compute`] / [`Expedient::compute`] producing a [`ComputationResult`]
//! - Error hierarchy ([`ComputoError`], [`DateError`], [`SolverError`])
//!
//! Nothing here performs I/O or reads ambient state.

pub mod calendar;
pub mod cause;
pub mod chain;
pub mod coherence;
pub mod config;
pub mod engine;
pub mod error;
pub mod minimums;

pub use cause::{
    cause_duration, cause_end, most_severe_first_indices, order_most_severe_first, Cause,
};
pub use chain::{chain, CauseSpan, ChainOutcome};
pub use coherence::CoherenceWarning;
pub use config::{Adjustments, ChainConfig, ChainMode, Ratio, Regime, RoundingMode, View};
pub use engine::{compute, compute_with_overrides, ComputationResult, Expedient};
pub use error::{ComputoError, DateError, InputError, Result, SolverError};
pub use minimums::{Bases, MinimumOverrides, MinimumTerms};
