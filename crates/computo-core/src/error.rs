//! Error types for computo.
//!
//! The computation functions themselves are infallible: degenerate chains
//! produce a result with `valid = false`. Errors only arise at the adapter
//! boundary (parsing dates and case files) and from the credit solver.

use thiserror::Error;

/// Top-level result type for computo operations.
pub type Result<T> = std::result::Result<T, ComputoError>;

/// Top-level error type for computo.
#[derive(Debug, Error)]
pub enum ComputoError {
    #[error("date error: {0}")]
    Date(#[from] DateError),

    #[error("input error: {0}")]
    Input(#[from] InputError),

    #[error("solver error: {0}")]
    Solver(#[from] SolverError),

    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Errors raised while turning `DD/MM/YYYY` text into a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("expected a date in DD/MM/YYYY format, got '{0}'")]
    Malformed(String),

    #[error("'{input}' is not a calendar date (day {day}, month {month}, year {year})")]
    OutOfRange {
        input: String,
        day: u32,
        month: u32,
        year: i32,
    },
}

/// Errors in caller-supplied computation inputs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("missing start date")]
    MissingStart,

    #[error("invalid cause '{0}': expected YEARS,MONTHS,DAYS[,CREDIT[,REGIME]]")]
    MalformedCause(String),

    #[error("unknown regime '{0}': expected 1/2 or 2/3")]
    UnknownRegime(String),

    #[error("presentation adjustment {0} is outside -1..=1")]
    AdjustmentOutOfRange(i8),

    #[error("unsupported case file extension '{0}': expected json, yaml, yml or toml")]
    UnsupportedCaseFile(String),
}

/// Explicit failure outcomes of the credit-distribution solver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolverError {
    #[error("no causes to distribute credit over")]
    NoCauses,

    #[error("target date {target} is before the start date {start}")]
    TargetBeforeStart { start: String, target: String },

    #[error(
        "target date {target} is later than the current completion date {current}; \
         it cannot be reached by adding credit"
    )]
    TargetAfterCompletion { current: String, target: String },

    #[error(
        "target date requires more credit than available capacity \
         (needs {required} days, capacity is {capacity})"
    )]
    InsufficientCapacity { required: i64, capacity: i64 },
}
