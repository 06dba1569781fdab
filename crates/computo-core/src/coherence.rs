//! Non-fatal coherence checks over a finished computation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Something in a result that deserves a second look. Never blocks output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CoherenceWarning {
    CompletionBeforeStart {
        start: NaiveDate,
        completion: NaiveDate,
    },
    TmbiAfterTm {
        tm: NaiveDate,
        tmbi: NaiveDate,
    },
    TmAfterCompletion {
        tm: NaiveDate,
        completion: NaiveDate,
    },
    CetAfterTmbi {
        cet: NaiveDate,
        tmbi: NaiveDate,
    },
    /// Global credit exceeds the credited total; the base was floored at 0.
    GlobalCreditExceedsTotal {
        credited_total: i64,
        global_credit: i64,
    },
}

impl std::fmt::Display for CoherenceWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CompletionBeforeStart { start, completion } => {
                write!(f, "completion date {completion} is before the start {start}")
            }
            Self::TmbiAfterTm { tm, tmbi } => write!(f, "TMBI {tmbi} is after TM {tm}"),
            Self::TmAfterCompletion { tm, completion } => {
                write!(f, "TM {tm} is after the completion date {completion}")
            }
            Self::CetAfterTmbi { cet, tmbi } => write!(f, "CET {cet} is after TMBI {tmbi}"),
            Self::GlobalCreditExceedsTotal {
                credited_total,
                global_credit,
            } => write!(
                f,
                "global credit of {global_credit} days exceeds the credited total of {credited_total} days"
            ),
        }
    }
}

/// Milestones checked for coherence.
#[derive(Debug, Clone, Copy)]
pub struct Milestones {
    pub start: NaiveDate,
    pub completion: Option<NaiveDate>,
    pub tm: Option<NaiveDate>,
    pub tmbi: Option<NaiveDate>,
    pub cet: Option<NaiveDate>,
    pub credited_total: i64,
    pub global_credit: i64,
}

#[must_use]
pub fn check(m: &Milestones) -> Vec<CoherenceWarning> {
    let mut warnings = Vec::new();

    if let Some(completion) = m.completion {
        if completion < m.start {
            warnings.push(CoherenceWarning::CompletionBeforeStart {
                start: m.start,
                completion,
            });
        }
    }
    if let (Some(tm), Some(tmbi)) = (m.tm, m.tmbi) {
        if tmbi > tm {
            warnings.push(CoherenceWarning::TmbiAfterTm { tm, tmbi });
        }
    }
    if let (Some(tm), Some(completion)) = (m.tm, m.completion) {
        if tm > completion {
            warnings.push(CoherenceWarning::TmAfterCompletion { tm, completion });
        }
    }
    if let (Some(cet), Some(tmbi)) = (m.cet, m.tmbi) {
        if cet > tmbi {
            warnings.push(CoherenceWarning::CetAfterTmbi { cet, tmbi });
        }
    }
    if m.credited_total - m.global_credit < 0 {
        warnings.push(CoherenceWarning::GlobalCreditExceedsTotal {
            credited_total: m.credited_total,
            global_credit: m.global_credit,
        });
    }

    warnings
}
