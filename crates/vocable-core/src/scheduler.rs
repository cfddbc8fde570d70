use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};

use crate::entry::{STAGE_LEARNED, STAGE_NEW, VocabEntry};

/// Selection criterion for a bulk read.
///
/// `Today` and `Yesterday` compare calendar days of `created_at`;
/// `LastSevenDays` is a trailing 7*24h window from "now"; `Stage(n)`
/// matches one mastery bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    Today,
    Yesterday,
    LastSevenDays,
    Stage(u8),
}

#[derive(Debug, thiserror::Error)]
#[error("unknown filter mode: {0}")]
pub struct ParseFilterModeError(String);

impl FilterMode {
    pub fn matches(&self, entry: &VocabEntry, now: DateTime<Utc>) -> bool {
        match *self {
            FilterMode::Today => entry.created_at.date_naive() == now.date_naive(),
            FilterMode::Yesterday => {
                now.date_naive()
                    .pred_opt()
                    .is_some_and(|d| entry.created_at.date_naive() == d)
            }
            FilterMode::LastSevenDays => {
                let age = now.signed_duration_since(entry.created_at);
                age >= Duration::zero() && age < Duration::days(7)
            }
            FilterMode::Stage(n) => entry.stage == n,
        }
    }
}

impl fmt::Display for FilterMode {
    /// Wire form used as the `mode` query parameter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            FilterMode::Today => write!(f, "today"),
            FilterMode::Yesterday => write!(f, "yesterday"),
            FilterMode::LastSevenDays => write!(f, "last-7-days"),
            FilterMode::Stage(n) => write!(f, "stage-{n}"),
        }
    }
}

impl FromStr for FilterMode {
    type Err = ParseFilterModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "today" => Ok(FilterMode::Today),
            "yesterday" => Ok(FilterMode::Yesterday),
            "last-7-days" => Ok(FilterMode::LastSevenDays),
            _ => {
                let stage = s
                    .strip_prefix("stage-")
                    .and_then(|n| n.parse::<u8>().ok())
                    .filter(|n| (STAGE_NEW..=STAGE_LEARNED).contains(n));
                stage
                    .map(FilterMode::Stage)
                    .ok_or_else(|| ParseFilterModeError(s.to_string()))
            }
        }
    }
}

/// Select entries matching `mode`, capped at `count` (`None` = no cap).
/// Order is preserved: first-N in the order the store handed them over,
/// no re-sort, no randomization.
pub fn select(
    entries: &[VocabEntry],
    mode: FilterMode,
    count: Option<usize>,
    now: DateTime<Utc>,
) -> Vec<VocabEntry> {
    entries
        .iter()
        .filter(|e| mode.matches(e, now))
        .take(count.unwrap_or(usize::MAX))
        .cloned()
        .collect()
}

/// Swap an entry with its successor. Pure positional change: stage,
/// review count and remote state are untouched. Returns false when
/// `index` has no successor.
pub fn swap_adjacent(entries: &mut [VocabEntry], index: usize) -> bool {
    if index + 1 < entries.len() {
        entries.swap(index, index + 1);
        true
    } else {
        false
    }
}
