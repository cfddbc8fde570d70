use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lowest mastery bucket, assigned to freshly created entries.
pub const STAGE_NEW: u8 = 1;
/// Highest mastery bucket. Not terminal: feedback can still move an entry back down.
pub const STAGE_LEARNED: u8 = 7;

/// Provenance marker for entries typed in by hand (as opposed to a source URL).
pub const MANUAL_ORIGIN: &str = "manual";

/// A single vocabulary pair owned by one user.
///
/// Field names on the wire follow the vocabulary API
/// (`vocID`, `userid`, `textFr`, `textDe`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabEntry {
    #[serde(rename = "vocID")]
    pub id: String,
    #[serde(rename = "userid")]
    pub owner_id: String,
    #[serde(rename = "textFr")]
    pub source_text: String,
    #[serde(rename = "textDe")]
    pub target_text: String,
    #[serde(rename = "source")]
    pub origin: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_stage")]
    pub stage: u8,
    #[serde(rename = "reviewCount", default)]
    pub review_count: u32,
    #[serde(rename = "dateAdded")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "lastReviewed", default)]
    pub last_reviewed: Option<DateTime<Utc>>,
}

fn default_stage() -> u8 {
    STAGE_NEW
}

/// User verdict on a single review card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewJudgment {
    Correct,
    NeedsPractice,
}

impl VocabEntry {
    /// Fresh entry: stage 1, never reviewed.
    pub fn new(
        id: String,
        owner_id: String,
        source_text: String,
        target_text: String,
        origin: String,
        tags: Vec<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner_id,
            source_text,
            target_text,
            origin,
            tags,
            stage: STAGE_NEW,
            review_count: 0,
            created_at,
            last_reviewed: None,
        }
    }

    /// Virtual "not yet reviewed" bucket.
    pub fn never_reviewed(&self) -> bool {
        self.review_count == 0
    }

    /// Apply one review judgment: stage moves one bucket up or down and
    /// saturates at the [1,7] bounds, the review counter advances, and the
    /// judgment time is recorded. Never fails, never leaves the range.
    pub fn apply_judgment(&mut self, judgment: ReviewJudgment, at: DateTime<Utc>) {
        let next = match judgment {
            ReviewJudgment::Correct => self.stage as i32 + 1,
            ReviewJudgment::NeedsPractice => self.stage as i32 - 1,
        };
        self.stage = clamp_stage(next);
        self.review_count += 1;
        self.last_reviewed = Some(at);
    }
}

/// Clamp an arbitrary stage value into the valid [1,7] range.
pub fn clamp_stage(stage: i32) -> u8 {
    stage.clamp(STAGE_NEW as i32, STAGE_LEARNED as i32) as u8
}
