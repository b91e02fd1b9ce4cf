//! Data models for the phrase collection

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A phrase/translation pair with its review history
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phrase {
    pub id: Uuid,
    pub text: String,
    pub translation: String,
    pub created_at: DateTime<Utc>,
    /// Rounds answered "know it" (never decremented)
    #[serde(default)]
    pub success_count: u32,
    /// Rounds answered "don't know" or timed out (never decremented)
    #[serde(default)]
    pub failure_count: u32,
}

impl Phrase {
    pub fn new(text: String, translation: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            text,
            translation,
            created_at: Utc::now(),
            success_count: 0,
            failure_count: 0,
        }
    }

    /// Total completed review rounds for this phrase
    pub fn total_attempts(&self) -> u32 {
        self.success_count + self.failure_count
    }

    /// Record the outcome of one completed review round
    pub fn record_outcome(&mut self, correct: bool) {
        if correct {
            self.success_count += 1;
        } else {
            self.failure_count += 1;
        }
    }
}
