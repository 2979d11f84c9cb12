//! Call session reader port (read side).
//!
//! Aggregate queries over stored sessions for the admin dashboard.

use crate::domain::foundation::{DomainError, Timestamp};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Days counted as recent activity.
pub const RECENT_ACTIVITY_DAYS: i64 = 7;

#[async_trait]
pub trait CallSessionReader: Send + Sync {
    /// Compute dashboard counters as of `now`.
    async fn analytics(&self, now: Timestamp) -> Result<CallAnalytics, DomainError>;
}

/// Session counters for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallAnalytics {
    pub total_sessions: u64,
    pub completed_sessions: u64,
    /// Percentage of sessions completed; 0 when there are none.
    pub completion_rate: f64,
    pub crisis_sessions: u64,
    /// Sessions per detected mood, most frequent first.
    pub mood_distribution: Vec<MoodCount>,
    pub recent_sessions_7days: u64,
}

impl CallAnalytics {
    /// Builds the view from raw counts, deriving the completion rate and
    /// ordering the mood distribution.
    pub fn from_counts(
        total_sessions: u64,
        completed_sessions: u64,
        crisis_sessions: u64,
        mut mood_distribution: Vec<MoodCount>,
        recent_sessions_7days: u64,
    ) -> Self {
        let completion_rate = if total_sessions > 0 {
            completed_sessions as f64 / total_sessions as f64 * 100.0
        } else {
            0.0
        };
        mood_distribution.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.mood.cmp(&b.mood)));

        Self {
            total_sessions,
            completed_sessions,
            completion_rate,
            crisis_sessions,
            mood_distribution,
            recent_sessions_7days,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodCount {
    pub mood: String,
    pub count: u64,
}

impl MoodCount {
    pub fn new(mood: impl Into<String>, count: u64) -> Self {
        Self {
            mood: mood.into(),
            count,
        }
    }
}
