//! PostgreSQL implementation of CallSessionReader.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, Timestamp};
use crate::ports::{CallAnalytics, CallSessionReader, MoodCount, RECENT_ACTIVITY_DAYS};

#[derive(Clone)]
pub struct PostgresCallSessionReader {
    pool: PgPool,
}

impl PostgresCallSessionReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CallSessionReader for PostgresCallSessionReader {
    async fn analytics(&self, now: Timestamp) -> Result<CallAnalytics, DomainError> {
        let since = now.minus_days(RECENT_ACTIVITY_DAYS);

        let (total, completed, crisis, recent): (i64, i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT
                COUNT(*),
                COUNT(*) FILTER (WHERE is_completed),
                COUNT(*) FILTER (WHERE crisis_flag),
                COUNT(*) FILTER (WHERE created_at >= $1)
            FROM call_sessions
            "#,
        )
        .bind(since.as_datetime())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to count call sessions: {}", e)))?;

        let moods: Vec<(String, i64)> = sqlx::query_as(
            r#"
            SELECT current_mood, COUNT(*)
            FROM call_sessions
            WHERE current_mood IS NOT NULL
            GROUP BY current_mood
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to count moods: {}", e)))?;

        Ok(CallAnalytics::from_counts(
            total as u64,
            completed as u64,
            crisis as u64,
            moods
                .into_iter()
                .map(|(mood, count)| MoodCount::new(mood, count as u64))
                .collect(),
            recent as u64,
        ))
    }
}
