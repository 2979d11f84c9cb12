//! PostgreSQL implementation of CallSessionRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::call::CallSession;
use crate::domain::foundation::{
    CallSessionId, CallStatus, DomainError, ErrorCode, PhoneNumber, Timestamp,
};
use crate::domain::therapy::TherapyStage;
use crate::ports::CallSessionRepository;

const SESSION_COLUMNS: &str = "session_id, caller_number, status, therapy_stage, current_mood, \
     crisis_flag, is_completed, created_at, ended_at";

/// PostgreSQL implementation of CallSessionRepository.
#[derive(Clone)]
pub struct PostgresCallSessionRepository {
    pool: PgPool,
}

impl PostgresCallSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert(&self, session: &CallSession) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO call_sessions (
                session_id, caller_number, status, therapy_stage, current_mood,
                crisis_flag, is_completed, created_at, ended_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (session_id) DO NOTHING
            "#,
        )
        .bind(session.session_id().as_str())
        .bind(session.caller_number().as_str())
        .bind(session.status().as_str())
        .bind(session.stage().as_str())
        .bind(session.current_mood())
        .bind(session.crisis_flag())
        .bind(session.is_completed())
        .bind(session.created_at().as_datetime())
        .bind(session.ended_at().map(|t| *t.as_datetime()))
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}

#[async_trait]
impl CallSessionRepository for PostgresCallSessionRepository {
    async fn get_or_create(
        &self,
        id: &CallSessionId,
        caller_number: &PhoneNumber,
    ) -> Result<(CallSession, bool), DomainError> {
        let candidate = CallSession::new(id.clone(), caller_number.clone());
        let created = self
            .insert(&candidate)
            .await
            .map_err(|e| DomainError::database(format!("Failed to insert call session: {}", e)))?;

        let session = self.find_by_id(id).await?.ok_or_else(|| {
            DomainError::database(format!("Call session vanished after upsert: {}", id))
        })?;

        Ok((session, created))
    }

    async fn create(&self, session: &CallSession) -> Result<(), DomainError> {
        let created = self
            .insert(session)
            .await
            .map_err(|e| DomainError::database(format!("Failed to insert call session: {}", e)))?;

        if !created {
            return Err(DomainError::new(
                ErrorCode::SessionAlreadyExists,
                format!("Session already exists: {}", session.session_id()),
            ));
        }
        Ok(())
    }

    async fn update(&self, session: &CallSession) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE call_sessions SET
                status = $2,
                therapy_stage = $3,
                current_mood = $4,
                crisis_flag = crisis_flag OR $5,
                is_completed = $6,
                ended_at = $7
            WHERE session_id = $1
            "#,
        )
        .bind(session.session_id().as_str())
        .bind(session.status().as_str())
        .bind(session.stage().as_str())
        .bind(session.current_mood())
        .bind(session.crisis_flag())
        .bind(session.is_completed())
        .bind(session.ended_at().map(|t| *t.as_datetime()))
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to update call session: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::SessionNotFound,
                format!("Session not found: {}", session.session_id()),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &CallSessionId) -> Result<Option<CallSession>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM call_sessions WHERE session_id = $1",
            SESSION_COLUMNS
        ))
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch call session: {}", e)))?;

        row.map(row_to_session).transpose()
    }

    async fn list(&self) -> Result<Vec<CallSession>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM call_sessions ORDER BY created_at DESC, session_id",
            SESSION_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list call sessions: {}", e)))?;

        rows.into_iter().map(row_to_session).collect()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

pub(super) fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name)
        .map_err(|e| DomainError::database(format!("Failed to get {}: {}", name, e)))
}

fn row_to_session(row: PgRow) -> Result<CallSession, DomainError> {
    let session_id: String = column(&row, "session_id")?;
    let caller_number: String = column(&row, "caller_number")?;
    let status: String = column(&row, "status")?;
    let stage: String = column(&row, "therapy_stage")?;
    let current_mood: Option<String> = column(&row, "current_mood")?;
    let crisis_flag: bool = column(&row, "crisis_flag")?;
    let is_completed: bool = column(&row, "is_completed")?;
    let created_at: chrono::DateTime<chrono::Utc> = column(&row, "created_at")?;
    let ended_at: Option<chrono::DateTime<chrono::Utc>> = column(&row, "ended_at")?;

    let corrupt = |field: &str, e: String| {
        DomainError::database(format!("Invalid stored {}: {}", field, e))
            .with_detail("session_id", session_id.clone())
    };

    Ok(CallSession::reconstitute(
        CallSessionId::new(session_id.clone()).map_err(|e| corrupt("session_id", e.to_string()))?,
        PhoneNumber::new(caller_number).map_err(|e| corrupt("caller_number", e.to_string()))?,
        status
            .parse::<CallStatus>()
            .map_err(|e| corrupt("status", e.to_string()))?,
        stage
            .parse::<TherapyStage>()
            .map_err(|e| corrupt("therapy_stage", e.to_string()))?,
        current_mood,
        crisis_flag,
        is_completed,
        Timestamp::from_datetime(created_at),
        ended_at.map(Timestamp::from_datetime),
    ))
}
