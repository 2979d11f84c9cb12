//! PostgreSQL implementation of TurnRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use super::call_session_repository::column;
use crate::domain::call::{NewTurn, Turn, TurnRole};
use crate::domain::foundation::{CallSessionId, DomainError, Timestamp, TurnId};
use crate::ports::TurnRepository;

#[derive(Clone)]
pub struct PostgresTurnRepository {
    pool: PgPool,
}

impl PostgresTurnRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TurnRepository for PostgresTurnRepository {
    async fn append(&self, turn: NewTurn) -> Result<Turn, DomainError> {
        let row = sqlx::query(
            r#"
            INSERT INTO call_turns (session_id, role, content, transcription, audio_url)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, created_at
            "#,
        )
        .bind(turn.session_id.as_str())
        .bind(turn.role.as_str())
        .bind(&turn.content)
        .bind(turn.transcription.as_deref())
        .bind(turn.audio_url.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to insert turn: {}", e)))?;

        let id: i64 = column(&row, "id")?;
        let created_at: chrono::DateTime<chrono::Utc> = column(&row, "created_at")?;

        Ok(Turn::stored(
            TurnId::from_i64(id),
            turn,
            Timestamp::from_datetime(created_at),
        ))
    }

    async fn history(&self, session_id: &CallSessionId) -> Result<Vec<Turn>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, session_id, role, content, transcription, audio_url, created_at
            FROM call_turns
            WHERE session_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(session_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch turns: {}", e)))?;

        rows.into_iter().map(row_to_turn).collect()
    }
}

fn row_to_turn(row: PgRow) -> Result<Turn, DomainError> {
    let id: i64 = column(&row, "id")?;
    let session_id: String = column(&row, "session_id")?;
    let role: String = column(&row, "role")?;
    let content: String = column(&row, "content")?;
    let transcription: Option<String> = column(&row, "transcription")?;
    let audio_url: Option<String> = column(&row, "audio_url")?;
    let created_at: chrono::DateTime<chrono::Utc> = column(&row, "created_at")?;

    Ok(Turn::reconstitute(
        TurnId::from_i64(id),
        CallSessionId::new(session_id)
            .map_err(|e| DomainError::database(format!("Invalid stored session_id: {}", e)))?,
        role.parse::<TurnRole>()
            .map_err(|e| DomainError::database(format!("Invalid stored role: {}", e)))?,
        content,
        transcription,
        audio_url,
        Timestamp::from_datetime(created_at),
    ))
}
