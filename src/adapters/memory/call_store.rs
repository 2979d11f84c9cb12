//! In-Memory Call Store
//!
//! Implements the session, turn and analytics ports over process memory.
//! Used when no database is configured, and by tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::call::{CallSession, NewTurn, Turn};
use crate::domain::foundation::{
    CallSessionId, DomainError, ErrorCode, PhoneNumber, Timestamp, TurnId,
};
use crate::ports::{
    CallAnalytics, CallSessionReader, CallSessionRepository, MoodCount, TurnRepository,
    RECENT_ACTIVITY_DAYS,
};

#[derive(Debug, Default)]
struct TurnLog {
    next_id: i64,
    by_session: HashMap<CallSessionId, Vec<Turn>>,
}

/// In-memory storage for call sessions and turns.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCallStore {
    sessions: Arc<RwLock<HashMap<CallSessionId, CallSession>>>,
    turns: Arc<RwLock<TurnLog>>,
}

impl InMemoryCallStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions.
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Number of stored turns across all sessions.
    pub async fn turn_count(&self) -> usize {
        self.turns
            .read()
            .await
            .by_session
            .values()
            .map(Vec::len)
            .sum()
    }
}

#[async_trait]
impl CallSessionRepository for InMemoryCallStore {
    async fn get_or_create(
        &self,
        id: &CallSessionId,
        caller_number: &PhoneNumber,
    ) -> Result<(CallSession, bool), DomainError> {
        let mut sessions = self.sessions.write().await;
        if let Some(existing) = sessions.get(id) {
            return Ok((existing.clone(), false));
        }

        let session = CallSession::new(id.clone(), caller_number.clone());
        sessions.insert(id.clone(), session.clone());
        Ok((session, true))
    }

    async fn create(&self, session: &CallSession) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(session.session_id()) {
            return Err(DomainError::new(
                ErrorCode::SessionAlreadyExists,
                format!("Session already exists: {}", session.session_id()),
            ));
        }
        sessions.insert(session.session_id().clone(), session.clone());
        Ok(())
    }

    async fn update(&self, session: &CallSession) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;
        let stored = sessions.get_mut(session.session_id()).ok_or_else(|| {
            DomainError::new(
                ErrorCode::SessionNotFound,
                format!("Session not found: {}", session.session_id()),
            )
        })?;

        // Same column set as the SQL update; the crisis flag only rises.
        *stored = CallSession::reconstitute(
            stored.session_id().clone(),
            stored.caller_number().clone(),
            session.status(),
            session.stage(),
            session.current_mood().map(str::to_string),
            stored.crisis_flag() || session.crisis_flag(),
            session.is_completed(),
            *stored.created_at(),
            session.ended_at().copied(),
        );
        Ok(())
    }

    async fn find_by_id(&self, id: &CallSessionId) -> Result<Option<CallSession>, DomainError> {
        Ok(self.sessions.read().await.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<CallSession>, DomainError> {
        let mut sessions: Vec<CallSession> = self.sessions.read().await.values().cloned().collect();
        sessions.sort_by(|a, b| {
            b.created_at()
                .cmp(a.created_at())
                .then_with(|| a.session_id().as_str().cmp(b.session_id().as_str()))
        });
        Ok(sessions)
    }
}

#[async_trait]
impl TurnRepository for InMemoryCallStore {
    async fn append(&self, turn: NewTurn) -> Result<Turn, DomainError> {
        if !self.sessions.read().await.contains_key(&turn.session_id) {
            return Err(DomainError::new(
                ErrorCode::SessionNotFound,
                format!("Session not found: {}", turn.session_id),
            ));
        }

        let mut log = self.turns.write().await;
        log.next_id += 1;
        let stored = Turn::stored(TurnId::from_i64(log.next_id), turn, Timestamp::now());
        log.by_session
            .entry(stored.session_id().clone())
            .or_default()
            .push(stored.clone());
        Ok(stored)
    }

    async fn history(&self, session_id: &CallSessionId) -> Result<Vec<Turn>, DomainError> {
        Ok(self
            .turns
            .read()
            .await
            .by_session
            .get(session_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl CallSessionReader for InMemoryCallStore {
    async fn analytics(&self, now: Timestamp) -> Result<CallAnalytics, DomainError> {
        let since = now.minus_days(RECENT_ACTIVITY_DAYS);
        let sessions = self.sessions.read().await;

        let mut moods: HashMap<&str, u64> = HashMap::new();
        for mood in sessions.values().filter_map(|s| s.current_mood()) {
            *moods.entry(mood).or_default() += 1;
        }

        Ok(CallAnalytics::from_counts(
            sessions.len() as u64,
            sessions.values().filter(|s| s.is_completed()).count() as u64,
            sessions.values().filter(|s| s.crisis_flag()).count() as u64,
            moods
                .into_iter()
                .map(|(mood, count)| MoodCount::new(mood, count))
                .collect(),
            sessions
                .values()
                .filter(|s| *s.created_at() >= since)
                .count() as u64,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::therapy::TherapyStage;

    fn id(s: &str) -> CallSessionId {
        CallSessionId::new(s).unwrap()
    }

    fn caller() -> PhoneNumber {
        PhoneNumber::new("+254700000000").unwrap()
    }

    #[tokio::test]
    async fn get_or_create_is_idempotent() {
        let store = InMemoryCallStore::new();

        let (first, created) = store.get_or_create(&id("S1"), &caller()).await.unwrap();
        assert!(created);
        let (second, created_again) = store
            .get_or_create(&id("S1"), &PhoneNumber::new("+254711111111").unwrap())
            .await
            .unwrap();

        assert!(!created_again);
        assert_eq!(first, second);
        assert_eq!(second.caller_number(), &caller());
        assert_eq!(store.session_count().await, 1);
    }

    #[tokio::test]
    async fn create_rejects_duplicates() {
        let store = InMemoryCallStore::new();
        let session = CallSession::new(id("S1"), caller());

        store.create(&session).await.unwrap();
        let err = store.create(&session).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::SessionAlreadyExists);
    }

    #[tokio::test]
    async fn update_never_clears_crisis_flag() {
        let store = InMemoryCallStore::new();
        let (mut escalated, _) = store.get_or_create(&id("S1"), &caller()).await.unwrap();
        let stale = escalated.clone();

        escalated.escalate();
        store.update(&escalated).await.unwrap();
        store.update(&stale).await.unwrap();

        let stored = store.find_by_id(&id("S1")).await.unwrap().unwrap();
        assert!(stored.crisis_flag());
    }

    #[tokio::test]
    async fn update_unknown_session_is_not_found() {
        let store = InMemoryCallStore::new();
        let err = store
            .update(&CallSession::new(id("missing"), caller()))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::SessionNotFound);
    }

    #[tokio::test]
    async fn history_keeps_append_order() {
        let store = InMemoryCallStore::new();
        store.get_or_create(&id("S1"), &caller()).await.unwrap();

        for i in 0..3 {
            store
                .append(NewTurn::assistant(id("S1"), format!("turn {}", i)))
                .await
                .unwrap();
        }

        let history = store.history(&id("S1")).await.unwrap();
        let contents: Vec<&str> = history.iter().map(|t| t.content()).collect();
        assert_eq!(contents, vec!["turn 0", "turn 1", "turn 2"]);
        assert!(history.windows(2).all(|w| w[0].id().as_i64() < w[1].id().as_i64()));
    }

    #[tokio::test]
    async fn append_requires_existing_session() {
        let store = InMemoryCallStore::new();
        let err = store
            .append(NewTurn::assistant(id("ghost"), "hello"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::SessionNotFound);
        assert_eq!(store.turn_count().await, 0);
    }

    #[tokio::test]
    async fn analytics_counts_sessions() {
        let store = InMemoryCallStore::new();

        let (mut a, _) = store.get_or_create(&id("A"), &caller()).await.unwrap();
        a.record_mood(Some("anxious"));
        a.advance_to(TherapyStage::Completed);
        store.update(&a).await.unwrap();

        let (mut b, _) = store.get_or_create(&id("B"), &caller()).await.unwrap();
        b.record_mood(Some("anxious"));
        b.escalate();
        store.update(&b).await.unwrap();

        store.get_or_create(&id("C"), &caller()).await.unwrap();
        let (mut d, _) = store.get_or_create(&id("D"), &caller()).await.unwrap();
        d.record_mood(Some("sad"));
        store.update(&d).await.unwrap();

        let analytics = store.analytics(Timestamp::now()).await.unwrap();
        assert_eq!(analytics.total_sessions, 4);
        assert_eq!(analytics.completed_sessions, 1);
        assert_eq!(analytics.completion_rate, 25.0);
        assert_eq!(analytics.crisis_sessions, 1);
        assert_eq!(analytics.recent_sessions_7days, 4);
        assert_eq!(
            analytics.mood_distribution,
            vec![MoodCount::new("anxious", 2), MoodCount::new("sad", 1)]
        );
    }

    #[tokio::test]
    async fn analytics_excludes_old_sessions_from_recent_count() {
        let store = InMemoryCallStore::new();
        store.get_or_create(&id("A"), &caller()).await.unwrap();

        let later = Timestamp::from_datetime(*Timestamp::now().as_datetime() + chrono::Duration::days(8));
        let analytics = store.analytics(later).await.unwrap();

        assert_eq!(analytics.total_sessions, 1);
        assert_eq!(analytics.recent_sessions_7days, 0);
    }
}
