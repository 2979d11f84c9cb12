//! GetAnalyticsHandler - dashboard counters.

use std::sync::Arc;

use crate::domain::call::CallError;
use crate::domain::foundation::Timestamp;
use crate::ports::{CallAnalytics, CallSessionReader};

#[derive(Debug, Clone, Default)]
pub struct GetAnalyticsQuery;

pub struct GetAnalyticsHandler {
    reader: Arc<dyn CallSessionReader>,
}

impl GetAnalyticsHandler {
    pub fn new(reader: Arc<dyn CallSessionReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self, _query: GetAnalyticsQuery) -> Result<CallAnalytics, CallError> {
        Ok(self.reader.analytics(Timestamp::now()).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryCallStore;
    use crate::domain::foundation::{CallSessionId, PhoneNumber};
    use crate::ports::CallSessionRepository;

    #[tokio::test]
    async fn reports_counts_over_stored_sessions() {
        let store = Arc::new(InMemoryCallStore::new());
        let number = PhoneNumber::new("+254700000000").unwrap();

        let (mut done, _) = store
            .get_or_create(&CallSessionId::new("S1").unwrap(), &number)
            .await
            .unwrap();
        done.record_mood(Some("anxious"));
        done.complete();
        store.update(&done).await.unwrap();
        store
            .get_or_create(&CallSessionId::new("S2").unwrap(), &number)
            .await
            .unwrap();

        let analytics = GetAnalyticsHandler::new(store)
            .handle(GetAnalyticsQuery)
            .await
            .unwrap();

        assert_eq!(analytics.total_sessions, 2);
        assert_eq!(analytics.completed_sessions, 1);
        assert_eq!(analytics.completion_rate, 50.0);
        assert_eq!(analytics.crisis_sessions, 0);
        assert_eq!(analytics.mood_distribution.len(), 1);
        assert_eq!(analytics.mood_distribution[0].mood, "anxious");
        assert_eq!(analytics.recent_sessions_7days, 2);
    }

    #[tokio::test]
    async fn empty_store_has_zero_completion_rate() {
        let analytics = GetAnalyticsHandler::new(Arc::new(InMemoryCallStore::new()))
            .handle(GetAnalyticsQuery)
            .await
            .unwrap();
        assert_eq!(analytics.total_sessions, 0);
        assert_eq!(analytics.completion_rate, 0.0);
    }
}
