use crate::core::errors::ChikokuError;
use crate::core::models::audit::{AppLog, AuditEntry};
use crate::infrastructure::logging::LoggingService;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Append-only action log kept in process memory.
#[derive(Clone, Default)]
pub struct InMemoryLogging {
    entries: Arc<RwLock<Vec<AppLog>>>,
}

impl InMemoryLogging {
    pub fn new() -> Self {
        Self::default()
    }
}

impl From<AuditEntry> for AppLog {
    fn from(entry: AuditEntry) -> Self {
        AppLog {
            id: Uuid::new_v4().to_string(),
            action: entry.action.to_string(),
            user_id: entry.user_id,
            group_id: entry.group_id,
            event_id: entry.event_id,
            note: entry.note,
            timestamp: Utc::now(),
        }
    }
}

#[async_trait]
impl LoggingService for InMemoryLogging {
    async fn record(&self, entry: AuditEntry) -> Result<(), ChikokuError> {
        self.entries.write().await.push(AppLog::from(entry));
        Ok(())
    }

    async fn get_logs(&self) -> Result<Vec<AppLog>, ChikokuError> {
        Ok(self.entries.read().await.clone())
    }
}
