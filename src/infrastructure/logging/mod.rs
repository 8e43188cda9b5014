pub mod in_memory;

use crate::core::errors::ChikokuError;
use crate::core::models::audit::{AppLog, AuditEntry};
use async_trait::async_trait;

/// Application action log. Every committed mutation reports one entry.
#[async_trait]
pub trait LoggingService: Send + Sync {
    async fn record(&self, entry: AuditEntry) -> Result<(), ChikokuError>;
    /// All entries, oldest first.
    async fn get_logs(&self) -> Result<Vec<AppLog>, ChikokuError>;
}
