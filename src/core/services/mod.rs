mod board;
mod events;
mod membership;
mod participation;
pub mod ranking;
mod users;

use crate::config::Config;
use crate::core::errors::ChikokuError;
use crate::core::models::{audit::AuditEntry, event::Event, group::Group, user::User};
use crate::infrastructure::logging::LoggingService;
use crate::infrastructure::storage::Storage;
use futures::stream::{self, StreamExt, TryStreamExt};
use std::future::Future;
use tracing::{debug, warn};

#[derive(Clone, Debug)]
pub struct ServiceOptions {
    pub board_concurrency: usize,
    pub max_update_retries: u32,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        ServiceOptions {
            board_concurrency: 8,
            max_update_retries: 5,
        }
    }
}

impl From<&Config> for ServiceOptions {
    fn from(config: &Config) -> Self {
        ServiceOptions {
            board_concurrency: config.board_concurrency,
            max_update_retries: config.max_update_retries,
        }
    }
}

pub struct ChikokuService<L: LoggingService, S: Storage> {
    storage: S,
    logging: L,
    options: ServiceOptions,
}

impl<L: LoggingService, S: Storage> ChikokuService<L, S> {
    pub fn new(storage: S, logging: L, options: ServiceOptions) -> Self {
        ChikokuService {
            storage,
            logging,
            options,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Appends to the action log. The mutation being reported is already
    /// committed, so a failed log write is reported here and not returned.
    async fn audit(&self, entry: AuditEntry) {
        let action = entry.action;
        if let Err(e) = self.logging.record(entry).await {
            warn!(action, error = %e, "action log write failed after commit");
        }
    }

    async fn require_user(&self, user_id: &str) -> Result<User, ChikokuError> {
        self.storage
            .find_user_by_id(user_id)
            .await?
            .ok_or_else(|| ChikokuError::UserNotFound(user_id.to_string()))
    }

    async fn require_event(&self, event_id: &str) -> Result<Event, ChikokuError> {
        self.storage
            .find_event_by_id(event_id)
            .await?
            .ok_or_else(|| ChikokuError::EventNotFound(event_id.to_string()))
    }

    /// Read-modify-write on a group. `apply` sees a fresh copy on every
    /// attempt and may reject it; a version conflict reruns the whole cycle.
    async fn update_group_with<F>(&self, group_id: &str, mut apply: F) -> Result<Group, ChikokuError>
    where
        F: FnMut(&mut Group) -> Result<(), ChikokuError> + Send,
    {
        let mut attempt = 0;
        loop {
            let mut group = self
                .storage
                .find_group_by_id(group_id)
                .await?
                .ok_or_else(|| ChikokuError::GroupNotFound(group_id.to_string()))?;
            apply(&mut group)?;
            match self.storage.update_group(group).await {
                Err(ChikokuError::VersionConflict(id)) if attempt < self.options.max_update_retries => {
                    attempt += 1;
                    debug!(group_id = %id, attempt, "group version conflict, retrying");
                }
                result => return result,
            }
        }
    }

    /// Same as [`Self::update_group_with`] for events.
    async fn update_event_with<F>(&self, event_id: &str, mut apply: F) -> Result<Event, ChikokuError>
    where
        F: FnMut(&mut Event) -> Result<(), ChikokuError> + Send,
    {
        let mut attempt = 0;
        loop {
            let mut event = self.require_event(event_id).await?;
            apply(&mut event)?;
            match self.storage.update_event(event).await {
                Err(ChikokuError::VersionConflict(id)) if attempt < self.options.max_update_retries => {
                    attempt += 1;
                    debug!(event_id = %id, attempt, "event version conflict, retrying");
                }
                result => return result,
            }
        }
    }

    /// Drives the per-group futures with at most `board_concurrency` in
    /// flight. The first error ends the call; futures still pending are
    /// dropped and nothing collected so far is returned.
    async fn fan_out_groups<T, Fut>(&self, per_group: Vec<Fut>) -> Result<Vec<T>, ChikokuError>
    where
        Fut: Future<Output = Result<Vec<T>, ChikokuError>>,
    {
        let limit = self.options.board_concurrency.max(1);
        let batches: Vec<Vec<T>> = stream::iter(per_group)
            .buffer_unordered(limit)
            .try_collect()
            .await
            .map_err(|e| {
                warn!(error = %e, "group fan-out aborted");
                ChikokuError::AggregationFailure(Box::new(e))
            })?;
        Ok(batches.into_iter().flatten().collect())
    }
}
