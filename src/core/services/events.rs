use super::ChikokuService;
use crate::constants::EVENT_DELETED;
use crate::core::errors::ChikokuError;
use crate::core::models::audit::AuditEntry;
use crate::core::models::event::Event;
use crate::infrastructure::logging::LoggingService;
use crate::infrastructure::storage::Storage;
use std::cmp::Reverse;
use tracing::{error, info};

impl<L: LoggingService, S: Storage> ChikokuService<L, S> {
    pub async fn get_event(&self, event_id: &str) -> Result<Event, ChikokuError> {
        self.require_event(event_id).await
    }

    /// Raw events of the given groups, latest start first. Fails like the
    /// event board when a group or a referenced event is missing.
    pub async fn list_events(&self, group_ids: &[String]) -> Result<Vec<Event>, ChikokuError> {
        let per_group = group_ids.iter().map(|id| self.group_events(id)).collect::<Vec<_>>();
        let mut events = self.fan_out_groups(per_group).await?;
        events.sort_by_key(|e| Reverse(e.start_time));
        Ok(events)
    }

    async fn group_events(&self, group_id: &str) -> Result<Vec<Event>, ChikokuError> {
        let group = self.get_group(group_id).await?;
        let mut events = Vec::with_capacity(group.events.len());
        for event_id in &group.events {
            events.push(self.require_event(event_id).await?);
        }
        Ok(events)
    }

    /// Deletes an event on behalf of its author. Groups listing the event
    /// are unlinked first so no group is left pointing at a missing event.
    pub async fn delete_event(&self, event_id: &str, requested_by: &str) -> Result<Event, ChikokuError> {
        let event = self.require_event(event_id).await?;
        if event.author_id != requested_by {
            return Err(ChikokuError::NotEventAuthor(requested_by.to_string()));
        }

        for group in self.storage.find_groups_by_event(event_id).await? {
            self.update_group_with(&group.id, |g| {
                g.events.retain(|e| e != event_id);
                Ok(())
            })
            .await?;
        }
        if let Err(e) = self.storage.delete_event(event_id).await {
            error!(event_id, requested_by, error = %e, "event unlinked from its groups but not deleted");
            return Err(e);
        }
        info!(event_id, requested_by, "event deleted");

        self.audit(AuditEntry::new(EVENT_DELETED).by(requested_by).event(event_id)).await;
        Ok(event)
    }
}
