use super::ChikokuService;
use crate::constants::{EVENT_CREATED, VOTE_RECORDED};
use crate::core::errors::ChikokuError;
use crate::core::models::audit::AuditEntry;
use crate::core::models::event::{Event, EventDraft, Participation};
use crate::infrastructure::logging::LoggingService;
use crate::infrastructure::storage::Storage;
use tracing::{debug, error, info};
use uuid::Uuid;

impl<L: LoggingService, S: Storage> ChikokuService<L, S> {
    /// Persists a new event and links it into its group.
    ///
    /// The group is resolved before anything is written. If linking fails
    /// afterwards the event is deleted again, so a failed call never leaves
    /// an event that no group points at.
    pub async fn create_event(&self, draft: EventDraft, group_id: &str) -> Result<Event, ChikokuError> {
        self.get_group(group_id).await?;

        let event = self
            .storage
            .create_event(draft.into_event(Uuid::new_v4().to_string()))
            .await?;

        let linked = self
            .update_group_with(group_id, |g| {
                if !g.owns_event(&event.id) {
                    g.events.push(event.id.clone());
                }
                Ok(())
            })
            .await;

        if let Err(link_error) = linked {
            if let Err(e) = self.storage.delete_event(&event.id).await {
                error!(event_id = %event.id, group_id, error = %e, "failed to roll back unlinked event");
            }
            return Err(link_error);
        }
        info!(event_id = %event.id, group_id, "event created");

        self.audit(
            AuditEntry::new(EVENT_CREATED)
                .by(&event.author_id)
                .group(group_id)
                .event(&event.id)
                .note(event.title.as_str()),
        )
        .await;
        Ok(event)
    }

    /// Upserts the caller's participation record on an event.
    ///
    /// Only the manager or a member of a group that lists the event may
    /// vote; that check runs before the event itself is looked up.
    pub async fn record_vote(
        &self,
        user_id: &str,
        event_id: &str,
        participation: Participation,
    ) -> Result<Event, ChikokuError> {
        let groups = self.storage.find_groups_by_member_or_manager(user_id).await?;
        if !groups.iter().any(|g| g.owns_event(event_id)) {
            return Err(ChikokuError::NotAGroupMember(user_id.to_string()));
        }

        let vote = participation.vote.to_string();
        let event = self
            .update_event_with(event_id, |e| {
                let replaced = e.upsert_vote(user_id, participation.clone());
                debug!(event_id, user_id, replaced, "vote upserted");
                Ok(())
            })
            .await?;

        self.audit(AuditEntry::new(VOTE_RECORDED).by(user_id).event(event_id).note(vote))
            .await;
        Ok(event)
    }
}
