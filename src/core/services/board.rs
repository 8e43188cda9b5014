use super::ChikokuService;
use crate::core::errors::ChikokuError;
use crate::core::models::event::{Event, Vote};
use crate::core::models::group::Group;
use crate::core::models::views::{BoardAuthor, BoardEvent, BoardOption, BoardParticipant};
use crate::infrastructure::logging::LoggingService;
use crate::infrastructure::storage::Storage;
use futures::future::join_all;
use std::collections::HashMap;
use tracing::{debug, warn};

impl<L: LoggingService, S: Storage> ChikokuService<L, S> {
    /// Builds board views for every event of every given group.
    ///
    /// A missing group or a missing event referenced by a group fails the
    /// whole board with `AggregationFailure`. Authors and participants are
    /// resolved best-effort. Events of one group keep the group's order;
    /// groups come back in completion order.
    pub async fn build_event_board(&self, group_ids: &[String]) -> Result<Vec<BoardEvent>, ChikokuError> {
        let per_group = group_ids.iter().map(|id| self.group_board(id)).collect::<Vec<_>>();
        let board = self.fan_out_groups(per_group).await?;
        debug!(groups = group_ids.len(), events = board.len(), "event board built");
        Ok(board)
    }

    async fn group_board(&self, group_id: &str) -> Result<Vec<BoardEvent>, ChikokuError> {
        let group = self.get_group(group_id).await?;
        let mut board = Vec::with_capacity(group.events.len());
        for event_id in &group.events {
            let event = self.require_event(event_id).await?;
            let author = self.board_author(&event).await;
            let options = self.tally_options(&event).await;
            board.push(board_event(event, &group, author, options));
        }
        Ok(board)
    }

    async fn board_author(&self, event: &Event) -> Option<BoardAuthor> {
        match self.storage.find_user_by_id(&event.author_id).await {
            Ok(Some(user)) => Some(BoardAuthor {
                id: user.id,
                name: user.name,
            }),
            Ok(None) => None,
            Err(e) => {
                warn!(event_id = %event.id, author_id = %event.author_id, error = %e, "author lookup failed");
                None
            }
        }
    }

    /// One option per distinct vote, in order of first appearance. Counts
    /// include every voter; rosters only those whose user record resolves.
    async fn tally_options(&self, event: &Event) -> Vec<BoardOption> {
        let mut options: Vec<BoardOption> = Vec::new();
        let mut slots: HashMap<&Vote, usize> = HashMap::new();
        for member in &event.voted_members {
            let slot = *slots.entry(&member.vote).or_insert_with(|| {
                options.push(BoardOption {
                    title: member.vote.to_string(),
                    participant_count: 0,
                    participants: Vec::new(),
                });
                options.len() - 1
            });
            options[slot].participant_count += 1;
        }

        let lookups = join_all(
            event
                .voted_members
                .iter()
                .map(|m| self.storage.find_user_by_id(&m.user_id)),
        )
        .await;
        for (member, lookup) in event.voted_members.iter().zip(lookups) {
            match lookup {
                Ok(Some(user)) => options[slots[&member.vote]].participants.push(BoardParticipant {
                    user_id: user.id,
                    user_name: user.name,
                }),
                Ok(None) => {}
                Err(e) => warn!(event_id = %event.id, user_id = %member.user_id, error = %e, "participant lookup failed"),
            }
        }
        options
    }
}

fn board_event(event: Event, group: &Group, author: Option<BoardAuthor>, options: Vec<BoardOption>) -> BoardEvent {
    BoardEvent {
        id: event.id,
        title: event.title,
        author,
        description: event.description,
        start_time: event.start_time,
        end_time: event.end_time,
        closing_time: event.closing_time,
        location_name: event.location_name,
        cost: event.cost,
        message: event.message,
        latitude: event.latitude,
        longitude: event.longitude,
        group_id: group.id.clone(),
        group_name: group.name.clone(),
        options,
    }
}
