use super::ChikokuService;
use crate::core::errors::ChikokuError;
use crate::core::models::views::{ArrivalRank, ArrivalRanking};
use crate::infrastructure::logging::LoggingService;
use crate::infrastructure::storage::Storage;
use chrono::{DateTime, Utc};
use futures::future::join_all;
use tracing::debug;

const MILLIS_PER_MINUTE: i64 = 60_000;

/// Whole minutes from `start` to `arrival`, rounded toward negative
/// infinity: 90 seconds early is -2, 90 seconds late is 1.
pub fn arrival_delta_minutes(start: DateTime<Utc>, arrival: DateTime<Utc>) -> i64 {
    (arrival - start).num_milliseconds().div_euclid(MILLIS_PER_MINUTE)
}

impl<L: LoggingService, S: Storage> ChikokuService<L, S> {
    /// Leaderboard of members who arrived, earliest relative to the start
    /// first. Equal deltas keep the order the votes are stored in.
    pub async fn get_arrival_ranking(&self, event_id: &str) -> Result<ArrivalRanking, ChikokuError> {
        let event = self.require_event(event_id).await?;

        let arrivals: Vec<(&str, DateTime<Utc>)> = event
            .voted_members
            .iter()
            .filter(|m| m.is_arrival)
            .filter_map(|m| m.arrival_time.map(|at| (m.user_id.as_str(), at)))
            .collect();

        let users = join_all(arrivals.iter().map(|(id, _)| self.storage.find_user_by_id(id))).await;

        let mut ranking: Vec<ArrivalRank> = arrivals
            .iter()
            .zip(users)
            .filter_map(|((user_id, arrived_at), lookup)| match lookup {
                Ok(Some(user)) => Some(ArrivalRank {
                    rank: 0,
                    user_id: user_id.to_string(),
                    name: user.name,
                    alias: user.alias,
                    arrival_time_minutes: arrival_delta_minutes(event.start_time, *arrived_at),
                }),
                _ => {
                    debug!(event_id, user_id, "attendee without user record left out of ranking");
                    None
                }
            })
            .collect();

        ranking.sort_by_key(|entry| entry.arrival_time_minutes);
        for (index, entry) in ranking.iter_mut().enumerate() {
            entry.rank = index + 1;
        }

        Ok(ArrivalRanking {
            event_id: event.id.clone(),
            ranking,
        })
    }
}
