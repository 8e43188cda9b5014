//! Read models handed to the presentation layer. Field names are part of
//! the JSON contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct BoardAuthor {
    pub id: String,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct BoardParticipant {
    pub user_id: String,
    pub user_name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct BoardOption {
    /// The vote value this option groups.
    pub title: String,
    /// Number of voters, counted before the roster is resolved.
    pub participant_count: usize,
    pub participants: Vec<BoardParticipant>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct BoardEvent {
    pub id: String,
    pub title: String,
    pub author: Option<BoardAuthor>,
    pub description: String,
    #[schema(value_type = String)]
    pub start_time: DateTime<Utc>,
    #[schema(value_type = String)]
    pub end_time: DateTime<Utc>,
    #[schema(value_type = String)]
    pub closing_time: DateTime<Utc>,
    pub location_name: String,
    pub cost: i64,
    pub message: String,
    pub latitude: f64,
    pub longitude: f64,
    pub group_id: String,
    pub group_name: String,
    pub options: Vec<BoardOption>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ArrivalRank {
    pub rank: usize,
    pub user_id: String,
    pub name: String,
    pub alias: String,
    /// Minutes relative to the event start, floored. Negative means early.
    pub arrival_time_minutes: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ArrivalRanking {
    pub event_id: String,
    pub ranking: Vec<ArrivalRank>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct GroupInfoMember {
    pub id: String,
    pub name: String,
    pub icon: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct GroupInfo {
    pub group_name: String,
    pub password: String,
    pub group_manager_id: String,
    pub members: Vec<GroupInfoMember>,
}

/// `member_count` counts `members` only; callers that want the manager
/// included combine it with `manager_id` themselves.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct UserGroupSummary {
    pub id: String,
    pub name: String,
    pub member_count: usize,
    pub manager_id: String,
    pub is_creator: bool,
}
