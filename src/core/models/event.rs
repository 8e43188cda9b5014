use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// A member's answer on an event. Known answers get their own variant,
/// anything else is kept verbatim in `Other`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Vote {
    Yes,
    No,
    Other(String),
}

impl Vote {
    pub fn as_str(&self) -> &str {
        match self {
            Vote::Yes => "yes",
            Vote::No => "no",
            Vote::Other(tag) => tag,
        }
    }
}

impl From<String> for Vote {
    fn from(value: String) -> Self {
        match value.as_str() {
            "yes" => Vote::Yes,
            "no" => Vote::No,
            _ => Vote::Other(value),
        }
    }
}

impl From<&str> for Vote {
    fn from(value: &str) -> Self {
        Vote::from(value.to_string())
    }
}

impl From<Vote> for String {
    fn from(vote: Vote) -> Self {
        match vote {
            Vote::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Vote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct VotedMember {
    pub user_id: String,
    #[schema(value_type = String, example = "yes")]
    pub vote: Vote,
    pub is_arrival: bool,
    #[schema(value_type = Option<String>, example = "2025-06-01T12:34:56Z")]
    pub arrival_time: Option<DateTime<Utc>>,
}

/// What a member submits when voting. Stored as-is, replacing any
/// previous record of the same member.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Participation {
    #[schema(value_type = String, example = "yes")]
    pub vote: Vote,
    #[serde(default)]
    pub is_arrival: bool,
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "2025-06-01T12:34:56Z")]
    pub arrival_time: Option<DateTime<Utc>>,
}

impl Participation {
    pub fn vote(vote: impl Into<Vote>) -> Self {
        Participation {
            vote: vote.into(),
            is_arrival: false,
            arrival_time: None,
        }
    }

    pub fn arrived(vote: impl Into<Vote>, at: DateTime<Utc>) -> Self {
        Participation {
            vote: vote.into(),
            is_arrival: true,
            arrival_time: Some(at),
        }
    }

    pub fn into_voted_member(self, user_id: &str) -> VotedMember {
        VotedMember {
            user_id: user_id.to_string(),
            vote: self.vote,
            is_arrival: self.is_arrival,
            arrival_time: self.arrival_time,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    pub location_name: String,
    pub cost: i64,
    pub message: String,
    pub author_id: String,
    pub latitude: f64,
    pub longitude: f64,
    #[schema(value_type = String, example = "2025-06-01T10:00:00Z")]
    pub start_time: DateTime<Utc>,
    #[schema(value_type = String, example = "2025-06-01T12:00:00Z")]
    pub end_time: DateTime<Utc>,
    #[schema(value_type = String, example = "2025-05-31T23:59:59Z")]
    pub closing_time: DateTime<Utc>,
    pub voted_members: Vec<VotedMember>,
    #[serde(default)]
    pub version: u64,
}

impl Event {
    /// Inserts or replaces the record of `user_id`. Returns true when an
    /// existing record was replaced.
    pub fn upsert_vote(&mut self, user_id: &str, participation: Participation) -> bool {
        let record = participation.into_voted_member(user_id);
        match self.voted_members.iter_mut().find(|m| m.user_id == user_id) {
            Some(existing) => {
                *existing = record;
                true
            }
            None => {
                self.voted_members.push(record);
                false
            }
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct EventDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location_name: String,
    #[serde(default)]
    pub cost: i64,
    #[serde(default)]
    pub message: String,
    pub author_id: String,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    #[schema(value_type = String, example = "2025-06-01T10:00:00Z")]
    pub start_time: DateTime<Utc>,
    #[schema(value_type = String, example = "2025-06-01T12:00:00Z")]
    pub end_time: DateTime<Utc>,
    #[schema(value_type = String, example = "2025-05-31T23:59:59Z")]
    pub closing_time: DateTime<Utc>,
}

impl EventDraft {
    pub fn into_event(self, id: String) -> Event {
        Event {
            id,
            title: self.title,
            description: self.description,
            location_name: self.location_name,
            cost: self.cost,
            message: self.message,
            author_id: self.author_id,
            latitude: self.latitude,
            longitude: self.longitude,
            start_time: self.start_time,
            end_time: self.end_time,
            closing_time: self.closing_time,
            voted_members: Vec::new(),
            version: 0,
        }
    }
}
