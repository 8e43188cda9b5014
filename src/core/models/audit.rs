use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One stored entry of the application action log.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct AppLog {
    pub id: String,
    pub action: String,
    pub user_id: Option<String>,
    pub group_id: Option<String>,
    pub event_id: Option<String>,
    pub note: Option<String>,
    #[schema(value_type = String, example = "2025-06-01T12:34:56Z")]
    pub timestamp: DateTime<Utc>,
}

/// What a mutating service call hands to the action log. The log assigns
/// the id and timestamp.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuditEntry {
    pub action: &'static str,
    pub user_id: Option<String>,
    pub group_id: Option<String>,
    pub event_id: Option<String>,
    pub note: Option<String>,
}

impl AuditEntry {
    pub fn new(action: &'static str) -> Self {
        AuditEntry {
            action,
            user_id: None,
            group_id: None,
            event_id: None,
            note: None,
        }
    }

    pub fn by(mut self, user_id: &str) -> Self {
        self.user_id = Some(user_id.to_string());
        self
    }

    pub fn group(mut self, group_id: &str) -> Self {
        self.group_id = Some(group_id.to_string());
        self
    }

    pub fn event(mut self, event_id: &str) -> Self {
        self.event_id = Some(event_id.to_string());
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}
