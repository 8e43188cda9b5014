use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub password: String,
    pub manager_id: String,
    pub description: String,
    /// Member user ids. The manager is tracked in `manager_id` only.
    pub members: Vec<String>,
    pub events: Vec<String>,
    #[serde(default)]
    pub version: u64,
}

impl Group {
    pub fn is_manager(&self, user_id: &str) -> bool {
        self.manager_id == user_id
    }

    pub fn is_member(&self, user_id: &str) -> bool {
        self.members.iter().any(|m| m == user_id)
    }

    pub fn belongs(&self, user_id: &str) -> bool {
        self.is_manager(user_id) || self.is_member(user_id)
    }

    pub fn owns_event(&self, event_id: &str) -> bool {
        self.events.iter().any(|e| e == event_id)
    }
}
