use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub auth_id: String,
    pub name: String,
    pub icon: String,
    pub alias: String,
    pub fcm_token: String,
}

/// Registration payload; the id is assigned by the service.
#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct NewUser {
    pub auth_id: String,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub alias: String,
    #[serde(default)]
    pub fcm_token: String,
}

/// Partial profile update. `None` leaves the stored value untouched.
#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub alias: Option<String>,
    pub fcm_token: Option<String>,
}

impl User {
    pub fn apply(&mut self, update: UserUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(icon) = update.icon {
            self.icon = icon;
        }
        if let Some(alias) = update.alias {
            self.alias = alias;
        }
        if let Some(fcm_token) = update.fcm_token {
            self.fcm_token = fcm_token;
        }
    }
}
