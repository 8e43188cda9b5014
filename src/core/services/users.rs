use super::ChikokuService;
use crate::constants::{USER_REGISTERED, USER_UPDATED};
use crate::core::errors::ChikokuError;
use crate::core::models::audit::{AppLog, AuditEntry};
use crate::core::models::user::{NewUser, User, UserUpdate};
use crate::infrastructure::logging::LoggingService;
use crate::infrastructure::storage::Storage;
use tracing::info;
use uuid::Uuid;

impl<L: LoggingService, S: Storage> ChikokuService<L, S> {
    pub async fn register_user(&self, new_user: NewUser) -> Result<User, ChikokuError> {
        if self.storage.find_user_by_auth_id(&new_user.auth_id).await?.is_some() {
            return Err(ChikokuError::AuthIdAlreadyRegistered(new_user.auth_id));
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            auth_id: new_user.auth_id,
            name: new_user.name,
            icon: new_user.icon,
            alias: new_user.alias,
            fcm_token: new_user.fcm_token,
        };
        let user = self.storage.create_user(user).await?;
        info!(user_id = %user.id, "user registered");

        self.audit(AuditEntry::new(USER_REGISTERED).by(&user.id).note(user.name.as_str()))
            .await;
        Ok(user)
    }

    pub async fn update_user(&self, user_id: &str, update: UserUpdate) -> Result<User, ChikokuError> {
        let mut user = self.require_user(user_id).await?;
        user.apply(update);
        let user = self.storage.update_user(user).await?;

        self.audit(AuditEntry::new(USER_UPDATED).by(user_id)).await;
        Ok(user)
    }

    /// Resolves the account behind an external auth id.
    pub async fn sign_in(&self, auth_id: &str) -> Result<User, ChikokuError> {
        self.storage
            .find_user_by_auth_id(auth_id)
            .await?
            .ok_or_else(|| ChikokuError::UnknownAuthId(auth_id.to_string()))
    }

    pub async fn get_user(&self, user_id: &str) -> Result<User, ChikokuError> {
        self.require_user(user_id).await
    }

    pub async fn get_app_logs(&self) -> Result<Vec<AppLog>, ChikokuError> {
        self.logging.get_logs().await
    }
}
