use crate::core::errors::ChikokuError;
use crate::core::models::{event::Event, group::Group, user::User};
use async_trait::async_trait;

/// Group persistence. `create_group` must reject a name that is already
/// taken with `DuplicateGroupName`, atomically with the insert.
/// `update_group` is a compare-and-set on `version`: it fails with
/// `VersionConflict` when the stored version differs from the given one,
/// and bumps the version on success.
#[async_trait]
pub trait GroupStore: Send + Sync {
    async fn find_group_by_name(&self, name: &str) -> Result<Option<Group>, ChikokuError>;
    async fn find_group_by_id(&self, group_id: &str) -> Result<Option<Group>, ChikokuError>;
    async fn find_groups_by_member_or_manager(&self, user_id: &str) -> Result<Vec<Group>, ChikokuError>;
    async fn find_groups_by_event(&self, event_id: &str) -> Result<Vec<Group>, ChikokuError>;
    async fn create_group(&self, group: Group) -> Result<Group, ChikokuError>;
    async fn update_group(&self, group: Group) -> Result<Group, ChikokuError>;
    async fn delete_group(&self, group_id: &str) -> Result<(), ChikokuError>;
}

/// Event persistence, versioned like [`GroupStore`].
#[async_trait]
pub trait EventStore: Send + Sync {
    async fn find_event_by_id(&self, event_id: &str) -> Result<Option<Event>, ChikokuError>;
    async fn create_event(&self, event: Event) -> Result<Event, ChikokuError>;
    async fn update_event(&self, event: Event) -> Result<Event, ChikokuError>;
    async fn delete_event(&self, event_id: &str) -> Result<(), ChikokuError>;
}

/// User persistence. `create_user` must reject an `auth_id` that is
/// already registered with `AuthIdAlreadyRegistered`.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_user_by_id(&self, user_id: &str) -> Result<Option<User>, ChikokuError>;
    async fn find_user_by_auth_id(&self, auth_id: &str) -> Result<Option<User>, ChikokuError>;
    async fn create_user(&self, user: User) -> Result<User, ChikokuError>;
    async fn update_user(&self, user: User) -> Result<User, ChikokuError>;
    async fn delete_user(&self, user_id: &str) -> Result<(), ChikokuError>;
}

/// Everything the service needs from persistence.
pub trait Storage: GroupStore + EventStore + UserStore {}

impl<T: GroupStore + EventStore + UserStore> Storage for T {}

pub mod in_memory;
