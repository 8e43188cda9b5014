use crate::core::errors::ChikokuError;
use crate::core::models::{event::Event, group::Group, user::User};
use crate::infrastructure::storage::{EventStore, GroupStore, UserStore};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct InMemoryStorage {
    users: Arc<RwLock<HashMap<String, User>>>,
    groups: Arc<RwLock<HashMap<String, Group>>>,
    events: Arc<RwLock<HashMap<String, Event>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        InMemoryStorage {
            users: Arc::new(RwLock::new(HashMap::new())),
            groups: Arc::new(RwLock::new(HashMap::new())),
            events: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl GroupStore for InMemoryStorage {
    async fn find_group_by_name(&self, name: &str) -> Result<Option<Group>, ChikokuError> {
        let groups = self.groups.read().await;
        Ok(groups.values().find(|g| g.name == name).cloned())
    }

    async fn find_group_by_id(&self, group_id: &str) -> Result<Option<Group>, ChikokuError> {
        let groups = self.groups.read().await;
        Ok(groups.get(group_id).cloned())
    }

    async fn find_groups_by_member_or_manager(&self, user_id: &str) -> Result<Vec<Group>, ChikokuError> {
        let groups = self.groups.read().await;
        Ok(groups.values().filter(|g| g.belongs(user_id)).cloned().collect())
    }

    async fn find_groups_by_event(&self, event_id: &str) -> Result<Vec<Group>, ChikokuError> {
        let groups = self.groups.read().await;
        Ok(groups.values().filter(|g| g.owns_event(event_id)).cloned().collect())
    }

    async fn create_group(&self, group: Group) -> Result<Group, ChikokuError> {
        let mut groups = self.groups.write().await;
        if groups.contains_key(&group.id) {
            return Err(ChikokuError::StorageError(format!("Group id {} already exists", group.id)));
        }
        if groups.values().any(|g| g.name == group.name) {
            return Err(ChikokuError::DuplicateGroupName(group.name));
        }
        groups.insert(group.id.clone(), group.clone());
        Ok(group)
    }

    async fn update_group(&self, mut group: Group) -> Result<Group, ChikokuError> {
        let mut groups = self.groups.write().await;
        let stored = groups
            .get(&group.id)
            .ok_or_else(|| ChikokuError::GroupNotFound(group.id.clone()))?;
        if stored.version != group.version {
            return Err(ChikokuError::VersionConflict(group.id));
        }
        group.version += 1;
        groups.insert(group.id.clone(), group.clone());
        Ok(group)
    }

    async fn delete_group(&self, group_id: &str) -> Result<(), ChikokuError> {
        let mut groups = self.groups.write().await;
        groups.remove(group_id);
        Ok(())
    }
}

#[async_trait]
impl EventStore for InMemoryStorage {
    async fn find_event_by_id(&self, event_id: &str) -> Result<Option<Event>, ChikokuError> {
        let events = self.events.read().await;
        Ok(events.get(event_id).cloned())
    }

    async fn create_event(&self, event: Event) -> Result<Event, ChikokuError> {
        let mut events = self.events.write().await;
        if events.contains_key(&event.id) {
            return Err(ChikokuError::StorageError(format!("Event id {} already exists", event.id)));
        }
        events.insert(event.id.clone(), event.clone());
        Ok(event)
    }

    async fn update_event(&self, mut event: Event) -> Result<Event, ChikokuError> {
        let mut events = self.events.write().await;
        let stored = events
            .get(&event.id)
            .ok_or_else(|| ChikokuError::EventNotFound(event.id.clone()))?;
        if stored.version != event.version {
            return Err(ChikokuError::VersionConflict(event.id));
        }
        event.version += 1;
        events.insert(event.id.clone(), event.clone());
        Ok(event)
    }

    async fn delete_event(&self, event_id: &str) -> Result<(), ChikokuError> {
        let mut events = self.events.write().await;
        events.remove(event_id);
        Ok(())
    }
}

#[async_trait]
impl UserStore for InMemoryStorage {
    async fn find_user_by_id(&self, user_id: &str) -> Result<Option<User>, ChikokuError> {
        let users = self.users.read().await;
        Ok(users.get(user_id).cloned())
    }

    async fn find_user_by_auth_id(&self, auth_id: &str) -> Result<Option<User>, ChikokuError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.auth_id == auth_id).cloned())
    }

    async fn create_user(&self, user: User) -> Result<User, ChikokuError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.id) {
            return Err(ChikokuError::StorageError(format!("User id {} already exists", user.id)));
        }
        if users.values().any(|u| u.auth_id == user.auth_id) {
            return Err(ChikokuError::AuthIdAlreadyRegistered(user.auth_id));
        }
        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn update_user(&self, user: User) -> Result<User, ChikokuError> {
        let mut users = self.users.write().await;
        if !users.contains_key(&user.id) {
            return Err(ChikokuError::UserNotFound(user.id));
        }
        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn delete_user(&self, user_id: &str) -> Result<(), ChikokuError> {
        let mut users = self.users.write().await;
        users.remove(user_id);
        Ok(())
    }
}
