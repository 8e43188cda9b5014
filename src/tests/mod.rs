mod board_tests;

use crate::core::errors::ChikokuError;
use crate::core::models::event::{Event, EventDraft};
use crate::core::models::group::Group;
use crate::core::models::user::{NewUser, User};
use crate::core::services::{ChikokuService, ServiceOptions};
use crate::infrastructure::logging::LoggingService;
use crate::infrastructure::logging::in_memory::InMemoryLogging;
use crate::infrastructure::storage::in_memory::InMemoryStorage;
use crate::infrastructure::storage::{EventStore, GroupStore, Storage, UserStore};
use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::task::yield_now;

pub type TestService = ChikokuService<InMemoryLogging, InMemoryStorage>;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("chikokulympic=debug")
        .try_init();
}

pub fn create_test_service() -> TestService {
    create_test_service_with(ServiceOptions::default())
}

pub fn create_test_service_with(options: ServiceOptions) -> TestService {
    init_tracing();
    let storage = InMemoryStorage::new();
    let logging = InMemoryLogging::new();
    ChikokuService::new(storage, logging, options)
}

pub fn create_yielding_service(options: ServiceOptions) -> ChikokuService<InMemoryLogging, YieldingStorage> {
    init_tracing();
    ChikokuService::new(YieldingStorage::default(), InMemoryLogging::new(), options)
}

pub async fn register<L: LoggingService, S: Storage>(service: &ChikokuService<L, S>, name: &str) -> User {
    service
        .register_user(NewUser {
            auth_id: format!("auth-{}", name),
            name: name.to_string(),
            icon: format!("{}.png", name),
            alias: format!("{}-alias", name),
            fcm_token: String::new(),
        })
        .await
        .unwrap()
}

pub async fn group_with_members<L: LoggingService, S: Storage>(
    service: &ChikokuService<L, S>,
    name: &str,
    manager: &User,
    members: &[&User],
) -> Group {
    let group = service
        .create_group(name.to_string(), "pw".to_string(), &manager.id, String::new())
        .await
        .unwrap();
    for member in members {
        service.join_group(&member.id, name, "pw").await.unwrap();
    }
    service.get_group(&group.id).await.unwrap()
}

/// Fixed reference start time for events under test.
pub fn kickoff() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap()
}

pub fn draft(title: &str, author: &User, start_time: DateTime<Utc>) -> EventDraft {
    EventDraft {
        title: title.to_string(),
        description: format!("{} description", title),
        location_name: "Station".to_string(),
        cost: 500,
        message: String::new(),
        author_id: author.id.clone(),
        latitude: 35.68,
        longitude: 139.76,
        start_time,
        end_time: start_time + Duration::hours(2),
        closing_time: start_time - Duration::hours(1),
    }
}

/// In-memory storage that yields to the scheduler after every read, so
/// concurrent calls polled together interleave between their reads and
/// their writes. Counts the version conflicts the store reports.
#[derive(Clone, Default)]
pub struct YieldingStorage {
    pub inner: InMemoryStorage,
    group_conflicts: Arc<AtomicUsize>,
    event_conflicts: Arc<AtomicUsize>,
}

impl YieldingStorage {
    pub fn group_conflicts(&self) -> usize {
        self.group_conflicts.load(Ordering::SeqCst)
    }

    pub fn event_conflicts(&self) -> usize {
        self.event_conflicts.load(Ordering::SeqCst)
    }
}

async fn yielded<T>(result: T) -> T {
    yield_now().await;
    result
}

fn count_conflict<T>(result: Result<T, ChikokuError>, counter: &AtomicUsize) -> Result<T, ChikokuError> {
    if let Err(ChikokuError::VersionConflict(_)) = &result {
        counter.fetch_add(1, Ordering::SeqCst);
    }
    result
}

#[async_trait]
impl GroupStore for YieldingStorage {
    async fn find_group_by_name(&self, name: &str) -> Result<Option<Group>, ChikokuError> {
        yielded(self.inner.find_group_by_name(name).await).await
    }
    async fn find_group_by_id(&self, group_id: &str) -> Result<Option<Group>, ChikokuError> {
        yielded(self.inner.find_group_by_id(group_id).await).await
    }
    async fn find_groups_by_member_or_manager(&self, user_id: &str) -> Result<Vec<Group>, ChikokuError> {
        yielded(self.inner.find_groups_by_member_or_manager(user_id).await).await
    }
    async fn find_groups_by_event(&self, event_id: &str) -> Result<Vec<Group>, ChikokuError> {
        yielded(self.inner.find_groups_by_event(event_id).await).await
    }
    async fn create_group(&self, group: Group) -> Result<Group, ChikokuError> {
        self.inner.create_group(group).await
    }
    async fn update_group(&self, group: Group) -> Result<Group, ChikokuError> {
        count_conflict(self.inner.update_group(group).await, &self.group_conflicts)
    }
    async fn delete_group(&self, group_id: &str) -> Result<(), ChikokuError> {
        self.inner.delete_group(group_id).await
    }
}

#[async_trait]
impl EventStore for YieldingStorage {
    async fn find_event_by_id(&self, event_id: &str) -> Result<Option<Event>, ChikokuError> {
        yielded(self.inner.find_event_by_id(event_id).await).await
    }
    async fn create_event(&self, event: Event) -> Result<Event, ChikokuError> {
        self.inner.create_event(event).await
    }
    async fn update_event(&self, event: Event) -> Result<Event, ChikokuError> {
        count_conflict(self.inner.update_event(event).await, &self.event_conflicts)
    }
    async fn delete_event(&self, event_id: &str) -> Result<(), ChikokuError> {
        self.inner.delete_event(event_id).await
    }
}

#[async_trait]
impl UserStore for YieldingStorage {
    async fn find_user_by_id(&self, user_id: &str) -> Result<Option<User>, ChikokuError> {
        yielded(self.inner.find_user_by_id(user_id).await).await
    }
    async fn find_user_by_auth_id(&self, auth_id: &str) -> Result<Option<User>, ChikokuError> {
        yielded(self.inner.find_user_by_auth_id(auth_id).await).await
    }
    async fn create_user(&self, user: User) -> Result<User, ChikokuError> {
        self.inner.create_user(user).await
    }
    async fn update_user(&self, user: User) -> Result<User, ChikokuError> {
        self.inner.update_user(user).await
    }
    async fn delete_user(&self, user_id: &str) -> Result<(), ChikokuError> {
        self.inner.delete_user(user_id).await
    }
}
