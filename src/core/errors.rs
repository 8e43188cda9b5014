use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: String,
    pub title: String,
    pub description: String,
}

impl FieldError {
    pub fn required(field: &str) -> Self {
        FieldError {
            field: field.to_string(),
            title: format!("Missing {}", field),
            description: format!("{} is required", field),
        }
    }
}

#[derive(Error, Debug, Serialize)]
pub enum ChikokuError {
    #[error("User {0} not found")]
    UserNotFound(String),
    #[error("Group {0} not found")]
    GroupNotFound(String),
    #[error("Event {0} not found")]
    EventNotFound(String),
    #[error("Manager {0} not found")]
    ManagerNotFound(String),
    #[error("No user registered for auth id {0}")]
    UnknownAuthId(String),
    #[error("Group name '{0}' is already in use")]
    DuplicateGroupName(String),
    #[error("Password does not match for group '{0}'")]
    PasswordMismatch(String),
    #[error("User {0} is already a group member")]
    AlreadyMember(String),
    #[error("User {0} is the manager of this group")]
    IsManager(String),
    #[error("Manager {0} cannot leave the group")]
    ManagerCannotLeave(String),
    #[error("User {0} is not a member of the group")]
    NotAMember(String),
    #[error("User {0} does not belong to a group owning this event")]
    NotAGroupMember(String),
    #[error("User {0} is not the author of this event")]
    NotEventAuthor(String),
    #[error("Auth id {0} is already registered")]
    AuthIdAlreadyRegistered(String),
    #[error("Record {0} was modified concurrently")]
    VersionConflict(String),
    #[error("Event board aggregation failed: {0}")]
    AggregationFailure(Box<ChikokuError>),
    #[error("Invalid input for field `{0}`: {1:?}")]
    InvalidInput(String, FieldError),
    #[error("Storage error: {0}")]
    StorageError(String),
    #[error("Logging error: {0}")]
    LoggingError(String),
    #[error("Internal server error: {0}")]
    InternalServerError(String),
}
