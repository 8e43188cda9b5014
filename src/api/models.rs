use axum::{Json, http::StatusCode, response::IntoResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::core::errors::{ChikokuError, FieldError};
use crate::core::models::event::{EventDraft, Participation, Vote};

// Request structs for JSON payloads
#[derive(Deserialize, ToSchema)]
pub struct SignInRequest {
    pub auth_id: String,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateGroupRequest {
    pub name: String,
    pub password: String,
    pub manager_id: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Deserialize, ToSchema)]
pub struct JoinGroupRequest {
    pub user_id: String,
    pub group_name: String,
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct JoinGroupResponse {
    pub group_id: String,
}

#[derive(Deserialize, ToSchema)]
pub struct LeaveGroupRequest {
    pub user_id: String,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateEventRequest {
    pub group_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub location_name: String,
    #[serde(default)]
    pub cost: i64,
    #[serde(default)]
    pub message: String,
    pub author_id: String,
    pub latitude: f64,
    pub longitude: f64,
    #[schema(value_type = String)]
    pub start_time: DateTime<Utc>,
    #[schema(value_type = String)]
    pub end_time: DateTime<Utc>,
    #[schema(value_type = String)]
    pub closing_time: DateTime<Utc>,
}

impl CreateEventRequest {
    /// Splits the request into the target group id and the event draft.
    pub fn into_parts(self) -> Result<(String, EventDraft), ChikokuError> {
        require("group_id", &self.group_id)?;
        require("title", &self.title)?;
        require("author_id", &self.author_id)?;
        let draft = EventDraft {
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
        };
        Ok((self.group_id, draft))
    }
}

#[derive(Deserialize, ToSchema)]
pub struct VoteRequest {
    pub user_id: String,
    pub vote: String,
    #[serde(default)]
    pub is_arrival: bool,
    #[schema(value_type = Option<String>)]
    pub arrival_time: Option<DateTime<Utc>>,
}

impl From<VoteRequest> for Participation {
    fn from(req: VoteRequest) -> Self {
        Participation {
            vote: Vote::from(req.vote),
            is_arrival: req.is_arrival,
            arrival_time: req.arrival_time,
        }
    }
}

#[derive(Deserialize, ToSchema)]
pub struct DeleteEventRequest {
    pub requested_by: String,
}

/// `?group_ids=a,b,c`
#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GroupIdsQuery {
    pub group_ids: Option<String>,
}

impl GroupIdsQuery {
    pub fn parse(&self) -> Result<Vec<String>, ChikokuError> {
        let ids: Vec<String> = self
            .group_ids
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(String::from)
            .collect();
        if ids.is_empty() {
            return Err(ChikokuError::InvalidInput(
                "group_ids".to_string(),
                FieldError::required("group_ids"),
            ));
        }
        Ok(ids)
    }
}

pub fn require(field: &str, value: &str) -> Result<(), ChikokuError> {
    if value.trim().is_empty() {
        return Err(ChikokuError::InvalidInput(field.to_string(), FieldError::required(field)));
    }
    Ok(())
}

// Error response struct
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

// Newtype wrapper for ChikokuError to implement IntoResponse
pub struct ApiError(pub ChikokuError);

impl From<ChikokuError> for ApiError {
    fn from(err: ChikokuError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            ChikokuError::UserNotFound(_)
            | ChikokuError::GroupNotFound(_)
            | ChikokuError::EventNotFound(_)
            | ChikokuError::ManagerNotFound(_) => StatusCode::NOT_FOUND,
            ChikokuError::UnknownAuthId(_) => StatusCode::UNAUTHORIZED,
            ChikokuError::DuplicateGroupName(_)
            | ChikokuError::AlreadyMember(_)
            | ChikokuError::IsManager(_)
            | ChikokuError::ManagerCannotLeave(_)
            | ChikokuError::NotAMember(_)
            | ChikokuError::AuthIdAlreadyRegistered(_)
            | ChikokuError::VersionConflict(_) => StatusCode::CONFLICT,
            ChikokuError::PasswordMismatch(_) | ChikokuError::NotAGroupMember(_) | ChikokuError::NotEventAuthor(_) => {
                StatusCode::FORBIDDEN
            }
            ChikokuError::InvalidInput(..) => StatusCode::BAD_REQUEST,
            ChikokuError::AggregationFailure(_)
            | ChikokuError::StorageError(_)
            | ChikokuError::LoggingError(_)
            | ChikokuError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        (status, Json(ErrorResponse { error: self.0.to_string() })).into_response()
    }
}
