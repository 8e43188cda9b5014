use crate::{
    api::models::*,
    core::{
        models::{
            audit::AppLog,
            event::{Event, Participation},
            group::Group,
            user::{NewUser, User, UserUpdate},
            views::{ArrivalRanking, BoardEvent, GroupInfo, UserGroupSummary},
        },
        services::ChikokuService,
    },
    infrastructure::{logging::in_memory::InMemoryLogging, storage::in_memory::InMemoryStorage},
};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use std::sync::Arc;

pub type AppService = ChikokuService<InMemoryLogging, InMemoryStorage>;

// Define API routes
pub fn api_routes(service: Arc<AppService>) -> Router {
    Router::new()
        .route("/signin", post(sign_in))
        .route("/users", post(register_user))
        .route("/users/{user_id}", get(get_user).put(update_user))
        .route("/users/{user_id}/groups", get(get_user_groups))
        .route("/groups", post(create_group))
        .route("/groups/join", post(join_group))
        .route("/groups/{group_id}", get(get_group_info))
        .route("/groups/{group_id}/leave", post(leave_group))
        .route("/events", post(create_event).get(list_events))
        .route("/events/board", get(get_event_board))
        .route("/events/{event_id}", get(get_event).delete(delete_event))
        .route("/events/{event_id}/votes", post(record_vote))
        .route("/events/{event_id}/ranking", get(get_arrival_ranking))
        .route("/logs", get(get_app_logs))
        .with_state(service)
}

#[utoipa::path(
    post,
    path = "/api/signin",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Account behind the auth id", body = User),
        (status = 401, description = "Unknown auth id", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn sign_in(
    State(service): State<Arc<AppService>>,
    Json(req): Json<SignInRequest>,
) -> Result<Json<User>, ApiError> {
    require("auth_id", &req.auth_id)?;
    let user = service.sign_in(&req.auth_id).await?;
    Ok(Json(user))
}

#[utoipa::path(
    post,
    path = "/api/users",
    request_body = NewUser,
    responses(
        (status = 201, description = "User registered", body = User),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 409, description = "Auth id already registered", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn register_user(
    State(service): State<Arc<AppService>>,
    Json(req): Json<NewUser>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    require("auth_id", &req.auth_id)?;
    require("name", &req.name)?;
    let user = service.register_user(req).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    get,
    path = "/api/users/{user_id}",
    params(("user_id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
async fn get_user(State(service): State<Arc<AppService>>, Path(user_id): Path<String>) -> Result<Json<User>, ApiError> {
    let user = service.get_user(&user_id).await?;
    Ok(Json(user))
}

#[utoipa::path(
    put,
    path = "/api/users/{user_id}",
    params(("user_id" = String, Path, description = "User ID")),
    request_body = UserUpdate,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
async fn update_user(
    State(service): State<Arc<AppService>>,
    Path(user_id): Path<String>,
    Json(req): Json<UserUpdate>,
) -> Result<Json<User>, ApiError> {
    let user = service.update_user(&user_id, req).await?;
    Ok(Json(user))
}

#[utoipa::path(
    get,
    path = "/api/users/{user_id}/groups",
    params(("user_id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "Groups the user manages or belongs to, by name", body = [UserGroupSummary]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn get_user_groups(
    State(service): State<Arc<AppService>>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<UserGroupSummary>>, ApiError> {
    let groups = service.get_user_groups(&user_id).await?;
    Ok(Json(groups))
}

#[utoipa::path(
    post,
    path = "/api/groups",
    request_body = CreateGroupRequest,
    responses(
        (status = 201, description = "Group created", body = Group),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 404, description = "Manager not found", body = ErrorResponse),
        (status = 409, description = "Group name already in use", body = ErrorResponse)
    )
)]
async fn create_group(
    State(service): State<Arc<AppService>>,
    Json(req): Json<CreateGroupRequest>,
) -> Result<(StatusCode, Json<Group>), ApiError> {
    require("name", &req.name)?;
    require("manager_id", &req.manager_id)?;
    let group = service
        .create_group(req.name, req.password, &req.manager_id, req.description)
        .await?;
    Ok((StatusCode::CREATED, Json(group)))
}

#[utoipa::path(
    post,
    path = "/api/groups/join",
    request_body = JoinGroupRequest,
    responses(
        (status = 200, description = "Joined the group", body = JoinGroupResponse),
        (status = 403, description = "Password mismatch", body = ErrorResponse),
        (status = 404, description = "Group or user not found", body = ErrorResponse),
        (status = 409, description = "Already a member or the manager", body = ErrorResponse)
    )
)]
async fn join_group(
    State(service): State<Arc<AppService>>,
    Json(req): Json<JoinGroupRequest>,
) -> Result<Json<JoinGroupResponse>, ApiError> {
    let group_id = service.join_group(&req.user_id, &req.group_name, &req.password).await?;
    Ok(Json(JoinGroupResponse { group_id }))
}

#[utoipa::path(
    post,
    path = "/api/groups/{group_id}/leave",
    params(("group_id" = String, Path, description = "Group ID")),
    request_body = LeaveGroupRequest,
    responses(
        (status = 204, description = "Left the group"),
        (status = 404, description = "Group not found", body = ErrorResponse),
        (status = 409, description = "Manager or not a member", body = ErrorResponse)
    )
)]
async fn leave_group(
    State(service): State<Arc<AppService>>,
    Path(group_id): Path<String>,
    Json(req): Json<LeaveGroupRequest>,
) -> Result<StatusCode, ApiError> {
    service.leave_group(&req.user_id, &group_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/groups/{group_id}",
    params(("group_id" = String, Path, description = "Group ID")),
    responses(
        (status = 200, description = "Group details with members", body = GroupInfo),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
async fn get_group_info(
    State(service): State<Arc<AppService>>,
    Path(group_id): Path<String>,
) -> Result<Json<GroupInfo>, ApiError> {
    let info = service.get_group_info(&group_id).await?;
    Ok(Json(info))
}

#[utoipa::path(
    post,
    path = "/api/events",
    request_body = CreateEventRequest,
    responses(
        (status = 201, description = "Event created and linked to its group", body = Event),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
async fn create_event(
    State(service): State<Arc<AppService>>,
    Json(req): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<Event>), ApiError> {
    let (group_id, draft) = req.into_parts()?;
    let event = service.create_event(draft, &group_id).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

#[utoipa::path(
    get,
    path = "/api/events",
    params(GroupIdsQuery),
    responses(
        (status = 200, description = "Events of the groups, latest start first", body = [Event]),
        (status = 400, description = "No group ids given", body = ErrorResponse),
        (status = 500, description = "A group or event could not be read", body = ErrorResponse)
    )
)]
async fn list_events(
    State(service): State<Arc<AppService>>,
    Query(query): Query<GroupIdsQuery>,
) -> Result<Json<Vec<Event>>, ApiError> {
    let group_ids = query.parse()?;
    let events = service.list_events(&group_ids).await?;
    Ok(Json(events))
}

#[utoipa::path(
    get,
    path = "/api/events/board",
    params(GroupIdsQuery),
    responses(
        (status = 200, description = "Board view of every event in the groups", body = [BoardEvent]),
        (status = 400, description = "No group ids given", body = ErrorResponse),
        (status = 500, description = "A group or event could not be read", body = ErrorResponse)
    )
)]
async fn get_event_board(
    State(service): State<Arc<AppService>>,
    Query(query): Query<GroupIdsQuery>,
) -> Result<Json<Vec<BoardEvent>>, ApiError> {
    let group_ids = query.parse()?;
    let board = service.build_event_board(&group_ids).await?;
    Ok(Json(board))
}

#[utoipa::path(
    get,
    path = "/api/events/{event_id}",
    params(("event_id" = String, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event found", body = Event),
        (status = 404, description = "Event not found", body = ErrorResponse)
    )
)]
async fn get_event(
    State(service): State<Arc<AppService>>,
    Path(event_id): Path<String>,
) -> Result<Json<Event>, ApiError> {
    let event = service.get_event(&event_id).await?;
    Ok(Json(event))
}

#[utoipa::path(
    delete,
    path = "/api/events/{event_id}",
    params(("event_id" = String, Path, description = "Event ID")),
    request_body = DeleteEventRequest,
    responses(
        (status = 200, description = "Event deleted", body = Event),
        (status = 403, description = "Requester is not the author", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse)
    )
)]
async fn delete_event(
    State(service): State<Arc<AppService>>,
    Path(event_id): Path<String>,
    Json(req): Json<DeleteEventRequest>,
) -> Result<Json<Event>, ApiError> {
    let event = service.delete_event(&event_id, &req.requested_by).await?;
    Ok(Json(event))
}

#[utoipa::path(
    post,
    path = "/api/events/{event_id}/votes",
    params(("event_id" = String, Path, description = "Event ID")),
    request_body = VoteRequest,
    responses(
        (status = 200, description = "Vote recorded", body = Event),
        (status = 403, description = "Voter does not belong to a group owning the event", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse)
    )
)]
async fn record_vote(
    State(service): State<Arc<AppService>>,
    Path(event_id): Path<String>,
    Json(req): Json<VoteRequest>,
) -> Result<Json<Event>, ApiError> {
    require("user_id", &req.user_id)?;
    let user_id = req.user_id.clone();
    let event = service
        .record_vote(&user_id, &event_id, Participation::from(req))
        .await?;
    Ok(Json(event))
}

#[utoipa::path(
    get,
    path = "/api/events/{event_id}/ranking",
    params(("event_id" = String, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Arrival leaderboard", body = ArrivalRanking),
        (status = 404, description = "Event not found", body = ErrorResponse)
    )
)]
async fn get_arrival_ranking(
    State(service): State<Arc<AppService>>,
    Path(event_id): Path<String>,
) -> Result<Json<ArrivalRanking>, ApiError> {
    let ranking = service.get_arrival_ranking(&event_id).await?;
    Ok(Json(ranking))
}

#[utoipa::path(
    get,
    path = "/api/logs",
    responses(
        (status = 200, description = "Application action log", body = [AppLog]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn get_app_logs(State(service): State<Arc<AppService>>) -> Result<Json<Vec<AppLog>>, ApiError> {
    let logs = service.get_app_logs().await?;
    Ok(Json(logs))
}
