use utoipa::OpenApi;

use crate::{
    api::models::{
        CreateEventRequest, CreateGroupRequest, DeleteEventRequest, ErrorResponse, JoinGroupRequest, JoinGroupResponse,
        LeaveGroupRequest, SignInRequest, VoteRequest,
    },
    core::models::{
        audit::AppLog,
        event::{Event, VotedMember},
        group::Group,
        user::{NewUser, User, UserUpdate},
        views::{
            ArrivalRank, ArrivalRanking, BoardAuthor, BoardEvent, BoardOption, BoardParticipant, GroupInfo,
            GroupInfoMember, UserGroupSummary,
        },
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::sign_in,
        super::handlers::register_user,
        super::handlers::get_user,
        super::handlers::update_user,
        super::handlers::get_user_groups,
        super::handlers::create_group,
        super::handlers::join_group,
        super::handlers::leave_group,
        super::handlers::get_group_info,
        super::handlers::create_event,
        super::handlers::list_events,
        super::handlers::get_event_board,
        super::handlers::get_event,
        super::handlers::delete_event,
        super::handlers::record_vote,
        super::handlers::get_arrival_ranking,
        super::handlers::get_app_logs
    ),
    components(schemas(
        SignInRequest,
        CreateGroupRequest,
        JoinGroupRequest,
        JoinGroupResponse,
        LeaveGroupRequest,
        CreateEventRequest,
        VoteRequest,
        DeleteEventRequest,
        ErrorResponse,
        NewUser,
        UserUpdate,
        User,
        Group,
        Event,
        VotedMember,
        BoardEvent,
        BoardAuthor,
        BoardOption,
        BoardParticipant,
        ArrivalRanking,
        ArrivalRank,
        GroupInfo,
        GroupInfoMember,
        UserGroupSummary,
        AppLog
    )),
    info(
        title = "Chikokulympic API",
        description = "Groups, events, votes and arrival rankings",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
