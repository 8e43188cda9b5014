pub const USER_REGISTERED: &str = "USER_REGISTERED";
pub const USER_UPDATED: &str = "USER_UPDATED";
pub const GROUP_CREATED: &str = "GROUP_CREATED";
pub const MEMBER_JOINED: &str = "MEMBER_JOINED";
pub const MEMBER_LEFT: &str = "MEMBER_LEFT";
pub const EVENT_CREATED: &str = "EVENT_CREATED";
pub const EVENT_DELETED: &str = "EVENT_DELETED";
pub const VOTE_RECORDED: &str = "VOTE_RECORDED";
