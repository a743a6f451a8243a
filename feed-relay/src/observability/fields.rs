//! Canonical structured field keys and shared reason strings.

pub const EVENT: &str = "event";
pub const COMPONENT: &str = "component";
pub const REASON: &str = "reason";
pub const ERR: &str = "err";

pub const USER_ID: &str = "user_id";
pub const STATUS_ID: &str = "status_id";
pub const HTTP_STATUS: &str = "http_status";
pub const TRACKED: &str = "tracked";
pub const VERSION: &str = "version";

pub const REASON_STREAM_ENDED: &str = "stream_ended";
