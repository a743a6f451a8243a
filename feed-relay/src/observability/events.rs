//! Canonical structured event names used across the relay workspace.

// Follow-directory and follow-list events.
pub const DIRECTORY_FETCH_DEGRADED: &str = "directory_fetch_degraded";
pub const FOLLOW_LIST_REPLACED: &str = "follow_list_replaced";

// Relay loop events.
pub const STATUS_RECEIVED: &str = "status_received";
pub const STATUS_FILTERED: &str = "status_filtered";
pub const SOURCE_DISCONNECTED: &str = "source_disconnected";
pub const SOURCE_CLOSED: &str = "source_closed";
pub const SOURCE_RECONFIGURE_FAILED: &str = "source_reconfigure_failed";

// Dispatch events.
pub const PING_SEND_ATTEMPT: &str = "ping_send_attempt";
pub const PING_SEND_OK: &str = "ping_send_ok";
pub const PING_SEND_FAILED: &str = "ping_send_failed";

// Upstream stream adapter events.
pub const STREAM_CONNECTED: &str = "stream_connected";
pub const STREAM_DISCONNECTED: &str = "stream_disconnected";
pub const STREAM_IDLE: &str = "stream_idle";
pub const STREAM_CONTROL_FRAME: &str = "stream_control_frame";
pub const STREAM_FRAME_MALFORMED: &str = "stream_frame_malformed";
