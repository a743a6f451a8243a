//! Wire-frame triage: one newline-delimited JSON line in, at most one
//! decoded status out.

use serde::Deserialize;
use tracing::{debug, warn};

use feed_relay::observability::events;
use feed_relay::Status;

const COMPONENT: &str = "status_stream";

// Control frames the stream interleaves with statuses.
const CONTROL_PREFIXES: [&str; 3] = ["{\"event\":", "{\"friends\":", "{\"delete\":"];

#[derive(Deserialize)]
struct RawUser {
    id: Option<u64>,
}

#[derive(Deserialize)]
struct RawStatus {
    id: Option<u64>,
    text: Option<String>,
    user: Option<RawUser>,
    in_reply_to_user_id: Option<u64>,
}

/// Decodes one wire line.
///
/// Blank keep-alive lines and control frames yield `None` silently (the
/// latter at debug level); malformed status frames are logged and dropped
/// so one bad frame never affects the frames behind it.
pub(crate) fn decode_line(line: &[u8]) -> Option<Status> {
    let Ok(text) = std::str::from_utf8(line) else {
        warn!(
            event = events::STREAM_FRAME_MALFORMED,
            component = COMPONENT,
            "frame is not UTF-8"
        );
        return None;
    };

    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if CONTROL_PREFIXES
        .iter()
        .any(|prefix| text.starts_with(prefix))
    {
        debug!(
            event = events::STREAM_CONTROL_FRAME,
            component = COMPONENT,
            "control frame skipped"
        );
        return None;
    }

    let raw: RawStatus = match serde_json::from_str(text) {
        Ok(raw) => raw,
        Err(err) => {
            warn!(
                event = events::STREAM_FRAME_MALFORMED,
                component = COMPONENT,
                err = %err,
                "undecodable frame dropped"
            );
            return None;
        }
    };

    let author = raw.user.as_ref().and_then(|user| user.id);
    match (author, raw.id) {
        (Some(user_id), Some(status_id)) => Some(Status {
            user_id,
            status_id,
            text: raw.text.unwrap_or_default(),
            in_reply_to_user_id: raw.in_reply_to_user_id,
        }),
        _ => {
            warn!(
                event = events::STREAM_FRAME_MALFORMED,
                component = COMPONENT,
                "no status in frame"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::decode_line;

    #[test]
    fn full_status_decodes() {
        let status = decode_line(
            br#"{"id":1001,"text":"hello","user":{"id":20,"screen_name":"someone"}}"#,
        )
        .expect("status should decode");

        assert_eq!(status.user_id, 20);
        assert_eq!(status.status_id, 1001);
        assert_eq!(status.text, "hello");
        assert_eq!(status.in_reply_to_user_id, None);
    }

    #[test]
    fn reply_target_is_carried_through() {
        let status = decode_line(
            br#"{"id":1002,"text":"@x hi","user":{"id":10},"in_reply_to_user_id":77}"#,
        )
        .expect("reply should decode");

        assert_eq!(status.in_reply_to_user_id, Some(77));
    }

    #[test]
    fn null_reply_target_means_not_a_reply() {
        let status = decode_line(
            br#"{"id":1003,"text":"plain","user":{"id":10},"in_reply_to_user_id":null}"#,
        )
        .expect("status should decode");

        assert_eq!(status.in_reply_to_user_id, None);
    }

    #[test]
    fn control_frames_are_skipped() {
        assert!(decode_line(br#"{"event":"follow","source":{}}"#).is_none());
        assert!(decode_line(br#"{"friends":[10,20,30]}"#).is_none());
        assert!(decode_line(br#"{"delete":{"status":{"id":1}}}"#).is_none());
    }

    #[test]
    fn keep_alive_lines_are_skipped() {
        assert!(decode_line(b"").is_none());
        assert!(decode_line(b"\r\n").is_none());
    }

    #[test]
    fn frame_without_an_author_is_dropped() {
        assert!(decode_line(br#"{"id":1004,"text":"orphan"}"#).is_none());
        assert!(decode_line(br#"{"id":1005,"text":"orphan","user":{}}"#).is_none());
    }

    #[test]
    fn frame_without_a_status_id_is_dropped() {
        assert!(decode_line(br#"{"text":"no id","user":{"id":10}}"#).is_none());
    }

    #[test]
    fn undecodable_frame_is_dropped() {
        assert!(decode_line(b"not json at all").is_none());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let status = decode_line(
            br#"{"id":1006,"text":"extra","user":{"id":10,"verified":true},"retweet_count":3}"#,
        )
        .expect("status should decode");

        assert_eq!(status.user_id, 10);
    }
}
