//! Relevance policy applied to every received status.

use crate::follow_list::FollowList;
use crate::source::Status;

/// Returns `true` when a status should be relayed downstream.
///
/// Statuses whose author is outside the follow list are skipped: the
/// upstream feed also emits activity *about* followed users (retweets,
/// replies) triggered by accounts nobody here follows, and those are not
/// wanted.
///
/// Replies directed at users outside the follow list are skipped too. This
/// has false negatives: if user A follows X and user B follows X and Z, a
/// reply by X to Z is suppressed for both A and B even though B would have
/// seen that status upstream. That should be rare.
pub fn is_relevant(status: &Status, following: &FollowList) -> bool {
    if !following.contains(status.user_id) {
        return false;
    }

    match status.in_reply_to_user_id {
        Some(reply_to) if reply_to != 0 => following.contains(reply_to),
        _ => true,
    }
}
