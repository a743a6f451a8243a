//! Follow-directory client: one-shot fetch of the current follow list.

use tracing::warn;
use url::Url;

use crate::error::DirectoryError;
use crate::follow_list::{FollowList, UserId};
use crate::observability::events;

const COMPONENT: &str = "directory";

/// Fetches the follow list from the notification service's directory
/// endpoint.
#[derive(Clone)]
pub struct DirectoryClient {
    http: reqwest::Client,
    following_url: Url,
}

impl DirectoryClient {
    pub fn new(http: reqwest::Client, following_url: Url) -> Self {
        Self {
            http,
            following_url,
        }
    }

    /// Issues one GET against the directory endpoint and decodes the JSON id
    /// array.
    ///
    /// A non-success status means the service currently has nobody to follow
    /// and yields an empty list, not an error. Transport and decode failures
    /// are returned to the caller, which treats them as fatal: they indicate
    /// a configuration or infrastructure problem that a retry at the next
    /// tick cannot heal.
    pub async fn fetch_follow_list(&self) -> Result<FollowList, DirectoryError> {
        let response = self.http.get(self.following_url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(
                event = events::DIRECTORY_FETCH_DEGRADED,
                component = COMPONENT,
                http_status = status.as_u16(),
                "directory returned a non-success status; following nobody until the next refresh"
            );
            return Ok(FollowList::empty());
        }

        let body = response.bytes().await?;
        let ids: Vec<UserId> = serde_json::from_slice(&body)?;

        Ok(FollowList::from_ids(ids))
    }
}
