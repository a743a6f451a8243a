/********************************************************************************
 * Copyright (c) 2026 Contributors to the feed-pinger project
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

//! Fire-and-forget delivery of one downstream ping per relevant status.

use tokio::task::JoinHandle;
use tracing::{debug, warn};
use url::Url;

use crate::follow_list::UserId;
use crate::observability::events;

const COMPONENT: &str = "dispatch";

/// Sends `(user id, status id)` notifications to the downstream ping
/// endpoint.
///
/// Each ping runs as its own detached task owning copies of the two ids, the
/// target URL, and the secret; nothing reaches back into the relay loop, so
/// a slow or failing ping never delays the statuses behind it.
#[derive(Clone)]
pub struct Dispatcher {
    http: reqwest::Client,
    ping_url: Url,
    secret: String,
}

impl Dispatcher {
    pub fn new(http: reqwest::Client, ping_url: Url, secret: impl Into<String>) -> Self {
        Self {
            http,
            ping_url,
            secret: secret.into(),
        }
    }

    /// Spawns one ping and returns without waiting for it.
    ///
    /// Delivery is best effort: connection errors and non-success statuses
    /// are logged and dropped, never retried. The relay loop discards the
    /// returned handle; tests may await it.
    pub fn spawn_ping(&self, user_id: UserId, status_id: u64) -> JoinHandle<()> {
        let http = self.http.clone();
        let ping_url = self.ping_url.clone();
        let secret = self.secret.clone();

        tokio::spawn(async move {
            send_ping(http, ping_url, secret, user_id, status_id).await;
        })
    }
}

async fn send_ping(
    http: reqwest::Client,
    ping_url: Url,
    secret: String,
    user_id: UserId,
    status_id: u64,
) {
    debug!(
        event = events::PING_SEND_ATTEMPT,
        component = COMPONENT,
        user_id,
        status_id,
        "pinging for update"
    );

    let form = [
        ("update_twitter_id", user_id.to_string()),
        ("update_status_id", status_id.to_string()),
        ("secret", secret),
    ];

    match http.post(ping_url).form(&form).send().await {
        Ok(response) if response.status().is_success() => {
            debug!(
                event = events::PING_SEND_OK,
                component = COMPONENT,
                user_id,
                status_id,
                "ping delivered"
            );
        }
        Ok(response) => {
            warn!(
                event = events::PING_SEND_FAILED,
                component = COMPONENT,
                user_id,
                status_id,
                http_status = response.status().as_u16(),
                "ping rejected"
            );
        }
        Err(err) => {
            warn!(
                event = events::PING_SEND_FAILED,
                component = COMPONENT,
                user_id,
                status_id,
                err = %err,
                "ping failed"
            );
        }
    }
}
