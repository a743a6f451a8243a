/********************************************************************************
 * Copyright (c) 2026 Contributors to the feed-pinger project
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

//! The relay loop: owns the follow list, drives its periodic refresh, and
//! pumps statuses from the event source through the relevance filter into
//! fire-and-forget pings.

use std::sync::Arc;
use tokio::sync::mpsc::Receiver;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::config::RelayConfig;
use crate::directory::DirectoryClient;
use crate::dispatch::Dispatcher;
use crate::error::RelayError;
use crate::follow_list::FollowListHandle;
use crate::observability::events;
use crate::relevance::is_relevant;
use crate::source::{EventSource, FeedFrame, Status};

const COMPONENT: &str = "relay";

/// Orchestrator bridging the upstream feed and the downstream ping endpoint.
///
/// The loop body is single-threaded: the refresh tick and the frame channel
/// are multiplexed through one selection point with no priority between
/// them, and this loop is the only writer of the follow list and the only
/// caller of [`EventSource::reconfigure`]. Only ping delivery is offloaded.
pub struct Relay {
    config: RelayConfig,
    directory: DirectoryClient,
    dispatcher: Dispatcher,
    source: Arc<dyn EventSource>,
    follow_list: FollowListHandle,
}

impl Relay {
    pub fn new(
        config: RelayConfig,
        directory: DirectoryClient,
        dispatcher: Dispatcher,
        source: Arc<dyn EventSource>,
    ) -> Self {
        Self {
            config,
            directory,
            dispatcher,
            source,
            follow_list: FollowListHandle::new(),
        }
    }

    /// Handle onto the currently published follow list.
    pub fn follow_list(&self) -> FollowListHandle {
        self.follow_list.clone()
    }

    /// Runs until the process is terminated externally.
    ///
    /// Performs the initial follow-list fetch and source configuration, then
    /// enters the steady loop. Returns `Err` only for directory transport or
    /// decode failures; everything else is logged and survived.
    pub async fn run(self, mut frames: Receiver<FeedFrame>) -> Result<(), RelayError> {
        self.refresh_follow_list().await?;

        let period = self.config.refresh_interval();
        let mut refresh = interval_at(Instant::now() + period, period);
        refresh.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut frames_open = true;

        loop {
            tokio::select! {
                _ = refresh.tick() => {
                    self.refresh_follow_list().await?;
                }
                frame = frames.recv(), if frames_open => match frame {
                    Some(FeedFrame::Status(status)) => self.handle_status(status),
                    Some(FeedFrame::Disconnected { reason }) => {
                        warn!(
                            event = events::SOURCE_DISCONNECTED,
                            component = COMPONENT,
                            reason = reason.as_str(),
                            "upstream feed disconnected; waiting for the next refresh"
                        );
                    }
                    None => {
                        warn!(
                            event = events::SOURCE_CLOSED,
                            component = COMPONENT,
                            "frame channel closed; continuing on refresh ticks only"
                        );
                        frames_open = false;
                    }
                },
            }
        }
    }

    /// Fetches the follow list, publishes it as one atomic replacement, and
    /// re-scopes the upstream feed. The previous list is discarded, not
    /// merged; the brief connection gap during re-scoping is accepted.
    async fn refresh_follow_list(&self) -> Result<(), RelayError> {
        let list = self.directory.fetch_follow_list().await?;
        let version = self.follow_list.replace(list);

        let snapshot = self.follow_list.load();
        info!(
            event = events::FOLLOW_LIST_REPLACED,
            component = COMPONENT,
            tracked = snapshot.list().len(),
            version,
            "tracking updates"
        );

        if let Err(err) = self.source.reconfigure(snapshot.list().ids()).await {
            warn!(
                event = events::SOURCE_RECONFIGURE_FAILED,
                component = COMPONENT,
                err = %err,
                "feed reconfigure failed; retrying at the next refresh"
            );
        }

        Ok(())
    }

    fn handle_status(&self, status: Status) {
        let snapshot = self.follow_list.load();

        debug!(
            event = events::STATUS_RECEIVED,
            component = COMPONENT,
            user_id = status.user_id,
            status_id = status.status_id,
            "status received"
        );

        if !is_relevant(&status, snapshot.list()) {
            debug!(
                event = events::STATUS_FILTERED,
                component = COMPONENT,
                user_id = status.user_id,
                status_id = status.status_id,
                version = snapshot.version(),
                "status outside the follow list"
            );
            return;
        }

        let _ = self
            .dispatcher
            .spawn_ping(status.user_id, status.status_id);
    }
}
