/********************************************************************************
 * Copyright (c) 2026 Contributors to the feed-pinger project
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

//! Event-source contract consumed by the relay loop.

use async_trait::async_trait;

use crate::error::SourceError;
use crate::follow_list::UserId;

/// One decoded status update from the upstream feed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Status {
    pub user_id: UserId,
    pub status_id: u64,
    pub text: String,
    /// Reply target, when the status is a reply. Upstream encodes "not a
    /// reply" both as an absent field and as a zero id.
    pub in_reply_to_user_id: Option<UserId>,
}

/// What an event source delivers on the relay's frame channel.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FeedFrame {
    /// A decoded status update.
    Status(Status),
    /// The live connection ended. The relay keeps running; coverage resumes
    /// at the next refresh reconfigure, or sooner if the source reconnects
    /// on its own.
    Disconnected { reason: String },
}

/// A live upstream feed scoped to a follow list.
///
/// Implementations deliver [`FeedFrame`]s on the channel they were built
/// with. The relay loop never touches the connection or the wire format; it
/// only re-scopes the feed after each follow-list refresh. Connection
/// re-establishment and frame decoding are entirely the source's concern.
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Drops any live connection and establishes a new one covering exactly
    /// `follow_ids`. An empty list means "follow nothing" and is not an
    /// error. Safe to call repeatedly with the same list.
    async fn reconfigure(&self, follow_ids: &[UserId]) -> Result<(), SourceError>;
}
