/********************************************************************************
 * Copyright (c) 2026 Contributors to the feed-pinger project
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

//! # feed-relay
//!
//! `feed-relay` bridges a live status-update stream and a pull-oriented
//! notification service: it maintains a periodically refreshed follow list,
//! classifies every incoming status against it, and pings the downstream
//! endpoint for each relevant update without ever blocking stream
//! consumption on a delivery.
//!
//! The upstream feed is consumed through the [`EventSource`] contract: a
//! source, once re-scoped to a follow list via
//! [`reconfigure`](EventSource::reconfigure), delivers [`FeedFrame`]s on a
//! channel and may be re-scoped again at any time. Concrete adapters live
//! outside this crate (see the `status-stream` workspace member).
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use feed_relay::{DirectoryClient, Dispatcher, EventSource, Relay, RelayConfig};
//!
//! # pub mod idle_source {
//! #     use async_trait::async_trait;
//! #     use feed_relay::error::SourceError;
//! #     use feed_relay::{EventSource, UserId};
//! #
//! #     pub struct IdleSource;
//! #
//! #     #[async_trait]
//! #     impl EventSource for IdleSource {
//! #         async fn reconfigure(&self, _follow_ids: &[UserId]) -> Result<(), SourceError> {
//! #             Ok(())
//! #         }
//! #     }
//! # }
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let base = url::Url::parse("http://notify.example/pinger/").unwrap();
//! let config = RelayConfig::new(&base, "hunter2", Duration::from_secs(3600)).unwrap();
//!
//! let http = reqwest::Client::new();
//! let directory = DirectoryClient::new(http.clone(), config.following_url().clone());
//! let dispatcher = Dispatcher::new(http, config.ping_url().clone(), config.notify_secret());
//!
//! let source: Arc<dyn EventSource> = Arc::new(idle_source::IdleSource);
//! let (_frames_tx, frames_rx) = tokio::sync::mpsc::channel(16);
//!
//! Relay::new(config, directory, dispatcher, source)
//!     .run(frames_rx)
//!     .await
//!     .unwrap();
//! # });
//! ```
//!
//! ## Observability model
//!
//! The workspace uses `tracing` for logs/events. Library code emits events
//! and does not install a global subscriber; binaries and tests are
//! responsible for one-time `tracing_subscriber` initialization at process
//! boundaries.

mod config;
pub use config::RelayConfig;

mod directory;
pub use directory::DirectoryClient;

mod dispatch;
pub use dispatch::Dispatcher;

pub mod error;

mod follow_list;
pub use follow_list::{FollowList, FollowListHandle, FollowListSnapshot, UserId};

#[doc(hidden)]
pub mod observability;

mod relevance;
pub use relevance::is_relevant;

mod relay;
pub use relay::Relay;

mod source;
pub use source::{EventSource, FeedFrame, Status};
