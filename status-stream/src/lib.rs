/********************************************************************************
 * Copyright (c) 2026 Contributors to the feed-pinger project
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

//! # status-stream
//!
//! Concrete [`EventSource`] for `feed-relay`: connects to the network's
//! streaming endpoint scoped to the current follow list and turns the
//! newline-delimited JSON wire format into [`FeedFrame`]s.
//!
//! `reconfigure` aborts the previous reader task and, for a non-empty
//! follow list, spawns a new one that owns the connection for its whole
//! lifetime. When the connection ends or fails the reader emits one
//! `Disconnected` frame and exits; re-establishment is left to the relay's
//! next refresh. The relay core never sees the connection or the wire
//! format.

mod frame;

use async_trait::async_trait;
use futures::StreamExt;
use tokio::sync::mpsc::Sender;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use url::Url;

use feed_relay::error::SourceError;
use feed_relay::observability::{events, fields};
use feed_relay::{EventSource, FeedFrame, UserId};

const COMPONENT: &str = "status_stream";

/// Credentials for the streaming account. The signing handshake is the
/// upstream client library's concern; these ride as HTTP basic auth.
#[derive(Clone)]
pub struct StreamCredentials {
    pub token: String,
    pub token_secret: String,
}

/// Live streaming connection scoped to the current follow list.
pub struct StatusStreamSource {
    http: reqwest::Client,
    stream_url: Url,
    credentials: StreamCredentials,
    frames: Sender<FeedFrame>,
    reader: Mutex<Option<JoinHandle<()>>>,
}

impl StatusStreamSource {
    /// Builds a source that will deliver frames on `frames`. No connection
    /// is opened until the first non-empty `reconfigure`.
    pub fn new(
        http: reqwest::Client,
        stream_url: Url,
        credentials: StreamCredentials,
        frames: Sender<FeedFrame>,
    ) -> Self {
        Self {
            http,
            stream_url,
            credentials,
            frames,
            reader: Mutex::new(None),
        }
    }
}

#[async_trait]
impl EventSource for StatusStreamSource {
    async fn reconfigure(&self, follow_ids: &[UserId]) -> Result<(), SourceError> {
        let mut reader = self.reader.lock().await;
        if let Some(previous) = reader.take() {
            previous.abort();
        }

        if follow_ids.is_empty() {
            info!(
                event = events::STREAM_IDLE,
                component = COMPONENT,
                "empty follow list; not connecting"
            );
            return Ok(());
        }

        let follow = follow_ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");

        *reader = Some(tokio::spawn(run_reader(
            self.http.clone(),
            self.stream_url.clone(),
            self.credentials.clone(),
            follow,
            self.frames.clone(),
        )));

        Ok(())
    }
}

enum ReadEnd {
    /// The server closed the stream.
    Eof,
    /// The relay dropped the frame channel; there is nobody left to feed.
    RelayGone,
}

async fn run_reader(
    http: reqwest::Client,
    stream_url: Url,
    credentials: StreamCredentials,
    follow: String,
    frames: Sender<FeedFrame>,
) {
    let reason = match read_stream(&http, stream_url, &credentials, &follow, &frames).await {
        Ok(ReadEnd::Eof) => fields::REASON_STREAM_ENDED.to_string(),
        Ok(ReadEnd::RelayGone) => return,
        Err(err) => err.to_string(),
    };

    warn!(
        event = events::STREAM_DISCONNECTED,
        component = COMPONENT,
        reason = reason.as_str(),
        "stream ended"
    );
    let _ = frames.send(FeedFrame::Disconnected { reason }).await;
}

async fn read_stream(
    http: &reqwest::Client,
    stream_url: Url,
    credentials: &StreamCredentials,
    follow: &str,
    frames: &Sender<FeedFrame>,
) -> Result<ReadEnd, SourceError> {
    let response = http
        .post(stream_url)
        .basic_auth(&credentials.token, Some(&credentials.token_secret))
        .form(&[("follow", follow)])
        .send()
        .await
        .map_err(|err| SourceError::Connect(err.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Connect(format!(
            "stream endpoint returned HTTP {status}"
        )));
    }

    info!(
        event = events::STREAM_CONNECTED,
        component = COMPONENT,
        "stream established"
    );

    let mut body = response.bytes_stream();
    let mut buffer: Vec<u8> = Vec::new();

    while let Some(chunk) = body.next().await {
        let chunk = chunk.map_err(|err| SourceError::Read(err.to_string()))?;
        buffer.extend_from_slice(&chunk);

        while let Some(newline) = buffer.iter().position(|byte| *byte == b'\n') {
            let line: Vec<u8> = buffer.drain(..=newline).collect();
            if !forward_line(&line, frames).await {
                return Ok(ReadEnd::RelayGone);
            }
        }
    }

    // A last line may arrive without a trailing newline before the close.
    if !forward_line(&buffer, frames).await {
        return Ok(ReadEnd::RelayGone);
    }

    Ok(ReadEnd::Eof)
}

/// Returns `false` when the frame channel is gone.
async fn forward_line(line: &[u8], frames: &Sender<FeedFrame>) -> bool {
    match frame::decode_line(line) {
        Some(status) => frames.send(FeedFrame::Status(status)).await.is_ok(),
        None => true,
    }
}
