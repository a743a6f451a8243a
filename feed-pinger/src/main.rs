/********************************************************************************
 * Copyright (c) 2026 Contributors to the feed-pinger project
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use url::Url;

use feed_relay::{DirectoryClient, Dispatcher, Relay, RelayConfig};
use status_stream::{StatusStreamSource, StreamCredentials};

const DEFAULT_STREAM_URL: &str = "https://stream.twitter.com/1.1/statuses/filter.json";
const FRAME_CHANNEL_CAPACITY: usize = 256;

/// Relays followed users' status updates to the notification endpoint.
#[derive(Parser)]
#[command(version, about)]
struct PingerArgs {
    /// Access token for the streaming account.
    #[arg(long)]
    stream_token: String,

    /// Access-token secret for the streaming account.
    #[arg(long)]
    stream_token_secret: String,

    /// Host where the notification service is running.
    #[arg(long)]
    notify_host: String,

    /// Secret that must accompany every notification-service request.
    #[arg(long)]
    notify_secret: String,

    /// Seconds between follow-list refreshes.
    #[arg(long, default_value_t = 3600)]
    refresh_interval_secs: u64,

    /// Streaming endpoint to connect to.
    #[arg(long, default_value = DEFAULT_STREAM_URL)]
    stream_url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = PingerArgs::parse();

    tracing::info!(
        notify_host = args.notify_host.as_str(),
        refresh_interval_secs = args.refresh_interval_secs,
        "starting feed pinger"
    );

    let notify_base = Url::parse(&format!("http://{}/pinger/", args.notify_host))
        .context("notify host does not form a valid base URL")?;
    let stream_url = Url::parse(&args.stream_url).context("invalid stream URL")?;

    let config = RelayConfig::new(
        &notify_base,
        args.notify_secret,
        Duration::from_secs(args.refresh_interval_secs),
    )?;

    let http = reqwest::Client::new();
    let (frames_tx, frames_rx) = tokio::sync::mpsc::channel(FRAME_CHANNEL_CAPACITY);

    let source = Arc::new(StatusStreamSource::new(
        http.clone(),
        stream_url,
        StreamCredentials {
            token: args.stream_token,
            token_secret: args.stream_token_secret,
        },
        frames_tx,
    ));

    let directory = DirectoryClient::new(http.clone(), config.following_url().clone());
    let dispatcher = Dispatcher::new(http, config.ping_url().clone(), config.notify_secret());

    Relay::new(config, directory, dispatcher, source)
        .run(frames_rx)
        .await?;

    Ok(())
}
