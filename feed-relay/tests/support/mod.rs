//! In-process HTTP stubs and scripted event sources for relay tests.

use async_trait::async_trait;
use std::net::SocketAddr;
use std::sync::Mutex;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;

use feed_relay::error::SourceError;
use feed_relay::{EventSource, UserId};

/// One-time, opt-in test logging (`RUST_LOG` controls the filter).
#[allow(dead_code)]
pub(crate) fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Formats one canned HTTP/1.1 response.
pub(crate) fn http_response(status_line: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )
}

/// Serves one canned response per accepted connection, repeating the last
/// entry once the script runs out. Every raw request is forwarded on the
/// returned channel.
pub(crate) async fn spawn_stub_http(
    responses: Vec<String>,
) -> (SocketAddr, mpsc::UnboundedReceiver<String>) {
    assert!(!responses.is_empty(), "stub needs at least one response");

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("stub should bind");
    let addr = listener.local_addr().expect("stub should report its address");
    let (seen_tx, seen_rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        let mut served = 0usize;
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let response = responses[served.min(responses.len() - 1)].clone();
            served += 1;

            let request = read_request(&mut socket).await;
            let _ = seen_tx.send(request);
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    (addr, seen_rx)
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut raw = Vec::new();
    let mut buf = [0u8; 1024];

    loop {
        if let Some(head_end) = find_subslice(&raw, b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&raw[..head_end]).to_string();
            let content_length = head
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.trim()
                        .eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())?
                })
                .unwrap_or(0);

            let body_end = head_end + 4 + content_length;
            while raw.len() < body_end {
                let n = socket.read(&mut buf).await.unwrap_or(0);
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);
            }
            return String::from_utf8_lossy(&raw).to_string();
        }

        let n = socket.read(&mut buf).await.unwrap_or(0);
        if n == 0 {
            return String::from_utf8_lossy(&raw).to_string();
        }
        raw.extend_from_slice(&buf[..n]);
    }
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Waits up to five seconds for the stub to see a request.
pub(crate) async fn recv_request(seen: &mut mpsc::UnboundedReceiver<String>) -> String {
    tokio::time::timeout(Duration::from_secs(5), seen.recv())
        .await
        .expect("expected a request within 5s")
        .expect("stub channel should stay open")
}

/// Asserts that no request reaches the stub for a short settling window.
#[allow(dead_code)]
pub(crate) async fn assert_no_request(seen: &mut mpsc::UnboundedReceiver<String>) {
    let outcome = tokio::time::timeout(Duration::from_millis(300), seen.recv()).await;
    assert!(outcome.is_err(), "unexpected request: {outcome:?}");
}

/// Event source that records every reconfigure call and never connects
/// anywhere.
#[derive(Default)]
#[allow(dead_code)]
pub(crate) struct RecordingSource {
    reconfigures: Mutex<Vec<Vec<UserId>>>,
}

#[allow(dead_code)]
impl RecordingSource {
    pub(crate) fn reconfigures(&self) -> Vec<Vec<UserId>> {
        self.reconfigures
            .lock()
            .expect("reconfigure log should lock")
            .clone()
    }

    /// Polls until at least `count` reconfigure calls were recorded.
    pub(crate) async fn wait_for_reconfigures(&self, count: usize) -> Vec<Vec<UserId>> {
        for _ in 0..100 {
            let seen = self.reconfigures();
            if seen.len() >= count {
                return seen;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        panic!(
            "expected {count} reconfigure calls, saw {:?}",
            self.reconfigures()
        );
    }
}

#[async_trait]
impl EventSource for RecordingSource {
    async fn reconfigure(&self, follow_ids: &[UserId]) -> Result<(), SourceError> {
        self.reconfigures
            .lock()
            .expect("reconfigure log should lock")
            .push(follow_ids.to_vec());
        Ok(())
    }
}
