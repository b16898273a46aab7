//! One-shot HTTP responder for client tests.

use super::TrmmClient;
use crate::config::TrmmConfig;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub(crate) fn client_for(url: &str, token: Option<&str>, api_key: Option<&str>) -> TrmmClient {
    let config = TrmmConfig {
        api_url: url.to_string(),
        api_token: token.map(str::to_string),
        api_key: api_key.map(str::to_string),
        credentials: None,
        timeout: Duration::from_secs(5),
    };
    TrmmClient::new(config).unwrap()
}

/// Accepts a single connection, answers with `status` and `body`, and
/// resolves to the raw request text (head and body).
pub(crate) async fn serve_once(status: u16, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let body = body.to_string();

    let handle = tokio::spawn(async move { answer(&listener, status, &body).await });
    (format!("http://{}", addr), handle)
}

/// Like `serve_once`, for `count` sequential requests that all get the same answer.
pub(crate) async fn serve_many(status: u16, body: &str, count: usize) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let body = body.to_string();

    let handle = tokio::spawn(async move {
        let mut requests = Vec::with_capacity(count);
        for _ in 0..count {
            requests.push(answer(&listener, status, &body).await);
        }
        requests
    });
    (format!("http://{}", addr), handle)
}

/// Request line of each captured request, e.g. "DELETE /scripts/3/".
pub(crate) fn request_lines(requests: &[String]) -> Vec<String> {
    requests
        .iter()
        .filter_map(|r| r.lines().next())
        .map(|line| line.trim_end_matches(" HTTP/1.1").to_string())
        .collect()
}

async fn answer(listener: &TcpListener, status: u16, body: &str) -> String {
    let (mut socket, _) = listener.accept().await.unwrap();
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let head_end = loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break buf.len();
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find(&buf, b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
    let content_length = head
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.eq_ignore_ascii_case("content-length") {
                value.trim().parse::<usize>().ok()
            } else {
                None
            }
        })
        .unwrap_or(0);

    while buf.len() < head_end + content_length {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let reason = match status {
        200 => "OK",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        _ => "Error",
    };
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason,
        body.len(),
        body
    );
    socket.write_all(response.as_bytes()).await.unwrap();
    socket.shutdown().await.ok();

    String::from_utf8_lossy(&buf).to_string()
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
