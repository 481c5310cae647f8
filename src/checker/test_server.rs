// src/checker/test_server.rs
// =============================================================================
// A tiny HTTP/1.1 server for tests, so remote checks never need the internet.
//
// Routes:
//   /status/<code>       respond immediately with <code>
//   /slow/<ms>/<code>    wait <ms> milliseconds, then respond with <code>
//   /hang                never respond
//   /redirect            302 to /status/200
//   /loop                302 to itself
//   /chain/<n>           302 to /chain/<n-1>; /chain/0 answers 200
//   anything else        404
//
// Every request head is recorded, and the server tracks how many requests
// were being handled at the same time.
// =============================================================================

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

#[derive(Default)]
struct Stats {
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    requests: Mutex<Vec<String>>,
}

pub struct TestServer {
    addr: SocketAddr,
    stats: Arc<Stats>,
}

impl TestServer {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let stats = Arc::new(Stats::default());

        let shared = Arc::clone(&stats);
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                tokio::spawn(handle(stream, Arc::clone(&shared)));
            }
        });

        Self { addr, stats }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Raw request heads, in arrival order
    pub fn requests(&self) -> Vec<String> {
        self.stats.requests.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.stats.max_in_flight.load(Ordering::SeqCst)
    }
}

/// A URL on a port nothing is listening on.
pub fn refused_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/", port)
}

async fn handle(mut stream: TcpStream, stats: Arc<Stats>) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }

    let head = String::from_utf8_lossy(&buf).into_owned();
    let path = head.split_whitespace().nth(1).unwrap_or("/").to_string();
    stats.requests.lock().unwrap().push(head);

    let now = stats.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
    stats.max_in_flight.fetch_max(now, Ordering::SeqCst);
    let reply = route(&path).await;
    // Leave before replying so the client never sees a stale count
    stats.in_flight.fetch_sub(1, Ordering::SeqCst);

    let _ = stream.write_all(reply.as_bytes()).await;
    let _ = stream.shutdown().await;
}

async fn route(path: &str) -> String {
    let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();
    match segments.as_slice() {
        ["status", code] => reply(code.parse().unwrap_or(500), None),
        ["slow", ms, code] => {
            tokio::time::sleep(Duration::from_millis(ms.parse().unwrap_or(0))).await;
            reply(code.parse().unwrap_or(500), None)
        }
        ["hang"] => {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            reply(500, None)
        }
        ["redirect"] => reply(302, Some("/status/200")),
        ["loop"] => reply(302, Some("/loop")),
        ["chain", n] => match n.parse::<u32>().unwrap_or(0) {
            0 => reply(200, None),
            n => reply(302, Some(&format!("/chain/{}", n - 1))),
        },
        _ => reply(404, None),
    }
}

fn reply(code: u16, location: Option<&str>) -> String {
    let mut response = format!(
        "HTTP/1.1 {} Test\r\nContent-Length: 0\r\nConnection: close\r\n",
        code
    );
    if let Some(location) = location {
        response.push_str(&format!("Location: {}\r\n", location));
    }
    response.push_str("\r\n");
    response
}
