//! Shared helpers for the relay integration tests.

#![allow(dead_code, unused_macros)]

use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use roblox_relay::config::Config;

/// A local stand-in for the listing API that records every request target.
pub struct MockUpstream {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockUpstream {
    pub fn base_url(&self) -> String {
        format!("http://{}/v1/games", self.addr)
    }

    /// Request targets (path and query) in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn hits(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

/// Start a programmable upstream. `f` receives the zero-based attempt index and
/// returns the status and JSON body to send.
pub async fn start_programmable_upstream<F, Fut>(f: F) -> MockUpstream
where
    F: Fn(usize) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let f = Arc::new(f);

    let recorded = requests.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    let recorded = recorded.clone();
                    tokio::spawn(async move {
                        let target = match read_request_target(&mut socket).await {
                            Some(target) => target,
                            None => return,
                        };
                        let index = {
                            let mut log = recorded.lock().unwrap();
                            log.push(target);
                            log.len() - 1
                        };

                        let (status, body) = f(index).await;
                        let response = format!(
                            "HTTP/1.1 {} Mock\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    MockUpstream { addr, requests }
}

/// Upstream that always answers with the same status and body.
pub async fn start_fixed_upstream(status: u16, body: &'static str) -> MockUpstream {
    start_programmable_upstream(move |_| async move { (status, body.to_string()) }).await
}

async fn read_request_target(socket: &mut tokio::net::TcpStream) -> Option<String> {
    let mut head = Vec::new();
    let mut buf = [0u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = socket.read(&mut buf).await.ok()?;
        if n == 0 {
            break;
        }
        head.extend_from_slice(&buf[..n]);
    }
    let head = String::from_utf8_lossy(&head);
    head.lines().next()?.split_whitespace().nth(1).map(str::to_string)
}

/// Config pointed at `upstream` with short timings.
pub fn config_for(upstream: &MockUpstream) -> Config {
    Config {
        place_id: 1818,
        upstream_base_url: upstream.base_url(),
        upstream_timeout_ms: 2_000,
        upstream_backoff_ms: 10,
        ..Config::default()
    }
}

/// Builds the relay app as a test service.
macro_rules! relay_app {
    ($config:expr) => {{
        let config = $config;
        let client = roblox_relay::upstream::UpstreamClient::new(&config).unwrap();
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new(config))
                .app_data(actix_web::web::Data::new(client))
                .wrap(roblox_relay::handlers::cors())
                .configure(roblox_relay::handlers::configure),
        )
        .await
    }};
}

/// Issues a GET and returns the status with the decoded JSON body.
macro_rules! get_json {
    ($app:expr, $uri:expr) => {{
        let resp = actix_web::test::call_service(
            $app,
            actix_web::test::TestRequest::get().uri($uri).to_request(),
        )
        .await;
        let status = resp.status();
        let body: serde_json::Value = actix_web::test::read_body_json(resp).await;
        (status, body)
    }};
}
