//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tower::ServiceExt;

use trip_planner::ai::{
    CompletionError, CompletionRequest, CompletionResponse, CompletionService, ContentBlock,
};
use trip_planner::config::{AppConfig, StorageBackend};
use trip_planner::notify::{EmailMessage, Notifier, NotifyError};
use trip_planner::store::MemoryStore;
use trip_planner::{build_router, AppState};

/// Config for in-process tests: memory store, defaults elsewhere.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.storage.backend = StorageBackend::Memory;
    config
}

/// Scripted completion service that records every request.
#[derive(Default)]
pub struct ScriptedCompletion {
    replies: Mutex<VecDeque<Result<CompletionResponse, CompletionError>>>,
    pub requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedCompletion {
    pub fn replying(text: &str) -> Arc<Self> {
        let me = Self::default();
        me.push_text(text);
        Arc::new(me)
    }

    pub fn failing(status: u16, body: &str) -> Arc<Self> {
        let me = Self::default();
        me.replies.lock().unwrap().push_back(Err(CompletionError::Upstream {
            status,
            body: body.to_string(),
        }));
        Arc::new(me)
    }

    pub fn push_text(&self, text: &str) {
        self.replies.lock().unwrap().push_back(Ok(CompletionResponse {
            content: vec![ContentBlock {
                kind: Some("text".into()),
                text: text.to_string(),
            }],
        }));
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionService for ScriptedCompletion {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError> {
        self.requests.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(CompletionError::Transport("no scripted reply".into())))
    }
}

/// Notifier forwarding every message to a channel.
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<EmailMessage>,
}

impl ChannelNotifier {
    pub fn new() -> (Arc<Self>, mpsc::UnboundedReceiver<EmailMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Arc::new(Self { tx }), rx)
    }
}

#[async_trait]
impl Notifier for ChannelNotifier {
    async fn send(&self, message: EmailMessage) -> Result<(), NotifyError> {
        let _ = self.tx.send(message);
        Ok(())
    }
}

/// Notifier that never finishes, to prove responses do not wait on it.
pub struct StalledNotifier {
    pub started: AtomicUsize,
}

#[async_trait]
impl Notifier for StalledNotifier {
    async fn send(&self, _message: EmailMessage) -> Result<(), NotifyError> {
        self.started.fetch_add(1, Ordering::SeqCst);
        std::future::pending::<()>().await;
        Ok(())
    }
}

/// Build an in-process app over `store`.
pub fn app(
    config: &AppConfig,
    store: MemoryStore,
    completion: Arc<dyn CompletionService>,
    notifier: Option<Arc<dyn Notifier>>,
) -> axum::Router {
    let state = AppState::new(config, Arc::new(store), completion, notifier);
    build_router(config, state)
}

/// A response captured from the in-process app.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

/// Send one request through the router.
pub async fn send(app: &axum::Router, method: &str, uri: &str, body: Option<&str>) -> TestResponse {
    send_bytes(app, method, uri, body.map(|b| b.as_bytes().to_vec())).await
}

/// Like `send`, with an arbitrary byte body.
pub async fn send_bytes(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<Vec<u8>>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header("content-type", "application/json");
    }
    let request = builder
        .body(body.map(Body::from).unwrap_or_else(Body::empty))
        .unwrap();

    let res = app.clone().oneshot(request).await.unwrap();
    let status = res.status();
    let headers = res.headers().clone();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    TestResponse {
        status,
        headers,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

/// Assert the permissive cross-origin header set is present.
pub fn assert_cors(headers: &HeaderMap) {
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(
        headers["access-control-allow-methods"],
        "GET, PUT, POST, DELETE, OPTIONS"
    );
    assert_eq!(headers["access-control-allow-headers"], "Content-Type");
    assert_eq!(headers["content-type"], "application/json");
}

/// Read one HTTP/1.1 request and return its body.
async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => n,
        };
        buf.extend_from_slice(&chunk[..n]);

        if let Some(header_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
            let content_length = head
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            let body_start = header_end + 4;
            if buf.len() >= body_start + content_length {
                return String::from_utf8_lossy(&buf[body_start..body_start + content_length])
                    .into_owned();
            }
        }
    }
    String::new()
}

/// Start a programmable mock upstream on an ephemeral port.
///
/// `f` receives the request body and returns the status and body to answer.
pub async fn start_programmable_backend<F, Fut>(f: F) -> SocketAddr
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let request_body = read_request(&mut socket).await;
                        let (status, body) = f(request_body).await;
                        let status_text = match status {
                            200 => "200 OK",
                            400 => "400 Bad Request",
                            401 => "401 Unauthorized",
                            500 => "500 Internal Server Error",
                            529 => "529 Overloaded",
                            _ => "200 OK",
                        };

                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}
