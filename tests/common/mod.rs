//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{HeaderMap, Method, Request, StatusCode, Uri},
    response::IntoResponse,
    routing::any,
    Router,
};
use blocklist_gate::config::BlocklistConfig;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// A blocklist file living in its own temporary directory.
pub struct BlocklistFile {
    dir: TempDir,
    path: PathBuf,
}

impl BlocklistFile {
    pub fn new(contents: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blocklist.txt");
        std::fs::write(&path, contents).unwrap();
        Self { dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write(&self, contents: &str) {
        // Write then rename so a tick never sees a half-written file.
        let tmp = self.dir.path().join("blocklist.txt.tmp");
        std::fs::write(&tmp, contents).unwrap();
        std::fs::rename(&tmp, &self.path).unwrap();
    }

    pub fn remove(&self) {
        std::fs::remove_file(&self.path).unwrap();
    }

    pub fn config(&self, refresh: Duration) -> BlocklistConfig {
        let mut config = BlocklistConfig::new(&self.path);
        config.refresh_interval_ms = refresh.as_millis() as u64;
        config
    }
}

/// A downstream router that counts its calls and echoes what it received.
pub fn echo_downstream(calls: Arc<AtomicUsize>) -> Router {
    async fn echo(
        State(calls): State<Arc<AtomicUsize>>,
        method: Method,
        uri: Uri,
        headers: HeaderMap,
        body: String,
    ) -> impl IntoResponse {
        calls.fetch_add(1, Ordering::SeqCst);
        let marker = headers
            .get("x-test-marker")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        (
            StatusCode::CREATED,
            [("x-downstream", "echo")],
            format!("{method} {uri} {marker} {body}"),
        )
    }

    Router::new()
        .route("/", any(echo))
        .route("/{*path}", any(echo))
        .with_state(calls)
}

/// Build a request as if it arrived from `peer`.
pub fn request_from(peer: &str, method: Method, uri: &str, body: &str) -> Request<Body> {
    let peer: SocketAddr = peer.parse().unwrap();
    let mut request = Request::builder()
        .method(method)
        .uri(uri)
        .header("x-test-marker", "kept")
        .body(Body::from(body.to_string()))
        .unwrap();
    request.extensions_mut().insert(ConnectInfo(peer));
    request
}

pub async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Start a simple upstream on an ephemeral port that returns a fixed body.
pub async fn start_mock_backend(response: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new().fallback(move || async move { response });

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

/// Poll `check` until it holds or `timeout` elapses.
pub async fn eventually<F: Fn() -> bool>(timeout: Duration, check: F) -> bool {
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    check()
}
