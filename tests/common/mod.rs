#![allow(dead_code)]

pub mod upstream_stub;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use chat_relay::{build_router, AppState, RelayConfig};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub const TEST_API_KEY: &str = "sk-test-relay-secret-4242";

/// The relay router bound to an ephemeral local port.
///
/// Configuration is injected directly, so tests never touch process env.
pub struct TestServer {
    pub base_url: String,
    pub addr: SocketAddr,
    join: JoinHandle<()>,
    client: reqwest::Client,
}

impl TestServer {
    fn make_client() -> reqwest::Client {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .no_proxy()
            .build()
            .expect("failed building reqwest client")
    }

    pub async fn get(&self, path: &str) -> reqwest::Result<reqwest::Response> {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
    }

    pub async fn post_json<T: serde::Serialize>(
        &self,
        path: &str,
        body: &T,
    ) -> reqwest::Result<reqwest::Response> {
        self.client
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await
    }

    pub async fn post_bytes(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> reqwest::Result<reqwest::Response> {
        self.client
            .post(format!("{}{}", self.base_url, path))
            .header(http::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await
    }

    /// Send a raw request, e.g. a CORS preflight.
    pub async fn request(
        &self,
        method: reqwest::Method,
        path: &str,
        headers: &[(&str, &str)],
    ) -> reqwest::Result<reqwest::Response> {
        let mut rb = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        for (k, v) in headers {
            rb = rb.header(*k, *v);
        }
        rb.send().await
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.join.abort();
    }
}

/// Spawn the relay with `config`. Outbound proxies are disabled so local stubs are reached directly.
pub async fn spawn_relay(mut config: RelayConfig) -> TestServer {
    config.proxy.disabled = true;
    let state = AppState::new(config).expect("build app state");
    let app = build_router(Arc::new(state));

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    let base_url = format!("http://{}", addr);
    let server = axum::serve(listener, app.into_make_service());

    let join = tokio::spawn(async move {
        if let Err(e) = server.await {
            eprintln!("Test server error: {e:?}");
        }
    });

    TestServer {
        base_url,
        addr,
        join,
        client: TestServer::make_client(),
    }
}

/// Relay pointed at `upstream_url` with the test key configured.
pub async fn spawn_with_key(upstream_url: &str) -> TestServer {
    spawn_relay(RelayConfig::with_upstream(upstream_url, Some(TEST_API_KEY))).await
}

/// Relay pointed at `upstream_url` with no key configured.
pub async fn spawn_without_key(upstream_url: &str) -> TestServer {
    spawn_relay(RelayConfig::with_upstream(upstream_url, None)).await
}
