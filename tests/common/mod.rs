//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::path::PathBuf;

use credential_intake::config::IntakeConfig;
use credential_intake::http::HttpServer;
use credential_intake::lifecycle::Shutdown;
use credential_intake::storage::{RecordStore, SubmissionRecord};
use tempfile::TempDir;

/// A running intake server bound to an ephemeral loopback port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub data_file: PathBuf,
    shutdown: Shutdown,
    _dir: TempDir,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn stored_records(&self) -> Vec<SubmissionRecord> {
        RecordStore::new(&self.data_file).load().await.unwrap()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start a server with the given config, pointing the store at a
/// fresh temp directory. Low bcrypt cost keeps the tests fast.
pub async fn start_server(mut config: IntakeConfig) -> TestServer {
    let dir = tempfile::tempdir().unwrap();
    let data_file = dir.path().join("data.json");
    config.storage.data_file = data_file.to_string_lossy().into_owned();
    config.hashing.cost = 4;

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    config.listener.bind_address = addr.to_string();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config);

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestServer {
        addr,
        data_file,
        shutdown,
        _dir: dir,
    }
}

/// A client with a cookie jar, as the browser collaborator would be.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .no_proxy()
        .build()
        .unwrap()
}

/// Fetch a CSRF token; the session cookie lands in the client's jar.
pub async fn fetch_token(client: &reqwest::Client, server: &TestServer) -> String {
    let response = client
        .get(server.url("/csrf-token"))
        .send()
        .await
        .expect("Server unreachable");
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    body["csrfToken"].as_str().unwrap().to_string()
}

/// A canonical valid submission body.
pub fn valid_body() -> serde_json::Value {
    serde_json::json!({
        "emailOrPhone": "a@b.com",
        "password": "hunter2",
        "timestamp": "2024-01-01T00:00:00Z"
    })
}
