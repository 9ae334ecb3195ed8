//! Common test utilities and helpers

#![allow(dead_code)]

use activetrail::transport::{
    BlockingTransport, HttpRequest, HttpResponse, Transport, TransportError,
};
use activetrail::{Client, ClientConfig};
use async_trait::async_trait;
use http::HeaderMap;
use std::collections::VecDeque;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::io::AsyncReadExt;
use tokio::net::TcpListener;
use wiremock::MockServer;

/// Load a response fixture
pub fn load_response_fixture(name: &str) -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let path = Path::new(manifest_dir)
        .join("tests")
        .join("fixtures")
        .join("responses")
        .join(format!("{}.json", name));

    std::fs::read_to_string(&path).unwrap_or_else(|e| {
        panic!(
            "Failed to load response fixture '{}' from {:?}: {}",
            name, path, e
        )
    })
}

/// Create a test API key
pub fn test_api_key() -> String {
    "at-test-key-0123456789abcdef".to_string()
}

/// Configuration pointing at `base_url`
pub fn test_config(base_url: &str) -> ClientConfig {
    ClientConfig::builder()
        .api_key(test_api_key())
        .base_url(base_url)
        .build()
}

/// An opened client talking to the mock server
pub async fn open_client(server: &MockServer) -> Client {
    let client = Client::from_config(test_config(&server.uri())).expect("Failed to build client");
    client.setup().await.expect("Failed to open client");
    client
}

/// A server that reads each request and hangs up without answering.
///
/// Returns its base URL and the number of connections it accepted.
pub async fn hang_up_server() -> (String, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let accepted = Arc::new(AtomicUsize::new(0));

    let counter = accepted.clone();
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            counter.fetch_add(1, Ordering::SeqCst);
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
        }
    });

    (format!("http://{addr}"), accepted)
}

/// What a scripted transport answers with
#[derive(Debug)]
pub enum Reply {
    Status(u16, &'static str),
    Fail(TransportError),
}

impl Reply {
    pub fn json(status: u16, body: &'static str) -> Self {
        Reply::Status(status, body)
    }

    fn resolve(self) -> activetrail::transport::Result<HttpResponse> {
        match self {
            Reply::Status(status, body) => {
                Ok(HttpResponse::new(status, HeaderMap::new(), body.as_bytes().to_vec()))
            }
            Reply::Fail(error) => Err(error),
        }
    }
}

/// Replays scripted replies in order and records every request it sees.
///
/// Once the script runs out it answers `200 {}`. Usable as both an async
/// and a blocking transport so the two executors can be compared on
/// identical input.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Reply>>,
    seen: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new(script: impl IntoIterator<Item = Reply>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into_iter().collect()),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.seen.lock().unwrap().clone()
    }

    fn next(&self, request: HttpRequest) -> activetrail::transport::Result<HttpResponse> {
        self.seen.lock().unwrap().push(request);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Reply::Status(200, "{}"))
            .resolve()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send_http(&self, request: HttpRequest) -> activetrail::transport::Result<HttpResponse> {
        self.next(request)
    }

    async fn setup(&self) -> activetrail::transport::Result<()> {
        Ok(())
    }

    fn close(&self) -> activetrail::transport::Result<()> {
        Ok(())
    }

    fn is_open(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

impl BlockingTransport for ScriptedTransport {
    fn send_http(&self, request: HttpRequest) -> activetrail::transport::Result<HttpResponse> {
        self.next(request)
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

/// An opened async client over a scripted transport
pub async fn scripted_client(transport: Arc<ScriptedTransport>, max_retries: u32) -> Client {
    let config = ClientConfig::builder()
        .api_key(test_api_key())
        .max_retries(max_retries)
        .build();
    let client = Client::from_transport(config, transport).expect("Failed to build client");
    client.setup().await.expect("Failed to open client");
    client
}
