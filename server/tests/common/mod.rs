//! Shared helpers for API tests: an in-memory server and a cookie-keeping
//! client.

#![allow(dead_code)]

use async_trait::async_trait;
use edupass_license::LicenseDb;
use edupass_server::{build_router, AppState};
use edupass_session::LicenseGate;
use edupass_store::{MemoryStore, RecordStore};
use edupass_tutor::{ExplanationGenerator, TextRecognizer, TutorError, TutorPipeline, TutorResult};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const APP: &str = "tutor";

pub fn sample_db() -> LicenseDb {
    LicenseDb::from_json(
        r#"{
            "EDU-MONTH-0001": {"status":"UNUSED","app_scope":"ALL","type_name":"月卡","note":"batch 7"},
            "EDU-YEAR-00002": {"status":"ACTIVE","app_scope":"tutor","type_name":"年卡","bound_device":"d-1","activated_at":"2025-03-01 09:30:00"},
            "EDU-DIET-00003": {"status":"UNUSED","app_scope":"diet","type_name":"问诊卡"}
        }"#,
    )
    .unwrap()
}

/// Recognizer returning a fixed text, or no text.
#[derive(Default)]
pub struct FakeRecognizer {
    pub blank: bool,
    pub calls: AtomicUsize,
}

#[async_trait]
impl TextRecognizer for FakeRecognizer {
    async fn recognize(&self, image: &[u8], subject: &str) -> TutorResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.blank {
            return Err(TutorError::NoTextDetected);
        }
        Ok(format!("{subject}: {} bytes", image.len()))
    }
}

#[derive(Default)]
pub struct FakeGenerator {
    pub calls: AtomicUsize,
}

#[async_trait]
impl ExplanationGenerator for FakeGenerator {
    async fn explain(&self, text: &str, _subject: &str, task: &str) -> TutorResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("## {task}\n{text}"))
    }
}

pub struct TestServer {
    pub base: String,
    pub store: Arc<MemoryStore>,
    pub recognizer: Arc<FakeRecognizer>,
    pub generator: Arc<FakeGenerator>,
    pub state: AppState,
}

/// Spin up the HTTP server on an OS-assigned port.
pub async fn spawn_test_server() -> TestServer {
    spawn_with(Arc::new(MemoryStore::new(sample_db())), FakeRecognizer::default()).await
}

pub async fn spawn_with(store: Arc<MemoryStore>, recognizer: FakeRecognizer) -> TestServer {
    let recognizer = Arc::new(recognizer);
    let generator = Arc::new(FakeGenerator::default());
    let gate = LicenseGate::new(store.clone() as Arc<dyn RecordStore>, APP);
    let pipeline = TutorPipeline::new(recognizer.clone(), generator.clone());
    let state = AppState::new(gate, pipeline);
    let app = build_router(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestServer {
        base: format!("http://127.0.0.1:{}", port),
        store,
        recognizer,
        generator,
        state,
    }
}

/// A client that keeps cookies the way a browser would.
pub struct Browser {
    client: reqwest::Client,
    base: String,
    pub cookies: HashMap<String, String>,
}

impl Browser {
    pub fn new(server: &TestServer) -> Self {
        Self {
            client: reqwest::Client::new(),
            base: server.base.clone(),
            cookies: HashMap::new(),
        }
    }

    fn cookie_header(&self) -> String {
        self.cookies
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn absorb(&mut self, resp: &reqwest::Response) {
        for value in resp.headers().get_all("set-cookie") {
            let value = value.to_str().unwrap();
            let (pair, attrs) = value.split_once(';').unwrap_or((value, ""));
            let (name, val) = pair.split_once('=').unwrap();
            if val.is_empty() || attrs.contains("Max-Age=0") {
                self.cookies.remove(name);
            } else {
                self.cookies.insert(name.to_string(), val.to_string());
            }
        }
    }

    pub async fn get(&mut self, path: &str) -> reqwest::Response {
        let resp = self
            .client
            .get(format!("{}{}", self.base, path))
            .header("cookie", self.cookie_header())
            .send()
            .await
            .unwrap();
        self.absorb(&resp);
        resp
    }

    pub async fn post(&mut self, path: &str, body: serde_json::Value) -> reqwest::Response {
        let resp = self
            .client
            .post(format!("{}{}", self.base, path))
            .header("cookie", self.cookie_header())
            .json(&body)
            .send()
            .await
            .unwrap();
        self.absorb(&resp);
        resp
    }

    /// Drops the session cookie, as closing the browser would.
    pub fn restart(&mut self) {
        self.cookies.remove("edupass_sid");
    }
}
