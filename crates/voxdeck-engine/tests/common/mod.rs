//! Common test utilities for voxdeck-engine workflow tests.

use std::io::Write;
use std::net::TcpListener;
use std::num::NonZeroUsize;
use std::sync::Mutex;

use serde::Serialize;
use tempfile::NamedTempFile;
use voxdeck_engine::{Engine, RunConfig, SpeechSynthesizer, SynthesisError};
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate, Times};

/// Start a new mock server for testing.
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Build a run configuration pointed at the mock server.
pub fn config_for_mock(server: &MockServer, input: &NamedTempFile, limit: usize) -> RunConfig {
    RunConfig {
        input_file: input.path().to_path_buf(),
        card_limit: NonZeroUsize::new(limit).unwrap(),
        anki_url: server.uri(),
        ..RunConfig::default()
    }
}

/// URL of a local port with nothing listening on it.
#[allow(dead_code)]
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Create an Engine connected to the mock server.
pub fn engine_for_mock(config: &RunConfig) -> Engine {
    Engine::for_config(config).unwrap()
}

/// Write a phrase file.
pub fn phrase_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

/// Create a successful AnkiConnect response.
pub fn mock_anki_response<T: Serialize>(result: T) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "result": result,
        "error": null
    }))
}

/// Create an error AnkiConnect response.
#[allow(dead_code)]
pub fn mock_anki_error(error: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "result": null,
        "error": error
    }))
}

/// Mount a mock for a specific action (expect exactly 1 call).
pub async fn mock_action(server: &MockServer, action: &str, response: ResponseTemplate) {
    mock_action_times(server, action, response, 1).await;
}

/// Mount a mock for a specific action with expected call count.
pub async fn mock_action_times(
    server: &MockServer,
    action: &str,
    response: ResponseTemplate,
    times: u64,
) {
    Mock::given(method("POST"))
        .and(body_partial_json(serde_json::json!({
            "action": action,
            "version": 6
        })))
        .respond_with(response)
        .expect(Times::from(times))
        .mount(server)
        .await;
}

/// The duplicate query the batch sends for one front text.
#[allow(dead_code)]
pub fn duplicate_query(deck: &str, field: &str, front: &str) -> String {
    format!(
        "\"deck:{deck}\" (\"{field}:{front}\" OR \"{field}:{front} [sound:*\")"
    )
}

/// Mount a `findNotes` mock for the duplicate query of one front text.
#[allow(dead_code)]
pub async fn mock_find_front(
    server: &MockServer,
    front: &str,
    response: ResponseTemplate,
    times: u64,
) {
    Mock::given(method("POST"))
        .and(body_partial_json(serde_json::json!({
            "action": "findNotes",
            "params": {"query": duplicate_query("Spanish", "Front", front)}
        })))
        .respond_with(response)
        .expect(Times::from(times))
        .mount(server)
        .await;
}

/// Mount a `storeMediaFile` mock that answers with the requested filename.
#[allow(dead_code)]
pub async fn mock_store_media(server: &MockServer, times: u64) {
    Mock::given(method("POST"))
        .and(body_partial_json(serde_json::json!({
            "action": "storeMediaFile",
            "version": 6
        })))
        .respond_with(EchoFilename)
        .expect(Times::from(times))
        .mount(server)
        .await;
}

/// Responds to `storeMediaFile` like AnkiConnect: with the stored name.
pub struct EchoFilename;

impl Respond for EchoFilename {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
        mock_anki_response(body["params"]["filename"].clone())
    }
}

/// Bodies of all requests for `action` received by the server.
#[allow(dead_code)]
pub async fn requests_for(server: &MockServer, action: &str) -> Vec<serde_json::Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter_map(|r| serde_json::from_slice::<serde_json::Value>(&r.body).ok())
        .filter(|body| body["action"] == action)
        .collect()
}

/// Speech backend that records calls and returns canned audio.
#[derive(Debug, Default)]
pub struct FakeSpeech {
    calls: Mutex<Vec<String>>,
    failing: Vec<String>,
}

impl FakeSpeech {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail synthesis for the given texts.
    #[allow(dead_code)]
    pub fn failing_for(texts: &[&str]) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failing: texts.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Texts synthesized so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl SpeechSynthesizer for FakeSpeech {
    async fn synthesize(&self, text: &str, _lang: &str) -> Result<Vec<u8>, SynthesisError> {
        self.calls.lock().unwrap().push(text.to_string());
        if self.failing.iter().any(|t| t == text) {
            return Err(SynthesisError::Backend("voice unavailable".to_string()));
        }
        Ok(b"ID3 fake mp3".to_vec())
    }
}
