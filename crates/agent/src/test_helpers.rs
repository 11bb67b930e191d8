//! Shared test helpers for agent and flow tests.

use litlens_core::error::ProviderError;
use litlens_core::message::{Message, MessageToolCall};
use litlens_core::provider::{Provider, ProviderFactory, ProviderRequest, ProviderResponse, Usage};
use std::sync::{Arc, Mutex};

type Responder = dyn Fn(&ProviderRequest) -> Result<ProviderResponse, ProviderError> + Send + Sync;

/// A provider that answers through a closure and records every request.
pub struct RecordingProvider {
    responder: Box<Responder>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl RecordingProvider {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&ProviderRequest) -> Result<ProviderResponse, ProviderError> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Always answers with the same text.
    pub fn text(text: &str) -> Self {
        let text = text.to_string();
        Self::new(move |_| Ok(make_text_response(&text)))
    }

    /// Answers according to the system instructions of each request.
    ///
    /// The first `(needle, reply)` pair whose needle appears in the system
    /// message wins.
    pub fn by_instructions(routes: Vec<(&'static str, &'static str)>) -> Self {
        Self::new(move |req| {
            let system = req
                .messages
                .first()
                .map(|m| m.content.clone())
                .unwrap_or_default();
            let reply = routes
                .iter()
                .find(|(needle, _)| system.contains(needle))
                .map(|(_, reply)| *reply)
                .unwrap_or("unrouted");
            Ok(make_text_response(reply))
        })
    }

    /// Always fails with the given error.
    pub fn failing(error: ProviderError) -> Self {
        Self::new(move |_| Err(error.clone()))
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Provider for RecordingProvider {
    fn name(&self) -> &str {
        "recording_mock"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        let response = (self.responder)(&request);
        self.requests.lock().unwrap().push(request);
        response
    }
}

/// A factory that hands out one shared provider and counts builds.
pub struct SharedFactory {
    provider: Arc<RecordingProvider>,
    keys: Mutex<Vec<String>>,
}

impl SharedFactory {
    pub fn new(provider: Arc<RecordingProvider>) -> Self {
        Self {
            provider,
            keys: Mutex::new(Vec::new()),
        }
    }

    pub fn keys(&self) -> Vec<String> {
        self.keys.lock().unwrap().clone()
    }
}

impl ProviderFactory for SharedFactory {
    fn build(&self, api_key: &str) -> Arc<dyn Provider> {
        self.keys.lock().unwrap().push(api_key.to_string());
        self.provider.clone()
    }
}

/// Create a simple text response (no tool calls).
pub fn make_text_response(text: &str) -> ProviderResponse {
    ProviderResponse {
        message: Message::assistant(text),
        usage: Some(Usage {
            prompt_tokens: 10,
            completion_tokens: 5,
            total_tokens: 15,
        }),
        model: "mock-model".into(),
    }
}

/// Create a response that requests tool calls.
pub fn make_tool_call_response(tool_calls: Vec<MessageToolCall>) -> ProviderResponse {
    let mut msg = Message::assistant("");
    msg.tool_calls = tool_calls;
    ProviderResponse {
        message: msg,
        usage: None,
        model: "mock-model".into(),
    }
}

/// Helper to create a tool call.
pub fn make_tool_call(name: &str, args: serde_json::Value) -> MessageToolCall {
    MessageToolCall {
        id: format!("call_{name}"),
        name: name.to_string(),
        arguments: serde_json::to_string(&args).unwrap(),
    }
}
