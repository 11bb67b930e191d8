//! The agent client: one hosted-model call plus the tools it may invoke.

use std::sync::Arc;

use litlens_config::AgentProfileConfig;
use litlens_core::error::ToolError;
use litlens_core::message::Message;
use litlens_core::provider::{Provider, ProviderRequest};
use litlens_core::tool::{ToolCall, ToolRegistry};
use tracing::{debug, info, warn};

/// Default bound on model calls within one run.
pub const DEFAULT_MAX_TOOL_ROUNDS: u32 = 4;

/// Model parameters for one kind of call.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentProfile {
    pub name: &'static str,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl AgentProfile {
    pub fn from_config(name: &'static str, config: &AgentProfileConfig) -> Self {
        Self {
            name,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }

    /// Answer profile: temperature 0.6, 1400 tokens.
    pub fn answer() -> Self {
        Self::new("answer", 0.6, 1400)
    }

    /// Citation-list profile: temperature 0.3, 800 tokens.
    pub fn citation() -> Self {
        Self::new("citation", 0.3, 800)
    }

    /// Comparison profile: temperature 0.5, 1600 tokens.
    pub fn comparison() -> Self {
        Self::new("comparison", 0.5, 1600)
    }

    fn new(name: &'static str, temperature: f32, max_tokens: u32) -> Self {
        Self {
            name,
            model: "gpt-4o".into(),
            temperature,
            max_tokens,
        }
    }
}

/// The three profiles used by the chat and comparison flows.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentProfiles {
    pub answer: AgentProfile,
    pub citation: AgentProfile,
    pub comparison: AgentProfile,
}

impl Default for AgentProfiles {
    fn default() -> Self {
        Self {
            answer: AgentProfile::answer(),
            citation: AgentProfile::citation(),
            comparison: AgentProfile::comparison(),
        }
    }
}

impl AgentProfiles {
    pub fn from_config(config: &litlens_config::AgentsConfig) -> Self {
        Self {
            answer: AgentProfile::from_config("answer", &config.answer),
            citation: AgentProfile::from_config("citation", &config.citation),
            comparison: AgentProfile::from_config("comparison", &config.comparison),
        }
    }
}

/// A stateless, single-use research agent.
///
/// Each run sends `[system instructions, user query]`. If the model asks
/// for tools, they are executed and their results appended until the model
/// answers in text. A model that still wants tools on the last round fails
/// the run with [`ToolError::RoundLimitReached`].
pub struct ResearchAgent {
    provider: Arc<dyn Provider>,
    tools: Arc<ToolRegistry>,
    profile: AgentProfile,
    instructions: String,
    max_tool_rounds: u32,
}

impl ResearchAgent {
    pub fn new(
        provider: Arc<dyn Provider>,
        tools: Arc<ToolRegistry>,
        profile: AgentProfile,
        instructions: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            tools,
            profile,
            instructions: instructions.into(),
            max_tool_rounds: DEFAULT_MAX_TOOL_ROUNDS,
        }
    }

    /// Set the maximum number of model calls per run.
    pub fn with_max_tool_rounds(mut self, max: u32) -> Self {
        self.max_tool_rounds = max;
        self
    }

    pub fn profile(&self) -> &AgentProfile {
        &self.profile
    }

    /// Run the query to completion and return the model's text.
    pub async fn run(&self, query: &str) -> litlens_core::Result<String> {
        info!(
            profile = self.profile.name,
            model = %self.profile.model,
            provider = self.provider.name(),
            "Running agent"
        );

        let mut messages = vec![Message::system(&self.instructions), Message::user(query)];
        let tool_definitions = self.tools.definitions();

        for round in 1..=self.max_tool_rounds {
            debug!(profile = self.profile.name, round, "Agent round");

            let request = ProviderRequest {
                model: self.profile.model.clone(),
                messages: messages.clone(),
                temperature: self.profile.temperature,
                max_tokens: Some(self.profile.max_tokens),
                tools: tool_definitions.clone(),
            };

            let response = self.provider.complete(request).await?;

            if let Some(usage) = &response.usage {
                debug!(
                    profile = self.profile.name,
                    model = %response.model,
                    tokens = usage.total_tokens,
                    "Model responded"
                );
            }

            if response.message.tool_calls.is_empty() {
                return Ok(response.message.content);
            }

            if round == self.max_tool_rounds {
                break;
            }

            let tool_calls = response.message.tool_calls.clone();
            messages.push(response.message);

            for tc in &tool_calls {
                let call = ToolCall {
                    id: tc.id.clone(),
                    name: tc.name.clone(),
                    arguments: serde_json::from_str(&tc.arguments).unwrap_or_default(),
                };

                match self.tools.execute(&call).await {
                    Ok(result) => {
                        debug!(tool = %tc.name, success = result.success, "Tool executed");
                        messages.push(Message::tool_result(&tc.id, result.output));
                    }
                    Err(e) => {
                        warn!(tool = %tc.name, error = %e, "Tool execution failed");
                        // Report the error to the model so it can answer without the tool.
                        messages.push(Message::tool_result(&tc.id, format!("Error: {e}")));
                    }
                }
            }
        }

        warn!(
            profile = self.profile.name,
            rounds = self.max_tool_rounds,
            "Max tool rounds reached"
        );
        Err(ToolError::RoundLimitReached {
            rounds: self.max_tool_rounds,
        }
        .into())
    }
}
