//! Core request types shared by the prompt, merge and CLI layers.

use crate::error::{AgentConfigError, Result};
use crate::provider::detect_provider;

pub const DEFAULT_MODEL_ID: &str = "google/gemini-pro";
pub const DEFAULT_PROVIDER: &str = "google";

/// Agent entry name holding the settings every agent inherits.
pub const DEFAULTS_AGENT: &str = "defaults";

/// Raw operator answers, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answers {
    pub agent_name: String,
    pub model_id: String,
    pub provider: String,
    pub wants_api_key: String,
    pub api_key: Option<String>,
}

/// Fallbacks applied to empty answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDefaults {
    pub model_id: String,
    pub provider: String,
    /// Infer the provider from the model id instead of using `provider`.
    pub detect_provider: bool,
}

impl Default for RequestDefaults {
    fn default() -> Self {
        Self {
            model_id: DEFAULT_MODEL_ID.to_string(),
            provider: DEFAULT_PROVIDER.to_string(),
            detect_provider: false,
        }
    }
}

/// A validated request to register one agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentRequest {
    pub agent_name: String,
    pub model_id: String,
    pub provider: String,
    pub api_key: Option<String>,
}

impl AgentRequest {
    pub fn from_answers(answers: &Answers, defaults: &RequestDefaults) -> Result<Self> {
        let agent_name = answers.agent_name.trim();
        if agent_name.is_empty() {
            return Err(AgentConfigError::MissingRequiredInput("agent name"));
        }

        let model_id =
            non_empty(&answers.model_id).unwrap_or(defaults.model_id.as_str()).to_string();

        let provider = match non_empty(&answers.provider) {
            Some(provider) => provider.to_string(),
            None if defaults.detect_provider => detect_provider(&model_id).to_string(),
            None => defaults.provider.clone(),
        };

        let api_key = if answers.wants_api_key.trim().eq_ignore_ascii_case("y") {
            answers.api_key.clone().filter(|key| !key.is_empty())
        } else {
            None
        };

        Ok(Self { agent_name: agent_name.to_string(), model_id, provider, api_key })
    }

    /// The request overwrites the shared `defaults` agent entry.
    pub fn targets_defaults_entry(&self) -> bool {
        self.agent_name == DEFAULTS_AGENT
    }

    /// Auth profile key: `<provider>:<agentName>`.
    pub fn profile_name(&self) -> String {
        format!("{}:{}", self.provider, self.agent_name)
    }
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
