//! OpenAI chat-completions client.
//!
//! Two operations: turning an idea into a build-plan blueprint, and
//! executing one step's prompt during replay. The blueprint response is
//! decoded leniently — an unusable payload degrades to the "Plan
//! unavailable" blueprint (which assembles into the fallback workflow)
//! instead of failing the whole request.

use log::warn;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{GroundworkError, Result};
use crate::models::Blueprint;
use crate::prompt;

const DEFAULT_MODEL: &str = "gpt-4.1-mini";
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

const PLANNER_SYSTEM: &str = "You are a senior full-stack engineer and product architect. \
     You produce ONLY valid JSON. No markdown, no commentary.";

const EXECUTOR_SYSTEM: &str =
    "You are a workflow execution agent. Execute this step of a build plan.";

/// OpenAI API client.
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiClient {
    /// Create a client from the environment.
    ///
    /// Reads the API key from `OPENAI_API_KEY` (required) and the model
    /// from `OPENAI_MODEL` (optional).
    pub fn from_env() -> Result<Self> {
        let api_key =
            std::env::var("OPENAI_API_KEY").map_err(|_| GroundworkError::Configuration {
                message: "OPENAI_API_KEY not set".to_string(),
            })?;
        let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Ok(Self {
            client: Client::new(),
            api_key,
            model,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Override the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the base URL (Azure OpenAI or compatible APIs).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Generate a build-plan blueprint for an idea.
    pub async fn generate_blueprint(&self, idea: &str) -> Result<Blueprint> {
        if idea.trim().is_empty() {
            return Err(GroundworkError::InvalidInput {
                field: "idea".to_string(),
                reason: "Describe what app you want to build".to_string(),
            });
        }

        let content = self
            .chat(
                PLANNER_SYSTEM,
                &prompt::planning_prompt(idea),
                Some(0.25),
                Some(1600),
            )
            .await?;

        match serde_json::from_str::<Value>(&content) {
            Ok(value) => Ok(Blueprint::from_value(value)),
            Err(e) => {
                warn!("Blueprint response was not valid JSON: {e}");
                Ok(unavailable_blueprint())
            }
        }
    }

    /// Execute one step's prompt and return the agent's output.
    pub async fn execute_step(&self, step_prompt: &str) -> Result<String> {
        self.chat(EXECUTOR_SYSTEM, step_prompt, None, None).await
    }

    /// Make a chat-completions request and return the first choice's text.
    async fn chat(
        &self,
        system: &str,
        user_message: &str,
        temperature: Option<f32>,
        max_tokens: Option<u32>,
    ) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user_message.to_string(),
                },
            ],
            temperature,
            max_tokens,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| GroundworkError::http_error("OpenAI request failed", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GroundworkError::Api(format!(
                "OpenAI HTTP {}: {body}",
                status.as_u16()
            )));
        }

        let response: ChatResponse = response
            .json()
            .await
            .map_err(|e| GroundworkError::http_error("Failed to decode OpenAI response", e))?;

        response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| GroundworkError::Api("No response from OpenAI".to_string()))
    }
}

/// The blueprint used when the LLM returned something unusable; assembles
/// into the one-step fallback workflow.
fn unavailable_blueprint() -> Blueprint {
    Blueprint {
        summary: Some("Plan unavailable".to_string()),
        ..Blueprint::default()
    }
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}
