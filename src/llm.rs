//! Language model client for itinerary generation
//!
//! One synchronous chat-completion round trip against the Groq
//! OpenAI-compatible API. The [`LanguageModel`] trait is the seam that lets
//! the build pipeline run against a scripted model in tests.

use crate::config::LlmConfig;
use crate::error::PlannerError;
use crate::Result;
use reqwest::blocking::Client;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// A model that completes a prompt with a text reply
pub trait LanguageModel {
    /// Send one prompt and return the raw reply text
    ///
    /// Any failure, including an empty reply, is surfaced to the caller.
    fn complete(&self, prompt: &str) -> Result<String>;
}

/// Chat-completions client for the Groq API
#[derive(Debug)]
pub struct GroqClient {
    client: Client,
    config: LlmConfig,
    api_key: String,
}

/// Groq chat-completions wire format
mod wire {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize)]
    pub struct Request<'a> {
        pub model: &'a str,
        pub messages: Vec<Message<'a>>,
    }

    #[derive(Debug, Serialize)]
    pub struct Message<'a> {
        pub role: &'a str,
        pub content: &'a str,
    }

    #[derive(Debug, Deserialize)]
    pub struct Response {
        pub choices: Vec<Choice>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Choice {
        pub message: ReplyMessage,
    }

    #[derive(Debug, Deserialize)]
    pub struct ReplyMessage {
        pub content: Option<String>,
    }
}

impl GroqClient {
    /// Create a new client from configuration
    ///
    /// The API key must be present in the config; there is no fallback to
    /// process-wide environment state.
    pub fn new(config: LlmConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                PlannerError::config("LLM API key is required. Set llm.api_key in your config.")
            })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("tripweaver/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PlannerError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            config,
            api_key,
        })
    }
}

impl LanguageModel for GroqClient {
    #[instrument(skip(self, prompt), fields(model = %self.config.model, prompt_len = prompt.len()))]
    fn complete(&self, prompt: &str) -> Result<String> {
        info!("Requesting itinerary completion from model");
        let start_time = Instant::now();

        let request = wire::Request {
            model: &self.config.model,
            messages: vec![wire::Message {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(&self.config.base_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .map_err(|e| PlannerError::retrieval(format!("LLM request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(PlannerError::retrieval(format!(
                "LLM request failed with status {status}: {body}"
            )));
        }

        let completion: wire::Response = response.json().map_err(|e| {
            PlannerError::response_parse(format!("invalid completion envelope: {e}"))
        })?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        if content.trim().is_empty() {
            return Err(PlannerError::response_parse("empty response from LLM"));
        }

        let duration = start_time.elapsed();
        info!(
            "Received completion ({} chars) in {:.3}s",
            content.len(),
            duration.as_secs_f64()
        );
        if duration.as_secs() > 30 {
            warn!("Slow LLM response: {:.3}s", duration.as_secs_f64());
        }
        debug!("Completion starts with: {:.80}", content);

        Ok(content)
    }
}
