use log::{debug, error, info};

use crate::config::CompletionConfig;
use crate::error::ReportError;
use crate::llm::cache::CompletionCache;
use crate::llm::client::CompletionTransport;
use crate::llm::types::{ChatCompletionRequest, ChatMessage};
use crate::schema::Outcome;

/// Feature-flagged, memoizing wrapper around a single completion call.
pub struct CompletionClient {
    transport: Box<dyn CompletionTransport>,
    config: CompletionConfig,
    cache: CompletionCache,
}

impl CompletionClient {
    pub fn new(config: CompletionConfig, transport: impl CompletionTransport + 'static) -> Self {
        let cache = CompletionCache::new(config.cache_capacity, config.cache_ttl());
        Self {
            transport: Box::new(transport),
            config,
            cache,
        }
    }

    #[cfg(feature = "openai")]
    pub fn from_config(config: &crate::config::ReportConfig) -> Self {
        Self::new(
            config.completion.clone(),
            crate::llm::client::OpenAiTransport::from_config(&config.openai),
        )
    }

    pub fn config(&self) -> &CompletionConfig {
        &self.config
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn cache(&self) -> &CompletionCache {
        &self.cache
    }

    pub fn build_request(&self, prompt: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage::system(self.config.system_message.clone()),
                ChatMessage::user(prompt),
            ],
            max_tokens: self.config.max_tokens,
        }
    }

    /// Sends `prompt` as the single user message.
    ///
    /// Never returns an error: a switched-off service yields `Outcome::Disabled`, and any
    /// transport, status or decoding problem is logged and yields `Outcome::Failed`. Only
    /// non-empty replies are memoized.
    pub async fn complete(&self, prompt: &str) -> Outcome<String> {
        if !self.config.enabled {
            info!("OpenAI service is disabled. Skipping completion request.");
            return Outcome::Disabled;
        }

        if let Some(text) = self.cache.get(prompt) {
            debug!("Completion cache hit ({} byte prompt)", prompt.len());
            return Outcome::Ready(text);
        }

        let request = self.build_request(prompt);
        debug!(
            "Requesting completion from {} (max_tokens {})",
            request.model, request.max_tokens
        );

        match self.transport.send(&request).await {
            Ok(text) if text.trim().is_empty() => {
                error!(
                    "Model {} returned an empty completion for a {} byte prompt",
                    request.model,
                    prompt.len()
                );
                Outcome::Failed(ReportError::EmptyCompletion)
            }
            Ok(text) => {
                info!("Report content generated successfully");
                self.cache.insert(prompt.to_string(), text.clone());
                Outcome::Ready(text)
            }
            Err(e) => {
                error!(
                    "Error generating completion with model {} ({} byte prompt): {} [{:?}]",
                    request.model,
                    prompt.len(),
                    e,
                    e
                );
                Outcome::Failed(e)
            }
        }
    }

    /// `complete` collapsed to a string: empty when disabled or failed.
    pub async fn complete_text(&self, prompt: &str) -> String {
        self.complete(prompt).await.into_text()
    }
}
