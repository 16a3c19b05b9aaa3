use async_trait::async_trait;
use std::sync::Arc;

use crate::error::Result;
use crate::llm::types::ChatCompletionRequest;

/// One round-trip to a chat-completion service, returning the first choice's text.
#[async_trait]
pub trait CompletionTransport: Send + Sync {
    async fn send(&self, request: &ChatCompletionRequest) -> Result<String>;
}

#[async_trait]
impl<T: CompletionTransport + ?Sized> CompletionTransport for Arc<T> {
    async fn send(&self, request: &ChatCompletionRequest) -> Result<String> {
        (**self).send(request).await
    }
}

#[cfg(feature = "openai")]
pub use openai::OpenAiTransport;

#[cfg(feature = "openai")]
mod openai {
    use super::*;
    use crate::config::{OpenAiConfig, DEFAULT_OPENAI_BASE_URL};
    use crate::error::ReportError;
    use crate::llm::types::ChatCompletionResponse;
    use log::debug;
    use reqwest::Client;

    /// Transport for OpenAI-compatible `/chat/completions` endpoints.
    #[derive(Clone)]
    pub struct OpenAiTransport {
        client: Client,
        api_key: String,
        base_url: String,
    }

    impl OpenAiTransport {
        pub fn new(api_key: impl Into<String>) -> Self {
            Self {
                client: Client::new(),
                api_key: api_key.into(),
                base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            }
        }

        pub fn from_config(config: &OpenAiConfig) -> Self {
            Self::new(config.api_key.clone()).with_base_url(config.base_url.clone())
        }

        /// Point the transport at a proxy or self-hosted compatible server.
        pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
            self.base_url = base_url.into().trim_end_matches('/').to_string();
            self
        }

        pub fn base_url(&self) -> &str {
            &self.base_url
        }
    }

    impl std::fmt::Debug for OpenAiTransport {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("OpenAiTransport")
                .field("base_url", &self.base_url)
                .finish_non_exhaustive()
        }
    }

    #[async_trait]
    impl CompletionTransport for OpenAiTransport {
        async fn send(&self, request: &ChatCompletionRequest) -> Result<String> {
            let url = format!("{}/chat/completions", self.base_url);
            debug!(
                "POST {} (model {}, {} messages)",
                url,
                request.model,
                request.messages.len()
            );

            let res = self
                .client
                .post(&url)
                .bearer_auth(&self.api_key)
                .json(request)
                .send()
                .await?;
            let status = res.status();

            if !status.is_success() {
                let body = res.text().await?;
                return Err(ReportError::Api {
                    status: status.as_u16(),
                    body,
                });
            }

            let raw = res.text().await?;
            let body: ChatCompletionResponse = serde_json::from_str(&raw).map_err(|e| {
                ReportError::MalformedResponse(format!("{} in body: {}", e, raw))
            })?;

            body.into_first_content()
        }
    }

}
