use log::{debug, error, info};

use crate::html::{extract_html, inject_styles};
use crate::llm::CompletionClient;
use crate::prompt::build_prompt;
use crate::schema::{Outcome, ReportRequest};

/// Prompt → completion → extraction → styling.
///
/// Holds no state of its own besides the completion client, so one generator can be shared
/// behind an `Arc` by concurrent callers.
pub struct ReportGenerator {
    completion: CompletionClient,
}

impl ReportGenerator {
    pub fn new(completion: CompletionClient) -> Self {
        Self { completion }
    }

    pub fn completion(&self) -> &CompletionClient {
        &self.completion
    }

    /// Returns the styled HTML report, or `""` when the service is disabled or anything
    /// along the way failed. Use [`ReportGenerator::generate_outcome`] to tell those apart.
    pub async fn generate(&self, industry: &str, answers: &[String]) -> String {
        self.generate_outcome(industry, answers).await.into_text()
    }

    pub async fn generate_outcome(&self, industry: &str, answers: &[String]) -> Outcome<String> {
        if !self.completion.is_enabled() {
            info!("OpenAI service is disabled. Skipping report content generation.");
            return Outcome::Disabled;
        }

        match ReportRequest::new(industry, answers.to_vec()) {
            Ok(request) => self.generate_report(&request).await,
            Err(e) => {
                error!("Rejected report request for the {} industry: {}", industry, e);
                Outcome::Failed(e)
            }
        }
    }

    pub async fn generate_report(&self, request: &ReportRequest) -> Outcome<String> {
        let prompt = build_prompt(&request.industry, &request.answers);
        debug!(
            "Generating report content for the {} industry ({} byte prompt)",
            request.industry,
            prompt.len()
        );

        let raw = match self.completion.complete(&prompt).await {
            Outcome::Ready(raw) => raw,
            Outcome::Disabled => {
                info!("OpenAI service is disabled. Skipping report content generation.");
                return Outcome::Disabled;
            }
            Outcome::Failed(e) => {
                error!(
                    "Error generating report content for the {} industry: {}",
                    request.industry, e
                );
                return Outcome::Failed(e);
            }
        };

        let fragment = extract_html(&raw);
        info!("HTML content extracted from the response");

        Outcome::Ready(inject_styles(&fragment))
    }
}
