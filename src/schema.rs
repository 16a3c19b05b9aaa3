use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ReportError, Result};

/// Column headers written to a freshly created report sheet.
pub const REPORT_HEADERS: [&str; 5] = [
    "Report ID",
    "Client Name",
    "Report Content",
    "PDF URL",
    "Timestamp",
];

/// The questionnaire a client fills in before a report is generated.
///
/// Answers are positional: index 0 is the data management challenge, index 1 the
/// integration inefficiency, index 2 the long-term goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRequest {
    pub industry: String,
    pub answers: [String; 3],
}

impl ReportRequest {
    pub fn new(industry: impl Into<String>, answers: Vec<String>) -> Result<Self> {
        let answers: [String; 3] = answers
            .try_into()
            .map_err(|rejected: Vec<String>| ReportError::InvalidAnswerCount(rejected.len()))?;

        Ok(Self {
            industry: industry.into(),
            answers,
        })
    }

    pub fn data_challenges(&self) -> &str {
        &self.answers[0]
    }

    pub fn integration_gaps(&self) -> &str {
        &self.answers[1]
    }

    pub fn long_term_goals(&self) -> &str {
        &self.answers[2]
    }
}

/// A generated report as it is persisted in the tabular store. Records are append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRecord {
    pub id: String,
    pub client_name: String,
    pub report_content: String,
    /// Where the archived PDF rendition lives, if one was produced.
    pub pdf_url: String,
    pub timestamp: DateTime<Utc>,
}

impl ReportRecord {
    pub fn new(
        client_name: impl Into<String>,
        report_content: impl Into<String>,
        pdf_url: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            client_name: client_name.into(),
            report_content: report_content.into(),
            pdf_url: pdf_url.into(),
            timestamp: Utc::now(),
        }
    }

    /// Values in `REPORT_HEADERS` order.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.client_name.clone(),
            self.report_content.clone(),
            self.pdf_url.clone(),
            self.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutcomeStatus {
    Ok,
    Disabled,
    Failed,
}

/// Result of a step that never raises: either a value, a deliberate no-op because the
/// completion service is switched off, or a failure that has already been logged.
#[derive(Debug)]
pub enum Outcome<T> {
    Ready(T),
    Disabled,
    Failed(ReportError),
}

impl<T> Outcome<T> {
    pub fn status(&self) -> OutcomeStatus {
        match self {
            Outcome::Ready(_) => OutcomeStatus::Ok,
            Outcome::Disabled => OutcomeStatus::Disabled,
            Outcome::Failed(_) => OutcomeStatus::Failed,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Outcome::Ready(_))
    }

    pub fn ready(self) -> Option<T> {
        match self {
            Outcome::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Ready(value) => Outcome::Ready(f(value)),
            Outcome::Disabled => Outcome::Disabled,
            Outcome::Failed(e) => Outcome::Failed(e),
        }
    }
}

impl Outcome<String> {
    /// Collapses the outcome to the legacy signal: the text, or `""` when disabled or failed.
    pub fn into_text(self) -> String {
        self.ready().unwrap_or_default()
    }
}
