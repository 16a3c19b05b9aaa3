use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{ReportError, Result};

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_MAX_TOKENS: u32 = 1500;
pub const DEFAULT_SYSTEM_MESSAGE: &str = "You are a helpful assistant.";
pub const DEFAULT_CACHE_CAPACITY: usize = 100;
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_SHEET_NAME: &str = "AI Insights Reports";

/// Settings for the completion step of the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// When false, no outbound completion call is ever made.
    pub enabled: bool,
    pub model: String,
    pub max_tokens: u32,
    pub system_message: String,
    pub cache_capacity: usize,
    pub cache_ttl_secs: u64,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            system_message: DEFAULT_SYSTEM_MESSAGE.to_string(),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
        }
    }
}

impl CompletionConfig {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    #[serde(skip_serializing, default)]
    pub api_key: String,
    pub base_url: String,
}

impl std::fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SheetsConfig {
    pub sheet_name: String,
    /// Path to a JSON credentials file holding an OAuth `access_token`.
    pub credentials_path: Option<PathBuf>,
    /// Takes precedence over `credentials_path` when set.
    #[serde(skip_serializing)]
    pub access_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub completion: CompletionConfig,
    pub openai: OpenAiConfig,
    pub sheets: SheetsConfig,
}

impl ReportConfig {
    /// Reads configuration from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// `OPENAI_API_KEY` is only required while `ENABLE_OPENAI_SERVICE` is on.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let enabled = match lookup("ENABLE_OPENAI_SERVICE") {
            Some(raw) => parse_flag(&raw).ok_or_else(|| {
                ReportError::Config(format!("ENABLE_OPENAI_SERVICE is not a boolean: {}", raw))
            })?,
            None => false,
        };

        let api_key = lookup("OPENAI_API_KEY").unwrap_or_default();
        if enabled && api_key.trim().is_empty() {
            return Err(ReportError::Config(
                "OPENAI_API_KEY must be set when ENABLE_OPENAI_SERVICE is on".to_string(),
            ));
        }

        let max_tokens = match lookup("OPENAI_MAX_TOKENS") {
            Some(raw) => raw.trim().parse::<u32>().map_err(|e| {
                ReportError::Config(format!("OPENAI_MAX_TOKENS is invalid ({}): {}", raw, e))
            })?,
            None => DEFAULT_MAX_TOKENS,
        };

        let completion = CompletionConfig {
            enabled,
            model: lookup("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            max_tokens,
            ..CompletionConfig::default()
        };

        let openai = OpenAiConfig {
            api_key,
            base_url: lookup("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
        };

        let sheets = SheetsConfig {
            sheet_name: lookup("GOOGLE_SHEET_NAME")
                .unwrap_or_else(|| DEFAULT_SHEET_NAME.to_string()),
            credentials_path: lookup("GOOGLE_SHEETS_CREDENTIALS").map(PathBuf::from),
            access_token: lookup("GOOGLE_SHEETS_ACCESS_TOKEN"),
        };

        Ok(Self {
            completion,
            openai,
            sheets,
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
