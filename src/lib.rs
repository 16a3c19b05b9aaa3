//! # Insights Report
//!
//! Generates AI business-insights reports for prospective consulting clients and keeps a
//! ledger of them in a spreadsheet.
//!
//! ## Pipeline
//!
//! - **Prompt**: the client's industry and three questionnaire answers become an instruction
//!   asking for a five-section report inside a fixed HTML skeleton
//! - **Completion**: one chat-completion round-trip, feature-flagged and memoized
//! - **Extraction**: the `<body>` fragment is cut out of the model's reply
//! - **Styling**: the fragment is wrapped in a document shell with the house stylesheet
//!
//! No step raises. Callers get either the HTML or an empty string, or an [`Outcome`] when
//! they need to know whether the service was switched off or failed.
//!
//! ## Example
//!
//! ```rust,ignore
//! use insights_report::*;
//!
//! let config = ReportConfig::from_env()?;
//! let generator = ReportGenerator::new(CompletionClient::from_config(&config));
//!
//! let html = generator
//!     .generate(
//!         "retail",
//!         &[
//!             "manual inventory tracking".to_string(),
//!             "disconnected POS and e-commerce systems".to_string(),
//!             "scale to 50 stores with predictive restocking".to_string(),
//!         ],
//!     )
//!     .await;
//!
//! let store = TabularStore::new(MemoryBackend::new());
//! let sheet = store.get_or_create(&config.sheets.sheet_name).await?;
//! store
//!     .record_report(&sheet, &ReportRecord::new("Acme Retail", html, ""))
//!     .await?;
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod html;
pub mod llm;
pub mod prompt;
pub mod schema;
pub mod store;

pub use config::{CompletionConfig, OpenAiConfig, ReportConfig, SheetsConfig};
pub use error::{ReportError, Result};
pub use generator::ReportGenerator;
pub use html::{extract_html, inject_styles, SHELL_OVERHEAD, STYLESHEET};
pub use llm::{CompletionCache, CompletionClient, CompletionTransport};
pub use prompt::build_prompt;
pub use schema::*;
pub use store::{header_row, MemoryBackend, Record, Row, SheetHandle, TabularBackend, TabularStore};

#[cfg(feature = "openai")]
pub use llm::OpenAiTransport;
#[cfg(feature = "openai")]
pub use store::{GoogleSheetsBackend, SheetsCredentials};
