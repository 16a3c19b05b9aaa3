use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::Path;

use super::{Row, SheetHandle, TabularBackend};
use crate::config::SheetsConfig;
use crate::error::{ReportError, Result};

const DRIVE_FILES_URL: &str = "https://www.googleapis.com/drive/v3/files";
const SHEETS_BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const SPREADSHEET_MIME_TYPE: &str = "application/vnd.google-apps.spreadsheet";

// Unqualified A1 ranges address the first worksheet, which is where reports live.
const APPEND_RANGE: &str = "A1";
const READ_RANGE: &str = "A:E";

#[derive(Clone, Deserialize)]
pub struct SheetsCredentials {
    pub access_token: String,
}

impl SheetsCredentials {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }

    /// Loads a JSON credentials file containing an `access_token` field.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let credentials: Self = serde_json::from_str(&raw)?;
        if credentials.access_token.trim().is_empty() {
            return Err(ReportError::Config(format!(
                "{} has an empty access_token",
                path.display()
            )));
        }
        Ok(credentials)
    }

    /// An explicit token wins over the credentials file.
    pub fn from_config(config: &SheetsConfig) -> Result<Self> {
        if let Some(token) = config.access_token.as_ref().filter(|t| !t.trim().is_empty()) {
            return Ok(Self::new(token.clone()));
        }
        match &config.credentials_path {
            Some(path) => Self::from_json_file(path),
            None => Err(ReportError::Config(
                "set GOOGLE_SHEETS_ACCESS_TOKEN or GOOGLE_SHEETS_CREDENTIALS".to_string(),
            )),
        }
    }
}

impl std::fmt::Debug for SheetsCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetsCredentials")
            .field("access_token", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct DriveFileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

#[derive(Debug, Deserialize)]
struct DriveFile {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Spreadsheet {
    spreadsheet_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

/// Google Sheets backend: Drive v3 for lookup by name, Sheets v4 for everything else.
#[derive(Clone)]
pub struct GoogleSheetsBackend {
    client: Client,
    credentials: SheetsCredentials,
    drive_files_url: String,
    sheets_base_url: String,
}

impl GoogleSheetsBackend {
    pub fn new(credentials: SheetsCredentials) -> Self {
        Self {
            client: Client::new(),
            credentials,
            drive_files_url: DRIVE_FILES_URL.to_string(),
            sheets_base_url: SHEETS_BASE_URL.to_string(),
        }
    }

    /// Overrides both API roots, for emulators or proxies.
    pub fn with_endpoints(
        mut self,
        drive_files_url: impl Into<String>,
        sheets_base_url: impl Into<String>,
    ) -> Self {
        self.drive_files_url = drive_files_url.into();
        self.sheets_base_url = sheets_base_url.into();
        self
    }

    async fn ensure_success(res: Response, action: &str) -> Result<Response> {
        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }
        let body = res.text().await?;
        Err(ReportError::Store(format!(
            "{} failed (status {}): {}",
            action, status, body
        )))
    }
}

impl std::fmt::Debug for GoogleSheetsBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleSheetsBackend")
            .field("drive_files_url", &self.drive_files_url)
            .field("sheets_base_url", &self.sheets_base_url)
            .finish_non_exhaustive()
    }
}

fn name_query(name: &str) -> String {
    let escaped = name.replace('\\', "\\\\").replace('\'', "\\'");
    format!(
        "name = '{}' and mimeType = '{}' and trashed = false",
        escaped, SPREADSHEET_MIME_TYPE
    )
}

#[async_trait]
impl TabularBackend for GoogleSheetsBackend {
    async fn find_sheet(&self, name: &str) -> Result<Option<SheetHandle>> {
        debug!("Looking up spreadsheet \"{}\"", name);
        let res = self
            .client
            .get(&self.drive_files_url)
            .bearer_auth(&self.credentials.access_token)
            .query(&[
                ("q", name_query(name).as_str()),
                ("fields", "files(id,name)"),
                ("pageSize", "1"),
            ])
            .send()
            .await?;
        let list: DriveFileList = Self::ensure_success(res, "Spreadsheet lookup")
            .await?
            .json()
            .await?;

        Ok(list.files.into_iter().next().map(|file| SheetHandle {
            id: file.id,
            name: file.name,
        }))
    }

    async fn create_sheet(&self, name: &str) -> Result<SheetHandle> {
        debug!("Creating spreadsheet \"{}\"", name);
        let res = self
            .client
            .post(&self.sheets_base_url)
            .bearer_auth(&self.credentials.access_token)
            .json(&json!({ "properties": { "title": name } }))
            .send()
            .await?;
        let created: Spreadsheet = Self::ensure_success(res, "Spreadsheet creation")
            .await?
            .json()
            .await?;

        Ok(SheetHandle {
            id: created.spreadsheet_id,
            name: name.to_string(),
        })
    }

    async fn append_row(&self, sheet: &SheetHandle, values: &[String]) -> Result<()> {
        let url = format!(
            "{}/{}/values/{}:append",
            self.sheets_base_url, sheet.id, APPEND_RANGE
        );
        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.credentials.access_token)
            .query(&[
                ("valueInputOption", "RAW"),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .json(&ValueRange {
                values: vec![values.to_vec()],
            })
            .send()
            .await?;
        Self::ensure_success(res, "Row append").await?;
        Ok(())
    }

    async fn rows(&self, sheet: &SheetHandle) -> Result<Vec<Row>> {
        let url = format!("{}/{}/values/{}", self.sheets_base_url, sheet.id, READ_RANGE);
        let res = self
            .client
            .get(&url)
            .bearer_auth(&self.credentials.access_token)
            .send()
            .await?;
        let range: ValueRange = Self::ensure_success(res, "Row read").await?.json().await?;
        Ok(range.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_name_query_escapes_quotes() {
        assert_eq!(
            name_query("Bob's \\ Reports"),
            "name = 'Bob\\'s \\\\ Reports' and mimeType = 'application/vnd.google-apps.spreadsheet' and trashed = false"
        );
    }

    #[test]
    fn test_value_range_tolerates_missing_values() {
        let empty: ValueRange = serde_json::from_str(r#"{"range":"Sheet1!A1:E1"}"#).unwrap();
        assert!(empty.values.is_empty());
    }

    #[test]
    fn test_credentials_from_file_and_config() {
        let path = std::env::temp_dir().join(format!("sheets-creds-{}.json", uuid::Uuid::new_v4()));
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, r#"{{"access_token":"ya29.token","token_type":"Bearer"}}"#).unwrap();

        let creds = SheetsCredentials::from_json_file(&path).unwrap();
        assert_eq!(creds.access_token, "ya29.token");
        assert!(!format!("{:?}", creds).contains("ya29"));

        let config = SheetsConfig {
            sheet_name: "Reports".to_string(),
            credentials_path: Some(path.clone()),
            access_token: Some("explicit".to_string()),
        };
        assert_eq!(SheetsCredentials::from_config(&config).unwrap().access_token, "explicit");

        std::fs::remove_file(&path).unwrap();
        assert!(SheetsCredentials::from_config(&SheetsConfig::default()).is_err());
    }
}
