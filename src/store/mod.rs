//! Row-oriented persistence for report records.
//!
//! `TabularStore` owns the get-or-create and header conventions; a `TabularBackend`
//! only has to find, create, append to and read a named sheet.

pub mod memory;
#[cfg(feature = "openai")]
pub mod sheets;

pub use memory::MemoryBackend;
#[cfg(feature = "openai")]
pub use sheets::{GoogleSheetsBackend, SheetsCredentials};

use async_trait::async_trait;
use log::{debug, error, info, warn};
use std::collections::BTreeMap;

use crate::error::Result;
use crate::schema::{ReportRecord, REPORT_HEADERS};

pub type Row = Vec<String>;

/// Data row keyed by the sheet's header cells.
pub type Record = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SheetHandle {
    pub id: String,
    pub name: String,
}

#[async_trait]
pub trait TabularBackend: Send + Sync {
    async fn find_sheet(&self, name: &str) -> Result<Option<SheetHandle>>;

    async fn create_sheet(&self, name: &str) -> Result<SheetHandle>;

    async fn append_row(&self, sheet: &SheetHandle, values: &[String]) -> Result<()>;

    /// Every row of the sheet in order, header included.
    async fn rows(&self, sheet: &SheetHandle) -> Result<Vec<Row>>;
}

pub fn header_row() -> Row {
    REPORT_HEADERS.iter().map(|h| h.to_string()).collect()
}

pub struct TabularStore<B> {
    backend: B,
}

impl<B: TabularBackend> TabularStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Opens the sheet called `name`, creating it with the report header row if it does
    /// not exist yet. An existing sheet with no rows at all gets its header written, which
    /// recovers a sheet whose creation succeeded but whose header write did not.
    pub async fn get_or_create(&self, name: &str) -> Result<SheetHandle> {
        if let Some(sheet) = self.backend.find_sheet(name).await? {
            info!("Sheet \"{}\" found.", name);
            if self.backend.rows(&sheet).await?.is_empty() {
                warn!("Sheet \"{}\" has no header row. Writing headers.", name);
                self.backend.append_row(&sheet, &header_row()).await?;
            }
            return Ok(sheet);
        }

        info!("Sheet \"{}\" not found. Creating a new sheet.", name);
        let sheet = self.backend.create_sheet(name).await?;
        self.backend.append_row(&sheet, &header_row()).await?;
        info!("Sheet \"{}\" initialized with headers.", name);

        Ok(sheet)
    }

    /// All rows, header included. A failed read is logged and yields no rows.
    pub async fn read_all(&self, sheet: &SheetHandle) -> Vec<Row> {
        debug!("Reading rows from sheet \"{}\"", sheet.name);
        match self.backend.rows(sheet).await {
            Ok(rows) => {
                info!("Read {} rows from sheet \"{}\"", rows.len(), sheet.name);
                rows
            }
            Err(e) => {
                error!("Error reading sheet \"{}\": {}", sheet.name, e);
                Vec::new()
            }
        }
    }

    /// Data rows mapped by header. Short rows are padded with empty cells and cells beyond
    /// the header are dropped.
    pub async fn read_records(&self, sheet: &SheetHandle) -> Vec<Record> {
        let mut rows = self.read_all(sheet).await.into_iter();
        let Some(header) = rows.next() else {
            return Vec::new();
        };

        rows.map(|row| {
            header
                .iter()
                .enumerate()
                .map(|(i, key)| (key.clone(), row.get(i).cloned().unwrap_or_default()))
                .collect()
        })
        .collect()
    }

    /// Appends one row. Failures are logged and returned so the caller can decide what to do.
    pub async fn append_row(&self, sheet: &SheetHandle, values: &[String]) -> Result<()> {
        debug!(
            "Writing {} values to sheet \"{}\"",
            values.len(),
            sheet.name
        );
        match self.backend.append_row(sheet, values).await {
            Ok(()) => {
                info!("Row written to sheet \"{}\"", sheet.name);
                Ok(())
            }
            Err(e) => {
                error!("Error writing to sheet \"{}\": {}", sheet.name, e);
                Err(e)
            }
        }
    }

    pub async fn record_report(&self, sheet: &SheetHandle, record: &ReportRecord) -> Result<()> {
        self.append_row(sheet, &record.to_row()).await
    }
}
