use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

use super::{Row, SheetHandle, TabularBackend};
use crate::error::{ReportError, Result};

#[derive(Default)]
struct MemoryState {
    by_name: HashMap<String, SheetHandle>,
    rows: HashMap<String, Vec<Row>>,
}

/// Process-local backend. Sheets live as long as the backend does.
#[derive(Default)]
pub struct MemoryBackend {
    state: Mutex<MemoryState>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sheet_count(&self) -> usize {
        self.lock().by_name.len()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl TabularBackend for MemoryBackend {
    async fn find_sheet(&self, name: &str) -> Result<Option<SheetHandle>> {
        Ok(self.lock().by_name.get(name).cloned())
    }

    async fn create_sheet(&self, name: &str) -> Result<SheetHandle> {
        let mut state = self.lock();
        if state.by_name.contains_key(name) {
            return Err(ReportError::Store(format!("sheet \"{}\" already exists", name)));
        }

        let sheet = SheetHandle {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
        };
        state.by_name.insert(name.to_string(), sheet.clone());
        state.rows.insert(sheet.id.clone(), Vec::new());
        Ok(sheet)
    }

    async fn append_row(&self, sheet: &SheetHandle, values: &[String]) -> Result<()> {
        self.lock()
            .rows
            .get_mut(&sheet.id)
            .ok_or_else(|| ReportError::SheetNotFound(sheet.name.clone()))?
            .push(values.to_vec());
        Ok(())
    }

    async fn rows(&self, sheet: &SheetHandle) -> Result<Vec<Row>> {
        self.lock()
            .rows
            .get(&sheet.id)
            .cloned()
            .ok_or_else(|| ReportError::SheetNotFound(sheet.name.clone()))
    }
}
