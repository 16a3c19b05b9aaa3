use async_trait::async_trait;
use insights_report::*;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

struct MockCompletion {
    reply: String,
    calls: AtomicUsize,
}

impl MockCompletion {
    fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionTransport for MockCompletion {
    async fn send(&self, _request: &llm::ChatCompletionRequest) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reply.clone())
    }
}

/// Backend whose writes and reads always fail, for exercising the store's error paths.
struct BrokenBackend {
    inner: MemoryBackend,
}

#[async_trait]
impl TabularBackend for BrokenBackend {
    async fn find_sheet(&self, name: &str) -> Result<Option<SheetHandle>> {
        self.inner.find_sheet(name).await
    }

    async fn create_sheet(&self, name: &str) -> Result<SheetHandle> {
        self.inner.create_sheet(name).await
    }

    async fn append_row(&self, _sheet: &SheetHandle, _values: &[String]) -> Result<()> {
        Err(ReportError::Store("quota exceeded".to_string()))
    }

    async fn rows(&self, _sheet: &SheetHandle) -> Result<Vec<Row>> {
        Err(ReportError::Store("quota exceeded".to_string()))
    }
}

/// Backend whose very first append fails, like a header write lost to a transient error.
struct FirstAppendFails {
    inner: MemoryBackend,
    failed: AtomicBool,
}

#[async_trait]
impl TabularBackend for FirstAppendFails {
    async fn find_sheet(&self, name: &str) -> Result<Option<SheetHandle>> {
        self.inner.find_sheet(name).await
    }

    async fn create_sheet(&self, name: &str) -> Result<SheetHandle> {
        self.inner.create_sheet(name).await
    }

    async fn append_row(&self, sheet: &SheetHandle, values: &[String]) -> Result<()> {
        if !self.failed.swap(true, Ordering::SeqCst) {
            return Err(ReportError::Store("connection reset".to_string()));
        }
        self.inner.append_row(sheet, values).await
    }

    async fn rows(&self, sheet: &SheetHandle) -> Result<Vec<Row>> {
        self.inner.rows(sheet).await
    }
}

fn retail_answers() -> Vec<String> {
    vec![
        "manual inventory tracking".to_string(),
        "disconnected POS and e-commerce systems".to_string(),
        "scale to 50 stores with predictive restocking".to_string(),
    ]
}

fn generator_with(config: CompletionConfig, transport: Arc<MockCompletion>) -> ReportGenerator {
    ReportGenerator::new(CompletionClient::new(config, transport))
}

#[tokio::test]
async fn test_retail_report_end_to_end() {
    let transport = MockCompletion::replying("noise<body>Hello</body>more noise");
    let generator = generator_with(CompletionConfig::default(), transport.clone());

    let html = generator.generate("retail", &retail_answers()).await;

    assert_eq!(html, format!("<html><head>{}</head><body>Hello</body></html>", STYLESHEET));
    assert!(html.starts_with("<html><head><style>"));
    assert!(html.ends_with("</style></head><body>Hello</body></html>"));
    assert_eq!(html.len(), "<body>Hello</body>".len() + SHELL_OVERHEAD);
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_disabled_service_returns_empty_for_any_input() {
    let transport = MockCompletion::replying("<body>never used</body>");
    let generator = generator_with(CompletionConfig::disabled(), transport.clone());

    assert_eq!(generator.generate("retail", &retail_answers()).await, "");
    assert_eq!(generator.generate("", &[]).await, "");
    assert_eq!(
        generator
            .generate("healthcare", &vec!["x".to_string(); 3])
            .await,
        ""
    );
    assert_eq!(transport.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_repeated_requests_reuse_cached_completion() {
    let transport = MockCompletion::replying("<body>cached</body>");
    let generator = generator_with(CompletionConfig::default(), transport.clone());

    let first = generator.generate("retail", &retail_answers()).await;
    let second = generator.generate("retail", &retail_answers()).await;
    assert_eq!(first, second);
    assert_eq!(transport.calls(), 1);

    tokio::time::advance(Duration::from_secs(301)).await;

    let third = generator.generate("retail", &retail_answers()).await;
    assert_eq!(third, first);
    assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn test_concurrent_callers_share_one_generator() {
    let transport = MockCompletion::replying("<body>shared</body>");
    let generator = Arc::new(generator_with(CompletionConfig::default(), transport.clone()));

    let tasks: Vec<_> = ["retail", "banking", "logistics", "retail"]
        .into_iter()
        .map(|industry| {
            let generator = generator.clone();
            tokio::spawn(async move { generator.generate(industry, &retail_answers()).await })
        })
        .collect();

    for task in tasks {
        let html = task.await.unwrap();
        assert!(html.ends_with("<body>shared</body></html>"));
    }
    assert!(transport.calls() >= 3 && transport.calls() <= 4);
    assert_eq!(generator.completion().cache().len(), 3);
}

#[tokio::test]
async fn test_new_sheet_contains_only_header_row() {
    let store = TabularStore::new(MemoryBackend::new());

    let sheet = store.get_or_create("NewSheet").await.unwrap();
    let rows = store.read_all(&sheet).await;

    assert_eq!(rows, vec![header_row()]);
    assert_eq!(
        rows[0],
        vec!["Report ID", "Client Name", "Report Content", "PDF URL", "Timestamp"]
    );
    assert!(store.read_records(&sheet).await.is_empty());
}

#[tokio::test]
async fn test_existing_sheet_is_reused_without_second_header() {
    let store = TabularStore::new(MemoryBackend::new());

    let first = store.get_or_create("Reports").await.unwrap();
    let again = store.get_or_create("Reports").await.unwrap();

    assert_eq!(first, again);
    assert_eq!(store.backend().sheet_count(), 1);
    assert_eq!(store.read_all(&again).await.len(), 1);
}

#[tokio::test]
async fn test_generated_report_is_recorded() {
    let transport = MockCompletion::replying("<body><h1>AI Insights Report</h1></body>");
    let generator = generator_with(CompletionConfig::default(), transport);
    let store = TabularStore::new(MemoryBackend::new());
    let sheet = store.get_or_create("AI Insights Reports").await.unwrap();

    let html = generator.generate("retail", &retail_answers()).await;
    let record = ReportRecord::new("Acme Retail", html.clone(), "https://files.example/acme.pdf");
    store.record_report(&sheet, &record).await.unwrap();

    let records = store.read_records(&sheet).await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["Report ID"], record.id);
    assert_eq!(records[0]["Client Name"], "Acme Retail");
    assert_eq!(records[0]["Report Content"], html);
    assert_eq!(records[0]["PDF URL"], "https://files.example/acme.pdf");
    assert!(!records[0]["Timestamp"].is_empty());
}

#[tokio::test]
async fn test_short_rows_are_padded_in_records() {
    let store = TabularStore::new(MemoryBackend::new());
    let sheet = store.get_or_create("Sparse").await.unwrap();
    store
        .append_row(&sheet, &["r-1".to_string(), "Client".to_string()])
        .await
        .unwrap();

    let records = store.read_records(&sheet).await;
    assert_eq!(records[0]["Report ID"], "r-1");
    assert_eq!(records[0]["Timestamp"], "");
}

#[tokio::test]
async fn test_store_failures_surface_as_sentinels() {
    let store = TabularStore::new(BrokenBackend {
        inner: MemoryBackend::new(),
    });
    let sheet = store.backend().inner.create_sheet("Broken").await.unwrap();

    assert!(store.read_all(&sheet).await.is_empty());
    assert!(store.read_records(&sheet).await.is_empty());

    let write = store.append_row(&sheet, &["value".to_string()]).await;
    assert!(matches!(write, Err(ReportError::Store(_))));

    // Creating a new sheet needs the header write, so the failure propagates.
    assert!(store.get_or_create("AnotherSheet").await.is_err());
}

#[tokio::test]
async fn test_headerless_sheet_is_repaired_on_next_open() {
    let store = TabularStore::new(FirstAppendFails {
        inner: MemoryBackend::new(),
        failed: AtomicBool::new(false),
    });

    assert!(store.get_or_create("Reports").await.is_err());
    let sheet = store.get_or_create("Reports").await.unwrap();
    assert_eq!(store.read_all(&sheet).await, vec![header_row()]);

    let record = ReportRecord::new("Acme", "<html/>", "");
    store.record_report(&sheet, &record).await.unwrap();

    let rows = store.read_all(&sheet).await;
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0], header_row());

    let records = store.read_records(&sheet).await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["Report ID"], record.id);
    assert_eq!(records[0]["Client Name"], "Acme");

    // Reopening a populated sheet does not add another header.
    store.get_or_create("Reports").await.unwrap();
    assert_eq!(store.read_all(&sheet).await.len(), 2);
}
