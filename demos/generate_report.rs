use anyhow::Context;
use dotenv::dotenv;
use insights_report::*;
use std::fs;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = ReportConfig::from_env().context("loading configuration")?;
    println!("📝 Generating insights report (model: {})", config.completion.model);

    let generator = ReportGenerator::new(CompletionClient::from_config(&config));
    let request = ReportRequest::new(
        "retail",
        vec![
            "manual inventory tracking".to_string(),
            "disconnected POS and e-commerce systems".to_string(),
            "scale to 50 stores with predictive restocking".to_string(),
        ],
    )?;

    let html = match generator.generate_report(&request).await {
        Outcome::Ready(html) => html,
        Outcome::Disabled => {
            println!("⚠️  ENABLE_OPENAI_SERVICE is off; nothing was generated.");
            return Ok(());
        }
        Outcome::Failed(e) => anyhow::bail!("report generation failed: {}", e),
    };

    let output = "insights_report.html";
    fs::write(output, &html)?;
    println!("✅ Wrote {} bytes to {}", html.len(), output);

    let record = ReportRecord::new("Demo Retail Co", html, "");
    match SheetsCredentials::from_config(&config.sheets) {
        Ok(credentials) => {
            let store = TabularStore::new(GoogleSheetsBackend::new(credentials));
            let rows = record_in(&store, &config.sheets.sheet_name, &record).await?;
            println!(
                "🗂️  Recorded report {} in Google Sheets; ledger has {} data rows.",
                record.id, rows
            );
        }
        Err(e) => {
            println!("⚠️  No Sheets credentials ({}); using a throwaway in-memory ledger.", e);
            let store = TabularStore::new(MemoryBackend::new());
            let rows = record_in(&store, &config.sheets.sheet_name, &record).await?;
            println!(
                "🗂️  Report {} was NOT persisted; the in-memory ledger ({} data rows) is discarded on exit.",
                record.id, rows
            );
        }
    }

    Ok(())
}

async fn record_in<B: TabularBackend>(
    store: &TabularStore<B>,
    sheet_name: &str,
    record: &ReportRecord,
) -> anyhow::Result<usize> {
    let sheet = store.get_or_create(sheet_name).await?;
    store.record_report(&sheet, record).await?;
    Ok(store.read_records(&sheet).await.len())
}
