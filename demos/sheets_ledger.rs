use anyhow::Context;
use dotenv::dotenv;
use insights_report::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = ReportConfig::from_env()?;
    let credentials =
        SheetsCredentials::from_config(&config.sheets).context("loading Sheets credentials")?;
    let store = TabularStore::new(GoogleSheetsBackend::new(credentials));

    let sheet = store.get_or_create(&config.sheets.sheet_name).await?;
    println!("📄 Using spreadsheet \"{}\" ({})", sheet.name, sheet.id);

    let client_name = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "Demo Client".to_string());
    let record = ReportRecord::new(client_name, "<html></html>", "");
    if let Err(e) = store.record_report(&sheet, &record).await {
        eprintln!("❌ Could not record report {}: {}", record.id, e);
    }

    for row in store.read_records(&sheet).await {
        println!(
            "{} | {} | {}",
            row.get("Report ID").map(String::as_str).unwrap_or(""),
            row.get("Client Name").map(String::as_str).unwrap_or(""),
            row.get("Timestamp").map(String::as_str).unwrap_or("")
        );
    }

    Ok(())
}
