//! Ticket Triage CLI
//!
//! Usage: `ticket-triage [tickets.json]`
//!
//! Decides every ticket in the given JSON array (or the built-in samples),
//! prints each decision as pretty JSON, then prints the evaluation summary.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ticket_triage::samples::sample_tickets;
use ticket_triage::{read_records, Config, Evaluator, TriageService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,ticket_triage=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        max_concurrency = config.max_concurrency,
        monotonic_priority = config.thresholds.monotonic_priority,
        "Configuration loaded"
    );

    let records = match std::env::args().nth(1) {
        Some(path) => read_records(&path)
            .await
            .with_context(|| format!("Failed to load tickets from {}", path))?,
        None => {
            tracing::info!("No input file given, using built-in samples");
            sample_tickets()
        }
    };

    let service = Arc::new(TriageService::from_config(&config));
    let outputs = service.process_batch(records.clone()).await?;

    for (raw, output) in records.iter().zip(&outputs) {
        let ticket_id = raw
            .get("ticket_id")
            .and_then(|id| id.as_str())
            .unwrap_or("N/A");
        println!("\nFinal analyzed output for ticket {}:", ticket_id);
        println!("{}", serde_json::to_string_pretty(output)?);
    }

    let report = Evaluator::new(service).score(&records, &outputs)?;
    println!(
        "\nEvaluation summary (run {}, batch {}):",
        report.run_id,
        &report.batch_digest[..12]
    );
    println!("{}", report);

    Ok(())
}
