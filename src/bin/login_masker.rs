// src/bin/login_masker.rs
//! login-masker — process one batch of login events, or reveal a stored value

use anyhow::{bail, Context, Result};
use login_masker::{
    decrypt_field, BatchProcessor, BatchReport, Config, PipelineError, SpoolDirQueue,
    SqliteLoginStore,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
usage: login-masker [process]          process one batch from the spool directory
       login-masker reveal <payload>   decrypt one masked_ip / masked_device_id value";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        None | Some("process") => process(),
        Some("reveal") => {
            let payload = args.get(1).context(USAGE)?;
            reveal(payload)
        }
        Some("-h" | "--help" | "help") => {
            println!("{USAGE}");
            Ok(())
        }
        Some(other) => bail!("unknown command `{other}`\n{USAGE}"),
    }
}

fn process() -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    let secret = config
        .secret
        .load()
        .context("Masking secret unavailable")?;

    let store = SqliteLoginStore::open(&config.store.path, config.store.busy_timeout())
        .with_context(|| format!("Failed to open login store {}", config.store.path.display()))?;
    let queue = SpoolDirQueue::open(&config.queue.spool_dir).with_context(|| {
        format!(
            "Failed to open spool directory {}",
            config.queue.spool_dir.display()
        )
    })?;

    info!(
        spool = %config.queue.spool_dir.display(),
        store = %config.store.path.display(),
        ack_on_success = config.pipeline.ack_on_success,
        "login-masker starting"
    );

    let mut processor = BatchProcessor::new(queue, store, secret, config.pipeline_options());
    let report = match processor.run_once() {
        Ok(report) => report,
        Err(PipelineError::Commit { report, source }) => {
            error!(
                persisted = report.persisted,
                error = %source,
                "rows were handed to the store but the commit failed"
            );
            return Err(source).context("Commit after batch failed");
        }
        Err(e) => return Err(e).context("Batch failed"),
    };

    print_summary(&report, config.pipeline.ack_on_success);
    Ok(())
}

fn reveal(payload: &str) -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    let secret = config
        .secret
        .load()
        .context("Masking secret unavailable")?;

    let plaintext =
        decrypt_field(payload, &secret).context("Could not reveal payload (wrong secret?)")?;
    println!("{plaintext}");
    Ok(())
}

fn print_summary(report: &BatchReport, ack_on_success: bool) {
    if report.is_empty() {
        println!("No messages in queue");
        return;
    }

    println!("\n=== BATCH COMPLETE ===");
    println!("Received:  {}", report.received);
    println!("Persisted: {}", report.persisted);
    println!("Failed:    {}", report.failed.len());
    for failed in &report.failed {
        println!(
            "  {} [{}] {}",
            failed.message.handle,
            failed.error.stage(),
            failed.error
        );
    }
    if ack_on_success {
        println!(
            "Acknowledged: {} ({} delete failures)",
            report.acknowledged, report.ack_failures
        );
    }
}
