// MailSort CLI Entry Point
// Reads one email (argument, file or stdin), classifies it, prints the result as JSON.

use anyhow::{bail, Context, Result};
use clap::Parser;
use mailsort_core::text_extract::extract_text_from_path;
use mailsort_core::{ClassificationEngine, Settings};
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Registry};

const APP_NAME: &str = "mailsort";

#[derive(Parser, Debug)]
#[command(name = "mailsort", version, about = "Classify an email and suggest a reply")]
struct Cli {
    /// Email body to classify
    #[arg(short, long, conflicts_with = "file")]
    text: Option<String>,

    /// Read the email body from a .txt file
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Pretty-print the JSON result
    #[arg(long)]
    pretty: bool,

    /// Log filter directive (overrides RUST_LOG)
    #[arg(long, env = "MAILSORT_LOG", default_value = "info")]
    log: String,
}

fn init_tracing(app_name: &str, directive: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));
    let formatting_layer = BunyanFormattingLayer::new(app_name.to_string(), std::io::stderr);
    let subscriber = Registry::default()
        .with(filter)
        .with(JsonStorageLayer)
        .with(formatting_layer);
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set global tracing subscriber")?;
    Ok(())
}

fn read_email(cli: &Cli, settings: &Settings) -> Result<String> {
    if let Some(text) = &cli.text {
        return Ok(text.clone());
    }

    if let Some(path) = &cli.file {
        return extract_text_from_path(path, settings.max_file_size_bytes())
            .with_context(|| format!("Failed to read email from {}", path.display()));
    }

    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read email from stdin")?;
    Ok(buffer)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(APP_NAME, &cli.log)?;
    let settings = Arc::new(Settings::from_env().context("Invalid configuration")?);

    let email = read_email(&cli, &settings)?;
    let engine = ClassificationEngine::from_settings(Arc::clone(&settings))?;
    info!(app = %settings.app_name, availability = ?engine.availability(), "Engine ready");

    let result = engine.classify(&email).await;
    let output = if cli.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{}", output);

    if !result.success {
        bail!(result.error.unwrap_or_else(|| "classification failed".to_string()));
    }
    Ok(())
}
