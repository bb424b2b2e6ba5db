use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use catalog_docgen::config::DocgenConfig;
use catalog_docgen::openapi;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    // Logs go to stderr so stdout carries only the document.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog_docgen=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // --- Configuration ---
    let config = DocgenConfig::from_env()?;
    tracing::info!(
        output = ?config.output,
        prefix = %config.api_prefix,
        "Loaded docgen configuration"
    );

    // --- Render ---
    let document = openapi::document(&config).context("Failed to render OpenAPI document")?;
    let text = if config.pretty {
        serde_json::to_string_pretty(&document)?
    } else {
        serde_json::to_string(&document)?
    };

    // --- Write ---
    match &config.output {
        Some(path) => {
            std::fs::write(path, text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "OpenAPI document written");
        }
        None => println!("{text}"),
    }

    Ok(())
}
