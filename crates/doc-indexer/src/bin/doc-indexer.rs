//! Index a PDF or DOCX file into PostgreSQL (pgvector)
//!
//! Run with: cargo run -p doc-indexer -- path/to/file.pdf

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

use doc_indexer::{IndexOutcome, IndexPipeline, IndexerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "doc-indexer",
    version,
    about = "Index PDF/DOCX into PostgreSQL (pgvector)."
)]
struct Cli {
    /// Path to a PDF or DOCX file to index
    path: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // A missing .env file is fine; the process environment still applies.
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "doc_indexer=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = IndexerConfig::from_env().context("failed to load configuration")?;
    let pipeline = IndexPipeline::from_config(&config)?;

    let outcome = pipeline
        .index_file(&cli.path)
        .await
        .with_context(|| format!("failed to index {}", cli.path.display()))?;

    match outcome {
        IndexOutcome::NothingToIndex { .. } => {
            println!("No text extracted from the file. Nothing to index.");
        }
        IndexOutcome::Indexed(report) => {
            println!(
                "Extracted {} chars -> {} chunks (size={}, overlap={}).",
                report.chars, report.chunks, report.chunk_size, report.overlap
            );
            println!("Created {} embeddings. dims={}", report.chunks, report.dimensions);
            println!("Inserted {} into {} successfully.", report.filename, report.destination);
        }
    }

    Ok(())
}
