use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use gleaner_core::ExtractionPipeline;

#[derive(Parser)]
#[command(
    name = "glean",
    about = "Extract KPIs, dates, and organizations from weekly operations reports",
    version
)]
struct Cli {
    /// Report document to process (.docx, .md, or .txt)
    input: PathBuf,

    /// Companion markdown file used when the primary document cannot be read
    #[arg(long)]
    fallback: Option<PathBuf>,

    /// Where to write the extraction report
    #[arg(short, long, default_value = "entities.json")]
    output: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    println!("Processing: {}", cli.input.display());

    let pipeline = ExtractionPipeline::new()?;
    let report = pipeline.run(&cli.input, cli.fallback.as_deref()).await?;

    if let Some(parent) = cli.output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating output directory {}", parent.display()))?;
        }
    }
    let json = serde_json::to_string_pretty(&report)?;
    std::fs::write(&cli.output, json)
        .with_context(|| format!("writing {}", cli.output.display()))?;

    println!("Results saved to: {}", cli.output.display());
    println!(
        "Total entities extracted: {}",
        report.statistics.total_entities
    );

    Ok(())
}
