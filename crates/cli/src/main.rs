mod cli;

use anyhow::{Context, Result};
use clap::Parser;

use pagecite_core::{config, Config};
use pagecite_qa::{QaOptions, QaPipeline};

use crate::cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    config::load_dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let args = Cli::parse();
    let config = Config::from_env();

    match args.command {
        Command::Ask {
            file,
            question,
            top_k,
        } => {
            let base = QaPipeline::from_config(&config)
                .context("failed to build QA pipeline (check provider config)")?;
            let options = QaOptions {
                top_k,
                ..base.options().clone()
            };
            let mut pipeline = base.with_options(options);

            let response = pipeline
                .ask_file(&file, &question)
                .await
                .with_context(|| format!("question failed for {}", file.display()))?;

            println!("Answer:\n{}\n", response.answer);
            println!("Cited pages: {}", response.cited_pages);
        }

        Command::Scrape {
            urls_file,
            out,
            json,
        } => {
            let raw = std::fs::read_to_string(&urls_file)
                .with_context(|| format!("failed to read {}", urls_file.display()))?;
            let urls: Vec<String> = raw
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty() && !l.starts_with('#'))
                .map(String::from)
                .collect();
            anyhow::ensure!(!urls.is_empty(), "no URLs found in {}", urls_file.display());

            let out_dir = out.unwrap_or_else(|| config.scraper.out_dir.clone());
            let timeout = std::time::Duration::from_secs(config.scraper.request_timeout_secs);
            let report = pagecite_scraper::archive_blogs(&urls, &out_dir, timeout)
                .await
                .context("archiving run failed")?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for item in &report.items {
                    match &item.outcome {
                        pagecite_scraper::report::Outcome::Saved { path } => {
                            println!("[ok]   {} -> {}", item.url, path.display());
                        }
                        pagecite_scraper::report::Outcome::Failed { reason } => {
                            println!("[fail] {} ({reason})", item.url);
                        }
                    }
                }
                println!(
                    "\n{} saved, {} failed; archive: {}",
                    report.saved_count(),
                    report.failed_count(),
                    report
                        .archive_path
                        .as_deref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "(none)".to_string())
                );
            }
        }
    }

    Ok(())
}
