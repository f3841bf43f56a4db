//! Blog archiver: download a list of article URLs, save each as a text
//! file, and zip the output directory.
//!
//! Best-effort per item — one bad URL never stops the run. Every item's
//! outcome is collected into an explicit report instead of being a printed
//! side effect.

pub mod archive;
pub mod article;
pub mod report;

use std::path::Path;
use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};
use url::Url;

use crate::article::{extract_article, sanitized_filename};
use crate::report::{ArchiveReport, ItemReport};

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("archive error: {0}")]
    Zip(String),
}

/// Download every URL into `out_dir` (one `.txt` per article), then zip the
/// directory to `<out_dir>.zip`.
///
/// Item failures are recorded in the report and skipped; only setup errors
/// (output directory, HTTP client, final zip) abort the run.
pub async fn archive_blogs(
    urls: &[String],
    out_dir: &Path,
    request_timeout: Duration,
) -> Result<ArchiveReport, ScrapeError> {
    std::fs::create_dir_all(out_dir)?;

    let client = reqwest::Client::builder()
        .timeout(request_timeout)
        .user_agent("pagecite-scraper/0.1")
        .build()?;

    let mut report = ArchiveReport::new();

    for (i, url) in urls.iter().enumerate() {
        let item_number = i + 1;
        match fetch_one(&client, url, out_dir, item_number).await {
            Ok(path) => {
                info!("Saved: {}", path.display());
                report.push(ItemReport::saved(url.clone(), path));
            }
            Err(reason) => {
                warn!("Failed to extract from {url}: {reason}");
                report.push(ItemReport::failed(url.clone(), reason));
            }
        }
    }

    let zip_path = archive::zip_directory(out_dir)?;
    info!("Zip file created: {}", zip_path.display());
    report.archive_path = Some(zip_path);

    Ok(report)
}

/// Fetch, parse, and save a single article. The error side is a plain
/// string: this is report material, not something callers match on.
async fn fetch_one(
    client: &reqwest::Client,
    raw_url: &str,
    out_dir: &Path,
    item_number: usize,
) -> Result<std::path::PathBuf, String> {
    let url = Url::parse(raw_url).map_err(|e| format!("invalid URL: {e}"))?;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| format!("request failed: {e}"))?;

    if !response.status().is_success() {
        return Err(format!("HTTP {}", response.status()));
    }

    let html = response
        .text()
        .await
        .map_err(|e| format!("body read failed: {e}"))?;

    let article = extract_article(&html);
    if article.body.trim().is_empty() {
        return Err("no article text extracted".to_string());
    }

    let title = article
        .title
        .clone()
        .unwrap_or_else(|| format!("blog_{item_number}"));
    let filename = sanitized_filename(item_number, &title);
    let path = out_dir.join(filename);

    let contents = format!("{}\n\n{}", title, article.body.trim());
    std::fs::write(&path, contents).map_err(|e| format!("write failed: {e}"))?;

    Ok(path)
}
