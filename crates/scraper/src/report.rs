//! Per-item outcome reporting.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Outcome of one URL.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome {
    Saved { path: PathBuf },
    Failed { reason: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemReport {
    pub url: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl ItemReport {
    pub fn saved(url: String, path: PathBuf) -> Self {
        Self {
            url,
            outcome: Outcome::Saved { path },
        }
    }

    pub fn failed(url: String, reason: String) -> Self {
        Self {
            url,
            outcome: Outcome::Failed { reason },
        }
    }

    pub fn is_saved(&self) -> bool {
        matches!(self.outcome, Outcome::Saved { .. })
    }
}

/// The full run: every item's outcome plus the final archive path.
#[derive(Debug, Clone, Serialize)]
pub struct ArchiveReport {
    pub started_at: DateTime<Utc>,
    pub items: Vec<ItemReport>,
    pub archive_path: Option<PathBuf>,
}

impl ArchiveReport {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            items: Vec::new(),
            archive_path: None,
        }
    }

    pub fn push(&mut self, item: ItemReport) {
        self.items.push(item);
    }

    pub fn saved_count(&self) -> usize {
        self.items.iter().filter(|i| i.is_saved()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.items.len() - self.saved_count()
    }
}

impl Default for ArchiveReport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_saved_and_failed() {
        let mut report = ArchiveReport::new();
        report.push(ItemReport::saved(
            "https://a.example".to_string(),
            PathBuf::from("blog_01_a.txt"),
        ));
        report.push(ItemReport::failed(
            "https://b.example".to_string(),
            "HTTP 404".to_string(),
        ));
        report.push(ItemReport::saved(
            "https://c.example".to_string(),
            PathBuf::from("blog_03_c.txt"),
        ));

        assert_eq!(report.saved_count(), 2);
        assert_eq!(report.failed_count(), 1);
    }

    #[test]
    fn report_serializes_with_status_tags() {
        let mut report = ArchiveReport::new();
        report.push(ItemReport::failed(
            "https://x.example".to_string(),
            "timeout".to_string(),
        ));
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"status\":\"failed\""));
        assert!(json.contains("\"reason\":\"timeout\""));
    }
}
