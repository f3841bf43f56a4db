use tokio::sync::RwLock;

use pagecite_core::Config;
use pagecite_qa::QaPipeline;

/// The currently uploaded document. One file per session; a new upload
/// replaces it.
pub struct UploadedDocument {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

pub struct AppState {
    pub config: Config,
    /// Pipeline is behind a write lock because its index cache mutates on
    /// every question; this also serializes concurrent questions against
    /// the shared uploaded file.
    pub pipeline: RwLock<QaPipeline>,
    pub document: RwLock<Option<UploadedDocument>>,
}

impl AppState {
    pub fn new(config: Config, pipeline: QaPipeline) -> Self {
        Self {
            config,
            pipeline: RwLock::new(pipeline),
            document: RwLock::new(None),
        }
    }
}
