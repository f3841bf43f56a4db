use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use pagecite_qa::PipelineError;

use crate::state::{AppState, UploadedDocument};

// ── Request/Response types ────────────────────────

#[derive(Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct UploadResponse {
    pub filename: String,
    pub file_size: usize,
    pub page_count: usize,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct AskResponse {
    pub answer: String,
    /// Ascending comma-separated page list, or "N/A".
    pub cited_pages: String,
    pub source_count: usize,
}

// ── GET /health ───────────────────────────────────

#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// ── POST /documents/upload ────────────────────────

/// Upload the PDF to ask questions against
///
/// Accepts multipart/form-data with one file field. The PDF is validated
/// (loaded into pages) immediately; embedding happens lazily on the first
/// question.
#[utoipa::path(
    post,
    path = "/documents/upload",
    tag = "Documents",
    request_body(content_type = "multipart/form-data", description = "PDF upload"),
    responses(
        (status = 200, description = "Document accepted", body = UploadResponse),
        (status = 400, description = "Upload or extraction error", body = String)
    )
)]
pub async fn upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, (StatusCode, String)> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("Multipart error: {e}")))?
        .ok_or((StatusCode::BAD_REQUEST, "No file provided".to_string()))?;

    let filename = field.file_name().unwrap_or("uploaded.pdf").to_string();
    let bytes = field
        .bytes()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("Failed to read file: {e}")))?
        .to_vec();

    let pages = pagecite_ingest::load_pdf_bytes(&bytes)
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("Not a usable PDF: {e}")))?;

    info!("Accepted '{}': {} pages, {} bytes", filename, pages.len(), bytes.len());

    let response = UploadResponse {
        filename: filename.clone(),
        file_size: bytes.len(),
        page_count: pages.len(),
    };

    *state.document.write().await = Some(UploadedDocument {
        filename,
        bytes,
        page_count: pages.len(),
    });

    Ok(Json(response))
}

// ── POST /ask ─────────────────────────────────────

/// Ask a question about the uploaded PDF
///
/// Runs the full load → split → embed → index → retrieve → generate chain
/// (the index is cached per file content, so repeat questions skip the
/// rebuild) and returns the answer with cited page numbers.
#[utoipa::path(
    post,
    path = "/ask",
    tag = "Questions",
    request_body = AskRequest,
    responses(
        (status = 200, description = "Answer with citations", body = AskResponse),
        (status = 409, description = "No document uploaded yet", body = String),
        (status = 502, description = "Embedding or generation backend failed", body = String)
    )
)]
pub async fn ask(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>, (StatusCode, String)> {
    let document = state.document.read().await;
    let doc = document
        .as_ref()
        .ok_or((StatusCode::CONFLICT, "Upload a PDF first".to_string()))?;
    info!(
        "Question against '{}' ({} pages)",
        doc.filename, doc.page_count
    );

    let mut pipeline = state.pipeline.write().await;
    let response = pipeline
        .ask_bytes(&doc.bytes, &request.question)
        .await
        .map_err(map_pipeline_error)?;

    Ok(Json(AskResponse {
        answer: response.answer,
        cited_pages: response.cited_pages,
        source_count: response.sources.len(),
    }))
}

fn map_pipeline_error(err: PipelineError) -> (StatusCode, String) {
    let status = match err {
        PipelineError::Load(_) => StatusCode::BAD_REQUEST,
        PipelineError::Index(_) => StatusCode::INTERNAL_SERVER_ERROR,
        PipelineError::Embedding(_) | PipelineError::Generation(_) => StatusCode::BAD_GATEWAY,
    };
    (status, err.to_string())
}
