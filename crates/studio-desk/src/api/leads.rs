use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use super::API_PREFIX;
use crate::backend::Backend;
use crate::error::AppError;
use crate::leads::{write_leads_csv, ImportOutcome, ImportPreview, LeadCsvImporter};

/// Uploaded spreadsheet as sent by the import dialog.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportRequest {
    pub file_name: String,
    pub content: String,
}

pub(crate) fn lead_router(backend: Backend) -> Router {
    Router::new()
        .route(
            &format!("{API_PREFIX}/leads/import/preview"),
            post(preview_handler),
        )
        .route(&format!("{API_PREFIX}/leads/import"), post(import_handler))
        .route(&format!("{API_PREFIX}/leads/export"), get(export_handler))
        .with_state(backend)
}

async fn preview_handler(
    Json(request): Json<ImportRequest>,
) -> Result<Json<ImportPreview>, AppError> {
    let preview = LeadCsvImporter::preview(&request.file_name, &request.content)?;
    Ok(Json(preview))
}

async fn import_handler(
    State(backend): State<Backend>,
    Json(request): Json<ImportRequest>,
) -> Result<(StatusCode, Json<ImportOutcome>), AppError> {
    let preview = LeadCsvImporter::preview(&request.file_name, &request.content)?;
    let outcome = LeadCsvImporter::commit(&backend.leads, preview).await?;
    Ok((StatusCode::CREATED, Json(outcome)))
}

async fn export_handler(State(backend): State<Backend>) -> Result<impl IntoResponse, AppError> {
    let leads = backend.leads.list().await?;
    let mut body = Vec::new();
    write_leads_csv(&mut body, &leads).map_err(std::io::Error::from)?;

    Ok((
        [
            (header::CONTENT_TYPE, mime::TEXT_CSV_UTF_8.as_ref()),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"leads.csv\""),
        ],
        body,
    ))
}
