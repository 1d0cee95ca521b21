//! Handler functions for the admin roster and export API.
//!
//! Export handlers re-serialize from the current store snapshot on every
//! request; nothing is cached server-side.

use axum::extract::State;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::api::AppState;
use crate::errors::AppError;
use crate::export::{PDF_FILE_NAME, PDF_MIME, XLSX_FILE_NAME, XLSX_MIME};
use crate::services::roster::MemberRoster;

/// `GET /api/admin/members` — every stored record, oldest first.
pub async fn list_members(
    State(state): State<AppState>,
) -> Result<Json<MemberRoster>, AppError> {
    Ok(Json(state.roster.list().await?))
}

/// `GET /api/admin/export/xlsx`
pub async fn export_xlsx(State(state): State<AppState>) -> Result<Response, AppError> {
    let bytes = state.roster.export_xlsx().await?;
    Ok(download(XLSX_MIME, XLSX_FILE_NAME, bytes))
}

/// `GET /api/admin/export/pdf`
pub async fn export_pdf(State(state): State<AppState>) -> Result<Response, AppError> {
    let bytes = state.roster.export_pdf().await?;
    Ok(download(PDF_MIME, PDF_FILE_NAME, bytes))
}

fn download(mime: &'static str, file_name: &str, bytes: Vec<u8>) -> Response {
    (
        [
            (CONTENT_TYPE, mime.to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        bytes,
    )
        .into_response()
}
