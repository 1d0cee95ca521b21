//! Handler functions for the registration API.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use clubreg_adapters::Registrant;

use crate::api::AppState;
use crate::errors::AppError;
use crate::services::registration::RegistrationInput;

/// `POST /api/registrations` — run one submission attempt.
///
/// The confirmation echoes every submitted field plus the assigned serial.
pub async fn submit(
    State(state): State<AppState>,
    Json(input): Json<RegistrationInput>,
) -> Result<(StatusCode, Json<Registrant>), AppError> {
    let record = state.registration.submit(input).await?;
    Ok((StatusCode::CREATED, Json(record)))
}
