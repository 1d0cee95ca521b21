//! Route definitions for the registration API.

use axum::routing::post;
use axum::Router;

use crate::api::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/registrations", post(super::handlers::submit))
}
