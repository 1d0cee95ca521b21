//! Route definitions for the admin API.
//!
//! Every route here sits behind the admin authenticator middleware.

use axum::middleware;
use axum::routing::get;
use axum::Router;

use crate::api::AppState;
use crate::auth::require_admin;

pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/admin/members", get(super::handlers::list_members))
        .route("/api/admin/export/xlsx", get(super::handlers::export_xlsx))
        .route("/api/admin/export/pdf", get(super::handlers::export_pdf))
        .layer(middleware::from_fn_with_state(state, require_admin))
}
