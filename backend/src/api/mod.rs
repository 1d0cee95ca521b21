//! Central module for organizing the application's HTTP endpoints.
//!
//! This module assembles the router from the per-domain route modules
//! (registration, admin) and carries the shared application state: the
//! injected store handle, the services built on it, and the authenticator.

pub mod admin;
pub mod registration;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use clubreg_adapters::SheetStore;

use crate::auth::Authenticator;
use crate::services::registration::RegistrationService;
use crate::services::roster::RosterService;

#[derive(Clone)]
pub struct AppState {
    pub registration: Arc<RegistrationService>,
    pub roster: Arc<RosterService>,
    pub authenticator: Arc<dyn Authenticator>,
}

/// Build the application router with all routes and middleware attached.
pub fn app(store: Arc<dyn SheetStore>, authenticator: Arc<dyn Authenticator>) -> Router {
    let state = AppState {
        registration: Arc::new(RegistrationService::new(store.clone())),
        roster: Arc::new(RosterService::new(store)),
        authenticator,
    };

    Router::new()
        .route("/", get(root_handler))
        .merge(registration::routes::router())
        .merge(admin::routes::router(state.clone()))
        .with_state(state)
}

async fn root_handler() -> &'static str {
    "Welcome to clubreg!"
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use clubreg_adapters::InMemorySheetStore;
    use tower::util::ServiceExt;

    use super::*;
    use crate::auth::{SharedSecretAuthenticator, ADMIN_SECRET_HEADER};
    use crate::export::{PDF_MIME, XLSX_MIME};

    fn test_app() -> Router {
        app(
            Arc::new(InMemorySheetStore::new()),
            Arc::new(SharedSecretAuthenticator::new("sesame".to_string())),
        )
    }

    fn registration_request(name: &str, register_no: &str) -> Request<Body> {
        let body = serde_json::json!({
            "name": name,
            "register_no": register_no,
            "email": "member@example.com",
            "mobile": "9876543210",
            "gender": "Male",
            "stay_type": "Hostel",
            "department": "CSE",
            "interests": ["AI"],
            "languages": ["Python"],
        });
        Request::builder()
            .method("POST")
            .uri("/api/registrations")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn admin_request(uri: &str, secret: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(secret) = secret {
            builder = builder.header(ADMIN_SECRET_HEADER, secret);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn registration_conflicts_on_duplicate_register_no() {
        let app = test_app();

        let response = app
            .clone()
            .oneshot(registration_request("Asha", "21CS001"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .clone()
            .oneshot(registration_request("Ravi", "21CS001"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = app
            .oneshot(registration_request("Ravi", "21CS002"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let payload: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(payload["serial_no"], 2);
    }

    #[tokio::test]
    async fn admin_routes_need_the_shared_secret() {
        let app = test_app();

        let response = app
            .clone()
            .oneshot(admin_request("/api/admin/members", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app
            .clone()
            .oneshot(admin_request("/api/admin/members", Some("wrong")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app
            .oneshot(admin_request("/api/admin/members", Some("sesame")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn exports_carry_download_headers() {
        let app = test_app();

        let response = app
            .clone()
            .oneshot(admin_request("/api/admin/export/xlsx", Some("sesame")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE].to_str().unwrap(),
            XLSX_MIME
        );
        assert!(response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .contains("coding_club_members.xlsx"));

        let response = app
            .oneshot(admin_request("/api/admin/export/pdf", Some("sesame")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE].to_str().unwrap(),
            PDF_MIME
        );
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn blank_required_fields_are_unprocessable() {
        let app = test_app();
        let response = app
            .oneshot(registration_request("", "21CS001"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
