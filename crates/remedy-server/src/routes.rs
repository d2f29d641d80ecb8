// ABOUTME: Route definitions for the remedy HTTP API.
// ABOUTME: Assembles all routes into one Axum Router with shared state, CORS, tracing, and optional API key auth.

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::app_state::SharedState;
use crate::auth::ApiKeyLayer;

/// Build the complete Axum router. When `api_key` is set, every mutating
/// request must present it in the X-API-KEY header.
pub fn create_router(state: SharedState, api_key: Option<String>) -> Router {
    let router = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/medicines", get(api::medicines::list_categories))
        .route(
            "/medicines/{disease}",
            get(api::medicines::list_medicines).post(api::medicines::create_medicine),
        )
        .route(
            "/medicines/{disease}/{idx}",
            get(api::medicines::get_medicine)
                .put(api::medicines::update_medicine)
                .delete(api::medicines::delete_medicine),
        )
        .route("/disease-medicines", get(api::medicines::recommended_medicines))
        .route("/disease-info", get(api::disease_info::list_diseases))
        .route("/disease-info/{name}", get(api::disease_info::get_disease_info))
        .route("/crud/disease-info", get(api::disease_info::list_diseases))
        .route(
            "/crud/disease-info/{name}",
            get(api::disease_info::get_disease_info).put(api::disease_info::update_disease_info),
        )
        .with_state(state);

    let router = match api_key {
        Some(key) => router.layer(ApiKeyLayer::new(key)),
        None => router,
    };

    router
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Service banner.
async fn root() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "service": "remedy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Health check handler. Returns 200 OK with a simple JSON body.
async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "ok", "message": "remedy is up and running" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_state::AppState;
    use axum::body::Body;
    use http::Request;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_state(dir: &tempfile::TempDir) -> SharedState {
        Arc::new(
            AppState::open(
                &dir.path().join("disease_medicines.json"),
                &dir.path().join("disease_info.json"),
            )
            .unwrap(),
        )
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let dir = tempfile::TempDir::new().unwrap();
        let app = create_router(test_state(&dir), None);
        let resp = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), 200);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn empty_store_lists_no_categories() {
        let dir = tempfile::TempDir::new().unwrap();
        let app = create_router(test_state(&dir), Some("key".to_string()));
        let resp = app
            .oneshot(Request::get("/medicines").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), 200);
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["available_diseases"], serde_json::json!([]));
    }
}
