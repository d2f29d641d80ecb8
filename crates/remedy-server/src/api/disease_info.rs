// ABOUTME: Disease info API handlers for listing, reading, and replacing metadata entries.
// ABOUTME: Only existing keys can be replaced; entries are never created or deleted over HTTP.

use axum::Json;
use axum::extract::{Path, State};
use remedy_core::DiseaseInfo;
use serde_json::{Value, json};

use super::with_store;
use crate::app_state::SharedState;
use crate::error::ApiError;

/// GET /disease-info - List all disease keys.
pub async fn list_diseases(State(state): State<SharedState>) -> Result<Json<Value>, ApiError> {
    let diseases = with_store(&state, |s| Ok(s.disease_info.list_categories())).await?;
    Ok(Json(json!({ "available_diseases": diseases })))
}

/// GET /disease-info/{name} - Read one entry.
pub async fn get_disease_info(
    State(state): State<SharedState>,
    Path(name): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let (key, info) = with_store(&state, move |s| s.disease_info.get(&name)).await?;
    Ok(Json(json!({ "disease": key, "info": info })))
}

/// PUT /crud/disease-info/{name} - Replace an existing entry.
pub async fn update_disease_info(
    State(state): State<SharedState>,
    Path(name): Path<String>,
    Json(info): Json<DiseaseInfo>,
) -> Result<Json<Value>, ApiError> {
    let (key, info) = with_store(&state, move |s| s.disease_info.update(&name, info)).await?;
    Ok(Json(json!({
        "disease": key,
        "updated": info,
        "message": "Disease info updated successfully",
    })))
}

#[cfg(test)]
mod tests {
    use crate::app_state::{AppState, SharedState};
    use crate::routes::create_router;
    use axum::body::Body;
    use axum::http::StatusCode;
    use http::Request;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn seeded_state(dir: &tempfile::TempDir) -> SharedState {
        let info_path = dir.path().join("disease_info.json");
        let seed = serde_json::json!({
            "blast": {
                "disease_name": "Rice Blast",
                "description": "Diamond-shaped lesions"
            }
        });
        std::fs::write(&info_path, serde_json::to_vec(&seed).unwrap()).unwrap();
        Arc::new(AppState::open(&dir.path().join("disease_medicines.json"), &info_path).unwrap())
    }

    async fn send(
        state: &SharedState,
        api_key: Option<&str>,
        req: Request<Body>,
    ) -> (StatusCode, serde_json::Value) {
        let app = create_router(Arc::clone(state), api_key.map(str::to_string));
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null))
    }

    fn update_request(key: Option<&str>) -> Request<Body> {
        let mut builder = Request::put("/crud/disease-info/blast").header("content-type", "application/json");
        if let Some(key) = key {
            builder = builder.header("X-API-KEY", key);
        }
        let body = serde_json::json!({
            "disease_name": "Rice Blast",
            "description": "Updated",
            "prevention": ["burn stubble"]
        });
        builder.body(Body::from(serde_json::to_vec(&body).unwrap())).unwrap()
    }

    #[tokio::test]
    async fn both_listing_routes_agree() {
        let dir = tempfile::TempDir::new().unwrap();
        let state = seeded_state(&dir);

        for uri in ["/disease-info", "/crud/disease-info"] {
            let (status, json) = send(&state, None, Request::get(uri).body(Body::empty()).unwrap()).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(json["available_diseases"], serde_json::json!(["blast"]));
        }
    }

    #[tokio::test]
    async fn get_unknown_disease_returns_404() {
        let dir = tempfile::TempDir::new().unwrap();
        let state = seeded_state(&dir);

        let (status, json) = send(
            &state,
            None,
            Request::get("/disease-info/tungro").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["available"], serde_json::json!(["blast"]));
    }

    #[tokio::test]
    async fn update_requires_key_when_configured() {
        let dir = tempfile::TempDir::new().unwrap();
        let state = seeded_state(&dir);

        let (status, _) = send(&state, Some("secret"), update_request(None)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, json) = send(&state, Some("secret"), update_request(Some("secret"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["updated"]["description"], "Updated");

        let (_, json) = send(
            &state,
            Some("secret"),
            Request::get("/crud/disease-info/blast").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(json["info"]["prevention"], serde_json::json!(["burn stubble"]));
    }

    #[tokio::test]
    async fn update_accepts_null_lists() {
        let dir = tempfile::TempDir::new().unwrap();
        let state = seeded_state(&dir);
        let body = serde_json::json!({
            "disease_name": "Rice Blast",
            "description": "Updated",
            "symptoms": null,
            "care": null
        });
        let req = Request::put("/crud/disease-info/blast")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap();

        let (status, json) = send(&state, None, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["updated"]["symptoms"], serde_json::json!([]));
    }
}
