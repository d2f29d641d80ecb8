// ABOUTME: Treatment record API handlers for listing, reading, creating, replacing, and deleting.
// ABOUTME: Indexes address the priority-sorted ledger and change after every write.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use remedy_core::RecordDraft;
use remedy_store::StoreError;
use serde::Deserialize;
use serde_json::{Value, json};

use super::with_store;
use crate::app_state::SharedState;
use crate::error::ApiError;

/// Query string for the legacy recommendation lookup.
#[derive(Debug, Deserialize)]
pub struct NameQuery {
    pub name: String,
}

/// GET /medicines - List all category keys.
pub async fn list_categories(State(state): State<SharedState>) -> Result<Json<Value>, ApiError> {
    let diseases = with_store(&state, |s| Ok(s.treatments.list_categories())).await?;
    Ok(Json(json!({ "available_diseases": diseases })))
}

/// GET /medicines/{disease} - List a category's records in priority order.
pub async fn list_medicines(
    State(state): State<SharedState>,
    Path(disease): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let (key, medicines) = with_store(&state, move |s| s.treatments.list_records(&disease)).await?;
    Ok(Json(json!({ "disease": key, "medicines": medicines })))
}

/// GET /medicines/{disease}/{idx} - Fetch one record by position.
pub async fn get_medicine(
    State(state): State<SharedState>,
    Path((disease, idx)): Path<(String, usize)>,
) -> Result<Json<Value>, ApiError> {
    let (key, medicine) = with_store(&state, move |s| s.treatments.get_record(&disease, idx)).await?;
    Ok(Json(json!({ "disease": key, "index": idx, "medicine": medicine })))
}

/// POST /medicines/{disease} - Add a record, creating the category if needed.
pub async fn create_medicine(
    State(state): State<SharedState>,
    Path(disease): Path<String>,
    Json(draft): Json<RecordDraft>,
) -> Result<impl IntoResponse, ApiError> {
    let placement =
        with_store(&state, move |s| s.treatments.create_record(&disease, draft)).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "disease": placement.category,
            "index": placement.index,
            "created": placement.record,
            "message": "Medicine added successfully",
        })),
    ))
}

/// PUT /medicines/{disease}/{idx} - Replace the record at a position.
pub async fn update_medicine(
    State(state): State<SharedState>,
    Path((disease, idx)): Path<(String, usize)>,
    Json(draft): Json<RecordDraft>,
) -> Result<Json<Value>, ApiError> {
    let placement =
        with_store(&state, move |s| s.treatments.update_record(&disease, idx, draft)).await?;
    Ok(Json(json!({
        "disease": placement.category,
        "index": placement.index,
        "updated": placement.record,
        "message": "Medicine updated successfully",
    })))
}

/// DELETE /medicines/{disease}/{idx} - Remove the record at a position.
pub async fn delete_medicine(
    State(state): State<SharedState>,
    Path((disease, idx)): Path<(String, usize)>,
) -> Result<Json<Value>, ApiError> {
    let (key, deleted) =
        with_store(&state, move |s| s.treatments.delete_record(&disease, idx)).await?;
    Ok(Json(json!({
        "disease": key,
        "index": idx,
        "deleted": deleted,
        "message": "Medicine deleted successfully",
    })))
}

/// GET /disease-medicines?name= - Recommended treatments for a disease.
/// A category with no records is reported as not found.
pub async fn recommended_medicines(
    State(state): State<SharedState>,
    Query(query): Query<NameQuery>,
) -> Result<Json<Value>, ApiError> {
    let (key, medicines) = with_store(&state, move |s| {
        let (key, medicines) = s.treatments.list_records(&query.name)?;
        if medicines.is_empty() {
            return Err(StoreError::CategoryNotFound {
                category: key,
                available: s.treatments.list_categories(),
            });
        }
        Ok((key, medicines))
    })
    .await?;
    Ok(Json(json!({ "name": key, "recommended_medicines": medicines })))
}
