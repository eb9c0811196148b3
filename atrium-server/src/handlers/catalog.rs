use axum::{Json, extract::State};

use atrium_model::CatalogEntry;

use crate::infra::{app_state::AppState, errors::AppResult};

/// Full catalog in creation order. Filtering happens client-side.
pub async fn list_images_handler(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<CatalogEntry>>> {
    let entries = state.catalog.list_all().await?;
    Ok(Json(entries))
}
