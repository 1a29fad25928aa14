use axum::{
    extract::{OriginalUri, State},
    Json,
};

use crate::middleware::request_path;

use super::{ApiError, AppState};

pub(super) async fn get_payment_methods(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
) -> Result<Json<serde_json::Value>, ApiError> {
    let dataset = state
        .catalog
        .load()
        .await
        .map_err(|e| ApiError::dataset(request_path(&uri), &e))?;

    if dataset.payment_methods.is_none() {
        tracing::debug!("dataset has no payment_methods section; serving empty catalog");
    }

    Ok(Json(dataset.payment_methods_or_empty()))
}
