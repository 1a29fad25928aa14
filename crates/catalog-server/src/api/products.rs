use axum::{
    extract::{OriginalUri, State},
    Extension, Json,
};
use catalog_core::{Product, ProductSummary};

use crate::middleware::{request_path, RequestId};

use super::product_id::ProductId;
use super::query::{ListQuery, RelatedQuery};
use super::{ApiError, AppState};

pub(super) async fn list_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    OriginalUri(uri): OriginalUri,
    ListQuery(params): ListQuery,
) -> Result<Json<Vec<ProductSummary>>, ApiError> {
    let dataset = state
        .catalog
        .load()
        .await
        .map_err(|e| ApiError::dataset(request_path(&uri), &e))?;

    let data = catalog_core::list_products(&dataset.products, &params);
    tracing::debug!(
        request_id = %req_id.0,
        search = params.search.as_deref().unwrap_or(""),
        offset = params.offset,
        limit = params.limit,
        returned = data.len(),
        "listed products"
    );

    Ok(Json(data))
}

pub(super) async fn get_product(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    OriginalUri(uri): OriginalUri,
    ProductId(product_id): ProductId,
) -> Result<Json<Product>, ApiError> {
    let path = request_path(&uri);
    let dataset = state
        .catalog
        .load()
        .await
        .map_err(|e| ApiError::dataset(path.clone(), &e))?;

    let Some(product) = catalog_core::resolve_product(&dataset.products, &product_id) else {
        tracing::warn!(request_id = %req_id.0, product_id = %product_id, "product not found");
        return Err(ApiError::product_not_found(path, &product_id));
    };
    catalog_core::check_product(product).map_err(|e| ApiError::dataset(path, &e))?;

    Ok(Json(product.clone()))
}

pub(super) async fn list_related_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    OriginalUri(uri): OriginalUri,
    ProductId(product_id): ProductId,
    RelatedQuery { limit }: RelatedQuery,
) -> Result<Json<Vec<ProductSummary>>, ApiError> {
    let path = request_path(&uri);
    let dataset = state
        .catalog
        .load()
        .await
        .map_err(|e| ApiError::dataset(path.clone(), &e))?;

    let Some(base) = catalog_core::resolve_product(&dataset.products, &product_id) else {
        tracing::warn!(request_id = %req_id.0, product_id = %product_id, "related: base product not found");
        return Err(ApiError::product_not_found(path, &product_id));
    };

    Ok(Json(catalog_core::related_products(
        &dataset.products,
        base,
        limit,
    )))
}
