//! Product catalog route handlers.
//!
//! Products are addressed by the `?id=` query parameter. None of these
//! routes require a session.

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::db::ProductRepository;
use crate::error::{AppError, Result};
use crate::extract::{JsonBody, ProductIdQuery, QueryParams};
use crate::models::{Product, ProductInput};
use crate::state::AppState;

/// Fetch one product.
pub async fn show(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ProductIdQuery>,
) -> Result<Json<Product>> {
    let id = query.product_id()?;

    ProductRepository::new(state.pool())
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Product not found".to_owned()))
}

/// List all products in id order.
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = ProductRepository::new(state.pool()).list().await?;
    Ok(Json(products))
}

/// Create a product; `Location` points at the new record.
pub async fn add(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<ProductInput>,
) -> Result<impl IntoResponse> {
    let input = input.validate()?;
    let id = ProductRepository::new(state.pool()).create(&input).await?;

    tracing::info!(product_id = %id, name = %input.name, "Product created");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/product/?id={id}"))],
        "Product inserted successfully",
    ))
}

/// Overwrite a product's fields.
///
/// An id with no matching row is not an error.
pub async fn update(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ProductIdQuery>,
    JsonBody(input): JsonBody<ProductInput>,
) -> Result<&'static str> {
    let id = query.product_id()?;
    let input = input.validate()?;

    let changed = ProductRepository::new(state.pool())
        .update(id, &input)
        .await?;
    tracing::info!(product_id = %id, changed, "Product updated");

    Ok("Product updated successfully")
}

/// Delete a product. Deleting an unknown id succeeds.
pub async fn remove(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ProductIdQuery>,
) -> Result<&'static str> {
    let id = query.product_id()?;

    let removed = ProductRepository::new(state.pool()).delete(id).await?;
    tracing::info!(product_id = %id, removed, "Product deleted");

    Ok("Product deleted successfully")
}
