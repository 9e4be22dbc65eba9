//! Product endpoints.

use crate::{
    api::AppState,
    core::{
        product::{self, ProductOutcome},
        validation::ProductInput,
    },
    entities::{order::Model as OrderModel, product::Model as ProductModel},
    errors::{Error, Result},
};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};

/// Routes mounted under `/products`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/{id}/orders", get(product_orders))
}

fn saved(outcome: ProductOutcome) -> Result<ProductModel> {
    match outcome {
        ProductOutcome::Saved(product) => Ok(product),
        ProductOutcome::Rejected(errors) => Err(Error::Validation { errors }),
    }
}

async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<ProductModel>>> {
    Ok(Json(product::get_all_products(state.db()).await?))
}

async fn create_product(
    State(state): State<AppState>,
    Json(input): Json<ProductInput>,
) -> Result<(StatusCode, Json<ProductModel>)> {
    let product = saved(product::create_product(state.db(), input).await?)?;
    Ok((StatusCode::CREATED, Json(product)))
}

async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ProductModel>> {
    product::get_product_by_id(state.db(), id)
        .await?
        .map(Json)
        .ok_or(Error::ProductNotFound { id })
}

async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<ProductInput>,
) -> Result<Json<ProductModel>> {
    let product = saved(product::update_product(state.db(), id, input).await?)?;
    Ok(Json(product))
}

async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    product::delete_product(state.db(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn product_orders(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<OrderModel>>> {
    Ok(Json(product::orders_for_product(state.db(), id).await?))
}
