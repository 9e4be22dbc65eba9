//! Order endpoints.

use crate::{
    api::AppState,
    core::{
        order::{
            self, DateCheck, OrderOutcome, OrderPage, OrderQuery, OrderWithProduct, StockCheck,
        },
        order_number::{is_order_number_unique, is_valid_order_number_format},
        pagination::Pagination,
        validation::OrderInput,
    },
    entities::order::Model as OrderModel,
    errors::{Error, Result},
};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Query string of `GET /orders`
#[derive(Debug, Default, Deserialize)]
pub struct ListOrdersParams {
    /// 1-based page number
    pub page: Option<u64>,
    /// Orders per page
    pub page_size: Option<u64>,
    /// Substring filter
    pub search: Option<String>,
}

/// Body of `POST /orders/validate/stock`
#[derive(Debug, Deserialize)]
pub struct StockRequest {
    /// Product to check
    pub product_id: i64,
    /// Requested units
    pub quantity: i32,
}

/// Body of `POST /orders/validate/dates`
#[derive(Debug, Deserialize)]
pub struct DatesRequest {
    /// Day the order is placed
    pub order_date: NaiveDate,
    /// Day of delivery, if any
    #[serde(default)]
    pub delivery_date: Option<NaiveDate>,
}

/// Response of `GET /orders/number/{order_number}/available`
#[derive(Debug, Serialize, Deserialize)]
pub struct OrderNumberAvailability {
    /// Matches `ORD-YYYYMMDD-NNNN` with a real date
    pub valid_format: bool,
    /// Not used by any stored order
    pub unique: bool,
}

/// Response of `GET /orders`: the page plus navigation flags
#[derive(Debug, Serialize)]
pub struct OrderListResponse {
    /// The served page
    #[serde(flatten)]
    pub page: OrderPage,
    /// Pages needed for all matching orders
    pub total_pages: u64,
    /// Whether a previous page exists
    pub has_previous: bool,
    /// Whether a next page exists
    pub has_next: bool,
}

impl From<OrderPage> for OrderListResponse {
    fn from(page: OrderPage) -> Self {
        Self {
            total_pages: page.total_pages(),
            has_previous: page.has_previous(),
            has_next: page.has_next(),
            page,
        }
    }
}

/// Routes mounted under `/orders`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route(
            "/{id}",
            get(get_order).put(update_order).delete(delete_order),
        )
        .route("/number/{order_number}/available", get(order_number_available))
        .route("/validate/stock", post(validate_stock))
        .route("/validate/dates", post(validate_dates))
}

fn saved(outcome: OrderOutcome) -> Result<OrderModel> {
    match outcome {
        OrderOutcome::Saved(order) => Ok(order),
        OrderOutcome::Rejected(errors) => Err(Error::Validation { errors }),
    }
}

async fn list_orders(
    State(state): State<AppState>,
    Query(params): Query<ListOrdersParams>,
) -> Result<Json<OrderListResponse>> {
    let query = OrderQuery {
        pagination: Pagination::new(
            params.page,
            Some(
                params
                    .page_size
                    .filter(|&size| size > 0)
                    .unwrap_or(state.default_page_size),
            ),
        ),
        search: params.search,
    };
    let page = order::get_orders(state.db(), &query).await?;
    Ok(Json(page.into()))
}

async fn create_order(
    State(state): State<AppState>,
    Json(input): Json<OrderInput>,
) -> Result<(StatusCode, Json<OrderModel>)> {
    let order = saved(order::create_order(state.db(), input).await?)?;
    Ok((StatusCode::CREATED, Json(order)))
}

async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<OrderWithProduct>> {
    order::get_order_by_id(state.db(), id)
        .await?
        .map(Json)
        .ok_or(Error::OrderNotFound { id })
}

async fn update_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<OrderInput>,
) -> Result<Json<OrderModel>> {
    let order = saved(order::update_order(state.db(), id, input).await?)?;
    Ok(Json(order))
}

async fn delete_order(State(state): State<AppState>, Path(id): Path<i64>) -> Result<StatusCode> {
    order::delete_order(state.db(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn order_number_available(
    State(state): State<AppState>,
    Path(order_number): Path<String>,
) -> Result<Json<OrderNumberAvailability>> {
    let number = Some(order_number.as_str());
    Ok(Json(OrderNumberAvailability {
        valid_format: is_valid_order_number_format(number),
        unique: is_order_number_unique(state.db(), number).await?,
    }))
}

async fn validate_stock(
    State(state): State<AppState>,
    Json(request): Json<StockRequest>,
) -> Result<Json<StockCheck>> {
    let check =
        order::validate_product_and_stock(state.db(), request.product_id, request.quantity)
            .await?;
    Ok(Json(check))
}

async fn validate_dates(Json(request): Json<DatesRequest>) -> Json<DateCheck> {
    Json(order::validate_dates(request.order_date, request.delivery_date))
}
