//! Shared test utilities.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{
        order::OrderOutcome,
        product::{ProductOutcome, create_product},
        validation::{OrderInput, ProductInput},
    },
    entities::{order, product},
    errors::Result,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

/// Order date used by test orders; always in the past.
pub fn test_order_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 15).unwrap_or_default()
}

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Product input with sensible defaults.
///
/// # Defaults
/// * price: 99.99
/// * `stock_quantity`: 10
/// * category: "Accessories"
pub fn product_input(name: &str, sku: &str) -> ProductInput {
    ProductInput {
        name: name.to_string(),
        sku: sku.to_string(),
        description: Some("Test description".to_string()),
        price: Decimal::new(9_999, 2),
        stock_quantity: 10,
        category: "Accessories".to_string(),
    }
}

/// Order input with sensible defaults (quantity 1, ordered on [`test_order_date`], not delivered).
pub fn order_input(product_id: i64, order_number: &str, email: &str) -> OrderInput {
    OrderInput {
        product_id,
        order_number: order_number.to_string(),
        customer_name: "Hoàng Văn E".to_string(),
        customer_email: email.to_string(),
        quantity: 1,
        order_date: test_order_date(),
        delivery_date: None,
    }
}

/// Unwraps a saved product, panicking on rejection.
pub fn expect_saved_product(outcome: ProductOutcome) -> product::Model {
    match outcome {
        ProductOutcome::Saved(product) => product,
        ProductOutcome::Rejected(errors) => panic!("product rejected: {errors:?}"),
    }
}

/// Unwraps a saved order, panicking on rejection.
pub fn expect_saved_order(outcome: OrderOutcome) -> order::Model {
    match outcome {
        OrderOutcome::Saved(order) => order,
        OrderOutcome::Rejected(errors) => panic!("order rejected: {errors:?}"),
    }
}

/// Creates a test product through the service with the defaults of [`product_input`].
pub async fn create_test_product(
    db: &DatabaseConnection,
    name: &str,
    sku: &str,
) -> Result<product::Model> {
    Ok(expect_saved_product(
        create_product(db, product_input(name, sku)).await?,
    ))
}

/// Inserts an order row directly, bypassing validation.
pub async fn create_test_order(
    db: &DatabaseConnection,
    product_id: i64,
    order_number: &str,
    email: &str,
) -> Result<order::Model> {
    create_test_order_for(db, product_id, order_number, "Hoàng Văn E", email).await
}

/// Inserts an order row directly with a custom customer name.
/// The order date is taken from the `YYYYMMDD` part of `order_number`.
pub async fn create_test_order_for(
    db: &DatabaseConnection,
    product_id: i64,
    order_number: &str,
    customer_name: &str,
    email: &str,
) -> Result<order::Model> {
    let order_date = order_number
        .get(4..12)
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y%m%d").ok())
        .unwrap_or_else(test_order_date);
    let now = chrono::Utc::now().naive_utc();

    let order = order::ActiveModel {
        product_id: Set(product_id),
        order_number: Set(order_number.to_string()),
        customer_name: Set(customer_name.to_string()),
        customer_email: Set(email.to_string()),
        quantity: Set(1),
        order_date: Set(order_date),
        delivery_date: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    Ok(order.insert(db).await?)
}

/// Sets up a complete test environment with one product (stock 10).
/// Returns (db, product) for common test scenarios.
pub async fn setup_with_product() -> Result<(DatabaseConnection, product::Model)> {
    let db = setup_test_db().await?;
    let product = create_test_product(&db, "Test Product", "TEST-SKU").await?;
    Ok((db, product))
}
