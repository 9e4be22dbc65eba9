//! Product business logic - Lookups and full-field product maintenance.
//!
//! Lookups are read-only. Name and SKU uniqueness are not checked before writing;
//! the unique indexes reject duplicates and the error surfaces as
//! [`Error::Conflict`]. Deleting a product that still has orders is rejected the
//! same way by the restrict foreign key.

use crate::{
    core::validation::{FieldError, ProductInput, validate_product_input},
    entities::{Order, Product, order, product},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{info, instrument};

/// Result of a product write that passed or failed field validation
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProductOutcome {
    /// Stored product
    Saved(product::Model),
    /// Field rules that failed; nothing was written
    Rejected(Vec<FieldError>),
}

/// Retrieves all products ordered alphabetically by name.
pub async fn get_all_products<C>(db: &C) -> Result<Vec<product::Model>>
where
    C: ConnectionTrait,
{
    Product::find()
        .order_by_asc(product::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific product by its unique ID, or `None` if there is no such row.
pub async fn get_product_by_id<C>(db: &C, product_id: i64) -> Result<Option<product::Model>>
where
    C: ConnectionTrait,
{
    Product::find_by_id(product_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists the orders placed for a product, most recent first.
///
/// # Errors
/// Returns [`Error::ProductNotFound`] if the product does not exist.
pub async fn orders_for_product<C>(db: &C, product_id: i64) -> Result<Vec<order::Model>>
where
    C: ConnectionTrait,
{
    let product = get_product_by_id(db, product_id)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?;

    product
        .find_related(Order)
        .order_by_desc(order::Column::OrderDate)
        .order_by_desc(order::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

fn trimmed_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}

/// Creates a product after field validation.
///
/// # Errors
/// Returns [`Error::Conflict`] when the name or SKU is already taken.
#[instrument(skip(db, input), fields(sku = %input.sku))]
pub async fn create_product<C>(db: &C, input: ProductInput) -> Result<ProductOutcome>
where
    C: ConnectionTrait,
{
    let errors = validate_product_input(&input);
    if !errors.is_empty() {
        return Ok(ProductOutcome::Rejected(errors));
    }

    let now = chrono::Utc::now().naive_utc();
    let product = product::ActiveModel {
        name: Set(input.name.trim().to_string()),
        sku: Set(input.sku.trim().to_string()),
        description: Set(trimmed_description(input.description)),
        price: Set(input.price),
        stock_quantity: Set(input.stock_quantity),
        category: Set(input.category.trim().to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let saved = product.insert(db).await?;
    info!(product_id = saved.id, "product created");
    Ok(ProductOutcome::Saved(saved))
}

/// Replaces every editable field of a product.
///
/// # Errors
/// Returns [`Error::ProductNotFound`] if the product does not exist and
/// [`Error::Conflict`] when the new name or SKU is already taken.
#[instrument(skip(db, input))]
pub async fn update_product<C>(
    db: &C,
    product_id: i64,
    input: ProductInput,
) -> Result<ProductOutcome>
where
    C: ConnectionTrait,
{
    let errors = validate_product_input(&input);
    if !errors.is_empty() {
        return Ok(ProductOutcome::Rejected(errors));
    }

    let mut product: product::ActiveModel = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?
        .into();

    product.name = Set(input.name.trim().to_string());
    product.sku = Set(input.sku.trim().to_string());
    product.description = Set(trimmed_description(input.description));
    product.price = Set(input.price);
    product.stock_quantity = Set(input.stock_quantity);
    product.category = Set(input.category.trim().to_string());
    product.updated_at = Set(chrono::Utc::now().naive_utc());

    let saved = product.update(db).await?;
    Ok(ProductOutcome::Saved(saved))
}

/// Deletes a product that has no orders.
///
/// # Errors
/// Returns [`Error::ProductNotFound`] if the product does not exist and
/// [`Error::Conflict`] if orders still reference it.
#[instrument(skip(db))]
pub async fn delete_product<C>(db: &C, product_id: i64) -> Result<()>
where
    C: ConnectionTrait,
{
    let result = Product::delete_by_id(product_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::ProductNotFound { id: product_id });
    }
    info!(product_id, "product deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use rust_decimal::Decimal;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_product_validation_does_not_touch_storage() -> Result<()> {
        // An empty mock would fail any query, so a rejection proves no I/O happened
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let input = ProductInput {
            price: Decimal::ZERO,
            ..product_input("Test Product", "TP-1")
        };
        let outcome = create_product(&db, input).await?;
        let ProductOutcome::Rejected(errors) = outcome else {
            panic!("expected rejection, got {outcome:?}");
        };
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "price");
        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_integration() -> Result<()> {
        let db = setup_test_db().await?;

        let input = ProductInput {
            name: "  Samsung T7 1TB SSD ".to_string(),
            description: Some("   ".to_string()),
            ..product_input("ignored", "T7-1TB")
        };
        let product = expect_saved_product(create_product(&db, input).await?);

        assert_eq!(product.name, "Samsung T7 1TB SSD");
        assert_eq!(product.sku, "T7-1TB");
        assert_eq!(product.description, None);
        assert_eq!(product.stock_quantity, 10);
        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_sku_is_conflict() -> Result<()> {
        let db = setup_test_db().await?;
        create_product(&db, product_input("First", "DUP")).await?;

        let result = create_product(&db, product_input("Second", "DUP")).await;
        assert!(matches!(
            result,
            Err(Error::Conflict { message }) if message == crate::errors::MSG_SKU_TAKEN
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_name_is_conflict() -> Result<()> {
        let db = setup_test_db().await?;
        create_product(&db, product_input("Same Name", "A1")).await?;

        let result = create_product(&db, product_input("Same Name", "A2")).await;
        assert!(matches!(
            result,
            Err(Error::Conflict { message }) if message == crate::errors::MSG_PRODUCT_NAME_TAKEN
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_get_all_products_sorted_by_name() -> Result<()> {
        let db = setup_test_db().await?;
        create_product(&db, product_input("Zebra Speaker", "Z1")).await?;
        create_product(&db, product_input("Apple Watch", "A1")).await?;
        create_product(&db, product_input("Mouse", "M1")).await?;

        let names: Vec<String> = get_all_products(&db)
            .await?
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Apple Watch", "Mouse", "Zebra Speaker"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_lookups_are_repeatable() -> Result<()> {
        let (db, product) = setup_with_product().await?;

        let first = get_product_by_id(&db, product.id).await?;
        let second = get_product_by_id(&db, product.id).await?;
        assert_eq!(first, second);
        assert_eq!(first.map(|p| p.id), Some(product.id));

        assert_eq!(get_all_products(&db).await?, get_all_products(&db).await?);
        assert!(get_product_by_id(&db, 999).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_update_product_integration() -> Result<()> {
        let (db, product) = setup_with_product().await?;

        let input = ProductInput {
            stock_quantity: 3,
            ..product_input("Renamed Product", "NEW-SKU")
        };
        let updated = expect_saved_product(update_product(&db, product.id, input).await?);

        assert_eq!(updated.id, product.id);
        assert_eq!(updated.name, "Renamed Product");
        assert_eq!(updated.sku, "NEW-SKU");
        assert_eq!(updated.stock_quantity, 3);
        assert_eq!(updated.created_at, product.created_at);
        assert!(updated.updated_at >= product.updated_at);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_product() -> Result<()> {
        let db = setup_test_db().await?;
        let result = update_product(&db, 42, product_input("Name", "SKU")).await;
        assert!(matches!(result, Err(Error::ProductNotFound { id: 42 })));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_product_without_orders() -> Result<()> {
        let (db, product) = setup_with_product().await?;
        delete_product(&db, product.id).await?;
        assert!(get_product_by_id(&db, product.id).await?.is_none());

        let again = delete_product(&db, product.id).await;
        assert!(matches!(again, Err(Error::ProductNotFound { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_product_with_orders_is_restricted() -> Result<()> {
        let (db, product) = setup_with_product().await?;
        create_test_order(&db, product.id, "ORD-20250115-0001", "a@gmail.com").await?;

        let result = delete_product(&db, product.id).await;
        assert!(matches!(
            result,
            Err(Error::Conflict { message }) if message == crate::errors::MSG_PRODUCT_HAS_ORDERS
        ));
        assert!(get_product_by_id(&db, product.id).await?.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn test_orders_for_product() -> Result<()> {
        let (db, product) = setup_with_product().await?;
        let other = create_test_product(&db, "Other Product", "OTHER").await?;
        create_test_order(&db, product.id, "ORD-20250115-0001", "a@gmail.com").await?;
        create_test_order(&db, product.id, "ORD-20250115-0002", "b@yahoo.com").await?;
        create_test_order(&db, other.id, "ORD-20250115-0003", "c@outlook.com").await?;

        let orders = orders_for_product(&db, product.id).await?;
        assert_eq!(orders.len(), 2);
        assert!(orders.iter().all(|o| o.product_id == product.id));

        let missing = orders_for_product(&db, 999).await;
        assert!(matches!(missing, Err(Error::ProductNotFound { id: 999 })));
        Ok(())
    }
}
