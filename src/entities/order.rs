//! Order entity - A customer's order for a quantity of one product.
//!
//! Order number and customer email are unique. `product_id` references
//! `products.id` with `ON DELETE RESTRICT`, so a product cannot be removed while
//! orders point at it. The delivery status is derived from `delivery_date`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    /// Unique identifier for the order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the ordered product
    pub product_id: i64,
    /// Human-facing order number in `ORD-YYYYMMDD-NNNN` form, unique
    #[sea_orm(unique, column_type = "String(StringLen::N(50))")]
    pub order_number: String,
    /// Customer full name
    #[sea_orm(column_type = "String(StringLen::N(100))")]
    pub customer_name: String,
    /// Customer email address, unique
    #[sea_orm(unique, column_type = "String(StringLen::N(255))")]
    pub customer_email: String,
    /// Number of units ordered
    pub quantity: i32,
    /// Calendar day the order was placed
    pub order_date: Date,
    /// Calendar day the order was delivered, if it has been
    pub delivery_date: Option<Date>,
    /// When the order was created
    pub created_at: DateTime,
    /// When the order was last modified
    pub updated_at: DateTime,
}

impl Model {
    /// Delivery status, computed from `delivery_date`.
    #[must_use]
    pub const fn status(&self) -> OrderStatus {
        if self.delivery_date.is_some() {
            OrderStatus::Delivered
        } else {
            OrderStatus::Pending
        }
    }
}

/// Derived delivery status of an order. Never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    /// No delivery date recorded yet
    Pending,
    /// A delivery date is recorded
    Delivered,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => f.write_str("Pending"),
            Self::Delivered => f.write_str("Delivered"),
        }
    }
}

/// Defines relationships between Order and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each order belongs to exactly one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Product,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample(delivery_date: Option<Date>) -> Model {
        let day = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap_or_default();
        let now = day.and_hms_opt(9, 0, 0).unwrap_or_default();
        Model {
            id: 1,
            product_id: 1,
            order_number: "ORD-20250115-0001".to_string(),
            customer_name: "Trần Thị B".to_string(),
            customer_email: "b@yahoo.com".to_string(),
            quantity: 2,
            order_date: day,
            delivery_date,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_status_pending_without_delivery_date() {
        assert_eq!(sample(None).status(), OrderStatus::Pending);
    }

    #[test]
    fn test_status_delivered_with_delivery_date() {
        let delivered = NaiveDate::from_ymd_opt(2025, 1, 18);
        assert_eq!(sample(delivered).status(), OrderStatus::Delivered);
        assert_eq!(OrderStatus::Delivered.to_string(), "Delivered");
    }
}
