//! Product entity - Represents an item that can be ordered.
//!
//! Name and SKU are unique across the table. Stock is informational: placing an
//! order checks it but never decrements it.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name (e.g., "iPhone 15 Pro"), unique
    #[sea_orm(unique, column_type = "String(StringLen::N(200))")]
    pub name: String,
    /// Stock keeping unit code, unique
    #[sea_orm(unique, column_type = "String(StringLen::N(50))")]
    pub sku: String,
    /// Optional free-text description
    #[sea_orm(column_type = "String(StringLen::N(500))", nullable)]
    pub description: Option<String>,
    /// Unit price
    #[sea_orm(column_type = "Decimal(Some((16, 2)))")]
    pub price: Decimal,
    /// Units currently on hand
    pub stock_quantity: i32,
    /// Category label (e.g., "Laptop", "TV")
    #[sea_orm(column_type = "String(StringLen::N(100))")]
    pub category: String,
    /// When the product was created
    pub created_at: DateTime,
    /// When the product was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One product has many orders
    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
