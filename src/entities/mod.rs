//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the `products` and `orders` tables and the relation between them.
//! Relations are declared for explicit joins only; nothing is loaded implicitly.

pub mod order;
pub mod product;

// Re-export specific types to avoid conflicts
pub use order::{Column as OrderColumn, Entity as Order, Model as OrderModel, OrderStatus};
pub use product::{Column as ProductColumn, Entity as Product, Model as ProductModel};
