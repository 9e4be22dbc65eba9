//! Core business logic - framework-agnostic order and product operations.
//!
//! Every function takes the connection (or an open transaction) explicitly, so
//! the caller decides the scope of the storage session.

/// Order validation, listing and maintenance
pub mod order;
/// Order number format and uniqueness rules
pub mod order_number;
/// Page and page-size handling for list queries
pub mod pagination;
/// Product lookups and maintenance
pub mod product;
/// Demo data for a fresh store
pub mod seed;
/// Field-level validation of product and order input
pub mod validation;
