//! Unified error types for the order management service.
//!
//! Business-rule failures (bad order numbers, insufficient stock, dates out of
//! order) are not errors: the service returns them as values so callers can
//! show the message verbatim. The variants here cover what cannot be recovered
//! locally: storage failures, constraint conflicts, missing rows and startup
//! problems.

use crate::core::validation::FieldError;
use sea_orm::{DbErr, RuntimeErr, SqlErr, sqlx};
use thiserror::Error;
use tracing::debug;

/// Application error type
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration or startup failure (missing connection string, bad TOML)
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Any storage failure that is not a constraint conflict
    #[error("Database error: {0}")]
    Database(DbErr),

    /// A unique or foreign-key constraint rejected the write
    #[error("Conflict: {message}")]
    Conflict {
        /// User-facing description of the violated constraint
        message: String,
    },

    /// No product row with this id
    #[error("Product not found: {id}")]
    ProductNotFound {
        /// Requested product id
        id: i64,
    },

    /// No order row with this id
    #[error("Order not found: {id}")]
    OrderNotFound {
        /// Requested order id
        id: i64,
    },

    /// Input rejected by field or business validation
    #[error("Validation failed: {}", summarize(errors))]
    Validation {
        /// Every failing field with its rule and message
        errors: Vec<FieldError>,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid socket address in configuration
    #[error("Invalid bind address: {0}")]
    AddrParse(#[from] std::net::AddrParseError),
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Message when the product name is already used
pub const MSG_PRODUCT_NAME_TAKEN: &str = "Tên sản phẩm đã tồn tại";
/// Message when the SKU is already used
pub const MSG_SKU_TAKEN: &str = "Mã SKU đã tồn tại";
/// Message when the customer email is already used by another order
pub const MSG_CUSTOMER_EMAIL_TAKEN: &str = "Email khách hàng đã tồn tại";
/// Message when a product cannot be removed because orders reference it
pub const MSG_PRODUCT_HAS_ORDERS: &str = "Sản phẩm đang có đơn hàng, không thể xóa";
/// Message for any other unique violation
pub const MSG_DUPLICATE_VALUE: &str = "Dữ liệu đã tồn tại";

// SQLITE_CONSTRAINT_FOREIGNKEY and SQLITE_CONSTRAINT_TRIGGER (RESTRICT actions)
const SQLITE_FOREIGN_KEY_CODES: [&str; 2] = ["787", "1811"];

/// Maps the `table.column` named in a unique violation to a user-facing message.
fn unique_violation_message(detail: &str) -> &'static str {
    [
        ("orders.order_number", crate::core::order::MSG_ORDER_NUMBER_TAKEN),
        ("orders.customer_email", MSG_CUSTOMER_EMAIL_TAKEN),
        ("products.name", MSG_PRODUCT_NAME_TAKEN),
        ("products.sku", MSG_SKU_TAKEN),
    ]
    .into_iter()
    .find(|(column, _)| detail.contains(column))
    .map_or(MSG_DUPLICATE_VALUE, |(_, message)| message)
}

fn is_foreign_key_violation(err: &DbErr) -> bool {
    let (DbErr::Exec(runtime) | DbErr::Query(runtime)) = err else {
        return false;
    };
    let RuntimeErr::SqlxError(sqlx::Error::Database(db_err)) = runtime else {
        return false;
    };
    db_err
        .code()
        .is_some_and(|code| SQLITE_FOREIGN_KEY_CODES.iter().any(|known| code == *known))
}

impl From<DbErr> for Error {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                debug!(%detail, "unique constraint violated");
                Self::Conflict {
                    message: unique_violation_message(&detail).to_string(),
                }
            }
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                debug!(%detail, "foreign key constraint violated");
                Self::Conflict {
                    message: MSG_PRODUCT_HAS_ORDERS.to_string(),
                }
            }
            _ if is_foreign_key_violation(&err) => {
                debug!(error = %err, "foreign key constraint violated");
                Self::Conflict {
                    message: MSG_PRODUCT_HAS_ORDERS.to_string(),
                }
            }
            _ => Self::Database(err),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
