//! Field validation for product and order input.
//!
//! Each function checks every field and returns the full list of failures, so a
//! form can highlight all of them at once. An empty list means the input is
//! acceptable as far as field rules go; storage-backed checks (uniqueness,
//! stock) live in [`crate::core::order`] and [`crate::core::order_number`].

use crate::core::order_number::is_valid_order_number_format;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

/// Kind of rule a field failed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// Value missing or blank
    Required,
    /// String length outside the allowed bounds
    Length,
    /// Number outside the allowed range
    Range,
    /// Value does not match the expected shape
    Format,
    /// Business rule (stock, dates, uniqueness)
    Business,
}

/// One failed rule on one field
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Input field name (snake case, as in the JSON body)
    pub field: String,
    /// Which rule failed
    pub rule: Rule,
    /// Message to show the user verbatim
    pub message: String,
}

impl FieldError {
    /// Builds a field error.
    pub fn new(field: impl Into<String>, rule: Rule, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            rule,
            message: message.into(),
        }
    }
}

/// Fields accepted when creating or replacing a product
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductInput {
    /// Product name
    pub name: String,
    /// Stock keeping unit
    pub sku: String,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
    /// Unit price
    pub price: Decimal,
    /// Units on hand
    pub stock_quantity: i32,
    /// Category label
    pub category: String,
}

/// Fields accepted when creating or replacing an order
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderInput {
    /// Ordered product
    pub product_id: i64,
    /// Order number in `ORD-YYYYMMDD-NNNN` form
    pub order_number: String,
    /// Customer full name
    pub customer_name: String,
    /// Customer email
    pub customer_email: String,
    /// Units ordered
    pub quantity: i32,
    /// Day the order was placed
    pub order_date: NaiveDate,
    /// Day the order was delivered
    #[serde(default)]
    pub delivery_date: Option<NaiveDate>,
}

/// Checks presence and character-length bounds for a required string.
///
/// Bounds apply to the trimmed value, which is what gets stored.
fn check_required_len(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
    required_message: &str,
    length_message: &str,
) {
    let value = value.trim();
    if value.is_empty() {
        errors.push(FieldError::new(field, Rule::Required, required_message));
        return;
    }
    let len = value.chars().count();
    if len < min || len > max {
        errors.push(FieldError::new(field, Rule::Length, length_message));
    }
}

/// Validates product fields.
#[must_use]
pub fn validate_product_input(input: &ProductInput) -> Vec<FieldError> {
    let mut errors = Vec::new();

    check_required_len(
        &mut errors,
        "name",
        &input.name,
        2,
        200,
        "Product name is required",
        "Product name must be between 2 and 200 characters",
    );
    check_required_len(
        &mut errors,
        "sku",
        &input.sku,
        1,
        50,
        "SKU is required",
        "SKU must not exceed 50 characters",
    );

    if let Some(description) = &input.description {
        if description.trim().chars().count() > 500 {
            errors.push(FieldError::new(
                "description",
                Rule::Length,
                "Description must not exceed 500 characters",
            ));
        }
    }

    if input.price <= Decimal::ZERO {
        errors.push(FieldError::new(
            "price",
            Rule::Range,
            "Price must be greater than 0",
        ));
    }

    if input.stock_quantity < 0 {
        errors.push(FieldError::new(
            "stock_quantity",
            Rule::Range,
            "Stock quantity cannot be negative",
        ));
    }

    check_required_len(
        &mut errors,
        "category",
        &input.category,
        1,
        100,
        "Category is required",
        "Category must not exceed 100 characters",
    );

    errors
}

/// Validates order fields that need no storage access.
///
/// Date ordering and stock are business rules checked separately; this only
/// covers shape and bounds.
#[must_use]
pub fn validate_order_input(input: &OrderInput) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if input.order_number.trim().is_empty() {
        errors.push(FieldError::new(
            "order_number",
            Rule::Required,
            "Order number is required",
        ));
    } else if input.order_number.chars().count() > 50 {
        errors.push(FieldError::new(
            "order_number",
            Rule::Length,
            "Order number must not exceed 50 characters",
        ));
    } else if !is_valid_order_number_format(Some(&input.order_number)) {
        errors.push(FieldError::new(
            "order_number",
            Rule::Format,
            "Mã đơn hàng phải có dạng ORD-YYYYMMDD-XXXX",
        ));
    }

    check_required_len(
        &mut errors,
        "customer_name",
        &input.customer_name,
        2,
        100,
        "Customer name is required",
        "Customer name must be between 2 and 100 characters",
    );

    let email = input.customer_email.trim();
    if email.is_empty() {
        errors.push(FieldError::new(
            "customer_email",
            Rule::Required,
            "Customer email is required",
        ));
    } else if email.chars().count() > 255 || !email.validate_email() {
        errors.push(FieldError::new(
            "customer_email",
            Rule::Format,
            "Invalid email format",
        ));
    }

    if input.quantity < 1 {
        errors.push(FieldError::new(
            "quantity",
            Rule::Range,
            "Quantity must be greater than 0",
        ));
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product_input() -> ProductInput {
        ProductInput {
            name: "Nikon Z6 III".to_string(),
            sku: "Z6III".to_string(),
            description: Some("Full-frame mirrorless".to_string()),
            price: Decimal::new(249_999, 2),
            stock_quantity: 10,
            category: "Camera".to_string(),
        }
    }

    fn order_input() -> OrderInput {
        OrderInput {
            product_id: 1,
            order_number: "ORD-20250115-0001".to_string(),
            customer_name: "Lê Văn C".to_string(),
            customer_email: "c@outlook.com".to_string(),
            quantity: 1,
            order_date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap_or_default(),
            delivery_date: None,
        }
    }

    fn fields(errors: &[FieldError]) -> Vec<&str> {
        errors.iter().map(|e| e.field.as_str()).collect()
    }

    #[test]
    fn test_valid_product_has_no_errors() {
        assert!(validate_product_input(&product_input()).is_empty());
    }

    #[test]
    fn test_product_reports_every_failing_field() {
        let input = ProductInput {
            name: "X".to_string(),
            sku: "   ".to_string(),
            description: Some("d".repeat(501)),
            price: Decimal::ZERO,
            stock_quantity: -1,
            category: "c".repeat(101),
        };
        let errors = validate_product_input(&input);
        assert_eq!(
            fields(&errors),
            vec![
                "name",
                "sku",
                "description",
                "price",
                "stock_quantity",
                "category"
            ]
        );
        assert_eq!(errors[0].rule, Rule::Length);
        assert_eq!(errors[1].rule, Rule::Required);
        assert_eq!(errors[3].message, "Price must be greater than 0");
    }

    #[test]
    fn test_product_name_length_counts_characters() {
        // 200 multi-byte characters is still within bounds
        let input = ProductInput {
            name: "đ".repeat(200),
            ..product_input()
        };
        assert!(validate_product_input(&input).is_empty());
    }

    #[test]
    fn test_valid_order_has_no_errors() {
        assert!(validate_order_input(&order_input()).is_empty());
    }

    #[test]
    fn test_order_rejects_bad_format_email_and_quantity() {
        let input = OrderInput {
            order_number: "ORD-20251345-0001".to_string(),
            customer_email: "not-an-email".to_string(),
            quantity: 0,
            ..order_input()
        };
        let errors = validate_order_input(&input);
        assert_eq!(
            fields(&errors),
            vec!["order_number", "customer_email", "quantity"]
        );
        assert_eq!(errors[0].rule, Rule::Format);
        assert_eq!(errors[2].message, "Quantity must be greater than 0");
    }

    #[test]
    fn test_order_blank_fields_are_required() {
        let input = OrderInput {
            order_number: String::new(),
            customer_name: " ".to_string(),
            customer_email: String::new(),
            ..order_input()
        };
        let errors = validate_order_input(&input);
        assert!(errors.iter().all(|e| e.rule == Rule::Required));
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_order_customer_name_too_short() {
        let input = OrderInput {
            customer_name: "A".to_string(),
            ..order_input()
        };
        let errors = validate_order_input(&input);
        assert_eq!(fields(&errors), vec!["customer_name"]);
        assert_eq!(errors[0].rule, Rule::Length);
    }

    #[test]
    fn test_padding_does_not_satisfy_length_rules() {
        let order = OrderInput {
            customer_name: "A ".to_string(),
            ..order_input()
        };
        let errors = validate_order_input(&order);
        assert_eq!(fields(&errors), vec!["customer_name"]);
        assert_eq!(errors[0].rule, Rule::Length);

        let product = ProductInput {
            name: " X ".to_string(),
            ..product_input()
        };
        let errors = validate_product_input(&product);
        assert_eq!(fields(&errors), vec!["name"]);
    }

    #[test]
    fn test_padded_email_is_accepted_as_trimmed() {
        let input = OrderInput {
            customer_email: " a@gmail.com ".to_string(),
            ..order_input()
        };
        assert!(validate_order_input(&input).is_empty());
    }
}
