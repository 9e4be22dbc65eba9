//! Order number rules.
//!
//! An order number looks like `ORD-20250115-0001`: a fixed prefix, the order's
//! calendar day as `YYYYMMDD`, and a four digit sequence. The embedded day must
//! exist on the calendar, so `ORD-20250230-0001` is rejected.

use crate::{
    entities::{Order, order},
    errors::Result,
};
use chrono::NaiveDate;
use regex::Regex;
use sea_orm::{PaginatorTrait, prelude::*};
use std::sync::LazyLock;
use tracing::{debug, instrument};

static ORDER_NUMBER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ORD-([0-9]{4})([0-9]{2})([0-9]{2})-([0-9]{4})$")
        .unwrap_or_else(|e| unreachable!("order number pattern is a valid literal: {e}"))
});

/// Returns true when `order_number` has the `ORD-YYYYMMDD-NNNN` shape and the
/// embedded date is a real calendar day.
///
/// `None`, empty and whitespace-only input is simply invalid.
#[must_use]
pub fn is_valid_order_number_format(order_number: Option<&str>) -> bool {
    let Some(order_number) = order_number.filter(|s| !s.trim().is_empty()) else {
        return false;
    };

    let Some(caps) = ORDER_NUMBER_PATTERN.captures(order_number) else {
        return false;
    };

    // The groups are ASCII digits of fixed width, so parsing cannot overflow.
    let (Ok(year), Ok(month), Ok(day)) = (
        caps[1].parse::<i32>(),
        caps[2].parse::<u32>(),
        caps[3].parse::<u32>(),
    ) else {
        return false;
    };

    // Year 0000 is not a usable calendar year.
    year >= 1 && NaiveDate::from_ymd_opt(year, month, day).is_some()
}

/// Returns true when no stored order uses `order_number`.
///
/// Blank or missing input is reported as not unique without querying storage.
#[instrument(skip(db))]
pub async fn is_order_number_unique<C>(db: &C, order_number: Option<&str>) -> Result<bool>
where
    C: ConnectionTrait,
{
    let Some(order_number) = order_number.filter(|s| !s.trim().is_empty()) else {
        return Ok(false);
    };

    let existing = Order::find()
        .filter(order::Column::OrderNumber.eq(order_number))
        .count(db)
        .await?;

    debug!(existing, "checked order number uniqueness");
    Ok(existing == 0)
}

/// Same as [`is_order_number_unique`] but ignores the order with `order_id`,
/// for edits that keep their own number.
#[instrument(skip(db))]
pub async fn is_order_number_unique_excluding<C>(
    db: &C,
    order_number: Option<&str>,
    order_id: i64,
) -> Result<bool>
where
    C: ConnectionTrait,
{
    let Some(order_number) = order_number.filter(|s| !s.trim().is_empty()) else {
        return Ok(false);
    };

    let existing = Order::find()
        .filter(order::Column::OrderNumber.eq(order_number))
        .filter(order::Column::Id.ne(order_id))
        .count(db)
        .await?;

    Ok(existing == 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_valid_order_numbers() {
        assert!(is_valid_order_number_format(Some("ORD-20250115-0001")));
        assert!(is_valid_order_number_format(Some("ORD-20240229-9999")));
        assert!(is_valid_order_number_format(Some("ORD-00011231-0000")));
    }

    #[test]
    fn test_invalid_calendar_dates() {
        // month 13
        assert!(!is_valid_order_number_format(Some("ORD-20251345-0001")));
        // not a leap year
        assert!(!is_valid_order_number_format(Some("ORD-20250229-0001")));
        assert!(!is_valid_order_number_format(Some("ORD-20250431-0001")));
        assert!(!is_valid_order_number_format(Some("ORD-20250100-0001")));
        assert!(!is_valid_order_number_format(Some("ORD-00000101-0001")));
    }

    #[test]
    fn test_malformed_order_numbers() {
        assert!(!is_valid_order_number_format(None));
        assert!(!is_valid_order_number_format(Some("")));
        assert!(!is_valid_order_number_format(Some("   ")));
        assert!(!is_valid_order_number_format(Some("ORD-2025011-0001")));
        assert!(!is_valid_order_number_format(Some("ORD-20250115-001")));
        assert!(!is_valid_order_number_format(Some("ord-20250115-0001")));
        assert!(!is_valid_order_number_format(Some("ORD-20250115-0001 ")));
        assert!(!is_valid_order_number_format(Some(" ORD-20250115-0001")));
        assert!(!is_valid_order_number_format(Some("ORD-2025O115-0001")));
        // full-width digits are not accepted
        assert!(!is_valid_order_number_format(Some("ORD-２０２５0115-0001")));
    }

    #[tokio::test]
    async fn test_blank_order_number_is_not_unique() -> Result<()> {
        let db = setup_test_db().await?;
        assert!(!is_order_number_unique(&db, None).await?);
        assert!(!is_order_number_unique(&db, Some("")).await?);
        assert!(!is_order_number_unique(&db, Some("  ")).await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_order_number_uniqueness_integration() -> Result<()> {
        let (db, product) = setup_with_product().await?;
        let order = create_test_order(&db, product.id, "ORD-20250115-0001", "a@gmail.com").await?;

        assert!(!is_order_number_unique(&db, Some("ORD-20250115-0001")).await?);
        assert!(is_order_number_unique(&db, Some("ORD-20250115-0002")).await?);

        // The order being edited does not collide with itself
        assert!(is_order_number_unique_excluding(&db, Some("ORD-20250115-0001"), order.id).await?);
        assert!(!is_order_number_unique_excluding(&db, Some("ORD-20250115-0001"), order.id + 1).await?);
        Ok(())
    }
}
