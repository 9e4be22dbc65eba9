//! Order business logic - Validation, listing and full-field order maintenance.
//!
//! The checks mirror what an order form needs before saving: the product exists
//! and has enough stock, the order date is not in the future, and delivery does
//! not precede the order. Failures come back as values carrying a user-facing
//! message; only storage problems are returned as [`Error`].
//!
//! Stock is checked, never reserved or decremented. Two orders validated at the
//! same time against the same stock can both be saved.

use crate::{
    core::{
        order_number::{is_order_number_unique, is_order_number_unique_excluding},
        pagination::Pagination,
        validation::{FieldError, OrderInput, Rule, validate_order_input},
    },
    entities::{Order, OrderStatus, Product, order, product},
    errors::{Error, Result},
};
use chrono::{Local, NaiveDate};
use sea_orm::{
    Condition, PaginatorTrait, QueryOrder, QuerySelect, Set,
    prelude::*,
    sea_query::{Expr, Func, LikeExpr},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Message when the product id matches no row
pub const MSG_PRODUCT_NOT_FOUND: &str = "Sản phẩm không tồn tại";
/// Message when the requested quantity is zero or negative
pub const MSG_QUANTITY_NOT_POSITIVE: &str = "Số lượng phải lớn hơn 0";
/// Message when the order date is after today
pub const MSG_ORDER_DATE_IN_FUTURE: &str = "Ngày đặt hàng không được trong tương lai";
/// Message when delivery precedes the order
pub const MSG_DELIVERY_BEFORE_ORDER: &str = "Ngày giao hàng phải sau hoặc bằng ngày đặt hàng";
/// Message when the order number is already used
pub const MSG_ORDER_NUMBER_TAKEN: &str = "Mã đơn hàng đã tồn tại";

const LIKE_ESCAPE: char = '!';

/// Outcome of [`validate_product_and_stock`]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockCheck {
    /// Whether the order can be placed
    pub is_valid: bool,
    /// Reason when invalid, empty otherwise
    pub message: String,
    /// The looked-up product, absent only when it does not exist
    pub product: Option<product::Model>,
}

/// Outcome of [`validate_dates`]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateCheck {
    /// Whether the dates are acceptable
    pub is_valid: bool,
    /// Reason when invalid, empty otherwise
    pub message: String,
}

impl DateCheck {
    fn valid() -> Self {
        Self {
            is_valid: true,
            message: String::new(),
        }
    }

    fn invalid(message: &str) -> Self {
        Self {
            is_valid: false,
            message: message.to_string(),
        }
    }
}

/// An order together with its product, as shown in listings
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderWithProduct {
    /// The stored order
    #[serde(flatten)]
    pub order: order::Model,
    /// Delivery status derived from the order
    pub status: OrderStatus,
    /// The referenced product
    pub product: Option<product::Model>,
}

impl From<(order::Model, Option<product::Model>)> for OrderWithProduct {
    fn from((order, product): (order::Model, Option<product::Model>)) -> Self {
        Self {
            status: order.status(),
            order,
            product,
        }
    }
}

/// Parameters for [`get_orders`]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrderQuery {
    /// Page and page size, normalised before use
    pub pagination: Pagination,
    /// Substring to look for in order number, customer name or email
    pub search: Option<String>,
}

/// One page of orders plus what is needed to render pagination controls
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPage {
    /// Orders on this page, most recent order date first
    pub orders: Vec<OrderWithProduct>,
    /// Number of orders matching the search across all pages
    pub total_records: u64,
    /// 1-based page number that was served
    pub current_page: u64,
    /// Page size that was applied
    pub page_size: u64,
    /// Trimmed search string, if one was applied
    pub search_string: Option<String>,
}

impl OrderPage {
    /// Number of pages needed for `total_records`.
    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total_records.div_ceil(self.page_size)
    }

    /// Whether a page precedes this one.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Whether a page follows this one.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }
}

/// Result of an order write
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OrderOutcome {
    /// Stored order
    Saved(order::Model),
    /// Rules that failed; nothing was written
    Rejected(Vec<FieldError>),
}

/// Checks that the product exists and can cover `quantity`.
///
/// Existence is checked first, then that the quantity is positive, then that
/// stock is sufficient. The product is read without any locking.
#[instrument(skip(db))]
pub async fn validate_product_and_stock<C>(
    db: &C,
    product_id: i64,
    quantity: i32,
) -> Result<StockCheck>
where
    C: ConnectionTrait,
{
    let Some(product) = Product::find_by_id(product_id).one(db).await? else {
        return Ok(StockCheck {
            is_valid: false,
            message: MSG_PRODUCT_NOT_FOUND.to_string(),
            product: None,
        });
    };

    if quantity <= 0 {
        return Ok(StockCheck {
            is_valid: false,
            message: MSG_QUANTITY_NOT_POSITIVE.to_string(),
            product: Some(product),
        });
    }

    if quantity > product.stock_quantity {
        return Ok(StockCheck {
            is_valid: false,
            message: format!("Không đủ hàng. Còn lại: {}", product.stock_quantity),
            product: Some(product),
        });
    }

    Ok(StockCheck {
        is_valid: true,
        message: String::new(),
        product: Some(product),
    })
}

/// Checks order and delivery dates against an explicit `today`.
#[must_use]
pub fn validate_dates_on(
    order_date: NaiveDate,
    delivery_date: Option<NaiveDate>,
    today: NaiveDate,
) -> DateCheck {
    if order_date > today {
        return DateCheck::invalid(MSG_ORDER_DATE_IN_FUTURE);
    }

    if delivery_date.is_some_and(|delivery| delivery < order_date) {
        return DateCheck::invalid(MSG_DELIVERY_BEFORE_ORDER);
    }

    DateCheck::valid()
}

/// Checks order and delivery dates against the local calendar day.
#[must_use]
pub fn validate_dates(order_date: NaiveDate, delivery_date: Option<NaiveDate>) -> DateCheck {
    validate_dates_on(order_date, delivery_date, Local::now().date_naive())
}

/// Escapes LIKE wildcards so the needle matches literally.
fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

/// Substring match on order number, customer name or email, ignoring ASCII case.
///
/// Only ASCII letters are folded on both sides, matching SQLite's `lower()`.
fn search_condition(needle: &str) -> Condition {
    let pattern = format!("%{}%", escape_like(&needle.to_ascii_lowercase()));
    let contains = |column: order::Column| {
        Expr::expr(Func::lower(Expr::col((Order, column))))
            .like(LikeExpr::new(pattern.clone()).escape(LIKE_ESCAPE))
    };

    Condition::any()
        .add(contains(order::Column::OrderNumber))
        .add(contains(order::Column::CustomerName))
        .add(contains(order::Column::CustomerEmail))
}

/// Lists orders with their products, most recent order date first.
///
/// A non-blank `search` (after trimming) keeps orders whose number, customer
/// name or email contains it, ignoring ASCII case. The total counts every
/// matching order, not just the page.
#[instrument(skip(db))]
pub async fn get_orders<C>(db: &C, query: &OrderQuery) -> Result<OrderPage>
where
    C: ConnectionTrait,
{
    let pagination = query.pagination.normalize();
    let search_string = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string);

    let condition = search_string
        .as_deref()
        .map_or_else(Condition::all, search_condition);

    let total_records = Order::find()
        .filter(condition.clone())
        .count(db)
        .await?;

    let orders = Order::find()
        .find_also_related(Product)
        .filter(condition)
        .order_by_desc(order::Column::OrderDate)
        .order_by_desc(order::Column::Id)
        .offset(pagination.offset())
        .limit(pagination.page_size)
        .all(db)
        .await?
        .into_iter()
        .map(OrderWithProduct::from)
        .collect::<Vec<_>>();

    debug!(total_records, returned = orders.len(), "listed orders");

    Ok(OrderPage {
        orders,
        total_records,
        current_page: pagination.page,
        page_size: pagination.page_size,
        search_string,
    })
}

/// Retrieves one order with its product, or `None` if there is no such row.
pub async fn get_order_by_id<C>(db: &C, order_id: i64) -> Result<Option<OrderWithProduct>>
where
    C: ConnectionTrait,
{
    Ok(Order::find_by_id(order_id)
        .find_also_related(Product)
        .one(db)
        .await?
        .map(OrderWithProduct::from))
}

/// Runs every rule an order must pass before it is written.
///
/// `editing` is the id of the order being replaced, so it does not collide with
/// its own order number.
async fn check_order<C>(db: &C, input: &OrderInput, editing: Option<i64>) -> Result<Vec<FieldError>>
where
    C: ConnectionTrait,
{
    let errors = validate_order_input(input);
    if !errors.is_empty() {
        return Ok(errors);
    }

    let mut errors = Vec::new();

    let number = Some(input.order_number.as_str());
    let unique = match editing {
        Some(order_id) => is_order_number_unique_excluding(db, number, order_id).await?,
        None => is_order_number_unique(db, number).await?,
    };
    if !unique {
        errors.push(FieldError::new(
            "order_number",
            Rule::Business,
            MSG_ORDER_NUMBER_TAKEN,
        ));
    }

    let stock = validate_product_and_stock(db, input.product_id, input.quantity).await?;
    if !stock.is_valid {
        let field = if stock.product.is_some() {
            "quantity"
        } else {
            "product_id"
        };
        errors.push(FieldError::new(field, Rule::Business, stock.message));
    }

    let dates = validate_dates(input.order_date, input.delivery_date);
    if !dates.is_valid {
        let field = if dates.message == MSG_ORDER_DATE_IN_FUTURE {
            "order_date"
        } else {
            "delivery_date"
        };
        errors.push(FieldError::new(field, Rule::Business, dates.message));
    }

    Ok(errors)
}

/// Validates and stores a new order.
///
/// Stock is not decremented. A duplicate customer email is only caught by the
/// unique index and comes back as [`Error::Conflict`].
#[instrument(skip(db, input), fields(order_number = %input.order_number))]
pub async fn create_order<C>(db: &C, input: OrderInput) -> Result<OrderOutcome>
where
    C: ConnectionTrait,
{
    let errors = check_order(db, &input, None).await?;
    if !errors.is_empty() {
        debug!(failures = errors.len(), "order rejected");
        return Ok(OrderOutcome::Rejected(errors));
    }

    let now = chrono::Utc::now().naive_utc();
    let order = order::ActiveModel {
        product_id: Set(input.product_id),
        order_number: Set(input.order_number),
        customer_name: Set(input.customer_name.trim().to_string()),
        customer_email: Set(input.customer_email.trim().to_string()),
        quantity: Set(input.quantity),
        order_date: Set(input.order_date),
        delivery_date: Set(input.delivery_date),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let saved = order.insert(db).await?;
    info!(order_id = saved.id, "order created");
    Ok(OrderOutcome::Saved(saved))
}

/// Validates and replaces every editable field of an order.
///
/// # Errors
/// Returns [`Error::OrderNotFound`] if the order does not exist.
#[instrument(skip(db, input))]
pub async fn update_order<C>(db: &C, order_id: i64, input: OrderInput) -> Result<OrderOutcome>
where
    C: ConnectionTrait,
{
    let mut order: order::ActiveModel = Order::find_by_id(order_id)
        .one(db)
        .await?
        .ok_or(Error::OrderNotFound { id: order_id })?
        .into();

    let errors = check_order(db, &input, Some(order_id)).await?;
    if !errors.is_empty() {
        return Ok(OrderOutcome::Rejected(errors));
    }

    order.product_id = Set(input.product_id);
    order.order_number = Set(input.order_number);
    order.customer_name = Set(input.customer_name.trim().to_string());
    order.customer_email = Set(input.customer_email.trim().to_string());
    order.quantity = Set(input.quantity);
    order.order_date = Set(input.order_date);
    order.delivery_date = Set(input.delivery_date);
    order.updated_at = Set(chrono::Utc::now().naive_utc());

    let saved = order.update(db).await?;
    info!(order_id, "order updated");
    Ok(OrderOutcome::Saved(saved))
}

/// Deletes an order.
///
/// # Errors
/// Returns [`Error::OrderNotFound`] if the order does not exist.
#[instrument(skip(db))]
pub async fn delete_order<C>(db: &C, order_id: i64) -> Result<()>
where
    C: ConnectionTrait,
{
    let result = Order::delete_by_id(order_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::OrderNotFound { id: order_id });
    }
    info!(order_id, "order deleted");
    Ok(())
}
