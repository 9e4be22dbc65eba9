//! Demo data for a fresh store.
//!
//! Fifteen fixed products and thirty orders generated from a fixed random seed,
//! so every fresh database starts with the same catalogue and order history
//! (relative to the day it was seeded).

use crate::{
    entities::{Product, order, product},
    errors::Result,
};
use chrono::{Duration, NaiveDate};
use rand::{Rng, SeedableRng, rngs::StdRng};
use rust_decimal::Decimal;
use sea_orm::{PaginatorTrait, Set, TransactionTrait, prelude::*};
use tracing::{info, instrument};

/// Seed for the order generator
pub const ORDER_SEED: u64 = 2025;
/// Number of generated orders
pub const ORDER_COUNT: usize = 30;

/// (name, sku, description, price in cents, stock, category)
const PRODUCTS: [(&str, &str, &str, i64, i32, &str); 15] = [
    ("iPhone 15 Pro", "IPH15P", "Apple flagship", 99_999, 50, "Smartphone"),
    ("Galaxy S24 Ultra", "S24U", "Samsung top model", 129_999, 40, "Smartphone"),
    ("MacBook Air M3", "MBA-M3", "Apple laptop", 109_999, 30, "Laptop"),
    ("Dell XPS 14", "XPS14", "Premium ultrabook", 149_999, 25, "Laptop"),
    ("Sony WH-1000XM5", "WHXM5", "Noise cancelling", 34_999, 120, "Headphone"),
    ("AirPods Pro 2", "APP2", "Apple earbuds", 24_999, 200, "Headphone"),
    ("Logitech MX Master 3S", "MX3S", "Ergonomic mouse", 9_999, 150, "Accessories"),
    ("Samsung 55\" QN90C", "QN90C55", "Neo QLED TV", 149_999, 18, "TV"),
    ("LG OLED C3 65\"", "OLED65C3", "OLED television", 219_999, 12, "TV"),
    ("Canon EOS R6 Mark II", "R6M2", "Mirrorless camera", 249_999, 15, "Camera"),
    ("Nikon Z6 III", "Z6III", "Full-frame mirrorless", 249_999, 10, "Camera"),
    ("Samsung T7 1TB SSD", "T7-1TB", "Portable SSD", 10_999, 300, "Storage"),
    ("WD Black SN850X 2TB", "SN850X2TB", "NVMe SSD", 16_999, 80, "Storage"),
    ("Microsoft Surface Pro 9", "SP9", "2-in-1 tablet", 99_999, 35, "Tablet"),
    ("iPad Pro 12.9\" M2", "IPDPRO129", "Apple tablet", 129_999, 45, "Tablet"),
];

const CUSTOMER_NAMES: [&str; 7] = [
    "Nguyễn Văn A",
    "Trần Thị B",
    "Lê Văn C",
    "Phạm Thị D",
    "Hoàng Văn E",
    "Vũ Thị F",
    "Đặng Văn G",
];

/// (local part, domain)
const EMAILS: [(&str, &str); 7] = [
    ("a", "gmail.com"),
    ("b", "yahoo.com"),
    ("c", "outlook.com"),
    ("d", "hotmail.com"),
    ("e", "zoho.com"),
    ("f", "proton.me"),
    ("g", "icloud.com"),
];

/// How many rows a seeding run inserted
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SeedSummary {
    /// Products inserted
    pub products: usize,
    /// Orders inserted
    pub orders: usize,
}

/// Seeds products and orders if the product table is empty.
///
/// Order numbers embed `today` (`ORD-YYYYMMDD-NNNN`), order dates fall 1 to 44
/// days before `today`, and roughly a third of orders get a delivery date 2 to
/// 9 days after ordering. Customer emails get the sequence number appended to
/// the local part because emails are unique per order.
#[instrument(skip(db))]
pub async fn seed_if_empty<C>(db: &C, today: NaiveDate) -> Result<SeedSummary>
where
    C: ConnectionTrait + TransactionTrait,
{
    if Product::find().count(db).await? > 0 {
        info!("Store already has products, skipping seed.");
        return Ok(SeedSummary::default());
    }

    let txn = db.begin().await?;
    let now = chrono::Utc::now().naive_utc();

    let mut product_ids = Vec::with_capacity(PRODUCTS.len());
    for (name, sku, description, cents, stock, category) in PRODUCTS {
        let saved = product::ActiveModel {
            name: Set(name.to_string()),
            sku: Set(sku.to_string()),
            description: Set(Some(description.to_string())),
            price: Set(Decimal::new(cents, 2)),
            stock_quantity: Set(stock),
            category: Set(category.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        product_ids.push(saved.id);
    }

    let mut rng = StdRng::seed_from_u64(ORDER_SEED);
    let stamp = today.format("%Y%m%d");

    for seq in 1..=ORDER_COUNT {
        let product_id = product_ids[rng.gen_range(0..product_ids.len())];
        let quantity = rng.gen_range(1..=5);
        let order_date = today - Duration::days(rng.gen_range(1..45));
        let delivery_date = (rng.gen_range(0..3) == 0)
            .then(|| order_date + Duration::days(rng.gen_range(2..10)));
        let customer_name = CUSTOMER_NAMES[rng.gen_range(0..CUSTOMER_NAMES.len())];
        let (local, domain) = EMAILS[rng.gen_range(0..EMAILS.len())];

        order::ActiveModel {
            product_id: Set(product_id),
            order_number: Set(format!("ORD-{stamp}-{seq:04}")),
            customer_name: Set(customer_name.to_string()),
            customer_email: Set(format!("{local}.{seq:04}@{domain}")),
            quantity: Set(quantity),
            order_date: Set(order_date),
            delivery_date: Set(delivery_date),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;

    let summary = SeedSummary {
        products: product_ids.len(),
        orders: ORDER_COUNT,
    };
    info!(
        products = summary.products,
        orders = summary.orders,
        "Seeded demo data."
    );
    Ok(summary)
}
