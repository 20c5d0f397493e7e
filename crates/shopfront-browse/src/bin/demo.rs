//! # Browse Demo
//!
//! Walks the browse controller through a scripted storefront session
//! against an in-memory catalog, printing every emitted listing snapshot.
//!
//! ## Usage
//! ```bash
//! cargo run -p shopfront-browse --bin demo
//!
//! # With debug logging (shows issued queries and stale discards)
//! RUST_LOG=debug cargo run -p shopfront-browse --bin demo
//! ```
//!
//! ## Scripted Session
//! 1. Land on the storefront (no params → category 1 "Books")
//! 2. Browse to category 2 "Coffee Mugs"
//! 3. Jump to page 2
//! 4. Search for "mug"
//! 5. Grow the page size to 10
//! 6. Add the first visible product to the cart

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::mpsc;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

use shopfront_browse::{
    BrowseController, CartService, CatalogService, ServiceResult,
};
use shopfront_core::types::{PageMeta, PagedProducts, Product};
use shopfront_core::{CartItem, RouteParams};

/// Seed catalog: (category id, product name, price in cents)
const SEED: &[(i64, &str, i64)] = &[
    (1, "Crash Course in Python", 1499),
    (1, "Become a Guru in JavaScript", 2099),
    (1, "Exploring Vue.js", 1999),
    (1, "Advanced Techniques in Big Data", 2899),
    (1, "Crash Course in Big Data", 1599),
    (1, "JavaScript Cookbook", 2399),
    (1, "Beginners Guide to SQL", 1499),
    (1, "Advanced Techniques in Java", 2299),
    (2, "Coffee Mug - Express", 899),
    (2, "Coffee Mug - Cherokee", 899),
    (2, "Coffee Mug - Sweeper", 899),
    (2, "Coffee Mug - Aspire", 899),
    (2, "Coffee Mug - Pan", 899),
    (2, "Coffee Mug - Uno", 899),
    (2, "Coffee Mug - Upstream", 899),
    (3, "Mouse Pad - Speed", 1799),
    (3, "Mouse Pad - Turbo", 1799),
    (4, "Luggage Tag - Cherish", 1699),
    (4, "Luggage Tag - Adventure", 1699),
];

/// In-memory catalog implementing the paginated queries over [`SEED`].
struct InMemoryCatalog {
    products: Vec<Product>,
}

impl InMemoryCatalog {
    fn new() -> Self {
        let now = Utc::now();
        let products = SEED
            .iter()
            .enumerate()
            .map(|(i, (category_id, name, price))| Product {
                id: i as i64 + 1,
                sku: format!("CAT{}-{:03}", category_id, i + 1),
                name: (*name).to_string(),
                description: None,
                unit_price_cents: *price,
                image_url: format!("assets/images/products/{}.png", i + 1),
                active: true,
                units_in_stock: 100,
                date_created: now,
                last_updated: now,
            })
            .collect();
        InMemoryCatalog { products }
    }

    /// One 0-based page out of a filtered product list.
    fn paginate(matches: Vec<Product>, page_index: u32, page_size: u32) -> PagedProducts {
        let total = matches.len() as u64;
        let start = (page_index as usize) * (page_size as usize);
        let products = matches
            .into_iter()
            .skip(start)
            .take(page_size as usize)
            .collect();
        PagedProducts {
            products,
            page: PageMeta {
                number: page_index,
                size: page_size,
                total_elements: total,
            },
        }
    }

    fn category_of(&self, product: &Product) -> i64 {
        // SKU encodes the category in this demo seed: "CAT{id}-{index}"
        product
            .sku
            .trim_start_matches("CAT")
            .split('-')
            .next()
            .and_then(|s| s.parse().ok())
            .unwrap_or(0)
    }
}

#[async_trait]
impl CatalogService for InMemoryCatalog {
    async fn get_product_list_paginate(
        &self,
        page_index: u32,
        page_size: u32,
        category_id: i64,
    ) -> ServiceResult<PagedProducts> {
        let matches = self
            .products
            .iter()
            .filter(|p| self.category_of(p) == category_id)
            .cloned()
            .collect();
        Ok(Self::paginate(matches, page_index, page_size))
    }

    async fn search_products_paginate(
        &self,
        page_index: u32,
        page_size: u32,
        keyword: &str,
    ) -> ServiceResult<PagedProducts> {
        let needle = keyword.to_lowercase();
        let matches = self
            .products
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        Ok(Self::paginate(matches, page_index, page_size))
    }
}

/// Cart collaborator that just logs what it received.
struct LoggingCart;

#[async_trait]
impl CartService for LoggingCart {
    async fn add_to_cart(&self, item: CartItem) -> ServiceResult<()> {
        info!(
            name = %item.name,
            unit_price_cents = item.unit_price_cents,
            quantity = item.quantity,
            "Cart received item"
        );
        Ok(())
    }
}

#[tokio::main]
async fn main() {
    init_tracing();

    let controller = Arc::new(BrowseController::new(
        Arc::new(InMemoryCatalog::new()),
        Arc::new(LoggingCart),
    ));

    let mut snapshots = controller.subscribe();
    let (params_tx, params_rx) = mpsc::channel(8);
    let handle = controller.spawn(params_rx);

    // 1. Landing route: no params
    params_tx.send(RouteParams::new()).await.unwrap();
    print_next(&mut snapshots, "landing").await;

    // 2. Category navigation
    params_tx
        .send(RouteParams::category(2, "Coffee Mugs"))
        .await
        .unwrap();
    print_next(&mut snapshots, "category 2").await;

    // 3. Page jump within the category
    controller.goto_page(2).await.unwrap();
    print_next(&mut snapshots, "page 2").await;

    // 4. Keyword search
    params_tx.send(RouteParams::keyword("mug")).await.unwrap();
    print_next(&mut snapshots, "search 'mug'").await;

    // 5. Bigger pages
    controller.update_page_size(10).await.unwrap();
    print_next(&mut snapshots, "page size 10").await;

    // 6. Add the first visible product to the cart
    let listing = controller.listing().await;
    if let Some(first) = listing.products.first() {
        controller.add_to_cart(first).await;
    }

    drop(params_tx);
    handle.shutdown().await;
    info!("Demo session complete");
}

/// Waits for the next snapshot and prints a one-line summary.
async fn print_next(
    snapshots: &mut tokio::sync::watch::Receiver<shopfront_browse::ListingSnapshot>,
    label: &str,
) {
    snapshots.changed().await.expect("controller gone");
    let snap = snapshots.borrow().clone();
    println!(
        "[{label}] {} «{}» page {}/{} (size {}, {} total){}",
        if snap.search_mode { "search" } else { "category" },
        snap.category.name,
        snap.page_number,
        (snap.total_elements as f64 / snap.page_size as f64).ceil() as u64,
        snap.page_size,
        snap.total_elements,
        snap.load_error
            .as_deref()
            .map(|e| format!(" ERROR: {e}"))
            .unwrap_or_default(),
    );
    for p in &snap.products {
        println!("    {:>6} ¢  {}", p.unit_price_cents, p.name);
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=shopfront=trace` - Show trace for shopfront crates only
/// - Default: INFO level
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,shopfront=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::TRACE)
        .init();
}
