//! # Cart Items
//!
//! Construction of cart items from catalog products.
//!
//! ## Add-To-Cart Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Add-To-Cart Flow                                   │
//! │                                                                         │
//! │  Product Grid                 Browse Controller        Cart Service     │
//! │  ────────────                 ─────────────────        ────────────     │
//! │                                                                         │
//! │  Click "Add to Cart" ───────► CartItem::from_product ─► add_to_cart()  │
//! │                               (price frozen here)                       │
//! │                                                                         │
//! │  The browse side never retains the item: ownership moves to the cart   │
//! │  collaborator the moment it is built. Quantity rules, totals, and      │
//! │  availability checks belong to the cart service, not this crate.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::Product;

/// An item handed to the cart collaborator.
///
/// ## Design Notes
/// - `product_id`: reference back to the catalog product
/// - the remaining fields are a frozen copy of the product at the moment
///   "add to cart" was clicked, so the cart displays consistent data even
///   if the catalog changes afterwards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Catalog product id.
    pub product_id: i64,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Image shown on the cart row (frozen).
    pub image_url: String,

    /// Price in cents at time of adding (frozen).
    /// This is critical: we lock in the price when the item is built.
    pub unit_price_cents: i64,

    /// Quantity in cart. A fresh item always starts at 1; the cart
    /// service merges duplicates and adjusts quantities.
    pub quantity: i64,

    /// When this item was added to cart.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    /// Creates a cart item from a product.
    ///
    /// ## Price Freezing
    /// The price is captured at this moment. If the product price changes
    /// in the catalog, this cart item retains the original price.
    pub fn from_product(product: &Product) -> Self {
        CartItem {
            product_id: product.id,
            name: product.name.clone(),
            image_url: product.image_url.clone(),
            unit_price_cents: product.unit_price_cents,
            quantity: 1,
            added_at: Utc::now(),
        }
    }

    /// Line total (unit price × quantity).
    pub fn line_total_cents(&self) -> i64 {
        self.unit_price_cents * self.quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_product(id: i64, price_cents: i64) -> Product {
        Product {
            id,
            sku: format!("SKU-{}", id),
            name: format!("Product {}", id),
            description: None,
            unit_price_cents: price_cents,
            image_url: format!("assets/images/products/{}.png", id),
            active: true,
            units_in_stock: 100,
            date_created: Utc::now(),
            last_updated: Utc::now(),
        }
    }

    #[test]
    fn test_cart_item_freezes_product_fields() {
        let mut product = test_product(7, 1899); // $18.99
        let item = CartItem::from_product(&product);

        // Mutating the product after the fact must not affect the item
        product.unit_price_cents = 99;
        product.name = "Renamed".to_string();

        assert_eq!(item.product_id, 7);
        assert_eq!(item.name, "Product 7");
        assert_eq!(item.unit_price_cents, 1899);
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn test_cart_item_line_total() {
        let product = test_product(1, 999);
        let mut item = CartItem::from_product(&product);
        item.quantity = 3;
        assert_eq!(item.line_total_cents(), 2997);
    }
}
