//! # Domain Types
//!
//! Core domain types for the catalog browsing view.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    Category     │   │    PageMeta     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  id (i64)       │   │  number (0-based│       │
//! │  │  sku (business) │   │  name           │   │  remote index)  │       │
//! │  │  name           │   │                 │   │  size           │       │
//! │  │  unit_price_cents│  │  default:       │   │  total_elements │       │
//! │  │  image_url      │   │  (1, "Books")   │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  PagedProducts = one page of Products + its PageMeta                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Page Numbering Convention
//! The catalog service pages are **0-based**; everything the user sees is
//! **1-based**. The translation happens in exactly one place each way
//! (`listing::reconcile` going out, `listing::apply_page` coming back), so
//! these types always carry the remote 0-based index.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Product
// =============================================================================

/// A product returned by the catalog service.
///
/// The browse core treats products as opaque display values: nothing here is
/// interpreted beyond rendering and cart-item construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Server-assigned identifier.
    pub id: i64,

    /// Stock Keeping Unit - business identifier.
    pub sku: String,

    /// Display name shown in the product grid.
    pub name: String,

    /// Optional description for the product detail view.
    pub description: Option<String>,

    /// Unit price in cents (smallest currency unit).
    pub unit_price_cents: i64,

    /// Image shown on the product card.
    pub image_url: String,

    /// Whether the product is purchasable.
    pub active: bool,

    /// Units currently in stock.
    pub units_in_stock: i64,

    /// When the product was created.
    #[ts(as = "String")]
    pub date_created: DateTime<Utc>,

    /// When the product was last updated.
    #[ts(as = "String")]
    pub last_updated: DateTime<Utc>,
}

// =============================================================================
// Category
// =============================================================================

/// A catalog classification used to filter the product listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub name: String,
}

impl Category {
    /// Creates a category from an id and display name.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Category {
            id,
            name: name.into(),
        }
    }

    /// The category the storefront lands on when no `id` param is present.
    pub fn default_category() -> Self {
        Category::new(crate::DEFAULT_CATEGORY_ID, crate::DEFAULT_CATEGORY_NAME)
    }
}

// =============================================================================
// Page Metadata
// =============================================================================

/// Page metadata echoed back by the catalog service.
///
/// `number` is the remote **0-based** page index. `size` is authoritative:
/// the server may clamp a requested page size and the echoed value wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// 0-based page index.
    pub number: u32,

    /// Page size actually used by the server.
    pub size: u32,

    /// Total elements across all pages.
    pub total_elements: u64,
}

// =============================================================================
// Paged Products
// =============================================================================

/// One page of products plus its metadata.
///
/// This is the shape every catalog query resolves to, for both the category
/// listing and the keyword search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PagedProducts {
    /// The products on this page.
    pub products: Vec<Product>,

    /// Page metadata (index, size, total count).
    pub page: PageMeta,
}

impl PagedProducts {
    /// An empty page, useful as a fixture base.
    pub fn empty(page: PageMeta) -> Self {
        PagedProducts {
            products: Vec::new(),
            page,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_category() {
        let cat = Category::default_category();
        assert_eq!(cat.id, 1);
        assert_eq!(cat.name, "Books");
    }

    #[test]
    fn test_page_meta_serializes_camel_case() {
        let meta = PageMeta {
            number: 4,
            size: 5,
            total_elements: 42,
        };
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["number"], 4);
        assert_eq!(json["size"], 5);
        assert_eq!(json["totalElements"], 42);
    }
}
