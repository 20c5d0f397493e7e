//! # shopfront-core: Pure Browse Logic for Shopfront
//!
//! This crate is the **heart** of the Shopfront catalog browsing view. It
//! contains all listing logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Shopfront Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Storefront Frontend (TypeScript)               │   │
//! │  │    Category Menu ──► Search Box ──► Product Grid ──► Cart      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ route params / listing snapshots       │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                   shopfront-browse                              │   │
//! │  │    BrowseController, CatalogService, CartService               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ shopfront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  params   │  │  listing  │  │   cart    │  │   │
//! │  │   │  Product  │  │RouteParams│  │ reconcile │  │ CartItem  │  │   │
//! │  │   │ PageMeta  │  │ id/name/  │  │ apply_page│  │ snapshot  │  │   │
//! │  │   │           │  │ keyword   │  │           │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Category, PageMeta, PagedProducts)
//! - [`params`] - Route-parameter snapshots (id / name / keyword)
//! - [`listing`] - Listing state and the reconciliation function
//! - [`cart`] - Cart-item construction (price-frozen product snapshots)
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: reconciliation is `(state, params) -> (state, query)`
//! 2. **No I/O**: network, file system, clock reads are FORBIDDEN here
//! 3. **Integer Money**: unit prices are cents (i64), never floats
//! 4. **Explicit Errors**: all errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use shopfront_core::listing::{reconcile, CatalogQuery, ListingState};
//! use shopfront_core::params::RouteParams;
//!
//! // First navigation: no params at all -> default category (1, "Books")
//! let state = ListingState::new();
//! let (state, query) = reconcile(&state, &RouteParams::new()).unwrap();
//!
//! assert_eq!(state.category.id, 1);
//! assert_eq!(state.category.name, "Books");
//! // Remote pages are 0-based: page_number 1 -> page_index 0
//! assert_eq!(
//!     query,
//!     CatalogQuery::Category { page_index: 0, page_size: 5, category_id: 1 }
//! );
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod listing;
pub mod params;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use shopfront_core::Product` instead of
// `use shopfront_core::types::Product`

pub use cart::CartItem;
pub use error::{BrowseError, BrowseResult};
pub use listing::{apply_page, reconcile, CatalogQuery, ListingState};
pub use params::RouteParams;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Category used when a navigation event carries no category parameter.
///
/// The storefront's landing route has no `id` param; the catalog opens on
/// the default category instead of an empty grid.
pub const DEFAULT_CATEGORY_ID: i64 = 1;

/// Display name paired with [`DEFAULT_CATEGORY_ID`].
pub const DEFAULT_CATEGORY_NAME: &str = "Books";

/// Page size a fresh listing starts with, before the user picks another
/// value from the page-size selector.
pub const DEFAULT_PAGE_SIZE: u32 = 5;
