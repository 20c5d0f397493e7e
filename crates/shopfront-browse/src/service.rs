//! # Collaborator Service Traits
//!
//! Interfaces for the remote collaborators the browse view talks to. The
//! implementations (REST client against the catalog API, cart storage) live
//! outside this workspace; this crate only defines the contracts and tests
//! against in-memory fakes.
//!
//! ## Collaborator Boundaries
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Service Boundaries                                   │
//! │                                                                         │
//! │  BrowseController                                                       │
//! │       │                                                                 │
//! │       ├──► CatalogService ──► GET /products?page=N&size=S&category=C   │
//! │       │    (paginated)        GET /products/search?keyword=K           │
//! │       │                                                                 │
//! │       └──► CartService ─────► cart storage (session/local/remote)      │
//! │            (fire-and-forget)                                            │
//! │                                                                         │
//! │  Both traits are object-safe: the controller holds Arc<dyn ...> so     │
//! │  tests swap in recording fakes without generics leaking upward.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use thiserror::Error;

use shopfront_core::{CartItem, PagedProducts};

// =============================================================================
// Service Error
// =============================================================================

/// Errors surfaced by remote collaborators.
///
/// The browse controller never retries these; it reports them through the
/// listing snapshot's `load_error` field and keeps the last good listing
/// on screen.
#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    /// The remote call completed with a failure (HTTP error, bad payload).
    #[error("remote call failed: {0}")]
    Remote(String),

    /// The collaborator could not be reached at all.
    #[error("service unavailable: {0}")]
    Unavailable(String),
}

/// Convenience type alias for Results with ServiceError.
pub type ServiceResult<T> = Result<T, ServiceError>;

// =============================================================================
// Catalog Service
// =============================================================================

/// Paginated product queries against the catalog.
///
/// Both operations take a **0-based** `page_index`; the 1-based/0-based
/// translation is owned by `shopfront_core::listing`, never by
/// implementations of this trait.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Fetches one page of the product listing for a category.
    async fn get_product_list_paginate(
        &self,
        page_index: u32,
        page_size: u32,
        category_id: i64,
    ) -> ServiceResult<PagedProducts>;

    /// Fetches one page of products matching a search keyword.
    async fn search_products_paginate(
        &self,
        page_index: u32,
        page_size: u32,
        keyword: &str,
    ) -> ServiceResult<PagedProducts>;
}

// =============================================================================
// Cart Service
// =============================================================================

/// The cart collaborator.
///
/// Ownership of the item transfers here; the browse side does not retain
/// it. Quantity merging, totals, and availability rules all belong to the
/// implementation.
#[async_trait]
pub trait CartService: Send + Sync {
    /// Adds an item to the cart.
    async fn add_to_cart(&self, item: CartItem) -> ServiceResult<()>;
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_messages() {
        let err = ServiceError::Remote("500 Internal Server Error".to_string());
        assert_eq!(err.to_string(), "remote call failed: 500 Internal Server Error");

        let err = ServiceError::Unavailable("connection refused".to_string());
        assert_eq!(err.to_string(), "service unavailable: connection refused");
    }
}
