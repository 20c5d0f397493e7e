//! # Listing State & Reconciliation
//!
//! The pagination/search reconciliation logic - the one decision the browse
//! view actually has to get right on every navigation event.
//!
//! ## Reconciliation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Navigation Reconciliation                            │
//! │                                                                         │
//! │  Route params snapshot                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  keyword param present?                                                 │
//! │       │                                                                 │
//! │   ┌───┴────────────────┐                                                │
//! │   ▼ YES                ▼ NO                                             │
//! │  SEARCH BRANCH        CATEGORY BRANCH                                   │
//! │  keyword changed? ──► id param? parse : default (1, "Books")           │
//! │  reset page to 1      category changed? reset page to 1                │
//! │       │                    │                                            │
//! │       ▼                    ▼                                            │
//! │  Keyword query        Category query                                    │
//! │  (page_number - 1, size, kw)   (page_number - 1, size, category_id)    │
//! │                                                                         │
//! │  Always re-derived from scratch: the navigation source may re-emit     │
//! │  identical snapshots and must land on the identical decision.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Purity
//! `reconcile` and `apply_page` never touch I/O and never mutate in place:
//! previous-context detection (`previous_keyword`, `previous_category_id`)
//! is explicit state threaded through the function, so every decision is
//! reproducible in a unit test with no mocks.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{BrowseError, BrowseResult};
use crate::params::{RouteParams, PARAM_ID, PARAM_KEYWORD, PARAM_NAME};
use crate::types::{Category, PagedProducts, Product};
use crate::DEFAULT_PAGE_SIZE;

// =============================================================================
// Listing State
// =============================================================================

/// The full state of the catalog listing view.
///
/// ## Invariants
/// - `page_number` is 1-based and always ≥ 1; the remote index is derived
///   as `page_number - 1` at the query boundary and reconstructed as
///   `remote + 1` when a page is applied
/// - `products` is replaced wholesale per result, never patched
/// - `previous_*` fields exist only to detect a context change; `None`
///   means "no fetch has happened yet", so a first navigation never
///   falsely matches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ListingState {
    /// Products on the current page.
    pub products: Vec<Product>,

    /// 1-based page number shown to the user.
    pub page_number: u32,

    /// User-selected page size (server may clamp it; the echo wins).
    pub page_size: u32,

    /// Authoritative total count from the last result.
    pub total_elements: u64,

    /// The active category.
    pub category: Category,

    /// Category id used for the last category fetch.
    pub previous_category_id: Option<i64>,

    /// Keyword used for the last search fetch.
    pub previous_keyword: Option<String>,

    /// True iff the current navigation parameters contain a keyword.
    pub search_mode: bool,
}

impl ListingState {
    /// A fresh listing: empty grid, page 1, default page size, default
    /// category, no previous context.
    pub fn new() -> Self {
        ListingState {
            products: Vec::new(),
            page_number: 1,
            page_size: DEFAULT_PAGE_SIZE,
            total_elements: 0,
            category: Category::default_category(),
            previous_category_id: None,
            previous_keyword: None,
            search_mode: false,
        }
    }

    /// Applies a page-size change from the selector: new size, back to
    /// page 1. The caller re-runs [`reconcile`] with the held params.
    pub fn with_page_size(&self, page_size: u32) -> BrowseResult<Self> {
        if page_size == 0 {
            return Err(BrowseError::InvalidPageSize(page_size));
        }
        let mut next = self.clone();
        next.page_size = page_size;
        next.page_number = 1;
        Ok(next)
    }

    /// Applies a page jump from the pagination controls.
    ///
    /// The jump only moves the pointer; whether it survives the next
    /// [`reconcile`] depends on the context staying the same.
    pub fn with_page(&self, page_number: u32) -> BrowseResult<Self> {
        if page_number == 0 {
            return Err(BrowseError::InvalidPageNumber(page_number));
        }
        let mut next = self.clone();
        next.page_number = page_number;
        Ok(next)
    }
}

impl Default for ListingState {
    fn default() -> Self {
        ListingState::new()
    }
}

// =============================================================================
// Catalog Query
// =============================================================================

/// The single remote call a reconciliation decides to issue.
///
/// `page_index` is the remote **0-based** index, always exactly
/// `page_number - 1` of the state the query was derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogQuery {
    /// Fetch one page of a category listing.
    Category {
        page_index: u32,
        page_size: u32,
        category_id: i64,
    },
    /// Fetch one page of keyword search results.
    Keyword {
        page_index: u32,
        page_size: u32,
        keyword: String,
    },
}

// =============================================================================
// Reconciliation
// =============================================================================

/// Decides, for one navigation event, which remote query to issue and
/// whether pagination resets.
///
/// Pure: `(previous state, current params) -> (new state, query)`. The
/// returned state already has `previous_keyword` / `previous_category_id`
/// recorded, so feeding the same params back in is idempotent (no reset).
///
/// ## Errors
/// - [`BrowseError::MissingKeyword`] if the keyword param is present but
///   empty (search mode is a contradiction without a keyword)
/// - [`BrowseError::NonNumericCategoryId`] if the `id` param does not
///   parse; the navigation fails before any remote call is chosen
pub fn reconcile(
    state: &ListingState,
    params: &RouteParams,
) -> BrowseResult<(ListingState, CatalogQuery)> {
    let mut next = state.clone();
    next.search_mode = params.has(PARAM_KEYWORD);

    if next.search_mode {
        reconcile_search(next, params)
    } else {
        reconcile_category(next, params)
    }
}

/// Search branch: keyword listing with reset-on-new-keyword.
fn reconcile_search(
    mut next: ListingState,
    params: &RouteParams,
) -> BrowseResult<(ListingState, CatalogQuery)> {
    let keyword = params
        .get(PARAM_KEYWORD)
        .filter(|kw| !kw.is_empty())
        .ok_or(BrowseError::MissingKeyword)?;

    // A different keyword than the previous fetch starts over at page 1
    if next.previous_keyword.as_deref() != Some(keyword) {
        next.page_number = 1;
    }
    next.previous_keyword = Some(keyword.to_string());

    let query = CatalogQuery::Keyword {
        page_index: next.page_number - 1,
        page_size: next.page_size,
        keyword: keyword.to_string(),
    };
    Ok((next, query))
}

/// Category branch: category listing with reset-on-new-category.
fn reconcile_category(
    mut next: ListingState,
    params: &RouteParams,
) -> BrowseResult<(ListingState, CatalogQuery)> {
    next.category = match params.get(PARAM_ID) {
        Some(raw) => {
            let id: i64 = raw
                .parse()
                .map_err(|_| BrowseError::NonNumericCategoryId {
                    value: raw.to_string(),
                })?;
            // The name param is display-only; a missing one falls back to
            // the id so the header never renders empty
            let name = params
                .get(PARAM_NAME)
                .map(str::to_string)
                .unwrap_or_else(|| id.to_string());
            Category::new(id, name)
        }
        None => Category::default_category(),
    };

    // A different category than the previous fetch starts over at page 1
    if next.previous_category_id != Some(next.category.id) {
        next.page_number = 1;
    }
    next.previous_category_id = Some(next.category.id);

    let query = CatalogQuery::Category {
        page_index: next.page_number - 1,
        page_size: next.page_size,
        category_id: next.category.id,
    };
    Ok((next, query))
}

// =============================================================================
// Result Mapping
// =============================================================================

/// Maps a successful paginated response into listing state.
///
/// Products are replaced wholesale. The server's page metadata is
/// authoritative: `page_number` becomes the remote index + 1 and the echoed
/// page size overwrites the requested one (this is how the server clamps
/// oversized requests).
pub fn apply_page(state: &ListingState, page: PagedProducts) -> ListingState {
    let mut next = state.clone();
    next.products = page.products;
    next.page_number = page.page.number + 1;
    next.page_size = page.page.size;
    next.total_elements = page.page.total_elements;
    next
}

// =============================================================================
// Unit Tests
// =============================================================================
