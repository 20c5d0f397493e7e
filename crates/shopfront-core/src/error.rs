//! # Error Types
//!
//! Domain-specific error types for shopfront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shopfront-core errors (this file)                                     │
//! │  └── BrowseError      - Navigation/reconciliation failures             │
//! │                                                                         │
//! │  shopfront-browse errors (separate crate)                              │
//! │  └── ServiceError     - Remote collaborator failures                   │
//! │                                                                         │
//! │  Flow: BrowseError / ServiceError → ListingSnapshot.load_error         │
//! │        → Frontend error indicator                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (the offending param value, etc.)
//! 3. Errors are enum variants, never String
//! 4. A failed navigation leaves the last good listing untouched

use thiserror::Error;

// =============================================================================
// Browse Error
// =============================================================================

/// Navigation and reconciliation errors.
///
/// These errors stop a navigation event before any remote call is issued;
/// the previous listing state is left exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BrowseError {
    /// Search mode was detected but the keyword parameter is empty.
    ///
    /// ## When This Occurs
    /// Search mode is chosen because the `keyword` param is *present*; an
    /// empty value after that point is an internal contradiction in the
    /// route, not a user mistake.
    #[error("search mode requires a keyword parameter")]
    MissingKeyword,

    /// The `id` route parameter is present but does not parse as an integer.
    ///
    /// ## When This Occurs
    /// - Hand-edited URL (`/category/abc/Books`)
    /// - A broken link in the frontend router table
    ///
    /// The navigation fails gracefully instead of propagating a bogus
    /// category id to the catalog service.
    #[error("category id '{value}' is not numeric")]
    NonNumericCategoryId { value: String },

    /// A page size of zero was requested from the page-size selector.
    #[error("page size must be positive, got {0}")]
    InvalidPageSize(u32),

    /// A page jump to page 0; user-facing page numbers are 1-based.
    #[error("page number must be at least 1, got {0}")]
    InvalidPageNumber(u32),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with BrowseError.
pub type BrowseResult<T> = Result<T, BrowseError>;

// =============================================================================
// Unit Tests
// =============================================================================
