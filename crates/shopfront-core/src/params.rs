//! # Route Parameters
//!
//! Owned snapshots of navigation route parameters.
//!
//! ## Recognized Parameters
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Route Parameter Snapshot                             │
//! │                                                                         │
//! │  Route                          Params                                  │
//! │  ─────                          ──────                                  │
//! │  /products                      (empty)         → default category     │
//! │  /category/2/Coffee%20Mugs      id=2 name=...   → category listing     │
//! │  /search/harry                  keyword=harry   → keyword search       │
//! │                                                                         │
//! │  The routing framework itself is an external collaborator; it hands    │
//! │  this core one immutable snapshot per navigation event.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Snapshots are plain owned data so the controller can hold the last one
//! and replay it when the page size changes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Parameter name carrying the category id.
pub const PARAM_ID: &str = "id";

/// Parameter name carrying the category display name.
pub const PARAM_NAME: &str = "name";

/// Parameter name carrying the search keyword.
pub const PARAM_KEYWORD: &str = "keyword";

/// An immutable snapshot of route parameters for one navigation event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteParams {
    params: BTreeMap<String, String>,
}

impl RouteParams {
    /// Creates an empty snapshot (the storefront landing route).
    pub fn new() -> Self {
        RouteParams::default()
    }

    /// Builder-style insertion, mainly for tests and the demo binary.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Snapshot for a category route (`id` + `name` params).
    pub fn category(id: i64, name: impl Into<String>) -> Self {
        RouteParams::new()
            .with(PARAM_ID, id.to_string())
            .with(PARAM_NAME, name)
    }

    /// Snapshot for a search route (`keyword` param).
    pub fn keyword(keyword: impl Into<String>) -> Self {
        RouteParams::new().with(PARAM_KEYWORD, keyword)
    }

    /// Whether the snapshot contains a parameter.
    pub fn has(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    /// Returns a parameter value if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}
