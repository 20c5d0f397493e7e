//! # shopfront-browse: Event-Driven Browse Controller
//!
//! Async orchestration layer for the Shopfront catalog view. Everything
//! stateful and I/O-shaped lives here; the decisions themselves are pure
//! functions imported from `shopfront-core`.
//!
//! ## Module Organization
//! ```text
//! shopfront_browse/
//! ├── lib.rs          ◄─── You are here (exports)
//! ├── service.rs      ◄─── CatalogService / CartService collaborator traits
//! ├── controller.rs   ◄─── BrowseController, snapshots, listener task
//! └── bin/
//!     └── demo.rs     ◄─── In-memory end-to-end walkthrough
//! ```
//!
//! ## Event Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Browse Event Flow                                  │
//! │                                                                         │
//! │  Router ──mpsc──► BrowseController ──trait──► CatalogService (remote)   │
//! │                        │      ▲                                         │
//! │                        │      └────trait────► CartService (remote)      │
//! │                        │                                                │
//! │                        └──watch──► ListingSnapshot ──► rendering layer  │
//! │                                                                         │
//! │  Single controller task, no locking shared across instances; a stale    │
//! │  remote response is discarded by sequence number, never applied.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod controller;
pub mod service;

pub use controller::{BrowseController, BrowseHandle, ListingSnapshot};
pub use service::{CartService, CatalogService, ServiceError, ServiceResult};
