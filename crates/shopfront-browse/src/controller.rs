//! # Browse Controller
//!
//! The event-driven orchestrator of the catalog view: subscribes to
//! navigation events, runs reconciliation, issues exactly one catalog query
//! per event, and emits listing snapshots for the rendering layer.
//!
//! ## Controller Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    BrowseController Architecture                        │
//! │                                                                         │
//! │  Navigation source          Controller task             View            │
//! │  ─────────────────          ───────────────             ────            │
//! │                                                                         │
//! │  mpsc<RouteParams> ───────► handle_navigation()                         │
//! │                                  │                                      │
//! │                                  ▼                                      │
//! │                             reconcile (pure, shopfront-core)            │
//! │                                  │                                      │
//! │                                  ▼                                      │
//! │                             CatalogService call, tagged with a          │
//! │                             monotonically increasing sequence           │
//! │                                  │                                      │
//! │                        ┌─────────┴──────────┐                           │
//! │                        ▼ latest             ▼ stale                     │
//! │                   apply_page            discarded (debug log)           │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   watch<ListingSnapshot> ─────────────► re-render       │
//! │                                                                         │
//! │  Page-size changes and explicit page jumps replay the HELD params      │
//! │  through the same path; they are not fresh navigation events.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Staleness
//! In-flight calls are never cancelled. Instead every issued query carries a
//! sequence number; a response whose sequence is no longer the latest issued
//! is dropped on arrival, so the last-*issued* query wins rather than the
//! last-*resolved* one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, watch, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use ts_rs::TS;

use shopfront_core::listing::{apply_page, reconcile, CatalogQuery, ListingState};
use shopfront_core::{BrowseResult, CartItem, Category, PagedProducts, Product, RouteParams};

use crate::service::{CartService, CatalogService, ServiceResult};

// =============================================================================
// Listing Snapshot
// =============================================================================

/// What the rendering layer receives after every navigation outcome.
///
/// `load_error` is the explicit error indicator for a failed fetch: the
/// last successfully mapped listing stays in the display fields, and the
/// view decides how to badge the error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ListingSnapshot {
    /// Products on the current page.
    pub products: Vec<Product>,

    /// 1-based page number.
    pub page_number: u32,

    /// Page size in effect.
    pub page_size: u32,

    /// Total elements across all pages.
    pub total_elements: u64,

    /// The active category.
    pub category: Category,

    /// Whether a keyword search is being displayed.
    pub search_mode: bool,

    /// Error from the most recent navigation, if it failed.
    pub load_error: Option<String>,
}

impl ListingSnapshot {
    fn of(state: &ListingState, load_error: Option<String>) -> Self {
        ListingSnapshot {
            products: state.products.clone(),
            page_number: state.page_number,
            page_size: state.page_size,
            total_elements: state.total_elements,
            category: state.category.clone(),
            search_mode: state.search_mode,
            load_error,
        }
    }
}

// =============================================================================
// Browse Controller
// =============================================================================

/// Orchestrates the catalog browsing view.
///
/// One controller instance per view. All state is owned here; the
/// navigation source and the rendering layer only touch it through the
/// params channel and the snapshot watch.
pub struct BrowseController {
    /// Catalog query collaborator.
    catalog: Arc<dyn CatalogService>,

    /// Cart collaborator.
    cart: Arc<dyn CartService>,

    /// Current listing state.
    state: Arc<RwLock<ListingState>>,

    /// Last route-parameter snapshot, replayed on page-size changes.
    held_params: Arc<RwLock<RouteParams>>,

    /// Sequence of the most recently issued catalog query.
    issued: AtomicU64,

    /// Snapshot emitter.
    snapshot_tx: watch::Sender<ListingSnapshot>,

    /// Kept receiver so emission never fails with no subscribers.
    snapshot_rx: watch::Receiver<ListingSnapshot>,
}

impl BrowseController {
    /// Creates a controller over the given collaborators with a fresh
    /// listing (default category, page 1, default page size).
    pub fn new(catalog: Arc<dyn CatalogService>, cart: Arc<dyn CartService>) -> Self {
        let state = ListingState::new();
        let (snapshot_tx, snapshot_rx) = watch::channel(ListingSnapshot::of(&state, None));

        BrowseController {
            catalog,
            cart,
            state: Arc::new(RwLock::new(state)),
            held_params: Arc::new(RwLock::new(RouteParams::new())),
            issued: AtomicU64::new(0),
            snapshot_tx,
            snapshot_rx,
        }
    }

    /// Subscribes the rendering layer to listing snapshots.
    pub fn subscribe(&self) -> watch::Receiver<ListingSnapshot> {
        self.snapshot_rx.clone()
    }

    /// Returns a copy of the current listing state.
    pub async fn listing(&self) -> ListingState {
        self.state.read().await.clone()
    }

    /// Handles one navigation event.
    ///
    /// Stores the params as the held snapshot, reconciles, and issues the
    /// decided query. A reconciliation failure (non-numeric category id,
    /// contradictory search route) is returned to the caller *and* surfaced
    /// through the snapshot; the listing itself is left untouched. Remote
    /// failures are not errors here - they surface only as `load_error`.
    pub async fn handle_navigation(&self, params: RouteParams) -> BrowseResult<()> {
        *self.held_params.write().await = params.clone();
        self.refresh(&params).await
    }

    /// Handles a page-size change from the selector: new size, back to
    /// page 1, then the held params replayed through the fetch path.
    pub async fn update_page_size(&self, page_size: u32) -> BrowseResult<()> {
        let resized = self.state.read().await.with_page_size(page_size)?;
        *self.state.write().await = resized;

        let params = self.held_params.read().await.clone();
        self.refresh(&params).await
    }

    /// Jumps to a page of the current listing (pagination controls).
    pub async fn goto_page(&self, page_number: u32) -> BrowseResult<()> {
        let paged = self.state.read().await.with_page(page_number)?;
        *self.state.write().await = paged;

        let params = self.held_params.read().await.clone();
        self.refresh(&params).await
    }

    /// Forwards a product to the cart collaborator.
    ///
    /// Fire-and-forget: the item is built, ownership moves to the cart
    /// service, and a failure is logged rather than retried.
    pub async fn add_to_cart(&self, product: &Product) {
        info!(
            name = %product.name,
            unit_price_cents = product.unit_price_cents,
            "Adding to cart"
        );

        let item = CartItem::from_product(product);
        if let Err(e) = self.cart.add_to_cart(item).await {
            error!(error = %e, product_id = product.id, "Cart forward failed");
        }
    }

    /// Reconciles against the given params and issues the catalog query.
    async fn refresh(&self, params: &RouteParams) -> BrowseResult<()> {
        let current = self.state.read().await.clone();

        let (next, query) = match reconcile(&current, params) {
            Ok(decision) => decision,
            Err(e) => {
                warn!(error = %e, "Navigation rejected");
                self.emit(&current, Some(e.to_string()));
                return Err(e);
            }
        };

        // Commit the reconciled context (page reset, previous keyword /
        // category) before the call goes out, exactly once per event
        *self.state.write().await = next;

        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(seq, ?query, "Issuing catalog query");

        let outcome = self.dispatch(&query).await;

        // A newer query was issued while this one was in flight: its
        // response is stale and must not overwrite the listing
        if self.issued.load(Ordering::SeqCst) != seq {
            debug!(seq, "Stale response discarded");
            return Ok(());
        }

        match outcome {
            Ok(page) => {
                let mut state = self.state.write().await;
                // Re-check under the lock; a newer navigation may have won
                // the race between the check above and this write
                if self.issued.load(Ordering::SeqCst) != seq {
                    debug!(seq, "Stale response discarded");
                    return Ok(());
                }
                let mapped = apply_page(&state, page);
                *state = mapped;
                let emitted = (*state).clone();
                drop(state);
                self.emit(&emitted, None);
            }
            Err(e) => {
                error!(error = %e, ?query, "Catalog query failed");
                let state = self.state.read().await.clone();
                self.emit(&state, Some(e.to_string()));
            }
        }

        Ok(())
    }

    /// Issues the single remote call a reconciliation decided on.
    async fn dispatch(&self, query: &CatalogQuery) -> ServiceResult<PagedProducts> {
        match query {
            CatalogQuery::Category {
                page_index,
                page_size,
                category_id,
            } => {
                self.catalog
                    .get_product_list_paginate(*page_index, *page_size, *category_id)
                    .await
            }
            CatalogQuery::Keyword {
                page_index,
                page_size,
                keyword,
            } => {
                self.catalog
                    .search_products_paginate(*page_index, *page_size, keyword)
                    .await
            }
        }
    }

    fn emit(&self, state: &ListingState, load_error: Option<String>) {
        // Never fails: the controller keeps its own receiver alive
        let _ = self.snapshot_tx.send(ListingSnapshot::of(state, load_error));
    }

    /// Spawns the navigation listener task.
    ///
    /// The task re-runs reconciliation on every emission (including
    /// re-emissions of identical params) and stops when the navigation
    /// source closes its channel or the handle fires shutdown, releasing
    /// the subscription on every exit path.
    pub fn spawn(self: &Arc<Self>, mut params_rx: mpsc::Receiver<RouteParams>) -> BrowseHandle {
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel(1);
        let controller = Arc::clone(self);

        let task = tokio::spawn(async move {
            loop {
                tokio::select! {
                    maybe_params = params_rx.recv() => match maybe_params {
                        Some(params) => {
                            // Rejected navigations already surfaced through
                            // the snapshot; the loop keeps listening
                            if let Err(e) = controller.handle_navigation(params).await {
                                warn!(error = %e, "Navigation event rejected");
                            }
                        }
                        None => {
                            info!("Navigation source closed");
                            break;
                        }
                    },
                    _ = shutdown_rx.recv() => {
                        info!("Browse controller received shutdown");
                        break;
                    }
                }
            }

            info!("Browse controller stopped");
        });

        BrowseHandle { shutdown_tx, task }
    }
}

// =============================================================================
// Browse Handle (for external control)
// =============================================================================

/// Handle for tearing down a running browse controller task.
///
/// Dropping the navigation sender has the same effect; the handle exists
/// for explicit teardown when the view is destroyed before the source.
pub struct BrowseHandle {
    /// Shutdown sender.
    shutdown_tx: mpsc::Sender<()>,

    /// The spawned listener task.
    task: JoinHandle<()>,
}

impl BrowseHandle {
    /// Signals the controller task to stop and waits for it to finish.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
        let _ = self.task.await;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::{ServiceError, ServiceResult};
    use async_trait::async_trait;
    use chrono::Utc;
    use shopfront_core::types::PageMeta;
    use std::sync::atomic::AtomicBool;
    use std::sync::Mutex as StdMutex;
    use tokio::sync::Notify;

    fn test_product(id: i64) -> Product {
        Product {
            id,
            sku: format!("BOOK-{}", id),
            name: format!("Book {}", id),
            description: None,
            unit_price_cents: 1299,
            image_url: format!("assets/images/products/books/{}.png", id),
            active: true,
            units_in_stock: 100,
            date_created: Utc::now(),
            last_updated: Utc::now(),
        }
    }

    fn page_of(number: u32, size: u32, total: u64) -> PagedProducts {
        PagedProducts {
            products: vec![test_product(1)],
            page: PageMeta {
                number,
                size,
                total_elements: total,
            },
        }
    }

    // -------------------------------------------------------------------------
    // Fakes
    // -------------------------------------------------------------------------

    /// Records every call and echoes the request back as page metadata.
    #[derive(Default)]
    struct RecordingCatalog {
        calls: StdMutex<Vec<RecordedCall>>,
        fail: AtomicBool,
    }

    #[derive(Debug, Clone, PartialEq)]
    enum RecordedCall {
        Category {
            page_index: u32,
            page_size: u32,
            category_id: i64,
        },
        Search {
            page_index: u32,
            page_size: u32,
            keyword: String,
        },
    }

    impl RecordingCatalog {
        fn calls(&self) -> Vec<RecordedCall> {
            self.calls.lock().unwrap().clone()
        }

        fn respond(&self, number: u32, size: u32) -> ServiceResult<PagedProducts> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(ServiceError::Remote("500 Internal Server Error".into()));
            }
            Ok(page_of(number, size, 42))
        }
    }

    #[async_trait]
    impl CatalogService for RecordingCatalog {
        async fn get_product_list_paginate(
            &self,
            page_index: u32,
            page_size: u32,
            category_id: i64,
        ) -> ServiceResult<PagedProducts> {
            self.calls.lock().unwrap().push(RecordedCall::Category {
                page_index,
                page_size,
                category_id,
            });
            self.respond(page_index, page_size)
        }

        async fn search_products_paginate(
            &self,
            page_index: u32,
            page_size: u32,
            keyword: &str,
        ) -> ServiceResult<PagedProducts> {
            self.calls.lock().unwrap().push(RecordedCall::Search {
                page_index,
                page_size,
                keyword: keyword.to_string(),
            });
            self.respond(page_index, page_size)
        }
    }

    /// Blocks the "slow" keyword until released; used to force responses
    /// to resolve out of order deterministically.
    #[derive(Default)]
    struct GatedCatalog {
        entered: Notify,
        release: Notify,
    }

    #[async_trait]
    impl CatalogService for GatedCatalog {
        async fn get_product_list_paginate(
            &self,
            page_index: u32,
            page_size: u32,
            _category_id: i64,
        ) -> ServiceResult<PagedProducts> {
            Ok(page_of(page_index, page_size, 0))
        }

        async fn search_products_paginate(
            &self,
            page_index: u32,
            page_size: u32,
            keyword: &str,
        ) -> ServiceResult<PagedProducts> {
            if keyword == "slow" {
                self.entered.notify_one();
                self.release.notified().await;
                Ok(page_of(page_index, page_size, 1))
            } else {
                Ok(page_of(page_index, page_size, 2))
            }
        }
    }

    #[derive(Default)]
    struct RecordingCart {
        items: StdMutex<Vec<CartItem>>,
    }

    #[async_trait]
    impl CartService for RecordingCart {
        async fn add_to_cart(&self, item: CartItem) -> ServiceResult<()> {
            self.items.lock().unwrap().push(item);
            Ok(())
        }
    }

    fn controller_with(catalog: Arc<dyn CatalogService>) -> BrowseController {
        BrowseController::new(catalog, Arc::new(RecordingCart::default()))
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_first_navigation_fetches_default_category() {
        let catalog = Arc::new(RecordingCatalog::default());
        let controller = controller_with(catalog.clone());

        controller.handle_navigation(RouteParams::new()).await.unwrap();

        assert_eq!(
            catalog.calls(),
            vec![RecordedCall::Category {
                page_index: 0,
                page_size: 5,
                category_id: 1,
            }]
        );

        let listing = controller.listing().await;
        assert_eq!(listing.category, Category::new(1, "Books"));
        assert_eq!(listing.page_number, 1);
        assert_eq!(listing.total_elements, 42);
    }

    #[tokio::test]
    async fn test_category_change_resets_pagination() {
        let catalog = Arc::new(RecordingCatalog::default());
        let controller = controller_with(catalog.clone());

        controller
            .handle_navigation(RouteParams::category(1, "Books"))
            .await
            .unwrap();
        controller.goto_page(3).await.unwrap();
        controller
            .handle_navigation(RouteParams::category(2, "Coffee Mugs"))
            .await
            .unwrap();

        let last = catalog.calls().pop().unwrap();
        assert_eq!(
            last,
            RecordedCall::Category {
                page_index: 0,
                page_size: 5,
                category_id: 2,
            }
        );
    }

    #[tokio::test]
    async fn test_repeated_keyword_keeps_page() {
        let catalog = Arc::new(RecordingCatalog::default());
        let controller = controller_with(catalog.clone());

        controller
            .handle_navigation(RouteParams::keyword("foo"))
            .await
            .unwrap();
        controller.goto_page(2).await.unwrap();
        controller
            .handle_navigation(RouteParams::keyword("foo"))
            .await
            .unwrap();

        let last = catalog.calls().pop().unwrap();
        assert_eq!(
            last,
            RecordedCall::Search {
                page_index: 1,
                page_size: 5,
                keyword: "foo".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_page_size_change_replays_held_params() {
        let catalog = Arc::new(RecordingCatalog::default());
        let controller = controller_with(catalog.clone());

        controller
            .handle_navigation(RouteParams::category(3, "Mouse Pads"))
            .await
            .unwrap();
        controller.update_page_size(10).await.unwrap();

        let last = catalog.calls().pop().unwrap();
        assert_eq!(
            last,
            RecordedCall::Category {
                page_index: 0,
                page_size: 10,
                category_id: 3,
            }
        );
    }

    #[tokio::test]
    async fn test_non_numeric_category_id_rejected_and_surfaced() {
        let catalog = Arc::new(RecordingCatalog::default());
        let controller = controller_with(catalog.clone());
        let rx = controller.subscribe();

        let params = RouteParams::new().with("id", "abc");
        let err = controller.handle_navigation(params).await.unwrap_err();
        assert!(matches!(
            err,
            shopfront_core::BrowseError::NonNumericCategoryId { .. }
        ));

        // No remote call was issued, the error reached the view
        assert!(catalog.calls().is_empty());
        let snapshot = rx.borrow().clone();
        assert_eq!(
            snapshot.load_error.as_deref(),
            Some("category id 'abc' is not numeric")
        );
    }

    // -------------------------------------------------------------------------
    // Result mapping & failures
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_server_page_metadata_is_authoritative() {
        let catalog = Arc::new(RecordingCatalog::default());
        let controller = controller_with(catalog.clone());

        controller.handle_navigation(RouteParams::new()).await.unwrap();
        // Server answered with page index 0, our page number is index + 1
        let listing = controller.listing().await;
        assert_eq!(listing.page_number, 1);
        assert_eq!(listing.page_size, 5);
        assert_eq!(listing.total_elements, 42);
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_listing_and_sets_error() {
        let catalog = Arc::new(RecordingCatalog::default());
        let controller = controller_with(catalog.clone());
        let rx = controller.subscribe();

        controller.handle_navigation(RouteParams::new()).await.unwrap();
        assert_eq!(controller.listing().await.total_elements, 42);

        catalog.fail.store(true, Ordering::SeqCst);
        controller
            .handle_navigation(RouteParams::category(2, "Coffee Mugs"))
            .await
            .unwrap();

        // Last good products/totals still displayed, error badge raised
        let listing = controller.listing().await;
        assert_eq!(listing.total_elements, 42);
        assert!(!listing.products.is_empty());

        let snapshot = rx.borrow().clone();
        assert_eq!(
            snapshot.load_error.as_deref(),
            Some("remote call failed: 500 Internal Server Error")
        );
    }

    #[tokio::test]
    async fn test_stale_response_discarded() {
        let catalog = Arc::new(GatedCatalog::default());
        let controller = Arc::new(controller_with(catalog.clone()));

        // First search hangs inside the service
        let slow_controller = Arc::clone(&controller);
        let slow = tokio::spawn(async move {
            slow_controller
                .handle_navigation(RouteParams::keyword("slow"))
                .await
        });
        catalog.entered.notified().await;

        // Second search resolves immediately (total_elements = 2)
        controller
            .handle_navigation(RouteParams::keyword("fast"))
            .await
            .unwrap();
        assert_eq!(controller.listing().await.total_elements, 2);

        // Now the first response arrives - and must be dropped
        catalog.release.notify_one();
        slow.await.unwrap().unwrap();
        assert_eq!(controller.listing().await.total_elements, 2);
    }

    // -------------------------------------------------------------------------
    // Cart forwarding
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_add_to_cart_forwards_frozen_snapshot() {
        let cart = Arc::new(RecordingCart::default());
        let controller =
            BrowseController::new(Arc::new(RecordingCatalog::default()), cart.clone());

        let product = test_product(7);
        controller.add_to_cart(&product).await;

        let items = cart.items.lock().unwrap().clone();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].product_id, 7);
        assert_eq!(items[0].unit_price_cents, 1299);
        assert_eq!(items[0].quantity, 1);
    }

    // -------------------------------------------------------------------------
    // Listener task lifecycle
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_spawned_listener_reacts_and_stops_on_source_close() {
        let catalog = Arc::new(RecordingCatalog::default());
        let controller = Arc::new(controller_with(catalog.clone()));
        let mut rx = controller.subscribe();

        let (params_tx, params_rx) = mpsc::channel(8);
        let handle = controller.spawn(params_rx);

        params_tx
            .send(RouteParams::category(2, "Coffee Mugs"))
            .await
            .unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().category, Category::new(2, "Coffee Mugs"));

        // Closing the navigation source releases the subscription
        drop(params_tx);
        handle.shutdown().await;
    }

    #[tokio::test]
    async fn test_shutdown_stops_listener() {
        let controller = Arc::new(controller_with(Arc::new(RecordingCatalog::default())));
        let (_params_tx, params_rx) = mpsc::channel(8);

        let handle = controller.spawn(params_rx);
        // Returns only after the task has actually finished
        handle.shutdown().await;
    }
}
