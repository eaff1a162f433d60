//! # Cart Controller
//!
//! Owns the single live `CartState` and wires every transition to the
//! injected capabilities.
//!
//! ## Transition Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    One user action                                      │
//! │                                                                         │
//! │  add / remove / set_quantity / increment / decrement / clear            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CartState::<transition>(&state) ──► next state                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌────────────────────────────────────────────────────────────────┐    │
//! │  │  1. Replace state                                              │    │
//! │  │  2. Persist snapshot          (CartRepository::save)           │    │
//! │  │  3. Render cart + totals      (Renderer::render_cart)          │    │
//! │  │  4. Notify                    (Notifier::show)                 │    │
//! │  └────────────────────────────────────────────────────────────────┘    │
//! │                                                                         │
//! │  A failed save is returned to the caller; the new state stays.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Decrement Confirmation
//! Dropping a line from quantity 1 to 0 with `decrement` asks
//! [`Confirm`] first. The engine's own `set_quantity(id, 0)` never asks.

use std::time::Duration;

use shopcart_core::{CartState, CartTotals, Product, ShippingPolicy};
use shopcart_store::{CartRepository, Storage};
use tracing::{debug, error, info, warn};

use crate::error::{AppError, AppResult};
use crate::services::{
    fetch_with_timeout, CartView, Catalog, Confirm, Notification, NotificationLevel, Notifier,
    Renderer,
};

/// How long a notification stays up unless configured otherwise.
pub const DEFAULT_NOTIFICATION_DURATION: Duration = Duration::from_millis(3000);

/// Coordinates cart state, persistence and presentation.
pub struct CartController {
    state: CartState,
    repository: CartRepository<Box<dyn Storage>>,
    renderer: Box<dyn Renderer>,
    notifier: Box<dyn Notifier>,
    confirm: Box<dyn Confirm>,
    policy: ShippingPolicy,
    products: Vec<Product>,
    notification_duration: Duration,
}

impl CartController {
    /// Hydrates the cart from the repository and renders it once.
    pub fn new(
        repository: CartRepository<Box<dyn Storage>>,
        policy: ShippingPolicy,
        renderer: Box<dyn Renderer>,
        notifier: Box<dyn Notifier>,
        confirm: Box<dyn Confirm>,
    ) -> Self {
        let state = repository.load();
        info!(
            key = repository.key(),
            items = state.item_count(),
            "Cart controller ready"
        );

        let controller = CartController {
            state,
            repository,
            renderer,
            notifier,
            confirm,
            policy,
            products: Vec::new(),
            notification_duration: DEFAULT_NOTIFICATION_DURATION,
        };
        controller.renderer.render_cart(&controller.view());
        controller
    }

    /// Sets how long notifications stay visible.
    pub fn with_notification_duration(mut self, duration: Duration) -> Self {
        self.notification_duration = duration;
        self
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Fetches the product list and renders it.
    ///
    /// ## Errors
    /// Timeout or catalog failure. The error is rendered and the catalog is
    /// left empty; the cart keeps working.
    pub async fn load_catalog<C: Catalog + Sync>(
        &mut self,
        catalog: &C,
        timeout: Duration,
    ) -> AppResult<usize> {
        match fetch_with_timeout(catalog, timeout).await {
            Ok(products) => {
                info!(count = products.len(), "Products available");
                self.products = products;
                self.renderer.render_products(&self.products);
                Ok(self.products.len())
            }
            Err(e) => {
                self.products.clear();
                self.report_error(&e);
                Err(e)
            }
        }
    }

    /// Products from the last successful catalog load.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Re-renders the product list.
    pub fn show_products(&self) {
        self.renderer.render_products(&self.products);
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Adds one unit of the catalog product with `id`.
    pub fn add_product(&mut self, id: &str) -> AppResult<()> {
        let product = self
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| AppError::ProductNotFound(id.to_string()))?;
        self.add(&product)
    }

    /// Adds one unit of `product`.
    pub fn add(&mut self, product: &Product) -> AppResult<()> {
        let next = self.state.add_item(product)?;
        debug!(id = %product.id, "add_item");

        let result = self.commit(next);
        self.notify(
            NotificationLevel::Success,
            format!("{} added to cart", product.name),
        );
        result
    }

    /// Removes the line with `id`. Unknown ids change nothing.
    pub fn remove(&mut self, id: &str) -> AppResult<()> {
        let Some(name) = self.state.get(id).map(|item| item.name.clone()) else {
            debug!(id, "remove_item: not in cart");
            return Ok(());
        };
        debug!(id, "remove_item");

        let result = self.commit(self.state.remove_item(id));
        self.notify(NotificationLevel::Info, format!("{} removed", name));
        result
    }

    /// Replaces a line's quantity; zero or less removes the line.
    pub fn set_quantity(&mut self, id: &str, quantity: i64) -> AppResult<()> {
        if quantity <= 0 {
            return self.remove(id);
        }
        if !self.state.contains(id) {
            debug!(id, "set_quantity: not in cart");
            return Ok(());
        }
        debug!(id, quantity, "set_quantity");
        self.commit(self.state.set_quantity(id, quantity))
    }

    /// Adds one to a line already in the cart.
    pub fn increment(&mut self, id: &str) -> AppResult<()> {
        let Some(quantity) = self.state.get(id).map(|i| i.quantity.saturating_add(1)) else {
            return Ok(());
        };
        self.set_quantity(id, quantity)
    }

    /// Takes one off a line, asking before the last unit goes.
    pub fn decrement(&mut self, id: &str) -> AppResult<()> {
        let Some(item) = self.state.get(id) else {
            return Ok(());
        };

        if item.quantity > 1 {
            let quantity = item.quantity - 1;
            return self.set_quantity(id, quantity);
        }

        let prompt = format!("Remove {} from cart?", item.name);
        if !self.confirm.confirm(&prompt) {
            debug!(id, "decrement: removal declined");
            return Ok(());
        }
        self.remove(id)
    }

    /// Empties the cart.
    pub fn clear(&mut self) -> AppResult<()> {
        debug!(items = self.state.item_count(), "clear");
        let result = self.commit(self.state.clear());
        self.notify(NotificationLevel::Info, "Cart cleared");
        result
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Current cart state.
    pub fn state(&self) -> &CartState {
        &self.state
    }

    /// Totals for the current state.
    pub fn totals(&self) -> CartTotals {
        CartTotals::compute(&self.state, &self.policy)
    }

    /// Items and totals, as handed to the renderer.
    pub fn view(&self) -> CartView {
        CartView::new(&self.state, &self.policy)
    }

    /// Re-renders the cart.
    pub fn show_cart(&self) {
        self.renderer.render_cart(&self.view());
    }

    /// Logs a failed operation with its error code and renders the message.
    pub fn report_error(&self, error: &AppError) {
        warn!(code = %error.code(), error = %error, "Operation failed");
        self.renderer.render_error(&error.to_string());
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn commit(&mut self, next: CartState) -> AppResult<()> {
        self.state = next;

        let saved = self.repository.save(&self.state);
        if let Err(e) = &saved {
            error!(error = %e, "Failed to persist cart");
        }

        self.renderer.render_cart(&self.view());
        saved.map_err(AppError::from)
    }

    fn notify(&self, level: NotificationLevel, message: impl Into<String>) {
        let notification = Notification::new(level, message, self.notification_duration);
        self.notifier.show(&notification);
    }
}
