//! # Product Catalog
//!
//! The catalog answers one question, once: which products are for sale.
//!
//! ## Fetch Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  controller.load_catalog(&catalog, timeout)                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  fetch_with_timeout ── tokio::time::timeout ──┐                         │
//! │       │                                       │ elapsed                 │
//! │       ▼                                       ▼                         │
//! │  catalog.fetch_products()               CatalogTimeout(ms)              │
//! │       │  (sleep delay, then answer)                                     │
//! │       ▼                                                                 │
//! │  Vec<Product> ──► renderer.render_products                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use shopcart_core::Product;
use tracing::{debug, info};

use crate::error::{AppError, AppResult};

/// Source of products.
pub trait Catalog {
    /// Fetches the full product list.
    fn fetch_products(&self) -> impl Future<Output = AppResult<Vec<Product>>> + Send;
}

/// Runs a catalog fetch, failing with `CatalogTimeout` if it takes too long.
pub async fn fetch_with_timeout<C: Catalog + Sync>(
    catalog: &C,
    timeout: Duration,
) -> AppResult<Vec<Product>> {
    match tokio::time::timeout(timeout, catalog.fetch_products()).await {
        Ok(result) => result,
        Err(_) => Err(AppError::CatalogTimeout(timeout.as_millis() as u64)),
    }
}

// =============================================================================
// Static Catalog
// =============================================================================

/// In-memory product list answered after an optional delay.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: Vec<Product>,
    delay: Duration,
}

impl StaticCatalog {
    /// Catalog that answers immediately.
    pub fn new(products: Vec<Product>) -> Self {
        StaticCatalog {
            products,
            delay: Duration::ZERO,
        }
    }

    /// Adds simulated latency to every fetch.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl Catalog for StaticCatalog {
    async fn fetch_products(&self) -> AppResult<Vec<Product>> {
        if !self.delay.is_zero() {
            debug!(delay_ms = self.delay.as_millis() as u64, "Delaying catalog response");
            tokio::time::sleep(self.delay).await;
        }
        Ok(self.products.clone())
    }
}

// =============================================================================
// JSON File Catalog
// =============================================================================

/// Reads a JSON array of products from disk on each fetch.
#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    path: PathBuf,
    delay: Duration,
}

impl JsonFileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileCatalog {
            path: path.into(),
            delay: Duration::ZERO,
        }
    }

    /// Adds simulated latency to every fetch.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl Catalog for JsonFileCatalog {
    async fn fetch_products(&self) -> AppResult<Vec<Product>> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let contents = tokio::fs::read_to_string(&self.path).await?;
        let products: Vec<Product> = serde_json::from_str(&contents)
            .map_err(|e| AppError::Catalog(format!("{}: {}", self.path.display(), e)))?;

        info!(path = ?self.path, count = products.len(), "Catalog loaded");
        Ok(products)
    }
}
