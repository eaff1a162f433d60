//! # shopcart
//!
//! Coordinator and terminal session for the shopping cart engine.
//!
//! ## Module Organization
//! ```text
//! shopcart/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── config.rs       ◄─── AppConfig (TOML + env overrides)
//! ├── controller.rs   ◄─── CartController: state, persistence, capabilities
//! ├── state.rs        ◄─── SharedCart for multi-threaded hosts
//! ├── shell.rs        ◄─── Line commands and the session loop
//! ├── services/
//! │   ├── catalog.rs  ◄─── Catalog trait, static / JSON file catalogs
//! │   ├── renderer.rs ◄─── Renderer trait, CartView, TerminalRenderer
//! │   ├── notifier.rs ◄─── Notifier trait, Notification
//! │   └── confirm.rs  ◄─── Confirm trait
//! └── error.rs        ◄─── AppError / ErrorCode
//! ```
//!
//! ## Embedding
//! [`run`] is the terminal front end: one thread, one [`CartController`].
//! Hosts that drive a cart from several threads build on
//! [`state::SharedCart`] with a [`shopcart_store::CartRepository`] instead.

pub mod config;
pub mod controller;
pub mod error;
pub mod services;
pub mod shell;
pub mod state;

use shopcart_store::{CartRepository, FileStorage, Storage};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::AppConfig;
use controller::CartController;
use error::AppResult;
use services::{notifier_for, JsonFileCatalog, StaticCatalog, StdinConfirm, TerminalRenderer};

/// Runs an interactive cart session on the terminal.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Session Startup                                   │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: info,shopcart=debug, override with RUST_LOG              │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • shopcart.toml / $SHOPCART_CONFIG, then SHOPCART_* variables       │
/// │                                                                         │
/// │  3. Open Storage ─────────────────────────────────────────────────────► │
/// │     • [storage] dir, or the platform data directory                     │
/// │     • Hydrate the persisted cart                                        │
/// │                                                                         │
/// │     • Notifications go to the [notifications] sink (console or log)     │
/// │                                                                         │
/// │  4. Load Catalog ─────────────────────────────────────────────────────► │
/// │     • [catalog] path, bounded by timeout_ms                             │
/// │     • Failure leaves an empty catalog; the session still starts         │
/// │                                                                         │
/// │  5. Read Commands ────────────────────────────────────────────────────► │
/// │     • Until quit or end of input                                        │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> AppResult<()> {
    init_tracing();

    info!("Starting shopcart");

    let config = AppConfig::load_or_default(None);

    let storage = match &config.storage.dir {
        Some(dir) => FileStorage::open(dir)?,
        None => FileStorage::open_default()?,
    };
    info!(dir = ?storage.dir(), "Storage opened");

    let storage: Box<dyn Storage> = Box::new(storage);
    let repository = CartRepository::with_key(storage, config.storage.cart_key.clone());

    let mut controller = CartController::new(
        repository,
        config.shipping_policy(),
        Box::new(TerminalRenderer::new(config.clone())),
        notifier_for(config.notifications.sink),
        Box::new(StdinConfirm),
    )
    .with_notification_duration(config.notification_duration());

    let loaded = match &config.catalog.path {
        Some(path) => {
            let catalog = JsonFileCatalog::new(path).with_delay(config.catalog_delay());
            controller
                .load_catalog(&catalog, config.catalog_timeout())
                .await
        }
        None => {
            warn!("No catalog path configured, starting with an empty catalog");
            let catalog = StaticCatalog::default().with_delay(config.catalog_delay());
            controller
                .load_catalog(&catalog, config.catalog_timeout())
                .await
        }
    };
    if let Err(e) = loaded {
        warn!(error = %e, "Continuing without products");
    }

    shell::run_session(&mut controller, shell::stdin_lines())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=shopcart_store=trace` - Trace the storage crate only
/// - Default: INFO, DEBUG for this crate
///
/// Logs go to stderr so they never interleave with the cart on stdout.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,shopcart=debug"));

    // A second call (tests, embedding hosts) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
