//! # Capability Services
//!
//! Collaborators the [`CartController`](crate::controller::CartController)
//! talks to. Each is a small trait; any implementation is substitutable.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Capability   Trait        Implementations                              │
//! │  ──────────   ─────        ───────────────                              │
//! │  Catalog      Catalog      StaticCatalog, JsonFileCatalog               │
//! │  Render       Renderer     TerminalRenderer                             │
//! │  Toasts       Notifier     LogNotifier, ConsoleNotifier                 │
//! │  Prompt       Confirm      AutoConfirm, StdinConfirm                    │
//! │  Storage      Storage      (shopcart-store)                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod catalog;
pub mod confirm;
pub mod notifier;
pub mod renderer;

pub use catalog::{fetch_with_timeout, Catalog, JsonFileCatalog, StaticCatalog};
pub use confirm::{AutoConfirm, Confirm, StdinConfirm};
pub use notifier::{
    notifier_for, ConsoleNotifier, LogNotifier, Notification, NotificationLevel, Notifier,
};
pub use renderer::{CartView, Renderer, TerminalRenderer};
