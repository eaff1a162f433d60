//! # App Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     SHOPCART_SHIPPING_FEE=250                                          │
//! │     SHOPCART_STORAGE_DIR=/tmp/cart                                     │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     $SHOPCART_CONFIG, or                                               │
//! │     ~/.config/shopcart/shopcart.toml (Linux)                           │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     free shipping at 5000, fee 100, key "cart"                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [shop]
//! currency_symbol = "$"
//! currency_decimals = 2
//!
//! [shipping]
//! free_shipping_threshold = 5000
//! shipping_fee = 100
//!
//! [storage]
//! dir = "/var/lib/shopcart"
//! cart_key = "cart"
//!
//! [catalog]
//! path = "products.json"
//! delay_ms = 500
//! timeout_ms = 5000
//!
//! [notifications]
//! duration_ms = 3000
//! sink = "console"     # or "log" to route toasts through tracing
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use shopcart_core::{Money, ShippingPolicy, DEFAULT_FREE_SHIPPING_THRESHOLD, DEFAULT_SHIPPING_FEE};
use shopcart_store::DEFAULT_CART_KEY;
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "SHOPCART_CONFIG";

// =============================================================================
// Sections
// =============================================================================

/// Display settings for amounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopSettings {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Digits after the decimal point (0 for currencies without minor units).
    #[serde(default = "default_currency_decimals")]
    pub currency_decimals: u8,
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

fn default_currency_decimals() -> u8 {
    2
}

impl Default for ShopSettings {
    fn default() -> Self {
        ShopSettings {
            currency_symbol: default_currency_symbol(),
            currency_decimals: default_currency_decimals(),
        }
    }
}

/// Shipping policy inputs, in the smallest currency unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingSettings {
    #[serde(default = "default_threshold")]
    pub free_shipping_threshold: i64,

    #[serde(default = "default_fee")]
    pub shipping_fee: i64,
}

fn default_threshold() -> i64 {
    DEFAULT_FREE_SHIPPING_THRESHOLD
}

fn default_fee() -> i64 {
    DEFAULT_SHIPPING_FEE
}

impl Default for ShippingSettings {
    fn default() -> Self {
        ShippingSettings {
            free_shipping_threshold: default_threshold(),
            shipping_fee: default_fee(),
        }
    }
}

/// Where the cart snapshot lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Data directory. `None` uses the platform data dir.
    #[serde(default)]
    pub dir: Option<PathBuf>,

    #[serde(default = "default_cart_key")]
    pub cart_key: String,
}

fn default_cart_key() -> String {
    DEFAULT_CART_KEY.to_string()
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            dir: None,
            cart_key: default_cart_key(),
        }
    }
}

/// Product catalog source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// JSON file holding an array of products.
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Artificial latency before the catalog answers (milliseconds).
    #[serde(default)]
    pub delay_ms: u64,

    /// Give up on the catalog after this long (milliseconds).
    #[serde(default = "default_catalog_timeout")]
    pub timeout_ms: u64,
}

fn default_catalog_timeout() -> u64 {
    5000
}

impl Default for CatalogSettings {
    fn default() -> Self {
        CatalogSettings {
            path: None,
            delay_ms: 0,
            timeout_ms: default_catalog_timeout(),
        }
    }
}

/// Where notifications are delivered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationSink {
    /// Printed to stdout next to the cart.
    #[default]
    Console,
    /// Emitted as tracing events, for unattended sessions.
    Log,
}

/// Toast display settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationSettings {
    #[serde(default = "default_notification_duration")]
    pub duration_ms: u64,

    #[serde(default)]
    pub sink: NotificationSink,
}

fn default_notification_duration() -> u64 {
    3000
}

impl Default for NotificationSettings {
    fn default() -> Self {
        NotificationSettings {
            duration_ms: default_notification_duration(),
            sink: NotificationSink::default(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete app configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub shop: ShopSettings,

    #[serde(default)]
    pub shipping: ShippingSettings,

    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub catalog: CatalogSettings,

    #[serde(default)]
    pub notifications: NotificationSettings,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (explicit path, `$SHOPCART_CONFIG`, or platform default)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self::default();

        let path = config_path
            .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from))
            .or_else(Self::default_config_path);

        if let Some(path) = path {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a TOML document; missing sections fall back to defaults.
    pub fn from_toml(contents: &str) -> AppResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> AppResult<()> {
        if self.shipping.free_shipping_threshold < 0 {
            return Err(AppError::Config(
                "free_shipping_threshold must not be negative".into(),
            ));
        }

        if self.shipping.shipping_fee < 0 {
            return Err(AppError::Config("shipping_fee must not be negative".into()));
        }

        shopcart_store::storage::validate_key(&self.storage.cart_key)
            .map_err(|e| AppError::Config(e.to_string()))?;

        if self.shop.currency_decimals > 4 {
            return Err(AppError::Config(
                "currency_decimals must be between 0 and 4".into(),
            ));
        }

        if self.catalog.timeout_ms == 0 {
            return Err(AppError::Config("catalog timeout_ms must be greater than 0".into()));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(dir) = std::env::var("SHOPCART_STORAGE_DIR") {
            debug!(dir = %dir, "Overriding storage dir from environment");
            self.storage.dir = Some(PathBuf::from(dir));
        }

        if let Ok(key) = std::env::var("SHOPCART_CART_KEY") {
            self.storage.cart_key = key;
        }

        if let Ok(path) = std::env::var("SHOPCART_CATALOG_PATH") {
            self.catalog.path = Some(PathBuf::from(path));
        }

        if let Ok(symbol) = std::env::var("SHOPCART_CURRENCY_SYMBOL") {
            self.shop.currency_symbol = symbol;
        }

        if let Ok(value) = std::env::var("SHOPCART_FREE_SHIPPING_THRESHOLD") {
            match value.parse::<i64>() {
                Ok(v) => self.shipping.free_shipping_threshold = v,
                Err(_) => warn!(value = %value, "Ignoring non-numeric SHOPCART_FREE_SHIPPING_THRESHOLD"),
            }
        }

        if let Ok(value) = std::env::var("SHOPCART_SHIPPING_FEE") {
            match value.parse::<i64>() {
                Ok(v) => self.shipping.shipping_fee = v,
                Err(_) => warn!(value = %value, "Ignoring non-numeric SHOPCART_SHIPPING_FEE"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "shopcart", "shopcart")
            .map(|dirs| dirs.config_dir().join("shopcart.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Shipping policy for the cart engine.
    pub fn shipping_policy(&self) -> ShippingPolicy {
        ShippingPolicy::new(
            Money::from_cents(self.shipping.free_shipping_threshold),
            Money::from_cents(self.shipping.shipping_fee),
        )
    }

    /// Catalog timeout as a Duration.
    pub fn catalog_timeout(&self) -> Duration {
        Duration::from_millis(self.catalog.timeout_ms)
    }

    /// Simulated catalog latency as a Duration.
    pub fn catalog_delay(&self) -> Duration {
        Duration::from_millis(self.catalog.delay_ms)
    }

    /// How long a notification stays visible.
    pub fn notification_duration(&self) -> Duration {
        Duration::from_millis(self.notifications.duration_ms)
    }

    /// Formats an amount as a currency string.
    ///
    /// ## Example
    /// ```rust
    /// use shopcart::config::AppConfig;
    /// use shopcart_core::Money;
    ///
    /// let config = AppConfig::default();
    /// assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let cents = amount.cents();
        let decimals = self.shop.currency_decimals;
        let divisor = 10_i64.pow(decimals as u32);
        let whole = cents / divisor;
        let frac = (cents % divisor).unsigned_abs();

        format!(
            "{}{}{}",
            if cents < 0 { "-" } else { "" },
            self.shop.currency_symbol,
            if decimals > 0 {
                format!("{}.{:0width$}", whole.unsigned_abs(), frac, width = decimals as usize)
            } else {
                whole.unsigned_abs().to_string()
            }
        )
    }
}
