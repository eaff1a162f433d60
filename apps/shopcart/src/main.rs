//! # shopcart Entry Point
//!
//! Starts an interactive cart session. All setup lives in `lib.rs`.
//!
//! ## Environment
//! - `SHOPCART_CONFIG` - path to a `shopcart.toml`
//! - `SHOPCART_STORAGE_DIR`, `SHOPCART_CATALOG_PATH`, ... - per-setting overrides
//! - `RUST_LOG` - log filter (logs go to stderr)

#[tokio::main]
async fn main() {
    if let Err(e) = shopcart::run().await {
        eprintln!("shopcart: {}", e);
        std::process::exit(1);
    }
}
