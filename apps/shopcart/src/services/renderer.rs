//! # Rendering
//!
//! After every transition the controller hands the renderer a [`CartView`]:
//! the line items plus their totals, already computed.
//!
//! ## Terminal Layout
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │  Cart (3 items)                                            │
//! │    1  Chair                   x2        $738.00            │
//! │    2  Tray                    x1         $74.90            │
//! │  ───────────────────────────────────────────────           │
//! │  Subtotal                              $812.90             │
//! │  Shipping                                $0.00             │
//! │  Total                                 $812.90             │
//! └────────────────────────────────────────────────────────────┘
//! ```

use std::io::Write;

use serde::Serialize;
use shopcart_core::{CartState, CartTotals, LineItem, Product, ShippingPolicy};

use crate::config::AppConfig;

/// Everything a renderer needs to draw the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<LineItem>,
    pub totals: CartTotals,
}

impl CartView {
    pub fn new(cart: &CartState, policy: &ShippingPolicy) -> Self {
        CartView {
            items: cart.items().to_vec(),
            totals: CartTotals::compute(cart, policy),
        }
    }
}

/// Draws cart state, the product list and error messages.
pub trait Renderer {
    fn render_cart(&self, view: &CartView);
    fn render_products(&self, products: &[Product]);
    fn render_error(&self, message: &str);
}

/// Plain-text renderer for the terminal session.
#[derive(Debug, Clone)]
pub struct TerminalRenderer {
    config: AppConfig,
}

impl TerminalRenderer {
    pub fn new(config: AppConfig) -> Self {
        TerminalRenderer { config }
    }

    /// Formats the cart block.
    pub fn format_cart(&self, view: &CartView) -> String {
        let money = |m| self.config.format_currency(m);
        let totals = &view.totals;
        let mut out = String::new();

        if view.items.is_empty() {
            out.push_str("Cart is empty\n");
        } else {
            out.push_str(&format!("Cart ({} items)\n", totals.total_count));
            for item in &view.items {
                out.push_str(&format!(
                    "  {:<4} {:<24} x{:<5} {:>12}\n",
                    item.id,
                    item.name,
                    item.quantity,
                    money(item.line_total())
                ));
            }
            out.push_str(&format!("  {}\n", "─".repeat(48)));
        }

        out.push_str(&format!("  {:<36} {:>12}\n", "Subtotal", money(totals.subtotal)));
        out.push_str(&format!("  {:<36} {:>12}\n", "Shipping", money(totals.shipping_fee)));
        out.push_str(&format!("  {:<36} {:>12}\n", "Total", money(totals.grand_total)));

        if !view.items.is_empty() && totals.free_shipping_remaining.is_positive() {
            out.push_str(&format!(
                "  Add {} more for free shipping\n",
                money(totals.free_shipping_remaining)
            ));
        }
        out
    }

    /// Formats the product list.
    pub fn format_products(&self, products: &[Product]) -> String {
        if products.is_empty() {
            return "No products available\n".to_string();
        }

        let mut out = String::from("Products\n");
        for product in products {
            out.push_str(&format!(
                "  {:<4} {:<32} {:>12}\n",
                product.id,
                product.name,
                self.config.format_currency(product.price)
            ));
        }
        out
    }

    fn write(&self, text: &str) {
        let mut out = std::io::stdout().lock();
        // Nothing useful to do if the terminal is gone.
        let _ = out.write_all(text.as_bytes());
        let _ = out.flush();
    }
}

impl Renderer for TerminalRenderer {
    fn render_cart(&self, view: &CartView) {
        self.write(&self.format_cart(view));
    }

    fn render_products(&self, products: &[Product]) {
        self.write(&self.format_products(products));
    }

    fn render_error(&self, message: &str) {
        let mut err = std::io::stderr().lock();
        let _ = writeln!(err, "error: {}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopcart_core::Money;

    fn renderer() -> TerminalRenderer {
        TerminalRenderer::new(AppConfig::default())
    }

    #[test]
    fn test_format_empty_cart() {
        let view = CartView::new(&CartState::new(), &ShippingPolicy::default());
        let text = renderer().format_cart(&view);

        assert!(text.starts_with("Cart is empty"));
        assert!(text.contains("$1.00")); // shipping still shown
        assert!(!text.contains("free shipping"));
    }

    #[test]
    fn test_format_cart_with_items() {
        let lamp = Product::new("1", "Lamp", Money::from_cents(2000), "lamp.png");
        let cart = CartState::new().add_item(&lamp).unwrap().set_quantity("1", 2);
        let view = CartView::new(&cart, &ShippingPolicy::default());
        let text = renderer().format_cart(&view);

        assert!(text.contains("Cart (2 items)"));
        assert!(text.contains("Lamp"));
        assert!(text.contains("$40.00"));
        assert!(text.contains("$41.00"));
        assert!(text.contains("Add $10.00 more for free shipping"));
    }

    #[test]
    fn test_format_products() {
        let r = renderer();
        assert_eq!(r.format_products(&[]), "No products available\n");

        let text = r.format_products(&[Product::new("7", "Tray", Money::from_cents(7490), "t.jpg")]);
        assert!(text.contains("Tray"));
        assert!(text.contains("$74.90"));
    }

    #[test]
    fn test_view_serializes_camel_case() {
        let view = CartView::new(&CartState::new(), &ShippingPolicy::default());
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["totals"]["grandTotal"], 100);
        assert!(json["items"].as_array().unwrap().is_empty());
    }
}
