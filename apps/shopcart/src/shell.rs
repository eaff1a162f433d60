//! # Terminal Session
//!
//! Line-oriented front end for the [`CartController`].
//!
//! ## Commands
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  products            list the catalog                (ls, list)         │
//! │  show                show the cart                   (cart)             │
//! │  add <id>            add one unit of a product                          │
//! │  remove <id>         remove a line                   (rm)               │
//! │  qty <id> <n>        set a line's quantity (0 removes)                  │
//! │  inc <id>            one more                                           │
//! │  dec <id>            one less (asks before removing the last one)       │
//! │  clear               empty the cart                                     │
//! │  help                this list                       (?)                │
//! │  quit                leave                           (exit, q)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Errors are rendered and the session goes on. Only `quit` or end of input
//! stops it.

use std::io::{self, Write};
use std::str::FromStr;

use tracing::{debug, info};

use crate::controller::CartController;
use crate::error::{AppError, AppResult};

/// Text printed by `help`.
pub const HELP: &str = "\
Commands:
  products          list the catalog
  show              show the cart
  add <id>          add one unit of a product
  remove <id>       remove a line
  qty <id> <n>      set a line's quantity (0 removes)
  inc <id>          one more
  dec <id>          one less
  clear             empty the cart
  help              this list
  quit              leave
";

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Products,
    Show,
    Add(String),
    Remove(String),
    Quantity(String, i64),
    Increment(String),
    Decrement(String),
    Clear,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = AppError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(AppError::InvalidCommand("Empty command".to_string()));
        };
        let args: Vec<&str> = words.collect();

        let command = match (name.to_lowercase().as_str(), args.as_slice()) {
            ("products" | "ls" | "list", []) => Command::Products,
            ("show" | "cart", []) => Command::Show,
            ("add", [id]) => Command::Add(id.to_string()),
            ("remove" | "rm", [id]) => Command::Remove(id.to_string()),
            ("qty", [id, n]) => {
                let quantity = n.parse::<i64>().map_err(|_| {
                    AppError::InvalidCommand(format!("Quantity must be a whole number: '{}'", n))
                })?;
                Command::Quantity(id.to_string(), quantity)
            }
            ("inc", [id]) => Command::Increment(id.to_string()),
            ("dec", [id]) => Command::Decrement(id.to_string()),
            ("clear", []) => Command::Clear,
            ("help" | "?", []) => Command::Help,
            ("quit" | "exit" | "q", []) => Command::Quit,
            ("add" | "remove" | "rm" | "inc" | "dec", _) => {
                return Err(AppError::InvalidCommand(format!("Usage: {} <id>", name)))
            }
            ("qty", _) => {
                return Err(AppError::InvalidCommand("Usage: qty <id> <n>".to_string()))
            }
            ("products" | "ls" | "list" | "show" | "cart" | "clear" | "help" | "?", _)
            | ("quit" | "exit" | "q", _) => {
                return Err(AppError::InvalidCommand(format!(
                    "'{}' takes no arguments",
                    name
                )))
            }
            (other, _) => {
                return Err(AppError::InvalidCommand(format!(
                    "Unknown command '{}'. Type 'help' for a list of commands",
                    other
                )))
            }
        };
        Ok(command)
    }
}

/// Whether the session should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Runs one command against the controller.
pub fn execute(controller: &mut CartController, command: Command) -> AppResult<Flow> {
    debug!(?command, "execute");

    match command {
        Command::Products => controller.show_products(),
        Command::Show => controller.show_cart(),
        Command::Add(id) => controller.add_product(&id)?,
        Command::Remove(id) => controller.remove(&id)?,
        Command::Quantity(id, n) => controller.set_quantity(&id, n)?,
        Command::Increment(id) => controller.increment(&id)?,
        Command::Decrement(id) => controller.decrement(&id)?,
        Command::Clear => controller.clear()?,
        Command::Help => {
            print!("{}", HELP);
            let _ = io::stdout().flush();
        }
        Command::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

/// Feeds lines to the controller until `quit` or the input ends.
///
/// Blank lines are skipped. Parse and command errors go to the renderer.
pub fn run_session<I>(controller: &mut CartController, lines: I) -> AppResult<()>
where
    I: IntoIterator<Item = io::Result<String>>,
{
    for line in lines {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let outcome = line
            .parse::<Command>()
            .and_then(|command| execute(controller, command));

        match outcome {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(e) => controller.report_error(&e),
        }
    }

    info!("Session ended");
    Ok(())
}

/// Prompted lines from stdin.
///
/// Stdin is locked only for the duration of each read, so a confirmation
/// prompt can read its own answer between commands.
pub fn stdin_lines() -> impl Iterator<Item = io::Result<String>> {
    std::iter::from_fn(|| {
        print!("> ");
        if let Err(e) = io::stdout().flush() {
            return Some(Err(e));
        }

        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(Ok(line)),
            Err(e) => Some(Err(e)),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{
        AutoConfirm, CartView, Notification, Notifier, Renderer, StaticCatalog,
    };
    use shopcart_core::{Money, Product, ShippingPolicy};
    use shopcart_store::{CartRepository, MemoryStorage, Storage};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[derive(Clone, Default)]
    struct Errors(Arc<Mutex<Vec<String>>>);

    impl Renderer for Errors {
        fn render_cart(&self, _view: &CartView) {}
        fn render_products(&self, _products: &[Product]) {}
        fn render_error(&self, message: &str) {
            self.0.lock().unwrap().push(message.to_string());
        }
    }

    struct Quiet;

    impl Notifier for Quiet {
        fn show(&self, _notification: &Notification) {}
    }

    async fn session() -> (CartController, Errors) {
        let errors = Errors::default();
        let mut controller = CartController::new(
            CartRepository::new(Box::new(MemoryStorage::new()) as Box<dyn Storage>),
            ShippingPolicy::default(),
            Box::new(errors.clone()),
            Box::new(Quiet),
            Box::new(AutoConfirm(true)),
        );
        let catalog = StaticCatalog::new(vec![
            Product::new("1", "Chair", Money::from_cents(36900), "chair.jpg"),
            Product::new("2", "Tray", Money::from_cents(7490), "tray.jpg"),
        ]);
        controller
            .load_catalog(&catalog, Duration::from_secs(1))
            .await
            .unwrap();
        (controller, errors)
    }

    fn lines(input: &[&str]) -> Vec<io::Result<String>> {
        input.iter().map(|l| Ok(l.to_string())).collect()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!("products".parse::<Command>().unwrap(), Command::Products);
        assert_eq!("LS".parse::<Command>().unwrap(), Command::Products);
        assert_eq!("show".parse::<Command>().unwrap(), Command::Show);
        assert_eq!("add 7".parse::<Command>().unwrap(), Command::Add("7".into()));
        assert_eq!("rm 7".parse::<Command>().unwrap(), Command::Remove("7".into()));
        assert_eq!(
            "  qty 7   3 ".parse::<Command>().unwrap(),
            Command::Quantity("7".into(), 3)
        );
        assert_eq!("inc 7".parse::<Command>().unwrap(), Command::Increment("7".into()));
        assert_eq!("dec 7".parse::<Command>().unwrap(), Command::Decrement("7".into()));
        assert_eq!("clear".parse::<Command>().unwrap(), Command::Clear);
        assert_eq!("?".parse::<Command>().unwrap(), Command::Help);
        assert_eq!("exit".parse::<Command>().unwrap(), Command::Quit);
    }

    #[test]
    fn test_parse_errors() {
        let err = "add".parse::<Command>().unwrap_err();
        assert_eq!(err.to_string(), "Usage: add <id>");

        let err = "qty 7 lots".parse::<Command>().unwrap_err();
        assert_eq!(err.to_string(), "Quantity must be a whole number: 'lots'");

        let err = "qty 7".parse::<Command>().unwrap_err();
        assert_eq!(err.to_string(), "Usage: qty <id> <n>");

        let err = "clear everything".parse::<Command>().unwrap_err();
        assert_eq!(err.to_string(), "'clear' takes no arguments");

        let err = "checkout".parse::<Command>().unwrap_err();
        assert!(err.to_string().starts_with("Unknown command 'checkout'"));

        assert!("   ".parse::<Command>().is_err());
    }

    #[tokio::test]
    async fn test_session_runs_commands() {
        let (mut controller, errors) = session().await;

        run_session(
            &mut controller,
            lines(&["add 1", "add 2", "", "inc 2", "qty 1 2", "dec 2", "show"]),
        )
        .unwrap();

        let cart = controller.state();
        assert_eq!(cart.get("1").unwrap().quantity, 2);
        assert_eq!(cart.get("2").unwrap().quantity, 1);
        assert_eq!(controller.totals().subtotal, Money::from_cents(81290));
        assert!(errors.0.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_session_errors_are_not_fatal() {
        let (mut controller, errors) = session().await;

        run_session(
            &mut controller,
            lines(&["add 99", "bogus", "add 1", "quit", "add 2"]),
        )
        .unwrap();

        // "add 2" comes after quit and never runs
        assert_eq!(controller.state().item_count(), 1);
        assert_eq!(
            *errors.0.lock().unwrap(),
            vec![
                "Product not found: 99".to_string(),
                "Unknown command 'bogus'. Type 'help' for a list of commands".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_session_huge_quantity_saturates() {
        let (mut controller, errors) = session().await;

        run_session(
            &mut controller,
            lines(&["add 1", "qty 1 1000000000000000", "inc 1", "add 2", "show"]),
        )
        .unwrap();

        let totals = controller.totals();
        assert_eq!(controller.state().get("1").unwrap().quantity, 1_000_000_000_000_001);
        assert_eq!(totals.subtotal, Money::from_cents(i64::MAX));
        assert_eq!(totals.grand_total, Money::from_cents(i64::MAX));
        assert!(errors.0.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_session_clear() {
        let (mut controller, _) = session().await;
        run_session(&mut controller, lines(&["add 1", "add 2", "clear"])).unwrap();
        assert!(controller.state().is_empty());
    }
}
