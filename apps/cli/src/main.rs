//! # Rocket Cart CLI
//!
//! Runs one cart operation against the configured inventory and prints the
//! resulting cart.
//!
//! ## Usage
//! ```text
//! rocket-cli show
//! rocket-cli add <id>
//! rocket-cli remove <id>
//! rocket-cli set <id> <amount>
//! rocket-cli clear
//! ```
//!
//! ## Startup Sequence
//! 1. Initialize tracing (to stderr)
//! 2. Load `CartConfig` (file, then `ROCKET_*` environment)
//! 3. Open the snapshot directory and inventory client
//! 4. Run the command; exit 1 if it was rejected (the reason is logged at
//!    `ERROR`)

use std::num::ParseIntError;
use std::process::ExitCode;
use std::sync::Arc;

use rocket_cart::{
    CartConfig, CartOutcome, CartStore, FileBlobStore, HttpInventoryClient, TracingNotifier,
    UpdateProductAmount,
};
use rocket_core::{Cart, ProductId};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: rocket-cli <show | add <id> | remove <id> | set <id> <amount> | clear>";

#[derive(Debug, thiserror::Error)]
enum UsageError {
    #[error("missing command")]
    MissingCommand,

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("missing argument: {0}")]
    MissingArgument(&'static str),

    #[error("invalid {name}: {value} ({source})")]
    InvalidNumber {
        name: &'static str,
        value: String,
        source: ParseIntError,
    },

    #[error("unexpected argument: {0}")]
    Unexpected(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Show,
    Add(ProductId),
    Remove(ProductId),
    Set(UpdateProductAmount),
    Clear,
}

impl Command {
    /// Parses the arguments after the program name.
    fn parse<I>(args: I) -> Result<Self, UsageError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let name = args.next().ok_or(UsageError::MissingCommand)?;

        let command = match name.as_str() {
            "show" => Command::Show,
            "add" => Command::Add(product_id(args.next())?),
            "remove" => Command::Remove(product_id(args.next())?),
            "set" => Command::Set(UpdateProductAmount {
                product_id: product_id(args.next())?,
                amount: number("amount", args.next())?,
            }),
            "clear" => Command::Clear,
            _ => return Err(UsageError::UnknownCommand(name)),
        };

        match args.next() {
            Some(extra) => Err(UsageError::Unexpected(extra)),
            None => Ok(command),
        }
    }

    async fn run(self, store: &CartStore) -> CartOutcome {
        match self {
            Command::Show => CartOutcome::Unchanged,
            Command::Add(id) => store.add_product(id).await,
            Command::Remove(id) => store.remove_product(id).await,
            Command::Set(request) => store.update_product_amount(request).await,
            Command::Clear => store.clear().await,
        }
    }
}

fn product_id(arg: Option<String>) -> Result<ProductId, UsageError> {
    number("product id", arg).map(ProductId::new)
}

fn number<T>(name: &'static str, arg: Option<String>) -> Result<T, UsageError>
where
    T: std::str::FromStr<Err = ParseIntError>,
{
    let value = arg.ok_or(UsageError::MissingArgument(name))?;
    value
        .trim()
        .parse()
        .map_err(|source| UsageError::InvalidNumber {
            name,
            value,
            source,
        })
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    init_tracing();

    let command = match Command::parse(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(err) => {
            eprintln!("{err}\n{USAGE}");
            return Ok(ExitCode::from(2));
        }
    };
    debug!(?command, "Parsed command");

    let config = CartConfig::load(None)?;
    let data_dir = config.data_dir()?;
    let inventory = HttpInventoryClient::new(&config.inventory)?;
    info!(?data_dir, inventory = %inventory.base_url(), "Configuration loaded");

    // rejections reach the user as ERROR lines on stderr
    let store = CartStore::open(
        Arc::new(inventory),
        Arc::new(FileBlobStore::open(data_dir)?),
        Arc::new(TracingNotifier),
    );

    let outcome = command.run(&store).await;
    print_cart(&store.cart());

    Ok(if outcome.is_rejected() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn print_cart(cart: &Cart) {
    if cart.is_empty() {
        println!("Cart is empty");
        return;
    }

    for item in cart {
        println!(
            "{:>6}  {:<40} {:>3} x {:>10} = {:>10}",
            item.id,
            item.title,
            item.amount,
            item.price.to_money().to_string(),
            item.line_total().to_string(),
        );
    }

    let totals = cart.totals();
    println!(
        "{} products, {} units, subtotal {}",
        totals.item_count, totals.total_quantity, totals.subtotal
    );
}

/// Initializes the tracing subscriber on stderr.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=rocket_cart=trace` - Trace the cart store only
/// - Default: INFO level
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Command, UsageError> {
        Command::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse(&["show"]).unwrap(), Command::Show);
        assert_eq!(parse(&["add", "3"]).unwrap(), Command::Add(ProductId::new(3)));
        assert_eq!(
            parse(&["remove", "3"]).unwrap(),
            Command::Remove(ProductId::new(3))
        );
        assert_eq!(
            parse(&["set", "2", "-1"]).unwrap(),
            Command::Set(UpdateProductAmount {
                product_id: ProductId::new(2),
                amount: -1,
            })
        );
        assert_eq!(parse(&["clear"]).unwrap(), Command::Clear);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse(&[]), Err(UsageError::MissingCommand)));
        assert!(matches!(parse(&["buy"]), Err(UsageError::UnknownCommand(_))));
        assert!(matches!(
            parse(&["add"]),
            Err(UsageError::MissingArgument("product id"))
        ));
        assert!(matches!(
            parse(&["add", "-3"]),
            Err(UsageError::InvalidNumber { .. })
        ));
        assert!(matches!(
            parse(&["set", "1"]),
            Err(UsageError::MissingArgument("amount"))
        ));
        assert!(matches!(
            parse(&["clear", "now"]),
            Err(UsageError::Unexpected(_))
        ));
    }
}
