//! Vitrina CLI - browse the catalogue, manage the cart and check out.
//!
//! # Usage
//!
//! ```bash
//! # List every product
//! vitrina products
//!
//! # Search the catalogue (records the term in the search history)
//! vitrina search red phone
//!
//! # Add a product and show the cart
//! vitrina cart add p1
//! vitrina cart show
//!
//! # Build the order message and print the messaging link
//! vitrina checkout
//! ```
//!
//! # Commands
//!
//! - `products` / `product <id>` - Catalogue listing and detail view
//! - `search <terms..>` - Substring search with highlighted snippets
//! - `history [--clear]` - Recent searches
//! - `cart show|add|inc|dec|remove|clear` - Cart management
//! - `checkout` - Order message and deep link; empties the cart
//!
//! Configuration comes from `VITRINA_*` environment variables (or `.env`).
//! Logs go to stderr; filter them with `RUST_LOG`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::{IsTerminal, Write};

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vitrina_storefront::AppState;
use vitrina_storefront::config::StorefrontConfig;

mod commands;

use commands::CliError;

#[derive(Parser)]
#[command(name = "vitrina")]
#[command(author, version, about = "Vitrina storefront")]
struct Cli {
    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    /// Never colour search highlights
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every product in the catalogue
    Products,
    /// Show one product in detail
    Product {
        /// Product id
        id: String,
    },
    /// Search the catalogue
    Search {
        /// Search terms (joined with spaces)
        terms: Vec<String>,
    },
    /// Show recent searches
    History {
        /// Forget every recent search
        #[arg(long)]
        clear: bool,
    },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Send the cart as an order message
    Checkout,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart
    Show,
    /// Add one unit of a catalogue product
    Add {
        /// Product id
        id: String,
    },
    /// Increase a line's quantity by one
    Inc {
        /// Product id
        id: String,
    },
    /// Decrease a line's quantity by one (removes it at zero)
    Dec {
        /// Product id
        id: String,
    },
    /// Remove a line entirely
    Remove {
        /// Product id
        id: String,
    },
    /// Empty the cart
    Clear,
}

fn main() {
    let cli = Cli::parse();

    init_tracing(cli.log_json);

    if let Err(e) = run(cli) {
        tracing::error!(error = %e, "Command failed");
        let _ = writeln!(std::io::stderr(), "{}", e.user_message());
        std::process::exit(1);
    }
}

/// Install the log subscriber on stderr.
///
/// Defaults to info level for our crates if `RUST_LOG` is not set.
fn init_tracing(json: bool) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "vitrina_storefront=info,vitrina_cli=info".into());

    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer =
        (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = StorefrontConfig::from_env().map_err(vitrina_storefront::AppError::from)?;
    let mut state = AppState::open(config)?;

    let color = !cli.plain && std::io::stdout().is_terminal();

    let output = match cli.command {
        Commands::Products => commands::catalog::list(&state),
        Commands::Product { id } => commands::catalog::show(&state, &id)?,
        Commands::Search { terms } => commands::search::run(&mut state, &terms.join(" "), color),
        Commands::History { clear } => commands::search::history(&mut state, clear)?,
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&state),
            CartAction::Add { id } => commands::cart::add(&mut state, &id)?,
            CartAction::Inc { id } => commands::cart::increment(&mut state, &id)?,
            CartAction::Dec { id } => commands::cart::decrement(&mut state, &id)?,
            CartAction::Remove { id } => commands::cart::remove(&mut state, &id)?,
            CartAction::Clear => commands::cart::clear(&mut state)?,
        },
        Commands::Checkout => commands::checkout::run(&mut state)?,
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{output}")?;
    Ok(())
}
