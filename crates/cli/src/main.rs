//! TechStore CLI - catalog search and back-office queries.
//!
//! # Usage
//!
//! ```bash
//! # Search the catalog
//! techstore search "laptop" --sort price-low
//!
//! # Search-as-you-type suggestions
//! techstore suggest "len"
//!
//! # List or inspect catalog products
//! techstore catalog list
//! techstore catalog show camera-hd-pro-4k
//!
//! # List back-office orders
//! techstore orders list --status delivered
//!
//! # Run the scripted storefront demo (login, cart, checkout)
//! techstore demo
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "techstore")]
#[command(author, version, about = "TechStore CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the product catalog
    Search {
        /// Search query (prefix match, accent-insensitive)
        query: String,

        /// Filter by category (camera, laptop, "Phụ kiện", ...)
        #[arg(short, long)]
        category: Option<String>,

        /// Sort order: default, price-low, price-high, rating, newest
        #[arg(short, long, default_value = "default")]
        sort: String,

        /// Minimum rating (inclusive)
        #[arg(long)]
        min_rating: Option<f32>,

        /// Minimum price in VND (inclusive)
        #[arg(long)]
        min_price: Option<i64>,

        /// Maximum price in VND (inclusive)
        #[arg(long)]
        max_price: Option<i64>,
    },
    /// Show search-as-you-type suggestions for a query
    Suggest {
        /// Partial query
        query: String,
    },
    /// Inspect the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Query back-office orders
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
    /// Run a scripted storefront session (login, cart, checkout)
    Demo,
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List every product
    List,
    /// Show one product by its slug
    Show {
        /// Product slug (e.g. camera-hd-pro-4k)
        slug: String,
    },
}

#[derive(Subcommand)]
enum OrdersAction {
    /// List the mock orders
    List {
        /// Filter by status (pending, processing, shipped, delivered, cancelled)
        #[arg(short, long)]
        status: Option<String>,

        /// Search order number and customer name
        #[arg(long)]
        search: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Search {
            query,
            category,
            sort,
            min_rating,
            min_price,
            max_price,
        } => {
            commands::search::run(
                &query,
                category.as_deref(),
                &sort,
                min_rating,
                min_price,
                max_price,
            );
        }
        Commands::Suggest { query } => commands::search::suggest(&query),
        Commands::Catalog { action } => match action {
            CatalogAction::List => commands::catalog::list(),
            CatalogAction::Show { slug } => commands::catalog::show(&slug)?,
        },
        Commands::Orders { action } => match action {
            OrdersAction::List { status, search } => {
                commands::orders::list(status.as_deref(), search.as_deref())?;
            }
        },
        Commands::Demo => commands::demo::run().await?,
    }
    Ok(())
}
