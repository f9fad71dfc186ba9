//! SupplementStore CLI - pricing, catalog, checkout and order admin tools.
//!
//! # Usage
//!
//! ```bash
//! # Best sellers and category sizes
//! store-cli home
//!
//! # Price a subtotal with the configured shipping and tax rules
//! store-cli quote --subtotal 49.99
//!
//! # Browse the catalog
//! store-cli products --category protein --sort price-low
//!
//! # Fill a cart and place an order
//! store-cli demo 1 2 --shipping ./shipping.yaml
//!
//! # Admin order table, one order, and a status change
//! store-cli orders --status pending --date 30days
//! store-cli order ORD-001
//! store-cli set-status ORD-004 shipped --expected pending
//! ```
//!
//! Every command starts from the seed file given with `--seed`; nothing is
//! persisted between runs. The default seed and shipping files are the ones
//! in this crate's `data/` directory, so the binary works from any directory.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use supplement_store_admin::{AdminOrders, OrderQuery};
use supplement_store_core::{OrderId, OrderStatus};
use supplement_store_storefront::catalog::CatalogQuery;
use supplement_store_storefront::config::StoreConfig;
use tracing::warn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;

const DEFAULT_SEED: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/seed.yaml");
const DEFAULT_SHIPPING: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/shipping.yaml");

const DEFAULT_LOG_FILTER: &str =
    "store_cli=info,supplement_store_storefront=info,supplement_store_admin=info";

#[derive(Parser)]
#[command(name = "store-cli")]
#[command(author, version, about = "SupplementStore CLI tools")]
struct Cli {
    /// Seed file with users, products and orders [default: the bundled data/seed.yaml]
    #[arg(long, global = true, default_value = DEFAULT_SEED, hide_default_value = true)]
    seed: PathBuf,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a subtotal
    Quote {
        /// Cart subtotal, e.g. 49.99
        #[arg(short, long)]
        subtotal: Decimal,
    },
    /// Show the featured best sellers and category sizes
    Home,
    /// Browse the product catalog
    Products {
        /// Text matched against name and description
        #[arg(short = 'q', long)]
        search: Option<String>,

        /// Category (`protein`, `vitamins`, `pre-workout`, ...)
        #[arg(short, long)]
        category: Option<String>,

        /// Price range (`0-25`, `25-40`, `40-50`, `50+`)
        #[arg(short, long)]
        price: Option<String>,

        /// Sort order (`best-sellers`, `price-low`, `price-high`, `name-asc`, `name-desc`)
        #[arg(short, long)]
        sort: Option<String>,

        /// Only show best sellers
        #[arg(long)]
        best_sellers: bool,

        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Run a shopping session and place an order
    Demo {
        /// Product IDs to add to the cart
        #[arg(required = true)]
        products: Vec<String>,

        /// Shipping form (YAML) [default: the bundled data/shipping.yaml]
        #[arg(long, default_value = DEFAULT_SHIPPING, hide_default_value = true)]
        shipping: PathBuf,
    },
    /// List orders as the admin order table shows them
    Orders {
        /// Text matched against order ID, customer and product names
        #[arg(short = 'q', long)]
        search: Option<String>,

        /// Status (`pending`, `processing`, `shipped`, `delivered`, `cancelled`)
        #[arg(short, long)]
        status: Option<String>,

        /// Date window (`1day`, `7days`, `30days`, `90days`)
        #[arg(short, long)]
        date: Option<String>,

        #[arg(long)]
        page: Option<usize>,
    },
    /// Show one order
    Order {
        /// Order ID, e.g. ORD-001
        id: String,
    },
    /// Change an order's status
    SetStatus {
        /// Order ID
        id: String,

        /// New status
        status: String,

        /// Only update if the order still has this status
        #[arg(long)]
        expected: Option<OrderStatus>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    tracing_subscriber::registry()
        .with(filter)
        .with(cli.json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!cli.json).then(tracing_subscriber::fmt::layer))
        .init();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = StoreConfig::from_env()?;

    if let Commands::Quote { subtotal } = cli.command {
        return commands::quote::run(&config.pricing, subtotal);
    }

    let seed = commands::seed::load(&cli.seed).await?;
    let per_page = config.pagination.products_per_page;
    let store = seed.into_store(config)?;

    match cli.command {
        Commands::Quote { .. } => {}
        Commands::Home => commands::home::run(&seed),
        Commands::Products {
            search,
            category,
            price,
            sort,
            best_sellers,
            page,
        } => {
            let query = CatalogQuery {
                best_sellers_only: best_sellers,
                page,
                ..CatalogQuery::from_params(
                    search.as_deref(),
                    category.as_deref(),
                    price.as_deref(),
                    sort.as_deref(),
                )?
            };
            commands::products::run(&seed, &query, per_page);
        }
        Commands::Demo { products, shipping } => {
            let shipping = commands::demo::load_shipping(&shipping).await?;
            commands::demo::run(&store, &seed, &products, &shipping)?;
        }
        Commands::Orders {
            search,
            status,
            date,
            page,
        } => {
            let admin = admin_session(&store, &seed);
            let query = OrderQuery::from_params(
                search.as_deref(),
                status.as_deref(),
                date.as_deref(),
                page,
            )?;
            commands::orders::list(&admin, &query);
        }
        Commands::Order { id } => {
            let admin = admin_session(&store, &seed);
            commands::orders::show(&admin, &OrderId::new(id))?;
        }
        Commands::SetStatus {
            id,
            status,
            expected,
        } => {
            let admin = admin_session(&store, &seed);
            commands::orders::set_status(&admin, &OrderId::new(id), &status, expected)?;
        }
    }
    Ok(())
}

/// Sign in as the seed's admin user and open the admin order service.
fn admin_session(
    store: &supplement_store_storefront::Store,
    seed: &commands::seed::SeedData,
) -> AdminOrders {
    match seed.admin() {
        Some(admin) => store.set_current_user(admin.clone()),
        None => warn!("Seed file has no admin user; continuing as the default user"),
    }
    AdminOrders::new(store.clone())
}
