//! Cartwheel CLI - browse the catalog and manage the cart from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # First page of products, then two more
//! cartwheel products --pages 3
//!
//! # Products of one category
//! cartwheel products --category smartphones
//!
//! # Add product 4 to the cart, then set its quantity
//! cartwheel cart add 4
//! cartwheel cart set 4 3
//!
//! # Check out (deletes the cart)
//! cartwheel cart checkout --yes
//! ```
//!
//! Every run restores persisted state first and persists it afterwards, so
//! favorites, the fetched catalog, the cart and the theme carry over.
//!
//! # Environment
//!
//! See `cartwheel_storefront::config` for the variables read at startup.
//! `RUST_LOG` controls log output on stderr.

#![cfg_attr(not(test), forbid(unsafe_code))]

use cartwheel_core::ProductId;
use cartwheel_storefront::AppState;
use cartwheel_storefront::config::{ConfigError, StorefrontConfig};
use cartwheel_storefront::error::StoreError;
use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "cartwheel")]
#[command(author, version, about = "Cartwheel storefront")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products
    Products {
        /// Only show one category (see `categories`)
        #[arg(short, long)]
        category: Option<String>,

        /// Number of pages to reveal
        #[arg(short, long, default_value_t = 1)]
        pages: usize,

        /// Drop the fetched catalog and fetch it again
        #[arg(short, long)]
        refresh: bool,
    },
    /// List product categories
    Categories,
    /// Show one product
    Product {
        /// Product id
        id: ProductId,
    },
    /// Search products by title
    Search {
        /// Search text; empty clears the results
        #[arg(default_value = "")]
        query: String,
    },
    /// Bookmark or unbookmark a product
    Favorite {
        #[command(subcommand)]
        action: FavoriteAction,
    },
    /// List bookmarked products
    Favorites,
    /// Manage the active cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Show or switch the color theme
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },
}

#[derive(Subcommand)]
enum FavoriteAction {
    /// Bookmark a product
    Add { id: ProductId },
    /// Remove a bookmark
    Remove { id: ProductId },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the active cart
    Show,
    /// Add one unit of a product
    Add { id: ProductId },
    /// Set the quantity of a cart line
    Set { id: ProductId, quantity: u32 },
    /// Review the cart and delete it
    Checkout {
        /// Confirm without asking
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum ThemeAction {
    /// Show the current theme and palette
    Show,
    /// Switch between light and dark
    Toggle,
}

/// Errors that end a CLI run.
#[derive(Debug, Error)]
enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

fn init_tracing() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "cartwheel_storefront=info,cartwheel_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            render::fatal(&CliError::from(e));
            std::process::exit(2);
        }
    };

    // Sentry must be initialized before the tracing subscriber
    let _sentry_guard = init_sentry(&config);
    init_tracing();

    if let Err(e) = run(cli, &config).await {
        tracing::error!("Command failed: {e}");
        render::fatal(&e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &StorefrontConfig) -> Result<(), CliError> {
    let app = AppState::from_config(config)?;
    let mut notices = app.notices().subscribe();

    match app.restore().await {
        Ok(restored) => tracing::debug!(restored, "Startup restore finished"),
        Err(e) => tracing::warn!(error = %e, "Could not restore persisted state"),
    }

    let result = dispatch(&app, cli.command).await;

    while let Ok(notice) = notices.try_recv() {
        render::notice(&notice);
    }
    // Persist even after a failed intent; slices keep their last good data
    app.persist().await?;
    result
}

async fn dispatch(app: &AppState, command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Products {
            category,
            pages,
            refresh,
        } => commands::products::list(app, category.as_deref(), pages, refresh).await?,
        Commands::Categories => commands::products::categories(app).await?,
        Commands::Product { id } => commands::products::show(app, id).await?,
        Commands::Search { query } => commands::search::run(app, &query).await?,
        Commands::Favorite { action } => match action {
            FavoriteAction::Add { id } => commands::products::favorite(app, id).await?,
            FavoriteAction::Remove { id } => commands::products::unfavorite(app, id),
        },
        Commands::Favorites => commands::products::favorites(app),
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(app).await?,
            CartAction::Add { id } => commands::cart::add(app, id).await?,
            CartAction::Set { id, quantity } => commands::cart::set(app, id, quantity).await?,
            CartAction::Checkout { yes } => commands::cart::checkout(app, yes).await?,
        },
        Commands::Theme { action } => match action {
            ThemeAction::Show => commands::theme::show(app),
            ThemeAction::Toggle => commands::theme::toggle(app),
        },
    }
    Ok(())
}
