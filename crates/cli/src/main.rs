//! Affinity CLI - Catalog browsing, cart quotes and scripted checkouts.
//!
//! # Usage
//!
//! ```bash
//! # List colours, sizes and shipping methods
//! affinity catalog
//!
//! # Price a cart without checking out
//! affinity quote --item black:M:2 --item pink:S --shipping express
//!
//! # Run the whole checkout flow against the mock backend
//! affinity checkout --item black:M -e shopper@example.com \
//!     --address1 "1 Grafton Street" --city Dublin --postal-code "D02 XY45"
//! ```
//!
//! # Commands
//!
//! - `catalog` - Show the static product catalog and shipping options
//! - `quote` - Build a cart and log its totals
//! - `checkout` - Drive the checkout step machine end to end

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use commands::{CartArgs, ContactArgs};
use config::CliConfig;

#[derive(Parser)]
#[command(name = "affinity")]
#[command(author, version, about = "Affinity checkout CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show colours, sizes and shipping methods
    Catalog,
    /// Build a cart and show its totals
    Quote {
        #[command(flatten)]
        cart: CartArgs,
    },
    /// Run a full checkout against the mock backend
    Checkout {
        #[command(flatten)]
        cart: CartArgs,

        #[command(flatten)]
        contact: ContactArgs,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &CliConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

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

/// Initialize tracing with `EnvFilter` and the Sentry layer.
///
/// Defaults to info level for our crates if `RUST_LOG` is not set.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "affinity_cli=info,affinity_checkout=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Sentry must be initialized before the tracing subscriber
    let config = CliConfig::from_env();
    let _sentry_guard = config.as_ref().ok().and_then(init_sentry);
    init_tracing();

    let result: Result<(), Box<dyn std::error::Error>> = match config {
        Ok(config) => run(cli, &config).await,
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &CliConfig) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Catalog => commands::catalog::show(&config.checkout).await?,
        Commands::Quote { cart } => commands::quote::show(&config.checkout, &cart)?,
        Commands::Checkout { cart, contact } => {
            commands::checkout::run(&config.checkout, &cart, contact).await?;
        }
    }

    Ok(())
}
