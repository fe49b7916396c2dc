//! Back-office moderation console
//!
//! Browse, search and act on the moderation panels of the platform
//! (travel, hosts, events, properties, buy-sell, careers) from the
//! command line.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

use anyhow::{Context, Result};
use backoffice_cli::commands::{
    self, ApplicationCommands, BlockedArgs, HostCommands, JobCommands, OfferCommands,
    ReviewedArgs, TravelCommands,
};
use backoffice_cli::{App, OutputFormat};
use backoffice_client::{AdminClient, AuthContext, HttpBackend};
use backoffice_core::Config;
use backoffice_panel::PanelKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Command line interface of the back-office console
#[derive(Parser)]
#[command(
    name = "backoffice",
    version = env!("CARGO_PKG_VERSION"),
    about = "Moderation back-office console",
    long_about = "Browse, filter and moderate trips, hosts, events, properties, listings, jobs, applications and offers of the platform's admin backend."
)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE", env = "BACKOFFICE_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Log format (json, pretty)
    #[arg(long, global = true)]
    log_format: Option<String>,

    /// Enable structured JSON logging
    #[arg(long, global = true)]
    json: bool,

    /// Output format for results
    #[arg(short, long, value_enum, global = true)]
    output: Option<OutputFormat>,

    /// Bearer token for this run (overrides the session file)
    #[arg(long, env = "BACKOFFICE_TOKEN", hide_env_values = true, global = true)]
    token: Option<String>,

    /// Subcommand
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
enum Commands {
    /// Travel trips and matches
    Travel {
        /// Travel subcommand
        #[command(subcommand)]
        action: TravelCommands,
    },

    /// Host application queues
    Hosts {
        /// Host subcommand
        #[command(subcommand)]
        action: HostCommands,
    },

    /// Approved and rejected events
    Events(ReviewedArgs),

    /// Approved and rejected properties
    Properties(ReviewedArgs),

    /// Blocked buy-sell listings
    BuySell(BlockedArgs),

    /// Job postings
    Jobs {
        /// Job subcommand
        #[command(subcommand)]
        action: JobCommands,
    },

    /// Job applications
    Applications {
        /// Application subcommand
        #[command(subcommand)]
        action: ApplicationCommands,
    },

    /// Job offers
    Offers {
        /// Offer subcommand
        #[command(subcommand)]
        action: OfferCommands,
    },

    /// Describe every panel
    Panels,

    /// Save a bearer token to the session file
    Login {
        /// Token issued by the backend
        #[arg(value_name = "TOKEN")]
        value: String,
    },

    /// Remove the token from the session file
    Logout,

    /// Show or validate configuration
    Config {
        /// Show resolved configuration
        #[arg(short, long)]
        show: bool,

        /// Validate configuration
        #[arg(short, long)]
        validate: bool,
    },
}

/// Main entry point of the console
///
/// # Errors
///
/// Returns error if configuration, logging or the command fails
#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists; it's okay if there is none
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config =
        Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    init_logging(&cli, &mut config)?;

    match &cli.command {
        Commands::Login { value } => return commands::login(&config, value),
        Commands::Logout => return commands::logout(&config),
        Commands::Config { show, validate } => return commands::config(&config, *show, *validate),
        Commands::Panels => return commands::panels(resolve_output(cli.output, &config)),
        _ => {}
    }

    let app = connect(config, cli.token.as_deref(), cli.output)?;
    match cli.command {
        Commands::Travel { action } => commands::travel(&app, action).await,
        Commands::Hosts { action } => commands::hosts(&app, action).await,
        Commands::Events(args) => commands::reviewed(&app, PanelKind::Events, args).await,
        Commands::Properties(args) => commands::reviewed(&app, PanelKind::Properties, args).await,
        Commands::BuySell(args) => commands::buy_sell(&app, args).await,
        Commands::Jobs { action } => commands::jobs(&app, action).await,
        Commands::Applications { action } => commands::applications(&app, action).await,
        Commands::Offers { action } => commands::offers(&app, action).await,
        Commands::Panels
        | Commands::Login { .. }
        | Commands::Logout
        | Commands::Config { .. } => Ok(()),
    }
}

/// Initialize logging; command-line flags override the configuration
fn init_logging(cli: &Cli, config: &mut Config) -> Result<()> {
    if let Some(level) = &cli.log_level {
        config.logging.level.clone_from(level);
    }
    if let Some(format) = &cli.log_format {
        config.logging.format.clone_from(format);
    }
    if cli.json {
        config.logging.format = "json".to_string();
    }

    backoffice_core::init_logging(&config.logging).context("failed to initialise logging")?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        log_level = %config.logging.level,
        "backoffice console starting"
    );
    Ok(())
}

fn resolve_output(flag: Option<OutputFormat>, config: &Config) -> OutputFormat {
    flag.unwrap_or_else(|| OutputFormat::from_config(&config.panel.output))
}

/// Build the backend client with the session credentials
fn connect(config: Config, token: Option<&str>, output: Option<OutputFormat>) -> Result<App> {
    config.validate().context("configuration is invalid")?;

    let auth = match token {
        Some(token) => AuthContext::with_token(token),
        None => AuthContext::from_config(&config.auth),
    };
    let backend = HttpBackend::new(&config.api).context("failed to create HTTP client")?;
    info!(
        base_url = %config.api.base_url,
        authenticated = auth.is_authenticated(),
        "connected to backend"
    );

    Ok(App {
        output: resolve_output(output, &config),
        client: AdminClient::new(Arc::new(backend), auth),
        config,
    })
}
