//! Core types, configuration and errors for the moderation back-office
//!
//! The back-office reviews content that end users submit to the consumer
//! platform: travel trips and matches, accommodation hosts, events,
//! properties, buy-sell listings, and the careers pipeline (jobs,
//! applications, offers).

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod config;
pub mod error;
pub mod records;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
pub use records::{Application, Job, Match, ModerationRecord, Offer, PersonSummary, Record, Skills, Trip};
pub use types::{
    ApplicationStatus, JobStatus, MatchStatus, ModerationStatus, OfferStatus, RecordId, Status,
    TripStatus,
};

/// Initialize the logging system from configuration
///
/// `RUST_LOG` overrides the configured level. When a log file is
/// configured, output goes there instead of stderr.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a global
/// subscriber is already installed.
pub fn init_logging(logging: &config::LoggingConfig) -> Result<()> {
    use std::sync::Mutex;
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let registry = tracing_subscriber::registry().with(env_filter);
    let json = logging.format.eq_ignore_ascii_case("json");

    let result = match &logging.file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            let writer = Mutex::new(file);
            if json {
                registry
                    .with(fmt::layer().json().with_writer(writer))
                    .try_init()
            } else {
                registry
                    .with(fmt::layer().with_ansi(false).with_writer(writer))
                    .try_init()
            }
        }
        None if json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        None => registry
            .with(fmt::layer().pretty().with_writer(std::io::stderr))
            .try_init(),
    };

    result.map_err(|e| Error::configuration(format!("failed to initialise logging: {e}")))
}
