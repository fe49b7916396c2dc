//! Back-office moderation console
//!
//! Subcommand handlers and output rendering used by the `backoffice`
//! binary.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

pub mod commands;
pub mod output;

pub use commands::App;
pub use output::OutputFormat;
