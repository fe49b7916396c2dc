//! REST client for the moderation back-office backend
//!
//! Every call takes its credentials from an explicitly passed
//! [`AuthContext`]. List endpoints declare the response envelopes they
//! accept, and list loads degrade to [`Fetched`] with an error message
//! instead of failing.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

pub mod api;
pub mod auth;
pub mod backend;
pub mod endpoints;
pub mod envelope;
pub mod error;
pub mod http;
pub mod mock;

pub use api::AdminClient;
pub use auth::{AuthContext, SessionFile};
pub use backend::{AdminBackend, AfterMutation, Method, Mutation, MutationOutcome};
pub use endpoints::{Decision, HostQueue, ListEndpoint};
pub use envelope::{DecodeError, Envelope, Fetched};
pub use error::{ClientError, ClientResult, GENERIC_FAILURE};
pub use http::HttpBackend;
pub use mock::MockBackend;
