//! Moderation panels built on the back-office client
//!
//! A [`Panel`] owns one list in a [`PanelStore`], derives the filtered,
//! grouped and paged views an operator browses, and applies actions once
//! the backend confirms them. Action forms, email composition, the job
//! creation form and CSV export live alongside.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

pub mod actions;
pub mod catalog;
pub mod email;
pub mod error;
pub mod export;
pub mod filter;
pub mod group;
pub mod job_form;
pub mod modal;
pub mod pagination;
pub mod panel;
pub mod store;

pub use catalog::{PanelKind, PanelSpec, Tab};
pub use email::{ComposedEmail, EmailDraft, EmailTemplate, TemplateValues};
pub use error::{PanelError, PanelResult};
pub use filter::{StatusCounts, StatusFilter, filter_records, status_counts};
pub use group::{Group, UNSPECIFIED, group_by};
pub use job_form::{JobDraft, JobForm, JobFormStep};
pub use modal::{Action, ActionForm, ActionKind, DetailView, Submission};
pub use pagination::{GROUPS_PER_PAGE, Page, PageRequest};
pub use panel::{ListSource, Panel, ViewQuery};
pub use store::{PanelStore, Ticket};
