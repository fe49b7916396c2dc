//! Client-side search and status filtering

use backoffice_core::utils::fold;
use backoffice_core::{Record, Status};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Status tab selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusFilter<S> {
    /// Every status
    All,
    /// One status only
    Only(S),
}

impl<S> Default for StatusFilter<S> {
    fn default() -> Self {
        Self::All
    }
}

impl<S: Status> StatusFilter<S> {
    /// Whether a record with this status passes
    pub fn accepts(&self, status: Option<S>) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => status == Some(*wanted),
        }
    }
}

impl<S: Status> fmt::Display for StatusFilter<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(status) => write!(f, "{status}"),
        }
    }
}

impl<S: Status> FromStr for StatusFilter<S> {
    type Err = backoffice_core::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

/// Whether a record's searchable text contains the query, ignoring case
///
/// A blank query matches every record.
pub fn matches_query<T: Record>(record: &T, query: &str) -> bool {
    let query = query.trim();
    if query.is_empty() {
        return true;
    }
    let haystack = fold(&record.search_fields().join(" "));
    haystack.contains(&fold(query))
}

/// Records matching both the query and the status filter, in input order
pub fn filter_records<'a, T: Record>(
    records: &'a [T],
    query: &str,
    status: &StatusFilter<T::Status>,
) -> Vec<&'a T> {
    records
        .iter()
        .filter(|record| status.accepts(record.status()) && matches_query(*record, query))
        .collect()
}

/// Per-status record counts for tab badges
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCounts<S> {
    /// Number of records overall
    pub total: usize,
    /// Count per status, in status display order; zero counts included
    pub by_status: Vec<(S, usize)>,
}

impl<S: Status> StatusCounts<S> {
    /// Count for one status
    pub fn get(&self, status: S) -> usize {
        self.by_status
            .iter()
            .find(|(s, _)| *s == status)
            .map_or(0, |(_, count)| *count)
    }

    /// Count shown on a tab
    pub fn for_filter(&self, filter: &StatusFilter<S>) -> usize {
        match filter {
            StatusFilter::All => self.total,
            StatusFilter::Only(status) => self.get(*status),
        }
    }
}

/// Count records per status
pub fn status_counts<T: Record>(records: &[T]) -> StatusCounts<T::Status> {
    let by_status = T::Status::ALL
        .iter()
        .map(|status| {
            let count = records
                .iter()
                .filter(|record| record.status() == Some(*status))
                .count();
            (*status, count)
        })
        .collect();
    StatusCounts {
        total: records.len(),
        by_status,
    }
}
