//! Single source of truth for one panel's list
//!
//! The store changes only when a load completes or a mutation is
//! confirmed. Every change takes a ticket from a monotonically increasing
//! counter; a load whose ticket is older than the last applied change is
//! discarded, so a slow response can never overwrite newer state.

use backoffice_client::{AdminClient, Fetched, ListEndpoint};
use backoffice_core::{Record, RecordId};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Mutex, MutexGuard};
use tracing::debug;

/// Sequence number of a store change
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    /// Raw sequence number
    pub const fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug)]
struct State<T> {
    records: Vec<T>,
    error: Option<String>,
    applied: u64,
}

/// List state of one panel
#[derive(Debug)]
pub struct PanelStore<T> {
    state: RwLock<State<T>>,
    issued: AtomicU64,
    processing: Mutex<()>,
}

impl<T> Default for PanelStore<T> {
    fn default() -> Self {
        Self {
            state: RwLock::new(State {
                records: Vec::new(),
                error: None,
                applied: 0,
            }),
            issued: AtomicU64::new(0),
            processing: Mutex::new(()),
        }
    }
}

impl<T: Record> PanelStore<T> {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the next ticket
    pub fn begin(&self) -> Ticket {
        Ticket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Apply a finished load if it is not stale
    ///
    /// Returns whether the result was applied.
    pub fn apply(&self, ticket: Ticket, fetched: Fetched<T>) -> bool {
        let mut state = self.state.write();
        if ticket.0 <= state.applied {
            debug!(
                ticket = ticket.0,
                applied = state.applied,
                "discarding stale list response"
            );
            return false;
        }
        state.records = fetched.records;
        state.error = fetched.error;
        state.applied = ticket.0;
        true
    }

    /// Load the list from `endpoint` and apply it
    ///
    /// `implied` fills in the status of records that arrive without one,
    /// for endpoints that list a single status. Returns whether the result
    /// was applied.
    pub async fn refresh(
        &self,
        client: &AdminClient,
        endpoint: &ListEndpoint,
        implied: Option<T::Status>,
    ) -> bool {
        let ticket = self.begin();
        let mut fetched: Fetched<T> = client.load(endpoint).await;
        if let Some(status) = implied {
            for record in fetched.records.iter_mut().filter(|r| r.status().is_none()) {
                record.set_status(status);
            }
        }
        self.apply(ticket, fetched)
    }

    /// Whether a load newer than the current state is outstanding
    pub fn is_loading(&self) -> bool {
        self.state.read().applied < self.issued.load(Ordering::SeqCst)
    }

    /// Error of the last applied load
    pub fn error(&self) -> Option<String> {
        self.state.read().error.clone()
    }

    /// Copy of the current records
    pub fn records(&self) -> Vec<T> {
        self.state.read().records.clone()
    }

    /// Number of records held
    pub fn len(&self) -> usize {
        self.state.read().records.len()
    }

    /// Whether the store holds no records
    pub fn is_empty(&self) -> bool {
        self.state.read().records.is_empty()
    }

    /// Run `f` over the current records without copying them
    pub fn with_records<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        f(&self.state.read().records)
    }

    /// Copy of one record
    pub fn get(&self, id: &RecordId) -> Option<T> {
        self.state
            .read()
            .records
            .iter()
            .find(|record| record.id() == id)
            .cloned()
    }

    /// Apply a confirmed change to the records
    ///
    /// Loads started before this change are discarded when they finish.
    fn commit<R>(&self, change: impl FnOnce(&mut Vec<T>) -> R) -> R {
        let ticket = self.begin();
        let mut state = self.state.write();
        let result = change(&mut state.records);
        state.applied = state.applied.max(ticket.0);
        result
    }

    /// Drop a record after a confirmed mutation
    pub fn remove(&self, id: &RecordId) -> Option<T> {
        self.commit(|records| {
            let index = records.iter().position(|record| record.id() == id)?;
            Some(records.remove(index))
        })
    }

    /// Set a record's status after a confirmed mutation
    ///
    /// Returns whether the record was found.
    pub fn patch_status(&self, id: &RecordId, status: T::Status) -> bool {
        self.commit(|records| {
            let Some(record) = records.iter_mut().find(|record| record.id() == id) else {
                return false;
            };
            record.set_status(status);
            true
        })
    }

    /// Add a record created by a confirmed mutation
    pub fn insert(&self, record: T) {
        self.commit(|records| records.push(record));
    }

    /// Serialize mutations on this panel
    ///
    /// The guard is held for the duration of a mutation and its follow-up.
    pub async fn processing(&self) -> MutexGuard<'_, ()> {
        self.processing.lock().await
    }

    /// Whether a mutation is in flight
    pub fn is_processing(&self) -> bool {
        self.processing.try_lock().is_err()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use backoffice_client::{AuthContext, MockBackend, endpoints};
    use backoffice_core::{ModerationRecord, ModerationStatus, Trip, TripStatus};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;

    fn trip(id: u64, status: &str) -> Trip {
        serde_json::from_value(json!({"id": id, "status": status})).unwrap()
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let store = PanelStore::<Trip>::new();
        let older = store.begin();
        let newer = store.begin();
        assert!(store.is_loading());

        assert!(store.apply(newer, Fetched::ok(vec![trip(2, "active")])));
        assert!(!store.is_loading());
        assert!(!store.apply(older, Fetched::ok(vec![trip(1, "active")])));

        let ids: Vec<String> = store.records().iter().map(|t| t.id.to_string()).collect();
        assert_eq!(ids, vec!["2"]);
    }

    #[test]
    fn test_local_patch_invalidates_inflight_load() {
        let store = PanelStore::<Trip>::new();
        let first = store.begin();
        store.apply(first, Fetched::ok(vec![trip(1, "active")]));

        let inflight = store.begin();
        assert!(store.patch_status(&RecordId::from(1_u64), TripStatus::Cancelled));
        assert!(!store.apply(inflight, Fetched::ok(vec![trip(1, "active")])));
        assert_eq!(
            store.get(&RecordId::from(1_u64)).unwrap().status,
            Some(TripStatus::Cancelled)
        );
    }

    #[test]
    fn test_failed_load_keeps_error_and_empties_list() {
        let store = PanelStore::<Trip>::new();
        let ticket = store.begin();
        store.apply(ticket, Fetched::ok(vec![trip(1, "active")]));
        let ticket = store.begin();
        store.apply(ticket, Fetched::failed("Backend returned 500: no message"));

        assert!(store.is_empty());
        assert_eq!(store.error().as_deref(), Some("Backend returned 500: no message"));
    }

    #[test]
    fn test_remove_and_insert() {
        let store = PanelStore::<Trip>::new();
        store.insert(trip(1, "pending"));
        store.insert(trip(2, "pending"));
        assert_eq!(store.len(), 2);

        let removed = store.remove(&RecordId::from(1_u64)).unwrap();
        assert_eq!(removed.id.as_str(), "1");
        assert!(store.remove(&RecordId::from(1_u64)).is_none());
        assert!(!store.patch_status(&RecordId::from(9_u64), TripStatus::Active));
        assert_eq!(store.with_records(<[Trip]>::len), 1);
    }

    #[tokio::test]
    async fn test_refresh_fills_implied_status() {
        let backend = MockBackend::new().with_get(
            "/host/admin/hosts/approved",
            json!([{"id": 1, "name": "Palm Suites"}, {"id": 2, "name": "Bay Inn", "status": "blocked"}]),
        );
        let client = AdminClient::new(Arc::new(backend), AuthContext::with_token("t"));
        let store = PanelStore::<ModerationRecord>::new();

        let queue = endpoints::HostQueue::Approved;
        assert!(store.refresh(&client, &endpoints::hosts(queue), Some(queue.status())).await);

        let statuses: Vec<_> = store.records().iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            vec![Some(ModerationStatus::Approved), Some(ModerationStatus::Blocked)]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_older_refresh_loses_to_newer() {
        let backend = MockBackend::new()
            .with_get("/travel/admin/trips", json!([{"id": 1, "status": "active"}]))
            .with_delay("/travel/admin/trips", Duration::from_secs(5));
        let client = AdminClient::new(Arc::new(backend.clone()), AuthContext::anonymous());
        let store = Arc::new(PanelStore::<Trip>::new());

        let slow = {
            let store = Arc::clone(&store);
            let client = client.clone();
            tokio::spawn(async move { store.refresh(&client, &endpoints::trips(), None).await })
        };
        tokio::task::yield_now().await;

        // newer load answers immediately with different data
        let ticket = store.begin();
        store.apply(ticket, Fetched::ok(vec![trip(7, "completed")]));

        assert!(!slow.await.unwrap());
        let ids: Vec<String> = store.records().iter().map(|t| t.id.to_string()).collect();
        assert_eq!(ids, vec!["7"]);
    }

    #[tokio::test]
    async fn test_processing_gate() {
        let store = PanelStore::<Trip>::new();
        assert!(!store.is_processing());
        let guard = store.processing().await;
        assert!(store.is_processing());
        drop(guard);
        assert!(!store.is_processing());
    }
}
