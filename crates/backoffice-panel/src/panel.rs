//! One moderation panel: list source, store, derived views and mutations

use crate::error::{PanelError, PanelResult};
use crate::filter::{StatusCounts, StatusFilter, filter_records, status_counts};
use crate::group::{Group, group_by};
use crate::modal::{DetailView, Submission};
use crate::pagination::{Page, PageRequest};
use crate::store::PanelStore;
use backoffice_client::{AdminClient, AfterMutation, ListEndpoint, Mutation, MutationOutcome};
use backoffice_core::{Record, RecordId};
use parking_lot::Mutex;
use std::borrow::Cow;
use tracing::{info, warn};

/// Endpoint a panel lists from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSource<S> {
    /// List endpoint
    pub endpoint: ListEndpoint,
    /// Status of every record on this endpoint, for single-status queues
    pub implied: Option<S>,
}

impl<S> ListSource<S> {
    /// Source whose records carry their own status
    pub const fn new(endpoint: ListEndpoint) -> Self {
        Self {
            endpoint,
            implied: None,
        }
    }

    /// Source listing records of a single status
    pub const fn single_status(endpoint: ListEndpoint, status: S) -> Self {
        Self {
            endpoint,
            implied: Some(status),
        }
    }
}

/// What the operator sees: search text and status tab
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewQuery<S> {
    /// Free-text search
    pub search: String,
    /// Status tab
    pub status: StatusFilter<S>,
}

impl<S> Default for ViewQuery<S> {
    fn default() -> Self {
        Self {
            search: String::new(),
            status: StatusFilter::All,
        }
    }
}

impl<S> ViewQuery<S> {
    /// Query with search text and status tab
    pub fn new(search: impl Into<String>, status: StatusFilter<S>) -> Self {
        Self {
            search: search.into(),
            status,
        }
    }
}

/// A moderation panel over one record type
#[derive(Debug)]
pub struct Panel<T: Record> {
    client: AdminClient,
    source: Mutex<ListSource<T::Status>>,
    store: PanelStore<T>,
}

impl<T: Record> Panel<T> {
    /// Create a panel; call [`Panel::refresh`] to load it
    pub fn new(client: AdminClient, source: ListSource<T::Status>) -> Self {
        Self {
            client,
            source: Mutex::new(source),
            store: PanelStore::new(),
        }
    }

    /// Backend client used by the panel
    pub const fn client(&self) -> &AdminClient {
        &self.client
    }

    /// Underlying store
    pub const fn store(&self) -> &PanelStore<T> {
        &self.store
    }

    /// Current list source
    pub fn source(&self) -> ListSource<T::Status> {
        self.source.lock().clone()
    }

    /// Reload the list from the current source
    ///
    /// Returns whether the result was applied; a load overtaken by a newer
    /// change is dropped.
    pub async fn refresh(&self) -> bool {
        let source = self.source();
        self.store
            .refresh(&self.client, &source.endpoint, source.implied)
            .await
    }

    /// Switch to another endpoint (for example another review queue) and load it
    pub async fn switch_source(&self, source: ListSource<T::Status>) -> bool {
        *self.source.lock() = source;
        self.refresh().await
    }

    /// Error of the last load, shown instead of the list
    pub fn error(&self) -> Option<String> {
        self.store.error()
    }

    /// Filtered records, in backend order
    pub fn view(&self, query: &ViewQuery<T::Status>) -> Vec<T> {
        self.store.with_records(|records| {
            filter_records(records, &query.search, &query.status)
                .into_iter()
                .cloned()
                .collect()
        })
    }

    /// Per-status counts of the whole list
    pub fn counts(&self) -> StatusCounts<T::Status> {
        self.store.with_records(status_counts)
    }

    /// Filtered records grouped by [`Record::group_key`], one page of groups
    pub fn grouped(&self, query: &ViewQuery<T::Status>, page: PageRequest) -> Page<Group<T>> {
        let groups = group_by(self.view(query), |record| {
            record.group_key().map(Cow::into_owned)
        });
        Page::paginate(groups, page)
    }

    /// Full field listing of one record in the current list
    pub fn detail(&self, id: &RecordId) -> PanelResult<DetailView> {
        let record = self.store.get(id).ok_or_else(|| PanelError::NotFound {
            id: id.to_string(),
        })?;
        DetailView::from_record(&record)
            .map_err(|e| PanelError::invalid("record", format!("cannot render record: {e}")))
    }

    /// Dispatch a submitted action and update the list once the backend confirms
    ///
    /// Mutations on one panel run one at a time. On failure the list is
    /// left unchanged.
    pub async fn execute(
        &self,
        target: &RecordId,
        submission: Submission<T::Status>,
    ) -> PanelResult<MutationOutcome> {
        let _processing = self.store.processing().await;

        let outcome = match self.client.dispatch(&submission.mutation).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(
                    action = %submission.kind,
                    record = %target,
                    error = %e,
                    "action failed"
                );
                return Err(e.into());
            }
        };

        match submission.after {
            AfterMutation::Refetch => {
                self.refresh().await;
            }
            AfterMutation::RemoveLocal => {
                self.store.remove(target);
            }
            AfterMutation::PatchStatus(status) => {
                if !self.store.patch_status(target, status) {
                    warn!(record = %target, "confirmed record is not in the current list");
                }
            }
        }
        info!(action = %submission.kind, record = %target, "action applied");
        Ok(outcome)
    }

    /// Dispatch a create request and reload the list once confirmed
    pub async fn create(&self, mutation: &Mutation) -> PanelResult<MutationOutcome> {
        let _processing = self.store.processing().await;
        let outcome = self.client.dispatch(mutation).await?;
        self.refresh().await;
        Ok(outcome)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use crate::actions;
    use crate::modal::ActionKind;
    use backoffice_client::{AuthContext, Method, MockBackend, endpoints};
    use backoffice_core::{
        Application, ApplicationStatus, Job, ModerationRecord, ModerationStatus, Trip, TripStatus,
    };
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Arc;

    fn client(backend: &MockBackend) -> AdminClient {
        AdminClient::new(Arc::new(backend.clone()), AuthContext::with_token("tok"))
    }

    fn ids<T: Record>(records: &[T]) -> Vec<String> {
        records.iter().map(|r| r.id().to_string()).collect()
    }

    #[tokio::test]
    async fn test_active_trips_tab() {
        let backend = MockBackend::new().with_get(
            "/travel/admin/trips",
            json!([
                {"id": 1, "status": "active", "from_city": "Lagos"},
                {"id": 2, "status": "cancelled", "from_city": "Abuja"}
            ]),
        );
        let panel = Panel::<Trip>::new(client(&backend), ListSource::new(endpoints::trips()));
        assert!(panel.refresh().await);

        let active = panel.view(&ViewQuery::new("", StatusFilter::Only(TripStatus::Active)));
        assert_eq!(ids(&active), vec!["1"]);
        assert_eq!(panel.counts().get(TripStatus::Cancelled), 1);
    }

    #[tokio::test]
    async fn test_cancel_trip_refetches_list() {
        let backend = MockBackend::new()
            .with_get("/travel/admin/trips", json!([{"id": 1, "status": "active"}]));
        let panel = Panel::<Trip>::new(client(&backend), ListSource::new(endpoints::trips()));
        panel.refresh().await;

        backend.set_get("/travel/admin/trips", json!([{"id": 1, "status": "cancelled"}]));
        let mut form = actions::trip_actions(&panel.store().get(&RecordId::from(1_u64)).unwrap());
        form.select(ActionKind::Cancel).unwrap();
        panel
            .execute(&RecordId::from(1_u64), form.submit().unwrap())
            .await
            .unwrap();

        assert_eq!(backend.get_count("/travel/admin/trips"), 2);
        assert_eq!(
            panel.store().get(&RecordId::from(1_u64)).unwrap().status,
            Some(TripStatus::Cancelled)
        );
    }

    #[tokio::test]
    async fn test_approve_host_removes_from_pending_queue() {
        let backend = MockBackend::new().with_get(
            "/host/admin/hosts/pending",
            json!({"data": [{"id": 1, "name": "Palm Suites"}, {"id": 2, "name": "Bay Inn"}]}),
        );
        let queue = endpoints::HostQueue::Pending;
        let panel = Panel::<ModerationRecord>::new(
            client(&backend),
            ListSource::single_status(endpoints::hosts(queue), queue.status()),
        );
        panel.refresh().await;

        let host = panel.store().get(&RecordId::from(1_u64)).unwrap();
        let mut form = actions::host_actions(&host);
        form.select(ActionKind::Approve).unwrap();
        panel.execute(&host.id, form.submit().unwrap()).await.unwrap();

        assert_eq!(ids(&panel.store().records()), vec!["2"]);
        assert_eq!(backend.get_count("/host/admin/hosts/pending"), 1);
        assert_eq!(backend.mutations_sent()[0].path, "/host/admin/hosts/approve/1");
    }

    #[tokio::test]
    async fn test_failed_action_leaves_state_unchanged() {
        let backend = MockBackend::new()
            .with_get("/host/admin/hosts/pending", json!([{"id": 1, "status": "pending"}]))
            .with_mutation_error(
                Method::Put,
                "/host/admin/hosts/approve/1",
                409,
                Some("Host already approved"),
            );
        let panel = Panel::<ModerationRecord>::new(
            client(&backend),
            ListSource::new(endpoints::hosts(endpoints::HostQueue::Pending)),
        );
        panel.refresh().await;

        let host = panel.store().get(&RecordId::from(1_u64)).unwrap();
        let mut form = actions::host_actions(&host);
        form.select(ActionKind::Approve).unwrap();
        let err = panel.execute(&host.id, form.submit().unwrap()).await.unwrap_err();

        assert_eq!(err.alert(), "Host already approved");
        assert_eq!(panel.store().len(), 1);
        assert_eq!(
            panel.store().get(&host.id).unwrap().status,
            Some(ModerationStatus::Pending)
        );
    }

    #[tokio::test]
    async fn test_application_status_patch_is_local() {
        let backend = MockBackend::new().with_get(
            "/carrer/admin/applications",
            json!({"applications": [{"id": "a1", "name": "Ife", "job_title": "Designer", "status": "pending"}]}),
        );
        let panel = Panel::<Application>::new(
            client(&backend),
            ListSource::new(endpoints::applications()),
        );
        panel.refresh().await;

        let id = RecordId::from("a1");
        let change = actions::application_status_change(&id, ApplicationStatus::Shortlisted, None).unwrap();
        panel.execute(&id, change).await.unwrap();

        assert_eq!(backend.get_count("/carrer/admin/applications"), 1);
        assert_eq!(
            panel.store().get(&id).unwrap().status,
            Some(ApplicationStatus::Shortlisted)
        );
    }

    #[tokio::test]
    async fn test_grouped_jobs_page() {
        let jobs: Vec<_> = (1..=7)
            .map(|i| json!({"id": i, "title": format!("Role {i}"), "department": format!("Dept {i}")}))
            .collect();
        let backend = MockBackend::new().with_get("/carrer/admin/jobs", json!(jobs));
        let panel = Panel::<Job>::new(client(&backend), ListSource::new(endpoints::jobs()));
        panel.refresh().await;

        let page = panel.grouped(&ViewQuery::default(), PageRequest::default());
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.total_items, 7);
        assert!(page.has_next);

        let filtered = panel.grouped(&ViewQuery::new("role 7", StatusFilter::All), PageRequest::default());
        assert_eq!(filtered.items.len(), 1);
        assert_eq!(filtered.items[0].key, "Dept 7");
    }

    #[tokio::test]
    async fn test_detail_and_missing_record() {
        let backend = MockBackend::new()
            .with_get("/carrer/admin/jobs", json!([{"id": 1, "title": "Backend", "location": "Remote"}]));
        let panel = Panel::<Job>::new(client(&backend), ListSource::new(endpoints::jobs()));
        panel.refresh().await;

        let view = panel.detail(&RecordId::from(1_u64)).unwrap();
        assert_eq!(view.get("location"), Some("Remote"));
        assert!(matches!(
            panel.detail(&RecordId::from(2_u64)),
            Err(PanelError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_load_failure_shows_error() {
        let backend = MockBackend::new().with_get_error("/carrer/admin/offers", 500, None);
        let panel = Panel::<backoffice_core::Offer>::new(
            client(&backend),
            ListSource::new(endpoints::offers()),
        );
        panel.refresh().await;

        assert!(panel.store().is_empty());
        assert!(panel.error().is_some());
    }
}
