//! Typed access to the backend: list loads, record loads and mutation dispatch

use crate::auth::AuthContext;
use crate::backend::{AdminBackend, Mutation, MutationOutcome};
use crate::endpoints::ListEndpoint;
use crate::envelope::{Fetched, decode_list, decode_one};
use crate::error::ClientResult;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{info, warn};

/// Backend handle bundled with the credentials of the session
#[derive(Clone)]
pub struct AdminClient {
    backend: Arc<dyn AdminBackend>,
    auth: AuthContext,
}

impl std::fmt::Debug for AdminClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminClient")
            .field("backend", &self.backend.name())
            .field("auth", &self.auth)
            .finish()
    }
}

impl AdminClient {
    /// Create a client over any backend
    pub const fn new(backend: Arc<dyn AdminBackend>, auth: AuthContext) -> Self {
        Self { backend, auth }
    }

    /// Credentials attached to every request
    pub const fn auth(&self) -> &AuthContext {
        &self.auth
    }

    /// Fetch and decode a list, propagating failures
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status, or when the
    /// body matches none of the endpoint's envelopes.
    pub async fn fetch_list<T: DeserializeOwned>(&self, endpoint: &ListEndpoint) -> ClientResult<Vec<T>> {
        let body = self.backend.get_json(&self.auth, &endpoint.path).await?;
        let records = decode_list(body, endpoint.accepts)?;
        Ok(records)
    }

    /// Fetch a list, degrading any failure to an empty list with an error message
    pub async fn load<T: DeserializeOwned>(&self, endpoint: &ListEndpoint) -> Fetched<T> {
        let result = self.fetch_list(endpoint).await;
        if let Err(e) = &result {
            warn!(endpoint = %endpoint, error = %e, "list load failed; showing empty list");
        }
        result.into()
    }

    /// Fetch and decode a single record
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status, or decode failure.
    pub async fn fetch_record<T: DeserializeOwned>(&self, endpoint: &ListEndpoint) -> ClientResult<T> {
        let body = self.backend.get_json(&self.auth, &endpoint.path).await?;
        Ok(decode_one(body, endpoint.accepts)?)
    }

    /// Send a mutation with the session credentials
    ///
    /// # Errors
    ///
    /// Returns the backend error; its [`crate::ClientError::user_message`]
    /// carries the server-provided explanation when there is one.
    pub async fn dispatch(&self, mutation: &Mutation) -> ClientResult<MutationOutcome> {
        let outcome = self.backend.send(&self.auth, mutation).await?;
        info!(
            mutation = %mutation,
            message = outcome.message.as_deref().unwrap_or(""),
            "mutation confirmed"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use crate::endpoints;
    use crate::mock::MockBackend;
    use backoffice_core::{Application, RecordId, Trip, TripStatus};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn client(backend: &MockBackend) -> AdminClient {
        AdminClient::new(Arc::new(backend.clone()), AuthContext::with_token("tok"))
    }

    #[tokio::test]
    async fn test_load_decodes_keyed_envelope() {
        let backend = MockBackend::new().with_get(
            "/travel/admin/trips",
            json!({"success": true, "trips": [
                {"id": 1, "status": "active", "from_city": "Lagos"},
                {"id": 2, "status": "cancelled", "from_city": "Abuja"}
            ]}),
        );
        let fetched: Fetched<Trip> = client(&backend).load(&endpoints::trips()).await;

        assert!(!fetched.is_error());
        assert_eq!(fetched.records.len(), 2);
        assert_eq!(fetched.records[1].status, Some(TripStatus::Cancelled));
    }

    #[tokio::test]
    async fn test_load_degrades_on_failure() {
        let backend = MockBackend::new()
            .with_get_error("/travel/admin/trips", 500, None)
            .with_get("/travel/matches", json!({"unexpected": true}));
        let client = client(&backend);

        let trips: Fetched<Trip> = client.load(&endpoints::trips()).await;
        assert!(trips.is_error());
        assert!(trips.records.is_empty());

        let matches: Fetched<backoffice_core::Match> = client.load(&endpoints::matches()).await;
        assert!(matches.is_error());
        assert!(matches.error.unwrap().contains("Unexpected response shape"));
    }

    #[tokio::test]
    async fn test_fetch_record_and_dispatch() {
        let backend = MockBackend::new().with_get(
            "/carrer/admin/applications/a1",
            json!({"success": true, "data": {"id": "a1", "full_name": "Ngozi", "status": "reviewed"}}),
        );
        let client = client(&backend);
        let id = RecordId::from("a1");

        let app: Application = client.fetch_record(&endpoints::application(&id)).await.unwrap();
        assert_eq!(app.name.as_deref(), Some("Ngozi"));

        client.dispatch(&endpoints::cancel_trip(&id)).await.unwrap();
        let sent = backend.mutations_sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].authenticated);
    }
}
