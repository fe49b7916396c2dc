//! In-memory backend for testing

use crate::auth::AuthContext;
use crate::backend::{AdminBackend, Method, Mutation, MutationOutcome};
use crate::error::{ClientError, ClientResult};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Canned reply for a route
#[derive(Debug, Clone)]
enum Reply {
    Json(Value),
    Status(u16, Option<String>),
}

impl Reply {
    fn into_result(self) -> ClientResult<Value> {
        match self {
            Self::Json(body) => Ok(body),
            Self::Status(status, message) => Err(ClientError::status(status, message)),
        }
    }
}

/// A request seen by the mock backend
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// `GET` for list loads, otherwise the mutation method
    pub method: String,
    /// Request path
    pub path: String,
    /// Mutation body
    pub body: Option<Value>,
    /// Whether a bearer token was attached
    pub authenticated: bool,
}

/// In-memory backend with canned replies and a call log
///
/// Clones share routes and call log.
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    gets: Arc<Mutex<HashMap<String, Reply>>>,
    mutations: Arc<Mutex<HashMap<(Method, String), Reply>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    delays: Arc<Mutex<HashMap<String, Duration>>>,
}

impl MockBackend {
    /// Create an empty mock backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `GET path` with a JSON body
    #[must_use]
    pub fn with_get(self, path: impl Into<String>, body: Value) -> Self {
        self.set_get(path, body);
        self
    }

    /// Answer `GET path` with an error status
    #[must_use]
    pub fn with_get_error(self, path: impl Into<String>, status: u16, message: Option<&str>) -> Self {
        self.gets.lock().insert(
            path.into(),
            Reply::Status(status, message.map(ToString::to_string)),
        );
        self
    }

    /// Answer a mutation with a JSON body
    #[must_use]
    pub fn with_mutation(self, method: Method, path: impl Into<String>, body: Value) -> Self {
        self.mutations
            .lock()
            .insert((method, path.into()), Reply::Json(body));
        self
    }

    /// Answer a mutation with an error status
    #[must_use]
    pub fn with_mutation_error(
        self,
        method: Method,
        path: impl Into<String>,
        status: u16,
        message: Option<&str>,
    ) -> Self {
        self.mutations.lock().insert(
            (method, path.into()),
            Reply::Status(status, message.map(ToString::to_string)),
        );
        self
    }

    /// Delay replies to `GET path`
    #[must_use]
    pub fn with_delay(self, path: impl Into<String>, delay: Duration) -> Self {
        self.delays.lock().insert(path.into(), delay);
        self
    }

    /// Replace the body served for `GET path`
    pub fn set_get(&self, path: impl Into<String>, body: Value) {
        self.gets.lock().insert(path.into(), Reply::Json(body));
    }

    /// All requests seen so far, in order
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    /// Mutations seen so far, in order
    pub fn mutations_sent(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .iter()
            .filter(|call| call.method != "GET")
            .cloned()
            .collect()
    }

    /// Number of `GET` requests made to `path`
    pub fn get_count(&self, path: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| call.method == "GET" && call.path == path)
            .count()
    }
}

#[async_trait]
impl AdminBackend for MockBackend {
    async fn get_json(&self, auth: &AuthContext, path: &str) -> ClientResult<Value> {
        self.calls.lock().push(RecordedCall {
            method: "GET".to_string(),
            path: path.to_string(),
            body: None,
            authenticated: auth.is_authenticated(),
        });

        let delay = self.delays.lock().get(path).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let reply = self.gets.lock().get(path).cloned();
        reply
            .ok_or_else(|| ClientError::NoRoute {
                method: "GET".to_string(),
                path: path.to_string(),
            })?
            .into_result()
    }

    async fn send(&self, auth: &AuthContext, mutation: &Mutation) -> ClientResult<MutationOutcome> {
        self.calls.lock().push(RecordedCall {
            method: mutation.method.to_string(),
            path: mutation.path.clone(),
            body: mutation.body.clone(),
            authenticated: auth.is_authenticated(),
        });

        let reply = self
            .mutations
            .lock()
            .get(&(mutation.method, mutation.path.clone()))
            .cloned();
        // Unrouted mutations succeed with a generic body
        let body = match reply {
            Some(reply) => reply.into_result()?,
            None => json!({"success": true}),
        };
        Ok(MutationOutcome::from_body(body))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_get_routes_and_log() {
        let backend = MockBackend::new()
            .with_get("/travel/matches", json!([]))
            .with_get_error("/travel/admin/trips", 500, Some("boom"));
        let auth = AuthContext::with_token("t");

        assert_eq!(backend.get_json(&auth, "/travel/matches").await.unwrap(), json!([]));
        let err = backend.get_json(&auth, "/travel/admin/trips").await.unwrap_err();
        assert_eq!(err.user_message(), "boom");
        assert!(matches!(
            backend.get_json(&auth, "/nope").await,
            Err(ClientError::NoRoute { .. })
        ));

        assert_eq!(backend.calls().len(), 3);
        assert!(backend.calls().iter().all(|call| call.authenticated));
        assert_eq!(backend.get_count("/travel/matches"), 1);
    }

    #[tokio::test]
    async fn test_mutations() {
        let backend = MockBackend::new().with_mutation_error(
            Method::Put,
            "/host/admin/hosts/approve/1",
            409,
            Some("Host already approved"),
        );
        let auth = AuthContext::anonymous();

        let err = backend
            .send(&auth, &Mutation::put("/host/admin/hosts/approve/1"))
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Host already approved");

        let outcome = backend
            .send(&auth, &Mutation::put("/host/admin/hosts/approve/2"))
            .await
            .unwrap();
        assert_eq!(outcome.body, json!({"success": true}));

        let sent = backend.mutations_sent();
        assert_eq!(sent.len(), 2);
        assert!(!sent[0].authenticated);
    }
}
