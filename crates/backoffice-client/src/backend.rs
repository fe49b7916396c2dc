//! Backend trait and mutation types

use crate::auth::AuthContext;
use crate::error::ClientResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// HTTP method of a mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `POST`
    Post,
}

impl Method {
    /// Method name as sent on the wire
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A state-changing request, ready to dispatch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mutation {
    /// HTTP method
    pub method: Method,

    /// Path relative to the backend base URL, starting with `/`
    pub path: String,

    /// JSON body, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl Mutation {
    /// `PUT` without a body
    pub fn put(path: impl Into<String>) -> Self {
        Self {
            method: Method::Put,
            path: path.into(),
            body: None,
        }
    }

    /// `PATCH` with a JSON body
    pub fn patch(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Patch,
            path: path.into(),
            body: Some(body),
        }
    }

    /// `POST` with a JSON body
    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            body: Some(body),
        }
    }

    /// Attach or replace the JSON body
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

/// Result of a successful mutation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MutationOutcome {
    /// Message from the response body, if the backend sent one
    pub message: Option<String>,

    /// Full response body (`Null` for empty responses)
    pub body: Value,
}

impl MutationOutcome {
    /// Build an outcome from a response body, picking up its `message` field
    pub fn from_body(body: Value) -> Self {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .map(ToString::to_string);
        Self { message, body }
    }
}

/// What a panel does with its list after a confirmed mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfterMutation<S> {
    /// Reload the list from the backend
    Refetch,
    /// Drop the record from the current view
    RemoveLocal,
    /// Set the record's status in place
    PatchStatus(S),
}

/// Access to the admin REST backend
///
/// Implemented over HTTP by [`crate::HttpBackend`] and in memory by
/// [`crate::MockBackend`].
#[async_trait]
pub trait AdminBackend: Send + Sync {
    /// `GET` a path and return the decoded JSON body
    async fn get_json(&self, auth: &AuthContext, path: &str) -> ClientResult<Value>;

    /// Dispatch a mutation
    ///
    /// Non-2xx responses are returned as [`crate::ClientError::Status`]
    /// carrying the server message when present.
    async fn send(&self, auth: &AuthContext, mutation: &Mutation) -> ClientResult<MutationOutcome>;

    /// Short name for logs
    fn name(&self) -> &str;
}
