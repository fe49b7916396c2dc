//! Endpoint catalogue of the admin backend
//!
//! List endpoints carry the envelopes they are known to answer with.
//! Mutation builders produce ready-to-dispatch [`Mutation`]s.

use crate::backend::Mutation;
use crate::envelope::Envelope;
use crate::error::{ClientError, ClientResult};
use backoffice_core::{ApplicationStatus, JobStatus, ModerationStatus, OfferStatus, RecordId, Status};
use serde_json::{Value, json};
use std::borrow::Cow;
use std::fmt;

/// A list endpoint and the response shapes it may use
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEndpoint {
    /// Path relative to the base URL
    pub path: Cow<'static, str>,
    /// Accepted envelopes, tried in order
    pub accepts: &'static [Envelope],
}

impl ListEndpoint {
    const fn fixed(path: &'static str, accepts: &'static [Envelope]) -> Self {
        Self {
            path: Cow::Borrowed(path),
            accepts,
        }
    }
}

impl fmt::Display for ListEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

fn segment(id: &RecordId) -> Cow<'_, str> {
    urlencoding::encode(id.as_str())
}

/// Host application queue, one endpoint per queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostQueue {
    /// Awaiting review
    Pending,
    /// Approved hosts
    Approved,
    /// Rejected hosts
    Rejected,
}

impl HostQueue {
    /// Every queue, in tab order
    pub const ALL: [Self; 3] = [Self::Pending, Self::Approved, Self::Rejected];

    /// Status every record listed from this queue is in
    pub const fn status(self) -> ModerationStatus {
        match self {
            Self::Pending => ModerationStatus::Pending,
            Self::Approved => ModerationStatus::Approved,
            Self::Rejected => ModerationStatus::Rejected,
        }
    }
}

impl TryFrom<ModerationStatus> for HostQueue {
    type Error = ClientError;

    fn try_from(status: ModerationStatus) -> ClientResult<Self> {
        match status {
            ModerationStatus::Pending => Ok(Self::Pending),
            ModerationStatus::Approved => Ok(Self::Approved),
            ModerationStatus::Rejected => Ok(Self::Rejected),
            ModerationStatus::Blocked => Err(ClientError::validation(
                "hosts have no blocked queue; use pending, approved or rejected",
            )),
        }
    }
}

/// Reviewed-content list of events and properties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    /// Approved records
    Approved,
    /// Rejected records
    Rejected,
}

impl Decision {
    /// Both lists, in tab order
    pub const ALL: [Self; 2] = [Self::Approved, Self::Rejected];

    /// Status every record listed under this decision is in
    pub const fn status(self) -> ModerationStatus {
        match self {
            Self::Approved => ModerationStatus::Approved,
            Self::Rejected => ModerationStatus::Rejected,
        }
    }
}

impl TryFrom<ModerationStatus> for Decision {
    type Error = ClientError;

    fn try_from(status: ModerationStatus) -> ClientResult<Self> {
        match status {
            ModerationStatus::Approved => Ok(Self::Approved),
            ModerationStatus::Rejected => Ok(Self::Rejected),
            other => Err(ClientError::validation(format!(
                "no {other} list; use approved or rejected"
            ))),
        }
    }
}

// List endpoints

/// `GET /travel/admin/trips`
pub const fn trips() -> ListEndpoint {
    ListEndpoint::fixed(
        "/travel/admin/trips",
        &[Envelope::Bare, Envelope::Data, Envelope::Results, Envelope::Keyed("trips")],
    )
}

/// `GET /travel/matches`
pub const fn matches() -> ListEndpoint {
    ListEndpoint::fixed(
        "/travel/matches",
        &[Envelope::Bare, Envelope::Data, Envelope::Results, Envelope::Keyed("matches")],
    )
}

/// `GET /host/admin/hosts/{pending,approved,rejected}`
pub fn hosts(queue: HostQueue) -> ListEndpoint {
    let path = match queue {
        HostQueue::Pending => "/host/admin/hosts/pending",
        HostQueue::Approved => "/host/admin/hosts/approved",
        HostQueue::Rejected => "/host/admin/hosts/rejected",
    };
    ListEndpoint::fixed(
        path,
        &[Envelope::Bare, Envelope::Data, Envelope::Results, Envelope::Keyed("hosts")],
    )
}

/// `GET /events/admin/events/{approved,rejected}`
pub fn events(decision: Decision) -> ListEndpoint {
    let path = match decision {
        Decision::Approved => "/events/admin/events/approved",
        Decision::Rejected => "/events/admin/events/rejected",
    };
    ListEndpoint::fixed(path, &[Envelope::Data, Envelope::Bare, Envelope::Keyed("events")])
}

/// `GET /adminproperty/admin/properties/{approved,rejected}`
pub fn properties(decision: Decision) -> ListEndpoint {
    let path = match decision {
        Decision::Approved => "/adminproperty/admin/properties/approved",
        Decision::Rejected => "/adminproperty/admin/properties/rejected",
    };
    ListEndpoint::fixed(
        path,
        &[Envelope::Data, Envelope::Bare, Envelope::Keyed("properties")],
    )
}

/// `GET /buy-sell/admin/buy-sell/blocked`
pub const fn blocked_listings() -> ListEndpoint {
    ListEndpoint::fixed(
        "/buy-sell/admin/buy-sell/blocked",
        &[Envelope::Data, Envelope::Bare, Envelope::Keyed("listings")],
    )
}

/// `GET /carrer/admin/jobs`
pub const fn jobs() -> ListEndpoint {
    ListEndpoint::fixed(
        "/carrer/admin/jobs",
        &[Envelope::Bare, Envelope::Data, Envelope::Keyed("jobs")],
    )
}

/// `GET /carrer/admin/applications`
pub const fn applications() -> ListEndpoint {
    ListEndpoint::fixed(
        "/carrer/admin/applications",
        &[
            Envelope::Bare,
            Envelope::Data,
            Envelope::Results,
            Envelope::Keyed("applications"),
        ],
    )
}

/// `GET /carrer/admin/applications/:id`
pub fn application(id: &RecordId) -> ListEndpoint {
    ListEndpoint {
        path: Cow::Owned(format!("/carrer/admin/applications/{}", segment(id))),
        accepts: &[Envelope::Data, Envelope::Keyed("application"), Envelope::Bare],
    }
}

/// `GET /carrer/admin/offers`
pub const fn offers() -> ListEndpoint {
    ListEndpoint::fixed(
        "/carrer/admin/offers",
        &[Envelope::Bare, Envelope::Data, Envelope::Keyed("offers")],
    )
}

// Mutations

fn status_body<S: Status>(status: S) -> Value {
    json!({ "status": status.as_str() })
}

fn required_reason(reason: &str) -> ClientResult<&str> {
    let reason = reason.trim();
    if reason.is_empty() {
        return Err(ClientError::validation("a rejection reason is required"));
    }
    Ok(reason)
}

/// `PUT /travel/admin/trips/:id/cancel`
pub fn cancel_trip(id: &RecordId) -> Mutation {
    Mutation::put(format!("/travel/admin/trips/{}/cancel", segment(id)))
}

/// `PUT /travel/admin/hosts/:id/block`
pub fn block_travel_host(host_id: &RecordId) -> Mutation {
    Mutation::put(format!("/travel/admin/hosts/{}/block", segment(host_id)))
}

/// `PUT /travel/admin/matches/:id/cancel`
pub fn cancel_match(id: &RecordId) -> Mutation {
    Mutation::put(format!("/travel/admin/matches/{}/cancel", segment(id)))
}

/// `PUT /host/admin/hosts/approve/:id`
pub fn approve_host(id: &RecordId) -> Mutation {
    Mutation::put(format!("/host/admin/hosts/approve/{}", segment(id)))
}

/// `PUT /host/admin/hosts/reject/:id` with `{rejection_reason}`
///
/// # Errors
///
/// Returns a validation error if the trimmed reason is empty.
pub fn reject_host(id: &RecordId, reason: &str) -> ClientResult<Mutation> {
    let reason = required_reason(reason)?;
    Ok(reject_host_request(id).with_body(json!({ "rejection_reason": reason })))
}

/// `PUT /host/admin/hosts/reject/:id` without its reason
///
/// For forms that collect the reason before submitting.
pub fn reject_host_request(id: &RecordId) -> Mutation {
    Mutation::put(format!("/host/admin/hosts/reject/{}", segment(id)))
}

/// `POST /carrer/admin/jobs`
pub fn create_job(payload: Value) -> Mutation {
    Mutation::post("/carrer/admin/jobs", payload)
}

/// `PATCH /carrer/admin/jobs/:id/status`
pub fn set_job_status(id: &RecordId, status: JobStatus) -> Mutation {
    Mutation::patch(
        format!("/carrer/admin/jobs/{}/status", segment(id)),
        status_body(status),
    )
}

/// `PATCH /carrer/admin/applications/:id/status`
///
/// A non-empty reason is sent as `rejection_reason` when rejecting.
pub fn set_application_status(
    id: &RecordId,
    status: ApplicationStatus,
    reason: Option<&str>,
) -> Mutation {
    let mut body = status_body(status);
    if status == ApplicationStatus::Rejected
        && let Some(reason) = reason.map(str::trim).filter(|r| !r.is_empty())
    {
        body["rejection_reason"] = Value::String(reason.to_string());
    }
    Mutation::patch(
        format!("/carrer/admin/applications/{}/status", segment(id)),
        body,
    )
}

/// `POST /carrer/applications/:id/notify` with `{subject, message, template}`
pub fn notify_application(id: &RecordId, subject: &str, message: &str, template: &str) -> Mutation {
    Mutation::post(
        format!("/carrer/applications/{}/notify", segment(id)),
        json!({
            "subject": subject,
            "message": message,
            "template": template,
        }),
    )
}

/// `POST /carrer/admin/offers`
pub fn create_offer(payload: Value) -> Mutation {
    Mutation::post("/carrer/admin/offers", payload)
}

/// `PATCH /carrer/admin/offers/:id/status`
pub fn set_offer_status(id: &RecordId, status: OfferStatus) -> Mutation {
    Mutation::patch(
        format!("/carrer/admin/offers/{}/status", segment(id)),
        status_body(status),
    )
}
