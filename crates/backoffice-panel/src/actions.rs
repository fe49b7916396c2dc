//! Which actions each record offers, and what follows a confirmed action
//!
//! Cascading actions (cancelling a trip cancels its matches, blocking a
//! host affects all their trips) reload the list; isolated status changes
//! patch the record in place; decisions on a review queue remove the
//! record from that queue.

use crate::error::{PanelError, PanelResult};
use crate::modal::{Action, ActionForm, ActionKind, Submission};
use backoffice_client::{AfterMutation, endpoints};
use backoffice_core::{
    Application, ApplicationStatus, JobStatus, Match, MatchStatus, ModerationRecord,
    ModerationStatus, OfferStatus, Record, RecordId, Trip, TripStatus,
};

/// Actions on a trip: cancel while active, block a host that is not blocked
pub fn trip_actions(trip: &Trip) -> ActionForm<TripStatus> {
    let mut actions = Vec::new();
    if trip.status == Some(TripStatus::Active) {
        actions.push(Action::new(
            ActionKind::Cancel,
            endpoints::cancel_trip(&trip.id),
            AfterMutation::Refetch,
        ));
    }
    if let Some(host) = &trip.host
        && let Some(host_id) = &host.id
        && host.status != Some(ModerationStatus::Blocked)
    {
        actions.push(Action::new(
            ActionKind::Block,
            endpoints::block_travel_host(host_id),
            AfterMutation::Refetch,
        ));
    }
    ActionForm::new(actions)
}

/// Actions on a match: cancel while confirmed or pending
pub fn match_actions(record: &Match) -> ActionForm<MatchStatus> {
    let cancellable = matches!(
        record.status,
        Some(MatchStatus::Confirmed | MatchStatus::Pending)
    );
    let actions = if cancellable {
        vec![Action::new(
            ActionKind::Cancel,
            endpoints::cancel_match(&record.id),
            AfterMutation::Refetch,
        )]
    } else {
        Vec::new()
    };
    ActionForm::new(actions)
}

/// Actions on a host application: approve or reject while pending
pub fn host_actions(host: &ModerationRecord) -> ActionForm<ModerationStatus> {
    if host.status() != Some(ModerationStatus::Pending) {
        return ActionForm::new(Vec::new());
    }
    ActionForm::new(vec![
        Action::new(
            ActionKind::Approve,
            endpoints::approve_host(&host.id),
            AfterMutation::RemoveLocal,
        ),
        Action::new(
            ActionKind::Reject,
            endpoints::reject_host_request(&host.id),
            AfterMutation::RemoveLocal,
        )
        .with_reason("rejection_reason"),
    ])
}

/// Events, properties and blocked listings are read-only
pub const fn read_only<S: Copy>() -> ActionForm<S> {
    ActionForm::new(Vec::new())
}

/// Actions on an application: approve or reject while pending
pub fn application_actions(application: &Application) -> ActionForm<ApplicationStatus> {
    if application.status != Some(ApplicationStatus::Pending) {
        return ActionForm::new(Vec::new());
    }
    ActionForm::new(vec![
        Action::new(
            ActionKind::Approve,
            endpoints::set_application_status(&application.id, ApplicationStatus::Approved, None),
            AfterMutation::PatchStatus(ApplicationStatus::Approved),
        ),
        Action::new(
            ActionKind::Reject,
            endpoints::set_application_status(&application.id, ApplicationStatus::Rejected, None),
            AfterMutation::PatchStatus(ApplicationStatus::Rejected),
        )
        .with_reason("rejection_reason"),
    ])
}

/// Move a job to another status; patched in place once confirmed
pub fn job_status_change(id: &RecordId, status: JobStatus) -> Submission<JobStatus> {
    Submission {
        kind: ActionKind::SetStatus,
        mutation: endpoints::set_job_status(id, status),
        after: AfterMutation::PatchStatus(status),
    }
}

/// Move an application to any status; rejecting needs a non-blank reason
///
/// # Errors
///
/// Returns [`PanelError::InvalidInput`] when rejecting without a reason.
pub fn application_status_change(
    id: &RecordId,
    status: ApplicationStatus,
    reason: Option<&str>,
) -> PanelResult<Submission<ApplicationStatus>> {
    let reason = reason.map(str::trim).filter(|reason| !reason.is_empty());
    if status == ApplicationStatus::Rejected && reason.is_none() {
        return Err(PanelError::invalid("reason", "a reason is required"));
    }
    Ok(Submission {
        kind: ActionKind::SetStatus,
        mutation: endpoints::set_application_status(id, status, reason),
        after: AfterMutation::PatchStatus(status),
    })
}

/// Move an offer to another status; patched in place once confirmed
pub fn offer_status_change(id: &RecordId, status: OfferStatus) -> Submission<OfferStatus> {
    Submission {
        kind: ActionKind::SetStatus,
        mutation: endpoints::set_offer_status(id, status),
        after: AfterMutation::PatchStatus(status),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use backoffice_client::Method;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn trip(value: serde_json::Value) -> Trip {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_active_trip_with_host_offers_cancel_and_block() {
        let form = trip_actions(&trip(json!({
            "id": 1, "status": "active", "host": {"id": 9, "status": "approved"}
        })));
        assert_eq!(form.available(), vec![ActionKind::Cancel, ActionKind::Block]);
    }

    #[test]
    fn test_blocked_host_cannot_be_blocked_again() {
        let form = trip_actions(&trip(json!({
            "id": 1, "status": "completed", "host": {"id": 9, "status": "blocked"}
        })));
        assert!(!form.is_actionable());
    }

    #[test]
    fn test_cancel_trip_refetches() {
        let mut form = trip_actions(&trip(json!({"id": 5, "status": "active"})));
        form.select(ActionKind::Cancel).unwrap();
        let submission = form.submit().unwrap();
        assert_eq!(submission.mutation.method, Method::Put);
        assert_eq!(submission.mutation.path, "/travel/admin/trips/5/cancel");
        assert_eq!(submission.after, AfterMutation::Refetch);
    }

    #[rstest]
    #[case("confirmed", true)]
    #[case("pending", true)]
    #[case("cancelled", false)]
    #[case("completed", false)]
    fn test_match_cancellable(#[case] status: &str, #[case] cancellable: bool) {
        let record: Match = serde_json::from_value(json!({"id": 2, "status": status})).unwrap();
        assert_eq!(match_actions(&record).is_actionable(), cancellable);
    }

    #[test]
    fn test_pending_host_decisions_remove_locally() {
        let host: ModerationRecord =
            serde_json::from_value(json!({"id": 3, "name": "Palm Suites", "status": "pending"})).unwrap();
        let mut form = host_actions(&host);
        assert_eq!(form.available(), vec![ActionKind::Approve, ActionKind::Reject]);

        form.select(ActionKind::Reject).unwrap();
        assert!(form.submit().is_err());
        form.set_reason("Photos missing");
        let submission = form.submit().unwrap();
        assert_eq!(submission.mutation.path, "/host/admin/hosts/reject/3");
        assert_eq!(submission.mutation.body, Some(json!({"rejection_reason": "Photos missing"})));
        assert_eq!(submission.after, AfterMutation::RemoveLocal);

        let approved: ModerationRecord =
            serde_json::from_value(json!({"id": 4, "status": "approved"})).unwrap();
        assert!(!host_actions(&approved).is_actionable());
    }

    #[test]
    fn test_application_reject_patches_status() {
        let app: Application =
            serde_json::from_value(json!({"id": "a1", "name": "Ife", "status": "pending"})).unwrap();
        let mut form = application_actions(&app);
        form.select(ActionKind::Reject).unwrap();
        form.set_reason("Role filled");

        let submission = form.submit().unwrap();
        assert_eq!(submission.mutation.method, Method::Patch);
        assert_eq!(
            submission.mutation.body,
            Some(json!({"status": "rejected", "rejection_reason": "Role filled"}))
        );
        assert_eq!(submission.after, AfterMutation::PatchStatus(ApplicationStatus::Rejected));
    }

    #[test]
    fn test_status_changes() {
        let id = RecordId::from(6_u64);
        let job = job_status_change(&id, JobStatus::Active);
        assert_eq!(job.mutation.path, "/carrer/admin/jobs/6/status");
        assert_eq!(job.after, AfterMutation::PatchStatus(JobStatus::Active));

        let app = application_status_change(&id, ApplicationStatus::Shortlisted, None).unwrap();
        assert_eq!(app.mutation.body, Some(json!({"status": "shortlisted"})));

        let offer = offer_status_change(&id, OfferStatus::Declined);
        assert_eq!(offer.after, AfterMutation::PatchStatus(OfferStatus::Declined));
        assert!(!read_only::<OfferStatus>().is_actionable());
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("   "))]
    fn test_status_rejection_without_reason_is_refused(#[case] reason: Option<&str>) {
        let id = RecordId::from("a9");
        let err = application_status_change(&id, ApplicationStatus::Rejected, reason).unwrap_err();
        assert!(matches!(err, PanelError::InvalidInput { ref field, .. } if field == "reason"));
    }

    #[test]
    fn test_status_rejection_carries_trimmed_reason() {
        let id = RecordId::from("a9");
        let submission =
            application_status_change(&id, ApplicationStatus::Rejected, Some("  No visa ")).unwrap();
        assert_eq!(submission.mutation.path, "/carrer/admin/applications/a9/status");
        assert_eq!(
            submission.mutation.body,
            Some(json!({"status": "rejected", "rejection_reason": "No visa"}))
        );
        assert_eq!(submission.after, AfterMutation::PatchStatus(ApplicationStatus::Rejected));
    }
}
