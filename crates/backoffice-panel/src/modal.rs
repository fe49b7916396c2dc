//! Detail view and action form of a single record

use crate::error::{PanelError, PanelResult};
use backoffice_client::{AfterMutation, Mutation};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Full field listing of one record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailView {
    /// `(label, value)` pairs; `id` first, then by label
    pub fields: Vec<(String, String)>,
}

impl DetailView {
    /// Build the listing from a record's JSON form
    ///
    /// Nested objects become dotted labels, arrays of scalars are joined
    /// with `", "` and null or empty values are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be serialized.
    pub fn from_record<T: Serialize>(record: &T) -> serde_json::Result<Self> {
        let value = serde_json::to_value(record)?;
        let mut fields = Vec::new();
        flatten("", &value, &mut fields);

        fields.sort_by(|a, b| (a.0 != "id", &a.0).cmp(&(b.0 != "id", &b.0)));
        Ok(Self { fields })
    }

    /// Value of one field
    pub fn get(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }
}

fn join_label(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn flatten(prefix: &str, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => flatten_object(prefix, map, out),
        Value::Array(items) if items.iter().all(|item| !item.is_object() && !item.is_array()) => {
            let joined: Vec<String> = items.iter().filter_map(scalar).collect();
            if !joined.is_empty() {
                out.push((prefix.to_string(), joined.join(", ")));
            }
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                flatten(&join_label(prefix, &index.to_string()), item, out);
            }
        }
        other => {
            if let Some(text) = scalar(other) {
                out.push((prefix.to_string(), text));
            }
        }
    }
}

fn flatten_object(prefix: &str, map: &Map<String, Value>, out: &mut Vec<(String, String)>) {
    for (key, value) in map {
        flatten(&join_label(prefix, key), value, out);
    }
}

impl fmt::Display for DetailView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.fields.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
        for (label, value) in &self.fields {
            writeln!(f, "{label:<width$}  {value}")?;
        }
        Ok(())
    }
}

/// Kind of moderation action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    /// Accept the record
    Approve,
    /// Turn the record down, with a reason
    Reject,
    /// Cancel a trip or match
    Cancel,
    /// Block the owning account
    Block,
    /// Move to a chosen status
    SetStatus,
}

impl ActionKind {
    /// Every kind
    pub const ALL: [Self; 5] = [
        Self::Approve,
        Self::Reject,
        Self::Cancel,
        Self::Block,
        Self::SetStatus,
    ];

    /// Lowercase name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Cancel => "cancel",
            Self::Block => "block",
            Self::SetStatus => "set-status",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = PanelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                PanelError::invalid("action", format!("unknown action '{wanted}'"))
            })
    }
}

/// An action offered for one record
#[derive(Debug, Clone, PartialEq)]
pub struct Action<S> {
    /// Kind of action
    pub kind: ActionKind,
    /// Request that carries it out
    pub mutation: Mutation,
    /// What the panel does after the backend confirms
    pub after: AfterMutation<S>,
    /// Body field receiving the operator's reason, for actions that need one
    pub reason_field: Option<&'static str>,
}

impl<S> Action<S> {
    /// Action without a reason
    pub const fn new(kind: ActionKind, mutation: Mutation, after: AfterMutation<S>) -> Self {
        Self {
            kind,
            mutation,
            after,
            reason_field: None,
        }
    }

    /// Require a reason, sent in `field` of the body
    #[must_use]
    pub fn with_reason(mut self, field: &'static str) -> Self {
        self.reason_field = Some(field);
        self
    }
}

/// A validated action, ready to dispatch
#[derive(Debug, Clone, PartialEq)]
pub struct Submission<S> {
    /// Kind of action
    pub kind: ActionKind,
    /// Request to send
    pub mutation: Mutation,
    /// Follow-up once confirmed
    pub after: AfterMutation<S>,
}

/// Action choice for one record
///
/// At most one action is selected at a time; selecting another replaces
/// it. An invalid form never produces a mutation.
#[derive(Debug, Clone)]
pub struct ActionForm<S> {
    actions: Vec<Action<S>>,
    selected: Option<ActionKind>,
    reason: String,
}

impl<S: Copy> ActionForm<S> {
    /// Form offering `actions`
    pub const fn new(actions: Vec<Action<S>>) -> Self {
        Self {
            actions,
            selected: None,
            reason: String::new(),
        }
    }

    /// Whether the record has any action in its current state
    pub fn is_actionable(&self) -> bool {
        !self.actions.is_empty()
    }

    /// Kinds offered, in display order
    pub fn available(&self) -> Vec<ActionKind> {
        self.actions.iter().map(|action| action.kind).collect()
    }

    /// Currently selected action
    pub const fn selected(&self) -> Option<ActionKind> {
        self.selected
    }

    /// Select an action, clearing any previous choice
    ///
    /// # Errors
    ///
    /// Returns an error if the action is not offered for this record.
    pub fn select(&mut self, kind: ActionKind) -> PanelResult<()> {
        if !self.actions.iter().any(|action| action.kind == kind) {
            return Err(PanelError::unavailable(kind.as_str()));
        }
        self.selected = Some(kind);
        Ok(())
    }

    /// Clear the selection
    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Set the operator's reason
    pub fn set_reason(&mut self, reason: impl Into<String>) {
        self.reason = reason.into();
    }

    /// Whether submitting would succeed
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    fn validate(&self) -> PanelResult<&Action<S>> {
        let kind = self
            .selected
            .ok_or_else(|| PanelError::invalid("action", "choose an action"))?;
        let action = self
            .actions
            .iter()
            .find(|action| action.kind == kind)
            .ok_or_else(|| PanelError::unavailable(kind.as_str()))?;
        if action.reason_field.is_some() && self.reason.trim().is_empty() {
            return Err(PanelError::invalid("reason", "a reason is required"));
        }
        Ok(action)
    }

    /// Build the mutation for the selected action
    ///
    /// # Errors
    ///
    /// Returns an error if nothing is selected or a required reason is blank.
    pub fn submit(&self) -> PanelResult<Submission<S>> {
        let action = self.validate()?;
        let mut mutation = action.mutation.clone();

        if let Some(field) = action.reason_field {
            let mut body = match mutation.body.take() {
                Some(Value::Object(map)) => map,
                _ => Map::new(),
            };
            body.insert(field.to_string(), Value::String(self.reason.trim().to_string()));
            mutation.body = Some(Value::Object(body));
        }

        Ok(Submission {
            kind: action.kind,
            mutation,
            after: action.after,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use backoffice_client::endpoints;
    use backoffice_core::{Job, ModerationStatus, RecordId};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn host_form() -> ActionForm<ModerationStatus> {
        let id = RecordId::from(3_u64);
        ActionForm::new(vec![
            Action::new(
                ActionKind::Approve,
                endpoints::approve_host(&id),
                AfterMutation::RemoveLocal,
            ),
            Action::new(
                ActionKind::Reject,
                endpoints::reject_host_request(&id),
                AfterMutation::RemoveLocal,
            )
            .with_reason("rejection_reason"),
        ])
    }

    #[test]
    fn test_detail_view_flattens_nested_fields() {
        let job: Job = serde_json::from_value(json!({
            "id": 4,
            "title": "Designer",
            "skills": {"primary": ["Figma", "UX"]},
            "requirements": ["Portfolio"],
            "salary_range": null,
            "meta": {"views": 12}
        }))
        .unwrap();

        let view = DetailView::from_record(&job).unwrap();
        assert_eq!(view.fields[0], ("id".to_string(), "4".to_string()));
        assert_eq!(view.get("skills.primary"), Some("Figma, UX"));
        assert_eq!(view.get("requirements"), Some("Portfolio"));
        assert_eq!(view.get("meta.views"), Some("12"));
        assert_eq!(view.get("salary_range"), None);
        assert!(view.to_string().contains("Designer"));
    }

    #[test]
    fn test_arrays_of_objects_get_indexed_labels() {
        let view = DetailView::from_record(&json!({
            "id": 1,
            "documents": [{"name": "passport"}, {"name": "utility bill"}]
        }))
        .unwrap();
        assert_eq!(view.get("documents.1.name"), Some("utility bill"));
    }

    #[test]
    fn test_selection_is_mutually_exclusive() {
        let mut form = host_form();
        form.select(ActionKind::Approve).unwrap();
        form.select(ActionKind::Reject).unwrap();
        assert_eq!(form.selected(), Some(ActionKind::Reject));

        assert!(matches!(
            form.select(ActionKind::Block),
            Err(PanelError::ActionUnavailable { .. })
        ));
        assert_eq!(form.selected(), Some(ActionKind::Reject));
    }

    #[test]
    fn test_reject_requires_reason() {
        let mut form = host_form();
        form.select(ActionKind::Reject).unwrap();
        form.set_reason("   ");
        assert!(!form.is_valid());
        assert!(matches!(form.submit(), Err(PanelError::InvalidInput { .. })));

        form.set_reason(" Incomplete documents ");
        let submission = form.submit().unwrap();
        assert_eq!(
            submission.mutation.body,
            Some(json!({"rejection_reason": "Incomplete documents"}))
        );
        assert_eq!(submission.after, AfterMutation::RemoveLocal);
    }

    #[test]
    fn test_reason_merges_into_existing_body() {
        let form = {
            let mut form = ActionForm::new(vec![
                Action::new(
                    ActionKind::Reject,
                    Mutation::patch("/carrer/admin/applications/1/status", json!({"status": "rejected"})),
                    AfterMutation::PatchStatus(()),
                )
                .with_reason("rejection_reason"),
            ]);
            form.select(ActionKind::Reject).unwrap();
            form.set_reason("Position filled");
            form
        };
        assert_eq!(
            form.submit().unwrap().mutation.body,
            Some(json!({"status": "rejected", "rejection_reason": "Position filled"}))
        );
    }

    #[test]
    fn test_nothing_selected() {
        let form = host_form();
        assert!(form.is_actionable());
        assert!(form.submit().is_err());
        assert!(!ActionForm::<ModerationStatus>::new(Vec::new()).is_actionable());
    }

    #[test]
    fn test_action_kind_parsing() {
        assert_eq!("Approve".parse::<ActionKind>().unwrap(), ActionKind::Approve);
        assert!("delete".parse::<ActionKind>().is_err());
    }
}
