//! Multi-step job creation form

use crate::error::{PanelError, PanelResult};
use backoffice_client::{Mutation, endpoints};
use backoffice_core::utils::{lenient, split_list};
use backoffice_core::{JobStatus, Skills, Status};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::borrow::Cow;
use std::fmt;
use validator::{Validate, ValidationError};

/// Form steps, in order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobFormStep {
    /// Title, department, location, employment type, salary
    #[default]
    Basics,
    /// Description, requirements, responsibilities
    Description,
    /// Primary, secondary and nice-to-have skills
    Skills,
    /// Mandatory conditions
    Conditions,
    /// Final check before submitting
    Review,
}

impl JobFormStep {
    /// Every step
    pub const ALL: [Self; 5] = [
        Self::Basics,
        Self::Description,
        Self::Skills,
        Self::Conditions,
        Self::Review,
    ];

    /// Step after this one
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Basics => Some(Self::Description),
            Self::Description => Some(Self::Skills),
            Self::Skills => Some(Self::Conditions),
            Self::Conditions => Some(Self::Review),
            Self::Review => None,
        }
    }

    /// Step before this one
    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::Basics => None,
            Self::Description => Some(Self::Basics),
            Self::Skills => Some(Self::Description),
            Self::Conditions => Some(Self::Skills),
            Self::Review => Some(Self::Conditions),
        }
    }

    /// Draft fields edited on this step; review covers all of them
    pub const fn fields(self) -> &'static [&'static str] {
        match self {
            Self::Basics => &["title", "department", "location", "employment_type", "salary_range"],
            Self::Description => &["description", "requirements", "responsibilities"],
            Self::Skills => &["skills"],
            Self::Conditions => &["mandatory_conditions"],
            Self::Review => &[
                "title",
                "department",
                "location",
                "employment_type",
                "salary_range",
                "description",
                "requirements",
                "responsibilities",
                "skills",
                "mandatory_conditions",
            ],
        }
    }
}

impl fmt::Display for JobFormStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Basics => "basics",
            Self::Description => "description",
            Self::Skills => "skills",
            Self::Conditions => "conditions",
            Self::Review => "review",
        };
        f.write_str(name)
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required").with_message(Cow::Borrowed("is required")));
    }
    Ok(())
}

fn has_primary_skill(skills: &Skills) -> Result<(), ValidationError> {
    if skills.primary.iter().all(|skill| skill.trim().is_empty()) {
        return Err(ValidationError::new("required")
            .with_message(Cow::Borrowed("at least one primary skill is required")));
    }
    Ok(())
}

/// Job posting being written
///
/// List fields accept either arrays or newline/comma separated text, so a
/// draft file can use whichever is easier to type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct JobDraft {
    /// Job title
    #[validate(custom(function = "not_blank"))]
    pub title: String,

    /// Department the job belongs to
    #[validate(custom(function = "not_blank"))]
    pub department: String,

    /// Work location
    pub location: String,

    /// Full-time, contract, ...
    pub employment_type: String,

    /// Advertised salary range
    pub salary_range: String,

    /// Free-form description
    pub description: String,

    /// Requirements
    #[serde(deserialize_with = "lenient::string_list")]
    #[validate(length(min = 1, message = "at least one requirement is required"))]
    pub requirements: Vec<String>,

    /// Responsibilities
    #[serde(deserialize_with = "lenient::string_list")]
    #[validate(length(min = 1, message = "at least one responsibility is required"))]
    pub responsibilities: Vec<String>,

    /// Skill lists
    #[validate(custom(function = "has_primary_skill"))]
    pub skills: Skills,

    /// Conditions every candidate must meet
    #[serde(deserialize_with = "lenient::string_list")]
    pub mandatory_conditions: Vec<String>,

    /// Publish immediately instead of saving as a draft
    pub publish: bool,
}

impl JobDraft {
    /// Parse a TOML draft file
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid draft.
    pub fn from_toml(text: &str) -> PanelResult<Self> {
        toml::from_str(text).map_err(|e| PanelError::invalid("draft", e.to_string()))
    }

    /// Parse a JSON draft file
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid draft.
    pub fn from_json(text: &str) -> PanelResult<Self> {
        serde_json::from_str(text).map_err(|e| PanelError::invalid("draft", e.to_string()))
    }

    /// Replace requirements from free text
    pub fn set_requirements(&mut self, text: &str) {
        self.requirements = split_list(text);
    }

    /// Replace responsibilities from free text
    pub fn set_responsibilities(&mut self, text: &str) {
        self.responsibilities = split_list(text);
    }

    /// Replace primary skills from free text
    pub fn set_primary_skills(&mut self, text: &str) {
        self.skills.primary = split_list(text);
    }

    /// Replace secondary skills from free text
    pub fn set_secondary_skills(&mut self, text: &str) {
        self.skills.secondary = split_list(text);
    }

    /// Replace nice-to-have skills from free text
    pub fn set_nice_to_have(&mut self, text: &str) {
        self.skills.nice_to_have = split_list(text);
    }

    /// Replace mandatory conditions from free text
    pub fn set_mandatory_conditions(&mut self, text: &str) {
        self.mandatory_conditions = split_list(text);
    }

    /// Status the job is created with
    pub const fn initial_status(&self) -> JobStatus {
        if self.publish {
            JobStatus::Active
        } else {
            JobStatus::Draft
        }
    }

    /// Validation problems for the fields of one step, in field order
    pub fn problems(&self, step: JobFormStep) -> Vec<(String, String)> {
        let Err(errors) = self.validate() else {
            return Vec::new();
        };
        let by_field = errors.field_errors();

        let mut problems = Vec::new();
        for field in step.fields() {
            let Some(list) = by_field.get(*field) else {
                continue;
            };
            for error in list.iter() {
                let message = error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string);
                problems.push(((*field).to_string(), message));
            }
        }
        problems
    }

    /// Request body for `POST /carrer/admin/jobs`
    pub fn payload(&self) -> Value {
        json!({
            "title": self.title.trim(),
            "department": self.department.trim(),
            "location": self.location.trim(),
            "employment_type": self.employment_type.trim(),
            "salary_range": self.salary_range.trim(),
            "description": self.description.trim(),
            "requirements": self.requirements,
            "responsibilities": self.responsibilities,
            "skills": {
                "primary": self.skills.primary,
                "secondary": self.skills.secondary,
                "nice_to_have": self.skills.nice_to_have,
            },
            "mandatory_conditions": self.mandatory_conditions,
            "status": self.initial_status().as_str(),
        })
    }
}

/// Wizard state over a [`JobDraft`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobForm {
    /// Draft being edited
    pub draft: JobDraft,
    step: JobFormStep,
}

impl JobForm {
    /// Empty form on the first step
    pub fn new() -> Self {
        Self::default()
    }

    /// Form pre-filled from a draft, on the first step
    pub const fn from_draft(draft: JobDraft) -> Self {
        Self {
            draft,
            step: JobFormStep::Basics,
        }
    }

    /// Current step
    pub const fn step(&self) -> JobFormStep {
        self.step
    }

    fn check(&self, step: JobFormStep) -> PanelResult<()> {
        match self.draft.problems(step).into_iter().next() {
            Some((field, message)) => Err(PanelError::invalid(field, message)),
            None => Ok(()),
        }
    }

    /// Advance one step
    ///
    /// # Errors
    ///
    /// Returns the first validation problem of the current step; the form
    /// stays where it is.
    pub fn next(&mut self) -> PanelResult<JobFormStep> {
        let current = self.step();
        self.check(current)?;
        let target = current.next().unwrap_or(current);
        self.step = target;
        Ok(target)
    }

    /// Go back one step; always allowed
    pub fn back(&mut self) -> JobFormStep {
        let current = self.step();
        let target = current.previous().unwrap_or(current);
        self.step = target;
        target
    }

    /// Validate every step and produce the create request body
    ///
    /// # Errors
    ///
    /// Returns the first validation problem found.
    pub fn build(&self) -> PanelResult<Value> {
        self.check(JobFormStep::Review)?;
        Ok(self.draft.payload())
    }

    /// Validate every step and produce the create request
    ///
    /// # Errors
    ///
    /// Returns the first validation problem found.
    pub fn mutation(&self) -> PanelResult<Mutation> {
        self.build().map(endpoints::create_job)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn complete() -> JobDraft {
        let mut draft = JobDraft {
            title: "Backend Engineer".to_string(),
            department: "Engineering".to_string(),
            location: "Remote".to_string(),
            ..JobDraft::default()
        };
        draft.set_requirements("3+ years Rust\nSQL");
        draft.set_responsibilities("Own the API, review code");
        draft.set_primary_skills("Rust, Tokio");
        draft
    }

    #[test]
    fn test_next_refuses_invalid_basics() {
        let mut form = JobForm::new();
        form.draft.title = "  ".to_string();
        form.draft.department = "Engineering".to_string();

        let err = form.next().unwrap_err();
        assert!(matches!(err, PanelError::InvalidInput { ref field, .. } if field == "title"));
        assert_eq!(form.step(), JobFormStep::Basics);
    }

    #[test]
    fn test_walks_every_step_when_valid() {
        let mut form = JobForm::from_draft(complete());
        let mut visited = vec![form.step()];
        while form.step() != JobFormStep::Review {
            visited.push(form.next().unwrap());
        }
        assert_eq!(visited, JobFormStep::ALL.to_vec());
        assert_eq!(form.next().unwrap(), JobFormStep::Review);
    }

    #[test]
    fn test_skills_step_requires_primary_skill() {
        let mut draft = complete();
        draft.skills.primary.clear();
        draft.set_secondary_skills("Kafka");
        let mut form = JobForm::from_draft(draft);

        form.next().unwrap();
        form.next().unwrap();
        assert_eq!(form.step(), JobFormStep::Skills);
        let err = form.next().unwrap_err();
        assert!(matches!(err, PanelError::InvalidInput { ref field, .. } if field == "skills"));
    }

    #[test]
    fn test_back_always_works() {
        let mut form = JobForm::new();
        assert_eq!(form.back(), JobFormStep::Basics);

        let mut form = JobForm::from_draft(complete());
        form.next().unwrap();
        form.draft.requirements.clear();
        assert!(form.next().is_err());
        assert_eq!(form.back(), JobFormStep::Basics);
    }

    #[test]
    fn test_description_problems_are_listed_in_order() {
        let draft = JobDraft {
            title: "x".to_string(),
            department: "y".to_string(),
            ..JobDraft::default()
        };
        let fields: Vec<String> = draft
            .problems(JobFormStep::Description)
            .into_iter()
            .map(|(field, _)| field)
            .collect();
        assert_eq!(fields, vec!["requirements", "responsibilities"]);
        assert!(draft.problems(JobFormStep::Basics).is_empty());
    }

    #[test]
    fn test_build_defaults_to_draft_status() {
        let form = JobForm::from_draft(complete());
        let payload = form.build().unwrap();
        assert_eq!(payload["status"], "draft");
        assert_eq!(payload["requirements"], json!(["3+ years Rust", "SQL"]));
        assert_eq!(payload["skills"]["primary"], json!(["Rust", "Tokio"]));

        let mut published = complete();
        published.publish = true;
        let mutation = JobForm::from_draft(published).mutation().unwrap();
        assert_eq!(mutation.path, "/carrer/admin/jobs");
        assert_eq!(mutation.body.unwrap()["status"], "active");
    }

    #[test]
    fn test_build_rejects_incomplete_draft() {
        assert!(JobForm::new().build().is_err());
    }

    #[test]
    fn test_draft_from_toml() {
        let draft = JobDraft::from_toml(
            r#"
            title = "Designer"
            department = "Product"
            requirements = "Figma\nPortfolio"
            responsibilities = ["Ship designs"]
            publish = true

            [skills]
            primary = ["Figma"]
            nice_to_have = "Motion, 3D"
            "#,
        )
        .unwrap();
        assert_eq!(draft.requirements, vec!["Figma", "Portfolio"]);
        assert_eq!(draft.skills.nice_to_have, vec!["Motion", "3D"]);
        assert_eq!(draft.initial_status(), JobStatus::Active);
        assert!(JobForm::from_draft(draft).build().is_ok());
    }

    #[test]
    fn test_draft_from_json() {
        let draft = JobDraft::from_json(
            r#"{"title": "Analyst", "department": "Finance", "requirements": ["Excel"],
                "responsibilities": "Reports", "skills": {"primary": "SQL"}}"#,
        )
        .unwrap();
        assert_eq!(draft.skills.primary, vec!["SQL"]);
        assert!(JobDraft::from_json("{not json").is_err());
    }
}
