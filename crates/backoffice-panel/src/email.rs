//! Template-driven notification emails for applicants

use crate::error::{PanelError, PanelResult};
use backoffice_client::{Mutation, endpoints};
use backoffice_core::{Application, RecordId};
use regex::{Captures, Regex};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use validator::ValidateEmail;

#[allow(clippy::expect_used)]
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").expect("placeholder pattern is valid")
});

/// Built-in message templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailTemplate {
    /// Interview invitation
    Interview,
    /// Rejection notice
    Rejection,
    /// Offer announcement
    Offer,
    /// Free-form message written by the operator
    Custom,
}

impl EmailTemplate {
    /// Every template
    pub const ALL: [Self; 4] = [Self::Interview, Self::Rejection, Self::Offer, Self::Custom];

    /// Wire name sent with the notification
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Interview => "interview",
            Self::Rejection => "rejection",
            Self::Offer => "offer",
            Self::Custom => "custom",
        }
    }

    /// Default subject line
    pub const fn subject(self) -> &'static str {
        match self {
            Self::Interview => "Interview invitation for {{job_title}}",
            Self::Rejection => "Your application for {{job_title}}",
            Self::Offer => "Your offer from {{company}}",
            Self::Custom => "",
        }
    }

    /// Default message body
    pub const fn body(self) -> &'static str {
        match self {
            Self::Interview => {
                "Dear {{name}},\n\n\
                 Thank you for applying for the {{job_title}} position at {{company}}. \
                 We would like to invite you to an interview on {{date}}.\n\n\
                 Best regards,\n{{company}}"
            }
            Self::Rejection => {
                "Dear {{name}},\n\n\
                 Thank you for your interest in the {{job_title}} position at {{company}}. \
                 After careful consideration we have decided not to move forward with \
                 your application.\n\n\
                 Best regards,\n{{company}}"
            }
            Self::Offer => {
                "Dear {{name}},\n\n\
                 We are delighted to offer you the {{job_title}} position at {{company}}. \
                 Your proposed start date is {{date}}.\n\n\
                 Best regards,\n{{company}}"
            }
            Self::Custom => "",
        }
    }
}

impl fmt::Display for EmailTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmailTemplate {
    type Err = PanelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|template| template.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                PanelError::invalid(
                    "template",
                    format!("unknown template '{wanted}', expected interview, rejection, offer or custom"),
                )
            })
    }
}

/// Values substituted into a template
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateValues {
    /// `{{name}}`
    pub name: String,
    /// `{{job_title}}`
    pub job_title: String,
    /// `{{company}}`
    pub company: String,
    /// `{{date}}`
    pub date: String,
}

impl TemplateValues {
    /// Values taken from an application
    pub fn for_application(application: &Application, company: &str, date: &str) -> Self {
        Self {
            name: application.name.clone().unwrap_or_default(),
            job_title: application.job_title.clone().unwrap_or_default(),
            company: company.to_string(),
            date: date.to_string(),
        }
    }

    fn lookup(&self, key: &str) -> Option<&str> {
        match key {
            "name" => Some(&self.name),
            "job_title" => Some(&self.job_title),
            "company" => Some(&self.company),
            "date" => Some(&self.date),
            _ => None,
        }
    }
}

/// Text with its placeholders filled in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// Resulting text
    pub text: String,
    /// Placeholders left in place because no value exists for them
    pub unknown: BTreeSet<String>,
}

/// Substitute known placeholders; unknown ones are kept verbatim and reported
pub fn render(template: &str, values: &TemplateValues) -> Rendered {
    let mut unknown = BTreeSet::new();
    let text = PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| {
            let key = &caps[1];
            values.lookup(key).map_or_else(
                || {
                    unknown.insert(key.to_string());
                    caps[0].to_string()
                },
                ToString::to_string,
            )
        })
        .into_owned();

    Rendered { text, unknown }
}

/// A notification ready to send
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComposedEmail {
    /// Recipient address
    pub to: String,
    /// Subject line
    pub subject: String,
    /// Message body
    pub message: String,
    /// Template the message was built from
    pub template: EmailTemplate,
    /// Placeholders that could not be filled
    pub unknown_placeholders: Vec<String>,
}

impl ComposedEmail {
    /// `POST /carrer/applications/:id/notify` for this message
    pub fn mutation(&self, application: &RecordId) -> Mutation {
        endpoints::notify_application(
            application,
            &self.subject,
            &self.message,
            self.template.as_str(),
        )
    }
}

/// Email being edited by the operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailDraft {
    /// Recipient address
    pub to: String,
    /// Template in use
    pub template: EmailTemplate,
    /// Subject, possibly with placeholders
    pub subject: String,
    /// Body, possibly with placeholders
    pub body: String,
}

impl EmailDraft {
    /// Draft for an application, pre-filled from a template
    pub fn for_application(application: &Application, template: EmailTemplate) -> Self {
        Self {
            to: application.email.clone().unwrap_or_default(),
            template,
            subject: template.subject().to_string(),
            body: template.body().to_string(),
        }
    }

    /// Fill placeholders and validate
    ///
    /// # Errors
    ///
    /// Returns an error if the recipient is missing or malformed, or the
    /// subject or message is empty after rendering.
    pub fn compose(&self, values: &TemplateValues) -> PanelResult<ComposedEmail> {
        let to = self.to.trim();
        if to.is_empty() {
            return Err(PanelError::invalid("to", "recipient email is required"));
        }
        if !to.validate_email() {
            return Err(PanelError::invalid("to", format!("'{to}' is not a valid email address")));
        }

        let subject = render(&self.subject, values);
        if subject.text.trim().is_empty() {
            return Err(PanelError::invalid("subject", "subject is required"));
        }
        let message = render(&self.body, values);
        if message.text.trim().is_empty() {
            return Err(PanelError::invalid("message", "message is required"));
        }

        let unknown_placeholders = subject
            .unknown
            .union(&message.unknown)
            .cloned()
            .collect();

        Ok(ComposedEmail {
            to: to.to_string(),
            subject: subject.text.trim().to_string(),
            message: message.text,
            template: self.template,
            unknown_placeholders,
        })
    }
}
