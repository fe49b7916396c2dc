//! Records consumed by the moderation panels
//!
//! Every record keeps the fields the panels read as typed members and
//! carries the rest of the backend payload in `extra`, so the detail view
//! can still show the full field set.

use crate::types::{
    ApplicationStatus, JobStatus, MatchStatus, ModerationStatus, OfferStatus, RecordId, Status,
    TripStatus,
};
use crate::utils::lenient;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;

/// Behaviour every panel record shares
pub trait Record: Clone + Serialize + serde::de::DeserializeOwned + Send + Sync + 'static {
    /// Closed status set of this record type
    type Status: Status;

    /// Backend identifier
    fn id(&self) -> &RecordId;

    /// Current lifecycle status, if the backend sent one
    fn status(&self) -> Option<Self::Status>;

    /// Replace the status after a confirmed mutation, or fill in the status
    /// implied by the endpoint the record was listed from
    fn set_status(&mut self, status: Self::Status);

    /// Fields matched by free-text search
    fn search_fields(&self) -> Vec<&str>;

    /// Id of the account owning this record, when actions target the owner
    fn owner_id(&self) -> Option<&RecordId> {
        None
    }

    /// Key used by grouped panels
    fn group_key(&self) -> Option<Cow<'_, str>> {
        None
    }
}

fn push_opt<'a>(fields: &mut Vec<&'a str>, value: Option<&'a String>) {
    if let Some(value) = value {
        fields.push(value.as_str());
    }
}

/// Short description of the person behind a trip or match
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonSummary {
    /// Account id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,

    /// Display name
    #[serde(default, alias = "full_name", deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,

    /// Contact email
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub email: Option<String>,

    /// Account moderation state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ModerationStatus>,
}

/// A travel trip offered by a host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trip {
    /// Trip id
    pub id: RecordId,

    /// Departure city
    #[serde(default, alias = "fromCity", deserialize_with = "lenient::opt_string")]
    pub from_city: Option<String>,

    /// Departure country
    #[serde(default, alias = "fromCountry", deserialize_with = "lenient::opt_string")]
    pub from_country: Option<String>,

    /// Arrival city
    #[serde(default, alias = "toCity", deserialize_with = "lenient::opt_string")]
    pub to_city: Option<String>,

    /// Arrival country
    #[serde(default, alias = "toCountry", deserialize_with = "lenient::opt_string")]
    pub to_country: Option<String>,

    /// Airline name
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub airline: Option<String>,

    /// Flight number
    #[serde(default, alias = "flightNumber", deserialize_with = "lenient::opt_string")]
    pub flight_number: Option<String>,

    /// Travel date
    #[serde(default, alias = "travelDate", deserialize_with = "lenient::opt_string")]
    pub travel_date: Option<String>,

    /// Departure time
    #[serde(default, alias = "travelTime", deserialize_with = "lenient::opt_string")]
    pub travel_time: Option<String>,

    /// Lifecycle status
    #[serde(default)]
    pub status: Option<TripStatus>,

    /// Host offering the trip
    #[serde(default)]
    pub host: Option<PersonSummary>,

    /// Remaining backend fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Trip {
    /// Human readable route, e.g. `Lagos, NG -> London, UK`
    #[must_use]
    pub fn route(&self) -> String {
        let place = |city: Option<&String>, country: Option<&String>| match (city, country) {
            (Some(city), Some(country)) => format!("{city}, {country}"),
            (Some(only), None) | (None, Some(only)) => only.clone(),
            (None, None) => "?".to_string(),
        };
        format!(
            "{} -> {}",
            place(self.from_city.as_ref(), self.from_country.as_ref()),
            place(self.to_city.as_ref(), self.to_country.as_ref())
        )
    }
}

impl Record for Trip {
    type Status = TripStatus;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn status(&self) -> Option<TripStatus> {
        self.status
    }

    fn set_status(&mut self, status: TripStatus) {
        self.status = Some(status);
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = Vec::with_capacity(8);
        push_opt(&mut fields, self.from_city.as_ref());
        push_opt(&mut fields, self.from_country.as_ref());
        push_opt(&mut fields, self.to_city.as_ref());
        push_opt(&mut fields, self.to_country.as_ref());
        push_opt(&mut fields, self.airline.as_ref());
        push_opt(&mut fields, self.flight_number.as_ref());
        if let Some(host) = &self.host {
            push_opt(&mut fields, host.name.as_ref());
            push_opt(&mut fields, host.email.as_ref());
        }
        fields
    }

    fn owner_id(&self) -> Option<&RecordId> {
        self.host.as_ref().and_then(|host| host.id.as_ref())
    }
}

/// A match linking a traveller to a trip
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    /// Match id
    pub id: RecordId,

    /// Trip this match is displayed under
    #[serde(default, alias = "tripId")]
    pub trip_id: Option<RecordId>,

    /// Person who asked to join the trip
    #[serde(default, alias = "traveler")]
    pub requester: Option<PersonSummary>,

    /// Lifecycle status
    #[serde(default)]
    pub status: Option<MatchStatus>,

    /// Remaining backend fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Match {
    /// Trip id, taken from `trip_id` or from an embedded `trip` object
    #[must_use]
    pub fn trip_ref(&self) -> Option<RecordId> {
        if let Some(id) = &self.trip_id {
            return Some(id.clone());
        }
        self.extra
            .get("trip")
            .and_then(|trip| trip.get("id"))
            .and_then(lenient::scalar_to_string)
            .map(RecordId::from)
    }
}

impl Record for Match {
    type Status = MatchStatus;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn status(&self) -> Option<MatchStatus> {
        self.status
    }

    fn set_status(&mut self, status: MatchStatus) {
        self.status = Some(status);
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = Vec::with_capacity(4);
        fields.push(self.id.as_str());
        let trip = self.trip_id.as_ref().map(RecordId::as_str).or_else(|| {
            self.extra
                .get("trip")
                .and_then(|trip| trip.get("id"))
                .and_then(Value::as_str)
        });
        if let Some(trip) = trip {
            fields.push(trip);
        }
        if let Some(requester) = &self.requester {
            push_opt(&mut fields, requester.name.as_ref());
            push_opt(&mut fields, requester.email.as_ref());
        }
        fields
    }

    fn group_key(&self) -> Option<Cow<'_, str>> {
        if let Some(trip) = &self.trip_id {
            return Some(Cow::Borrowed(trip.as_str()));
        }
        self.trip_ref().map(|trip| Cow::Owned(trip.to_string()))
    }

    fn owner_id(&self) -> Option<&RecordId> {
        self.requester.as_ref().and_then(|person| person.id.as_ref())
    }
}

/// Matches shown under one trip, in input order
#[must_use]
pub fn matches_for_trip<'a>(matches: &'a [Match], trip_id: &RecordId) -> Vec<&'a Match> {
    matches
        .iter()
        .filter(|m| m.trip_ref().as_ref() == Some(trip_id))
        .collect()
}

/// A moderation-queue record: accommodation host, event, property or buy-sell listing
///
/// The four domains name the same concepts differently (`title` on events,
/// `address` on properties, `seller_name` on listings); decoding picks the
/// first field present for each concept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct ModerationRecord {
    /// Record id
    pub id: RecordId,

    /// Name or title
    pub name: Option<String>,

    /// Contact email
    pub email: Option<String>,

    /// Owner, organiser or seller
    pub owner: Option<String>,

    /// City, address or venue
    pub location: Option<String>,

    /// Category or listing type
    pub category: Option<String>,

    /// Moderation status
    pub status: Option<ModerationStatus>,

    /// Reason given when rejected or blocked
    pub rejection_reason: Option<String>,

    /// Remaining backend fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TryFrom<Value> for ModerationRecord {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let Value::Object(mut map) = value else {
            return Err("moderation record must be a JSON object".to_string());
        };

        let id = take_first(&mut map, &["id", "_id"])
            .map(RecordId::from)
            .ok_or_else(|| "moderation record is missing an id".to_string())?;
        let name = take_first(
            &mut map,
            &["name", "title", "business_name", "property_name", "full_name"],
        );
        let email = take_first(&mut map, &["email", "contact_email"]);
        let owner = take_first(
            &mut map,
            &["owner", "owner_name", "organizer", "host_name", "seller_name"],
        );
        let location = take_first(&mut map, &["location", "city", "address", "venue"]);
        let category = take_first(&mut map, &["category", "type", "listing_type"]);
        let status = match take_first(&mut map, &["status"]) {
            Some(raw) => Some(raw.parse::<ModerationStatus>().map_err(|e| e.to_string())?),
            None => None,
        };
        let rejection_reason = take_first(&mut map, &["rejection_reason", "reason", "block_reason"]);

        Ok(Self {
            id,
            name,
            email,
            owner,
            location,
            category,
            status,
            rejection_reason,
            extra: map,
        })
    }
}

impl Record for ModerationRecord {
    type Status = ModerationStatus;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn status(&self) -> Option<ModerationStatus> {
        self.status
    }

    fn set_status(&mut self, status: ModerationStatus) {
        self.status = Some(status);
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = Vec::with_capacity(5);
        push_opt(&mut fields, self.name.as_ref());
        push_opt(&mut fields, self.email.as_ref());
        push_opt(&mut fields, self.owner.as_ref());
        push_opt(&mut fields, self.location.as_ref());
        push_opt(&mut fields, self.category.as_ref());
        fields
    }
}

/// Skill lists of a job posting
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skills {
    /// Must-have skills
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub primary: Vec<String>,

    /// Useful skills
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub secondary: Vec<String>,

    /// Bonus skills
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub nice_to_have: Vec<String>,
}

/// A job posting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// Job id
    pub id: RecordId,

    /// Job title
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub title: Option<String>,

    /// Department the job belongs to
    #[serde(default, alias = "team", deserialize_with = "lenient::opt_string")]
    pub department: Option<String>,

    /// Work location
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub location: Option<String>,

    /// Full-time, contract, ...
    #[serde(default, alias = "job_type", deserialize_with = "lenient::opt_string")]
    pub employment_type: Option<String>,

    /// Free-form description
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub description: Option<String>,

    /// Advertised salary range
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub salary_range: Option<String>,

    /// Requirements
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub requirements: Vec<String>,

    /// Responsibilities
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub responsibilities: Vec<String>,

    /// Skill lists
    #[serde(default)]
    pub skills: Skills,

    /// Conditions every candidate must meet
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub mandatory_conditions: Vec<String>,

    /// Lifecycle status
    #[serde(default)]
    pub status: Option<JobStatus>,

    /// Remaining backend fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record for Job {
    type Status = JobStatus;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn status(&self) -> Option<JobStatus> {
        self.status
    }

    fn set_status(&mut self, status: JobStatus) {
        self.status = Some(status);
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = Vec::with_capacity(4 + self.skills.primary.len());
        push_opt(&mut fields, self.title.as_ref());
        push_opt(&mut fields, self.department.as_ref());
        push_opt(&mut fields, self.location.as_ref());
        push_opt(&mut fields, self.employment_type.as_ref());
        fields.extend(self.skills.primary.iter().map(String::as_str));
        fields
    }

    fn group_key(&self) -> Option<Cow<'_, str>> {
        self.department.as_deref().map(Cow::Borrowed)
    }
}

/// A candidate's application, normalized from the free-form backend payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct Application {
    /// Application id
    pub id: RecordId,

    /// Candidate name
    pub name: Option<String>,

    /// Candidate email
    pub email: Option<String>,

    /// Title of the job applied for
    pub job_title: Option<String>,

    /// Id of the job applied for
    pub job_id: Option<RecordId>,

    /// Experience as entered by the candidate
    pub experience: Option<String>,

    /// Resume link
    pub resume: Option<String>,

    /// When the application was submitted
    pub applied: Option<String>,

    /// Review status
    pub status: Option<ApplicationStatus>,

    /// Reason recorded when the application was rejected
    pub rejection_reason: Option<String>,

    /// Remaining backend fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Take the first non-empty scalar found under any of `keys`, removing it from the map
fn take_first(map: &mut Map<String, Value>, keys: &[&str]) -> Option<String> {
    let mut found = None;
    for key in keys {
        if let Some(value) = map.remove(*key)
            && found.is_none()
        {
            found = lenient::scalar_to_string(&value);
        }
    }
    found
}

impl TryFrom<Value> for Application {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let Value::Object(mut map) = value else {
            return Err("application must be a JSON object".to_string());
        };

        let id = take_first(&mut map, &["id", "_id", "application_id"])
            .map(RecordId::from)
            .ok_or_else(|| "application is missing an id".to_string())?;

        let mut name = take_first(&mut map, &["name", "full_name", "applicant_name", "candidate_name"]);
        let first = take_first(&mut map, &["first_name", "firstName"]);
        let last = take_first(&mut map, &["last_name", "lastName"]);
        if name.is_none() {
            name = match (first, last) {
                (Some(first), Some(last)) => Some(format!("{first} {last}")),
                (Some(only), None) | (None, Some(only)) => Some(only),
                (None, None) => None,
            };
        }

        let email = take_first(&mut map, &["email", "applicant_email", "candidate_email"]);

        let job = map.get("job").cloned();
        let mut job_title = take_first(&mut map, &["job_title", "jobTitle", "position", "role"]);
        let mut job_id = take_first(&mut map, &["job_id", "jobId"]).map(RecordId::from);
        if let Some(job) = &job {
            if job_title.is_none() {
                job_title = job.get("title").and_then(lenient::scalar_to_string);
            }
            if job_id.is_none() {
                job_id = job
                    .get("id")
                    .and_then(lenient::scalar_to_string)
                    .map(RecordId::from);
            }
            if let Some(scalar) = lenient::scalar_to_string(job)
                && job_id.is_none()
            {
                job_id = Some(RecordId::from(scalar));
            }
        }

        let experience = take_first(
            &mut map,
            &["experience", "years_of_experience", "experience_years", "yearsOfExperience"],
        );
        let resume = take_first(&mut map, &["resume", "resume_url", "resumeUrl", "cv", "cv_url"]);
        let applied = take_first(
            &mut map,
            &["applied", "applied_at", "appliedAt", "created_at", "createdAt", "submitted_at"],
        );

        let status = match take_first(&mut map, &["status", "application_status"]) {
            Some(raw) => Some(raw.parse::<ApplicationStatus>().map_err(|e| e.to_string())?),
            None => None,
        };
        let rejection_reason = take_first(&mut map, &["rejection_reason", "reason"]);

        Ok(Self {
            id,
            name,
            email,
            job_title,
            job_id,
            experience,
            resume,
            applied,
            status,
            rejection_reason,
            extra: map,
        })
    }
}

impl Record for Application {
    type Status = ApplicationStatus;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn status(&self) -> Option<ApplicationStatus> {
        self.status
    }

    fn set_status(&mut self, status: ApplicationStatus) {
        self.status = Some(status);
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = Vec::with_capacity(4);
        push_opt(&mut fields, self.name.as_ref());
        push_opt(&mut fields, self.email.as_ref());
        push_opt(&mut fields, self.job_title.as_ref());
        push_opt(&mut fields, self.experience.as_ref());
        fields
    }

    fn group_key(&self) -> Option<Cow<'_, str>> {
        self.job_title.as_deref().map(Cow::Borrowed)
    }
}

/// A compensation proposal sent to a candidate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Offer {
    /// Offer id
    pub id: RecordId,

    /// Application the offer answers
    #[serde(default, alias = "applicationId")]
    pub application_id: Option<RecordId>,

    /// Job the offer is for
    #[serde(default, alias = "jobId")]
    pub job_id: Option<RecordId>,

    /// Candidate name
    #[serde(default, alias = "name", deserialize_with = "lenient::opt_string")]
    pub candidate_name: Option<String>,

    /// Position offered
    #[serde(default, alias = "job_title", deserialize_with = "lenient::opt_string")]
    pub position: Option<String>,

    /// Salary amount as sent by the backend
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub salary: Option<String>,

    /// Salary currency
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub currency: Option<String>,

    /// Proposed start date
    #[serde(default, alias = "startDate", deserialize_with = "lenient::opt_string")]
    pub start_date: Option<String>,

    /// Benefits included in the offer
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub benefits: Vec<String>,

    /// Lifecycle status
    #[serde(default)]
    pub status: Option<OfferStatus>,

    /// Remaining backend fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record for Offer {
    type Status = OfferStatus;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn status(&self) -> Option<OfferStatus> {
        self.status
    }

    fn set_status(&mut self, status: OfferStatus) {
        self.status = Some(status);
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = Vec::with_capacity(3);
        push_opt(&mut fields, self.candidate_name.as_ref());
        push_opt(&mut fields, self.position.as_ref());
        push_opt(&mut fields, self.salary.as_ref());
        fields
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_trip_decodes_with_embedded_host() {
        let trip: Trip = serde_json::from_value(json!({
            "id": 1,
            "from_city": "Lagos",
            "from_country": "NG",
            "to_city": "London",
            "status": "active",
            "host": {"id": 9, "name": "Ada", "email": "ada@example.com"},
            "seats": 2
        }))
        .unwrap();

        assert_eq!(trip.id.as_str(), "1");
        assert_eq!(trip.status, Some(TripStatus::Active));
        assert_eq!(trip.route(), "Lagos, NG -> London");
        assert_eq!(trip.owner_id().map(RecordId::as_str), Some("9"));
        assert_eq!(trip.extra.get("seats"), Some(&json!(2)));
        assert!(trip.search_fields().contains(&"ada@example.com"));
    }

    #[test]
    fn test_match_trip_ref_from_embedded_trip() {
        let direct: Match = serde_json::from_value(json!({"id": 1, "trip_id": 5})).unwrap();
        let nested: Match =
            serde_json::from_value(json!({"id": 2, "trip": {"id": "5"}, "status": "pending"})).unwrap();
        let other: Match = serde_json::from_value(json!({"id": 3, "tripId": 6})).unwrap();

        let matches = vec![direct, nested, other];
        let under_five = matches_for_trip(&matches, &RecordId::from("5"));
        let ids: Vec<&str> = under_five.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_match_group_key_is_its_trip() {
        let matches: Vec<Match> = serde_json::from_value(json!([
            {"id": 1, "trip_id": "t1"},
            {"id": 2, "trip": {"id": 7}},
            {"id": 3}
        ]))
        .unwrap();

        let keys: Vec<Option<String>> = matches
            .iter()
            .map(|m| m.group_key().map(Cow::into_owned))
            .collect();
        assert_eq!(keys, vec![Some("t1".to_string()), Some("7".to_string()), None]);
    }

    #[test]
    fn test_match_search_includes_trip() {
        let found: Match = serde_json::from_value(json!({"id": 1, "trip_id": "trip-42"})).unwrap();
        assert!(found.search_fields().contains(&"trip-42"));
    }

    #[test]
    fn test_moderation_record_aliases() {
        let event: ModerationRecord = serde_json::from_value(json!({
            "id": "ev-1",
            "title": "Jazz Night",
            "venue": "Eko Hotel",
            "organizer": "Blue Note",
            "status": "rejected",
            "reason": "Duplicate listing"
        }))
        .unwrap();

        assert_eq!(event.name.as_deref(), Some("Jazz Night"));
        assert_eq!(event.location.as_deref(), Some("Eko Hotel"));
        assert_eq!(event.owner.as_deref(), Some("Blue Note"));
        assert_eq!(event.status, Some(ModerationStatus::Rejected));
        assert_eq!(event.rejection_reason.as_deref(), Some("Duplicate listing"));
    }

    #[test]
    fn test_job_nested_lists() {
        let job: Job = serde_json::from_value(json!({
            "id": 3,
            "title": "Backend Engineer",
            "department": "Engineering",
            "requirements": ["3+ years", "Rust"],
            "responsibilities": "Own services\nReview code",
            "skills": {"primary": ["Rust"], "nice_to_have": ["Kubernetes"]},
            "mandatory_conditions": null,
            "status": "active"
        }))
        .unwrap();

        assert_eq!(job.requirements.len(), 2);
        assert_eq!(job.responsibilities, vec!["Own services", "Review code"]);
        assert_eq!(job.skills.primary, vec!["Rust"]);
        assert!(job.skills.secondary.is_empty());
        assert!(job.mandatory_conditions.is_empty());
        assert_eq!(job.group_key().as_deref(), Some("Engineering"));
    }

    #[test]
    fn test_application_normalization_from_alternate_fields() {
        let app: Application = serde_json::from_value(json!({
            "_id": "a1",
            "first_name": "Chidi",
            "last_name": "Okeke",
            "applicant_email": "chidi@example.com",
            "job": {"id": 12, "title": "Designer"},
            "years_of_experience": 4,
            "resume_url": "https://cdn.example.com/cv.pdf",
            "created_at": "2024-05-01T09:00:00Z",
            "status": "Pending",
            "cover_letter": "Hello"
        }))
        .unwrap();

        assert_eq!(app.id.as_str(), "a1");
        assert_eq!(app.name.as_deref(), Some("Chidi Okeke"));
        assert_eq!(app.email.as_deref(), Some("chidi@example.com"));
        assert_eq!(app.job_title.as_deref(), Some("Designer"));
        assert_eq!(app.job_id.as_ref().map(RecordId::as_str), Some("12"));
        assert_eq!(app.experience.as_deref(), Some("4"));
        assert_eq!(app.resume.as_deref(), Some("https://cdn.example.com/cv.pdf"));
        assert_eq!(app.applied.as_deref(), Some("2024-05-01T09:00:00Z"));
        assert_eq!(app.status, Some(ApplicationStatus::Pending));
        assert_eq!(app.extra.get("cover_letter"), Some(&json!("Hello")));
        assert!(!app.extra.contains_key("first_name"));
    }

    #[test]
    fn test_application_prefers_direct_fields() {
        let app: Application = serde_json::from_value(json!({
            "id": 5,
            "name": "Amaka",
            "full_name": "Amaka N.",
            "job_title": "Analyst",
            "job": 44
        }))
        .unwrap();

        assert_eq!(app.name.as_deref(), Some("Amaka"));
        assert_eq!(app.job_title.as_deref(), Some("Analyst"));
        assert_eq!(app.job_id.as_ref().map(RecordId::as_str), Some("44"));
        assert!(!app.extra.contains_key("full_name"));
    }

    #[test]
    fn test_application_rejects_missing_id_and_unknown_status() {
        assert!(serde_json::from_value::<Application>(json!({"name": "x"})).is_err());
        assert!(serde_json::from_value::<Application>(json!({"id": 1, "status": "ghosted"})).is_err());
        assert!(serde_json::from_value::<Application>(json!([1, 2])).is_err());
    }

    #[test]
    fn test_offer_lenient_salary_and_benefits() {
        let offer: Offer = serde_json::from_value(json!({
            "id": 8,
            "application_id": "a1",
            "name": "Chidi Okeke",
            "salary": 95000,
            "currency": "USD",
            "benefits": ["Health", "Equity"],
            "status": "pending"
        }))
        .unwrap();

        assert_eq!(offer.candidate_name.as_deref(), Some("Chidi Okeke"));
        assert_eq!(offer.salary.as_deref(), Some("95000"));
        assert_eq!(offer.benefits.len(), 2);
        assert_eq!(offer.status, Some(OfferStatus::Pending));
    }
}
