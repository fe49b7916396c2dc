//! The moderation panels of the back office and how each is wired

use crate::modal::ActionKind;
use crate::panel::{ListSource, Panel};
use backoffice_client::{AdminClient, Decision, HostQueue, ListEndpoint, endpoints};
use backoffice_core::{Application, Job, Match, ModerationRecord, Offer, Trip};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Every panel of the back office
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PanelKind {
    /// Travel trips
    Trips,
    /// Travel matches
    Matches,
    /// Host applications
    Hosts,
    /// Reviewed events
    Events,
    /// Reviewed properties
    Properties,
    /// Blocked buy-sell listings
    BuySell,
    /// Job postings
    Jobs,
    /// Job applications
    Applications,
    /// Job offers
    Offers,
}

/// One status tab of a panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tab {
    /// Label shown on the tab
    pub label: &'static str,
    /// Status the tab selects; `None` shows everything
    pub status: Option<&'static str>,
}

const fn tab(label: &'static str, status: &'static str) -> Tab {
    Tab {
        label,
        status: Some(status),
    }
}

const ALL_TAB: Tab = Tab {
    label: "All",
    status: None,
};

const TRIP_TABS: &[Tab] = &[
    tab("Active Trips", "active"),
    tab("Completed", "completed"),
    tab("Cancelled", "cancelled"),
    tab("Pending", "pending"),
    ALL_TAB,
];

const MATCH_TABS: &[Tab] = &[
    ALL_TAB,
    tab("Confirmed", "confirmed"),
    tab("Pending", "pending"),
    tab("Cancelled", "cancelled"),
    tab("Completed", "completed"),
];

const HOST_TABS: &[Tab] = &[
    tab("Pending", "pending"),
    tab("Approved", "approved"),
    tab("Rejected", "rejected"),
];

const DECISION_TABS: &[Tab] = &[tab("Approved", "approved"), tab("Rejected", "rejected")];

const BLOCKED_TABS: &[Tab] = &[tab("Blocked", "blocked")];

const JOB_TABS: &[Tab] = &[
    ALL_TAB,
    tab("Draft", "draft"),
    tab("Active", "active"),
    tab("Closed", "closed"),
];

const APPLICATION_TABS: &[Tab] = &[
    ALL_TAB,
    tab("Pending", "pending"),
    tab("Reviewed", "reviewed"),
    tab("Shortlisted", "shortlisted"),
    tab("Approved", "approved"),
    tab("Rejected", "rejected"),
];

const OFFER_TABS: &[Tab] = &[
    ALL_TAB,
    tab("Draft", "draft"),
    tab("Pending", "pending"),
    tab("Accepted", "accepted"),
    tab("Declined", "declined"),
];

const MODERATION_SEARCH: &[&str] = &["name", "email", "owner", "location", "category"];

/// Static description of a panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelSpec {
    /// Which panel
    pub kind: PanelKind,
    /// Heading
    pub title: &'static str,
    /// Endpoints the panel lists from; queue panels have one per queue
    #[serde(serialize_with = "endpoint_paths")]
    pub sources: Vec<ListEndpoint>,
    /// Status tabs
    pub tabs: &'static [Tab],
    /// Fields the search box looks at
    pub searchable: &'static [&'static str],
    /// Field records are grouped by, if any
    pub grouped_by: Option<&'static str>,
    /// Actions offered on records
    pub actions: &'static [ActionKind],
    /// Whether new records can be created from this panel
    pub creates: bool,
}

fn endpoint_paths<S: serde::Serializer>(
    sources: &[ListEndpoint],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(sources.iter().map(|source| source.path.as_ref()))
}

impl PanelSpec {
    /// Whether the panel only displays records
    pub const fn is_read_only(&self) -> bool {
        self.actions.is_empty() && !self.creates
    }
}

impl PanelKind {
    /// Every panel, in menu order
    pub const ALL: [Self; 9] = [
        Self::Trips,
        Self::Matches,
        Self::Hosts,
        Self::Events,
        Self::Properties,
        Self::BuySell,
        Self::Jobs,
        Self::Applications,
        Self::Offers,
    ];

    /// Name used on the command line
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trips => "trips",
            Self::Matches => "matches",
            Self::Hosts => "hosts",
            Self::Events => "events",
            Self::Properties => "properties",
            Self::BuySell => "buy-sell",
            Self::Jobs => "jobs",
            Self::Applications => "applications",
            Self::Offers => "offers",
        }
    }

    /// Description of the panel
    pub fn spec(self) -> PanelSpec {
        match self {
            Self::Trips => PanelSpec {
                kind: self,
                title: "Travel Trips",
                sources: vec![endpoints::trips()],
                tabs: TRIP_TABS,
                searchable: &[
                    "from_city",
                    "from_country",
                    "to_city",
                    "to_country",
                    "airline",
                    "flight_number",
                    "host.name",
                    "host.email",
                ],
                grouped_by: None,
                actions: &[ActionKind::Cancel, ActionKind::Block],
                creates: false,
            },
            Self::Matches => PanelSpec {
                kind: self,
                title: "Travel Matches",
                sources: vec![endpoints::matches()],
                tabs: MATCH_TABS,
                searchable: &["id", "trip_id", "requester.name", "requester.email"],
                grouped_by: Some("trip_id"),
                actions: &[ActionKind::Cancel],
                creates: false,
            },
            Self::Hosts => PanelSpec {
                kind: self,
                title: "Host Applications",
                sources: HostQueue::ALL.into_iter().map(endpoints::hosts).collect(),
                tabs: HOST_TABS,
                searchable: MODERATION_SEARCH,
                grouped_by: None,
                actions: &[ActionKind::Approve, ActionKind::Reject],
                creates: false,
            },
            Self::Events => PanelSpec {
                kind: self,
                title: "Events",
                sources: Decision::ALL.into_iter().map(endpoints::events).collect(),
                tabs: DECISION_TABS,
                searchable: MODERATION_SEARCH,
                grouped_by: None,
                actions: &[],
                creates: false,
            },
            Self::Properties => PanelSpec {
                kind: self,
                title: "Properties",
                sources: Decision::ALL.into_iter().map(endpoints::properties).collect(),
                tabs: DECISION_TABS,
                searchable: MODERATION_SEARCH,
                grouped_by: None,
                actions: &[],
                creates: false,
            },
            Self::BuySell => PanelSpec {
                kind: self,
                title: "Blocked Listings",
                sources: vec![endpoints::blocked_listings()],
                tabs: BLOCKED_TABS,
                searchable: MODERATION_SEARCH,
                grouped_by: None,
                actions: &[],
                creates: false,
            },
            Self::Jobs => PanelSpec {
                kind: self,
                title: "Jobs",
                sources: vec![endpoints::jobs()],
                tabs: JOB_TABS,
                searchable: &["title", "department", "location", "employment_type", "skills.primary"],
                grouped_by: Some("department"),
                actions: &[ActionKind::SetStatus],
                creates: true,
            },
            Self::Applications => PanelSpec {
                kind: self,
                title: "Applications",
                sources: vec![endpoints::applications()],
                tabs: APPLICATION_TABS,
                searchable: &["name", "email", "job_title", "experience"],
                grouped_by: Some("job_title"),
                actions: &[ActionKind::Approve, ActionKind::Reject, ActionKind::SetStatus],
                creates: false,
            },
            Self::Offers => PanelSpec {
                kind: self,
                title: "Offers",
                sources: vec![endpoints::offers()],
                tabs: OFFER_TABS,
                searchable: &["candidate_name", "position", "salary"],
                grouped_by: None,
                actions: &[ActionKind::SetStatus],
                creates: true,
            },
        }
    }
}

impl fmt::Display for PanelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PanelKind {
    type Err = crate::error::PanelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| crate::error::PanelError::invalid("panel", format!("unknown panel '{wanted}'")))
    }
}

/// Trips panel
pub fn trips(client: AdminClient) -> Panel<Trip> {
    Panel::new(client, ListSource::new(endpoints::trips()))
}

/// Matches panel
pub fn matches(client: AdminClient) -> Panel<Match> {
    Panel::new(client, ListSource::new(endpoints::matches()))
}

/// Host panel showing one review queue
pub fn hosts(client: AdminClient, queue: HostQueue) -> Panel<ModerationRecord> {
    Panel::new(client, host_source(queue))
}

/// List source of one host queue
pub fn host_source(queue: HostQueue) -> ListSource<backoffice_core::ModerationStatus> {
    ListSource::single_status(endpoints::hosts(queue), queue.status())
}

/// Events panel showing one decision list
pub fn events(client: AdminClient, decision: Decision) -> Panel<ModerationRecord> {
    Panel::new(
        client,
        ListSource::single_status(endpoints::events(decision), decision.status()),
    )
}

/// Properties panel showing one decision list
pub fn properties(client: AdminClient, decision: Decision) -> Panel<ModerationRecord> {
    Panel::new(
        client,
        ListSource::single_status(endpoints::properties(decision), decision.status()),
    )
}

/// Blocked buy-sell listings panel
pub fn blocked_listings(client: AdminClient) -> Panel<ModerationRecord> {
    Panel::new(
        client,
        ListSource::single_status(
            endpoints::blocked_listings(),
            backoffice_core::ModerationStatus::Blocked,
        ),
    )
}

/// Jobs panel
pub fn jobs(client: AdminClient) -> Panel<Job> {
    Panel::new(client, ListSource::new(endpoints::jobs()))
}

/// Applications panel
pub fn applications(client: AdminClient) -> Panel<Application> {
    Panel::new(client, ListSource::new(endpoints::applications()))
}

/// Offers panel
pub fn offers(client: AdminClient) -> Panel<Offer> {
    Panel::new(client, ListSource::new(endpoints::offers()))
}
