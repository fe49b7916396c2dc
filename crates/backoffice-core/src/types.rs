//! Identifiers and lifecycle statuses shared by every panel

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

/// Identifier of a backend record
///
/// The backend sends ids as JSON numbers on some endpoints and strings on
/// others; both decode into the same value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct RecordId(String);

impl RecordId {
    /// Create an id from anything string-like
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for RecordId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IdVisitor;

        impl Visitor<'_> for IdVisitor {
            type Value = RecordId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string or integer record id")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<RecordId, E> {
                if v.trim().is_empty() {
                    return Err(E::custom("record id must not be empty"));
                }
                Ok(RecordId(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<RecordId, E> {
                Ok(RecordId(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<RecordId, E> {
                Ok(RecordId(v.to_string()))
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}

/// A closed set of lifecycle states for one kind of record
pub trait Status:
    Copy + Eq + Ord + Hash + fmt::Debug + fmt::Display + FromStr<Err = crate::Error> + Send + Sync + 'static
{
    /// Every member of the set, in display order
    const ALL: &'static [Self];

    /// Wire name of the status
    fn as_str(&self) -> &'static str;
}

/// Declares a status enum with its wire names, `Display`, `FromStr` and serde impls
macro_rules! status_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl Status for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $wire, )+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = crate::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|status| status.as_str().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| {
                        let allowed: Vec<&str> = Self::ALL.iter().map(Status::as_str).collect();
                        crate::Error::validation(
                            "status",
                            format!("unknown {} '{}', expected one of: {}", stringify!($name), wanted, allowed.join(", ")),
                        )
                    })
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(de::Error::custom)
            }
        }
    };
}

status_enum! {
    /// Lifecycle of a travel trip
    TripStatus {
        /// Trip is open for matching
        Active => "active",
        /// Trip happened
        Completed => "completed",
        /// Trip was cancelled by its host or an admin
        Cancelled => "cancelled",
        /// Trip awaits confirmation
        Pending => "pending",
    }
}

status_enum! {
    /// Lifecycle of a match between two trips
    MatchStatus {
        /// Both sides agreed
        Confirmed => "confirmed",
        /// Awaiting the other side
        Pending => "pending",
        /// Cancelled, usually because its trip was cancelled
        Cancelled => "cancelled",
        /// Travel took place
        Completed => "completed",
    }
}

status_enum! {
    /// Moderation state of hosts, events, properties and buy-sell listings
    ModerationStatus {
        /// Awaiting review
        Pending => "pending",
        /// Accepted by a moderator
        Approved => "approved",
        /// Rejected, usually with a reason
        Rejected => "rejected",
        /// Removed from the platform
        Blocked => "blocked",
    }
}

status_enum! {
    /// Lifecycle of a job posting
    JobStatus {
        /// Not visible to candidates yet
        Draft => "draft",
        /// Open for applications
        Active => "active",
        /// No longer accepting applications
        Closed => "closed",
    }
}

status_enum! {
    /// Review state of a job application
    ApplicationStatus {
        /// Submitted, not reviewed
        Pending => "pending",
        /// Looked at by a recruiter
        Reviewed => "reviewed",
        /// Moved to the interview stage
        Shortlisted => "shortlisted",
        /// Accepted
        Approved => "approved",
        /// Turned down
        Rejected => "rejected",
    }
}

status_enum! {
    /// Lifecycle of a job offer
    OfferStatus {
        /// Being prepared
        Draft => "draft",
        /// Sent, awaiting the candidate
        Pending => "pending",
        /// Candidate accepted
        Accepted => "accepted",
        /// Candidate declined
        Declined => "declined",
    }
}
