//! Response envelopes and the list-fetch boundary
//!
//! List endpoints wrap their records differently: some return a bare
//! array, others `{"data": [...]}`, `{"results": [...]}` or a domain key
//! such as `{"applications": [...]}`. Every endpoint declares the shapes
//! it accepts and is decoded against exactly those.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Wrapper shape around a list (or single record) response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Envelope {
    /// The body itself is the array (or the record)
    Bare,
    /// `{"data": ...}`
    Data,
    /// `{"results": ...}`
    Results,
    /// `{"<key>": ...}`
    Keyed(&'static str),
}

impl Envelope {
    /// Unwrap the payload this envelope points at, if the body has that shape
    fn payload(self, body: &Value) -> Option<&Value> {
        match self {
            Self::Bare => Some(body),
            Self::Data => body.get("data"),
            Self::Results => body.get("results"),
            Self::Keyed(key) => body.get(key),
        }
    }
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bare => f.write_str("bare"),
            Self::Data => f.write_str("{data}"),
            Self::Results => f.write_str("{results}"),
            Self::Keyed(key) => write!(f, "{{{key}}}"),
        }
    }
}

/// Why a response body could not be decoded
#[derive(Error, Debug)]
pub enum DecodeError {
    /// None of the accepted envelopes matched the body
    #[error("expected one of [{}], got {found}", join(.tried))]
    UnexpectedShape {
        /// Envelopes that were tried, in order
        tried: Vec<Envelope>,
        /// JSON type of the body
        found: &'static str,
    },

    /// The envelope matched but one record did not decode
    #[error("record {index} could not be decoded: {source}")]
    Record {
        /// Position of the record in the list
        index: usize,
        /// Underlying serde error
        source: serde_json::Error,
    },
}

fn join(envelopes: &[Envelope]) -> String {
    envelopes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Decode a list response against the accepted envelopes, in order
///
/// # Errors
///
/// Returns [`DecodeError::UnexpectedShape`] if no envelope yields an array
/// and [`DecodeError::Record`] if any record fails to decode.
pub fn decode_list<T: DeserializeOwned>(
    body: Value,
    accepted: &[Envelope],
) -> Result<Vec<T>, DecodeError> {
    let Some(items) = accepted
        .iter()
        .find_map(|envelope| envelope.payload(&body).and_then(Value::as_array))
    else {
        return Err(DecodeError::UnexpectedShape {
            tried: accepted.to_vec(),
            found: json_type(&body),
        });
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            T::deserialize(item).map_err(|source| DecodeError::Record { index, source })
        })
        .collect()
}

/// Decode a single-record response against the accepted envelopes, in order
///
/// # Errors
///
/// Returns [`DecodeError::UnexpectedShape`] if no envelope yields an object
/// and [`DecodeError::Record`] if the record fails to decode.
pub fn decode_one<T: DeserializeOwned>(body: Value, accepted: &[Envelope]) -> Result<T, DecodeError> {
    // `Bare` matches any object, so wrapped shapes are tried first
    let mut ordered: Vec<Envelope> = accepted
        .iter()
        .copied()
        .filter(|e| *e != Envelope::Bare)
        .collect();
    if accepted.contains(&Envelope::Bare) {
        ordered.push(Envelope::Bare);
    }

    let Some(item) = ordered
        .iter()
        .find_map(|envelope| envelope.payload(&body).filter(|v| v.is_object()))
    else {
        return Err(DecodeError::UnexpectedShape {
            tried: accepted.to_vec(),
            found: json_type(&body),
        });
    };

    T::deserialize(item).map_err(|source| DecodeError::Record { index: 0, source })
}

/// Outcome of loading a list: never an error past this point
///
/// Failures degrade to an empty list with the error text kept for display.
#[derive(Debug, Clone)]
pub struct Fetched<T> {
    /// Records in backend order
    pub records: Vec<T>,
    /// Error shown instead of the list, if loading failed
    pub error: Option<String>,
}

impl<T> Fetched<T> {
    /// A successful load
    pub const fn ok(records: Vec<T>) -> Self {
        Self {
            records,
            error: None,
        }
    }

    /// A failed load
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            records: Vec::new(),
            error: Some(message.into()),
        }
    }

    /// Whether loading failed
    pub const fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

impl<T> From<crate::ClientResult<Vec<T>>> for Fetched<T> {
    fn from(result: crate::ClientResult<Vec<T>>) -> Self {
        match result {
            Ok(records) => Self::ok(records),
            Err(err) => Self::failed(err.to_string()),
        }
    }
}
