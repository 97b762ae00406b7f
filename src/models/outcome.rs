//! Operation Outcomes
//!
//! Every session entry point settles into an `Outcome` rather than returning
//! an error: failures are already recorded in the session's error slot by the
//! time the caller sees them.

use casefile_core::ErrorKind;
use serde::{Deserialize, Serialize};

/// The single user-visible error slot's content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionError {
    pub kind: ErrorKind,
    pub message: String,
}

impl SessionError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ValidationError, message)
    }
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.kind)
    }
}

/// Why an operation was refused before any request was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    /// Submission without a selected document.
    NoDocument,
    /// Empty or whitespace-only scenario query.
    EmptyQuery,
    /// A request of the same kind is already in flight.
    Busy,
    /// The operation needs an analysis result and none is present.
    Locked,
}

impl Rejection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rejection::NoDocument => "no_document",
            Rejection::EmptyQuery => "empty_query",
            Rejection::Busy => "busy",
            Rejection::Locked => "locked",
        }
    }
}

/// How a store transition for a settled request went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement {
    Applied,
    Failed(SessionError),
    /// The request belonged to a superseded session generation.
    Stale,
}

/// Result of a session entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The request succeeded and its result was applied to the session.
    Applied(T),
    /// The request failed; the error slot holds the same error.
    Failed(SessionError),
    /// The response arrived after the session moved on and was dropped.
    Discarded,
    /// Refused locally; no request was issued.
    Rejected(Rejection),
}

impl<T> Outcome<T> {
    /// Combine a store settlement with the value to report on success.
    pub fn from_settlement(settlement: Settlement, value: T) -> Self {
        match settlement {
            Settlement::Applied => Outcome::Applied(value),
            Settlement::Failed(err) => Outcome::Failed(err),
            Settlement::Stale => Outcome::Discarded,
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied(_))
    }

    pub fn applied(self) -> Option<T> {
        match self {
            Outcome::Applied(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Applied(value) => Outcome::Applied(f(value)),
            Outcome::Failed(err) => Outcome::Failed(err),
            Outcome::Discarded => Outcome::Discarded,
            Outcome::Rejected(reason) => Outcome::Rejected(reason),
        }
    }
}
