use chrono::{DateTime, Utc};
use serde::Serialize;

/// Health classification produced by a policy for one snapshot.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "verdict", content = "reason", rename_all = "snake_case")]
pub enum Verdict {
    Healthy,
    Unhealthy(String),
}

impl Verdict {
    pub fn unhealthy(reason: &str) -> Self {
        Self::Unhealthy(reason.to_string())
    }

    pub fn is_healthy(&self) -> bool {
        matches!(self, Self::Healthy)
    }
}

/// What the sanitizer did to the store during one run.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActionTaken {
    None,
    Cleared,
}

/// Observable error classes; the full messages stay in logs only.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Unreadable,
    ClearFailed,
}

/// Immutable record of one sanitization run.
///
/// Created exactly once per run, handed to the observability sink and then
/// discarded; never persisted back into the store it describes.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Outcome {
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub verdict: Verdict,
    pub action_taken: ActionTaken,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorKind>,
}

impl Outcome {
    pub fn new(verdict: Verdict, action_taken: ActionTaken, error: Option<ErrorKind>) -> Self {
        Self { timestamp: Utc::now(), verdict, action_taken, error }
    }
}
