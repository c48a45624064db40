use async_trait::async_trait;
use models::{ActionTaken, Outcome};
use tracing::{debug, info, warn};

use crate::errors::ServiceError;

/// Hand-off point for sanitizer outcomes.
///
/// Delivery is fire-and-forget from the sanitizer's point of view: a failed
/// report is swallowed by the caller and must never block or fail host
/// startup.
#[async_trait]
pub trait OutcomeSink: Send + Sync {
    async fn report(&self, outcome: &Outcome) -> Result<(), ServiceError>;
}

/// Sink that emits one structured tracing event per sanitizer run.
pub struct TracingSink;

#[async_trait]
impl OutcomeSink for TracingSink {
    async fn report(&self, outcome: &Outcome) -> Result<(), ServiceError> {
        let payload =
            serde_json::to_string(outcome).map_err(|e| ServiceError::Report(e.to_string()))?;
        match (outcome.action_taken, outcome.error) {
            (_, Some(_)) => warn!(outcome = %payload, "sanitizer run finished with error"),
            (ActionTaken::Cleared, None) => info!(outcome = %payload, "preference store cleared"),
            (ActionTaken::None, None) => debug!(outcome = %payload, "preference store healthy"),
        }
        Ok(())
    }
}
