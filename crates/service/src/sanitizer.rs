use std::sync::Arc;

use models::{ActionTaken, Outcome, Verdict};
use tracing::{debug, info, warn};

use crate::observability;
use crate::policy::{HealthPolicy, REASON_UNREADABLE};
use crate::report::OutcomeSink;
use crate::storage::PrefStore;

/// Startup store sanitizer.
///
/// Runs once on the host's startup path, before anything else reads the
/// store: snapshots the store, asks the policy whether the contents are fit
/// to keep, and wipes them when they are not. The clear commits before
/// `run()` returns, so components initializing afterwards observe an empty
/// store. Nothing the sanitizer encounters propagates to the caller; every
/// run produces exactly one `Outcome`.
pub struct Sanitizer {
    store: Arc<dyn PrefStore>,
    policy: Box<dyn HealthPolicy>,
    sink: Arc<dyn OutcomeSink>,
}

impl Sanitizer {
    pub fn new(
        store: Arc<dyn PrefStore>,
        policy: Box<dyn HealthPolicy>,
        sink: Arc<dyn OutcomeSink>,
    ) -> Self {
        Self { store, policy, sink }
    }

    pub async fn run(&self) -> Outcome {
        observability::SANITIZER_RUNS_TOTAL.inc();

        // An unreadable snapshot skips the policy entirely; there is nothing
        // to assess and the clear is attempted regardless.
        let (verdict, snapshot_error) = match self.store.snapshot().await {
            Ok(snapshot) => {
                debug!(
                    entries = snapshot.entry_count,
                    bytes = snapshot.approx_bytes,
                    load_failed = snapshot.load_failed,
                    policy = self.policy.name(),
                    "assessing store snapshot"
                );
                (self.policy.assess(&snapshot), None)
            }
            Err(e) => {
                warn!(error = %e, "could not snapshot store; treating as unreadable");
                (Verdict::unhealthy(REASON_UNREADABLE), Some(e.kind()))
            }
        };

        let outcome = match verdict {
            Verdict::Healthy => Outcome::new(Verdict::Healthy, ActionTaken::None, None),
            Verdict::Unhealthy(reason) => match self.store.clear_all().await {
                Ok(()) => {
                    observability::SANITIZER_CLEARS_TOTAL.inc();
                    info!(%reason, "store cleared");
                    Outcome::new(Verdict::Unhealthy(reason), ActionTaken::Cleared, snapshot_error)
                }
                Err(e) => {
                    observability::SANITIZER_CLEAR_FAILURES_TOTAL.inc();
                    warn!(%reason, error = %e, "store clear failed; contents left in place");
                    Outcome::new(Verdict::Unhealthy(reason), ActionTaken::None, Some(e.kind()))
                }
            },
        };

        // reporting must never disturb the startup path
        if let Err(e) = self.sink.report(&outcome).await {
            debug!(error = %e, "outcome report failed");
        }

        outcome
    }
}
