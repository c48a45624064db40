use models::{StoreSnapshot, Verdict};

pub const REASON_FORCED: &str = "forced";
pub const REASON_OVERSIZED: &str = "oversized";
pub const REASON_UNREADABLE: &str = "unreadable";

/// Pure health classification over a store snapshot.
///
/// Implementations must be deterministic for identical input and free of
/// side effects; assessment itself can never fail. A snapshot that could not
/// be produced at all never reaches a policy.
pub trait HealthPolicy: Send + Sync {
    fn assess(&self, snapshot: &StoreSnapshot) -> Verdict;
    fn name(&self) -> &'static str;
}

/// Always unhealthy. Reproduces a clear-on-every-launch remediation.
pub struct ForcedClear;

impl HealthPolicy for ForcedClear {
    fn assess(&self, _snapshot: &StoreSnapshot) -> Verdict {
        Verdict::unhealthy(REASON_FORCED)
    }

    fn name(&self) -> &'static str {
        "forced"
    }
}

/// Unhealthy once the store grows past either bound, or failed to load.
pub struct SizeThreshold {
    pub max_entries: usize,
    pub max_bytes: u64,
}

impl HealthPolicy for SizeThreshold {
    fn assess(&self, snapshot: &StoreSnapshot) -> Verdict {
        if snapshot.load_failed {
            return Verdict::unhealthy(REASON_UNREADABLE);
        }
        if snapshot.entry_count > self.max_entries || snapshot.approx_bytes > self.max_bytes {
            return Verdict::unhealthy(REASON_OVERSIZED);
        }
        Verdict::Healthy
    }

    fn name(&self) -> &'static str {
        "size-threshold"
    }
}

/// Unhealthy only when the backing file failed to deserialize.
pub struct LoadFailure;

impl HealthPolicy for LoadFailure {
    fn assess(&self, snapshot: &StoreSnapshot) -> Verdict {
        if snapshot.load_failed {
            return Verdict::unhealthy(REASON_UNREADABLE);
        }
        Verdict::Healthy
    }

    fn name(&self) -> &'static str {
        "load-failure"
    }
}

/// Build the policy selected by configuration. Unrecognized values never get
/// this far (config validation rejects them), so the fallback arm just keeps
/// the default behavior.
pub fn from_config(cfg: &configs::SanitizerConfig) -> Box<dyn HealthPolicy> {
    match cfg.policy.as_str() {
        configs::POLICY_SIZE_THRESHOLD => Box::new(SizeThreshold {
            max_entries: cfg.max_entries,
            max_bytes: cfg.max_bytes,
        }),
        configs::POLICY_LOAD_FAILURE => Box::new(LoadFailure),
        _ => Box::new(ForcedClear),
    }
}
