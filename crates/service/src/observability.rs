use once_cell::sync::Lazy;
use prometheus::{register_int_counter, Encoder, IntCounter, TextEncoder};

// Prometheus metrics (default registry)
pub static SANITIZER_RUNS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "pref_sanitizer_runs_total",
        "Total sanitizer runs"
    )
    .expect("register runs_total")
});

pub static SANITIZER_CLEARS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "pref_sanitizer_clears_total",
        "Total store clears performed"
    )
    .expect("register clears_total")
});

pub static SANITIZER_CLEAR_FAILURES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "pref_sanitizer_clear_failures_total",
        "Total store clears that failed to commit"
    )
    .expect("register clear_failures_total")
});

/// Render all registered metrics in the text exposition format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return format!("metrics encode error: {e}");
    }
    String::from_utf8(buffer).unwrap_or_default()
}
