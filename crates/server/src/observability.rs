use once_cell::sync::Lazy;
use prometheus::{register_int_counter, IntCounter};

// Prometheus metrics (default registry)
pub static CLICKS_RECORDED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "stopwatch_clicks_recorded_total",
        "Total clicks recorded"
    )
    .expect("register clicks_recorded_total")
});

pub static ELAPSED_LOOKUPS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "stopwatch_elapsed_lookups_total",
        "Total elapsed-time lookups"
    )
    .expect("register elapsed_lookups_total")
});

pub static RESETS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "stopwatch_resets_total",
        "Total successful resets"
    )
    .expect("register resets_total")
});

pub static PERSISTENCE_FAILURES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "stopwatch_persistence_failures_total",
        "Total mutations whose file write failed"
    )
    .expect("register persistence_failures_total")
});

/// Touch every counter so they show up in `/metrics` before first use.
pub fn init_metrics() {
    Lazy::force(&CLICKS_RECORDED_TOTAL);
    Lazy::force(&ELAPSED_LOOKUPS_TOTAL);
    Lazy::force(&RESETS_TOTAL);
    Lazy::force(&PERSISTENCE_FAILURES_TOTAL);
}
