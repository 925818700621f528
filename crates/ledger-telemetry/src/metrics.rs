//! Prometheus metrics for operation processing.
//!
//! All metrics follow the naming convention: `cc_<area>_<metric>_<unit>`
//!
//! ## Metric Types
//!
//! - **Counter**: Monotonically increasing value (e.g., operations_committed_total)
//! - **Histogram**: Distribution of values (e.g., operation_process_duration_seconds)

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, Counter, CounterVec, Encoder, Histogram, HistogramOpts, Opts, Registry,
    TextEncoder,
};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // OPERATION METRICS
    // =========================================================================

    /// Operations handed to the executor
    pub static ref OPERATIONS_RECEIVED: CounterVec = CounterVec::new(
        Opts::new("cc_operations_received_total", "Operations received for execution"),
        &["kind"]
    ).expect("metric creation failed");

    /// Operations excluded from a batch
    pub static ref OPERATIONS_REJECTED: CounterVec = CounterVec::new(
        Opts::new("cc_operations_rejected_total", "Operations rejected by validation or pre-processing"),
        &["kind", "class"]  // class: invalid/rejected
    ).expect("metric creation failed");

    /// Operations whose state changes were committed
    pub static ref OPERATIONS_COMMITTED: CounterVec = CounterVec::new(
        Opts::new("cc_operations_committed_total", "Operations committed to the state store"),
        &["kind"]
    ).expect("metric creation failed");

    /// Commit calls refused by the state store
    pub static ref COMMIT_FAILURES: Counter = Counter::new(
        "cc_commit_failures_total",
        "State store commit failures after successful pre-processing"
    ).expect("metric creation failed");

    /// Fees charged by committed operations, in base units
    pub static ref FEES_COLLECTED: Counter = Counter::new(
        "cc_fees_collected_total",
        "Total fee amount charged by committed operations"
    ).expect("metric creation failed");

    /// Pre-process plus commit latency
    pub static ref OPERATION_PROCESS_DURATION: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "cc_operation_process_duration_seconds",
            "Time spent pre-processing and committing one operation"
        ).buckets(exponential_buckets(0.00001, 2.0, 16).expect("valid buckets"))
    ).expect("metric creation failed");
}

/// Handle proving the metrics were registered.
#[derive(Debug, Clone, Copy)]
pub struct MetricsHandle {
    _private: (),
}

/// Register all metrics with the global registry.
///
/// Registering twice is not an error.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(OPERATIONS_RECEIVED.clone()),
        Box::new(OPERATIONS_REJECTED.clone()),
        Box::new(OPERATIONS_COMMITTED.clone()),
        Box::new(COMMIT_FAILURES.clone()),
        Box::new(FEES_COLLECTED.clone()),
        Box::new(OPERATION_PROCESS_DURATION.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(MetricsHandle { _private: () })
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Timer guard for automatic histogram observation.
pub struct HistogramTimer {
    histogram: Histogram,
    start: std::time::Instant,
}

impl HistogramTimer {
    /// Start a new timer for the given histogram.
    pub fn new(histogram: &Histogram) -> Self {
        Self {
            histogram: histogram.clone(),
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        self.histogram.observe(self.start.elapsed().as_secs_f64());
    }
}

/// Start timing for a histogram. Observation happens on drop.
#[macro_export]
macro_rules! time_histogram {
    ($histogram:expr) => {
        $crate::metrics::HistogramTimer::new(&$histogram)
    };
}
