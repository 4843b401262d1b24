//! Observability: runtime counters and the sink abstraction.
//!
//! Registry and session code never touch the counters directly; they emit
//! [`MetricsEvent`]s into a [`MetricsSink`].

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{EntityCounters, EventOps, EventReport};
pub use sink::{GlobalMetricsSink, MetricsEvent, MetricsSink, metrics_report, metrics_reset_all};
