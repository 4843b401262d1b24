//! Metrics sink boundary.
//!
//! Core logic MUST NOT depend on obs::metrics directly.
//! All instrumentation flows through MetricsEvent and MetricsSink.
use crate::obs::metrics::{self, EventReport};

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    MapperHit {
        entity_path: &'static str,
    },
    MapperBuilt {
        entity_path: &'static str,
        fields: usize,
        parents: usize,
    },
    BuildFailed {
        entity_path: &'static str,
    },
    ValidationFailed {
        entity_path: &'static str,
    },
    DocumentWritten {
        entity_path: &'static str,
    },
    DocumentUpdated {
        entity_path: &'static str,
    },
    DocumentDeleted {
        entity_path: &'static str,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink: Send + Sync {
    fn record(&self, event: MetricsEvent);
}

///
/// GlobalMetricsSink
/// Default sink that writes into the process-wide counters.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        metrics::with_state_mut(|m| match event {
            MetricsEvent::MapperHit { entity_path } => {
                m.ops.mapper_hits = m.ops.mapper_hits.saturating_add(1);
                let entry = m.entities.entry(entity_path.to_string()).or_default();
                entry.mapper_hits = entry.mapper_hits.saturating_add(1);
            }
            MetricsEvent::MapperBuilt { entity_path, .. } => {
                m.ops.mappers_built = m.ops.mappers_built.saturating_add(1);
                let entry = m.entities.entry(entity_path.to_string()).or_default();
                entry.mappers_built = entry.mappers_built.saturating_add(1);
            }
            MetricsEvent::BuildFailed { entity_path } => {
                m.ops.build_failures = m.ops.build_failures.saturating_add(1);
                let entry = m.entities.entry(entity_path.to_string()).or_default();
                entry.build_failures = entry.build_failures.saturating_add(1);
            }
            MetricsEvent::ValidationFailed { entity_path } => {
                m.ops.validation_failures = m.ops.validation_failures.saturating_add(1);
                let entry = m.entities.entry(entity_path.to_string()).or_default();
                entry.validation_failures = entry.validation_failures.saturating_add(1);
            }
            MetricsEvent::DocumentWritten { entity_path } => {
                m.ops.documents_written = m.ops.documents_written.saturating_add(1);
                let entry = m.entities.entry(entity_path.to_string()).or_default();
                entry.documents_written = entry.documents_written.saturating_add(1);
            }
            MetricsEvent::DocumentUpdated { .. } => {
                m.ops.documents_updated = m.ops.documents_updated.saturating_add(1);
            }
            MetricsEvent::DocumentDeleted { .. } => {
                m.ops.documents_deleted = m.ops.documents_deleted.saturating_add(1);
            }
        });
    }
}

/// Snapshot the process-wide counters.
#[must_use]
pub fn metrics_report() -> EventReport {
    metrics::report()
}

/// Reset the process-wide counters.
pub fn metrics_reset_all() {
    metrics::reset();
}
