//! Metadata registry: build-once, read-many cache of per-type mappers.
//!
//! A mapper is built the first time its type is requested and is immutable
//! afterwards. Builds for one type are serialized behind that type's own
//! lock; unrelated types never wait on each other.

mod mapper;
mod parent;


pub use mapper::TypeMapper;
pub use parent::{ParentSegment, resolve_parent_chain};

use crate::{
    config::Config,
    error::Error,
    obs::{GlobalMetricsSink, MetricsEvent, MetricsSink},
    traits::EntityKind,
};
use parking_lot::{Mutex, RwLock};
use std::{
    any::{Any, TypeId},
    collections::HashMap,
    fmt,
    sync::{Arc, OnceLock},
};

type ErasedMapper = Arc<dyn Any + Send + Sync>;

///
/// MetadataRegistry
///
/// Owns the type → mapper cache. Construct one per application (or per
/// test); [`MetadataRegistry::global`] offers a lazily-created shared one.
///

pub struct MetadataRegistry {
    config: Config,
    sink: Arc<dyn MetricsSink>,
    mappers: RwLock<HashMap<TypeId, ErasedMapper>>,
    build_locks: Mutex<HashMap<TypeId, Arc<Mutex<()>>>>,
}

impl MetadataRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            sink: Arc::new(GlobalMetricsSink),
            mappers: RwLock::new(HashMap::new()),
            build_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Replace the metrics sink events are recorded into.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn MetricsSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Process-wide registry using the default configuration.
    pub fn global() -> &'static Self {
        static GLOBAL: OnceLock<MetadataRegistry> = OnceLock::new();

        GLOBAL.get_or_init(Self::new)
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) fn record(&self, event: MetricsEvent) {
        self.sink.record(event);
    }

    /// Number of mappers published so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mappers.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    ///
    /// type_mapper
    ///
    /// Return the mapper for `E`, building and publishing it on first use.
    /// Concurrent first requests build exactly once; every caller gets the
    /// same `Arc`. A failed build is not cached.
    ///
    pub fn type_mapper<E: EntityKind>(&self) -> Result<Arc<TypeMapper<E>>, Error> {
        let key = TypeId::of::<E>();

        if let Some(mapper) = self.published::<E>(key) {
            tracing::trace!(entity = E::PATH, "type mapper cache hit");
            self.record(MetricsEvent::MapperHit {
                entity_path: E::PATH,
            });

            return Ok(mapper);
        }

        // Reject cyclic declarations before taking any build lock, so the
        // lock order below always follows an acyclic parent graph.
        parent::check_parent_cycles::<E>()?;

        let build_lock = self.build_lock(key);
        let _guard = build_lock.lock();

        // Another caller may have published while this one waited.
        if let Some(mapper) = self.published::<E>(key) {
            return Ok(mapper);
        }

        match TypeMapper::<E>::build(self) {
            Ok(mapper) => {
                let mapper = Arc::new(mapper);
                self.mappers.write().insert(key, mapper.clone());

                tracing::debug!(
                    entity = E::PATH,
                    collection = mapper.collection(),
                    fields = mapper.fields().len(),
                    parents = mapper.parents().len(),
                    "type mapper built"
                );
                self.record(MetricsEvent::MapperBuilt {
                    entity_path: E::PATH,
                    fields: mapper.fields().len(),
                    parents: mapper.parents().len(),
                });

                Ok(mapper)
            }
            Err(err) => {
                tracing::warn!(entity = E::PATH, error = %err, "type mapper build failed");
                self.record(MetricsEvent::BuildFailed {
                    entity_path: E::PATH,
                });

                Err(err)
            }
        }
    }

    fn published<E: EntityKind>(&self, key: TypeId) -> Option<Arc<TypeMapper<E>>> {
        let erased = self.mappers.read().get(&key).cloned()?;

        erased.downcast::<TypeMapper<E>>().ok()
    }

    fn build_lock(&self, key: TypeId) -> Arc<Mutex<()>> {
        self.build_locks.lock().entry(key).or_default().clone()
    }
}

impl Default for MetadataRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MetadataRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetadataRegistry")
            .field("config", &self.config)
            .field("mappers", &self.len())
            .finish_non_exhaustive()
    }
}
