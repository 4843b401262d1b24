use crate::fixtures::{Comment, Reply};
use nestdoc::{
    config::{Config, NamingStrategy},
    obs::metrics_report,
    prelude::*,
};
use std::{sync::Arc, thread};

#[test]
fn config_from_json() {
    let config: Config = serde_json::from_str(r#"{ "naming": "kebab_case" }"#).unwrap();
    let registry = MetadataRegistry::with_config(config);

    assert_eq!(registry.config().naming, NamingStrategy::KebabCase);
    let mapper = registry.type_mapper::<Reply>().unwrap();
    assert_eq!(mapper.stored_name("comment_id"), Some("comment-id"));
}

#[test]
fn shared_registry_across_threads() {
    let registry = Arc::new(MetadataRegistry::new());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || registry.type_mapper::<Comment>().unwrap())
        })
        .collect();
    let mappers: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert!(mappers.iter().all(|m| Arc::ptr_eq(m, &mappers[0])));
}

#[test]
fn global_registry_records_metrics() {
    let registry = MetadataRegistry::global();
    registry.type_mapper::<Reply>().unwrap();
    registry.type_mapper::<Reply>().unwrap();

    let report = metrics_report();
    let counters = &report.entities[Reply::PATH];
    assert!(counters.mappers_built >= 1);
    assert!(counters.mapper_hits >= 1);
}
