use crate::fixtures::{Comment, Counter, Post, TestClass};
use nestdoc::prelude::*;
use std::collections::BTreeSet;

#[test]
fn derived_constants_carry_field_names() {
    assert_eq!(Post::POST_ID.name(), "post_id");
    assert_eq!(TestClass::TEST_ID.name(), "testId");
    assert_eq!(TestClass::TEST_MAP_ENTRY.name(), "testMap");
}

#[test]
fn create_entity_round_trip() {
    let registry = MetadataRegistry::new();
    let values = AttributeValue::with(TestClass::TEST_ID, "abc")
        .with(TestClass::TEST_VALUE, "hello")
        .build();

    let entity = registry.helper().create_entity(&values).unwrap();
    assert_eq!(entity.test_id.as_deref(), Some("abc"));
    assert_eq!(entity.test_value.as_deref(), Some("hello"));
}

#[test]
fn create_entity_without_id_is_persistence_error() {
    let registry = MetadataRegistry::new();
    let values = AttributeValue::with(TestClass::TEST_VALUE, "hello").build();

    let err = registry.helper().create_entity(&values).unwrap_err();
    assert!(err.is_persistence());
}

#[test]
fn create_entity_collects_map_entries() {
    let registry = MetadataRegistry::new();
    let values = AttributeValue::with(TestClass::TEST_ID, "abc")
        .with_entry(TestClass::TEST_MAP_ENTRY, "k1", "v1")
        .with_entry(TestClass::TEST_MAP_ENTRY, "k2", "v2")
        .build();

    let entity: TestClass = registry.helper().create_entity(&values).unwrap();
    assert_eq!(entity.test_map.len(), 2);
    assert_eq!(entity.test_map["k1"], "v1");
}

#[test]
fn list_and_numeric_fields() {
    let registry = MetadataRegistry::new();
    let values = AttributeValue::with(Post::POST_ID, "1")
        .with(Post::TAGS, vec!["rust".to_string(), "docs".to_string()])
        .build();
    let post = registry.helper().create_entity(&values).unwrap();
    assert_eq!(post.tags, ["rust", "docs"]);

    let values = AttributeValue::with(Counter::ID, 5_u64)
        .with(Counter::HITS, 12_i64)
        .build();
    let counter = registry.helper().create_entity(&values).unwrap();
    assert_eq!(counter.id, 5);
    assert_eq!(counter.hits, 12);
    assert!(counter.scratch.is_empty());
}

#[test]
fn required_id_fields_of_derived_entities() {
    let registry = MetadataRegistry::new();
    let helper = registry.helper();

    assert_eq!(
        helper.required_id_fields::<Comment>().unwrap(),
        BTreeSet::from(["comment_id", "post_id"])
    );
    assert_eq!(
        helper.required_id_fields::<Counter>().unwrap(),
        BTreeSet::from(["id"])
    );
}

#[test]
fn validate_ignores_non_id_nulls() {
    let registry = MetadataRegistry::new();
    let helper = registry.helper();
    let mut comment = Comment {
        comment_id: Some("9".into()),
        ..Comment::default()
    };

    assert!(helper.validate_ids_not_null(&comment).unwrap_err().is_persistence());

    comment.post_id = Some("42".into());
    helper.validate_ids_not_null(&comment).unwrap();
}
