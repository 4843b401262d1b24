use crate::fixtures::{Comment, Post, Setting, TestClass};
use nestdoc::{
    config::{Config, NamingStrategy},
    error::ErrorOrigin,
    prelude::*,
};

#[test]
fn create_then_find_by_id() {
    let registry = MetadataRegistry::new();
    let store = MemoryStore::new();
    let session = EntitySession::new(&registry, &store);

    let mut post = Post {
        title: Some("Hello".into()),
        ..Post::default()
    };
    let path = session.create(&mut post).unwrap();
    let id = post.post_id.clone().unwrap();
    assert_eq!(path, format!("posts/{id}"));

    let found = session
        .find_by_id(&AttributeValue::with(Post::POST_ID, id).build())
        .unwrap()
        .unwrap();
    assert_eq!(found, post);
}

#[test]
fn nested_create_assigns_id_under_parent() {
    let registry = MetadataRegistry::new();
    let store = MemoryStore::new();
    let session = EntitySession::new(&registry, &store);

    let mut comment = Comment {
        post_id: Some("42".into()),
        body: Some("nice".into()),
        ..Comment::default()
    };
    let path = session.create(&mut comment).unwrap();

    assert!(path.starts_with("posts/42/comments/"));
    assert_eq!(store.paths(), [path]);
}

#[test]
fn partial_update_then_read() {
    let registry = MetadataRegistry::new();
    let store = MemoryStore::new();
    let session = EntitySession::new(&registry, &store);

    let mut comment = Comment {
        comment_id: Some("9".into()),
        post_id: Some("42".into()),
        ..Comment::default()
    };
    session.create(&mut comment).unwrap();

    let keys = AttributeValue::with(Comment::POST_ID, "42").with(Comment::COMMENT_ID, "9");
    session
        .update(&keys.with(Comment::LIKES, 3_u32).build())
        .unwrap();

    let stored = session
        .find_by_id(
            &AttributeValue::with(Comment::POST_ID, "42")
                .with(Comment::COMMENT_ID, "9")
                .build(),
        )
        .unwrap()
        .unwrap();
    assert_eq!(stored.likes, 3);
}

#[test]
fn stored_documents_follow_naming_strategy() {
    let registry = MetadataRegistry::with_config(Config::with_naming(NamingStrategy::CamelCase));
    let store = MemoryStore::new();
    let session = EntitySession::new(&registry, &store);

    let mut setting = Setting {
        key: Some("theme".into()),
        tenant_id: Some("acme".into()),
        value: Some("dark".into()),
    };
    let path = session.create(&mut setting).unwrap();

    let document = store.get(&path).unwrap().unwrap();
    assert_eq!(document["tenantId"], Value::from("acme"));
    assert!(!document.contains_key("tenant_id"));
}

#[test]
fn delete_requires_ids() {
    let registry = MetadataRegistry::new();
    let session = EntitySession::new(&registry, MemoryStore::new());

    let err = session.delete(&Comment::default()).unwrap_err();
    assert!(err.is_persistence());
}

#[test]
fn create_without_parent_reports_validation_error() {
    let registry = MetadataRegistry::new();
    let session = EntitySession::new(&registry, MemoryStore::new());

    let err = session.create(&mut Comment::default()).unwrap_err();
    assert!(err.is_persistence());
    assert_eq!(err.origin, ErrorOrigin::Validate);
}

#[test]
fn field_level_writes_and_removals() {
    let registry = MetadataRegistry::new();
    let store = MemoryStore::new();
    let session = EntitySession::new(&registry, &store);

    let mut entity = TestClass {
        test_id: Some("abc".into()),
        ..TestClass::default()
    };
    session.create(&mut entity).unwrap();

    entity.test_value = Some("hello".into());
    session.set_field(&mut entity, TestClass::TEST_VALUE).unwrap();
    session
        .update_fields("test/abc", [("testMap.k1", "v1"), ("testMap.k2", "v2")])
        .unwrap();

    let keys = AttributeValue::with(TestClass::TEST_ID, "abc").build();
    session
        .remove(&keys, &[TestClass::TEST_MAP_ENTRY.removal("k2")])
        .unwrap();

    let stored = session.find_by_id(&keys).unwrap().unwrap();
    assert_eq!(stored.test_value.as_deref(), Some("hello"));
    assert_eq!(stored.test_map.len(), 1);
    assert_eq!(stored.test_map["k1"], "v1");
}
