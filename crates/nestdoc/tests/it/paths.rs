use crate::fixtures::{Comment, Post, Reply, Setting, TestClass};
use nestdoc::{path::FieldPath, prelude::*};

#[test]
fn post_and_comment_paths() {
    let registry = MetadataRegistry::new();
    let helper = registry.helper();

    let post = Post {
        post_id: Some("42".into()),
        ..Post::default()
    };
    assert_eq!(helper.document_path(&post).unwrap(), "posts/42");

    let comment = Comment {
        post_id: Some("42".into()),
        comment_id: Some("9".into()),
        ..Comment::default()
    };
    assert_eq!(helper.document_path(&comment).unwrap(), "posts/42/comments/9");
    assert_eq!(helper.collection_path(&comment).unwrap(), "posts/42/comments");
}

#[test]
fn document_path_without_id_is_collection_path() {
    let registry = MetadataRegistry::new();

    assert_eq!(
        registry.helper().document_path(&Post::default()).unwrap(),
        "posts"
    );
}

#[test]
fn derived_paths_include_module_path() {
    assert!(Post::PATH.ends_with("::fixtures::Post"));
}

#[test]
fn two_level_nesting_from_values() {
    let registry = MetadataRegistry::new();
    let values = AttributeValue::with(Reply::POST_ID, "p")
        .with(Reply::COMMENT_ID, "c")
        .with(Reply::REPLY_ID, "r")
        .build();

    assert_eq!(
        registry.helper().document_path_from_values(&values).unwrap(),
        "posts/p/comments/c/replies/r"
    );
}

#[test]
fn explicit_collection_parent() {
    let registry = MetadataRegistry::new();
    let setting = Setting {
        key: Some("theme".into()),
        tenant_id: Some("acme".into()),
        value: Some("dark".into()),
    };

    assert_eq!(
        registry.helper().document_path(&setting).unwrap(),
        "tenants/acme/settings/theme"
    );
}

#[test]
fn missing_parent_value_is_invalid_argument() {
    let registry = MetadataRegistry::new();
    let values = AttributeValue::with(Reply::POST_ID, "p")
        .with(Reply::REPLY_ID, "r")
        .build();

    let err = registry
        .helper()
        .collection_path_from_values(&values)
        .unwrap_err();
    assert!(err.is_invalid_argument());
    assert!(err.message.contains("comment_id"));
}

#[test]
fn map_keyed_field_path() {
    let registry = MetadataRegistry::new();
    let values = AttributeValue::with_entry(TestClass::TEST_MAP_ENTRY, "k1", "v1").build();

    let paths = registry.helper().field_paths(&values).unwrap();
    assert_eq!(paths.len(), 1);
    assert_eq!(paths[0].segments(), ["testMap", "k1"]);
    assert_eq!(paths[0], FieldPath::map_entry("testMap", "k1"));
}

#[test]
fn field_path_serializes_as_segment_list() {
    let path = FieldPath::map_entry("testMap", "k1");
    let json = serde_json::to_string(&path).unwrap();

    assert_eq!(json, r#"["testMap","k1"]"#);
    assert_eq!(serde_json::from_str::<FieldPath>(&json).unwrap(), path);
}
