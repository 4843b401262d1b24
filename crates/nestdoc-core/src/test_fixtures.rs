//! Hand-declared entities shared by the unit tests.
//!
//! These implement `EntityKind` directly, the way a declaration source
//! would, so the core is tested without the derive crate.

use crate::{
    attribute::{Attribute, MapAttribute},
    field_accessor,
    model::{
        entity::{EntityDescriptor, ParentReference},
        field::FieldAccessor,
    },
    traits::{EntityKind, Path},
};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

// declare_path
macro_rules! declare_path {
    ($($entity:ident),* $(,)?) => {
        $(
            impl Path for $entity {
                const PATH: &'static str = concat!("test_fixtures::", stringify!($entity));
            }
        )*
    };
}

declare_path!(
    Post,
    Comment,
    Reply,
    Setting,
    TestClass,
    Counter,
    SelfParent,
    CycleA,
    CycleB,
    CycleChild,
    NoCollection,
    MissingId,
    EmptyParentCollection,
    DuplicateField,
    StoredNameClash,
);

///
/// Post
/// Top-level entity with both timestamps.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Post {
    pub post_id: Option<String>,
    pub title: Option<String>,
    pub created: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
}

impl Post {
    pub const POST_ID: Attribute<Self, String> = Attribute::new("post_id");
    pub const TITLE: Attribute<Self, String> = Attribute::new("title");
}

impl EntityKind for Post {
    fn describe() -> EntityDescriptor {
        EntityDescriptor::new("posts", "post_id")
            .with_create_time("created")
            .with_update_time("updated")
    }

    fn field_accessors() -> Vec<FieldAccessor<Self>> {
        vec![
            field_accessor!(Self, post_id: Option<String>),
            field_accessor!(Self, title: Option<String>),
            field_accessor!(Self, created: Option<DateTime<Utc>>),
            field_accessor!(Self, updated: Option<DateTime<Utc>>),
        ]
    }
}

///
/// Comment
/// Nested one level under `Post`.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Comment {
    pub comment_id: Option<String>,
    pub post_id: Option<String>,
    pub body: Option<String>,
}

impl Comment {
    pub const COMMENT_ID: Attribute<Self, String> = Attribute::new("comment_id");
    pub const POST_ID: Attribute<Self, String> = Attribute::new("post_id");
    pub const BODY: Attribute<Self, String> = Attribute::new("body");
}

impl EntityKind for Comment {
    fn describe() -> EntityDescriptor {
        EntityDescriptor::new("comments", "comment_id")
            .with_parent(ParentReference::entity::<Post>("post_id"))
    }

    fn field_accessors() -> Vec<FieldAccessor<Self>> {
        vec![
            field_accessor!(Self, comment_id: Option<String>),
            field_accessor!(Self, post_id: Option<String>),
            field_accessor!(Self, body: Option<String>),
        ]
    }
}

///
/// Reply
/// Nested under `Post` then `Comment`.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Reply {
    pub reply_id: Option<String>,
    pub post_id: Option<String>,
    pub comment_id: Option<String>,
    pub text: Option<String>,
    pub updated: Option<DateTime<Utc>>,
}

impl Reply {
    pub const REPLY_ID: Attribute<Self, String> = Attribute::new("reply_id");
    pub const POST_ID: Attribute<Self, String> = Attribute::new("post_id");
    pub const COMMENT_ID: Attribute<Self, String> = Attribute::new("comment_id");
    pub const TEXT: Attribute<Self, String> = Attribute::new("text");
    pub const UPDATED: Attribute<Self, DateTime<Utc>> = Attribute::new("updated");
}

impl EntityKind for Reply {
    fn describe() -> EntityDescriptor {
        EntityDescriptor::new("replies", "reply_id")
            .with_update_time("updated")
            .with_parent(ParentReference::entity::<Post>("post_id"))
            .with_parent(ParentReference::entity::<Comment>("comment_id"))
    }

    fn field_accessors() -> Vec<FieldAccessor<Self>> {
        vec![
            field_accessor!(Self, reply_id: Option<String>),
            field_accessor!(Self, post_id: Option<String>),
            field_accessor!(Self, comment_id: Option<String>),
            field_accessor!(Self, text: Option<String>),
            field_accessor!(Self, updated: Option<DateTime<Utc>>),
        ]
    }
}

///
/// Setting
/// Parent lives in an explicitly named collection.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Setting {
    pub key: Option<String>,
    pub tenant_id: Option<String>,
    pub enabled: bool,
}

impl Setting {
    pub const KEY: Attribute<Self, String> = Attribute::new("key");
    pub const TENANT_ID: Attribute<Self, String> = Attribute::new("tenant_id");
    pub const ENABLED: Attribute<Self, bool> = Attribute::new("enabled");
}

impl EntityKind for Setting {
    fn describe() -> EntityDescriptor {
        EntityDescriptor::new("settings", "key")
            .with_parent(ParentReference::collection("tenant_id", "tenants"))
    }

    fn field_accessors() -> Vec<FieldAccessor<Self>> {
        vec![
            field_accessor!(Self, key: Option<String>),
            field_accessor!(Self, tenant_id: Option<String>),
            field_accessor!(Self, enabled: bool),
        ]
    }
}

///
/// TestClass
/// Fields mapped under explicit stored names, including a map field.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TestClass {
    pub test_id: Option<String>,
    pub test_value: Option<String>,
    pub test_map: BTreeMap<String, String>,
}

impl TestClass {
    pub const TEST_ID: Attribute<Self, String> = Attribute::new("testId");
    pub const TEST_VALUE: Attribute<Self, String> = Attribute::new("testValue");
    pub const TEST_MAP: Attribute<Self, BTreeMap<String, String>> = Attribute::new("testMap");
    pub const TEST_MAP_ENTRY: MapAttribute<Self, String> = MapAttribute::new("testMap");
}

impl EntityKind for TestClass {
    fn describe() -> EntityDescriptor {
        EntityDescriptor::new("test", "testId")
    }

    fn field_accessors() -> Vec<FieldAccessor<Self>> {
        vec![
            field_accessor!(Self, test_id as "testId": Option<String>),
            field_accessor!(Self, test_value as "testValue": Option<String>),
            field_accessor!(Self, test_map as "testMap": BTreeMap<String, String>),
        ]
    }
}

///
/// Counter
/// Numeric id, non-optional.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Counter {
    pub id: u64,
    pub count: i64,
}

impl Counter {
    pub const ID: Attribute<Self, u64> = Attribute::new("id");
    pub const COUNT: Attribute<Self, i64> = Attribute::new("count");
}

impl EntityKind for Counter {
    fn describe() -> EntityDescriptor {
        EntityDescriptor::new("counters", "id")
    }

    fn field_accessors() -> Vec<FieldAccessor<Self>> {
        vec![
            field_accessor!(Self, id: u64),
            field_accessor!(Self, count: i64),
        ]
    }
}

// ----------------------------------------------------------------------------
// Malformed declarations
// ----------------------------------------------------------------------------

// broken_entity
macro_rules! broken_entity {
    ($entity:ident, $describe:expr) => {
        #[derive(Clone, Debug, Default, PartialEq)]
        pub struct $entity {
            pub id: Option<String>,
            pub parent_id: Option<String>,
        }

        impl EntityKind for $entity {
            fn describe() -> EntityDescriptor {
                $describe
            }

            fn field_accessors() -> Vec<FieldAccessor<Self>> {
                vec![
                    field_accessor!(Self, id: Option<String>),
                    field_accessor!(Self, parent_id: Option<String>),
                ]
            }
        }
    };
}

broken_entity!(
    SelfParent,
    EntityDescriptor::new("selves", "id")
        .with_parent(ParentReference::entity::<SelfParent>("parent_id"))
);
broken_entity!(
    CycleA,
    EntityDescriptor::new("as", "id").with_parent(ParentReference::entity::<CycleB>("parent_id"))
);
broken_entity!(
    CycleB,
    EntityDescriptor::new("bs", "id").with_parent(ParentReference::entity::<CycleA>("parent_id"))
);
broken_entity!(
    CycleChild,
    EntityDescriptor::new("children", "id")
        .with_parent(ParentReference::entity::<CycleA>("parent_id"))
);
broken_entity!(NoCollection, EntityDescriptor::new("", "id"));
broken_entity!(MissingId, EntityDescriptor::new("missing", "uid"));
broken_entity!(
    EmptyParentCollection,
    EntityDescriptor::new("orphans", "id")
        .with_parent(ParentReference::collection("parent_id", ""))
);

///
/// DuplicateField
/// Two accessors under one name.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DuplicateField {
    pub id: Option<String>,
    pub other: Option<String>,
}

impl EntityKind for DuplicateField {
    fn describe() -> EntityDescriptor {
        EntityDescriptor::new("duplicates", "id")
    }

    fn field_accessors() -> Vec<FieldAccessor<Self>> {
        vec![
            field_accessor!(Self, id: Option<String>),
            field_accessor!(Self, other as "id": Option<String>),
        ]
    }
}

///
/// StoredNameClash
/// Distinct accessors that collapse to one stored name under camel case.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StoredNameClash {
    pub post_id: Option<String>,
    pub legacy: Option<String>,
}

impl EntityKind for StoredNameClash {
    fn describe() -> EntityDescriptor {
        EntityDescriptor::new("clashes", "post_id")
    }

    fn field_accessors() -> Vec<FieldAccessor<Self>> {
        vec![
            field_accessor!(Self, post_id: Option<String>),
            field_accessor!(Self, legacy as "postId": Option<String>),
        ]
    }
}
