use nestdoc::prelude::*;
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, Entity, PartialEq)]
#[entity(collection = "posts")]
pub struct Post {
    #[entity(id)]
    pub post_id: Option<String>,
    pub title: Option<String>,
    pub tags: Vec<String>,
    #[entity(create_time)]
    pub created: Option<DateTime<Utc>>,
    #[entity(update_time)]
    pub updated: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Default, Entity, PartialEq)]
#[entity(collection = "comments")]
pub struct Comment {
    #[entity(id)]
    pub comment_id: Option<String>,
    #[entity(parent = "Post")]
    pub post_id: Option<String>,
    pub body: Option<String>,
    pub likes: u32,
}

#[derive(Clone, Debug, Default, Entity, PartialEq)]
#[entity(collection = "replies")]
pub struct Reply {
    #[entity(id)]
    pub reply_id: Option<String>,
    #[entity(parent = "Post")]
    pub post_id: Option<String>,
    #[entity(parent = "Comment")]
    pub comment_id: Option<String>,
    pub text: Option<String>,
}

#[derive(Clone, Debug, Default, Entity, PartialEq)]
#[entity(collection = "settings")]
pub struct Setting {
    #[entity(id)]
    pub key: Option<String>,
    #[entity(parent_collection = "tenants")]
    pub tenant_id: Option<String>,
    pub value: Option<String>,
}

#[derive(Clone, Debug, Default, Entity, PartialEq)]
#[entity(collection = "test")]
pub struct TestClass {
    #[entity(id, rename = "testId")]
    pub test_id: Option<String>,
    #[entity(rename = "testValue")]
    pub test_value: Option<String>,
    #[entity(rename = "testMap")]
    pub test_map: BTreeMap<String, String>,
}

#[derive(Clone, Debug, Default, Entity, PartialEq)]
#[entity(collection = "counters")]
pub struct Counter {
    #[entity(id)]
    pub id: u64,
    pub hits: i64,
    #[entity(skip)]
    pub scratch: Vec<u8>,
}
