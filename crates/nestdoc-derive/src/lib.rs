use proc_macro::TokenStream;

mod entity;

///
/// Entity
///
/// Declare a struct as a mapped entity.
///
/// ```ignore
/// #[derive(Default, Entity)]
/// #[entity(collection = "comments")]
/// struct Comment {
///     #[entity(id)]
///     comment_id: Option<String>,
///     #[entity(parent = "Post")]
///     post_id: Option<String>,
///     #[entity(update_time)]
///     updated: Option<DateTime<Utc>>,
/// }
/// ```
///
/// Emits `Path` and `EntityKind` impls plus one attribute constant per
/// mapped field (`Comment::POST_ID`), and one map-entry constant per map
/// field (`Foo::TAGS_ENTRY`).
///
#[proc_macro_derive(Entity, attributes(entity))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    entity::derive_entity(input.into()).into()
}
