// field_accessor
/// Build a [`FieldAccessor`](crate::model::field::FieldAccessor) for one
/// named struct field.
///
/// `field_accessor!(Post, post_id: Option<String>)` maps the field under its
/// own name; `field_accessor!(Post, post_id as "postId": Option<String>)`
/// maps it under an explicit name.
#[macro_export]
macro_rules! field_accessor {
    (@build $entity:ty, $field:ident, $name:expr, $ty:ty) => {
        $crate::model::field::FieldAccessor::<$entity>::new(
            $name,
            <$ty as $crate::traits::FieldValue>::kind(),
            |entity: &$entity| $crate::traits::FieldValue::to_value(&entity.$field),
            |entity: &mut $entity, value: $crate::value::Value| {
                entity.$field =
                    <$ty as $crate::traits::FieldValue>::from_value(&value).ok_or(value)?;
                Ok(())
            },
        )
    };
    ($entity:ty, $field:ident : $ty:ty) => {
        $crate::field_accessor!(@build $entity, $field, stringify!($field), $ty)
    };
    ($entity:ty, $field:ident as $name:literal : $ty:ty) => {
        $crate::field_accessor!(@build $entity, $field, $name, $ty)
    };
}
