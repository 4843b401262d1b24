use convert_case::{Case, Casing};
use darling::{Error as DarlingError, FromDeriveInput, FromField, ast::Data};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{
    DeriveInput, GenericArgument, Generics, Ident, Path, PathArguments, Type, ext::IdentExt,
};

///
/// EntityInput
///

#[derive(Debug, FromDeriveInput)]
#[darling(attributes(entity), supports(struct_named))]
struct EntityInput {
    ident: Ident,
    generics: Generics,
    data: Data<(), EntityField>,

    collection: String,
}

///
/// EntityField
///

#[derive(Debug, FromField)]
#[darling(attributes(entity))]
struct EntityField {
    ident: Option<Ident>,
    ty: Type,

    #[darling(default)]
    id: bool,

    #[darling(default)]
    create_time: bool,

    #[darling(default)]
    update_time: bool,

    /// Mapped entity whose collection this field's id belongs to.
    #[darling(default)]
    parent: Option<Path>,

    /// Literal collection this field's id belongs to.
    #[darling(default)]
    parent_collection: Option<String>,

    #[darling(default)]
    rename: Option<String>,

    #[darling(default)]
    skip: bool,
}

impl EntityField {
    fn ident(&self) -> Result<&Ident, DarlingError> {
        self.ident
            .as_ref()
            .ok_or_else(|| DarlingError::custom("entity fields must be named"))
    }

    // Name used by descriptors, attributes and accessors.
    fn name(&self) -> Result<String, DarlingError> {
        match &self.rename {
            Some(rename) => Ok(rename.clone()),
            None => Ok(self.ident()?.unraw().to_string()),
        }
    }

    fn validate(&self) -> Result<(), DarlingError> {
        let ident = self.ident()?;

        if self.skip && (self.id || self.is_parent() || self.create_time || self.update_time) {
            return Err(
                DarlingError::custom("a skipped field cannot carry other entity roles")
                    .with_span(ident),
            );
        }

        if self.parent.is_some() && self.parent_collection.is_some() {
            return Err(DarlingError::custom(
                "use either `parent` or `parent_collection`, not both",
            )
            .with_span(ident));
        }

        if self.parent_collection.as_deref() == Some("") {
            return Err(DarlingError::custom("parent collection must not be empty").with_span(ident));
        }

        if self.rename.as_deref() == Some("") {
            return Err(DarlingError::custom("rename must not be empty").with_span(ident));
        }

        Ok(())
    }

    const fn is_parent(&self) -> bool {
        self.parent.is_some() || self.parent_collection.is_some()
    }

    fn parent_tokens(&self) -> Result<Option<TokenStream>, DarlingError> {
        let name = self.name()?;

        Ok(match (&self.parent, &self.parent_collection) {
            (Some(parent), _) => Some(quote! {
                .with_parent(::nestdoc::model::entity::ParentReference::entity::<#parent>(#name))
            }),
            (None, Some(collection)) => Some(quote! {
                .with_parent(::nestdoc::model::entity::ParentReference::collection(#name, #collection))
            }),
            (None, None) => None,
        })
    }
}

// derive_entity
pub fn derive_entity(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match syn::parse2(input) {
        Ok(input) => input,
        Err(err) => return err.to_compile_error(),
    };

    match EntityInput::from_derive_input(&input).and_then(|entity| entity.expand()) {
        Ok(tokens) => tokens,
        Err(err) => err.write_errors(),
    }
}

impl EntityInput {
    fn fields(&self) -> Vec<&EntityField> {
        match &self.data {
            Data::Struct(fields) => fields.iter().collect(),
            Data::Enum(_) => Vec::new(),
        }
    }

    fn validate(&self) -> Result<(), DarlingError> {
        if !self.generics.params.is_empty() {
            return Err(
                DarlingError::custom("Entity cannot be derived for generic types")
                    .with_span(&self.ident),
            );
        }

        if self.collection.is_empty() {
            return Err(DarlingError::custom("collection must not be empty").with_span(&self.ident));
        }

        let fields = self.fields();
        for field in &fields {
            field.validate()?;
        }

        for (role, count) in [
            ("id", fields.iter().filter(|f| f.id).count()),
            ("create_time", fields.iter().filter(|f| f.create_time).count()),
            ("update_time", fields.iter().filter(|f| f.update_time).count()),
        ] {
            if count > 1 {
                return Err(DarlingError::custom(format!(
                    "only one field may be marked #[entity({role})]"
                ))
                .with_span(&self.ident));
            }
            if role == "id" && count == 0 {
                return Err(DarlingError::custom(
                    "an entity needs exactly one #[entity(id)] field",
                )
                .with_span(&self.ident));
            }
        }

        Ok(())
    }

    fn expand(&self) -> Result<TokenStream, DarlingError> {
        self.validate()?;

        let ident = &self.ident;
        let collection = &self.collection;
        let fields: Vec<_> = self.fields().into_iter().filter(|f| !f.skip).collect();

        let mut id_name = None;
        let mut create_time = quote!();
        let mut update_time = quote!();
        let mut parents = Vec::new();
        let mut accessors = Vec::new();
        let mut consts = Vec::new();

        for field in &fields {
            let field_ident = field.ident()?;
            let name = field.name()?;
            let ty = &field.ty;

            if field.id {
                id_name = Some(name.clone());
            }
            if field.create_time {
                create_time = quote!(.with_create_time(#name));
            }
            if field.update_time {
                update_time = quote!(.with_update_time(#name));
            }
            if let Some(parent) = field.parent_tokens()? {
                parents.push(parent);
            }

            accessors.push(quote! {
                ::nestdoc::field_accessor!(Self, #field_ident as #name: #ty)
            });
            consts.push(attribute_consts(field_ident, &name, ty));
        }

        let id_name = id_name.ok_or_else(|| {
            DarlingError::custom("an entity needs exactly one #[entity(id)] field")
                .with_span(&self.ident)
        })?;

        Ok(quote! {
            impl ::nestdoc::traits::Path for #ident {
                const PATH: &'static str = concat!(module_path!(), "::", stringify!(#ident));
            }

            impl ::nestdoc::traits::EntityKind for #ident {
                fn describe() -> ::nestdoc::model::entity::EntityDescriptor {
                    ::nestdoc::model::entity::EntityDescriptor::new(#collection, #id_name)
                        #create_time
                        #update_time
                        #(#parents)*
                }

                fn field_accessors() -> ::std::vec::Vec<::nestdoc::model::field::FieldAccessor<Self>> {
                    ::std::vec![#(#accessors),*]
                }
            }

            #[allow(dead_code)]
            impl #ident {
                #(#consts)*
            }
        })
    }
}

// Attribute constant for the field, plus a map-entry constant for map fields.
fn attribute_consts(field_ident: &Ident, name: &str, ty: &Type) -> TokenStream {
    let constant = field_ident.unraw().to_string().to_case(Case::Constant);
    let const_ident = format_ident!("{constant}");
    let attr_ty = unwrap_option(ty).unwrap_or(ty);

    let entry = map_value_type(attr_ty).map(|value_ty| {
        let entry_ident = format_ident!("{constant}_ENTRY");

        quote! {
            pub const #entry_ident: ::nestdoc::attribute::MapAttribute<Self, #value_ty> =
                ::nestdoc::attribute::MapAttribute::new(#name);
        }
    });

    quote! {
        pub const #const_ident: ::nestdoc::attribute::Attribute<Self, #attr_ty> =
            ::nestdoc::attribute::Attribute::new(#name);
        #entry
    }
}

// `Option<T>` → `T`
fn unwrap_option(ty: &Type) -> Option<&Type> {
    generic_args(ty, "Option").and_then(|args| match args.as_slice() {
        [inner] => Some(*inner),
        _ => None,
    })
}

// `BTreeMap<K, V>` / `HashMap<K, V>` → `V`
fn map_value_type(ty: &Type) -> Option<&Type> {
    ["BTreeMap", "HashMap"]
        .into_iter()
        .find_map(|map| generic_args(ty, map))
        .and_then(|args| match args.as_slice() {
            [_, value] | [_, value, _] => Some(*value),
            _ => None,
        })
}

fn generic_args<'a>(ty: &'a Type, ident: &str) -> Option<Vec<&'a Type>> {
    let Type::Path(path) = ty else {
        return None;
    };
    let segment = path.path.segments.last()?;
    if segment.ident != ident {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };

    Some(
        args.args
            .iter()
            .filter_map(|arg| match arg {
                GenericArgument::Type(ty) => Some(ty),
                _ => None,
            })
            .collect(),
    )
}
