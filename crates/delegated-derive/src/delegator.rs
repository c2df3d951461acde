use crate::inflect;
use convert_case::{Case, Casing};
use darling::{FromMeta, util::PathList};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Ident, Type, Visibility};

///
/// RoleDecl
///
/// One `#[delegated(role = "entryable", types(Message, Comment))]`
/// attribute. Repeatable; each declaration registers an independent role.
///

#[derive(FromMeta)]
struct RoleDecl {
    role: String,
    types: PathList,
}

///
/// VariantSpec
/// Everything derived from one registered delegate type.
///

struct VariantSpec {
    path: syn::Path,
    variant_ident: Ident,
    type_name: String,
    scope_name: String,
    accessor: Ident,
    predicate: Ident,
    id_reader: Ident,
    scope_fn: Ident,
}

///
/// RoleSpec
/// A validated role declaration, ready for emission.
///

struct RoleSpec {
    role: String,
    role_ident: Ident,
    kind_ident: Ident,
    union_ident: Ident,
    variants_const: Ident,
    role_const: Ident,
    id_column: String,
    type_column: String,
    variants: Vec<VariantSpec>,
}

pub fn derive_delegated(input: TokenStream) -> TokenStream {
    match expand(input) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error(),
    }
}

fn expand(input: TokenStream) -> Result<TokenStream, syn::Error> {
    let input: DeriveInput = syn::parse2(input)?;
    let ident = &input.ident;
    let vis = &input.vis;

    let roles = parse_roles(&input)?;
    validate_roles(&input, &roles)?;

    let items = roles.iter().map(|role| emit_role(ident, vis, role));
    let role_consts = roles.iter().map(|role| {
        let role_const = &role.role_const;
        quote!(&Self::#role_const)
    });

    Ok(quote! {
        #(#items)*

        impl ::delegated::traits::Delegated for #ident {
            const ROLES: &'static [&'static ::delegated::model::RoleModel] = &[
                #(#role_consts),*
            ];
        }
    })
}

// Parse every `#[delegated(...)]` attribute into a validated RoleSpec.
fn parse_roles(input: &DeriveInput) -> Result<Vec<RoleSpec>, syn::Error> {
    let mut roles = Vec::new();
    let mut errors: Vec<syn::Error> = Vec::new();

    for attr in &input.attrs {
        if !attr.path().is_ident("delegated") {
            continue;
        }

        match RoleDecl::from_meta(&attr.meta) {
            Ok(decl) => match role_spec(input, &decl) {
                Ok(role) => roles.push(role),
                Err(err) => errors.push(err),
            },
            Err(err) => errors.push(err.into()),
        }
    }

    if roles.is_empty() && errors.is_empty() {
        errors.push(syn::Error::new_spanned(
            &input.ident,
            "Delegated requires at least one #[delegated(role = \"...\", types(...))] attribute",
        ));
    }

    match combine(errors) {
        Some(err) => Err(err),
        None => Ok(roles),
    }
}

fn role_spec(input: &DeriveInput, decl: &RoleDecl) -> Result<RoleSpec, syn::Error> {
    let role = decl.role.clone();

    let role_ident = syn::parse_str::<Ident>(&role).map_err(|_| {
        syn::Error::new_spanned(
            &input.ident,
            format!("role '{role}' is not a valid field identifier"),
        )
    })?;

    if decl.types.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.ident,
            format!("role '{role}' must register at least one delegate type"),
        ));
    }

    let mut variants: Vec<VariantSpec> = Vec::new();
    for path in decl.types.iter() {
        let Some(segment) = path.segments.last() else {
            return Err(syn::Error::new_spanned(path, "delegate type path is empty"));
        };

        let variant_ident = segment.ident.clone();
        let type_name = inflect::type_name(&variant_ident.to_string());
        let scope_name = inflect::scope_name(&type_name);

        if variants.iter().any(|v| v.type_name == type_name) {
            return Err(syn::Error::new_spanned(
                path,
                format!("role '{role}' registers type name '{type_name}' more than once"),
            ));
        }
        if variants.iter().any(|v| v.scope_name == scope_name) {
            return Err(syn::Error::new_spanned(
                path,
                format!("role '{role}' derives scope name '{scope_name}' more than once"),
            ));
        }

        variants.push(VariantSpec {
            path: path.clone(),
            accessor: format_ident!("{}", type_name),
            predicate: format_ident!("is_{}", type_name),
            id_reader: format_ident!("{}_id", type_name),
            scope_fn: format_ident!("{}", scope_name),
            variant_ident,
            type_name,
            scope_name,
        });
    }

    let role_pascal = role.to_case(Case::Pascal);
    let role_upper = role.to_ascii_uppercase();

    Ok(RoleSpec {
        role_ident,
        kind_ident: format_ident!("{}Kind", role_pascal),
        union_ident: format_ident!("{}", role_pascal),
        variants_const: format_ident!("{}_VARIANTS", role_upper),
        role_const: format_ident!("{}_ROLE", role_upper),
        id_column: format!("{role}_id"),
        type_column: format!("{role}_type"),
        role,
        variants,
    })
}

// Cross-role checks plus the role-field shape check on the struct itself.
fn validate_roles(input: &DeriveInput, roles: &[RoleSpec]) -> Result<(), syn::Error> {
    let mut errors: Vec<syn::Error> = Vec::new();

    for (index, role) in roles.iter().enumerate() {
        let earlier = &roles[..index];

        if earlier.iter().any(|r| r.role == role.role) {
            errors.push(syn::Error::new_spanned(
                &input.ident,
                format!("role '{}' is declared more than once", role.role),
            ));
        }

        // Generated accessor names are flat on the record, so type names
        // must be unique across roles as well.
        for variant in &role.variants {
            if earlier
                .iter()
                .flat_map(|r| r.variants.iter())
                .any(|v| v.type_name == variant.type_name)
            {
                errors.push(syn::Error::new_spanned(
                    &variant.path,
                    format!(
                        "type name '{}' is registered by more than one role",
                        variant.type_name
                    ),
                ));
            }
        }

        if let Some(err) = check_role_field(input, role) {
            errors.push(err);
        }
    }

    match combine(errors) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

// The struct must hold the reference pair in a field named after the role.
fn check_role_field(input: &DeriveInput, role: &RoleSpec) -> Option<syn::Error> {
    let Data::Struct(data) = &input.data else {
        return Some(syn::Error::new_spanned(
            &input.ident,
            "Delegated may only be derived on a struct with named fields",
        ));
    };

    let field = data
        .fields
        .iter()
        .find(|field| field.ident.as_ref().is_some_and(|i| *i == role.role_ident));

    let Some(field) = field else {
        return Some(syn::Error::new_spanned(
            &input.ident,
            format!(
                "role '{}' requires a field `{}: Option<DelegateRef>` on the struct",
                role.role, role.role
            ),
        ));
    };

    if !is_option(&field.ty) {
        return Some(syn::Error::new_spanned(
            &field.ty,
            format!(
                "role field `{}` must be declared as `Option<DelegateRef>`",
                role.role
            ),
        ));
    }

    None
}

fn is_option(ty: &Type) -> bool {
    match ty {
        Type::Path(path) => path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "Option"),
        _ => false,
    }
}

fn combine(errors: Vec<syn::Error>) -> Option<syn::Error> {
    let mut iter = errors.into_iter();
    let mut combined = iter.next()?;
    for err in iter {
        combined.combine(err);
    }

    Some(combined)
}

// ----------------------------------------------------------------------
// Emission
// ----------------------------------------------------------------------

fn emit_role(ident: &Ident, vis: &Visibility, role: &RoleSpec) -> TokenStream {
    let kind = emit_kind_enum(ident, vis, role);
    let union = emit_union_enum(ident, vis, role);
    let inherent = emit_inherent(ident, vis, role);

    quote! {
        #kind
        #union
        #inherent
    }
}

fn emit_kind_enum(ident: &Ident, vis: &Visibility, role: &RoleSpec) -> TokenStream {
    let RoleSpec {
        role: role_name,
        kind_ident,
        role_const,
        variants,
        ..
    } = role;

    let doc = format!("Registered delegate kinds for `{ident}::{role_name}`.");
    let variant_idents: Vec<&Ident> = variants.iter().map(|v| &v.variant_ident).collect();

    let as_str_arms = variants.iter().map(|v| {
        let variant = &v.variant_ident;
        let path = &v.path;
        quote! {
            Self::#variant => <#path as ::delegated::traits::Delegate>::TYPE_NAME,
        }
    });

    let from_name_arms = variants.iter().map(|v| {
        let variant = &v.variant_ident;
        let path = &v.path;
        quote! {
            if name == <#path as ::delegated::traits::Delegate>::TYPE_NAME {
                return Some(Self::#variant);
            }
        }
    });

    let model_arms = variants.iter().enumerate().map(|(index, v)| {
        let variant = &v.variant_ident;
        quote! {
            Self::#variant => #ident::#role_const.variant(#index),
        }
    });

    let predicates = variants.iter().map(|v| {
        let variant = &v.variant_ident;
        let predicate = &v.predicate;
        let doc = format!("Returns true iff this kind is `{}`.", v.type_name);
        quote! {
            #[doc = #doc]
            #[must_use]
            #vis const fn #predicate(self) -> bool {
                matches!(self, Self::#variant)
            }
        }
    });

    quote! {
        #[doc = #doc]
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #vis enum #kind_ident {
            #(#variant_idents),*
        }

        impl #kind_ident {
            /// The lower-cased type name stored as the discriminator.
            #[must_use]
            #vis const fn as_str(self) -> &'static str {
                match self {
                    #(#as_str_arms)*
                }
            }

            /// Parse a stored discriminator. Exact and case-sensitive.
            #[must_use]
            #vis fn from_name(name: &str) -> Option<Self> {
                #(#from_name_arms)*
                None
            }

            /// The registered variant descriptor for this kind.
            #[must_use]
            #vis const fn model(self) -> &'static ::delegated::model::DelegateModel {
                match self {
                    #(#model_arms)*
                }
            }

            #(#predicates)*
        }

        impl ::core::fmt::Display for #kind_ident {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::core::str::FromStr for #kind_ident {
            type Err = ::delegated::model::ConfigError;

            fn from_str(name: &str) -> Result<Self, Self::Err> {
                Self::from_name(name).ok_or_else(|| {
                    ::delegated::model::ConfigError::UnknownTypeName {
                        role: #role_name,
                        name: name.to_string(),
                    }
                })
            }
        }
    }
}

fn emit_union_enum(ident: &Ident, vis: &Visibility, role: &RoleSpec) -> TokenStream {
    let RoleSpec {
        role: role_name,
        kind_ident,
        union_ident,
        variants,
        ..
    } = role;

    let doc = format!("Delegate union for `{ident}::{role_name}`.");

    let variant_decls = variants.iter().map(|v| {
        let variant = &v.variant_ident;
        let path = &v.path;
        quote!(#variant(#path))
    });

    let kind_arms = variants.iter().map(|v| {
        let variant = &v.variant_ident;
        quote!(Self::#variant(_) => #kind_ident::#variant,)
    });

    let persist_arms = variants.iter().map(|v| {
        let variant = &v.variant_ident;
        quote!(Self::#variant(row) => db.persist_delegate(row),)
    });

    let from_impls = variants.iter().map(|v| {
        let variant = &v.variant_ident;
        let path = &v.path;
        quote! {
            impl ::core::convert::From<#path> for #union_ident {
                fn from(row: #path) -> Self {
                    Self::#variant(row)
                }
            }
        }
    });

    quote! {
        #[doc = #doc]
        #[derive(Clone, Debug)]
        #vis enum #union_ident {
            #(#variant_decls),*
        }

        impl #union_ident {
            /// The kind of the wrapped delegate row.
            #[must_use]
            #vis const fn kind(&self) -> #kind_ident {
                match self {
                    #(#kind_arms)*
                }
            }

            /// Persist the wrapped row and produce the reference to store.
            #vis fn persist(
                self,
                db: &mut ::delegated::db::Database,
            ) -> Result<::delegated::reference::DelegateRef, ::delegated::db::StoreError> {
                match self {
                    #(#persist_arms)*
                }
            }
        }

        #(#from_impls)*
    }
}

fn emit_inherent(ident: &Ident, vis: &Visibility, role: &RoleSpec) -> TokenStream {
    let RoleSpec {
        role: role_name,
        role_ident,
        kind_ident,
        union_ident,
        variants_const,
        role_const,
        id_column,
        type_column,
        variants,
    } = role;

    let variant_count = variants.len();
    let variant_models = variants.iter().map(|v| {
        let path = &v.path;
        let scope_name = &v.scope_name;
        quote! {
            ::delegated::model::DelegateModel {
                path: <#path as ::delegated::traits::Path>::PATH,
                type_name: <#path as ::delegated::traits::Delegate>::TYPE_NAME,
                scope_name: #scope_name,
            }
        }
    });

    let ref_accessor = format_ident!("{}", role_name);
    let id_accessor = format_ident!("{}_id", role_name);
    let type_accessor = format_ident!("{}_type", role_name);
    let kind_accessor = format_ident!("{}_kind", role_name);
    let name_accessor = format_ident!("{}_name", role_name);
    let model_accessor = format_ident!("{}_model", role_name);
    let attach = format_ident!("attach_{}", role_name);
    let detach = format_ident!("detach_{}", role_name);

    let ref_doc = format!("The stored `{role_name}` reference, if any.");
    let id_doc = format!("The stored foreign key (`{id_column}`).");
    let type_doc = format!("The stored discriminator (`{type_column}`).");
    let kind_doc = format!(
        "The typed kind of the active `{role_name}` delegate. Unregistered stored names read as `None`."
    );
    let name_doc = format!("The lower-cased type name of the active `{role_name}` delegate.");
    let model_doc = format!(
        "The registered variant descriptor of the active `{role_name}` delegate."
    );
    let attach_doc = format!(
        "Persist `value` and store its reference as the active `{role_name}` delegate."
    );
    let detach_doc = format!("Clear the stored `{role_name}` reference, returning it.");

    let per_type = variants.iter().map(|v| {
        let path = &v.path;
        let accessor = &v.accessor;
        let predicate = &v.predicate;
        let id_reader = &v.id_reader;
        let scope_fn = &v.scope_fn;
        let type_name = &v.type_name;

        let accessor_doc = format!(
            "The delegate row as `{type_name}`, iff the stored discriminator matches."
        );
        let predicate_doc = format!("Returns true iff the stored discriminator is `{type_name}`.");
        let id_doc = format!("The stored foreign key, iff the active delegate is a `{type_name}`.");
        let scope_doc = format!(
            "Every `{ident}` whose active `{role_name}` delegate is a `{type_name}`."
        );

        quote! {
            #[doc = #accessor_doc]
            #[must_use]
            #vis fn #accessor(&self, db: &::delegated::db::Database) -> Option<#path> {
                self.#role_ident.as_ref().and_then(|reference| db.load_delegate(reference))
            }

            #[doc = #predicate_doc]
            #[must_use]
            #vis fn #predicate(&self) -> bool {
                self.#role_ident
                    .as_ref()
                    .is_some_and(|reference| reference.points_to::<#path>())
            }

            #[doc = #id_doc]
            #[must_use]
            #vis fn #id_reader(&self) -> Option<::delegated::types::RecordKey> {
                self.#role_ident
                    .as_ref()
                    .and_then(|reference| reference.key_for::<#path>())
            }

            #[doc = #scope_doc]
            #[must_use]
            #vis fn #scope_fn() -> ::delegated::db::DelegateScope<Self> {
                ::delegated::db::DelegateScope::new(
                    <#path as ::delegated::traits::Delegate>::TYPE_NAME,
                    Self::#ref_accessor,
                )
            }
        }
    });

    quote! {
        impl #ident {
            #vis const #variants_const: [::delegated::model::DelegateModel; #variant_count] = [
                #(#variant_models),*
            ];

            #vis const #role_const: ::delegated::model::RoleModel =
                ::delegated::model::RoleModel {
                    role: #role_name,
                    id_column: #id_column,
                    type_column: #type_column,
                    variants: &Self::#variants_const,
                };

            #[doc = #ref_doc]
            #[must_use]
            #vis fn #ref_accessor(&self) -> Option<&::delegated::reference::DelegateRef> {
                self.#role_ident.as_ref()
            }

            #[doc = #id_doc]
            #[must_use]
            #vis fn #id_accessor(&self) -> Option<::delegated::types::RecordKey> {
                self.#role_ident
                    .as_ref()
                    .map(::delegated::reference::DelegateRef::key)
            }

            #[doc = #type_doc]
            #[must_use]
            #vis fn #type_accessor(&self) -> Option<&str> {
                self.#role_ident
                    .as_ref()
                    .map(::delegated::reference::DelegateRef::type_name)
            }

            #[doc = #kind_doc]
            #[must_use]
            #vis fn #kind_accessor(&self) -> Option<#kind_ident> {
                self.#type_accessor().and_then(#kind_ident::from_name)
            }

            #[doc = #name_doc]
            #[must_use]
            #vis fn #name_accessor(&self) -> Option<&'static str> {
                self.#kind_accessor().map(#kind_ident::as_str)
            }

            #[doc = #model_doc]
            #[must_use]
            #vis fn #model_accessor(&self) -> Option<&'static ::delegated::model::DelegateModel> {
                self.#kind_accessor().map(#kind_ident::model)
            }

            #[doc = #attach_doc]
            #vis fn #attach(
                &mut self,
                db: &mut ::delegated::db::Database,
                value: impl ::core::convert::Into<#union_ident>,
            ) -> Result<(), ::delegated::error::Error> {
                let reference = value.into().persist(db)?;
                self.#role_ident = Some(reference);

                Ok(())
            }

            #[doc = #detach_doc]
            #vis fn #detach(&mut self) -> Option<::delegated::reference::DelegateRef> {
                self.#role_ident.take()
            }

            #(#per_type)*
        }
    }
}
