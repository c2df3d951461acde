use crate::inflect;
use darling::{FromDeriveInput, util::path_to_string};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{DeriveInput, Ident};

///
/// DelegateInput
///
/// `#[delegate(role = "entryable", owner = Entry)]`, with an optional
/// `touch` flag. The marker half of a delegated-type declaration.
///

#[derive(FromDeriveInput)]
#[darling(attributes(delegate), supports(struct_named))]
struct DelegateInput {
    ident: Ident,

    role: String,
    owner: syn::Path,

    #[darling(default)]
    touch: bool,
}

pub fn derive_delegate(input: TokenStream) -> TokenStream {
    match expand(input) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error(),
    }
}

fn expand(input: TokenStream) -> Result<TokenStream, syn::Error> {
    let input: DeriveInput = syn::parse2(input)?;
    let marker = DelegateInput::from_derive_input(&input).map_err(syn::Error::from)?;
    let vis = &input.vis;

    let ident = &marker.ident;
    let owner = &marker.owner;
    let role = &marker.role;
    let touch = marker.touch;

    let role_ident = syn::parse_str::<Ident>(role).map_err(|_| {
        syn::Error::new_spanned(
            ident,
            format!("role '{role}' is not a valid field identifier"),
        )
    })?;

    let type_name = inflect::type_name(&ident.to_string());

    // Reverse accessor is named after the owner type.
    let owner_ident = owner.segments.last().map_or_else(
        || {
            Err(syn::Error::new_spanned(
                owner,
                format!("owner path '{}' has no type name", path_to_string(owner)),
            ))
        },
        |segment| Ok(segment.ident.clone()),
    )?;
    let owner_accessor = format_ident!("{}", inflect::type_name(&owner_ident.to_string()));

    let reverse_doc = format!("The `{owner_ident}` this row is attached to, if any.");
    let save_doc = if touch {
        "Save changes to this row, touching the owning record's timestamp.".to_string()
    } else {
        "Save changes to this row.".to_string()
    };

    Ok(quote! {
        impl ::delegated::traits::Delegate for #ident {
            type Owner = #owner;

            const TYPE_NAME: &'static str = #type_name;
            const ROLE: &'static str = #role;
            const TOUCH: bool = #touch;
        }

        impl #ident {
            #[doc = #reverse_doc]
            #[must_use]
            #vis fn #owner_accessor(
                &self,
                db: &::delegated::db::Database,
            ) -> Option<#owner> {
                db.reverse_one::<#owner>(
                    #owner::#role_ident,
                    <Self as ::delegated::traits::Delegate>::TYPE_NAME,
                    ::delegated::traits::Record::key(self),
                )
            }

            #[doc = #save_doc]
            #vis fn save(
                &self,
                db: &mut ::delegated::db::Database,
            ) -> Result<(), ::delegated::error::Error> {
                db.save_delegate(self, #owner::#role_ident)
                    .map_err(::delegated::error::Error::from)
            }
        }
    })
}
