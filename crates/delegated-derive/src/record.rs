use darling::{FromDeriveInput, FromField, ast::Data, util::Ignored};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Ident};

///
/// RecordInput
///

#[derive(FromDeriveInput)]
#[darling(attributes(record), supports(struct_named))]
struct RecordInput {
    ident: Ident,
    data: Data<Ignored, RecordField>,
}

///
/// RecordField
///

#[derive(FromField)]
#[darling(attributes(record))]
struct RecordField {
    ident: Option<Ident>,

    /// Marks the primary key field; defaults to a field named `id`.
    #[darling(default)]
    pk: bool,
}

pub fn derive_record(input: TokenStream) -> TokenStream {
    match expand(input) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error(),
    }
}

fn expand(input: TokenStream) -> Result<TokenStream, syn::Error> {
    let input: DeriveInput = syn::parse2(input)?;
    let record = RecordInput::from_derive_input(&input).map_err(syn::Error::from)?;

    let ident = &record.ident;
    let fields = record
        .data
        .take_struct()
        .map(|fields| fields.fields)
        .unwrap_or_default();

    let pk = primary_key_field(ident, &fields)?;

    // `updated_at` is a system field: when present, the store's clock is
    // written through `touch`.
    let touch = fields
        .iter()
        .filter_map(|field| field.ident.as_ref())
        .find(|field_ident| *field_ident == "updated_at")
        .map(|field_ident| {
            quote! {
                fn touch(&mut self, now: ::delegated::types::Timestamp) {
                    self.#field_ident = now;
                }
            }
        });

    Ok(quote! {
        impl ::delegated::traits::Path for #ident {
            const PATH: &'static str = concat!(module_path!(), "::", stringify!(#ident));
        }

        impl ::delegated::traits::Record for #ident {
            const RECORD_NAME: &'static str = stringify!(#ident);

            fn key(&self) -> ::delegated::types::RecordKey {
                self.#pk
            }

            fn set_key(&mut self, key: ::delegated::types::RecordKey) {
                self.#pk = key;
            }

            #touch
        }
    })
}

// Resolve the primary key: one `#[record(pk)]` field, or the `id` field.
fn primary_key_field(ident: &Ident, fields: &[RecordField]) -> Result<Ident, syn::Error> {
    let mut marked = fields.iter().filter(|field| field.pk);

    if let Some(field) = marked.next() {
        if marked.next().is_some() {
            return Err(syn::Error::new_spanned(
                ident,
                "at most one field may be marked #[record(pk)]",
            ));
        }
        return field.ident.clone().ok_or_else(|| {
            syn::Error::new_spanned(ident, "#[record(pk)] requires a named field")
        });
    }

    fields
        .iter()
        .filter_map(|field| field.ident.clone())
        .find(|field_ident| field_ident == "id")
        .ok_or_else(|| {
            syn::Error::new_spanned(
                ident,
                "Record requires a primary key: mark a field #[record(pk)] or declare an `id` field",
            )
        })
}
