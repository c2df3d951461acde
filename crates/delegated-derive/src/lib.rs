use proc_macro::TokenStream;

mod delegate;
mod delegator;
mod inflect;
mod record;

#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    record::derive_record(input.into()).into()
}

#[proc_macro_derive(Delegated, attributes(delegated))]
pub fn derive_delegated(input: TokenStream) -> TokenStream {
    delegator::derive_delegated(input.into()).into()
}

#[proc_macro_derive(Delegate, attributes(delegate))]
pub fn derive_delegate(input: TokenStream) -> TokenStream {
    delegate::derive_delegate(input.into()).into()
}
