//! Implementation of the `#[derive(Filter)]` macro.
//!
//! This macro builds the static, ordered field table of a filter type and the
//! accessor that reads annotated field values.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{ext::IdentExt, spanned::Spanned, Data, DeriveInput, Error, Fields, Result};

use super::attrs::{parse_field_attr, parse_struct_attr, FieldAttr};

/// Main implementation of the Filter derive macro.
pub fn filter_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new(
                    input.span(),
                    "Filter can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "Filter can only be derived for structs",
            ))
        }
    };

    let model = parse_struct_attr(&input.attrs, struct_name.span())?.model;

    let mut rows: Vec<TokenStream> = Vec::new();
    let mut value_arms: Vec<TokenStream> = Vec::new();
    let mut paging: Option<TokenStream> = None;

    for field in fields.iter() {
        let field_ident = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;

        let attr = match parse_field_attr(&field.attrs)? {
            Some(attr) => attr,
            None => continue,
        };

        if attr.paging {
            if paging.is_some() {
                return Err(Error::new(
                    field.span(),
                    "only one field can be marked #[filter(paging)]",
                ));
            }
            paging = Some(quote! {
                fn paging(&self) -> ::sieve_compiler::Paging {
                    self.#field_ident
                }
            });
            continue;
        }

        let name = field_ident.unraw().to_string();
        let ty = &field.ty;
        let meta = meta_tokens(&attr);

        rows.push(quote! {
            ::sieve_compiler::FilterField::new(
                #name,
                <#ty as ::sieve_compiler::FilterFieldType>::KIND,
                #meta,
            )
        });

        value_arms.push(quote! {
            #name => ::sieve_compiler::FilterFieldType::filter_value(&self.#field_ident),
        });
    }

    if rows.is_empty() {
        return Err(Error::new(
            struct_name.span(),
            "Filter requires at least one field marked #[filter]",
        ));
    }

    let expanded = quote! {
        impl #impl_generics ::sieve_compiler::Filter for #struct_name #ty_generics #where_clause {
            type Model = #model;

            const FIELDS: &'static [::sieve_compiler::FilterField] = &[
                #(#rows),*
            ];

            fn filter_value(&self, field: &str) -> ::sieve_compiler::FilterValue<'_> {
                match field {
                    #(#value_arms)*
                    _ => ::sieve_compiler::FilterValue::None,
                }
            }

            #paging
        }
    };

    Ok(expanded)
}

/// Builds the `FieldMeta` constant for a field, chaining only the rules the
/// attribute sets.
fn meta_tokens(attr: &FieldAttr) -> TokenStream {
    let mut meta = quote! { ::sieve_compiler::FieldMeta::new() };

    if let Some(target) = &attr.target {
        meta = quote! { #meta.target(#target) };
    }
    if let Some(case) = attr.case {
        let case = case.to_tokens();
        meta = quote! { #meta.case(#case) };
    }
    if let Some(method) = attr.method {
        let method = method.to_tokens();
        meta = quote! { #meta.text_match(#method) };
    }
    if let Some(op) = attr.op {
        let op = op.to_tokens();
        meta = quote! { #meta.date_op(#op) };
    }
    if let Some(logic) = attr.logic {
        let logic = logic.to_tokens();
        meta = quote! { #meta.logic(#logic) };
    }
    if attr.skip_synthesis {
        meta = quote! { #meta.skip_synthesis(true) };
    }
    if let Some(ignore) = attr.ignore_if_empty {
        meta = quote! { #meta.ignore_if_empty(#ignore) };
    }

    meta
}
