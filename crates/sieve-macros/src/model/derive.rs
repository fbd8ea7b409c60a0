//! Implementation of the `#[derive(Model)]` macro.
//!
//! This macro generates an implementation of the `Model` trait and field name
//! constants that filters can use as targets.

use std::collections::HashSet;

use proc_macro2::TokenStream;
use quote::quote;
use syn::{ext::IdentExt, spanned::Spanned, Data, DeriveInput, Error, Fields, Ident, Result};

use super::attrs::parse_model_attrs;

/// Main implementation of the Model derive macro.
pub fn model_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new(
                    input.span(),
                    "Model can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "Model can only be derived for structs",
            ))
        }
    };

    let mut kind_arms: Vec<TokenStream> = Vec::new();
    let mut value_arms: Vec<TokenStream> = Vec::new();
    let mut field_constants: Vec<TokenStream> = Vec::new();
    let mut seen = HashSet::new();

    for field in fields.iter() {
        let field_ident = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;

        let attrs = parse_model_attrs(&field.attrs)?;
        if attrs.skip {
            continue;
        }

        let name = attrs
            .rename
            .unwrap_or_else(|| field_ident.unraw().to_string());
        let const_name = to_screaming_snake_case(&name);

        if !seen.insert(const_name.clone()) {
            return Err(Error::new(
                field.span(),
                format!("model field name '{}' collides with another field", name),
            ));
        }

        let const_ident: Ident = syn::parse_str(&const_name).map_err(|_| {
            Error::new(
                field.span(),
                format!("model field name '{}' is not a valid identifier", name),
            )
        })?;
        let ty = &field.ty;

        field_constants.push(quote! {
            /// Model field name constant, usable as a filter target.
            pub const #const_ident: &'static str = #name;
        });

        kind_arms.push(quote! {
            #name => ::core::option::Option::Some(
                <#ty as ::sieve_compiler::ModelFieldType>::KIND
            ),
        });

        value_arms.push(quote! {
            #name => ::sieve_compiler::ModelFieldType::model_value(&self.#field_ident),
        });
    }

    let expanded = quote! {
        impl #impl_generics #struct_name #ty_generics #where_clause {
            #(#field_constants)*
        }

        impl #impl_generics ::sieve_compiler::Model for #struct_name #ty_generics #where_clause {
            fn field_kind(field: &str) -> ::core::option::Option<::sieve_compiler::FieldKind> {
                match field {
                    #(#kind_arms)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_value(&self, field: &str) -> ::sieve_compiler::Value<'_> {
                match field {
                    #(#value_arms)*
                    _ => ::sieve_compiler::Value::None,
                }
            }
        }
    };

    Ok(expanded)
}

/// Convert a string to SCREAMING_SNAKE_CASE.
fn to_screaming_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_was_lower = false;

    for c in s.chars() {
        if c.is_uppercase() {
            if prev_was_lower {
                result.push('_');
            }
            result.push(c);
            prev_was_lower = false;
        } else if c == '_' || c == '-' {
            result.push('_');
            prev_was_lower = false;
        } else {
            result.push(c.to_ascii_uppercase());
            prev_was_lower = c.is_alphabetic();
        }
    }

    result
}
