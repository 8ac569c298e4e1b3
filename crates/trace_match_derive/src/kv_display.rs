use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr, parse_macro_input, spanned::Spanned};

use crate::attrs::{KvField, KvFormat};

pub fn derive_kv_display_inner(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    let struct_ident = input.ident.clone();

    let Data::Struct(data_struct) = &input.data else {
        return syn::Error::new(input.span(), "KvDisplay can only be derived for structs")
            .to_compile_error()
            .into();
    };

    let Fields::Named(fields) = &data_struct.fields else {
        return syn::Error::new(input.span(), "KvDisplay requires named fields")
            .to_compile_error()
            .into();
    };

    let mut keys = Vec::new();
    let mut vals = Vec::new();

    for field in &fields.named {
        let Some(field_ident) = &field.ident else {
            continue;
        };
        let kv = match KvField::from_field(field, field_ident.to_string()) {
            Ok(kv) => kv,
            Err(err) => return err.to_compile_error().into(),
        };

        keys.push(kv.key);
        vals.push(match kv.format {
            KvFormat::Display => quote! { &self.#field_ident },
            KvFormat::Len => quote! { &self.#field_ident.len() },
            KvFormat::Path => quote! { &self.#field_ident.display() },
            KvFormat::OrDash => quote! {
                &if self.#field_ident.is_empty() { "-" } else { self.#field_ident.as_str() }
            },
        });
    }

    let width = keys.iter().map(String::len).max().unwrap_or(0);
    let lines: Vec<String> = keys
        .iter()
        .map(|key| format!("\t{key:<width$} = {{}}"))
        .collect();
    let format_lit = LitStr::new(&format!("\n{}", lines.join("\n")), Span::call_site());

    let expanded = quote! {
        impl std::fmt::Display for #struct_ident {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, #format_lit, #(#vals),*)
            }
        }
    };

    TokenStream::from(expanded)
}
