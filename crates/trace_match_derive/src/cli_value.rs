use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr, parse_macro_input, spanned::Spanned};

use crate::{
    attrs::{CliVariant, cli_value_option},
    utils,
};

pub fn derive_cli_value_inner(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    let enum_ident = input.ident.clone();

    let Data::Enum(data_enum) = input.data else {
        return syn::Error::new(input.span(), "CliValue can only be derived for enums")
            .to_compile_error()
            .into();
    };

    let option_name = match cli_value_option(&input.attrs) {
        Ok(Some(name)) => name,
        Ok(None) => utils::to_kebab_case(&enum_ident.to_string()),
        Err(err) => return err.to_compile_error().into(),
    };

    let mut parse_arms = Vec::new();
    let mut display_arms = Vec::new();
    let mut expected_values = Vec::new();

    for variant in data_enum.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return syn::Error::new(
                variant.span(),
                "CliValue only supports enums with unit variants",
            )
            .to_compile_error()
            .into();
        }

        let settings = match CliVariant::from_attrs(&variant.attrs) {
            Ok(settings) => settings,
            Err(err) => return err.to_compile_error().into(),
        };
        let variant_ident = variant.ident;
        let canonical = settings
            .name
            .unwrap_or_else(|| utils::to_kebab_case(&variant_ident.to_string()));

        expected_values.push(canonical.clone());
        let accepted: Vec<LitStr> = std::iter::once(&canonical)
            .chain(settings.aliases.iter())
            .map(|v| LitStr::new(v, Span::call_site()))
            .collect();
        let canonical_lit = LitStr::new(&canonical, Span::call_site());

        parse_arms.push(quote! {
            #(#accepted)|* => Ok(Self::#variant_ident),
        });
        display_arms.push(quote! {
            Self::#variant_ident => #canonical_lit,
        });
    }

    let expected_lit = LitStr::new(&expected_values.join("|"), Span::call_site());
    let option_lit = LitStr::new(&option_name, Span::call_site());

    let expanded = quote! {
        impl #enum_ident {
            pub fn parse(raw: &str) -> crate::Result<Self> {
                match raw.to_ascii_lowercase().as_str() {
                    #(#parse_arms)*
                    _ => Err(crate::Error::invalid_input(format!(
                        "Invalid value for --{}: {} (expected {})",
                        #option_lit,
                        raw,
                        #expected_lit
                    ))),
                }
            }
        }

        impl std::fmt::Display for #enum_ident {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let value = match self {
                    #(#display_arms)*
                };
                f.write_str(value)
            }
        }
    };

    TokenStream::from(expanded)
}
