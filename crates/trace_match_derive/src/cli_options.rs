use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr, parse_macro_input, spanned::Spanned};

use crate::{attrs::CliField, utils};

pub fn derive_cli_options_inner(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    let struct_ident = input.ident.clone();

    let Data::Struct(data_struct) = &input.data else {
        return syn::Error::new(input.span(), "CliOptions can only be derived for structs")
            .to_compile_error()
            .into();
    };

    let Fields::Named(fields) = &data_struct.fields else {
        return syn::Error::new(input.span(), "CliOptions requires named fields")
            .to_compile_error()
            .into();
    };

    let mut arms = Vec::new();
    let mut flag_names = Vec::new();

    for field in &fields.named {
        let Some(field_ident) = &field.ident else {
            continue;
        };
        let cli = match CliField::from_field(field) {
            Ok(cli) => cli,
            Err(err) => return err.to_compile_error().into(),
        };
        let Some(long_name) = cli.long else {
            continue;
        };
        let long_lit = LitStr::new(&long_name, Span::call_site());

        if cli.flag {
            let negated_lit = LitStr::new(&format!("no-{long_name}"), Span::call_site());
            flag_names.push(long_lit.clone());
            flag_names.push(negated_lit.clone());

            arms.push(quote! {
                #long_lit => {
                    self.#field_ident = match value {
                        Some(raw) => Self::parse_cli_bool(name, &raw)?,
                        None => true,
                    };
                    Ok(true)
                }
            });
            arms.push(quote! {
                #negated_lit => {
                    if value.is_some() {
                        return Err(crate::Error::invalid_input(format!(
                            "Flag --{name} does not take a value"
                        )));
                    }
                    self.#field_ident = false;
                    Ok(true)
                }
            });
            continue;
        }

        let parse_expr = utils::build_cli_parse_expr(&field.ty, cli.parse_with.as_ref());
        arms.push(quote! {
            #long_lit => {
                let raw = value.ok_or_else(|| {
                    crate::Error::invalid_input(format!("Missing value for --{name}"))
                })?;
                self.#field_ident = #parse_expr;
                Ok(true)
            }
        });
    }

    let flag_check = if flag_names.is_empty() {
        quote! { false }
    } else {
        quote! { matches!(name, #(#flag_names)|*) }
    };

    let expanded = quote! {
        impl #struct_ident {
            #[allow(unused_variables)]
            fn is_cli_flag(name: &str) -> bool {
                #flag_check
            }

            /// Splits `--name=value` or `--name value`. Flags never consume
            /// the following argument.
            fn split_arg(
                raw_name: &str,
                args: &mut std::iter::Peekable<impl Iterator<Item = String>>,
            ) -> (String, Option<String>) {
                if let Some((k, v)) = raw_name.split_once('=') {
                    return (k.to_string(), Some(v.to_string()));
                }

                if Self::is_cli_flag(raw_name) {
                    return (raw_name.to_string(), None);
                }

                let value = match args.peek() {
                    Some(next) if !next.starts_with("--") => args.next(),
                    _ => None,
                };

                (raw_name.to_string(), value)
            }

            fn parse_cli_bool(name: &str, raw: &str) -> crate::Result<bool> {
                match raw.to_ascii_lowercase().as_str() {
                    "1" | "true" | "yes" | "on" => Ok(true),
                    "0" | "false" | "no" | "off" => Ok(false),
                    _ => Err(crate::Error::invalid_input(format!(
                        "Invalid boolean for --{name}: {raw} (expected true/false)"
                    ))),
                }
            }

            fn apply_cli_option(
                &mut self,
                name: &str,
                value: Option<String>,
            ) -> crate::Result<bool> {
                match name {
                    #(#arms,)*
                    _ => Ok(false),
                }
            }
        }
    };

    TokenStream::from(expanded)
}
