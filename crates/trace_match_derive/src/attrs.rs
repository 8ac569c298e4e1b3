use syn::{Attribute, Field, LitStr, Path};

/// `#[cli(...)]` settings on a struct field.
#[derive(Default)]
pub struct CliField {
    pub long: Option<String>,
    pub parse_with: Option<Path>,
    pub flag: bool,
}

impl CliField {
    pub fn from_field(field: &Field) -> syn::Result<Self> {
        let mut out = Self::default();
        for attr in cli_attrs(&field.attrs, "cli") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("long") {
                    let lit: LitStr = meta.value()?.parse()?;
                    out.long = Some(lit.value());
                    return Ok(());
                }
                if meta.path.is_ident("parse_with") {
                    let lit: LitStr = meta.value()?.parse()?;
                    out.parse_with = Some(syn::parse_str(&lit.value())?);
                    return Ok(());
                }
                if meta.path.is_ident("flag") {
                    out.flag = true;
                    return Ok(());
                }
                Err(meta.error("unsupported cli attribute; expected long/parse_with/flag"))
            })?;
        }

        if out.flag && out.parse_with.is_some() {
            return Err(syn::Error::new_spanned(
                field,
                "cli flags are parsed as booleans and cannot use parse_with",
            ));
        }
        Ok(out)
    }
}

/// `#[cli(...)]` settings on an enum variant deriving `CliValue`.
#[derive(Default)]
pub struct CliVariant {
    pub name: Option<String>,
    pub aliases: Vec<String>,
}

impl CliVariant {
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();
        for attr in cli_attrs(attrs, "cli") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    let lit: LitStr = meta.value()?.parse()?;
                    out.name = Some(lit.value());
                    return Ok(());
                }
                if meta.path.is_ident("alias") {
                    let lit: LitStr = meta.value()?.parse()?;
                    out.aliases.push(lit.value());
                    return Ok(());
                }
                Err(meta.error("unsupported cli attribute; expected name/alias"))
            })?;
        }
        Ok(out)
    }
}

/// How a `KvDisplay` field is rendered.
pub enum KvFormat {
    Display,
    Len,
    Path,
    OrDash,
}

/// `#[kv(...)]` settings on a struct field.
pub struct KvField {
    pub key: String,
    pub format: KvFormat,
}

impl KvField {
    pub fn from_field(field: &Field, default_key: String) -> syn::Result<Self> {
        let mut key = default_key;
        let mut format = KvFormat::Display;
        for attr in cli_attrs(&field.attrs, "kv") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    let lit: LitStr = meta.value()?.parse()?;
                    key = lit.value();
                    return Ok(());
                }
                if meta.path.is_ident("fmt") {
                    let lit: LitStr = meta.value()?.parse()?;
                    format = match lit.value().as_str() {
                        "display" => KvFormat::Display,
                        "len" => KvFormat::Len,
                        "path" => KvFormat::Path,
                        "or_dash" => KvFormat::OrDash,
                        other => {
                            return Err(meta.error(format!("unsupported kv fmt mode: {other}")));
                        }
                    };
                    return Ok(());
                }
                Err(meta.error("unsupported kv attribute; expected name/fmt"))
            })?;
        }
        Ok(Self { key, format })
    }
}

/// Single `#[cli_value(option = "...")]` on a `CliValue` enum.
pub fn cli_value_option(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let mut option = None;
    for attr in cli_attrs(attrs, "cli_value") {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("option") {
                let lit: LitStr = meta.value()?.parse()?;
                option = Some(lit.value());
                return Ok(());
            }
            Err(meta.error("unsupported cli_value attribute; expected option = \"...\""))
        })?;
    }
    Ok(option)
}

fn cli_attrs<'a>(attrs: &'a [Attribute], ident: &'a str) -> impl Iterator<Item = &'a Attribute> {
    attrs.iter().filter(move |attr| attr.path().is_ident(ident))
}
