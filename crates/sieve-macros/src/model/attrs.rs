//! Attribute parsing for the Model derive macro.

use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Error, Lit, Meta, Result, Token,
};

/// Field-level attributes from `#[model(...)]`.
#[derive(Debug, Clone, Default)]
pub struct ModelAttr {
    /// Leave the field out of the model.
    pub skip: bool,
    /// Name used by filters (default: field name).
    pub rename: Option<String>,
}

impl Parse for ModelAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = ModelAttr::default();

        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            match &meta {
                Meta::Path(p) if p.is_ident("skip") => attr.skip = true,

                Meta::NameValue(nv) if nv.path.is_ident("rename") => {
                    if let syn::Expr::Lit(syn::ExprLit {
                        lit: Lit::Str(s), ..
                    }) = &nv.value
                    {
                        if s.value().is_empty() {
                            return Err(Error::new(s.span(), "rename must not be empty"));
                        }
                        attr.rename = Some(s.value());
                    } else {
                        return Err(Error::new(
                            nv.value.span(),
                            "rename must be a string literal",
                        ));
                    }
                }

                _ => {
                    return Err(Error::new(
                        meta.span(),
                        "unknown model attribute. Expected: skip or rename = \"...\"",
                    ));
                }
            }
        }

        Ok(attr)
    }
}

/// Extract `#[model(...)]` attributes from a field's attributes.
pub fn parse_model_attrs(attrs: &[Attribute]) -> Result<ModelAttr> {
    for attr in attrs {
        if attr.path().is_ident("model") {
            return attr.parse_args::<ModelAttr>();
        }
    }
    Ok(ModelAttr::default())
}
