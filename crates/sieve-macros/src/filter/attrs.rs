//! Attribute parsing for the Filter derive macro.
//!
//! Two forms share the `filter` attribute name:
//!
//! - struct level: `#[filter(model = TaskModel)]`
//! - field level: `#[filter]` or `#[filter(key = value, flag, ...)]`

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Error, Ident, Lit, LitStr, Meta, Result, Token, Type,
};

/// Struct-level attributes from `#[filter(model = ...)]`.
pub struct StructAttr {
    /// The model type the filter targets.
    pub model: Type,
}

impl Parse for StructAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let key: Ident = input.parse()?;
        if key != "model" {
            return Err(Error::new(
                key.span(),
                "unknown filter attribute. Expected: model = Type",
            ));
        }
        input.parse::<Token![=]>()?;
        let model: Type = input.parse()?;
        if !input.is_empty() {
            input.parse::<Token![,]>()?;
        }
        if !input.is_empty() {
            return Err(input.error("unexpected tokens after model type"));
        }
        Ok(StructAttr { model })
    }
}

/// Extract the `#[filter(model = ...)]` attribute from a struct.
pub fn parse_struct_attr(attrs: &[Attribute], span: Span) -> Result<StructAttr> {
    for attr in attrs {
        if attr.path().is_ident("filter") {
            return attr.parse_args::<StructAttr>();
        }
    }
    Err(Error::new(
        span,
        "Filter requires a struct attribute naming the model: #[filter(model = Type)]",
    ))
}

macro_rules! keyword_arg {
    (
        $(#[$doc:meta])*
        $name:ident, $runtime:ident, $what:literal {
            $($variant:ident => [$($alias:literal),+]),+ $(,)?
        }
    ) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Parse from a string literal, accepting the runtime aliases.
            pub fn from_str(s: &str, span: Span) -> Result<Self> {
                match s.to_ascii_lowercase().as_str() {
                    $($($alias)|+ => Ok($name::$variant),)+
                    _ => Err(Error::new(
                        span,
                        format!(
                            concat!("unknown ", $what, ": '{}'. Expected one of: {}"),
                            s,
                            [$($($alias),+),+].join(", ")
                        ),
                    )),
                }
            }

            /// The runtime value this argument stands for.
            pub fn to_tokens(self) -> TokenStream {
                match self {
                    $($name::$variant => quote! { ::sieve_compiler::$runtime::$variant },)+
                }
            }
        }
    };
}

keyword_arg! {
    /// `case = "..."`
    CaseArg, Case, "case sensitivity" {
        Sensitive => ["sensitive", "case_sensitive"],
        Insensitive => ["insensitive", "case_insensitive", "ignore_case"],
    }
}

keyword_arg! {
    /// `method = "..."`
    MethodArg, TextMatch, "text comparison method" {
        Equals => ["equals", "eq"],
        Contains => ["contains"],
    }
}

keyword_arg! {
    /// `op = "..."`
    OpArg, DateOp, "comparison operation" {
        Equality => ["equality", "eq", "=="],
        Inequality => ["inequality", "ne", "!="],
        LessThan => ["less_than", "lt", "<"],
        LessThanOrEqual => ["less_than_or_equal", "lte", "<="],
        GreaterThan => ["greater_than", "gt", ">"],
        GreaterThanOrEqual => ["greater_than_or_equal", "gte", ">="],
    }
}

keyword_arg! {
    /// `logic = "..."`
    LogicArg, Logic, "logical operation" {
        And => ["and", "&&"],
        Or => ["or", "||"],
    }
}

/// Field-level attributes from `#[filter(...)]`.
#[derive(Debug, Clone)]
pub struct FieldAttr {
    /// Model field name, when it differs from the filter field name.
    pub target: Option<String>,
    pub case: Option<CaseArg>,
    pub method: Option<MethodArg>,
    pub op: Option<OpArg>,
    pub logic: Option<LogicArg>,
    pub ignore_if_empty: Option<bool>,
    pub skip_synthesis: bool,
    /// The field holds the filter's `Paging`.
    pub paging: bool,
    /// The span for error reporting.
    pub span: Span,
}

impl Default for FieldAttr {
    fn default() -> Self {
        FieldAttr {
            target: None,
            case: None,
            method: None,
            op: None,
            logic: None,
            ignore_if_empty: None,
            skip_synthesis: false,
            paging: false,
            span: Span::call_site(),
        }
    }
}

impl FieldAttr {
    /// Returns `true` if any matching rule is set.
    pub fn has_rules(&self) -> bool {
        self.target.is_some()
            || self.case.is_some()
            || self.method.is_some()
            || self.op.is_some()
            || self.logic.is_some()
            || self.ignore_if_empty.is_some()
            || self.skip_synthesis
    }
}

fn lit_str(value: &syn::Expr, key: &str) -> Result<LitStr> {
    match value {
        syn::Expr::Lit(syn::ExprLit {
            lit: Lit::Str(s), ..
        }) => Ok(s.clone()),
        _ => Err(Error::new(
            value.span(),
            format!("{} must be a string literal", key),
        )),
    }
}

fn lit_bool(value: &syn::Expr, key: &str) -> Result<bool> {
    match value {
        syn::Expr::Lit(syn::ExprLit {
            lit: Lit::Bool(b), ..
        }) => Ok(b.value),
        _ => Err(Error::new(
            value.span(),
            format!("{} must be true or false", key),
        )),
    }
}

impl Parse for FieldAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = FieldAttr {
            span: input.span(),
            ..FieldAttr::default()
        };

        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            match &meta {
                // Flags: skip_synthesis, paging, ignore_if_empty
                Meta::Path(p) => {
                    if p.is_ident("skip_synthesis") {
                        attr.skip_synthesis = true;
                    } else if p.is_ident("paging") {
                        attr.paging = true;
                    } else if p.is_ident("ignore_if_empty") {
                        attr.ignore_if_empty = Some(true);
                    } else {
                        return Err(Error::new(
                            p.span(),
                            "unknown filter flag. Expected: skip_synthesis, paging, or ignore_if_empty",
                        ));
                    }
                }

                Meta::NameValue(nv) => {
                    let key = nv
                        .path
                        .get_ident()
                        .map(|i| i.to_string())
                        .unwrap_or_default();

                    match key.as_str() {
                        "target" => {
                            let s = lit_str(&nv.value, "target")?;
                            if s.value().is_empty() {
                                return Err(Error::new(s.span(), "target must not be empty"));
                            }
                            attr.target = Some(s.value());
                        }
                        "case" => {
                            let s = lit_str(&nv.value, "case")?;
                            attr.case = Some(CaseArg::from_str(&s.value(), s.span())?);
                        }
                        "method" => {
                            let s = lit_str(&nv.value, "method")?;
                            attr.method = Some(MethodArg::from_str(&s.value(), s.span())?);
                        }
                        "op" => {
                            let s = lit_str(&nv.value, "op")?;
                            attr.op = Some(OpArg::from_str(&s.value(), s.span())?);
                        }
                        "logic" => {
                            let s = lit_str(&nv.value, "logic")?;
                            attr.logic = Some(LogicArg::from_str(&s.value(), s.span())?);
                        }
                        "ignore_if_empty" => {
                            attr.ignore_if_empty = Some(lit_bool(&nv.value, "ignore_if_empty")?);
                        }
                        "skip_synthesis" => {
                            attr.skip_synthesis = lit_bool(&nv.value, "skip_synthesis")?;
                        }
                        _ => {
                            return Err(Error::new(
                                nv.path.span(),
                                "unknown filter attribute. Expected: target, case, method, op, logic, ignore_if_empty, or skip_synthesis",
                            ));
                        }
                    }
                }

                _ => {
                    return Err(Error::new(
                        meta.span(),
                        "unknown filter attribute. Expected key = \"value\" pairs or flags",
                    ));
                }
            }
        }

        if attr.paging && attr.has_rules() {
            return Err(Error::new(
                attr.span,
                "a paging field takes no other filter attributes",
            ));
        }

        Ok(attr)
    }
}

/// Extract the `#[filter(...)]` attribute from a field.
///
/// Returns `None` for fields without one; those are invisible to the
/// compiler. A bare `#[filter]` yields the default rules.
pub fn parse_field_attr(attrs: &[Attribute]) -> Result<Option<FieldAttr>> {
    for attr in attrs {
        if attr.path().is_ident("filter") {
            if let Meta::Path(p) = &attr.meta {
                return Ok(Some(FieldAttr {
                    span: p.span(),
                    ..FieldAttr::default()
                }));
            }
            return attr.parse_args::<FieldAttr>().map(Some);
        }
    }
    Ok(None)
}
