//! `#[orm(...)]` attribute parsing shared by the `Entity` and `SortSpec` derives.
//!
//! Both derives read the same attribute, so every key either of them knows is
//! accepted here and each derive picks the parts it needs.

use syn::punctuated::Punctuated;
use syn::{DeriveInput, LitStr, Meta, Result, Token};

use crate::sql_ident::{parse_sql_ident, parse_table_name};

/// Struct-level attributes.
#[derive(Default)]
pub(crate) struct StructAttrs {
    pub table: Option<String>,
}

/// Predicate tag requested on a field.
pub(crate) enum TagAttr {
    Transient,
    Like,
    Between { min: LitStr, max: LitStr },
    In { values: LitStr },
}

/// Field-level attributes.
#[derive(Default)]
pub(crate) struct FieldAttrs {
    pub tag: Option<TagAttr>,
    pub rename: Option<String>,
    pub column: Option<String>,
    pub sidx: bool,
    pub sord: bool,
}

fn lit_str(value: &syn::Expr, key: &str) -> Result<LitStr> {
    if let syn::Expr::Lit(syn::ExprLit {
        lit: syn::Lit::Str(lit),
        ..
    }) = value
    {
        return Ok(lit.clone());
    }
    Err(syn::Error::new_spanned(
        value,
        format!("orm({key} = \"...\") expects a string literal"),
    ))
}

fn orm_items(attr: &syn::Attribute) -> Result<Punctuated<Meta, Token![,]>> {
    attr.parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)
}

pub(crate) fn parse_struct_attrs(input: &DeriveInput) -> Result<StructAttrs> {
    let mut out = StructAttrs::default();

    for attr in &input.attrs {
        if !attr.path().is_ident("orm") {
            continue;
        }
        for meta in orm_items(attr)? {
            let Meta::NameValue(nv) = meta else {
                return Err(syn::Error::new_spanned(
                    meta,
                    "unsupported struct attribute (supported: table = \"...\")",
                ));
            };
            if !nv.path.is_ident("table") {
                return Err(syn::Error::new_spanned(
                    nv.path,
                    "unknown struct attribute (supported: table = \"...\")",
                ));
            }
            if out.table.is_some() {
                return Err(syn::Error::new_spanned(
                    nv,
                    "table can only be specified once",
                ));
            }
            let lit = lit_str(&nv.value, "table")?;
            out.table = Some(parse_table_name(&lit)?);
        }
    }

    Ok(out)
}

pub(crate) fn parse_field_attrs(field: &syn::Field) -> Result<FieldAttrs> {
    let mut out = FieldAttrs::default();

    let mut set_tag = |tag: TagAttr, span: &dyn quote::ToTokens| -> Result<()> {
        if out.tag.is_some() {
            return Err(syn::Error::new_spanned(
                span,
                "only one of transient, like, between(...) or in_list(...) per field",
            ));
        }
        out.tag = Some(tag);
        Ok(())
    };

    let mut rename = None;
    let mut column = None;
    let mut sidx = false;
    let mut sord = false;

    for attr in &field.attrs {
        if !attr.path().is_ident("orm") {
            continue;
        }

        for meta in orm_items(attr)? {
            match &meta {
                Meta::Path(p) if p.is_ident("transient") => set_tag(TagAttr::Transient, p)?,
                Meta::Path(p) if p.is_ident("like") => set_tag(TagAttr::Like, p)?,
                Meta::Path(p) if p.is_ident("sidx") => sidx = true,
                Meta::Path(p) if p.is_ident("sord") => sord = true,
                Meta::NameValue(nv) if nv.path.is_ident("rename") => {
                    if rename.is_some() {
                        return Err(syn::Error::new_spanned(nv, "rename can only be specified once"));
                    }
                    let lit = lit_str(&nv.value, "rename")?;
                    rename = Some(parse_sql_ident(&lit, "rename")?);
                }
                Meta::NameValue(nv) if nv.path.is_ident("column") => {
                    if column.is_some() {
                        return Err(syn::Error::new_spanned(nv, "column can only be specified once"));
                    }
                    let lit = lit_str(&nv.value, "column")?;
                    column = Some(parse_sql_ident(&lit, "column")?);
                }
                Meta::List(list) if list.path.is_ident("between") => {
                    let mut min = None;
                    let mut max = None;
                    let args = list.parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)?;
                    for arg in args {
                        let Meta::NameValue(nv) = &arg else {
                            return Err(syn::Error::new_spanned(
                                arg,
                                "between(...) expects min = \"...\", max = \"...\"",
                            ));
                        };
                        if nv.path.is_ident("min") {
                            min = Some(lit_str(&nv.value, "min")?);
                        } else if nv.path.is_ident("max") {
                            max = Some(lit_str(&nv.value, "max")?);
                        } else {
                            return Err(syn::Error::new_spanned(
                                &nv.path,
                                "unknown between(...) argument (supported: min, max)",
                            ));
                        }
                    }
                    let (Some(min), Some(max)) = (min, max) else {
                        return Err(syn::Error::new_spanned(
                            list,
                            "between(...) requires both min and max",
                        ));
                    };
                    set_tag(TagAttr::Between { min, max }, list)?;
                }
                Meta::List(list) if list.path.is_ident("in_list") => {
                    let nv: syn::MetaNameValue = list.parse_args()?;
                    if !nv.path.is_ident("values") {
                        return Err(syn::Error::new_spanned(
                            nv.path,
                            "in_list(...) expects values = \"...\"",
                        ));
                    }
                    let values = lit_str(&nv.value, "values")?;
                    set_tag(TagAttr::In { values }, list)?;
                }
                other => {
                    return Err(syn::Error::new_spanned(
                        other,
                        "unknown orm attribute (supported: transient, like, between(min, max), \
                         in_list(values), rename, column, sidx, sord)",
                    ));
                }
            }
        }
    }

    out.rename = rename;
    out.column = column;
    out.sidx = sidx;
    out.sord = sord;
    Ok(out)
}
