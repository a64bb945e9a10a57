//! Named-field collection shared by both derives.

use std::collections::HashMap;

use heck::ToLowerCamelCase;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, Result};

use crate::attrs::{FieldAttrs, parse_field_attrs};

pub(crate) struct FieldSpec<'a> {
    pub ident: &'a syn::Ident,
    pub ty: &'a syn::Type,
    pub attrs: FieldAttrs,
    /// Property name: `rename`, else the lowerCamelCase field name
    pub property: String,
}

pub(crate) fn collect<'a>(input: &'a DeriveInput, derive: &str) -> Result<Vec<FieldSpec<'a>>> {
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            format!("{derive} cannot be derived for generic structs"),
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    format!("{derive} can only be derived for structs with named fields"),
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                format!("{derive} can only be derived for structs"),
            ));
        }
    };

    let mut out = Vec::with_capacity(fields.len());
    let mut seen: HashMap<String, &syn::Ident> = HashMap::with_capacity(fields.len());

    for field in fields {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let attrs = parse_field_attrs(field)?;
        let property = match &attrs.rename {
            Some(name) => name.clone(),
            None => ident.unraw().to_string().to_lower_camel_case(),
        };
        if let Some(previous) = seen.insert(property.clone(), ident) {
            return Err(syn::Error::new_spanned(
                ident,
                format!("property name '{property}' is already used by field `{previous}`"),
            ));
        }
        out.push(FieldSpec {
            ident,
            ty: &field.ty,
            attrs,
            property,
        });
    }

    Ok(out)
}

/// Find a field by property name or by Rust field name.
pub(crate) fn find<'s, 'a>(fields: &'s [FieldSpec<'a>], name: &str) -> Option<&'s FieldSpec<'a>> {
    fields
        .iter()
        .find(|f| f.property == name)
        .or_else(|| fields.iter().find(|f| f.ident.unraw() == name))
}
