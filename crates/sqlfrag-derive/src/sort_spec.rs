//! SortSpec derive macro implementation.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Result};

use crate::common::syn_types::{TextShape, text_shape};
use crate::fields::{self, FieldSpec};

/// Pick the field marked `#[orm(<marker>)]`, falling back to one named `<marker>`.
fn pick<'s, 'a>(
    input: &DeriveInput,
    fields: &'s [FieldSpec<'a>],
    marker: &str,
    marked: impl Fn(&FieldSpec<'a>) -> bool,
) -> Result<&'s FieldSpec<'a>> {
    let mut tagged = fields.iter().filter(|f| marked(*f));
    if let Some(first) = tagged.next() {
        if let Some(second) = tagged.next() {
            return Err(syn::Error::new_spanned(
                second.ident,
                format!("only one field may be marked #[orm({marker})]"),
            ));
        }
        return Ok(first);
    }
    fields.iter().find(|f| f.ident == marker).ok_or_else(|| {
        syn::Error::new_spanned(
            &input.ident,
            format!("SortSpec requires a `{marker}` field or a field marked #[orm({marker})]"),
        )
    })
}

fn accessor(field: &FieldSpec<'_>) -> Result<TokenStream> {
    let ident = field.ident;
    match text_shape(field.ty) {
        Some(TextShape::Owned) => Ok(quote!(::std::option::Option::Some(self.#ident.as_str()))),
        Some(TextShape::Optional) => Ok(quote!(self.#ident.as_deref())),
        None => Err(syn::Error::new_spanned(
            field.ty,
            "sort fields must be String or Option<String>",
        )),
    }
}

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let fields = fields::collect(&input, "SortSpec")?;

    let sidx = accessor(pick(&input, &fields, "sidx", |f| f.attrs.sidx)?)?;
    let sord = accessor(pick(&input, &fields, "sord", |f| f.attrs.sord)?)?;
    let properties = fields.iter().map(|f| f.property.as_str());
    let columns = fields.iter().filter_map(|f| {
        let property = &f.property;
        f.attrs
            .column
            .as_ref()
            .map(|column| quote!((#property, #column)))
    });

    Ok(quote! {
        impl ::sqlfrag::SortSpec for #name {
            const PROPERTIES: &'static [&'static str] = &[#(#properties),*];
            const COLUMNS: &'static [(&'static str, &'static str)] = &[#(#columns),*];

            fn sort_field(&self) -> ::std::option::Option<&str> {
                #sidx
            }

            fn sort_order(&self) -> ::std::option::Option<&str> {
                #sord
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn requires_sort_fields() {
        let input: DeriveInput = parse_quote! {
            struct UserVo { user_name: Option<String>, sidx: Option<String> }
        };
        let err = expand(input).unwrap_err();
        assert!(err.to_string().contains("sord"));
    }

    #[test]
    fn marked_fields_win_over_names() {
        let input: DeriveInput = parse_quote! {
            struct UserVo {
                #[orm(sidx)]
                sort_by: String,
                #[orm(sord)]
                direction: Option<String>,
                sidx: Option<String>,
            }
        };
        let tokens = expand(input).unwrap().to_string();
        assert!(tokens.contains("self . sort_by . as_str ()"));
        assert!(tokens.contains("self . direction . as_deref ()"));
        assert!(tokens.contains("\"sortBy\""));
    }

    #[test]
    fn column_overrides_are_emitted() {
        let input: DeriveInput = parse_quote! {
            struct RoleVo {
                #[orm(column = "role_id")]
                role_marker: Option<String>,
                sidx: Option<String>,
                sord: Option<String>,
            }
        };
        let tokens = expand(input).unwrap().to_string();
        assert!(tokens.contains("(\"roleMarker\" , \"role_id\")"));
    }

    #[test]
    fn rejects_non_text_sort_field() {
        let input: DeriveInput = parse_quote! {
            struct UserVo { sidx: Option<i32>, sord: Option<String> }
        };
        assert!(expand(input).is_err());
    }
}
