//! Entity derive macro implementation.
//!
//! Generates a static `FieldDef` table with one accessor function per field.
//! Companion fields named by `between(...)` / `in_list(...)` are resolved here,
//! so a typo is a compile error instead of a runtime diagnostic.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{DeriveInput, LitStr, Result};

use crate::attrs::{TagAttr, parse_struct_attrs};
use crate::fields::{self, FieldSpec};

fn resolve<'s, 'a>(fields: &'s [FieldSpec<'a>], lit: &LitStr) -> Result<&'s FieldSpec<'a>> {
    fields::find(fields, &lit.value()).ok_or_else(|| {
        syn::Error::new(
            lit.span(),
            format!("no field named '{}' on this struct", lit.value()),
        )
    })
}

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let name_str = name.to_string();
    let struct_attrs = parse_struct_attrs(&input)?;
    let fields = fields::collect(&input, "Entity")?;

    let table = match &struct_attrs.table {
        Some(table) => quote!(::std::option::Option::Some(#table)),
        None => quote!(::std::option::Option::None),
    };

    let mut getters = Vec::with_capacity(fields.len());
    let mut defs = Vec::with_capacity(fields.len());
    let mut checks = Vec::new();

    for field in &fields {
        let ident = field.ident;
        let ty = field.ty;
        let property = &field.property;
        let getter = format_ident!("__sqlfrag_get_{}", ident);

        getters.push(quote! {
            fn #getter(e: &#name) -> ::sqlfrag::FieldValue<'_> {
                ::sqlfrag::FieldType::to_field_value(&e.#ident)
            }
        });

        let column = match &field.attrs.column {
            Some(column) => quote!(::std::option::Option::Some(#column)),
            None => quote!(::std::option::Option::None),
        };

        let tag = match &field.attrs.tag {
            None => quote!(::sqlfrag::FieldTag::Plain),
            Some(TagAttr::Transient) => quote!(::sqlfrag::FieldTag::Transient),
            Some(TagAttr::Like) => quote!(::sqlfrag::FieldTag::Like),
            Some(TagAttr::Between { min, max }) => {
                let min = &resolve(&fields, min)?.property;
                let max = &resolve(&fields, max)?.property;
                quote!(::sqlfrag::FieldTag::Between { min: #min, max: #max })
            }
            Some(TagAttr::In { values }) => {
                let target = resolve(&fields, values)?;
                let target_ty = target.ty;
                let message = format!(
                    "in_list(values = \"{}\") on `{}::{}` must name a Vec<String> field",
                    values.value(),
                    name_str,
                    ident
                );
                checks.push(quote! {
                    const _: () = ::std::assert!(
                        ::std::matches!(
                            <#target_ty as ::sqlfrag::FieldType>::KIND,
                            ::sqlfrag::FieldKind::TextList
                        ),
                        #message
                    );
                });
                let values = &target.property;
                quote!(::sqlfrag::FieldTag::In { values: #values })
            }
        };

        defs.push(quote! {
            ::sqlfrag::FieldDef {
                name: #property,
                column: #column,
                kind: <#ty as ::sqlfrag::FieldType>::KIND,
                tag: #tag,
                get: #getter,
            }
        });
    }

    let count = defs.len();

    Ok(quote! {
        #(#checks)*

        impl ::sqlfrag::Entity for #name {
            const NAME: &'static str = #name_str;

            fn table_name() -> ::std::option::Option<&'static str> {
                #table
            }

            fn fields() -> &'static [::sqlfrag::FieldDef<Self>] {
                #(#getters)*

                static FIELDS: [::sqlfrag::FieldDef<#name>; #count] = [#(#defs),*];
                &FIELDS
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn unknown_companion_is_a_compile_error() {
        let input: DeriveInput = parse_quote! {
            #[orm(table = "t_user")]
            struct UserVo {
                #[orm(between(min = "minCreateTime", max = "maxCreatTime"))]
                create_time: Option<NaiveDateTime>,
                min_create_time: Option<NaiveDateTime>,
                max_create_time: Option<NaiveDateTime>,
            }
        };
        let err = expand(input).unwrap_err();
        assert!(err.to_string().contains("maxCreatTime"));
    }

    #[test]
    fn companions_resolve_to_property_names() {
        let input: DeriveInput = parse_quote! {
            struct UserVo {
                #[orm(in_list(values = "role_ids"))]
                role_marker: Option<String>,
                #[orm(transient)]
                role_ids: Vec<String>,
            }
        };
        let tokens = expand(input).unwrap().to_string();
        assert!(tokens.contains("\"roleIds\""));
        assert!(tokens.contains("TextList"));
        assert!(tokens.contains("FieldTag :: Transient"));
    }
}
