//! Derive macros for sqlfrag
//!
//! Provides `#[derive(Entity)]` and `#[derive(SortSpec)]`.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod attrs;
mod common;
mod entity;
mod fields;
mod sort_spec;
mod sql_ident;

/// Derive `Entity` metadata for a struct.
///
/// # Example
///
/// ```ignore
/// use sqlfrag::Entity;
///
/// #[derive(Entity)]
/// #[orm(table = "t_user")]
/// struct UserVo {
///     id: Option<String>,
///     #[orm(like)]
///     user_name: Option<String>,
///     #[orm(between(min = "minCreateTime", max = "maxCreateTime"))]
///     create_time: Option<NaiveDateTime>,
///     #[orm(transient)]
///     min_create_time: Option<NaiveDateTime>,
///     #[orm(transient)]
///     max_create_time: Option<NaiveDateTime>,
///     #[orm(in_list(values = "ids"), column = "id")]
///     id_marker: Option<String>,
///     #[orm(transient)]
///     ids: Vec<String>,
/// }
/// ```
///
/// # Attributes
///
/// - `#[orm(table = "name")]` - Table used by the projection (optional)
/// - `#[orm(transient)]` - Leave the field out of every fragment
/// - `#[orm(like)]` - `col like '%value%'` instead of `col = 'value'`
/// - `#[orm(between(min = "a", max = "b"))]` - Range over fields `a` and `b` when this field is empty
/// - `#[orm(in_list(values = "a"))]` - `col in (...)` over the `Vec<String>` field `a` when this field is empty
/// - `#[orm(rename = "name")]` - Property name, a plain identifier (default: lowerCamelCase of the field name)
/// - `#[orm(column = "name")]` - Column name (default: snake_case of the property name)
#[proc_macro_derive(Entity, attributes(orm))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    entity::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

/// Derive `SortSpec` for a struct carrying `sidx` / `sord`.
///
/// Every field's property name goes into `PROPERTIES`, the whitelist for the
/// requested sort field.
///
/// # Attributes
///
/// - `#[orm(sidx)]` - Field holding the sort field (default: the field named `sidx`)
/// - `#[orm(sord)]` - Field holding the direction (default: the field named `sord`)
/// - `#[orm(rename = "name")]` - Property name
#[proc_macro_derive(SortSpec, attributes(orm))]
pub fn derive_sort_spec(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    sort_spec::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
