use proc_macro2::Span;
use syn::{Error, LitStr, Result};

pub(crate) fn is_valid_sql_ident(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return false;
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// A column name: one plain identifier.
pub(crate) fn parse_sql_ident(lit: &LitStr, what: &str) -> Result<String> {
    parse_sql_ident_with_span(lit.value().trim(), lit.span(), what)
}

pub(crate) fn parse_sql_ident_with_span(s: &str, span: Span, what: &str) -> Result<String> {
    let s = s.trim();
    if s.is_empty() {
        return Err(Error::new(span, format!("{what} must not be empty")));
    }
    if !is_valid_sql_ident(s) {
        return Err(Error::new(
            span,
            format!("{what} must be a valid SQL identifier (expected [A-Za-z_][A-Za-z0-9_]*)"),
        ));
    }
    Ok(s.to_string())
}

/// A table name: identifiers optionally qualified with a schema (`schema.table`).
pub(crate) fn parse_table_name(lit: &LitStr) -> Result<String> {
    let raw = lit.value();
    let parts: Vec<String> = raw
        .trim()
        .split('.')
        .map(|part| parse_sql_ident_with_span(part, lit.span(), "table"))
        .collect::<Result<_>>()?;
    Ok(parts.join("."))
}
