//! Whitelisted `order by` generation.
//!
//! The sort field arrives straight from a request parameter, so it is only
//! used if it names one of the sort spec's own declared properties. Anything
//! else is dropped.

use serde::Deserialize;

use crate::naming::to_column_name;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// `Desc` only for a case-insensitive `"desc"`; anything else is `Asc`.
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        match raw {
            Some(s) if s.eq_ignore_ascii_case("desc") => Self::Desc,
            _ => Self::Asc,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// A value carrying the requested sort field (`sidx`) and direction (`sord`).
///
/// `PROPERTIES` lists the carrying type's declared properties; it is the
/// whitelist `sidx` is checked against. `COLUMNS` maps properties whose column
/// is not the snake_case of the property name (`#[orm(column = "...")]`).
/// Usually generated by `#[derive(SortSpec)]`.
pub trait SortSpec {
    const PROPERTIES: &'static [&'static str];

    /// `(property, column)` overrides
    const COLUMNS: &'static [(&'static str, &'static str)] = &[];

    fn sort_field(&self) -> Option<&str>;

    fn sort_order(&self) -> Option<&str>;

    fn is_property(name: &str) -> bool {
        Self::PROPERTIES.contains(&name)
    }

    /// Column a property sorts by.
    fn column_of(name: &str) -> String {
        Self::COLUMNS
            .iter()
            .find(|(property, _)| *property == name)
            .map(|(_, column)| (*column).to_string())
            .unwrap_or_else(|| to_column_name(name))
    }
}

/// Append ` order by <col> asc|desc` if the sort field is a known property.
///
/// Returns whether a clause was appended.
pub fn append_order<S: SortSpec>(spec: &S, sql: &mut String) -> bool {
    let Some(field) = spec.sort_field().filter(|f| !f.trim().is_empty()) else {
        return false;
    };

    if !S::is_property(field) {
        tracing::warn!(target: "sqlfrag", sort_field = field, "rejected unknown sort field");
        return false;
    }

    let order = SortOrder::parse_lenient(spec.sort_order());
    sql.push_str(" order by ");
    sql.push_str(&S::column_of(field));
    sql.push(' ');
    sql.push_str(order.as_sql());
    true
}

/// Paging and sorting parameters as bound from a request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PageCondition {
    /// 1-based page number
    pub page: Option<u32>,
    /// Page size
    pub rows: Option<u32>,
    /// Sort field (property name)
    pub sidx: Option<String>,
    /// Sort direction
    pub sord: Option<String>,
}

impl PageCondition {
    pub fn sorted(sidx: impl Into<String>, sord: impl Into<String>) -> Self {
        Self {
            sidx: Some(sidx.into()),
            sord: Some(sord.into()),
            ..Self::default()
        }
    }
}

impl SortSpec for PageCondition {
    const PROPERTIES: &'static [&'static str] = &["page", "rows", "sidx", "sord"];

    fn sort_field(&self) -> Option<&str> {
        self.sidx.as_deref()
    }

    fn sort_order(&self) -> Option<&str> {
        self.sord.as_deref()
    }
}
