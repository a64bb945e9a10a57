//! Entity schemas: per-type field descriptor tables.
//!
//! An [`Entity`] exposes its table name and a static slice of [`FieldDef`]s in
//! declaration order. Each descriptor carries the property name, the declared
//! [`FieldKind`], the [`FieldTag`] that selects predicate semantics, and a plain
//! function pointer that reads the current value.
//!
//! Usually generated by `#[derive(Entity)]`, which also checks at compile time
//! that the companion fields named by `between`/`in_list` exist.
//!
//! # Example
//! ```ignore
//! use sqlfrag::Entity;
//!
//! #[derive(Entity)]
//! #[orm(table = "t_user")]
//! struct User {
//!     id: Option<String>,
//!     #[orm(like)]
//!     user_name: Option<String>,
//!     #[orm(between(min = "minCreateTime", max = "maxCreateTime"))]
//!     create_time: Option<chrono::NaiveDateTime>,
//!     #[orm(transient)]
//!     min_create_time: Option<chrono::NaiveDateTime>,
//!     #[orm(transient)]
//!     max_create_time: Option<chrono::NaiveDateTime>,
//! }
//! ```

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::error::{QueryError, QueryResult};
use crate::naming::to_column_name;

/// Declared type of a field, as far as SQL rendering cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Numeric,
    Bool,
    DateTime,
    TextList,
    /// For hand-written [`FieldType`] impls on custom types. Rendered like text
    /// in equality predicates; never used as a range marker.
    Other,
}

/// Per-field metadata selecting how the field becomes a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldTag {
    /// `col = 'value'` when the value is present
    Plain,
    /// Excluded from every generated fragment
    Transient,
    /// `col like '%value%'` when the value is present
    Like,
    /// When the field itself is empty, range over two companion fields
    Between {
        min: &'static str,
        max: &'static str,
    },
    /// When the field itself is empty, `col in (...)` over a companion list
    In { values: &'static str },
}

impl FieldTag {
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient)
    }
}

/// Descriptor for one field of an entity.
pub struct FieldDef<E: ?Sized> {
    /// Property name (the name callers use in ignore lists and sort specs)
    pub name: &'static str,
    /// Explicit column name; `None` means derive it from `name`
    pub column: Option<&'static str>,
    pub kind: FieldKind,
    pub tag: FieldTag,
    /// Read the field's current value
    pub get: fn(&E) -> FieldValue<'_>,
}

impl<E: ?Sized> FieldDef<E> {
    /// Column name used in generated SQL.
    pub fn column_name(&self) -> String {
        match self.column {
            Some(column) => column.to_string(),
            None => to_column_name(self.name),
        }
    }
}

impl<E: ?Sized> Clone for FieldDef<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: ?Sized> Copy for FieldDef<E> {}

impl<E: ?Sized> fmt::Debug for FieldDef<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDef")
            .field("name", &self.name)
            .field("column", &self.column)
            .field("kind", &self.kind)
            .field("tag", &self.tag)
            .finish_non_exhaustive()
    }
}

/// A structured record whose fields map onto columns of one table.
pub trait Entity: Sized + 'static {
    /// Type name, used in error messages.
    const NAME: &'static str;

    /// Table name, if the entity is bound to one.
    fn table_name() -> Option<&'static str>;

    /// Field descriptors in declaration order.
    fn fields() -> &'static [FieldDef<Self>];

    /// Look up a field descriptor by property name.
    fn field(name: &str) -> Option<&'static FieldDef<Self>> {
        Self::fields().iter().find(|f| f.name == name)
    }
}

/// Check a descriptor table for duplicate property names.
pub(crate) fn validate_fields<E: Entity>() -> QueryResult<()> {
    let mut seen = HashSet::with_capacity(E::fields().len());
    for field in E::fields() {
        if field.name.is_empty() {
            return Err(QueryError::invalid_schema(format!(
                "{} has a field with an empty name",
                E::NAME
            )));
        }
        if !seen.insert(field.name) {
            return Err(QueryError::invalid_schema(format!(
                "{} declares field '{}' more than once",
                E::NAME,
                field.name
            )));
        }
    }
    Ok(())
}

/// The current value of a field, borrowed from the entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Null,
    Text(&'a str),
    /// Any integer type; `i128` holds every `u64`/`usize` value losslessly
    Int(i128),
    Float(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
    TextList(&'a [String]),
}

impl FieldValue<'_> {
    /// Blank means: null, empty text, or an empty list. Zero is not blank.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.is_empty(),
            Self::TextList(items) => items.is_empty(),
            Self::Int(_) | Self::Float(_) | Self::Bool(_) | Self::DateTime(_) => false,
        }
    }

    /// Short type name for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Text(_) => "text",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Bool(_) => "bool",
            Self::DateTime(_) => "datetime",
            Self::TextList(_) => "text list",
        }
    }
}

/// Rust types that can back an entity field.
pub trait FieldType {
    const KIND: FieldKind;

    fn to_field_value(&self) -> FieldValue<'_>;
}

impl FieldType for String {
    const KIND: FieldKind = FieldKind::Text;

    fn to_field_value(&self) -> FieldValue<'_> {
        FieldValue::Text(self)
    }
}

impl FieldType for &str {
    const KIND: FieldKind = FieldKind::Text;

    fn to_field_value(&self) -> FieldValue<'_> {
        FieldValue::Text(self)
    }
}

impl FieldType for Vec<String> {
    const KIND: FieldKind = FieldKind::TextList;

    fn to_field_value(&self) -> FieldValue<'_> {
        FieldValue::TextList(self)
    }
}

impl FieldType for bool {
    const KIND: FieldKind = FieldKind::Bool;

    fn to_field_value(&self) -> FieldValue<'_> {
        FieldValue::Bool(*self)
    }
}

impl FieldType for NaiveDateTime {
    const KIND: FieldKind = FieldKind::DateTime;

    fn to_field_value(&self) -> FieldValue<'_> {
        FieldValue::DateTime(*self)
    }
}

impl FieldType for NaiveDate {
    const KIND: FieldKind = FieldKind::DateTime;

    fn to_field_value(&self) -> FieldValue<'_> {
        FieldValue::DateTime(self.and_time(chrono::NaiveTime::MIN))
    }
}

impl FieldType for DateTime<Utc> {
    const KIND: FieldKind = FieldKind::DateTime;

    fn to_field_value(&self) -> FieldValue<'_> {
        FieldValue::DateTime(self.naive_utc())
    }
}

impl<T: FieldType> FieldType for Option<T> {
    const KIND: FieldKind = T::KIND;

    fn to_field_value(&self) -> FieldValue<'_> {
        match self {
            Some(v) => v.to_field_value(),
            None => FieldValue::Null,
        }
    }
}

macro_rules! impl_field_type_int {
    ($($ty:ty),*) => {
        $(
            impl FieldType for $ty {
                const KIND: FieldKind = FieldKind::Numeric;

                fn to_field_value(&self) -> FieldValue<'_> {
                    FieldValue::Int(i128::from(*self))
                }
            }
        )*
    };
}

impl_field_type_int!(i8, i16, i32, i64, i128, u8, u16, u32, u64);

// No `From<usize>` for i128; both fit on every supported target.
impl FieldType for usize {
    const KIND: FieldKind = FieldKind::Numeric;

    fn to_field_value(&self) -> FieldValue<'_> {
        FieldValue::Int(*self as i128)
    }
}

impl FieldType for isize {
    const KIND: FieldKind = FieldKind::Numeric;

    fn to_field_value(&self) -> FieldValue<'_> {
        FieldValue::Int(*self as i128)
    }
}

impl FieldType for f32 {
    const KIND: FieldKind = FieldKind::Numeric;

    fn to_field_value(&self) -> FieldValue<'_> {
        FieldValue::Float(f64::from(*self))
    }
}

impl FieldType for f64 {
    const KIND: FieldKind = FieldKind::Numeric;

    fn to_field_value(&self) -> FieldValue<'_> {
        FieldValue::Float(*self)
    }
}
