//! `and ...` predicate generation from an entity's current field values.
//!
//! Fields are visited in declaration order. A field with a value becomes an
//! equality (or `like`) predicate; an empty field tagged `between` or `in_list`
//! reads its companion fields instead. Each field renders into a scratch
//! buffer first, so a field that fails leaves no half-written text behind and
//! never affects the predicates of other fields.

use std::borrow::Cow;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::dialect::{DATETIME_FORMAT, Dialect};
use crate::entity::{Entity, FieldDef, FieldKind, FieldTag, FieldValue, validate_fields};
use crate::error::{FieldError, FieldErrorKind, QueryError, QueryResult};
use crate::escape::{escape_literal, push_quoted};

/// Property names skipped by every predicate build (paging/sorting parameters).
pub const DEFAULT_IGNORED: [&str; 6] = ["class", "pageable", "page", "rows", "sidx", "sord"];

/// Outcome of [`append_predicates`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredicateReport {
    /// Number of `and ...` predicates appended
    pub appended: usize,
    /// Fields that were skipped because they could not be rendered
    pub diagnostics: Vec<FieldError>,
}

impl PredicateReport {
    /// `true` when every field rendered.
    pub fn is_complete(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Turn diagnostics into an error; otherwise return the predicate count.
    pub fn into_result(self) -> QueryResult<usize> {
        if self.diagnostics.is_empty() {
            Ok(self.appended)
        } else {
            Err(QueryError::Partial(self.diagnostics))
        }
    }
}

/// Append ` and <condition>` fragments for `entity` onto `sql`.
///
/// `ignored` holds extra property names to skip, on top of [`DEFAULT_IGNORED`].
/// Fields that fail are reported in the returned [`PredicateReport`]; the only
/// hard error is a malformed descriptor table.
pub fn append_predicates<E: Entity>(
    entity: &E,
    sql: &mut String,
    dialect: Dialect,
    ignored: &[&str],
) -> QueryResult<PredicateReport> {
    validate_fields::<E>()?;

    let mut report = PredicateReport::default();
    let mut scratch = String::new();

    for field in E::fields() {
        if field.tag.is_transient() || is_ignored(field.name, ignored) {
            continue;
        }

        scratch.clear();
        match render_field(entity, field, dialect, &mut scratch) {
            Ok(count) => {
                sql.push_str(&scratch);
                report.appended += count;
            }
            Err(kind) => {
                tracing::warn!(
                    target: "sqlfrag",
                    entity = E::NAME,
                    field = field.name,
                    error = %kind,
                    "skipping field while building predicates"
                );
                report.diagnostics.push(FieldError::new(field.name, kind));
            }
        }
    }

    tracing::debug!(
        target: "sqlfrag",
        entity = E::NAME,
        %dialect,
        appended = report.appended,
        skipped = report.diagnostics.len(),
        "built predicates"
    );

    Ok(report)
}

fn is_ignored(name: &str, ignored: &[&str]) -> bool {
    DEFAULT_IGNORED.contains(&name) || ignored.contains(&name)
}

fn render_field<E: Entity>(
    entity: &E,
    field: &FieldDef<E>,
    dialect: Dialect,
    out: &mut String,
) -> Result<usize, FieldErrorKind> {
    let value = (field.get)(entity);
    let column = field.column_name();

    if !value.is_empty() {
        let text = literal_text(&value, field.kind)?;
        out.push_str(" and ");
        out.push_str(&column);
        if matches!(field.tag, FieldTag::Like) {
            out.push_str(" like '%");
            out.push_str(&escape_literal(&text));
            out.push_str("%'");
        } else {
            out.push_str(" = ");
            push_quoted(out, &text);
        }
        return Ok(1);
    }

    match field.tag {
        FieldTag::Between { min, max } => {
            render_range(entity, field.kind, &column, min, max, dialect, out)
        }
        FieldTag::In { values } => render_in(entity, &column, values, out),
        FieldTag::Plain | FieldTag::Like | FieldTag::Transient => Ok(0),
    }
}

/// Text of a present value, before escaping.
fn literal_text<'a>(value: &FieldValue<'a>, kind: FieldKind) -> Result<Cow<'a, str>, FieldErrorKind> {
    match *value {
        FieldValue::Text(s) => Ok(Cow::Borrowed(s)),
        FieldValue::Int(i) => Ok(Cow::Owned(i.to_string())),
        FieldValue::Float(f) => Ok(Cow::Owned(f.to_string())),
        FieldValue::Bool(b) => Ok(Cow::Owned(b.to_string())),
        FieldValue::DateTime(dt) => Ok(Cow::Owned(dt.format(DATETIME_FORMAT).to_string())),
        FieldValue::TextList(_) | FieldValue::Null => Err(FieldErrorKind::UnsupportedValue(kind)),
    }
}

fn companion<'a, E: Entity>(entity: &'a E, name: &'static str) -> Result<FieldValue<'a>, FieldErrorKind> {
    let def = E::field(name).ok_or(FieldErrorKind::UnknownField(name))?;
    Ok((def.get)(entity))
}

fn render_range<E: Entity>(
    entity: &E,
    marker: FieldKind,
    column: &str,
    min: &'static str,
    max: &'static str,
    dialect: Dialect,
    out: &mut String,
) -> Result<usize, FieldErrorKind> {
    let bounds = [(">", companion(entity, min)?), ("<", companion(entity, max)?)];
    let mut count = 0;

    match marker {
        FieldKind::DateTime => {
            for (op, bound) in bounds {
                if bound.is_empty() {
                    continue;
                }
                let dt = bound_datetime(&bound)?;
                out.push_str(" and ");
                out.push_str(column);
                out.push(' ');
                out.push_str(op);
                out.push(' ');
                dialect.write_datetime(out, &dt);
                count += 1;
            }
        }
        FieldKind::Numeric => {
            for (op, bound) in bounds {
                if bound.is_empty() {
                    continue;
                }
                let number = bound_number(&bound)?;
                out.push_str(" and ");
                out.push_str(column);
                out.push(' ');
                out.push_str(op);
                out.push(' ');
                out.push_str(&number);
                count += 1;
            }
        }
        other => {
            tracing::debug!(
                target: "sqlfrag",
                column,
                kind = ?other,
                "range predicates are only rendered for date and numeric fields"
            );
        }
    }

    Ok(count)
}

fn bound_datetime(bound: &FieldValue<'_>) -> Result<NaiveDateTime, FieldErrorKind> {
    match *bound {
        FieldValue::DateTime(dt) => Ok(dt),
        FieldValue::Text(raw) => {
            let raw = raw.trim();
            NaiveDateTime::parse_from_str(raw, DATETIME_FORMAT)
                .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d").map(|d| d.and_time(NaiveTime::MIN)))
                .map_err(|_| FieldErrorKind::InvalidDate(raw.to_string()))
        }
        ref other => Err(FieldErrorKind::TypeMismatch {
            expected: "datetime",
            found: other.type_name(),
        }),
    }
}

/// Render a numeric bound. Text is only accepted if it parses as a number, and
/// is re-rendered from the parsed value so nothing raw reaches the SQL.
fn bound_number(bound: &FieldValue<'_>) -> Result<String, FieldErrorKind> {
    let mismatch = |found| FieldErrorKind::TypeMismatch {
        expected: "number",
        found,
    };
    match *bound {
        FieldValue::Int(i) => Ok(i.to_string()),
        FieldValue::Float(f) if f.is_finite() => Ok(f.to_string()),
        FieldValue::Text(raw) => {
            let raw = raw.trim();
            if let Ok(i) = raw.parse::<i128>() {
                Ok(i.to_string())
            } else {
                match raw.parse::<f64>() {
                    Ok(f) if f.is_finite() => Ok(f.to_string()),
                    _ => Err(mismatch("text")),
                }
            }
        }
        ref other => Err(mismatch(other.type_name())),
    }
}

fn render_in<E: Entity>(
    entity: &E,
    column: &str,
    values: &'static str,
    out: &mut String,
) -> Result<usize, FieldErrorKind> {
    let items = match companion(entity, values)? {
        FieldValue::TextList(items) => items,
        FieldValue::Null => return Ok(0),
        other => {
            return Err(FieldErrorKind::TypeMismatch {
                expected: "text list",
                found: other.type_name(),
            });
        }
    };
    if items.is_empty() {
        return Ok(0);
    }

    out.push_str(" and ");
    out.push_str(column);
    out.push_str(" in (");
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        push_quoted(out, item);
    }
    out.push(')');
    Ok(1)
}
