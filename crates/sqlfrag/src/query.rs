//! One-call assembly: projection, predicates, then order.

use crate::dialect::Dialect;
use crate::entity::Entity;
use crate::error::{FieldError, QueryError, QueryResult};
use crate::order::{SortSpec, append_order};
use crate::predicate::append_predicates;
use crate::projection::build_projection;

/// A finished statement plus the fields that had to be left out of it.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltQuery {
    pub sql: String,
    pub diagnostics: Vec<FieldError>,
}

impl BuiltQuery {
    pub fn is_complete(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Fail if any field was skipped.
    pub fn strict(self) -> QueryResult<String> {
        if self.diagnostics.is_empty() {
            Ok(self.sql)
        } else {
            Err(QueryError::Partial(self.diagnostics))
        }
    }
}

/// Builder tying the three fragment generators together for one entity.
///
/// # Example
/// ```ignore
/// let built = EntityQuery::new(&filter, Dialect::Postgres)
///     .ignore("password")
///     .build_sorted(&page)?;
/// client.query(&built.sql).await?;
/// ```
#[derive(Debug)]
pub struct EntityQuery<'a, E> {
    entity: &'a E,
    dialect: Dialect,
    ignored: Vec<&'a str>,
}

impl<'a, E: Entity> EntityQuery<'a, E> {
    pub fn new(entity: &'a E, dialect: Dialect) -> Self {
        Self {
            entity,
            dialect,
            ignored: Vec::new(),
        }
    }

    /// Use the process-wide dialect set via [`crate::dialect::init_global`].
    pub fn with_global_dialect(entity: &'a E) -> QueryResult<Self> {
        let dialect = Dialect::global()
            .ok_or_else(|| QueryError::config("global dialect is not initialized"))?;
        Ok(Self::new(entity, dialect))
    }

    /// Skip a property in both the projection and the predicates.
    pub fn ignore(mut self, name: &'a str) -> Self {
        self.ignored.push(name);
        self
    }

    pub fn ignore_all(mut self, names: impl IntoIterator<Item = &'a str>) -> Self {
        self.ignored.extend(names);
        self
    }

    /// `select ... where '1' = '1' and ...`
    pub fn build(&self) -> QueryResult<BuiltQuery> {
        let mut sql = build_projection::<E>(&self.ignored)?;
        let report = append_predicates(self.entity, &mut sql, self.dialect, &self.ignored)?;
        Ok(BuiltQuery {
            sql,
            diagnostics: report.diagnostics,
        })
    }

    /// Like [`build`](Self::build), followed by a whitelisted `order by`.
    pub fn build_sorted<S: SortSpec>(&self, sort: &S) -> QueryResult<BuiltQuery> {
        let mut built = self.build()?;
        append_order(sort, &mut built.sql);
        tracing::debug!(target: "sqlfrag", entity = E::NAME, sql = %built.sql, "built query");
        Ok(built)
    }
}
