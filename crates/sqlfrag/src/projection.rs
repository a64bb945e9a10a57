//! `select <columns> from <table>` skeleton generation.

use crate::entity::{Entity, validate_fields};
use crate::error::{QueryError, QueryResult};

/// Always-true anchor so every later predicate can start with ` and `.
pub const WHERE_ANCHOR: &str = " where '1' = '1' ";

/// Build `select <cols> from <table> where '1' = '1' ` for `E`.
///
/// Columns come from every field that is not transient and not listed in
/// `ignored`, in declaration order.
///
/// ```ignore
/// let sql = sqlfrag::build_projection::<User>(&[])?;
/// assert_eq!(sql, "select id ,user_name from t_user where '1' = '1' ");
/// ```
pub fn build_projection<E: Entity>(ignored: &[&str]) -> QueryResult<String> {
    validate_fields::<E>()?;
    let table = E::table_name().ok_or(QueryError::MissingTable { entity: E::NAME })?;

    let mut sql = String::from("select ");
    let mut columns = 0usize;
    for field in E::fields() {
        if field.tag.is_transient() || ignored.contains(&field.name) {
            continue;
        }
        sql.push_str(&field.column_name());
        sql.push_str(" ,");
        columns += 1;
    }

    if columns == 0 {
        return Err(QueryError::NoColumns { entity: E::NAME });
    }
    // drop the trailing comma, keep the space before it
    sql.pop();

    sql.push_str("from ");
    sql.push_str(table);
    sql.push_str(WHERE_ANCHOR);

    tracing::debug!(target: "sqlfrag", entity = E::NAME, columns, sql = %sql, "built projection");
    Ok(sql)
}

/// Same as [`build_projection`], inferring `E` from a value.
pub fn build_projection_for<E: Entity>(_entity: &E, ignored: &[&str]) -> QueryResult<String> {
    build_projection::<E>(ignored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{FieldDef, FieldKind, FieldTag, FieldValue};

    struct Account;

    fn null(_: &Account) -> FieldValue<'_> {
        FieldValue::Null
    }

    static ACCOUNT_FIELDS: [FieldDef<Account>; 3] = [
        FieldDef {
            name: "id",
            column: None,
            kind: FieldKind::Text,
            tag: FieldTag::Plain,
            get: null,
        },
        FieldDef {
            name: "userName",
            column: None,
            kind: FieldKind::Text,
            tag: FieldTag::Like,
            get: null,
        },
        FieldDef {
            name: "password",
            column: None,
            kind: FieldKind::Text,
            tag: FieldTag::Transient,
            get: null,
        },
    ];

    impl Entity for Account {
        const NAME: &'static str = "Account";

        fn table_name() -> Option<&'static str> {
            Some("t_user")
        }

        fn fields() -> &'static [FieldDef<Self>] {
            &ACCOUNT_FIELDS
        }
    }

    struct Unbound;

    impl Entity for Unbound {
        const NAME: &'static str = "Unbound";

        fn table_name() -> Option<&'static str> {
            None
        }

        fn fields() -> &'static [FieldDef<Self>] {
            &[]
        }
    }

    #[test]
    fn projection_skips_transient() {
        assert_eq!(
            build_projection::<Account>(&[]).unwrap(),
            "select id ,user_name from t_user where '1' = '1' "
        );
    }

    #[test]
    fn projection_honours_ignored() {
        assert_eq!(
            build_projection_for(&Account, &["id"]).unwrap(),
            "select user_name from t_user where '1' = '1' "
        );
    }

    #[test]
    fn no_columns_is_an_error() {
        let err = build_projection::<Account>(&["id", "userName"]).unwrap_err();
        assert!(matches!(err, QueryError::NoColumns { entity: "Account" }));
    }

    #[test]
    fn missing_table_is_an_error() {
        let err = build_projection::<Unbound>(&[]).unwrap_err();
        assert!(matches!(err, QueryError::MissingTable { entity: "Unbound" }));
    }
}
