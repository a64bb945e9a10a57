//! SQL dialects and their date-literal syntax.
//!
//! Range predicates over date fields need a cast/parse function, and each
//! engine spells that differently:
//!
//! | dialect    | literal                                              |
//! |------------|------------------------------------------------------|
//! | `MySql`    | `str_to_date('2024-01-31 08:00:00', '%Y-%m-%d %H:%i:%s')` |
//! | `Postgres` | `cast('2024-01-31 08:00:00' as timestamp)`           |
//! | `Oracle`   | `to_date('2024-01-31 08:00:00', 'yyyy-mm-dd hh24:mi:ss')` |

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::error::{QueryError, QueryResult};

/// Format used for every date literal the builders render.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The SQL dialect in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Dialect {
    MySql,
    Postgres,
    Oracle,
}

static GLOBAL: OnceLock<Dialect> = OnceLock::new();

impl Dialect {
    pub const ALL: [Dialect; 3] = [Dialect::MySql, Dialect::Postgres, Dialect::Oracle];

    /// Detect the dialect from a JDBC-style driver class name.
    ///
    /// Matching is a case-insensitive substring check, so both
    /// `com.mysql.cj.jdbc.Driver` and `com.mysql.jdbc.Driver` map to MySQL.
    pub fn from_driver_class(driver: &str) -> Option<Self> {
        let driver = driver.to_ascii_lowercase();
        if driver.contains("mysql") || driver.contains("mariadb") {
            Some(Self::MySql)
        } else if driver.contains("postgresql") {
            Some(Self::Postgres)
        } else if driver.contains("oracle") {
            Some(Self::Oracle)
        } else {
            None
        }
    }

    /// Process-wide dialect, if [`init_global`] has been called.
    pub fn global() -> Option<Self> {
        GLOBAL.get().copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MySql => "mysql",
            Self::Postgres => "postgres",
            Self::Oracle => "oracle",
        }
    }

    /// Push a date literal for `value` onto `out`.
    pub fn write_datetime(&self, out: &mut String, value: &NaiveDateTime) {
        let formatted = value.format(DATETIME_FORMAT);
        let rendered = match self {
            Self::MySql => format!("str_to_date('{formatted}', '%Y-%m-%d %H:%i:%s')"),
            Self::Postgres => format!("cast('{formatted}' as timestamp)"),
            Self::Oracle => format!("to_date('{formatted}', 'yyyy-mm-dd hh24:mi:ss')"),
        };
        out.push_str(&rendered);
    }

    /// Render a date literal for `value`.
    pub fn datetime_literal(&self, value: &NaiveDateTime) -> String {
        let mut out = String::new();
        self.write_datetime(&mut out, value);
        out
    }
}

/// Set the process-wide dialect. May only be called once.
pub fn init_global(dialect: Dialect) -> QueryResult<()> {
    GLOBAL.set(dialect).map_err(|rejected| {
        QueryError::config(format!(
            "global dialect already initialized (tried to set {}, have {})",
            rejected,
            Dialect::global().map_or("none", |d| d.as_str())
        ))
    })
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(Self::MySql),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            "oracle" => Ok(Self::Oracle),
            other => Err(QueryError::config(format!("unknown dialect '{other}'"))),
        }
    }
}

impl TryFrom<String> for Dialect {
    type Error = QueryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 31)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    #[test]
    fn driver_class_detection() {
        assert_eq!(
            Dialect::from_driver_class("com.mysql.cj.jdbc.Driver"),
            Some(Dialect::MySql)
        );
        assert_eq!(
            Dialect::from_driver_class("org.postgresql.Driver"),
            Some(Dialect::Postgres)
        );
        assert_eq!(
            Dialect::from_driver_class("oracle.jdbc.OracleDriver"),
            Some(Dialect::Oracle)
        );
        assert_eq!(Dialect::from_driver_class("org.sqlite.JDBC"), None);
    }

    #[test]
    fn date_literals() {
        let dt = sample();
        assert_eq!(
            Dialect::MySql.datetime_literal(&dt),
            "str_to_date('2024-01-31 08:00:00', '%Y-%m-%d %H:%i:%s')"
        );
        assert_eq!(
            Dialect::Postgres.datetime_literal(&dt),
            "cast('2024-01-31 08:00:00' as timestamp)"
        );
        assert_eq!(
            Dialect::Oracle.datetime_literal(&dt),
            "to_date('2024-01-31 08:00:00', 'yyyy-mm-dd hh24:mi:ss')"
        );
    }

    #[test]
    fn parse_names() {
        assert_eq!("PostgreSQL".parse::<Dialect>().unwrap(), Dialect::Postgres);
        assert_eq!(" mysql ".parse::<Dialect>().unwrap(), Dialect::MySql);
        assert!("db2".parse::<Dialect>().is_err());
        for d in Dialect::ALL {
            assert_eq!(d.as_str().parse::<Dialect>().unwrap(), d);
        }
    }

    #[test]
    fn global_is_set_once() {
        init_global(Dialect::Postgres).unwrap();
        assert_eq!(Dialect::global(), Some(Dialect::Postgres));
        assert!(init_global(Dialect::Oracle).is_err());
        assert_eq!(Dialect::global(), Some(Dialect::Postgres));
    }
}
