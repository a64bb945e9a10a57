//! Datasource configuration used to pick the active [`Dialect`].
//!
//! ```toml
//! [datasource]
//! driver_class_name = "org.postgresql.Driver"
//! # dialect = "postgres"   # optional, wins over the driver class
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::dialect::{self, Dialect};
use crate::error::{QueryError, QueryResult};

/// Environment variable holding the driver class name.
pub const ENV_DRIVER_CLASS_NAME: &str = "SQLFRAG_DRIVER_CLASS_NAME";
/// Environment variable holding an explicit dialect name.
pub const ENV_DIALECT: &str = "SQLFRAG_DIALECT";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DatasourceConfig {
    /// JDBC-style driver class name, e.g. `com.mysql.cj.jdbc.Driver`
    #[serde(default)]
    pub driver_class_name: Option<String>,
    /// Explicit dialect override
    #[serde(default)]
    pub dialect: Option<Dialect>,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    datasource: DatasourceConfig,
}

impl DatasourceConfig {
    pub fn from_driver_class(driver: impl Into<String>) -> Self {
        Self {
            driver_class_name: Some(driver.into()),
            dialect: None,
        }
    }

    /// Parse a TOML document with a `[datasource]` table.
    pub fn from_toml_str(raw: &str) -> QueryResult<Self> {
        let file: ConfigFile = toml::from_str(raw)
            .map_err(|e| QueryError::config(format!("failed to parse config: {e}")))?;
        Ok(file.datasource)
    }

    /// Read and parse a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> QueryResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            QueryError::config(format!("failed to read config file {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&raw)
    }

    /// Read [`ENV_DRIVER_CLASS_NAME`] / [`ENV_DIALECT`] from the environment,
    /// after loading a `.env` file if one exists.
    pub fn from_env() -> QueryResult<Self> {
        if let Err(e) = dotenvy::dotenv()
            && !e.not_found()
        {
            return Err(QueryError::config(format!("failed to load .env: {e}")));
        }

        let driver_class_name = std::env::var(ENV_DRIVER_CLASS_NAME).ok();
        let dialect = match std::env::var(ENV_DIALECT) {
            Ok(raw) if !raw.trim().is_empty() => Some(raw.parse()?),
            _ => None,
        };
        Ok(Self {
            driver_class_name,
            dialect,
        })
    }

    /// Resolve the dialect: explicit override first, then the driver class.
    pub fn dialect(&self) -> QueryResult<Dialect> {
        if let Some(dialect) = self.dialect {
            return Ok(dialect);
        }
        let driver = self
            .driver_class_name
            .as_deref()
            .ok_or_else(|| QueryError::config("no driver_class_name or dialect configured"))?;
        Dialect::from_driver_class(driver).ok_or_else(|| {
            QueryError::config(format!("unrecognized driver class '{driver}'"))
        })
    }

    /// Resolve the dialect and install it as the process-wide default.
    pub fn init_global(&self) -> QueryResult<Dialect> {
        let dialect = self.dialect()?;
        dialect::init_global(dialect)?;
        tracing::info!(target: "sqlfrag", %dialect, "global dialect initialized");
        Ok(dialect)
    }
}
