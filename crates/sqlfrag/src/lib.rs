//! # sqlfrag
//!
//! Build SQL text fragments from annotated entity structs.
//!
//! ## Features
//!
//! - **Projection**: `select <cols> from <table> where '1' = '1' ` from a struct's fields
//! - **Predicates**: ` and col = '...'`, `like`, date/numeric ranges and `in (...)` driven by field tags
//! - **Ordering**: ` order by col asc|desc`, only for whitelisted property names
//! - **Dialects**: MySQL, PostgreSQL and Oracle date literals
//! - **Escaping**: every interpolated value is escaped before it is quoted
//!
//! Values are interpolated into the SQL text, not bound as parameters.
//!
//! ```ignore
//! use sqlfrag::prelude::*;
//!
//! #[derive(Entity, SortSpec)]
//! #[orm(table = "t_user")]
//! struct UserVo {
//!     id: Option<String>,
//!     #[orm(like)]
//!     user_name: Option<String>,
//!     #[orm(transient)]
//!     sidx: Option<String>,
//!     #[orm(transient)]
//!     sord: Option<String>,
//! }
//!
//! let vo = UserVo { /* bound from the request */ };
//! let built = EntityQuery::new(&vo, Dialect::MySql).build_sorted(&vo)?;
//! // select id ,user_name from t_user where '1' = '1'  and user_name like '%ann%' order by id asc
//! ```

pub mod config;
pub mod dialect;
pub mod entity;
pub mod error;
pub mod escape;
pub mod naming;
pub mod order;
pub mod predicate;
pub mod prelude;
pub mod projection;
pub mod query;

pub use config::DatasourceConfig;
pub use dialect::{Dialect, init_global};
pub use entity::{Entity, FieldDef, FieldKind, FieldTag, FieldType, FieldValue};
pub use error::{FieldError, FieldErrorKind, QueryError, QueryResult};
pub use escape::{escape, escape_literal};
pub use naming::to_column_name;
pub use order::{PageCondition, SortOrder, SortSpec, append_order};
pub use predicate::{DEFAULT_IGNORED, PredicateReport, append_predicates};
pub use projection::{build_projection, build_projection_for};
pub use query::{BuiltQuery, EntityQuery};

#[cfg(feature = "derive")]
pub use sqlfrag_derive::{Entity, SortSpec};
