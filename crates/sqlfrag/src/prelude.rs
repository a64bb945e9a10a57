//! Convenient imports for typical `sqlfrag` usage.
//!
//! ```ignore
//! use sqlfrag::prelude::*;
//! ```

pub use crate::{
    BuiltQuery, Dialect, Entity, EntityQuery, PageCondition, QueryError, QueryResult, SortSpec,
    append_order, append_predicates, build_projection,
};
