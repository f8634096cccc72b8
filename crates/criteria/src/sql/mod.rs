//! SQL rendering of criteria trees.
//!
//! ```text
//! Criteria ──▶ QueryBuilder ──▶ (query text, BoundParams)
//!                  │
//!                  └─ SqlDialect: quoting, placeholders, wildcards, LIMIT
//! ```
//!
//! The per-dialect converters wrap [`QueryBuilder`] and shape the parameters
//! the way each driver family expects them.

mod converter;
mod dialect;
mod fragment;
mod options;
mod query_builder;

pub use converter::{
    CriteriaToMysqlConverter, CriteriaToPostgresqlConverter, CriteriaToSqlConverter,
    CriteriaToSqliteConverter, NamedParams,
};
pub use dialect::{
    DialectKind, GenericDialect, LikePattern, MysqlDialect, PostgresDialect, SqlDialect,
    SqliteDialect, double_quote,
};
pub use fragment::{BoundParams, SqlFragment, SqlParam};
pub use options::SqlConvertOptions;
pub use query_builder::QueryBuilder;
