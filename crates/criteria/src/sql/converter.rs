//! Per-dialect criteria to SQL converters.
//!
//! Each converter returns the query text (terminated by `;`) and its
//! parameters: positional for MySQL, keyed by parameter name for the named
//! dialects.

use std::collections::BTreeMap;

use super::dialect::{DialectKind, GenericDialect, MysqlDialect, PostgresDialect, SqliteDialect};
use super::fragment::BoundParams;
use super::options::SqlConvertOptions;
use super::query_builder::QueryBuilder;
use crate::error::CriteriaResult;
use crate::model::{Criteria, Value};

/// Named parameters of a rendered query.
pub type NamedParams = BTreeMap<String, Value>;

/// Generic converter: unquoted identifiers, `%(parameter_N)s` placeholders,
/// inline LIMIT/OFFSET.
///
/// ```rust
/// use criteria_pattern::{Criteria, CriteriaToSqlConverter, Filter, Operator, SqlConvertOptions};
///
/// let criteria = Criteria::from_filters(vec![Filter::new("age", Operator::GreaterOrEqual, 18)?]);
/// let (query, params) = CriteriaToSqlConverter::convert(&criteria, "user", &SqlConvertOptions::default())?;
/// assert_eq!(query, "SELECT * FROM user WHERE age >= %(parameter_0)s;");
/// assert_eq!(params["parameter_0"], 18.into());
/// # Ok::<(), criteria_pattern::CriteriaError>(())
/// ```
pub struct CriteriaToSqlConverter;

impl CriteriaToSqlConverter {
    /// Converts a criteria tree into a query and named parameters.
    pub fn convert(
        criteria: &Criteria,
        table: &str,
        options: &SqlConvertOptions,
    ) -> CriteriaResult<(String, NamedParams)> {
        let (sql, params) = QueryBuilder::new(&GenericDialect, options).build(criteria, table)?;
        Ok((sql, params.into_named()))
    }
}

/// MySQL converter: unquoted identifiers, positional `%s` placeholders,
/// `CONCAT` wildcards, inline LIMIT/OFFSET.
pub struct CriteriaToMysqlConverter;

impl CriteriaToMysqlConverter {
    /// Converts a criteria tree into a query and positional parameters.
    pub fn convert(
        criteria: &Criteria,
        table: &str,
        options: &SqlConvertOptions,
    ) -> CriteriaResult<(String, Vec<Value>)> {
        let (sql, params) = QueryBuilder::new(&MysqlDialect, options).build(criteria, table)?;
        Ok((sql, params.into_positional()))
    }
}

/// PostgreSQL converter: double-quoted identifiers, `%(parameter_N)s`
/// placeholders, inline LIMIT/OFFSET.
pub struct CriteriaToPostgresqlConverter;

impl CriteriaToPostgresqlConverter {
    /// Converts a criteria tree into a query and named parameters.
    pub fn convert(
        criteria: &Criteria,
        table: &str,
        options: &SqlConvertOptions,
    ) -> CriteriaResult<(String, NamedParams)> {
        let (sql, params) = QueryBuilder::new(&PostgresDialect, options).build(criteria, table)?;
        Ok((sql, params.into_named()))
    }
}

/// SQLite converter: double-quoted identifiers, `:parameter_N`
/// placeholders, LIMIT/OFFSET bound as `:limit_N` / `:offset_N`.
pub struct CriteriaToSqliteConverter;

impl CriteriaToSqliteConverter {
    /// Converts a criteria tree into a query and named parameters.
    pub fn convert(
        criteria: &Criteria,
        table: &str,
        options: &SqlConvertOptions,
    ) -> CriteriaResult<(String, NamedParams)> {
        let (sql, params) = QueryBuilder::new(&SqliteDialect, options).build(criteria, table)?;
        Ok((sql, params.into_named()))
    }
}

impl DialectKind {
    /// Converts with the selected dialect, keeping parameters in binding
    /// order with their names.
    pub fn convert(
        &self,
        criteria: &Criteria,
        table: &str,
        options: &SqlConvertOptions,
    ) -> CriteriaResult<(String, BoundParams)> {
        QueryBuilder::new(self.dialect(), options).build(criteria, table)
    }
}
