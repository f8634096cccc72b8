//! Criteria Pattern
//!
//! This crate models query intent (filters, orders and pagination) as an
//! immutable expression tree and converts it to parameterized SQL, to and from
//! URL query parameters, and onto ORM query types.
//!
//! # Features
//!
//! - **Expression tree**: flat criteria composed with AND, OR and NOT
//! - **SQL dialects**: generic pyformat, MySQL, PostgreSQL, SQLite
//! - **Parameterized output**: every value is bound, never inlined
//! - **Injection guards**: whitelists for tables, columns, operators, directions and pagination
//! - **URL parsing**: `filters[i][field|operator|value]`, `orders[i][field|direction]`, `page_size`, `page_number`
//!
//! # Architecture
//!
//! - [`model`] - Filters, orders, pagination and the [`Criteria`] tree
//! - [`sql`] - Dialects, the shared query builder and per-dialect converters
//! - [`url`](self::url) - URL query parameters to criteria and back
//! - [`guards`] - Whitelist checks shared by the converters
//! - [`adapter`] - Lowering onto ORM query types
//! - [`error`] - Error types for all operations
//!
//! # Quick Start
//!
//! ```
//! use criteria_pattern::{
//!     Criteria, CriteriaToPostgresqlConverter, Filter, Operator, Order, SqlConvertOptions,
//! };
//!
//! let adults = Criteria::new(
//!     vec![Filter::new("age", Operator::GreaterOrEqual, 18)?],
//!     vec![Order::asc("name")?],
//!     Some(20),
//!     Some(3),
//! )?;
//! let smiths = Criteria::from_filters(vec![Filter::new("name", Operator::EndsWith, "Smith")?]);
//!
//! let (query, params) = CriteriaToPostgresqlConverter::convert(
//!     &(adults & !smiths),
//!     "user",
//!     &SqlConvertOptions::default(),
//! )?;
//!
//! assert_eq!(
//!     query,
//!     "SELECT * FROM \"user\" WHERE (\"age\" >= %(parameter_0)s AND NOT (\"name\" LIKE '%%' || %(parameter_1)s)) \
//!      ORDER BY \"name\" ASC LIMIT 20 OFFSET 40;"
//! );
//! assert_eq!(params.len(), 2);
//! # Ok::<(), criteria_pattern::CriteriaError>(())
//! ```
//!
//! # URLs
//!
//! ```
//! use criteria_pattern::{Operator, UrlConvertOptions, UrlToCriteriaConverter};
//!
//! let criteria = UrlToCriteriaConverter::convert(
//!     "/users?filters[0][field]=status&filters[0][operator]=IN&filters[0][value]=active,pending&page_size=10",
//!     &UrlConvertOptions::default(),
//! )?;
//! assert_eq!(criteria.filters()[0].operator(), Operator::In);
//! assert_eq!(criteria.pagination().map(|p| p.limit()), Some(10));
//! # Ok::<(), criteria_pattern::CriteriaError>(())
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod adapter;
pub mod error;
pub mod guards;
pub mod model;
pub mod sql;
pub mod url;

// Re-export commonly used types at crate root
pub use error::{
    CriteriaError, CriteriaResult, InjectionError, IntegrityError, ModelError, ModelResult,
};
pub use model::{
    Criteria, CriteriaBuilder, Direction, FieldKind, Filter, Operator, Order, Pagination, Value,
};

// Re-export converters
pub use adapter::{CriteriaToModelConverter, QueryModel};
pub use sql::{
    BoundParams, CriteriaToMysqlConverter, CriteriaToPostgresqlConverter, CriteriaToSqlConverter,
    CriteriaToSqliteConverter, DialectKind, NamedParams, SqlConvertOptions,
};
pub use self::url::{CriteriaToUrlConverter, UrlConvertOptions, UrlToCriteriaConverter};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
