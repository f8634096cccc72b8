//! Options for SQL conversion.
//!
//! Every injection check is off by default; enabling one makes the matching
//! whitelist authoritative, so an empty whitelist rejects everything.
//!
//! ```rust
//! use criteria_pattern::SqlConvertOptions;
//!
//! let options = SqlConvertOptions {
//!     check_table_injection: true,
//!     valid_tables: vec!["user".to_string()],
//!     ..Default::default()
//! }
//! .with_columns(["id", "name"]);
//! assert_eq!(options.columns, vec!["id", "name"]);
//! ```

use std::collections::BTreeMap;

use crate::model::{Direction, Operator};

/// Options accepted by every SQL converter.
#[derive(Debug, Clone)]
pub struct SqlConvertOptions {
    /// Select list. Defaults to `["*"]`.
    pub columns: Vec<String>,
    /// Pattern-facing field name to rendered column name.
    pub columns_mapping: BTreeMap<String, String>,

    /// Check `table` against `valid_tables`.
    pub check_table_injection: bool,
    /// Check `columns` and mapping targets against `valid_columns`.
    pub check_column_injection: bool,
    /// Check filter and order fields (before mapping) against `valid_columns`.
    pub check_criteria_injection: bool,
    /// Check filter operators against `valid_operators`.
    pub check_operator_injection: bool,
    /// Check order directions against `valid_directions`.
    pub check_direction_injection: bool,
    /// Check resolved pagination against the maxima.
    pub check_pagination_bounds: bool,

    /// Allowed tables.
    pub valid_tables: Vec<String>,
    /// Allowed columns.
    pub valid_columns: Vec<String>,
    /// Allowed operators.
    pub valid_operators: Vec<Operator>,
    /// Allowed directions.
    pub valid_directions: Vec<Direction>,
    /// Largest accepted page size.
    pub max_page_size: Option<u64>,
    /// Largest accepted page number.
    pub max_page_number: Option<u64>,
}

impl Default for SqlConvertOptions {
    fn default() -> Self {
        Self {
            columns: vec!["*".to_string()],
            columns_mapping: BTreeMap::new(),
            check_table_injection: false,
            check_column_injection: false,
            check_criteria_injection: false,
            check_operator_injection: false,
            check_direction_injection: false,
            check_pagination_bounds: false,
            valid_tables: Vec::new(),
            valid_columns: Vec::new(),
            valid_operators: Vec::new(),
            valid_directions: Vec::new(),
            max_page_size: None,
            max_page_number: None,
        }
    }
}

impl SqlConvertOptions {
    /// Replaces the select list.
    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Adds one field-to-column mapping.
    pub fn with_column_mapping(
        mut self,
        field: impl Into<String>,
        column: impl Into<String>,
    ) -> Self {
        self.columns_mapping.insert(field.into(), column.into());
        self
    }

    /// Enables the table check with the given whitelist.
    pub fn with_valid_tables<I, S>(mut self, tables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.check_table_injection = true;
        self.valid_tables = tables.into_iter().map(Into::into).collect();
        self
    }

    /// Enables the column and criteria checks with the given whitelist.
    pub fn with_valid_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.check_column_injection = true;
        self.check_criteria_injection = true;
        self.valid_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Enables the operator check with the given whitelist.
    pub fn with_valid_operators(mut self, operators: impl IntoIterator<Item = Operator>) -> Self {
        self.check_operator_injection = true;
        self.valid_operators = operators.into_iter().collect();
        self
    }

    /// Enables the direction check with the given whitelist.
    pub fn with_valid_directions(
        mut self,
        directions: impl IntoIterator<Item = Direction>,
    ) -> Self {
        self.check_direction_injection = true;
        self.valid_directions = directions.into_iter().collect();
        self
    }

    /// Enables pagination bounds.
    pub fn with_pagination_bounds(
        mut self,
        max_page_size: Option<u64>,
        max_page_number: Option<u64>,
    ) -> Self {
        self.check_pagination_bounds = true;
        self.max_page_size = max_page_size;
        self.max_page_number = max_page_number;
        self
    }

    /// Returns the rendered name for a field, applying the mapping.
    pub fn mapped<'a>(&'a self, field: &'a str) -> &'a str {
        self.columns_mapping
            .get(field)
            .map(String::as_str)
            .unwrap_or(field)
    }
}
