//! Criteria to SQL lowering.
//!
//! One algorithm serves every dialect. The tree is walked left to right,
//! depth first; each bound value takes the next index from a counter owned
//! by this builder, so parameter names stay unique across the whole query
//! no matter how deep the tree is.

use tracing::debug;

use super::dialect::{LikePattern, SqlDialect};
use super::fragment::{BoundParams, SqlFragment, SqlParam};
use super::options::SqlConvertOptions;
use crate::error::{CriteriaResult, InjectionError};
use crate::guards;
use crate::model::{Criteria, Filter, Operator, Order, Value};

/// Builds one SQL statement from a criteria tree.
///
/// A builder is scoped to a single conversion; its parameter counter is
/// never shared.
pub struct QueryBuilder<'a> {
    dialect: &'a dyn SqlDialect,
    options: &'a SqlConvertOptions,
    next_index: usize,
}

impl<'a> QueryBuilder<'a> {
    /// Creates a builder for the given dialect and options.
    pub fn new(dialect: &'a dyn SqlDialect, options: &'a SqlConvertOptions) -> Self {
        Self {
            dialect,
            options,
            next_index: 0,
        }
    }

    /// Validates, then renders `SELECT ... FROM table [WHERE] [ORDER BY]
    /// [LIMIT [OFFSET]];`.
    pub fn build(
        mut self,
        criteria: &Criteria,
        table: &str,
    ) -> CriteriaResult<(String, BoundParams)> {
        self.validate(criteria, table)?;

        let mut sql = format!(
            "SELECT {} FROM {}",
            self.build_select_list(),
            self.dialect.quote_identifier(table)
        );
        let mut params = Vec::new();

        if criteria.has_filters() {
            let where_clause = self.lower(criteria);
            if !where_clause.is_empty() {
                sql.push_str(" WHERE ");
                sql.push_str(&where_clause.sql);
                params.extend(where_clause.params);
            }
        }

        if criteria.has_orders() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&self.build_order_by(&criteria.orders()));
        }

        if let Some(pagination) = criteria.pagination() {
            let (limit, offset) = if self.dialect.binds_pagination() {
                let limit = self.bind(&mut params, "limit", count_value(pagination.limit()));
                let offset = pagination
                    .offset()
                    .map(|offset| self.bind(&mut params, "offset", count_value(offset)));
                (limit, offset)
            } else {
                (
                    pagination.limit().to_string(),
                    pagination.offset().map(|offset| offset.to_string()),
                )
            };
            sql.push(' ');
            sql.push_str(&self.dialect.limit_offset(&limit, offset.as_deref()));
        }

        sql.push(';');

        debug!(
            dialect = self.dialect.name(),
            table = %table,
            params = params.len(),
            "converted criteria to SQL"
        );

        Ok((sql, BoundParams::new(params)))
    }

    /// Runs the enabled injection guards in a fixed order: table, columns,
    /// criteria fields, operators, directions, pagination bounds.
    fn validate(&self, criteria: &Criteria, table: &str) -> Result<(), InjectionError> {
        let options = self.options;

        if options.check_table_injection {
            guards::check_table(table, &options.valid_tables)?;
        }

        if options.check_column_injection {
            for column in &options.columns {
                guards::check_column(column, &options.valid_columns)?;
            }
            for column in options.columns_mapping.values() {
                guards::check_column(column, &options.valid_columns)?;
            }
        }

        if options.check_criteria_injection {
            for filter in criteria.filters() {
                guards::check_column(filter.field(), &options.valid_columns)?;
            }
            for order in criteria.orders() {
                guards::check_column(order.field(), &options.valid_columns)?;
            }
        }

        if options.check_operator_injection {
            for filter in criteria.filters() {
                guards::check_operator(filter.operator(), &options.valid_operators)?;
            }
        }

        if options.check_direction_injection {
            for order in criteria.orders() {
                guards::check_direction(order.direction(), &options.valid_directions)?;
            }
        }

        if options.check_pagination_bounds {
            guards::check_pagination_bounds(
                criteria.pagination(),
                options.max_page_size,
                options.max_page_number,
            )?;
        }

        Ok(())
    }

    fn build_select_list(&self) -> String {
        self.options
            .columns
            .iter()
            .map(|column| match self.options.mapped(column) {
                "*" => "*".to_string(),
                name => self.dialect.quote_identifier(name),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn build_order_by(&self, orders: &[&Order]) -> String {
        orders
            .iter()
            .map(|order| format!("{} {}", self.column(order.field()), order.direction()))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn column(&self, field: &str) -> String {
        self.dialect.quote_identifier(self.options.mapped(field))
    }

    /// Binds a value under `{prefix}_{index}` and returns its placeholder.
    fn bind(&mut self, params: &mut Vec<SqlParam>, prefix: &str, value: Value) -> String {
        let name = format!("{}_{}", prefix, self.next_index);
        self.next_index += 1;
        let placeholder = self.dialect.placeholder(&name);
        params.push(SqlParam { name, value });
        placeholder
    }

    /// Lowers a criteria node to a boolean expression.
    ///
    /// Filters within one leaf are joined by AND without parentheses; empty
    /// children collapse.
    pub fn lower(&mut self, criteria: &Criteria) -> SqlFragment {
        match criteria {
            Criteria::Leaf(leaf) => {
                let mut parts = Vec::with_capacity(leaf.filters().len());
                let mut params = Vec::new();
                for filter in leaf.filters() {
                    let fragment = self.lower_filter(filter);
                    parts.push(fragment.sql);
                    params.extend(fragment.params);
                }
                SqlFragment::with_params(parts.join(" AND "), params)
            }
            Criteria::And(left, right) => {
                let left = self.lower(left);
                let right = self.lower(right);
                left.and(right)
            }
            Criteria::Or(left, right) => {
                let left = self.lower(left);
                let right = self.lower(right);
                left.or(right)
            }
            Criteria::Not(inner) => self.lower(inner).negate(),
        }
    }

    fn lower_filter(&mut self, filter: &Filter) -> SqlFragment {
        let field = self.column(filter.field());
        let mut params = Vec::new();

        let sql = match filter.operator() {
            Operator::Equal => self.compare(&mut params, &field, "=", filter),
            Operator::NotEqual => self.compare(&mut params, &field, "!=", filter),
            Operator::Greater => self.compare(&mut params, &field, ">", filter),
            Operator::GreaterOrEqual => self.compare(&mut params, &field, ">=", filter),
            Operator::Less => self.compare(&mut params, &field, "<", filter),
            Operator::LessOrEqual => self.compare(&mut params, &field, "<=", filter),
            Operator::Like => self.compare(&mut params, &field, "LIKE", filter),
            Operator::NotLike => self.compare(&mut params, &field, "NOT LIKE", filter),
            Operator::Contains => {
                self.pattern(&mut params, &field, "LIKE", LikePattern::Contains, filter)
            }
            Operator::NotContains => {
                self.pattern(&mut params, &field, "NOT LIKE", LikePattern::Contains, filter)
            }
            Operator::StartsWith => {
                self.pattern(&mut params, &field, "LIKE", LikePattern::StartsWith, filter)
            }
            Operator::NotStartsWith => {
                self.pattern(&mut params, &field, "NOT LIKE", LikePattern::StartsWith, filter)
            }
            Operator::EndsWith => {
                self.pattern(&mut params, &field, "LIKE", LikePattern::EndsWith, filter)
            }
            Operator::NotEndsWith => {
                self.pattern(&mut params, &field, "NOT LIKE", LikePattern::EndsWith, filter)
            }
            Operator::Between => {
                let bounds = self.bind_each(&mut params, filter);
                format!("{} BETWEEN {}", field, bounds.join(" AND "))
            }
            Operator::NotBetween => {
                let bounds = self.bind_each(&mut params, filter);
                format!("{} NOT BETWEEN {}", field, bounds.join(" AND "))
            }
            Operator::IsNull => format!("{} IS NULL", field),
            Operator::IsNotNull => format!("{} IS NOT NULL", field),
            Operator::In => {
                let members = self.bind_each(&mut params, filter);
                format!("{} IN ({})", field, members.join(", "))
            }
            Operator::NotIn => {
                let members = self.bind_each(&mut params, filter);
                format!("{} NOT IN ({})", field, members.join(", "))
            }
        };

        SqlFragment::with_params(sql, params)
    }

    fn compare(
        &mut self,
        params: &mut Vec<SqlParam>,
        field: &str,
        op: &str,
        filter: &Filter,
    ) -> String {
        let placeholder = self.bind(params, "parameter", filter.value().clone());
        format!("{} {} {}", field, op, placeholder)
    }

    fn pattern(
        &mut self,
        params: &mut Vec<SqlParam>,
        field: &str,
        op: &str,
        pattern: LikePattern,
        filter: &Filter,
    ) -> String {
        let placeholder = self.bind(params, "parameter", filter.value().clone());
        format!("{} {} {}", field, op, self.dialect.like_pattern(&placeholder, pattern))
    }

    /// Binds every element of a list value in order.
    fn bind_each(&mut self, params: &mut Vec<SqlParam>, filter: &Filter) -> Vec<String> {
        let values = match filter.value() {
            Value::List(values) => values.as_slice(),
            single => std::slice::from_ref(single),
        };
        values
            .iter()
            .map(|value| self.bind(params, "parameter", value.clone()))
            .collect()
    }
}

fn count_value(count: u64) -> Value {
    Value::Integer(i64::try_from(count).unwrap_or(i64::MAX))
}
