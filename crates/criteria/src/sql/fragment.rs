//! SQL fragments with bound parameters.

use std::collections::BTreeMap;

use crate::model::Value;

/// A named bound parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlParam {
    /// Parameter name, e.g. `parameter_0` or `limit_1`.
    pub name: String,
    /// Bound value.
    pub value: Value,
}

impl SqlParam {
    /// Creates a parameter.
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A fragment of SQL with the parameters its placeholders refer to, in
/// placeholder order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SqlFragment {
    /// The SQL text.
    pub sql: String,
    /// Bound parameters.
    pub params: Vec<SqlParam>,
}

impl SqlFragment {
    /// Creates a fragment without parameters.
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Creates a fragment with parameters.
    pub fn with_params(sql: impl Into<String>, params: Vec<SqlParam>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    /// Combines with another fragment using AND.
    ///
    /// An empty side collapses: the other side is returned unwrapped.
    pub fn and(self, other: SqlFragment) -> Self {
        self.combine(other, "AND")
    }

    /// Combines with another fragment using OR.
    ///
    /// An empty side collapses: the other side is returned unwrapped.
    pub fn or(self, other: SqlFragment) -> Self {
        self.combine(other, "OR")
    }

    fn combine(mut self, other: SqlFragment, op: &str) -> Self {
        if !self.sql.is_empty() && !other.sql.is_empty() {
            self.sql = format!("({} {} {})", self.sql, op, other.sql);
        } else if !other.sql.is_empty() {
            self.sql = other.sql;
        }
        self.params.extend(other.params);
        self
    }

    /// Negates the fragment; an empty fragment stays empty.
    pub fn negate(self) -> Self {
        if self.sql.is_empty() {
            return self;
        }
        Self {
            sql: format!("NOT ({})", self.sql),
            params: self.params,
        }
    }

    /// Returns true if this fragment is empty.
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }
}

/// Parameters of a rendered query, in binding order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundParams(Vec<SqlParam>);

impl BoundParams {
    pub(crate) fn new(params: Vec<SqlParam>) -> Self {
        Self(params)
    }

    /// Number of bound parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the parameters in binding order.
    pub fn iter(&self) -> impl Iterator<Item = &SqlParam> {
        self.0.iter()
    }

    /// Positional form: values in placeholder order.
    pub fn into_positional(self) -> Vec<Value> {
        self.0.into_iter().map(|p| p.value).collect()
    }

    /// Named form: parameter name to value.
    pub fn into_named(self) -> BTreeMap<String, Value> {
        self.0.into_iter().map(|p| (p.name, p.value)).collect()
    }
}
