//! JSON output of a rendered query.

use std::collections::BTreeMap;

use criteria_pattern::{BoundParams, DialectKind, Value};
use serde::Serialize;

/// Parameters in the shape the dialect's drivers expect.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Parameters {
    /// Ordered list for `%s` placeholders.
    Positional(Vec<Value>),
    /// Name to value for named placeholders.
    Named(BTreeMap<String, Value>),
}

/// A rendered query ready to print.
#[derive(Debug, Serialize)]
pub struct Rendered {
    /// Dialect name.
    pub dialect: String,
    /// Query text.
    pub query: String,
    /// Bound parameters.
    pub parameters: Parameters,
}

impl Rendered {
    /// Shapes `params` for `kind`: positional for MySQL, named otherwise.
    pub fn new(kind: DialectKind, query: String, params: BoundParams) -> Self {
        let parameters = if kind.is_positional() {
            Parameters::Positional(params.into_positional())
        } else {
            Parameters::Named(params.into_named())
        };
        Self {
            dialect: kind.to_string(),
            query,
            parameters,
        }
    }
}
