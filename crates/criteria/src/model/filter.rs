//! Filters: one field/operator/value predicate.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{FilterField, Operator, Value};
use crate::error::{ModelError, ModelResult};

/// A single predicate over one field.
///
/// The value shape is checked against the operator at construction:
/// BETWEEN and NOT_BETWEEN take a two-element list `[min, max]` (order kept,
/// never sorted), IN and NOT_IN take a non-empty list, IS_NULL and
/// IS_NOT_NULL store null whatever value they are given, every other operator
/// takes a scalar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FilterData")]
pub struct Filter {
    field: FilterField,
    operator: Operator,
    value: Value,
}

impl Filter {
    /// Creates a filter, validating the field name and the value shape.
    pub fn new(
        field: impl Into<String>,
        operator: Operator,
        value: impl Into<Value>,
    ) -> ModelResult<Self> {
        let field = FilterField::new(field)?;
        let value = if operator.is_null_check() {
            Value::Null
        } else {
            value.into()
        };
        check_value_shape(&field, operator, &value)?;
        Ok(Self {
            field,
            operator,
            value,
        })
    }

    /// Returns the field name.
    pub fn field(&self) -> &str {
        self.field.as_str()
    }

    /// Returns the operator.
    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// Returns the value.
    pub fn value(&self) -> &Value {
        &self.value
    }
}

fn check_value_shape(field: &FilterField, operator: Operator, value: &Value) -> ModelResult<()> {
    let invalid = |expected: &'static str| ModelError::InvalidValue {
        field: field.to_string(),
        operator,
        expected,
        value: value.to_string(),
    };

    if operator.is_null_check() {
        return Ok(());
    }

    match value.as_list() {
        Some(items) if operator.is_range() => {
            if items.len() != 2 || items.iter().any(|v| v.as_list().is_some()) {
                return Err(invalid("a list of exactly two scalar values"));
            }
        }
        Some(items) if operator.is_membership() => {
            if items.is_empty() || items.iter().any(|v| v.as_list().is_some()) {
                return Err(invalid("a non-empty list of scalar values"));
            }
        }
        None if operator.is_range() => {
            return Err(invalid("a list of exactly two scalar values"));
        }
        None if operator.is_membership() => {
            return Err(invalid("a non-empty list of scalar values"));
        }
        Some(_) => return Err(invalid("a scalar value")),
        None => {}
    }
    Ok(())
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.operator.is_null_check() {
            write!(f, "{} {}", self.field, self.operator)
        } else {
            write!(f, "{} {} {}", self.field, self.operator, self.value)
        }
    }
}

/// Unvalidated wire form of a [`Filter`].
#[derive(Deserialize)]
struct FilterData {
    field: String,
    operator: Operator,
    #[serde(default = "null_value")]
    value: Value,
}

fn null_value() -> Value {
    Value::Null
}

impl TryFrom<FilterData> for Filter {
    type Error = ModelError;

    fn try_from(data: FilterData) -> Result<Self, Self::Error> {
        Filter::new(data.field, data.operator, data.value)
    }
}
