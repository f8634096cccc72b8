//! Orders: one field/direction sort key.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Direction, OrderField};
use crate::error::{ModelError, ModelResult};

/// A single sort key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Order {
    field: OrderField,
    direction: Direction,
}

impl Order {
    /// Creates an order, validating the field name.
    pub fn new(field: impl Into<String>, direction: Direction) -> ModelResult<Self> {
        Ok(Self {
            field: OrderField::new(field)?,
            direction,
        })
    }

    /// Creates an ascending order.
    pub fn asc(field: impl Into<String>) -> ModelResult<Self> {
        Self::new(field, Direction::Asc)
    }

    /// Creates a descending order.
    pub fn desc(field: impl Into<String>) -> ModelResult<Self> {
        Self::new(field, Direction::Desc)
    }

    /// Returns the field name.
    pub fn field(&self) -> &str {
        self.field.as_str()
    }

    /// Returns the direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.direction)
    }
}

/// Fails on the first field that appears in more than one order.
pub(crate) fn ensure_unique_fields(orders: &[Order]) -> ModelResult<()> {
    let mut seen = HashSet::new();
    for order in orders {
        if !seen.insert(order.field()) {
            return Err(ModelError::DuplicateOrderField {
                field: order.field().to_string(),
            });
        }
    }
    Ok(())
}
