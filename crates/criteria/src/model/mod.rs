//! The criteria data model.
//!
//! Value objects validate their invariants at construction and are immutable
//! afterwards:
//!
//! - [`FilterField`] / [`OrderField`]: non-empty, trimmed, printable names
//! - [`Operator`] / [`Direction`]: closed enumerations
//! - [`Filter`] / [`Order`]: one predicate, one sort key
//! - [`PageSize`] / [`PageNumber`] / [`Pagination`]: positive page values
//! - [`Criteria`]: the expression tree over flat [`LeafCriteria`]

mod criteria;
mod direction;
mod field;
mod filter;
mod operator;
mod order;
mod pagination;
mod value;

pub use criteria::{Criteria, CriteriaBuilder, LeafCriteria};
pub use direction::Direction;
pub use field::{FieldKind, FilterField, OrderField, validate_field_name};
pub use filter::Filter;
pub use operator::Operator;
pub use order::Order;
pub use pagination::{PageNumber, PageSize, Pagination};
pub use value::Value;
