//! The criteria expression tree.
//!
//! A [`Criteria`] is either a flat leaf holding filters, orders and
//! pagination, or a boolean combination of other criteria. Combining never
//! copies or mutates the operands: every node holds its children behind
//! [`Arc`], so a subtree can be shared by several trees.
//!
//! ```
//! use criteria_pattern::{Criteria, Filter, Operator};
//!
//! let adults = Criteria::from_filters(vec![Filter::new("age", Operator::GreaterOrEqual, 18)?]);
//! let johns = Criteria::from_filters(vec![Filter::new("name", Operator::Equal, "John")?]);
//!
//! let tree = &adults & !&johns;
//! assert_eq!(tree.filters().len(), 2);
//! # Ok::<(), criteria_pattern::ModelError>(())
//! ```

use std::fmt;
use std::ops::{BitAnd, BitOr, Not};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::order::ensure_unique_fields;
use super::{Filter, Order, PageNumber, PageSize, Pagination};
use crate::error::{ModelError, ModelResult};

/// A flat criteria: filters joined by AND, orders, and optional pagination.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "LeafData", into = "LeafData")]
pub struct LeafCriteria {
    filters: Vec<Filter>,
    orders: Vec<Order>,
    pagination: Option<Pagination>,
}

impl LeafCriteria {
    /// Creates a leaf, rejecting duplicate order fields and a page number
    /// without a page size.
    pub fn new(
        filters: Vec<Filter>,
        orders: Vec<Order>,
        page_size: Option<i64>,
        page_number: Option<i64>,
    ) -> ModelResult<Self> {
        ensure_unique_fields(&orders)?;
        let pagination = Pagination::new(page_size, page_number)?;
        Ok(Self {
            filters,
            orders,
            pagination,
        })
    }

    /// Returns the filters.
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Returns the orders.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Returns the pagination, if any.
    pub fn pagination(&self) -> Option<Pagination> {
        self.pagination
    }
}

/// Wire form of a [`LeafCriteria`].
#[derive(Serialize, Deserialize)]
struct LeafData {
    #[serde(default)]
    filters: Vec<Filter>,
    #[serde(default)]
    orders: Vec<Order>,
    #[serde(default)]
    page_size: Option<i64>,
    #[serde(default)]
    page_number: Option<i64>,
}

impl TryFrom<LeafData> for LeafCriteria {
    type Error = ModelError;

    fn try_from(data: LeafData) -> Result<Self, Self::Error> {
        LeafCriteria::new(data.filters, data.orders, data.page_size, data.page_number)
    }
}

impl From<LeafCriteria> for LeafData {
    fn from(leaf: LeafCriteria) -> Self {
        Self {
            page_size: leaf.pagination.map(|p| p.page_size.get() as i64),
            page_number: leaf
                .pagination
                .and_then(|p| p.page_number)
                .map(|n| n.get() as i64),
            filters: leaf.filters,
            orders: leaf.orders,
        }
    }
}

/// An immutable query-intent tree.
///
/// Combinators associate as called: `a & b & c` is
/// `And(And(a, b), c)`. Filters and orders of a composite are its children's,
/// concatenated left to right depth first; `Not` passes its child's filters
/// through unchanged and negation only happens when rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criteria {
    /// A flat criteria.
    Leaf(Arc<LeafCriteria>),
    /// Both sides must hold.
    And(Arc<Criteria>, Arc<Criteria>),
    /// Either side must hold.
    Or(Arc<Criteria>, Arc<Criteria>),
    /// The wrapped criteria must not hold.
    Not(Arc<Criteria>),
}

impl Criteria {
    /// Creates a flat criteria.
    pub fn new(
        filters: Vec<Filter>,
        orders: Vec<Order>,
        page_size: Option<i64>,
        page_number: Option<i64>,
    ) -> ModelResult<Self> {
        LeafCriteria::new(filters, orders, page_size, page_number).map(Self::from)
    }

    /// Creates a flat criteria with no filters, orders or pagination.
    pub fn empty() -> Self {
        Self::from(LeafCriteria::default())
    }

    /// Creates a flat criteria holding only filters.
    pub fn from_filters(filters: Vec<Filter>) -> Self {
        Self::from(LeafCriteria {
            filters,
            ..Default::default()
        })
    }

    /// Creates a flat criteria holding only orders.
    pub fn from_orders(orders: Vec<Order>) -> ModelResult<Self> {
        Self::new(Vec::new(), orders, None, None)
    }

    /// Starts building a flat criteria.
    pub fn builder() -> CriteriaBuilder {
        CriteriaBuilder::default()
    }

    /// Combines with `other` so both must hold.
    pub fn and(self, other: Criteria) -> Criteria {
        Criteria::And(Arc::new(self), Arc::new(other))
    }

    /// Combines with `other` so either may hold.
    pub fn or(self, other: Criteria) -> Criteria {
        Criteria::Or(Arc::new(self), Arc::new(other))
    }

    /// Wraps this criteria in a negation.
    pub fn negate(self) -> Criteria {
        Criteria::Not(Arc::new(self))
    }

    /// Returns true for a flat criteria.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Criteria::Leaf(_))
    }

    /// Returns the leaf if this criteria is flat.
    pub fn as_leaf(&self) -> Option<&LeafCriteria> {
        match self {
            Criteria::Leaf(leaf) => Some(leaf),
            _ => None,
        }
    }

    /// Returns every filter in the tree, left to right, depth first.
    pub fn filters(&self) -> Vec<&Filter> {
        let mut out = Vec::new();
        self.collect_filters(&mut out);
        out
    }

    fn collect_filters<'a>(&'a self, out: &mut Vec<&'a Filter>) {
        match self {
            Criteria::Leaf(leaf) => out.extend(leaf.filters.iter()),
            Criteria::And(left, right) | Criteria::Or(left, right) => {
                left.collect_filters(out);
                right.collect_filters(out);
            }
            Criteria::Not(inner) => inner.collect_filters(out),
        }
    }

    /// Returns every order in the tree, left to right, depth first.
    pub fn orders(&self) -> Vec<&Order> {
        let mut out = Vec::new();
        self.collect_orders(&mut out);
        out
    }

    fn collect_orders<'a>(&'a self, out: &mut Vec<&'a Order>) {
        match self {
            Criteria::Leaf(leaf) => out.extend(leaf.orders.iter()),
            Criteria::And(left, right) | Criteria::Or(left, right) => {
                left.collect_orders(out);
                right.collect_orders(out);
            }
            Criteria::Not(inner) => inner.collect_orders(out),
        }
    }

    /// Resolves pagination: a composite takes its left (or wrapped) side's
    /// pagination and falls back to the right side's.
    pub fn pagination(&self) -> Option<Pagination> {
        match self {
            Criteria::Leaf(leaf) => leaf.pagination,
            Criteria::And(left, right) | Criteria::Or(left, right) => {
                left.pagination().or_else(|| right.pagination())
            }
            Criteria::Not(inner) => inner.pagination(),
        }
    }

    /// Returns the resolved page size.
    pub fn page_size(&self) -> Option<PageSize> {
        self.pagination().map(|p| p.page_size)
    }

    /// Returns the resolved page number.
    pub fn page_number(&self) -> Option<PageNumber> {
        self.pagination().and_then(|p| p.page_number)
    }

    /// Returns true if any leaf holds a filter.
    pub fn has_filters(&self) -> bool {
        match self {
            Criteria::Leaf(leaf) => !leaf.filters.is_empty(),
            Criteria::And(left, right) | Criteria::Or(left, right) => {
                left.has_filters() || right.has_filters()
            }
            Criteria::Not(inner) => inner.has_filters(),
        }
    }

    /// Returns true if any leaf holds an order.
    pub fn has_orders(&self) -> bool {
        match self {
            Criteria::Leaf(leaf) => !leaf.orders.is_empty(),
            Criteria::And(left, right) | Criteria::Or(left, right) => {
                left.has_orders() || right.has_orders()
            }
            Criteria::Not(inner) => inner.has_orders(),
        }
    }

    /// Returns true if pagination resolves.
    pub fn has_pagination(&self) -> bool {
        self.pagination().is_some()
    }

    /// Returns true if a page size resolves.
    pub fn has_page_size(&self) -> bool {
        self.page_size().is_some()
    }

    /// Returns true if a page number resolves.
    pub fn has_page_number(&self) -> bool {
        self.page_number().is_some()
    }
}

impl Default for Criteria {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<LeafCriteria> for Criteria {
    fn from(leaf: LeafCriteria) -> Self {
        Criteria::Leaf(Arc::new(leaf))
    }
}

impl BitAnd for Criteria {
    type Output = Criteria;

    fn bitand(self, rhs: Criteria) -> Criteria {
        self.and(rhs)
    }
}

impl BitAnd for &Criteria {
    type Output = Criteria;

    fn bitand(self, rhs: &Criteria) -> Criteria {
        self.clone().and(rhs.clone())
    }
}

impl BitAnd<Criteria> for &Criteria {
    type Output = Criteria;

    fn bitand(self, rhs: Criteria) -> Criteria {
        self.clone().and(rhs)
    }
}

impl BitOr for Criteria {
    type Output = Criteria;

    fn bitor(self, rhs: Criteria) -> Criteria {
        self.or(rhs)
    }
}

impl BitOr for &Criteria {
    type Output = Criteria;

    fn bitor(self, rhs: &Criteria) -> Criteria {
        self.clone().or(rhs.clone())
    }
}

impl BitOr<Criteria> for &Criteria {
    type Output = Criteria;

    fn bitor(self, rhs: Criteria) -> Criteria {
        self.clone().or(rhs)
    }
}

impl Not for Criteria {
    type Output = Criteria;

    fn not(self) -> Criteria {
        self.negate()
    }
}

impl Not for &Criteria {
    type Output = Criteria;

    fn not(self) -> Criteria {
        self.clone().negate()
    }
}

impl fmt::Display for Criteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Criteria::Leaf(leaf) if leaf.filters.is_empty() => write!(f, "TRUE"),
            Criteria::Leaf(leaf) => {
                for (i, filter) in leaf.filters.iter().enumerate() {
                    if i > 0 {
                        write!(f, " AND ")?;
                    }
                    write!(f, "{}", filter)?;
                }
                Ok(())
            }
            Criteria::And(left, right) => write!(f, "({} AND {})", left, right),
            Criteria::Or(left, right) => write!(f, "({} OR {})", left, right),
            Criteria::Not(inner) => write!(f, "NOT ({})", inner),
        }
    }
}

/// Builder for flat criteria.
#[derive(Debug, Clone, Default)]
pub struct CriteriaBuilder {
    filters: Vec<Filter>,
    orders: Vec<Order>,
    page_size: Option<i64>,
    page_number: Option<i64>,
}

impl CriteriaBuilder {
    /// Appends a filter.
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Appends several filters.
    pub fn with_filters(mut self, filters: impl IntoIterator<Item = Filter>) -> Self {
        self.filters.extend(filters);
        self
    }

    /// Appends an order.
    pub fn with_order(mut self, order: Order) -> Self {
        self.orders.push(order);
        self
    }

    /// Appends several orders.
    pub fn with_orders(mut self, orders: impl IntoIterator<Item = Order>) -> Self {
        self.orders.extend(orders);
        self
    }

    /// Sets the page size.
    pub fn with_page_size(mut self, page_size: i64) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Sets the page number.
    pub fn with_page_number(mut self, page_number: i64) -> Self {
        self.page_number = Some(page_number);
        self
    }

    /// Validates and builds the criteria.
    pub fn build(self) -> ModelResult<Criteria> {
        Criteria::new(self.filters, self.orders, self.page_size, self.page_number)
    }
}
