//! Criteria fixtures.
//!
//! Small, named criteria reused across suites so expected SQL stays easy to
//! read next to the tree that produced it.

use criteria_pattern::{Criteria, Filter, Operator, Order, Value};

/// Builds a filter, panicking on invalid input.
pub fn filter(field: &str, operator: Operator, value: impl Into<Value>) -> Filter {
    Filter::new(field, operator, value).expect("valid filter fixture")
}

/// A leaf holding the given filters.
pub fn leaf(filters: Vec<Filter>) -> Criteria {
    Criteria::from_filters(filters)
}

/// `name = 'John Doe'`
pub fn name_is_john_doe() -> Criteria {
    leaf(vec![filter("name", Operator::Equal, "John Doe")])
}

/// `email IS NOT NULL`
pub fn email_is_set() -> Criteria {
    leaf(vec![filter("email", Operator::IsNotNull, ())])
}

/// `age < 18`
pub fn under_age() -> Criteria {
    leaf(vec![filter("age", Operator::Less, 18)])
}

/// `name = 'John Doe' AND (email IS NOT NULL OR NOT age < 18)`
pub fn nested_criteria() -> Criteria {
    name_is_john_doe() & (email_is_set() | !under_age())
}

/// A leaf with only pagination.
pub fn page(page_size: i64, page_number: Option<i64>) -> Criteria {
    Criteria::new(Vec::new(), Vec::new(), Some(page_size), page_number)
        .expect("valid pagination fixture")
}

/// A leaf with only orders.
pub fn ordered(orders: Vec<Order>) -> Criteria {
    Criteria::from_orders(orders).expect("valid orders fixture")
}

/// One filter for every operator, with a value of the right shape.
pub fn one_filter_per_operator() -> Vec<Filter> {
    Operator::ALL
        .iter()
        .map(|&operator| {
            let value: Value = if operator.is_null_check() {
                Value::Null
            } else if operator.is_range() {
                Value::from((1, 10))
            } else if operator.is_membership() {
                Value::from(vec!["a", "b", "c"])
            } else {
                Value::from("x")
            };
            filter("field", operator, value)
        })
        .collect()
}

/// Number of parameters a filter binds.
pub fn expected_param_count(filter: &Filter) -> usize {
    if filter.operator().is_null_check() {
        0
    } else {
        filter.value().as_list().map_or(1, <[Value]>::len)
    }
}
