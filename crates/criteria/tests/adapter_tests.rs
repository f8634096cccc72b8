//! ORM adapter integration tests.
//!
//! An in-memory model turns criteria into row predicates, so the lowered
//! conditions can be checked by what they select rather than by their shape.

mod common;

use std::cmp::Ordering;
use std::collections::BTreeMap;

use common::*;
use criteria_pattern::{
    Criteria, CriteriaToModelConverter, Direction, Operator, Order, QueryModel, Value,
};

type Row = BTreeMap<&'static str, Value>;
type Predicate = Box<dyn Fn(&Row) -> bool>;

struct InMemory;

fn compare(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
        (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
        (Value::Integer(a), Value::Float(b)) => (*a as f64).partial_cmp(b),
        (Value::Float(a), Value::Integer(b)) => a.partial_cmp(&(*b as f64)),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

impl QueryModel for InMemory {
    type Condition = Predicate;
    type Ordering = (String, Direction);

    fn condition(&self, field: &str, operator: Operator, value: &Value) -> Predicate {
        let field = field.to_string();
        let value = value.clone();
        Box::new(move |row: &Row| {
            let actual = row.get(field.as_str()).cloned().unwrap_or(Value::Null);
            let text = actual.as_str().unwrap_or_default().to_string();
            let needle = value.as_str().unwrap_or_default();
            let members = value.as_list().unwrap_or_default();
            match operator {
                Operator::Equal => actual == value,
                Operator::NotEqual => actual != value,
                Operator::Greater => compare(&actual, &value) == Some(Ordering::Greater),
                Operator::GreaterOrEqual => matches!(
                    compare(&actual, &value),
                    Some(Ordering::Greater | Ordering::Equal)
                ),
                Operator::Less => compare(&actual, &value) == Some(Ordering::Less),
                Operator::LessOrEqual => {
                    matches!(compare(&actual, &value), Some(Ordering::Less | Ordering::Equal))
                }
                Operator::Like | Operator::Contains => text.contains(needle),
                Operator::NotLike | Operator::NotContains => !text.contains(needle),
                Operator::StartsWith => text.starts_with(needle),
                Operator::NotStartsWith => !text.starts_with(needle),
                Operator::EndsWith => text.ends_with(needle),
                Operator::NotEndsWith => !text.ends_with(needle),
                Operator::Between | Operator::NotBetween => {
                    let inside = matches!(
                        compare(&actual, &members[0]),
                        Some(Ordering::Greater | Ordering::Equal)
                    ) && matches!(
                        compare(&actual, &members[1]),
                        Some(Ordering::Less | Ordering::Equal)
                    );
                    inside == (operator == Operator::Between)
                }
                Operator::IsNull => actual.is_null(),
                Operator::IsNotNull => !actual.is_null(),
                Operator::In => members.contains(&actual),
                Operator::NotIn => !members.contains(&actual),
            }
        })
    }

    fn all(&self, conditions: Vec<Predicate>) -> Predicate {
        Box::new(move |row: &Row| conditions.iter().all(|c| c(row)))
    }

    fn any(&self, conditions: Vec<Predicate>) -> Predicate {
        Box::new(move |row: &Row| conditions.iter().any(|c| c(row)))
    }

    fn negate(&self, condition: Predicate) -> Predicate {
        Box::new(move |row: &Row| !condition(row))
    }

    fn ordering(&self, field: &str, direction: Direction) -> (String, Direction) {
        (field.to_string(), direction)
    }
}

fn users() -> Vec<Row> {
    vec![
        BTreeMap::from([
            ("name", Value::from("John Doe")),
            ("email", Value::from("john@example.com")),
            ("age", Value::from(34)),
        ]),
        BTreeMap::from([
            ("name", Value::from("Jane Roe")),
            ("email", Value::Null),
            ("age", Value::from(16)),
        ]),
        BTreeMap::from([
            ("name", Value::from("Max Mustermann")),
            ("email", Value::Null),
            ("age", Value::from(45)),
        ]),
    ]
}

fn select(criteria: &Criteria, mapping: &BTreeMap<String, String>) -> Vec<String> {
    let (conditions, _) = CriteriaToModelConverter::convert(criteria, &InMemory, mapping);
    users()
        .into_iter()
        .filter(|row| conditions.iter().all(|c| c(row)))
        .filter_map(|row| row.get("name").and_then(Value::as_str).map(str::to_string))
        .collect()
}

// ============================================================================
// Condition Tests
// ============================================================================

/// Test that leaf filters are all applied.
#[test]
fn test_leaf_filters() {
    let criteria = leaf(vec![
        filter("age", Operator::Greater, 18),
        filter("email", Operator::IsNull, ()),
    ]);
    assert_eq!(select(&criteria, &BTreeMap::new()), vec!["Max Mustermann"]);
}

/// Test the nested example against rows.
#[test]
fn test_nested_criteria() {
    let criteria = leaf(vec![filter("name", Operator::StartsWith, "J")])
        & (email_is_set() | !under_age());
    assert_eq!(select(&criteria, &BTreeMap::new()), vec!["John Doe"]);
}

/// Test that negating an empty criteria selects everything.
#[test]
fn test_negated_empty() {
    assert_eq!(select(&!Criteria::empty(), &BTreeMap::new()).len(), 3);
}

/// Test that range and membership operators use every bound.
#[test]
fn test_range_and_membership() {
    let criteria = leaf(vec![filter("age", Operator::Between, (16, 34))])
        & leaf(vec![filter("name", Operator::NotIn, vec!["Jane Roe"])]);
    assert_eq!(select(&criteria, &BTreeMap::new()), vec!["John Doe"]);
}

/// Test that the mapping renames fields before they reach the model.
#[test]
fn test_mapping() {
    let criteria = leaf(vec![filter("years", Operator::Less, 18)]);
    let mapping = BTreeMap::from([("years".to_string(), "age".to_string())]);
    assert_eq!(select(&criteria, &mapping), vec!["Jane Roe"]);
}

// ============================================================================
// Ordering Tests
// ============================================================================

/// Test that orderings follow the resolved orders.
#[test]
fn test_orderings() {
    let criteria = ordered(vec![Order::desc("created").unwrap()])
        & ordered(vec![Order::new("name", Direction::Asc).unwrap()]);
    let mapping = BTreeMap::from([("created".to_string(), "created_at".to_string())]);

    let (conditions, orderings) = CriteriaToModelConverter::convert(&criteria, &InMemory, &mapping);
    assert_eq!(conditions.len(), 1);
    assert_eq!(
        orderings,
        vec![
            ("created_at".to_string(), Direction::Desc),
            ("name".to_string(), Direction::Asc),
        ]
    );
}
