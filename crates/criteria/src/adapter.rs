//! Lowering criteria onto an ORM's query-building types.
//!
//! Implement [`QueryModel`] for a model type to describe how that ORM
//! spells conditions and orderings; [`CriteriaToModelConverter`] then walks
//! the tree and combines them.

use std::collections::BTreeMap;

use tracing::debug;

use crate::model::{Criteria, Direction, Operator, Value};

/// Query-building surface of an ORM model.
pub trait QueryModel {
    /// A single boolean condition.
    type Condition;
    /// A single sort key.
    type Ordering;

    /// Builds the condition `field <operator> value`.
    fn condition(&self, field: &str, operator: Operator, value: &Value) -> Self::Condition;

    /// Conjunction of `conditions`.
    fn all(&self, conditions: Vec<Self::Condition>) -> Self::Condition;

    /// Disjunction of `conditions`.
    fn any(&self, conditions: Vec<Self::Condition>) -> Self::Condition;

    /// Negation of `condition`.
    fn negate(&self, condition: Self::Condition) -> Self::Condition;

    /// Builds a sort key.
    fn ordering(&self, field: &str, direction: Direction) -> Self::Ordering;
}

/// Converts criteria into a model's conditions and orderings.
pub struct CriteriaToModelConverter;

impl CriteriaToModelConverter {
    /// Returns the conditions to apply (implicitly AND-ed) and the orderings
    /// in priority order. Fields are renamed through `mapping` first.
    pub fn convert<M: QueryModel>(
        criteria: &Criteria,
        model: &M,
        mapping: &BTreeMap<String, String>,
    ) -> (Vec<M::Condition>, Vec<M::Ordering>) {
        let conditions = lower(criteria, model, mapping);
        let orderings: Vec<_> = criteria
            .orders()
            .into_iter()
            .map(|order| model.ordering(mapped(mapping, order.field()), order.direction()))
            .collect();

        debug!(
            conditions = conditions.len(),
            orderings = orderings.len(),
            "converted criteria to model query"
        );
        (conditions, orderings)
    }
}

fn mapped<'a>(mapping: &'a BTreeMap<String, String>, field: &'a str) -> &'a str {
    mapping.get(field).map(String::as_str).unwrap_or(field)
}

fn lower<M: QueryModel>(
    criteria: &Criteria,
    model: &M,
    mapping: &BTreeMap<String, String>,
) -> Vec<M::Condition> {
    match criteria {
        Criteria::Leaf(leaf) => leaf
            .filters()
            .iter()
            .map(|filter| {
                model.condition(mapped(mapping, filter.field()), filter.operator(), filter.value())
            })
            .collect(),
        Criteria::And(left, right) => {
            let mut conditions = lower(left, model, mapping);
            conditions.extend(lower(right, model, mapping));
            vec![model.all(conditions)]
        }
        Criteria::Or(left, right) => {
            let mut conditions = lower(left, model, mapping);
            conditions.extend(lower(right, model, mapping));
            vec![model.any(conditions)]
        }
        Criteria::Not(inner) => {
            let conditions = lower(inner, model, mapping);
            if conditions.is_empty() {
                Vec::new()
            } else {
                vec![model.negate(model.all(conditions))]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Filter, Order};

    struct Text;

    impl QueryModel for Text {
        type Condition = String;
        type Ordering = String;

        fn condition(&self, field: &str, operator: Operator, value: &Value) -> String {
            format!("{} {} {}", field, operator, value)
        }

        fn all(&self, conditions: Vec<String>) -> String {
            format!("all({})", conditions.join(", "))
        }

        fn any(&self, conditions: Vec<String>) -> String {
            format!("any({})", conditions.join(", "))
        }

        fn negate(&self, condition: String) -> String {
            format!("not({})", condition)
        }

        fn ordering(&self, field: &str, direction: Direction) -> String {
            format!("{} {}", field, direction)
        }
    }

    #[test]
    fn test_leaf_yields_one_condition_per_filter() {
        let criteria = Criteria::new(
            vec![
                Filter::new("name", Operator::Equal, "John").unwrap(),
                Filter::new("age", Operator::Greater, 18).unwrap(),
            ],
            vec![Order::asc("name").unwrap()],
            None,
            None,
        )
        .unwrap();

        let (conditions, orderings) =
            CriteriaToModelConverter::convert(&criteria, &Text, &BTreeMap::new());
        assert_eq!(conditions, vec!["name EQUAL 'John'", "age GREATER 18"]);
        assert_eq!(orderings, vec!["name ASC"]);
    }

    #[test]
    fn test_composites_wrap_sides() {
        let a = Criteria::from_filters(vec![Filter::new("a", Operator::Equal, 1).unwrap()]);
        let b = Criteria::from_filters(vec![Filter::new("b", Operator::Equal, 2).unwrap()]);
        let c = Criteria::from_filters(vec![Filter::new("c", Operator::IsNull, ()).unwrap()]);

        let criteria = (a & b) | !c;
        let mapping = BTreeMap::from([("a".to_string(), "alpha".to_string())]);
        let (conditions, _) = CriteriaToModelConverter::convert(&criteria, &Text, &mapping);
        assert_eq!(
            conditions,
            vec!["any(all(alpha EQUAL 1, b EQUAL 2), not(all(c IS_NULL NULL)))"]
        );
    }

    #[test]
    fn test_empty_negation_is_dropped() {
        let criteria = !Criteria::empty();
        let (conditions, orderings) =
            CriteriaToModelConverter::convert(&criteria, &Text, &BTreeMap::new());
        assert!(conditions.is_empty());
        assert!(orderings.is_empty());
    }
}
