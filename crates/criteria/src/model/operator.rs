//! Filter operators.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Comparison operator applied by a [`Filter`](super::Filter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operator {
    /// `field = value`
    Equal,
    /// `field != value`
    NotEqual,
    /// `field > value`
    Greater,
    /// `field >= value`
    GreaterOrEqual,
    /// `field < value`
    Less,
    /// `field <= value`
    LessOrEqual,
    /// `field LIKE value`, the value carries its own wildcards.
    Like,
    /// `field NOT LIKE value`
    NotLike,
    /// Substring match, wildcard on both sides.
    Contains,
    /// Negated substring match.
    NotContains,
    /// Prefix match, wildcard suffix.
    StartsWith,
    /// Negated prefix match.
    NotStartsWith,
    /// Suffix match, wildcard prefix.
    EndsWith,
    /// Negated suffix match.
    NotEndsWith,
    /// Inclusive range, value is `[min, max]`.
    Between,
    /// Negated inclusive range.
    NotBetween,
    /// `field IS NULL`, the value is ignored.
    IsNull,
    /// `field IS NOT NULL`, the value is ignored.
    IsNotNull,
    /// Membership in a non-empty list of values.
    In,
    /// Negated membership.
    NotIn,
}

impl Operator {
    /// Every operator, in declaration order.
    pub const ALL: [Operator; 20] = [
        Operator::Equal,
        Operator::NotEqual,
        Operator::Greater,
        Operator::GreaterOrEqual,
        Operator::Less,
        Operator::LessOrEqual,
        Operator::Like,
        Operator::NotLike,
        Operator::Contains,
        Operator::NotContains,
        Operator::StartsWith,
        Operator::NotStartsWith,
        Operator::EndsWith,
        Operator::NotEndsWith,
        Operator::Between,
        Operator::NotBetween,
        Operator::IsNull,
        Operator::IsNotNull,
        Operator::In,
        Operator::NotIn,
    ];

    /// Returns the canonical upper-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Equal => "EQUAL",
            Operator::NotEqual => "NOT_EQUAL",
            Operator::Greater => "GREATER",
            Operator::GreaterOrEqual => "GREATER_OR_EQUAL",
            Operator::Less => "LESS",
            Operator::LessOrEqual => "LESS_OR_EQUAL",
            Operator::Like => "LIKE",
            Operator::NotLike => "NOT_LIKE",
            Operator::Contains => "CONTAINS",
            Operator::NotContains => "NOT_CONTAINS",
            Operator::StartsWith => "STARTS_WITH",
            Operator::NotStartsWith => "NOT_STARTS_WITH",
            Operator::EndsWith => "ENDS_WITH",
            Operator::NotEndsWith => "NOT_ENDS_WITH",
            Operator::Between => "BETWEEN",
            Operator::NotBetween => "NOT_BETWEEN",
            Operator::IsNull => "IS_NULL",
            Operator::IsNotNull => "IS_NOT_NULL",
            Operator::In => "IN",
            Operator::NotIn => "NOT_IN",
        }
    }

    /// Returns true if the operator ignores its value and binds no parameter.
    pub fn is_null_check(&self) -> bool {
        matches!(self, Operator::IsNull | Operator::IsNotNull)
    }

    /// Returns true for BETWEEN and NOT_BETWEEN.
    pub fn is_range(&self) -> bool {
        matches!(self, Operator::Between | Operator::NotBetween)
    }

    /// Returns true for IN and NOT_IN.
    pub fn is_membership(&self) -> bool {
        matches!(self, Operator::In | Operator::NotIn)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Operator::ALL
            .into_iter()
            .find(|op| op.as_str() == upper)
            .ok_or_else(|| format!("unknown operator: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_parse_is_case_insensitive() {
        assert_eq!("equal".parse::<Operator>(), Ok(Operator::Equal));
        assert_eq!("Not_Between".parse::<Operator>(), Ok(Operator::NotBetween));
        assert_eq!("IS_NOT_NULL".parse::<Operator>(), Ok(Operator::IsNotNull));
        assert!("INVALID_OP".parse::<Operator>().is_err());
        assert!("".parse::<Operator>().is_err());
    }

    #[test]
    fn test_operator_names_round_trip() {
        for op in Operator::ALL {
            assert_eq!(op.to_string().parse::<Operator>(), Ok(op));
        }
    }

    #[test]
    fn test_operator_serde_uses_canonical_names() {
        let json = serde_json::to_string(&Operator::GreaterOrEqual).unwrap();
        assert_eq!(json, "\"GREATER_OR_EQUAL\"");
        let op: Operator = serde_json::from_str("\"NOT_IN\"").unwrap();
        assert_eq!(op, Operator::NotIn);
    }

    #[test]
    fn test_operator_classification() {
        assert!(Operator::IsNull.is_null_check());
        assert!(!Operator::Equal.is_null_check());
        assert!(Operator::NotBetween.is_range());
        assert!(Operator::NotIn.is_membership());
        assert!(!Operator::Contains.is_membership());
    }
}
