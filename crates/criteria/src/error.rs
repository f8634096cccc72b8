//! Error types for criteria construction and conversion.
//!
//! Errors follow the three failure families of the crate: malformed value
//! objects ([`ModelError`]), rejected identifiers under an enabled injection
//! guard ([`InjectionError`]), and grammar violations while decoding URL
//! parameters ([`IntegrityError`]). [`CriteriaError`] wraps all three.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

use crate::model::{FieldKind, Operator};

/// The primary error type returned by converters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CriteriaError {
    /// Value object construction errors
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Injection guard rejections
    #[error(transparent)]
    Injection(#[from] InjectionError),

    /// URL grammar and integrity errors
    #[error(transparent)]
    Integrity(#[from] IntegrityError),
}

/// Errors raised while constructing fields, filters, orders, pagination or
/// criteria.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("{kind} field is an empty string, only non-empty strings are allowed")]
    EmptyField { kind: FieldKind },

    #[error("{kind} field '{value}' contains leading or trailing whitespace, only trimmed values are allowed")]
    UntrimmedField { kind: FieldKind, value: String },

    #[error("{kind} field {value:?} contains invalid characters, only printable characters are allowed")]
    NonPrintableField { kind: FieldKind, value: String },

    #[error("operator {operator} on field '{field}' expects {expected}, got {value}")]
    InvalidValue {
        field: String,
        operator: Operator,
        expected: &'static str,
        value: String,
    },

    #[error("orders must have unique fields, field '{field}' appears more than once")]
    DuplicateOrderField { field: String },

    #[error("page size {value} must be a positive integer")]
    InvalidPageSize { value: i64 },

    #[error("page number {value} must be a positive integer")]
    InvalidPageNumber { value: i64 },

    #[error("page number {page_number} cannot be provided without page size")]
    PageNumberWithoutPageSize { page_number: i64 },
}

/// Errors raised by the opt-in injection guards.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InjectionError {
    #[error("invalid table '{table}', valid tables are: {}", valid_tables.join(", "))]
    InvalidTable {
        table: String,
        valid_tables: Vec<String>,
    },

    #[error("invalid column '{column}', valid columns are: {}", valid_columns.join(", "))]
    InvalidColumn {
        column: String,
        valid_columns: Vec<String>,
    },

    #[error("invalid operator '{operator}', valid operators are: {}", valid_operators.join(", "))]
    InvalidOperator {
        operator: String,
        valid_operators: Vec<String>,
    },

    #[error("invalid direction '{direction}', valid directions are: {}", valid_directions.join(", "))]
    InvalidDirection {
        direction: String,
        valid_directions: Vec<String>,
    },

    #[error("pagination {field} {value} exceeds maximum allowed value {max}")]
    PaginationBounds {
        field: &'static str,
        value: u64,
        max: u64,
    },
}

/// Errors raised while decoding criteria from URL query parameters, or while
/// encoding criteria that the URL grammar cannot express.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IntegrityError {
    #[error("{kind} {group} has missing {subkey}")]
    MissingSubkey {
        kind: FieldKind,
        group: String,
        subkey: &'static str,
    },

    #[error("filter {group} has unsupported operator '{operator}'")]
    UnsupportedOperator { group: String, operator: String },

    #[error("order {group} has unsupported direction '{direction}'")]
    UnsupportedDirection { group: String, direction: String },

    #[error("{kind} {group} index must be an integer")]
    IndexNotInteger { kind: FieldKind, group: String },

    #[error("{kind} {group} exceeds maximum limit of {limit}")]
    IndexExceedsLimit {
        kind: FieldKind,
        group: String,
        limit: usize,
    },

    #[error("filter {group} has invalid value '{value}' for operator {operator}")]
    InvalidValue {
        group: String,
        value: String,
        operator: Operator,
    },

    #[error("page_number '{page_number}' cannot be provided without page_size")]
    PageNumberWithoutPageSize { page_number: String },

    #[error("page_size '{value}' must be an integer")]
    PageSizeNotInteger { value: String },

    #[error("page_number '{value}' must be an integer")]
    PageNumberNotInteger { value: String },

    #[error("only flat criteria can be encoded as URL parameters")]
    NotFlat,

    #[error("filter {group} value {value} cannot be encoded as URL parameters: {reason}")]
    UnencodableValue {
        group: String,
        value: String,
        reason: &'static str,
    },
}

/// Result type for criteria operations.
pub type CriteriaResult<T> = Result<T, CriteriaError>;

/// Result type for value object construction.
pub type ModelResult<T> = Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_injection_error_display() {
        let err = InjectionError::InvalidTable {
            table: "user; DROP TABLE user;".to_string(),
            valid_tables: vec!["user".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "invalid table 'user; DROP TABLE user;', valid tables are: user"
        );

        let err = InjectionError::InvalidOperator {
            operator: "EQUAL".to_string(),
            valid_operators: vec!["GREATER".to_string(), "LESS".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "invalid operator 'EQUAL', valid operators are: GREATER, LESS"
        );
    }

    #[test]
    fn test_pagination_bounds_display() {
        let err = InjectionError::PaginationBounds {
            field: "page_size",
            value: 50000,
            max: 10000,
        };
        assert_eq!(
            err.to_string(),
            "pagination page_size 50000 exceeds maximum allowed value 10000"
        );
    }

    #[test]
    fn test_model_error_display() {
        let err = ModelError::EmptyField {
            kind: FieldKind::Filter,
        };
        assert!(err.to_string().starts_with("filter field is an empty string"));

        let err = ModelError::PageNumberWithoutPageSize { page_number: 3 };
        assert_eq!(
            err.to_string(),
            "page number 3 cannot be provided without page size"
        );
    }

    #[test]
    fn test_integrity_error_display() {
        let err = IntegrityError::MissingSubkey {
            kind: FieldKind::Order,
            group: "orders[0]".to_string(),
            subkey: "direction",
        };
        assert_eq!(err.to_string(), "order orders[0] has missing direction");

        let err = IntegrityError::InvalidValue {
            group: "filters[0]".to_string(),
            value: "18".to_string(),
            operator: Operator::Between,
        };
        assert_eq!(
            err.to_string(),
            "filter filters[0] has invalid value '18' for operator BETWEEN"
        );
    }

    #[test]
    fn test_criteria_error_is_transparent() {
        let err: CriteriaError = IntegrityError::NotFlat.into();
        assert_eq!(
            err.to_string(),
            "only flat criteria can be encoded as URL parameters"
        );
        assert!(matches!(err, CriteriaError::Integrity(_)));
    }
}
