//! Assertion helpers for converter output.

use criteria_pattern::{CriteriaError, CriteriaResult, InjectionError, IntegrityError, ModelError};

/// Asserts that a conversion failed with an injection error and returns it.
pub fn expect_injection<T: std::fmt::Debug>(result: CriteriaResult<T>) -> InjectionError {
    match result {
        Err(CriteriaError::Injection(err)) => err,
        other => panic!("Expected injection error, got {:?}", other),
    }
}

/// Asserts that a conversion failed with an integrity error and returns it.
pub fn expect_integrity<T: std::fmt::Debug>(result: CriteriaResult<T>) -> IntegrityError {
    match result {
        Err(CriteriaError::Integrity(err)) => err,
        other => panic!("Expected integrity error, got {:?}", other),
    }
}

/// Asserts that a conversion failed with a model error and returns it.
pub fn expect_model<T: std::fmt::Debug>(result: CriteriaResult<T>) -> ModelError {
    match result {
        Err(CriteriaError::Model(err)) => err,
        other => panic!("Expected model error, got {:?}", other),
    }
}

/// Assertion macro for converter output: query text and named parameters.
#[macro_export]
macro_rules! assert_sql {
    ($result:expr, $sql:expr) => {{
        let (sql, _) = $result.expect("conversion should succeed");
        assert_eq!(sql, $sql);
    }};
    ($result:expr, $sql:expr, { $($name:expr => $value:expr),* $(,)? }) => {{
        let (sql, params) = $result.expect("conversion should succeed");
        assert_eq!(sql, $sql);
        #[allow(unused_mut)]
        let mut expected: std::collections::BTreeMap<String, criteria_pattern::Value> =
            std::collections::BTreeMap::new();
        $(expected.insert($name.to_string(), criteria_pattern::Value::from($value));)*
        assert_eq!(params, expected);
    }};
    ($result:expr, $sql:expr, [ $($value:expr),* $(,)? ]) => {{
        let (sql, params) = $result.expect("conversion should succeed");
        assert_eq!(sql, $sql);
        let expected: Vec<criteria_pattern::Value> =
            vec![$(criteria_pattern::Value::from($value)),*];
        assert_eq!(params, expected);
    }};
}
