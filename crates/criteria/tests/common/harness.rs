//! Cross-dialect test harness.
//!
//! [`dialect_test!`] expands one test body into a test per dialect, the same
//! way a backend matrix would, so dialect-independent properties are checked
//! everywhere at once.

use criteria_pattern::sql::BoundParams;
use criteria_pattern::{Criteria, CriteriaResult, DialectKind, SqlConvertOptions};

/// Every dialect under test.
pub const ALL_DIALECTS: [DialectKind; 4] = [
    DialectKind::Generic,
    DialectKind::Mysql,
    DialectKind::Postgresql,
    DialectKind::Sqlite,
];

/// Converts with default options.
pub fn convert_default(
    kind: DialectKind,
    criteria: &Criteria,
    table: &str,
) -> CriteriaResult<(String, BoundParams)> {
    kind.convert(criteria, table, &SqlConvertOptions::default())
}

/// Generates one test per dialect from a body taking a [`DialectKind`].
#[macro_export]
macro_rules! dialect_test {
    ($test_name:ident, $test_fn:expr) => {
        paste::paste! {
            #[test]
            fn [<generic_ $test_name>]() {
                let test_fn: fn(criteria_pattern::DialectKind) = $test_fn;
                test_fn(criteria_pattern::DialectKind::Generic);
            }

            #[test]
            fn [<mysql_ $test_name>]() {
                let test_fn: fn(criteria_pattern::DialectKind) = $test_fn;
                test_fn(criteria_pattern::DialectKind::Mysql);
            }

            #[test]
            fn [<postgresql_ $test_name>]() {
                let test_fn: fn(criteria_pattern::DialectKind) = $test_fn;
                test_fn(criteria_pattern::DialectKind::Postgresql);
            }

            #[test]
            fn [<sqlite_ $test_name>]() {
                let test_fn: fn(criteria_pattern::DialectKind) = $test_fn;
                test_fn(criteria_pattern::DialectKind::Sqlite);
            }
        }
    };
}
