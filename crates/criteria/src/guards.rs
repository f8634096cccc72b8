//! Injection guards.
//!
//! Whitelist checks shared by the SQL and URL converters. Each guard is
//! opt-in at the call site; when a check runs and fails, nothing has been
//! rendered yet.

use tracing::warn;

use crate::error::InjectionError;
use crate::model::{Direction, Operator, Pagination};

fn names<T: ToString>(items: &[T]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

/// Checks that `table` is one of `valid_tables` (exact match).
pub fn check_table(table: &str, valid_tables: &[String]) -> Result<(), InjectionError> {
    if valid_tables.iter().any(|t| t == table) {
        return Ok(());
    }
    warn!(table = %table, "rejected table outside whitelist");
    Err(InjectionError::InvalidTable {
        table: table.to_string(),
        valid_tables: valid_tables.to_vec(),
    })
}

/// Checks that `column` is one of `valid_columns` (exact match).
///
/// A literal `*` is treated like any other name and must itself be listed.
pub fn check_column(column: &str, valid_columns: &[String]) -> Result<(), InjectionError> {
    if valid_columns.iter().any(|c| c == column) {
        return Ok(());
    }
    warn!(column = %column, "rejected column outside whitelist");
    Err(InjectionError::InvalidColumn {
        column: column.to_string(),
        valid_columns: valid_columns.to_vec(),
    })
}

/// Checks that `operator` is one of `valid_operators`.
pub fn check_operator(
    operator: Operator,
    valid_operators: &[Operator],
) -> Result<(), InjectionError> {
    if valid_operators.contains(&operator) {
        return Ok(());
    }
    warn!(operator = %operator, "rejected operator outside whitelist");
    Err(InjectionError::InvalidOperator {
        operator: operator.to_string(),
        valid_operators: names(valid_operators),
    })
}

/// Checks that `direction` is one of `valid_directions`.
pub fn check_direction(
    direction: Direction,
    valid_directions: &[Direction],
) -> Result<(), InjectionError> {
    if valid_directions.contains(&direction) {
        return Ok(());
    }
    warn!(direction = %direction, "rejected direction outside whitelist");
    Err(InjectionError::InvalidDirection {
        direction: direction.to_string(),
        valid_directions: names(valid_directions),
    })
}

/// Checks resolved pagination against optional maxima.
///
/// Page size is checked before page number. A missing maximum disables that
/// bound.
pub fn check_pagination_bounds(
    pagination: Option<Pagination>,
    max_page_size: Option<u64>,
    max_page_number: Option<u64>,
) -> Result<(), InjectionError> {
    let Some(pagination) = pagination else {
        return Ok(());
    };

    if let Some(max) = max_page_size {
        let value = pagination.page_size.get();
        if value > max {
            warn!(page_size = value, max, "page size exceeds bound");
            return Err(InjectionError::PaginationBounds {
                field: "page_size",
                value,
                max,
            });
        }
    }

    if let (Some(max), Some(number)) = (max_page_number, pagination.page_number) {
        let value = number.get();
        if value > max {
            warn!(page_number = value, max, "page number exceeds bound");
            return Err(InjectionError::PaginationBounds {
                field: "page_number",
                value,
                max,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_check_table() {
        let valid = strings(&["user"]);
        assert!(check_table("user", &valid).is_ok());
        assert_eq!(
            check_table("user; DROP TABLE user;", &valid),
            Err(InjectionError::InvalidTable {
                table: "user; DROP TABLE user;".to_string(),
                valid_tables: valid.clone(),
            })
        );
    }

    #[test]
    fn test_check_column_star_must_be_listed() {
        assert!(check_column("*", &strings(&["id", "name"])).is_err());
        assert!(check_column("*", &strings(&["*", "id"])).is_ok());
    }

    #[test]
    fn test_check_column_empty_whitelist_rejects() {
        assert!(check_column("id", &[]).is_err());
    }

    #[test]
    fn test_check_operator() {
        let valid = [Operator::Greater, Operator::Less];
        assert!(check_operator(Operator::Greater, &valid).is_ok());
        let err = check_operator(Operator::Equal, &valid).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid operator 'EQUAL', valid operators are: GREATER, LESS"
        );
    }

    #[test]
    fn test_check_direction() {
        let valid = [Direction::Asc];
        assert!(check_direction(Direction::Asc, &valid).is_ok());
        assert!(matches!(
            check_direction(Direction::Desc, &valid),
            Err(InjectionError::InvalidDirection { .. })
        ));
    }

    #[test]
    fn test_check_pagination_bounds() {
        let pagination = Pagination::new(Some(50000), Some(2)).unwrap();
        assert!(check_pagination_bounds(pagination, None, None).is_ok());
        assert_eq!(
            check_pagination_bounds(pagination, Some(10000), None),
            Err(InjectionError::PaginationBounds {
                field: "page_size",
                value: 50000,
                max: 10000,
            })
        );

        let pagination = Pagination::new(Some(10), Some(2000000)).unwrap();
        assert_eq!(
            check_pagination_bounds(pagination, Some(100), Some(1000000)),
            Err(InjectionError::PaginationBounds {
                field: "page_number",
                value: 2000000,
                max: 1000000,
            })
        );
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let pagination = Pagination::new(Some(100), Some(10)).unwrap();
        assert!(check_pagination_bounds(pagination, Some(100), Some(10)).is_ok());
    }

    #[test]
    fn test_no_pagination_passes() {
        assert!(check_pagination_bounds(None, Some(1), Some(1)).is_ok());
    }
}
