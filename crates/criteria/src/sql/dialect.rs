//! SQL dialect trait for multi-database rendering.
//!
//! The lowering algorithm is shared; a dialect only decides how the pieces
//! are spelled:
//! - identifier quoting (none, or double quotes per dotted segment)
//! - placeholders (`%s`, `%(name)s`, `:name`)
//! - wildcard concatenation for CONTAINS / STARTS_WITH / ENDS_WITH
//! - whether LIMIT/OFFSET are inlined or bound as parameters

use std::fmt;
use std::str::FromStr;

/// Which side(s) of a LIKE operand receive a wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikePattern {
    /// `%value%`
    Contains,
    /// `value%`
    StartsWith,
    /// `%value`
    EndsWith,
}

/// SQL dialect trait for generating database-specific SQL.
pub trait SqlDialect: Send + Sync {
    /// Get the dialect name.
    fn name(&self) -> &'static str;

    /// Quote a table or column identifier.
    ///
    /// Unquoted by default.
    fn quote_identifier(&self, identifier: &str) -> String {
        identifier.to_string()
    }

    /// Render the placeholder for a named parameter.
    fn placeholder(&self, name: &str) -> String;

    /// The literal wildcard as it must appear in query text.
    ///
    /// Pyformat drivers treat `%` as a format character, so the default is
    /// the escaped `%%`.
    fn wildcard(&self) -> &'static str {
        "%%"
    }

    /// Wrap a placeholder with wildcards using string concatenation.
    fn like_pattern(&self, placeholder: &str, pattern: LikePattern) -> String {
        let w = self.wildcard();
        match pattern {
            LikePattern::Contains => format!("'{w}' || {placeholder} || '{w}'"),
            LikePattern::StartsWith => format!("{placeholder} || '{w}'"),
            LikePattern::EndsWith => format!("'{w}' || {placeholder}"),
        }
    }

    /// Whether LIMIT and OFFSET are bound as parameters instead of inlined.
    fn binds_pagination(&self) -> bool {
        false
    }

    /// Generate the LIMIT/OFFSET clause from rendered operands.
    fn limit_offset(&self, limit: &str, offset: Option<&str>) -> String {
        match offset {
            Some(offset) => format!("LIMIT {} OFFSET {}", limit, offset),
            None => format!("LIMIT {}", limit),
        }
    }
}

/// Double-quotes each dot-separated segment, doubling embedded quotes.
///
/// `schema.table` becomes `"schema"."table"`.
pub fn double_quote(identifier: &str) -> String {
    identifier
        .split('.')
        .map(|segment| format!("\"{}\"", segment.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(".")
}

/// Generic pyformat dialect: unquoted identifiers, `%(parameter_N)s`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericDialect;

impl SqlDialect for GenericDialect {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn placeholder(&self, name: &str) -> String {
        format!("%({})s", name)
    }
}

/// MySQL dialect: unquoted identifiers, positional `%s`, `CONCAT` wildcards.
#[derive(Debug, Clone, Copy, Default)]
pub struct MysqlDialect;

impl SqlDialect for MysqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn placeholder(&self, _name: &str) -> String {
        "%s".to_string()
    }

    fn like_pattern(&self, placeholder: &str, pattern: LikePattern) -> String {
        match pattern {
            LikePattern::Contains => format!("CONCAT('%', {}, '%')", placeholder),
            LikePattern::StartsWith => format!("CONCAT({}, '%')", placeholder),
            LikePattern::EndsWith => format!("CONCAT('%', {})", placeholder),
        }
    }
}

/// PostgreSQL dialect: double-quoted identifiers, `%(parameter_N)s`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresDialect;

impl SqlDialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgresql"
    }

    fn quote_identifier(&self, identifier: &str) -> String {
        double_quote(identifier)
    }

    fn placeholder(&self, name: &str) -> String {
        format!("%({})s", name)
    }
}

/// SQLite dialect: double-quoted identifiers, `:parameter_N`, bound
/// `:limit_N` / `:offset_N`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteDialect;

impl SqlDialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn quote_identifier(&self, identifier: &str) -> String {
        double_quote(identifier)
    }

    fn placeholder(&self, name: &str) -> String {
        format!(":{}", name)
    }

    fn wildcard(&self) -> &'static str {
        "%"
    }

    fn binds_pagination(&self) -> bool {
        true
    }
}

/// Runtime selection of a dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DialectKind {
    /// [`GenericDialect`]
    #[default]
    Generic,
    /// [`MysqlDialect`]
    Mysql,
    /// [`PostgresDialect`]
    Postgresql,
    /// [`SqliteDialect`]
    Sqlite,
}

impl DialectKind {
    /// Returns the dialect implementation.
    pub fn dialect(&self) -> &'static dyn SqlDialect {
        match self {
            DialectKind::Generic => &GenericDialect,
            DialectKind::Mysql => &MysqlDialect,
            DialectKind::Postgresql => &PostgresDialect,
            DialectKind::Sqlite => &SqliteDialect,
        }
    }

    /// Returns true if the dialect binds parameters positionally.
    pub fn is_positional(&self) -> bool {
        matches!(self, DialectKind::Mysql)
    }
}

impl fmt::Display for DialectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dialect().name())
    }
}

impl FromStr for DialectKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "generic" | "sql" => Ok(DialectKind::Generic),
            "mysql" => Ok(DialectKind::Mysql),
            "postgresql" | "postgres" | "pg" => Ok(DialectKind::Postgresql),
            "sqlite" => Ok(DialectKind::Sqlite),
            _ => Err(format!(
                "unknown dialect: {} (expected generic, mysql, postgresql or sqlite)",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_quote() {
        assert_eq!(double_quote("user"), "\"user\"");
        assert_eq!(double_quote("public.user"), "\"public\".\"user\"");
        assert_eq!(double_quote("we\"ird"), "\"we\"\"ird\"");
        assert_eq!(double_quote("full name"), "\"full name\"");
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(GenericDialect.placeholder("parameter_0"), "%(parameter_0)s");
        assert_eq!(MysqlDialect.placeholder("parameter_0"), "%s");
        assert_eq!(PostgresDialect.placeholder("parameter_3"), "%(parameter_3)s");
        assert_eq!(SqliteDialect.placeholder("limit_1"), ":limit_1");
    }

    #[test]
    fn test_like_patterns() {
        assert_eq!(
            GenericDialect.like_pattern("%(parameter_0)s", LikePattern::Contains),
            "'%%' || %(parameter_0)s || '%%'"
        );
        assert_eq!(
            SqliteDialect.like_pattern(":parameter_0", LikePattern::StartsWith),
            ":parameter_0 || '%'"
        );
        assert_eq!(
            MysqlDialect.like_pattern("%s", LikePattern::EndsWith),
            "CONCAT('%', %s)"
        );
    }

    #[test]
    fn test_limit_offset() {
        assert_eq!(GenericDialect.limit_offset("10", Some("20")), "LIMIT 10 OFFSET 20");
        assert_eq!(GenericDialect.limit_offset("10", None), "LIMIT 10");
        assert!(SqliteDialect.binds_pagination());
        assert!(!PostgresDialect.binds_pagination());
    }

    #[test]
    fn test_dialect_kind_parse() {
        assert_eq!("PostgreSQL".parse::<DialectKind>(), Ok(DialectKind::Postgresql));
        assert_eq!("sqlite".parse::<DialectKind>(), Ok(DialectKind::Sqlite));
        assert!("oracle".parse::<DialectKind>().is_err());
        assert_eq!(DialectKind::Mysql.to_string(), "mysql");
        assert!(DialectKind::Mysql.is_positional());
    }
}
