//! Command-line configuration.
//!
//! Every flag can also be set through the environment.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `CRITERIA_URL` | | URL whose query string holds the criteria |
//! | `CRITERIA_DIALECT` | generic | SQL dialect (generic, mysql, postgresql, sqlite) |
//! | `CRITERIA_TABLE` | | Table to select from |
//! | `CRITERIA_COLUMNS` | * | Select list (comma-separated) |
//! | `CRITERIA_VALID_TABLES` | | Table whitelist (comma-separated) |
//! | `CRITERIA_VALID_COLUMNS` | | Column whitelist (comma-separated) |
//! | `CRITERIA_MAX_PAGE_SIZE` | | Largest accepted page size |
//! | `CRITERIA_MAX_PAGE_NUMBER` | | Largest accepted page number |
//! | `CRITERIA_LOG_LEVEL` | warn | Log level |

use clap::Parser;
use criteria_pattern::{DialectKind, SqlConvertOptions, UrlConvertOptions};

/// Configuration for the `criteria` command.
#[derive(Debug, Clone, Parser)]
#[command(name = "criteria")]
#[command(about = "Render URL query criteria as parameterized SQL")]
pub struct CliConfig {
    /// URL whose query string holds the criteria.
    #[arg(short, long, env = "CRITERIA_URL", default_value = "")]
    pub url: String,

    /// SQL dialect (generic, mysql, postgresql, sqlite).
    #[arg(short, long, env = "CRITERIA_DIALECT", default_value = "generic")]
    pub dialect: String,

    /// Table to select from.
    #[arg(short, long, env = "CRITERIA_TABLE", default_value = "")]
    pub table: String,

    /// Select list (comma-separated).
    #[arg(long, env = "CRITERIA_COLUMNS", default_value = "*")]
    pub columns: String,

    /// Table whitelist (comma-separated). Enables the table check.
    #[arg(long, env = "CRITERIA_VALID_TABLES")]
    pub valid_tables: Option<String>,

    /// Column whitelist (comma-separated). Enables the column, criteria and
    /// URL field checks.
    #[arg(long, env = "CRITERIA_VALID_COLUMNS")]
    pub valid_columns: Option<String>,

    /// Largest accepted page size.
    #[arg(long, env = "CRITERIA_MAX_PAGE_SIZE")]
    pub max_page_size: Option<u64>,

    /// Largest accepted page number.
    #[arg(long, env = "CRITERIA_MAX_PAGE_NUMBER")]
    pub max_page_number: Option<u64>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "CRITERIA_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            dialect: "generic".to_string(),
            table: String::new(),
            columns: "*".to_string(),
            valid_tables: None,
            valid_columns: None,
            max_page_size: None,
            max_page_number: None,
            log_level: "warn".to_string(),
        }
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

impl CliConfig {
    /// Returns the selected dialect.
    pub fn dialect_kind(&self) -> Result<DialectKind, String> {
        self.dialect.parse()
    }

    /// Returns the select list.
    pub fn column_list(&self) -> Vec<String> {
        split_list(&self.columns)
    }

    fn has_bounds(&self) -> bool {
        self.max_page_size.is_some() || self.max_page_number.is_some()
    }

    /// Builds the SQL conversion options.
    pub fn sql_options(&self) -> SqlConvertOptions {
        let mut options = SqlConvertOptions::default().with_columns(self.column_list());
        if let Some(tables) = &self.valid_tables {
            options = options.with_valid_tables(split_list(tables));
        }
        if let Some(columns) = &self.valid_columns {
            options = options.with_valid_columns(split_list(columns));
        }
        if self.has_bounds() {
            options = options.with_pagination_bounds(self.max_page_size, self.max_page_number);
        }
        options
    }

    /// Builds the URL parsing options.
    pub fn url_options(&self) -> UrlConvertOptions {
        let mut options = UrlConvertOptions::default();
        if let Some(columns) = &self.valid_columns {
            options = options.with_valid_fields(split_list(columns));
        }
        if self.has_bounds() {
            options = options.with_pagination_bounds(self.max_page_size, self.max_page_number);
        }
        options
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.url.trim().is_empty() {
            errors.push("URL cannot be empty".to_string());
        }

        if self.table.trim().is_empty() {
            errors.push("Table cannot be empty".to_string());
        }

        if let Err(e) = self.dialect_kind() {
            errors.push(e);
        }

        if self.column_list().is_empty() {
            errors.push("Columns cannot be empty".to_string());
        }

        if self.max_page_size == Some(0) {
            errors.push("Max page size cannot be 0".to_string());
        }

        if self.max_page_number == Some(0) {
            errors.push("Max page number cannot be 0".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
