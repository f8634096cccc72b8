//! Criteria CLI support.
//!
//! Configuration, logging setup and JSON output for the `criteria` binary,
//! which parses criteria from a URL query string and prints parameterized
//! SQL for the selected dialect.
//!
//! # Example
//!
//! ```rust
//! use criteria_cli::{CliConfig, Rendered};
//! use criteria_pattern::UrlToCriteriaConverter;
//!
//! let config = CliConfig {
//!     url: "/users?filters[0][field]=age&filters[0][operator]=GREATER&filters[0][value]=18".to_string(),
//!     dialect: "postgresql".to_string(),
//!     table: "user".to_string(),
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//!
//! let kind = config.dialect_kind().unwrap();
//! let criteria = UrlToCriteriaConverter::convert(&config.url, &config.url_options()).unwrap();
//! let (query, params) = kind.convert(&criteria, &config.table, &config.sql_options()).unwrap();
//! let rendered = Rendered::new(kind, query, params);
//! assert_eq!(rendered.query, "SELECT * FROM \"user\" WHERE \"age\" > %(parameter_0)s;");
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod output;

pub use config::CliConfig;
pub use output::{Parameters, Rendered};

/// Initializes stderr logging, honoring `RUST_LOG` when set.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "criteria_pattern={},criteria_cli={},criteria={}",
            level, level, level
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
