//! Criteria CLI
//!
//! Parses criteria from a URL query string and prints the parameterized SQL
//! for the selected dialect as JSON.

use anyhow::Context;
use clap::Parser;
use criteria_cli::{CliConfig, Rendered, init_logging};
use criteria_pattern::UrlToCriteriaConverter;
use tracing::info;

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    let kind = config
        .dialect_kind()
        .map_err(|e| anyhow::anyhow!("Invalid dialect: {}", e))?;

    info!(
        dialect = %kind,
        table = %config.table,
        columns = %config.columns,
        "Rendering criteria"
    );

    let criteria = UrlToCriteriaConverter::convert(&config.url, &config.url_options())
        .context("failed to parse criteria from URL")?;
    let (query, params) = kind
        .convert(&criteria, &config.table, &config.sql_options())
        .context("failed to render SQL")?;

    let rendered = Rendered::new(kind, query, params);
    println!("{}", serde_json::to_string_pretty(&rendered)?);

    Ok(())
}
