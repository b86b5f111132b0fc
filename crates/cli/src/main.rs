use crate::{
    commands::{Commands, SqlDialect},
    error::CliError,
};
use chrono::FixedOffset;
use clap::Parser;
use compiler::QueryParser;
use expression_engine::InMemoryPredicateFactory;
use model::Schema;
use query_builder::{Dialect, Generic, MySql, NameMappings, Postgres, SqlPredicateFactory};
use serde_json::{Value as Json, json};
use std::fs;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod output;
mod records;

#[derive(Parser)]
#[command(name = "sift", version = "0.1.0", about = "Query language for filtering records")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<(), CliError> {
    // Logs go to stderr, results to stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Ast {
            query,
            max_depth,
            max_height,
        } => {
            let mut parser = sift_syntax::Parser::default();
            if let Some(max_depth) = max_depth {
                parser = parser.with_max_depth(max_depth);
            }
            if let Some(max_height) = max_height {
                parser = parser.with_max_height(max_height);
            }

            let node = parser.parse(&query)?;
            output::print_json(&node)?;
        }
        Commands::Sql {
            query,
            schema,
            dialect,
            zone_offset,
        } => {
            let schema = Schema::from_path(&schema)?;
            let offset =
                FixedOffset::east_opt(zone_offset).ok_or(CliError::InvalidZoneOffset(zone_offset))?;

            let parser = QueryParser::new(SqlPredicateFactory::new(NameMappings::from_schema(&schema)))
                .with_mappers(schema.value_mappers()?);
            let predicate = parser.parse(&query)?;

            let dialect: &dyn Dialect = match dialect {
                SqlDialect::Generic => &Generic,
                SqlDialect::Postgres => &Postgres,
                SqlDialect::Mysql => &MySql,
            };
            info!("Rendering query for {}", dialect.name());

            let fragment = predicate.render_with_offset(dialect, offset);
            let params: Vec<Json> = fragment.params.iter().map(records::to_json).collect();
            output::print_json(&json!({ "sql": fragment.sql, "params": params }))?;
        }
        Commands::Filter {
            query,
            schema,
            input,
            output: destination,
        } => {
            let schema = Schema::from_path(&schema)?;
            let mappers = schema.value_mappers()?;

            let rows: Vec<Json> = serde_json::from_str(&fs::read_to_string(&input)?)?;
            let typed = records::load(&rows, &schema, &mappers)?;
            debug!("Loaded {} records from {}", typed.len(), input);

            let parser = QueryParser::new(InMemoryPredicateFactory::new(records::getters(&schema)))
                .with_mappers(mappers);
            let predicate = parser.parse(&query)?;

            let mut matched = Vec::new();
            for (row, record) in rows.iter().zip(&typed) {
                if predicate.test(record)? {
                    matched.push(row);
                }
            }
            info!("{} of {} records matched", matched.len(), rows.len());

            match destination {
                Some(path) => output::write_json(&matched, &path)?,
                None => output::print_json(&matched)?,
            }
        }
    }

    Ok(())
}
