use clap::{Subcommand, ValueEnum};

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a query and print its AST as JSON
    Ast {
        #[arg(long, help = "Query text")]
        query: String,

        #[arg(long, help = "Deepest parenthesis nesting accepted")]
        max_depth: Option<usize>,

        #[arg(long, help = "Tallest AST accepted, counting logical operators")]
        max_height: Option<usize>,
    },
    /// Compile a query into a parameterized SQL predicate
    Sql {
        #[arg(long, help = "Query text")]
        query: String,

        #[arg(long, help = "Schema file path")]
        schema: String,

        #[arg(long, value_enum, default_value_t = SqlDialect::Generic)]
        dialect: SqlDialect,

        #[arg(
            long,
            help = "UTC offset in seconds that zone-less date-times are assumed to be in",
            default_value_t = 0,
            allow_hyphen_values = true
        )]
        zone_offset: i32,
    },
    /// Evaluate a query against a JSON array of objects
    Filter {
        #[arg(long, help = "Query text")]
        query: String,

        #[arg(long, help = "Schema file path")]
        schema: String,

        #[arg(long, help = "JSON file holding an array of records")]
        input: String,

        #[arg(
            long,
            help = "If specified, writes the matching records to this file instead of stdout"
        )]
        output: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SqlDialect {
    Generic,
    Postgres,
    Mysql,
}
