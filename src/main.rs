// Command line entry point: prepares a database and exports tables as JSON records.

use std::io::{self, Write};

use clap::{Parser, Subcommand, ValueEnum};
use newsroom::{db_helpers, init_db, init_logging, DbConfig, Result, ToRecord};
use sqlx::SqlitePool;
use tracing::error;

#[derive(Debug, Parser)]
#[command(name = "newsroom", version, about = "Article store schema and record export")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create the database if needed and apply migrations.
    Migrate,
    /// Print every row of a table as one JSON record per line.
    Export {
        #[arg(value_enum)]
        table: Table,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Table {
    Users,
    Articles,
    Categories,
    Tags,
    #[value(name = "articles_tags")]
    ArticlesTags,
    Favorites,
    Comments,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_logging("info");
    let cli = Cli::parse();
    if let Err(error) = run(cli).await {
        error!("{error:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = DbConfig::from_env()?;
    let pool = init_db(&config).await?;
    match cli.command {
        Command::Migrate => Ok(()),
        Command::Export { table } => {
            let stdout = io::stdout();
            export(&pool, table, &mut stdout.lock()).await
        }
    }
}

async fn export(pool: &SqlitePool, table: Table, out: &mut impl Write) -> Result<()> {
    match table {
        Table::Users => write_records(out, &db_helpers::list_users(pool).await?),
        Table::Articles => write_records(out, &db_helpers::list_articles(pool).await?),
        Table::Categories => write_records(out, &db_helpers::list_categories(pool).await?),
        Table::Tags => write_records(out, &db_helpers::list_tags(pool).await?),
        Table::ArticlesTags => write_records(out, &db_helpers::list_article_tags(pool).await?),
        Table::Favorites => write_records(out, &db_helpers::list_favorites(pool).await?),
        Table::Comments => write_records(out, &db_helpers::list_comments(pool).await?),
    }
}

fn write_records<T: ToRecord>(out: &mut impl Write, rows: &[T]) -> Result<()> {
    for row in rows {
        writeln!(out, "{}", row.to_json()?)?;
    }
    Ok(())
}
