use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};

use schemadrift_catalog::{DatabaseAdapter, PostgresAdapter};
use schemadrift_core::{Config, DatabaseConfig, Report, SchemaDiff, Side};
use schemadrift_engine::SchemaComparison;

/// SchemaDrift - structural diff between two database schemas
#[derive(Parser)]
#[command(name = "schemadrift")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file (default: schemadrift.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare the two configured databases and report differences
    Diff {
        /// Also write a JSON report to this path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Abort on the first per-table query error
        #[arg(long)]
        strict: bool,
    },

    /// Test connectivity to both configured databases
    Ping,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else if Path::new("schemadrift.toml").exists() {
        Config::from_file(Path::new("schemadrift.toml"))?
    } else {
        return Err(anyhow::anyhow!(
            "No config file found. Create schemadrift.toml with [database1] and \
             [database2] sections, or pass --config <path>."
        ));
    };

    match cli.command {
        Commands::Diff { output, strict } => {
            diff_command(&config, output.as_deref(), strict, cli.verbose).await
        }
        Commands::Ping => ping_command(&config, cli.verbose).await,
    }
}

/// Build an adapter from one database section of the config
async fn build_adapter(config: &DatabaseConfig) -> Result<Box<dyn DatabaseAdapter>> {
    match config.db_type.to_lowercase().as_str() {
        "postgres" | "postgresql" => {
            let use_tls = config.get("sslmode") == Some("require");

            let mut adapter = if let Some(conn_str) = config.get("connection_string") {
                if use_tls {
                    PostgresAdapter::from_connection_string_with_tls(conn_str).await?
                } else {
                    PostgresAdapter::from_connection_string(conn_str).await?
                }
            } else {
                let host = config
                    .get("host")
                    .ok_or_else(|| anyhow::anyhow!("postgres requires 'host' (or 'connection_string') in database settings"))?;
                let port: u16 = config
                    .get("port")
                    .unwrap_or("5432")
                    .parse()
                    .map_err(|_| anyhow::anyhow!("invalid 'port' in database settings"))?;
                let dbname = config
                    .get("dbname")
                    .ok_or_else(|| anyhow::anyhow!("postgres requires 'dbname' in database settings"))?;
                let user = config
                    .get("user")
                    .ok_or_else(|| anyhow::anyhow!("postgres requires 'user' in database settings"))?;
                let password = config.get("password").unwrap_or("");

                if use_tls {
                    PostgresAdapter::connect_with_tls(host, port, dbname, user, password).await?
                } else {
                    PostgresAdapter::connect(host, port, dbname, user, password).await?
                }
            };

            if let Some(namespace) = config.get("schema") {
                adapter = adapter.with_namespace(namespace);
            }

            Ok(Box::new(adapter))
        }
        other => Err(anyhow::anyhow!(
            "Unsupported database type '{}'. Supported: postgres",
            other
        )),
    }
}

/// Diff command - compare the two configured schemas
async fn diff_command(
    config: &Config,
    output: Option<&Path>,
    strict: bool,
    verbose: bool,
) -> Result<()> {
    if verbose {
        eprintln!("{}", "Connecting to database 1...".cyan());
    }
    let db1 = build_adapter(&config.database1).await?;

    if verbose {
        eprintln!("{}", "Connecting to database 2...".cyan());
    }
    let db2 = build_adapter(&config.database2).await?;

    if verbose {
        eprintln!("{}", "Testing connections...".cyan());
    }
    db1.test_connection()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to database 1: {}", e))?;
    db2.test_connection()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to database 2: {}", e))?;

    if verbose {
        eprintln!("{}", "✓ Both connections OK".green());
        eprintln!(
            "{} {} vs {}",
            "Comparing schemas:".cyan(),
            db1.name(),
            db2.name()
        );
    }

    let strict = strict || config.strict;
    let diff = SchemaComparison::new()
        .strict(strict)
        .compare(db1.as_ref(), db2.as_ref())
        .await?;

    let report = Report::from_diff(diff);

    if let Some(path) = output {
        report.save_to_file(path)?;
        if verbose {
            eprintln!("{} {}", "Report saved to:".green(), path.display());
        }
    }

    print_diff_summary(&report.diff);

    // Per-table errors mean the comparison is incomplete
    if report.has_errors() {
        std::process::exit(1);
    }

    Ok(())
}

/// Ping command - validate both connections and exit
async fn ping_command(config: &Config, verbose: bool) -> Result<()> {
    let mut failed = false;

    for (label, db_config) in [
        ("database 1", &config.database1),
        ("database 2", &config.database2),
    ] {
        if verbose {
            eprintln!("{} {}...", "Connecting to".cyan(), label);
        }

        let outcome = match build_adapter(db_config).await {
            Ok(adapter) => adapter.test_connection().await.map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };

        match outcome {
            Ok(()) => println!("{} {}", "✓".green(), label),
            Err(e) => {
                println!("{} {}: {}", "✗".red(), label, e);
                failed = true;
            }
        }
    }

    if failed {
        std::process::exit(1);
    }

    Ok(())
}

/// Print the two diff sections to stdout
fn print_diff_summary(diff: &SchemaDiff) {
    println!("\n{}", "=".repeat(60).bright_blue());
    println!("{}", "Schema Diff Report".bold().bright_blue());
    println!("{}", "=".repeat(60).bright_blue());
    println!();

    println!("{}", "Table differences:".bold());
    if diff.table_diffs.is_empty() {
        println!("  {}", "✓ No table differences".green());
    } else {
        for table_diff in &diff.table_diffs {
            println!(
                "  {} '{}' exists only in {} (missing from {})",
                "-".yellow(),
                table_diff.table.as_str().yellow(),
                table_diff.only_in,
                table_diff.missing_from()
            );
        }
    }
    println!();

    println!("{}", "Column differences:".bold());
    if diff.column_diffs.is_empty() {
        println!("  {}", "✓ No column differences".green());
    } else {
        for column_diff in &diff.column_diffs {
            println!("  {}", column_diff.table.as_str().yellow().bold());
            if !column_diff.only_in_db1.is_empty() {
                println!(
                    "    only in {}: {}",
                    Side::Db1,
                    column_diff.only_in_db1.join(", ")
                );
            }
            if !column_diff.only_in_db2.is_empty() {
                println!(
                    "    only in {}: {}",
                    Side::Db2,
                    column_diff.only_in_db2.join(", ")
                );
            }
        }
    }

    if !diff.errors.is_empty() {
        println!();
        println!("{}", "Errors:".bold());
        for error in &diff.errors {
            println!(
                "  {} {} ({}): {}",
                "✗".red(),
                error.table,
                error.side,
                error.message
            );
        }
    }

    println!();
    if diff.is_empty() && diff.errors.is_empty() {
        println!("{}", "✓ Schemas are identical".green().bold());
    }
    println!("{}", "=".repeat(60).bright_blue());
}
