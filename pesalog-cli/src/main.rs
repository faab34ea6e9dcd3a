use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use pesalog_core::{Classifier, Direction};
use pesalog_ingest::read_csv_file;
use pesalog_ledger::{DateRange, EntryPage, JsonStore, Ledger, ListRequest};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

mod config;

#[derive(Parser, Debug)]
#[command(name = "pesalog", version, about = "Mobile-money statement ledger")]
struct Cli {
    /// Config file (default: ~/.pesalog/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the default config file for editing
    Init,

    /// Ingest an exported statement CSV into the ledger
    Ingest {
        /// Path to the exported CSV
        csv: PathBuf,
    },

    /// List entries, newest first
    List {
        #[arg(long, default_value_t = 1)]
        page: usize,

        #[arg(long, default_value_t = 20)]
        page_size: usize,

        /// Only entries in this category
        #[arg(long)]
        category: Option<String>,

        /// Only debit or credit entries
        #[arg(long)]
        direction: Option<Direction>,

        /// Inclusive lower date bound (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Inclusive upper date bound (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,

        /// Emit the page as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Debit spend per category, highest first
    Categories {
        #[arg(long)]
        from: Option<NaiveDate>,

        #[arg(long)]
        to: Option<NaiveDate>,

        #[arg(long)]
        json: bool,
    },

    /// Debit spend per calendar month
    Monthly {
        #[arg(long)]
        json: bool,
    },

    /// Correct one entry's category
    SetCategory { id: String, category: String },

    /// Show the category a description would be assigned
    Classify { description: String },

    /// Delete one entry (administrative)
    Remove { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    if let Command::Init = cli.command {
        return config::init_config();
    }

    let cfg = config::load_config(cli.config.as_deref())?;
    let store_path = cfg.store_path()?;
    let store = JsonStore::open(&store_path)
        .with_context(|| format!("opening store {}", store_path.display()))?;
    let ledger = Ledger::new(Arc::new(store))
        .with_aliases(cfg.aliases.clone())
        .with_classifier(Classifier::new(cfg.rules.clone()))
        .with_store_timeout(Duration::from_secs(cfg.store.timeout_secs));

    match cli.command {
        Command::Init => unreachable!("handled above"),

        Command::Ingest { csv } => {
            let rows = read_csv_file(&csv)?;
            let outcome = ledger.ingest(&rows).await?;
            println!(
                "Ingested {}: {} entries saved, {} rows rejected",
                csv.display(),
                outcome.accepted.len(),
                outcome.rejected
            );
        }

        Command::List {
            page,
            page_size,
            category,
            direction,
            from,
            to,
            json,
        } => {
            let req = ListRequest {
                page,
                page_size,
                category,
                direction,
                range: range_from(from, to),
            };
            let result = ledger.list(&req).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_entries(&result);
            }
        }

        Command::Categories { from, to, json } => {
            let totals = ledger.spending_by_category(range_from(from, to)).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&totals)?);
            } else {
                println!("{:<20} {:>12} {:>7}", "CATEGORY", "TOTAL", "COUNT");
                for t in &totals {
                    println!("{:<20} {:>12.2} {:>7}", t.category, t.total_amount, t.count);
                }
            }
        }

        Command::Monthly { json } => {
            let series = ledger.spending_by_month().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&series)?);
            } else {
                println!("{:<10} {:>12} {:>7}", "MONTH", "TOTAL", "COUNT");
                for t in &series {
                    println!(
                        "{:<10} {:>12.2} {:>7}",
                        format!("{}-{:02}", t.year, t.month),
                        t.total_amount,
                        t.count
                    );
                }
            }
        }

        Command::SetCategory { id, category } => {
            let entry = ledger.update_category(&id, &category).await?;
            println!("{} -> {}", entry.id, entry.category);
        }

        Command::Classify { description } => {
            println!("{}", ledger.classify(&description));
        }

        Command::Remove { id } => {
            ledger.remove(&id).await?;
            println!("Removed {id}");
        }
    }

    Ok(())
}

fn range_from(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Option<DateRange> {
    if from.is_none() && to.is_none() {
        return None;
    }
    Some(DateRange {
        from: from.and_then(|d| d.and_hms_opt(0, 0, 0)),
        to: to.and_then(|d| d.and_hms_opt(23, 59, 59)),
    })
}

fn print_entries(page: &EntryPage) {
    println!(
        "{:<17} {:<7} {:>12} {:<16} {:<36}  {}",
        "DATE", "DIR", "AMOUNT", "CATEGORY", "ID", "DESCRIPTION"
    );
    for e in &page.entries {
        println!(
            "{:<17} {:<7} {:>12.2} {:<16} {:<36}  {}",
            e.date.format("%Y-%m-%d %H:%M").to_string(),
            e.direction.to_string(),
            e.amount,
            e.category,
            e.id,
            e.description
        );
    }
    println!(
        "Page {} of {} ({} entries total)",
        page.page,
        page.total_pages().max(1),
        page.total
    );
}
