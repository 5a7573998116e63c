//! Staff-side command line tool for the Lunchly core.
//!
//! # Responsibility
//! - Browse and search customers in an existing database from a terminal.
//! - Exercise core wiring (config, logging, schema check) without a web layer.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use lunchly_core::{
    init_logging, open_db, parse_record_id, LunchlyConfig, LunchlyService,
    SqliteCustomerRepository, SqliteReservationRepository,
};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "lunchly", version, about = "Browse Lunchly customers and reservations")]
struct Cli {
    /// TOML config file; overrides `--database` when given.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// SQLite database with the customers/reservations schema.
    #[arg(short, long, default_value = "lunchly.db")]
    database: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every customer by last name.
    List,
    /// Customers with the most reservations.
    Top {
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// One customer and their reservations.
    Show { id: String },
    /// Customers matching a first name or a last name.
    Search {
        #[arg(long, default_value = "")]
        first: String,
        #[arg(long, default_value = "")]
        last: String,
    },
}

impl Command {
    /// Subcommand name for log events; arguments may hold customer names.
    fn name(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Top { .. } => "top",
            Self::Show { .. } => "show",
            Self::Search { .. } => "search",
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => LunchlyConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => LunchlyConfig::for_database(cli.database.clone()),
    };

    if let Some(log_dir) = &config.log_dir {
        init_logging(&config.log_level, log_dir).context("starting logging")?;
    }
    info!(
        "event=cli_start module=cli status=ok command={}",
        cli.command.name()
    );

    let conn = open_db(&config.database_path, &config.db_options())
        .with_context(|| format!("opening {}", config.database_path.display()))?;
    let service = LunchlyService::new(
        SqliteCustomerRepository::try_new(&conn)?,
        SqliteReservationRepository::try_new(&conn)?,
    );

    match cli.command {
        Command::List => {
            for customer in service.list_customers()? {
                println!("{:>6}  {}", customer.id().unwrap_or_default(), customer.full_name());
            }
        }
        Command::Top { limit } => {
            let limit = limit.unwrap_or(config.top_ranked_limit);
            for row in service.top_customers(Some(limit))? {
                println!("{:>4}  {}", row.reservation_count, row.full_name());
            }
        }
        Command::Show { id } => {
            let detail = service.customer_detail(parse_record_id(&id)?)?;
            let customer = &detail.customer;
            println!("{}", customer.full_name());
            println!("phone: {}", customer.phone().unwrap_or("-"));
            println!("notes: {}", customer.notes());
            for reservation in &detail.reservations {
                println!(
                    "  {}  guests={}  {}",
                    reservation.formatted_start_at(),
                    reservation.num_guests(),
                    reservation.notes()
                );
            }
        }
        Command::Search { first, last } => {
            for customer in service.search_customers(&first, &last)? {
                println!("{:>6}  {}", customer.id().unwrap_or_default(), customer.full_name());
            }
        }
    }

    Ok(())
}
