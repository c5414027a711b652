//! Command-line driver for the parcel tracker.
//!
//! # Responsibility
//! - Open the parcel database and sequence service calls.
//! - Report failures on stderr with a non-zero exit code.

use clap::{Parser, Subcommand};
use parcel_core::{
    default_log_level, init_logging, open_db, ClientId, ParcelNumber, ParcelService,
    SqliteParcelRepository, StdoutNarrator,
};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

const DEMO_CLIENT: ClientId = 1;
const DEMO_ADDRESS: &str = "Pskov, Pushkin st. 5";
const DEMO_NEW_ADDRESS: &str = "Saratov, Kozlov st. 25";

type Service<'conn> = ParcelService<SqliteParcelRepository<'conn>, StdoutNarrator>;

#[derive(Parser, Debug)]
#[clap(name = "parcel_cli", version, about = "Track parcels from registration to delivery")]
struct Cli {
    /// SQLite database file.
    #[clap(long, env = "PARCEL_DB", default_value = "tracker.db")]
    db: PathBuf,
    /// Log level: trace|debug|info|warn|error. Only valid together with `--log-dir`.
    #[clap(long, env = "PARCEL_LOG_LEVEL", requires = "log_dir")]
    log_level: Option<String>,
    /// Absolute directory for rolling log files. Logging is off when unset.
    #[clap(long, env = "PARCEL_LOG_DIR")]
    log_dir: Option<String>,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Register a new parcel
    Register {
        #[clap(long)]
        client: ClientId,
        #[clap(long)]
        address: String,
    },
    /// Advance a parcel one lifecycle step
    NextStatus { number: ParcelNumber },
    /// Change the address of a registered parcel
    ChangeAddress { number: ParcelNumber, address: String },
    /// Delete a registered parcel
    Delete { number: ParcelNumber },
    /// List all parcels of a client
    List {
        #[clap(long)]
        client: ClientId,
    },
    /// Show one parcel
    Show { number: ParcelNumber },
    /// Run the register/update/advance/delete walkthrough
    Demo,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir)?;
    }

    let conn = open_db(&cli.db)?;
    let service = ParcelService::new(SqliteParcelRepository::new(&conn));

    match cli.command {
        Command::Register { client, address } => {
            service.register(client, address)?;
        }
        Command::NextStatus { number } => {
            let status = service.next_status(number)?;
            println!("Parcel #{number} status: {status}");
        }
        Command::ChangeAddress { number, address } => {
            service.change_address(number, &address)?;
            println!("Parcel #{number} address changed");
        }
        Command::Delete { number } => {
            service.delete(number)?;
            println!("Parcel #{number} deleted");
        }
        Command::List { client } => {
            service.print_client_parcels(client)?;
        }
        Command::Show { number } => {
            println!("{}", service.get(number)?);
        }
        Command::Demo => run_demo(&service)?,
    }

    Ok(())
}

fn run_demo(service: &Service<'_>) -> Result<(), Box<dyn Error>> {
    let parcel = service.register(DEMO_CLIENT, DEMO_ADDRESS)?;
    service.change_address(parcel.number, DEMO_NEW_ADDRESS)?;
    service.next_status(parcel.number)?;
    service.print_client_parcels(DEMO_CLIENT)?;

    // The parcel is already sent, so the store refuses to delete it.
    if let Err(err) = service.delete(parcel.number) {
        println!("{err}");
    }
    service.print_client_parcels(DEMO_CLIENT)?;

    let parcel = service.register(DEMO_CLIENT, DEMO_ADDRESS)?;
    service.delete(parcel.number)?;
    service.print_client_parcels(DEMO_CLIENT)?;

    Ok(())
}
