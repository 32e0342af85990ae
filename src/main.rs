use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use roombook::config::Config;
use roombook::console::{self, Console, Session};
use roombook::db::BookingsFile;

#[derive(Parser)]
#[command(name = "roombook")]
#[command(about = "Meeting room registry with hourly bookings")]
struct Cli {
    /// Bookings file to use instead of the configured one
    #[arg(short, long, global = true, value_name = "PATH")]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive booking menu (default)
    Run,
    /// Write an empty bookings file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print all rooms as JSON
    Show,
}

/// Logs go to stderr; stdout belongs to the menu.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "roombook=warn".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let mut config = Config::load();
    if let Some(file) = cli.file {
        config.bookings_file = Some(file);
    }
    let bookings = BookingsFile::new(config.bookings_path()?);

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            let mut session = Session::open(bookings.clone()).with_context(|| {
                format!("Failed to load bookings from {}", bookings.path().display())
            })?;

            let stdin = io::stdin();
            let stdout = io::stdout();
            let mut console = Console::new(stdin.lock(), stdout.lock())
                .with_error_delay(config.error_delay());

            console::run(&mut session, &mut console)?;
        }
        Commands::Init { force } => {
            bookings.init(force)?;
            println!("Created {}", bookings.path().display());
        }
        Commands::Show => {
            let store = bookings.load().with_context(|| {
                format!("Failed to load bookings from {}", bookings.path().display())
            })?;
            println!("{}", store.to_json()?);
        }
    }

    Ok(())
}
