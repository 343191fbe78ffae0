//! services/client/src/bin/attendance.rs
//!
//! Terminal front-end for recording attendance against the record store.

use attendance_core::domain::AttendanceStatus;
use clap::{Parser, Subcommand};
use client_lib::{
    adapters::HttpAttendanceGateway,
    config::Config,
    error::ClientError,
    form::FormController,
    terminal,
};
use std::io::Write;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Record Present/Absent attendance and browse what has been recorded.
#[derive(Debug, Parser)]
#[command(name = "attendance", version, about, long_about = None)]
struct Cli {
    /// Print statuses without colour
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fill in the form interactively (the default)
    Form,

    /// Record one person's attendance and show the updated table
    Mark {
        /// Present or Absent
        status: AttendanceStatus,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        first_name: String,
        /// Year and section, e.g. BSIT-2A
        #[arg(long)]
        section: String,
    },

    /// Show every recorded entry
    List,
}

#[tokio::main]
async fn main() -> Result<(), ClientError> {
    let cli = Cli::parse();

    // --- 1. Load Configuration & Set Up Logging ---
    // Logs go to stderr so they don't interleave with the form.
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    info!(api = %config.api_base_url, "Configuration loaded.");

    // --- 2. Wire the Controller to the Store ---
    let gateway = Arc::new(HttpAttendanceGateway::new(config.api_base_url.clone()));
    let mut controller = FormController::new(gateway);
    let color = !cli.no_color;
    let mut stdout = std::io::stdout();

    // --- 3. Run the Requested Command ---
    match cli.command.unwrap_or(Command::Form) {
        Command::Form => {
            let input = BufReader::new(tokio::io::stdin());
            terminal::run_form(&mut controller, input, &mut stdout, color).await?;
        }
        Command::Mark {
            status,
            last_name,
            first_name,
            section,
        } => {
            let fields = controller.fields_mut();
            fields.last_name = last_name;
            fields.first_name = first_name;
            fields.section = section;
            terminal::submit_once(&mut controller, status, &mut stdout, color).await?;
        }
        Command::List => {
            controller.refresh().await?;
            write!(stdout, "{}", controller.table().render(color))?;
        }
    }

    stdout.flush()?;
    Ok(())
}
