use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use vendor_board::commands::{cmd_board, cmd_columns, cmd_move, cmd_show};
use vendor_board::types::{AssessmentStatus, VALID_STATUSES};

#[derive(Parser)]
#[command(name = "vendor-board")]
#[command(about = "Kanban board for vendor risk assessments")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show assessments grouped into lifecycle columns
    #[command(visible_alias = "b")]
    Board {
        /// Only show assessments whose name or vendor contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Only show assessments with this status, priority or risk level
        #[arg(short, long)]
        filter: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show assessment details
    Show {
        /// Assessment ID
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Move an assessment to another column
    #[command(visible_alias = "mv")]
    Move {
        /// Assessment ID
        id: String,

        /// Destination status
        #[arg(value_parser = parse_status)]
        status: AssessmentStatus,
    },

    /// List the board columns
    Columns {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn parse_status(s: &str) -> Result<AssessmentStatus, String> {
    s.parse().map_err(|_| {
        format!(
            "Invalid status. Must be one of: {}",
            VALID_STATUSES.join(", ")
        )
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Board {
            search,
            filter,
            json,
        } => cmd_board(search.as_deref(), filter.as_deref(), json).await,
        Commands::Show { id, json } => cmd_show(&id, json).await,
        Commands::Move { id, status } => cmd_move(&id, status).await,
        Commands::Columns { json } => cmd_columns(json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
