//! OrbitBase CLI
//!
//! - `orbitbase init`  — create the database schema (idempotent)
//! - `orbitbase serve` — run the HTTP API server

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use orbitbase_store::SqliteStore;

mod server;

#[derive(Parser)]
#[command(name = "orbitbase")]
#[command(
    author,
    version,
    about = "OrbitBase: space-mission records with a graph read view"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database schema (safe to run repeatedly).
    Init {
        /// Database file.
        #[arg(long, default_value = "orbitbase.db")]
        db: PathBuf,
    },

    /// Run the HTTP API server.
    Serve(ServeArgs),
}

#[derive(Args, Debug, Clone)]
struct ServeArgs {
    /// Listen address (use `127.0.0.1:0` to auto-pick a free port).
    #[arg(long, default_value = "127.0.0.1:4000")]
    listen: SocketAddr,

    /// Database file (created and bootstrapped if missing).
    #[arg(long, default_value = "orbitbase.db")]
    db: PathBuf,

    /// Optional bearer token required on mutating endpoints.
    #[arg(long)]
    admin_token: Option<String>,

    /// What to do with graph edges whose foreign key does not resolve:
    /// `drop` (logged) or `pass`.
    #[arg(long, default_value = "drop")]
    dangling_edges: String,

    /// If set, write a small JSON file once the server is listening.
    #[arg(long)]
    ready_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Init { db } => {
            SqliteStore::open(&db)?;
            println!("initialized schema at {}", db.display());
            Ok(())
        }
        Commands::Serve(args) => server::cmd_serve(args),
    }
}
