use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use RosterDB::{Department, Position, ViewMode};

/// CLI for the roster store
#[derive(Parser, Debug)]
#[command(name = "rosterdb", version, about = "Paginated employee roster over a local key-value store")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Cmd,
}

/// Record fields for `add`.
#[derive(Args, Debug)]
pub struct NewFields {
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
    /// YYYY-MM-DD
    #[arg(long)]
    pub date_of_employment: NaiveDate,
    /// YYYY-MM-DD
    #[arg(long)]
    pub date_of_birth: NaiveDate,
    /// Digits of the national number; normalized to "+90 XXX XXX XX XX"
    #[arg(long)]
    pub phone: String,
    #[arg(long)]
    pub email: String,
    /// Tech | Analytics
    #[arg(long)]
    pub department: Department,
    /// Junior | Medior | Senior
    #[arg(long)]
    pub position: Position,
}

/// Record fields for `update`; omitted fields keep their value.
#[derive(Args, Debug)]
pub struct PatchFields {
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub date_of_employment: Option<NaiveDate>,
    #[arg(long)]
    pub date_of_birth: Option<NaiveDate>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub department: Option<Department>,
    #[arg(long)]
    pub position: Option<Position>,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Create the store directory and seed it (bundled dataset unless --no-seed)
    Init {
        #[arg(long)]
        path: PathBuf,
        #[arg(long, default_value_t = false)]
        no_seed: bool,
    },
    /// Show the current page (optionally navigate first)
    List {
        #[arg(long)]
        path: PathBuf,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Look up one record by id
    Get {
        #[arg(long)]
        path: PathBuf,
        #[arg(long)]
        id: String,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Validate and add a record
    Add {
        #[arg(long)]
        path: PathBuf,
        #[command(flatten)]
        fields: NewFields,
    },
    /// Validate and update fields of a record
    Update {
        #[arg(long)]
        path: PathBuf,
        #[arg(long)]
        id: u64,
        #[command(flatten)]
        fields: PatchFields,
    },
    /// Delete a record
    Del {
        #[arg(long)]
        path: PathBuf,
        #[arg(long)]
        id: u64,
    },
    /// Delete several records in one write: --ids 1,2,3
    DelMany {
        #[arg(long)]
        path: PathBuf,
        #[arg(long)]
        ids: String,
    },
    /// Switch view mode (table = 9 per page, card = 4 per page)
    View {
        #[arg(long)]
        path: PathBuf,
        #[arg(long)]
        mode: ViewMode,
    },
    /// Navigate to a page
    Page {
        #[arg(long)]
        path: PathBuf,
        #[arg(long)]
        page: u32,
    },
    /// Store status (counts, pagination, metrics). --json prints one object.
    Status {
        #[arg(long)]
        path: PathBuf,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}
