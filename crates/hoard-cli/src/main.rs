//! CLI front end for Hoard ledgers.

mod commands;
mod logging;

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "hoard",
    about = "Hoard: a ledger for game currency and loot",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(flatten)]
    target: Target,

    #[command(subcommand)]
    command: Commands,
}

/// Which ledger to open.
#[derive(Args)]
pub struct Target {
    /// Directory holding the save files
    #[arg(short, long, global = true, default_value = ".")]
    pub dir: PathBuf,

    /// Location (server) the ledger belongs to
    #[arg(short, long, global = true, default_value = "local")]
    pub location: String,

    /// Ledger name
    #[arg(long, global = true, default_value = "ledger")]
    pub name: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new, empty ledger
    Init {
        /// Admin identity (owner of the Bank and Store)
        #[arg(long)]
        admin: String,

        /// Admin key
        #[arg(short, long)]
        key: String,

        /// Store key (default: the admin key)
        #[arg(long)]
        store_key: Option<String>,
    },

    /// Open a user account
    AddUser {
        /// Account name
        account: String,

        /// Owner identity
        #[arg(long)]
        owner: String,

        /// Key that will open the account
        #[arg(short, long)]
        key: String,

        /// Starting balance
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        value: f64,

        /// Starting item, as Name:Quantity (repeatable)
        #[arg(long = "item", value_parser = commands::add_user::parse_item)]
        items: Vec<(String, i64)>,
    },

    /// Execute a ledger command, e.g. "Alice gives Bob: 5, Sword:1"
    Run {
        /// The command text
        command: String,

        /// Key authorizing the command
        #[arg(short, long, default_value = "")]
        key: String,
    },

    /// Parse a command without executing it
    Check {
        /// The command text
        command: String,
    },

    /// Show an account's holdings
    Balance {
        /// Account name
        account: String,
    },

    /// List user accounts
    Users,

    /// List items and their values
    Items,

    /// Show the transaction history
    Log {
        /// Number of most recent entries (0 = all)
        #[arg(short = 'n', long, default_value = "0")]
        count: usize,
    },

    /// Show the combined holdings of all users and the Pot
    Total,

    /// Show what each user must receive or give up to even out
    Rectify,

    /// Toggle a lock: user, transaction, store or bank
    Lock {
        /// Lock name
        lock: String,

        /// Admin key
        #[arg(short, long)]
        key: String,
    },

    /// Export the whole ledger as JSON
    Export {
        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    logging::init();
    let cli = Cli::parse();
    let target = &cli.target;

    let result = match cli.command {
        Commands::Init {
            admin,
            key,
            store_key,
        } => commands::init::run(target, &admin, &key, store_key.as_deref()),
        Commands::AddUser {
            account,
            owner,
            key,
            value,
            items,
        } => commands::add_user::run(target, &account, &owner, &key, value, items),
        Commands::Run { command, key } => commands::run::run(target, &command, &key),
        Commands::Check { command } => commands::check::run(&command),
        Commands::Balance { account } => commands::balance::run(target, &account),
        Commands::Users => commands::users::run(target),
        Commands::Items => commands::items::run(target),
        Commands::Log { count } => commands::log::run(target, count),
        Commands::Total => commands::total::run(target),
        Commands::Rectify => commands::rectify::run(target),
        Commands::Lock { lock, key } => commands::lock::run(target, &lock, &key),
        Commands::Export { output } => commands::export::run(target, output.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
