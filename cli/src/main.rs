//! Payroll CLI — off-chain companion of the multi-asset payroll contract.
//!
//! # Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `init` | Create the local roster at `~/.payroll/roster.sqlite` |
//! | `add-employee <pubkey> <name> <annual-salary>` | Record a hire on the local roster |
//! | `quote --salary S --native-rate R [--alloc LABEL=PERCENT@RATE ...]` | Preview one monthly payday |
//! | `reconcile --contract-id C` | List on-chain payouts next to roster names |
//!
//! The roster only stores what the contract does not: names. Salaries and
//! allocations on-chain remain authoritative.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

mod db;
mod quote;
mod reconcile;
mod rpc;

// ── CLI definition ────────────────────────────────────────────────────────────

/// Payroll CLI — roster, payout quotes and reconciliation for the
/// multi-asset payroll contract on Stellar/Soroban.
#[derive(Parser)]
#[command(name = "payroll")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialise the local roster database.
    ///
    /// Creates ~/.payroll/roster.sqlite. Safe to run multiple times.
    Init,

    /// Record an employee on the local roster.
    AddEmployee {
        /// Employee Stellar public key (56-character G... address).
        pubkey: String,

        /// Display name used in reports.
        name: String,

        /// Yearly salary in reference-currency units (same range as on-chain).
        annual_salary: u128,
    },

    /// Preview the payouts of one monthly payday.
    Quote {
        /// Yearly salary in reference-currency units.
        #[arg(long)]
        salary: u128,

        /// Native-currency units per 100 reference units.
        #[arg(long)]
        native_rate: u128,

        /// Explicit allocation entry, e.g. `EUR=50@100`. Repeatable.
        #[arg(long = "alloc", value_parser = quote::parse_alloc)]
        allocs: Vec<quote::AllocSpec>,
    },

    /// Cross-reference on-chain `paid` events with the local roster.
    Reconcile {
        /// Payroll contract address (C... StrKey).
        #[arg(long)]
        contract_id: String,

        /// Soroban RPC endpoint.
        #[arg(long, default_value = reconcile::DEFAULT_RPC_URL)]
        rpc_url: String,

        /// First ledger sequence to scan.
        #[arg(long, default_value_t = 0)]
        start_ledger: u32,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Init => cmd_init(),
        Commands::AddEmployee {
            pubkey,
            name,
            annual_salary,
        } => cmd_add_employee(&pubkey, &name, annual_salary),
        Commands::Quote {
            salary,
            native_rate,
            allocs,
        } => quote::run(salary, native_rate, &allocs),
        Commands::Reconcile {
            contract_id,
            rpc_url,
            start_ledger,
        } => reconcile::run(reconcile::ReconcileArgs {
            rpc_url: &rpc_url,
            contract_id: &contract_id,
            start_ledger,
        }),
    }
}

// ── Command implementations ───────────────────────────────────────────────────

/// `init` — create ~/.payroll/roster.sqlite.
fn cmd_init() -> Result<()> {
    let db_path = db::db_path()?;

    let dir = db_path
        .parent()
        .context("Cannot determine the parent directory for the database file")?;

    std::fs::create_dir_all(dir)
        .with_context(|| format!("Cannot create directory '{}'", dir.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(dir, std::fs::Permissions::from_mode(0o700))
            .with_context(|| format!("Cannot set permissions on '{}'", dir.display()))?;
    }

    let conn = db::open(&db_path)?;
    db::initialise(&conn)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&db_path, std::fs::Permissions::from_mode(0o600))
            .with_context(|| format!("Cannot set permissions on '{}'", db_path.display()))?;
    }

    println!("Payroll roster initialised at: {}", db_path.display());
    Ok(())
}

/// `add-employee <pubkey> <name> <annual-salary>`.
fn cmd_add_employee(pubkey: &str, name: &str, annual_salary: u128) -> Result<()> {
    validate_stellar_pubkey(pubkey)?;
    if name.trim().is_empty() {
        bail!("Employee name must not be empty.");
    }

    let db_path = db::db_path()?;
    if !db_path.exists() {
        bail!(
            "Roster not found at '{}'.\n\
             Run `payroll init` to create it first.",
            db_path.display()
        );
    }

    let conn = db::open(&db_path)?;
    if db::employee_exists(&conn, pubkey)? {
        bail!("Employee '{}' is already on the roster.", pubkey);
    }

    db::insert_employee(&conn, pubkey, name, annual_salary)
        .context("Failed to persist roster entry")?;

    println!("Added {} to the roster.", name);
    println!();
    println!("  Account : {}", pubkey);
    println!("  Salary  : {} per year", annual_salary);
    println!();
    println!("Register the same account on-chain with the contract's add_employee_with_name.");

    Ok(())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Validate `pubkey` as an ed25519 Stellar account StrKey (checksum included).
fn validate_stellar_pubkey(pubkey: &str) -> Result<()> {
    if !pubkey.starts_with('G') {
        bail!(
            "Invalid Stellar public key: '{}'\n\
             Expected a 56-character address starting with 'G'.",
            pubkey
        );
    }
    stellar_strkey::ed25519::PublicKey::from_string(pubkey)
        .map_err(|e| anyhow::anyhow!("Invalid Stellar public key '{}': {}", pubkey, e))?;
    Ok(())
}
