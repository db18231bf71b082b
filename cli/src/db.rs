//! Local employee roster for the payroll CLI.
//!
//! The roster lives at `~/.payroll/roster.sqlite` and maps Stellar account
//! keys to the human-readable name and yearly salary the company recorded
//! when hiring. The contract only knows addresses; `reconcile` uses this
//! table to put names next to on-chain payouts.
//!
//! Salaries are stored as decimal TEXT: on-chain they are `u128`, wider than
//! SQLite's INTEGER.
//!
//! # Schema
//! ```sql
//! CREATE TABLE roster (
//!     employee_pubkey TEXT    PRIMARY KEY,
//!     name            TEXT    NOT NULL,
//!     annual_salary   TEXT    NOT NULL
//! );
//! ```

use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};

/// One roster row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub name: String,
    /// Yearly salary in reference-currency units.
    pub annual_salary: u128,
}

// ── Path resolution ───────────────────────────────────────────────────────────

/// Returns the canonical path `~/.payroll/roster.sqlite`.
pub fn db_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context(
        "Cannot determine the home directory. \
         Ensure the HOME (Unix) or USERPROFILE (Windows) environment variable is set.",
    )?;
    Ok(home.join(".payroll").join("roster.sqlite"))
}

// ── Connection management ─────────────────────────────────────────────────────

/// Open (or create) the SQLite database at `path` in WAL mode.
pub fn open(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)
        .with_context(|| format!("Cannot open SQLite database at {}", path.display()))?;

    conn.execute_batch("PRAGMA journal_mode=WAL;")
        .context("Failed to configure SQLite pragmas")?;

    Ok(conn)
}

// ── Schema initialisation ─────────────────────────────────────────────────────

/// Create the `roster` table if it does not already exist.
pub fn initialise(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS roster (
            employee_pubkey TEXT     PRIMARY KEY,
            name            TEXT     NOT NULL,
            annual_salary   TEXT     NOT NULL
        );",
    )
    .context("Failed to create roster table")?;
    Ok(())
}

// ── Roster access ─────────────────────────────────────────────────────────────

/// Insert a new employee. Fails if `pubkey` is already on the roster.
pub fn insert_employee(conn: &Connection, pubkey: &str, name: &str, annual_salary: u128) -> Result<()> {
    conn.execute(
        "INSERT INTO roster (employee_pubkey, name, annual_salary) VALUES (?1, ?2, ?3)",
        params![pubkey, name, annual_salary.to_string()],
    )
    .with_context(|| format!("Failed to insert employee '{}'", pubkey))?;
    Ok(())
}

/// Look up `pubkey`. Returns `Ok(None)` when it is not on the roster.
pub fn get_employee(conn: &Connection, pubkey: &str) -> Result<Option<RosterEntry>> {
    let result = conn.query_row(
        "SELECT name, annual_salary FROM roster WHERE employee_pubkey = ?1",
        params![pubkey],
        |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
    );

    let (name, salary) = match result {
        Ok(pair) => pair,
        Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
        Err(e) => {
            return Err(e).with_context(|| format!("Database query failed for pubkey '{}'", pubkey))
        }
    };

    let annual_salary = salary
        .parse::<u128>()
        .with_context(|| format!("Corrupt salary '{}' on the roster for '{}'", salary, pubkey))?;
    Ok(Some(RosterEntry { name, annual_salary }))
}

pub fn employee_exists(conn: &Connection, pubkey: &str) -> Result<bool> {
    Ok(get_employee(conn, pubkey)?.is_some())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
