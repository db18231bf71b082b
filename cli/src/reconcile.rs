//! `reconcile` command — list on-chain payouts next to the local roster.
//!
//! For every `paid` event the command:
//! 1. Looks up the receiving account in `~/.payroll/roster.sqlite`.
//! 2. Renders one table row per transfer.
//! 3. Sums the payouts per asset.
//!
//! # Example output
//!
//! ```text
//! Reconciliation report
//! Soroban RPC  : https://soroban-testnet.stellar.org
//! Contract     : CXXX...
//! Start ledger : 1000000
//!
//! ┌────┬──────┬───────────────────────┬───────────────────────┬────────┬──────────────────────┬────────┐
//! │ Id │ Name │ Account               │ Asset                 │ Amount │ Ledger closed at     │ Roster │
//! ╞════╪══════╪═══════════════════════╪═══════════════════════╪════════╪══════════════════════╪════════╡
//! │ 1  │ Ann  │ GAAZI4TCR3TY5OJHCTJC… │ CDLZFC3SYJYDZT7K67VZ… │ 34375  │ 2024-12-01T00:00:00Z │ ✓      │
//! └────┴──────┴───────────────────────┴───────────────────────┴────────┴──────────────────────┴────────┘
//! ```

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, Table};

use crate::{db, rpc};

// ── Constants ─────────────────────────────────────────────────────────────────

/// Default Soroban RPC endpoint (Stellar testnet).
pub const DEFAULT_RPC_URL: &str = "https://soroban-testnet.stellar.org";

// ── Public entry point ────────────────────────────────────────────────────────

/// Arguments for the `reconcile` command.
pub struct ReconcileArgs<'a> {
    pub rpc_url: &'a str,
    pub contract_id: &'a str,
    pub start_ledger: u32,
}

/// Run the reconcile command: fetch events, join with the roster, print.
pub fn run(args: ReconcileArgs<'_>) -> Result<()> {
    println!("Reconciliation report");
    println!("Soroban RPC  : {}", args.rpc_url);
    println!("Contract     : {}", args.contract_id);
    println!("Start ledger : {}", args.start_ledger);
    println!();

    let events = rpc::fetch_paid_events(args.rpc_url, args.contract_id, args.start_ledger)
        .context("Failed to fetch paid events from Soroban RPC")?;

    if events.is_empty() {
        println!("No payouts found from ledger {}.", args.start_ledger);
        return Ok(());
    }

    let db_path = db::db_path()?;
    let conn_opt = if db_path.exists() {
        Some(db::open(&db_path).context("Failed to open local roster")?)
    } else {
        eprintln!(
            "WARN: No roster at '{}'; names cannot be resolved.",
            db_path.display()
        );
        None
    };

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            "Id",
            "Name",
            "Account",
            "Asset",
            "Amount",
            "Ledger closed at",
            "Roster",
        ]);

    for ev in &events {
        let entry = match &conn_opt {
            Some(conn) => db::get_employee(conn, &ev.account)?,
            None => None,
        };

        if entry.is_none() && conn_opt.is_some() {
            eprintln!(
                "WARN: Account {} (employee {}) was paid on-chain but is not on the local roster.",
                ev.account, ev.employee_id
            );
        }

        table.add_row(vec![
            Cell::new(ev.employee_id.to_string()),
            Cell::new(entry.as_ref().map(|e| e.name.as_str()).unwrap_or("?")),
            Cell::new(truncate(&ev.account, 20)),
            Cell::new(truncate(&ev.asset, 20)),
            Cell::new(ev.amount.to_string()),
            Cell::new(&ev.ledger_closed_at),
            Cell::new(if entry.is_some() { "✓" } else { "✗" }),
        ]);
    }

    println!("{table}");
    println!("{} payout(s) found.", events.len());

    for (asset, total) in totals_by_asset(&events) {
        println!("  {} : {}", asset, total);
    }

    Ok(())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Sum of paid amounts per asset StrKey.
fn totals_by_asset(events: &[rpc::PaidEvent]) -> BTreeMap<String, i128> {
    let mut totals = BTreeMap::new();
    for ev in events {
        *totals.entry(ev.asset.clone()).or_insert(0) += ev.amount;
    }
    totals
}

/// Truncate a string and append "…" if longer than `max` characters.
fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_owned()
    } else {
        format!("{}…", &s[..max])
    }
}
