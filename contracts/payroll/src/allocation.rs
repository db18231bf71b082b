//! Per-employee split of each payday across payout assets.

use soroban_sdk::{Address, Env, Vec};

use crate::errors::PayrollError;
use crate::events;
use crate::storage::{self, AllocationEntry, Employee};

pub const FULL_ALLOCATION: u32 = 100;

/// Replace `employee`'s whole allocation with `assets[i] -> percentages[i]`.
pub fn determine(
    env: &Env,
    mut employee: Employee,
    assets: Vec<Address>,
    percentages: Vec<u32>,
) -> Result<(), PayrollError> {
    if assets.len() != percentages.len() {
        return Err(PayrollError::LengthMismatch);
    }

    let now = env.ledger().timestamp();
    let cooldown = storage::config(env)?.allocation_cooldown;
    if let Some(updated_at) = employee.allocation_updated_at {
        if now.saturating_sub(updated_at) < cooldown {
            return Err(PayrollError::AllocationLocked);
        }
    }

    let mut entries: Vec<AllocationEntry> = Vec::new(env);
    let mut total: u32 = 0;
    for (asset, percentage) in assets.iter().zip(percentages.iter()) {
        if !employee.allowed_assets.contains(&asset) {
            return Err(PayrollError::AssetNotAllowed);
        }
        if entries.iter().any(|entry| entry.asset == asset) {
            return Err(PayrollError::InvalidAssetList);
        }
        total = total
            .checked_add(percentage)
            .filter(|sum| *sum <= FULL_ALLOCATION)
            .ok_or(PayrollError::AllocationOverflow)?;
        entries.push_back(AllocationEntry { asset, percentage });
    }

    storage::set_allocation(env, employee.id, &entries);
    employee.allocation_updated_at = Some(now);
    storage::save_employee(env, &employee);

    events::allocation_set(env, employee.id, total);
    Ok(())
}

/// Stored explicit entries, in the order the employee gave them.
pub fn entries(env: &Env, id: u64) -> Vec<AllocationEntry> {
    storage::allocation(env, id)
}

pub fn explicit_total(entries: &Vec<AllocationEntry>) -> u32 {
    entries.iter().map(|entry| entry.percentage).sum()
}

/// Share left for the native currency.
pub fn native_share(env: &Env, id: u64) -> u32 {
    FULL_ALLOCATION.saturating_sub(explicit_total(&entries(env, id)))
}

/// Percentage for `asset`; the native asset reports the implicit remainder.
pub fn percentage_for(env: &Env, employee: &Employee, asset: &Address) -> Result<u32, PayrollError> {
    if *asset == storage::native_asset(env)? {
        return Ok(native_share(env, employee.id));
    }
    Ok(entries(env, employee.id)
        .iter()
        .find(|entry| entry.asset == *asset)
        .map(|entry| entry.percentage)
        .unwrap_or(0))
}
