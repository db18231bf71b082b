//-----------------------------------------------------------------------------
// Events
//-----------------------------------------------------------------------------

use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::config::PayrollConfig;
use crate::storage::AssetProtocol;

/// Contract initialized with an owner and native asset
pub const INIT_EVENT: Symbol = symbol_short!("init");

/// Owner configuration changed (oracle, reference asset, timing rules)
pub const CONFIG_EVENT: Symbol = symbol_short!("config");

/// Asset registered with a transfer protocol
pub const ASSET_EVENT: Symbol = symbol_short!("asset");

// Employee lifecycle
pub const EMPLOYEE_ADDED_EVENT: Symbol = symbol_short!("emp_add");
pub const EMPLOYEE_REMOVED_EVENT: Symbol = symbol_short!("emp_rm");
pub const SALARY_EVENT: Symbol = symbol_short!("salary");
pub const ADDRESS_EVENT: Symbol = symbol_short!("address");
pub const ALLOCATION_EVENT: Symbol = symbol_short!("alloc");

/// One asset transfer of a payday. Topics `(paid, employee_id)`,
/// data `(account, asset, amount)`; the CLI reconcile command decodes this.
pub const PAID_EVENT: Symbol = symbol_short!("paid");

/// Treasury received funds. Topics `(funded, asset)`, data `(from, amount)`.
pub const FUNDED_EVENT: Symbol = symbol_short!("funded");

pub fn initialized(env: &Env, owner: &Address, native_asset: &Address) {
    env.events()
        .publish((INIT_EVENT,), (owner.clone(), native_asset.clone()));
}

pub fn oracle_set(env: &Env, oracle: &Address) {
    env.events()
        .publish((CONFIG_EVENT, symbol_short!("oracle")), oracle.clone());
}

pub fn reference_asset_set(env: &Env, asset: &Address) {
    env.events()
        .publish((CONFIG_EVENT, symbol_short!("reference")), asset.clone());
}

pub fn timing_set(env: &Env, config: &PayrollConfig) {
    env.events().publish(
        (CONFIG_EVENT, symbol_short!("timing")),
        (config.payday_interval, config.allocation_cooldown),
    );
}

pub fn asset_registered(env: &Env, asset: &Address, protocol: AssetProtocol) {
    env.events()
        .publish((ASSET_EVENT, asset.clone()), protocol as u32);
}

pub fn employee_added(env: &Env, id: u64, account: &Address, annual_salary: u128) {
    env.events().publish(
        (EMPLOYEE_ADDED_EVENT, id),
        (account.clone(), annual_salary),
    );
}

pub fn employee_removed(env: &Env, id: u64) {
    env.events().publish((EMPLOYEE_REMOVED_EVENT, id), ());
}

pub fn salary_changed(env: &Env, id: u64, old_salary: u128, new_salary: u128) {
    env.events()
        .publish((SALARY_EVENT, id), (old_salary, new_salary));
}

pub fn address_changed(env: &Env, id: u64, old_account: &Address, new_account: &Address) {
    env.events().publish(
        (ADDRESS_EVENT, id),
        (old_account.clone(), new_account.clone()),
    );
}

pub fn allocation_set(env: &Env, id: u64, explicit_total: u32) {
    env.events()
        .publish((ALLOCATION_EVENT, id), explicit_total);
}

pub fn paid(env: &Env, id: u64, account: &Address, asset: &Address, amount: i128) {
    env.events().publish(
        (PAID_EVENT, id),
        (account.clone(), asset.clone(), amount),
    );
}

pub fn funded(env: &Env, asset: &Address, from: &Address, amount: i128) {
    env.events()
        .publish((FUNDED_EVENT, asset.clone()), (from.clone(), amount));
}
