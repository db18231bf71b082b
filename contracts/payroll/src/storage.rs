use soroban_sdk::{contracttype, Address, Env, String, Vec};

use crate::config::PayrollConfig;
use crate::errors::PayrollError;

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

/// How value of an asset moves in and out of the treasury.
#[contracttype]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum AssetProtocol {
    /// The native currency: funded by direct payment, paid by plain transfer.
    Native = 0,
    /// Allowance based: funders approve the treasury, which then pulls.
    Pull = 1,
    /// Sender pushes value and the asset notifies the treasury.
    Push = 2,
}

/// Persistent employee record. Keyed by auto-incremented id starting at 1.
#[contracttype]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Employee {
    pub id: u64,
    /// Current payable account; also the identity used for self-service calls.
    pub account: Address,
    pub name: String,
    /// Yearly salary in the reference currency's smallest unit.
    pub annual_salary: u128,
    /// Assets the allocation may reference, fixed at creation.
    pub allowed_assets: Vec<Address>,
    pub created_at: u64,
    /// Timestamp of the last disbursement, creation time before the first.
    pub last_paid_at: u64,
    pub payments_made: u32,
    /// Timestamp of the last allocation change, `None` while never allocated.
    pub allocation_updated_at: Option<u64>,
    pub active: bool,
}

/// One explicit allocation entry. The native currency is never stored here;
/// it receives whatever the explicit entries leave of 100.
#[contracttype]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AllocationEntry {
    pub asset: Address,
    pub percentage: u32,
}

/// One transfer executed by a payday.
#[contracttype]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Payout {
    pub asset: Address,
    pub amount: i128,
}

/// Storage key space for the payroll contract.
///
/// - `Owner`, `NativeAsset`, `Oracle`, `ReferenceAsset`, `Config` → configuration
/// - `Protocol(Address)`          → `AssetProtocol`
/// - `NextEmployeeId`             → `u64` (auto-increment, starts at 1)
/// - `ActiveEmployees`            → `u32`
/// - `TotalAnnualPayroll`         → `u128`, sum of active salaries
/// - `Employee(u64)`              → `Employee`
/// - `EmployeeByAccount(Address)` → `u64`, active employees only
/// - `Allocation(u64)`            → `Vec<AllocationEntry>`
#[contracttype]
pub enum DataKey {
    Owner,
    NativeAsset,
    Oracle,
    ReferenceAsset,
    Config,
    Protocol(Address),
    NextEmployeeId,
    ActiveEmployees,
    TotalAnnualPayroll,
    Employee(u64),
    EmployeeByAccount(Address),
    Allocation(u64),
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

pub fn is_initialized(env: &Env) -> bool {
    env.storage().persistent().has(&DataKey::Owner)
}

pub fn owner(env: &Env) -> Result<Address, PayrollError> {
    env.storage()
        .persistent()
        .get(&DataKey::Owner)
        .ok_or(PayrollError::NotInitialized)
}

pub fn set_owner(env: &Env, owner: &Address) {
    env.storage().persistent().set(&DataKey::Owner, owner);
}

pub fn native_asset(env: &Env) -> Result<Address, PayrollError> {
    env.storage()
        .persistent()
        .get(&DataKey::NativeAsset)
        .ok_or(PayrollError::NotInitialized)
}

pub fn set_native_asset(env: &Env, asset: &Address) {
    env.storage().persistent().set(&DataKey::NativeAsset, asset);
}

pub fn oracle(env: &Env) -> Option<Address> {
    env.storage().persistent().get(&DataKey::Oracle)
}

pub fn set_oracle(env: &Env, oracle: &Address) {
    env.storage().persistent().set(&DataKey::Oracle, oracle);
}

pub fn reference_asset(env: &Env) -> Option<Address> {
    env.storage().persistent().get(&DataKey::ReferenceAsset)
}

pub fn set_reference_asset(env: &Env, asset: &Address) {
    env.storage().persistent().set(&DataKey::ReferenceAsset, asset);
}

pub fn config(env: &Env) -> Result<PayrollConfig, PayrollError> {
    env.storage()
        .persistent()
        .get(&DataKey::Config)
        .ok_or(PayrollError::NotInitialized)
}

pub fn set_config(env: &Env, config: &PayrollConfig) {
    env.storage().persistent().set(&DataKey::Config, config);
}

pub fn protocol(env: &Env, asset: &Address) -> Option<AssetProtocol> {
    env.storage()
        .persistent()
        .get(&DataKey::Protocol(asset.clone()))
}

pub fn set_protocol(env: &Env, asset: &Address, protocol: AssetProtocol) {
    env.storage()
        .persistent()
        .set(&DataKey::Protocol(asset.clone()), &protocol);
}

// ---------------------------------------------------------------------------
// Registry counters
// ---------------------------------------------------------------------------

/// Hand out the next employee id. Ids are never reused.
pub fn take_next_employee_id(env: &Env) -> Result<u64, PayrollError> {
    let id: u64 = env
        .storage()
        .persistent()
        .get(&DataKey::NextEmployeeId)
        .unwrap_or(1u64);
    let next = id.checked_add(1).ok_or(PayrollError::ArithmeticOverflow)?;
    env.storage()
        .persistent()
        .set(&DataKey::NextEmployeeId, &next);
    Ok(id)
}

pub fn active_employees(env: &Env) -> u32 {
    env.storage()
        .persistent()
        .get(&DataKey::ActiveEmployees)
        .unwrap_or(0)
}

pub fn set_active_employees(env: &Env, count: u32) {
    env.storage()
        .persistent()
        .set(&DataKey::ActiveEmployees, &count);
}

pub fn total_annual_payroll(env: &Env) -> u128 {
    env.storage()
        .persistent()
        .get(&DataKey::TotalAnnualPayroll)
        .unwrap_or(0)
}

pub fn set_total_annual_payroll(env: &Env, total: u128) {
    env.storage()
        .persistent()
        .set(&DataKey::TotalAnnualPayroll, &total);
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

pub fn employee(env: &Env, id: u64) -> Option<Employee> {
    env.storage().persistent().get(&DataKey::Employee(id))
}

pub fn save_employee(env: &Env, employee: &Employee) {
    env.storage()
        .persistent()
        .set(&DataKey::Employee(employee.id), employee);
}

pub fn employee_id_for(env: &Env, account: &Address) -> Option<u64> {
    env.storage()
        .persistent()
        .get(&DataKey::EmployeeByAccount(account.clone()))
}

pub fn index_account(env: &Env, account: &Address, id: u64) {
    env.storage()
        .persistent()
        .set(&DataKey::EmployeeByAccount(account.clone()), &id);
}

pub fn unindex_account(env: &Env, account: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::EmployeeByAccount(account.clone()));
}

pub fn allocation(env: &Env, id: u64) -> Vec<AllocationEntry> {
    env.storage()
        .persistent()
        .get(&DataKey::Allocation(id))
        .unwrap_or(Vec::new(env))
}

pub fn set_allocation(env: &Env, id: u64, entries: &Vec<AllocationEntry>) {
    env.storage()
        .persistent()
        .set(&DataKey::Allocation(id), entries);
}
