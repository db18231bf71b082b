#![no_std]
//! Multi-asset payroll treasury.
//!
//! The owner registers employees with a yearly salary in a reference
//! currency and the set of assets they may be paid in. Each employee splits
//! their pay across those assets (the rest goes out in the native currency)
//! and claims one monthly portion per payday, converted with the rates of an
//! external oracle.

use soroban_sdk::{contract, contractimpl, Address, Env, String, Vec};

mod accounting;
mod adapter;
mod allocation;
mod config;
mod errors;
mod events;
mod oracle;
mod payday;
mod registry;
mod storage;

pub use config::{PayrollConfig, DAY, DEFAULT_ALLOCATION_COOLDOWN, DEFAULT_PAYDAY_INTERVAL};
pub use errors::PayrollError;
pub use oracle::REFERENCE_RATE;
pub use payday::payout_amount;
pub use storage::{AllocationEntry, AssetProtocol, Employee, Payout};

use adapter::{Adapter, AssetTransfer};
use registry::require_owner;

#[contract]
pub struct Payroll;

#[contractimpl]
impl Payroll {
    // -----------------------------------------------------------------------
    // Setup and configuration
    // -----------------------------------------------------------------------

    /// Initialize with the owner and the native currency's asset contract.
    pub fn initialize(env: Env, owner: Address, native_asset: Address) -> Result<(), PayrollError> {
        if storage::is_initialized(&env) {
            return Err(PayrollError::AlreadyInitialized);
        }
        owner.require_auth();

        storage::set_owner(&env, &owner);
        storage::set_native_asset(&env, &native_asset);
        storage::set_protocol(&env, &native_asset, AssetProtocol::Native);
        storage::set_config(&env, &PayrollConfig::default());

        events::initialized(&env, &owner, &native_asset);
        Ok(())
    }

    pub fn get_owner(env: Env) -> Result<Address, PayrollError> {
        storage::owner(&env)
    }

    pub fn get_native_asset(env: Env) -> Result<Address, PayrollError> {
        storage::native_asset(&env)
    }

    pub fn set_oracle(env: Env, caller: Address, oracle: Address) -> Result<(), PayrollError> {
        require_owner(&env, &caller)?;
        storage::set_oracle(&env, &oracle);
        events::oracle_set(&env, &oracle);
        Ok(())
    }

    pub fn get_oracle(env: Env) -> Option<Address> {
        storage::oracle(&env)
    }

    /// Set the asset salaries are denominated in. Its rate is pinned to 100.
    pub fn set_reference_asset(env: Env, caller: Address, asset: Address) -> Result<(), PayrollError> {
        require_owner(&env, &caller)?;
        match storage::protocol(&env, &asset) {
            Some(AssetProtocol::Pull) | Some(AssetProtocol::Push) => {}
            _ => return Err(PayrollError::AssetNotRegistered),
        }
        storage::set_reference_asset(&env, &asset);
        events::reference_asset_set(&env, &asset);
        Ok(())
    }

    pub fn get_reference_asset(env: Env) -> Option<Address> {
        storage::reference_asset(&env)
    }

    /// Bind a token asset to its transfer protocol. Re-registering replaces it.
    pub fn register_asset(
        env: Env,
        caller: Address,
        asset: Address,
        protocol: AssetProtocol,
    ) -> Result<(), PayrollError> {
        require_owner(&env, &caller)?;
        if asset == storage::native_asset(&env)? {
            return Err(PayrollError::InvalidAssetList);
        }
        if protocol == AssetProtocol::Native {
            return Err(PayrollError::WrongProtocol);
        }
        storage::set_protocol(&env, &asset, protocol);
        events::asset_registered(&env, &asset, protocol);
        Ok(())
    }

    pub fn get_asset_protocol(env: Env, asset: Address) -> Option<AssetProtocol> {
        storage::protocol(&env, &asset)
    }

    pub fn set_config(env: Env, caller: Address, config: PayrollConfig) -> Result<(), PayrollError> {
        require_owner(&env, &caller)?;
        storage::set_config(&env, &config);
        events::timing_set(&env, &config);
        Ok(())
    }

    pub fn get_config(env: Env) -> Result<PayrollConfig, PayrollError> {
        storage::config(&env)
    }

    // -----------------------------------------------------------------------
    // Employee registry
    // -----------------------------------------------------------------------

    /// Register an employee with an empty name. Returns the new id.
    pub fn add_employee(
        env: Env,
        caller: Address,
        account: Address,
        allowed_assets: Vec<Address>,
        annual_salary: u128,
    ) -> Result<u64, PayrollError> {
        require_owner(&env, &caller)?;
        let name = String::from_str(&env, "");
        registry::add_employee(&env, account, allowed_assets, annual_salary, name)
    }

    pub fn add_employee_with_name(
        env: Env,
        caller: Address,
        account: Address,
        allowed_assets: Vec<Address>,
        annual_salary: u128,
        name: String,
    ) -> Result<u64, PayrollError> {
        require_owner(&env, &caller)?;
        registry::add_employee(&env, account, allowed_assets, annual_salary, name)
    }

    pub fn remove_employee(env: Env, caller: Address, id: u64) -> Result<(), PayrollError> {
        require_owner(&env, &caller)?;
        registry::remove_employee(&env, id)
    }

    pub fn set_employee_salary(
        env: Env,
        caller: Address,
        id: u64,
        annual_salary: u128,
    ) -> Result<(), PayrollError> {
        require_owner(&env, &caller)?;
        registry::set_salary(&env, id, annual_salary)
    }

    pub fn change_address_by_owner(
        env: Env,
        caller: Address,
        id: u64,
        new_account: Address,
    ) -> Result<(), PayrollError> {
        require_owner(&env, &caller)?;
        let employee = registry::load_active(&env, id)?;
        registry::change_account(&env, employee, new_account)
    }

    /// Self-service: `employee` is the caller's current account.
    pub fn change_address_by_employee(
        env: Env,
        employee: Address,
        new_account: Address,
    ) -> Result<(), PayrollError> {
        let record = registry::authenticate_employee(&env, &employee)?;
        registry::change_account(&env, record, new_account)
    }

    /// Any record ever created, including removed ones (`active == false`).
    pub fn get_employee(env: Env, id: u64) -> Result<Employee, PayrollError> {
        registry::load(&env, id)
    }

    /// Id of the active employee currently paid at `account`.
    pub fn get_employee_id(env: Env, account: Address) -> Result<u64, PayrollError> {
        storage::employee_id_for(&env, &account).ok_or(PayrollError::UnknownEmployee)
    }

    /// Number of active employees.
    pub fn get_employee_count(env: Env) -> u32 {
        storage::active_employees(&env)
    }

    // -----------------------------------------------------------------------
    // Allocation (employee self-service)
    // -----------------------------------------------------------------------

    pub fn determine_allocation(
        env: Env,
        employee: Address,
        assets: Vec<Address>,
        percentages: Vec<u32>,
    ) -> Result<(), PayrollError> {
        let record = registry::authenticate_employee(&env, &employee)?;
        allocation::determine(&env, record, assets, percentages)
    }

    /// Stored percentage for `asset`; for the native asset, the remainder.
    pub fn get_allocation(env: Env, employee: Address, asset: Address) -> Result<u32, PayrollError> {
        let record = registry::authenticate_employee(&env, &employee)?;
        allocation::percentage_for(&env, &record, &asset)
    }

    /// Share paid in the native currency: 100 minus the explicit entries.
    pub fn get_native_allocation(env: Env, employee: Address) -> Result<u32, PayrollError> {
        let record = registry::authenticate_employee(&env, &employee)?;
        Ok(allocation::native_share(&env, record.id))
    }

    // -----------------------------------------------------------------------
    // Payday
    // -----------------------------------------------------------------------

    /// Pay the caller one monthly portion across their allocation.
    pub fn payday(env: Env, employee: Address) -> Result<Vec<Payout>, PayrollError> {
        payday::run(&env, &employee)
    }

    pub fn get_exchange_rate(env: Env, asset: Address) -> u128 {
        oracle::resolve_rate(&env, &asset)
    }

    // -----------------------------------------------------------------------
    // Treasury funding
    // -----------------------------------------------------------------------

    /// Pay native currency into the treasury.
    pub fn add_funds(env: Env, from: Address, amount: i128) -> Result<(), PayrollError> {
        let native = storage::native_asset(&env)?;
        Self::fund(env, from, native, amount)
    }

    /// Pull `amount` of a native or pull-based asset from `from`.
    pub fn fund(env: Env, from: Address, asset: Address, amount: i128) -> Result<(), PayrollError> {
        from.require_auth();
        if amount <= 0 {
            return Err(PayrollError::InvalidAmount);
        }
        let adapter = Adapter::resolve(&env, &asset)?;
        if adapter.protocol() == AssetProtocol::Push {
            return Err(PayrollError::WrongProtocol);
        }
        adapter.fund(&from, amount)?;
        events::funded(&env, &asset, &from, amount);
        Ok(())
    }

    /// Deposit notification from a push-based asset.
    pub fn token_received(env: Env, token: Address, from: Address, amount: i128) -> Result<(), PayrollError> {
        if amount <= 0 {
            return Err(PayrollError::InvalidAmount);
        }
        let adapter = Adapter::resolve(&env, &token)?;
        if adapter.protocol() != AssetProtocol::Push {
            return Err(PayrollError::WrongProtocol);
        }
        adapter.fund(&from, amount)?;
        events::funded(&env, &token, &from, amount);
        Ok(())
    }

    pub fn get_treasury_balance(env: Env, asset: Address) -> Result<i128, PayrollError> {
        Ok(Adapter::resolve(&env, &asset)?.balance())
    }

    // -----------------------------------------------------------------------
    // Accounting
    // -----------------------------------------------------------------------

    /// Monthly cost of all active salaries, in reference units.
    pub fn calculate_payroll_burnrate(env: Env) -> u128 {
        accounting::burnrate(&env)
    }

    /// Days of native balance left; `u128::MAX` while nobody is on payroll.
    pub fn calculate_payroll_runway(env: Env) -> Result<u128, PayrollError> {
        accounting::runway(&env)
    }

    pub fn get_yearly_total_payroll(env: Env) -> u128 {
        storage::total_annual_payroll(&env)
    }
}
