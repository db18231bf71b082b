//! Employee records, id assignment and the identity rules for callers.

use soroban_sdk::{Address, Env, String, Vec};

use crate::errors::PayrollError;
use crate::events;
use crate::storage::{self, AssetProtocol, Employee};

/// Authenticate `caller` and check it is the contract owner.
pub fn require_owner(env: &Env, caller: &Address) -> Result<(), PayrollError> {
    caller.require_auth();
    if *caller != storage::owner(env)? {
        return Err(PayrollError::Unauthorized);
    }
    Ok(())
}

/// Authenticate `account` and return the active employee it belongs to.
pub fn authenticate_employee(env: &Env, account: &Address) -> Result<Employee, PayrollError> {
    account.require_auth();
    let id = storage::employee_id_for(env, account).ok_or(PayrollError::Unauthorized)?;
    load_active(env, id)
}

/// Any record ever created, active or not.
pub fn load(env: &Env, id: u64) -> Result<Employee, PayrollError> {
    storage::employee(env, id).ok_or(PayrollError::UnknownEmployee)
}

pub fn load_active(env: &Env, id: u64) -> Result<Employee, PayrollError> {
    let employee = load(env, id)?;
    if !employee.active {
        return Err(PayrollError::UnknownEmployee);
    }
    Ok(employee)
}

/// Every allowed asset must be a distinct, registered token asset; the
/// native currency is always the implicit remainder and cannot be listed.
pub fn validate_allowed_assets(env: &Env, assets: &Vec<Address>) -> Result<(), PayrollError> {
    if assets.is_empty() {
        return Err(PayrollError::InvalidAssetList);
    }
    for (i, asset) in assets.iter().enumerate() {
        for earlier in assets.iter().take(i) {
            if earlier == asset {
                return Err(PayrollError::InvalidAssetList);
            }
        }
        match storage::protocol(env, &asset) {
            Some(AssetProtocol::Native) => return Err(PayrollError::InvalidAssetList),
            Some(_) => {}
            None => return Err(PayrollError::AssetNotRegistered),
        }
    }
    Ok(())
}

fn ensure_account_free(env: &Env, account: &Address) -> Result<(), PayrollError> {
    if storage::employee_id_for(env, account).is_some() {
        return Err(PayrollError::AccountInUse);
    }
    Ok(())
}

pub fn add_employee(
    env: &Env,
    account: Address,
    allowed_assets: Vec<Address>,
    annual_salary: u128,
    name: String,
) -> Result<u64, PayrollError> {
    validate_allowed_assets(env, &allowed_assets)?;
    ensure_account_free(env, &account)?;

    let total = storage::total_annual_payroll(env)
        .checked_add(annual_salary)
        .ok_or(PayrollError::ArithmeticOverflow)?;
    let count = storage::active_employees(env)
        .checked_add(1)
        .ok_or(PayrollError::ArithmeticOverflow)?;
    let id = storage::take_next_employee_id(env)?;
    let now = env.ledger().timestamp();

    let employee = Employee {
        id,
        account: account.clone(),
        name,
        annual_salary,
        allowed_assets,
        created_at: now,
        last_paid_at: now,
        payments_made: 0,
        allocation_updated_at: None,
        active: true,
    };
    storage::save_employee(env, &employee);
    storage::index_account(env, &account, id);
    storage::set_total_annual_payroll(env, total);
    storage::set_active_employees(env, count);

    events::employee_added(env, id, &account, annual_salary);
    Ok(id)
}

/// Deactivate for good. Allocation and history stay in storage, inert.
pub fn remove_employee(env: &Env, id: u64) -> Result<(), PayrollError> {
    let mut employee = load_active(env, id)?;

    let total = storage::total_annual_payroll(env)
        .checked_sub(employee.annual_salary)
        .ok_or(PayrollError::ArithmeticOverflow)?;
    let count = storage::active_employees(env)
        .checked_sub(1)
        .ok_or(PayrollError::ArithmeticOverflow)?;

    employee.active = false;
    storage::save_employee(env, &employee);
    storage::unindex_account(env, &employee.account);
    storage::set_total_annual_payroll(env, total);
    storage::set_active_employees(env, count);

    events::employee_removed(env, id);
    Ok(())
}

pub fn set_salary(env: &Env, id: u64, new_salary: u128) -> Result<(), PayrollError> {
    let mut employee = load_active(env, id)?;

    let total = storage::total_annual_payroll(env)
        .checked_sub(employee.annual_salary)
        .and_then(|rest| rest.checked_add(new_salary))
        .ok_or(PayrollError::ArithmeticOverflow)?;

    let old_salary = employee.annual_salary;
    employee.annual_salary = new_salary;
    storage::save_employee(env, &employee);
    storage::set_total_annual_payroll(env, total);

    events::salary_changed(env, id, old_salary, new_salary);
    Ok(())
}

/// Point the record at a new payable account. Salary and allocation are
/// untouched.
pub fn change_account(env: &Env, mut employee: Employee, new_account: Address) -> Result<(), PayrollError> {
    if employee.account == new_account {
        return Ok(());
    }
    ensure_account_free(env, &new_account)?;

    let old_account = employee.account.clone();
    storage::unindex_account(env, &old_account);
    storage::index_account(env, &new_account, employee.id);
    employee.account = new_account.clone();
    storage::save_employee(env, &employee);

    events::address_changed(env, employee.id, &old_account, &new_account);
    Ok(())
}
