use soroban_sdk::Env;

use crate::adapter::{Adapter, AssetTransfer};
use crate::errors::PayrollError;
use crate::storage;

const MONTHS_PER_YEAR: u128 = 12;
const DAYS_PER_YEAR: u128 = 365;

/// Monthly cost of the active payroll.
pub fn burnrate(env: &Env) -> u128 {
    storage::total_annual_payroll(env) / MONTHS_PER_YEAR
}

/// Days the treasury's native balance lasts at the current payroll.
pub fn runway(env: &Env) -> Result<u128, PayrollError> {
    let native = Adapter::resolve(env, &storage::native_asset(env)?)?;
    let balance = u128::try_from(native.balance()).unwrap_or(0);
    Ok(runway_days(balance, storage::total_annual_payroll(env)))
}

/// `balance × 365 / annual_payroll`, or `u128::MAX` for an empty payroll.
/// Saturates at `u128::MAX`.
pub fn runway_days(balance: u128, annual_payroll: u128) -> u128 {
    if annual_payroll == 0 {
        return u128::MAX;
    }
    match balance.checked_mul(DAYS_PER_YEAR) {
        Some(scaled) => scaled / annual_payroll,
        None => (balance / annual_payroll)
            .saturating_mul(DAYS_PER_YEAR)
            .saturating_add(scaled_fraction(balance % annual_payroll, annual_payroll)),
    }
}

/// `floor(remainder × 365 / divisor)` for `remainder < divisor`, without
/// forming the product.
fn scaled_fraction(remainder: u128, divisor: u128) -> u128 {
    let mut whole = 0;
    let mut carry: u128 = 0;
    for _ in 0..DAYS_PER_YEAR {
        // carry + remainder >= divisor, rearranged so nothing overflows
        if carry >= divisor - remainder {
            carry -= divisor - remainder;
            whole += 1;
        } else {
            carry += remainder;
        }
    }
    whole
}
