//! Monthly disbursement: salary conversion per allocated asset and transfer.
//!
//! A payday runs in two phases. [`Disbursement::prepare`] performs every
//! check and computes the payouts without touching storage;
//! [`Disbursement::commit`] advances the employee's accrual clock and
//! returns a [`CommittedDisbursement`], the only type able to call out to
//! asset contracts. A re-entrant payday therefore always observes the
//! advanced clock.

use soroban_sdk::{log, Address, Env, Vec};

use crate::adapter::{Adapter, AssetTransfer};
use crate::allocation::{self, FULL_ALLOCATION};
use crate::config::PayrollConfig;
use crate::errors::PayrollError;
use crate::events;
use crate::oracle;
use crate::registry;
use crate::storage::{self, Employee, Payout};

/// Months per year times the percentage base.
const MONTHLY_PERCENT_DIVISOR: u128 = 12 * 100;

/// `floor(annual_salary × rate × percentage / 1200)`.
pub fn payout_amount(annual_salary: u128, rate: u128, percentage: u32) -> Result<u128, PayrollError> {
    annual_salary
        .checked_mul(rate)
        .and_then(|v| v.checked_mul(percentage as u128))
        .map(|v| v / MONTHLY_PERCENT_DIVISOR)
        .ok_or(PayrollError::ArithmeticOverflow)
}

/// Checked and priced, nothing written yet.
pub struct Disbursement {
    employee: Employee,
    payouts: Vec<Payout>,
}

/// Clock advanced and persisted; transfers still pending.
pub struct CommittedDisbursement {
    employee: Employee,
    payouts: Vec<Payout>,
}

impl Disbursement {
    pub fn prepare(
        env: &Env,
        employee: Employee,
        config: &PayrollConfig,
        now: u64,
    ) -> Result<Self, PayrollError> {
        if employee.payments_made > 0
            && now.saturating_sub(employee.last_paid_at) < config.payday_interval
        {
            return Err(PayrollError::PaydayTooSoon);
        }

        let payouts = plan(env, &employee)?;
        for payout in payouts.iter() {
            let adapter = Adapter::resolve(env, &payout.asset)?;
            if adapter.balance() < payout.amount {
                return Err(PayrollError::InsufficientBalance);
            }
        }

        Ok(Self { employee, payouts })
    }

    pub fn commit(self, env: &Env, now: u64) -> Result<CommittedDisbursement, PayrollError> {
        let mut employee = self.employee;
        employee.last_paid_at = now;
        employee.payments_made = employee
            .payments_made
            .checked_add(1)
            .ok_or(PayrollError::ArithmeticOverflow)?;
        storage::save_employee(env, &employee);

        Ok(CommittedDisbursement {
            employee,
            payouts: self.payouts,
        })
    }
}

impl CommittedDisbursement {
    /// Execute every transfer. Any failure aborts the invocation, which also
    /// reverts the committed clock.
    pub fn execute(self, env: &Env) -> Result<Vec<Payout>, PayrollError> {
        for payout in self.payouts.iter() {
            Adapter::resolve(env, &payout.asset)?.pay(&self.employee.account, payout.amount)?;
            events::paid(
                env,
                self.employee.id,
                &self.employee.account,
                &payout.asset,
                payout.amount,
            );
        }
        log!(env, "payday settled", self.employee.id, self.payouts.len());
        Ok(self.payouts)
    }
}

/// Payouts for one monthly portion: explicit entries in allocation order,
/// then the native remainder. Zero shares, unset rates and amounts that
/// round to zero produce no payout.
pub fn plan(env: &Env, employee: &Employee) -> Result<Vec<Payout>, PayrollError> {
    let mut payouts = Vec::new(env);
    let entries = allocation::entries(env, employee.id);

    for entry in entries.iter() {
        push_payout(env, &mut payouts, employee.annual_salary, entry.asset, entry.percentage)?;
    }

    let native_share = FULL_ALLOCATION
        .checked_sub(allocation::explicit_total(&entries))
        .ok_or(PayrollError::AllocationOverflow)?;
    push_payout(
        env,
        &mut payouts,
        employee.annual_salary,
        storage::native_asset(env)?,
        native_share,
    )?;

    Ok(payouts)
}

fn push_payout(
    env: &Env,
    payouts: &mut Vec<Payout>,
    annual_salary: u128,
    asset: Address,
    percentage: u32,
) -> Result<(), PayrollError> {
    if percentage == 0 {
        return Ok(());
    }
    let rate = oracle::resolve_rate(env, &asset);
    if rate == 0 {
        log!(env, "rate unset, skipping asset", asset);
        return Ok(());
    }
    let amount = payout_amount(annual_salary, rate, percentage)?;
    if amount == 0 {
        return Ok(());
    }
    let amount = i128::try_from(amount).map_err(|_| PayrollError::ArithmeticOverflow)?;
    payouts.push_back(Payout { asset, amount });
    Ok(())
}

/// Pay `account`'s monthly portion.
pub fn run(env: &Env, account: &Address) -> Result<Vec<Payout>, PayrollError> {
    let employee = registry::authenticate_employee(env, account)?;
    let config = storage::config(env)?;
    let now = env.ledger().timestamp();

    Disbursement::prepare(env, employee, &config, now)?
        .commit(env, now)?
        .execute(env)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_share_is_a_twelfth_of_salary_times_rate() {
        // reference rate: 100_000 × 100 × 100 / 1200 = 833_333.3
        assert_eq!(payout_amount(100_000, 100, 100), Ok(833_333));
        assert_eq!(payout_amount(120_000, 7, 100), Ok(70_000));
    }

    #[test]
    fn partial_share_truncates() {
        // 125_000 × 3 × 15 / 1200 = 4_687.5
        assert_eq!(payout_amount(125_000, 3, 15), Ok(4_687));
    }

    #[test]
    fn zero_inputs_pay_nothing() {
        assert_eq!(payout_amount(0, 100, 100), Ok(0));
        assert_eq!(payout_amount(100_000, 0, 100), Ok(0));
        assert_eq!(payout_amount(100_000, 100, 0), Ok(0));
    }

    #[test]
    fn overflow_is_reported() {
        assert_eq!(
            payout_amount(u128::MAX / 2, 3, 100),
            Err(PayrollError::ArithmeticOverflow)
        );
    }
}
