#![no_std]

use soroban_sdk::{contract, contractimpl, contracttype, Address, Env};

/// Storage keys for the oracle contract.
#[contracttype]
pub enum DataKey {
    /// Address allowed to publish rates.
    Admin,
    /// Published rate for an asset, in payout-asset units per 100 reference units.
    Rate(Address),
}

/// Exchange-rate feed consumed by the payroll engine.
///
/// A rate of `0` means "unset": the asset is not currently payable.
#[contract]
pub struct RateOracle;

#[contractimpl]
impl RateOracle {
    /// Initialize the oracle with the address allowed to publish rates.
    ///
    /// This should be called exactly once during deployment/setup.
    pub fn initialize(env: Env, admin: Address) {
        if env.storage().persistent().has(&DataKey::Admin) {
            panic!("Oracle already initialized");
        }
        env.storage().persistent().set(&DataKey::Admin, &admin);
    }

    /// Publish (or clear, with `0`) the rate for `asset`.
    pub fn set_rate(env: Env, asset: Address, rate: u128) {
        let admin: Address = env
            .storage()
            .persistent()
            .get(&DataKey::Admin)
            .expect("Oracle not initialized");
        admin.require_auth();

        env.storage().persistent().set(&DataKey::Rate(asset), &rate);
    }

    /// Current rate for `asset`, `0` when nothing has been published.
    pub fn get_rate(env: Env, asset: Address) -> u128 {
        env.storage()
            .persistent()
            .get(&DataKey::Rate(asset))
            .unwrap_or(0)
    }
}
