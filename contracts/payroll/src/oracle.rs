use soroban_sdk::{contractclient, Address, Env};

use crate::storage;

/// Rate the reference currency always converts at, whatever the feed says.
pub const REFERENCE_RATE: u128 = 100;

/// Exchange-rate feed. `get_rate` answers `0` for assets it has no rate for.
#[allow(dead_code)]
#[contractclient(name = "ExchangeRateClient")]
pub trait ExchangeRateInterface {
    fn get_rate(env: Env, asset: Address) -> u128;
}

/// Rate the engine uses for `asset`.
///
/// The reference asset is pinned to [`REFERENCE_RATE`] and never read from
/// the feed. Without a configured feed every other asset resolves to `0`.
pub fn resolve_rate(env: &Env, asset: &Address) -> u128 {
    if storage::reference_asset(env).as_ref() == Some(asset) {
        return REFERENCE_RATE;
    }
    match storage::oracle(env) {
        Some(oracle) => ExchangeRateClient::new(env, &oracle).get_rate(asset),
        None => 0,
    }
}
