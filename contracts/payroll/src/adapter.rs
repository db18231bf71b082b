//! Uniform value movement over the treasury's three kinds of assets.
//!
//! Every asset is bound to one [`AssetProtocol`] at configuration time and
//! [`Adapter::resolve`] picks the matching implementation by asset identity.
//! All three speak [`AssetTransfer`]; callers never branch on the protocol.

use soroban_sdk::{contractclient, token, Address, Env};

use crate::errors::PayrollError;
use crate::storage::{self, AssetProtocol};

/// Surface of a push-based asset as seen from the treasury.
#[allow(dead_code)]
#[contractclient(name = "PushAssetClient")]
pub trait PushAssetInterface {
    fn transfer(env: Env, from: Address, to: Address, amount: i128);
    fn balance(env: Env, id: Address) -> i128;
}

/// Moves one asset between the treasury and an outside account.
pub trait AssetTransfer {
    /// Account for value entering the treasury from `from`.
    fn fund(&self, from: &Address, amount: i128) -> Result<(), PayrollError>;

    /// Send `amount` from the treasury to `to`, all or nothing.
    fn pay(&self, to: &Address, amount: i128) -> Result<(), PayrollError>;

    /// Treasury balance as reported by the asset's own ledger.
    fn balance(&self) -> i128;
}

pub struct NativeAdapter {
    env: Env,
    asset: Address,
}

pub struct PullAdapter {
    env: Env,
    asset: Address,
}

pub struct PushAdapter {
    env: Env,
    asset: Address,
}

pub enum Adapter {
    Native(NativeAdapter),
    Pull(PullAdapter),
    Push(PushAdapter),
}

impl Adapter {
    /// Look up the adapter registered for `asset`.
    pub fn resolve(env: &Env, asset: &Address) -> Result<Self, PayrollError> {
        let protocol = storage::protocol(env, asset).ok_or(PayrollError::AssetNotRegistered)?;
        let env = env.clone();
        let asset = asset.clone();
        Ok(match protocol {
            AssetProtocol::Native => Adapter::Native(NativeAdapter { env, asset }),
            AssetProtocol::Pull => Adapter::Pull(PullAdapter { env, asset }),
            AssetProtocol::Push => Adapter::Push(PushAdapter { env, asset }),
        })
    }

    pub fn protocol(&self) -> AssetProtocol {
        match self {
            Adapter::Native(_) => AssetProtocol::Native,
            Adapter::Pull(_) => AssetProtocol::Pull,
            Adapter::Push(_) => AssetProtocol::Push,
        }
    }

    fn inner(&self) -> &dyn AssetTransfer {
        match self {
            Adapter::Native(a) => a,
            Adapter::Pull(a) => a,
            Adapter::Push(a) => a,
        }
    }
}

impl AssetTransfer for Adapter {
    fn fund(&self, from: &Address, amount: i128) -> Result<(), PayrollError> {
        self.inner().fund(from, amount)
    }

    fn pay(&self, to: &Address, amount: i128) -> Result<(), PayrollError> {
        self.inner().pay(to, amount)
    }

    fn balance(&self) -> i128 {
        self.inner().balance()
    }
}

fn ensure_covered(balance: i128, amount: i128) -> Result<(), PayrollError> {
    if amount < 0 {
        return Err(PayrollError::InvalidAmount);
    }
    if balance < amount {
        return Err(PayrollError::InsufficientBalance);
    }
    Ok(())
}

impl AssetTransfer for NativeAdapter {
    /// The funder has already authorized this call; the payment itself is a
    /// plain transfer into the treasury.
    fn fund(&self, from: &Address, amount: i128) -> Result<(), PayrollError> {
        let treasury = self.env.current_contract_address();
        token::Client::new(&self.env, &self.asset).transfer(from, &treasury, &amount);
        Ok(())
    }

    fn pay(&self, to: &Address, amount: i128) -> Result<(), PayrollError> {
        ensure_covered(self.balance(), amount)?;
        let treasury = self.env.current_contract_address();
        token::Client::new(&self.env, &self.asset).transfer(&treasury, to, &amount);
        Ok(())
    }

    fn balance(&self) -> i128 {
        token::Client::new(&self.env, &self.asset).balance(&self.env.current_contract_address())
    }
}

impl AssetTransfer for PullAdapter {
    /// Pull `amount` from `from` using the allowance it granted the treasury.
    fn fund(&self, from: &Address, amount: i128) -> Result<(), PayrollError> {
        let treasury = self.env.current_contract_address();
        let client = token::Client::new(&self.env, &self.asset);
        if client.allowance(from, &treasury) < amount {
            return Err(PayrollError::InsufficientBalance);
        }
        client.transfer_from(&treasury, from, &treasury, &amount);
        Ok(())
    }

    fn pay(&self, to: &Address, amount: i128) -> Result<(), PayrollError> {
        ensure_covered(self.balance(), amount)?;
        let treasury = self.env.current_contract_address();
        token::Client::new(&self.env, &self.asset).transfer(&treasury, to, &amount);
        Ok(())
    }

    fn balance(&self) -> i128 {
        token::Client::new(&self.env, &self.asset).balance(&self.env.current_contract_address())
    }
}

impl AssetTransfer for PushAdapter {
    /// The value has already been pushed; only the asset itself may report it.
    fn fund(&self, _from: &Address, _amount: i128) -> Result<(), PayrollError> {
        self.asset.require_auth();
        Ok(())
    }

    fn pay(&self, to: &Address, amount: i128) -> Result<(), PayrollError> {
        ensure_covered(self.balance(), amount)?;
        let treasury = self.env.current_contract_address();
        PushAssetClient::new(&self.env, &self.asset).transfer(&treasury, to, &amount);
        Ok(())
    }

    fn balance(&self) -> i128 {
        PushAssetClient::new(&self.env, &self.asset).balance(&self.env.current_contract_address())
    }
}
