#![no_std]
//! Push-based payout asset used by the payroll test-suites.
//!
//! Value is pushed by the sender: `transfer_and_notify` moves the balance and
//! then calls `token_received` on the receiving contract, which may reject the
//! deposit by failing (the whole transfer is then rolled back). Plain
//! `transfer` moves value to accounts without any notification.

use soroban_sdk::{contract, contractclient, contractimpl, contracttype, Address, Env};
use soroban_token_sdk::TokenUtils;

/// Hook a contract implements to accept pushed deposits.
#[contractclient(name = "TokenReceiverClient")]
pub trait TokenReceiver {
    fn token_received(env: Env, token: Address, from: Address, amount: i128);
}

#[contracttype]
pub enum DataKey {
    Admin,
    Balance(Address),
}

#[contract]
pub struct PushToken;

#[contractimpl]
impl PushToken {
    pub fn initialize(e: Env, admin: Address) {
        if e.storage().persistent().has(&DataKey::Admin) {
            panic!("Already initialized");
        }
        e.storage().persistent().set(&DataKey::Admin, &admin);
    }

    pub fn mint(e: Env, to: Address, amount: i128) {
        if amount < 0 {
            panic!("Mint amount must be non-negative");
        }
        let admin: Address = e
            .storage()
            .persistent()
            .get(&DataKey::Admin)
            .expect("Not initialized");
        admin.require_auth();

        Self::credit(&e, &to, amount);
        TokenUtils::new(&e).events().mint(admin, to, amount);
    }

    pub fn balance(e: Env, id: Address) -> i128 {
        e.storage()
            .persistent()
            .get(&DataKey::Balance(id))
            .unwrap_or(0)
    }

    pub fn transfer(e: Env, from: Address, to: Address, amount: i128) {
        from.require_auth();
        Self::move_balance(&e, &from, &to, amount);
    }

    /// Transfer to a contract and notify it. The receiver's failure aborts
    /// the transfer.
    pub fn transfer_and_notify(e: Env, from: Address, to: Address, amount: i128) {
        from.require_auth();
        Self::move_balance(&e, &from, &to, amount);

        let receiver = TokenReceiverClient::new(&e, &to);
        receiver.token_received(&e.current_contract_address(), &from, &amount);
    }

    fn move_balance(e: &Env, from: &Address, to: &Address, amount: i128) {
        if amount < 0 {
            panic!("Transfer amount must be non-negative");
        }
        let from_key = DataKey::Balance(from.clone());
        let from_balance: i128 = e.storage().persistent().get(&from_key).unwrap_or(0);
        if from_balance < amount {
            panic!("Insufficient balance");
        }
        e.storage()
            .persistent()
            .set(&from_key, &(from_balance - amount));
        Self::credit(e, to, amount);
        TokenUtils::new(e)
            .events()
            .transfer(from.clone(), to.clone(), amount);
    }

    fn credit(e: &Env, id: &Address, amount: i128) {
        let key = DataKey::Balance(id.clone());
        let balance: i128 = e.storage().persistent().get(&key).unwrap_or(0);
        e.storage().persistent().set(&key, &(balance + amount));
    }
}
