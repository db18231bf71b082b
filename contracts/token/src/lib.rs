#![no_std]
//! Pull-based payout asset used by the payroll test-suites.
//!
//! Speaks the subset of the SEP-41 interface the payroll engine consumes via
//! `soroban_sdk::token::Client`: `balance`, `transfer`, `approve`,
//! `allowance` and `transfer_from`. Funding a treasury with this asset is a
//! two-step pull: the funder approves the treasury, then the treasury calls
//! `transfer_from` on itself.

use soroban_sdk::{contract, contractimpl, contracttype, Address, Env, String};
use soroban_token_sdk::TokenUtils;

#[contracttype]
pub enum DataKey {
    Admin,
    Decimals,
    Name,
    Symbol,
    Balance(Address),
    Allowance(Address, Address), // (owner, spender)
}

#[contract]
pub struct Token;

#[contractimpl]
impl Token {
    pub fn initialize(e: Env, admin: Address, decimal: u32, name: String, symbol: String) {
        if e.storage().persistent().has(&DataKey::Admin) {
            panic!("Already initialized");
        }
        e.storage().persistent().set(&DataKey::Admin, &admin);
        e.storage().persistent().set(&DataKey::Decimals, &decimal);
        e.storage().persistent().set(&DataKey::Name, &name);
        e.storage().persistent().set(&DataKey::Symbol, &symbol);
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

    pub fn decimals(e: Env) -> u32 {
        e.storage().persistent().get(&DataKey::Decimals).unwrap_or(7)
    }

    pub fn approve(e: Env, from: Address, spender: Address, amount: i128, expiration_ledger: u32) {
        from.require_auth();
        if amount < 0 {
            panic!("Approve amount must be non-negative");
        }
        e.storage()
            .persistent()
            .set(&DataKey::Allowance(from.clone(), spender.clone()), &amount);
        TokenUtils::new(&e)
            .events()
            .approve(from, spender, amount, expiration_ledger);
    }

    pub fn allowance(e: Env, from: Address, spender: Address) -> i128 {
        e.storage()
            .persistent()
            .get(&DataKey::Allowance(from, spender))
            .unwrap_or(0)
    }

    pub fn transfer(e: Env, from: Address, to: Address, amount: i128) {
        from.require_auth();
        if amount < 0 {
            panic!("Transfer amount must be non-negative");
        }
        Self::debit(&e, &from, amount);
        Self::credit(&e, &to, amount);
        TokenUtils::new(&e).events().transfer(from, to, amount);
    }

    pub fn transfer_from(e: Env, spender: Address, from: Address, to: Address, amount: i128) {
        spender.require_auth();
        if amount < 0 {
            panic!("Transfer amount must be non-negative");
        }
        let key = DataKey::Allowance(from.clone(), spender);
        let allowance: i128 = e.storage().persistent().get(&key).unwrap_or(0);
        if allowance < amount {
            panic!("Insufficient allowance");
        }
        e.storage().persistent().set(&key, &(allowance - amount));

        Self::debit(&e, &from, amount);
        Self::credit(&e, &to, amount);
        TokenUtils::new(&e).events().transfer(from, to, amount);
    }

    fn debit(e: &Env, id: &Address, amount: i128) {
        let key = DataKey::Balance(id.clone());
        let balance: i128 = e.storage().persistent().get(&key).unwrap_or(0);
        if balance < amount {
            panic!("Insufficient balance");
        }
        e.storage().persistent().set(&key, &(balance - amount));
    }

    fn credit(e: &Env, id: &Address, amount: i128) {
        let key = DataKey::Balance(id.clone());
        let balance: i128 = e.storage().persistent().get(&key).unwrap_or(0);
        e.storage().persistent().set(&key, &(balance + amount));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::testutils::Address as _;

    fn setup(env: &Env) -> (TokenClient<'_>, Address) {
        let contract_id = env.register_contract(None, Token);
        let client = TokenClient::new(env, &contract_id);
        let admin = Address::generate(env);
        client.initialize(
            &admin,
            &7,
            &String::from_str(env, "Euro Token"),
            &String::from_str(env, "EURT"),
        );
        (client, admin)
    }

    #[test]
    fn test_transfer_moves_balance() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, _admin) = setup(&env);
        let alice = Address::generate(&env);
        let bob = Address::generate(&env);

        client.mint(&alice, &1_000);
        client.transfer(&alice, &bob, &400);

        assert_eq!(client.balance(&alice), 600);
        assert_eq!(client.balance(&bob), 400);
    }

    #[test]
    fn test_transfer_from_consumes_allowance() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, _admin) = setup(&env);
        let owner = Address::generate(&env);
        let spender = Address::generate(&env);

        client.mint(&owner, &1_000);
        client.approve(&owner, &spender, &300, &1_000);
        client.transfer_from(&spender, &owner, &spender, &200);

        assert_eq!(client.allowance(&owner, &spender), 100);
        assert_eq!(client.balance(&spender), 200);
    }

    #[test]
    #[should_panic(expected = "Insufficient allowance")]
    fn test_transfer_from_without_approval_panics() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, _admin) = setup(&env);
        let owner = Address::generate(&env);
        let spender = Address::generate(&env);

        client.mint(&owner, &1_000);
        client.transfer_from(&spender, &owner, &spender, &1);
    }

    #[test]
    #[should_panic(expected = "Insufficient balance")]
    fn test_overdraft_panics() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, _admin) = setup(&env);
        let alice = Address::generate(&env);
        let bob = Address::generate(&env);

        client.mint(&alice, &10);
        client.transfer(&alice, &bob, &11);
    }
}
