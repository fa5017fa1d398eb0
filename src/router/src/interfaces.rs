//! Calls the router makes into its collaborators.

use soroban_sdk::{contractclient, Address, Bytes, BytesN, Env};

/// The subset of the pair ledger the router drives.
#[contractclient(name = "PairLedgerClient")]
pub trait PairLedgerInterface {
    fn create_pair(env: Env, token_x: Address, token_y: Address) -> BytesN<32>;
    fn get_pair(env: Env, token_x: Address, token_y: Address) -> Option<BytesN<32>>;
    fn get_reserves(env: Env, pair: BytesN<32>) -> (i128, i128, u64);
    fn mint(env: Env, pair: BytesN<32>, to: Address) -> i128;
    fn burn(env: Env, pair: BytesN<32>, to: Address) -> (i128, i128);
    fn swap(
        env: Env,
        pair: BytesN<32>,
        amount_a_out: i128,
        amount_b_out: i128,
        to: Address,
        data: Option<Bytes>,
    );
    fn transfer_shares(env: Env, pair: BytesN<32>, from: Address, to: Address, amount: i128);
}

/// Converts the native currency to and from the token the pairs hold.
#[contractclient(name = "NativeWrapperClient")]
pub trait NativeWrapper {
    /// Takes `amount` native from `from` and credits the wrapped token to `to`.
    fn deposit(env: Env, from: Address, to: Address, amount: i128);
    /// Burns `amount` wrapped from `from` and pays the native currency to `to`.
    fn withdraw(env: Env, from: Address, to: Address, amount: i128);
    fn wrapped_token(env: Env) -> Address;
}
