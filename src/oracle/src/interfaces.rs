use soroban_sdk::{contractclient, Address, BytesN, Env, U256};

/// Read-only view of the pair ledger used for sampling and valuation.
#[contractclient(name = "PairLedgerClient")]
pub trait PairLedgerInterface {
    fn get_pair(env: Env, token_x: Address, token_y: Address) -> Option<BytesN<32>>;
    fn get_tokens(env: Env, pair: BytesN<32>) -> (Address, Address);
    fn get_reserves(env: Env, pair: BytesN<32>) -> (i128, i128, u64);
    fn total_supply(env: Env, pair: BytesN<32>) -> i128;
    fn current_cumulative_prices(env: Env, pair: BytesN<32>) -> (U256, U256, u64);
}
