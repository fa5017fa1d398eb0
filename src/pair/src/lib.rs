#![no_std]

mod errors;
mod factory;
mod pair;
mod shares;
mod storage;


use soroban_sdk::{contract, contractclient, contractimpl, Address, Bytes, BytesN, Env, U256};

pub use crate::errors::PairError;
pub use crate::pair::MINIMUM_LIQUIDITY;
pub use crate::storage::PairState;

/// Receiver of a flash swap. Called after the outputs were sent and before
/// the invariant is checked; it must push the matching input to the ledger.
#[contractclient(name = "FlashSwapCalleeClient")]
pub trait FlashSwapCallee {
    fn on_flash_swap(
        env: Env,
        pair: BytesN<32>,
        amount_a_out: i128,
        amount_b_out: i128,
        data: Bytes,
    );
}

/// Custodian of every pair: the registry, the reserves and the LP shares.
#[contract]
pub struct PairLedger;

#[contractimpl]
impl PairLedger {
    /// Sets the controller. Unauthenticated: the first caller wins, so deploy
    /// and initialize in the same transaction.
    pub fn initialize(env: Env, controller: Address) -> Result<(), PairError> {
        factory::initialize(&env, &controller)
    }

    pub fn controller(env: Env) -> Result<Address, PairError> {
        factory::controller(&env)
    }

    pub fn set_controller(env: Env, controller: Address) -> Result<(), PairError> {
        factory::set_controller(&env, &controller)
    }

    pub fn fee_recipient(env: Env) -> Option<Address> {
        storage::get_fee_recipient(&env)
    }

    /// Turns the protocol fee on (`Some`) or off (`None`). Controller only.
    pub fn set_fee_recipient(env: Env, recipient: Option<Address>) -> Result<(), PairError> {
        factory::set_fee_recipient(&env, &recipient)
    }

    pub fn create_pair(
        env: Env,
        token_x: Address,
        token_y: Address,
    ) -> Result<BytesN<32>, PairError> {
        factory::create_pair(&env, token_x, token_y)
    }

    pub fn get_pair(env: Env, token_x: Address, token_y: Address) -> Option<BytesN<32>> {
        factory::get_pair(&env, token_x, token_y)
    }

    pub fn all_pairs(env: Env, index: u32) -> Option<BytesN<32>> {
        storage::pair_at(&env, index)
    }

    pub fn all_pairs_length(env: Env) -> u32 {
        storage::pair_count(&env)
    }

    pub fn mint(env: Env, pair: BytesN<32>, to: Address) -> Result<i128, PairError> {
        storage::bump_instance(&env);
        pair::mint(&env, &pair, &to)
    }

    pub fn burn(env: Env, pair: BytesN<32>, to: Address) -> Result<(i128, i128), PairError> {
        storage::bump_instance(&env);
        pair::burn(&env, &pair, &to)
    }

    /// Sends the requested outputs to `to`; with `data`, `to` is called back
    /// as a flash-swap receiver before the invariant check.
    pub fn swap(
        env: Env,
        pair: BytesN<32>,
        amount_a_out: i128,
        amount_b_out: i128,
        to: Address,
        data: Option<Bytes>,
    ) -> Result<(), PairError> {
        storage::bump_instance(&env);
        pair::swap(&env, &pair, amount_a_out, amount_b_out, &to, data)
    }

    pub fn skim(env: Env, pair: BytesN<32>, to: Address) -> Result<(), PairError> {
        pair::skim(&env, &pair, &to)
    }

    pub fn sync(env: Env, pair: BytesN<32>) -> Result<(), PairError> {
        pair::sync(&env, &pair)
    }

    pub fn get_reserves(env: Env, pair: BytesN<32>) -> Result<(i128, i128, u64), PairError> {
        let state = pair::load(&env, &pair)?;
        Ok((state.reserve_a, state.reserve_b, state.block_timestamp_last))
    }

    pub fn get_tokens(env: Env, pair: BytesN<32>) -> Result<(Address, Address), PairError> {
        let state = pair::load(&env, &pair)?;
        Ok((state.token_a, state.token_b))
    }

    pub fn get_pair_state(env: Env, pair: BytesN<32>) -> Result<PairState, PairError> {
        pair::load(&env, &pair)
    }

    /// Price accumulators as they would read if the pair synced now.
    pub fn current_cumulative_prices(
        env: Env,
        pair: BytesN<32>,
    ) -> Result<(U256, U256, u64), PairError> {
        pair::current_cumulative_prices(&env, &pair)
    }

    pub fn total_supply(env: Env, pair: BytesN<32>) -> Result<i128, PairError> {
        Ok(pair::load(&env, &pair)?.total_supply)
    }

    pub fn share_balance(env: Env, pair: BytesN<32>, id: Address) -> i128 {
        storage::shares(&env, &pair, &id)
    }

    pub fn share_allowance(env: Env, pair: BytesN<32>, owner: Address, spender: Address) -> i128 {
        storage::allowance(&env, &pair, &owner, &spender)
    }

    pub fn approve_shares(
        env: Env,
        pair: BytesN<32>,
        owner: Address,
        spender: Address,
        amount: i128,
    ) -> Result<(), PairError> {
        owner.require_auth();
        shares::approve(&env, &pair, &owner, &spender, amount)
    }

    pub fn transfer_shares(
        env: Env,
        pair: BytesN<32>,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), PairError> {
        from.require_auth();
        shares::transfer(&env, &pair, &from, &to, amount)
    }

    pub fn transfer_shares_from(
        env: Env,
        pair: BytesN<32>,
        spender: Address,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), PairError> {
        spender.require_auth();
        shares::transfer_from(&env, &pair, &spender, &from, &to, amount)
    }
}
