#![no_std]

mod errors;
mod interfaces;
mod prices;
mod storage;

#[cfg(test)]
mod test;

use soroban_sdk::{contract, contractimpl, log, Address, BytesN, Env};

pub use crate::errors::OracleError;
pub use crate::interfaces::{PairLedgerClient, PairLedgerInterface};
pub use crate::storage::{BlockInfo, Observation, OracleConfig};

fn config(env: &Env) -> Result<OracleConfig, OracleError> {
    storage::get_config(env).ok_or(OracleError::NotInitialized)
}

#[contract]
pub struct PriceOracle;

#[contractimpl]
impl PriceOracle {
    /// Binds the oracle to a pair ledger, the quote asset and the bridge asset.
    /// Unauthenticated, so deploy and initialize in the same transaction.
    pub fn initialize(
        env: Env,
        pair_ledger: Address,
        quote_token: Address,
        bridge_token: Address,
    ) -> Result<(), OracleError> {
        if storage::has_config(&env) {
            return Err(OracleError::AlreadyInitialized);
        }
        storage::set_config(
            &env,
            &OracleConfig {
                pair_ledger,
                quote_token,
                bridge_token,
            },
        );
        Ok(())
    }

    pub fn get_config(env: Env) -> Result<OracleConfig, OracleError> {
        config(&env)
    }

    /// Takes a price sample of the pair of `token_x` and `token_y`.
    ///
    /// Permissionless. The first sample reads the spot price; averages are
    /// time-weighted from the second sample on. Calling twice in the same
    /// second leaves the stored averages untouched.
    pub fn update(env: Env, token_x: Address, token_y: Address) -> Result<(), OracleError> {
        let config = config(&env)?;
        let ledger = PairLedgerClient::new(&env, &config.pair_ledger);
        prices::sample(&env, &ledger, &token_x, &token_y)
    }

    pub fn update_block_info(env: Env) {
        let info = BlockInfo {
            sequence: env.ledger().sequence(),
            timestamp: env.ledger().timestamp(),
        };
        log!(&env, "block info", info.sequence, info.timestamp);
        storage::set_block_info(&env, &info);
    }

    pub fn block_info(env: Env) -> Option<BlockInfo> {
        storage::get_block_info(&env)
    }

    pub fn observation(env: Env, pair: BytesN<32>) -> Option<Observation> {
        storage::get_observation(&env, &pair)
    }

    /// Time-weighted average price of `token` in the quote token, UQ64.64.
    pub fn get_average_price(env: Env, token: Address) -> Result<u128, OracleError> {
        let config = config(&env)?;
        let ledger = PairLedgerClient::new(&env, &config.pair_ledger);
        prices::average_price(&env, &config, &ledger, &token)
    }

    /// Value of `amount` of `token` in quote token units.
    pub fn get_quantity(env: Env, token: Address, amount: i128) -> Result<i128, OracleError> {
        let config = config(&env)?;
        let ledger = PairLedgerClient::new(&env, &config.pair_ledger);
        prices::quantity(&env, &config, &ledger, &token, amount)
    }

    /// Quote token value of `shares` of `pair`, priced from both reserves.
    pub fn get_lp_token_value(
        env: Env,
        pair: BytesN<32>,
        shares: i128,
    ) -> Result<i128, OracleError> {
        if shares < 0 {
            return Err(OracleError::NegativeAmount);
        }
        let config = config(&env)?;
        let ledger = PairLedgerClient::new(&env, &config.pair_ledger);
        let (token_a, token_b) = match ledger.try_get_tokens(&pair) {
            Ok(Ok(tokens)) => tokens,
            _ => return Err(OracleError::PairNotFound),
        };
        let supply = ledger.total_supply(&pair);
        if supply == 0 {
            return Ok(0);
        }
        let (reserve_a, reserve_b, _) = ledger.get_reserves(&pair);
        let value_a = prices::quantity(&env, &config, &ledger, &token_a, reserve_a)?;
        let value_b = prices::quantity(&env, &config, &ledger, &token_b, reserve_b)?;
        value_a
            .checked_add(value_b)
            .and_then(|total| total.checked_mul(shares))
            .map(|total| total / supply)
            .ok_or(OracleError::Overflow)
    }
}
