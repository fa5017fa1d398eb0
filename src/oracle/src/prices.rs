use soroban_amm_library::{encode_price, mul_q64, Q64};
use soroban_sdk::{log, Address, BytesN, Env, U256};

use crate::errors::OracleError;
use crate::interfaces::PairLedgerClient;
use crate::storage::{self, Observation, OracleConfig};

/// Samples the pair of `token_x` and `token_y`.
///
/// The first sample of a pair records a baseline and seeds the averages with
/// the spot price, so until a second sample lands the reading is only as
/// good as the reserves at that moment and can be moved within one
/// transaction. Later samples move the window only when time has passed.
pub(crate) fn sample(
    env: &Env,
    ledger: &PairLedgerClient,
    token_x: &Address,
    token_y: &Address,
) -> Result<(), OracleError> {
    let pair = ledger
        .get_pair(token_x, token_y)
        .ok_or(OracleError::PairNotFound)?;
    let (price_a_cumulative, price_b_cumulative, now) = ledger.current_cumulative_prices(&pair);

    let observation = match storage::get_observation(env, &pair) {
        None => {
            let (reserve_a, reserve_b, _) = ledger.get_reserves(&pair);
            if reserve_a <= 0 || reserve_b <= 0 {
                return Err(OracleError::NoReserves);
            }
            let (reserve_a, reserve_b) = (reserve_a as u128, reserve_b as u128);
            log!(env, "oracle baseline", pair, now);
            Observation {
                price_a_cumulative_last: price_a_cumulative,
                price_b_cumulative_last: price_b_cumulative,
                timestamp_last: now,
                price_a_average: encode_price(reserve_b, reserve_a).ok_or(OracleError::Overflow)?,
                price_b_average: encode_price(reserve_a, reserve_b).ok_or(OracleError::Overflow)?,
            }
        }
        Some(last) => {
            if now <= last.timestamp_last {
                return Ok(());
            }
            let elapsed = now - last.timestamp_last;
            log!(env, "oracle window", pair, elapsed);
            Observation {
                price_a_average: average(
                    env,
                    &price_a_cumulative,
                    &last.price_a_cumulative_last,
                    elapsed,
                )?,
                price_b_average: average(
                    env,
                    &price_b_cumulative,
                    &last.price_b_cumulative_last,
                    elapsed,
                )?,
                price_a_cumulative_last: price_a_cumulative,
                price_b_cumulative_last: price_b_cumulative,
                timestamp_last: now,
            }
        }
    };
    storage::set_observation(env, &pair, &observation);
    Ok(())
}

/// `(now - last) / elapsed`. Accumulators only grow and every price fits in
/// 128 bits, which bounds the quotient too.
fn average(env: &Env, now: &U256, last: &U256, elapsed: u64) -> Result<u128, OracleError> {
    now.sub(last)
        .div(&U256::from_u128(env, u128::from(elapsed)))
        .to_u128()
        .ok_or(OracleError::Overflow)
}

/// Average price of `token` in `other` from the stored sample of their pair.
fn average_in(
    env: &Env,
    pair: &BytesN<32>,
    token: &Address,
    other: &Address,
) -> Result<u128, OracleError> {
    let observation = storage::get_observation(env, pair).ok_or(OracleError::NoSample)?;
    Ok(if token < other {
        observation.price_a_average
    } else {
        observation.price_b_average
    })
}

/// Average price of `token` in the quote token, routed through the bridge
/// token when no direct pair exists.
pub(crate) fn average_price(
    env: &Env,
    config: &OracleConfig,
    ledger: &PairLedgerClient,
    token: &Address,
) -> Result<u128, OracleError> {
    let quote = &config.quote_token;
    if token == quote {
        return Ok(Q64);
    }
    if let Some(pair) = ledger.get_pair(token, quote) {
        return average_in(env, &pair, token, quote);
    }

    let bridge = &config.bridge_token;
    if token == bridge {
        return Err(OracleError::PairNotFound);
    }
    let to_bridge = ledger
        .get_pair(token, bridge)
        .ok_or(OracleError::PairNotFound)?;
    let to_quote = ledger
        .get_pair(bridge, quote)
        .ok_or(OracleError::PairNotFound)?;
    let token_in_bridge = average_in(env, &to_bridge, token, bridge)?;
    let bridge_in_quote = average_in(env, &to_quote, bridge, quote)?;
    mul_q64(token_in_bridge, bridge_in_quote).ok_or(OracleError::Overflow)
}

/// Converts `amount` of `token` into quote token units.
pub(crate) fn quantity(
    env: &Env,
    config: &OracleConfig,
    ledger: &PairLedgerClient,
    token: &Address,
    amount: i128,
) -> Result<i128, OracleError> {
    if amount < 0 {
        return Err(OracleError::NegativeAmount);
    }
    let price = average_price(env, config, ledger, token)?;
    let value = mul_q64(amount as u128, price).ok_or(OracleError::Overflow)?;
    i128::try_from(value).map_err(|_| OracleError::Overflow)
}
