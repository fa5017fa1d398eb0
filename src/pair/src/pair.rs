//! Reserve accounting for a single pair record.
//!
//! Every pair lives inside the ledger contract, so they all share one token
//! balance per asset. The ledger tracks how much of that balance is claimed
//! by pair reserves; anything above it is surplus, and a pair treats the
//! surplus of its two tokens as what was pushed to it before the call.

use soroban_amm_library::{encode_price, sqrt, FEE_PER_MILLE, FEE_SCALE};
use soroban_sdk::{log, token::TokenClient, Address, Bytes, BytesN, Env, U256};

use crate::errors::PairError;
use crate::shares;
use crate::storage::{self, PairState};
use crate::FlashSwapCalleeClient;

/// Shares locked forever by the first deposit.
pub const MINIMUM_LIQUIDITY: i128 = 1000;

const RESERVE_MAX: i128 = u64::MAX as i128;

pub(crate) fn load(env: &Env, pair: &BytesN<32>) -> Result<PairState, PairError> {
    storage::get_pair(env, pair).ok_or(PairError::PairNotFound)
}

pub(crate) fn initialize(
    env: &Env,
    pair: &BytesN<32>,
    token_a: Address,
    token_b: Address,
) -> Result<(), PairError> {
    if storage::has_pair(env, pair) {
        return Err(PairError::AlreadyInitialized);
    }
    let state = PairState {
        token_a,
        token_b,
        reserve_a: 0,
        reserve_b: 0,
        total_supply: 0,
        price_a_cumulative: U256::from_u32(env, 0),
        price_b_cumulative: U256::from_u32(env, 0),
        block_timestamp_last: 0,
        k_last: 0,
    };
    storage::set_pair(env, pair, &state);
    Ok(())
}

/// Tokens held by the ledger that no pair reserve accounts for.
fn surplus(env: &Env, token: &Address, reserved: i128) -> i128 {
    let held = TokenClient::new(env, token).balance(&env.current_contract_address());
    (held - reserved).max(0)
}

fn balances(env: &Env, state: &PairState) -> (i128, i128) {
    let surplus_a = surplus(env, &state.token_a, storage::reserved(env, &state.token_a));
    let surplus_b = surplus(env, &state.token_b, storage::reserved(env, &state.token_b));
    (state.reserve_a + surplus_a, state.reserve_b + surplus_b)
}

fn send(env: &Env, token: &Address, to: &Address, amount: i128) {
    let ledger = env.current_contract_address();
    if amount > 0 && *to != ledger {
        TokenClient::new(env, token).transfer(&ledger, to, &amount);
    }
}

/// Accumulators advanced to `now` with the reserves recorded in `state`.
pub(crate) fn cumulative_prices_at(env: &Env, state: &PairState, now: u64) -> (U256, U256) {
    let elapsed = now.saturating_sub(state.block_timestamp_last);
    if elapsed == 0 || state.reserve_a == 0 || state.reserve_b == 0 {
        return (
            state.price_a_cumulative.clone(),
            state.price_b_cumulative.clone(),
        );
    }
    let reserve_a = state.reserve_a as u128;
    let reserve_b = state.reserve_b as u128;
    let elapsed = U256::from_u128(env, u128::from(elapsed));
    // Reserves never exceed u64::MAX, so both prices fit.
    let advance = |cumulative: &U256, price: Option<u128>| match price {
        Some(price) => cumulative.add(&U256::from_u128(env, price).mul(&elapsed)),
        None => cumulative.clone(),
    };
    (
        advance(&state.price_a_cumulative, encode_price(reserve_b, reserve_a)),
        advance(&state.price_b_cumulative, encode_price(reserve_a, reserve_b)),
    )
}

/// Integrates the outgoing price over the elapsed interval, then records the
/// new balances as reserves.
fn update(
    env: &Env,
    state: &mut PairState,
    balance_a: i128,
    balance_b: i128,
) -> Result<(), PairError> {
    if !(0..=RESERVE_MAX).contains(&balance_a) || !(0..=RESERVE_MAX).contains(&balance_b) {
        return Err(PairError::Overflow);
    }
    let now = env.ledger().timestamp();
    let (price_a_cumulative, price_b_cumulative) = cumulative_prices_at(env, state, now);
    state.price_a_cumulative = price_a_cumulative;
    state.price_b_cumulative = price_b_cumulative;

    storage::shift_reserved(env, &state.token_a, balance_a - state.reserve_a);
    storage::shift_reserved(env, &state.token_b, balance_b - state.reserve_b);
    state.reserve_a = balance_a;
    state.reserve_b = balance_b;
    state.block_timestamp_last = now;
    Ok(())
}

fn product(state: &PairState) -> u128 {
    (state.reserve_a as u128) * (state.reserve_b as u128)
}

/// Protocol fee: one sixth of the growth in `sqrt(k)` since the last
/// liquidity event, paid as newly issued shares. Every step rounds down.
pub(crate) fn protocol_fee_shares(
    total_supply: i128,
    k: u128,
    k_last: u128,
) -> Result<i128, PairError> {
    let root_k = sqrt(k);
    let root_k_last = sqrt(k_last);
    if root_k <= root_k_last {
        return Ok(0);
    }
    let numerator = (total_supply as u128)
        .checked_mul(root_k - root_k_last)
        .ok_or(PairError::Overflow)?;
    let denominator = root_k
        .checked_mul(5)
        .and_then(|d| d.checked_add(root_k_last))
        .ok_or(PairError::Overflow)?;
    i128::try_from(numerator / denominator).map_err(|_| PairError::Overflow)
}

fn mint_fee(env: &Env, pair: &BytesN<32>, state: &mut PairState) -> Result<bool, PairError> {
    let Some(recipient) = storage::get_fee_recipient(env) else {
        state.k_last = 0;
        return Ok(false);
    };
    if state.k_last != 0 {
        let liquidity = protocol_fee_shares(state.total_supply, product(state), state.k_last)?;
        if liquidity > 0 {
            shares::credit(env, pair, &recipient, liquidity)?;
            state.total_supply = state
                .total_supply
                .checked_add(liquidity)
                .ok_or(PairError::Overflow)?;
            log!(env, "protocol fee shares", pair.clone(), recipient, liquidity);
        }
    }
    Ok(true)
}

pub(crate) fn mint(env: &Env, pair: &BytesN<32>, to: &Address) -> Result<i128, PairError> {
    let mut state = load(env, pair)?;
    let (balance_a, balance_b) = balances(env, &state);
    let amount_a = balance_a - state.reserve_a;
    let amount_b = balance_b - state.reserve_b;

    let fee_on = mint_fee(env, pair, &mut state)?;
    let liquidity = if state.total_supply == 0 {
        let deposit_product = (amount_a as u128)
            .checked_mul(amount_b as u128)
            .ok_or(PairError::Overflow)?;
        let root = i128::try_from(sqrt(deposit_product)).map_err(|_| PairError::Overflow)?;
        if root <= MINIMUM_LIQUIDITY {
            return Err(PairError::InsufficientLiquidityMinted);
        }
        // The floor is counted in the supply but credited to nobody.
        state.total_supply = MINIMUM_LIQUIDITY;
        root - MINIMUM_LIQUIDITY
    } else {
        let liquidity_a = amount_a
            .checked_mul(state.total_supply)
            .ok_or(PairError::Overflow)?
            / state.reserve_a;
        let liquidity_b = amount_b
            .checked_mul(state.total_supply)
            .ok_or(PairError::Overflow)?
            / state.reserve_b;
        liquidity_a.min(liquidity_b)
    };
    if liquidity <= 0 {
        return Err(PairError::InsufficientLiquidityMinted);
    }

    shares::credit(env, pair, to, liquidity)?;
    state.total_supply = state
        .total_supply
        .checked_add(liquidity)
        .ok_or(PairError::Overflow)?;
    update(env, &mut state, balance_a, balance_b)?;
    if fee_on {
        state.k_last = product(&state);
    }
    storage::set_pair(env, pair, &state);
    Ok(liquidity)
}

/// Redeems the shares the ledger holds for `pair` (pushed there by the
/// caller) for a proportional slice of both balances.
pub(crate) fn burn(
    env: &Env,
    pair: &BytesN<32>,
    to: &Address,
) -> Result<(i128, i128), PairError> {
    let mut state = load(env, pair)?;
    let (balance_a, balance_b) = balances(env, &state);
    let ledger = env.current_contract_address();
    let liquidity = storage::shares(env, pair, &ledger);

    let fee_on = mint_fee(env, pair, &mut state)?;
    if state.total_supply == 0 {
        return Err(PairError::InsufficientLiquidityBurned);
    }
    let amount_a = liquidity
        .checked_mul(balance_a)
        .ok_or(PairError::Overflow)?
        / state.total_supply;
    let amount_b = liquidity
        .checked_mul(balance_b)
        .ok_or(PairError::Overflow)?
        / state.total_supply;
    if amount_a <= 0 || amount_b <= 0 {
        return Err(PairError::InsufficientLiquidityBurned);
    }

    shares::debit(env, pair, &ledger, liquidity)?;
    state.total_supply -= liquidity;
    send(env, &state.token_a, to, amount_a);
    send(env, &state.token_b, to, amount_b);

    update(env, &mut state, balance_a - amount_a, balance_b - amount_b)?;
    if fee_on {
        state.k_last = product(&state);
    }
    storage::set_pair(env, pair, &state);
    Ok((amount_a, amount_b))
}

/// Balance of one side after `amount_out` left its reserve. Output the
/// ledger kept for the next hop is not counted back as input.
fn balance_after_release(
    env: &Env,
    token: &Address,
    reserve: i128,
    amount_out: i128,
    kept: bool,
) -> i128 {
    let mut reserved = storage::reserved(env, token);
    if !kept {
        reserved -= amount_out;
    }
    reserve - amount_out + surplus(env, token, reserved)
}

fn check_invariant(
    env: &Env,
    state: &PairState,
    balance_a: i128,
    balance_b: i128,
    amount_a_in: i128,
    amount_b_in: i128,
) -> Result<(), PairError> {
    let adjusted = |balance: i128, amount_in: i128| {
        balance
            .checked_mul(FEE_SCALE)
            .zip(amount_in.checked_mul(FEE_PER_MILLE))
            .and_then(|(scaled, fee)| scaled.checked_sub(fee))
            .ok_or(PairError::Overflow)
    };
    let adjusted_a = adjusted(balance_a, amount_a_in)?;
    let adjusted_b = adjusted(balance_b, amount_b_in)?;
    if adjusted_a < 0 || adjusted_b < 0 {
        return Err(PairError::InvariantViolation);
    }

    let k_after = U256::from_u128(env, adjusted_a as u128)
        .mul(&U256::from_u128(env, adjusted_b as u128));
    let k_before = U256::from_u128(env, product(state))
        .mul(&U256::from_u128(env, (FEE_SCALE * FEE_SCALE) as u128));
    if k_after < k_before {
        return Err(PairError::InvariantViolation);
    }
    Ok(())
}

/// Two-phase swap: release the outputs (and run the flash callback when
/// `data` is present), then derive the inputs from the new balances and
/// check the fee-adjusted product.
pub(crate) fn swap(
    env: &Env,
    pair: &BytesN<32>,
    amount_a_out: i128,
    amount_b_out: i128,
    to: &Address,
    data: Option<Bytes>,
) -> Result<(), PairError> {
    if amount_a_out < 0 || amount_b_out < 0 {
        return Err(PairError::NegativeAmount);
    }
    if amount_a_out == 0 && amount_b_out == 0 {
        return Err(PairError::InsufficientOutputAmount);
    }
    let mut state = load(env, pair)?;
    if amount_a_out >= state.reserve_a || amount_b_out >= state.reserve_b {
        return Err(PairError::InsufficientLiquidity);
    }
    let ledger = env.current_contract_address();
    if *to == state.token_a || *to == state.token_b || (data.is_some() && *to == ledger) {
        return Err(PairError::InvalidTo);
    }

    send(env, &state.token_a, to, amount_a_out);
    send(env, &state.token_b, to, amount_b_out);
    if let Some(data) = data {
        FlashSwapCalleeClient::new(env, to).on_flash_swap(pair, &amount_a_out, &amount_b_out, &data);
    }

    let kept = *to == ledger;
    let balance_a = balance_after_release(env, &state.token_a, state.reserve_a, amount_a_out, kept);
    let balance_b = balance_after_release(env, &state.token_b, state.reserve_b, amount_b_out, kept);
    let amount_a_in = (balance_a - (state.reserve_a - amount_a_out)).max(0);
    let amount_b_in = (balance_b - (state.reserve_b - amount_b_out)).max(0);
    if amount_a_in == 0 && amount_b_in == 0 {
        return Err(PairError::InsufficientInputAmount);
    }
    check_invariant(env, &state, balance_a, balance_b, amount_a_in, amount_b_in)?;

    update(env, &mut state, balance_a, balance_b)?;
    storage::set_pair(env, pair, &state);
    Ok(())
}

/// Sends the surplus of both tokens to `to`.
///
/// Surplus is shared by every pair holding the token, so skimming through
/// any of them drains it.
pub(crate) fn skim(env: &Env, pair: &BytesN<32>, to: &Address) -> Result<(), PairError> {
    let state = load(env, pair)?;
    let (balance_a, balance_b) = balances(env, &state);
    send(env, &state.token_a, to, balance_a - state.reserve_a);
    send(env, &state.token_b, to, balance_b - state.reserve_b);
    Ok(())
}

/// Absorbs the surplus of both tokens into the reserves.
///
/// A pair without shares keeps empty reserves; its surplus goes to the
/// first depositor through `mint`.
pub(crate) fn sync(env: &Env, pair: &BytesN<32>) -> Result<(), PairError> {
    let mut state = load(env, pair)?;
    if state.total_supply == 0 {
        return Ok(());
    }
    let (balance_a, balance_b) = balances(env, &state);
    update(env, &mut state, balance_a, balance_b)?;
    storage::set_pair(env, pair, &state);
    log!(env, "sync", pair.clone(), balance_a, balance_b);
    Ok(())
}

pub(crate) fn current_cumulative_prices(
    env: &Env,
    pair: &BytesN<32>,
) -> Result<(U256, U256, u64), PairError> {
    let state = load(env, pair)?;
    let now = env.ledger().timestamp();
    let (price_a_cumulative, price_b_cumulative) = cumulative_prices_at(env, &state, now);
    Ok((price_a_cumulative, price_b_cumulative, now))
}
