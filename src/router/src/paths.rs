//! Per-hop amounts and execution along a token path.

use soroban_amm_library::{get_amount_in, get_amount_out, pair_for, quote, sort_tokens};
use soroban_sdk::{Address, Env, Vec};

use crate::errors::RouterError;
use crate::interfaces::PairLedgerClient;

/// Reserves of the `(token_in, token_out)` pair, oriented in that order.
pub(crate) fn get_reserves(
    env: &Env,
    ledger: &PairLedgerClient,
    token_in: Address,
    token_out: Address,
) -> Result<(i128, i128), RouterError> {
    let (token_a, _) = sort_tokens(token_in.clone(), token_out.clone())?;
    let pair = pair_for(env, &ledger.address, token_in.clone(), token_out)?;
    let (reserve_a, reserve_b, _) = ledger
        .try_get_reserves(&pair)
        .map_err(|_| RouterError::PairNotFound)?
        .map_err(|_| RouterError::PairNotFound)?;
    if token_in == token_a {
        Ok((reserve_a, reserve_b))
    } else {
        Ok((reserve_b, reserve_a))
    }
}

fn check_path(path: &Vec<Address>) -> Result<(), RouterError> {
    if path.len() < 2 {
        return Err(RouterError::InvalidPath);
    }
    Ok(())
}

pub(crate) fn get_amounts_out(
    env: &Env,
    ledger: &PairLedgerClient,
    amount_in: i128,
    path: &Vec<Address>,
) -> Result<Vec<i128>, RouterError> {
    check_path(path)?;
    let mut amounts = Vec::new(env);
    amounts.push_back(amount_in);
    let mut amount = amount_in;
    for i in 0..path.len() - 1 {
        let (reserve_in, reserve_out) =
            get_reserves(env, ledger, path.get_unchecked(i), path.get_unchecked(i + 1))?;
        amount = get_amount_out(amount, reserve_in, reserve_out)?;
        amounts.push_back(amount);
    }
    Ok(amounts)
}

/// Required inputs, computed backwards from the last hop.
pub(crate) fn get_amounts_in(
    env: &Env,
    ledger: &PairLedgerClient,
    amount_out: i128,
    path: &Vec<Address>,
) -> Result<Vec<i128>, RouterError> {
    check_path(path)?;
    let mut amounts = Vec::new(env);
    amounts.push_front(amount_out);
    let mut amount = amount_out;
    for i in (1..path.len()).rev() {
        let (reserve_in, reserve_out) =
            get_reserves(env, ledger, path.get_unchecked(i - 1), path.get_unchecked(i))?;
        amount = get_amount_in(amount, reserve_in, reserve_out)?;
        amounts.push_front(amount);
    }
    Ok(amounts)
}

/// Deposit amounts that keep the pair's ratio without exceeding either
/// desired amount. Creates the pair on first use.
#[allow(clippy::too_many_arguments)]
pub(crate) fn liquidity_amounts(
    env: &Env,
    ledger: &PairLedgerClient,
    token_a: Address,
    token_b: Address,
    desired_a: i128,
    desired_b: i128,
    min_a: i128,
    min_b: i128,
) -> Result<(i128, i128), RouterError> {
    if desired_a < 0 || desired_b < 0 || min_a < 0 || min_b < 0 {
        return Err(RouterError::NegativeAmount);
    }
    if ledger.get_pair(&token_a, &token_b).is_none() {
        ledger.create_pair(&token_a, &token_b);
    }
    let (reserve_a, reserve_b) = get_reserves(env, ledger, token_a, token_b)?;
    if reserve_a == 0 && reserve_b == 0 {
        return Ok((desired_a, desired_b));
    }

    let optimal_b = quote(desired_a, reserve_a, reserve_b)?;
    if optimal_b <= desired_b {
        if optimal_b < min_b {
            return Err(RouterError::InsufficientBAmount);
        }
        return Ok((desired_a, optimal_b));
    }
    let optimal_a = quote(desired_b, reserve_b, reserve_a)?;
    if optimal_a > desired_a || optimal_a < min_a {
        return Err(RouterError::InsufficientAAmount);
    }
    Ok((optimal_a, desired_b))
}

/// Issues one pair swap per hop. Intermediate outputs stay in the ledger as
/// the next pair's input; the last hop pays `to`.
pub(crate) fn swap_hops(
    env: &Env,
    ledger: &PairLedgerClient,
    amounts: &Vec<i128>,
    path: &Vec<Address>,
    to: &Address,
) -> Result<(), RouterError> {
    let hops = path.len() - 1;
    for i in 0..hops {
        let input = path.get_unchecked(i);
        let output = path.get_unchecked(i + 1);
        let (token_a, _) = sort_tokens(input.clone(), output.clone())?;
        let amount_out = amounts.get_unchecked(i + 1);
        let (amount_a_out, amount_b_out) = if input == token_a {
            (0, amount_out)
        } else {
            (amount_out, 0)
        };
        let destination = if i + 1 < hops {
            ledger.address.clone()
        } else {
            to.clone()
        };
        let pair = pair_for(env, &ledger.address, input, output)?;
        ledger.swap(&pair, &amount_a_out, &amount_b_out, &destination, &None);
    }
    Ok(())
}
