//! Liquidity-share ledger, one balance sheet per pair.

use soroban_sdk::{Address, BytesN, Env};

use crate::errors::PairError;
use crate::storage;

pub(crate) fn credit(
    env: &Env,
    pair: &BytesN<32>,
    to: &Address,
    amount: i128,
) -> Result<(), PairError> {
    let balance = storage::shares(env, pair, to)
        .checked_add(amount)
        .ok_or(PairError::Overflow)?;
    storage::set_shares(env, pair, to, balance);
    Ok(())
}

pub(crate) fn debit(
    env: &Env,
    pair: &BytesN<32>,
    from: &Address,
    amount: i128,
) -> Result<(), PairError> {
    let balance = storage::shares(env, pair, from);
    if balance < amount {
        return Err(PairError::InsufficientShares);
    }
    storage::set_shares(env, pair, from, balance - amount);
    Ok(())
}

fn check_amount(env: &Env, pair: &BytesN<32>, amount: i128) -> Result<(), PairError> {
    if amount < 0 {
        return Err(PairError::NegativeAmount);
    }
    if !storage::has_pair(env, pair) {
        return Err(PairError::PairNotFound);
    }
    Ok(())
}

pub(crate) fn transfer(
    env: &Env,
    pair: &BytesN<32>,
    from: &Address,
    to: &Address,
    amount: i128,
) -> Result<(), PairError> {
    check_amount(env, pair, amount)?;
    debit(env, pair, from, amount)?;
    credit(env, pair, to, amount)
}

pub(crate) fn approve(
    env: &Env,
    pair: &BytesN<32>,
    owner: &Address,
    spender: &Address,
    amount: i128,
) -> Result<(), PairError> {
    check_amount(env, pair, amount)?;
    storage::set_allowance(env, pair, owner, spender, amount);
    Ok(())
}

pub(crate) fn transfer_from(
    env: &Env,
    pair: &BytesN<32>,
    spender: &Address,
    from: &Address,
    to: &Address,
    amount: i128,
) -> Result<(), PairError> {
    check_amount(env, pair, amount)?;
    let allowance = storage::allowance(env, pair, from, spender);
    if allowance < amount {
        return Err(PairError::InsufficientAllowance);
    }
    storage::set_allowance(env, pair, from, spender, allowance - amount);
    transfer(env, pair, from, to, amount)
}
