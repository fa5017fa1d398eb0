//! Pair registry: creation, lookup and protocol-fee configuration.

use soroban_amm_library::{pair_for, sort_tokens};
use soroban_sdk::{log, Address, BytesN, Env};

use crate::errors::PairError;
use crate::pair;
use crate::storage;

pub(crate) fn initialize(env: &Env, controller: &Address) -> Result<(), PairError> {
    if storage::get_controller(env).is_some() {
        return Err(PairError::AlreadyInitialized);
    }
    storage::set_controller(env, controller);
    Ok(())
}

pub(crate) fn controller(env: &Env) -> Result<Address, PairError> {
    storage::get_controller(env).ok_or(PairError::NotInitialized)
}

pub(crate) fn set_controller(env: &Env, new_controller: &Address) -> Result<(), PairError> {
    controller(env)?.require_auth();
    storage::set_controller(env, new_controller);
    Ok(())
}

pub(crate) fn set_fee_recipient(env: &Env, recipient: &Option<Address>) -> Result<(), PairError> {
    controller(env)?.require_auth();
    storage::set_fee_recipient(env, recipient);
    Ok(())
}

pub(crate) fn create_pair(
    env: &Env,
    token_x: Address,
    token_y: Address,
) -> Result<BytesN<32>, PairError> {
    controller(env)?;
    let (token_a, token_b) = sort_tokens(token_x, token_y)?;
    let pair = pair_for(
        env,
        &env.current_contract_address(),
        token_a.clone(),
        token_b.clone(),
    )?;
    if storage::has_pair(env, &pair) {
        return Err(PairError::PairExists);
    }
    pair::initialize(env, &pair, token_a, token_b)?;
    let count = storage::push_pair(env, &pair);
    log!(env, "pair created", pair.clone(), count);
    Ok(pair)
}

pub(crate) fn get_pair(env: &Env, token_x: Address, token_y: Address) -> Option<BytesN<32>> {
    let pair = pair_for(env, &env.current_contract_address(), token_x, token_y).ok()?;
    storage::has_pair(env, &pair).then_some(pair)
}
