use soroban_sdk::{contracttype, Address, BytesN, Env, U256};

pub(crate) const DAY_IN_LEDGERS: u32 = 17_280;
// 7-day bump, roughly 120,960 ledgers.
pub(crate) const BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
pub(crate) const LIFETIME_THRESHOLD: u32 = BUMP_AMOUNT - DAY_IN_LEDGERS;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Controller,
    FeeRecipient,
    PairCount,
    PairIndex(u32),
    Pair(BytesN<32>),
    Reserved(Address),
    Shares(BytesN<32>, Address),
    Allowance(BytesN<32>, Address, Address),
}

/// Ledger record of one trading pair.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PairState {
    pub token_a: Address,
    pub token_b: Address,
    pub reserve_a: i128,
    pub reserve_b: i128,
    pub total_supply: i128,
    /// UQ64.64 price of `token_a` in `token_b`, integrated over seconds.
    /// A price fills 128 bits, so the integral needs 256.
    pub price_a_cumulative: U256,
    /// UQ64.64 price of `token_b` in `token_a`, integrated over seconds.
    pub price_b_cumulative: U256,
    pub block_timestamp_last: u64,
    pub k_last: u128,
}

pub(crate) fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(LIFETIME_THRESHOLD, BUMP_AMOUNT);
}

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, LIFETIME_THRESHOLD, BUMP_AMOUNT);
}

pub(crate) fn get_controller(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::Controller)
}

pub(crate) fn set_controller(env: &Env, controller: &Address) {
    env.storage().instance().set(&DataKey::Controller, controller);
    bump_instance(env);
}

pub(crate) fn get_fee_recipient(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::FeeRecipient)
}

pub(crate) fn set_fee_recipient(env: &Env, recipient: &Option<Address>) {
    match recipient {
        Some(recipient) => env
            .storage()
            .instance()
            .set(&DataKey::FeeRecipient, recipient),
        None => env.storage().instance().remove(&DataKey::FeeRecipient),
    }
    bump_instance(env);
}

pub(crate) fn pair_count(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::PairCount)
        .unwrap_or(0)
}

pub(crate) fn push_pair(env: &Env, pair: &BytesN<32>) -> u32 {
    let index = pair_count(env);
    let key = DataKey::PairIndex(index);
    env.storage().persistent().set(&key, pair);
    bump_persistent(env, &key);
    env.storage()
        .instance()
        .set(&DataKey::PairCount, &(index + 1));
    bump_instance(env);
    index + 1
}

pub(crate) fn pair_at(env: &Env, index: u32) -> Option<BytesN<32>> {
    env.storage().persistent().get(&DataKey::PairIndex(index))
}

pub(crate) fn has_pair(env: &Env, pair: &BytesN<32>) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Pair(pair.clone()))
}

pub(crate) fn get_pair(env: &Env, pair: &BytesN<32>) -> Option<PairState> {
    env.storage()
        .persistent()
        .get(&DataKey::Pair(pair.clone()))
}

pub(crate) fn set_pair(env: &Env, pair: &BytesN<32>, state: &PairState) {
    let key = DataKey::Pair(pair.clone());
    env.storage().persistent().set(&key, state);
    bump_persistent(env, &key);
}

/// Sum of the reserves every pair holds in `token`.
pub(crate) fn reserved(env: &Env, token: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Reserved(token.clone()))
        .unwrap_or(0)
}

pub(crate) fn shift_reserved(env: &Env, token: &Address, delta: i128) {
    if delta == 0 {
        return;
    }
    let key = DataKey::Reserved(token.clone());
    env.storage()
        .persistent()
        .set(&key, &(reserved(env, token) + delta));
    bump_persistent(env, &key);
}

pub(crate) fn shares(env: &Env, pair: &BytesN<32>, holder: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Shares(pair.clone(), holder.clone()))
        .unwrap_or(0)
}

pub(crate) fn set_shares(env: &Env, pair: &BytesN<32>, holder: &Address, amount: i128) {
    let key = DataKey::Shares(pair.clone(), holder.clone());
    if amount == 0 {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, &amount);
        bump_persistent(env, &key);
    }
}

pub(crate) fn allowance(env: &Env, pair: &BytesN<32>, owner: &Address, spender: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Allowance(pair.clone(), owner.clone(), spender.clone()))
        .unwrap_or(0)
}

pub(crate) fn set_allowance(
    env: &Env,
    pair: &BytesN<32>,
    owner: &Address,
    spender: &Address,
    amount: i128,
) {
    let key = DataKey::Allowance(pair.clone(), owner.clone(), spender.clone());
    if amount == 0 {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, &amount);
        bump_persistent(env, &key);
    }
}
