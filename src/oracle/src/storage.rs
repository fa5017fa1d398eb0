use soroban_sdk::{contracttype, Address, BytesN, Env, U256};

pub(crate) const DAY_IN_LEDGERS: u32 = 17_280;
pub(crate) const BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
pub(crate) const LIFETIME_THRESHOLD: u32 = BUMP_AMOUNT - DAY_IN_LEDGERS;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Config,
    BlockInfo,
    Observation(BytesN<32>),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OracleConfig {
    pub pair_ledger: Address,
    /// Asset every price is expressed in.
    pub quote_token: Address,
    /// Intermediate asset for tokens without a direct quote pair.
    pub bridge_token: Address,
}

/// Last sampling point of one pair and the averages it produced.
///
/// Prices are UQ64.64: `price_a_*` is token A in token B, `price_b_*` the
/// reverse.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Observation {
    pub price_a_cumulative_last: U256,
    pub price_b_cumulative_last: U256,
    pub timestamp_last: u64,
    pub price_a_average: u128,
    pub price_b_average: u128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BlockInfo {
    pub sequence: u32,
    pub timestamp: u64,
}

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(LIFETIME_THRESHOLD, BUMP_AMOUNT);
}

pub(crate) fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub(crate) fn get_config(env: &Env) -> Option<OracleConfig> {
    env.storage().instance().get(&DataKey::Config)
}

pub(crate) fn set_config(env: &Env, config: &OracleConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    bump_instance(env);
}

pub(crate) fn get_block_info(env: &Env) -> Option<BlockInfo> {
    env.storage().instance().get(&DataKey::BlockInfo)
}

pub(crate) fn set_block_info(env: &Env, info: &BlockInfo) {
    env.storage().instance().set(&DataKey::BlockInfo, info);
    bump_instance(env);
}

pub(crate) fn get_observation(env: &Env, pair: &BytesN<32>) -> Option<Observation> {
    env.storage()
        .persistent()
        .get(&DataKey::Observation(pair.clone()))
}

pub(crate) fn set_observation(env: &Env, pair: &BytesN<32>, observation: &Observation) {
    let key = DataKey::Observation(pair.clone());
    env.storage().persistent().set(&key, observation);
    env.storage()
        .persistent()
        .extend_ttl(&key, LIFETIME_THRESHOLD, BUMP_AMOUNT);
}
