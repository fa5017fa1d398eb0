#![cfg(test)]

extern crate std;

use super::*;
use soroban_amm_library::Q64;
use soroban_amm_pair::{PairLedger, PairLedgerClient as LedgerClient};
use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::token::{StellarAssetClient, TokenClient};
use soroban_sdk::{Address, BytesN, Env, U256};

struct Setup<'a> {
    env: Env,
    ledger: LedgerClient<'a>,
    oracle: PriceOracleClient<'a>,
    user: Address,
    quote: Address,
    bridge: Address,
    token: Address,
    routed: Address,
}

fn setup<'a>() -> Setup<'a> {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(1_000);

    let ledger_id = env.register(PairLedger, ());
    let ledger = LedgerClient::new(&env, &ledger_id);
    ledger.initialize(&Address::generate(&env));

    let admin = Address::generate(&env);
    let user = Address::generate(&env);
    let issue = || {
        let address = env.register_stellar_asset_contract_v2(admin.clone()).address();
        StellarAssetClient::new(&env, &address).mint(&user, &10_000_000);
        address
    };
    let quote = issue();
    let bridge = issue();
    let token = issue();
    let routed = issue();

    let oracle_id = env.register(PriceOracle, ());
    let oracle = PriceOracleClient::new(&env, &oracle_id);
    oracle.initialize(&ledger_id, &quote, &bridge);

    Setup {
        env,
        ledger,
        oracle,
        user,
        quote,
        bridge,
        token,
        routed,
    }
}

impl Setup<'_> {
    /// Deposits `amount_x` of `x` and `amount_y` of `y`, creating the pair
    /// on first use.
    fn provide(&self, x: &Address, y: &Address, amount_x: i128, amount_y: i128) -> BytesN<32> {
        let pair = match self.ledger.get_pair(x, y) {
            Some(pair) => pair,
            None => self.ledger.create_pair(x, y),
        };
        TokenClient::new(&self.env, x).transfer(&self.user, &self.ledger.address, &amount_x);
        TokenClient::new(&self.env, y).transfer(&self.user, &self.ledger.address, &amount_y);
        self.ledger.mint(&pair, &self.user);
        pair
    }

    /// Token priced at 0.5 quote, bridge priced at 3 quote, routed token
    /// priced at 4 bridge.
    fn markets(&self) -> BytesN<32> {
        let direct = self.provide(&self.token, &self.quote, 2_000, 1_000);
        self.provide(&self.bridge, &self.quote, 1_000, 3_000);
        self.provide(&self.routed, &self.bridge, 1_000, 4_000);
        direct
    }
}

#[test]
fn test_initialize_once() {
    let s = setup();
    let config = s.oracle.get_config();
    assert_eq!(config.pair_ledger, s.ledger.address);
    assert_eq!(config.quote_token, s.quote);
    assert_eq!(config.bridge_token, s.bridge);

    let result = s
        .oracle
        .try_initialize(&s.ledger.address, &s.quote, &s.bridge);
    assert_eq!(result, Err(Ok(OracleError::AlreadyInitialized)));

    let other = Address::generate(&s.env);
    let result = s.oracle.try_initialize(&other, &other, &other);
    assert_eq!(result, Err(Ok(OracleError::AlreadyInitialized)));
    assert_eq!(s.oracle.get_config(), config);
}

#[test]
fn test_uninitialized_oracle() {
    let env = Env::default();
    let oracle = PriceOracleClient::new(&env, &env.register(PriceOracle, ()));
    let token = Address::generate(&env);
    assert_eq!(
        oracle.try_get_average_price(&token),
        Err(Ok(OracleError::NotInitialized))
    );
    assert_eq!(
        oracle.try_update(&token, &token),
        Err(Ok(OracleError::NotInitialized))
    );
}

#[test]
fn test_quote_token_is_worth_one() {
    let s = setup();
    assert_eq!(s.oracle.get_average_price(&s.quote), Q64);
    assert_eq!(s.oracle.get_quantity(&s.quote, &1_234), 1_234);
}

#[test]
fn test_price_needs_a_sample() {
    let s = setup();
    s.markets();
    assert_eq!(
        s.oracle.try_get_average_price(&s.token),
        Err(Ok(OracleError::NoSample))
    );

    let orphan = s
        .env
        .register_stellar_asset_contract_v2(Address::generate(&s.env))
        .address();
    assert_eq!(
        s.oracle.try_get_average_price(&orphan),
        Err(Ok(OracleError::PairNotFound))
    );
    assert_eq!(
        s.oracle.try_update(&orphan, &s.quote),
        Err(Ok(OracleError::PairNotFound))
    );
}

#[test]
fn test_empty_pair_cannot_be_sampled() {
    let s = setup();
    s.ledger.create_pair(&s.token, &s.quote);
    assert_eq!(
        s.oracle.try_update(&s.token, &s.quote),
        Err(Ok(OracleError::NoReserves))
    );
}

#[test]
fn test_first_sample_uses_spot_price() {
    let s = setup();
    let pair = s.markets();
    s.oracle.update(&s.quote, &s.token);

    assert_eq!(s.oracle.get_average_price(&s.token), Q64 / 2);
    assert_eq!(s.oracle.get_quantity(&s.token, &1_000), 500);

    let observation = s.oracle.observation(&pair).unwrap();
    assert_eq!(observation.timestamp_last, 1_000);
    assert_eq!(observation.price_a_cumulative_last, U256::from_u32(&s.env, 0));
    assert_eq!(observation.price_b_cumulative_last, U256::from_u32(&s.env, 0));
}

#[test]
fn test_first_sample_reads_moved_reserves() {
    let s = setup();
    let pair = s.markets();

    // Reserves skewed right before the first sample are taken at face value.
    TokenClient::new(&s.env, &s.token).transfer(&s.user, &s.ledger.address, &2_000);
    s.ledger.sync(&pair);
    s.oracle.update(&s.token, &s.quote);
    assert_eq!(s.oracle.get_average_price(&s.token), Q64 / 4);
    assert_eq!(s.oracle.get_quantity(&s.token, &1_000), 250);
}

#[test]
fn test_deep_pair_over_long_window() {
    let s = setup();
    let deep = 1_i128 << 62;
    StellarAssetClient::new(&s.env, &s.quote).mint(&s.user, &deep);
    let pair = s.provide(&s.token, &s.quote, 1_000, deep);
    s.oracle.update(&s.token, &s.quote);
    let spot = s.oracle.observation(&pair).unwrap();
    assert_eq!(s.oracle.get_average_price(&s.token), (1_u128 << 126) / 1_000);

    // A year with no trades: the average must equal the unchanged spot.
    s.env.ledger().set_timestamp(1_000 + 31_536_000);
    s.oracle.update(&s.token, &s.quote);
    let window = s.oracle.observation(&pair).unwrap();
    assert_eq!(window.timestamp_last, 1_000 + 31_536_000);
    assert_eq!(window.price_a_average, spot.price_a_average);
    assert_eq!(window.price_b_average, spot.price_b_average);
    assert_eq!(s.oracle.get_average_price(&s.token), (1_u128 << 126) / 1_000);
}

#[test]
fn test_average_over_window() {
    let s = setup();
    let pair = s.markets();
    s.oracle.update(&s.token, &s.quote);

    // Price halves halfway through the window.
    s.env.ledger().set_timestamp(1_005);
    TokenClient::new(&s.env, &s.token).transfer(&s.user, &s.ledger.address, &2_000);
    s.ledger.sync(&pair);

    s.env.ledger().set_timestamp(1_010);
    s.oracle.update(&s.token, &s.quote);

    assert_eq!(s.oracle.get_average_price(&s.token), 3 * Q64 / 8);
    let observation = s.oracle.observation(&pair).unwrap();
    assert_eq!(observation.timestamp_last, 1_010);
    let quote_in_token = if s.token < s.quote {
        observation.price_b_average
    } else {
        observation.price_a_average
    };
    assert_eq!(quote_in_token, 3 * Q64);
}

#[test]
fn test_update_in_same_second_is_noop() {
    let s = setup();
    let pair = s.markets();
    s.oracle.update(&s.token, &s.quote);

    s.env.ledger().set_timestamp(1_005);
    TokenClient::new(&s.env, &s.token).transfer(&s.user, &s.ledger.address, &2_000);
    s.ledger.sync(&pair);
    s.env.ledger().set_timestamp(1_010);
    s.oracle.update(&s.token, &s.quote);
    let before = s.oracle.observation(&pair).unwrap();

    s.oracle.update(&s.token, &s.quote);
    assert_eq!(s.oracle.observation(&pair).unwrap(), before);
    assert_eq!(s.oracle.get_average_price(&s.token), 3 * Q64 / 8);
}

#[test]
fn test_price_routes_through_bridge() {
    let s = setup();
    s.markets();

    s.oracle.update(&s.routed, &s.bridge);
    assert_eq!(
        s.oracle.try_get_average_price(&s.routed),
        Err(Ok(OracleError::NoSample))
    );

    s.oracle.update(&s.bridge, &s.quote);
    assert_eq!(s.oracle.get_average_price(&s.bridge), 3 * Q64);
    assert_eq!(s.oracle.get_average_price(&s.routed), 12 * Q64);
    assert_eq!(s.oracle.get_quantity(&s.routed, &10), 120);
}

#[test]
fn test_quantity_rejects_negative_amount() {
    let s = setup();
    assert_eq!(
        s.oracle.try_get_quantity(&s.quote, &-1),
        Err(Ok(OracleError::NegativeAmount))
    );
}

#[test]
fn test_lp_token_value() {
    let s = setup();
    let pair = s.markets();
    s.oracle.update(&s.token, &s.quote);

    // 2000 token at 0.5 plus 1000 quote, spread over 1414 shares.
    assert_eq!(s.ledger.total_supply(&pair), 1_414);
    assert_eq!(s.oracle.get_lp_token_value(&pair, &1_414), 2_000);
    assert_eq!(s.oracle.get_lp_token_value(&pair, &414), 585);
    assert_eq!(s.oracle.get_lp_token_value(&pair, &0), 0);

    let unknown = BytesN::from_array(&s.env, &[7; 32]);
    assert_eq!(
        s.oracle.try_get_lp_token_value(&unknown, &1),
        Err(Ok(OracleError::PairNotFound))
    );
    assert_eq!(
        s.oracle.try_get_lp_token_value(&pair, &-1),
        Err(Ok(OracleError::NegativeAmount))
    );
}

#[test]
fn test_block_info() {
    let s = setup();
    assert_eq!(s.oracle.block_info(), None);

    s.env.ledger().set_sequence_number(42);
    s.env.ledger().set_timestamp(1_500);
    s.oracle.update_block_info();
    assert_eq!(
        s.oracle.block_info(),
        Some(BlockInfo {
            sequence: 42,
            timestamp: 1_500
        })
    );
}
