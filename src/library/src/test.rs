#![cfg(test)]

use super::*;
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{Address, Env};

#[test]
fn test_quote_matches_reserve_ratio() {
    assert_eq!(quote(100, 2000, 1000), Ok(50));
    assert_eq!(quote(0, 2000, 1000), Err(LibraryError::InsufficientAmount));
    assert_eq!(quote(100, 0, 1000), Err(LibraryError::InsufficientLiquidity));
    assert_eq!(quote(100, 2000, 0), Err(LibraryError::InsufficientLiquidity));
}

#[test]
fn test_get_amount_out_charges_fee() {
    // floor(100 * 997 * 1000 / (2000 * 1000 + 100 * 997))
    assert_eq!(get_amount_out(100, 2000, 1000), Ok(47));
    assert_eq!(get_amount_out(0, 2000, 1000), Err(LibraryError::InsufficientInputAmount));
    assert_eq!(get_amount_out(100, 0, 1000), Err(LibraryError::InsufficientLiquidity));
}

#[test]
fn test_get_amount_in_rounds_up() {
    assert_eq!(get_amount_in(47, 2000, 1000), Ok(99));
    assert_eq!(get_amount_in(1000, 2000, 1000), Err(LibraryError::InsufficientLiquidity));
    assert_eq!(get_amount_in(0, 2000, 1000), Err(LibraryError::InsufficientOutputAmount));
}

#[test]
fn test_amount_in_never_underpays_the_pool() {
    let reserves = [(2_000i128, 1_000i128), (10_000_000, 3), (7, 9_000_000), (1_000_000_007, 999_999_937)];
    for (reserve_in, reserve_out) in reserves {
        let mut out = 1;
        while out < reserve_out {
            let amount_in = get_amount_in(out, reserve_in, reserve_out).unwrap();
            let back = get_amount_out(amount_in, reserve_in, reserve_out).unwrap();
            assert!(back >= out, "in={amount_in} out={out} back={back}");
            out = out * 3 + 1;
        }
    }
}

#[test]
fn test_overflow_is_reported() {
    assert_eq!(get_amount_out(i128::MAX / 2, 10, 10), Err(LibraryError::Overflow));
    assert_eq!(quote(i128::MAX, 1, 2), Err(LibraryError::Overflow));
}

#[test]
fn test_sqrt_floors() {
    assert_eq!(sqrt(0), 0);
    assert_eq!(sqrt(1), 1);
    assert_eq!(sqrt(3), 1);
    assert_eq!(sqrt(4), 2);
    assert_eq!(sqrt(2_000_000), 1414);
    assert_eq!(sqrt(u128::MAX), u64::MAX as u128);
}

#[test]
fn test_fixed_point_helpers() {
    assert_eq!(encode_price(1000, 2000), Some(Q64 / 2));
    assert_eq!(encode_price(1, 0), None);
    assert_eq!(encode_price(Q64, 1), None);

    assert_eq!(mul_q64(10, Q64 / 2), Some(5));
    assert_eq!(mul_q64(3, Q64 + Q64 / 2), Some(4));
    assert_eq!(mul_q64(u128::MAX, Q64), Some(u128::MAX));
    assert_eq!(mul_q64(u128::MAX, 2 * Q64), None);
}

#[test]
fn test_sort_tokens() {
    let env = Env::default();
    let x = Address::generate(&env);
    let y = Address::generate(&env);

    let (a, b) = sort_tokens(x.clone(), y.clone()).unwrap();
    assert!(a < b);
    assert_eq!(sort_tokens(y.clone(), x.clone()), Ok((a, b)));
    assert_eq!(sort_tokens(x.clone(), x), Err(LibraryError::IdenticalAddresses));
}

#[test]
fn test_pair_for_is_order_independent() {
    let env = Env::default();
    let registry = Address::generate(&env);
    let other_registry = Address::generate(&env);
    let x = Address::generate(&env);
    let y = Address::generate(&env);
    let z = Address::generate(&env);

    let xy = pair_for(&env, &registry, x.clone(), y.clone()).unwrap();
    assert_eq!(pair_for(&env, &registry, y.clone(), x.clone()).unwrap(), xy);
    assert_ne!(pair_for(&env, &registry, x.clone(), z).unwrap(), xy);
    assert_ne!(pair_for(&env, &other_registry, x.clone(), y).unwrap(), xy);
    assert_eq!(
        pair_for(&env, &registry, x.clone(), x),
        Err(LibraryError::IdenticalAddresses)
    );
}
