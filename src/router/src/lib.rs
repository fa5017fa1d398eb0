#![no_std]

mod errors;
mod interfaces;
mod paths;
mod storage;


use soroban_amm_library::{self as library, pair_for, sort_tokens};
use soroban_sdk::{contract, contractimpl, log, token::TokenClient, Address, Env, Vec};

pub use crate::errors::RouterError;
pub use crate::interfaces::{NativeWrapper, NativeWrapperClient, PairLedgerClient, PairLedgerInterface};
pub use crate::storage::RouterConfig;

fn config(env: &Env) -> Result<RouterConfig, RouterError> {
    storage::get_config(env).ok_or(RouterError::NotInitialized)
}

fn ensure(env: &Env, deadline: u64) -> Result<(), RouterError> {
    if env.ledger().timestamp() > deadline {
        return Err(RouterError::Expired);
    }
    Ok(())
}

fn first(path: &Vec<Address>) -> Result<Address, RouterError> {
    path.first().ok_or(RouterError::InvalidPath)
}

fn last(path: &Vec<Address>) -> Result<Address, RouterError> {
    path.last().ok_or(RouterError::InvalidPath)
}

fn last_amount(amounts: &Vec<i128>) -> Result<i128, RouterError> {
    amounts.last().ok_or(RouterError::InvalidPath)
}

fn first_amount(amounts: &Vec<i128>) -> Result<i128, RouterError> {
    amounts.first().ok_or(RouterError::InvalidPath)
}

/// Pushes shares to the ledger and burns them, paying both assets to `to`.
/// Returns the amounts in `(token_a, token_b)` argument order.
#[allow(clippy::too_many_arguments)]
fn remove(
    env: &Env,
    config: &RouterConfig,
    sender: &Address,
    token_a: Address,
    token_b: Address,
    liquidity: i128,
    min_a: i128,
    min_b: i128,
    to: &Address,
) -> Result<(i128, i128), RouterError> {
    if liquidity < 0 || min_a < 0 || min_b < 0 {
        return Err(RouterError::NegativeAmount);
    }
    let ledger = PairLedgerClient::new(env, &config.pair_ledger);
    let (sorted_a, _) = sort_tokens(token_a.clone(), token_b.clone())?;
    let pair = pair_for(env, &ledger.address, token_a.clone(), token_b)?;
    ledger.transfer_shares(&pair, sender, &ledger.address, &liquidity);
    let (amount_sorted_a, amount_sorted_b) = ledger.burn(&pair, to);
    let (amount_a, amount_b) = if token_a == sorted_a {
        (amount_sorted_a, amount_sorted_b)
    } else {
        (amount_sorted_b, amount_sorted_a)
    };
    if amount_a < min_a {
        return Err(RouterError::InsufficientAAmount);
    }
    if amount_b < min_b {
        return Err(RouterError::InsufficientBAmount);
    }
    Ok((amount_a, amount_b))
}

#[contract]
pub struct Router;

#[contractimpl]
impl Router {
    /// Binds the router to a pair ledger and a native wrapper.
    /// Unauthenticated, so deploy and initialize in the same transaction.
    pub fn initialize(
        env: Env,
        pair_ledger: Address,
        native_wrapper: Address,
    ) -> Result<(), RouterError> {
        if storage::has_config(&env) {
            return Err(RouterError::AlreadyInitialized);
        }
        let wrapped_token = NativeWrapperClient::new(&env, &native_wrapper).wrapped_token();
        storage::set_config(
            &env,
            &RouterConfig {
                pair_ledger,
                native_wrapper,
                wrapped_token,
            },
        );
        Ok(())
    }

    pub fn pair_ledger(env: Env) -> Result<Address, RouterError> {
        Ok(config(&env)?.pair_ledger)
    }

    pub fn wrapped_token(env: Env) -> Result<Address, RouterError> {
        Ok(config(&env)?.wrapped_token)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn add_liquidity(
        env: Env,
        sender: Address,
        token_a: Address,
        token_b: Address,
        amount_a_desired: i128,
        amount_b_desired: i128,
        amount_a_min: i128,
        amount_b_min: i128,
        to: Address,
        deadline: u64,
    ) -> Result<(i128, i128, i128), RouterError> {
        sender.require_auth();
        ensure(&env, deadline)?;
        let config = config(&env)?;
        let ledger = PairLedgerClient::new(&env, &config.pair_ledger);

        let (amount_a, amount_b) = paths::liquidity_amounts(
            &env,
            &ledger,
            token_a.clone(),
            token_b.clone(),
            amount_a_desired,
            amount_b_desired,
            amount_a_min,
            amount_b_min,
        )?;
        let pair = pair_for(&env, &ledger.address, token_a.clone(), token_b.clone())?;
        TokenClient::new(&env, &token_a).transfer(&sender, &ledger.address, &amount_a);
        TokenClient::new(&env, &token_b).transfer(&sender, &ledger.address, &amount_b);
        let liquidity = ledger.mint(&pair, &to);
        log!(&env, "add liquidity", pair, amount_a, amount_b, liquidity);
        Ok((amount_a, amount_b, liquidity))
    }

    /// Like `add_liquidity` with the native currency as the second asset.
    #[allow(clippy::too_many_arguments)]
    pub fn add_liquidity_native(
        env: Env,
        sender: Address,
        token: Address,
        amount_token_desired: i128,
        amount_native_desired: i128,
        amount_token_min: i128,
        amount_native_min: i128,
        to: Address,
        deadline: u64,
    ) -> Result<(i128, i128, i128), RouterError> {
        sender.require_auth();
        ensure(&env, deadline)?;
        let config = config(&env)?;
        let ledger = PairLedgerClient::new(&env, &config.pair_ledger);

        let (amount_token, amount_native) = paths::liquidity_amounts(
            &env,
            &ledger,
            token.clone(),
            config.wrapped_token.clone(),
            amount_token_desired,
            amount_native_desired,
            amount_token_min,
            amount_native_min,
        )?;
        let pair = pair_for(&env, &ledger.address, token.clone(), config.wrapped_token)?;
        TokenClient::new(&env, &token).transfer(&sender, &ledger.address, &amount_token);
        NativeWrapperClient::new(&env, &config.native_wrapper).deposit(
            &sender,
            &ledger.address,
            &amount_native,
        );
        let liquidity = ledger.mint(&pair, &to);
        Ok((amount_token, amount_native, liquidity))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn remove_liquidity(
        env: Env,
        sender: Address,
        token_a: Address,
        token_b: Address,
        liquidity: i128,
        amount_a_min: i128,
        amount_b_min: i128,
        to: Address,
        deadline: u64,
    ) -> Result<(i128, i128), RouterError> {
        sender.require_auth();
        ensure(&env, deadline)?;
        let config = config(&env)?;
        remove(
            &env,
            &config,
            &sender,
            token_a,
            token_b,
            liquidity,
            amount_a_min,
            amount_b_min,
            &to,
        )
    }

    /// Burns shares of the `(token, wrapped native)` pair and pays `to` in
    /// the token and the native currency.
    #[allow(clippy::too_many_arguments)]
    pub fn remove_liquidity_native(
        env: Env,
        sender: Address,
        token: Address,
        liquidity: i128,
        amount_token_min: i128,
        amount_native_min: i128,
        to: Address,
        deadline: u64,
    ) -> Result<(i128, i128), RouterError> {
        sender.require_auth();
        ensure(&env, deadline)?;
        let config = config(&env)?;
        let (amount_token, amount_native) = remove(
            &env,
            &config,
            &sender,
            token.clone(),
            config.wrapped_token.clone(),
            liquidity,
            amount_token_min,
            amount_native_min,
            &sender,
        )?;
        if to != sender {
            TokenClient::new(&env, &token).transfer(&sender, &to, &amount_token);
        }
        NativeWrapperClient::new(&env, &config.native_wrapper).withdraw(&sender, &to, &amount_native);
        Ok((amount_token, amount_native))
    }

    pub fn swap_exact_tokens_for_tokens(
        env: Env,
        sender: Address,
        amount_in: i128,
        amount_out_min: i128,
        path: Vec<Address>,
        to: Address,
        deadline: u64,
    ) -> Result<Vec<i128>, RouterError> {
        sender.require_auth();
        ensure(&env, deadline)?;
        let config = config(&env)?;
        let ledger = PairLedgerClient::new(&env, &config.pair_ledger);

        let amounts = paths::get_amounts_out(&env, &ledger, amount_in, &path)?;
        if last_amount(&amounts)? < amount_out_min {
            return Err(RouterError::InsufficientOutputAmount);
        }
        TokenClient::new(&env, &first(&path)?).transfer(&sender, &ledger.address, &amount_in);
        paths::swap_hops(&env, &ledger, &amounts, &path, &to)?;
        Ok(amounts)
    }

    pub fn swap_tokens_for_exact_tokens(
        env: Env,
        sender: Address,
        amount_out: i128,
        amount_in_max: i128,
        path: Vec<Address>,
        to: Address,
        deadline: u64,
    ) -> Result<Vec<i128>, RouterError> {
        sender.require_auth();
        ensure(&env, deadline)?;
        let config = config(&env)?;
        let ledger = PairLedgerClient::new(&env, &config.pair_ledger);

        let amounts = paths::get_amounts_in(&env, &ledger, amount_out, &path)?;
        let amount_in = first_amount(&amounts)?;
        if amount_in > amount_in_max {
            return Err(RouterError::ExcessiveInputAmount);
        }
        TokenClient::new(&env, &first(&path)?).transfer(&sender, &ledger.address, &amount_in);
        paths::swap_hops(&env, &ledger, &amounts, &path, &to)?;
        Ok(amounts)
    }

    /// Wraps `amount_in` of the native currency and swaps it along `path`,
    /// which must start at the wrapped token.
    pub fn swap_exact_native_for_tokens(
        env: Env,
        sender: Address,
        amount_in: i128,
        amount_out_min: i128,
        path: Vec<Address>,
        to: Address,
        deadline: u64,
    ) -> Result<Vec<i128>, RouterError> {
        sender.require_auth();
        ensure(&env, deadline)?;
        let config = config(&env)?;
        if first(&path)? != config.wrapped_token {
            return Err(RouterError::InvalidPath);
        }
        let ledger = PairLedgerClient::new(&env, &config.pair_ledger);

        let amounts = paths::get_amounts_out(&env, &ledger, amount_in, &path)?;
        if last_amount(&amounts)? < amount_out_min {
            return Err(RouterError::InsufficientOutputAmount);
        }
        NativeWrapperClient::new(&env, &config.native_wrapper).deposit(
            &sender,
            &ledger.address,
            &amount_in,
        );
        paths::swap_hops(&env, &ledger, &amounts, &path, &to)?;
        Ok(amounts)
    }

    /// Swaps tokens for exactly `amount_out` of the native currency; `path`
    /// must end at the wrapped token.
    pub fn swap_tokens_for_exact_native(
        env: Env,
        sender: Address,
        amount_out: i128,
        amount_in_max: i128,
        path: Vec<Address>,
        to: Address,
        deadline: u64,
    ) -> Result<Vec<i128>, RouterError> {
        sender.require_auth();
        ensure(&env, deadline)?;
        let config = config(&env)?;
        if last(&path)? != config.wrapped_token {
            return Err(RouterError::InvalidPath);
        }
        let ledger = PairLedgerClient::new(&env, &config.pair_ledger);

        let amounts = paths::get_amounts_in(&env, &ledger, amount_out, &path)?;
        let amount_in = first_amount(&amounts)?;
        if amount_in > amount_in_max {
            return Err(RouterError::ExcessiveInputAmount);
        }
        TokenClient::new(&env, &first(&path)?).transfer(&sender, &ledger.address, &amount_in);
        paths::swap_hops(&env, &ledger, &amounts, &path, &sender)?;
        NativeWrapperClient::new(&env, &config.native_wrapper).withdraw(&sender, &to, &amount_out);
        Ok(amounts)
    }

    pub fn swap_exact_tokens_for_native(
        env: Env,
        sender: Address,
        amount_in: i128,
        amount_out_min: i128,
        path: Vec<Address>,
        to: Address,
        deadline: u64,
    ) -> Result<Vec<i128>, RouterError> {
        sender.require_auth();
        ensure(&env, deadline)?;
        let config = config(&env)?;
        if last(&path)? != config.wrapped_token {
            return Err(RouterError::InvalidPath);
        }
        let ledger = PairLedgerClient::new(&env, &config.pair_ledger);

        let amounts = paths::get_amounts_out(&env, &ledger, amount_in, &path)?;
        let amount_out = last_amount(&amounts)?;
        if amount_out < amount_out_min {
            return Err(RouterError::InsufficientOutputAmount);
        }
        TokenClient::new(&env, &first(&path)?).transfer(&sender, &ledger.address, &amount_in);
        paths::swap_hops(&env, &ledger, &amounts, &path, &sender)?;
        NativeWrapperClient::new(&env, &config.native_wrapper).withdraw(&sender, &to, &amount_out);
        Ok(amounts)
    }

    pub fn swap_native_for_exact_tokens(
        env: Env,
        sender: Address,
        amount_out: i128,
        amount_in_max: i128,
        path: Vec<Address>,
        to: Address,
        deadline: u64,
    ) -> Result<Vec<i128>, RouterError> {
        sender.require_auth();
        ensure(&env, deadline)?;
        let config = config(&env)?;
        if first(&path)? != config.wrapped_token {
            return Err(RouterError::InvalidPath);
        }
        let ledger = PairLedgerClient::new(&env, &config.pair_ledger);

        let amounts = paths::get_amounts_in(&env, &ledger, amount_out, &path)?;
        let amount_in = first_amount(&amounts)?;
        if amount_in > amount_in_max {
            return Err(RouterError::ExcessiveInputAmount);
        }
        NativeWrapperClient::new(&env, &config.native_wrapper).deposit(
            &sender,
            &ledger.address,
            &amount_in,
        );
        paths::swap_hops(&env, &ledger, &amounts, &path, &to)?;
        Ok(amounts)
    }

    pub fn quote(amount_a: i128, reserve_a: i128, reserve_b: i128) -> Result<i128, RouterError> {
        Ok(library::quote(amount_a, reserve_a, reserve_b)?)
    }

    pub fn get_amount_out(
        amount_in: i128,
        reserve_in: i128,
        reserve_out: i128,
    ) -> Result<i128, RouterError> {
        Ok(library::get_amount_out(amount_in, reserve_in, reserve_out)?)
    }

    pub fn get_amount_in(
        amount_out: i128,
        reserve_in: i128,
        reserve_out: i128,
    ) -> Result<i128, RouterError> {
        Ok(library::get_amount_in(amount_out, reserve_in, reserve_out)?)
    }

    pub fn get_amounts_out(
        env: Env,
        amount_in: i128,
        path: Vec<Address>,
    ) -> Result<Vec<i128>, RouterError> {
        let ledger = PairLedgerClient::new(&env, &config(&env)?.pair_ledger);
        paths::get_amounts_out(&env, &ledger, amount_in, &path)
    }

    pub fn get_amounts_in(
        env: Env,
        amount_out: i128,
        path: Vec<Address>,
    ) -> Result<Vec<i128>, RouterError> {
        let ledger = PairLedgerClient::new(&env, &config(&env)?.pair_ledger);
        paths::get_amounts_in(&env, &ledger, amount_out, &path)
    }
}
