use crate::errors::LibraryError;

/// Denominator of the swap fee.
pub const FEE_SCALE: i128 = 1000;
/// Swap fee charged on the input side, in thousandths.
pub const FEE_PER_MILLE: i128 = 3;
/// Fixed-point one in UQ64.64.
pub const Q64: u128 = 1 << 64;

const LOW_64: u128 = (1 << 64) - 1;

/// Amount of the second asset that matches `amount_a` at the current ratio.
pub fn quote(amount_a: i128, reserve_a: i128, reserve_b: i128) -> Result<i128, LibraryError> {
    if amount_a <= 0 {
        return Err(LibraryError::InsufficientAmount);
    }
    if reserve_a <= 0 || reserve_b <= 0 {
        return Err(LibraryError::InsufficientLiquidity);
    }
    let numerator = amount_a
        .checked_mul(reserve_b)
        .ok_or(LibraryError::Overflow)?;
    Ok(numerator / reserve_a)
}

/// Output of an exact-input swap net of the fee, rounded down.
///
/// Uses the same arithmetic as the pair's invariant check, so an amount
/// returned here always passes it.
pub fn get_amount_out(
    amount_in: i128,
    reserve_in: i128,
    reserve_out: i128,
) -> Result<i128, LibraryError> {
    if amount_in <= 0 {
        return Err(LibraryError::InsufficientInputAmount);
    }
    if reserve_in <= 0 || reserve_out <= 0 {
        return Err(LibraryError::InsufficientLiquidity);
    }
    let amount_in_with_fee = amount_in
        .checked_mul(FEE_SCALE - FEE_PER_MILLE)
        .ok_or(LibraryError::Overflow)?;
    let numerator = amount_in_with_fee
        .checked_mul(reserve_out)
        .ok_or(LibraryError::Overflow)?;
    let denominator = reserve_in
        .checked_mul(FEE_SCALE)
        .and_then(|scaled| scaled.checked_add(amount_in_with_fee))
        .ok_or(LibraryError::Overflow)?;
    Ok(numerator / denominator)
}

/// Input required for an exact-output swap, rounded up in favour of the pool.
pub fn get_amount_in(
    amount_out: i128,
    reserve_in: i128,
    reserve_out: i128,
) -> Result<i128, LibraryError> {
    if amount_out <= 0 {
        return Err(LibraryError::InsufficientOutputAmount);
    }
    if reserve_in <= 0 || reserve_out <= 0 || amount_out >= reserve_out {
        return Err(LibraryError::InsufficientLiquidity);
    }
    let numerator = reserve_in
        .checked_mul(amount_out)
        .and_then(|n| n.checked_mul(FEE_SCALE))
        .ok_or(LibraryError::Overflow)?;
    let denominator = (reserve_out - amount_out)
        .checked_mul(FEE_SCALE - FEE_PER_MILLE)
        .ok_or(LibraryError::Overflow)?;
    Ok(numerator / denominator + 1)
}

/// Babylonian integer square root, rounded down.
pub fn sqrt(y: u128) -> u128 {
    if y > 3 {
        let mut z = y;
        let mut x = y / 2 + 1;
        while x < z {
            z = x;
            x = (y / x + x) / 2;
        }
        z
    } else if y != 0 {
        1
    } else {
        0
    }
}

/// `numerator / denominator` as a UQ64.64 value.
///
/// Returns `None` for a zero denominator or a numerator that does not fit
/// in 64 integer bits.
pub fn encode_price(numerator: u128, denominator: u128) -> Option<u128> {
    if denominator == 0 {
        return None;
    }
    numerator.checked_mul(Q64).map(|scaled| scaled / denominator)
}

/// `amount * price`, where `price` is UQ64.64, rounded down.
///
/// Splits both operands at 64 bits so the intermediate products fit in
/// `u128`; `None` when the result itself does not.
pub fn mul_q64(amount: u128, price: u128) -> Option<u128> {
    let price_hi = price >> 64;
    let price_lo = price & LOW_64;
    let whole = amount.checked_mul(price_hi)?;
    let amount_hi = amount >> 64;
    let amount_lo = amount & LOW_64;
    let fraction = amount_hi * price_lo + ((amount_lo * price_lo) >> 64);
    whole.checked_add(fraction)
}
