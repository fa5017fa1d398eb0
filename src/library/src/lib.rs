#![no_std]

mod errors;
mod math;
mod pairs;

#[cfg(test)]
mod test;

pub use errors::LibraryError;
pub use math::{
    encode_price, get_amount_in, get_amount_out, mul_q64, quote, sqrt, FEE_PER_MILLE, FEE_SCALE,
    Q64,
};
pub use pairs::{pair_for, sort_tokens};
