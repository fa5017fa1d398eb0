use soroban_sdk::{xdr::ToXdr, Address, Bytes, BytesN, Env};

use crate::errors::LibraryError;

/// Orders two token identifiers, lower first.
pub fn sort_tokens(token_x: Address, token_y: Address) -> Result<(Address, Address), LibraryError> {
    if token_x == token_y {
        return Err(LibraryError::IdenticalAddresses);
    }
    if token_x < token_y {
        Ok((token_x, token_y))
    } else {
        Ok((token_y, token_x))
    }
}

/// Deterministic pair id: `sha256(xdr(registry) || xdr(token_a) || xdr(token_b))`
/// over the canonically ordered tokens.
///
/// Anyone holding the registry address can compute it without a lookup,
/// and argument order does not matter.
pub fn pair_for(
    env: &Env,
    registry: &Address,
    token_x: Address,
    token_y: Address,
) -> Result<BytesN<32>, LibraryError> {
    let (token_a, token_b) = sort_tokens(token_x, token_y)?;
    let mut preimage = Bytes::new(env);
    preimage.append(&registry.clone().to_xdr(env));
    preimage.append(&token_a.to_xdr(env));
    preimage.append(&token_b.to_xdr(env));
    Ok(env.crypto().sha256(&preimage).to_bytes())
}
