/// Failures of the shared pricing and addressing helpers.
///
/// Contracts convert these into their own `#[contracterror]` codes.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LibraryError {
    IdenticalAddresses,
    InsufficientAmount,
    InsufficientLiquidity,
    InsufficientInputAmount,
    InsufficientOutputAmount,
    InvalidPath,
    Overflow,
}
