use soroban_amm_library::LibraryError;
use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum PairError {
    AlreadyInitialized = 100,
    NotInitialized = 101,
    IdenticalAddresses = 102,
    PairExists = 103,
    PairNotFound = 104,
    InsufficientLiquidityMinted = 105,
    InsufficientLiquidityBurned = 106,
    InsufficientOutputAmount = 107,
    InsufficientInputAmount = 108,
    InsufficientLiquidity = 109,
    InvariantViolation = 110,
    InvalidTo = 111,
    NegativeAmount = 112,
    InsufficientShares = 113,
    InsufficientAllowance = 114,
    Overflow = 115,
}

impl From<LibraryError> for PairError {
    fn from(err: LibraryError) -> Self {
        match err {
            LibraryError::IdenticalAddresses => PairError::IdenticalAddresses,
            LibraryError::InsufficientAmount | LibraryError::InsufficientInputAmount => {
                PairError::InsufficientInputAmount
            }
            LibraryError::InsufficientOutputAmount => PairError::InsufficientOutputAmount,
            LibraryError::InsufficientLiquidity | LibraryError::InvalidPath => {
                PairError::InsufficientLiquidity
            }
            LibraryError::Overflow => PairError::Overflow,
        }
    }
}
