use soroban_amm_library::LibraryError;
use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum RouterError {
    AlreadyInitialized = 200,
    NotInitialized = 201,
    Expired = 202,
    InsufficientAAmount = 203,
    InsufficientBAmount = 204,
    InsufficientOutputAmount = 205,
    ExcessiveInputAmount = 206,
    InvalidPath = 207,
    InsufficientLiquidity = 208,
    InsufficientAmount = 209,
    InsufficientInputAmount = 210,
    IdenticalAddresses = 211,
    PairNotFound = 212,
    NegativeAmount = 213,
    Overflow = 214,
}

impl From<LibraryError> for RouterError {
    fn from(err: LibraryError) -> Self {
        match err {
            LibraryError::IdenticalAddresses => RouterError::IdenticalAddresses,
            LibraryError::InsufficientAmount => RouterError::InsufficientAmount,
            LibraryError::InsufficientLiquidity => RouterError::InsufficientLiquidity,
            LibraryError::InsufficientInputAmount => RouterError::InsufficientInputAmount,
            LibraryError::InsufficientOutputAmount => RouterError::InsufficientOutputAmount,
            LibraryError::InvalidPath => RouterError::InvalidPath,
            LibraryError::Overflow => RouterError::Overflow,
        }
    }
}
