use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum OracleError {
    AlreadyInitialized = 300,
    NotInitialized = 301,
    PairNotFound = 302,
    NoSample = 303,
    NoReserves = 304,
    NegativeAmount = 305,
    Overflow = 306,
}
