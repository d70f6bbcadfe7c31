use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum FundingError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    /// The project is not in a state that allows the operation.
    InvalidProjectStatus = 3,
    ProjectWithdrawNotAvailable = 4,
    /// Caller is not the owner, or not a contributor with an outstanding claim.
    UserNotAuthorized = 5,
    DuplicateProject = 6,
    ProjectNotFound = 7,
    InvalidAmount = 8,
    InvalidTarget = 9,
    InvalidName = 10,
    AmountOverflow = 11,
}
