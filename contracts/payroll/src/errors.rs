use soroban_sdk::contracterror;

/// Typed errors returned by the payroll contract.
///
/// Returning any of these aborts the invocation and rolls back every state
/// change it made, so a failed call never leaves a partial payday behind.
#[contracterror]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u32)]
pub enum PayrollError {
    /// `initialize` was already called.
    AlreadyInitialized = 1,
    /// The contract has not been initialized yet.
    NotInitialized = 2,
    /// The caller is not the owner, or matches no active employee account.
    Unauthorized = 3,
    /// The employee id does not exist or the employee was removed.
    UnknownEmployee = 4,
    /// Empty, duplicated or otherwise malformed asset list.
    InvalidAssetList = 5,
    /// Allocation references an asset outside the employee's allowed set.
    AssetNotAllowed = 6,
    /// Allocation percentages add up to more than 100.
    AllocationOverflow = 7,
    /// Parallel argument arrays differ in length.
    LengthMismatch = 8,
    /// The treasury holds less of an asset than a transfer requires.
    InsufficientBalance = 9,
    /// The asset has no transfer protocol registered.
    AssetNotRegistered = 10,
    /// The account already belongs to another active employee.
    AccountInUse = 11,
    /// The payday interval since the previous disbursement has not elapsed.
    PaydayTooSoon = 12,
    /// The allocation cooldown since the previous change has not elapsed.
    AllocationLocked = 13,
    /// A salary, rate or balance computation left the representable range.
    ArithmeticOverflow = 14,
    /// Funding amounts must be strictly positive.
    InvalidAmount = 15,
    /// The asset's transfer protocol does not support the requested operation.
    WrongProtocol = 16,
}
