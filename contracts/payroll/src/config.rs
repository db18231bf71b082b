use soroban_sdk::contracttype;

/// One day in ledger seconds.
pub const DAY: u64 = 24 * 60 * 60;

/// Minimum spacing between two disbursements to the same employee.
pub const DEFAULT_PAYDAY_INTERVAL: u64 = 30 * DAY;

/// Minimum spacing between two allocation changes of the same employee.
pub const DEFAULT_ALLOCATION_COOLDOWN: u64 = 180 * DAY;

/// Owner-tunable timing rules.
#[contracttype]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PayrollConfig {
    /// Seconds that must pass after a payday before the next one succeeds.
    pub payday_interval: u64,
    /// Seconds that must pass after an allocation change before the next one.
    /// `0` lets employees re-allocate at any time.
    pub allocation_cooldown: u64,
}

impl Default for PayrollConfig {
    fn default() -> Self {
        Self {
            payday_interval: DEFAULT_PAYDAY_INTERVAL,
            allocation_cooldown: DEFAULT_ALLOCATION_COOLDOWN,
        }
    }
}
