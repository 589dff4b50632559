pub mod account;
pub mod lesson;
pub mod profile;
pub mod withdrawal;

/// Largest money value accepted for a lesson rate or a withdrawal
pub const MAX_AMOUNT: i64 = 1_000_000_000_000;
