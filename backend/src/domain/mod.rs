//! # Domain Module
//!
//! Business rules of the lesson ledger: recording lessons and withdrawals,
//! folding them into per-owner summaries, and ranking instructors by lesson
//! count.
//!
//! ## Module Organization
//!
//! - **lesson_service**: lesson submission with the one-lesson-per-slot guard
//!   and the income snapshot
//! - **withdrawal_service**: withdrawal submission
//! - **ledger_service**: monthly and accumulated summaries, item deletion
//! - **ranking_service**: weekly and all-time leaderboard
//! - **profile_service**: display name, team and lesson rates
//! - **account_service**: signup and credential checks
//! - **ledger / leaderboard / calendar**: pure aggregation and date arithmetic
//! - **events**: "ledger changed" notifications for presentation caches
//!
//! ## Business Rules
//!
//! - Every read and write is scoped to the [`Caller`]; an anonymous caller is
//!   rejected before the store is touched
//! - An owner has at most one lesson per date and time slot
//! - A lesson's income is fixed when it is recorded
//! - Balances may go negative
//! - Deleting something that is not there (or not yours) is not an error

pub mod account_service;
pub mod calendar;
pub mod caller;
pub mod commands;
pub mod error;
pub mod events;
pub mod leaderboard;
pub mod ledger;
pub mod ledger_service;
pub mod lesson_service;
pub mod models;
pub mod profile_service;
pub mod ranking_service;
pub mod withdrawal_service;

pub use account_service::AccountService;
pub use caller::Caller;
pub use error::{LedgerError, LedgerResult};
pub use events::{EventBus, LedgerChanged, LedgerListener, SummaryView};
pub use ledger_service::LedgerService;
pub use lesson_service::LessonService;
pub use profile_service::ProfileService;
pub use ranking_service::RankingService;
pub use withdrawal_service::WithdrawalService;
