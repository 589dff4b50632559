//! Storage interfaces the domain layer is written against.
//!
//! Every owner-scoped operation takes the owner identity explicitly; the
//! implementations must include it in the statement's predicate.

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use shared::TimeSlot;

use crate::domain::models::{
    account::{Account, AccountInsert},
    lesson::{Lesson, LessonInsert, LessonOwner},
    profile::Profile,
    withdrawal::Withdrawal,
};

#[async_trait]
pub trait ProfileStorage: Send + Sync {
    /// Retrieve a profile by owner identity
    async fn get_profile(&self, user_id: &str) -> Result<Option<Profile>>;

    /// Insert or replace the profile row for `profile.id`
    async fn upsert_profile(&self, profile: &Profile) -> Result<()>;
}

#[async_trait]
pub trait LessonStorage: Send + Sync {
    /// Id of the owner's lesson occupying the given slot, if any
    async fn find_lesson_in_slot(&self, user_id: &str, date: NaiveDate, time_slot: TimeSlot) -> Result<Option<String>>;

    /// Insert a lesson; a unique-slot violation is reported as `SlotTaken`
    async fn store_lesson(&self, lesson: &Lesson) -> Result<LessonInsert>;

    /// Retrieve one of the owner's lessons
    async fn get_lesson(&self, user_id: &str, lesson_id: &str) -> Result<Option<Lesson>>;

    /// Every lesson the owner has recorded, newest first
    async fn list_lessons(&self, user_id: &str) -> Result<Vec<Lesson>>;

    /// The owner's latest lessons, newest first
    async fn list_recent_lessons(&self, user_id: &str, limit: u32) -> Result<Vec<Lesson>>;

    /// Owners of every lesson dated on or after `since` (all lessons when `None`),
    /// joined with the owner's profile name and team
    async fn list_lesson_owners(&self, since: Option<NaiveDate>) -> Result<Vec<LessonOwner>>;

    /// Delete a lesson matching both id and owner; returns affected rows
    async fn delete_lesson(&self, user_id: &str, lesson_id: &str) -> Result<u64>;
}

#[async_trait]
pub trait WithdrawalStorage: Send + Sync {
    async fn store_withdrawal(&self, withdrawal: &Withdrawal) -> Result<()>;

    /// All of the owner's withdrawals, newest first
    async fn list_withdrawals(&self, user_id: &str) -> Result<Vec<Withdrawal>>;

    /// Delete a withdrawal matching both id and owner; returns affected rows
    async fn delete_withdrawal(&self, user_id: &str, withdrawal_id: &str) -> Result<u64>;
}

#[async_trait]
pub trait AccountStorage: Send + Sync {
    /// Create the account and its profile atomically
    async fn create_account(&self, account: &Account, profile: &Profile) -> Result<AccountInsert>;

    async fn find_account_by_login(&self, login_id: &str) -> Result<Option<Account>>;
}

/// Factory for repositories over one storage backend.
///
/// Services are generic over this trait so the domain layer never names a
/// concrete database type.
pub trait Connection: Send + Sync + Clone + 'static {
    type ProfileRepository: ProfileStorage + Clone;
    type LessonRepository: LessonStorage + Clone;
    type WithdrawalRepository: WithdrawalStorage + Clone;
    type AccountRepository: AccountStorage + Clone;

    fn create_profile_repository(&self) -> Self::ProfileRepository;
    fn create_lesson_repository(&self) -> Self::LessonRepository;
    fn create_withdrawal_repository(&self) -> Self::WithdrawalRepository;
    fn create_account_repository(&self) -> Self::AccountRepository;
}
