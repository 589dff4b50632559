// Repository modules
pub mod account_repository;
pub mod lesson_repository;
pub mod profile_repository;
pub mod withdrawal_repository;

// Re-export repository types
pub use account_repository::AccountRepository;
pub use lesson_repository::LessonRepository;
pub use profile_repository::ProfileRepository;
pub use withdrawal_repository::WithdrawalRepository;
