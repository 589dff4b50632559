//! # REST API Interface Layer
//!
//! HTTP endpoints for the lesson ledger, all JSON and all under `/api`.
//!
//! Each `*_apis` module exposes a `router()` that is nested by
//! [`create_router`](crate::create_router). Handlers extract a
//! [`Caller`](crate::domain::Caller) from the bearer token, build a domain
//! command, and map the result back to a `shared` DTO. Failures are returned
//! as [`LedgerError`](crate::domain::LedgerError), whose `IntoResponse` impl in
//! [`error`] picks the status code.
//!
//! Ledger and ranking responses are served from [`summary_cache`] until a
//! change event invalidates them.

pub mod account_apis;
pub mod auth;
pub mod error;
pub mod ledger_apis;
pub mod lesson_apis;
pub mod mappers;
pub mod profile_apis;
pub mod ranking_apis;
pub mod summary_cache;
pub mod withdrawal_apis;

pub use auth::TokenIssuer;
pub use summary_cache::SummaryCache;
