//! # Storage Module
//!
//! Persistence for profiles, accounts, lessons and withdrawals.
//!
//! The domain layer only sees the traits in [`traits`]; the SQLite
//! implementation lives in [`sqlite`]. Rows are decoded into fully typed
//! domain models at this boundary, so nullable numeric columns are
//! normalised to zero exactly once.

pub mod sqlite;
pub mod traits;

pub use sqlite::DbConnection;
pub use traits::*;
