//! # SQLite Storage Module
//!
//! SQLite implementations of the storage traits.
//!
//! ## Components
//!
//! - **connection.rs** - pool management, schema setup, repository factory
//! - **rows.rs** - raw row shapes and their decoding into domain models
//! - **repositories/** - one repository per table

pub mod connection;
pub mod repositories;
pub mod rows;

pub use connection::DbConnection;
