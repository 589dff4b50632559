//! Conversions from domain models to the wire DTOs in `shared`.

pub mod ledger_mapper;
pub mod lesson_mapper;
pub mod profile_mapper;
pub mod ranking_mapper;
pub mod withdrawal_mapper;
