//! # IO Module
//!
//! Adapter between HTTP clients and the domain services.
//!
//! Requests are authenticated into a [`Caller`](crate::domain::Caller),
//! translated into domain commands and answered with the DTOs from the
//! `shared` crate. Domain errors become status codes in one place
//! ([`rest::error`]).

pub mod rest;
