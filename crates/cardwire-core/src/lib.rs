//! Shared building blocks for the cardwire crates: configuration loading,
//! product constants and the core error type.

pub mod config;
pub mod constants;
pub mod error;
