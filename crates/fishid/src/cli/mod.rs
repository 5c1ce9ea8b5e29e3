//! Command implementations.

pub mod classify;
pub mod config;
pub mod facts;
pub mod serve;
pub mod types;
