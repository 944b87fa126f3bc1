//! Core domain types and logic.

pub mod intake;
pub mod metrics;
pub mod money;
pub mod gateway;
pub mod terminal;
pub mod error;
