//! wealthdesk — personal-finance intake, derived-metrics dashboard, and
//! trading-gateway terminal.
//!
//! Hexagonal architecture: domain logic in [`domain`], port traits in [`ports`],
//! concrete implementations in [`adapters`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
