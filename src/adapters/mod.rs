//! Concrete adapter implementations for ports.

pub mod session_file_adapter;
pub mod credential_file_adapter;
pub mod http_gateway_adapter;
