//! Port traits decoupling domain logic from storage and the network.

pub mod store_port;
pub mod gateway_port;
