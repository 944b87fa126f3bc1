//! Trading-gateway access port trait.

use crate::domain::error::WealthdeskError;
use crate::domain::gateway::{GatewayCredential, GatewayReply, HoldingRow, PositionRow};
use async_trait::async_trait;

#[async_trait]
pub trait GatewayPort {
    /// Reachability and auth probe against the funds endpoint. Success means
    /// the gateway answered with any HTTP success status; the body is not
    /// inspected.
    async fn probe_funds(&self, credential: &GatewayCredential) -> Result<(), WealthdeskError>;

    async fn fetch_holdings(
        &self,
        credential: &GatewayCredential,
    ) -> Result<GatewayReply<HoldingRow>, WealthdeskError>;

    async fn fetch_positions(
        &self,
        credential: &GatewayCredential,
    ) -> Result<GatewayReply<PositionRow>, WealthdeskError>;
}
