//! Trading-terminal connection state machine.

use crate::domain::error::WealthdeskError;
use crate::domain::gateway::{GatewayCredential, GatewayReply, HoldingRow, PositionRow};
use crate::ports::gateway_port::GatewayPort;
use crate::ports::store_port::StorePort;
use log::warn;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connected,
}

/// View state of the trading terminal: the connection flag plus the two row
/// collections, which are only ever replaced wholesale by a successful fetch.
#[derive(Debug, Default)]
pub struct TradeTerminal {
    state: ConnectionState,
    holdings: Vec<HoldingRow>,
    positions: Vec<PositionRow>,
}

impl TradeTerminal {
    pub fn new() -> Self {
        TradeTerminal::default()
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Connected
    }

    pub fn holdings(&self) -> &[HoldingRow] {
        &self.holdings
    }

    pub fn positions(&self) -> &[PositionRow] {
        &self.positions
    }

    /// The connect flow: validate the credential, probe the funds endpoint,
    /// persist the credential, flip to Connected, then fetch holdings and the
    /// position book concurrently.
    ///
    /// A validation failure never reaches the network, and a failed probe
    /// persists nothing. The two dependent fetches are best-effort: either may
    /// fail without failing the connect.
    pub async fn connect(
        &mut self,
        gateway: &dyn GatewayPort,
        store: &dyn StorePort,
        credential: &GatewayCredential,
    ) -> Result<(), WealthdeskError> {
        credential.validate()?;
        gateway.probe_funds(credential).await?;
        credential.save(store)?;
        self.state = ConnectionState::Connected;

        let (holdings, positions) = tokio::join!(
            gateway.fetch_holdings(credential),
            gateway.fetch_positions(credential),
        );
        self.absorb_holdings(holdings);
        self.absorb_positions(positions);
        Ok(())
    }

    pub async fn refresh_holdings(
        &mut self,
        gateway: &dyn GatewayPort,
        credential: &GatewayCredential,
    ) {
        let result = gateway.fetch_holdings(credential).await;
        self.absorb_holdings(result);
    }

    pub async fn refresh_positions(
        &mut self,
        gateway: &dyn GatewayPort,
        credential: &GatewayCredential,
    ) {
        let result = gateway.fetch_positions(credential).await;
        self.absorb_positions(result);
    }

    /// Best-effort absorption: a transport failure or a rejected envelope is
    /// logged and the rows already on display stay.
    pub fn absorb_holdings(&mut self, result: Result<GatewayReply<HoldingRow>, WealthdeskError>) {
        match result {
            Ok(GatewayReply::Ok { rows }) => self.holdings = rows,
            Ok(GatewayReply::Error { raw }) => {
                warn!("holdings refresh rejected by gateway, keeping previous rows: {raw}");
            }
            Err(err) => {
                warn!("holdings refresh failed, keeping previous rows: {err}");
            }
        }
    }

    pub fn absorb_positions(&mut self, result: Result<GatewayReply<PositionRow>, WealthdeskError>) {
        match result {
            Ok(GatewayReply::Ok { rows }) => self.positions = rows,
            Ok(GatewayReply::Error { raw }) => {
                warn!("positions refresh rejected by gateway, keeping previous rows: {raw}");
            }
            Err(err) => {
                warn!("positions refresh failed, keeping previous rows: {err}");
            }
        }
    }

    /// Purely local reset back to Disconnected. Stored credentials stay put
    /// and the gateway is not told; row collections are left in place to be
    /// replaced wholesale by the next successful fetch.
    pub fn disconnect(&mut self) {
        self.state = ConnectionState::Disconnected;
    }
}
