#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use wealthdesk::domain::error::WealthdeskError;
use wealthdesk::domain::gateway::{GatewayCredential, GatewayReply, HoldingRow, PositionRow};
use wealthdesk::domain::intake::IntakeRecord;
use wealthdesk::ports::gateway_port::GatewayPort;
use wealthdesk::ports::store_port::StorePort;

/// In-memory store standing in for both the session and the credential file.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        self
    }

    pub fn len(&self) -> usize {
        self.values.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StorePort for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, WealthdeskError> {
        Ok(self.values.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), WealthdeskError> {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&self, key: &str) -> Result<(), WealthdeskError> {
        self.values.lock().unwrap().remove(key);
        Ok(())
    }
}

pub enum ProbeScript {
    Succeed,
    Fail(&'static str),
}

pub enum FetchScript<T> {
    Rows(Vec<T>),
    Rejected(&'static str),
    Fail(&'static str),
}

impl<T: Clone> FetchScript<T> {
    fn produce(&self) -> Result<GatewayReply<T>, WealthdeskError> {
        match self {
            FetchScript::Rows(rows) => Ok(GatewayReply::Ok { rows: rows.clone() }),
            FetchScript::Rejected(raw) => Ok(GatewayReply::Error {
                raw: (*raw).to_string(),
            }),
            FetchScript::Fail(reason) => Err(WealthdeskError::ConnectionFailed {
                reason: (*reason).to_string(),
            }),
        }
    }
}

/// Scripted gateway double. Each endpoint replays its script on every call
/// and counts how often it was hit.
pub struct MockGateway {
    pub probe: ProbeScript,
    pub holdings: FetchScript<HoldingRow>,
    pub positions: FetchScript<PositionRow>,
    probe_calls: AtomicUsize,
    holdings_calls: AtomicUsize,
    positions_calls: AtomicUsize,
}

impl MockGateway {
    pub fn new() -> Self {
        Self {
            probe: ProbeScript::Succeed,
            holdings: FetchScript::Rows(vec![]),
            positions: FetchScript::Rows(vec![]),
            probe_calls: AtomicUsize::new(0),
            holdings_calls: AtomicUsize::new(0),
            positions_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_probe_failure(mut self, reason: &'static str) -> Self {
        self.probe = ProbeScript::Fail(reason);
        self
    }

    pub fn with_holdings(mut self, rows: Vec<HoldingRow>) -> Self {
        self.holdings = FetchScript::Rows(rows);
        self
    }

    pub fn with_holdings_rejected(mut self, raw: &'static str) -> Self {
        self.holdings = FetchScript::Rejected(raw);
        self
    }

    pub fn with_holdings_failure(mut self, reason: &'static str) -> Self {
        self.holdings = FetchScript::Fail(reason);
        self
    }

    pub fn with_positions(mut self, rows: Vec<PositionRow>) -> Self {
        self.positions = FetchScript::Rows(rows);
        self
    }

    pub fn with_positions_rejected(mut self, raw: &'static str) -> Self {
        self.positions = FetchScript::Rejected(raw);
        self
    }

    pub fn with_positions_failure(mut self, reason: &'static str) -> Self {
        self.positions = FetchScript::Fail(reason);
        self
    }

    pub fn probe_calls(&self) -> usize {
        self.probe_calls.load(Ordering::SeqCst)
    }

    pub fn holdings_calls(&self) -> usize {
        self.holdings_calls.load(Ordering::SeqCst)
    }

    pub fn positions_calls(&self) -> usize {
        self.positions_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GatewayPort for MockGateway {
    async fn probe_funds(&self, _credential: &GatewayCredential) -> Result<(), WealthdeskError> {
        self.probe_calls.fetch_add(1, Ordering::SeqCst);
        match &self.probe {
            ProbeScript::Succeed => Ok(()),
            ProbeScript::Fail(reason) => Err(WealthdeskError::ConnectionFailed {
                reason: (*reason).to_string(),
            }),
        }
    }

    async fn fetch_holdings(
        &self,
        _credential: &GatewayCredential,
    ) -> Result<GatewayReply<HoldingRow>, WealthdeskError> {
        self.holdings_calls.fetch_add(1, Ordering::SeqCst);
        self.holdings.produce()
    }

    async fn fetch_positions(
        &self,
        _credential: &GatewayCredential,
    ) -> Result<GatewayReply<PositionRow>, WealthdeskError> {
        self.positions_calls.fetch_add(1, Ordering::SeqCst);
        self.positions.produce()
    }
}

pub fn make_record(income: &str, savings: &str) -> IntakeRecord {
    IntakeRecord {
        monthly_income: income.to_string(),
        monthly_savings: savings.to_string(),
        ..IntakeRecord::default()
    }
}

pub fn make_holding(symbol: &str, quantity: f64, ltp: f64, pnl: f64) -> HoldingRow {
    HoldingRow {
        symbol: symbol.to_string(),
        quantity,
        last_traded_price: ltp,
        profit_and_loss: pnl,
    }
}

pub fn make_position(symbol: &str, quantity: f64, ltp: f64, pnl: f64) -> PositionRow {
    PositionRow {
        symbol: symbol.to_string(),
        quantity,
        last_traded_price: ltp,
        profit_and_loss: pnl,
    }
}

pub fn make_credential() -> GatewayCredential {
    GatewayCredential::new("http://127.0.0.1:5000", "abcd1234")
}
