//! Gateway credential and wire types.
//!
//! The gateway is a self-hosted OpenAlgo-compatible bridge. Every call is a
//! POST carrying the API key in the JSON body; replies use a
//! `{"status": "...", "data": [...]}` envelope which is validated here, at
//! the boundary, before rows reach the terminal.

use crate::domain::error::WealthdeskError;
use crate::ports::store_port::StorePort;
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Durable-store key for the gateway endpoint URL.
pub const URL_KEY: &str = "openalgo_url";
/// Durable-store key for the gateway API key.
pub const API_KEY_KEY: &str = "openalgo_key";

const REPLY_SNIPPET_CHARS: usize = 200;

#[derive(Debug, Clone, PartialEq)]
pub struct GatewayCredential {
    pub endpoint_url: String,
    pub api_key: String,
}

impl GatewayCredential {
    pub fn new(endpoint_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        GatewayCredential {
            endpoint_url: endpoint_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Both halves must be present before anything touches the network.
    pub fn validate(&self) -> Result<(), WealthdeskError> {
        if self.endpoint_url.trim().is_empty() {
            return Err(WealthdeskError::CredentialsMissing {
                reason: "endpoint URL is empty".to_string(),
            });
        }
        if self.api_key.trim().is_empty() {
            return Err(WealthdeskError::CredentialsMissing {
                reason: "API key is empty".to_string(),
            });
        }
        Ok(())
    }

    /// Full URL for one API resource, e.g. `api_url("funds")`.
    pub fn api_url(&self, resource: &str) -> String {
        format!("{}/api/v1/{}", self.endpoint_url.trim_end_matches('/'), resource)
    }

    /// The gateway's own web dashboard, where orders are actually placed.
    pub fn dashboard_url(&self) -> String {
        self.endpoint_url.trim_end_matches('/').to_string()
    }

    /// API key with everything but the last four characters hidden.
    pub fn masked_key(&self) -> String {
        let chars: Vec<char> = self.api_key.chars().collect();
        if chars.len() <= 4 {
            return "****".to_string();
        }
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("****{tail}")
    }

    /// Reads a stored credential, `None` unless both keys are present and
    /// non-blank.
    pub fn load(store: &dyn StorePort) -> Result<Option<Self>, WealthdeskError> {
        let url = store.get(URL_KEY)?;
        let key = store.get(API_KEY_KEY)?;
        match (url, key) {
            (Some(url), Some(key)) if !url.trim().is_empty() && !key.trim().is_empty() => {
                Ok(Some(GatewayCredential::new(url, key)))
            }
            _ => Ok(None),
        }
    }

    /// Persists both halves, overwriting whatever was stored before.
    pub fn save(&self, store: &dyn StorePort) -> Result<(), WealthdeskError> {
        store.set(URL_KEY, &self.endpoint_url)?;
        store.set(API_KEY_KEY, &self.api_key)
    }
}

/// One holding as reported by the gateway.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingRow {
    pub symbol: String,
    pub quantity: f64,
    pub last_traded_price: f64,
    pub profit_and_loss: f64,
}

/// One open position from the gateway's position book.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionRow {
    pub symbol: String,
    pub quantity: f64,
    pub last_traded_price: f64,
    pub profit_and_loss: f64,
}

/// Verdict on one gateway reply body. A transport failure is a
/// [`WealthdeskError`] instead; this type only distinguishes a well-formed
/// success envelope from everything else the gateway may send back.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayReply<T> {
    Ok { rows: Vec<T> },
    Error { raw: String },
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    data: Option<serde_json::Value>,
}

/// Parses a reply body against the `{"status": "success", "data": [...]}`
/// envelope. A non-JSON body, a status other than `"success"`, or missing or
/// malformed rows all come back as [`GatewayReply::Error`] carrying a snippet
/// of the offending body.
pub fn parse_reply<T: DeserializeOwned>(body: &str) -> GatewayReply<T> {
    let envelope: Envelope = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(_) => return GatewayReply::Error { raw: snippet(body) },
    };

    if envelope.status.as_deref() != Some("success") {
        return GatewayReply::Error { raw: snippet(body) };
    }

    let data = envelope.data.unwrap_or(serde_json::Value::Null);
    match serde_json::from_value::<Vec<T>>(data) {
        Ok(rows) => GatewayReply::Ok { rows },
        Err(_) => GatewayReply::Error { raw: snippet(body) },
    }
}

fn snippet(body: &str) -> String {
    body.chars().take(REPLY_SNIPPET_CHARS).collect()
}
